//! Jittered event tickers
//!
//! A ticker turns a continuously accumulating quantity (frame time, or
//! frame time scaled by a rate) into a stream of discrete events with a
//! randomized gap between them. Leftover progress carries over between
//! calls exactly: nothing is lost, nothing is counted twice. Each event
//! comes back as its offset within the current call's input, so callers
//! can prewarm whatever they spawn to the correct sub-frame position.

use crate::rand::EffectRng;
use wisp_core::{Result, WispError};

/// Jittered event ticker over an integer tick domain.
///
/// The gap to each event is re-sampled uniformly from `[min, max]` ticks.
/// The very first gap is drawn from `[1, uniform(min, max)]` instead, so a
/// batch of tickers created on the same frame doesn't fire in lockstep.
pub struct IntTicker {
    min: u32,
    max: u32,
    /// Ticks remaining until the next event; always >= 1 between calls
    next: u32,
}

impl IntTicker {
    pub fn new(min: u32, max: u32, rng: &mut EffectRng) -> Result<Self> {
        if min < 1 || min > max {
            return Err(WispError::TickerBounds(format!(
                "need 1 <= min <= max, got {min}..={max}"
            )));
        }
        let gap = rng.range_inclusive(min, max);
        Ok(Self {
            min,
            max,
            next: rng.range_inclusive(1, gap),
        })
    }

    /// Consume `ticks` and return the cumulative offset of every event that
    /// fired, strictly increasing, each in `[1, ticks]`.
    ///
    /// A ticker with a fixed 5-tick gap answers `tick(3)` with nothing,
    /// a following `tick(21)` with `[2, 7, 12, 17]`, and a further
    /// `tick(5)` with `[1]`.
    pub fn tick(&mut self, mut ticks: u32, rng: &mut EffectRng) -> Vec<u32> {
        let mut events = Vec::new();
        let mut consumed = 0;
        while self.next <= ticks {
            consumed += self.next;
            ticks -= self.next;
            events.push(consumed);
            self.next = rng.range_inclusive(self.min, self.max);
        }
        self.next -= ticks;
        events
    }
}

/// Jittered event ticker over float seconds.
///
/// Same contract as [`IntTicker`] with gaps re-sampled from `[min, max)`
/// seconds; offsets are in `(0, amount]`.
pub struct FloatTicker {
    min: f32,
    max: f32,
    next: f32,
}

impl FloatTicker {
    pub fn new(min: f32, max: f32, rng: &mut EffectRng) -> Result<Self> {
        if !(min > 0.0) || min > max {
            return Err(WispError::TickerBounds(format!(
                "need 0 < min <= max, got {min}..{max}"
            )));
        }
        let gap = rng.range(min, max);
        Ok(Self {
            min,
            max,
            next: rng.range(0.0, gap).max(f32::EPSILON),
        })
    }

    /// A ticker that fires exactly every `gap` seconds, no jitter
    pub fn exact(gap: f32, rng: &mut EffectRng) -> Result<Self> {
        Self::new(gap, gap, rng)
    }

    pub fn tick(&mut self, mut amount: f32, rng: &mut EffectRng) -> Vec<f32> {
        let mut events = Vec::new();
        if !(amount > 0.0) {
            return events;
        }
        let mut consumed = 0.0;
        while self.next <= amount {
            consumed += self.next;
            amount -= self.next;
            events.push(consumed);
            self.next = rng.range(self.min, self.max).max(f32::EPSILON);
        }
        self.next -= amount;
        events
    }
}

/// Event ticker phase-locked to an exact repeating period.
///
/// The period is subdivided into `ticks_per_period` integer ticks and the
/// incoming float time is accumulated in tick units (whole ticks drive an
/// internal [`IntTicker`], the sub-tick fraction is carried to the next
/// call). However the frame times split, the long-run event phase stays
/// aligned to the period — required by emitters locked to a rotating
/// reference frame, where free-running float jitter would drift.
pub struct PhaseTicker {
    ticker: IntTicker,
    period: f32,
    ticks_per_period: u32,
    /// Whole ticks consumed, wrapped to [0, ticks_per_period)
    phase: u32,
    /// Sub-tick remainder in tick units, [0, 1)
    frac: f32,
}

impl PhaseTicker {
    pub fn new(
        period: f32,
        ticks_per_period: u32,
        min_ticks: u32,
        max_ticks: u32,
        rng: &mut EffectRng,
    ) -> Result<Self> {
        if !(period > 0.0) || ticks_per_period == 0 {
            return Err(WispError::TickerPeriod(format!(
                "need period > 0 and ticks > 0, got {period} / {ticks_per_period}"
            )));
        }
        Ok(Self {
            ticker: IntTicker::new(min_ticks, max_ticks, rng)?,
            period,
            ticks_per_period,
            phase: 0,
            frac: 0.0,
        })
    }

    /// Consume `amount` seconds; offsets come back in seconds, measured
    /// from the start of this call.
    pub fn tick(&mut self, amount: f32, rng: &mut EffectRng) -> Vec<f32> {
        if !(amount > 0.0) {
            return Vec::new();
        }
        let n = self.ticks_per_period as f32;
        let tick_len = self.period / n;

        let ticks_f = amount / tick_len + self.frac;
        let whole = ticks_f.floor().max(0.0);
        let entry_frac = self.frac;
        self.frac = (ticks_f - whole).clamp(0.0, 1.0 - f32::EPSILON);

        let events = self
            .ticker
            .tick(whole as u32, rng)
            .into_iter()
            .map(|consumed| (consumed as f32 - entry_frac) * tick_len)
            .collect();

        self.phase = ((self.phase as u64 + whole as u64) % self.ticks_per_period as u64) as u32;
        events
    }

    /// Current whole-tick phase within the period
    pub fn phase(&self) -> u32 {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_ticker_rejects_bad_bounds() {
        let mut rng = EffectRng::new(1);
        assert!(IntTicker::new(0, 4, &mut rng).is_err());
        assert!(IntTicker::new(5, 4, &mut rng).is_err());
        assert!(IntTicker::new(4, 4, &mut rng).is_ok());
    }

    #[test]
    fn int_ticker_fixed_gap_sequence() {
        let mut rng = EffectRng::new(2);
        let mut ticker = IntTicker::new(5, 5, &mut rng).unwrap();
        // Force a known starting gap so the example sequence is exact
        ticker.next = 5;

        assert!(ticker.tick(3, &mut rng).is_empty());
        assert_eq!(ticker.tick(21, &mut rng), vec![2, 7, 12, 17]);
        assert_eq!(ticker.tick(5, &mut rng), vec![1]);
    }

    #[test]
    fn int_ticker_zero_is_a_noop() {
        let mut rng = EffectRng::new(3);
        let mut ticker = IntTicker::new(2, 9, &mut rng).unwrap();
        let before = ticker.next;
        assert!(ticker.tick(0, &mut rng).is_empty());
        assert_eq!(ticker.next, before);
    }

    #[test]
    fn int_ticker_conserves_input() {
        // With a fixed gap, consumed gaps plus progress into the pending
        // gap must equal the cumulative input exactly, at every call split.
        let mut rng = EffectRng::new(4);
        let mut ticker = IntTicker::new(7, 7, &mut rng).unwrap();
        ticker.next = 7;

        let mut input: u64 = 0;
        let mut events: u64 = 0;
        for amount in [0u32, 5, 1, 30, 2, 13, 100, 6] {
            input += amount as u64;
            for offset in ticker.tick(amount, &mut rng) {
                assert!(offset >= 1 && offset <= amount);
                events += 1;
            }
            assert!(ticker.next >= 1);
            assert_eq!(events * 7 + (7 - ticker.next as u64), input);
        }
    }

    #[test]
    fn int_ticker_gaps_stay_in_bounds() {
        let mut rng = EffectRng::new(5);
        let mut ticker = IntTicker::new(4, 9, &mut rng).unwrap();
        let mut last_cumulative: u64 = 0;
        let mut cumulative_base: u64 = 0;
        let mut first = true;
        for _ in 0..200 {
            let offsets = ticker.tick(25, &mut rng);
            for offset in &offsets {
                let absolute = cumulative_base + *offset as u64;
                if !first {
                    let gap = absolute - last_cumulative;
                    assert!((4..=9).contains(&(gap as u32)), "gap {gap} out of bounds");
                }
                first = false;
                last_cumulative = absolute;
            }
            cumulative_base += 25;
        }
    }

    #[test]
    fn float_ticker_conserves_input() {
        // Fixed 0.25s gap and binary-exact amounts keep the arithmetic
        // exact: consumed gaps + progress into the pending gap == input.
        let mut rng = EffectRng::new(6);
        let mut ticker = FloatTicker::new(0.25, 0.25, &mut rng).unwrap();
        ticker.next = 0.25;

        let mut input = 0.0f64;
        let mut events: u64 = 0;
        for amount in [0.125f32, 0.5, 0.0, 0.0625, 1.0, 0.25, 0.3125] {
            input += amount as f64;
            for offset in ticker.tick(amount, &mut rng) {
                assert!(offset > 0.0 && offset <= amount + 1e-6);
                events += 1;
            }
            let pending = 0.25 - ticker.next as f64;
            assert!((events as f64 * 0.25 + pending - input).abs() < 1e-6);
        }
    }

    #[test]
    fn float_ticker_rate_scenario() {
        // ~100 events/sec: one second of input yields between 1/max and
        // 1/min events, offsets strictly increasing and <= 1.0
        let mut rng = EffectRng::new(7);
        let mut ticker = FloatTicker::new(0.008, 0.012, &mut rng).unwrap();
        let offsets = ticker.tick(1.0, &mut rng);
        assert!(
            offsets.len() >= 83 && offsets.len() <= 125,
            "got {} events",
            offsets.len()
        );
        let mut prev = 0.0;
        for &offset in &offsets {
            assert!(offset > prev);
            assert!(offset <= 1.0);
            prev = offset;
        }
    }

    #[test]
    fn float_ticker_zero_is_a_noop() {
        let mut rng = EffectRng::new(8);
        let mut ticker = FloatTicker::new(0.1, 0.2, &mut rng).unwrap();
        let before = ticker.next;
        assert!(ticker.tick(0.0, &mut rng).is_empty());
        assert_eq!(ticker.next, before);
    }

    #[test]
    fn float_ticker_gaps_stay_in_bounds() {
        let mut rng = EffectRng::new(9);
        let mut ticker = FloatTicker::new(0.02, 0.05, &mut rng).unwrap();
        // Skip the (shorter) initial gap, then verify sampled gaps
        let mut absolute = Vec::new();
        let mut base = 0.0f64;
        for _ in 0..50 {
            for offset in ticker.tick(0.3, &mut rng) {
                absolute.push(base + offset as f64);
            }
            base += 0.3;
        }
        for pair in absolute.windows(2) {
            let gap = pair[1] - pair[0];
            assert!(gap >= 0.02 - 1e-4 && gap <= 0.05 + 1e-4, "gap {gap}");
        }
    }

    #[test]
    fn phase_ticker_rejects_bad_period() {
        let mut rng = EffectRng::new(10);
        assert!(PhaseTicker::new(0.0, 8, 1, 2, &mut rng).is_err());
        assert!(PhaseTicker::new(2.0, 0, 1, 2, &mut rng).is_err());
    }

    #[test]
    fn phase_ticker_locks_to_period() {
        // Whole multiples of the period leave the phase at 0 (mod N),
        // however the calls are split. Binary-exact splits keep the
        // float->tick conversion exact.
        let mut rng = EffectRng::new(11);
        let mut ticker = PhaseTicker::new(2.0, 8, 2, 5, &mut rng).unwrap();

        for amount in [0.25f32, 0.5, 0.25, 1.0, 0.75, 0.75, 0.5] {
            ticker.tick(amount, &mut rng);
        }
        // 4.0 seconds = 2 full periods
        assert_eq!(ticker.phase(), 0);
    }

    #[test]
    fn phase_ticker_carries_subtick_time() {
        // Amounts smaller than one tick must not be dropped
        let mut rng = EffectRng::new(12);
        let mut ticker = PhaseTicker::new(1.0, 8, 1, 1, &mut rng).unwrap();
        // tick length 0.125s, gap always 1 tick -> one event per 0.125s;
        // each call contributes a quarter tick
        let mut events = 0;
        for _ in 0..100 {
            events += ticker.tick(0.03125, &mut rng).len();
        }
        // 3.125 seconds of input at 8 events/sec
        assert_eq!(events, 25);
        assert_eq!(ticker.phase(), 1);
    }

    #[test]
    fn phase_ticker_offsets_within_amount() {
        let mut rng = EffectRng::new(13);
        let mut ticker = PhaseTicker::new(14.0, 7875, 110, 140, &mut rng).unwrap();
        for _ in 0..600 {
            for offset in ticker.tick(0.016, &mut rng) {
                assert!(offset >= 0.0 && offset <= 0.016 + 1e-5);
            }
        }
    }
}
