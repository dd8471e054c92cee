//! Lightweight xorshift32 PRNG — no external crate needed
//!
//! Cosmetic randomness only (tick jitter, spawn angles); seedable so
//! tests are reproducible.

pub struct EffectRng {
    state: u32,
}

impl EffectRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns a float in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Returns an integer in [min, max], inclusive on both ends
    pub fn range_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + self.next_u32() % span
    }

    /// Returns an angle in degrees, [0, 360)
    pub fn angle(&mut self) -> f32 {
        self.range(0.0, 360.0)
    }

    /// Returns a radius in [0, 1) distributed uniformly over a disc's area
    pub fn disc_radius(&mut self) -> f32 {
        self.next_f32().sqrt()
    }
}
