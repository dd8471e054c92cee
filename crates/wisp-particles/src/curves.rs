//! Pure interpolation shapes shared by the particle kinds

/// Linear interpolation between two floats
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Fast start, slow arrival: 1 - (1-t)^2
pub fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Smooth 0 -> 1 -> 0 pulse over [0, 1]: (1 - cos(2*pi*t)) / 2
pub fn cosine_pulse(t: f32) -> f32 {
    (1.0 - (t * std::f32::consts::TAU).cos()) / 2.0
}

/// Linear rise to 1 at `peak`, then linear fall back to 0 at t = 1
pub fn triangle(t: f32, peak: f32) -> f32 {
    if t < peak {
        t / peak
    } else {
        (1.0 - t) / (1.0 - peak)
    }
}

/// Two descending ramps: 1 -> 0 over [0, split], then 1 -> 0 over [split, 1].
///
/// Gives a spawn flash that dies out, re-lights at `split`, and fades for
/// the rest of the lifetime.
pub fn sawtooth_fade(t: f32, split: f32) -> f32 {
    if t > split {
        1.0 - (t - split) / (1.0 - split)
    } else {
        (split - t) / split
    }
}
