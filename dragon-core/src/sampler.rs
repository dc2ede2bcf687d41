//! Uniform draws used by branch generation.
//!
//! Every draw takes its two bounds as an unordered interval: `uniform(-80, -90)`
//! samples from `[-90, -80]`. Generation only talks to [`Sampler`], so tests
//! can plug in a seeded RNG or a fixed sampler while production uses
//! `rand::rng()`.

use rand::Rng;

pub trait Sampler {
    /// Uniform integer in the inclusive interval spanned by `a` and `b`.
    fn uniform_int(&mut self, a: i32, b: i32) -> i32;

    /// Uniform real in the interval spanned by `a` and `b`.
    fn uniform(&mut self, a: f32, b: f32) -> f32;
}

impl<R: Rng> Sampler for R {
    fn uniform_int(&mut self, a: i32, b: i32) -> i32 {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        self.random_range(lo..=hi)
    }

    fn uniform(&mut self, a: f32, b: f32) -> f32 {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if lo == hi {
            return lo;
        }
        self.random_range(lo..=hi)
    }
}
