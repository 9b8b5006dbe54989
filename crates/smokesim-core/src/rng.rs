//! Lightweight seeded xorshift64 PRNG — no external crate needed
//!
//! Every stochastic object in the simulation owns one of these, seeded
//! either explicitly or from its parent's instance, so whole runs replay
//! bit-identically from a single top-level seed.

pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            // xorshift cannot hold state 0
            state: if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits give a uniform dyadic fraction
        ((self.next_u64() >> 40) as f32) / ((1u32 << 24) as f32)
    }

    /// Returns a float in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Returns an integer in [min, max)
    pub fn randint(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = (max - min) as u64;
        min + (self.next_u64() % span) as i64
    }
}
