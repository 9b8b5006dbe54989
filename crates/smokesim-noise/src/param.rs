//! Noise parameters given either fixed or as a range to sample once

use serde::Deserialize;
use smokesim_core::SeededRng;

/// A scalar noise parameter: a fixed value, or a `[low, high]` range that is
/// resolved to one uniform sample at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Param {
    Fixed(f32),
    Range(f32, f32),
}

impl Param {
    /// Resolve to a single value, drawing from `rng` for ranges.
    pub fn resolve(self, rng: &mut SeededRng) -> f32 {
        match self {
            Param::Fixed(v) => v,
            Param::Range(lo, hi) => rng.range(lo, hi),
        }
    }
}

impl From<f32> for Param {
    fn from(v: f32) -> Self {
        Param::Fixed(v)
    }
}

impl From<(f32, f32)> for Param {
    fn from((lo, hi): (f32, f32)) -> Self {
        Param::Range(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_resolves_to_itself() {
        let mut rng = SeededRng::new(1);
        assert_eq!(Param::Fixed(3.5).resolve(&mut rng), 3.5);
    }

    #[test]
    fn range_resolves_within_bounds() {
        let mut rng = SeededRng::new(1);
        for _ in 0..100 {
            let v = Param::Range(5.0, 10.0).resolve(&mut rng);
            assert!((5.0..10.0).contains(&v));
        }
    }

    #[test]
    fn deserializes_from_scalar_or_pair() {
        #[derive(Deserialize)]
        struct Holder {
            a: Param,
            b: Param,
        }
        let h: Holder = toml::from_str("a = 2.0\nb = [1.5, 2.5]").unwrap();
        assert_eq!(h.a, Param::Fixed(2.0));
        assert_eq!(h.b, Param::Range(1.5, 2.5));
    }
}
