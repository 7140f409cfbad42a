//! Random sampling helpers

use fastrand::Rng;

/// Uniform value in `[min, max)`
pub fn random_range(rng: &mut Rng, min: f32, max: f32) -> f32 {
    rng.f32() * (max - min) + min
}

/// `1.0` or `-1.0` with equal probability
pub fn random_sign(rng: &mut Rng) -> f32 {
    if rng.bool() {
        1.0
    } else {
        -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_range_bounds() {
        let mut rng = Rng::with_seed(7);
        for _ in 0..1000 {
            let v = random_range(&mut rng, 0.5, 2.0);
            assert!((0.5..=2.0).contains(&v), "{v} out of range");
        }
    }

    #[test]
    fn test_random_range_degenerate() {
        let mut rng = Rng::with_seed(1);
        assert_eq!(random_range(&mut rng, 3.0, 3.0), 3.0);
    }

    #[test]
    fn test_random_sign_hits_both() {
        let mut rng = Rng::with_seed(42);
        let signs: Vec<f32> = (0..64).map(|_| random_sign(&mut rng)).collect();
        assert!(signs.contains(&1.0));
        assert!(signs.contains(&-1.0));
    }
}
