//! Normal-variate sampling helpers.
//!
//! Every stochastic parameter in the simulation (hatch times, clutch sizes,
//! genetic survival factors, breeding odds) is drawn from a clamped normal
//! distribution. All helpers take the caller's RNG so a seeded generator
//! yields a fully reproducible run.

use rand::Rng;
use rand_distr::Normal;

/// Draw one normally-distributed sample.
///
/// Invalid parameters (non-finite mean, non-finite or non-positive stddev)
/// degrade to the mean instead of panicking.
pub fn sample_normal<R: Rng + ?Sized>(rng: &mut R, mean: f32, stddev: f32) -> f32 {
    if !mean.is_finite() || !stddev.is_finite() || stddev <= 0.0 {
        return mean;
    }
    match Normal::new(mean, stddev) {
        Ok(dist) => rng.sample(dist),
        Err(_) => mean,
    }
}

/// Draw a normal sample and clamp it to `[lo, hi]`.
pub fn sample_normal_clamped<R: Rng + ?Sized>(
    rng: &mut R,
    mean: f32,
    stddev: f32,
    lo: f32,
    hi: f32,
) -> f32 {
    sample_normal(rng, mean, stddev).clamp(lo, hi)
}

/// Draw a clamped normal sample and round it to the nearest integer count.
///
/// Used for discrete quantities such as clutch sizes and stage countdowns.
pub fn sample_count<R: Rng + ?Sized>(
    rng: &mut R,
    mean: f32,
    stddev: f32,
    lo: f32,
    hi: f32,
) -> u32 {
    sample_normal_clamped(rng, mean, stddev, lo, hi).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_normal_moments() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let n = 10_000;
        let samples: Vec<f32> = (0..n).map(|_| sample_normal(&mut rng, 5.0, 2.0)).collect();

        let mean = samples.iter().sum::<f32>() / n as f32;
        let var = samples.iter().map(|s| (s - mean) * (s - mean)).sum::<f32>() / n as f32;

        assert!((mean - 5.0).abs() < 0.1, "mean off: {}", mean);
        assert!((var - 4.0).abs() < 0.3, "variance off: {}", var);
    }

    #[test]
    fn test_invalid_stddev_degrades_to_mean() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(sample_normal(&mut rng, 3.0, 0.0), 3.0);
        assert_eq!(sample_normal(&mut rng, 3.0, -1.0), 3.0);
        assert_eq!(sample_normal(&mut rng, 3.0, f32::NAN), 3.0);
    }

    #[test]
    fn test_clamped_sample_stays_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = sample_normal_clamped(&mut rng, 0.85, 0.10, 0.3, 1.0);
            assert!((0.3..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_count_distribution() {
        // Clutch-size rule: round(clamp(N(4, 1.5), 1, 8)).
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let n = 10_000;
        let draws: Vec<u32> = (0..n).map(|_| sample_count(&mut rng, 4.0, 1.5, 1.0, 8.0)).collect();

        assert!(draws.iter().all(|&c| (1..=8).contains(&c)));
        let mean = draws.iter().sum::<u32>() as f32 / n as f32;
        assert!((mean - 4.0).abs() < 0.1, "clutch mean off: {}", mean);
    }

    #[test]
    fn test_seeded_reproducibility() {
        let mut a = ChaCha8Rng::seed_from_u64(1234);
        let mut b = ChaCha8Rng::seed_from_u64(1234);
        for _ in 0..100 {
            assert_eq!(
                sample_normal(&mut a, 0.0, 1.0).to_bits(),
                sample_normal(&mut b, 0.0, 1.0).to_bits()
            );
        }
    }
}
