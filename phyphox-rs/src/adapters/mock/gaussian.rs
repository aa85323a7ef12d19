use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::errors::PhyphoxError;

/// Functionality to add some Gaussian noise.
#[derive(Clone, Debug)]
pub(super) struct GaussianNoise {
    normal: Normal<f64>,
}

impl GaussianNoise {
    /// Creates new distribution from mean and stdev
    pub(super) fn new(mean: f64, stdev: f64) -> Result<Self, PhyphoxError> {
        let normal = Normal::new(mean, stdev)
            .map_err(|e| PhyphoxError::ClientBuild(format!("Invalid noise distribution: {}", e)))?;
        Ok(Self { normal })
    }

    /// Sample from distribution
    pub(super) fn draw_sample(&self, rng: &mut StdRng) -> f64 {
        self.normal.sample(rng)
    }

    /// Adds noise to sample
    pub(super) fn add_noise(&self, rng: &mut StdRng, data: f64) -> f64 {
        data + self.draw_sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_gaussian_new() {
        let noise = GaussianNoise::new(0.0, 1.0).unwrap();
        assert_eq!(noise.normal.mean(), 0.0);
        assert_eq!(noise.normal.std_dev(), 1.0);
    }

    #[test]
    fn test_gaussian_invalid_stdev() {
        assert!(GaussianNoise::new(0.0, -1.0).is_err());
    }

    #[test]
    fn test_add_noise() {
        let mean = 0.0;
        let stdev = 0.01;
        let mut rng = StdRng::seed_from_u64(7);
        let noise = GaussianNoise::new(mean, stdev).unwrap();
        let data = 5.0;
        let result = noise.add_noise(&mut rng, data);
        assert!(result >= data - 6.0 * stdev && result <= data + 6.0 * stdev);
    }
}
