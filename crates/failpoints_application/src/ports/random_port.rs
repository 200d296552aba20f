//! Random source port

#[cfg(test)]
use mockall::automock;
use rand::Rng;

/// Port for drawing uniform samples
#[cfg_attr(test, automock)]
pub trait RandomSource: Send + Sync {
    /// Uniform sample in [0.0, 1.0)
    fn sample(&self) -> f64;
}

/// Random source backed by the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn sample(&self) -> f64 {
        rand::rng().random::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_random_stays_in_unit_interval() {
        let random = ThreadRandom;
        for _ in 0..1000 {
            let sample = random.sample();
            assert!((0.0..1.0).contains(&sample));
        }
    }
}
