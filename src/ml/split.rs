//! Seeded train/test splitting.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{Result, SpamSiftError};

/// Default seed for reproducible splits.
pub const DEFAULT_SPLIT_SEED: u64 = 42;

/// Default fraction of samples held out for evaluation.
pub const DEFAULT_TEST_SIZE: f64 = 0.2;

/// Shuffle `items` with a seeded RNG and split off `ceil(test_size * n)`
/// items as the test set.
///
/// Returns `(train, test)`. Fails when `test_size` is outside `(0, 1)` or when
/// either side would be empty.
///
/// # Examples
///
/// ```
/// use spamsift::ml::split::train_test_split;
///
/// let (train, test) = train_test_split((0..10).collect::<Vec<_>>(), 0.2, 42).unwrap();
/// assert_eq!(train.len(), 8);
/// assert_eq!(test.len(), 2);
/// ```
pub fn train_test_split<T>(mut items: Vec<T>, test_size: f64, seed: u64) -> Result<(Vec<T>, Vec<T>)> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(SpamSiftError::invalid_argument(format!(
            "test_size must be in (0, 1), got {test_size}"
        )));
    }

    let n = items.len();
    let n_test = (test_size * n as f64).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(SpamSiftError::dataset(format!(
            "cannot split {n} samples with test_size {test_size}: \
             train and test sets must both be non-empty"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    items.shuffle(&mut rng);

    let test = items.split_off(n - n_test);
    Ok((items, test))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes() {
        let (train, test) = train_test_split((0..101).collect(), 0.2, 42).unwrap();
        // ceil(0.2 * 101) = 21
        assert_eq!(test.len(), 21);
        assert_eq!(train.len(), 80);

        let mut all: Vec<i32> = train.into_iter().chain(test).collect();
        all.sort();
        assert_eq!(all, (0..101).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_is_deterministic() {
        let a = train_test_split((0..50).collect::<Vec<_>>(), 0.2, 7).unwrap();
        let b = train_test_split((0..50).collect::<Vec<_>>(), 0.2, 7).unwrap();
        assert_eq!(a, b);

        let c = train_test_split((0..50).collect::<Vec<_>>(), 0.2, 8).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_split_rejects_empty_sides() {
        assert!(train_test_split(vec![1], 0.2, 42).is_err());
        assert!(train_test_split(Vec::<i32>::new(), 0.2, 42).is_err());
        assert!(train_test_split(vec![1, 2, 3], 0.0, 42).is_err());
        assert!(train_test_split(vec![1, 2, 3], 1.0, 42).is_err());
        assert!(train_test_split(vec![1, 2], 0.5, 42).is_ok());
    }
}
