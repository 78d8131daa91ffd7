//! Element model and deterministic input generation.
//!
//! Every element carries its original global position next to its sort key,
//! and the two fields travel together through every swap and every boundary
//! exchange: elements move only as whole units.
//!
//! Values come from a per-index reseeded PRNG stream: global index `i` under
//! seed `s` draws from a fresh ChaCha8 stream seeded with `s * (i + 5)`.
//! No draw depends on a previous draw, so any worker can produce any slice
//! of the input on its own, and the same `(n, seed)` yields the identical
//! array no matter how the work is later split. That determinism is what
//! makes a distributed run checkable against the sequential reference.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// One sortable record: original global position plus sort key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    /// Global position assigned at generation time, never recomputed.
    pub index: usize,
    /// Sort key, one decimal digit in [0.0, 9.9].
    pub value: f64,
}

/// Generate the element at global index `i` for the given seed.
pub fn generate(seed: u64, i: usize) -> Element {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_mul(i as u64 + 5));
    let draw: u32 = rng.gen();
    Element {
        index: i,
        value: f64::from(draw % 100) / 10.0,
    }
}

/// Generate `len` consecutive elements starting at global index `start`.
///
/// This is what each worker would call to produce its own partition
/// without any communication.
pub fn generate_range(seed: u64, start: usize, len: usize) -> Vec<Element> {
    (start..start + len).map(|i| generate(seed, i)).collect()
}

/// Generate the full input sequence.
pub fn generate_all(seed: u64, n: usize) -> Vec<Element> {
    generate_range(seed, 0, n)
}

/// Generate the full input sequence using all CPU cores.
///
/// Per-index independence makes generation embarrassingly parallel. Worth
/// it for benchmark-sized inputs where n is large.
pub fn par_generate_all(seed: u64, n: usize) -> Vec<Element> {
    (0..n).into_par_iter().map(|i| generate(seed, i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_generate_deterministic() {
        let a = generate_all(1, 100);
        let b = generate_all(1, 100);
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_range_matches_full() {
        let full = generate_all(7, 64);
        let slice = generate_range(7, 16, 32);
        assert_eq!(&full[16..48], &slice[..]);
    }

    #[test]
    fn test_par_generate_matches_sequential() {
        let seq = generate_all(42, 1000);
        let par = par_generate_all(42, 1000);
        assert_eq!(seq, par);
    }

    #[test]
    fn test_values_one_decimal_digit() {
        for elem in generate_all(3, 500) {
            assert!(elem.value >= 0.0 && elem.value <= 9.9);
            // One decimal digit: the value is some whole number of tenths.
            let tenths = (elem.value * 10.0).round();
            assert!((elem.value - tenths / 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_indices_are_global_positions() {
        let elems = generate_range(9, 25, 10);
        for (k, elem) in elems.iter().enumerate() {
            assert_eq!(elem.index, 25 + k);
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut rng = rand::thread_rng();
        let seed: u64 = rng.gen();
        let a = generate_all(seed, 200);
        let b = generate_all(seed.wrapping_add(1), 200);
        assert_ne!(a, b);
    }
}
