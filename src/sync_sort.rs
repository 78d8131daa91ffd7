//! Synchronous boundary-exchange discipline.
//!
//! Every handshake blocks: a worker receives its left neighbor's candidate,
//! answers it, scans its own slice, then offers its last slot rightward and
//! blocks until the result comes back. The left neighbor cannot finish its
//! own cycle until that answer arrives, so one pass ripples down the whole
//! worker chain and per-pass latency grows with the number of active
//! workers. The pipelined discipline exists to hide exactly that cost.
//!
//! ## Pass anatomy
//!
//! For pass `pass` the frontier is `limit = n - 1 - pass`. An active worker
//! runs three phases in strict order:
//!
//! 1. **Left handshake** (all ranks but the first): receive the neighbor's
//!    candidate; if it beats the local first slot, keep it and return the
//!    displaced element (one swap, counted on this side); otherwise return
//!    the candidate unchanged.
//! 2. **Local scan**: adjacent compare-swaps up to the frontier-clipped
//!    bound.
//! 3. **Right handshake** (skipped by the last rank, and whenever the
//!    frontier stopped inside this partition): send the last slot, wait
//!    for the possibly-swapped element, store it back.
//!
//! Composed across all workers, the three phases are exactly one
//! sequential bubble pass over the whole sequence, swap for swap. Higher
//! ranks retire first -- large values migrate rightward a full partition
//! per pass while small values crawl leftward one slot per pass -- which
//! is an inherent load imbalance of the algorithm, not a scheduling
//! artifact. Rebalancing or finishing early on a swap-free pass would
//! change the message pattern and is deliberately left out.

use std::mem;

use crate::element::Element;
use crate::error::SortError;
use crate::links::WorkerLinks;
use crate::local_scan;
use crate::partition::Partition;
use crate::runner::{self, SortRun, WorkerReport};

/// Sort with blocking handshakes on `workers` threads.
///
/// Returns the gathered sequence with the summed and per-worker swap
/// counts. Fails fast with [`SortError::Config`] when `workers` does not
/// evenly divide the input length.
pub fn sort(elements: Vec<Element>, workers: usize) -> Result<SortRun, SortError> {
    runner::run(elements, workers, run_worker)
}

fn run_worker(
    part: Partition,
    mut local: Vec<Element>,
    links: WorkerLinks,
    n: usize,
) -> Result<WorkerReport, SortError> {
    let mut swaps = 0u64;

    for pass in 0..n.saturating_sub(1) {
        let limit = n - 1 - pass;
        if part.retired(limit) {
            break;
        }

        if let Some(ref left) = links.left {
            let incoming = left
                .candidate_rx
                .recv()
                .map_err(|_| SortError::LinkClosed { rank: part.rank, pass })?;
            let returned = if incoming.value > local[0].value {
                swaps += 1;
                mem::replace(&mut local[0], incoming)
            } else {
                incoming
            };
            left.result_tx
                .send(returned)
                .map_err(|_| SortError::LinkClosed { rank: part.rank, pass })?;
        }

        swaps += local_scan::scan(&mut local, part.scan_bound(limit));

        if let Some(ref right) = links.right {
            if !part.stops_inside(limit) {
                let last = part.local_len - 1;
                right
                    .candidate_tx
                    .send(local[last])
                    .map_err(|_| SortError::LinkClosed { rank: part.rank, pass })?;
                local[last] = right
                    .result_rx
                    .recv()
                    .map_err(|_| SortError::LinkClosed { rank: part.rank, pass })?;
            }
        }
    }

    Ok(WorkerReport {
        rank: part.rank,
        elements: local,
        swaps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{element, seq_sort};
    use proptest::prelude::*;

    fn reference(input: &[Element]) -> (Vec<Element>, u64) {
        let mut sorted = input.to_vec();
        let swaps = seq_sort::bubble_sort(&mut sorted);
        (sorted, swaps)
    }

    #[test]
    fn test_matches_reference_across_divisor_grid() {
        for n in [1usize, 2, 3, 4, 5, 6, 8, 9, 12, 16, 24] {
            for workers in (1..=n).filter(|w| n % w == 0) {
                for seed in [0u64, 1, 7] {
                    let input = element::generate_all(seed, n);
                    let (expected, expected_swaps) = reference(&input);
                    let run = sort(input, workers).unwrap();
                    assert_eq!(
                        run.elements, expected,
                        "elements differ at n={} workers={} seed={}",
                        n, workers, seed
                    );
                    assert_eq!(
                        run.total_swaps, expected_swaps,
                        "swap count differs at n={} workers={} seed={}",
                        n, workers, seed
                    );
                }
            }
        }
    }

    #[test]
    fn test_two_partition_scenario() {
        // n=6, seed=1, workers=2: partition 0 owns global [0, 2],
        // partition 1 owns global [3, 5].
        let input = element::generate_all(1, 6);
        let (expected, expected_swaps) = reference(&input);
        let run = sort(input, 2).unwrap();
        assert!(seq_sort::is_sorted(&run.elements));
        assert_eq!(run.elements, expected);
        assert_eq!(run.total_swaps, expected_swaps);
        assert_eq!(run.worker_swaps.len(), 2);
    }

    #[test]
    fn test_single_worker_never_handshakes() {
        let input = element::generate_all(5, 32);
        let (expected, expected_swaps) = reference(&input);
        let run = sort(input, 1).unwrap();
        assert_eq!(run.elements, expected);
        assert_eq!(run.total_swaps, expected_swaps);
        assert_eq!(run.worker_swaps, vec![expected_swaps]);
    }

    #[test]
    fn test_one_element_per_worker() {
        // Every local scan is empty; sorting happens entirely through
        // boundary handshakes.
        for seed in [1u64, 2, 99] {
            let input = element::generate_all(seed, 4);
            let (expected, expected_swaps) = reference(&input);
            let run = sort(input, 4).unwrap();
            assert_eq!(run.elements, expected);
            assert_eq!(run.total_swaps, expected_swaps);
        }
    }

    #[test]
    fn test_result_is_permutation_with_indices() {
        let input = element::generate_all(13, 36);
        let run = sort(input.clone(), 6).unwrap();
        let mut by_index = run.elements.clone();
        by_index.sort_by_key(|e| e.index);
        assert_eq!(by_index, input);
    }

    #[test]
    fn test_rejects_non_divisor_worker_count() {
        let input = element::generate_all(1, 10);
        assert!(matches!(
            sort(input, 3),
            Err(SortError::Config { n: 10, workers: 3 })
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_matches_reference(n in 1usize..48, pick in any::<u32>(), seed in any::<u64>()) {
            let divisors: Vec<usize> = (1..=n).filter(|d| n % d == 0).collect();
            let workers = divisors[pick as usize % divisors.len()];
            let input = element::generate_all(seed, n);
            let (expected, expected_swaps) = reference(&input);
            let run = sort(input, workers).unwrap();
            prop_assert_eq!(run.elements, expected);
            prop_assert_eq!(run.total_swaps, expected_swaps);
        }
    }
}
