//! Shared scaffolding for a distributed run.
//!
//! Splits the input into partitions, wires the boundary mesh, spawns one
//! scoped thread per worker, joins them all, and gathers the partitions
//! back in rank order. The join is the only global synchronization point
//! and sits outside the pass loop; inside the loop, ordering comes purely
//! from the neighbor handshakes.

use std::thread;

use crate::element::Element;
use crate::error::SortError;
use crate::links::{self, WorkerLinks};
use crate::partition::{self, Partition};

/// What one worker hands back through its join handle.
pub struct WorkerReport {
    /// Worker rank.
    pub rank: usize,
    /// The worker's partition in its final state.
    pub elements: Vec<Element>,
    /// Swaps this worker performed (local scan plus left handshakes).
    pub swaps: u64,
}

/// Outcome of a full distributed run.
#[derive(Debug, Clone, PartialEq)]
pub struct SortRun {
    /// The gathered sequence in rank order, which is final global order.
    pub elements: Vec<Element>,
    /// Order-independent sum of the per-worker swap counters.
    pub total_swaps: u64,
    /// Per-worker swap counters, indexed by rank.
    pub worker_swaps: Vec<u64>,
}

/// The per-worker pass loop of one discipline.
pub(crate) type WorkerFn =
    fn(Partition, Vec<Element>, WorkerLinks, usize) -> Result<WorkerReport, SortError>;

/// Run `worker` on every partition and gather the results.
pub(crate) fn run(
    elements: Vec<Element>,
    workers: usize,
    worker: WorkerFn,
) -> Result<SortRun, SortError> {
    let n = elements.len();
    let parts = partition::split(elements, workers)?;
    let mesh = links::build(workers);

    let results: Vec<Result<WorkerReport, SortError>> = thread::scope(|scope| {
        let handles: Vec<_> = parts
            .into_iter()
            .zip(mesh)
            .enumerate()
            .map(|(rank, (local, worker_links))| {
                let part = Partition::new(rank, workers, n);
                scope.spawn(move || worker(part, local, worker_links, n))
            })
            .collect();
        // A failed worker drops its channel endpoints, which unblocks its
        // neighbors with a closed-link error, so every join completes.
        handles
            .into_iter()
            .enumerate()
            .map(|(rank, handle)| {
                handle
                    .join()
                    .unwrap_or(Err(SortError::WorkerPanicked { rank }))
            })
            .collect()
    });

    let mut reports = Vec::with_capacity(workers);
    for result in results {
        reports.push(result?);
    }

    let worker_swaps: Vec<u64> = reports.iter().map(|r| r.swaps).collect();
    let total_swaps = worker_swaps.iter().sum();
    let mut gathered = Vec::with_capacity(n);
    for (rank, report) in reports.into_iter().enumerate() {
        debug_assert_eq!(report.rank, rank);
        gathered.extend(report.elements);
    }

    Ok(SortRun {
        elements: gathered,
        total_swaps,
        worker_swaps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element;

    /// A worker that touches nothing: exercises split, spawn, join, and
    /// rank-ordered gather without any communication.
    fn passthrough(
        part: Partition,
        local: Vec<Element>,
        _links: WorkerLinks,
        _n: usize,
    ) -> Result<WorkerReport, SortError> {
        Ok(WorkerReport {
            rank: part.rank,
            elements: local,
            swaps: part.rank as u64,
        })
    }

    #[test]
    fn test_gather_preserves_rank_order() {
        let input = element::generate_all(3, 24);
        let run = run(input.clone(), 4, passthrough).unwrap();
        assert_eq!(run.elements, input);
        assert_eq!(run.worker_swaps, vec![0, 1, 2, 3]);
        assert_eq!(run.total_swaps, 6);
    }

    #[test]
    fn test_config_error_before_any_spawn() {
        let input = element::generate_all(3, 10);
        assert_eq!(
            run(input, 4, passthrough),
            Err(SortError::Config { n: 10, workers: 4 })
        );
    }

    #[test]
    fn test_empty_input() {
        let run = run(Vec::new(), 2, passthrough).unwrap();
        assert!(run.elements.is_empty());
        assert_eq!(run.total_swaps, 1);
    }
}
