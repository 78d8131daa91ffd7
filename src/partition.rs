//! Partition layout and frontier bookkeeping.
//!
//! A partition is a contiguous, disjoint slice of `n / workers` elements
//! owned by exactly one worker for the whole run. The worker count must
//! evenly divide the element count; there is no remainder distribution.
//!
//! Every frontier decision a worker makes per pass lives here: whether the
//! partition has retired, where its local scan stops, and whether it still
//! offers an element to the right neighbor. Both sides of a boundary derive
//! their decisions from the same arithmetic, which is what rules out a
//! handshake one side performs and the other side never matches.

use crate::element::Element;
use crate::error::SortError;

/// One worker's slice of the global sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    /// Worker rank, 0-based.
    pub rank: usize,
    /// Total worker count.
    pub workers: usize,
    /// Elements per partition (`n / workers`).
    pub local_len: usize,
}

impl Partition {
    /// Layout for `rank` out of `workers` over an `n`-element sequence.
    /// Assumes divisibility was already validated by [`split`].
    pub fn new(rank: usize, workers: usize, n: usize) -> Self {
        debug_assert!(workers > 0 && rank < workers && n % workers == 0);
        Self {
            rank,
            workers,
            local_len: n / workers,
        }
    }

    /// Global index of this partition's first slot.
    pub fn global_start(&self) -> usize {
        self.rank * self.local_len
    }

    /// Global index of this partition's last slot.
    pub fn global_end(&self) -> usize {
        debug_assert!(self.local_len > 0);
        self.global_start() + self.local_len - 1
    }

    /// A partition retires the first time the frontier falls strictly left
    /// of its first slot; from then on it issues no messages and performs
    /// no comparisons.
    ///
    /// The strict `<` matters. At `limit == global_start` the pass's final
    /// comparison is `(limit - 1, limit)`, which is exactly this
    /// partition's left boundary handshake: the left neighbor still offers
    /// a candidate, so this partition must still answer. Retiring one pass
    /// earlier would leave that candidate unanswered forever.
    pub fn retired(&self, limit: usize) -> bool {
        limit < self.global_start()
    }

    /// True when the frontier lands inside this partition this pass: the
    /// local scan stops early and nothing is offered to the right.
    pub fn stops_inside(&self, limit: usize) -> bool {
        limit <= self.global_end()
    }

    /// Exclusive upper bound on adjacent-pair offsets for this pass's
    /// local scan. The pair at offset `j` compares slots `j` and `j + 1`;
    /// when the frontier stops inside the partition the last pair compared
    /// is `(limit - 1, limit)` in global terms.
    pub fn scan_bound(&self, limit: usize) -> usize {
        if self.stops_inside(limit) {
            limit - self.global_start()
        } else {
            self.local_len - 1
        }
    }
}

/// Split a sequence into `workers` contiguous partitions of equal length.
///
/// Fails with [`SortError::Config`] when `workers` is zero or does not
/// evenly divide the element count.
pub fn split(elements: Vec<Element>, workers: usize) -> Result<Vec<Vec<Element>>, SortError> {
    let n = elements.len();
    if workers == 0 || n % workers != 0 {
        return Err(SortError::Config { n, workers });
    }
    let local_len = n / workers;
    let mut parts: Vec<Vec<Element>> = Vec::with_capacity(workers);
    let mut iter = elements.into_iter();
    for _ in 0..workers {
        parts.push(iter.by_ref().take(local_len).collect());
    }
    debug_assert!(parts.iter().all(|p| p.len() == local_len));
    Ok(parts)
}
