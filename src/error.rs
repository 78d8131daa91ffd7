//! Error type for distributed sort runs.
//!
//! The computation is fully deterministic, so there is nothing to retry:
//! every variant is terminal for the run. Allocation failure aborts the
//! process (Rust's default) and has no variant here.

use thiserror::Error;

/// Error type for distributed sort operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SortError {
    /// Worker count does not evenly divide the element count (or is zero).
    /// Detected once, before any worker starts.
    #[error("worker count {workers} does not evenly divide element count {n}")]
    Config {
        /// Total element count
        n: usize,
        /// Requested worker count
        workers: usize,
    },

    /// A boundary channel closed while a handshake was still expected.
    /// This is the in-process image of a permanently unmatched
    /// send/receive; the protocol prevents it by deriving retirement
    /// identically on both sides of every boundary, so seeing it means a
    /// neighbor died mid-run.
    #[error("boundary link closed on worker {rank} during pass {pass}")]
    LinkClosed {
        /// Rank of the worker that observed the closed link
        rank: usize,
        /// Pass number at the time of the failure
        pass: usize,
    },

    /// A worker thread panicked; its partition is lost.
    #[error("worker {rank} panicked")]
    WorkerPanicked {
        /// Rank of the failed worker
        rank: usize,
    },
}
