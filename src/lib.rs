//! Distributed-memory parallel bubble sort.
//!
//! A fixed-size sequence is split into contiguous partitions, one per
//! worker thread, and sorted by cooperating bubble passes: neighbors
//! exchange a single boundary element per pass over dedicated channels
//! while each worker scans its own slice. The result is identical to a
//! sequential bubble sort over the whole sequence -- element for element
//! and swap for swap -- and [`seq_sort`] provides that sequential
//! reference as the correctness oracle and timing baseline.
//!
//! Two boundary-exchange disciplines implement the same protocol:
//!
//! - [`sync_sort`]: every handshake blocks; simple, but per-pass latency
//!   accumulates along the worker chain
//! - [`pipelined_sort`]: receives are pre-posted and waits deferred, so
//!   neighbor round trips overlap with local scanning
//!
//! Inputs come from [`element`]'s deterministic per-index generator, which
//! makes any distributed run reproducible and checkable regardless of how
//! many workers it used.

pub mod element;
pub mod error;
pub mod links;
pub mod local_scan;
pub mod partition;
pub mod pipelined_sort;
pub mod report;
pub mod runner;
pub mod seq_sort;
pub mod sync_sort;

pub use element::Element;
pub use error::SortError;
pub use runner::SortRun;
