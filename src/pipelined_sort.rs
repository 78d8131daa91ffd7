//! Pipelined boundary-exchange discipline.
//!
//! Same comparisons, same swaps, same messages as [`crate::sync_sort`] --
//! issued earlier and awaited later, so a neighbor's round trip overlaps
//! with local scanning instead of stalling it:
//!
//! - The next pass's candidate receive is posted before the current scan
//!   runs, and only when this partition stays active under the next
//!   frontier. A posted receive that could never be matched would stall
//!   forever, so posting is gated on the same frontier arithmetic the
//!   neighbor uses for its final send.
//! - The result of a right handshake is not awaited inside the pass that
//!   sent it. The wait is deferred until the last slot is next needed:
//!   the scan pair that touches it, the next rightward offer, or -- for
//!   single-element partitions -- the next left handshake.
//! - The scan is split around that wait: pairs that cannot touch the last
//!   slot run first, while the neighbor's answer is still in flight.
//!
//! A receive still pending when the pass loop exits (retirement or the
//! final pass) is drained before the worker reports; holding every posted
//! receive as a value ties it to the loop's exit paths instead of to any
//! particular return statement.

use std::mem;

use crossbeam_channel::Receiver;

use crate::element::Element;
use crate::error::SortError;
use crate::links::WorkerLinks;
use crate::local_scan;
use crate::partition::Partition;
use crate::runner::{self, SortRun, WorkerReport};

/// Sort with pre-posted receives and deferred waits on `workers` threads.
///
/// Produces the identical sequence and swap counts as
/// [`crate::sync_sort::sort`] on the same input.
pub fn sort(elements: Vec<Element>, workers: usize) -> Result<SortRun, SortError> {
    runner::run(elements, workers, run_worker)
}

/// A receive that has been issued but not yet awaited.
///
/// Completing it consumes the token; dropping it retracts the request.
struct PostedRecv {
    rx: Receiver<Element>,
    rank: usize,
}

impl PostedRecv {
    fn post(rx: &Receiver<Element>, rank: usize) -> Self {
        Self {
            rx: rx.clone(),
            rank,
        }
    }

    fn complete(self, pass: usize) -> Result<Element, SortError> {
        self.rx.recv().map_err(|_| SortError::LinkClosed {
            rank: self.rank,
            pass,
        })
    }
}

fn run_worker(
    part: Partition,
    mut local: Vec<Element>,
    links: WorkerLinks,
    n: usize,
) -> Result<WorkerReport, SortError> {
    let mut swaps = 0u64;
    let last = part.local_len.saturating_sub(1);

    // The pass-0 candidate receive, posted before the loop starts.
    let mut posted_left: Option<PostedRecv> = match links.left {
        Some(ref left) if n >= 2 && !part.retired(n - 1) => {
            Some(PostedRecv::post(&left.candidate_rx, part.rank))
        }
        _ => None,
    };
    // A right-handshake result not yet awaited, destined for the last slot.
    let mut pending_result: Option<PostedRecv> = None;
    let mut final_pass = 0;

    for pass in 0..n.saturating_sub(1) {
        final_pass = pass;
        let limit = n - 1 - pass;
        if part.retired(limit) {
            break;
        }

        // With a single slot, the left handshake reads the same slot the
        // deferred result writes; the wait cannot move past it.
        if part.local_len == 1 {
            if let Some(pending) = pending_result.take() {
                local[last] = pending.complete(pass)?;
            }
        }

        if let Some(ref left) = links.left {
            let incoming = match posted_left.take() {
                Some(posted) => posted.complete(pass)?,
                None => left
                    .candidate_rx
                    .recv()
                    .map_err(|_| SortError::LinkClosed { rank: part.rank, pass })?,
            };
            let returned = if incoming.value > local[0].value {
                swaps += 1;
                mem::replace(&mut local[0], incoming)
            } else {
                incoming
            };
            left.result_tx
                .send(returned)
                .map_err(|_| SortError::LinkClosed { rank: part.rank, pass })?;

            // Post the next pass's receive before scanning -- but only if
            // this partition is still active under the next frontier,
            // which is exactly when the neighbor will send again.
            if pass + 1 < n - 1 && !part.retired(limit - 1) {
                posted_left = Some(PostedRecv::post(&left.candidate_rx, part.rank));
            }
        }

        let bound = part.scan_bound(limit);
        let interior = bound.min(part.local_len.saturating_sub(2));
        swaps += local_scan::scan(&mut local, interior);

        let offers_right = links.right.is_some() && !part.stops_inside(limit);
        if bound > interior || offers_right {
            if let Some(pending) = pending_result.take() {
                local[last] = pending.complete(pass)?;
            }
        }
        swaps += local_scan::scan_range(&mut local, interior, bound);

        if offers_right {
            if let Some(ref right) = links.right {
                right
                    .candidate_tx
                    .send(local[last])
                    .map_err(|_| SortError::LinkClosed { rank: part.rank, pass })?;
                pending_result = Some(PostedRecv::post(&right.result_rx, part.rank));
            }
        }
    }

    // Drain. Only a right-handshake result can still be in flight here:
    // the posted candidate receive is gated on next-pass activity, so the
    // loop always consumes it before exiting.
    if let Some(pending) = pending_result.take() {
        local[last] = pending.complete(final_pass)?;
    }
    debug_assert!(posted_left.is_none());
    if let Some(ref left) = links.left {
        debug_assert!(left.candidate_rx.try_recv().is_err());
    }
    if let Some(ref right) = links.right {
        debug_assert!(right.result_rx.try_recv().is_err());
    }

    Ok(WorkerReport {
        rank: part.rank,
        elements: local,
        swaps,
    })
}
