//! Point-to-point boundary links between neighboring workers.
//!
//! Each partition boundary carries two channels: one for the candidate
//! element offered rightward, one for the result element returned leftward
//! after the comparison. Keeping the two kinds on separate channels means a
//! worker can never match a neighbor's pass-N candidate against its own
//! pass-(N+1) receive; within one kind the protocol keeps at most a single
//! message in flight per boundary.
//!
//! Channels are unbounded, so a send always completes immediately (eager
//! delivery of a single small record) and only receives block. Workers
//! exchange exclusively with `rank - 1` and `rank + 1`; there is no
//! broadcast and no barrier anywhere in the pass loop.

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::element::Element;

/// A boundary as seen by the right-hand worker.
pub struct LeftLink {
    /// Candidates offered by the left neighbor.
    pub candidate_rx: Receiver<Element>,
    /// Results returned to the left neighbor after the comparison.
    pub result_tx: Sender<Element>,
}

/// A boundary as seen by the left-hand worker.
pub struct RightLink {
    /// Candidates offered to the right neighbor.
    pub candidate_tx: Sender<Element>,
    /// Results coming back from the right neighbor.
    pub result_rx: Receiver<Element>,
}

/// Both boundaries of one worker. `left` is `None` for rank 0 and `right`
/// is `None` for the last rank; a single worker has no links at all.
pub struct WorkerLinks {
    pub left: Option<LeftLink>,
    pub right: Option<RightLink>,
}

/// Build the nearest-neighbor mesh for `workers` ranks, indexed by rank.
pub fn build(workers: usize) -> Vec<WorkerLinks> {
    let mut links: Vec<WorkerLinks> = (0..workers)
        .map(|_| WorkerLinks {
            left: None,
            right: None,
        })
        .collect();
    for boundary in 1..workers {
        let (candidate_tx, candidate_rx) = unbounded();
        let (result_tx, result_rx) = unbounded();
        links[boundary - 1].right = Some(RightLink {
            candidate_tx,
            result_rx,
        });
        links[boundary].left = Some(LeftLink {
            candidate_rx,
            result_tx,
        });
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_worker_has_no_links() {
        let links = build(1);
        assert_eq!(links.len(), 1);
        assert!(links[0].left.is_none());
        assert!(links[0].right.is_none());
    }

    #[test]
    fn test_edge_ranks() {
        let links = build(3);
        assert!(links[0].left.is_none());
        assert!(links[0].right.is_some());
        assert!(links[1].left.is_some());
        assert!(links[1].right.is_some());
        assert!(links[2].left.is_some());
        assert!(links[2].right.is_none());
    }

    #[test]
    fn test_boundary_round_trip() {
        let links = build(2);
        let right_of_0 = links[0].right.as_ref().unwrap();
        let left_of_1 = links[1].left.as_ref().unwrap();

        let candidate = Element {
            index: 1,
            value: 4.2,
        };
        right_of_0.candidate_tx.send(candidate).unwrap();
        let received = left_of_1.candidate_rx.recv().unwrap();
        assert_eq!(received, candidate);

        left_of_1.result_tx.send(received).unwrap();
        assert_eq!(right_of_0.result_rx.recv().unwrap(), candidate);
    }

    #[test]
    fn test_kinds_do_not_cross() {
        let links = build(2);
        let right_of_0 = links[0].right.as_ref().unwrap();
        let left_of_1 = links[1].left.as_ref().unwrap();

        right_of_0
            .candidate_tx
            .send(Element {
                index: 0,
                value: 1.0,
            })
            .unwrap();
        // Nothing arrives on the result channel from a candidate send.
        assert!(right_of_0.result_rx.try_recv().is_err());
        assert!(left_of_1.candidate_rx.try_recv().is_ok());
    }
}
