//! Streaming adjacent compare-swap over one partition.

use crate::element::Element;

/// One left-to-right pass over pair offsets `[0, bound)`.
///
/// Swaps whenever the left value is strictly greater than the right and
/// returns the number of swaps performed. `bound` counts pairs, not slots:
/// the pair at offset `j` compares slots `j` and `j + 1`.
///
/// O(bound) time, O(1) extra space, no effects beyond the slice mutation
/// and the returned count.
pub fn scan(elements: &mut [Element], bound: usize) -> u64 {
    scan_range(elements, 0, bound)
}

/// The `[from, to)` portion of a pass.
///
/// The pipelined discipline uses this to run the pairs that cannot touch
/// a slot still waiting on a neighbor, then finish the rest once the wait
/// completes.
pub fn scan_range(elements: &mut [Element], from: usize, to: usize) -> u64 {
    debug_assert!(to == 0 || to < elements.len());
    let mut swaps = 0;
    for j in from..to {
        if elements[j].value > elements[j + 1].value {
            elements.swap(j, j + 1);
            swaps += 1;
        }
    }
    swaps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elems(values: &[f64]) -> Vec<Element> {
        values
            .iter()
            .enumerate()
            .map(|(index, &value)| Element { index, value })
            .collect()
    }

    fn values(elements: &[Element]) -> Vec<f64> {
        elements.iter().map(|e| e.value).collect()
    }

    #[test]
    fn test_full_scan_bubbles_max_right() {
        let mut data = elems(&[3.0, 1.0, 2.0, 0.5]);
        let swaps = scan(&mut data, 3);
        assert_eq!(values(&data), vec![1.0, 2.0, 0.5, 3.0]);
        assert_eq!(swaps, 3);
    }

    #[test]
    fn test_bound_limits_pairs() {
        let mut data = elems(&[3.0, 1.0, 2.0, 0.5]);
        // Only the first pair is compared.
        let swaps = scan(&mut data, 1);
        assert_eq!(values(&data), vec![1.0, 3.0, 2.0, 0.5]);
        assert_eq!(swaps, 1);
    }

    #[test]
    fn test_zero_bound_is_noop() {
        let mut data = elems(&[2.0, 1.0]);
        assert_eq!(scan(&mut data, 0), 0);
        assert_eq!(values(&data), vec![2.0, 1.0]);
    }

    #[test]
    fn test_equal_values_do_not_swap() {
        let mut data = elems(&[1.5, 1.5, 1.5]);
        assert_eq!(scan(&mut data, 2), 0);
        // Indices untouched: no swap means no movement at all.
        assert_eq!(data[0].index, 0);
        assert_eq!(data[2].index, 2);
    }

    #[test]
    fn test_swap_moves_whole_elements() {
        let mut data = elems(&[9.0, 1.0]);
        scan(&mut data, 1);
        assert_eq!(data[0].index, 1);
        assert_eq!(data[1].index, 0);
    }

    #[test]
    fn test_scan_range_tail_matches_split_scan() {
        let mut whole = elems(&[4.0, 2.0, 7.0, 1.0, 3.0]);
        let mut split = whole.clone();
        let full = scan(&mut whole, 4);
        let head = scan_range(&mut split, 0, 2);
        let tail = scan_range(&mut split, 2, 4);
        assert_eq!(whole, split);
        assert_eq!(full, head + tail);
    }
}
