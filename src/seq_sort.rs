//! Sequential reference bubble sort.
//!
//! The oracle every distributed run is checked against: the same strict
//! greater-than comparison, the same pass structure, counted swap for swap.
//! Also the baseline for speedup measurements.

use crate::element::Element;

/// Full O(n²) bubble sort, returning the total number of swaps.
///
/// Outer index `i` runs from `n - 1` down to 1; inner index `j` from 0
/// below `i`; adjacent elements swap when the left value is strictly
/// greater. After the pass for a given `i`, every slot above `i` holds a
/// value at least as large as every slot at or below it.
pub fn bubble_sort(elements: &mut [Element]) -> u64 {
    let mut swaps = 0;
    for i in (1..elements.len()).rev() {
        for j in 0..i {
            if elements[j].value > elements[j + 1].value {
                elements.swap(j, j + 1);
                swaps += 1;
            }
        }
    }
    swaps
}

/// Check that a slice is non-decreasing by value.
#[inline]
pub fn is_sorted(elements: &[Element]) -> bool {
    elements.windows(2).all(|w| w[0].value <= w[1].value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element;
    use rand::Rng;

    /// Brute-force inversion count; bubble sort performs exactly one swap
    /// per inversion, which gives an independent check on the counter.
    fn inversions(elements: &[Element]) -> u64 {
        let mut count = 0;
        for i in 0..elements.len() {
            for j in i + 1..elements.len() {
                if elements[i].value > elements[j].value {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_sort_empty() {
        let mut data: Vec<Element> = vec![];
        assert_eq!(bubble_sort(&mut data), 0);
        assert!(is_sorted(&data));
    }

    #[test]
    fn test_sort_single() {
        let mut data = element::generate_all(1, 1);
        assert_eq!(bubble_sort(&mut data), 0);
    }

    #[test]
    fn test_sort_generated_input() {
        let mut data = element::generate_all(1, 200);
        bubble_sort(&mut data);
        assert!(is_sorted(&data));
    }

    #[test]
    fn test_swap_count_equals_inversions() {
        let mut rng = rand::thread_rng();
        for _ in 0..10 {
            let seed: u64 = rng.gen();
            let data = element::generate_all(seed, 80);
            let expected = inversions(&data);
            let mut sorted = data;
            assert_eq!(bubble_sort(&mut sorted), expected);
        }
    }

    #[test]
    fn test_indices_travel_with_values() {
        let input = element::generate_all(11, 50);
        let mut sorted = input.clone();
        bubble_sort(&mut sorted);
        // Same multiset of whole elements, reordered.
        let mut by_index = sorted.clone();
        by_index.sort_by_key(|e| e.index);
        assert_eq!(by_index, input);
    }

    #[test]
    fn test_equal_values_never_swap() {
        // Seed 0 reseeds every index with 0, so all values are identical.
        let mut data = element::generate_all(0, 30);
        let before = data.clone();
        assert_eq!(bubble_sort(&mut data), 0);
        assert_eq!(data, before);
    }

    #[test]
    fn test_is_sorted() {
        let sorted = [0.1, 0.5, 0.5, 2.0];
        let unsorted = [0.5, 0.1];
        assert!(is_sorted(
            &sorted
                .iter()
                .enumerate()
                .map(|(index, &value)| Element { index, value })
                .collect::<Vec<_>>()
        ));
        assert!(!is_sorted(
            &unsorted
                .iter()
                .enumerate()
                .map(|(index, &value)| Element { index, value })
                .collect::<Vec<_>>()
        ));
    }
}
