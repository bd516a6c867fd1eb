//! Shared helpers.

use std::ops::Range;

/// Binary search over an ordered, gap-free partition of `0..total_len`.
///
/// Returns the index of the range containing `offset`, where a half-open
/// range `start..end` contains `offset` iff `start <= offset < end`. The
/// final range is treated as inclusive of `total_len - 1`, so the last
/// offset of the partition always resolves to the last range even if the
/// partition under-covers (a pathological measurer, say). Offsets outside
/// `0..total_len` return `None`.
///
/// Used for both the chapter search and the page search.
pub(crate) fn search_partition<F>(
    count: usize,
    total_len: usize,
    offset: usize,
    range_at: F,
) -> Option<usize>
where
    F: Fn(usize) -> Range<usize>,
{
    if count == 0 || offset >= total_len {
        return None;
    }

    let mut low = 0;
    let mut high = count - 1;
    while low <= high {
        let mid = low + (high - low) / 2;
        let range = range_at(mid);
        if offset < range.start {
            if mid == 0 {
                break;
            }
            high = mid - 1;
        } else if offset >= range.end {
            low = mid + 1;
        } else {
            return Some(mid);
        }
    }

    // In-bounds offset that no half-open range claimed: attribute it to the
    // last range (inclusive upper bound on the tail).
    Some(count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(ranges: &[Range<usize>], total: usize, offset: usize) -> Option<usize> {
        search_partition(ranges.len(), total, offset, |i| ranges[i].clone())
    }

    #[test]
    fn test_empty_partition() {
        assert_eq!(search(&[], 0, 0), None);
    }

    #[test]
    fn test_single_range() {
        let ranges = [0..10];
        assert_eq!(search(&ranges, 10, 0), Some(0));
        assert_eq!(search(&ranges, 10, 9), Some(0));
        assert_eq!(search(&ranges, 10, 10), None);
    }

    #[test]
    fn test_boundary_offsets() {
        let ranges = [0..4, 4..9, 9..20];
        let total = 20;
        // First and last offset of every range.
        assert_eq!(search(&ranges, total, 0), Some(0));
        assert_eq!(search(&ranges, total, 3), Some(0));
        assert_eq!(search(&ranges, total, 4), Some(1));
        assert_eq!(search(&ranges, total, 8), Some(1));
        assert_eq!(search(&ranges, total, 9), Some(2));
        assert_eq!(search(&ranges, total, 19), Some(2));
        assert_eq!(search(&ranges, total, 20), None);
        assert_eq!(search(&ranges, total, 100), None);
    }

    #[test]
    fn test_every_offset_resolves() {
        let ranges = [0..1, 1..2, 2..7, 7..11, 11..12];
        for offset in 0..12 {
            let idx = search(&ranges, 12, offset).unwrap();
            assert!(
                ranges[idx].contains(&offset),
                "offset {} resolved to {:?}",
                offset,
                ranges[idx]
            );
        }
    }

    #[test]
    fn test_undercovering_tail_goes_to_last_range() {
        // Pathological partition that stops short of the total length. The
        // trailing offsets still resolve to the last range.
        let ranges = [0..5, 5..8];
        assert_eq!(search(&ranges, 10, 8), Some(1));
        assert_eq!(search(&ranges, 10, 9), Some(1));
        assert_eq!(search(&ranges, 10, 10), None);
    }
}
