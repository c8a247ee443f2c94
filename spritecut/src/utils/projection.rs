//! Run finding over projection profiles.
//!
//! A projection is a list of foreground counts, one per row or per column. Runs of
//! non-zero entries become [`Segment`]s. Short dips to zero inside a run are
//! tolerated until `gap_threshold` zeros are seen in a row.

/// Half-open `[start, end)` interval over one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

impl Segment {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    Outside,
    /// `gap` counts the zeros seen since the last non-zero entry.
    Inside { start: usize, gap: usize },
}

fn push_if_long_enough(segments: &mut Vec<Segment>, segment: Segment, min_size: usize) {
    if segment.len() >= min_size {
        segments.push(segment);
    }
}

/// Finds foreground runs in `projection`.
///
/// A run closes once `gap_threshold` consecutive zeros are seen. The zeros are not
/// part of the run. A run still open at the end of the array is closed there, minus
/// any trailing zeros that did not reach the threshold. Runs shorter than `min_size`
/// are dropped.
///
/// A `gap_threshold` of 0 behaves like 1.
pub fn find_segments(projection: &[usize], gap_threshold: usize, min_size: usize) -> Vec<Segment> {
    let mut segments = vec![];
    let mut state = ScanState::Outside;

    for (index, &count) in projection.iter().enumerate() {
        state = match state {
            ScanState::Outside if count > 0 => ScanState::Inside {
                start: index,
                gap: 0,
            },
            ScanState::Outside => ScanState::Outside,
            ScanState::Inside { start, .. } if count > 0 => ScanState::Inside { start, gap: 0 },
            ScanState::Inside { start, gap } => {
                let gap = gap + 1;

                if gap >= gap_threshold {
                    // index - gap + 1, the first zero of the closing gap
                    push_if_long_enough(
                        &mut segments,
                        Segment::new(start, index + 1 - gap),
                        min_size,
                    );

                    ScanState::Outside
                } else {
                    ScanState::Inside { start, gap }
                }
            }
        };
    }

    if let ScanState::Inside { start, gap } = state {
        push_if_long_enough(
            &mut segments,
            Segment::new(start, projection.len() - gap),
            min_size,
        );
    }

    segments
}

#[cfg(test)]
mod test {
    use super::*;

    fn seg(start: usize, end: usize) -> Segment {
        Segment::new(start, end)
    }

    #[test]
    fn empty_projection() {
        assert!(find_segments(&[], 2, 1).is_empty());
        assert!(find_segments(&[0, 0, 0, 0], 2, 1).is_empty());
    }

    #[test]
    fn whole_array_is_one_run() {
        assert_eq!(find_segments(&[3, 1, 4, 1], 2, 1), vec![seg(0, 4)]);
    }

    #[test]
    fn open_run_at_end_without_gap() {
        assert_eq!(find_segments(&[0, 1, 1, 1], 2, 1), vec![seg(1, 4)]);
    }

    #[test]
    fn open_run_at_end_with_partial_gap() {
        // one trailing zero is below the threshold, still excluded from the run
        assert_eq!(find_segments(&[0, 1, 1, 1, 0], 2, 1), vec![seg(1, 4)]);
        assert_eq!(find_segments(&[0, 1, 1, 1, 0, 0], 3, 1), vec![seg(1, 4)]);
    }

    #[test]
    fn both_endings_agree() {
        let closed_by_gap = find_segments(&[0, 5, 5, 5, 0, 0], 2, 1);
        let closed_by_partial_gap = find_segments(&[0, 5, 5, 5, 0], 2, 1);
        let closed_by_end = find_segments(&[0, 5, 5, 5], 2, 1);

        assert_eq!(closed_by_gap, closed_by_partial_gap);
        assert_eq!(closed_by_partial_gap, closed_by_end);
    }

    #[test]
    fn gap_closes_run() {
        assert_eq!(
            find_segments(&[1, 1, 0, 0, 1], 2, 1),
            vec![seg(0, 2), seg(4, 5)]
        );
    }

    #[test]
    fn gap_below_threshold_is_tolerated() {
        assert_eq!(find_segments(&[1, 1, 0, 0, 1, 1], 3, 1), vec![seg(0, 6)]);
    }

    #[test]
    fn gap_at_threshold_splits() {
        assert_eq!(
            find_segments(&[1, 1, 0, 0, 0, 1, 1], 3, 1),
            vec![seg(0, 2), seg(5, 7)]
        );
    }

    #[test]
    fn split_halves_still_need_min_size() {
        assert_eq!(find_segments(&[1, 1, 0, 0, 0, 1, 1, 1], 3, 3), vec![seg(5, 8)]);
    }

    #[test]
    fn short_runs_are_dropped() {
        assert_eq!(
            find_segments(&[1, 0, 0, 1, 1, 1, 0, 0, 9], 2, 2),
            vec![seg(3, 6)]
        );
    }

    #[test]
    fn min_size_is_inclusive() {
        assert_eq!(find_segments(&[0, 1, 1, 0, 0], 2, 2), vec![seg(1, 3)]);
        assert!(find_segments(&[0, 1, 1, 0, 0], 2, 3).is_empty());
    }

    #[test]
    fn threshold_of_one_splits_on_any_zero() {
        assert_eq!(
            find_segments(&[1, 0, 1, 1, 0, 1], 1, 1),
            vec![seg(0, 1), seg(2, 4), seg(5, 6)]
        );
        assert_eq!(
            find_segments(&[1, 0, 1, 1, 0, 1], 0, 1),
            find_segments(&[1, 0, 1, 1, 0, 1], 1, 1)
        );
    }

    #[test]
    fn segments_are_ordered_and_separated() {
        let projection = [0, 2, 2, 0, 0, 1, 0, 1, 0, 0, 0, 7, 7, 7, 0, 0, 3];
        let segments = find_segments(&projection, 2, 1);

        assert_eq!(segments, vec![seg(1, 3), seg(5, 8), seg(11, 14), seg(16, 17)]);

        for pair in segments.windows(2) {
            assert!(pair[0].end < pair[1].start);
        }
    }
}
