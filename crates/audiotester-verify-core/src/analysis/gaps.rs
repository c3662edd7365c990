//! Counter gap detection
//!
//! The recorded counter is 16 bits wide and wraps every 65536 samples, so a
//! plain equality check cannot tell "lost 40000 samples" apart from "counter
//! rolled over and is now behind". Forward distances below [`HALF_RANGE`]
//! count as loss; anything further is treated as a backward jump or wrap
//! artifact and ignored.

use crate::record::Record;
use crate::HALF_RANGE;
use serde::{Deserialize, Serialize};

/// A discontinuity in the counter sequence interpreted as lost samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gap {
    /// Frame index of the record where the jump was observed
    pub frame_index: u64,
    /// Counter value that should have arrived
    pub expected: u16,
    /// Counter value that actually arrived
    pub observed: u16,
    /// Number of missing counter increments, in `1..HALF_RANGE`
    pub size: u16,
}

/// Forward-only gap detector for one recording file
///
/// Holds the previous counter for a single sequential pass. Create a new
/// analyzer per file; state never carries across file boundaries.
#[derive(Debug, Default, Clone)]
pub struct GapAnalyzer {
    prev_counter: Option<u16>,
}

impl GapAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next record, returning a gap if one ends at this record
    pub fn observe(&mut self, record: &Record) -> Option<Gap> {
        let counter = record.counter;
        let gap = self.prev_counter.and_then(|prev| {
            let expected = prev.wrapping_add(1);
            if counter == expected {
                return None;
            }
            // Forward distance from expected to counter, mod 65536
            let diff = counter.wrapping_sub(expected);
            (diff < HALF_RANGE).then_some(Gap {
                frame_index: record.frame_index,
                expected,
                observed: counter,
                size: diff,
            })
        });
        self.prev_counter = Some(counter);
        gap
    }
}

/// Find every forward gap in an ordered record sequence
pub fn find_gaps<'a, I>(records: I) -> Vec<Gap>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut analyzer = GapAnalyzer::new();
    records
        .into_iter()
        .filter_map(|record| analyzer.observe(record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Records with frame index equal to position
    fn records(counters: &[u16]) -> Vec<Record> {
        counters
            .iter()
            .enumerate()
            .map(|(i, &c)| Record::new(c, i as u64))
            .collect()
    }

    #[test]
    fn test_consecutive_counters_have_no_gaps() {
        let counters: Vec<u16> = (0..1000).collect();
        assert!(find_gaps(&records(&counters)).is_empty());
    }

    #[test]
    fn test_single_gap() {
        let gaps = find_gaps(&records(&[10, 11, 15, 16]));
        assert_eq!(
            gaps,
            vec![Gap {
                frame_index: 2,
                expected: 12,
                observed: 15,
                size: 3,
            }]
        );
    }

    #[test]
    fn test_wraparound_is_not_a_gap() {
        assert!(find_gaps(&records(&[65534, 65535, 0, 1])).is_empty());
    }

    #[test]
    fn test_gap_across_wrap() {
        let gaps = find_gaps(&records(&[65534, 2]));
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].expected, 65535);
        assert_eq!(gaps[0].observed, 2);
        assert_eq!(gaps[0].size, 3);
    }

    #[test]
    fn test_backward_jump_is_ignored() {
        // (65536 + 50 - 101) mod 65536 = 65485
        assert!(find_gaps(&records(&[100, 50])).is_empty());
    }

    #[test]
    fn test_repeated_counter_is_ignored() {
        // expected 6, got 5: distance 65535 wraps backward
        assert!(find_gaps(&records(&[5, 5, 6])).is_empty());
    }

    #[test]
    fn test_half_range_boundary() {
        // prev 0 -> expected 1; 1 + 32767 = 32768 is the largest forward gap
        let recorded = find_gaps(&records(&[0, 32768]));
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].size, 32767);

        // diff of exactly HALF_RANGE is not recorded
        assert!(find_gaps(&records(&[0, 32769])).is_empty());
    }

    #[test]
    fn test_state_advances_after_ignored_jump() {
        // After the backward jump, 50 -> 51 is consecutive, 51 -> 60 is a gap
        let gaps = find_gaps(&records(&[100, 50, 51, 60]));
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].expected, 52);
        assert_eq!(gaps[0].size, 8);
    }

    #[test]
    fn test_first_record_never_gaps() {
        let mut analyzer = GapAnalyzer::new();
        assert!(analyzer.observe(&Record::new(40000, 0)).is_none());
        assert!(analyzer.observe(&Record::new(40003, 1)).is_some());

        let mut fresh = GapAnalyzer::new();
        assert!(fresh.observe(&Record::new(7, 2)).is_none());
    }

    #[test]
    fn test_gap_labelled_by_frame_index() {
        let input = vec![Record::new(1, 900), Record::new(4, 901)];
        let gaps = find_gaps(&input);
        assert_eq!(gaps[0].frame_index, 901);
    }

    proptest! {
        #[test]
        fn prop_consecutive_never_gaps(start in any::<u16>(), len in 0usize..5000) {
            let counters: Vec<u16> = (0..len).map(|i| start.wrapping_add(i as u16)).collect();
            prop_assert!(find_gaps(&records(&counters)).is_empty());
        }

        #[test]
        fn prop_gap_sizes_in_range(counters in proptest::collection::vec(any::<u16>(), 0..500)) {
            let input = records(&counters);
            for gap in find_gaps(&input) {
                prop_assert!(gap.size >= 1 && gap.size < HALF_RANGE);
                prop_assert_eq!(gap.observed, gap.expected.wrapping_add(gap.size));
            }
        }

        #[test]
        fn prop_each_pair_is_gap_or_consecutive(counters in proptest::collection::vec(any::<u16>(), 2..300)) {
            let input = records(&counters);
            let gaps = find_gaps(&input);
            for pair in input.windows(2) {
                let consecutive = pair[1].counter == pair[0].counter.wrapping_add(1);
                let gapped = gaps.iter().any(|g| g.frame_index == pair[1].frame_index);
                prop_assert!(!(consecutive && gapped));
            }
        }
    }
}
