//! Interval algebra used to turn a noisy event stream into away candidates.
//!
//! Three steps, each a pure function over an owned `Vec<Interval>`:
//!
//! 1. [`IntervalSet::normalize`] merges overlapping or touching intervals into a
//!    sorted, pairwise disjoint set.
//! 2. [`IntervalSet::gaps`] yields the holes between consecutive normalized
//!    intervals. Applied to active intervals, these are the away candidates.
//! 3. [`IntervalSet::merge_gaps`] ("heartbeat reduction") coalesces gaps that are
//!    separated by an active blip shorter than a pulse threshold.
//!
//! ## Usage
//!
//! ```rust
//! use askaway::libs::interval::IntervalSet;
//! # use askaway::libs::event::Interval;
//! # use chrono::{TimeZone, Utc};
//! # let at = |s| Utc.timestamp_opt(s, 0).unwrap();
//! let active = vec![Interval::new(at(0), at(60)), Interval::new(at(80), at(180))];
//! let gaps = active.normalize().gaps();
//! assert_eq!(gaps, vec![Interval::new(at(60), at(80))]);
//! ```

use super::event::Interval;
use chrono::Duration;

pub trait IntervalSet {
    /// Sorts and sweeps the intervals into a minimal disjoint set.
    ///
    /// An interval whose start is `<=` the running end extends it, so directly
    /// adjacent intervals collapse into one. Zero-length intervals take part in
    /// the sweep like any other. Empty input yields empty output.
    fn normalize(self) -> Vec<Interval>;

    /// Returns the holes between consecutive intervals.
    ///
    /// Expects sorted, disjoint input (the output of [`IntervalSet::normalize`]).
    /// Pairs that touch or overlap produce nothing.
    fn gaps(&self) -> Vec<Interval>;

    /// Coalesces consecutive gaps separated by less than `pulse`.
    ///
    /// Chains transitively: three gaps split by two short blips become one.
    /// A zero pulse leaves the input unchanged.
    fn merge_gaps(self, pulse: Duration) -> Vec<Interval>;
}

impl IntervalSet for Vec<Interval> {
    fn normalize(mut self) -> Vec<Interval> {
        self.sort_by_key(|interval| interval.start);

        let mut merged = Vec::with_capacity(self.len());
        let mut iter = self.into_iter();

        if let Some(mut current) = iter.next() {
            for next in iter {
                if next.start <= current.end {
                    current.end = current.end.max(next.end);
                } else {
                    merged.push(current);
                    current = next;
                }
            }
            merged.push(current);
        }
        merged
    }

    fn gaps(&self) -> Vec<Interval> {
        self.windows(2)
            .filter(|pair| pair[0].end < pair[1].start)
            .map(|pair| Interval::new(pair[0].end, pair[1].start))
            .collect()
    }

    fn merge_gaps(mut self, pulse: Duration) -> Vec<Interval> {
        self.sort_by_key(|interval| interval.start);

        let mut merged = Vec::with_capacity(self.len());
        let mut iter = self.into_iter();

        if let Some(mut current) = iter.next() {
            for next in iter {
                // Active time between the two absences.
                let blip = next.start - current.end;

                if blip < pulse {
                    current.end = current.end.max(next.end);
                } else {
                    merged.push(current);
                    current = next;
                }
            }
            merged.push(current);
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn span(start: i64, end: i64) -> Interval {
        Interval::new(at(start), at(end))
    }

    #[test]
    fn test_normalize_empty() {
        assert!(Vec::<Interval>::new().normalize().is_empty());
    }

    #[test]
    fn test_normalize_merges_overlapping_and_touching() {
        let input = vec![span(50, 60), span(0, 10), span(10, 20), span(15, 30)];
        assert_eq!(input.normalize(), vec![span(0, 30), span(50, 60)]);
    }

    #[test]
    fn test_normalize_keeps_contained_interval_end() {
        let input = vec![span(0, 100), span(10, 20)];
        assert_eq!(input.normalize(), vec![span(0, 100)]);
    }

    #[test]
    fn test_zero_length_interval_bridges_boundary() {
        let input = vec![span(0, 10), span(10, 10), span(10, 20)];
        assert_eq!(input.normalize(), vec![span(0, 20)]);

        let lonely = vec![span(0, 10), span(15, 15)];
        assert_eq!(lonely.normalize(), vec![span(0, 10), span(15, 15)]);
    }

    #[test]
    fn test_gaps_need_two_intervals() {
        assert!(vec![span(0, 10)].gaps().is_empty());
        assert!(Vec::<Interval>::new().gaps().is_empty());
    }

    #[test]
    fn test_gaps_ignore_overlapping_pairs() {
        let unnormalized = vec![span(0, 10), span(5, 20), span(30, 40)];
        assert_eq!(unnormalized.gaps(), vec![span(20, 30)]);
    }

    #[test]
    fn test_merge_gaps_chains_short_blips() {
        let gaps = vec![span(0, 100), span(105, 200), span(209, 300), span(400, 500)];
        let merged = gaps.merge_gaps(Duration::seconds(10));
        assert_eq!(merged, vec![span(0, 300), span(400, 500)]);
    }

    #[test]
    fn test_merge_gaps_keeps_blip_at_pulse() {
        let gaps = vec![span(0, 100), span(110, 200)];
        assert_eq!(gaps.clone().merge_gaps(Duration::seconds(10)), gaps);
    }

    #[test]
    fn test_merge_gaps_disabled_by_zero_pulse() {
        let gaps = vec![span(0, 100), span(100, 200)];
        assert_eq!(gaps.clone().merge_gaps(Duration::zero()), gaps);
    }
}
