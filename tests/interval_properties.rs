//! Property tests for the interval algebra.
//!
//! Intervals are generated as (start, length) pairs in whole seconds on a small
//! range so that overlaps, touching boundaries and zero-length intervals all
//! show up often.

#[cfg(test)]
mod tests {
    use askaway::libs::event::Interval;
    use askaway::libs::interval::IntervalSet;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn interval_strategy() -> impl Strategy<Value = Interval> {
        (0i64..1000, 0i64..120).prop_map(|(start, length)| Interval::new(at(start), at(start + length)))
    }

    fn intervals_strategy() -> impl Strategy<Value = Vec<Interval>> {
        prop::collection::vec(interval_strategy(), 0..30)
    }

    /// Whether the instant `t` lies inside some interval, boundaries included.
    fn covers_point(intervals: &[Interval], t: i64) -> bool {
        intervals.iter().any(|i| i.start <= at(t) && at(t) <= i.end)
    }

    /// Whether the whole second `[t, t + 1]` lies inside some interval.
    fn covers_second(intervals: &[Interval], t: i64) -> bool {
        intervals.iter().any(|i| i.start <= at(t) && at(t + 1) <= i.end)
    }

    /// Gaps on a line, each separated from the next by `blip` seconds of activity.
    fn spaced_gaps(lengths: &[i64], blips: &[i64]) -> Vec<Interval> {
        let mut gaps = Vec::with_capacity(lengths.len());
        let mut cursor = 0;
        for (i, length) in lengths.iter().enumerate() {
            gaps.push(Interval::new(at(cursor), at(cursor + length)));
            cursor += length + blips.get(i).copied().unwrap_or(0);
        }
        gaps
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(input in intervals_strategy()) {
            let once = input.normalize();
            let twice = once.clone().normalize();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_normalize_output_is_sorted_and_separated(input in intervals_strategy()) {
            let normalized = input.normalize();
            for pair in normalized.windows(2) {
                prop_assert!(pair[0].end < pair[1].start, "{} and {} should have been merged", pair[0], pair[1]);
            }
        }

        #[test]
        fn prop_normalize_covers_every_input(input in intervals_strategy()) {
            let normalized = input.clone().normalize();
            for interval in &input {
                prop_assert!(
                    normalized.iter().any(|n| n.start <= interval.start && interval.end <= n.end),
                    "{} is not covered",
                    interval
                );
            }
            let input_total: Duration = input.iter().map(|i| i.duration()).fold(Duration::zero(), |a, b| a + b);
            let output_total: Duration = normalized.iter().map(|i| i.duration()).fold(Duration::zero(), |a, b| a + b);
            prop_assert!(output_total <= input_total);
        }

        #[test]
        fn prop_normalize_covers_exactly_the_input(input in intervals_strategy()) {
            let normalized = input.clone().normalize();

            for t in 0..=1120 {
                prop_assert_eq!(covers_point(&normalized, t), covers_point(&input, t), "point {}", t);
                prop_assert_eq!(covers_second(&normalized, t), covers_second(&input, t), "second {}", t);
            }
            for interval in &normalized {
                prop_assert!(input.iter().any(|i| i.start == interval.start), "{} starts nowhere in the input", interval);
                prop_assert!(input.iter().any(|i| i.end == interval.end), "{} ends nowhere in the input", interval);
            }
        }

        #[test]
        fn prop_gaps_complement_active_time(input in intervals_strategy()) {
            let active = input.normalize();
            let gaps = active.gaps();

            prop_assert_eq!(gaps.len(), active.len().saturating_sub(1));
            for gap in &gaps {
                prop_assert!(gap.duration() > Duration::zero());
                for interval in &active {
                    prop_assert_eq!(gap.overlap(interval), Duration::zero());
                }
            }

            // Active time plus gaps tile the whole span without holes.
            if let (Some(first), Some(last)) = (active.first(), active.last()) {
                let mut tiles = active.clone();
                tiles.extend(gaps);
                prop_assert_eq!(tiles.normalize(), vec![Interval::new(first.start, last.end)]);
            }
        }

        #[test]
        fn prop_merger_keeps_gaps_split_by_long_activity(
            lengths in prop::collection::vec(1i64..600, 1..10),
            blips in prop::collection::vec(10i64..300, 10),
        ) {
            let gaps = spaced_gaps(&lengths, &blips);
            prop_assert_eq!(gaps.clone().merge_gaps(Duration::seconds(10)), gaps);
        }

        #[test]
        fn prop_merger_only_grows_gaps(
            lengths in prop::collection::vec(1i64..600, 1..10),
            blips in prop::collection::vec(0i64..30, 10),
        ) {
            let gaps = spaced_gaps(&lengths, &blips);
            let merged = gaps.clone().merge_gaps(Duration::seconds(10));

            prop_assert!(merged.len() <= gaps.len());
            for gap in &gaps {
                prop_assert!(merged.iter().any(|m| m.start <= gap.start && gap.end <= m.end));
            }
            for pair in merged.windows(2) {
                prop_assert!(pair[1].start - pair[0].end >= Duration::seconds(10));
            }
        }
    }
}
