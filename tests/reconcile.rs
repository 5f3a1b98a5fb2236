#[cfg(test)]
mod tests {
    use askaway::libs::event::{seconds_to_duration, Interval, Status, StatusEvent};
    use askaway::libs::reconcile::{PollOutcome, Reconciler, Thresholds};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    /// Far enough back that every absence counts as recent.
    const FOREVER: i64 = 1000 * 365 * 24 * 60 * 60;

    fn epoch(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn iso(value: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(value).unwrap().with_timezone(&Utc)
    }

    fn status(value: &str) -> Status {
        Status::from_wire(value).unwrap()
    }

    fn at_epoch(start: i64, duration: f64, state: &str) -> StatusEvent {
        StatusEvent::new(epoch(start), seconds_to_duration(duration), status(state))
    }

    fn at_iso(timestamp: &str, duration: f64, state: &str) -> StatusEvent {
        StatusEvent::new(iso(timestamp), seconds_to_duration(duration), status(state))
    }

    fn thresholds(recency_seconds: i64, min_seconds: i64) -> Thresholds {
        Thresholds {
            recency_window: Duration::seconds(recency_seconds),
            min_duration: Duration::seconds(min_seconds),
            heartbeat_pulse: Duration::seconds(10),
        }
    }

    fn commit_all(reconciler: &mut Reconciler, intervals: &[Interval]) {
        for interval in intervals {
            reconciler.commit(*interval, "message");
        }
    }

    #[test]
    fn test_recency_and_duration_thresholds() {
        let events = vec![
            at_epoch(0, 60.0, "not-afk"),
            at_epoch(60, 20.0, "afk"),
            at_epoch(80, 100.0, "not-afk"),
        ];
        let reconciler = Reconciler::default();
        let now = Utc::now();

        assert!(reconciler.unseen_away_intervals(&events, now, &thresholds(100, 10)).is_empty());

        let found = reconciler.unseen_away_intervals(&events, now, &thresholds(FOREVER, 10));
        assert_eq!(found, vec![Interval::new(epoch(60), epoch(80))]);

        assert!(reconciler.unseen_away_intervals(&events, now, &thresholds(FOREVER, 21)).is_empty());
    }

    #[test]
    fn test_recency_uses_end_not_start() {
        let now = Utc::now();
        let mut events = vec![
            at_epoch(0, 60.0, "not-afk"),
            at_epoch(60, 20.0, "afk"),
            at_epoch(80, 100.0, "not-afk"),
        ];
        events.push(StatusEvent::new(now, Duration::seconds(10), Status::Active));

        for min_seconds in [10, 21] {
            let found = Reconciler::default().unseen_away_intervals(&events, now, &thresholds(10, min_seconds));
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].start, epoch(180));
            assert_eq!(found[0].duration(), now - epoch(180));
        }
    }

    #[test]
    fn test_jittered_boundaries_are_not_asked_twice() {
        let first = vec![
            at_iso("2023-09-26T12:04:55.820000-04:00", 5.0, "not-afk"),
            at_iso("2023-09-26T11:58:16.969000-04:00", 398.0, "afk"),
            at_iso("2023-09-26T11:58:16.969000-04:00", 190.0, "afk"),
            at_iso("2023-09-26T11:55:10.545000-04:00", 186.0, "not-afk"),
            at_iso("2023-09-26T11:55:10.545000-04:00", 15.0, "not-afk"),
            at_iso("2023-09-26T11:49:27.192000-04:00", 343.0, "afk"),
            at_iso("2023-09-26T11:49:27.192000-04:00", 190.0, "afk"),
            at_iso("2023-09-26T11:11:22.127000-04:00", 2285.0, "not-afk"),
            at_iso("2023-09-26T11:00:43.666000-04:00", 638.0, "afk"),
            at_iso("2023-09-26T11:00:43.666000-04:00", 190.0, "afk"),
        ];
        let second = vec![
            at_iso("2023-09-26T12:08:11.328000-04:00", 10.0, "not-afk"),
            at_iso("2023-09-26T12:05:00.965000-04:00", 190.0, "afk"),
            at_iso("2023-09-26T12:05:00.965000-04:00", 190.0, "afk"),
            at_iso("2023-09-26T12:04:55.820000-04:00", 5.0, "not-afk"),
            at_iso("2023-09-26T11:58:16.969000-04:00", 398.0, "afk"),
            at_iso("2023-09-26T11:58:16.969000-04:00", 190.0, "afk"),
            at_iso("2023-09-26T11:55:10.545000-04:00", 186.0, "not-afk"),
            at_iso("2023-09-26T11:55:10.545000-04:00", 15.0, "not-afk"),
            at_iso("2023-09-26T11:49:27.192000-04:00", 343.0, "afk"),
            at_iso("2023-09-26T11:49:27.192000-04:00", 190.0, "afk"),
        ];
        let now = iso("2023-09-26T12:08:22-04:00");
        let mut reconciler = Reconciler::default();

        let first_unseen = reconciler.unseen_away_intervals(&first, now, &thresholds(FOREVER, 180));
        assert_eq!(first_unseen.len(), 2);
        commit_all(&mut reconciler, &first_unseen);

        let second_unseen = reconciler.unseen_away_intervals(&second, now, &thresholds(FOREVER, 180));
        assert_eq!(second_unseen.len(), 1);
        assert_eq!(second_unseen[0].start, iso("2023-09-26T12:05:00.820000-04:00"));
        assert_eq!(second_unseen[0].duration().num_seconds(), 190);
    }

    #[test]
    fn test_resume_from_suspend_is_not_split() {
        let first = vec![
            at_iso("2023-10-13T08:41:50.337000-04:00", 0.0, "not-afk"),
            at_iso("2023-10-13T07:09:50.154000-04:00", 1724.216, "not-afk"),
            at_iso("2023-10-12T23:40:00.083000-04:00", 26990.07, "afk"),
            at_iso("2023-10-12T23:40:00.083000-04:00", 26984.982452, "afk"),
            at_iso("2023-10-12T23:39:49.928000-04:00", 10.155, "not-afk"),
            at_iso("2023-10-12T22:19:22.173000-04:00", 4827.754, "afk"),
            at_iso("2023-10-12T22:19:22.173000-04:00", 190.570087, "afk"),
            at_iso("2023-10-12T22:01:01.254000-04:00", 1100.919, "not-afk"),
            at_iso("2023-10-12T17:31:40.928000-04:00", 16160.325, "afk"),
            at_iso("2023-10-12T17:31:40.928000-04:00", 190.403036, "afk"),
        ];
        let second = vec![
            at_iso("2023-10-13T08:47:38.792000-04:00", 10.149, "not-afk"),
            at_iso("2023-10-13T08:41:50.337000-04:00", 348.454, "afk"),
            at_iso("2023-10-13T08:41:50.337000-04:00", 195.633261, "afk"),
            at_iso("2023-10-13T08:41:50.337000-04:00", 190.507251, "afk"),
            at_iso("2023-10-13T07:09:50.154000-04:00", 1724.216, "not-afk"),
            at_iso("2023-10-12T23:40:00.083000-04:00", 26990.07, "afk"),
            at_iso("2023-10-12T23:40:00.083000-04:00", 26984.982452, "afk"),
            at_iso("2023-10-12T23:39:49.928000-04:00", 10.155, "not-afk"),
            at_iso("2023-10-12T22:19:22.173000-04:00", 4827.754, "afk"),
            at_iso("2023-10-12T22:19:22.173000-04:00", 190.570087, "afk"),
        ];
        let now = iso("2023-10-13T08:47:54-04:00");
        let mut reconciler = Reconciler::default();

        let first_unseen = reconciler.unseen_away_intervals(&first, now, &thresholds(FOREVER, 180));
        assert_eq!(first_unseen.len(), 2);
        commit_all(&mut reconciler, &first_unseen);

        let second_unseen = reconciler.unseen_away_intervals(&second, now, &thresholds(FOREVER, 180));
        assert_eq!(second_unseen.len(), 1);
        let expected_start = iso("2023-10-13T07:09:50.154000-04:00") + seconds_to_duration(1724.216);
        let expected_end = iso("2023-10-13T08:47:38.792000-04:00");
        assert_eq!(second_unseen[0], Interval::new(expected_start, expected_end));
    }

    #[test]
    fn test_poll_waits_while_still_away() {
        let events = vec![
            at_iso("2023-10-13T08:41:50.337000-04:00", 348.454, "afk"),
            at_iso("2023-10-13T07:09:50.154000-04:00", 1724.216, "not-afk"),
        ];
        let now = iso("2023-10-13T08:47:54-04:00");
        assert_eq!(Reconciler::default().poll(&events, now, &thresholds(FOREVER, 180)), PollOutcome::Suppressed);
    }

    #[test]
    fn test_candidates_come_back_in_start_order() {
        let events = vec![
            at_epoch(2000, 10.0, "not-afk"),
            at_epoch(1000, 100.0, "not-afk"),
            at_epoch(0, 100.0, "not-afk"),
        ];
        match Reconciler::default().poll(&events, epoch(2010), &thresholds(FOREVER, 60)) {
            PollOutcome::Ready(found) => {
                assert_eq!(found, vec![Interval::new(epoch(100), epoch(1000)), Interval::new(epoch(1100), epoch(2000))]);
            }
            PollOutcome::Suppressed => panic!("most recent event is active"),
        }
    }
}
