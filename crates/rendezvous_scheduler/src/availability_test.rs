#[cfg(test)]
mod tests {
    use crate::availability::{covered_by_slots, free_windows, DayAvailability};
    use crate::test_support::{assignment, date, slot, time};
    use rendezvous_common::models::TimeWindow;
    use serde_json::json;

    #[test]
    fn test_all_slots_free_without_meetings() {
        let slots = vec![slot(1, "GMT", 1, 9, 10), slot(2, "GMT", 1, 10, 11)];
        let result = free_windows(&slots, &[]);
        assert_eq!(result[&date(1)].windows().len(), 2);
    }

    #[test]
    fn test_overlapping_meeting_removes_slot() {
        let slots = vec![slot(1, "GMT", 1, 9, 10), slot(2, "GMT", 1, 10, 11)];
        let busy = vec![assignment(9, 1, 1, 1, (9, 30), (10, 0))];
        let result = free_windows(&slots, &busy);
        assert_eq!(
            result[&date(1)],
            DayAvailability::Windows(vec![TimeWindow::new(time(10, 0), time(11, 0))])
        );
    }

    #[test]
    fn test_fully_booked_date_is_unavailable() {
        let slots = vec![slot(1, "GMT", 1, 9, 10), slot(2, "GMT", 2, 9, 10)];
        let busy = vec![assignment(9, 1, 1, 1, (9, 0), (10, 0))];
        let result = free_windows(&slots, &busy);
        assert!(result[&date(1)].is_unavailable());
        assert!(!result[&date(2)].is_unavailable());
    }

    #[test]
    fn test_meeting_on_other_date_does_not_block() {
        let slots = vec![slot(1, "GMT", 1, 9, 10)];
        let busy = vec![assignment(9, 1, 1, 2, (9, 0), (10, 0))];
        assert!(!free_windows(&slots, &busy)[&date(1)].is_unavailable());
    }

    #[test]
    fn test_windows_sorted_and_deduplicated() {
        let slots = vec![
            slot(1, "GMT", 1, 14, 15),
            slot(2, "GMT", 1, 9, 10),
            slot(3, "GMT", 1, 9, 10),
        ];
        let result = free_windows(&slots, &[]);
        let starts: Vec<_> = result[&date(1)].windows().iter().map(|w| w.start_time).collect();
        assert_eq!(starts, vec![time(9, 0), time(14, 0)]);
    }

    #[test]
    fn test_serialization_shape() {
        let slots = vec![slot(1, "GMT", 1, 9, 10), slot(2, "GMT", 2, 9, 10)];
        let busy = vec![assignment(9, 1, 1, 2, (9, 0), (10, 0))];
        let value = serde_json::to_value(free_windows(&slots, &busy)).unwrap();
        assert_eq!(
            value,
            json!({
                "2025-01-01": [{ "start_time": "09:00", "end_time": "10:00" }],
                "2025-01-02": ["unavailable"]
            })
        );
    }

    #[test]
    fn test_covered_by_slots() {
        let slots = vec![slot(1, "GMT", 1, 9, 12)];
        let inside = TimeWindow::new(time(10, 0), time(11, 0));
        let spilling = TimeWindow::new(time(11, 30), time(12, 30));
        assert!(covered_by_slots(date(1), &inside, &slots));
        assert!(!covered_by_slots(date(1), &spilling, &slots));
        assert!(!covered_by_slots(date(2), &inside, &slots));
    }
}
