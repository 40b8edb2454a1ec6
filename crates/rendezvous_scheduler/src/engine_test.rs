#[cfg(test)]
mod tests {
    use crate::engine::build_schedule;
    use crate::test_support::{date, selection, slot, time};
    use rendezvous_common::models::{AvailabilitySlot, ResolvedSelection};
    use rendezvous_config::{ConflictPolicy, OccupancyRule, SchedulingConfig};

    fn settings(policy: ConflictPolicy) -> SchedulingConfig {
        SchedulingConfig {
            conflict_policy: policy,
            occupancy_rule: OccupancyRule::ExactStart,
        }
    }

    #[test]
    fn test_single_pair_single_slot() {
        let outcome = build_schedule(
            &[slot(1, "GMT", 1, 9, 10)],
            &[selection(1, 1, 1, "GMT")],
            &SchedulingConfig::default(),
        );

        assert_eq!(outcome.confirmed.len(), 1);
        assert!(outcome.rejected.is_empty());
        let meeting = &outcome.confirmed[0];
        assert_eq!(meeting.date, date(1));
        assert_eq!(meeting.start_time, time(9, 0));
        assert_eq!(meeting.end_time, time(10, 0));
    }

    #[test]
    fn test_one_slot_two_companies_leaves_one_out() {
        let outcome = build_schedule(
            &[slot(1, "GMT", 1, 9, 10)],
            &[selection(1, 1, 1, "GMT"), selection(2, 1, 2, "GMT")],
            &SchedulingConfig::default(),
        );

        assert_eq!(outcome.confirmed.len(), 1);
        assert_eq!(outcome.confirmed[0].selection_id, 1);
        assert!(outcome.left_out_portfolio_company_ids.contains(&2));
        assert_eq!(outcome.unassigned_selection_ids, vec![2]);
    }

    /// A GMT and an IST bucket each book portfolio company 7 on the same
    /// date at overlapping times.
    fn cross_bucket_inputs() -> (Vec<AvailabilitySlot>, Vec<ResolvedSelection>) {
        let mut ist_slot = slot(2, "IST", 1, 9, 10);
        ist_slot.start_time = time(9, 30);
        ist_slot.end_time = time(10, 30);

        let mut gmt = selection(1, 1, 7, "GMT");
        gmt.portfolio_company_timezone = "IST".to_string();
        let ist = selection(2, 2, 7, "IST");

        (vec![slot(1, "GMT", 1, 9, 10), ist_slot], vec![gmt, ist])
    }

    #[test]
    fn test_cross_bucket_conflict_earlier_bucket_yields() {
        let (slots, selections) = cross_bucket_inputs();
        let outcome = build_schedule(&slots, &selections, &settings(ConflictPolicy::EarlierBucketYields));

        assert_eq!(outcome.confirmed.len(), 1);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].selection_id, 1);
        assert_eq!(outcome.confirmed[0].selection_id, 2);
    }

    #[test]
    fn test_cross_bucket_conflict_later_bucket_yields() {
        let (slots, selections) = cross_bucket_inputs();
        let outcome = build_schedule(&slots, &selections, &settings(ConflictPolicy::LaterBucketYields));

        assert_eq!(outcome.confirmed.len(), 1);
        assert_eq!(outcome.rejected[0].selection_id, 2);
    }

    #[test]
    fn test_cross_bucket_conflict_both_yield() {
        let (slots, selections) = cross_bucket_inputs();
        let outcome = build_schedule(&slots, &selections, &settings(ConflictPolicy::BothYield));

        assert!(outcome.confirmed.is_empty());
        assert_eq!(outcome.rejected.len(), 2);
    }

    #[test]
    fn test_selection_without_investor_timezone_slots_is_excluded() {
        let outcome = build_schedule(
            &[slot(1, "GMT", 1, 9, 10)],
            &[selection(1, 1, 1, "GMT"), selection(2, 2, 1, "PST")],
            &SchedulingConfig::default(),
        );
        assert_eq!(outcome.excluded_selection_ids, vec![2]);
        assert_eq!(outcome.confirmed.len(), 1);
        assert!(outcome.unassigned_selection_ids.is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        let outcome = build_schedule(&[], &[], &SchedulingConfig::default());
        assert!(outcome.confirmed.is_empty());
        assert!(outcome.rejected.is_empty());
        assert!(outcome.excluded_selection_ids.is_empty());
    }

    #[test]
    fn test_result_is_independent_of_input_order() {
        let slots = vec![
            slot(1, "GMT", 1, 9, 10),
            slot(2, "GMT", 1, 10, 11),
            slot(3, "IST", 1, 9, 10),
        ];
        let selections = vec![
            selection(1, 1, 1, "GMT"),
            selection(2, 1, 2, "GMT"),
            selection(3, 2, 1, "IST"),
            selection(4, 3, 2, "GMT"),
        ];
        let mut reversed_slots = slots.clone();
        reversed_slots.reverse();
        let mut reversed_selections = selections.clone();
        reversed_selections.reverse();

        let config = SchedulingConfig::default();
        assert_eq!(
            build_schedule(&slots, &selections, &config),
            build_schedule(&reversed_slots, &reversed_selections, &config)
        );
    }
}
