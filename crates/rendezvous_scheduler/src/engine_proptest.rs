#[cfg(test)]
mod tests {
    use crate::engine::build_schedule;
    use crate::test_support::{selection, slot};
    use proptest::prelude::*;
    use rendezvous_common::models::{AvailabilitySlot, RecordId, ResolvedSelection};
    use rendezvous_config::{ConflictPolicy, OccupancyRule, SchedulingConfig};
    use std::collections::BTreeSet;

    // "PST" never gets slots, so investors living there are always excluded.
    const TIMEZONES: [&str; 4] = ["EST", "GMT", "IST", "PST"];

    fn build_slots(raw: &[(usize, u32, u32)]) -> Vec<AvailabilitySlot> {
        raw.iter()
            .enumerate()
            .map(|(i, &(tz, day, hour))| slot(i as RecordId + 1, TIMEZONES[tz], day, hour, hour + 1))
            .collect()
    }

    // Each party keeps one timezone across all of its selections.
    fn build_selections(raw: &[(RecordId, RecordId)]) -> Vec<ResolvedSelection> {
        raw.iter()
            .enumerate()
            .map(|(i, &(investor_id, pc_id))| {
                let mut s = selection(
                    i as RecordId + 1,
                    investor_id,
                    pc_id,
                    TIMEZONES[investor_id as usize % 4],
                );
                s.portfolio_company_timezone = TIMEZONES[pc_id as usize % 3].to_string();
                s
            })
            .collect()
    }

    fn policy_strategy() -> impl Strategy<Value = ConflictPolicy> {
        prop_oneof![
            Just(ConflictPolicy::EarlierBucketYields),
            Just(ConflictPolicy::LaterBucketYields),
            Just(ConflictPolicy::BothYield),
        ]
    }

    proptest! {
        // Every selection ends up in exactly one outcome set
        #[test]
        fn test_every_selection_accounted_for_once(
            raw_slots in prop::collection::vec((0..3usize, 1..4u32, 8..16u32), 0..12),
            raw_selections in prop::collection::vec((1..6i64, 1..6i64), 0..20),
            policy in policy_strategy(),
        ) {
            let slots = build_slots(&raw_slots);
            let selections = build_selections(&raw_selections);
            let settings = SchedulingConfig { conflict_policy: policy, occupancy_rule: OccupancyRule::ExactStart };
            let outcome = build_schedule(&slots, &selections, &settings);

            let mut seen: Vec<RecordId> = outcome.confirmed.iter().map(|m| m.selection_id)
                .chain(outcome.rejected.iter().map(|m| m.selection_id))
                .chain(outcome.unassigned_selection_ids.iter().copied())
                .chain(outcome.excluded_selection_ids.iter().copied())
                .collect();
            seen.sort_unstable();
            let expected: Vec<RecordId> = selections.iter().map(|s| s.selection_id).collect();
            prop_assert_eq!(seen, expected);
        }

        // Confirmed meetings sit on a slot of the investor's timezone
        #[test]
        fn test_confirmed_meetings_match_a_slot(
            raw_slots in prop::collection::vec((0..3usize, 1..4u32, 8..16u32), 1..12),
            raw_selections in prop::collection::vec((1..6i64, 1..6i64), 1..20),
        ) {
            let slots = build_slots(&raw_slots);
            let selections = build_selections(&raw_selections);
            let outcome = build_schedule(&slots, &selections, &SchedulingConfig::default());

            for meeting in &outcome.confirmed {
                let investor_tz = TIMEZONES[meeting.investor_id as usize % 4];
                prop_assert!(slots.iter().any(|s| s.timezone_label == investor_tz
                    && s.date == meeting.date
                    && s.start_time == meeting.start_time
                    && s.end_time == meeting.end_time));
                prop_assert_eq!(meeting.duration_minutes, 60);
            }
        }

        // With interval occupancy no party is double-booked among confirmed meetings
        #[test]
        fn test_confirmed_meetings_never_collide(
            raw_slots in prop::collection::vec((0..3usize, 1..3u32, 8..12u32), 1..12),
            raw_selections in prop::collection::vec((1..6i64, 1..6i64), 1..20),
            policy in policy_strategy(),
        ) {
            let slots = build_slots(&raw_slots);
            let selections = build_selections(&raw_selections);
            let settings = SchedulingConfig { conflict_policy: policy, occupancy_rule: OccupancyRule::IntervalOverlap };
            let outcome = build_schedule(&slots, &selections, &settings);

            for (i, a) in outcome.confirmed.iter().enumerate() {
                for b in outcome.confirmed.iter().skip(i + 1) {
                    prop_assert!(!a.collides_with(b), "{:?} collides with {:?}", a, b);
                }
            }
        }

        // Shuffling the inputs does not change the schedule
        #[test]
        fn test_schedule_is_deterministic(
            raw_slots in prop::collection::vec((0..3usize, 1..4u32, 8..16u32), 0..12),
            raw_selections in prop::collection::vec((1..6i64, 1..6i64), 0..20),
        ) {
            let slots = build_slots(&raw_slots);
            let selections = build_selections(&raw_selections);
            let mut reversed_slots = slots.clone();
            reversed_slots.reverse();
            let mut reversed_selections = selections.clone();
            reversed_selections.reverse();

            let settings = SchedulingConfig::default();
            prop_assert_eq!(
                build_schedule(&slots, &selections, &settings),
                build_schedule(&reversed_slots, &reversed_selections, &settings)
            );
        }

        // Left-out portfolio companies always own an unassigned selection
        #[test]
        fn test_left_out_companies_have_unassigned_selections(
            raw_slots in prop::collection::vec((0..3usize, 1..3u32, 8..10u32), 1..6),
            raw_selections in prop::collection::vec((1..6i64, 1..6i64), 1..20),
        ) {
            let slots = build_slots(&raw_slots);
            let selections = build_selections(&raw_selections);
            let outcome = build_schedule(&slots, &selections, &SchedulingConfig::default());

            let unassigned: BTreeSet<RecordId> = outcome.unassigned_selection_ids.iter().copied().collect();
            for pc_id in &outcome.left_out_portfolio_company_ids {
                prop_assert!(selections.iter().any(|s| s.portfolio_company_id == *pc_id
                    && unassigned.contains(&s.selection_id)));
            }
        }
    }
}
