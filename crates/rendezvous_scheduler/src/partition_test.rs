#[cfg(test)]
mod tests {
    use crate::partition::{eligible_pairs, partition};
    use crate::test_support::{party, selection, slot};

    #[test]
    fn test_buckets_ordered_by_timezone_label() {
        let slots = vec![
            slot(3, "IST", 1, 9, 10),
            slot(1, "GMT", 1, 9, 10),
            slot(2, "EST", 1, 9, 10),
            slot(4, "GMT", 1, 10, 11),
        ];
        let result = partition(&slots, &[]);
        let labels: Vec<&str> = result.buckets.iter().map(|b| b.timezone.as_str()).collect();
        assert_eq!(labels, vec!["EST", "GMT", "IST"]);
        assert_eq!(result.buckets[1].slots.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 4]);
    }

    #[test]
    fn test_selection_follows_investor_timezone() {
        let slots = vec![slot(1, "GMT", 1, 9, 10), slot(2, "IST", 1, 9, 10)];
        let mut crossing = selection(1, 1, 1, "GMT");
        crossing.portfolio_company_timezone = "IST".to_string();

        let result = partition(&slots, &[crossing]);
        assert_eq!(result.buckets[0].timezone, "GMT");
        assert_eq!(result.buckets[0].selections.len(), 1);
        assert!(result.buckets[1].selections.is_empty());
    }

    #[test]
    fn test_selection_without_slot_timezone_is_excluded() {
        let slots = vec![slot(1, "GMT", 1, 9, 10)];
        let selections = vec![selection(2, 1, 1, "PST"), selection(1, 2, 1, "GMT")];

        let result = partition(&slots, &selections);
        assert_eq!(result.excluded_selection_ids(), vec![2]);
        assert_eq!(result.buckets.len(), 1);
        assert_eq!(result.buckets[0].selections[0].selection_id, 1);
    }

    #[test]
    fn test_selections_sorted_by_id_within_bucket() {
        let slots = vec![slot(1, "GMT", 1, 9, 10)];
        let selections = vec![
            selection(5, 1, 1, "GMT"),
            selection(2, 2, 1, "GMT"),
            selection(9, 1, 2, "GMT"),
        ];
        let result = partition(&slots, &selections);
        let ids: Vec<i64> = result.buckets[0].selections.iter().map(|s| s.selection_id).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn test_no_slots_means_no_buckets() {
        let result = partition(&[], &[selection(1, 1, 1, "GMT")]);
        assert!(result.buckets.is_empty());
        assert_eq!(result.excluded.len(), 1);
    }

    #[test]
    fn test_eligible_pairs_require_investor_timezone_slots() {
        let investors = vec![party(2, "GMT"), party(1, "GMT"), party(3, "PST")];
        let companies = vec![party(11, "IST"), party(10, "PST")];
        let slots = vec![slot(1, "GMT", 1, 9, 10)];

        let pairs = eligible_pairs(&investors, &companies, &slots);
        assert_eq!(pairs, vec![(1, 10), (1, 11), (2, 10), (2, 11)]);
    }
}
