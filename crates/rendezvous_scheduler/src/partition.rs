// --- File: crates/rendezvous_scheduler/src/partition.rs ---
//! Groups availability slots and selections into per-timezone buckets.

use rendezvous_common::models::{AvailabilitySlot, Party, RecordId, ResolvedSelection};
use std::collections::{BTreeMap, BTreeSet};

/// Everything the allocator needs for one timezone label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimezoneBucket {
    pub timezone: String,
    /// Ordered by slot id.
    pub slots: Vec<AvailabilitySlot>,
    /// Selections whose investor is in this timezone, ordered by selection id.
    pub selections: Vec<ResolvedSelection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// One bucket per distinct slot timezone, ordered by label.
    pub buckets: Vec<TimezoneBucket>,
    /// Selections whose investor timezone has no slots at all.
    pub excluded: Vec<ResolvedSelection>,
}

impl Partition {
    pub fn excluded_selection_ids(&self) -> Vec<RecordId> {
        self.excluded.iter().map(|s| s.selection_id).collect()
    }
}

/// Splits slots and selections by timezone label.
///
/// Buckets come out in ascending label order. A selection lands in the
/// bucket of its investor's timezone; the portfolio company's timezone plays
/// no part in bucketing.
pub fn partition(slots: &[AvailabilitySlot], selections: &[ResolvedSelection]) -> Partition {
    let mut by_timezone: BTreeMap<&str, TimezoneBucket> = BTreeMap::new();

    for slot in slots {
        by_timezone
            .entry(slot.timezone_label.as_str())
            .or_insert_with(|| TimezoneBucket {
                timezone: slot.timezone_label.clone(),
                slots: Vec::new(),
                selections: Vec::new(),
            })
            .slots
            .push(slot.clone());
    }

    let mut excluded = Vec::new();
    for selection in selections {
        match by_timezone.get_mut(selection.investor_timezone.as_str()) {
            Some(bucket) => bucket.selections.push(selection.clone()),
            None => excluded.push(selection.clone()),
        }
    }

    let mut buckets: Vec<TimezoneBucket> = by_timezone.into_values().collect();
    for bucket in &mut buckets {
        bucket.slots.sort_by_key(|s| s.id);
        bucket.selections.sort_by_key(|s| s.selection_id);
    }
    excluded.sort_by_key(|s| s.selection_id);

    Partition { buckets, excluded }
}

/// Pairs every investor whose timezone has at least one slot with every
/// portfolio company, ordered by investor id then portfolio company id.
pub fn eligible_pairs(
    investors: &[Party],
    portfolio_companies: &[Party],
    slots: &[AvailabilitySlot],
) -> Vec<(RecordId, RecordId)> {
    let timezones: BTreeSet<&str> = slots.iter().map(|s| s.timezone_label.as_str()).collect();

    let mut investor_ids: Vec<RecordId> = investors
        .iter()
        .filter(|i| timezones.contains(i.timezone_label.as_str()))
        .map(|i| i.id)
        .collect();
    investor_ids.sort_unstable();
    investor_ids.dedup();

    let mut company_ids: Vec<RecordId> = portfolio_companies.iter().map(|p| p.id).collect();
    company_ids.sort_unstable();
    company_ids.dedup();

    investor_ids
        .iter()
        .flat_map(|&investor_id| company_ids.iter().map(move |&pc_id| (investor_id, pc_id)))
        .collect()
}
