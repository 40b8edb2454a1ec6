// --- File: crates/rendezvous_scheduler/src/allocator.rs ---
//! First-fit assignment of selections to slots inside one timezone bucket.
//!
//! Investors are visited in ascending id order and, for each, portfolio
//! companies in ascending id order. Each selected pair takes the first slot
//! (by slot id) at which neither party is booked yet. The result depends
//! only on the ids, never on input order.

use crate::partition::TimezoneBucket;
use chrono::NaiveDate;
use rendezvous_common::models::{
    AvailabilitySlot, MeetingAssignment, PartyKind, RecordId, TimeWindow, MEETING_DURATION_MINUTES,
};
use rendezvous_config::OccupancyRule;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketAllocation {
    pub timezone: String,
    /// In the order they were made.
    pub assignments: Vec<MeetingAssignment>,
    /// Portfolio companies whose placement failed and was not followed by a
    /// later successful placement in this bucket.
    pub left_out: BTreeSet<RecordId>,
    /// Selections that found no usable slot.
    pub unassigned: Vec<RecordId>,
}

/// Per-party bookings made so far in one allocation run.
#[derive(Debug)]
struct Bookings {
    rule: OccupancyRule,
    booked: HashMap<(PartyKind, RecordId), Vec<(NaiveDate, TimeWindow)>>,
}

impl Bookings {
    fn new(rule: OccupancyRule) -> Self {
        Self {
            rule,
            booked: HashMap::new(),
        }
    }

    fn is_busy(&self, party: (PartyKind, RecordId), slot: &AvailabilitySlot) -> bool {
        let Some(entries) = self.booked.get(&party) else {
            return false;
        };
        let window = slot.window();
        entries.iter().any(|(date, booked)| {
            *date == slot.date
                && match self.rule {
                    OccupancyRule::ExactStart => booked.start_time == window.start_time,
                    OccupancyRule::IntervalOverlap => booked.overlaps(&window),
                }
        })
    }

    fn book(&mut self, party: (PartyKind, RecordId), slot: &AvailabilitySlot) {
        self.booked
            .entry(party)
            .or_default()
            .push((slot.date, slot.window()));
    }
}

/// Assigns the bucket's selections to its slots.
pub fn allocate(bucket: &TimezoneBucket, rule: OccupancyRule) -> BucketAllocation {
    let investors: BTreeSet<RecordId> = bucket.selections.iter().map(|s| s.investor_id).collect();
    let companies: BTreeSet<RecordId> = bucket
        .selections
        .iter()
        .map(|s| s.portfolio_company_id)
        .collect();

    let mut by_pair: BTreeMap<(RecordId, RecordId), Vec<RecordId>> = BTreeMap::new();
    for selection in &bucket.selections {
        by_pair
            .entry((selection.investor_id, selection.portfolio_company_id))
            .or_default()
            .push(selection.selection_id);
    }

    let mut slots = bucket.slots.clone();
    slots.sort_by_key(|s| s.id);

    let mut bookings = Bookings::new(rule);
    let mut allocation = BucketAllocation {
        timezone: bucket.timezone.clone(),
        ..Default::default()
    };

    for &investor_id in &investors {
        for &pc_id in &companies {
            let Some(selection_ids) = by_pair.get(&(investor_id, pc_id)) else {
                continue;
            };
            for &selection_id in selection_ids {
                let investor = (PartyKind::Investor, investor_id);
                let company = (PartyKind::PortfolioCompany, pc_id);

                let usable = slots
                    .iter()
                    .find(|slot| !bookings.is_busy(investor, slot) && !bookings.is_busy(company, slot));

                match usable {
                    Some(slot) => {
                        bookings.book(investor, slot);
                        bookings.book(company, slot);
                        allocation.left_out.remove(&pc_id);
                        allocation.assignments.push(MeetingAssignment {
                            selection_id,
                            portfolio_company_id: pc_id,
                            investor_id,
                            date: slot.date,
                            start_time: slot.start_time,
                            end_time: slot.end_time,
                            duration_minutes: MEETING_DURATION_MINUTES,
                        });
                    }
                    None => {
                        allocation.left_out.insert(pc_id);
                        allocation.unassigned.push(selection_id);
                    }
                }
            }
        }
    }

    debug!(
        "Bucket {}: {} assignments, {} unassigned, {} portfolio companies left out",
        allocation.timezone,
        allocation.assignments.len(),
        allocation.unassigned.len(),
        allocation.left_out.len()
    );
    allocation
}
