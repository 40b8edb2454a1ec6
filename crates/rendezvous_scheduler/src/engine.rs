// --- File: crates/rendezvous_scheduler/src/engine.rs ---
//! The batch pipeline: partition, allocate per bucket, detect conflicts.
//!
//! Pure and deterministic; persistence happens in [`crate::service`].

use crate::allocator::{allocate, BucketAllocation};
use crate::conflict::detect_conflicts;
use crate::partition::partition;
use rendezvous_common::models::{AvailabilitySlot, MeetingAssignment, RecordId, ResolvedSelection};
use rendezvous_config::SchedulingConfig;
use std::collections::BTreeSet;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleOutcome {
    pub confirmed: Vec<MeetingAssignment>,
    pub rejected: Vec<MeetingAssignment>,
    /// Selections whose investor timezone has no slots.
    pub excluded_selection_ids: Vec<RecordId>,
    /// Union of every bucket's left-out portfolio companies.
    pub left_out_portfolio_company_ids: BTreeSet<RecordId>,
    /// Selections no bucket could place, ascending.
    pub unassigned_selection_ids: Vec<RecordId>,
}

/// Computes a schedule from scratch.
pub fn build_schedule(
    slots: &[AvailabilitySlot],
    selections: &[ResolvedSelection],
    settings: &SchedulingConfig,
) -> ScheduleOutcome {
    let partitioned = partition(slots, selections);
    debug!(
        "Partitioned {} slots and {} selections into {} buckets ({} excluded)",
        slots.len(),
        selections.len(),
        partitioned.buckets.len(),
        partitioned.excluded.len()
    );

    let allocations: Vec<BucketAllocation> = partitioned
        .buckets
        .iter()
        .map(|bucket| allocate(bucket, settings.occupancy_rule))
        .collect();

    let classification = detect_conflicts(&allocations, settings.conflict_policy);

    let left_out_portfolio_company_ids = allocations
        .iter()
        .flat_map(|a| a.left_out.iter().copied())
        .collect();
    let mut unassigned_selection_ids: Vec<RecordId> = allocations
        .iter()
        .flat_map(|a| a.unassigned.iter().copied())
        .collect();
    unassigned_selection_ids.sort_unstable();

    info!(
        "Schedule built: {} confirmed, {} rejected, {} unassigned, {} excluded",
        classification.confirmed.len(),
        classification.rejected.len(),
        unassigned_selection_ids.len(),
        partitioned.excluded.len()
    );

    ScheduleOutcome {
        confirmed: classification.confirmed,
        rejected: classification.rejected,
        excluded_selection_ids: partitioned.excluded_selection_ids(),
        left_out_portfolio_company_ids,
        unassigned_selection_ids,
    }
}
