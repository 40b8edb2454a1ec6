// --- File: crates/rendezvous_scheduler/src/conflict.rs ---
//! Cross-bucket conflict detection.
//!
//! Buckets are allocated independently, so one party can end up booked in
//! two buckets at overlapping times. Every pair of buckets is compared and,
//! per [`ConflictPolicy`], one or both sides of each collision are rejected.
//! Times are compared as raw wall-clock values regardless of bucket.

use crate::allocator::BucketAllocation;
use rendezvous_common::models::MeetingAssignment;
use rendezvous_config::ConflictPolicy;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub confirmed: Vec<MeetingAssignment>,
    pub rejected: Vec<MeetingAssignment>,
}

/// Splits all assignments into confirmed and rejected.
///
/// Both outputs keep bucket order, then assignment order within a bucket.
/// An assignment is rejected at most once no matter how many collisions
/// it is part of.
pub fn detect_conflicts(allocations: &[BucketAllocation], policy: ConflictPolicy) -> Classification {
    let mut rejected: Vec<Vec<bool>> = allocations
        .iter()
        .map(|a| vec![false; a.assignments.len()])
        .collect();

    for i in 0..allocations.len() {
        for j in (i + 1)..allocations.len() {
            for (a, earlier) in allocations[i].assignments.iter().enumerate() {
                for (b, later) in allocations[j].assignments.iter().enumerate() {
                    if !earlier.collides_with(later) {
                        continue;
                    }
                    debug!(
                        "Selection {} ({}) collides with selection {} ({}) on {}",
                        earlier.selection_id,
                        allocations[i].timezone,
                        later.selection_id,
                        allocations[j].timezone,
                        earlier.date
                    );
                    match policy {
                        ConflictPolicy::EarlierBucketYields => rejected[i][a] = true,
                        ConflictPolicy::LaterBucketYields => rejected[j][b] = true,
                        ConflictPolicy::BothYield => {
                            rejected[i][a] = true;
                            rejected[j][b] = true;
                        }
                    }
                }
            }
        }
    }

    let mut classification = Classification::default();
    for (allocation, marks) in allocations.iter().zip(&rejected) {
        for (assignment, &is_rejected) in allocation.assignments.iter().zip(marks) {
            if is_rejected {
                classification.rejected.push(assignment.clone());
            } else {
                classification.confirmed.push(assignment.clone());
            }
        }
    }
    classification
}
