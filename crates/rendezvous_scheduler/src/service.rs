// --- File: crates/rendezvous_scheduler/src/service.rs ---
//! Store-backed scheduling operations.
//!
//! [`SchedulerService`] owns the store and a write lock. Regeneration and
//! every manual meeting change run under the lock, so a check-then-write on
//! one process never interleaves with another.
//!
//! The lock is in-process only. One backend instance must own a database:
//! two processes sharing the same SQLite file can both pass the overlap
//! check before either inserts.

use crate::availability::{covered_by_slots, free_windows, DayAvailability};
use crate::engine::build_schedule;
use crate::error::SchedulerError;
use crate::models::{GenerateSelectionsResponse, MeetingRequest, RegenerateResponse};
use crate::partition::eligible_pairs;
use chrono::NaiveDate;
use rendezvous_common::models::{
    AvailabilitySlot, MeetingAssignment, NewAvailabilitySlot, NewParty, Party, PartyKind,
    RecordId, ResolvedSelection, ScheduledMeeting, Selection, TimeWindow, UnscheduledMeeting,
};
use rendezvous_config::SchedulingConfig;
use rendezvous_db::{OverlapQuery, ScheduleRepository};
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::Mutex;
use tracing::{info, warn};

pub struct SchedulerService<S> {
    store: S,
    settings: SchedulingConfig,
    write_lock: Mutex<()>,
}

impl<S> SchedulerService<S>
where
    S: ScheduleRepository + Send + Sync,
{
    pub fn new(store: S, settings: SchedulingConfig) -> Self {
        Self {
            store,
            settings,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Recomputes the whole schedule and replaces both meeting sets.
    pub async fn regenerate_schedule(&self) -> Result<RegenerateResponse, SchedulerError> {
        let _guard = self.write_lock.lock().await;

        let slots = self.store.list_slots().await?;
        let selections = self.store.list_resolved_selections().await?;
        let outcome = build_schedule(&slots, &selections, &self.settings);

        let (confirmed, rejected) = self
            .store
            .replace_schedule(outcome.confirmed, outcome.rejected)
            .await?;

        info!(
            "Regenerated schedule: {} confirmed, {} rejected",
            confirmed.len(),
            rejected.len()
        );
        Ok(RegenerateResponse {
            count: confirmed.len(),
            confirmed,
            rejected,
            excluded_selection_ids: outcome.excluded_selection_ids,
            left_out_portfolio_company_ids: outcome
                .left_out_portfolio_company_ids
                .into_iter()
                .collect(),
            unassigned_selection_ids: outcome.unassigned_selection_ids,
        })
    }

    pub async fn list_scheduled_meetings(&self) -> Result<Vec<ScheduledMeeting>, SchedulerError> {
        Ok(self.store.list_scheduled_meetings().await?)
    }

    pub async fn list_unscheduled_meetings(&self) -> Result<Vec<UnscheduledMeeting>, SchedulerError> {
        Ok(self.store.list_unscheduled_meetings().await?)
    }

    /// Selections that appear in neither meeting set.
    pub async fn unscheduled_selections(&self) -> Result<Vec<Selection>, SchedulerError> {
        let mut placed: BTreeSet<RecordId> = self
            .store
            .list_scheduled_meetings()
            .await?
            .into_iter()
            .map(|m| m.assignment.selection_id)
            .collect();
        placed.extend(
            self.store
                .list_unscheduled_meetings()
                .await?
                .into_iter()
                .map(|m| m.assignment.selection_id),
        );

        Ok(self
            .store
            .list_selections()
            .await?
            .into_iter()
            .filter(|s| !placed.contains(&s.id))
            .collect())
    }

    /// Creates a selection for every eligible investor and every portfolio
    /// company that are not paired yet.
    pub async fn generate_selections(&self) -> Result<GenerateSelectionsResponse, SchedulerError> {
        let _guard = self.write_lock.lock().await;

        let investors = self.store.list_parties(PartyKind::Investor).await?;
        let companies = self.store.list_parties(PartyKind::PortfolioCompany).await?;
        let slots = self.store.list_slots().await?;

        let pairs = eligible_pairs(&investors, &companies, &slots);
        let created = self.store.insert_selections(pairs).await?;
        info!("Generated {} new selections", created);
        Ok(GenerateSelectionsResponse { created })
    }

    /// Declares availability slots.
    pub async fn add_slots(
        &self,
        slots: Vec<NewAvailabilitySlot>,
    ) -> Result<Vec<AvailabilitySlot>, SchedulerError> {
        for slot in &slots {
            if slot.timezone_label.trim().is_empty() {
                return Err(SchedulerError::Validation(
                    "timezone_label must not be empty".to_string(),
                ));
            }
            if TimeWindow::new(slot.start_time, slot.end_time).is_empty() {
                return Err(SchedulerError::Validation(format!(
                    "slot on {} ends before it starts",
                    slot.date
                )));
            }
        }
        let stored = self.store.insert_slots(slots).await?;
        info!("Added {} availability slots", stored.len());
        Ok(stored)
    }

    pub async fn list_slots(&self) -> Result<Vec<AvailabilitySlot>, SchedulerError> {
        Ok(self.store.list_slots().await?)
    }

    pub async fn add_party(&self, kind: PartyKind, party: NewParty) -> Result<Party, SchedulerError> {
        if party.timezone_label.trim().is_empty() {
            return Err(SchedulerError::Validation(
                "timezone_label must not be empty".to_string(),
            ));
        }
        Ok(self.store.insert_party(kind, party).await?)
    }

    pub async fn list_parties(&self, kind: PartyKind) -> Result<Vec<Party>, SchedulerError> {
        Ok(self.store.list_parties(kind).await?)
    }

    /// Deletes a party, its selections and their meetings.
    pub async fn delete_party(&self, kind: PartyKind, id: RecordId) -> Result<(), SchedulerError> {
        let _guard = self.write_lock.lock().await;
        if self.store.delete_party(kind, id).await? {
            Ok(())
        } else {
            Err(SchedulerError::NotFound(format!("{:?} {}", kind, id)))
        }
    }

    /// Free windows per date for the selection's investor timezone.
    pub async fn availability_for_selection(
        &self,
        selection_id: RecordId,
    ) -> Result<BTreeMap<NaiveDate, DayAvailability>, SchedulerError> {
        let selection = self.resolve(selection_id).await?;
        let slots = self
            .store
            .list_slots_by_timezone(&selection.investor_timezone)
            .await?;

        let dates: BTreeSet<NaiveDate> = slots.iter().map(|s| s.date).collect();
        let mut busy: Vec<MeetingAssignment> = Vec::new();
        for date in dates {
            let query = OverlapQuery::on_date(date, selection.investor_id, selection.portfolio_company_id)
                .excluding_selection(selection.selection_id);
            busy.extend(
                self.store
                    .find_overlapping_meetings(query)
                    .await?
                    .into_iter()
                    .map(|m| m.assignment),
            );
        }

        Ok(free_windows(&slots, &busy))
    }

    /// Books a meeting by hand.
    pub async fn create_meeting(&self, request: MeetingRequest) -> Result<ScheduledMeeting, SchedulerError> {
        let _guard = self.write_lock.lock().await;

        let (window, duration) = validate_request(&request)?;
        let selection = self.resolve(request.selection_id).await?;
        self.ensure_bookable(&selection, request.date, window, None).await?;

        let stored = self
            .store
            .insert_meeting(assignment_for(&selection, &request, duration))
            .await?;
        info!(
            "Created meeting {} for selection {} on {}",
            stored.id, selection.selection_id, request.date
        );
        Ok(stored)
    }

    /// Moves an existing meeting, possibly to another selection.
    pub async fn update_meeting(
        &self,
        id: RecordId,
        request: MeetingRequest,
    ) -> Result<ScheduledMeeting, SchedulerError> {
        let _guard = self.write_lock.lock().await;

        let (window, duration) = validate_request(&request)?;
        if self.store.find_meeting(id).await?.is_none() {
            return Err(SchedulerError::NotFound(format!("Meeting {}", id)));
        }
        let selection = self.resolve(request.selection_id).await?;
        self.ensure_bookable(&selection, request.date, window, Some(id))
            .await?;

        let updated = self
            .store
            .update_meeting(id, assignment_for(&selection, &request, duration))
            .await?
            .ok_or_else(|| SchedulerError::NotFound(format!("Meeting {}", id)))?;
        info!("Updated meeting {}", id);
        Ok(updated)
    }

    pub async fn delete_meeting(&self, id: RecordId) -> Result<(), SchedulerError> {
        let _guard = self.write_lock.lock().await;
        if self.store.delete_meeting(id).await? {
            info!("Deleted meeting {}", id);
            Ok(())
        } else {
            Err(SchedulerError::NotFound(format!("Meeting {}", id)))
        }
    }

    async fn resolve(&self, selection_id: RecordId) -> Result<ResolvedSelection, SchedulerError> {
        self.store
            .find_resolved_selection(selection_id)
            .await?
            .ok_or_else(|| SchedulerError::NotFound(format!("Selection {}", selection_id)))
    }

    /// Rejects a window that collides with either party's meetings or lies
    /// outside both parties' declared slots.
    async fn ensure_bookable(
        &self,
        selection: &ResolvedSelection,
        date: NaiveDate,
        window: TimeWindow,
        editing: Option<RecordId>,
    ) -> Result<(), SchedulerError> {
        let mut query = OverlapQuery::on_date(date, selection.investor_id, selection.portfolio_company_id)
            .within(window);
        if let Some(id) = editing {
            query = query.excluding_meeting(id);
        }

        if let Some(clash) = self.store.find_overlapping_meetings(query).await?.first() {
            warn!(
                "Rejected meeting for selection {}: overlaps meeting {} on {}",
                selection.selection_id, clash.id, date
            );
            return Err(SchedulerError::Conflict(format!(
                "overlaps meeting {} ({}-{}) on {}",
                clash.id,
                clash.assignment.start_time.format("%H:%M"),
                clash.assignment.end_time.format("%H:%M"),
                date
            )));
        }

        let investor_slots = self
            .store
            .list_slots_by_timezone(&selection.investor_timezone)
            .await?;
        let mut covered = covered_by_slots(date, &window, &investor_slots);
        if !covered && selection.portfolio_company_timezone != selection.investor_timezone {
            let company_slots = self
                .store
                .list_slots_by_timezone(&selection.portfolio_company_timezone)
                .await?;
            covered = covered_by_slots(date, &window, &company_slots);
        }

        if !covered {
            warn!(
                "Rejected meeting for selection {}: outside declared availability on {}",
                selection.selection_id, date
            );
            return Err(SchedulerError::Conflict(format!(
                "{}-{} on {} is outside both parties' availability",
                window.start_time.format("%H:%M"),
                window.end_time.format("%H:%M"),
                date
            )));
        }
        Ok(())
    }
}

fn validate_request(request: &MeetingRequest) -> Result<(TimeWindow, i64), SchedulerError> {
    let window = TimeWindow::new(request.start_time, request.end_time);
    if window.is_empty() {
        return Err(SchedulerError::Validation(
            "end_time must be after start_time".to_string(),
        ));
    }
    let length = i64::from(window.end_minutes() - window.start_minutes());
    match request.duration_minutes {
        None => Ok((window, length)),
        Some(d) if d == length => Ok((window, d)),
        Some(d) => Err(SchedulerError::Validation(format!(
            "duration_minutes {} does not match the {} minute window",
            d, length
        ))),
    }
}

fn assignment_for(selection: &ResolvedSelection, request: &MeetingRequest, duration: i64) -> MeetingAssignment {
    MeetingAssignment {
        selection_id: selection.selection_id,
        portfolio_company_id: selection.portfolio_company_id,
        investor_id: selection.investor_id,
        date: request.date,
        start_time: request.start_time,
        end_time: request.end_time,
        duration_minutes: duration,
    }
}
