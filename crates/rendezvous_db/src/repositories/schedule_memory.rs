//! In-memory implementation of the schedule repository
//!
//! Used when no database is configured and by the service tests. All state
//! sits behind one lock, so every operation is atomic.

use crate::error::DbError;
use crate::repositories::schedule::{OverlapQuery, ScheduleRepository};
use chrono::Utc;
use rendezvous_common::models::{
    AvailabilitySlot, MeetingAssignment, NewAvailabilitySlot, NewParty, Party, PartyKind,
    RecordId, ResolvedSelection, ScheduledMeeting, Selection, UnscheduledMeeting,
};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Monotonic id source mirroring an autoincrement column.
#[derive(Debug, Default)]
struct Sequence(RecordId);

impl Sequence {
    fn next(&mut self) -> RecordId {
        self.0 += 1;
        self.0
    }
}

#[derive(Debug, Default)]
struct State {
    slots: BTreeMap<RecordId, AvailabilitySlot>,
    slot_ids: Sequence,
    investors: BTreeMap<RecordId, Party>,
    investor_ids: Sequence,
    portfolio_companies: BTreeMap<RecordId, Party>,
    portfolio_company_ids: Sequence,
    selections: BTreeMap<RecordId, Selection>,
    selection_ids: Sequence,
    scheduled: BTreeMap<RecordId, ScheduledMeeting>,
    scheduled_ids: Sequence,
    unscheduled: BTreeMap<RecordId, UnscheduledMeeting>,
    unscheduled_ids: Sequence,
}

impl State {
    fn parties(&self, kind: PartyKind) -> &BTreeMap<RecordId, Party> {
        match kind {
            PartyKind::Investor => &self.investors,
            PartyKind::PortfolioCompany => &self.portfolio_companies,
        }
    }

    fn resolve(&self, selection: &Selection) -> Option<ResolvedSelection> {
        let investor = self.investors.get(&selection.investor_id)?;
        let company = self.portfolio_companies.get(&selection.portfolio_company_id)?;
        Some(ResolvedSelection {
            selection_id: selection.id,
            investor_id: selection.investor_id,
            portfolio_company_id: selection.portfolio_company_id,
            investor_timezone: investor.timezone_label.clone(),
            portfolio_company_timezone: company.timezone_label.clone(),
        })
    }
}

#[derive(Debug, Default)]
pub struct MemoryScheduleRepository {
    state: RwLock<State>,
}

impl MemoryScheduleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScheduleRepository for MemoryScheduleRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn insert_slots(&self, slots: Vec<NewAvailabilitySlot>) -> Result<Vec<AvailabilitySlot>, DbError> {
        let mut state = self.state.write().await;
        let inserted: Vec<AvailabilitySlot> = slots
            .into_iter()
            .map(|slot| AvailabilitySlot {
                id: state.slot_ids.next(),
                timezone_label: slot.timezone_label,
                date: slot.date,
                start_time: slot.start_time,
                end_time: slot.end_time,
            })
            .collect();
        for slot in &inserted {
            state.slots.insert(slot.id, slot.clone());
        }
        Ok(inserted)
    }

    async fn list_slots(&self) -> Result<Vec<AvailabilitySlot>, DbError> {
        Ok(self.state.read().await.slots.values().cloned().collect())
    }

    async fn list_slots_by_timezone(&self, timezone_label: &str) -> Result<Vec<AvailabilitySlot>, DbError> {
        Ok(self
            .state
            .read()
            .await
            .slots
            .values()
            .filter(|slot| slot.timezone_label == timezone_label)
            .cloned()
            .collect())
    }

    async fn insert_party(&self, kind: PartyKind, party: NewParty) -> Result<Party, DbError> {
        let mut state = self.state.write().await;
        let id = match kind {
            PartyKind::Investor => state.investor_ids.next(),
            PartyKind::PortfolioCompany => state.portfolio_company_ids.next(),
        };
        let party = Party {
            id,
            name: party.name,
            company: party.company,
            timezone_label: party.timezone_label,
            email: party.email,
        };
        match kind {
            PartyKind::Investor => state.investors.insert(id, party.clone()),
            PartyKind::PortfolioCompany => state.portfolio_companies.insert(id, party.clone()),
        };
        Ok(party)
    }

    async fn list_parties(&self, kind: PartyKind) -> Result<Vec<Party>, DbError> {
        Ok(self.state.read().await.parties(kind).values().cloned().collect())
    }

    async fn delete_party(&self, kind: PartyKind, id: RecordId) -> Result<bool, DbError> {
        let mut state = self.state.write().await;
        let removed = match kind {
            PartyKind::Investor => state.investors.remove(&id).is_some(),
            PartyKind::PortfolioCompany => state.portfolio_companies.remove(&id).is_some(),
        };

        let doomed: Vec<RecordId> = state
            .selections
            .values()
            .filter(|s| match kind {
                PartyKind::Investor => s.investor_id == id,
                PartyKind::PortfolioCompany => s.portfolio_company_id == id,
            })
            .map(|s| s.id)
            .collect();
        debug!("Deleting {:?} {} cascades to {} selections", kind, id, doomed.len());

        for selection_id in &doomed {
            state.selections.remove(selection_id);
        }
        state
            .scheduled
            .retain(|_, m| !doomed.contains(&m.assignment.selection_id));
        state
            .unscheduled
            .retain(|_, m| !doomed.contains(&m.assignment.selection_id));

        Ok(removed)
    }

    async fn insert_selections(&self, pairs: Vec<(RecordId, RecordId)>) -> Result<usize, DbError> {
        let mut state = self.state.write().await;
        let mut created = 0usize;
        for (investor_id, portfolio_company_id) in pairs {
            let exists = state
                .selections
                .values()
                .any(|s| s.investor_id == investor_id && s.portfolio_company_id == portfolio_company_id);
            if exists {
                continue;
            }
            let id = state.selection_ids.next();
            state.selections.insert(
                id,
                Selection {
                    id,
                    investor_id,
                    portfolio_company_id,
                },
            );
            created += 1;
        }
        Ok(created)
    }

    async fn list_selections(&self) -> Result<Vec<Selection>, DbError> {
        Ok(self.state.read().await.selections.values().cloned().collect())
    }

    async fn list_resolved_selections(&self) -> Result<Vec<ResolvedSelection>, DbError> {
        let state = self.state.read().await;
        Ok(state
            .selections
            .values()
            .filter_map(|s| state.resolve(s))
            .collect())
    }

    async fn find_resolved_selection(&self, selection_id: RecordId) -> Result<Option<ResolvedSelection>, DbError> {
        let state = self.state.read().await;
        Ok(state
            .selections
            .get(&selection_id)
            .and_then(|s| state.resolve(s)))
    }

    async fn replace_schedule(
        &self,
        confirmed: Vec<MeetingAssignment>,
        rejected: Vec<MeetingAssignment>,
    ) -> Result<(Vec<ScheduledMeeting>, Vec<UnscheduledMeeting>), DbError> {
        let now = Some(Utc::now());

        let scheduled: Vec<ScheduledMeeting> = confirmed
            .into_iter()
            .zip(1..)
            .map(|(assignment, id)| ScheduledMeeting {
                id,
                assignment,
                created_at: now,
                updated_at: now,
            })
            .collect();
        let unscheduled: Vec<UnscheduledMeeting> = rejected
            .into_iter()
            .zip(1..)
            .map(|(assignment, id)| UnscheduledMeeting {
                id,
                assignment,
                created_at: now,
                updated_at: now,
            })
            .collect();

        let mut state = self.state.write().await;
        state.scheduled_ids = Sequence(scheduled.len() as RecordId);
        state.unscheduled_ids = Sequence(unscheduled.len() as RecordId);
        state.scheduled = scheduled.iter().map(|m| (m.id, m.clone())).collect();
        state.unscheduled = unscheduled.iter().map(|m| (m.id, m.clone())).collect();

        Ok((scheduled, unscheduled))
    }

    async fn list_scheduled_meetings(&self) -> Result<Vec<ScheduledMeeting>, DbError> {
        Ok(self.state.read().await.scheduled.values().cloned().collect())
    }

    async fn list_unscheduled_meetings(&self) -> Result<Vec<UnscheduledMeeting>, DbError> {
        Ok(self.state.read().await.unscheduled.values().cloned().collect())
    }

    async fn find_overlapping_meetings(&self, query: OverlapQuery) -> Result<Vec<ScheduledMeeting>, DbError> {
        Ok(self
            .state
            .read()
            .await
            .scheduled
            .values()
            .filter(|m| query.matches(m.id, &m.assignment))
            .cloned()
            .collect())
    }

    async fn insert_meeting(&self, meeting: MeetingAssignment) -> Result<ScheduledMeeting, DbError> {
        let mut state = self.state.write().await;
        let now = Some(Utc::now());
        let stored = ScheduledMeeting {
            id: state.scheduled_ids.next(),
            assignment: meeting,
            created_at: now,
            updated_at: now,
        };
        state.scheduled.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_meeting(
        &self,
        id: RecordId,
        meeting: MeetingAssignment,
    ) -> Result<Option<ScheduledMeeting>, DbError> {
        let mut state = self.state.write().await;
        Ok(state.scheduled.get_mut(&id).map(|existing| {
            existing.assignment = meeting;
            existing.updated_at = Some(Utc::now());
            existing.clone()
        }))
    }

    async fn find_meeting(&self, id: RecordId) -> Result<Option<ScheduledMeeting>, DbError> {
        Ok(self.state.read().await.scheduled.get(&id).cloned())
    }

    async fn delete_meeting(&self, id: RecordId) -> Result<bool, DbError> {
        Ok(self.state.write().await.scheduled.remove(&id).is_some())
    }
}
