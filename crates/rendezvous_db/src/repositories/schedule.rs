//! Repository for the scheduling records
//!
//! Slots, parties, selections and both meeting sets live behind one trait so
//! that a schedule regeneration can replace the meeting sets atomically.

use crate::error::DbError;
use chrono::NaiveDate;
use rendezvous_common::models::{
    AvailabilitySlot, MeetingAssignment, NewAvailabilitySlot, NewParty, Party, PartyKind,
    RecordId, ResolvedSelection, ScheduledMeeting, Selection, TimeWindow, UnscheduledMeeting,
};
use std::future::Future;

/// Filter for scheduled meetings that could collide with a proposed meeting.
///
/// Matches meetings on `date` that involve `investor_id` OR
/// `portfolio_company_id`, and, when `window` is set, whose `[start, end)`
/// overlaps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapQuery {
    pub date: NaiveDate,
    pub window: Option<TimeWindow>,
    pub investor_id: RecordId,
    pub portfolio_company_id: RecordId,
    /// Meetings belonging to this selection are ignored.
    pub exclude_selection_id: Option<RecordId>,
    /// The meeting with this id is ignored (used when editing it).
    pub exclude_meeting_id: Option<RecordId>,
}

impl OverlapQuery {
    pub fn on_date(date: NaiveDate, investor_id: RecordId, portfolio_company_id: RecordId) -> Self {
        Self {
            date,
            window: None,
            investor_id,
            portfolio_company_id,
            exclude_selection_id: None,
            exclude_meeting_id: None,
        }
    }

    pub fn within(mut self, window: TimeWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn excluding_selection(mut self, selection_id: RecordId) -> Self {
        self.exclude_selection_id = Some(selection_id);
        self
    }

    pub fn excluding_meeting(mut self, meeting_id: RecordId) -> Self {
        self.exclude_meeting_id = Some(meeting_id);
        self
    }

    /// In-process evaluation of the filter, shared by the in-memory store.
    pub fn matches(&self, id: RecordId, meeting: &MeetingAssignment) -> bool {
        meeting.date == self.date
            && (meeting.investor_id == self.investor_id
                || meeting.portfolio_company_id == self.portfolio_company_id)
            && self.exclude_selection_id != Some(meeting.selection_id)
            && self.exclude_meeting_id != Some(id)
            && self
                .window
                .map_or(true, |window| window.overlaps(&meeting.window()))
    }
}

/// Persistence for everything the scheduler reads and writes.
///
/// Listings are ordered by id ascending.
pub trait ScheduleRepository {
    /// Create the tables if they do not exist yet.
    fn init_schema(&self) -> impl Future<Output = Result<(), DbError>> + Send;

    fn insert_slots(
        &self,
        slots: Vec<NewAvailabilitySlot>,
    ) -> impl Future<Output = Result<Vec<AvailabilitySlot>, DbError>> + Send;

    fn list_slots(&self) -> impl Future<Output = Result<Vec<AvailabilitySlot>, DbError>> + Send;

    fn list_slots_by_timezone(
        &self,
        timezone_label: &str,
    ) -> impl Future<Output = Result<Vec<AvailabilitySlot>, DbError>> + Send;

    fn insert_party(
        &self,
        kind: PartyKind,
        party: NewParty,
    ) -> impl Future<Output = Result<Party, DbError>> + Send;

    fn list_parties(
        &self,
        kind: PartyKind,
    ) -> impl Future<Output = Result<Vec<Party>, DbError>> + Send;

    /// Delete a party together with its selections and their meetings.
    ///
    /// Returns `false` when no such party exists.
    fn delete_party(
        &self,
        kind: PartyKind,
        id: RecordId,
    ) -> impl Future<Output = Result<bool, DbError>> + Send;

    /// Insert `(investor_id, portfolio_company_id)` pairs, skipping pairs that
    /// already exist. Returns the number of selections created.
    fn insert_selections(
        &self,
        pairs: Vec<(RecordId, RecordId)>,
    ) -> impl Future<Output = Result<usize, DbError>> + Send;

    fn list_selections(&self) -> impl Future<Output = Result<Vec<Selection>, DbError>> + Send;

    /// Selections joined with both parties' timezone labels. Selections whose
    /// parties no longer exist are skipped.
    fn list_resolved_selections(
        &self,
    ) -> impl Future<Output = Result<Vec<ResolvedSelection>, DbError>> + Send;

    fn find_resolved_selection(
        &self,
        selection_id: RecordId,
    ) -> impl Future<Output = Result<Option<ResolvedSelection>, DbError>> + Send;

    /// Truncate both meeting sets, reset their id counters and insert the new
    /// sets, all or nothing.
    fn replace_schedule(
        &self,
        confirmed: Vec<MeetingAssignment>,
        rejected: Vec<MeetingAssignment>,
    ) -> impl Future<Output = Result<(Vec<ScheduledMeeting>, Vec<UnscheduledMeeting>), DbError>> + Send;

    fn list_scheduled_meetings(
        &self,
    ) -> impl Future<Output = Result<Vec<ScheduledMeeting>, DbError>> + Send;

    fn list_unscheduled_meetings(
        &self,
    ) -> impl Future<Output = Result<Vec<UnscheduledMeeting>, DbError>> + Send;

    fn find_overlapping_meetings(
        &self,
        query: OverlapQuery,
    ) -> impl Future<Output = Result<Vec<ScheduledMeeting>, DbError>> + Send;

    fn insert_meeting(
        &self,
        meeting: MeetingAssignment,
    ) -> impl Future<Output = Result<ScheduledMeeting, DbError>> + Send;

    /// Overwrite a scheduled meeting. Returns `None` when it does not exist.
    fn update_meeting(
        &self,
        id: RecordId,
        meeting: MeetingAssignment,
    ) -> impl Future<Output = Result<Option<ScheduledMeeting>, DbError>> + Send;

    fn find_meeting(
        &self,
        id: RecordId,
    ) -> impl Future<Output = Result<Option<ScheduledMeeting>, DbError>> + Send;

    fn delete_meeting(&self, id: RecordId) -> impl Future<Output = Result<bool, DbError>> + Send;
}
