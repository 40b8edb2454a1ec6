//! Builders shared by the unit tests.

use chrono::{NaiveDate, NaiveTime};
use rendezvous_common::models::{
    AvailabilitySlot, MeetingAssignment, Party, RecordId, ResolvedSelection,
    MEETING_DURATION_MINUTES,
};

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

/// A slot on 2025-01-`day` from `start` to `end` (hours).
pub fn slot(id: RecordId, tz: &str, day: u32, start: u32, end: u32) -> AvailabilitySlot {
    AvailabilitySlot {
        id,
        timezone_label: tz.to_string(),
        date: date(day),
        start_time: time(start, 0),
        end_time: time(end, 0),
    }
}

pub fn selection(id: RecordId, investor_id: RecordId, pc_id: RecordId, tz: &str) -> ResolvedSelection {
    ResolvedSelection {
        selection_id: id,
        investor_id,
        portfolio_company_id: pc_id,
        investor_timezone: tz.to_string(),
        portfolio_company_timezone: tz.to_string(),
    }
}

pub fn assignment(
    selection_id: RecordId,
    investor_id: RecordId,
    pc_id: RecordId,
    day: u32,
    start: (u32, u32),
    end: (u32, u32),
) -> MeetingAssignment {
    MeetingAssignment {
        selection_id,
        portfolio_company_id: pc_id,
        investor_id,
        date: date(day),
        start_time: time(start.0, start.1),
        end_time: time(end.0, end.1),
        duration_minutes: MEETING_DURATION_MINUTES,
    }
}

pub fn party(id: RecordId, tz: &str) -> Party {
    Party {
        id,
        name: format!("Party {}", id),
        company: format!("Company {}", id),
        timezone_label: tz.to_string(),
        email: format!("party{}@example.com", id),
    }
}
