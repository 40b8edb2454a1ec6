// --- File: crates/rendezvous_common/src/models.rs ---

//! Records shared by the store, the scheduling engine and the HTTP layer.
//!
//! Dates are plain calendar dates and times are wall-clock times inside the
//! timezone bucket named by the slot or party. Nothing here converts between
//! zones: a slot's `09:00` in `GMT` and a slot's `09:00` in `IST` compare equal.

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of any persisted record.
pub type RecordId = i64;

/// Every meeting produced by the scheduler lasts exactly this long.
pub const MEETING_DURATION_MINUTES: i64 = 60;

/// Serde helpers for `HH:MM` wall-clock times.
///
/// Seconds are kept: they are written as `HH:MM:SS` when non-zero, and
/// deserialization accepts both forms.
pub mod hhmm {
    use chrono::{NaiveTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";
    pub const FORMAT_WITH_SECONDS: &str = "%H:%M:%S";

    /// Writes `HH:MM`, or `HH:MM:SS` when the seconds are not zero.
    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(*time))
    }

    pub fn format(time: NaiveTime) -> String {
        if time.second() == 0 {
            time.format(FORMAT).to_string()
        } else {
            time.format(FORMAT_WITH_SECONDS).to_string()
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Parses `HH:MM` or `HH:MM:SS`.
    pub fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw, FORMAT_WITH_SECONDS))
    }
}

/// A half-open `[start, end)` wall-clock range on one day.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "09:00"))]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "10:00"))]
    pub end_time: NaiveTime,
}

impl TimeWindow {
    pub fn new(start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    /// Minutes since midnight of the start.
    pub fn start_minutes(&self) -> u32 {
        minutes_since_midnight(self.start_time)
    }

    /// Minutes since midnight of the end.
    pub fn end_minutes(&self) -> u32 {
        minutes_since_midnight(self.end_time)
    }

    /// `true` when the ranges share at least one minute. Touching ranges
    /// (`09:00-10:00` and `10:00-11:00`) do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start_minutes() < other.end_minutes() && other.start_minutes() < self.end_minutes()
    }

    /// `true` when `other` lies completely inside this window.
    pub fn contains(&self, other: &TimeWindow) -> bool {
        self.start_minutes() <= other.start_minutes() && other.end_minutes() <= self.end_minutes()
    }

    pub fn is_empty(&self) -> bool {
        self.end_minutes() <= self.start_minutes()
    }
}

pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// An open window during which parties of one timezone bucket can meet.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub id: RecordId,
    #[cfg_attr(feature = "openapi", schema(example = "GMT"))]
    pub timezone_label: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Date, example = "2025-01-01"))]
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "09:00"))]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "10:00"))]
    pub end_time: NaiveTime,
}

impl AvailabilitySlot {
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start_time, self.end_time)
    }
}

/// Slot fields supplied on insert; the store assigns the id.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAvailabilitySlot {
    pub timezone_label: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Date))]
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub end_time: NaiveTime,
}

/// Which population a party belongs to.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyKind {
    Investor,
    PortfolioCompany,
}

/// An investor or a portfolio company.
///
/// The `timezone_label` selects the availability bucket the party's
/// meetings are drawn from.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub id: RecordId,
    pub name: String,
    pub company: String,
    pub timezone_label: String,
    pub email: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewParty {
    pub name: String,
    pub company: String,
    pub timezone_label: String,
    pub email: String,
}

/// A declared investor / portfolio company pairing.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub id: RecordId,
    pub investor_id: RecordId,
    pub portfolio_company_id: RecordId,
}

/// A selection joined with the timezone labels of both parties.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSelection {
    pub selection_id: RecordId,
    pub investor_id: RecordId,
    pub portfolio_company_id: RecordId,
    pub investor_timezone: String,
    pub portfolio_company_timezone: String,
}

/// A tentative meeting produced by the allocator.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingAssignment {
    pub selection_id: RecordId,
    pub portfolio_company_id: RecordId,
    pub investor_id: RecordId,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Date, example = "2025-01-01"))]
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "09:00"))]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "10:00"))]
    pub end_time: NaiveTime,
    pub duration_minutes: i64,
}

impl MeetingAssignment {
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start_time, self.end_time)
    }

    /// `true` when both meetings involve a common investor or portfolio company.
    pub fn shares_party_with(&self, other: &MeetingAssignment) -> bool {
        self.investor_id == other.investor_id
            || self.portfolio_company_id == other.portfolio_company_id
    }

    /// Same party, same date and overlapping `[start, end)`.
    pub fn collides_with(&self, other: &MeetingAssignment) -> bool {
        self.shares_party_with(other)
            && self.date == other.date
            && self.window().overlaps(&other.window())
    }
}

/// A persisted meeting that survived conflict detection or was created manually.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMeeting {
    pub id: RecordId,
    #[serde(flatten)]
    pub assignment: MeetingAssignment,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub created_at: Option<DateTime<Utc>>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A persisted assignment that lost a cross-timezone conflict.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnscheduledMeeting {
    pub id: RecordId,
    #[serde(flatten)]
    pub assignment: MeetingAssignment,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub created_at: Option<DateTime<Utc>>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub updated_at: Option<DateTime<Utc>>,
}
