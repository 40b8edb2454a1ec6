// --- File: crates/rendezvous_scheduler/src/models.rs ---
//! Request and response bodies of the scheduling API.

use chrono::NaiveDate;
use rendezvous_common::models::{hhmm, RecordId, ScheduledMeeting, UnscheduledMeeting};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Body of `POST /meetings` and `PUT /meetings/{id}`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MeetingRequest {
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    pub selection_id: RecordId,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Date, example = "2025-01-01"))]
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "09:00"))]
    pub start_time: chrono::NaiveTime,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "10:00"))]
    pub end_time: chrono::NaiveTime,
    /// Defaults to the length of the window; must match it when given.
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = 60))]
    pub duration_minutes: Option<i64>,
}

/// Result of `POST /schedule/regenerate`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RegenerateResponse {
    /// Number of confirmed meetings.
    pub count: usize,
    pub confirmed: Vec<ScheduledMeeting>,
    pub rejected: Vec<UnscheduledMeeting>,
    pub excluded_selection_ids: Vec<RecordId>,
    pub left_out_portfolio_company_ids: Vec<RecordId>,
    pub unassigned_selection_ids: Vec<RecordId>,
}

/// Result of `POST /selections/generate`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct GenerateSelectionsResponse {
    pub created: usize,
}
