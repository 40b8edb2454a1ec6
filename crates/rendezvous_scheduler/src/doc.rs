// File: crates/rendezvous_scheduler/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use crate::models::{GenerateSelectionsResponse, MeetingRequest, RegenerateResponse};
use rendezvous_common::models::{
    AvailabilitySlot, MeetingAssignment, NewAvailabilitySlot, NewParty, Party, ScheduledMeeting,
    Selection, TimeWindow, UnscheduledMeeting,
};
use utoipa::OpenApi;

#[utoipa::path(
    post,
    path = "/schedule/regenerate",
    responses(
        (status = 200, description = "Schedule rebuilt from scratch", body = RegenerateResponse,
         example = json!({
             "count": 1,
             "confirmed": [{
                 "id": 1, "selection_id": 1, "portfolio_company_id": 1, "investor_id": 1,
                 "date": "2025-01-01", "start_time": "09:00", "end_time": "10:00",
                 "duration_minutes": 60,
                 "created_at": "2025-01-01T08:00:00Z", "updated_at": "2025-01-01T08:00:00Z"
             }],
             "rejected": [],
             "excluded_selection_ids": [],
             "left_out_portfolio_company_ids": [],
             "unassigned_selection_ids": []
         })
        ),
        (status = 500, description = "Store failure; previous schedule kept")
    ),
    tag = "Schedule"
)]
fn doc_regenerate_schedule_handler() {}

#[utoipa::path(
    get,
    path = "/schedule/meetings",
    responses((status = 200, description = "Confirmed meetings", body = [ScheduledMeeting])),
    tag = "Schedule"
)]
fn doc_list_meetings_handler() {}

#[utoipa::path(
    get,
    path = "/schedule/unscheduled-meetings",
    responses((status = 200, description = "Meetings rejected by cross-timezone conflicts", body = [UnscheduledMeeting])),
    tag = "Schedule"
)]
fn doc_list_unscheduled_meetings_handler() {}

#[utoipa::path(
    get,
    path = "/schedule/unscheduled-selections",
    responses((status = 200, description = "Selections in neither meeting set", body = [Selection])),
    tag = "Schedule"
)]
fn doc_unscheduled_selections_handler() {}

#[utoipa::path(
    post,
    path = "/selections/generate",
    responses((status = 200, description = "Number of selections created", body = GenerateSelectionsResponse,
               example = json!({ "created": 12 }))),
    tag = "Selections"
)]
fn doc_generate_selections_handler() {}

#[utoipa::path(
    get,
    path = "/selections/{id}/availability",
    params(("id" = i64, Path, description = "Selection id")),
    responses(
        (status = 200, description = "Free windows per date; fully booked dates map to [\"unavailable\"]",
         example = json!({
             "2025-01-01": [{ "start_time": "09:00", "end_time": "10:00" }],
             "2025-01-02": ["unavailable"]
         })
        ),
        (status = 404, description = "Selection not found")
    ),
    tag = "Selections"
)]
fn doc_selection_availability_handler() {}

#[utoipa::path(
    post,
    path = "/meetings",
    request_body(content = MeetingRequest, example = json!({
        "selection_id": 1,
        "date": "2025-01-01",
        "start_time": "09:00",
        "end_time": "10:00",
        "duration_minutes": 60
    })),
    responses(
        (status = 201, description = "Meeting created", body = ScheduledMeeting),
        (status = 400, description = "Invalid window or duration"),
        (status = 404, description = "Selection not found"),
        (status = 409, description = "Overlaps a meeting of either party or lies outside their availability")
    ),
    tag = "Meetings"
)]
fn doc_create_meeting_handler() {}

#[utoipa::path(
    put,
    path = "/meetings/{id}",
    params(("id" = i64, Path, description = "Meeting id")),
    request_body = MeetingRequest,
    responses(
        (status = 200, description = "Meeting updated", body = ScheduledMeeting),
        (status = 404, description = "Meeting or selection not found"),
        (status = 409, description = "Overlaps a meeting of either party or lies outside their availability")
    ),
    tag = "Meetings"
)]
fn doc_update_meeting_handler() {}

#[utoipa::path(
    delete,
    path = "/meetings/{id}",
    params(("id" = i64, Path, description = "Meeting id")),
    responses(
        (status = 204, description = "Meeting deleted"),
        (status = 404, description = "Meeting not found")
    ),
    tag = "Meetings"
)]
fn doc_delete_meeting_handler() {}

#[utoipa::path(
    post,
    path = "/slots",
    request_body(content = [NewAvailabilitySlot], example = json!([
        { "timezone_label": "GMT", "date": "2025-01-01", "start_time": "09:00", "end_time": "10:00" }
    ])),
    responses(
        (status = 201, description = "Slots stored", body = [AvailabilitySlot]),
        (status = 400, description = "Empty timezone label or window")
    ),
    tag = "Directory"
)]
fn doc_add_slots_handler() {}

#[utoipa::path(
    get,
    path = "/slots",
    responses((status = 200, description = "All availability slots", body = [AvailabilitySlot])),
    tag = "Directory"
)]
fn doc_list_slots_handler() {}

#[utoipa::path(
    post,
    path = "/investors",
    request_body = NewParty,
    responses((status = 201, description = "Investor stored", body = Party)),
    tag = "Directory"
)]
fn doc_add_investor_handler() {}

#[utoipa::path(
    get,
    path = "/investors",
    responses((status = 200, description = "All investors", body = [Party])),
    tag = "Directory"
)]
fn doc_list_investors_handler() {}

#[utoipa::path(
    delete,
    path = "/investors/{id}",
    params(("id" = i64, Path, description = "Investor id")),
    responses(
        (status = 204, description = "Investor, its selections and their meetings deleted"),
        (status = 404, description = "Investor not found")
    ),
    tag = "Directory"
)]
fn doc_delete_investor_handler() {}

#[utoipa::path(
    post,
    path = "/portfolio-companies",
    request_body = NewParty,
    responses((status = 201, description = "Portfolio company stored", body = Party)),
    tag = "Directory"
)]
fn doc_add_portfolio_company_handler() {}

#[utoipa::path(
    get,
    path = "/portfolio-companies",
    responses((status = 200, description = "All portfolio companies", body = [Party])),
    tag = "Directory"
)]
fn doc_list_portfolio_companies_handler() {}

#[utoipa::path(
    delete,
    path = "/portfolio-companies/{id}",
    params(("id" = i64, Path, description = "Portfolio company id")),
    responses(
        (status = 204, description = "Portfolio company, its selections and their meetings deleted"),
        (status = 404, description = "Portfolio company not found")
    ),
    tag = "Directory"
)]
fn doc_delete_portfolio_company_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_regenerate_schedule_handler,
        doc_list_meetings_handler,
        doc_list_unscheduled_meetings_handler,
        doc_unscheduled_selections_handler,
        doc_generate_selections_handler,
        doc_selection_availability_handler,
        doc_create_meeting_handler,
        doc_update_meeting_handler,
        doc_delete_meeting_handler,
        doc_add_slots_handler,
        doc_list_slots_handler,
        doc_add_investor_handler,
        doc_list_investors_handler,
        doc_delete_investor_handler,
        doc_add_portfolio_company_handler,
        doc_list_portfolio_companies_handler,
        doc_delete_portfolio_company_handler
    ),
    components(
        schemas(
            RegenerateResponse,
            GenerateSelectionsResponse,
            MeetingRequest,
            MeetingAssignment,
            ScheduledMeeting,
            UnscheduledMeeting,
            Selection,
            TimeWindow,
            AvailabilitySlot,
            NewAvailabilitySlot,
            Party,
            NewParty
        )
    ),
    tags(
        (name = "Schedule", description = "Batch schedule regeneration"),
        (name = "Selections", description = "Investor / portfolio company pairings"),
        (name = "Meetings", description = "Manual meeting management"),
        (name = "Directory", description = "Availability slots, investors and portfolio companies")
    ),
    servers(
        (url = "/api", description = "Rendezvous scheduling API")
    )
)]
pub struct SchedulerApiDoc;
