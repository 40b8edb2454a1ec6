// --- File: crates/rendezvous_scheduler/src/handlers.rs ---
use crate::availability::DayAvailability;
use crate::models::{GenerateSelectionsResponse, MeetingRequest, RegenerateResponse};
use crate::service::SchedulerService;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use rendezvous_common::models::{
    AvailabilitySlot, NewAvailabilitySlot, NewParty, Party, PartyKind, RecordId, ScheduledMeeting,
    Selection, UnscheduledMeeting,
};
use rendezvous_common::RendezvousError;
use rendezvous_db::ScheduleRepository;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Shared state of the scheduling routes.
pub type SchedulerState<S> = Arc<SchedulerService<S>>;

pub async fn regenerate_schedule_handler<S>(
    State(service): State<SchedulerState<S>>,
) -> Result<Json<RegenerateResponse>, RendezvousError>
where
    S: ScheduleRepository + Send + Sync + 'static,
{
    info!("Schedule regeneration requested");
    Ok(Json(service.regenerate_schedule().await?))
}

pub async fn list_meetings_handler<S>(
    State(service): State<SchedulerState<S>>,
) -> Result<Json<Vec<ScheduledMeeting>>, RendezvousError>
where
    S: ScheduleRepository + Send + Sync + 'static,
{
    Ok(Json(service.list_scheduled_meetings().await?))
}

pub async fn list_unscheduled_meetings_handler<S>(
    State(service): State<SchedulerState<S>>,
) -> Result<Json<Vec<UnscheduledMeeting>>, RendezvousError>
where
    S: ScheduleRepository + Send + Sync + 'static,
{
    Ok(Json(service.list_unscheduled_meetings().await?))
}

pub async fn unscheduled_selections_handler<S>(
    State(service): State<SchedulerState<S>>,
) -> Result<Json<Vec<Selection>>, RendezvousError>
where
    S: ScheduleRepository + Send + Sync + 'static,
{
    Ok(Json(service.unscheduled_selections().await?))
}

pub async fn generate_selections_handler<S>(
    State(service): State<SchedulerState<S>>,
) -> Result<Json<GenerateSelectionsResponse>, RendezvousError>
where
    S: ScheduleRepository + Send + Sync + 'static,
{
    Ok(Json(service.generate_selections().await?))
}

pub async fn selection_availability_handler<S>(
    State(service): State<SchedulerState<S>>,
    Path(selection_id): Path<RecordId>,
) -> Result<Json<BTreeMap<NaiveDate, DayAvailability>>, RendezvousError>
where
    S: ScheduleRepository + Send + Sync + 'static,
{
    Ok(Json(service.availability_for_selection(selection_id).await?))
}

pub async fn create_meeting_handler<S>(
    State(service): State<SchedulerState<S>>,
    Json(request): Json<MeetingRequest>,
) -> Result<(StatusCode, Json<ScheduledMeeting>), RendezvousError>
where
    S: ScheduleRepository + Send + Sync + 'static,
{
    let meeting = service.create_meeting(request).await?;
    Ok((StatusCode::CREATED, Json(meeting)))
}

pub async fn update_meeting_handler<S>(
    State(service): State<SchedulerState<S>>,
    Path(meeting_id): Path<RecordId>,
    Json(request): Json<MeetingRequest>,
) -> Result<Json<ScheduledMeeting>, RendezvousError>
where
    S: ScheduleRepository + Send + Sync + 'static,
{
    Ok(Json(service.update_meeting(meeting_id, request).await?))
}

pub async fn delete_meeting_handler<S>(
    State(service): State<SchedulerState<S>>,
    Path(meeting_id): Path<RecordId>,
) -> Result<StatusCode, RendezvousError>
where
    S: ScheduleRepository + Send + Sync + 'static,
{
    service.delete_meeting(meeting_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_slots_handler<S>(
    State(service): State<SchedulerState<S>>,
    Json(slots): Json<Vec<NewAvailabilitySlot>>,
) -> Result<(StatusCode, Json<Vec<AvailabilitySlot>>), RendezvousError>
where
    S: ScheduleRepository + Send + Sync + 'static,
{
    let stored = service.add_slots(slots).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn list_slots_handler<S>(
    State(service): State<SchedulerState<S>>,
) -> Result<Json<Vec<AvailabilitySlot>>, RendezvousError>
where
    S: ScheduleRepository + Send + Sync + 'static,
{
    Ok(Json(service.list_slots().await?))
}

pub async fn add_investor_handler<S>(
    State(service): State<SchedulerState<S>>,
    Json(party): Json<NewParty>,
) -> Result<(StatusCode, Json<Party>), RendezvousError>
where
    S: ScheduleRepository + Send + Sync + 'static,
{
    let stored = service.add_party(PartyKind::Investor, party).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn list_investors_handler<S>(
    State(service): State<SchedulerState<S>>,
) -> Result<Json<Vec<Party>>, RendezvousError>
where
    S: ScheduleRepository + Send + Sync + 'static,
{
    Ok(Json(service.list_parties(PartyKind::Investor).await?))
}

pub async fn delete_investor_handler<S>(
    State(service): State<SchedulerState<S>>,
    Path(investor_id): Path<RecordId>,
) -> Result<StatusCode, RendezvousError>
where
    S: ScheduleRepository + Send + Sync + 'static,
{
    service.delete_party(PartyKind::Investor, investor_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_portfolio_company_handler<S>(
    State(service): State<SchedulerState<S>>,
    Json(party): Json<NewParty>,
) -> Result<(StatusCode, Json<Party>), RendezvousError>
where
    S: ScheduleRepository + Send + Sync + 'static,
{
    let stored = service.add_party(PartyKind::PortfolioCompany, party).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn list_portfolio_companies_handler<S>(
    State(service): State<SchedulerState<S>>,
) -> Result<Json<Vec<Party>>, RendezvousError>
where
    S: ScheduleRepository + Send + Sync + 'static,
{
    Ok(Json(service.list_parties(PartyKind::PortfolioCompany).await?))
}

pub async fn delete_portfolio_company_handler<S>(
    State(service): State<SchedulerState<S>>,
    Path(pc_id): Path<RecordId>,
) -> Result<StatusCode, RendezvousError>
where
    S: ScheduleRepository + Send + Sync + 'static,
{
    service.delete_party(PartyKind::PortfolioCompany, pc_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
