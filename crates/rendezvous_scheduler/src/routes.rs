// --- File: crates/rendezvous_scheduler/src/routes.rs ---

use crate::handlers::{
    add_investor_handler, add_portfolio_company_handler, add_slots_handler,
    create_meeting_handler, delete_investor_handler, delete_meeting_handler,
    delete_portfolio_company_handler, generate_selections_handler, list_investors_handler,
    list_meetings_handler, list_portfolio_companies_handler, list_slots_handler,
    list_unscheduled_meetings_handler, regenerate_schedule_handler,
    selection_availability_handler, unscheduled_selections_handler, update_meeting_handler,
    SchedulerState,
};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use rendezvous_db::ScheduleRepository;

/// Creates a router containing all scheduling routes. Mount it under `/api`.
pub fn routes<S>(service: SchedulerState<S>) -> Router
where
    S: ScheduleRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/schedule/regenerate", post(regenerate_schedule_handler::<S>))
        .route("/schedule/meetings", get(list_meetings_handler::<S>))
        .route(
            "/schedule/unscheduled-meetings",
            get(list_unscheduled_meetings_handler::<S>),
        )
        .route(
            "/schedule/unscheduled-selections",
            get(unscheduled_selections_handler::<S>),
        )
        .route("/selections/generate", post(generate_selections_handler::<S>))
        .route(
            "/selections/{id}/availability",
            get(selection_availability_handler::<S>),
        )
        .route("/meetings", post(create_meeting_handler::<S>))
        .route(
            "/meetings/{id}",
            put(update_meeting_handler::<S>).delete(delete_meeting_handler::<S>),
        )
        .route(
            "/slots",
            get(list_slots_handler::<S>).post(add_slots_handler::<S>),
        )
        .route(
            "/investors",
            get(list_investors_handler::<S>).post(add_investor_handler::<S>),
        )
        .route("/investors/{id}", delete(delete_investor_handler::<S>))
        .route(
            "/portfolio-companies",
            get(list_portfolio_companies_handler::<S>).post(add_portfolio_company_handler::<S>),
        )
        .route(
            "/portfolio-companies/{id}",
            delete(delete_portfolio_company_handler::<S>),
        )
        .with_state(service)
}
