// File: services/rendezvous_backend/src/app.rs
use axum::{routing::get, Router};
use rendezvous_db::ScheduleRepository;
use rendezvous_scheduler::{handlers::SchedulerState, routes as scheduler_routes};
use tower_http::trace::TraceLayer;

/// Builds the full application router: everything lives under `/api`.
pub fn build_app<S>(service: SchedulerState<S>) -> Router
where
    S: ScheduleRepository + Send + Sync + 'static,
{
    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the Rendezvous API!" }))
        .merge(rendezvous_common::routes())
        .merge(scheduler_routes::routes(service));

    #[allow(unused_mut)] // for the features it needs to be mutable
    let mut app = Router::new().nest("/api", api_router);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use rendezvous_scheduler::doc::SchedulerApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Rendezvous API",
                version = "0.1.0",
                description = "Investor / portfolio company meeting scheduling",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "Rendezvous", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(SchedulerApiDoc::openapi());
        tracing::info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    app.layer(TraceLayer::new_for_http())
}
