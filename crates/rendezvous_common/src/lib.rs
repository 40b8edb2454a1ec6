// --- File: crates/rendezvous_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // Error-to-response mapping
pub mod logging; // Subscriber setup
pub mod models; // Records shared by store, engine and API
pub mod routes; // Health check

pub use routes::routes;

pub use error::{
    config_error, conflict, database_error, internal_error, not_found, validation_error,
    HttpStatusCode, RendezvousError,
};

pub use http::IntoHttpResponse;

pub use logging::{init, init_from_config, init_with_level};
