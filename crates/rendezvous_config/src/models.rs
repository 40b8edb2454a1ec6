// --- File: crates/rendezvous_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8086,
        }
    }
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. sqlite://data/rendezvous.db, via RENDEZVOUS__DATABASE__URL
}

// --- Scheduling Policy ---

/// Which side of a cross-timezone conflict is moved to the rejected set.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// The assignment from the earlier-ordered timezone bucket is rejected.
    #[default]
    EarlierBucketYields,
    /// The assignment from the later-ordered timezone bucket is rejected.
    LaterBucketYields,
    /// Both assignments are rejected.
    BothYield,
}

/// How the allocator decides that a party is already booked for a slot.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OccupancyRule {
    /// One booking per party per exact (date, start time). Two slots with
    /// different start times are independent even if they overlap.
    #[default]
    ExactStart,
    /// A party is booked for every slot overlapping one of its bookings.
    IntervalOverlap,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulingConfig {
    #[serde(default)]
    pub conflict_policy: ConflictPolicy,
    #[serde(default)]
    pub occupancy_rule: OccupancyRule,
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Minimum level: trace, debug, info, warn or error.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    // Without a database section the backend keeps everything in memory.
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub scheduling: SchedulingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}
