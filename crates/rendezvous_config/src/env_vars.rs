//! Environment overrides use `RENDEZVOUS__<SECTION>__<KEY>`, for example
//! `RENDEZVOUS__SCHEDULING__CONFLICT_POLICY=both_yield`. Setting `PREFIX`
//! replaces `RENDEZVOUS`.

use std::env;

pub const DEFAULT_PREFIX: &str = "RENDEZVOUS";

/// Separates the prefix, section and key.
pub const CONFIG_SEPARATOR: &str = "__";

pub fn get_config_prefix() -> String {
    env::var("PREFIX")
        .ok()
        .filter(|prefix| !prefix.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PREFIX.to_string())
}
