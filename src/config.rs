//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the sidebar.
pub const APP_NAME: &str = "Ducks";

// =============================================================================
// Network Configuration
// =============================================================================

/// Base URL of the Ducks REST API.
///
/// Overridable at compile time with `DUCKS_API_URL` for deployed builds.
pub const API_BASE_URL: &str = match option_env!("DUCKS_API_URL") {
    Some(url) => url,
    None => "http://localhost:8080/api/v1",
};

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 10000;

// =============================================================================
// Cache Configuration
// =============================================================================

/// Maximum number of resource-cache entries retained after their last
/// subscriber is gone. Entries with live subscribers never count against
/// this limit.
pub const CACHE_CAPACITY: usize = 32;

// =============================================================================
// Session Storage
// =============================================================================

/// sessionStorage key for the currently selected festival id ("" = none).
pub const CURRENT_FESTIVAL_KEY: &str = "currentFestivalId";

/// In-tab event name dispatched after every write through the selection
/// store, so sibling components refresh from storage.
pub const SESSION_STORAGE_EVENT: &str = "ducks-session-storage";

// =============================================================================
// UI Configuration
// =============================================================================

/// How long a toast stays on screen before auto-dismissing (milliseconds).
pub const TOAST_DISMISS_MS: u32 = 4000;
