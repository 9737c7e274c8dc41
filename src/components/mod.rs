//! UI components built with Leptos.
//!
//! - [`router`] - Hash-based routing (main entry point)
//! - [`sidebar`] - Section navigation
//! - [`toast`] - Transient notifications for mutating actions
//! - [`icons`] - Centralized icon definitions
//! - [`festivals`] - Festival list/create and detail/edit pages
//! - [`posters`] - Poster list, registration, and detail pages

pub mod festivals;
pub mod icons;
pub mod posters;
pub mod router;
pub mod sidebar;
pub mod toast;

pub use router::AppRouter;
