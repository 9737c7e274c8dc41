//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`Festival`] - Event records that posters belong to
//! - [`Poster`], [`PosterStatus`] - Poster records and their collection state
//! - [`AppRoute`] - Hash-based navigation

mod festival;
mod poster;
mod route;

pub use festival::{Festival, FestivalListResponse, FestivalPayload};
pub use poster::{Poster, PosterListResponse, PosterStatus};
pub use route::AppRoute;
