//! REST client for the Ducks API.
//!
//! [`http`] carries the transport (fetch with timeout racing); [`festivals`]
//! and [`posters`] hold the endpoint URL builders, write helpers, and the
//! typed read hooks built on the resource cache.

pub mod festivals;
pub mod http;
pub mod posters;
