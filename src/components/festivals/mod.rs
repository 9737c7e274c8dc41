//! Festival management pages.

mod detail;
mod list;

pub use detail::FestivalDetailPage;
pub use list::FestivalListPage;
