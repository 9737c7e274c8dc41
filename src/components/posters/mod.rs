//! Poster management pages.

mod detail;
mod list;
mod new;
mod status_picker;

pub use detail::PosterDetailPage;
pub use list::PosterListPage;
pub use new::NewPosterPage;
pub use status_picker::StatusPicker;
