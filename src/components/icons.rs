//! Centralized icon definitions.
//!
//! Maps semantic icon names to the Bootstrap icon set so components never
//! reference theme-specific names directly.

use icondata::Icon;

pub const CHEVRON_DOWN: Icon = icondata::BsChevronDown;
pub const CHEVRON_UP: Icon = icondata::BsChevronUp;
pub const CLOSE: Icon = icondata::BsXLg;
