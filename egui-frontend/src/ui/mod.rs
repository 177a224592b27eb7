//! View code. Each module renders one part of the screen and reports user
//! actions back to the caller instead of mutating anything itself.

pub mod auth_screen;
pub mod breakdown;
pub mod entry_list;
pub mod forms;
pub mod planner;
pub mod style;
pub mod summary;
