//! Domain types and rules shared by the Tratics database and API crates.
//!
//! Nothing in here touches I/O: the enums, validators and time-window helpers
//! are pure so both the repositories and the HTTP handlers can rely on them.

pub mod error;
pub mod lists;
pub mod roles;
pub mod stats;
pub mod types;
pub mod validation;
