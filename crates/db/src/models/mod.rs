//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` struct matching the database row
//! - Create DTOs for inserts and, where the table is mutable, an update DTO
//! - Serializable views returned by the API

pub mod list_item;
pub mod page_view;
pub mod session;
pub mod stats;
pub mod user;
