//! Request extractors that gate and describe the caller.
//!
//! - [`auth::AuthUser`] -- the authenticated user behind the `access_token` cookie.
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.
//! - [`client::ClientMeta`] -- user agent and client IP for audit rows.

pub mod auth;
pub mod client;
pub mod rbac;
