//! Authentication primitives.
//!
//! - [`password`] -- bcrypt password hashing and verification.
//! - [`jwt`] -- access/refresh token issuing and verification, refresh-token hashing.
//! - [`cookies`] -- the `access_token` / `refresh_token` cookie pair.

pub mod cookies;
pub mod jwt;
pub mod password;
