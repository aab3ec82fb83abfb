//! Service layer: the marketplace workflows on top of `models`.
//! - Domain services (auth, pets, sitters, bookings, notifications, users)
//!   take a connection and return view objects ready for serialization.
//! - Sitter search and rating aggregation live under `sitters`.
//! - `patch` and `views` form the mapping layer between transport and store.

pub mod errors;
pub mod pagination;
pub mod patch;
pub mod views;
pub mod auth;
pub mod users;
pub mod notifications;
pub mod pets;
pub mod sitters;
pub mod bookings;
#[cfg(test)]
pub mod test_support;

/// Ids bound per `IN (...)` query; stays well under every backend's
/// bind-parameter limit.
pub(crate) const IN_LIST_CHUNK: usize = 500;
