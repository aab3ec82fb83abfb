//! Pieces shared by every crate in the workspace: logging bootstrap and
//! small transport types that are not owned by a single layer.

pub mod types;
pub mod utils;
