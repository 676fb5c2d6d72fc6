//! Core types shared across the crate.
//!
//! This module hosts the two things every component depends on:
//!
//! - [`error`] - the [`OrbitupError`] taxonomy, the [`ErrorContext`] wrapper
//!   that attaches user-facing suggestions, and [`user_friendly_error`] used
//!   by the binary entry point.
//! - [`state`] - the [`InstallState`] enum and the single [`inspect`]
//!   query that derives it from the filesystem.
//!
//! [`OrbitupError`]: error::OrbitupError
//! [`ErrorContext`]: error::ErrorContext
//! [`user_friendly_error`]: error::user_friendly_error
//! [`InstallState`]: state::InstallState
//! [`inspect`]: state::inspect

pub mod error;
pub mod state;

pub use error::{ErrorContext, OrbitupError, user_friendly_error};
pub use state::{InstallState, inspect};
