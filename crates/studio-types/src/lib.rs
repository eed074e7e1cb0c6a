//! Shared types and adapter traits for the Studio settings engine.
//!
//! The settings crate and every adapter implementation depend on this crate
//! only, so adapters compile independently of the validation and merge logic.

#![forbid(unsafe_code)]

pub mod error;
pub mod fetch_adapter;
pub mod prelude;
pub mod source;
pub mod storage_adapter;

pub use error::{Error, StResult};
pub use source::Source;

// vim: ts=4
