//! # Scansheet Common
//!
//! Types shared by every crate of the workspace: the tabular data model, the
//! error taxonomy, well-known column names and the traits that describe where
//! tables come from and where they go.

pub mod columns;
pub mod config;
pub mod error;
pub mod log;
pub mod model;
pub mod tabular;

#[doc(hidden)]
pub use tracing as __tracing;
