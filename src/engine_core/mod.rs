//! Core domain kernel.
//!
//! This module contains the data structures shared by every analyzer:
//! resource records, scope keys, diagnostics and the seams to the
//! snapshot store. Nothing here performs I/O.

pub mod constants;
pub mod diag;
pub mod errors;
pub mod models;
pub mod traits;
pub mod types;
