//! Utility functions and helpers.
//!
//! This module contains hostname qualification helpers shared by the
//! policy index and resolver.

pub mod names;
