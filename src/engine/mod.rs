//! Analysis engine.
//!
//! This module contains the host matcher, the insert-only policy index, the
//! effective-policy resolver, and the gateway overlap detector. Everything
//! here is synchronous and operates on borrowed, immutable inputs.

pub mod gateway_overlap;
pub mod host_matcher;
pub mod policy_index;
pub mod resolver;
