//! Consolidated test utilities for profile-stats
//!
//! This module provides unified testing utilities for integration tests,
//! built around a scripted GraphQL transport so no test touches the network.

pub mod assertions;
pub mod fixtures;
pub mod transport;
