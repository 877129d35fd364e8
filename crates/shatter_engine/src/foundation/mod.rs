//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and operations
//! - Time management and tick pacing
//! - Session-scoped deferred tasks
//! - Logging utilities

pub mod deferred;
pub mod logging;
pub mod math;
pub mod time;
