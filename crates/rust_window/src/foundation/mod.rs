//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Integer geometry (points and rectangles in screen coordinates)
//! - Logging utilities

pub mod geometry;
pub mod logging;
