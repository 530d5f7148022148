//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Error type and soft issues
//! - Highlight model (tokens, segments, lines, blocks)
//! - Rendering functions for different output formats
//! - Source preparation utilities

pub mod error;
pub mod model;
pub mod render;
pub mod util;
