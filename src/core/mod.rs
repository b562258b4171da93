//! Core module - Result model and output rendering
//!
//! This module provides:
//! - Unified result model (MetricResult)
//! - Rendering functions for different output formats

pub mod model;
pub mod render;
