//! Ground height model
//!
//! Two superimposed sine waves produce gentle rolling slopes. Pure and O(1);
//! the simulation and the renderer both sample it every frame.

use crate::consts::RIDE_HEIGHT;

/// Baseline ground height. The y axis points down, so larger is lower.
pub const GROUND_BASE: f32 = 470.0;

/// Ground surface height at world x.
pub fn height_at(x: f32) -> f32 {
    GROUND_BASE + 16.0 * ((x + 200.0) / 260.0).sin() + 12.0 * ((x + 900.0) / 180.0).sin()
}

/// Floor for a bike at world x: the ground line minus the ride height.
pub fn floor_at(x: f32) -> f32 {
    height_at(x) - RIDE_HEIGHT
}
