//! Noise → (height, color) classification.
//!
//! A [`HeightCurve`] maps a raw noise sample to a terrain height by
//! piecewise-linear interpolation; [`ColorBands`] then buckets that height
//! into one of five flat colors.

use bevy::color::palettes::css::{LIGHT_GRAY, PALE_GREEN, ROYAL_BLUE, WHITE};
use bevy::prelude::*;

use crate::error::TerrainError;
use crate::math;
use crate::mesh::HexTile;

/// Piecewise-linear noise → height curve.
///
/// Control points are `(noise, height)` pairs, sorted by noise value. Equal
/// adjacent noise values are allowed and behave as a step.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightCurve {
    points: Vec<Vec2>,
}

impl HeightCurve {
    /// Validates and wraps a list of control points.
    ///
    /// Fails with [`TerrainError::EmptyCurve`] for an empty list and with
    /// [`TerrainError::UnsortedCurve`] when a point's noise value is smaller
    /// than its predecessor's (or NaN).
    pub fn new(points: Vec<Vec2>) -> Result<Self, TerrainError> {
        if points.is_empty() {
            return Err(TerrainError::EmptyCurve);
        }
        if points[0].x.is_nan() {
            return Err(TerrainError::UnsortedCurve { index: 0 });
        }
        for (i, pair) in points.windows(2).enumerate() {
            if pair[1].x.is_nan() || pair[1].x < pair[0].x {
                return Err(TerrainError::UnsortedCurve { index: i + 1 });
            }
        }
        Ok(Self { points })
    }

    /// The validated control points.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Raw (unclamped) height for a noise sample.
    ///
    /// Below the first point or above the last the curve is flat. Inside the
    /// first adjacent pair bracketing `noise` is interpolated. A NaN sample
    /// matches no pair and yields `0.0`.
    pub fn sample(&self, noise: f32) -> f32 {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];

        if self.points.len() == 1 || noise <= first.x {
            return first.y;
        }
        if noise >= last.x {
            return last.y;
        }

        self.points
            .windows(2)
            .find(|pair| pair[0].x <= noise && noise <= pair[1].x)
            .map(|pair| math::lerp_segment(pair[0], pair[1], noise))
            .unwrap_or(0.0)
    }
}

/// Five-bucket height → color step function.
///
/// A height strictly above `thresholds[i]` (checked in order) gets
/// `colors[i]`; anything at or below the last threshold gets `colors[4]`.
/// Thresholds are expected in descending order.
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct ColorBands {
    /// Descending height thresholds.
    pub thresholds: [f32; 4],
    /// One color per band, highest band first.
    pub colors: [Color; 5],
}

impl Default for ColorBands {
    fn default() -> Self {
        Self {
            thresholds: [10.0, 4.0, 0.0, -4.0],
            colors: [
                WHITE.into(),
                LIGHT_GRAY.into(),
                PALE_GREEN.into(),
                ROYAL_BLUE.into(),
                // Royal blue darkened by 20%.
                Color::srgb(0.204, 0.329, 0.706),
            ],
        }
    }
}

impl ColorBands {
    /// Color of the band containing `height`.
    pub fn color_for(&self, height: f32) -> Color {
        self.thresholds
            .iter()
            .position(|&t| height > t)
            .map_or(self.colors[4], |i| self.colors[i])
    }
}

/// Classifies a noise sample into a [`HexTile`].
///
/// The band color is picked from the raw curve height, so water bands stay
/// reachable; the stored height is clamped to `>= 0`.
pub fn classify(noise: f32, curve: &HeightCurve, bands: &ColorBands) -> HexTile {
    let height = curve.sample(noise);
    HexTile {
        height: height.max(0.0),
        color: bands.color_for(height),
    }
}
