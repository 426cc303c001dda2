use core::fmt;

use crate::series::ShapeId;

/// The role an axis plays in a polar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisRole {
    /// The axis mapped around the circle.
    Angle,
    /// The axis mapped outwards from the center.
    Radius,
}

impl fmt::Display for AxisRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Angle => f.write_str("angle"),
            Self::Radius => f.write_str("radius"),
        }
    }
}

/// Which generation of axis bounds a scaler was asked to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundsGeneration {
    Current,
    Previous,
}

impl BoundsGeneration {
    pub(crate) fn from_use_previous(use_previous: bool) -> Self {
        if use_previous {
            Self::Previous
        } else {
            Self::Current
        }
    }
}

impl fmt::Display for BoundsGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => f.write_str("current"),
            Self::Previous => f.write_str("previous"),
        }
    }
}

/// Errors that can occur when configuring a chart or building a scaler.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartError {
    /// The axis has not been measured yet, so there is nothing to scale against.
    ///
    /// Callers should defer scaling until the next measure pass.
    #[error("{role} axis has no {generation} bounds yet")]
    BoundsNotReady {
        role: AxisRole,
        generation: BoundsGeneration,
    },
    /// No axis exists at the requested index.
    #[error("no {role} axis at index {index}")]
    AxisNotFound { role: AxisRole, index: usize },
    /// No points provided to the series.
    #[error("series has no values")]
    EmptySeries,
    /// A series with the given ID does not exist.
    #[error("{0} does not exist")]
    SeriesNotFound(ShapeId),
    /// Axis limits are not properly set (min > max, or not finite).
    #[error("axis limits must be finite with min <= max")]
    InvalidAxisLimits,
    /// The inner radius is negative or not finite.
    #[error("inner radius must be finite and non-negative, got {0}")]
    InvalidInnerRadius(f32),
}
