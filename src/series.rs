use core::fmt;

use crate::{error::ChartError, point::ChartPoint};

/// Unique identifier for a series in the chart.
///
/// ```rust
/// use iced_polar::PolarSeries;
/// let a = PolarSeries::new(vec![[0.0, 1.0].into()]);
/// let b = PolarSeries::new(vec![[0.0, 1.0].into()]);
/// assert_ne!(a.id, b.id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(pub(crate) u64);
impl ShapeId {
    /// Create a new unique shape ID (0, 1, 2, ...).
    pub(crate) fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}
impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({})", self.0)
    }
}

/// A collection of values plotted against one angle axis and one radius axis.
#[derive(Debug, Clone)]
pub struct PolarSeries {
    /// Unique identifier for the series.
    pub id: ShapeId,

    /// Series values.
    pub values: Vec<ChartPoint>,

    /// Optional label for the entire series.
    pub label: Option<String>,

    /// Index of the angle axis this series is scaled against.
    pub angle_axis_index: usize,

    /// Index of the radius axis this series is scaled against.
    pub radius_axis_index: usize,
}

impl PolarSeries {
    /// Create a new series bound to the first angle and radius axes.
    pub fn new(values: Vec<ChartPoint>) -> Self {
        Self {
            id: ShapeId::new(),
            values,
            label: None,
            angle_axis_index: 0,
            radius_axis_index: 0,
        }
    }

    /// Create a series from `(angle, radius)` pairs.
    pub fn from_polar<I: IntoIterator<Item = (f64, f64)>>(pairs: I) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(angle, radius)| ChartPoint::polar(angle, radius))
                .collect(),
        )
    }

    /// Create a series of radius values spread evenly by index: value `i` sits at angle `i`.
    pub fn from_radii<I: IntoIterator<Item = f64>>(radii: I) -> Self {
        Self::new(
            radii
                .into_iter()
                .enumerate()
                .map(|(i, radius)| ChartPoint::polar(i as f64, radius))
                .collect(),
        )
    }

    /// Set an label for the series.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let l = label.into();
        if !l.is_empty() {
            self.label = Some(l);
        }
        self
    }

    /// Scale this series against the angle axis at `index`.
    pub fn with_angle_axis(mut self, index: usize) -> Self {
        self.angle_axis_index = index;
        self
    }

    /// Scale this series against the radius axis at `index`.
    pub fn with_radius_axis(mut self, index: usize) -> Self {
        self.radius_axis_index = index;
        self
    }

    pub(crate) fn angles(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().map(ChartPoint::angle)
    }

    pub(crate) fn radii(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().map(ChartPoint::radius)
    }

    pub(super) fn validate(&self) -> Result<(), ChartError> {
        if self.values.is_empty() {
            return Err(ChartError::EmptySeries);
        }
        Ok(())
    }
}
