use core::fmt;

use crate::{
    bounds::{AxisBounds, Bounds},
    error::ChartError,
};

/// Unique identifier for an axis in a polar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisId(pub(crate) u64);

impl AxisId {
    pub(crate) fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Axis({})", self.0)
    }
}

/// An angle or radius axis of a polar chart.
///
/// The axis owns its [`AxisBounds`]. Bounds are recomputed by [`PolarAxis::measure`]
/// whenever the plotted data changes, and the visible window can be narrowed with
/// [`PolarAxis::zoom`] and [`PolarAxis::pan`].
#[derive(Debug, Clone)]
pub struct PolarAxis {
    /// Unique identifier for the axis.
    pub id: AxisId,
    /// Optional label for the axis.
    pub label: Option<String>,
    pub(crate) min_limit: Option<f64>,
    pub(crate) max_limit: Option<f64>,
    /// Visible window set by zoom/pan. Survives re-measuring until reset.
    pub(crate) window: Option<Bounds>,
    pub(crate) bounds: AxisBounds,
}

impl Default for PolarAxis {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarAxis {
    pub fn new() -> Self {
        Self {
            id: AxisId::new(),
            label: None,
            min_limit: None,
            max_limit: None,
            window: None,
            bounds: AxisBounds::new(),
        }
    }

    /// Set a label for the axis.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let l = label.into();
        if !l.is_empty() {
            self.label = Some(l);
        }
        self
    }

    /// Pin the visible range to `[min, max]`, overriding the data extent.
    pub fn with_limits(mut self, min: f64, max: f64) -> Self {
        self.min_limit = Some(min);
        self.max_limit = Some(max);
        self
    }

    /// Pin only the lower end of the visible range.
    pub fn with_min_limit(mut self, min: f64) -> Self {
        self.min_limit = Some(min);
        self
    }

    /// Pin only the upper end of the visible range.
    pub fn with_max_limit(mut self, max: f64) -> Self {
        self.max_limit = Some(max);
        self
    }

    pub fn bounds(&self) -> &AxisBounds {
        &self.bounds
    }

    /// Directly replace both current ranges, e.g. when bounds come from outside the chart.
    pub fn set_bounds(&mut self, data: Bounds, visible: Bounds) {
        self.bounds.replace(data, visible);
    }

    pub(crate) fn validate(&self) -> Result<(), ChartError> {
        let finite = |v: Option<f64>| v.is_none_or(f64::is_finite);
        if !finite(self.min_limit) || !finite(self.max_limit) {
            return Err(ChartError::InvalidAxisLimits);
        }
        if let (Some(min), Some(max)) = (self.min_limit, self.max_limit)
            && min > max
        {
            return Err(ChartError::InvalidAxisLimits);
        }
        Ok(())
    }

    /// Recompute the data and visible ranges from the given values.
    ///
    /// Returns `false` and leaves the bounds untouched when no finite value was seen.
    pub fn measure<I: IntoIterator<Item = f64>>(&mut self, values: I) -> bool {
        let Some(data) = Bounds::from_values(values) else {
            return false;
        };
        let visible = self.window.unwrap_or_else(|| self.limited(data));
        self.bounds.replace(data, visible);
        tracing::trace!(
            axis = %self.id,
            data_min = data.min,
            data_max = data.max,
            visible_min = visible.min,
            visible_max = visible.max,
            "measured axis"
        );
        true
    }

    /// Data range with user limits applied on top.
    fn limited(&self, data: Bounds) -> Bounds {
        let min = self.min_limit.unwrap_or(data.min);
        let max = self.max_limit.unwrap_or(data.max);
        // A one-sided limit can fall beyond the other end of the data.
        Bounds::new(min, max).unwrap_or(data)
    }

    /// Scale the visible window by `factor` around `pivot`.
    ///
    /// A factor below 1 zooms in. Returns `false` if the axis is not measured yet or
    /// the factor is not a finite positive number.
    pub fn zoom(&mut self, factor: f64, pivot: f64) -> bool {
        if !factor.is_finite() || factor <= 0.0 || !pivot.is_finite() {
            return false;
        }
        let (Some(data), Some(visible)) = (self.bounds.data(), self.bounds.visible()) else {
            return false;
        };
        let Some(window) = Bounds::new(
            pivot - (pivot - visible.min) * factor,
            pivot + (visible.max - pivot) * factor,
        ) else {
            return false;
        };
        self.set_window(data, window);
        true
    }

    /// Shift the visible window by `delta` chart units.
    pub fn pan(&mut self, delta: f64) -> bool {
        let (Some(data), Some(visible)) = (self.bounds.data(), self.bounds.visible()) else {
            return false;
        };
        let Some(window) = Bounds::new(visible.min + delta, visible.max + delta) else {
            return false;
        };
        self.set_window(data, window);
        true
    }

    /// Drop any zoom/pan window and show the full (limited) data range again.
    pub fn reset_zoom(&mut self) {
        self.window = None;
        if let Some(data) = self.bounds.data() {
            let visible = self.limited(data);
            self.bounds.replace(data, visible);
        }
    }

    fn set_window(&mut self, data: Bounds, window: Bounds) {
        self.window = Some(window);
        self.bounds.replace(data, window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_applies_limits() {
        let mut axis = PolarAxis::new().with_min_limit(0.0);
        assert!(axis.measure([12.0, 40.0, 25.0]));

        let bounds = axis.bounds();
        assert_eq!(bounds.data(), Bounds::new(12.0, 40.0));
        assert_eq!(bounds.visible(), Bounds::new(0.0, 40.0));
    }

    #[test]
    fn measure_without_values_keeps_bounds() {
        let mut axis = PolarAxis::new();
        assert!(!axis.measure(std::iter::empty()));
        assert!(!axis.bounds().is_ready());

        axis.measure([1.0, 2.0]);
        assert!(!axis.measure([f64::NAN]));
        assert_eq!(axis.bounds().data(), Bounds::new(1.0, 2.0));
    }

    #[test]
    fn remeasure_moves_current_into_previous() {
        let mut axis = PolarAxis::new();
        axis.measure([0.0, 10.0]);
        axis.measure([0.0, 50.0]);

        let bounds = axis.bounds();
        assert_eq!(bounds.previous_data(), Bounds::new(0.0, 10.0));
        assert_eq!(bounds.previous_visible(), Bounds::new(0.0, 10.0));
        assert_eq!(bounds.visible(), Bounds::new(0.0, 50.0));
    }

    #[test]
    fn zoom_window_survives_remeasure_until_reset() {
        let mut axis = PolarAxis::new();
        assert!(!axis.zoom(0.5, 0.0));

        axis.measure([0.0, 100.0]);
        assert!(axis.zoom(0.5, 0.0));
        assert_eq!(axis.bounds().visible(), Bounds::new(0.0, 50.0));

        assert!(axis.pan(10.0));
        axis.measure([0.0, 200.0]);
        assert_eq!(axis.bounds().visible(), Bounds::new(10.0, 60.0));
        assert_eq!(axis.bounds().data(), Bounds::new(0.0, 200.0));

        axis.reset_zoom();
        assert_eq!(axis.bounds().visible(), Bounds::new(0.0, 200.0));
        assert!(!axis.zoom(0.0, 0.0));
    }

    #[test]
    fn zoom_after_single_measure_keeps_whole_previous_generation() {
        let mut axis = PolarAxis::new();
        axis.measure([0.0, 100.0]);
        axis.zoom(0.5, 0.0);

        let bounds = axis.bounds();
        assert_eq!(bounds.previous_data(), Bounds::new(0.0, 100.0));
        assert_eq!(bounds.previous_visible(), Bounds::new(0.0, 100.0));
        assert_eq!(bounds.data(), Bounds::new(0.0, 100.0));

        axis.reset_zoom();
        let bounds = axis.bounds();
        assert_eq!(bounds.previous_data(), Bounds::new(0.0, 100.0));
        assert_eq!(bounds.previous_visible(), Bounds::new(0.0, 50.0));
    }

    #[test]
    fn validate_rejects_inverted_limits() {
        assert!(PolarAxis::new().with_limits(0.0, 1.0).validate().is_ok());
        assert_eq!(
            PolarAxis::new().with_limits(2.0, 1.0).validate(),
            Err(ChartError::InvalidAxisLimits)
        );
        assert_eq!(
            PolarAxis::new().with_max_limit(f64::NAN).validate(),
            Err(ChartError::InvalidAxisLimits)
        );
    }
}
