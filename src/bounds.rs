use crate::error::{AxisRole, BoundsGeneration, ChartError};

/// A numeric range spanned by an axis.
///
/// Always satisfies `min <= max`, with both ends finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub(crate) min: f64,
    pub(crate) max: f64,
}

impl Bounds {
    /// Create a range from two values in either order.
    ///
    /// Returns `None` if either value is not finite.
    pub fn new(a: f64, b: f64) -> Option<Self> {
        if !a.is_finite() || !b.is_finite() {
            return None;
        }
        Some(Self {
            min: a.min(b),
            max: a.max(b),
        })
    }

    /// Smallest range containing every value, or `None` if no finite value was seen.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<Self>, v| {
                Some(match acc {
                    Some(b) => Self {
                        min: b.min.min(v),
                        max: b.max.max(v),
                    },
                    None => Self { min: v, max: v },
                })
            })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// `max - min`; zero for a single-value axis.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Current and previous ranges of one polar axis.
///
/// The full data range and the visible (zoomed/panned) range form one
/// generation. [`AxisBounds::replace`] moves the current pair into the
/// `previous_*` slots before writing the new pair, so exactly one generation of
/// history is retained and both previous ranges always come from the same pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisBounds {
    data: Option<Bounds>,
    visible: Option<Bounds>,
    previous_data: Option<Bounds>,
    previous_visible: Option<Bounds>,
}

impl AxisBounds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current ranges computed elsewhere, either of which may still be absent.
    pub fn from_parts(data: Option<Bounds>, visible: Option<Bounds>) -> Self {
        Self {
            data,
            visible,
            ..Self::default()
        }
    }

    /// Full extent of every plotted value.
    pub fn data(&self) -> Option<Bounds> {
        self.data
    }

    /// Extent after zoom/pan restriction.
    pub fn visible(&self) -> Option<Bounds> {
        self.visible
    }

    /// Data range before the last [`AxisBounds::replace`].
    pub fn previous_data(&self) -> Option<Bounds> {
        self.previous_data
    }

    /// Visible range before the last [`AxisBounds::replace`].
    pub fn previous_visible(&self) -> Option<Bounds> {
        self.previous_visible
    }

    /// Write a new current pair, keeping the old pair as the previous generation.
    pub fn replace(&mut self, data: Bounds, visible: Bounds) {
        self.previous_data = self.data;
        self.previous_visible = self.visible;
        self.data = Some(data);
        self.visible = Some(visible);
    }

    /// Whether both current ranges have been measured.
    pub fn is_ready(&self) -> bool {
        self.data.is_some() && self.visible.is_some()
    }

    /// Select `(data, visible)` for the requested generation.
    ///
    /// Fails with [`ChartError::BoundsNotReady`] when either range is absent.
    pub fn select(&self, role: AxisRole, use_previous: bool) -> Result<(Bounds, Bounds), ChartError> {
        let (data, visible) = if use_previous {
            (self.previous_data, self.previous_visible)
        } else {
            (self.data, self.visible)
        };
        match (data, visible) {
            (Some(data), Some(visible)) => Ok((data, visible)),
            _ => Err(ChartError::BoundsNotReady {
                role,
                generation: BoundsGeneration::from_use_previous(use_previous),
            }),
        }
    }
}
