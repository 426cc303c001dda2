/// A plotted value in a polar series.
///
/// The primary value is scaled along the radius axis and the secondary value along
/// the angle axis.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct ChartPoint {
    /// Radius value in chart units.
    pub primary: f64,
    /// Angle value in chart units.
    pub secondary: f64,
}

impl ChartPoint {
    pub fn new(primary: f64, secondary: f64) -> Self {
        Self { primary, secondary }
    }

    /// Build a point from an `(angle, radius)` pair.
    pub fn polar(angle: f64, radius: f64) -> Self {
        Self::new(radius, angle)
    }

    pub fn angle(&self) -> f64 {
        self.secondary
    }

    pub fn radius(&self) -> f64 {
        self.primary
    }
}

impl From<[f64; 2]> for ChartPoint {
    /// `[angle, radius]`, the same order `scale_ui_point` returns.
    fn from([angle, radius]: [f64; 2]) -> Self {
        Self::polar(angle, radius)
    }
}
