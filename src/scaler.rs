use std::f64::consts::TAU;

use glam::DVec2;
use iced::{Point, Rectangle, Size};

use crate::{
    axis::PolarAxis,
    bounds::AxisBounds,
    error::{AxisRole, ChartError},
    point::ChartPoint,
};

/// Fraction of the angle span below `min_angle` that still snaps to `min_angle`
/// when inverting. Absorbs the rounding of a full turn through `atan2`.
const WRAP_TOLERANCE: f64 = 1e-9;

/// Converts between polar chart values and pixel positions.
///
/// A scaler is built from one angle axis and one radius axis for a single paint or
/// hit-test pass. It copies everything it needs out of the axes, so later changes to
/// the axes are never observed; build a new scaler instead.
///
/// The angle axis contributes its full data range, the radius axis its visible
/// range. Angle values are mapped so that one full angle span is one full turn,
/// starting along +x and rotating towards +y (screen convention). Radius values are
/// mapped linearly from `inner_radius` (at `min_radius`) to the edge of the largest
/// circle fitting in the draw margin (at `max_radius`). Values outside the radius
/// range are not clamped and extrapolate past the plot circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarScaler {
    center_x: f32,
    center_y: f32,
    min_radius: f64,
    max_radius: f64,
    min_angle: f64,
    max_angle: f64,
    delta_radius: f64,
    inner_radius: f64,
    scalable_radius: f64,
    delta_angle: f64,
}

impl PolarScaler {
    /// Build a scaler for the draw margin at `origin` with the given `size`.
    ///
    /// With `use_previous`, the previous bounds generation of both axes is used,
    /// which lets geometry animate from the old scale to the new one.
    ///
    /// Fails with [`ChartError::BoundsNotReady`] if either axis is missing the
    /// requested ranges.
    pub fn new(
        origin: Point,
        size: Size,
        angle_axis: &PolarAxis,
        radius_axis: &PolarAxis,
        inner_radius: f32,
        use_previous: bool,
    ) -> Result<Self, ChartError> {
        Self::from_bounds(
            origin,
            size,
            angle_axis.bounds(),
            radius_axis.bounds(),
            inner_radius,
            use_previous,
        )
    }

    /// Build a scaler for a draw margin rectangle.
    pub fn from_rect(
        draw_margin: Rectangle,
        angle_axis: &PolarAxis,
        radius_axis: &PolarAxis,
        inner_radius: f32,
        use_previous: bool,
    ) -> Result<Self, ChartError> {
        Self::new(
            draw_margin.position(),
            draw_margin.size(),
            angle_axis,
            radius_axis,
            inner_radius,
            use_previous,
        )
    }

    /// Build a scaler straight from axis bounds snapshots.
    pub fn from_bounds(
        origin: Point,
        size: Size,
        angle_bounds: &AxisBounds,
        radius_bounds: &AxisBounds,
        inner_radius: f32,
        use_previous: bool,
    ) -> Result<Self, ChartError> {
        let (angle, _) = angle_bounds.select(AxisRole::Angle, use_previous)?;
        let (_, radius) = radius_bounds.select(AxisRole::Radius, use_previous)?;

        let center_x = origin.x + size.width * 0.5;
        let center_y = origin.y + size.height * 0.5;

        let half_dimension = (size.width.min(size.height) as f64 * 0.5).max(0.0);
        let inner_radius = sanitize_inner_radius(inner_radius);

        let scaler = Self {
            center_x,
            center_y,
            min_radius: radius.min,
            max_radius: radius.max,
            min_angle: angle.min,
            max_angle: angle.max,
            delta_radius: radius.span(),
            inner_radius,
            scalable_radius: half_dimension - inner_radius,
            delta_angle: angle.span(),
        };
        tracing::trace!(?scaler, use_previous, "built polar scaler");
        Ok(scaler)
    }

    /// Center of the plot area, in pixels.
    pub fn center_x(&self) -> f32 {
        self.center_x
    }

    /// Center of the plot area, in pixels.
    pub fn center_y(&self) -> f32 {
        self.center_y
    }

    /// Center of the plot area, in pixels, as an `f64` vector.
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.center_x as f64, self.center_y as f64)
    }

    /// Lower end of the visible radius range, drawn at `inner_radius`.
    pub fn min_radius(&self) -> f64 {
        self.min_radius
    }

    /// Upper end of the visible radius range, drawn at `outer_radius`.
    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    /// Lower end of the full angle range.
    pub fn min_angle(&self) -> f64 {
        self.min_angle
    }

    /// Upper end of the full angle range.
    pub fn max_angle(&self) -> f64 {
        self.max_angle
    }

    /// Pixel distance from the center at which `min_radius` is drawn.
    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    /// Pixel length over which the radius range is spread.
    pub fn scalable_radius(&self) -> f64 {
        self.scalable_radius
    }

    /// Pixel distance from the center at which `max_radius` is drawn.
    pub fn outer_radius(&self) -> f64 {
        self.inner_radius + self.scalable_radius
    }

    /// Pixel distance from the center for a radius value.
    pub fn radius_to_pixels(&self, radius: f64) -> f64 {
        // A single-value radius axis has no radial variation.
        let p = if self.delta_radius == 0.0 {
            0.0
        } else {
            (radius - self.min_radius) / self.delta_radius
        };
        self.inner_radius + self.scalable_radius * p
    }

    /// Screen angle in radians for an angle value.
    pub fn angle_to_radians(&self, angle: f64) -> f64 {
        if self.delta_angle == 0.0 {
            return 0.0;
        }
        (360.0 * angle / self.delta_angle).to_radians()
    }

    /// Convert chart values to a pixel position without narrowing to `f32`.
    pub fn to_pixels_precise(&self, angle: f64, radius: f64) -> DVec2 {
        let r = self.radius_to_pixels(radius);
        let a = self.angle_to_radians(angle);
        self.center() + DVec2::new(a.cos(), a.sin()) * r
    }

    /// Convert chart values to a pixel position.
    pub fn to_pixels(&self, angle: f64, radius: f64) -> Point {
        let p = self.to_pixels_precise(angle, radius);
        Point::new(p.x as f32, p.y as f32)
    }

    /// Convert a plotted value to a pixel position.
    ///
    /// The secondary value is the angle, the primary value the radius.
    pub fn to_pixels_point(&self, point: &ChartPoint) -> Point {
        self.to_pixels(point.secondary, point.primary)
    }

    /// Convert many plotted values at once.
    pub fn project<'a>(&'a self, points: &'a [ChartPoint]) -> impl Iterator<Item = Point> + 'a {
        points.iter().map(|p| self.to_pixels_point(p))
    }

    /// Convert a pixel position back to `[angle, radius]` chart values.
    ///
    /// Inverts [`PolarScaler::to_pixels_precise`]. The angle is reported within
    /// `[min_angle, min_angle + span)`, so `max_angle` comes back as `min_angle` on
    /// a full-circle axis. Positions at the exact center have no angle and report
    /// the angle of the +x direction.
    pub fn to_chart_values(&self, pixel: DVec2) -> [f64; 2] {
        let d = pixel - self.center();
        let r = d.length();

        let radius = if self.scalable_radius == 0.0 {
            self.min_radius
        } else {
            self.min_radius + self.delta_radius * (r - self.inner_radius) / self.scalable_radius
        };

        let angle = if self.delta_angle == 0.0 {
            self.min_angle
        } else {
            let mut a = d.y.atan2(d.x);
            if a < 0.0 {
                a += TAU;
            }
            let raw = a.to_degrees() * self.delta_angle / 360.0;
            let turns = ((self.min_angle - raw) / self.delta_angle - WRAP_TOLERANCE).ceil();
            raw + turns * self.delta_angle
        };

        [angle, radius]
    }
}

/// Negative or non-finite inner radii become 0. An inner radius wider than the
/// draw margin is kept; the radius span then runs inwards and still inverts.
fn sanitize_inner_radius(inner_radius: f32) -> f64 {
    let requested = inner_radius as f64;
    if !requested.is_finite() || requested < 0.0 {
        tracing::warn!(inner_radius, "ignoring invalid inner radius");
        return 0.0;
    }
    requested
}
