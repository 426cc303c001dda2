use iced::{Point, Rectangle, Size};

use crate::{
    axis::PolarAxis,
    error::ChartError,
    series::PolarSeries,
    view::{DEFAULT_INNER_RADIUS, PolarChart},
};

/// Builder for configuring and constructing a [`PolarChart`].
///
/// Without explicit axes, the chart gets one angle axis and one radius axis.
///
/// # Example
///
/// ```rust
/// use iced_polar::{PolarAxis, PolarChartBuilder, PolarChartView, PolarSeries};
///
/// let mut chart = PolarChartBuilder::new()
///     .with_draw_margin(iced::Rectangle::new(iced::Point::ORIGIN, iced::Size::new(200.0, 200.0)))
///     .with_inner_radius(20.0)
///     .add_radius_axis(PolarAxis::new().with_label("speed").with_min_limit(0.0))
///     .add_series(PolarSeries::from_polar([(0.0, 3.0), (180.0, 9.0), (360.0, 5.0)]))
///     .build()?;
/// chart.measure();
///
/// let [angle, radius] = chart.scale_ui_point(iced::Point::new(120.0, 100.0), 0, 0)?;
/// assert!(angle.abs() < 1e-9);
/// assert!(radius.abs() < 1e-9);
/// # Ok::<(), iced_polar::ChartError>(())
/// ```
#[derive(Default)]
pub struct PolarChartBuilder {
    draw_margin: Option<Rectangle>,
    inner_radius: Option<f32>,
    angle_axes: Vec<PolarAxis>,
    radius_axes: Vec<PolarAxis>,
    series: Vec<PolarSeries>,
}

impl PolarChartBuilder {
    /// Create a new PolarChartBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pixel rectangle available for plotting.
    pub fn with_draw_margin(mut self, draw_margin: Rectangle) -> Self {
        self.draw_margin = Some(draw_margin);
        self
    }

    /// Set the draw margin from an origin and a size.
    pub fn with_draw_margin_at(self, origin: Point, size: Size) -> Self {
        self.with_draw_margin(Rectangle::new(origin, size))
    }

    /// Set the pixel distance reserved at the center. Defaults to [`DEFAULT_INNER_RADIUS`].
    pub fn with_inner_radius(mut self, inner_radius: f32) -> Self {
        self.inner_radius = Some(inner_radius);
        self
    }

    pub fn add_angle_axis(mut self, axis: PolarAxis) -> Self {
        self.angle_axes.push(axis);
        self
    }

    pub fn add_radius_axis(mut self, axis: PolarAxis) -> Self {
        self.radius_axes.push(axis);
        self
    }

    pub fn add_series(mut self, series: PolarSeries) -> Self {
        self.series.push(series);
        self
    }

    /// Build the chart; validates the inner radius, axis limits and series.
    pub fn build(self) -> Result<PolarChart, ChartError> {
        let mut chart = PolarChart::without_axes();

        chart.set_inner_radius(self.inner_radius.unwrap_or(DEFAULT_INNER_RADIUS))?;
        if let Some(draw_margin) = self.draw_margin {
            chart.set_draw_margin(draw_margin);
        }

        let angle_axes = if self.angle_axes.is_empty() {
            vec![PolarAxis::new()]
        } else {
            self.angle_axes
        };
        for axis in angle_axes {
            chart.angle_axes.push(axis)?;
        }

        let radius_axes = if self.radius_axes.is_empty() {
            vec![PolarAxis::new()]
        } else {
            self.radius_axes
        };
        for axis in radius_axes {
            chart.radius_axes.push(axis)?;
        }

        for s in self.series {
            chart.add_series(s)?;
        }

        tracing::debug!(
            angle_axes = chart.angle_axes.len(),
            radius_axes = chart.radius_axes.len(),
            series = chart.series.len(),
            "built polar chart"
        );
        Ok(chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::PolarChartView;

    #[test]
    fn defaults() {
        let chart = PolarChartBuilder::new().build().unwrap();
        assert_eq!(chart.angle_axes().len(), 1);
        assert_eq!(chart.radius_axes().len(), 1);
        assert_eq!(chart.inner_radius(), DEFAULT_INNER_RADIUS);
        assert_eq!(chart.draw_margin(), Rectangle::new(Point::ORIGIN, Size::ZERO));
    }

    #[test]
    fn rejects_invalid_configuration() {
        let result = PolarChartBuilder::new().with_inner_radius(f32::NAN).build();
        assert!(matches!(result, Err(ChartError::InvalidInnerRadius(_))));

        let result = PolarChartBuilder::new()
            .add_angle_axis(PolarAxis::new().with_limits(360.0, 0.0))
            .build();
        assert!(matches!(result, Err(ChartError::InvalidAxisLimits)));

        let result = PolarChartBuilder::new()
            .add_series(PolarSeries::new(Vec::new()))
            .build();
        assert!(matches!(result, Err(ChartError::EmptySeries)));
    }

    #[test]
    fn radius_limits_shape_the_scale() {
        let mut chart = PolarChartBuilder::new()
            .with_draw_margin_at(Point::new(0.0, 0.0), Size::new(200.0, 100.0))
            .with_inner_radius(0.0)
            .add_radius_axis(PolarAxis::new().with_limits(0.0, 100.0))
            .add_series(PolarSeries::from_polar([(0.0, 20.0), (360.0, 80.0)]))
            .build()
            .unwrap();
        chart.measure();

        let scaler = chart.scaler(0, 0, false).unwrap();
        assert_eq!(scaler.min_radius(), 0.0);
        assert_eq!(scaler.max_radius(), 100.0);
        assert_eq!(scaler.outer_radius(), 50.0);
        assert_eq!(scaler.to_pixels(0.0, 100.0), Point::new(150.0, 50.0));
    }
}
