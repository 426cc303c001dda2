use glam::DVec2;
use iced::{Point, Rectangle, Size};
use indexmap::IndexMap;

use crate::{
    axis_collection::AxisCollection,
    error::{AxisRole, ChartError},
    scaler::PolarScaler,
    series::{PolarSeries, ShapeId},
};

/// Inner radius used when none is configured, in pixels.
pub const DEFAULT_INNER_RADIUS: f32 = 50.0;

/// A view hosting series in a polar coordinate system.
///
/// A polar chart may have several angle and radius axes; each series and each
/// hit-test picks one pair by index. Implementors only provide the data; scaler
/// construction and pixel-to-value conversion are provided.
pub trait PolarChartView {
    fn angle_axes(&self) -> &AxisCollection;

    fn radius_axes(&self) -> &AxisCollection;

    fn series(&self) -> &IndexMap<ShapeId, PolarSeries>;

    /// The pixel rectangle available for plotting.
    fn draw_margin(&self) -> Rectangle;

    /// Pixel distance reserved at the center before radial scaling begins.
    fn inner_radius(&self) -> f32 {
        DEFAULT_INNER_RADIUS
    }

    /// Build a scaler for the axis pair at the given indices.
    fn scaler(
        &self,
        angle_axis_index: usize,
        radius_axis_index: usize,
        use_previous: bool,
    ) -> Result<PolarScaler, ChartError> {
        let angle = self.angle_axes().try_get(angle_axis_index)?;
        let radius = self.radius_axes().try_get(radius_axis_index)?;
        PolarScaler::from_rect(
            self.draw_margin(),
            angle,
            radius,
            self.inner_radius(),
            use_previous,
        )
    }

    /// Convert a pixel position to `[angle, radius]` chart values.
    ///
    /// Use index 0 for both axes to address the primary axis pair.
    fn scale_ui_point(
        &self,
        point: Point,
        angle_axis_index: usize,
        radius_axis_index: usize,
    ) -> Result<[f64; 2], ChartError> {
        self.scale_ui_point_precise(
            DVec2::new(point.x as f64, point.y as f64),
            angle_axis_index,
            radius_axis_index,
        )
    }

    /// [`PolarChartView::scale_ui_point`] for positions held in `f64`.
    fn scale_ui_point_precise(
        &self,
        point: DVec2,
        angle_axis_index: usize,
        radius_axis_index: usize,
    ) -> Result<[f64; 2], ChartError> {
        let scaler = self.scaler(angle_axis_index, radius_axis_index, false)?;
        Ok(scaler.to_chart_values(point))
    }
}

/// A polar chart owning its axes and series.
#[derive(Debug)]
pub struct PolarChart {
    pub(crate) angle_axes: AxisCollection,
    pub(crate) radius_axes: AxisCollection,
    pub(crate) series: IndexMap<ShapeId, PolarSeries>,
    pub(crate) draw_margin: Rectangle,
    pub(crate) inner_radius: f32,
    pub(crate) data_version: u64,
    measured_version: u64,
    measured_angle_version: u64,
    measured_radius_version: u64,
}

impl Default for PolarChart {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarChart {
    /// Create a chart with one angle axis, one radius axis and an empty draw margin.
    pub fn new() -> Self {
        Self {
            angle_axes: AxisCollection::with_default_axis(AxisRole::Angle),
            radius_axes: AxisCollection::with_default_axis(AxisRole::Radius),
            ..Self::without_axes()
        }
    }

    pub(crate) fn without_axes() -> Self {
        Self {
            angle_axes: AxisCollection::new(AxisRole::Angle),
            radius_axes: AxisCollection::new(AxisRole::Radius),
            series: IndexMap::new(),
            draw_margin: Rectangle::new(Point::ORIGIN, Size::ZERO),
            inner_radius: DEFAULT_INNER_RADIUS,
            data_version: 1,
            measured_version: 0,
            measured_angle_version: 0,
            measured_radius_version: 0,
        }
    }

    /// Add a data series to the chart.
    /// If there exists a series with the same `item.id` ([ShapeId]), the old one will be replaced.
    pub fn add_series(&mut self, item: PolarSeries) -> Result<(), ChartError> {
        item.validate()?;
        self.series.insert(item.id, item);
        self.data_version += 1;
        Ok(())
    }

    /// Remove a data series from the chart by its ID.
    pub fn remove_series(&mut self, id: &ShapeId) -> Result<(), ChartError> {
        if self.series.shift_remove(id).is_some() {
            self.data_version += 1;
            Ok(())
        } else {
            Err(ChartError::SeriesNotFound(*id))
        }
    }

    /// Update a data series by its id.
    pub fn update_series<F: FnMut(&mut PolarSeries)>(
        &mut self,
        id: &ShapeId,
        mut f: F,
    ) -> Result<(), ChartError> {
        if let Some(series) = self.series.get_mut(id) {
            f(series);
            self.data_version += 1;
            Ok(())
        } else {
            Err(ChartError::SeriesNotFound(*id))
        }
    }

    pub fn series_ids(&self) -> Vec<ShapeId> {
        self.series.keys().copied().collect()
    }

    pub fn angle_axes_mut(&mut self) -> &mut AxisCollection {
        &mut self.angle_axes
    }

    pub fn radius_axes_mut(&mut self) -> &mut AxisCollection {
        &mut self.radius_axes
    }

    /// Set the pixel rectangle available for plotting.
    pub fn set_draw_margin(&mut self, draw_margin: Rectangle) {
        self.draw_margin = draw_margin;
    }

    /// Set the pixel distance reserved at the center.
    pub fn set_inner_radius(&mut self, inner_radius: f32) -> Result<(), ChartError> {
        if !inner_radius.is_finite() || inner_radius < 0.0 {
            return Err(ChartError::InvalidInnerRadius(inner_radius));
        }
        self.inner_radius = inner_radius;
        Ok(())
    }

    /// Whether series or axes changed since the last [`PolarChart::measure`].
    pub fn needs_measure(&self) -> bool {
        self.measured_version != self.data_version
            || self.measured_angle_version != self.angle_axes.version()
            || self.measured_radius_version != self.radius_axes.version()
    }

    /// Recompute the bounds of every axis from the series bound to it.
    ///
    /// Each axis keeps its previous bounds as the prior generation, so scalers built
    /// with `use_previous` describe the chart as it was before this pass.
    pub fn measure(&mut self) {
        let series = &self.series;
        for s in series.values() {
            if self.angle_axes.get(s.angle_axis_index).is_none()
                || self.radius_axes.get(s.radius_axis_index).is_none()
            {
                tracing::warn!(series = %s.id, "series references a missing axis");
            }
        }

        self.angle_axes.update_each(|index, axis| {
            axis.measure(
                series
                    .values()
                    .filter(|s| s.angle_axis_index == index)
                    .flat_map(PolarSeries::angles),
            )
        });
        self.radius_axes.update_each(|index, axis| {
            axis.measure(
                series
                    .values()
                    .filter(|s| s.radius_axis_index == index)
                    .flat_map(PolarSeries::radii),
            )
        });

        self.measured_version = self.data_version;
        self.measured_angle_version = self.angle_axes.version();
        self.measured_radius_version = self.radius_axes.version();
        tracing::debug!(
            series = series.len(),
            angle_axes = self.angle_axes.len(),
            radius_axes = self.radius_axes.len(),
            "measured polar chart"
        );
    }

    /// Pixel positions of every value in a series, at the current scale.
    pub fn to_pixels_series(&self, id: &ShapeId) -> Result<Vec<Point>, ChartError> {
        let series = self
            .series
            .get(id)
            .ok_or(ChartError::SeriesNotFound(*id))?;
        let scaler = self.scaler(series.angle_axis_index, series.radius_axis_index, false)?;
        Ok(scaler.project(&series.values).collect())
    }
}

impl PolarChartView for PolarChart {
    fn angle_axes(&self) -> &AxisCollection {
        &self.angle_axes
    }

    fn radius_axes(&self) -> &AxisCollection {
        &self.radius_axes
    }

    fn series(&self) -> &IndexMap<ShapeId, PolarSeries> {
        &self.series
    }

    fn draw_margin(&self) -> Rectangle {
        self.draw_margin
    }

    fn inner_radius(&self) -> f32 {
        self.inner_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{axis::PolarAxis, bounds::Bounds, error::BoundsGeneration};

    fn chart() -> PolarChart {
        let mut chart = PolarChart::new();
        chart.set_draw_margin(Rectangle::new(Point::ORIGIN, Size::new(200.0, 200.0)));
        chart
    }

    #[test]
    fn scaling_before_measure_is_not_ready() {
        let chart = chart();
        assert_eq!(
            chart.scale_ui_point(Point::new(150.0, 100.0), 0, 0),
            Err(ChartError::BoundsNotReady {
                role: AxisRole::Angle,
                generation: BoundsGeneration::Current,
            })
        );
    }

    #[test]
    fn measure_binds_series_to_their_axes() {
        let mut chart = chart();
        chart.angle_axes_mut().push(PolarAxis::new()).unwrap();
        chart
            .add_series(PolarSeries::from_polar([(0.0, 10.0), (360.0, 40.0)]))
            .unwrap();
        chart
            .add_series(PolarSeries::from_polar([(0.0, 100.0), (12.0, 90.0)]).with_angle_axis(1))
            .unwrap();
        assert!(chart.needs_measure());

        chart.measure();
        assert!(!chart.needs_measure());

        let angle = chart.angle_axes();
        assert_eq!(angle.get(0).unwrap().bounds().data(), Bounds::new(0.0, 360.0));
        assert_eq!(angle.get(1).unwrap().bounds().data(), Bounds::new(0.0, 12.0));
        assert_eq!(
            chart.radius_axes().get(0).unwrap().bounds().visible(),
            Bounds::new(10.0, 100.0)
        );
    }

    #[test]
    fn scale_ui_point_inverts_series_pixels() {
        let mut chart = chart();
        let series = PolarSeries::from_polar([(0.0, 0.0), (90.0, 50.0), (200.0, 100.0), (360.0, 0.0)]);
        let id = series.id;
        chart.add_series(series).unwrap();
        chart.measure();

        let pixels = chart.to_pixels_series(&id).unwrap();
        assert_eq!(pixels[0], Point::new(150.0, 100.0));

        let [angle, radius] = chart.scale_ui_point(pixels[1], 0, 0).unwrap();
        assert!((angle - 90.0).abs() < 1e-3);
        assert!((radius - 50.0).abs() < 1e-3);

        let [angle, radius] = chart.scale_ui_point(pixels[2], 0, 0).unwrap();
        assert!((angle - 200.0).abs() < 1e-3);
        assert!((radius - 100.0).abs() < 1e-3);
    }

    #[test]
    fn axis_changes_require_a_new_measure() {
        let mut chart = chart();
        chart.add_series(PolarSeries::from_polar([(0.0, 20.0), (360.0, 80.0)])).unwrap();
        chart.measure();
        assert!(!chart.needs_measure());

        chart
            .radius_axes_mut()
            .update(0, |axis| {
                axis.min_limit = Some(0.0);
                axis.max_limit = Some(500.0);
            })
            .unwrap();
        assert!(chart.needs_measure());
        chart.measure();
        assert!(!chart.needs_measure());
        assert_eq!(chart.scaler(0, 0, false).unwrap().max_radius(), 500.0);

        chart.angle_axes_mut().push(PolarAxis::new()).unwrap();
        assert!(chart.needs_measure());
    }

    #[test]
    fn second_radius_axis_scales_its_own_series() {
        let mut chart = chart();
        chart.radius_axes_mut().push(PolarAxis::new().with_label("load")).unwrap();
        let speed = PolarSeries::from_polar([(0.0, 0.0), (360.0, 10.0)]).with_label("speed");
        let load = PolarSeries::from_polar([(0.0, 0.0), (360.0, 1000.0)])
            .with_label("load")
            .with_radius_axis(1);
        let load_id = load.id;
        chart.add_series(speed).unwrap();
        chart.add_series(load).unwrap();
        chart.measure();

        assert_eq!(chart.series()[&load_id].label.as_deref(), Some("load"));
        assert_eq!(chart.scaler(0, 0, false).unwrap().max_radius(), 10.0);
        assert_eq!(chart.scaler(0, 1, false).unwrap().max_radius(), 1000.0);

        let pixels = chart.to_pixels_series(&load_id).unwrap();
        let [_, radius] = chart.scale_ui_point(pixels[1], 0, 1).unwrap();
        assert!((radius - 1000.0).abs() < 1e-2);
    }

    #[test]
    fn unknown_axis_index_is_reported() {
        let mut chart = chart();
        chart.add_series(PolarSeries::from_radii([1.0, 2.0])).unwrap();
        chart.measure();
        assert_eq!(
            chart.scale_ui_point(Point::ORIGIN, 0, 3),
            Err(ChartError::AxisNotFound {
                role: AxisRole::Radius,
                index: 3,
            })
        );
    }

    #[test]
    fn previous_scale_tracks_last_measure() {
        let mut chart = chart();
        let series = PolarSeries::from_polar([(0.0, 0.0), (360.0, 10.0)]);
        let id = series.id;
        chart.add_series(series).unwrap();
        chart.measure();
        assert!(chart.scaler(0, 0, true).is_err());

        chart
            .update_series(&id, |s| s.values.push([90.0, 20.0].into()))
            .unwrap();
        chart.measure();

        let previous = chart.scaler(0, 0, true).unwrap();
        let current = chart.scaler(0, 0, false).unwrap();
        assert_eq!(previous.max_radius(), 10.0);
        assert_eq!(current.max_radius(), 20.0);
    }

    #[test]
    fn series_errors() {
        let mut chart = chart();
        assert_eq!(
            chart.add_series(PolarSeries::new(Vec::new())),
            Err(ChartError::EmptySeries)
        );

        let series = PolarSeries::from_radii([1.0]);
        let id = series.id;
        assert_eq!(chart.remove_series(&id), Err(ChartError::SeriesNotFound(id)));
        chart.add_series(series).unwrap();
        assert_eq!(chart.series_ids(), vec![id]);
        chart.remove_series(&id).unwrap();
        assert!(chart.series().is_empty());

        assert_eq!(
            chart.set_inner_radius(-1.0),
            Err(ChartError::InvalidInnerRadius(-1.0))
        );
    }
}
