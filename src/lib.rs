//! Polar coordinate scaling for Iced charts.
//!
//! - Converts `(angle, radius)` chart values to pixel positions and back
//! - Keeps one previous generation of axis bounds, so geometry can animate between scales
//! - Multiple angle/radius axis pairs per chart, addressed by index
//!
//! Quick start:
//!
//! ```rust
//! use iced_polar::{PolarChartBuilder, PolarChartView, PolarSeries};
//!
//! let series = PolarSeries::from_polar([(0.0, 0.0), (90.0, 50.0), (360.0, 100.0)]);
//! let id = series.id;
//!
//! let mut chart = PolarChartBuilder::new()
//!     .with_draw_margin(iced::Rectangle::new(iced::Point::ORIGIN, iced::Size::new(200.0, 200.0)))
//!     .add_series(series)
//!     .build()
//!     .unwrap();
//! chart.measure();
//!
//! let pixels = chart.to_pixels_series(&id).unwrap();
//! assert_eq!(pixels[0], iced::Point::new(150.0, 100.0));
//!
//! let [_angle, radius] = chart.scale_ui_point(pixels[2], 0, 0).unwrap();
//! assert!((radius - 100.0).abs() < 1e-3);
//! ```
pub mod axis;
pub mod axis_collection;
pub mod bounds;
pub mod builder;
pub mod error;
pub mod point;
pub mod scaler;
pub mod series;
pub mod view;

// Re-exports of public types.
pub use axis::{AxisId, PolarAxis};
pub use axis_collection::{AxisCollection, AxisEvent, AxisObserver};
pub use bounds::{AxisBounds, Bounds};
pub use builder::PolarChartBuilder;
pub use error::{AxisRole, BoundsGeneration, ChartError};
pub use point::ChartPoint;
pub use scaler::PolarScaler;
pub use series::{PolarSeries, ShapeId};
pub use view::{DEFAULT_INNER_RADIUS, PolarChart, PolarChartView};
