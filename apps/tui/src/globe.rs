//! Shapes aggregated events into coloured point layers for a world plot.

use serde::Serialize;

use crate::domain::{EventCategory, MarkerColor};
use crate::donki::Event;
use crate::geo::{map_event, PlottablePoint};

/// All points of one category, drawn in one colour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointLayer {
    pub category: EventCategory,
    pub color: MarkerColor,
    pub points: Vec<PlottablePoint>,
}

impl PointLayer {
    /// `(longitude, latitude)` pairs, the x/y order plotting canvases expect.
    pub fn coords(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|point| (point.longitude, point.latitude))
            .collect()
    }
}

/// Layers in display order: storms, flares, ejections.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlobeModel {
    pub layers: Vec<PointLayer>,
}

impl GlobeModel {
    pub fn layer(&self, category: EventCategory) -> Option<&PointLayer> {
        self.layers.iter().find(|layer| layer.category == category)
    }

    pub fn point_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Builds one layer per category that has events. Categories without
/// events produce no layer at all.
pub fn render(events: &[Event]) -> GlobeModel {
    let layers = EventCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let points: Vec<PlottablePoint> = events
                .iter()
                .filter(|event| event.category == category)
                .flat_map(map_event)
                .collect();
            (!points.is_empty()).then(|| PointLayer {
                category,
                color: category.marker_color(),
                points,
            })
        })
        .collect();

    GlobeModel { layers }
}

/// Point of view for the orthographic globe, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewCenter {
    pub latitude: f64,
    pub longitude: f64,
}

impl ViewCenter {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Spins the view by `degrees` of longitude, wrapping into [-180, 180).
    #[must_use]
    pub fn rotated(self, degrees: f64) -> Self {
        let longitude = (self.longitude + degrees + 180.0).rem_euclid(360.0) - 180.0;
        Self { longitude, ..self }
    }
}

/// Orthographic projection onto the unit disc.
///
/// Returns `None` when the point lies on the hemisphere facing away from
/// the viewer.
pub fn orthographic(latitude: f64, longitude: f64, center: ViewCenter) -> Option<(f64, f64)> {
    let phi = latitude.to_radians();
    let lambda = longitude.to_radians();
    let phi0 = center.latitude.to_radians();
    let lambda0 = center.longitude.to_radians();
    let delta = lambda - lambda0;

    let cos_c = phi0.sin().mul_add(phi.sin(), phi0.cos() * phi.cos() * delta.cos());
    if cos_c < 0.0 {
        return None;
    }

    let x = phi.cos() * delta.sin();
    let y = phi0.cos().mul_add(phi.sin(), -(phi0.sin() * phi.cos() * delta.cos()));
    Some((x, y))
}
