//! Turns event records into points on a latitude/longitude grid.
//!
//! The placements are visual stand-ins, not physical positions: every CME
//! sits on the sun-facing meridian, flares collapse to one of two
//! longitudes, and storms draw a fixed ring.

use std::f64::consts::PI;

use serde::Serialize;

use crate::domain::EventCategory;
use crate::donki::Event;

/// Number of points in the geomagnetic storm ring.
pub const STORM_RING_POINTS: usize = 12;

/// Latitude amplitude of the storm ring, in degrees.
const STORM_RING_LATITUDE: f64 = 30.0;

/// Where every coronal mass ejection is drawn.
pub const CME_POSITION: (f64, f64) = (0.0, -90.0);

/// Used when a position cannot be derived.
pub const FALLBACK_POSITION: (f64, f64) = (0.0, 0.0);

const TIME_NOT_AVAILABLE: &str = "Time not available";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlottablePoint {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
    pub category: EventCategory,
}

/// Maps one event to its plot points. Never empty; malformed input
/// degrades to [`FALLBACK_POSITION`].
pub fn map_event(event: &Event) -> Vec<PlottablePoint> {
    let label = make_label(event);
    event_positions(event)
        .into_iter()
        .map(|(latitude, longitude)| PlottablePoint {
            latitude,
            longitude,
            label: label.clone(),
            category: event.category,
        })
        .collect()
}

/// Raw `(latitude, longitude)` pairs for an event.
pub fn event_positions(event: &Event) -> Vec<(f64, f64)> {
    match event.category {
        EventCategory::CoronalMassEjection => vec![CME_POSITION],
        EventCategory::SolarFlare => vec![solar_location_position(event.source_location.as_deref())],
        EventCategory::GeomagneticStorm => storm_ring(),
    }
}

/// Places a flare from its solar-disk location code such as `S14W21`.
///
/// The hemisphere letter signs the two-digit number, which is used as the
/// latitude as-is. Only the E/W letter reaches the longitude: west maps to
/// -45 and east to +45. The trailing degrees are ignored.
pub fn solar_location_position(location: Option<&str>) -> (f64, f64) {
    let Some(location) = location.filter(|l| !l.is_empty()) else {
        return FALLBACK_POSITION;
    };
    parse_solar_location(location).unwrap_or(FALLBACK_POSITION)
}

fn parse_solar_location(location: &str) -> Option<(f64, f64)> {
    let mut chars = location.chars();
    let sign = match chars.next()? {
        'N' | 'n' => 1.0,
        'S' | 's' => -1.0,
        _ => return None,
    };

    let rest = chars.as_str();
    let marker = rest.find(['E', 'W', 'e', 'w'])?;
    let magnitude = rest[..marker].trim();
    if magnitude.is_empty() || !magnitude.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    let magnitude: f64 = magnitude.parse().ok()?;
    if magnitude > 90.0 {
        return None;
    }

    let east_west = match &rest[marker..=marker] {
        "W" | "w" => -1.0,
        _ => 1.0,
    };
    let longitude = east_west * 90.0 / 180.0 * 90.0;

    Some((sign * magnitude, longitude))
}

/// Fixed decorative ring drawn for every geomagnetic storm.
///
/// Longitude is `180 * cos(angle) / PI`, so the ring spans roughly
/// +/-57.3 degrees rather than the whole globe.
pub fn storm_ring() -> Vec<(f64, f64)> {
    (0..STORM_RING_POINTS)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let angle = 2.0 * PI * i as f64 / STORM_RING_POINTS as f64;
            (STORM_RING_LATITUDE * angle.sin(), 180.0 * angle.cos() / PI)
        })
        .collect()
}

/// `"<CODE>: <startTime>"`, followed by `"\n\nNote: <note>"` when a note exists.
pub fn make_label(event: &Event) -> String {
    let time = event.start_time.as_deref().unwrap_or(TIME_NOT_AVAILABLE);
    let basic = format!("{}: {time}", event.category.code());
    match event.note.as_deref() {
        Some(note) if !note.is_empty() => format!("{basic}\n\nNote: {note}"),
        _ => basic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn flare(location: &str) -> Event {
        Event::new(EventCategory::SolarFlare).with_source_location(location)
    }

    fn position(points: &[PlottablePoint]) -> (f64, f64) {
        assert_eq!(points.len(), 1);
        (points[0].latitude, points[0].longitude)
    }

    #[test]
    fn cme_always_maps_to_sun_facing_point() {
        let plain = Event::new(EventCategory::CoronalMassEjection);
        let busy = Event::new(EventCategory::CoronalMassEjection)
            .with_source_location("N20E10")
            .with_start_time("2024-05-10T18:00Z")
            .with_note("halo");

        assert_eq!(position(&map_event(&plain)), (0.0, -90.0));
        assert_eq!(position(&map_event(&busy)), (0.0, -90.0));
    }

    #[test]
    fn flare_locations_collapse_to_two_longitudes() {
        assert_eq!(position(&map_event(&flare("S14W21"))), (-14.0, -45.0));
        assert_eq!(position(&map_event(&flare("N05E03"))), (5.0, 45.0));
        assert_eq!(position(&map_event(&flare("N30W89"))), (30.0, -45.0));
    }

    #[test]
    fn flare_without_or_with_broken_location_falls_back() {
        let missing = Event::new(EventCategory::SolarFlare);
        assert_eq!(position(&map_event(&missing)), (0.0, 0.0));
        assert_eq!(position(&map_event(&flare(""))), (0.0, 0.0));
        assert_eq!(position(&map_event(&flare("S??W"))), (0.0, 0.0));
        assert_eq!(position(&map_event(&flare("S14"))), (0.0, 0.0));
        assert_eq!(position(&map_event(&flare("X14W21"))), (0.0, 0.0));
        assert_eq!(position(&map_event(&flare("NinfW10"))), (0.0, 0.0));
    }

    #[test]
    fn storm_expands_to_fixed_ring() {
        let storm = Event::new(EventCategory::GeomagneticStorm).with_source_location("N10E10");
        let points = map_event(&storm);
        assert_eq!(points.len(), STORM_RING_POINTS);

        assert!(points[0].latitude.abs() < EPS);
        assert!((points[0].longitude - 180.0 / PI).abs() < EPS);

        assert!((points[3].latitude - 30.0).abs() < EPS);
        assert!(points[3].longitude.abs() < EPS);

        for point in &points {
            assert!(point.longitude.abs() <= 180.0 / PI + EPS);
            assert!(point.latitude.abs() <= 30.0 + EPS);
        }
    }

    #[test]
    fn label_uses_start_time_and_optional_note() {
        let bare = Event::new(EventCategory::GeomagneticStorm);
        assert_eq!(make_label(&bare), "GST: Time not available");

        let timed = Event::new(EventCategory::CoronalMassEjection).with_start_time("2024-05-10T18:00Z");
        assert_eq!(make_label(&timed), "CME: 2024-05-10T18:00Z");

        let noted = timed.clone().with_note("Halo CME");
        assert_eq!(make_label(&noted), "CME: 2024-05-10T18:00Z\n\nNote: Halo CME");

        let empty_note = timed.with_note("");
        assert_eq!(make_label(&empty_note), "CME: 2024-05-10T18:00Z");
    }

    #[test]
    fn every_point_carries_event_label_and_category() {
        let storm = Event::new(EventCategory::GeomagneticStorm).with_start_time("t");
        for point in map_event(&storm) {
            assert_eq!(point.label, "GST: t");
            assert_eq!(point.category, EventCategory::GeomagneticStorm);
        }
    }

    #[test]
    fn mapping_is_repeatable() {
        let event = flare("N12E40").with_note("M1.0");
        assert_eq!(map_event(&event), map_event(&event));
    }
}
