//! Serialized shapes of the model, matching what route editors store:
//! stops as `{name, lat, lng, time, pathNext}` and times as `HH:MM:SS`.

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::models::time::{seconds_to_time, time_to_seconds};
use crate::models::types::Stop;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for Point {
    fn from(p: LatLng) -> Self {
        Point::new(p.lng, p.lat)
    }
}

impl From<Point> for LatLng {
    fn from(p: Point) -> Self {
        Self {
            lat: p.y(),
            lng: p.x(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopRecord {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub path_next: Vec<LatLng>,
}

impl From<StopRecord> for Stop {
    fn from(r: StopRecord) -> Self {
        Self {
            name: r.name,
            location: Point::new(r.lng, r.lat),
            scheduled_time: time_to_seconds(&r.time),
            interior_path: r.path_next.into_iter().map(Point::from).collect(),
        }
    }
}

impl From<Stop> for StopRecord {
    fn from(s: Stop) -> Self {
        Self {
            time: s.time_label(),
            name: s.name,
            lat: s.location.y(),
            lng: s.location.x(),
            path_next: s.interior_path.into_iter().map(LatLng::from).collect(),
        }
    }
}

/// `#[serde(with)]` adapter for seconds-since-midnight fields.
pub mod service_time {
    use super::*;
    use serde::{de::Error, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(seconds: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&seconds_to_time(*seconds as f64))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let s = String::deserialize(deserializer)?;
        time_to_seconds(&s).ok_or_else(|| D::Error::custom(format!("invalid time {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_record_conversion() {
        let record = StopRecord {
            name: "Terminal".into(),
            lat: -34.6,
            lng: -58.4,
            time: "05:30".into(),
            path_next: vec![LatLng { lat: -34.61, lng: -58.41 }],
        };

        let stop = Stop::from(record);
        assert_eq!(stop.scheduled_time, Some(19_800));
        assert_eq!(stop.interior_path, vec![Point::new(-58.41, -34.61)]);

        let back = StopRecord::from(stop);
        assert_eq!(back.time, "05:30:00");
        assert_eq!(back.lat, -34.6);
    }

    #[test]
    fn test_blank_time_is_untimed() {
        let record = StopRecord {
            name: "Intermedia".into(),
            lat: 0.0,
            lng: 0.0,
            time: String::new(),
            path_next: Vec::new(),
        };
        assert_eq!(Stop::from(record).scheduled_time, None);
    }
}
