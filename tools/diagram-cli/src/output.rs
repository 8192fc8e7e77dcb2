use anyhow::Result;
use geo::Point;

use headway_transit::prelude::*;

pub fn deviation_json(result: &DeviationResult) -> Result<String> {
    let mut value = serde_json::to_value(result)?;
    if let Some(map) = value.as_object_mut() {
        map.insert("deviation".to_string(), serde_json::json!(result.formatted()));
        map.insert(
            "expectedClock".to_string(),
            serde_json::json!(seconds_to_time(result.expected_time)),
        );
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

pub fn point_json(point: Point) -> Result<String> {
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "lat": point.y(),
        "lng": point.x(),
    }))?)
}
