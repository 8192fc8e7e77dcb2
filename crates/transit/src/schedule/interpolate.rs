//! Distance-proportional timing of untimed stops.

use crate::models::types::Stop;
use crate::spatial::path::leg_lengths;

/// Fill the times of stops lying between two timed stops, in place.
///
/// Each untimed stop gets the anchor-to-anchor time split in proportion to
/// the distance driven up to it, floored to whole seconds. With fewer than two
/// timed stops nothing changes.
pub fn fill_intermediate_times_in_place(stops: &mut [Stop]) {
    let anchors: Vec<usize> = stops
        .iter()
        .enumerate()
        .filter(|(_, s)| s.scheduled_time.is_some())
        .map(|(i, _)| i)
        .collect();

    if anchors.len() < 2 {
        return;
    }

    for pair in anchors.windows(2) {
        let (start_idx, end_idx) = (pair[0], pair[1]);
        let (Some(start), Some(end)) = (
            stops[start_idx].scheduled_time,
            stops[end_idx].scheduled_time,
        ) else {
            continue;
        };

        let start = start as f64;
        let diff = end as f64 - start;

        let lengths = leg_lengths(&stops[start_idx..=end_idx]);
        let section: f64 = lengths.iter().sum();

        let mut driven = 0.0;
        for (offset, stop) in stops[start_idx + 1..end_idx].iter_mut().enumerate() {
            driven += lengths[offset];
            let ratio = if section > 0.0 { driven / section } else { 0.0 };
            let seconds = (start + diff * ratio).max(0.0).floor();
            stop.scheduled_time = Some(seconds as u32);
        }

        tracing::debug!(
            from = start_idx,
            to = end_idx,
            section_km = section,
            "interpolated stop times"
        );
    }
}

/// Owned variant of [`fill_intermediate_times_in_place`].
pub fn fill_intermediate_times(mut stops: Vec<Stop>) -> Vec<Stop> {
    fill_intermediate_times_in_place(&mut stops);
    stops
}
