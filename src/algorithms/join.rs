//! Inner join of segment geometry and traffic observations.

use indexmap::IndexMap;
use log::debug;
use std::collections::HashMap;

use crate::core::domain::{Direction, JoinedRecord, SegmentRecord, TrafficRecord};

/// Join traffic observations to segment geometry by segment id.
///
/// The segment index applies last-seen-wins on duplicate ids. Traffic
/// records with no matching segment (or no parseable id) are skipped
/// silently: partial coverage is expected, not exceptional. Observations
/// are grouped by `segment_id`/`direction` in first-appearance order and
/// flattened without merging, so repeated observations for one key each
/// yield their own record.
pub fn join_segments_traffic(
    segments: &[SegmentRecord],
    traffic: &[TrafficRecord],
) -> Vec<JoinedRecord> {
    let mut index: HashMap<i64, &SegmentRecord> = HashMap::new();
    for seg in segments {
        index.insert(seg.segment_id, seg);
    }

    let mut grouped: IndexMap<(i64, Direction), Vec<(&SegmentRecord, &TrafficRecord)>> =
        IndexMap::new();
    let mut skipped = 0usize;

    for t in traffic {
        let Some(seg) = t.segment_id.and_then(|id| index.get(&id).copied()) else {
            skipped += 1;
            continue;
        };
        grouped
            .entry((seg.segment_id, t.direction.clone()))
            .or_default()
            .push((seg, t));
    }

    if skipped > 0 {
        debug!("skipped {skipped} traffic records with no matching segment");
    }

    let mut records = Vec::new();
    for ((segment_id, direction), pairs) in grouped {
        for (seg, t) in pairs {
            records.push(JoinedRecord {
                segment_id,
                direction: direction.clone(),
                lanes: t.lanes,
                hours: t.hours.clone(),
                v24h: t.v24h,
                geom: seg.geometry(),
                segment_raw: seg.raw.clone(),
                traffic_raw: t.raw.clone(),
            });
        }
    }
    records
}
