//! End-to-end pipeline tests: CSV text through join, metrics, and
//! diversion, using the reference survey schema.

use std::io::Write;

use traffic_vc::algorithms::{
    compute_hour_metrics, join_segments_traffic, peak_hour, proportionate_diversion,
    CongestionLevel,
};
use traffic_vc::config::SchemaConfig;
use traffic_vc::core::domain::Direction;
use traffic_vc::io::{SegmentLoader, TrafficLoader};
use traffic_vc::services::{color_for_vc, network_snapshot, tally_levels};

const SEGMENTS_CSV: &str = "\
区間番号,start_x,start_y,end_x,end_y
1,139.700,35.680,139.710,35.690
2,139.710,35.690,139.720,35.700
3,139.720,35.700,139.730,broken
";

const TRAFFIC_CSV: &str = "\
交通量調査単位区間番号,上り・下りの別,代表車線数,時間帯別自動車類交通量（台／時）／８時台,時間帯別自動車類交通量（台／時）／７時台,時間帯別自動車類交通量VC／８時台
1,1,2,1000,600,0.28
2,2,1,500,300,0.28
7,1,2,400,200,0.11
";

fn load_pipeline() -> Vec<traffic_vc::core::domain::JoinedRecord> {
    let config = SchemaConfig::default();
    let segments = SegmentLoader::load_from_str(SEGMENTS_CSV, &config);
    let traffic = TrafficLoader::load_from_str(TRAFFIC_CSV, &config);
    join_segments_traffic(&segments, &traffic)
}

#[test]
fn pipeline_joins_and_orders_hour_series() {
    let joined = load_pipeline();

    // segment 3 is dropped (broken coordinate), traffic id 7 has no
    // segment, leaving two records
    assert_eq!(joined.len(), 2);

    let first = &joined[0];
    assert_eq!(first.segment_id, 1);
    assert_eq!(first.direction, Direction::Up);
    // hour columns are reordered ascending regardless of header order,
    // and the derived-ratio column is excluded
    assert_eq!(first.hours.len(), 2);
    assert_eq!(first.hours[0].hour, Some(7));
    assert_eq!(first.hours[1].hour, Some(8));
    assert_eq!(first.v24h, 1600.0);

    assert_eq!(first.geom.coordinates(), [[139.700, 35.680], [139.710, 35.690]]);
    let geojson = first.geom.to_geojson();
    assert_eq!(geojson["type"], "LineString");
}

#[test]
fn hour_metrics_classify_both_directions() {
    let joined = load_pipeline();
    let metrics = compute_hour_metrics(&joined, 8);

    let up = &metrics[0];
    assert_eq!(up.volume, Some(1000.0));
    assert_eq!(up.capacity, Some(3600.0));
    assert_eq!(up.vc_ratio, Some(1000.0 / 3600.0));
    assert_eq!(up.level, CongestionLevel::Loose);

    let down = &metrics[1];
    assert_eq!(down.segment_id(), 2);
    assert_eq!(down.vc_ratio, Some(500.0 / 1800.0));

    let counts = tally_levels(&metrics);
    assert_eq!(counts.loose, 2);
    assert_eq!(counts.total(), 2);

    let snapshot = network_snapshot(&metrics);
    assert_eq!(snapshot.total_volume, 1500.0);
    assert_eq!(snapshot.classified_count, 2);

    assert_eq!(color_for_vc(up.vc_ratio), "#4caf50");
}

#[test]
fn peak_hours_follow_the_series() {
    let joined = load_pipeline();

    let peak = peak_hour(&joined[0]).unwrap();
    assert_eq!(peak.hour, Some(8));
    assert_eq!(peak.volume, Some(1000.0));
}

#[test]
fn closing_a_segment_diverts_its_volume_to_the_sole_candidate() {
    let joined = load_pipeline();

    let result = proportionate_diversion(&joined, &[1], 8, 3);

    assert_eq!(result.hour, 8);
    assert_eq!(result.closed_ids, [1]);
    assert_eq!(result.total_delta, 1000.0);

    let closed = &result.records[0];
    assert_eq!(closed.volume_prime, 0.0);
    assert_eq!(closed.vc_prime, Some(0.0));
    assert_eq!(closed.level_prime, CongestionLevel::Loose);

    // segment 2 is the only candidate, so W is its own weight and it
    // receives the full delta
    let receiver = &result.records[1];
    assert_eq!(receiver.segment_id(), 2);
    assert_eq!(receiver.volume_prime, 500.0 + 1000.0);
    assert_eq!(receiver.vc_prime, Some(1500.0 / 1800.0));
    assert_eq!(receiver.level_prime, CongestionLevel::Congested);
}

#[test]
fn diversion_without_closures_changes_no_volume() {
    let joined = load_pipeline();

    let result = proportionate_diversion(&joined, &[], 8, 3);

    assert_eq!(result.total_delta, 0.0);
    for (rec, base) in result.records.iter().zip(&joined) {
        assert_eq!(rec.volume_prime, base.volume_at(8).unwrap_or(0.0));
    }
}

#[test]
fn diversion_with_everything_closed_drops_the_delta() {
    let joined = load_pipeline();

    let result = proportionate_diversion(&joined, &[1, 2], 8, 3);

    assert_eq!(result.total_delta, 1500.0);
    assert!(result.records.iter().all(|r| r.volume_prime == 0.0));
}

#[test]
fn schema_config_file_overrides_labels() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[segment]
segment_id = "link_id"

[traffic]
segment_id = "link_id"
"#
    )
    .unwrap();

    let config = SchemaConfig::from_file(file.path()).unwrap();
    assert_eq!(config.segment.segment_id, "link_id");
    // omitted labels keep the reference defaults
    assert_eq!(config.traffic.direction, "上り・下りの別");

    let segments_csv = "\
link_id,start_x,start_y,end_x,end_y
1,0.0,0.0,1.0,1.0
";
    let segments = SegmentLoader::load_from_str(segments_csv, &config);
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].segment_id, 1);
}
