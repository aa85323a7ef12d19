use chrono::Local;
use clap::Parser;
use serde_json::{json, Value};
use std::fs;
use std::time::{Duration, Instant};

use collector::{export, CollectorConfig, CsvPersistence};
use phyphox_rs::adapters::ScriptedPhyphox;
use phyphox_rs::{AcquisitionConfig, AcquisitionService, PhyphoxError};

fn config(args: &[&str], output_dir: &std::path::Path) -> CollectorConfig {
    let output_dir = output_dir.to_string_lossy().to_string();
    let mut argv = vec!["collector", "--headless", "--run-for-secs", "1", "--output-dir"];
    argv.push(&output_dir);
    argv.extend_from_slice(args);
    CollectorConfig::try_parse_from(argv).unwrap()
}

#[tokio::test]
async fn test_mock_session_exports_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&["--mock", "--sampling-interval-ms", "20"], dir.path());

    let report = collector::run(config).await.unwrap().expect("nothing exported");
    assert!(report.rows > 5);
    assert!(report.path.starts_with(dir.path()));

    let file_name = report.path.file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("sensor_data_") && file_name.ends_with(".csv"));

    let content = fs::read_to_string(&report.path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), report.rows + 1);
    assert!(lines[0].starts_with("timestamp,gravity_x,gravity_y,gravity_z,gravity_time,"));
    assert!(lines[1..].iter().all(|line| line.split(',').count() == 17));
}

#[tokio::test]
async fn test_export_is_bounded_by_buffer_capacity() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(
        &["--mock", "--sampling-interval-ms", "10", "--buffer-capacity", "5"],
        dir.path(),
    );

    let report = collector::run(config).await.unwrap().unwrap();
    assert_eq!(report.rows, 5);
}

#[tokio::test]
async fn test_unreachable_device_exports_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(
        &["--url", "http://127.0.0.1:9", "--timeout-ms", "100"],
        dir.path(),
    );

    let report = collector::run(config).await.unwrap();
    assert!(report.is_none());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

fn gravity_payload(z: f64) -> Value {
    json!({
        "buffer": {
            "graX": { "buffer": [0.0] },
            "graY": { "buffer": [0.0] },
            "graZ": { "buffer": [z] },
            "graT": { "buffer": [3.25] }
        },
        "status": { "measuring": true }
    })
}

#[tokio::test]
async fn test_collected_history_is_exported_in_order() {
    let script = (0..5).map(|_| Ok(gravity_payload(9.8))).collect();
    let device = ScriptedPhyphox::new(
        script,
        Err(PhyphoxError::FetchData("Connection refused".to_string())),
    );
    let config = AcquisitionConfig {
        sampling_interval: Duration::from_millis(10),
        transport_backoff: Duration::from_millis(50),
        parse_backoff: Duration::from_millis(50),
        shutdown_grace: Duration::from_millis(500),
    };
    let service = AcquisitionService::with_capacity(device, 3, config);
    service.start().unwrap();

    let deadline = Instant::now() + Duration::from_secs(2);
    while service.stats().polls() < 6 && Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    service.stop().await;

    assert_eq!(service.stats().snapshots(), 5);
    assert_eq!(service.history(None).len(), 3);

    let dir = tempfile::tempdir().unwrap();
    let persistence = CsvPersistence::new(dir.path());
    let report = export::export(&service.buffer(), &persistence, Local::now())
        .unwrap()
        .expect("history was not exported");
    assert_eq!(report.rows, 3);

    let mut reader = csv::Reader::from_path(&report.path).unwrap();
    let headers = reader.headers().unwrap().clone();
    let column = |name: &str| headers.iter().position(|h| h == name).unwrap();
    let (gravity_x, gravity_z, gravity_time) =
        (column("gravity_x"), column("gravity_z"), column("gravity_time"));

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 3);
    for record in &records {
        assert_eq!(record[gravity_x].parse::<f64>().unwrap(), 0.0);
        assert_eq!(record[gravity_z].parse::<f64>().unwrap(), 9.8);
        assert_eq!(record[gravity_time].parse::<f64>().unwrap(), 3.25);
    }
    let timestamps: Vec<&str> = records.iter().map(|r| &r[0]).collect();
    assert!(timestamps.windows(2).all(|pair| pair[0] <= pair[1]));
}
