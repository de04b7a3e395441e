//! Integration tests for seamark
//!
//! Tests the full pipeline from notation text to segments, prose and timed playback.

use seamark::catalog::{builtin_marks, marks_from_yaml};
use seamark::playback::{compile, compile_with, OverrunPolicy, Scheduler};
use seamark::{
    compile_notation, compile_notation_with, describe_notation, parse, simulate, Color, Group,
    Language, NotationError, PlayerConfig, RhythmKind,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{sleep, Instant};

fn timings(notation: &str) -> Vec<(u64, bool)> {
    compile_notation(notation)
        .unwrap()
        .iter()
        .map(|s| (s.duration_ms, s.on))
        .collect()
}

#[test]
fn test_preferred_channel_mark() {
    // Two flashes, a pause, one flash, then dark until the period ends
    let spec = parse("Fl(2+1) R 10s").unwrap();
    assert_eq!(spec.group, Group::Composite(vec![2, 1]));
    assert_eq!(spec.color, Color::Red);

    assert_eq!(
        timings("Fl(2+1) R 10s"),
        vec![
            (500, true),
            (500, false),
            (500, true),
            (500, false),
            (1500, false),
            (500, true),
            (500, false),
            (5500, false),
        ]
    );
}

#[test]
fn test_every_cycle_matches_its_period() {
    for notation in [
        "F R",
        "Fl G 4s",
        "LFl W 10s",
        "Iso W 4s",
        "Oc(2+1) G 12s",
        "Q W",
        "VQ(3) W 5s",
        "IQ G 10s",
        "Mo(U) W 15s",
        "Al WR 4s",
        "Q(6)+LFl W 15s",
    ] {
        let sequence = compile_notation(notation).unwrap();
        assert_eq!(sequence.total_ms(), sequence.period_ms, "{}", notation);
        assert!(sequence.iter().all(|s| s.duration_ms > 0), "{}", notation);
    }
}

#[test]
fn test_south_cardinal_ends_with_long_flash() {
    let sequence = compile_notation("Q(6)+LFl W 15s").unwrap();
    let lit: Vec<u64> = sequence.iter().filter(|s| s.on).map(|s| s.duration_ms).collect();
    assert_eq!(lit, vec![500, 500, 500, 500, 500, 500, 2000]);
}

#[test]
fn test_alternating_colors_propagate() {
    let sequence = compile_notation("Al W-R 4s").unwrap();
    let colors: Vec<(u64, Color)> = sequence.iter().map(|s| (s.duration_ms, s.color)).collect();
    assert_eq!(colors, vec![(2000, Color::White), (2000, Color::Red)]);
}

#[test]
fn test_overrun_policies() {
    // Eclipses of 3 + 3 s cannot fit a 5 s period
    let spec = parse("Oc(3+3) 5s").unwrap();
    assert_eq!(compile(&spec).total_ms(), 6000);
    assert!(compile(&spec).overruns_period());
    assert_eq!(compile_with(&spec, OverrunPolicy::Truncate).total_ms(), 5000);
}

#[test]
fn test_errors_carry_reasons() {
    assert_eq!(parse("Zx 5s").unwrap_err().reason(), "unrecognized rhythm");
    assert_eq!(parse("Fl(x) 5s").unwrap_err().reason(), "invalid group syntax");
    assert_eq!(parse("Mo(AB) W").unwrap_err().reason(), "invalid group syntax");
    assert!(matches!(parse("Fl 0s"), Err(NotationError::InvalidPeriod(_))));
}

#[test]
fn test_oversized_notation_is_rejected() {
    assert!(matches!(
        compile_notation("Oc 10000000000000000s"),
        Err(NotationError::InvalidPeriod(_))
    ));
    assert!(matches!(
        compile_notation("Fl(4294967295) 10s"),
        Err(NotationError::InvalidGroup(_))
    ));

    // The longest ultra quick cycle still compiles to a bounded sequence
    let sequence = compile_notation("UQ 3600s").unwrap();
    assert_eq!(sequence.len(), 28_800);
    assert_eq!(sequence.total_ms(), 3_600_000);
}

#[test]
fn test_describe_pipeline() {
    assert_eq!(
        describe_notation("Q(3) W 10s", Language::English).unwrap(),
        "White quick light, group of 3 flashes, period 10 s."
    );
    assert_eq!(
        describe_notation("Oc G 4s", Language::French).unwrap(),
        "Feu vert à occultations, période 4 s."
    );
}

#[test]
fn test_config_drives_parsing_and_compiling() {
    let config = PlayerConfig::from_yaml("default-period-seconds: 6\noverrun: truncate\n").unwrap();
    let sequence = compile_notation_with("Fl(3)", &config).unwrap();
    assert_eq!(sequence.period_ms, 6000);
    assert_eq!(sequence.total_ms(), 6000);
}

#[test]
fn test_catalogs() {
    for mark in builtin_marks() {
        assert!(compile_notation(&mark.notation).is_ok(), "{}", mark.name);
    }

    let marks = marks_from_yaml("- name: Pierhead\n  notation: Iso R 2s\n").unwrap();
    let spec = marks[0].spec().unwrap();
    assert_eq!(spec.rhythm, RhythmKind::Isophase);
    assert_eq!(spec.period_seconds, 2.0);
}

#[tokio::test(start_paused = true)]
async fn test_simulate_plays_two_targets() {
    let start = Instant::now();
    let log: Arc<Mutex<Vec<(&'static str, u64, bool)>>> = Arc::default();

    let mut scheduler = Scheduler::new();
    let buoy_log = log.clone();
    simulate(&mut scheduler, "buoy", "Iso W 2s", move |s| {
        let at = start.elapsed().as_millis() as u64;
        buoy_log.lock().unwrap().push(("buoy", at, s.on));
    })
    .unwrap();
    let beacon_log = log.clone();
    simulate(&mut scheduler, "beacon", "Fl R 3s", move |s| {
        let at = start.elapsed().as_millis() as u64;
        beacon_log.lock().unwrap().push(("beacon", at, s.on));
    })
    .unwrap();

    sleep(Duration::from_millis(3500)).await;
    scheduler.cancel_all();

    let events = log.lock().unwrap().clone();
    let buoy: Vec<(u64, bool)> = events
        .iter()
        .filter(|e| e.0 == "buoy")
        .map(|e| (e.1, e.2))
        .collect();
    let beacon: Vec<(u64, bool)> = events
        .iter()
        .filter(|e| e.0 == "beacon")
        .map(|e| (e.1, e.2))
        .collect();

    assert_eq!(buoy, vec![(0, true), (1000, false), (2000, true), (3000, false)]);
    assert_eq!(beacon, vec![(0, true), (500, false), (3000, true)]);
    assert!(!scheduler.is_playing("buoy"));
}
