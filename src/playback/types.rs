//! Compiled sequence type definitions
//!
//! This module defines the timed segments produced by the sequence compiler and
//! consumed by the playback scheduler.

use crate::ast::Color;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One stretch of time during which the light is steadily on or off.
///
/// `color` is only meaningful when `on` is true; off segments carry the light's
/// main color so a renderer can keep a dimmed tint if it wants to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedSegment {
    pub duration_ms: u64,
    pub on: bool,
    pub color: Color,
}

impl TimedSegment {
    pub fn on(duration_ms: u64, color: Color) -> Self {
        Self { duration_ms, on: true, color }
    }

    pub fn off(duration_ms: u64, color: Color) -> Self {
        Self { duration_ms, on: false, color }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// What to do when a rhythm's own segments already exceed the nominal period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrunPolicy {
    /// Keep every generated segment; the cycle runs longer than the period.
    #[default]
    Extend,
    /// Clip the cycle so it lasts exactly one period.
    Truncate,
}

/// Ordered, cyclic list of segments for one period of a light.
///
/// Never empty: the compiler always emits at least one segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledSequence {
    pub period_ms: u64,
    pub segments: Vec<TimedSegment>,
}

impl CompiledSequence {
    /// Sum of all segment durations in one cycle.
    pub fn total_ms(&self) -> u64 {
        self.segments.iter().map(|s| s.duration_ms).sum()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimedSegment> {
        self.segments.iter()
    }

    /// True when the cycle lasts longer than the nominal period.
    pub fn overruns_period(&self) -> bool {
        self.total_ms() > self.period_ms
    }

    /// Total time the light is lit during one cycle.
    pub fn lit_ms(&self) -> u64 {
        self.segments.iter().filter(|s| s.on).map(|s| s.duration_ms).sum()
    }
}

impl<'a> IntoIterator for &'a CompiledSequence {
    type Item = &'a TimedSegment;
    type IntoIter = std::slice::Iter<'a, TimedSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
