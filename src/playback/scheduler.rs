//! Real-time playback of compiled sequences
//!
//! A [`PlaybackHandle`] drives one visual target: it calls the caller's
//! `on_segment` callback at every segment boundary, forever, until cancelled.
//! A [`Scheduler`] owns one handle per named target and guarantees that starting a
//! new sequence on a target first cancels whatever was playing there.
//!
//! ## Timing
//! Deadlines are accumulated from the start instant rather than re-armed from
//! "now", so callback latency does not drift the light over long runs.
//!
//! ## Cancellation
//! The callback runs under the same lock that [`PlaybackHandle::cancel`] takes.
//! Once `cancel` returns, no further callback of that handle can start, even if
//! its timer already fired. A callback must therefore never cancel its own handle.

use super::types::{CompiledSequence, TimedSegment};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace};

/// Callback invoked with each segment as it becomes current.
pub type SegmentCallback = Box<dyn FnMut(&TimedSegment) + Send + 'static>;

/// Lifecycle of a handle. There is no finished state: a sequence loops forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Scheduled,
}

struct Cursor {
    cancelled: bool,
    index: usize,
    cycles: u64,
    on_segment: SegmentCallback,
}

/// Playback of one sequence on one visual target.
///
/// Dropping the handle cancels playback.
pub struct PlaybackHandle {
    cursor: Arc<Mutex<Cursor>>,
    task: Option<JoinHandle<()>>,
}

impl PlaybackHandle {
    /// Start playing `sequence` in real time.
    ///
    /// The first segment is delivered to `on_segment` before this returns.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn start(
        sequence: CompiledSequence,
        on_segment: impl FnMut(&TimedSegment) + Send + 'static,
    ) -> Self {
        Self::start_scaled(sequence, 1.0, on_segment)
    }

    /// Start playing with every wait multiplied by `time_scale` (0.5 plays twice as
    /// fast). Non-positive or non-finite scales fall back to real time.
    pub fn start_scaled(
        sequence: CompiledSequence,
        time_scale: f64,
        on_segment: impl FnMut(&TimedSegment) + Send + 'static,
    ) -> Self {
        let mut cursor = Cursor {
            cancelled: false,
            index: 0,
            cycles: 0,
            on_segment: Box::new(on_segment),
        };

        let Some(first) = sequence.segments.first().copied() else {
            debug!("Empty sequence, nothing to play");
            cursor.cancelled = true;
            return Self {
                cursor: Arc::new(Mutex::new(cursor)),
                task: None,
            };
        };

        let first_deadline = Instant::now() + scaled(first.duration(), time_scale);
        (cursor.on_segment)(&first);
        let cursor = Arc::new(Mutex::new(cursor));

        debug!(
            "Playback started: {} segments, {} ms per cycle, time scale {}",
            sequence.len(),
            sequence.total_ms(),
            time_scale
        );
        let task = tokio::spawn(run(sequence, cursor.clone(), first_deadline, time_scale));

        Self {
            cursor,
            task: Some(task),
        }
    }

    /// Stop playback. No callback starts after this returns.
    pub fn cancel(&mut self) {
        {
            let mut cursor = self.cursor.lock().unwrap_or_else(PoisonError::into_inner);
            if !cursor.cancelled {
                cursor.cancelled = true;
                debug!(
                    "Playback cancelled at segment {} after {} cycles",
                    cursor.index, cursor.cycles
                );
            }
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn state(&self) -> PlaybackState {
        let cursor = self.cursor.lock().unwrap_or_else(PoisonError::into_inner);
        if cursor.cancelled || self.task.is_none() {
            PlaybackState::Idle
        } else {
            PlaybackState::Scheduled
        }
    }

    /// Index of the segment currently shown.
    pub fn current_index(&self) -> usize {
        self.cursor.lock().unwrap_or_else(PoisonError::into_inner).index
    }

    /// Number of times playback has wrapped back to the first segment.
    pub fn cycles_completed(&self) -> u64 {
        self.cursor.lock().unwrap_or_else(PoisonError::into_inner).cycles
    }
}

impl Drop for PlaybackHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Start playback of a sequence. See [`PlaybackHandle::start`].
pub fn play(
    sequence: CompiledSequence,
    on_segment: impl FnMut(&TimedSegment) + Send + 'static,
) -> PlaybackHandle {
    PlaybackHandle::start(sequence, on_segment)
}

/// Stop a playback handle. See [`PlaybackHandle::cancel`].
pub fn cancel(handle: &mut PlaybackHandle) {
    handle.cancel();
}

fn scaled(duration: Duration, time_scale: f64) -> Duration {
    if time_scale.is_finite() && time_scale > 0.0 {
        duration.mul_f64(time_scale)
    } else {
        duration
    }
}

async fn run(
    sequence: CompiledSequence,
    cursor: Arc<Mutex<Cursor>>,
    mut deadline: Instant,
    time_scale: f64,
) {
    loop {
        sleep_until(deadline).await;

        let Ok(mut state) = cursor.lock() else {
            return;
        };
        if state.cancelled {
            return;
        }

        state.index = (state.index + 1) % sequence.len();
        if state.index == 0 {
            state.cycles += 1;
        }
        let segment = sequence.segments[state.index];
        trace!(
            "Segment {}: {} for {} ms",
            state.index,
            if segment.on { "on" } else { "off" },
            segment.duration_ms
        );
        (state.on_segment)(&segment);
        drop(state);

        deadline += scaled(segment.duration(), time_scale);
    }
}

/// Owns one [`PlaybackHandle`] per visual target.
///
/// # Example
/// ```rust
/// use seamark::{parse, playback::{compile, Scheduler}};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut scheduler = Scheduler::new();
///
/// let lighthouse = compile(&parse("Fl(3) W 15s").unwrap());
/// let buoy = compile(&parse("Q G").unwrap());
///
/// scheduler.play("lighthouse", lighthouse, |segment| println!("lighthouse {:?}", segment));
/// scheduler.play("buoy", buoy, |segment| println!("buoy {:?}", segment));
///
/// // Replaces the lighthouse sequence; the first one is cancelled.
/// let replacement = compile(&parse("Iso R 4s").unwrap());
/// scheduler.play("lighthouse", replacement, |_| {});
///
/// assert!(scheduler.is_playing("buoy"));
/// scheduler.cancel_all();
/// # }
/// ```
pub struct Scheduler {
    time_scale: f64,
    targets: HashMap<String, PlaybackHandle>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self::with_time_scale(1.0)
    }

    pub fn with_time_scale(time_scale: f64) -> Self {
        Self {
            time_scale,
            targets: HashMap::new(),
        }
    }

    /// Play `sequence` on `target`, cancelling any playback already there first.
    pub fn play(
        &mut self,
        target: impl Into<String>,
        sequence: CompiledSequence,
        on_segment: impl FnMut(&TimedSegment) + Send + 'static,
    ) -> &PlaybackHandle {
        let target = target.into();
        if let Some(mut previous) = self.targets.remove(&target) {
            debug!("Restarting target '{}'", target);
            previous.cancel();
        }

        let handle = PlaybackHandle::start_scaled(sequence, self.time_scale, on_segment);
        self.targets.entry(target).or_insert(handle)
    }

    /// Cancel the playback on `target`. Returns false if nothing was playing there.
    pub fn cancel(&mut self, target: &str) -> bool {
        match self.targets.remove(target) {
            Some(mut handle) => {
                handle.cancel();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, mut handle) in self.targets.drain() {
            handle.cancel();
        }
    }

    pub fn is_playing(&self, target: &str) -> bool {
        self.targets
            .get(target)
            .is_some_and(|handle| handle.state() == PlaybackState::Scheduled)
    }

    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }
}
