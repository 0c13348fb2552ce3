//! Frame timing.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Frame times kept for the rolling FPS average.
const FPS_SAMPLES: usize = 60;

/// Measures frame deltas and schedules frames at a fixed rate.
#[derive(Debug)]
pub struct FrameClock {
    frame_time: Duration,
    last_tick: Option<Instant>,
    deadline: Instant,
    samples: VecDeque<Duration>,
}

impl FrameClock {
    /// Creates a clock targeting `max_fps` frames per second; 0 means no cap.
    pub fn new(max_fps: u32) -> Self {
        let frame_time = if max_fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / f64::from(max_fps))
        };
        Self {
            frame_time,
            last_tick: None,
            deadline: Instant::now(),
            samples: VecDeque::with_capacity(FPS_SAMPLES),
        }
    }

    /// Marks the start of a frame and returns seconds since the previous one.
    ///
    /// The first tick returns 0.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> f32 {
        let delta = self
            .last_tick
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);

        if self.last_tick.is_some() {
            self.samples.push_back(delta);
            if self.samples.len() > FPS_SAMPLES {
                self.samples.pop_front();
            }
        }
        self.last_tick = Some(now);

        // Keep a steady cadence, but never try to catch up on missed frames.
        let next = self.deadline + self.frame_time;
        self.deadline = if next < now {
            now + self.frame_time
        } else {
            next
        };

        delta.as_secs_f32()
    }

    /// When the next frame is due.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Average frames per second over the recent frames, 0 before two ticks.
    pub fn fps(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let total: Duration = self.samples.iter().sum();
        let average = total.as_secs_f64() / self.samples.len() as f64;
        if average > 0.0 { 1.0 / average } else { 0.0 }
    }
}
