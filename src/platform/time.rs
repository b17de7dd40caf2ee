//! Frame scheduling
//!
//! Stands in for the browser's "run before next repaint" callback. The
//! scheduler only decides when a frame runs; simulated time always advances
//! by the fixed logical tick, however long the real frame took.

use std::ops::ControlFlow;
use std::thread;
use std::time::{Duration, Instant};

/// Something that repeatedly invokes a per-frame step
pub trait Scheduler {
    /// Call `step` with the frame index until it breaks or the scheduler
    /// decides to stop. Returns the number of frames run.
    fn run<F>(&mut self, step: F) -> u64
    where
        F: FnMut(u64) -> ControlFlow<()>;
}

/// Sleep-paced loop at a fixed frame rate
#[derive(Debug, Clone)]
pub struct FixedRateScheduler {
    pub frame_interval: Duration,
    /// Stop after this many frames (`None` runs until the step breaks)
    pub max_frames: Option<u64>,
}

impl FixedRateScheduler {
    pub fn new(frame_rate_hz: u32, max_frames: Option<u64>) -> Self {
        let hz = frame_rate_hz.max(1);
        Self {
            frame_interval: Duration::from_secs_f64(1.0 / hz as f64),
            max_frames,
        }
    }

    /// Run frames back to back without sleeping
    pub fn unpaced(max_frames: Option<u64>) -> Self {
        Self {
            frame_interval: Duration::ZERO,
            max_frames,
        }
    }
}

impl Scheduler for FixedRateScheduler {
    fn run<F>(&mut self, mut step: F) -> u64
    where
        F: FnMut(u64) -> ControlFlow<()>,
    {
        let mut frame = 0u64;
        let mut next = Instant::now();

        while self.max_frames.is_none_or(|max| frame < max) {
            let flow = step(frame);
            frame += 1;
            if flow.is_break() {
                break;
            }

            if !self.frame_interval.is_zero() {
                next += self.frame_interval;
                let now = Instant::now();
                if next > now {
                    thread::sleep(next - now);
                } else {
                    // Fell behind: don't try to catch up with a burst of frames
                    next = now;
                }
            }
        }

        frame
    }
}
