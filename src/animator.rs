//! Time-based interpolation of the camera offset.
//!
//! An [`Animator`] drives at most one [`AnimationTask`] at a time. Each frame is
//! requested with a [`FrameRequest`] that carries the generation of the task
//! it belongs to; starting or cancelling an animation bumps the generation, so
//! frames requested for an older task tick as [`Frame::Stale`] and must not
//! touch the camera.

use crate::types::Offset;

/// Symmetric quadratic ease-in-out.
pub fn ease_in_out(p: f64) -> f64 {
    if p < 0.5 {
        2.0 * p * p
    } else {
        1.0 - (-2.0 * p + 2.0).powi(2) / 2.0
    }
}

/// An in-flight move of the camera offset from one position to another.
#[derive(Debug, Clone, Copy)]
pub struct AnimationTask {
    /// Generation this task was started with
    pub generation: u64,
    /// Offset at the moment the animation started
    pub start_offset: Offset,
    /// Offset reached when the animation completes
    pub target_offset: Offset,
    /// Start time in milliseconds
    pub start_time: f64,
    /// Duration in milliseconds
    pub duration: f64,
    /// Maps linear progress to eased progress
    pub easing: fn(f64) -> f64,
}

impl AnimationTask {
    /// Linear progress at `now`, clamped to `0..=1`.
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start_time) / self.duration).clamp(0.0, 1.0)
    }

    /// Interpolated offset for linear progress `p`.
    pub fn offset_at(&self, p: f64) -> Offset {
        let eased = (self.easing)(p);
        let delta = self.target_offset - self.start_offset;
        Offset::new(
            self.start_offset.x + delta.x * eased,
            self.start_offset.y + delta.y * eased,
        )
    }
}

/// Token for the next animation frame of a specific task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest {
    generation: u64,
}

/// Result of ticking a frame request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    /// The animation is still running; apply the offset and tick the next request.
    Running(Offset, FrameRequest),
    /// The animation reached its target; apply the offset. No further frames.
    Finished(Offset),
    /// The request belongs to a superseded or cancelled animation.
    Stale,
}

/// Drives a single active camera animation.
#[derive(Debug, Default)]
pub struct Animator {
    generation: u64,
    active: Option<AnimationTask>,
}

impl Animator {
    /// Creates an idle animator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts animating from `from` to `to`, superseding any running animation.
    ///
    /// Returns the request for the first frame.
    pub fn animate(&mut self, from: Offset, to: Offset, duration_ms: f64, now: f64) -> FrameRequest {
        self.generation = self.generation.wrapping_add(1);
        self.active = Some(AnimationTask {
            generation: self.generation,
            start_offset: from,
            target_offset: to,
            start_time: now,
            duration: duration_ms,
            easing: ease_in_out,
        });
        FrameRequest {
            generation: self.generation,
        }
    }

    /// Stops the running animation; its outstanding frames become stale.
    pub fn cancel(&mut self) {
        if self.active.take().is_some() {
            self.generation = self.generation.wrapping_add(1);
        }
    }

    /// Whether an animation is in flight.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The running animation, if any.
    pub fn active(&self) -> Option<&AnimationTask> {
        self.active.as_ref()
    }

    /// Computes the frame for `request` at time `now`.
    pub fn tick(&mut self, request: FrameRequest, now: f64) -> Frame {
        let Some(task) = self.active else {
            return Frame::Stale;
        };
        if task.generation != request.generation {
            return Frame::Stale;
        }

        let p = task.progress(now);
        if p >= 1.0 {
            self.active = None;
            Frame::Finished(task.target_offset)
        } else {
            Frame::Running(task.offset_at(p), request)
        }
    }
}
