//! Frame pacing for the host loop.
//!
//! The pacer is clock-agnostic: callers pass milliseconds since the run
//! started, which keeps it deterministic under test.

#[derive(Debug, Clone)]
pub struct FramePacer {
    frame_ms: u64,
    run_ms: Option<u64>,
    max_frames: Option<u64>,
    next_due_ms: u64,
    frames: u64,
}

impl FramePacer {
    /// `run_ms = None` runs until stopped externally.
    pub fn new(frame_ms: u64, run_ms: Option<u64>) -> Self {
        Self {
            frame_ms,
            run_ms,
            max_frames: None,
            next_due_ms: 0,
            frames: 0,
        }
    }

    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    pub fn frame_ms(&self) -> u64 {
        self.frame_ms
    }

    /// Change the interval; takes effect from the next frame.
    pub fn set_frame_ms(&mut self, frame_ms: u64) {
        self.frame_ms = frame_ms;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Whether the run is over (time budget or frame cap reached).
    pub fn should_stop(&self, now_ms: u64) -> bool {
        if let Some(run_ms) = self.run_ms {
            if now_ms >= run_ms {
                return true;
            }
        }
        matches!(self.max_frames, Some(max) if self.frames >= max)
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms >= self.next_due_ms
    }

    /// Milliseconds to wait before the next frame is due.
    pub fn wait_ms(&self, now_ms: u64) -> u64 {
        self.next_due_ms.saturating_sub(now_ms)
    }

    /// Record that a frame was presented at `now_ms`.
    ///
    /// The next frame is scheduled one interval later. A late frame never
    /// causes a burst of catch-up frames.
    pub fn frame_presented(&mut self, now_ms: u64) {
        self.frames += 1;
        self.next_due_ms = now_ms.saturating_add(self.frame_ms);
    }
}
