//! Accumulated-work timing shared by build/give/take actions

/// Tracks performing-time for a time-accumulating action.
///
/// `advance` may be called with many small slices or one large one; the
/// completion edge fires exactly once, at the first call where the
/// accumulated total reaches the configured duration (the boundary value
/// itself completes). A failed precondition check never resets the
/// accumulator; only discarding the whole action does.
#[derive(Debug, Clone, Copy)]
pub struct ActionTimer {
    elapsed: f32,
    duration: f32,
    fired: bool,
}

impl ActionTimer {
    pub fn new(duration: f32) -> Self {
        Self {
            elapsed: 0.0,
            duration,
            fired: false,
        }
    }

    /// Accumulate `dt`; returns true exactly once, on completion.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if !self.fired && self.elapsed >= self.duration {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn is_complete(&self) -> bool {
        self.fired
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
