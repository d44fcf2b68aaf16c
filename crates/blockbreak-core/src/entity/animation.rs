//! Frame-cycling sprite animation

/// Cycles through `frame_count` frames, one per rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Animation {
    frame_count: usize,
    frame: usize,
}

impl Animation {
    pub fn new(frame_count: usize) -> Self {
        Self {
            frame_count,
            frame: 0,
        }
    }

    /// Return the current frame and advance to the next one.
    /// `None` when the animation has no frames.
    pub fn step(&mut self) -> Option<usize> {
        if self.frame_count == 0 {
            return None;
        }
        let current = self.frame;
        self.frame = (self.frame + 1) % self.frame_count;
        Some(current)
    }
}
