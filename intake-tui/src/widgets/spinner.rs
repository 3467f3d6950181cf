//! Loading spinner for in-flight network calls.

/// Braille spinner driven by the application tick.
#[derive(Debug, Clone, Copy)]
pub struct Spinner {
    frames: &'static [&'static str],
    /// Ticks per frame.
    interval: u64,
}

impl Spinner {
    /// Creates a spinner with the default frame set.
    pub const fn new() -> Self {
        Self {
            frames: &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
            interval: 1,
        }
    }

    /// Returns the frame to show at the given tick.
    pub fn frame(&self, tick: u64) -> &'static str {
        let index = (tick / self.interval) as usize % self.frames.len();
        self.frames[index]
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}
