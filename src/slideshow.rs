//! Auto-advancing slideshow state for the public display mode.
//!
//! The slide deck is two aggregate slides (portfolio overview, stage
//! breakdown) followed by one spotlight slide per featured project.
//! Driving the timer lives with the caller; this state machine only
//! advances an index and a progress percentage per tick, so it can be
//! paused, resumed or torn down at any point without side effects.

/// Time each slide stays on screen.
pub const SLIDE_DURATION_MS: u64 = 10_000;
/// Timer tick interval expected by [`Slideshow::tick`].
pub const TICK_MS: u64 = 100;
/// Number of aggregate slides preceding the project spotlights.
pub const OVERVIEW_SLIDES: usize = 2;

#[derive(Debug, Clone)]
pub struct Slideshow {
    slide_index: usize,
    progress: f64,
    paused: bool,
    total_slides: usize,
}

impl Slideshow {
    pub fn new(featured_count: usize) -> Self {
        Self {
            slide_index: 0,
            progress: 0.0,
            paused: false,
            total_slides: OVERVIEW_SLIDES + featured_count,
        }
    }

    /// Re-derive the deck size when the featured set changes; the current
    /// position is kept unless it falls off the end.
    pub fn set_featured_count(&mut self, featured_count: usize) {
        self.total_slides = OVERVIEW_SLIDES + featured_count;
        if self.slide_index >= self.total_slides {
            self.slide_index = 0;
            self.progress = 0.0;
        }
    }

    /// Advance one timer tick. A full slide takes [`SLIDE_DURATION_MS`]
    /// of ticks; once progress reaches 100% the next tick rolls over to
    /// the following slide. Paused state freezes both index and progress.
    pub fn tick(&mut self) {
        if self.paused {
            return;
        }
        if self.progress >= 100.0 {
            self.slide_index = (self.slide_index + 1) % self.total_slides;
            self.progress = 0.0;
        } else {
            self.progress += (TICK_MS as f64 / SLIDE_DURATION_MS as f64) * 100.0;
        }
    }

    pub fn next(&mut self) {
        self.slide_index = (self.slide_index + 1) % self.total_slides;
        self.progress = 0.0;
    }

    pub fn prev(&mut self) {
        self.slide_index = (self.slide_index + self.total_slides - 1) % self.total_slides;
        self.progress = 0.0;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn slide_index(&self) -> usize {
        self.slide_index
    }

    pub fn total_slides(&self) -> usize {
        self.total_slides
    }

    /// Fill percentage of the current slide's progress bar, 0 to 100.
    pub fn progress(&self) -> f64 {
        self.progress.min(100.0)
    }
}
