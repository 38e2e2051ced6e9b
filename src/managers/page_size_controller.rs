//! Responsive page-size controller.
//!
//! Classifies the viewport into a [`Breakpoint`] and derives the page size
//! from a base size through a fixed multiplier table.

use crate::types::view::{Breakpoint, DEFAULT_PAGE_SIZE};

/// Page size for `breakpoint` given a base size, floored and never below 1.
/// Saturates instead of overflowing for absurdly large bases.
pub fn page_size_for(breakpoint: Breakpoint, base: usize) -> usize {
    (base.saturating_mul(breakpoint.page_size_percent()) / 100).max(1)
}

/// Tracks the current breakpoint and the page size derived from it.
#[derive(Debug, Clone)]
pub struct PageSizeController {
    base: usize,
    breakpoint: Breakpoint,
    width: Option<u32>,
}

impl PageSizeController {
    pub fn new(base: usize) -> Self {
        Self {
            base: base.max(1),
            // Matches the unscaled base size until the first viewport event.
            breakpoint: Breakpoint::Xl2,
            width: None,
        }
    }

    pub fn base(&self) -> usize {
        self.base
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn page_size(&self) -> usize {
        page_size_for(self.breakpoint, self.base)
    }

    /// Changes the base size, keeping the current breakpoint. Returns the new page size.
    pub fn set_base(&mut self, base: usize) -> usize {
        self.base = base.max(1);
        self.page_size()
    }

    /// Handles a viewport resize and returns the page size to apply.
    pub fn on_viewport_change(&mut self, width: u32) -> usize {
        self.width = Some(width);
        self.breakpoint = Breakpoint::from_width(width);
        self.page_size()
    }
}

impl Default for PageSizeController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
