//! Vertical position tracking and the page-break decision.

use quire_style::Margins;
use quire_types::{PageSize, Rect};

const EPSILON: f32 = 0.01;

/// Whether the renderer is placing content or advancing to a fresh page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageState {
    #[default]
    OnPage,
    Breaking,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageCursor {
    /// Top of the next thing to place, from the top edge of the page.
    pub y: f32,
    pub page: PageSize,
    pub margins: Margins,
}

impl PageCursor {
    pub fn new(page: PageSize, margins: Margins) -> Self {
        Self {
            y: margins.top,
            page,
            margins,
        }
    }

    pub fn top(&self) -> f32 {
        self.margins.top
    }

    /// Lowest y content may reach.
    pub fn usable_bottom(&self) -> f32 {
        self.page.height - self.margins.bottom
    }

    pub fn left(&self) -> f32 {
        self.margins.left
    }

    pub fn content_width(&self) -> f32 {
        self.page.width - self.margins.left - self.margins.right
    }

    pub fn content_height(&self) -> f32 {
        self.usable_bottom() - self.margins.top
    }

    pub fn content_box(&self) -> Rect {
        Rect::new(
            self.margins.left,
            self.margins.top,
            self.content_width(),
            self.content_height(),
        )
    }

    pub fn remaining(&self) -> f32 {
        (self.usable_bottom() - self.y).max(0.0)
    }

    /// True when content of `height` placed at the cursor would end below the
    /// bottom margin.
    pub fn would_overflow(&self, height: f32) -> bool {
        self.y + height > self.usable_bottom() + EPSILON
    }

    pub fn at_top(&self) -> bool {
        self.y <= self.margins.top + EPSILON
    }

    pub fn advance(&mut self, height: f32) {
        self.y += height;
    }

    pub fn reset(&mut self) {
        self.y = self.margins.top;
    }
}
