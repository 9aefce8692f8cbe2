use crate::LayoutError;
use crate::cursor::{PageCursor, PageState};
use crate::elements::PositionedElement;
use log::debug;
use quire_style::{
    FontChoice, FontFace, FontStyle, FontWeight, Margins, SharedProfile, StyleProfile, TypeScale,
};
use quire_types::PageSize;

/// Page geometry and body font for one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    pub page: PageSize,
    pub margins: Margins,
    pub font: FontChoice,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            page: PageSize::LETTER,
            margins: Margins::all(72.0),
            font: FontChoice::Serif,
        }
    }
}

impl LayoutSettings {
    pub fn validate(&self) -> Result<(), LayoutError> {
        let width = self.page.width - self.margins.left - self.margins.right;
        let height = self.page.height - self.margins.top - self.margins.bottom;
        if width <= 0.0 || height <= 0.0 {
            return Err(LayoutError::NoContentArea { width, height });
        }
        Ok(())
    }
}

/// The single owner of the page cursor and the laid-out pages.
///
/// Block renderers borrow it mutably one at a time, so every page-break
/// decision goes through [`RenderContext::ensure_room`].
pub struct RenderContext {
    pub cursor: PageCursor,
    state: PageState,
    pages: Vec<Vec<PositionedElement>>,
    profile: SharedProfile,
    font: FontChoice,
}

impl RenderContext {
    pub fn new(settings: &LayoutSettings, profile: SharedProfile) -> Self {
        Self {
            cursor: PageCursor::new(settings.page, settings.margins),
            state: PageState::OnPage,
            pages: vec![Vec::new()],
            profile,
            font: settings.font,
        }
    }

    pub fn profile(&self) -> &dyn StyleProfile {
        self.profile.as_ref()
    }

    pub fn type_scale(&self) -> TypeScale {
        self.profile.type_scale()
    }

    /// Body face with the given decorations.
    pub fn face(&self, bold: bool, italic: bool) -> FontFace {
        FontFace::select(
            self.font,
            if bold { FontWeight::Bold } else { FontWeight::Regular },
            if italic { FontStyle::Italic } else { FontStyle::Normal },
        )
    }

    /// Code always uses the monospace family.
    pub fn code_face(&self, bold: bool, italic: bool) -> FontFace {
        FontFace::select(
            FontChoice::Monospace,
            if bold { FontWeight::Bold } else { FontWeight::Regular },
            if italic { FontStyle::Italic } else { FontStyle::Normal },
        )
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_page_empty(&self) -> bool {
        self.pages.last().is_none_or(|p| p.is_empty())
    }

    /// Number of elements placed on page `index` so far.
    pub fn element_count(&self, index: usize) -> usize {
        self.pages.get(index).map_or(0, |p| p.len())
    }

    pub fn push(&mut self, element: PositionedElement) {
        if let Some(page) = self.pages.last_mut() {
            page.push(element);
        }
    }

    /// Adds an element to an earlier page, e.g. a rule spanning a page break.
    pub fn push_to_page(&mut self, index: usize, element: PositionedElement) {
        if let Some(page) = self.pages.get_mut(index) {
            page.push(element);
        }
    }

    /// Starts a new page and moves the cursor to its top margin.
    pub fn page_break(&mut self) {
        self.state = PageState::Breaking;
        debug!(
            "Page break after page {} at y={:.2}",
            self.pages.len(),
            self.cursor.y
        );
        self.pages.push(Vec::new());
        self.cursor.reset();
        self.state = PageState::OnPage;
    }

    /// Breaks the page if `height` does not fit below the cursor. Content that
    /// is taller than a whole page is placed at the top of the current page
    /// instead of breaking forever. Returns whether a break happened.
    pub fn ensure_room(&mut self, height: f32) -> bool {
        if self.cursor.would_overflow(height) && !self.cursor.at_top() {
            self.page_break();
            true
        } else {
            false
        }
    }

    pub fn into_pages(self) -> Vec<Vec<PositionedElement>> {
        self.pages
    }
}
