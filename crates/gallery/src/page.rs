use carousel::{Rect, Viewport};
use serde::{Deserialize, Serialize};

/// Page layout around the carousel, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PageGeometry {
    pub viewport_height: f64,
    pub page_height: f64,
    pub carousel_top: f64,
    pub carousel_height: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            viewport_height: 900.0,
            page_height: 4800.0,
            carousel_top: 2600.0,
            carousel_height: 560.0,
        }
    }
}

/// The scrolling page hosting the carousel. Wheel input the carousel does not consume
/// scrolls the page and moves the scroll-progress indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    geometry: PageGeometry,
    scroll_y: f64,
}

impl Page {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            scroll_y: 0.0,
        }
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn max_scroll(&self) -> f64 {
        (self.geometry.page_height - self.geometry.viewport_height).max(0.0)
    }

    pub fn scroll_by(&mut self, dy: f64) -> f64 {
        self.scroll_y = (self.scroll_y + dy).clamp(0.0, self.max_scroll());
        self.progress()
    }

    /// Fraction of the page scrolled, 0 to 1.
    pub fn progress(&self) -> f64 {
        let max = self.max_scroll();
        if max > 0.0 { self.scroll_y / max } else { 0.0 }
    }

    pub fn set_geometry(&mut self, geometry: PageGeometry) {
        self.geometry = geometry;
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
    }
}

impl Viewport for Page {
    fn carousel_rect(&self) -> Option<Rect> {
        let top = self.geometry.carousel_top - self.scroll_y;
        Some(Rect::new(top, top + self.geometry.carousel_height))
    }

    fn height(&self) -> f64 {
        self.geometry.viewport_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_progress_clamps() {
        let mut page = Page::new(PageGeometry::default());
        assert_eq!(page.scroll_by(-50.0), 0.0);
        assert_eq!(page.scroll_by(1950.0), 0.5);
        assert_eq!(page.scroll_by(10_000.0), 1.0);
        assert_eq!(page.scroll_y(), 3900.0);
    }

    #[test]
    fn test_carousel_enters_view_when_scrolled_to() {
        let mut page = Page::new(PageGeometry::default());
        assert!(!page.carousel_in_view());
        page.scroll_by(1800.0);
        assert!(page.carousel_in_view());
        page.scroll_by(2000.0);
        assert!(!page.carousel_in_view());
    }

    #[test]
    fn test_short_page_never_scrolls() {
        let mut page = Page::new(PageGeometry {
            page_height: 500.0,
            ..PageGeometry::default()
        });
        assert_eq!(page.scroll_by(300.0), 0.0);
    }
}
