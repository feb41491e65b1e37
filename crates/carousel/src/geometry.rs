/// Client-space rectangle, as returned by a bounding-box query.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Whether any part of the rectangle overlaps a viewport `height` tall.
    pub fn intersects_viewport(&self, height: f64) -> bool {
        self.top < height && self.bottom > 0.0
    }
}

/// Geometry queries the carousel makes of its host page.
pub trait Viewport {
    /// Bounding box of the carousel container, `None` if it is not laid out.
    fn carousel_rect(&self) -> Option<Rect>;
    fn height(&self) -> f64;

    fn carousel_in_view(&self) -> bool {
        self.carousel_rect()
            .is_some_and(|rect| rect.intersects_viewport(self.height()))
    }
}

/// A viewport that never scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedViewport {
    pub rect: Option<Rect>,
    pub height: f64,
}

impl Viewport for FixedViewport {
    fn carousel_rect(&self) -> Option<Rect> {
        self.rect
    }

    fn height(&self) -> f64 {
        self.height
    }
}
