//! Virtual document and viewport.
//!
//! The page is three stacked sections measured in terminal rows:
//! an intro one viewport tall, the roadmap container `section_screens`
//! viewports tall, and an outro one viewport tall. The roadmap panel
//! inside the container is sticky to the viewport top.

use crate::controller::{GeometryProvider, ViewportGeometry};

/// Scroll state of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    /// Visible rows
    viewport_height: u16,
    /// Height of the roadmap container, in viewports
    section_screens: u16,
    /// Rows scrolled from the document top
    scroll_y: u32,
}

impl Viewport {
    pub fn new(viewport_height: u16, section_screens: u16) -> Self {
        Self {
            viewport_height,
            section_screens,
            scroll_y: 0,
        }
    }

    pub fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    pub fn scroll_y(&self) -> u32 {
        self.scroll_y
    }

    /// Height of the intro section
    pub fn intro_height(&self) -> u32 {
        self.viewport_height as u32
    }

    pub fn container_top(&self) -> u32 {
        self.intro_height()
    }

    pub fn container_height(&self) -> u32 {
        self.viewport_height as u32 * self.section_screens as u32
    }

    pub fn container_bottom(&self) -> u32 {
        self.container_top() + self.container_height()
    }

    pub fn document_height(&self) -> u32 {
        self.container_bottom() + self.viewport_height as u32
    }

    pub fn max_scroll(&self) -> u32 {
        self.document_height()
            .saturating_sub(self.viewport_height as u32)
    }

    /// Scroll progress through the whole document, in `[0, 1]`
    pub fn document_progress(&self) -> f64 {
        match self.max_scroll() {
            0 => 0.0,
            max => self.scroll_y as f64 / max as f64,
        }
    }

    /// Update the visible height after a resize
    pub fn set_viewport_height(&mut self, height: u16) {
        self.viewport_height = height;
        self.scroll_y = self.scroll_y.min(self.max_scroll());
    }

    /// Scroll by `delta` rows. Returns whether the offset moved.
    pub fn scroll_by(&mut self, delta: i64) -> bool {
        let target = (self.scroll_y as i64 + delta).max(0);
        self.scroll_to(target.min(u32::MAX as i64) as u32)
    }

    /// Scroll to an absolute offset. Returns whether the offset moved.
    pub fn scroll_to(&mut self, y: u32) -> bool {
        let clamped = y.min(self.max_scroll());
        let moved = clamped != self.scroll_y;
        self.scroll_y = clamped;
        moved
    }

    pub fn scroll_to_top(&mut self) -> bool {
        self.scroll_to(0)
    }

    pub fn scroll_to_bottom(&mut self) -> bool {
        self.scroll_to(self.max_scroll())
    }

    /// Screen row of the sticky panel's top edge.
    ///
    /// Zero while pinned, positive while the panel is still below the
    /// viewport top, negative once it has scrolled out at the top.
    pub fn panel_offset(&self) -> i64 {
        let pinned_from = self.container_top() as i64;
        let pinned_until = (self.container_bottom() as i64 - self.viewport_height as i64)
            .max(pinned_from);
        let panel_top = (self.scroll_y as i64).clamp(pinned_from, pinned_until);
        panel_top - self.scroll_y as i64
    }

    /// Screen row where the outro section starts (may be off screen)
    pub fn outro_offset(&self) -> i64 {
        self.container_bottom() as i64 - self.scroll_y as i64
    }

    /// Screen row where the intro section starts (zero or negative)
    pub fn intro_offset(&self) -> i64 {
        -(self.scroll_y as i64)
    }
}

impl GeometryProvider for Viewport {
    fn geometry(&self) -> Option<ViewportGeometry> {
        if self.viewport_height == 0 {
            return None;
        }
        Some(ViewportGeometry {
            container_top: self.container_top() as f64,
            container_height: self.container_height() as f64,
            scroll_y: self.scroll_y as f64,
            viewport_height: self.viewport_height as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_layout() {
        let v = Viewport::new(20, 3);
        assert_eq!(v.container_top(), 20);
        assert_eq!(v.container_height(), 60);
        assert_eq!(v.container_bottom(), 80);
        assert_eq!(v.document_height(), 100);
        assert_eq!(v.max_scroll(), 80);
    }

    #[test]
    fn test_scroll_clamps_at_both_ends() {
        let mut v = Viewport::new(20, 3);
        assert!(!v.scroll_by(-5));
        assert_eq!(v.scroll_y(), 0);

        assert!(v.scroll_by(1_000));
        assert_eq!(v.scroll_y(), 80);
        assert!(!v.scroll_to_bottom());

        assert!(v.scroll_to_top());
        assert_eq!(v.scroll_y(), 0);
    }

    #[test]
    fn test_panel_offset_follows_sticky_rules() {
        let mut v = Viewport::new(20, 3);
        // Intro fully visible, panel just below it
        assert_eq!(v.panel_offset(), 20);

        v.scroll_to(5);
        assert_eq!(v.panel_offset(), 15);

        // Pinned between container_top and container_bottom - viewport
        v.scroll_to(20);
        assert_eq!(v.panel_offset(), 0);
        v.scroll_to(60);
        assert_eq!(v.panel_offset(), 0);

        // Scrolling out at the top
        v.scroll_to(70);
        assert_eq!(v.panel_offset(), -10);
        assert_eq!(v.outro_offset(), 10);
    }

    #[test]
    fn test_resize_keeps_scroll_in_range() {
        let mut v = Viewport::new(20, 3);
        v.scroll_to_bottom();
        v.set_viewport_height(10);
        assert_eq!(v.scroll_y(), v.max_scroll());
        assert_eq!(v.max_scroll(), 40);
    }

    #[test]
    fn test_zero_height_has_no_geometry() {
        let v = Viewport::new(0, 3);
        assert!(v.geometry().is_none());

        let v = Viewport::new(10, 3);
        let g = v.geometry().unwrap();
        assert_eq!(g.container_top, 10.0);
        assert_eq!(g.container_height, 30.0);
    }

    #[test]
    fn test_document_progress() {
        let mut v = Viewport::new(20, 3);
        assert_eq!(v.document_progress(), 0.0);
        v.scroll_to(40);
        assert_eq!(v.document_progress(), 0.5);
    }
}
