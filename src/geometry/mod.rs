//! Geometric primitives in PDF user space.
//!
//! Coordinates follow the PDF convention: the origin is the lower-left
//! corner and y grows upwards.

/// An axis-aligned rectangle given by its lower-left and upper-right
/// corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    llx: f32,
    lly: f32,
    urx: f32,
    ury: f32,
}

impl Rectangle {
    /// Create a rectangle from two corners.
    ///
    /// The corners are normalized so that `left <= right` and
    /// `bottom <= top`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfgen_core::geometry::Rectangle;
    ///
    /// let rect = Rectangle::new(100.0, 50.0, 0.0, 0.0);
    /// assert_eq!(rect.left(), 0.0);
    /// assert_eq!(rect.top(), 50.0);
    /// ```
    pub fn new(llx: f32, lly: f32, urx: f32, ury: f32) -> Self {
        Self {
            llx: llx.min(urx),
            lly: lly.min(ury),
            urx: llx.max(urx),
            ury: lly.max(ury),
        }
    }

    /// Rectangle anchored at the origin.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfgen_core::geometry::Rectangle;
    ///
    /// let page = Rectangle::with_size(595.0, 842.0);
    /// assert_eq!(page.width(), 595.0);
    /// assert_eq!(page.height(), 842.0);
    /// ```
    pub fn with_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// ISO A4 portrait page.
    pub fn a4() -> Self {
        Self::with_size(595.0, 842.0)
    }

    /// US Letter portrait page.
    pub fn letter() -> Self {
        Self::with_size(612.0, 792.0)
    }

    /// Left edge.
    pub fn left(&self) -> f32 {
        self.llx
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.lly
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.urx
    }

    /// Top edge.
    pub fn top(&self) -> f32 {
        self.ury
    }

    /// Horizontal extent.
    pub fn width(&self) -> f32 {
        self.urx - self.llx
    }

    /// Vertical extent.
    pub fn height(&self) -> f32 {
        self.ury - self.lly
    }

    /// Same rectangle with width and height exchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfgen_core::geometry::Rectangle;
    ///
    /// let landscape = Rectangle::a4().rotate();
    /// assert_eq!(landscape.width(), 842.0);
    /// ```
    pub fn rotate(&self) -> Self {
        Self::new(self.lly, self.llx, self.ury, self.urx)
    }

    /// Whether a point lies inside or on the border.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.llx && x <= self.urx && y >= self.lly && y <= self.ury
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_corners() {
        let r = Rectangle::new(10.0, 20.0, 5.0, 2.0);
        assert_eq!((r.left(), r.bottom(), r.right(), r.top()), (5.0, 2.0, 10.0, 20.0));
    }

    #[test]
    fn test_contains() {
        let r = Rectangle::with_size(10.0, 10.0);
        assert!(r.contains(0.0, 10.0));
        assert!(!r.contains(-0.1, 5.0));
    }

    #[test]
    fn test_rotate_swaps_axes() {
        let r = Rectangle::new(1.0, 2.0, 3.0, 7.0).rotate();
        assert_eq!((r.left(), r.bottom(), r.right(), r.top()), (2.0, 1.0, 7.0, 3.0));
    }
}
