//! Rotation-aware rectangle arrays (`/MediaBox`, `/BBox`, ...).

use crate::geometry::Rectangle;
use crate::object::{Object, PdfArray};

/// Immutable four-number PDF array `[left bottom right top]`.
///
/// A rotation of 90 or 270 degrees swaps the x and y roles when the
/// rectangle is built, so the stored values are always the ones emitted.
/// Every mutation through [`PdfArray`] is refused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfRectangle {
    left: f32,
    bottom: f32,
    right: f32,
    top: f32,
}

impl PdfRectangle {
    /// Rectangle from corners and page rotation in degrees.
    pub fn with_rotation(llx: f32, lly: f32, urx: f32, ury: f32, rotation: i32) -> Self {
        if rotation == 90 || rotation == 270 {
            Self {
                left: lly,
                bottom: llx,
                right: ury,
                top: urx,
            }
        } else {
            Self {
                left: llx,
                bottom: lly,
                right: urx,
                top: ury,
            }
        }
    }

    /// Rectangle from corners, no rotation.
    pub fn new(llx: f32, lly: f32, urx: f32, ury: f32) -> Self {
        Self::with_rotation(llx, lly, urx, ury, 0)
    }

    /// Rectangle anchored at the origin.
    pub fn from_size(urx: f32, ury: f32) -> Self {
        Self::with_rotation(0.0, 0.0, urx, ury, 0)
    }

    /// Rectangle anchored at the origin with rotation.
    pub fn from_size_rotated(urx: f32, ury: f32, rotation: i32) -> Self {
        Self::with_rotation(0.0, 0.0, urx, ury, rotation)
    }

    /// Rectangle from a layout rectangle with rotation.
    pub fn from_rectangle(rect: &Rectangle, rotation: i32) -> Self {
        Self::with_rotation(rect.left(), rect.bottom(), rect.right(), rect.top(), rotation)
    }

    /// Left edge.
    pub fn left(&self) -> f32 {
        self.left
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.right
    }

    /// Top edge.
    pub fn top(&self) -> f32 {
        self.top
    }

    /// Left edge moved inwards by `margin`.
    pub fn left_with_margin(&self, margin: i32) -> f32 {
        self.left + margin as f32
    }

    /// Bottom edge moved inwards by `margin`.
    pub fn bottom_with_margin(&self, margin: i32) -> f32 {
        self.bottom + margin as f32
    }

    /// Right edge moved inwards by `margin`.
    pub fn right_with_margin(&self, margin: i32) -> f32 {
        self.right - margin as f32
    }

    /// Top edge moved inwards by `margin`.
    pub fn top_with_margin(&self, margin: i32) -> f32 {
        self.top - margin as f32
    }

    /// `right - left`.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// `top - bottom`.
    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// A new rectangle with the x and y roles exchanged.
    pub fn rotate(&self) -> PdfRectangle {
        PdfRectangle::with_rotation(self.bottom, self.left, self.top, self.right, 0)
    }

    /// Layout rectangle covering the same area.
    pub fn rectangle(&self) -> Rectangle {
        Rectangle::new(self.left, self.bottom, self.right, self.top)
    }

    fn values(&self) -> [f32; 4] {
        [self.left, self.bottom, self.right, self.top]
    }
}

impl From<Rectangle> for PdfRectangle {
    fn from(rect: Rectangle) -> Self {
        Self::from_rectangle(&rect, 0)
    }
}

impl PdfArray for PdfRectangle {
    fn len(&self) -> usize {
        4
    }

    fn get(&self, index: usize) -> Option<Object> {
        self.values().get(index).map(|&v| Object::Real(v as f64))
    }

    fn add(&mut self, _object: Object) -> bool {
        false
    }

    fn add_first(&mut self, _object: Object) {}

    fn add_floats(&mut self, _values: &[f32]) -> bool {
        false
    }

    fn add_ints(&mut self, _values: &[i32]) -> bool {
        false
    }

    fn to_object(&self) -> Object {
        Object::Array(self.values().iter().map(|&v| Object::Real(v as f64)).collect())
    }
}

impl From<PdfRectangle> for Object {
    fn from(rect: PdfRectangle) -> Self {
        rect.to_object()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_swaps_axes() {
        let r = PdfRectangle::with_rotation(0.0, 0.0, 100.0, 200.0, 90);
        assert_eq!((r.left(), r.bottom(), r.right(), r.top()), (0.0, 0.0, 200.0, 100.0));
        assert_eq!(r.width(), 200.0);
        assert_eq!(r.height(), 100.0);
    }

    #[test]
    fn test_rotation_180_keeps_axes() {
        let r = PdfRectangle::with_rotation(1.0, 2.0, 3.0, 4.0, 180);
        assert_eq!(r, PdfRectangle::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_margins() {
        let r = PdfRectangle::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(r.left_with_margin(5), 5.0);
        assert_eq!(r.bottom_with_margin(5), 5.0);
        assert_eq!(r.right_with_margin(5), 95.0);
        assert_eq!(r.top_with_margin(5), 45.0);
    }

    #[test]
    fn test_mutation_refused() {
        let mut r = PdfRectangle::from_size(10.0, 10.0);
        assert!(!r.add(Object::Integer(1)));
        assert!(!r.add_floats(&[1.0]));
        assert!(!r.add_ints(&[1]));
        r.add_first(Object::Null);
        assert_eq!(PdfArray::len(&r), 4);
        assert_eq!(r, PdfRectangle::from_size(10.0, 10.0));
    }

    #[test]
    fn test_to_object_order() {
        let r = PdfRectangle::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(
            r.to_object(),
            Object::Array(vec![
                Object::Real(1.0),
                Object::Real(2.0),
                Object::Real(3.0),
                Object::Real(4.0)
            ])
        );
    }
}
