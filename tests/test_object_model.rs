//! Integration tests for numbers, arrays and rectangles.

use pdfgen_core::geometry::Rectangle;
use pdfgen_core::writer::ObjectSerializer;
use pdfgen_core::{Object, PdfArray, PdfNumber, PdfRectangle};
use proptest::prelude::*;

fn written(obj: &Object) -> String {
    ObjectSerializer::compact().serialize_to_string(obj).unwrap()
}

// =============================================================================
// NUMBERS
// =============================================================================

mod number_tests {
    use super::*;

    #[test]
    fn test_parse_keeps_text() {
        let n: PdfNumber = " 3.50 ".parse().unwrap();
        assert_eq!(n.double_value(), 3.5);
        assert_eq!(n.content(), " 3.50 ");
        assert!(PdfNumber::parse("abc").is_err());
    }

    #[test]
    fn test_increment_rewrites_text() {
        let mut n = PdfNumber::parse("1.50").unwrap();
        n.increment();
        assert_eq!(n.to_string(), "2.5");
        assert_eq!(n.int_value(), 2);
    }

    #[test]
    fn test_integral_numbers_become_integers() {
        assert_eq!(written(&PdfNumber::new(12.0).into()), "12");
        assert_eq!(written(&PdfNumber::new(-0.25).into()), "-0.25");
    }
}

// =============================================================================
// RECTANGLES
// =============================================================================

mod rectangle_tests {
    use super::*;

    #[test]
    fn test_landscape_media_box() {
        let portrait = Rectangle::a4();
        let rotated = PdfRectangle::from_rectangle(&portrait, 270);
        assert_eq!(written(&rotated.into()), "[0 0 842 595]");
        assert_eq!(rotated.rotate(), PdfRectangle::from_rectangle(&portrait, 0));
    }

    #[test]
    fn test_round_trip_to_layout_rectangle() {
        let r = PdfRectangle::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(r.rectangle(), Rectangle::new(10.0, 20.0, 110.0, 70.0));
        assert_eq!(PdfRectangle::from(r.rectangle()), r);
    }

    #[test]
    fn test_rectangle_refuses_every_mutation() {
        let mut r = PdfRectangle::from_size_rotated(50.0, 80.0, 90);
        let before = r;
        assert!(!r.add(Object::Null));
        assert!(!r.add_ints(&[1, 2]));
        assert!(!r.add_floats(&[1.5]));
        r.add_first(Object::Integer(0));
        assert_eq!(r, before);
        assert_eq!(r.get(2), Some(Object::Real(80.0)));
        assert_eq!(r.get(4), None);
    }

    #[test]
    fn test_vec_array_grows() {
        let mut arr: Vec<Object> = Vec::new();
        arr.add_ints(&[1, 2]);
        arr.add_first(Object::name("First"));
        assert_eq!(written(&arr.to_object()), "[/First 1 2]");
    }
}

proptest! {
    #[test]
    fn prop_quarter_turns_swap_axes(w in 1.0f32..2000.0, h in 1.0f32..2000.0, turns in 0i32..4) {
        let r = PdfRectangle::from_size_rotated(w, h, turns * 90);
        if turns % 2 == 1 {
            prop_assert_eq!((r.width(), r.height()), (h, w));
        } else {
            prop_assert_eq!((r.width(), r.height()), (w, h));
        }
    }

    #[test]
    fn prop_format_real_parses_back(v in -100_000.0f64..100_000.0) {
        let text = written(&Object::Real(v));
        let parsed: f64 = text.parse().unwrap();
        prop_assert!((parsed - v).abs() <= 0.000_005 + f64::EPSILON * v.abs());
        prop_assert!(!text.ends_with('.'));
    }
}
