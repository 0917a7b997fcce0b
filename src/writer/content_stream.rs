//! PDF content stream builder.
//!
//! Builds page content streams from text and path operators
//! (ISO 32000-1:2008, sections 8 and 9).

use crate::error::Result;
use crate::fonts::encoding::{encode_bytes_as_hex, encode_bytes_as_literal};
use crate::object::number::format_real;
use std::io::Write;

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Set transformation matrix (cm)
    Transform(f32, f32, f32, f32, f32, f32),
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font resource and size (Tf)
    SetFont(String, f32),
    /// Move text position (Td)
    MoveText(f32, f32),
    /// Set text leading (TL)
    SetTextLeading(f32),
    /// Move to next line (T*)
    NextLine,
    /// Show encoded text (Tj)
    ShowText(Vec<u8>),
    /// Set fill color gray (g)
    SetFillColorGray(f32),
    /// Set stroke color gray (G)
    SetStrokeColorGray(f32),
    /// Set fill color RGB (rg)
    SetFillColorRgb(f32, f32, f32),
    /// Set stroke color RGB (RG)
    SetStrokeColorRgb(f32, f32, f32),
    /// Set line width (w)
    SetLineWidth(f32),
    /// Move to (m)
    MoveTo(f32, f32),
    /// Line to (l)
    LineTo(f32, f32),
    /// Rectangle (re)
    Rectangle(f32, f32, f32, f32),
    /// Close path (h)
    ClosePath,
    /// Stroke (S)
    Stroke,
    /// Fill (f)
    Fill,
    /// Fill and stroke (B)
    FillStroke,
    /// End path without filling or stroking (n)
    EndPath,
}

/// Builder for content streams.
#[derive(Debug, Clone, Default)]
pub struct ContentStreamBuilder {
    operations: Vec<ContentStreamOp>,
}

impl ContentStreamBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw operation.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Operations added so far.
    pub fn operations(&self) -> &[ContentStreamOp] {
        &self.operations
    }

    /// Whether nothing was added.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Begin a text object.
    pub fn begin_text(&mut self) -> &mut Self {
        self.op(ContentStreamOp::BeginText)
    }

    /// End a text object.
    pub fn end_text(&mut self) -> &mut Self {
        self.op(ContentStreamOp::EndText)
    }

    /// Select font resource `font_name` at `size`.
    pub fn set_font(&mut self, font_name: &str, size: f32) -> &mut Self {
        self.op(ContentStreamOp::SetFont(font_name.to_string(), size))
    }

    /// Move the text position.
    pub fn move_text(&mut self, tx: f32, ty: f32) -> &mut Self {
        self.op(ContentStreamOp::MoveText(tx, ty))
    }

    /// Set the text leading.
    pub fn set_leading(&mut self, leading: f32) -> &mut Self {
        self.op(ContentStreamOp::SetTextLeading(leading))
    }

    /// Move to the next text line.
    pub fn next_line(&mut self) -> &mut Self {
        self.op(ContentStreamOp::NextLine)
    }

    /// Show bytes already encoded for the current font.
    pub fn show_text(&mut self, encoded: Vec<u8>) -> &mut Self {
        self.op(ContentStreamOp::ShowText(encoded))
    }

    /// Show encoded text at (`x`, `y`) in its own text object.
    pub fn text_at(&mut self, font_name: &str, size: f32, x: f32, y: f32, encoded: Vec<u8>) -> &mut Self {
        self.begin_text()
            .set_font(font_name, size)
            .move_text(x, y)
            .show_text(encoded)
            .end_text()
    }

    /// Set fill gray level.
    pub fn set_fill_gray(&mut self, gray: f32) -> &mut Self {
        self.op(ContentStreamOp::SetFillColorGray(gray))
    }

    /// Set stroke gray level.
    pub fn set_stroke_gray(&mut self, gray: f32) -> &mut Self {
        self.op(ContentStreamOp::SetStrokeColorGray(gray))
    }

    /// Set fill color.
    pub fn set_fill_color(&mut self, r: f32, g: f32, b: f32) -> &mut Self {
        self.op(ContentStreamOp::SetFillColorRgb(r, g, b))
    }

    /// Set stroke color.
    pub fn set_stroke_color(&mut self, r: f32, g: f32, b: f32) -> &mut Self {
        self.op(ContentStreamOp::SetStrokeColorRgb(r, g, b))
    }

    /// Set line width.
    pub fn set_line_width(&mut self, width: f32) -> &mut Self {
        self.op(ContentStreamOp::SetLineWidth(width))
    }

    /// Begin a subpath.
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.op(ContentStreamOp::MoveTo(x, y))
    }

    /// Append a line segment.
    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.op(ContentStreamOp::LineTo(x, y))
    }

    /// Append a rectangle.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.op(ContentStreamOp::Rectangle(x, y, width, height))
    }

    /// Close the current subpath.
    pub fn close_path(&mut self) -> &mut Self {
        self.op(ContentStreamOp::ClosePath)
    }

    /// Stroke the path.
    pub fn stroke(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Stroke)
    }

    /// Fill the path.
    pub fn fill(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Fill)
    }

    /// Fill and stroke the path.
    pub fn fill_stroke(&mut self) -> &mut Self {
        self.op(ContentStreamOp::FillStroke)
    }

    /// End the path without painting.
    pub fn end_path(&mut self) -> &mut Self {
        self.op(ContentStreamOp::EndPath)
    }

    /// Save the graphics state.
    pub fn save_state(&mut self) -> &mut Self {
        self.op(ContentStreamOp::SaveState)
    }

    /// Restore the graphics state.
    pub fn restore_state(&mut self) -> &mut Self {
        self.op(ContentStreamOp::RestoreState)
    }

    /// Concatenate a matrix to the CTM.
    pub fn transform(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> &mut Self {
        self.op(ContentStreamOp::Transform(a, b, c, d, e, f))
    }

    /// Stroke the outline of a rectangle given by its corners.
    pub fn stroke_box(&mut self, left: f32, bottom: f32, right: f32, top: f32) -> &mut Self {
        self.rect(left, bottom, right - left, top - bottom).stroke()
    }

    /// Serialize the operations, one per line.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        for op in &self.operations {
            write_op(&mut buf, op)?;
            writeln!(buf)?;
        }
        Ok(buf)
    }
}

fn num(value: f32) -> String {
    format_real(value as f64)
}

fn write_op<W: Write>(w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
    match op {
        ContentStreamOp::SaveState => write!(w, "q"),
        ContentStreamOp::RestoreState => write!(w, "Q"),
        ContentStreamOp::Transform(a, b, c, d, e, f) => write!(
            w,
            "{} {} {} {} {} {} cm",
            num(*a),
            num(*b),
            num(*c),
            num(*d),
            num(*e),
            num(*f)
        ),
        ContentStreamOp::BeginText => write!(w, "BT"),
        ContentStreamOp::EndText => write!(w, "ET"),
        ContentStreamOp::SetFont(name, size) => write!(w, "/{} {} Tf", name, num(*size)),
        ContentStreamOp::MoveText(tx, ty) => write!(w, "{} {} Td", num(*tx), num(*ty)),
        ContentStreamOp::SetTextLeading(leading) => write!(w, "{} TL", num(*leading)),
        ContentStreamOp::NextLine => write!(w, "T*"),
        ContentStreamOp::ShowText(bytes) => {
            // Two-byte codes read better as hex.
            if bytes.iter().all(|&b| (0x20..0x7F).contains(&b)) {
                write!(w, "{} Tj", encode_bytes_as_literal(bytes))
            } else {
                write!(w, "{} Tj", encode_bytes_as_hex(bytes))
            }
        },
        ContentStreamOp::SetFillColorGray(g) => write!(w, "{} g", num(*g)),
        ContentStreamOp::SetStrokeColorGray(g) => write!(w, "{} G", num(*g)),
        ContentStreamOp::SetFillColorRgb(r, g, b) => write!(w, "{} {} {} rg", num(*r), num(*g), num(*b)),
        ContentStreamOp::SetStrokeColorRgb(r, g, b) => write!(w, "{} {} {} RG", num(*r), num(*g), num(*b)),
        ContentStreamOp::SetLineWidth(width) => write!(w, "{} w", num(*width)),
        ContentStreamOp::MoveTo(x, y) => write!(w, "{} {} m", num(*x), num(*y)),
        ContentStreamOp::LineTo(x, y) => write!(w, "{} {} l", num(*x), num(*y)),
        ContentStreamOp::Rectangle(x, y, width, height) => {
            write!(w, "{} {} {} {} re", num(*x), num(*y), num(*width), num(*height))
        },
        ContentStreamOp::ClosePath => write!(w, "h"),
        ContentStreamOp::Stroke => write!(w, "S"),
        ContentStreamOp::Fill => write!(w, "f"),
        ContentStreamOp::FillStroke => write!(w, "B"),
        ContentStreamOp::EndPath => write!(w, "n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built(builder: &ContentStreamBuilder) -> String {
        String::from_utf8(builder.build().unwrap()).unwrap()
    }

    #[test]
    fn test_simple_text() {
        let mut builder = ContentStreamBuilder::new();
        builder.text_at("F1", 12.0, 72.0, 720.5, b"Hello (World)".to_vec());
        assert_eq!(built(&builder), "BT\n/F1 12 Tf\n72 720.5 Td\n(Hello \\(World\\)) Tj\nET\n");
    }

    #[test]
    fn test_glyph_ids_as_hex() {
        let mut builder = ContentStreamBuilder::new();
        builder.show_text(vec![0x00, 0x03, 0x01, 0x02]);
        assert_eq!(built(&builder), "<00030102> Tj\n");
    }

    #[test]
    fn test_path_operations() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .set_line_width(0.5)
            .move_to(0.0, 0.0)
            .line_to(100.0, 0.0)
            .stroke()
            .stroke_box(10.0, 20.0, 60.0, 40.0);
        assert_eq!(built(&builder), "0.5 w\n0 0 m\n100 0 l\nS\n10 20 50 20 re\nS\n");
    }

    #[test]
    fn test_state_and_color() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .save_state()
            .set_fill_color(1.0, 0.0, 0.0)
            .set_stroke_gray(0.5)
            .rect(0.0, 0.0, 10.0, 10.0)
            .fill_stroke()
            .restore_state();
        assert_eq!(built(&builder), "q\n1 0 0 rg\n0.5 G\n0 0 10 10 re\nB\nQ\n");
        assert!(!builder.is_empty());
    }

    #[test]
    fn test_multi_line_text() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .begin_text()
            .set_font("F2", 10.0)
            .set_leading(12.5)
            .move_text(36.0, 800.0)
            .show_text(b"first".to_vec())
            .next_line()
            .show_text(b"second".to_vec())
            .end_text();
        assert_eq!(
            built(&builder),
            "BT\n/F2 10 Tf\n12.5 TL\n36 800 Td\n(first) Tj\nT*\n(second) Tj\nET\n"
        );
    }

    #[test]
    fn test_transformed_clip_path() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .transform(1.0, 0.0, 0.0, 1.0, 20.0, -5.25)
            .set_fill_gray(0.9)
            .set_stroke_color(0.0, 0.0, 1.0)
            .move_to(0.0, 0.0)
            .line_to(5.0, 5.0)
            .close_path()
            .end_path()
            .fill();
        assert_eq!(
            built(&builder),
            "1 0 0 1 20 -5.25 cm\n0.9 g\n0 0 1 RG\n0 0 m\n5 5 l\nh\nn\nf\n"
        );
        assert_eq!(builder.operations()[5], ContentStreamOp::ClosePath);
    }
}
