//! PDF writing.
//!
//! ```text
//! PdfTable / FontDetails
//!     ↓
//! [ContentStreamBuilder] (page content operators)
//!     ↓
//! [PdfWriter] (pages, fonts, catalog; an ObjectSink)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```
//!
//! ```
//! use pdfgen_core::fonts::Type1Font;
//! use pdfgen_core::geometry::Rectangle;
//! use pdfgen_core::writer::PdfWriter;
//! use std::sync::Arc;
//!
//! let mut writer = PdfWriter::new();
//! let page = writer.add_page(Rectangle::letter(), 0)?;
//! let font = writer.add_font(Arc::new(Type1Font::helvetica()));
//! writer.show_text(page, &font, 12.0, 72.0, 720.0, "Hello, World!")?;
//! let bytes = writer.finish()?;
//! assert!(bytes.starts_with(b"%PDF-1.7"));
//! # Ok::<(), pdfgen_core::Error>(())
//! ```

mod content_stream;
mod object_serializer;
mod pdf_writer;
mod sink;

pub use content_stream::{ContentStreamBuilder, ContentStreamOp};
pub use object_serializer::ObjectSerializer;
pub use pdf_writer::PdfWriter;
pub use sink::{ObjectCollector, ObjectSink};
