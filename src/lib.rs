// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]

//! # pdfgen_core
//!
//! Core of a PDF generation library: the object model that ends up in the
//! file, font usage tracking with subset-aware font writing, table
//! geometry, and the primitives a hyphenator is built from.
//!
//! ## Components
//!
//! - [`collections::OrderedTree`]: red-black tree map used wherever
//!   ordered keys are needed (object table, glyph tables, hyphenation
//!   patterns, dictionary key order)
//! - [`object`]: `Object`, `PdfNumber`, the `PdfArray` trait and the
//!   rotation-aware `PdfRectangle`
//! - [`fonts`]: `BaseFont` implementations and the per-document
//!   `FontDetails` usage tracker
//! - [`table`]: logical `Table` and its page layout `PdfTable`
//! - [`hyphenation`]: `ByteVector`, `CharVector`, `Hyphenation` and a
//!   Liang pattern tree
//! - [`writer`]: content streams, object serialization and `PdfWriter`
//!
//! ## Quick Start
//!
//! ```
//! use pdfgen_core::fonts::Type1Font;
//! use pdfgen_core::geometry::Rectangle;
//! use pdfgen_core::table::{Cell, PdfTable, Table};
//! use pdfgen_core::writer::PdfWriter;
//! use std::sync::Arc;
//!
//! let mut table = Table::new(2)?.with_cellpadding(2.0);
//! table.add_cell(Cell::text("Name").height(14.0))?;
//! table.add_cell(Cell::text("Qty").height(14.0))?;
//! let layout = PdfTable::new(table, 36.0, 559.0, 800.0);
//!
//! let mut writer = PdfWriter::new();
//! let page = writer.add_page(Rectangle::a4(), 0)?;
//! let font = writer.add_font(Arc::new(Type1Font::helvetica()));
//! writer.draw_table(page, &layout, Some((font.as_str(), 10.0)))?;
//! let pdf = writer.finish()?;
//! assert!(pdf.ends_with(b"%%EOF"));
//! # Ok::<(), pdfgen_core::Error>(())
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Containers
pub mod collections;

// Object model
pub mod geometry;
pub mod object;

// Fonts
pub mod fonts;

// Tables
pub mod table;

// Hyphenation
pub mod hyphenation;

// Writing
pub mod writer;

pub use config::PdfConfig;
pub use error::{Error, Result};
pub use object::{Object, ObjectRef, PdfArray, PdfNumber, PdfRectangle};
