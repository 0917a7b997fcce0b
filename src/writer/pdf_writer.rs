//! PDF document writer.
//!
//! Assembles complete PDF documents with proper structure:
//! header, body, xref table, and trailer.

use super::content_stream::ContentStreamBuilder;
use super::object_serializer::ObjectSerializer;
use super::sink::{ObjectCollector, ObjectSink};
use crate::config::PdfConfig;
use crate::error::{Error, Result};
use crate::fonts::encoding::text_string_bytes;
use crate::fonts::{BaseFont, FontDetails};
use crate::geometry::Rectangle;
use crate::object::{Object, ObjectRef, PdfDictionary, PdfRectangle};
use crate::table::PdfTable;
use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::io::Write;
use std::sync::Arc;

/// Compress data using Flate/Deflate compression.
fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Internal page data.
#[derive(Debug)]
struct PageData {
    media_box: PdfRectangle,
    rotation: i32,
    content: ContentStreamBuilder,
    /// Indices into `PdfWriter::fonts`
    fonts_used: BTreeSet<usize>,
}

/// PDF document writer.
///
/// Pages are added up front and filled through [`show_text`](Self::show_text),
/// [`draw_table`](Self::draw_table) or [`content`](Self::content). Fonts
/// are registered once and written, with only the glyphs actually shown,
/// when the document is finished.
#[derive(Debug)]
pub struct PdfWriter {
    config: PdfConfig,
    objects: ObjectCollector,
    pages_ref: ObjectRef,
    pages: Vec<PageData>,
    /// Resource name → usage record, in registration order
    fonts: IndexMap<String, FontDetails>,
    title: Option<String>,
}

impl PdfWriter {
    /// Create a new PDF writer with default config.
    pub fn new() -> Self {
        Self::with_config(PdfConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfConfig) -> Self {
        let mut objects = ObjectCollector::new();
        let pages_ref = objects.reserve_ref();
        Self {
            config,
            objects,
            pages_ref,
            pages: Vec::new(),
            fonts: IndexMap::new(),
            title: None,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &PdfConfig {
        &self.config
    }

    /// Set the document title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Add a page of the given size. `rotation` is in degrees and must be
    /// a multiple of 90. Returns the page index.
    pub fn add_page(&mut self, size: Rectangle, rotation: i32) -> Result<usize> {
        if rotation % 90 != 0 {
            return Err(Error::InvalidArgument(format!(
                "page rotation must be a multiple of 90, got {rotation}"
            )));
        }
        let rotation = rotation.rem_euclid(360);
        self.pages.push(PageData {
            media_box: PdfRectangle::from_rectangle(&size, rotation),
            rotation,
            content: ContentStreamBuilder::new(),
            fonts_used: BTreeSet::new(),
        });
        Ok(self.pages.len() - 1)
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Register a font; returns its resource name (`F1`, `F2`, ...).
    pub fn add_font(&mut self, font: Arc<dyn BaseFont>) -> String {
        let name = format!("F{}", self.fonts.len() + 1);
        let font_ref = self.objects.reserve_ref();
        let mut details = FontDetails::new(name.clone(), font_ref, font);
        details.set_subset(self.config.subset_fonts);
        log::debug!(
            "Registered font {} as {} ({})",
            details.base_font().postscript_name(),
            name,
            font_ref
        );
        self.fonts.insert(name.clone(), details);
        name
    }

    /// Usage record of a registered font.
    pub fn font_details(&self, font_name: &str) -> Option<&FontDetails> {
        self.fonts.get(font_name)
    }

    /// Content stream of a page, for drawing directly.
    pub fn content(&mut self, page: usize) -> Result<&mut ContentStreamBuilder> {
        Ok(&mut self.page_mut(page)?.content)
    }

    /// Show `text` at (`x`, `y`) with a registered font.
    pub fn show_text(&mut self, page: usize, font_name: &str, size: f32, x: f32, y: f32, text: &str) -> Result<()> {
        let index = self.font_index(font_name)?;
        let encoded = self.fonts[index].convert_to_bytes(text);
        let page = self.page_mut(page)?;
        page.content.text_at(font_name, size, x, y, encoded);
        page.fonts_used.insert(index);
        Ok(())
    }

    /// Stroke the border of every resolved cell of `table`. With a font,
    /// the cell text is shown inside the padding at the top left.
    pub fn draw_table(&mut self, page: usize, table: &PdfTable, font: Option<(&str, f32)>) -> Result<()> {
        let padding = table.cellpadding();
        {
            let content = &mut self.page_mut(page)?.content;
            content.save_state().set_line_width(0.5);
            for cell in table.cells() {
                content.stroke_box(cell.left(), cell.bottom(), cell.right(), cell.top());
            }
            content.restore_state();
        }
        if let Some((font_name, size)) = font {
            for cell in table.cells().iter().filter(|c| !c.content().is_empty()) {
                self.show_text(
                    page,
                    font_name,
                    size,
                    cell.left() + padding,
                    cell.top() - padding - size,
                    cell.content(),
                )?;
            }
        }
        log::debug!("Drew table of {} cells on page {}", table.cells().len(), page);
        Ok(())
    }

    /// Build the complete PDF document.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        for details in self.fonts.values_mut() {
            details.write_font(&mut self.objects)?;
        }

        let mut kids = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let content_ref = self
                .objects
                .add_object(Object::stream(PdfDictionary::new(), page.content.build()?))?;
            let fonts: PdfDictionary = page
                .fonts_used
                .iter()
                .filter_map(|&i| self.fonts.get_index(i))
                .map(|(name, fd)| (name.clone(), Object::Reference(fd.indirect_reference())))
                .collect();
            let mut page_dict = PdfDictionary::new();
            page_dict.insert("Type".into(), Object::name("Page"));
            page_dict.insert("Parent".into(), Object::Reference(self.pages_ref));
            page_dict.insert("MediaBox".into(), page.media_box.into());
            page_dict.insert("Contents".into(), Object::Reference(content_ref));
            page_dict.insert("Resources".into(), Object::dict([("Font", Object::Dictionary(fonts))]));
            if page.rotation != 0 {
                page_dict.insert("Rotate".into(), Object::from(page.rotation));
            }
            kids.push(Object::Reference(self.objects.add_object(Object::Dictionary(page_dict))?));
        }

        self.objects.add_object_at(
            self.pages_ref,
            Object::dict([
                ("Type", Object::name("Pages")),
                ("Count", Object::Integer(kids.len() as i64)),
                ("Kids", Object::Array(kids)),
            ]),
        )?;
        let catalog_ref = self.objects.add_object(Object::dict([
            ("Type", Object::name("Catalog")),
            ("Pages", Object::Reference(self.pages_ref)),
        ]))?;
        let mut info = vec![("Producer", Object::String(b"pdfgen_core".to_vec()))];
        if let Some(title) = &self.title {
            info.push(("Title", Object::String(text_string_bytes(title))));
        }
        let info_ref = self.objects.add_object(Object::dict(info))?;

        let output = self.serialize(catalog_ref, info_ref)?;
        log::debug!(
            "Finished PDF: {} pages, {} fonts, {} objects, {} bytes",
            self.pages.len(),
            self.fonts.len(),
            self.objects.len(),
            output.len()
        );
        Ok(output)
    }

    /// Save the PDF to a file.
    pub fn save(self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.finish()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn serialize(&self, catalog_ref: ObjectRef, info_ref: ObjectRef) -> Result<Vec<u8>> {
        let serializer = ObjectSerializer::with_compact(self.config.compact);
        let size = self.objects.max_id() as usize + 1;
        let mut offsets: Vec<Option<usize>> = vec![None; size];
        let mut output = Vec::new();

        writeln!(output, "%PDF-{}", self.config.pdf_version)?;
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        for (obj_ref, obj) in self.objects.iter() {
            offsets[obj_ref.id as usize] = Some(output.len());
            match self.compressed(obj)? {
                Some(compressed) => serializer.write_indirect(&mut output, obj_ref.id, obj_ref.gen, &compressed)?,
                None => serializer.write_indirect(&mut output, obj_ref.id, obj_ref.gen, obj)?,
            }
        }

        let xref_start = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", size)?;
        writeln!(output, "0000000000 65535 f ")?;
        for offset in offsets.iter().skip(1) {
            match offset {
                Some(offset) => writeln!(output, "{:010} 00000 n ", offset)?,
                None => writeln!(output, "0000000000 65535 f ")?,
            }
        }

        let trailer = Object::dict([
            ("Size", Object::Integer(size as i64)),
            ("Root", Object::Reference(catalog_ref)),
            ("Info", Object::Reference(info_ref)),
        ]);
        writeln!(output, "trailer")?;
        serializer.write_object(&mut output, &trailer)?;
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        write!(output, "%%EOF")?;
        Ok(output)
    }

    /// Flate-compressed copy of an unfiltered stream when compression is on.
    fn compressed(&self, obj: &Object) -> Result<Option<Object>> {
        let Object::Stream { dict, data } = obj else {
            return Ok(None);
        };
        if !self.config.compress || dict.contains_key("Filter") {
            return Ok(None);
        }
        let mut dict = dict.clone();
        dict.insert("Filter".into(), Object::name("FlateDecode"));
        Ok(Some(Object::stream(dict, compress_data(data)?)))
    }

    fn font_index(&self, font_name: &str) -> Result<usize> {
        self.fonts
            .get_index_of(font_name)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown font resource {font_name}")))
    }

    fn page_mut(&mut self, page: usize) -> Result<&mut PageData> {
        let count = self.pages.len();
        self.pages
            .get_mut(page)
            .ok_or_else(|| Error::InvalidArgument(format!("page {page} out of range ({count} pages)")))
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectSink for PdfWriter {
    fn reserve_ref(&mut self) -> ObjectRef {
        self.objects.reserve_ref()
    }

    fn add_object_at(&mut self, obj_ref: ObjectRef, object: Object) -> Result<()> {
        self.objects.add_object_at(obj_ref, object)
    }
}
