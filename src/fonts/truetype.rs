//! Embedded TrueType fonts.
//!
//! [`TrueTypeFont`] shows text through a single-byte WinAnsi encoding,
//! [`TrueTypeUnicodeFont`] addresses glyphs directly (Type 0 font with
//! an Identity-H encoding and a CIDFontType2 descendant). Both parse the
//! font program once with `ttf-parser` and keep the metrics they need.

use crate::error::{Error, Result};
use crate::fonts::base_font::{
    cid_widths_array, single_byte_widths, BaseFont, FontDescriptor, FontFlags, FontType, FontUsage,
    GlyphMetric,
};
use crate::fonts::encoding::{convert_to_bytes, winansi_to_unicode, TextEncoding};
use crate::fonts::font_subsetter::FontSubsetter;
use crate::fonts::truetype_subset::subset_glyphs;
use crate::object::{Object, ObjectRef, PdfDictionary};
use crate::writer::ObjectSink;
use bytes::Bytes;
use std::collections::{BTreeSet, HashMap};
use ttf_parser::{Face, GlyphId, PlatformId};

const SYMBOL_PAGE: u32 = 0xF000;

/// Parsed font program and metrics shared by both TrueType flavours.
#[derive(Debug, Clone)]
struct FontProgram {
    name: String,
    data: Option<Bytes>,
    symbolic: bool,
    /// Code point (or symbol code) → glyph id.
    cmap: HashMap<u32, u16>,
    /// Advance widths by glyph id, 1/1000 em.
    widths: Vec<u16>,
    descriptor: FontDescriptor,
}

impl FontProgram {
    fn parse(data: Bytes) -> Result<Self> {
        let face = Face::parse(&data, 0).map_err(|e| Error::Font(format!("failed to parse font: {e}")))?;
        let upem = face.units_per_em().max(1) as i32;
        let scale = |v: i16| v as i32 * 1000 / upem;

        let name = face
            .names()
            .into_iter()
            .filter(|n| n.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
            .find_map(|n| n.to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        let mut cmap = HashMap::new();
        let mut has_unicode = false;
        let mut has_symbol = false;
        if let Some(table) = face.tables().cmap {
            for subtable in table.subtables {
                let is_symbol = subtable.platform_id == PlatformId::Windows && subtable.encoding_id == 0;
                if !(subtable.is_unicode() || is_symbol) {
                    continue;
                }
                has_unicode |= subtable.is_unicode();
                has_symbol |= is_symbol;
                subtable.codepoints(|cp| {
                    if let Some(gid) = subtable.glyph_index(cp) {
                        cmap.entry(cp).or_insert(gid.0);
                    }
                });
            }
        }

        let widths = (0..face.number_of_glyphs())
            .map(|gid| {
                let advance = face.glyph_hor_advance(GlyphId(gid)).unwrap_or(0) as i32;
                (advance * 1000 / upem) as u16
            })
            .collect();

        let symbolic = has_symbol && !has_unicode;
        let mut flags = if symbolic {
            FontFlags::SYMBOLIC
        } else {
            FontFlags::NONSYMBOLIC
        };
        if face.is_monospaced() {
            flags |= FontFlags::FIXED_PITCH;
        }
        if face.is_italic() {
            flags |= FontFlags::ITALIC;
        }
        let bbox = face.global_bounding_box();
        let descriptor = FontDescriptor {
            ascent: scale(face.ascender()),
            descent: scale(face.descender()),
            cap_height: scale(face.capital_height().unwrap_or_else(|| face.ascender())),
            bbox: [scale(bbox.x_min), scale(bbox.y_min), scale(bbox.x_max), scale(bbox.y_max)],
            italic_angle: if face.is_italic() { -12.0 } else { 0.0 },
            stem_v: if face.is_bold() { 140 } else { 80 },
            flags,
        };

        log::debug!(
            "Parsed TrueType font {}: {} glyphs, {} mapped code points, symbolic={}",
            name,
            face.number_of_glyphs(),
            cmap.len(),
            symbolic
        );

        Ok(Self {
            name,
            data: Some(data),
            symbolic,
            cmap,
            widths,
            descriptor,
        })
    }

    fn from_metrics(name: &str, entries: impl IntoIterator<Item = (u32, GlyphMetric)>, symbolic: bool) -> Self {
        let mut cmap = HashMap::new();
        let mut widths: Vec<u16> = Vec::new();
        for (code, metric) in entries {
            let gid = metric.glyph as u16;
            cmap.insert(code, gid);
            if widths.len() <= gid as usize {
                widths.resize(gid as usize + 1, 0);
            }
            widths[gid as usize] = metric.width as u16;
        }
        Self {
            name: name.to_string(),
            data: None,
            symbolic,
            cmap,
            widths,
            descriptor: FontDescriptor {
                ascent: 800,
                descent: -200,
                cap_height: 700,
                bbox: [0, -200, 1000, 800],
                italic_angle: 0.0,
                stem_v: 80,
                flags: if symbolic {
                    FontFlags::SYMBOLIC
                } else {
                    FontFlags::NONSYMBOLIC
                },
            },
        }
    }

    fn glyph_width(&self, gid: u16) -> u32 {
        self.widths.get(gid as usize).copied().unwrap_or(0) as u32
    }

    /// Symbolic fonts are looked up by byte, also on the symbol page.
    fn metrics(&self, code: u32) -> Option<GlyphMetric> {
        let gid = if self.symbolic {
            self.cmap
                .get(&code)
                .or_else(|| self.cmap.get(&(SYMBOL_PAGE | (code & 0xFF))))
        } else {
            self.cmap.get(&code)
        }?;
        Some(GlyphMetric {
            glyph: *gid as u32,
            width: self.glyph_width(*gid),
        })
    }

    /// Write the `/FontFile2` stream, subset to `used` when asked.
    fn embed(
        &self,
        sink: &mut dyn ObjectSink,
        used: &BTreeSet<u16>,
        subset: bool,
        include_cmap: bool,
    ) -> Result<Option<ObjectRef>> {
        let Some(data) = &self.data else {
            return Ok(None);
        };
        let program: Bytes = if subset {
            Bytes::from(subset_glyphs(data, used, include_cmap)?)
        } else {
            data.clone()
        };
        log::debug!(
            "Embedding {} ({} of {} bytes, subset={})",
            self.name,
            program.len(),
            data.len(),
            subset
        );
        let mut dict = PdfDictionary::new();
        dict.insert("Length1".to_string(), Object::Integer(program.len() as i64));
        let stream = sink.add_object(Object::stream(dict, program))?;
        Ok(Some(stream))
    }
}

/// TrueType font with a single-byte encoding.
#[derive(Debug, Clone)]
pub struct TrueTypeFont {
    program: FontProgram,
}

impl TrueTypeFont {
    /// Parse a TrueType font program.
    pub fn from_bytes(data: impl Into<Bytes>) -> Result<Self> {
        Ok(Self {
            program: FontProgram::parse(data.into())?,
        })
    }

    /// Read and parse a font file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Font without a program, from a code → metric table.
    pub fn from_metrics(
        name: &str,
        entries: impl IntoIterator<Item = (u32, GlyphMetric)>,
        symbolic: bool,
    ) -> Self {
        Self {
            program: FontProgram::from_metrics(name, entries, symbolic),
        }
    }

    fn code_unicode(&self, code: u8) -> u32 {
        if self.program.symbolic {
            code as u32
        } else {
            winansi_to_unicode(code).unwrap_or(code as u32)
        }
    }
}

impl BaseFont for TrueTypeFont {
    fn font_type(&self) -> FontType {
        FontType::TrueType
    }

    fn postscript_name(&self) -> &str {
        &self.program.name
    }

    fn is_font_specific(&self) -> bool {
        self.program.symbolic
    }

    fn convert_to_bytes(&self, text: &str) -> Vec<u8> {
        let encoding = if self.program.symbolic {
            TextEncoding::SymbolTT
        } else {
            TextEncoding::WinAnsi
        };
        convert_to_bytes(text, encoding)
    }

    fn char_width(&self, ch: char) -> u32 {
        self.program.metrics(ch as u32).map_or(0, |m| m.width)
    }

    fn metrics_tt(&self, code: u32) -> Option<GlyphMetric> {
        self.program.metrics(code)
    }

    fn write_font(&self, sink: &mut dyn ObjectSink, font_ref: ObjectRef, usage: FontUsage<'_>) -> Result<()> {
        let all = [true; 256];
        let (first, last, used, subset) = match usage {
            FontUsage::SingleByte {
                first_char,
                last_char,
                used,
                subset,
            } => (first_char, last_char, used, subset),
            _ => (32, 255, &all, false),
        };

        let glyphs: BTreeSet<u16> = (first..=last)
            .filter(|&code| used[code as usize])
            .filter_map(|code| self.program.metrics(self.code_unicode(code)))
            .map(|m| m.glyph as u16)
            .collect();
        let embed_subset = subset && self.program.data.is_some();
        let base_name = if embed_subset {
            let mut subsetter = FontSubsetter::new();
            for &gid in &glyphs {
                subsetter.use_glyph(gid, 0);
            }
            subsetter.subset_font_name(&self.program.name)
        } else {
            self.program.name.clone()
        };

        let font_file = self.program.embed(sink, &glyphs, embed_subset, true)?;
        let descriptor = self
            .program
            .descriptor
            .to_object(&base_name, font_file.map(|r| ("FontFile2", r)));
        let descriptor_ref = sink.add_object(descriptor)?;

        let widths = single_byte_widths(first, last, used, subset, |code| {
            self.program
                .metrics(self.code_unicode(code))
                .map_or(0, |m| m.width)
        });
        let mut entries = vec![
            ("Type", Object::name("Font")),
            ("Subtype", Object::name("TrueType")),
            ("BaseFont", Object::name(&base_name)),
            ("FirstChar", Object::Integer(first as i64)),
            ("LastChar", Object::Integer(last as i64)),
            ("Widths", Object::Array(widths)),
            ("FontDescriptor", Object::Reference(descriptor_ref)),
        ];
        if !self.program.symbolic {
            entries.push(("Encoding", Object::name("WinAnsiEncoding")));
        }
        sink.add_object_at(font_ref, Object::dict(entries))
    }
}

/// TrueType font addressed by glyph id.
#[derive(Debug, Clone)]
pub struct TrueTypeUnicodeFont {
    program: FontProgram,
}

impl TrueTypeUnicodeFont {
    /// Parse a TrueType font program.
    pub fn from_bytes(data: impl Into<Bytes>) -> Result<Self> {
        Ok(Self {
            program: FontProgram::parse(data.into())?,
        })
    }

    /// Read and parse a font file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Font without a program, from a code → metric table. Nothing is
    /// embedded when it is written.
    pub fn from_metrics(
        name: &str,
        entries: impl IntoIterator<Item = (u32, GlyphMetric)>,
        symbolic: bool,
    ) -> Self {
        Self {
            program: FontProgram::from_metrics(name, entries, symbolic),
        }
    }
}

impl BaseFont for TrueTypeUnicodeFont {
    fn font_type(&self) -> FontType {
        FontType::TrueTypeUnicode
    }

    fn postscript_name(&self) -> &str {
        &self.program.name
    }

    fn is_font_specific(&self) -> bool {
        self.program.symbolic
    }

    /// Two-byte glyph ids; unmapped characters are dropped.
    fn convert_to_bytes(&self, text: &str) -> Vec<u8> {
        text.chars()
            .filter_map(|c| self.program.metrics(c as u32))
            .flat_map(|m| (m.glyph as u16).to_be_bytes())
            .collect()
    }

    fn char_width(&self, ch: char) -> u32 {
        self.program.metrics(ch as u32).map_or(0, |m| m.width)
    }

    fn metrics_tt(&self, code: u32) -> Option<GlyphMetric> {
        self.program.metrics(code)
    }

    fn write_font(&self, sink: &mut dyn ObjectSink, font_ref: ObjectRef, usage: FontUsage<'_>) -> Result<()> {
        let (subsetter, widths, subset) = match usage {
            FontUsage::UnicodeGlyphs { glyphs, subset } => (
                FontSubsetter::from_glyphs(glyphs),
                cid_widths_array(glyphs.iter().map(|(&gid, g)| (gid, g.width))),
                subset,
            ),
            _ => (FontSubsetter::new(), Object::Array(Vec::new()), false),
        };
        let base_name = if subset {
            subsetter.subset_font_name(&self.program.name)
        } else {
            self.program.name.clone()
        };

        let font_file = self.program.embed(sink, subsetter.used_glyphs(), subset, false)?;
        let descriptor = self
            .program
            .descriptor
            .to_object(&base_name, font_file.map(|r| ("FontFile2", r)));
        let descriptor_ref = sink.add_object(descriptor)?;

        let cid_font = Object::dict([
            ("Type", Object::name("Font")),
            ("Subtype", Object::name("CIDFontType2")),
            ("BaseFont", Object::name(&base_name)),
            (
                "CIDSystemInfo",
                Object::dict([
                    ("Registry", Object::String(b"Adobe".to_vec())),
                    ("Ordering", Object::String(b"Identity".to_vec())),
                    ("Supplement", Object::Integer(0)),
                ]),
            ),
            ("FontDescriptor", Object::Reference(descriptor_ref)),
            ("CIDToGIDMap", Object::name("Identity")),
            ("DW", Object::Integer(1000)),
            ("W", widths),
        ]);
        let cid_ref = sink.add_object(cid_font)?;

        let to_unicode = sink.add_object(Object::stream(
            PdfDictionary::new(),
            subsetter.to_unicode_cmap().into_bytes(),
        ))?;

        log::debug!(
            "Writing Type0 font {} with {} glyphs as {}",
            base_name,
            subsetter.glyph_count(),
            font_ref
        );
        sink.add_object_at(
            font_ref,
            Object::dict([
                ("Type", Object::name("Font")),
                ("Subtype", Object::name("Type0")),
                ("BaseFont", Object::name(&base_name)),
                ("Encoding", Object::name("Identity-H")),
                ("DescendantFonts", Object::Array(vec![Object::Reference(cid_ref)])),
                ("ToUnicode", Object::Reference(to_unicode)),
            ]),
        )
    }
}
