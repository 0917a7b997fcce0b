//! CJK fonts from the Adobe character collections.
//!
//! Text is encoded as UCS-2 and resolved by the viewer through a
//! predefined CMap; nothing is embedded. The CID of each character is
//! still needed for `/W`, so the font carries a Unicode → CID table.

use crate::error::Result;
use crate::fonts::base_font::{cid_widths_array, BaseFont, FontDescriptor, FontFlags, FontType, FontUsage};
use crate::fonts::encoding::{convert_to_bytes, TextEncoding};
use crate::object::{Object, ObjectRef};
use crate::writer::ObjectSink;
use std::collections::HashMap;

const DEFAULT_WIDTH: u32 = 1000;

/// CID-keyed font using a predefined CMap.
#[derive(Debug, Clone)]
pub struct CjkFont {
    name: String,
    cmap: String,
    ordering: String,
    supplement: i32,
    cids: HashMap<char, u32>,
    widths: HashMap<u32, u32>,
    descriptor: FontDescriptor,
}

impl CjkFont {
    /// Font `name` shown through CMap `cmap` over the `Adobe-<ordering>`
    /// collection.
    pub fn new(name: &str, cmap: &str, ordering: &str, supplement: i32) -> Self {
        Self {
            name: name.to_string(),
            cmap: cmap.to_string(),
            ordering: ordering.to_string(),
            supplement,
            cids: HashMap::new(),
            widths: HashMap::new(),
            descriptor: FontDescriptor {
                ascent: 880,
                descent: -120,
                cap_height: 880,
                bbox: [-25, -254, 1000, 880],
                italic_angle: 0.0,
                stem_v: 93,
                flags: FontFlags::SERIF | FontFlags::SYMBOLIC,
            },
        }
    }

    /// Simplified Chinese, STSong-Light.
    pub fn st_song_light() -> Self {
        Self::new("STSong-Light", "UniGB-UCS2-H", "GB1", 4)
    }

    /// Japanese, HeiseiMin-W3.
    pub fn hei_sei_min_w3() -> Self {
        Self::new("HeiseiMin-W3", "UniJIS-UCS2-H", "Japan1", 2)
    }

    /// Korean, HYGoThic-Medium.
    pub fn hygo_thic_medium() -> Self {
        Self::new("HYGoThic-Medium", "UniKS-UCS2-H", "Korea1", 1)
    }

    /// Traditional Chinese, MSung-Light.
    pub fn msung_light() -> Self {
        Self::new("MSung-Light", "UniCNS-UCS2-H", "CNS1", 3)
    }

    /// Map `ch` to `cid` with advance `width` (1/1000 em).
    pub fn with_cid(mut self, ch: char, cid: u32, width: u32) -> Self {
        self.cids.insert(ch, cid);
        if width != DEFAULT_WIDTH {
            self.widths.insert(cid, width);
        }
        self
    }

    /// Add several `(char, cid, width)` entries.
    pub fn with_cids(self, entries: impl IntoIterator<Item = (char, u32, u32)>) -> Self {
        entries
            .into_iter()
            .fold(self, |font, (ch, cid, width)| font.with_cid(ch, cid, width))
    }

    /// Predefined CMap name.
    pub fn cmap(&self) -> &str {
        &self.cmap
    }

    fn cid_width(&self, cid: u32) -> u32 {
        self.widths.get(&cid).copied().unwrap_or(DEFAULT_WIDTH)
    }
}

impl BaseFont for CjkFont {
    fn font_type(&self) -> FontType {
        FontType::Cjk
    }

    fn postscript_name(&self) -> &str {
        &self.name
    }

    fn convert_to_bytes(&self, text: &str) -> Vec<u8> {
        convert_to_bytes(text, TextEncoding::Utf16Be)
    }

    fn char_width(&self, ch: char) -> u32 {
        self.cid_width(self.cid_code(ch))
    }

    /// CID of `ch`; characters outside the table map to CID 0.
    fn cid_code(&self, ch: char) -> u32 {
        self.cids.get(&ch).copied().unwrap_or(0)
    }

    fn write_font(&self, sink: &mut dyn ObjectSink, font_ref: ObjectRef, usage: FontUsage<'_>) -> Result<()> {
        let widths = match usage {
            FontUsage::Cjk { cids } => cid_widths_array(
                cids.iter()
                    .filter(|&&cid| self.widths.contains_key(&cid))
                    .map(|&cid| (cid, self.cid_width(cid))),
            ),
            _ => Object::Array(Vec::new()),
        };

        let descriptor_ref = sink.add_object(self.descriptor.to_object(&self.name, None))?;
        let cid_font = Object::dict([
            ("Type", Object::name("Font")),
            ("Subtype", Object::name("CIDFontType0")),
            ("BaseFont", Object::name(&self.name)),
            (
                "CIDSystemInfo",
                Object::dict([
                    ("Registry", Object::String(b"Adobe".to_vec())),
                    ("Ordering", Object::String(self.ordering.as_bytes().to_vec())),
                    ("Supplement", Object::from(self.supplement)),
                ]),
            ),
            ("FontDescriptor", Object::Reference(descriptor_ref)),
            ("DW", Object::Integer(DEFAULT_WIDTH as i64)),
            ("W", widths),
        ]);
        let cid_ref = sink.add_object(cid_font)?;

        log::debug!("Writing CJK font {} ({}) as {}", self.name, self.cmap, font_ref);
        sink.add_object_at(
            font_ref,
            Object::dict([
                ("Type", Object::name("Font")),
                ("Subtype", Object::name("Type0")),
                ("BaseFont", Object::Name(format!("{}-{}", self.name, self.cmap))),
                ("Encoding", Object::name(&self.cmap)),
                ("DescendantFonts", Object::Array(vec![Object::Reference(cid_ref)])),
            ]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::ObjectCollector;
    use std::collections::BTreeSet;

    fn sample() -> CjkFont {
        CjkFont::st_song_light().with_cids([('\u{4E2D}', 4559, 1000), ('A', 34, 500)])
    }

    #[test]
    fn test_cid_codes() {
        let font = sample();
        assert_eq!(font.cid_code('\u{4E2D}'), 4559);
        assert_eq!(font.cid_code('\u{4E00}'), 0);
        assert_eq!(font.char_width('A'), 500);
        assert_eq!(font.char_width('\u{4E2D}'), 1000);
    }

    #[test]
    fn test_convert_ucs2() {
        assert_eq!(sample().convert_to_bytes("A\u{4E2D}"), vec![0x00, 0x41, 0x4E, 0x2D]);
    }

    #[test]
    fn test_presets() {
        assert_eq!(CjkFont::hei_sei_min_w3().cmap(), "UniJIS-UCS2-H");
        assert_eq!(CjkFont::hygo_thic_medium().postscript_name(), "HYGoThic-Medium");
        assert_eq!(CjkFont::msung_light().cmap(), "UniCNS-UCS2-H");
    }

    #[test]
    fn test_write_font_widths_only_for_used_non_default() {
        let font = sample();
        let cids: BTreeSet<u32> = [34, 4559].into_iter().collect();
        let mut sink = ObjectCollector::new();
        let r = sink.reserve_ref();
        font.write_font(&mut sink, r, FontUsage::Cjk { cids: &cids }).unwrap();

        let dict = sink.get(r).unwrap().as_dict().unwrap();
        assert_eq!(dict.get("BaseFont"), Some(&Object::name("STSong-Light-UniGB-UCS2-H")));
        let cid_ref = dict.get("DescendantFonts").unwrap().as_array().unwrap()[0]
            .as_reference()
            .unwrap();
        let cid_font = sink.get(cid_ref).unwrap().as_dict().unwrap();
        assert_eq!(
            cid_font.get("W"),
            Some(&Object::Array(vec![Object::Integer(34), Object::Array(vec![Object::Integer(500)])]))
        );
    }
}
