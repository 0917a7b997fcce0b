//! Text encodings used when converting strings to font codes.
//!
//! - WinAnsi for single-byte Type 1 and TrueType fonts
//! - the symbol page (`U+F000..U+F0FF`) for symbolic TrueType fonts
//! - UTF-16BE code units for CJK fonts using a UCS-2 CMap

/// Target encoding of [`convert_to_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Windows-1252, one byte per character.
    WinAnsi,
    /// Symbolic TrueType: characters `0x00..=0xFF` or `0xF000..=0xF0FF`,
    /// one byte per character.
    SymbolTT,
    /// UTF-16BE code units, no byte order mark.
    Utf16Be,
}

/// Encode `text`; characters the encoding cannot express are dropped.
pub fn convert_to_bytes(text: &str, encoding: TextEncoding) -> Vec<u8> {
    match encoding {
        TextEncoding::WinAnsi => text
            .chars()
            .filter_map(|c| unicode_to_winansi(c as u32))
            .collect(),
        TextEncoding::SymbolTT => text
            .chars()
            .filter_map(|c| {
                let cp = c as u32;
                if cp < 0x100 || (0xF000..=0xF0FF).contains(&cp) {
                    Some((cp & 0xff) as u8)
                } else {
                    None
                }
            })
            .collect(),
        TextEncoding::Utf16Be => {
            let mut out = Vec::with_capacity(text.len() * 2);
            for unit in text.encode_utf16() {
                out.extend_from_slice(&unit.to_be_bytes());
            }
            out
        },
    }
}

const WINANSI_HIGH: [(u32, u8); 27] = [
    (0x20AC, 0x80), // Euro sign
    (0x201A, 0x82), // Single low-9 quotation mark
    (0x0192, 0x83), // Latin small letter f with hook
    (0x201E, 0x84), // Double low-9 quotation mark
    (0x2026, 0x85), // Horizontal ellipsis
    (0x2020, 0x86), // Dagger
    (0x2021, 0x87), // Double dagger
    (0x02C6, 0x88), // Modifier letter circumflex accent
    (0x2030, 0x89), // Per mille sign
    (0x0160, 0x8A), // Latin capital letter S with caron
    (0x2039, 0x8B), // Single left-pointing angle quotation mark
    (0x0152, 0x8C), // Latin capital ligature OE
    (0x017D, 0x8E), // Latin capital letter Z with caron
    (0x2018, 0x91), // Left single quotation mark
    (0x2019, 0x92), // Right single quotation mark
    (0x201C, 0x93), // Left double quotation mark
    (0x201D, 0x94), // Right double quotation mark
    (0x2022, 0x95), // Bullet
    (0x2013, 0x96), // En dash
    (0x2014, 0x97), // Em dash
    (0x02DC, 0x98), // Small tilde
    (0x2122, 0x99), // Trade mark sign
    (0x0161, 0x9A), // Latin small letter s with caron
    (0x203A, 0x9B), // Single right-pointing angle quotation mark
    (0x0153, 0x9C), // Latin small ligature oe
    (0x017E, 0x9E), // Latin small letter z with caron
    (0x0178, 0x9F), // Latin capital letter Y with diaeresis
];

/// Map a Unicode code point to its WinAnsi byte.
pub fn unicode_to_winansi(codepoint: u32) -> Option<u8> {
    if codepoint < 0x80 || (0xA0..=0xFF).contains(&codepoint) {
        return Some(codepoint as u8);
    }
    WINANSI_HIGH
        .iter()
        .find(|&&(u, _)| u == codepoint)
        .map(|&(_, b)| b)
}

/// Map a WinAnsi byte back to Unicode. Unassigned bytes yield `None`.
pub fn winansi_to_unicode(byte: u8) -> Option<u32> {
    if byte < 0x80 || byte >= 0xA0 {
        return Some(byte as u32);
    }
    WINANSI_HIGH
        .iter()
        .find(|&&(_, b)| b == byte)
        .map(|&(u, _)| u)
}

/// Check if a character can be encoded in WinAnsi.
pub fn is_winansi_char(ch: char) -> bool {
    unicode_to_winansi(ch as u32).is_some()
}

/// PDF text string bytes: plain bytes for Latin-1 text, UTF-16BE with a
/// byte order mark otherwise.
pub fn text_string_bytes(text: &str) -> Vec<u8> {
    if text.chars().all(|c| (c as u32) < 0x80) {
        return text.as_bytes().to_vec();
    }
    let mut out = vec![0xFE, 0xFF];
    out.extend(convert_to_bytes(text, TextEncoding::Utf16Be));
    out
}

fn escape_byte_for_literal(b: u8, out: &mut String) {
    match b {
        b'(' => out.push_str("\\("),
        b')' => out.push_str("\\)"),
        b'\\' => out.push_str("\\\\"),
        0x0A => out.push_str("\\n"),
        0x0D => out.push_str("\\r"),
        0x09 => out.push_str("\\t"),
        0x08 => out.push_str("\\b"),
        0x0C => out.push_str("\\f"),
        b if (0x20..0x7F).contains(&b) => out.push(b as char),
        b => out.push_str(&format!("\\{:03o}", b)),
    }
}

/// Encode bytes as PDF literal string with proper escaping.
pub fn encode_bytes_as_literal(bytes: &[u8]) -> String {
    let mut result = String::with_capacity(bytes.len() * 2 + 2);
    result.push('(');
    for &b in bytes {
        escape_byte_for_literal(b, &mut result);
    }
    result.push(')');
    result
}

/// Encode bytes as PDF hex string.
pub fn encode_bytes_as_hex(bytes: &[u8]) -> String {
    let mut result = String::with_capacity(bytes.len() * 2 + 2);
    result.push('<');
    for b in bytes {
        result.push_str(&format!("{:02X}", b));
    }
    result.push('>');
    result
}
