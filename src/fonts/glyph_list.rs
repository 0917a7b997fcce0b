//! Adobe glyph names and their Unicode values.
//!
//! A built-in table covers the Latin, WinAnsi and common symbol names.
//! Algorithmic names (`uniXXXX`, `uXXXX` to `uXXXXXX`) are decoded without
//! a table, and extra `glyphlist.txt`-format data can be layered on top
//! with [`GlyphList::parse`].

use crate::error::{Error, Result};
use phf::phf_map;
use std::collections::HashMap;
use std::sync::OnceLock;

static BUILTIN_GLYPHS: phf::Map<&'static str, u32> = phf_map! {
    "space" => 0x0020,
    "exclam" => 0x0021,
    "quotedbl" => 0x0022,
    "numbersign" => 0x0023,
    "dollar" => 0x0024,
    "percent" => 0x0025,
    "ampersand" => 0x0026,
    "quotesingle" => 0x0027,
    "parenleft" => 0x0028,
    "parenright" => 0x0029,
    "asterisk" => 0x002A,
    "plus" => 0x002B,
    "comma" => 0x002C,
    "hyphen" => 0x002D,
    "period" => 0x002E,
    "slash" => 0x002F,
    "zero" => 0x0030,
    "one" => 0x0031,
    "two" => 0x0032,
    "three" => 0x0033,
    "four" => 0x0034,
    "five" => 0x0035,
    "six" => 0x0036,
    "seven" => 0x0037,
    "eight" => 0x0038,
    "nine" => 0x0039,
    "colon" => 0x003A,
    "semicolon" => 0x003B,
    "less" => 0x003C,
    "equal" => 0x003D,
    "greater" => 0x003E,
    "question" => 0x003F,
    "at" => 0x0040,
    "A" => 0x0041,
    "B" => 0x0042,
    "C" => 0x0043,
    "D" => 0x0044,
    "E" => 0x0045,
    "F" => 0x0046,
    "G" => 0x0047,
    "H" => 0x0048,
    "I" => 0x0049,
    "J" => 0x004A,
    "K" => 0x004B,
    "L" => 0x004C,
    "M" => 0x004D,
    "N" => 0x004E,
    "O" => 0x004F,
    "P" => 0x0050,
    "Q" => 0x0051,
    "R" => 0x0052,
    "S" => 0x0053,
    "T" => 0x0054,
    "U" => 0x0055,
    "V" => 0x0056,
    "W" => 0x0057,
    "X" => 0x0058,
    "Y" => 0x0059,
    "Z" => 0x005A,
    "bracketleft" => 0x005B,
    "backslash" => 0x005C,
    "bracketright" => 0x005D,
    "asciicircum" => 0x005E,
    "underscore" => 0x005F,
    "grave" => 0x0060,
    "a" => 0x0061,
    "b" => 0x0062,
    "c" => 0x0063,
    "d" => 0x0064,
    "e" => 0x0065,
    "f" => 0x0066,
    "g" => 0x0067,
    "h" => 0x0068,
    "i" => 0x0069,
    "j" => 0x006A,
    "k" => 0x006B,
    "l" => 0x006C,
    "m" => 0x006D,
    "n" => 0x006E,
    "o" => 0x006F,
    "p" => 0x0070,
    "q" => 0x0071,
    "r" => 0x0072,
    "s" => 0x0073,
    "t" => 0x0074,
    "u" => 0x0075,
    "v" => 0x0076,
    "w" => 0x0077,
    "x" => 0x0078,
    "y" => 0x0079,
    "z" => 0x007A,
    "braceleft" => 0x007B,
    "bar" => 0x007C,
    "braceright" => 0x007D,
    "asciitilde" => 0x007E,
    "nbspace" => 0x00A0,
    "exclamdown" => 0x00A1,
    "cent" => 0x00A2,
    "sterling" => 0x00A3,
    "currency" => 0x00A4,
    "yen" => 0x00A5,
    "brokenbar" => 0x00A6,
    "section" => 0x00A7,
    "dieresis" => 0x00A8,
    "copyright" => 0x00A9,
    "ordfeminine" => 0x00AA,
    "guillemotleft" => 0x00AB,
    "logicalnot" => 0x00AC,
    "sfthyphen" => 0x00AD,
    "registered" => 0x00AE,
    "macron" => 0x00AF,
    "degree" => 0x00B0,
    "plusminus" => 0x00B1,
    "twosuperior" => 0x00B2,
    "threesuperior" => 0x00B3,
    "acute" => 0x00B4,
    "mu" => 0x00B5,
    "paragraph" => 0x00B6,
    "periodcentered" => 0x00B7,
    "cedilla" => 0x00B8,
    "onesuperior" => 0x00B9,
    "ordmasculine" => 0x00BA,
    "guillemotright" => 0x00BB,
    "onequarter" => 0x00BC,
    "onehalf" => 0x00BD,
    "threequarters" => 0x00BE,
    "questiondown" => 0x00BF,
    "Agrave" => 0x00C0,
    "Aacute" => 0x00C1,
    "Acircumflex" => 0x00C2,
    "Atilde" => 0x00C3,
    "Adieresis" => 0x00C4,
    "Aring" => 0x00C5,
    "AE" => 0x00C6,
    "Ccedilla" => 0x00C7,
    "Egrave" => 0x00C8,
    "Eacute" => 0x00C9,
    "Ecircumflex" => 0x00CA,
    "Edieresis" => 0x00CB,
    "Igrave" => 0x00CC,
    "Iacute" => 0x00CD,
    "Icircumflex" => 0x00CE,
    "Idieresis" => 0x00CF,
    "Eth" => 0x00D0,
    "Ntilde" => 0x00D1,
    "Ograve" => 0x00D2,
    "Oacute" => 0x00D3,
    "Ocircumflex" => 0x00D4,
    "Otilde" => 0x00D5,
    "Odieresis" => 0x00D6,
    "multiply" => 0x00D7,
    "Oslash" => 0x00D8,
    "Ugrave" => 0x00D9,
    "Uacute" => 0x00DA,
    "Ucircumflex" => 0x00DB,
    "Udieresis" => 0x00DC,
    "Yacute" => 0x00DD,
    "Thorn" => 0x00DE,
    "germandbls" => 0x00DF,
    "agrave" => 0x00E0,
    "aacute" => 0x00E1,
    "acircumflex" => 0x00E2,
    "atilde" => 0x00E3,
    "adieresis" => 0x00E4,
    "aring" => 0x00E5,
    "ae" => 0x00E6,
    "ccedilla" => 0x00E7,
    "egrave" => 0x00E8,
    "eacute" => 0x00E9,
    "ecircumflex" => 0x00EA,
    "edieresis" => 0x00EB,
    "igrave" => 0x00EC,
    "iacute" => 0x00ED,
    "icircumflex" => 0x00EE,
    "idieresis" => 0x00EF,
    "eth" => 0x00F0,
    "ntilde" => 0x00F1,
    "ograve" => 0x00F2,
    "oacute" => 0x00F3,
    "ocircumflex" => 0x00F4,
    "otilde" => 0x00F5,
    "odieresis" => 0x00F6,
    "divide" => 0x00F7,
    "oslash" => 0x00F8,
    "ugrave" => 0x00F9,
    "uacute" => 0x00FA,
    "ucircumflex" => 0x00FB,
    "udieresis" => 0x00FC,
    "yacute" => 0x00FD,
    "thorn" => 0x00FE,
    "ydieresis" => 0x00FF,
    "Euro" => 0x20AC,
    "quotesinglbase" => 0x201A,
    "florin" => 0x0192,
    "quotedblbase" => 0x201E,
    "ellipsis" => 0x2026,
    "dagger" => 0x2020,
    "daggerdbl" => 0x2021,
    "circumflex" => 0x02C6,
    "perthousand" => 0x2030,
    "Scaron" => 0x0160,
    "guilsinglleft" => 0x2039,
    "OE" => 0x0152,
    "Zcaron" => 0x017D,
    "quoteleft" => 0x2018,
    "quoteright" => 0x2019,
    "quotedblleft" => 0x201C,
    "quotedblright" => 0x201D,
    "bullet" => 0x2022,
    "endash" => 0x2013,
    "emdash" => 0x2014,
    "tilde" => 0x02DC,
    "trademark" => 0x2122,
    "scaron" => 0x0161,
    "guilsinglright" => 0x203A,
    "oe" => 0x0153,
    "zcaron" => 0x017E,
    "Ydieresis" => 0x0178,
    "fi" => 0xFB01,
    "fl" => 0xFB02,
    "dotlessi" => 0x0131,
    "Lslash" => 0x0141,
    "lslash" => 0x0142,
    "minus" => 0x2212,
    "fraction" => 0x2044,
    "breve" => 0x02D8,
    "dotaccent" => 0x02D9,
    "ring" => 0x02DA,
    "ogonek" => 0x02DB,
    "hungarumlaut" => 0x02DD,
    "caron" => 0x02C7,
    "alpha" => 0x03B1,
    "beta" => 0x03B2,
    "gamma" => 0x03B3,
    "delta" => 0x03B4,
    "epsilon" => 0x03B5,
    "theta" => 0x03B8,
    "lambda" => 0x03BB,
    "pi" => 0x03C0,
    "sigma" => 0x03C3,
    "omega" => 0x03C9,
    "Gamma" => 0x0393,
    "Theta" => 0x0398,
    "Lambda" => 0x039B,
    "Pi" => 0x03A0,
    "Sigma" => 0x03A3,
    "Phi" => 0x03A6,
    "Psi" => 0x03A8,
    "Omega" => 0x2126,
    "Delta" => 0x2206,
    "infinity" => 0x221E,
    "notequal" => 0x2260,
    "lessequal" => 0x2264,
    "greaterequal" => 0x2265,
    "summation" => 0x2211,
    "product" => 0x220F,
    "radical" => 0x221A,
    "integral" => 0x222B,
    "partialdiff" => 0x2202,
    "lozenge" => 0x25CA,
    "approxequal" => 0x2248,
    "arrowleft" => 0x2190,
    "arrowup" => 0x2191,
    "arrowright" => 0x2192,
    "arrowdown" => 0x2193,
    "arrowboth" => 0x2194,
    "heart" => 0x2665,
    "spade" => 0x2660,
    "club" => 0x2663,
    "diamond" => 0x2666,
};

fn builtin_reverse() -> &'static HashMap<u32, &'static str> {
    static REVERSE: OnceLock<HashMap<u32, &'static str>> = OnceLock::new();
    REVERSE.get_or_init(|| BUILTIN_GLYPHS.entries().map(|(name, &u)| (u, *name)).collect())
}

/// Decode algorithmic glyph names.
fn algorithmic_unicode(name: &str) -> Option<u32> {
    let hex = if let Some(rest) = name.strip_prefix("uni") {
        if rest.len() != 4 {
            return None;
        }
        rest
    } else if let Some(rest) = name.strip_prefix('u') {
        if !(4..=6).contains(&rest.len()) {
            return None;
        }
        rest
    } else {
        return None;
    };
    let code = u32::from_str_radix(hex, 16).ok()?;
    char::from_u32(code).map(|c| c as u32)
}

/// Unicode value of a glyph name from the built-in table.
pub fn name_to_unicode(name: &str) -> Option<u32> {
    BUILTIN_GLYPHS
        .get(name)
        .copied()
        .or_else(|| algorithmic_unicode(name))
}

/// Glyph name of a Unicode value from the built-in table.
pub fn unicode_to_name(unicode: u32) -> Option<&'static str> {
    builtin_reverse().get(&unicode).copied()
}

/// Name for `unicode`, falling back to the `uniXXXX` / `uXXXXX` form.
pub fn glyph_name_or_algorithmic(unicode: u32) -> String {
    match unicode_to_name(unicode) {
        Some(name) => name.to_string(),
        None if unicode <= 0xFFFF => format!("uni{:04X}", unicode),
        None => format!("u{:X}", unicode),
    }
}

/// Glyph table loaded from `glyphlist.txt` data, consulted before the
/// built-in table.
#[derive(Debug, Clone, Default)]
pub struct GlyphList {
    names: HashMap<String, u32>,
    unicodes: HashMap<u32, String>,
}

impl GlyphList {
    /// Parse `name;XXXX` lines. `#` lines are comments; a line with a
    /// name but no code is skipped.
    pub fn parse(source: &str) -> Result<Self> {
        let mut list = Self::default();
        for (lineno, line) in source.lines().enumerate() {
            if line.starts_with('#') {
                continue;
            }
            let mut fields = line
                .split(|c: char| c == ';' || c.is_whitespace())
                .filter(|f| !f.is_empty());
            let (Some(name), Some(hex)) = (fields.next(), fields.next()) else {
                continue;
            };
            let code = u32::from_str_radix(hex, 16).map_err(|_| {
                Error::InvalidArgument(format!("glyph list line {}: bad code {hex:?}", lineno + 1))
            })?;
            list.insert(name, code);
        }
        Ok(list)
    }

    /// Add or replace one mapping.
    pub fn insert(&mut self, name: &str, unicode: u32) {
        self.names.insert(name.to_string(), unicode);
        self.unicodes.insert(unicode, name.to_string());
    }

    /// Number of loaded mappings.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing was loaded.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Unicode value for `name`.
    pub fn name_to_unicode(&self, name: &str) -> Option<u32> {
        self.names
            .get(name)
            .copied()
            .or_else(|| name_to_unicode(name))
    }

    /// Glyph name for `unicode`.
    pub fn unicode_to_name(&self, unicode: u32) -> Option<&str> {
        self.unicodes
            .get(&unicode)
            .map(String::as_str)
            .or_else(|| unicode_to_name(unicode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(name_to_unicode("A"), Some(0x41));
        assert_eq!(name_to_unicode("Euro"), Some(0x20AC));
        assert_eq!(name_to_unicode("eacute"), Some(0xE9));
        assert_eq!(name_to_unicode("nosuchglyph"), None);
    }

    #[test]
    fn test_reverse_lookup() {
        assert_eq!(unicode_to_name(0x20), Some("space"));
        assert_eq!(unicode_to_name(0xFB01), Some("fi"));
        assert_eq!(unicode_to_name(0x4E2D), None);
    }

    #[test]
    fn test_algorithmic_names() {
        assert_eq!(name_to_unicode("uni4E2D"), Some(0x4E2D));
        assert_eq!(name_to_unicode("u1F600"), Some(0x1F600));
        assert_eq!(name_to_unicode("uniD800"), None);
        assert_eq!(name_to_unicode("uni12"), None);
        assert_eq!(glyph_name_or_algorithmic(0x4E2D), "uni4E2D");
        assert_eq!(glyph_name_or_algorithmic(0x1F600), "u1F600");
    }

    #[test]
    fn test_parse_glyph_list() {
        let list = GlyphList::parse("# comment\nAmacron;0100\nlonely\nEng 014A\n").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.name_to_unicode("Amacron"), Some(0x100));
        assert_eq!(list.unicode_to_name(0x14A), Some("Eng"));
        // falls back to the built-in table
        assert_eq!(list.name_to_unicode("B"), Some(0x42));
    }

    #[test]
    fn test_parse_bad_code() {
        let err = GlyphList::parse("bad;zzzz").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
