//! Fonts and font usage tracking.
//!
//! - [`BaseFont`] implementations describe font programs: the standard
//!   Type 1 fonts, embedded TrueType fonts (single byte or glyph
//!   addressed), CJK fonts over predefined CMaps, Type 3 fonts and fonts
//!   copied from other documents
//! - [`FontDetails`] records, per document, which glyphs were shown and
//!   writes the font dictionary once at the end
//! - [`glyph_list`] maps glyph names to Unicode

pub mod base_font;
pub mod cjk;
pub mod encoding;
pub mod font_details;
pub mod font_subsetter;
pub mod glyph_list;
pub mod truetype;
pub mod truetype_subset;
pub mod type1;
pub mod type3;

pub use base_font::{BaseFont, FontDescriptor, FontFlags, FontType, FontUsage, GlyphMetric, UsedGlyph};
pub use cjk::CjkFont;
pub use font_details::FontDetails;
pub use font_subsetter::FontSubsetter;
pub use glyph_list::GlyphList;
pub use truetype::{TrueTypeFont, TrueTypeUnicodeFont};
pub use type1::{Type1Font, STANDARD_14};
pub use type3::{DocumentFont, Type3Font};
