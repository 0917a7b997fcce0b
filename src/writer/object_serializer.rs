//! PDF object serialization.
//!
//! Serializes [`Object`] values to PDF syntax (ISO 32000-1:2008, 7.3).

use crate::collections::OrderedTree;
use crate::error::Result;
use crate::object::number::format_real;
use crate::object::{Object, PdfDictionary};
use std::io::Write;

/// Serializer for PDF objects.
#[derive(Debug, Clone, Default)]
pub struct ObjectSerializer {
    /// Whether to use compact formatting (minimal whitespace)
    compact: bool,
}

impl ObjectSerializer {
    /// Serializer that puts each dictionary entry on its own line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compact serializer (minimal whitespace).
    pub fn compact() -> Self {
        Self { compact: true }
    }

    /// Serializer with the given layout.
    pub fn with_compact(compact: bool) -> Self {
        Self { compact }
    }

    /// Serialize an object to bytes.
    pub fn serialize(&self, obj: &Object) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_object(&mut buf, obj)?;
        Ok(buf)
    }

    /// Serialize an object to a string (for debugging).
    pub fn serialize_to_string(&self, obj: &Object) -> Result<String> {
        Ok(String::from_utf8_lossy(&self.serialize(obj)?).into_owned())
    }

    /// Write an indirect object definition:
    /// `{id} {gen} obj\n{object}\nendobj\n`.
    pub fn write_indirect<W: Write>(&self, w: &mut W, id: u32, gen: u16, obj: &Object) -> Result<()> {
        writeln!(w, "{} {} obj", id, gen)?;
        self.write_object(w, obj)?;
        write!(w, "\nendobj\n")?;
        Ok(())
    }

    /// Write an object.
    pub fn write_object<W: Write>(&self, w: &mut W, obj: &Object) -> Result<()> {
        match obj {
            Object::Null => write!(w, "null")?,
            Object::Boolean(b) => write!(w, "{}", if *b { "true" } else { "false" })?,
            Object::Integer(i) => write!(w, "{}", i)?,
            Object::Real(r) => write!(w, "{}", format_real(*r))?,
            Object::String(s) => self.write_string(w, s)?,
            Object::Name(n) => self.write_name(w, n)?,
            Object::Array(arr) => self.write_array(w, arr)?,
            Object::Dictionary(dict) => self.write_dictionary(w, dict)?,
            Object::Stream { dict, data } => self.write_stream(w, dict, data)?,
            Object::Reference(r) => write!(w, "{} {} R", r.id, r.gen)?,
        }
        Ok(())
    }

    /// Literal `(...)` for printable text, hex `<...>` otherwise.
    fn write_string<W: Write>(&self, w: &mut W, data: &[u8]) -> Result<()> {
        let is_printable = data
            .iter()
            .all(|&b| b == b'\n' || b == b'\r' || b == b'\t' || (0x20..=0x7E).contains(&b));

        if is_printable {
            write!(w, "(")?;
            for &byte in data {
                match byte {
                    b'(' => write!(w, "\\(")?,
                    b')' => write!(w, "\\)")?,
                    b'\\' => write!(w, "\\\\")?,
                    b'\n' => write!(w, "\\n")?,
                    b'\r' => write!(w, "\\r")?,
                    b'\t' => write!(w, "\\t")?,
                    _ => w.write_all(&[byte])?,
                }
            }
            write!(w, ")")?;
        } else {
            write!(w, "<")?;
            for byte in data {
                write!(w, "{:02X}", byte)?;
            }
            write!(w, ">")?;
        }
        Ok(())
    }

    /// `/Name`, with delimiters, `#` and bytes outside `!`..`~` escaped as `#xx`.
    fn write_name<W: Write>(&self, w: &mut W, name: &str) -> Result<()> {
        write!(w, "/")?;
        for byte in name.bytes() {
            match byte {
                b'#' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%' => {
                    write!(w, "#{:02X}", byte)?
                },
                b'!'..=b'~' => w.write_all(&[byte])?,
                _ => write!(w, "#{:02X}", byte)?,
            }
        }
        Ok(())
    }

    fn write_array<W: Write>(&self, w: &mut W, arr: &[Object]) -> Result<()> {
        write!(w, "[")?;
        for (i, obj) in arr.iter().enumerate() {
            if i > 0 {
                write!(w, " ")?;
            }
            self.write_object(w, obj)?;
        }
        write!(w, "]")?;
        Ok(())
    }

    /// Keys are written in ascending order.
    fn write_dictionary<W: Write>(&self, w: &mut W, dict: &PdfDictionary) -> Result<()> {
        write!(w, "<<")?;
        let sorted: OrderedTree<&str, &Object> = dict.iter().map(|(k, v)| (k.as_str(), v)).collect();
        for (key, value) in &sorted {
            if !self.compact {
                write!(w, "\n  ")?;
            }
            self.write_name(w, key)?;
            write!(w, " ")?;
            self.write_object(w, value)?;
        }
        if !self.compact && !dict.is_empty() {
            writeln!(w)?;
        }
        write!(w, ">>")?;
        Ok(())
    }

    /// `/Length` is set from the data.
    fn write_stream<W: Write>(&self, w: &mut W, dict: &PdfDictionary, data: &[u8]) -> Result<()> {
        let mut dict_with_length = dict.clone();
        dict_with_length.insert("Length".to_string(), Object::Integer(data.len() as i64));
        self.write_dictionary(w, &dict_with_length)?;
        write!(w, "\nstream\n")?;
        w.write_all(data)?;
        write!(w, "\nendstream")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ObjectRef, PdfRectangle};

    fn text(obj: &Object) -> String {
        ObjectSerializer::compact().serialize_to_string(obj).unwrap()
    }

    #[test]
    fn test_serialize_scalars() {
        assert_eq!(text(&Object::Null), "null");
        assert_eq!(text(&Object::Boolean(false)), "false");
        assert_eq!(text(&Object::Integer(-123)), "-123");
        assert_eq!(text(&Object::Reference(ObjectRef::new(7, 0))), "7 0 R");
    }

    #[test]
    fn test_serialize_real() {
        assert_eq!(text(&Object::Real(3.14258)), "3.14258");
        assert_eq!(text(&Object::Real(1.0)), "1");
        assert_eq!(text(&Object::Real(0.001)), "0.001");
    }

    #[test]
    fn test_serialize_strings() {
        assert_eq!(text(&Object::String(b"Test (parens)".to_vec())), "(Test \\(parens\\))");
        assert_eq!(text(&Object::String(vec![0x00, 0xFF, 0x80])), "<00FF80>");
    }

    #[test]
    fn test_serialize_name_escapes() {
        assert_eq!(text(&Object::name("Name With Space")), "/Name#20With#20Space");
        assert_eq!(text(&Object::name("A#B/C")), "/A#23B#2FC");
        assert_eq!(text(&Object::name("ABCDEF+Helvetica")), "/ABCDEF+Helvetica");
    }

    #[test]
    fn test_dictionary_sorted_keys() {
        let dict = Object::dict([
            ("Type", Object::name("Page")),
            ("Count", Object::Integer(1)),
            ("Kids", Object::Array(vec![])),
        ]);
        assert_eq!(text(&dict), "<</Count 1/Kids []/Type /Page>>");
    }

    #[test]
    fn test_pretty_dictionary() {
        let dict = Object::dict([("A", Object::Integer(1))]);
        let out = ObjectSerializer::new().serialize_to_string(&dict).unwrap();
        assert_eq!(out, "<<\n  /A 1\n>>");
    }

    #[test]
    fn test_stream_length() {
        let stream = Object::stream(PdfDictionary::new(), b"BT ET".to_vec());
        assert_eq!(text(&stream), "<</Length 5>>\nstream\nBT ET\nendstream");
    }

    #[test]
    fn test_rectangle_emits_four_numbers() {
        let rect: Object = PdfRectangle::with_rotation(0.0, 0.0, 100.0, 200.0, 90).into();
        assert_eq!(text(&rect), "[0 0 200 100]");
    }

    #[test]
    fn test_indirect() {
        let mut buf = Vec::new();
        ObjectSerializer::compact()
            .write_indirect(&mut buf, 3, 0, &Object::Integer(5))
            .unwrap();
        assert_eq!(buf, b"3 0 obj\n5\nendobj\n");
    }
}
