//! TrueType glyph subsetting with stable glyph ids.
//!
//! Unused glyphs are emptied rather than removed, so glyph ids in content
//! streams and `/W` arrays stay valid and the CID-to-GID map can remain
//! `/Identity`. Composite glyphs pull in their components.
//!
//! Only the tables a PDF consumer needs are kept: `cvt `, `fpgm`, `glyf`,
//! `head`, `hhea`, `hmtx`, `loca`, `maxp`, `prep`, plus `cmap` for fonts
//! addressed through a single-byte encoding.

use crate::error::{Error, Result};
use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use std::collections::BTreeSet;

const KEPT_TABLES: [&[u8; 4]; 9] = [
    b"cvt ", b"fpgm", b"glyf", b"head", b"hhea", b"hmtx", b"loca", b"maxp", b"prep",
];

// Composite glyph flags.
const ARG_1_AND_2_ARE_WORDS: u16 = 0x0001;
const WE_HAVE_A_SCALE: u16 = 0x0008;
const MORE_COMPONENTS: u16 = 0x0020;
const WE_HAVE_AN_X_AND_Y_SCALE: u16 = 0x0040;
const WE_HAVE_A_TWO_BY_TWO: u16 = 0x0080;

const HEAD_CHECKSUM_ADJUSTMENT: usize = 8;
const HEAD_INDEX_TO_LOC_FORMAT: usize = 50;
const MAXP_NUM_GLYPHS: usize = 4;

/// Subset a TrueType font program.
///
/// `used` holds the glyph ids to keep; glyph 0 is always kept. With
/// `include_cmap` the original `cmap` table is carried over.
pub fn subset_glyphs(data: &[u8], used: &BTreeSet<u16>, include_cmap: bool) -> Result<Vec<u8>> {
    let head = find_table(data, b"head")?;
    let maxp = find_table(data, b"maxp")?;
    let loca = find_table(data, b"loca")?;
    let glyf = find_table(data, b"glyf")?;

    let num_glyphs = read_u16(maxp, MAXP_NUM_GLYPHS)?;
    let loca_format = read_u16(head, HEAD_INDEX_TO_LOC_FORMAT)? as i16;
    let offsets = parse_loca(loca, loca_format, num_glyphs)?;

    let mut keep: BTreeSet<u16> = BTreeSet::new();
    keep.insert(0);
    for &gid in used {
        if gid < num_glyphs {
            keep.insert(gid);
        }
    }
    let roots: Vec<u16> = keep.iter().copied().collect();
    for gid in roots {
        collect_composite_deps(glyf, &offsets, gid, &mut keep)?;
    }

    let (new_glyf, new_offsets) = rebuild_glyf(glyf, &offsets, &keep);
    let new_format: i16 = if new_glyf.len() > 0x1FFFE { 1 } else { 0 };
    let new_loca = build_loca(&new_offsets, new_format);

    let mut new_head = head.to_vec();
    if new_head.len() < HEAD_INDEX_TO_LOC_FORMAT + 2 {
        return Err(Error::Font("head table too short".to_string()));
    }
    BigEndian::write_u32(&mut new_head[HEAD_CHECKSUM_ADJUSTMENT..], 0);
    BigEndian::write_i16(&mut new_head[HEAD_INDEX_TO_LOC_FORMAT..], new_format);

    let mut tables: Vec<([u8; 4], Vec<u8>)> = Vec::new();
    for tag in KEPT_TABLES {
        let body = match tag {
            b"glyf" => new_glyf.clone(),
            b"loca" => new_loca.clone(),
            b"head" => new_head.clone(),
            _ => match find_table(data, tag) {
                Ok(table) => table.to_vec(),
                Err(_) => continue,
            },
        };
        tables.push((*tag, body));
    }
    if include_cmap {
        tables.push((*b"cmap", find_table(data, b"cmap")?.to_vec()));
    }
    tables.sort_by(|a, b| a.0.cmp(&b.0));

    log::debug!(
        "Subset font program: kept {} of {} glyphs, glyf {} -> {} bytes",
        keep.len(),
        num_glyphs,
        glyf.len(),
        new_glyf.len()
    );
    write_font_file(&tables)
}

/// Locate a table in the table directory.
pub fn find_table<'a>(data: &'a [u8], tag: &[u8; 4]) -> Result<&'a [u8]> {
    let num_tables = read_u16(data, 4)? as usize;
    for i in 0..num_tables {
        let record = 12 + i * 16;
        let name = data
            .get(record..record + 4)
            .ok_or_else(|| truncated("table directory"))?;
        if name == tag {
            let offset = read_u32(data, record + 8)? as usize;
            let length = read_u32(data, record + 12)? as usize;
            return data
                .get(offset..offset + length)
                .ok_or_else(|| truncated(&String::from_utf8_lossy(tag)));
        }
    }
    Err(Error::Font(format!(
        "missing {} table",
        String::from_utf8_lossy(tag).trim_end()
    )))
}

fn parse_loca(loca: &[u8], format: i16, num_glyphs: u16) -> Result<Vec<u32>> {
    let count = num_glyphs as usize + 1;
    let mut offsets = Vec::with_capacity(count);
    for i in 0..count {
        let offset = if format == 0 {
            read_u16(loca, i * 2)? as u32 * 2
        } else {
            read_u32(loca, i * 4)?
        };
        offsets.push(offset);
    }
    Ok(offsets)
}

fn glyph_range(offsets: &[u32], gid: u16) -> Option<(usize, usize)> {
    let idx = gid as usize;
    let start = *offsets.get(idx)? as usize;
    let end = *offsets.get(idx + 1)? as usize;
    (start < end).then_some((start, end))
}

fn collect_composite_deps(
    glyf: &[u8],
    offsets: &[u32],
    gid: u16,
    keep: &mut BTreeSet<u16>,
) -> Result<()> {
    let Some((start, end)) = glyph_range(offsets, gid) else {
        return Ok(());
    };
    let glyph = glyf
        .get(start..end)
        .ok_or_else(|| truncated("glyf"))?;
    if glyph.len() < 10 || BigEndian::read_i16(glyph) >= 0 {
        return Ok(());
    }

    let mut pos = 10;
    loop {
        let flags = read_u16(glyph, pos)?;
        let component = read_u16(glyph, pos + 2)?;
        pos += 4;
        if keep.insert(component) {
            collect_composite_deps(glyf, offsets, component, keep)?;
        }
        pos += if flags & ARG_1_AND_2_ARE_WORDS != 0 { 4 } else { 2 };
        if flags & WE_HAVE_A_SCALE != 0 {
            pos += 2;
        } else if flags & WE_HAVE_AN_X_AND_Y_SCALE != 0 {
            pos += 4;
        } else if flags & WE_HAVE_A_TWO_BY_TWO != 0 {
            pos += 8;
        }
        if flags & MORE_COMPONENTS == 0 {
            break;
        }
    }
    Ok(())
}

/// Copy kept glyphs in id order; dropped glyphs get zero length.
fn rebuild_glyf(glyf: &[u8], offsets: &[u32], keep: &BTreeSet<u16>) -> (Vec<u8>, Vec<u32>) {
    let num_glyphs = offsets.len().saturating_sub(1);
    let mut out = Vec::new();
    let mut new_offsets = Vec::with_capacity(offsets.len());
    for gid in 0..num_glyphs {
        new_offsets.push(out.len() as u32);
        if !keep.contains(&(gid as u16)) {
            continue;
        }
        if let Some((start, end)) = glyph_range(offsets, gid as u16) {
            if let Some(glyph) = glyf.get(start..end) {
                out.extend_from_slice(glyph);
                while out.len() % 4 != 0 {
                    out.push(0);
                }
            }
        }
    }
    new_offsets.push(out.len() as u32);
    (out, new_offsets)
}

fn build_loca(offsets: &[u32], format: i16) -> Vec<u8> {
    let mut out = Vec::with_capacity(offsets.len() * if format == 0 { 2 } else { 4 });
    for &offset in offsets {
        // Writing into a Vec cannot fail.
        let _ = if format == 0 {
            out.write_u16::<BigEndian>((offset / 2) as u16)
        } else {
            out.write_u32::<BigEndian>(offset)
        };
    }
    out
}

fn table_checksum(data: &[u8]) -> u32 {
    let mut sum: u32 = 0;
    let mut chunks = data.chunks_exact(4);
    for chunk in &mut chunks {
        sum = sum.wrapping_add(BigEndian::read_u32(chunk));
    }
    let rest = chunks.remainder();
    if !rest.is_empty() {
        let mut last = [0u8; 4];
        last[..rest.len()].copy_from_slice(rest);
        sum = sum.wrapping_add(u32::from_be_bytes(last));
    }
    sum
}

fn write_font_file(tables: &[([u8; 4], Vec<u8>)]) -> Result<Vec<u8>> {
    let num_tables = tables.len() as u16;
    let mut entry_selector = 0u16;
    while (1u16 << (entry_selector + 1)) <= num_tables {
        entry_selector += 1;
    }
    let search_range = (1u16 << entry_selector) * 16;
    let range_shift = num_tables * 16 - search_range;

    let mut out: Vec<u8> = Vec::new();
    out.write_u32::<BigEndian>(0x0001_0000)?;
    out.write_u16::<BigEndian>(num_tables)?;
    out.write_u16::<BigEndian>(search_range)?;
    out.write_u16::<BigEndian>(entry_selector)?;
    out.write_u16::<BigEndian>(range_shift)?;

    let mut offset = 12 + tables.len() * 16;
    let mut head_offset = None;
    for (tag, body) in tables {
        if tag == b"head" {
            head_offset = Some(offset);
        }
        out.extend_from_slice(tag);
        out.write_u32::<BigEndian>(table_checksum(body))?;
        out.write_u32::<BigEndian>(offset as u32)?;
        out.write_u32::<BigEndian>(body.len() as u32)?;
        offset += (body.len() + 3) & !3;
    }
    for (_, body) in tables {
        out.extend_from_slice(body);
        while out.len() % 4 != 0 {
            out.push(0);
        }
    }

    if let Some(head) = head_offset {
        let adjustment = 0xB1B0_AFBAu32.wrapping_sub(table_checksum(&out));
        BigEndian::write_u32(&mut out[head + HEAD_CHECKSUM_ADJUSTMENT..], adjustment);
    }
    Ok(out)
}

fn truncated(what: &str) -> Error {
    Error::Font(format!("truncated {what} data"))
}

fn read_u16(data: &[u8], offset: usize) -> Result<u16> {
    data.get(offset..offset + 2)
        .map(BigEndian::read_u16)
        .ok_or_else(|| truncated("font"))
}

fn read_u32(data: &[u8], offset: usize) -> Result<u32> {
    data.get(offset..offset + 4)
        .map(BigEndian::read_u32)
        .ok_or_else(|| truncated("font"))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Minimal font: three glyphs, glyph 2 a composite of glyph 1.
    pub(crate) fn tiny_font() -> Vec<u8> {
        let simple: Vec<u8> = vec![0, 1, 0, 0, 0, 0, 0, 10, 0, 10, 0, 0];
        let mut composite: Vec<u8> = vec![0xFF, 0xFF, 0, 0, 0, 0, 0, 10, 0, 10];
        composite.extend_from_slice(&[0x00, 0x00, 0x00, 0x01, 0x00, 0x00]);
        while composite.len() % 4 != 0 {
            composite.push(0);
        }
        let mut glyf = Vec::new();
        glyf.extend_from_slice(&simple);
        let g2 = glyf.len();
        glyf.extend_from_slice(&composite);
        // glyph 0 empty, glyph 1 simple, glyph 2 composite
        let loca_offsets = [0u32, 0, g2 as u32, glyf.len() as u32];
        let loca = build_loca(&loca_offsets, 0);

        let mut head = vec![0u8; 54];
        BigEndian::write_u16(&mut head[HEAD_INDEX_TO_LOC_FORMAT..], 0);
        let mut maxp = vec![0u8; 6];
        BigEndian::write_u32(&mut maxp, 0x0000_5000);
        BigEndian::write_u16(&mut maxp[MAXP_NUM_GLYPHS..], 3);
        let hhea = vec![0u8; 36];
        let hmtx = vec![0u8; 12];
        let cmap = vec![0u8; 4];

        let tables = vec![
            (*b"cmap", cmap),
            (*b"glyf", glyf),
            (*b"head", head),
            (*b"hhea", hhea),
            (*b"hmtx", hmtx),
            (*b"loca", loca),
            (*b"maxp", maxp),
        ];
        write_font_file(&tables).unwrap()
    }

    fn glyph_lengths(font: &[u8]) -> Vec<u32> {
        let head = find_table(font, b"head").unwrap();
        let format = BigEndian::read_i16(&head[HEAD_INDEX_TO_LOC_FORMAT..]);
        let loca = find_table(font, b"loca").unwrap();
        let offsets = parse_loca(loca, format, 3).unwrap();
        offsets.windows(2).map(|w| w[1] - w[0]).collect()
    }

    #[test]
    fn test_find_table() {
        let font = tiny_font();
        assert_eq!(find_table(&font, b"hhea").unwrap().len(), 36);
        assert!(find_table(&font, b"OS/2").is_err());
    }

    #[test]
    fn test_unused_glyph_emptied() {
        let font = tiny_font();
        let used: BTreeSet<u16> = BTreeSet::new();
        let subset = subset_glyphs(&font, &used, false).unwrap();
        assert_eq!(glyph_lengths(&subset), vec![0, 0, 0]);
        assert!(find_table(&subset, b"cmap").is_err());
    }

    #[test]
    fn test_composite_keeps_component() {
        let font = tiny_font();
        let used: BTreeSet<u16> = [2].into_iter().collect();
        let subset = subset_glyphs(&font, &used, true).unwrap();
        let lengths = glyph_lengths(&subset);
        assert_eq!(lengths[0], 0);
        assert!(lengths[1] > 0);
        assert!(lengths[2] > 0);
        assert!(find_table(&subset, b"cmap").is_ok());
    }

    #[test]
    fn test_checksum_adjustment() {
        let font = tiny_font();
        let used: BTreeSet<u16> = [1].into_iter().collect();
        let subset = subset_glyphs(&font, &used, false).unwrap();
        assert_eq!(table_checksum(&subset), 0xB1B0_AFBA);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(subset_glyphs(b"nope", &BTreeSet::new(), false).is_err());
    }

    #[test]
    fn test_table_checksum_partial_word() {
        assert_eq!(table_checksum(b"ABCD"), 0x4142_4344);
        assert_eq!(table_checksum(b"AB"), 0x4142_0000);
    }
}
