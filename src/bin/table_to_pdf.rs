//! Write a demo table to a PDF
//!
//! Lays out a small table with a header row, draws it on an A4 page and
//! writes the document.
//!
//! Usage:
//!   cargo run --bin table_to_pdf -- out.pdf
//!   cargo run --bin table_to_pdf -- out.pdf --font DejaVuSans.ttf --compress --rotate 90

use pdfgen_core::fonts::{BaseFont, TrueTypeUnicodeFont, Type1Font};
use pdfgen_core::geometry::Rectangle;
use pdfgen_core::hyphenation::HyphenationTree;
use pdfgen_core::table::{Cell, PdfTable, Table};
use pdfgen_core::writer::PdfWriter;
use pdfgen_core::{PdfConfig, Result};
use std::path::PathBuf;
use std::sync::Arc;

const PATTERNS: &str = r"\patterns{ .ta4 a1b 4b1l 1ta n1e e1n 4ble }";

struct RunConfig {
    output: PathBuf,
    font: Option<PathBuf>,
    compress: bool,
    rotation: i32,
}

impl RunConfig {
    fn from_args() -> Option<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut output = None;
        let mut font = None;
        let mut compress = false;
        let mut rotation = 0;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--font" => {
                    i += 1;
                    font = args.get(i).map(PathBuf::from);
                },
                "--rotate" => {
                    i += 1;
                    rotation = args.get(i).and_then(|r| r.parse().ok()).unwrap_or(0);
                },
                "--compress" => compress = true,
                other => output = Some(PathBuf::from(other)),
            }
            i += 1;
        }

        Some(Self {
            output: output?,
            font,
            compress,
            rotation,
        })
    }
}

fn build_table(rows: &[(&str, &str, &str)]) -> Result<Table> {
    let mut table = Table::new(3)?
        .with_widths(vec![3.0, 1.0, 1.0])?
        .with_width_percentage(90.0)
        .with_cellpadding(4.0);
    table.add_row([
        Cell::header("Item").height(14.0),
        Cell::header("Qty").height(14.0),
        Cell::header("Price").height(14.0),
    ])?;
    table.end_headers();
    for (item, qty, price) in rows {
        table.add_row([
            Cell::text(*item).height(14.0),
            Cell::text(*qty).height(14.0),
            Cell::text(*price).height(14.0),
        ])?;
    }
    table.add_cell(Cell::text("Total").colspan(2).height(14.0))?;
    table.add_cell(Cell::text("42.50").height(14.0))?;
    Ok(table)
}

fn run(config: &RunConfig) -> Result<()> {
    let pdf_config = PdfConfig::new().with_compress(config.compress);
    let mut writer = PdfWriter::with_config(pdf_config.clone());
    writer.set_title("Table demo");
    let page_size = Rectangle::a4();
    let page = writer.add_page(page_size, config.rotation)?;

    let font: Arc<dyn BaseFont> = match &config.font {
        Some(path) => Arc::new(TrueTypeUnicodeFont::from_file(path)?),
        None => Arc::new(Type1Font::helvetica()),
    };
    let font = writer.add_font(font);

    let table = build_table(&[("Notebook", "2", "7.00"), ("Fountain pen", "1", "31.00"), ("Ink", "3", "4.50")])?;
    let layout = PdfTable::new(table, 36.0, page_size.width() - 36.0, page_size.height() - 72.0);
    writer.draw_table(page, &layout, Some((font.as_str(), 10.0)))?;

    let patterns = HyphenationTree::from_tex(PATTERNS)?;
    let word = "notable";
    let caption = match patterns.hyphenate_with(word, &pdf_config) {
        Some(hyphenated) => format!("Hyphenated: {}", hyphenated),
        None => format!("No break points in {}", word),
    };
    writer.show_text(page, &font, 10.0, 36.0, layout.bottom() - 24.0, &caption)?;

    log::info!("Writing {} table cells to {}", layout.cells().len(), config.output.display());
    writer.save(&config.output)
}

fn main() {
    env_logger::init();

    let Some(config) = RunConfig::from_args() else {
        eprintln!("Usage: table_to_pdf <output.pdf> [--font file.ttf] [--compress] [--rotate degrees]");
        std::process::exit(2);
    };

    match run(&config) {
        Ok(()) => println!("Wrote {}", config.output.display()),
        Err(e) => {
            eprintln!("Failed: {}", e);
            std::process::exit(1);
        },
    }
}
