//! Tables: the logical grid ([`Table`]) and its page layout ([`PdfTable`]).

pub mod model;
pub mod pdf_table;

pub use model::{Cell, Row, Table, TableAlign};
pub use pdf_table::{PdfCell, PdfTable};
