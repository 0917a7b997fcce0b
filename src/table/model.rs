//! Logical tables: cells placed on a grid of rows and columns.
//!
//! A [`Table`] only knows where cells sit and how tall they want to be;
//! page coordinates are assigned later by
//! [`PdfTable`](crate::table::PdfTable).

use crate::error::{Error, Result};

/// Horizontal placement of the table inside the available width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableAlign {
    /// Flush with the left border
    Left,
    /// Centered
    #[default]
    Center,
    /// Flush with the right border
    Right,
}

/// A table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Cell content (text)
    pub content: String,
    /// Number of columns this cell spans
    pub colspan: usize,
    /// Number of rows this cell spans
    pub rowspan: usize,
    /// Height the content needs, in points
    pub height: f32,
    /// Whether the row holding this cell closes a group
    pub group_change: bool,
    /// Header cell
    pub header: bool,
}

impl Cell {
    /// Create a new text cell.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            colspan: 1,
            rowspan: 1,
            height: 0.0,
            group_change: true,
            header: false,
        }
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::text("")
    }

    /// Set column span.
    pub fn colspan(mut self, span: usize) -> Self {
        self.colspan = span.max(1);
        self
    }

    /// Set row span.
    pub fn rowspan(mut self, span: usize) -> Self {
        self.rowspan = span.max(1);
        self
    }

    /// Zero spans set through the public fields count as one.
    fn normalized(mut self) -> Self {
        self.colspan = self.colspan.max(1);
        self.rowspan = self.rowspan.max(1);
        self
    }

    /// Set the content height; negative values count as 0.
    pub fn height(mut self, height: f32) -> Self {
        self.height = height.max(0.0);
        self
    }

    /// Set whether this cell closes a group.
    pub fn group_change(mut self, change: bool) -> Self {
        self.group_change = change;
        self
    }

    /// Create a header cell.
    pub fn header(content: impl Into<String>) -> Self {
        let mut cell = Self::text(content);
        cell.header = true;
        cell
    }
}

/// One row of the grid. Slots covered by a span from another cell are
/// reserved but hold no cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    cells: Vec<Option<Cell>>,
    reserved: Vec<bool>,
}

impl Row {
    /// Row with `columns` free slots.
    pub fn new(columns: usize) -> Self {
        Self {
            cells: vec![None; columns],
            reserved: vec![false; columns],
        }
    }

    /// Number of slots.
    pub fn columns(&self) -> usize {
        self.cells.len()
    }

    /// Cell anchored at `column`.
    pub fn cell(&self, column: usize) -> Option<&Cell> {
        self.cells.get(column).and_then(Option::as_ref)
    }

    /// Whether `column` is taken by a cell or a span.
    pub fn is_reserved(&self, column: usize) -> bool {
        self.reserved.get(column).copied().unwrap_or(false)
    }

    /// Whether no cell is anchored in this row. Spans reaching into the
    /// row do not count.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Anchored cells with their column.
    pub fn cells(&self) -> impl Iterator<Item = (usize, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|c| (i, c)))
    }
}

/// A complete table.
#[derive(Debug, Clone)]
pub struct Table {
    columns: usize,
    widths: Vec<f32>,
    width_percentage: f32,
    alignment: TableAlign,
    cellpadding: f32,
    cellspacing: f32,
    offset: f32,
    last_header_row: Option<usize>,
    not_added_yet: bool,
    cells_fit_page: bool,
    table_fits_page: bool,
    auto_fill_empty_cells: bool,
    rows: Vec<Row>,
    /// Next slot tried by `add_cell` (row, column)
    cursor: (usize, usize),
}

impl Table {
    /// Table with `columns` equally wide columns.
    pub fn new(columns: usize) -> Result<Self> {
        if columns == 0 {
            return Err(Error::InvalidArgument("a table needs at least one column".to_string()));
        }
        Ok(Self {
            columns,
            widths: vec![1.0; columns],
            width_percentage: 100.0,
            alignment: TableAlign::default(),
            cellpadding: 0.0,
            cellspacing: 0.0,
            offset: 0.0,
            last_header_row: None,
            not_added_yet: true,
            cells_fit_page: false,
            table_fits_page: false,
            auto_fill_empty_cells: false,
            rows: Vec::new(),
            cursor: (0, 0),
        })
    }

    /// Set relative column widths; one positive value per column.
    pub fn with_widths(mut self, widths: Vec<f32>) -> Result<Self> {
        if widths.len() != self.columns {
            return Err(Error::InvalidArgument(format!(
                "expected {} column widths, got {}",
                self.columns,
                widths.len()
            )));
        }
        if widths.iter().any(|w| w.is_nan() || *w <= 0.0) {
            return Err(Error::InvalidArgument("column widths must be positive".to_string()));
        }
        self.widths = widths;
        Ok(self)
    }

    /// Share of the available width the table takes, in percent.
    pub fn with_width_percentage(mut self, percentage: f32) -> Self {
        self.width_percentage = percentage.clamp(0.0, 100.0);
        self
    }

    /// Set horizontal placement.
    pub fn with_alignment(mut self, alignment: TableAlign) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the space between cell border and content.
    pub fn with_cellpadding(mut self, padding: f32) -> Self {
        self.cellpadding = padding;
        self
    }

    /// Set the space between cells.
    pub fn with_cellspacing(mut self, spacing: f32) -> Self {
        self.cellspacing = spacing;
        self
    }

    /// Set the space between this table and the previous element.
    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    /// Keep every cell on one page.
    pub fn with_cells_fit_page(mut self, fit: bool) -> Self {
        self.cells_fit_page = fit;
        self
    }

    /// Keep the whole table on one page.
    pub fn with_table_fits_page(mut self, fit: bool) -> Self {
        self.table_fits_page = fit;
        if fit {
            self.cells_fit_page = true;
        }
        self
    }

    /// Fill free slots with empty cells on [`complete`](Self::complete).
    pub fn with_auto_fill_empty_cells(mut self, fill: bool) -> Self {
        self.auto_fill_empty_cells = fill;
        self
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Rows in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Relative column widths.
    pub fn widths(&self) -> &[f32] {
        &self.widths
    }

    /// Cell padding.
    pub fn cellpadding(&self) -> f32 {
        self.cellpadding
    }

    /// Cell spacing.
    pub fn cellspacing(&self) -> f32 {
        self.cellspacing
    }

    /// Space between this table and the previous element.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Index of the last header row.
    pub fn last_header_row(&self) -> Option<usize> {
        self.last_header_row
    }

    /// Mark rows `0..=row` as header rows.
    pub fn set_last_header_row(&mut self, row: Option<usize>) {
        self.last_header_row = row;
    }

    /// Mark every row added so far as a header row.
    pub fn end_headers(&mut self) {
        let (row, column) = self.cursor;
        let filled = if column > 0 { row + 1 } else { row };
        self.last_header_row = filled.checked_sub(1);
    }

    /// Whether the table has not been placed in a document yet.
    pub fn is_not_added_yet(&self) -> bool {
        self.not_added_yet
    }

    /// Record whether the table has been placed in a document.
    pub fn set_not_added_yet(&mut self, not_added_yet: bool) {
        self.not_added_yet = not_added_yet;
    }

    /// Whether cells may not be split across pages.
    pub fn cells_fit_page(&self) -> bool {
        self.cells_fit_page
    }

    /// Whether the table may not be split across pages.
    pub fn table_fits_page(&self) -> bool {
        self.table_fits_page
    }

    /// Place `cell` in the first free slot, reading left to right and top
    /// to bottom. A cell too wide for the rest of the row starts a new row.
    pub fn add_cell(&mut self, cell: Cell) -> Result<()> {
        let cell = cell.normalized();
        if cell.colspan > self.columns {
            return Err(Error::Table(format!(
                "cell spans {} columns in a table of {}",
                cell.colspan, self.columns
            )));
        }
        let (mut row, mut column) = self.cursor;
        loop {
            if column + cell.colspan > self.columns {
                row = if row + 1 >= self.rows.len() {
                    self.first_open_row(row + 1, cell.colspan)
                } else {
                    row + 1
                };
                if row == usize::MAX {
                    return Err(Error::Table("no free slot left below the row spans".to_string()));
                }
                column = 0;
                continue;
            }
            if self.slots_free(row, column, &cell) {
                break;
            }
            column += 1;
        }
        self.place(cell, row, column);
        Ok(())
    }

    /// Place `cell` with its top-left slot at (`row`, `column`).
    pub fn add_cell_at(&mut self, cell: Cell, row: usize, column: usize) -> Result<()> {
        let cell = cell.normalized();
        if column.saturating_add(cell.colspan) > self.columns {
            return Err(Error::Table(format!(
                "cell at column {} spanning {} does not fit {} columns",
                column, cell.colspan, self.columns
            )));
        }
        if !self.slots_free(row, column, &cell) {
            return Err(Error::Table(format!("slot ({row}, {column}) is already taken")));
        }
        self.place(cell, row, column);
        Ok(())
    }

    /// Add a row of cells; convenience for [`add_cell`](Self::add_cell) on
    /// a fresh row.
    pub fn add_row(&mut self, cells: impl IntoIterator<Item = Cell>) -> Result<()> {
        let (row, column) = self.cursor;
        if column > 0 {
            self.cursor = (row + 1, 0);
        }
        for cell in cells {
            self.add_cell(cell)?;
        }
        Ok(())
    }

    /// Prepare the grid for layout: optionally fill free slots with empty
    /// cells.
    pub fn complete(&mut self) {
        if !self.auto_fill_empty_cells {
            return;
        }
        for row in &mut self.rows {
            for column in 0..row.columns() {
                if !row.reserved[column] {
                    row.reserved[column] = true;
                    row.cells[column] = Some(Cell::empty());
                }
            }
        }
    }

    /// Drop every row and the header marker; settings stay.
    pub fn delete_all_rows(&mut self) {
        self.rows.clear();
        self.cursor = (0, 0);
        self.last_header_row = None;
    }

    /// Column boundaries in page coordinates: `columns + 1` values from
    /// the left edge of the first column to the right edge of the last.
    pub fn column_positions(&self, left: f32, total_width: f32) -> Vec<f32> {
        let width = total_width * self.width_percentage / 100.0;
        let start = match self.alignment {
            TableAlign::Left => left,
            TableAlign::Center => left + (total_width - width) / 2.0,
            TableAlign::Right => left + total_width - width,
        };
        let sum: f32 = self.widths.iter().sum();
        let mut positions = Vec::with_capacity(self.columns + 1);
        positions.push(start);
        let mut x = start;
        for w in &self.widths {
            x += width * w / sum;
            positions.push(x);
        }
        positions
    }

    /// Rows past the grid are only covered by spans that also cover the
    /// first missing row, so the walk stops there.
    fn slots_free(&self, row: usize, column: usize, cell: &Cell) -> bool {
        let last = row.saturating_add(cell.rowspan).min((self.rows.len() + 1).max(row.saturating_add(1)));
        (row..last).all(|r| (column..column + cell.colspan).all(|c| !self.is_covered(r, c)))
    }

    /// Whether slot (`row`, `column`) is taken, including by spans reaching
    /// past the last row.
    fn is_covered(&self, row: usize, column: usize) -> bool {
        match self.rows.get(row) {
            Some(existing) => existing.reserved[column],
            None => self.rows.iter().enumerate().any(|(r, existing)| {
                r.saturating_add(existing_span(existing, column)) > row
            }),
        }
    }

    /// First row at or after `from`, past the grid, with a run of
    /// `colspan` free slots.
    fn first_open_row(&self, from: usize, colspan: usize) -> usize {
        let ends: Vec<usize> = (0..self.columns).map(|c| self.covered_until(c)).collect();
        let open = ends
            .windows(colspan)
            .map(|window| window.iter().copied().max().unwrap_or(0))
            .min()
            .unwrap_or(0);
        open.max(from)
    }

    /// Row index where spans from existing rows stop covering `column`.
    fn covered_until(&self, column: usize) -> usize {
        self.rows
            .iter()
            .enumerate()
            .map(|(r, existing)| r.saturating_add(existing_span(existing, column)))
            .max()
            .unwrap_or(0)
    }

    fn new_row(&self, index: usize) -> Row {
        let mut row = Row::new(self.columns);
        for column in 0..self.columns {
            row.reserved[column] = self.is_covered(index, column);
        }
        row
    }

    /// Rows are created up to the anchor row; rows a span reaches into are
    /// reserved when they get created.
    fn place(&mut self, cell: Cell, row: usize, column: usize) {
        while self.rows.len() <= row {
            let next = self.new_row(self.rows.len());
            self.rows.push(next);
        }
        let last = row.saturating_add(cell.rowspan).min(self.rows.len());
        for r in row..last {
            for c in column..column + cell.colspan {
                self.rows[r].reserved[c] = true;
            }
        }
        let next = column + cell.colspan;
        self.cursor = if next >= self.columns { (row + 1, 0) } else { (row, next) };
        self.rows[row].cells[column] = Some(cell);
    }
}

/// Rows covered at `column` by the cell anchored in `row`, if any reaches it.
fn existing_span(row: &Row, column: usize) -> usize {
    row.cells()
        .find(|(c, cell)| *c <= column && column < c + cell.colspan)
        .map_or(0, |(_, cell)| cell.rowspan)
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
