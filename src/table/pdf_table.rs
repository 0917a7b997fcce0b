//! Page geometry for tables.
//!
//! [`PdfTable`] walks a [`Table`] row by row and assigns every cell
//! absolute left/right/top/bottom coordinates. Each row keeps a running
//! offset (the y coordinate where the row starts); a cell ending in row
//! `r + rowspan` pulls that row's offset down to its own bottom, so a row
//! starts below the tallest cell reaching into it.

use crate::geometry::Rectangle;
use crate::object::PdfRectangle;
use crate::table::model::{Cell, Table};

/// A cell with page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfCell {
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    row_number: usize,
    column: usize,
    rowspan: usize,
    colspan: usize,
    group_number: usize,
    header: bool,
    height: f32,
    content: String,
}

impl PdfCell {
    fn new(
        cell: &Cell,
        row_number: usize,
        column: usize,
        left: f32,
        right: f32,
        top: f32,
        cellspacing: f32,
    ) -> Self {
        Self {
            left: left + cellspacing,
            right: right - cellspacing,
            top,
            bottom: top,
            row_number,
            column,
            rowspan: cell.rowspan.max(1),
            colspan: cell.colspan.max(1),
            group_number: 0,
            header: cell.header,
            height: cell.height.max(0.0),
            content: cell.content.clone(),
        }
    }

    /// Left edge.
    pub fn left(&self) -> f32 {
        self.left
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.right
    }

    /// Top edge.
    pub fn top(&self) -> f32 {
        self.top
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    /// Row the cell starts in, counted across incremental updates.
    pub fn row_number(&self) -> usize {
        self.row_number
    }

    /// Column the cell starts in.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Rows spanned.
    pub fn rowspan(&self) -> usize {
        self.rowspan
    }

    /// Columns spanned.
    pub fn colspan(&self) -> usize {
        self.colspan
    }

    /// Group the cell belongs to.
    pub fn group_number(&self) -> usize {
        self.group_number
    }

    /// Whether the cell is part of the header.
    pub fn is_header(&self) -> bool {
        self.header
    }

    /// Content height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Cell text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cell area.
    pub fn rectangle(&self) -> Rectangle {
        Rectangle::new(self.left, self.bottom, self.right, self.top)
    }
}

/// A table laid out on a page.
#[derive(Debug, Clone)]
pub struct PdfTable {
    table: Table,
    positions: Vec<f32>,
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    cells: Vec<PdfCell>,
    header_cells: Vec<PdfCell>,
}

impl PdfTable {
    /// Lay out `table` between `left` and `right`, starting at `top`.
    pub fn new(mut table: Table, left: f32, right: f32, top: f32) -> Self {
        table.complete();
        let positions = table.column_positions(left, right - left);
        let (left, right) = match (positions.first(), positions.last()) {
            (Some(&l), Some(&r)) => (l, r),
            _ => (left, right),
        };
        let mut pdf_table = Self {
            table,
            positions,
            left,
            right,
            top,
            bottom: top,
            cells: Vec::new(),
            header_cells: Vec::new(),
        };
        pdf_table.resolve_rows();
        pdf_table
    }

    /// The underlying table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The underlying table, for adding rows before
    /// [`update_row_additions`](Self::update_row_additions).
    pub fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    /// Resolved cells, header cells included until the table is added.
    pub fn cells(&self) -> &[PdfCell] {
        &self.cells
    }

    /// Cells of the header rows.
    pub fn header_cells(&self) -> &[PdfCell] {
        &self.header_cells
    }

    /// Number of resolved rows.
    pub fn rows(&self) -> usize {
        self.cells.last().map_or(0, |cell| cell.row_number + 1)
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.table.columns()
    }

    /// Whether any header cells were recorded.
    pub fn has_header(&self) -> bool {
        !self.header_cells.is_empty()
    }

    /// Space between this table and the previous element.
    pub fn offset(&self) -> f32 {
        self.table.offset()
    }

    /// Cell padding of the table.
    pub fn cellpadding(&self) -> f32 {
        self.table.cellpadding()
    }

    /// Cell spacing of the table.
    pub fn cellspacing(&self) -> f32 {
        self.table.cellspacing()
    }

    /// Whether cells may not be split across pages.
    pub fn has_to_fit_page_cells(&self) -> bool {
        self.table.cells_fit_page()
    }

    /// Whether the table may not be split across pages.
    pub fn has_to_fit_page_table(&self) -> bool {
        self.table.table_fits_page()
    }

    /// Bottom of the laid out area.
    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    /// Area covered by the table.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.left, self.bottom, self.right, self.top)
    }

    /// One rectangle per resolved cell, in cell order.
    pub fn to_rectangles(&self) -> Vec<PdfRectangle> {
        self.cells
            .iter()
            .map(|c| PdfRectangle::new(c.left, c.bottom, c.right, c.top))
            .collect()
    }

    /// Lay out rows added to the table since the last resolution, then
    /// drop them from the table. Row numbers continue from the rows already
    /// resolved.
    pub fn update_row_additions(&mut self) {
        self.table.complete();
        self.resolve_rows();
        self.table.delete_all_rows();
    }

    fn resolve_rows(&mut self) {
        let prev_rows = self.rows();
        let first_data_row = self.table.last_header_row().map_or(0, |r| r + 1);
        let cellspacing = self.table.cellspacing();
        let cellpadding = self.table.cellpadding();
        let not_added_yet = self.table.is_not_added_yet();
        let rows = self.table.size() + 1;
        let mut offsets = vec![self.bottom; rows];
        let mut new_cells = Vec::new();
        let mut group_number = 0;

        for (row_number, row) in self.table.rows().iter().enumerate() {
            let mut group_change = false;
            if row.is_empty() {
                if row_number < rows - 1 && offsets[row_number + 1] > offsets[row_number] {
                    offsets[row_number + 1] = offsets[row_number];
                }
                continue;
            }
            for (column, cell) in row.cells() {
                let end = column.saturating_add(cell.colspan).min(self.positions.len() - 1);
                let mut current = PdfCell::new(
                    cell,
                    row_number + prev_rows,
                    column,
                    self.positions[column],
                    self.positions[end],
                    offsets[row_number],
                    cellspacing,
                );
                if row_number < first_data_row {
                    current.header = true;
                    self.header_cells.push(current.clone());
                    if !not_added_yet {
                        continue;
                    }
                }
                let target = row_number.saturating_add(current.rowspan);
                if target < rows {
                    let bottom = offsets[row_number] - current.height - cellpadding;
                    if bottom < offsets[target] {
                        offsets[target] = bottom;
                    }
                } else {
                    log::trace!(
                        "Row span of cell at row {} runs past the table; clamping to the last row",
                        row_number + prev_rows
                    );
                    let bottom = offsets[row_number] - current.height;
                    if bottom < offsets[rows - 1] {
                        offsets[rows - 1] = bottom;
                    }
                }
                current.group_number = group_number;
                group_change |= cell.group_change;
                new_cells.push(current);
            }
            if group_change {
                group_number += 1;
            }
        }

        for cell in &mut new_cells {
            let target = (cell.row_number - prev_rows).saturating_add(cell.rowspan);
            cell.bottom = offsets.get(target).copied().unwrap_or(offsets[rows - 1]);
        }
        log::debug!(
            "Resolved {} table cells over {} rows, bottom at {}",
            new_cells.len(),
            rows - 1,
            offsets[rows - 1]
        );
        self.cells.extend(new_cells);
        self.bottom = offsets[rows - 1];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_rows(padding: f32) -> Table {
        let mut table = Table::new(2).unwrap().with_cellpadding(padding);
        table.add_cell(Cell::text("a").height(50.0)).unwrap();
        table.add_cell(Cell::text("b").height(20.0)).unwrap();
        table.add_cell(Cell::text("c").height(30.0)).unwrap();
        table.add_cell(Cell::text("d").height(10.0)).unwrap();
        table
    }

    #[test]
    fn test_two_row_offsets() {
        let pdf = PdfTable::new(two_rows(2.0), 0.0, 200.0, 500.0);
        let cells = pdf.cells();
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[0].bottom(), 448.0);
        assert_eq!(cells[1].bottom(), 448.0);
        assert_eq!(cells[2].top(), 448.0);
        assert_eq!(cells[2].bottom(), 416.0);
        assert_eq!(pdf.bottom(), 416.0);
        assert_eq!(pdf.rows(), 2);
    }

    #[test]
    fn test_horizontal_geometry() {
        let mut table = Table::new(2).unwrap().with_cellspacing(1.0);
        table.add_cell(Cell::text("wide").colspan(2).height(10.0)).unwrap();
        let pdf = PdfTable::new(table, 0.0, 100.0, 100.0);
        let cell = &pdf.cells()[0];
        assert_eq!(cell.left(), 1.0);
        assert_eq!(cell.right(), 99.0);
        assert_eq!(pdf.bounds(), Rectangle::new(0.0, 90.0, 100.0, 100.0));
    }

    #[test]
    fn test_rowspan_past_end_clamps() {
        let mut table = Table::new(2).unwrap().with_cellpadding(5.0);
        table.add_cell(Cell::text("a").height(10.0)).unwrap();
        table.add_cell(Cell::text("b").height(40.0).rowspan(2)).unwrap();
        assert_eq!(table.size(), 1);
        let pdf = PdfTable::new(table, 0.0, 100.0, 300.0);
        // Overflowing spans lower the last offset without padding.
        assert_eq!(pdf.bottom(), 260.0);
        assert_eq!(pdf.cells()[0].bottom(), 260.0);
        assert_eq!(pdf.cells()[1].bottom(), 260.0);
    }

    #[test]
    fn test_empty_row_propagates_offset() {
        let mut table = Table::new(1).unwrap();
        table.add_cell_at(Cell::text("a").height(20.0), 0, 0).unwrap();
        table.add_cell_at(Cell::text("c").height(10.0), 2, 0).unwrap();
        assert!(table.rows()[1].is_empty());
        let pdf = PdfTable::new(table, 0.0, 100.0, 100.0);
        let cells = pdf.cells();
        assert_eq!(cells[1].row_number(), 2);
        assert_eq!(cells[1].top(), 80.0);
        assert_eq!(cells[1].bottom(), 70.0);
    }

    #[test]
    fn test_group_numbers() {
        let mut table = Table::new(1).unwrap();
        table.add_cell(Cell::text("a").group_change(false)).unwrap();
        table.add_cell(Cell::text("b")).unwrap();
        table.add_cell(Cell::text("c")).unwrap();
        let pdf = PdfTable::new(table, 0.0, 100.0, 100.0);
        let groups: Vec<usize> = pdf.cells().iter().map(PdfCell::group_number).collect();
        assert_eq!(groups, vec![0, 0, 1]);
    }

    #[test]
    fn test_headers_kept_until_added() {
        let mut table = Table::new(1).unwrap();
        table.add_cell(Cell::header("h").height(10.0)).unwrap();
        table.end_headers();
        table.add_cell(Cell::text("a").height(10.0)).unwrap();

        let pdf = PdfTable::new(table.clone(), 0.0, 100.0, 100.0);
        assert!(pdf.has_header());
        assert_eq!(pdf.cells().len(), 2);
        assert!(pdf.cells()[0].is_header());

        table.set_not_added_yet(false);
        let pdf = PdfTable::new(table, 0.0, 100.0, 100.0);
        assert_eq!(pdf.header_cells().len(), 1);
        assert_eq!(pdf.cells().len(), 1);
        assert!(!pdf.cells()[0].is_header());
    }

    #[test]
    fn test_update_row_additions_continues_numbering() {
        let mut table = Table::new(1).unwrap();
        table.add_cell(Cell::text("a").height(10.0)).unwrap();
        let mut pdf = PdfTable::new(table, 0.0, 100.0, 100.0);
        pdf.table_mut().delete_all_rows();
        pdf.table_mut().add_cell(Cell::text("b").height(15.0)).unwrap();
        pdf.update_row_additions();
        assert_eq!(pdf.rows(), 2);
        assert_eq!(pdf.cells()[1].row_number(), 1);
        assert_eq!(pdf.cells()[1].top(), 90.0);
        assert_eq!(pdf.bottom(), 75.0);
        assert_eq!(pdf.table().size(), 0);
    }

    #[test]
    fn test_to_rectangles() {
        let pdf = PdfTable::new(two_rows(0.0), 0.0, 200.0, 500.0);
        let rects = pdf.to_rectangles();
        assert_eq!(rects.len(), 4);
        assert_eq!(rects[0], PdfRectangle::new(0.0, 450.0, 100.0, 500.0));
    }
}
