//! Board module - manages the game grid
//!
//! The board is a 10x20 playable grid plus one sentinel floor row below it.
//! Uses a flat array, row-major, so a cell reference is `row * WIDTH + col`.
//! Row 0 is the top of the board.

use crate::types::{
    Cell, CellRef, ClearedRows, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, PLAYABLE_CELLS, TOTAL_CELLS,
};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// The game board - 10 columns x 20 rows, with the floor row stored after them
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: [Cell; TOTAL_CELLS],
}

impl Board {
    /// Create a new empty board with its floor in place
    pub fn new() -> Self {
        let mut cells = [Cell::Empty; TOTAL_CELLS];
        for cell in &mut cells[PLAYABLE_CELLS..] {
            *cell = Cell::Floor;
        }
        Self { cells }
    }

    #[inline(always)]
    fn slot(cell: CellRef) -> Option<usize> {
        usize::try_from(cell).ok().filter(|&i| i < TOTAL_CELLS)
    }

    #[inline(always)]
    fn playable_slot(row: usize, col: usize) -> Option<usize> {
        (row < HEIGHT && col < WIDTH).then(|| row * WIDTH + col)
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Column of a cell reference
    pub fn column(cell: CellRef) -> CellRef {
        cell.rem_euclid(BOARD_WIDTH as CellRef)
    }

    /// Get a cell by reference, including the floor row
    pub fn get(&self, cell: CellRef) -> Option<Cell> {
        Self::slot(cell).map(|i| self.cells[i])
    }

    /// Get a playable cell by (row, col)
    pub fn get_at(&self, row: usize, col: usize) -> Option<Cell> {
        Self::playable_slot(row, col).map(|i| self.cells[i])
    }

    /// Set a playable cell; `None` empties it
    ///
    /// Returns false outside the playable area. Used to prepare positions.
    pub fn set(&mut self, row: usize, col: usize, kind: Option<PieceKind>) -> bool {
        match Self::playable_slot(row, col) {
            Some(i) => {
                self.cells[i] = kind.map_or(Cell::Empty, Cell::Locked);
                true
            }
            None => false,
        }
    }

    /// True if the cell blocks movement
    ///
    /// Anything past the floor counts as taken and anything above the board
    /// counts as free, so edge cases never index out of range.
    pub fn is_taken(&self, cell: CellRef) -> bool {
        if cell < 0 {
            return false;
        }
        match Self::slot(cell) {
            Some(i) => self.cells[i].is_taken(),
            None => true,
        }
    }

    /// True if any of the cells is taken
    pub fn overlaps(&self, cells: &[CellRef]) -> bool {
        cells.iter().any(|&c| self.is_taken(c))
    }

    pub fn is_at_left_edge(cells: &[CellRef]) -> bool {
        cells.iter().any(|&c| Self::column(c) == 0)
    }

    pub fn is_at_right_edge(cells: &[CellRef]) -> bool {
        cells
            .iter()
            .any(|&c| Self::column(c) == BOARD_WIDTH as CellRef - 1)
    }

    /// Freeze cells into the board
    ///
    /// Cells outside the playable area are dropped. Returns how many cells
    /// were written.
    pub fn lock(&mut self, cells: &[CellRef], kind: PieceKind) -> usize {
        let mut written = 0;
        for &c in cells {
            if let Some(i) = Self::slot(c).filter(|&i| i < PLAYABLE_CELLS) {
                self.cells[i] = Cell::Locked(kind);
                written += 1;
            }
        }
        written
    }

    /// Check if a playable row is completely locked
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= HEIGHT {
            return false;
        }
        let start = row * WIDTH;
        self.cells[start..start + WIDTH]
            .iter()
            .all(|cell| cell.is_locked())
    }

    /// Full playable rows, top to bottom
    pub fn full_rows(&self) -> ClearedRows {
        (0..HEIGHT).filter(|&row| self.is_row_full(row)).collect()
    }

    /// Remove rows and compact the board in one pass
    ///
    /// Every kept row moves down by the number of removed rows below it.
    /// Empty rows fill the top.
    pub fn remove_rows(&mut self, rows: &[usize]) {
        let mut write_row = HEIGHT;

        for read_row in (0..HEIGHT).rev() {
            if rows.contains(&read_row) {
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let src = read_row * WIDTH;
                self.cells.copy_within(src..src + WIDTH, write_row * WIDTH);
            }
        }

        for cell in &mut self.cells[..write_row * WIDTH] {
            *cell = Cell::Empty;
        }
    }

    /// Detect and remove all full rows; returns the removed row indices
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let rows = self.full_rows();
        if !rows.is_empty() {
            self.remove_rows(&rows);
        }
        rows
    }

    /// Number of locked playable cells
    pub fn locked_count(&self) -> usize {
        self.cells[..PLAYABLE_CELLS]
            .iter()
            .filter(|c| c.is_locked())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.locked_count() == 0
    }

    /// One playable row
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        (row < HEIGHT).then(|| &self.cells[row * WIDTH..(row + 1) * WIDTH])
    }

    /// Playable cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells[..PLAYABLE_CELLS]
    }

    /// Write playable cells as grid codes (0 empty, 1-7 piece kind)
    pub fn write_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, code) in row.iter_mut().enumerate() {
                *code = match self.cells[y * WIDTH + x] {
                    Cell::Locked(kind) => kind.code(),
                    Cell::Empty | Cell::Floor => 0,
                };
            }
        }
    }

    /// Empty every playable cell
    pub fn clear(&mut self) {
        for cell in &mut self.cells[..PLAYABLE_CELLS] {
            *cell = Cell::Empty;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
