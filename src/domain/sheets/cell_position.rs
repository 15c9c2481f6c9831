use super::{column::Column, row::Row};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub col: Column,
    pub row: Row,
}

impl CellPosition {
    pub const fn new(col: Column, row: Row) -> Self {
        CellPosition { col, row }
    }
}

impl std::ops::Add<u32> for CellPosition {
    type Output = CellPosition;

    /// Moves the position down by `rhs` rows.
    fn add(self, rhs: u32) -> Self::Output {
        CellPosition {
            col: self.col,
            row: self.row + rhs,
        }
    }
}
