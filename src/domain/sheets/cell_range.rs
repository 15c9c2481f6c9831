use super::cell_position::CellPosition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellPosition,
    pub end: CellPosition,
}

impl CellRange {
    pub const fn new(start: CellPosition, end: CellPosition) -> Self {
        CellRange { start, end }
    }

    /// Same span, shifted down by `rows`.
    pub fn shifted_down(&self, rows: u32) -> Self {
        CellRange {
            start: self.start + rows,
            end: self.end + rows,
        }
    }
}
