use std::fmt::Formatter;

use super::{cell_position::CellPosition, cell_range::CellRange};

/// Sheet-qualified A1 range string, e.g. `Ark1!B10:G10`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct A1Notation(pub String);

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub trait ToA1Notation {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation;
}

/// Sheet names made of letters, digits and underscores are written bare (`Ark1!F53`),
/// anything else is quoted (`'Uge 1'!F53`).
fn qualify(sheet_name: Option<&str>, local: String) -> A1Notation {
    match sheet_name {
        Some(sheet_name)
            if !sheet_name.is_empty()
                && sheet_name
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_') =>
        {
            A1Notation(format!("{}!{}", sheet_name, local))
        }
        Some(sheet_name) => A1Notation(format!(
            "'{}'!{}",
            sheet_name.replace('\'', "''"),
            local
        )),
        None => A1Notation(local),
    }
}

impl ToA1Notation for CellPosition {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        qualify(sheet_name, format!("{}{}", self.col, self.row))
    }
}

impl ToA1Notation for CellRange {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        if self.start == self.end {
            return self.start.to_a1_notation(sheet_name);
        }
        qualify(
            sheet_name,
            format!(
                "{}{}:{}{}",
                self.start.col, self.start.row, self.end.col, self.end.row
            ),
        )
    }
}
