use google_sheets4::api::ValueRange;
use serde_json::Value;
use std::borrow::Cow;

pub trait ValueRangeFactory {
    fn from_single_cell<'a, T: Into<Cow<'a, str>> + Clone>(cell_value: T) -> Self;
    fn from_rows(rows: Vec<Vec<String>>) -> Self;
}

fn wrap_value<'a, T: Into<Cow<'a, str>>>(value: T) -> Value {
    Value::String(value.into().into_owned())
}

impl ValueRangeFactory for ValueRange {
    fn from_single_cell<'a, T: Into<Cow<'a, str>> + Clone>(cell_value: T) -> Self {
        ValueRange {
            major_dimension: None,
            range: None,
            values: Some(vec![vec![wrap_value(cell_value)]]),
        }
    }

    fn from_rows(rows: Vec<Vec<String>>) -> Self {
        if let [row] = rows.as_slice() {
            if let [cell] = row.as_slice() {
                return Self::from_single_cell(cell.as_str());
            }
        }

        Self {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(
                rows.into_iter()
                    .map(|row| row.into_iter().map(wrap_value).collect())
                    .collect(),
            ),
        }
    }
}
