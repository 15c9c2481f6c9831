use std::fmt::Formatter;

/// Spreadsheet row as written in A1 notation (first row = 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Row(u32);

impl Row {
    /// # Examples
    /// ```
    /// use timeseddel::domain::sheets::row::Row;
    /// assert_eq!(Row::new(9) + 15, Row::new(24));
    /// assert_eq!(Row::new(53).to_string(), "53");
    /// ```
    pub const fn new(number: u32) -> Self {
        Row(number)
    }
}

/// Moves `rhs` rows down.
impl std::ops::Add<u32> for Row {
    type Output = Row;

    fn add(self, rhs: u32) -> Self::Output {
        Row(self.0.saturating_add(rhs))
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
