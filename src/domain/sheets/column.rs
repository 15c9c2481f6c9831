use std::fmt::Formatter;

/// 1-based spreadsheet column (`A` = 1), displayed as its letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Column(u32);

impl Column {
    pub const fn new(number: u32) -> Self {
        Column(number)
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", letters(self.0))
    }
}

fn letters(mut number: u32) -> String {
    let mut reversed = Vec::new();
    while number > 0 {
        let remainder = (number - 1) % 26;
        reversed.push(char::from(b'A' + remainder as u8));
        number = (number - 1) / 26;
    }
    reversed.into_iter().rev().collect()
}
