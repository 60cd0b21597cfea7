//! Demo row model shared by the subcommands

use std::fmt;

use tablediff_core::{Comparator, Item, KeyedSectionPolicy};
use tablediff_engine::DiffCalculator;
use uuid::Uuid;

/// A table row: identity by id, content by text, grouped by header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: Uuid,
    pub header: String,
    pub text: String,
}

impl Row {
    /// Row with a fresh id
    pub fn new(header: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            header: header.into(),
            text: text.into(),
        }
    }
}

impl Item for Row {
    fn same_identity(&self, other: &Self) -> bool {
        self.id == other.id
    }

    fn same_content(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Header: \"{}\"; Text: \"{}\"; id: {}",
            self.header, self.text, self.id
        )
    }
}

pub type HeaderPolicy = KeyedSectionPolicy<fn(&Row) -> String>;
pub type RowCalculator = DiffCalculator<Row, HeaderPolicy>;

fn header_of(row: &Row) -> String {
    row.header.clone()
}

/// Header, then text; `descending` reverses the text order only
pub fn row_comparator(descending: bool) -> Comparator<Row> {
    Box::new(move |a: &Row, b: &Row| {
        let by_text = if descending {
            b.text.cmp(&a.text)
        } else {
            a.text.cmp(&b.text)
        };
        a.header.cmp(&b.header).then(by_text)
    })
}

pub fn calculator(descending: bool) -> RowCalculator {
    DiffCalculator::with_comparator(
        KeyedSectionPolicy::new(header_of as fn(&Row) -> String),
        row_comparator(descending),
    )
}
