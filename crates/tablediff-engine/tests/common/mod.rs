use std::cmp::Ordering;

use tablediff_core::{Comparator, Item, KeyedSectionPolicy};
use tablediff_engine::DiffCalculator;

/// Row shown in a table: identity by id, content by text, grouped by header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: u32,
    pub header: char,
    pub text: String,
}

impl Item for Row {
    fn same_identity(&self, other: &Self) -> bool {
        self.id == other.id
    }

    fn same_content(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

pub type HeaderPolicy = KeyedSectionPolicy<fn(&Row) -> char>;
pub type RowCalculator = DiffCalculator<Row, HeaderPolicy>;

fn header_of(row: &Row) -> char {
    row.header
}

#[allow(dead_code)]
pub fn header_policy() -> HeaderPolicy {
    KeyedSectionPolicy::new(header_of as fn(&Row) -> char)
}

#[allow(dead_code)]
pub fn row(id: u32, header: char, text: &str) -> Row {
    Row {
        id,
        header,
        text: text.to_string(),
    }
}

/// Header, then text
#[allow(dead_code)]
pub fn ascending(a: &Row, b: &Row) -> Ordering {
    a.header.cmp(&b.header).then_with(|| a.text.cmp(&b.text))
}

/// Header ascending, text descending
#[allow(dead_code)]
pub fn text_descending(a: &Row, b: &Row) -> Ordering {
    a.header.cmp(&b.header).then_with(|| b.text.cmp(&a.text))
}

#[allow(dead_code)]
pub fn comparator(cmp: fn(&Row, &Row) -> Ordering) -> Comparator<Row> {
    Box::new(cmp)
}

/// Calculator grouping by header and sorting with [`ascending`]
#[allow(dead_code)]
pub fn calculator() -> RowCalculator {
    DiffCalculator::with_comparator(header_policy(), comparator(ascending))
}
