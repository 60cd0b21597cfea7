use tablediff_core::{Item, KeyedSectionPolicy, Snapshot};

/// Test row: identity by id, content by text, grouped by header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRow {
    pub id: u32,
    pub header: char,
    pub text: String,
}

impl Item for TestRow {
    fn same_identity(&self, other: &Self) -> bool {
        self.id == other.id
    }

    fn same_content(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

pub type HeaderPolicy = KeyedSectionPolicy<fn(&TestRow) -> char>;

fn header_of(row: &TestRow) -> char {
    row.header
}

/// Section policy grouping rows by header
#[allow(dead_code)]
pub fn header_policy() -> HeaderPolicy {
    KeyedSectionPolicy::new(header_of as fn(&TestRow) -> char)
}

/// Create a test row
#[allow(dead_code)]
pub fn row(id: u32, header: char, text: &str) -> TestRow {
    TestRow {
        id,
        header,
        text: text.to_string(),
    }
}

/// Sort rows by header, then text, then id
#[allow(dead_code)]
pub fn sort_rows(rows: &mut [TestRow]) {
    rows.sort_by(|a, b| {
        a.header
            .cmp(&b.header)
            .then_with(|| a.text.cmp(&b.text))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Build a validated snapshot from rows in any order
///
/// Panics if the rows cannot be sectioned, which sorted rows always can.
#[allow(dead_code)]
pub fn snapshot(mut rows: Vec<TestRow>) -> Snapshot<TestRow, char> {
    sort_rows(&mut rows);
    Snapshot::build(rows, &header_policy()).expect("sorted rows form unique sections")
}
