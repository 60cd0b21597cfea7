//! Scenario file parser
//!
//! A scenario is a sequence of marked blocks, one row per line:
//!
//! ```text
//! --------------------- Old items
//! Header: "A"; Text: "1"; id: 6f1c2a54-7f0e-4b43-9d53-0b0c4d5f0a11
//! --------------------- Added
//! Header: "A"; Text: "6"
//! --------------------- Updated
//! --------------------- Deleted
//! ---------------------
//! ```
//!
//! Marker lines start with `---`; a bare marker closes the current block.
//! Row ids are optional in `Old items` and `Added` (a fresh id is assigned)
//! and required in `Updated` and `Deleted`.

use std::path::Path;

use thiserror::Error;
use uuid::Uuid;

use crate::model::Row;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: row outside of any block")]
    OutsideBlock { line: usize },

    #[error("Line {line}: missing field '{field}'")]
    MissingField { line: usize, field: &'static str },

    #[error("Line {line}: invalid id '{value}'")]
    InvalidId { line: usize, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Old,
    Added,
    Updated,
    Deleted,
}

impl Block {
    fn from_marker(marker: &str) -> Option<Self> {
        if marker.contains("Old items") {
            Some(Block::Old)
        } else if marker.contains("Added") {
            Some(Block::Added)
        } else if marker.contains("Updated") {
            Some(Block::Updated)
        } else if marker.contains("Deleted") {
            Some(Block::Deleted)
        } else {
            None
        }
    }

    fn requires_id(self) -> bool {
        matches!(self, Block::Updated | Block::Deleted)
    }
}

/// Initial rows plus one incremental change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scenario {
    pub old: Vec<Row>,
    pub added: Vec<Row>,
    pub updated: Vec<Row>,
    pub deleted: Vec<Row>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ScenarioError> {
        let mut scenario = Scenario::default();
        let mut block = None;

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim().trim_end_matches(',');
            if line.is_empty() {
                continue;
            }
            if line.starts_with("---") {
                block = Block::from_marker(line);
                continue;
            }

            let number = index + 1;
            let current = block.ok_or(ScenarioError::OutsideBlock { line: number })?;
            let row = parse_row(line, number, current.requires_id())?;
            match current {
                Block::Old => scenario.old.push(row),
                Block::Added => scenario.added.push(row),
                Block::Updated => scenario.updated.push(row),
                Block::Deleted => scenario.deleted.push(row),
            }
        }

        Ok(scenario)
    }

    /// Rows passed as `add_or_update`: updates first, then additions
    pub fn add_or_update(&self) -> Vec<Row> {
        self.updated.iter().chain(&self.added).cloned().collect()
    }
}

fn parse_row(line: &str, number: usize, requires_id: bool) -> Result<Row, ScenarioError> {
    let mut header = None;
    let mut text = None;
    let mut id = None;

    for part in line.split(';') {
        let Some((key, value)) = part.split_once(':') else {
            continue;
        };
        let value = value.trim().trim_matches('"');
        match key.trim() {
            "Header" => header = Some(value.to_string()),
            "Text" => text = Some(value.to_string()),
            "id" => {
                let parsed = Uuid::parse_str(value).map_err(|_| ScenarioError::InvalidId {
                    line: number,
                    value: value.to_string(),
                })?;
                id = Some(parsed);
            }
            _ => {}
        }
    }

    let header = header.ok_or(ScenarioError::MissingField {
        line: number,
        field: "Header",
    })?;
    let text = text.ok_or(ScenarioError::MissingField {
        line: number,
        field: "Text",
    })?;
    let id = match id {
        Some(id) => id,
        None if requires_id => {
            return Err(ScenarioError::MissingField {
                line: number,
                field: "id",
            })
        }
        None => Uuid::new_v4(),
    };

    Ok(Row { id, header, text })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "6f1c2a54-7f0e-4b43-9d53-0b0c4d5f0a11";

    #[test]
    fn test_parse_blocks() {
        let text = format!(
            "----------- Old items\n  Header: \"A\"; Text: \"1\"; id: {ID},\n  Header: \"B\"; Text: \"2\"\n\
             ----------- Added\nHeader: \"A\"; Text: \"6\"\n\
             ----------- Updated\nHeader: \"C\"; Text: \"1\"; id: {ID}\n\
             ----------- Deleted\n-----------\n"
        );
        let scenario = Scenario::parse(&text).unwrap();

        assert_eq!(scenario.old.len(), 2);
        assert_eq!(scenario.old[0].id.to_string(), ID);
        assert_eq!(scenario.old[1].header, "B");
        assert_eq!(scenario.added[0].text, "6");
        assert_eq!(scenario.updated[0].id, scenario.old[0].id);
        assert!(scenario.deleted.is_empty());

        let merged = scenario.add_or_update();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].header, "C");
    }

    #[test]
    fn test_deleted_row_needs_id() {
        let err = Scenario::parse("--- Deleted\nHeader: \"A\"; Text: \"1\"\n").unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::MissingField {
                line: 2,
                field: "id"
            }
        ));
    }

    #[test]
    fn test_invalid_id_is_reported() {
        let err = Scenario::parse("--- Old items\nHeader: \"A\"; Text: \"1\"; id: nope\n").unwrap_err();
        assert_eq!(err.to_string(), "Line 2: invalid id 'nope'");
    }

    #[test]
    fn test_row_outside_block() {
        let err = Scenario::parse("Header: \"A\"; Text: \"1\"\n").unwrap_err();
        assert!(matches!(err, ScenarioError::OutsideBlock { line: 1 }));
    }
}
