use tablediff_core_types::RequestId;
use thiserror::Error;

use crate::model::Position;

/// Result type alias using DiffError
pub type Result<T> = std::result::Result<T, DiffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, log assertions and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Modeling
    /// The candidate sequence produced two sections with equal content
    DuplicateSection,

    // Lookup
    /// A section index, position or flat index is outside the snapshot
    OutOfRange,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::DuplicateSection => "ERR_DUPLICATE_SECTION",
            ExErrorKind::OutOfRange => "ERR_OUT_OF_RANGE",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and context for
/// debugging. Built from a [`DiffError`] with `into()` and enriched with the
/// builder methods.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    section: Option<usize>,
    position: Option<Position>,
    request_id: Option<RequestId>,
    message: String,
    duplicates: Option<Vec<usize>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            section: None,
            position: None,
            request_id: None,
            message: String::new(),
            duplicates: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add section index context
    pub fn with_section(mut self, section: usize) -> Self {
        self.section = Some(section);
        self
    }

    /// Add item position context
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add the indexes of sections that collided (DuplicateSection)
    pub fn with_duplicates(mut self, indices: Vec<usize>) -> Self {
        self.duplicates = Some(indices);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the section index context, if any
    pub fn section(&self) -> Option<usize> {
        self.section
    }

    /// Get the item position context, if any
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get colliding section indexes, if any (populated on DuplicateSection)
    pub fn duplicates(&self) -> Option<&[usize]> {
        self.duplicates.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(section) = self.section {
            write!(f, " (section: {})", section)?;
        }
        if let Some(position) = self.position {
            write!(f, " (position: {})", position)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for reconciliation and snapshot lookups
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiffError {
    /// Two sections of the candidate snapshot compare equal
    ///
    /// The section policy and the item ordering disagree: one logical group
    /// would appear twice, non-contiguously. Usually a missing or wrong
    /// comparator.
    #[error("Duplicate section {section} at indexes {indices:?}; the comparator probably does not keep groups contiguous")]
    DuplicateSection { section: String, indices: Vec<usize> },

    #[error("Section index {index} out of range ({count} sections)")]
    SectionOutOfRange { index: usize, count: usize },

    #[error("Position {section}-{row} out of range")]
    PositionOutOfRange { section: usize, row: usize },

    #[error("Item index {index} out of range ({len} items)")]
    ItemOutOfRange { index: usize, len: usize },
}

impl From<DiffError> for ExError {
    fn from(err: DiffError) -> Self {
        match err {
            DiffError::DuplicateSection { section, indices } => {
                let first = indices.first().copied();
                let err = ExError::new(ExErrorKind::DuplicateSection)
                    .with_message(format!("Section {} appears more than once", section))
                    .with_duplicates(indices);
                match first {
                    Some(index) => err.with_section(index),
                    None => err,
                }
            }

            DiffError::SectionOutOfRange { index, count } => ExError::new(ExErrorKind::OutOfRange)
                .with_section(index)
                .with_message(format!("Section out of range ({} sections)", count)),

            DiffError::PositionOutOfRange { section, row } => {
                ExError::new(ExErrorKind::OutOfRange)
                    .with_position(Position::new(section, row))
                    .with_message("Position out of range")
            }

            DiffError::ItemOutOfRange { index, len } => ExError::new(ExErrorKind::OutOfRange)
                .with_message(format!("Item index {} out of range ({} items)", index, len)),
        }
    }
}
