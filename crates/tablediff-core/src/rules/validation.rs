use std::fmt::Debug;

use crate::errors::{DiffError, Result};
use crate::model::Section;

/// Validate that no two sections of one snapshot have equal content
///
/// Equal content in two places means the section policy and the item ordering
/// disagree: one logical group was split into non-contiguous runs. Sections
/// are compared pairwise by content equality only.
///
/// # Errors
///
/// Returns `DiffError::DuplicateSection` naming the first duplicated content
/// and every section index carrying it.
pub fn validate_unique_sections<C>(sections: &[Section<C>]) -> Result<()>
where
    C: PartialEq + Debug,
{
    for (index, section) in sections.iter().enumerate() {
        let later_duplicate = sections[index + 1..]
            .iter()
            .any(|other| other.content == section.content);
        if later_duplicate {
            let indices = sections
                .iter()
                .enumerate()
                .filter(|(_, other)| other.content == section.content)
                .map(|(i, _)| i)
                .collect();
            return Err(DiffError::DuplicateSection {
                section: format!("{:?}", section.content),
                indices,
            });
        }
    }
    Ok(())
}
