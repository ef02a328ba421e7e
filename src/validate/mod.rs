//! Validation phase: aggregate every invariant violation in one pass.
//!
//! Runs the identity index, then reference resolution, then the structural
//! rules, and either hands back a [`ValidatedProject`] or the full defect
//! list. Authored projects are edited and re-validated interactively, so a
//! complete report per run beats failing at the first breach.

pub mod index;
pub mod refs;
pub mod structural;

use crate::error::Violation;
use crate::parse::types::Project;

use index::ProjectIndex;

/// Proof that a project graph satisfies every compile-time invariant.
///
/// The only way to obtain one is through [`validate`], which is what
/// entitles the compiler to treat every ID lookup as infallible.
#[derive(Debug)]
pub struct ValidatedProject<'p> {
    project: &'p Project,
    index: ProjectIndex<'p>,
}

impl<'p> ValidatedProject<'p> {
    pub fn project(&self) -> &'p Project {
        self.project
    }

    /// The identity index built during validation. The compiler reuses its
    /// traversal order for dense index assignment.
    pub fn index(&self) -> &ProjectIndex<'p> {
        &self.index
    }
}

/// Validate the whole project graph.
///
/// On failure, returns every violation found, in deterministic order:
/// duplicate IDs (in traversal order), then unresolved references, then
/// structural rule breaches. Re-validating an unchanged project yields the
/// same result and the same list.
pub fn validate(project: &Project) -> Result<ValidatedProject<'_>, Vec<Violation>> {
    let index = ProjectIndex::build(project);

    let mut violations: Vec<Violation> = index
        .duplicates
        .iter()
        .map(|(category, id)| {
            Violation::new(
                "V001",
                format!("Duplicate {} ID '{}'", category, id),
                Some(id.clone()),
            )
        })
        .collect();

    violations.extend(refs::resolve_references(&index));
    violations.extend(structural::validate_structural(&index));

    if violations.is_empty() {
        Ok(ValidatedProject { project, index })
    } else {
        Err(violations)
    }
}
