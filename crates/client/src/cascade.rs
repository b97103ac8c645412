//! Cascading college → program form controller.
//!
//! The student form's program dropdown is scoped to the selected college.
//! Opening the form for an existing student has to tolerate two observed
//! data states: the student's program may have lost its college (orphaned),
//! or may be missing entirely from the loaded program collection, in which
//! case a placeholder option is synthesized from the denormalized fields on
//! the student row so the form never silently blanks an assignment.

use async_trait::async_trait;
use regis_core::types::DbId;

use crate::api::ApiError;
use crate::models::{Program, Student};

/// Scoped child-option lookup, implemented by the HTTP client.
#[async_trait]
pub trait ProgramSource {
    async fn programs_for_college(&self, college_id: DbId) -> Result<Vec<Program>, ApiError>;
}

/// One row of the program dropdown. `placeholder` marks an option
/// synthesized from denormalized student fields rather than fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildOption {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub placeholder: bool,
}

impl From<&Program> for ChildOption {
    fn from(program: &Program) -> Self {
        Self {
            id: program.id,
            code: program.code.clone(),
            name: program.name.clone(),
            placeholder: false,
        }
    }
}

/// Submission lifecycle for the dialog. One enum, not a pile of booleans.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting,
    Error(String),
}

#[derive(Debug, Default)]
pub struct CascadeForm {
    pub college_selection: Option<DbId>,
    pub program_selection: Option<DbId>,
    pub child_options: Vec<ChildOption>,
    /// Set when the selected program has no college: the form shows an
    /// advisory note and the college dropdown stays empty.
    pub orphan_note: bool,
    pub phase: FormPhase,
}

impl CascadeForm {
    /// Open for create: everything empty, child options empty until a
    /// college is chosen.
    pub fn open_for_create() -> Self {
        Self::default()
    }

    /// Open for edit, resolving the student's program against the loaded
    /// program collection and seeding the cascade accordingly.
    pub async fn open_for_edit<S: ProgramSource>(
        student: &Student,
        loaded_programs: &[Program],
        source: &S,
    ) -> Result<Self, ApiError> {
        let mut form = Self::default();

        let Some(program_id) = student.program_id else {
            return Ok(form);
        };

        match loaded_programs.iter().find(|p| p.id == program_id) {
            Some(program) => match program.college_id {
                Some(college_id) => {
                    // Same reconciliation pass as a manual college change,
                    // seeded with the student's current selection.
                    form.program_selection = Some(program_id);
                    form.set_college(Some(college_id), source).await?;
                }
                None => {
                    form.child_options = vec![ChildOption::from(program)];
                    form.program_selection = Some(program_id);
                    form.orphan_note = true;
                }
            },
            None => {
                let code = student.program_code.clone().unwrap_or_default();
                let name = student
                    .program_name
                    .clone()
                    .unwrap_or_else(|| "Unknown program".to_string());
                form.child_options = vec![ChildOption {
                    id: program_id,
                    code,
                    name,
                    placeholder: true,
                }];
                form.program_selection = Some(program_id);
            }
        }
        Ok(form)
    }

    /// Change the college selection. Re-fetches the scoped program options
    /// and reconciles the current program selection against the new set:
    /// preserved if still present, cleared otherwise.
    pub async fn set_college<S: ProgramSource>(
        &mut self,
        college_id: Option<DbId>,
        source: &S,
    ) -> Result<(), ApiError> {
        self.college_selection = college_id;
        self.orphan_note = false;

        self.child_options = match college_id {
            Some(id) => source
                .programs_for_college(id)
                .await?
                .iter()
                .map(ChildOption::from)
                .collect(),
            None => Vec::new(),
        };

        if let Some(selected) = self.program_selection {
            if !self.child_options.iter().any(|o| o.id == selected) {
                self.program_selection = None;
            }
        }
        Ok(())
    }

    pub fn set_program(&mut self, program_id: Option<DbId>) {
        self.program_selection = program_id;
    }

    /// Whether a submit may be issued: a program must be selected and no
    /// submission may already be in flight.
    pub fn can_submit(&self) -> bool {
        self.program_selection.is_some() && self.phase != FormPhase::Submitting
    }

    pub fn begin_submit(&mut self) {
        self.phase = FormPhase::Submitting;
    }

    /// Record the submit outcome. Errors keep the form open in the error
    /// phase so the user can retry.
    pub fn finish_submit(&mut self, result: Result<(), String>) {
        self.phase = match result {
            Ok(()) => FormPhase::Idle,
            Err(message) => FormPhase::Error(message),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct StubSource {
        by_college: HashMap<DbId, Vec<Program>>,
    }

    #[async_trait]
    impl ProgramSource for StubSource {
        async fn programs_for_college(&self, college_id: DbId) -> Result<Vec<Program>, ApiError> {
            Ok(self.by_college.get(&college_id).cloned().unwrap_or_default())
        }
    }

    fn program(id: DbId, college_id: Option<DbId>, code: &str) -> Program {
        Program {
            id,
            college_id,
            code: code.to_string(),
            name: format!("Bachelor of {code}"),
        }
    }

    fn student(program_id: Option<DbId>) -> Student {
        Student {
            id: "2024-0001".into(),
            first_name: "Ana".into(),
            last_name: "Reyes".into(),
            program_id,
            year_level: 1,
            gender: "Female".into(),
            photo: None,
            program_name: Some("Bachelor of BSCS".into()),
            program_code: Some("BSCS".into()),
        }
    }

    fn source() -> StubSource {
        let mut by_college = HashMap::new();
        by_college.insert(
            1,
            vec![program(10, Some(1), "BSCS"), program(11, Some(1), "BSIT")],
        );
        by_college.insert(2, vec![program(20, Some(2), "BSN")]);
        StubSource { by_college }
    }

    #[tokio::test]
    async fn create_starts_empty() {
        let form = CascadeForm::open_for_create();
        assert_eq!(form.college_selection, None);
        assert_eq!(form.program_selection, None);
        assert!(form.child_options.is_empty());
        assert!(!form.can_submit());
    }

    #[tokio::test]
    async fn edit_with_resolved_program_seeds_the_cascade() {
        let loaded = vec![program(10, Some(1), "BSCS")];
        let form = CascadeForm::open_for_edit(&student(Some(10)), &loaded, &source())
            .await
            .unwrap();

        assert_eq!(form.college_selection, Some(1));
        assert_eq!(form.program_selection, Some(10));
        assert_eq!(form.child_options.len(), 2); // scoped fetch result
        assert!(!form.orphan_note);
    }

    #[tokio::test]
    async fn edit_with_orphaned_program_seeds_exactly_that_program() {
        let loaded = vec![program(30, None, "BSME")];
        let form = CascadeForm::open_for_edit(&student(Some(30)), &loaded, &source())
            .await
            .unwrap();

        assert_eq!(form.college_selection, None);
        assert_eq!(form.program_selection, Some(30));
        assert_eq!(form.child_options.len(), 1);
        assert_eq!(form.child_options[0].code, "BSME");
        assert!(form.orphan_note);
    }

    #[tokio::test]
    async fn edit_with_unresolvable_program_synthesizes_a_placeholder() {
        let form = CascadeForm::open_for_edit(&student(Some(99)), &[], &source())
            .await
            .unwrap();

        assert_eq!(form.program_selection, Some(99));
        assert_eq!(form.child_options.len(), 1);
        assert!(form.child_options[0].placeholder);
        assert_eq!(form.child_options[0].code, "BSCS"); // denormalized field
    }

    #[tokio::test]
    async fn changing_college_clears_a_selection_not_in_the_new_set() {
        let loaded = vec![program(10, Some(1), "BSCS")];
        let mut form = CascadeForm::open_for_edit(&student(Some(10)), &loaded, &source())
            .await
            .unwrap();

        form.set_college(Some(2), &source()).await.unwrap();
        assert_eq!(form.program_selection, None);
        assert_eq!(form.child_options.len(), 1);
    }

    #[tokio::test]
    async fn changing_college_preserves_a_selection_still_present() {
        let mut form = CascadeForm::open_for_create();
        let src = source();

        form.set_college(Some(1), &src).await.unwrap();
        form.set_program(Some(11));

        // Re-selecting the same college re-fetches; 11 is still there.
        form.set_college(Some(1), &src).await.unwrap();
        assert_eq!(form.program_selection, Some(11));
    }

    #[tokio::test]
    async fn clearing_the_college_empties_the_options() {
        let mut form = CascadeForm::open_for_create();
        let src = source();
        form.set_college(Some(1), &src).await.unwrap();
        form.set_program(Some(10));

        form.set_college(None, &src).await.unwrap();
        assert!(form.child_options.is_empty());
        assert_eq!(form.program_selection, None);
    }

    #[tokio::test]
    async fn submit_errors_keep_the_form_in_error_phase() {
        let mut form = CascadeForm::open_for_create();
        form.set_program(Some(10));
        assert!(form.can_submit());

        form.begin_submit();
        assert!(!form.can_submit());

        form.finish_submit(Err("Student ID '2024-0001' already exists.".into()));
        assert_eq!(
            form.phase,
            FormPhase::Error("Student ID '2024-0001' already exists.".into())
        );
        assert!(form.can_submit()); // retry allowed
    }

    #[tokio::test]
    async fn edit_without_program_behaves_like_create() {
        let form = CascadeForm::open_for_edit(&student(None), &[], &source())
            .await
            .unwrap();
        assert_eq!(form.program_selection, None);
        assert!(form.child_options.is_empty());
    }
}
