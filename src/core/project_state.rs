use leptos::{RwSignal, SignalUpdate, SignalWithUntracked};
use std::cell::RefCell;
use std::rc::Rc;

use super::abi::RawProject;
use super::status::ProjectStatus;
use super::units::format_ether;

/// Which role the projects list is shown for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectsTab {
    #[default]
    Client,
    Freelancer,
}

impl ProjectsTab {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectsTab::Client => "As a Client",
            ProjectsTab::Freelancer => "As a Freelancer",
        }
    }
}

/// One row of the projects list
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecord {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    /// Fee in ether, display only
    pub fee_amount: String,
    pub expanded: bool,
}

impl ProjectRecord {
    pub fn from_raw(raw: RawProject) -> Self {
        Self {
            id: raw.id,
            title: raw.name,
            description: raw.description,
            status: ProjectStatus::from_code(raw.status),
            fee_amount: format_ether(raw.project_fee),
            expanded: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Description,
    FeeAmount,
}

/// Unsubmitted contents of the create-project form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub name: String,
    pub description: String,
    pub fee_amount: String,
}

impl FormDraft {
    pub fn set(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Name => self.name = value,
            DraftField::Description => self.description = value,
            DraftField::FeeAmount => self.fee_amount = value,
        }
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Description => &self.description,
            DraftField::FeeAmount => &self.fee_amount,
        }
    }

    /// All three fields must be filled in; returns the first empty one
    pub fn validate(&self) -> Result<(), DraftField> {
        [DraftField::Name, DraftField::Description, DraftField::FeeAmount]
            .into_iter()
            .find(|field| self.get(*field).is_empty())
            .map_or(Ok(()), Err)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Everything the projects page renders from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectsState {
    pub active_tab: ProjectsTab,
    pub client_projects: Vec<ProjectRecord>,
    pub freelancer_projects: Vec<ProjectRecord>,
    pub draft: FormDraft,
    pub show_modal: bool,
    pub busy: bool,
    /// Account the lists were last loaded for
    pub wallet_address: Option<String>,
}

impl ProjectsState {
    pub fn projects(&self, tab: ProjectsTab) -> &[ProjectRecord] {
        match tab {
            ProjectsTab::Client => &self.client_projects,
            ProjectsTab::Freelancer => &self.freelancer_projects,
        }
    }

    fn projects_mut(&mut self, tab: ProjectsTab) -> &mut Vec<ProjectRecord> {
        match tab {
            ProjectsTab::Client => &mut self.client_projects,
            ProjectsTab::Freelancer => &mut self.freelancer_projects,
        }
    }

    pub fn visible_projects(&self) -> &[ProjectRecord] {
        self.projects(self.active_tab)
    }

    pub fn replace_projects(&mut self, tab: ProjectsTab, projects: Vec<ProjectRecord>) {
        *self.projects_mut(tab) = projects;
    }

    /// Flip `expanded` on one row of the active list
    pub fn toggle_expanded(&mut self, project_id: u64) {
        let tab = self.active_tab;
        if let Some(project) = self
            .projects_mut(tab)
            .iter_mut()
            .find(|p| p.id == project_id)
        {
            project.expanded = !project.expanded;
        }
    }

    /// Removal is offered for open projects on the client tab only
    pub fn can_remove(&self, project: &ProjectRecord) -> bool {
        self.active_tab == ProjectsTab::Client && project.status.is_open()
    }

    /// Rows of the active list paired with their removal flag
    ///
    /// Depends on the active tab and its list only, so form edits leave it unchanged.
    pub fn visible_rows(&self) -> Vec<(ProjectRecord, bool)> {
        self.visible_projects()
            .iter()
            .map(|p| (p.clone(), self.can_remove(p)))
            .collect()
    }
}

/// Read/write access to the page state
///
/// The page keeps its state in a signal; headless callers use a plain
/// `Rc<RefCell<_>>`.
pub trait ViewStore: Clone + 'static {
    fn read<R>(&self, f: impl FnOnce(&ProjectsState) -> R) -> R;
    fn write(&self, f: impl FnOnce(&mut ProjectsState));
}

impl ViewStore for RwSignal<ProjectsState> {
    fn read<R>(&self, f: impl FnOnce(&ProjectsState) -> R) -> R {
        self.with_untracked(f)
    }

    fn write(&self, f: impl FnOnce(&mut ProjectsState)) {
        self.update(f);
    }
}

impl ViewStore for Rc<RefCell<ProjectsState>> {
    fn read<R>(&self, f: impl FnOnce(&ProjectsState) -> R) -> R {
        f(&self.borrow())
    }

    fn write(&self, f: impl FnOnce(&mut ProjectsState)) {
        f(&mut self.borrow_mut());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, status: ProjectStatus) -> ProjectRecord {
        ProjectRecord {
            id,
            title: format!("Project {}", id),
            description: String::new(),
            status,
            fee_amount: "1.0".to_string(),
            expanded: false,
        }
    }

    fn state_with_both_lists() -> ProjectsState {
        ProjectsState {
            client_projects: vec![record(1, ProjectStatus::Open), record(2, ProjectStatus::Completed)],
            freelancer_projects: vec![record(1, ProjectStatus::InProgress)],
            ..ProjectsState::default()
        }
    }

    #[test]
    fn maps_raw_project_into_record() {
        let record = ProjectRecord::from_raw(RawProject {
            id: 9,
            name: "Logo".to_string(),
            description: "desc".to_string(),
            status: 2,
            project_fee: 1_500_000_000_000_000_000,
        });
        assert_eq!(record.id, 9);
        assert_eq!(record.title, "Logo");
        assert_eq!(record.status, ProjectStatus::InDispute);
        assert_eq!(record.fee_amount, "1.5");
        assert!(!record.expanded);
    }

    #[test]
    fn toggling_touches_only_one_row_of_the_active_tab() {
        let mut state = state_with_both_lists();
        state.toggle_expanded(1);

        assert!(state.client_projects[0].expanded);
        assert!(!state.client_projects[1].expanded);
        // same id on the other tab stays collapsed
        assert!(!state.freelancer_projects[0].expanded);

        state.toggle_expanded(1);
        assert!(!state.client_projects[0].expanded);
    }

    #[test]
    fn toggling_unknown_id_is_a_no_op() {
        let mut state = state_with_both_lists();
        let before = state.clone();
        state.toggle_expanded(77);
        assert_eq!(state, before);
    }

    #[test]
    fn visible_list_follows_active_tab() {
        let mut state = state_with_both_lists();
        assert_eq!(state.visible_projects().len(), 2);
        state.active_tab = ProjectsTab::Freelancer;
        assert_eq!(state.visible_projects().len(), 1);
    }

    #[test]
    fn removal_only_for_open_client_projects() {
        let mut state = state_with_both_lists();
        let open = state.client_projects[0].clone();
        let completed = state.client_projects[1].clone();
        assert!(state.can_remove(&open));
        assert!(!state.can_remove(&completed));

        state.active_tab = ProjectsTab::Freelancer;
        assert!(!state.can_remove(&open));
    }

    #[test]
    fn rows_ignore_form_and_modal_state() {
        let mut state = state_with_both_lists();
        let rows = state.visible_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0.id, 1);
        assert!(rows[0].1);
        assert!(!rows[1].1);

        state.show_modal = true;
        state.busy = true;
        state.draft.set(DraftField::Name, "L".to_string());
        state.draft.set(DraftField::Name, "Lo".to_string());
        assert_eq!(state.visible_rows(), rows);

        state.active_tab = ProjectsTab::Freelancer;
        assert_ne!(state.visible_rows(), rows);
    }

    #[test]
    fn draft_validation_reports_first_empty_field() {
        let mut draft = FormDraft::default();
        assert_eq!(draft.validate(), Err(DraftField::Name));

        draft.set(DraftField::Name, "Logo".to_string());
        draft.set(DraftField::Description, "desc".to_string());
        assert_eq!(draft.validate(), Err(DraftField::FeeAmount));

        draft.set(DraftField::FeeAmount, "1.0".to_string());
        assert_eq!(draft.validate(), Ok(()));

        draft.clear();
        assert_eq!(draft, FormDraft::default());
    }
}
