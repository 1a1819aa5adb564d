use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{backend::Backend, Frame};

use crate::models::{Employee, EmployeeRef, Project, ProjectDraft};
use crate::ui::components::form::{render_form_screen, FormView};
use crate::ui::components::selector::EmployeeSelector;
use crate::ui::components::text_input::edit_text;

pub enum ProjectWizardAction {
    Cancel,
    Save(ProjectDraft),
}

#[derive(Clone, PartialEq, Copy, Debug)]
pub enum ProjectField {
    Name,
    StartDate,
    EndDate,
    Budget,
    Owner,
}

pub struct ProjectWizardState {
    pub project: Project,
    pub owner: EmployeeSelector,
    pub current_field: ProjectField,
    pub editing: bool,
    pub error: Option<String>,
}

impl ProjectWizardState {
    pub fn new(employees: &[Employee]) -> Self {
        Self {
            project: Project::default(),
            owner: EmployeeSelector::new(employees, None),
            current_field: ProjectField::Name,
            editing: false,
            error: None,
        }
    }

    pub fn from_existing(project: Project, employees: &[Employee]) -> Self {
        Self {
            owner: EmployeeSelector::new(employees, Some(project.owner)),
            project,
            current_field: ProjectField::Name,
            editing: false,
            error: None,
        }
    }

    pub fn set_error(&mut self, error: impl ToString) {
        self.error = Some(error.to_string());
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            ProjectField::Name => ProjectField::StartDate,
            ProjectField::StartDate => ProjectField::EndDate,
            ProjectField::EndDate => ProjectField::Budget,
            ProjectField::Budget => ProjectField::Owner,
            ProjectField::Owner => ProjectField::Name,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            ProjectField::Name => ProjectField::Owner,
            ProjectField::StartDate => ProjectField::Name,
            ProjectField::EndDate => ProjectField::StartDate,
            ProjectField::Budget => ProjectField::EndDate,
            ProjectField::Owner => ProjectField::Budget,
        };
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        match self.current_field {
            ProjectField::Name => edit_text(&mut self.project.name, key),
            ProjectField::StartDate => edit_text(&mut self.project.start_date, key),
            ProjectField::EndDate => edit_text(&mut self.project.end_date, key),
            ProjectField::Budget => edit_text(&mut self.project.budget, key),
            ProjectField::Owner => self.owner.handle_key(key),
        }
    }

    /// The draft to submit, or None while no project lead can be chosen
    pub fn draft(&self) -> Option<ProjectDraft> {
        let owner = self.owner.selected_id()?;
        Some(ProjectDraft {
            id: self.project.id,
            name: self.project.name.clone(),
            start_date: self.project.start_date.clone(),
            end_date: self.project.end_date.clone(),
            budget: self.project.budget.clone(),
            owner: EmployeeRef::Id(owner),
        })
    }
}

pub fn render_project_wizard<B: Backend>(f: &mut Frame<B>, state: &mut ProjectWizardState) {
    let project = &state.project;
    let view = FormView {
        title: if project.id == 0 { "Add New Project" } else { "Edit Project" },
        form_title: "Project Details",
        fields: vec![
            ("Project Name", project.name.clone()),
            ("Start Date", project.start_date.clone()),
            ("End Date", project.end_date.clone()),
            ("Budget", project.budget.clone()),
            ("Project Lead", state.owner.display()),
        ],
        current: state.current_field as usize,
        editing: state.editing,
        help: match (state.editing, state.current_field) {
            (true, ProjectField::Owner) => "Left/Right - Choose lead | Enter - Done",
            (true, _) => "Enter - Save field | Esc - Cancel editing",
            (false, _) => "Enter - Edit field | Up/Down - Navigate fields | S - Submit | Esc - Cancel",
        },
        error: state.error.as_deref(),
    };

    render_form_screen(f, &view);
}

pub fn handle_key(state: &mut ProjectWizardState, key: KeyCode) -> Option<ProjectWizardAction> {
    match key {
        KeyCode::Esc => {
            if state.editing {
                state.toggle_editing();
            } else {
                return Some(ProjectWizardAction::Cancel);
            }
        }
        KeyCode::Enter => state.toggle_editing(),
        KeyCode::Up if !state.editing => state.previous_field(),
        KeyCode::Down if !state.editing => state.next_field(),
        KeyCode::Char('s') if !state.editing => match state.draft() {
            Some(draft) => return Some(ProjectWizardAction::Save(draft)),
            None => state.set_error("Add a person before creating a project"),
        },
        _ if state.editing => state.edit_current_field(key),
        _ => {}
    }

    None
}

pub fn handle_input(state: &mut ProjectWizardState) -> Result<Option<ProjectWizardAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, key.code));
    }
    Ok(None)
}
