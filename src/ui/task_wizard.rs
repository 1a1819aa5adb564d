use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{backend::Backend, Frame};

use crate::models::{Employee, EmployeeRef, Task, TaskDraft};
use crate::ui::components::form::{render_form_screen, FormView};
use crate::ui::components::selector::EmployeeSelector;
use crate::ui::components::text_input::{edit_multiline, edit_text};

pub enum TaskWizardAction {
    Cancel,
    Save(TaskDraft),
}

#[derive(Clone, PartialEq, Copy, Debug)]
pub enum TaskField {
    Description,
    StartDate,
    EndDate,
    Leader,
    Comments,
}

pub struct TaskWizardState {
    pub task: Task,
    pub leader: EmployeeSelector,
    pub current_field: TaskField,
    pub editing: bool,
    pub error: Option<String>,
}

impl TaskWizardState {
    pub fn new(project_id: i64, employees: &[Employee]) -> Self {
        Self {
            task: Task {
                project_id,
                ..Task::default()
            },
            leader: EmployeeSelector::new(employees, None),
            current_field: TaskField::Description,
            editing: false,
            error: None,
        }
    }

    pub fn from_existing(task: Task, employees: &[Employee]) -> Self {
        Self {
            leader: EmployeeSelector::new(employees, Some(task.leader_id)),
            task,
            current_field: TaskField::Description,
            editing: false,
            error: None,
        }
    }

    pub fn project_id(&self) -> i64 {
        self.task.project_id
    }

    pub fn set_error(&mut self, error: impl ToString) {
        self.error = Some(error.to_string());
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            TaskField::Description => TaskField::StartDate,
            TaskField::StartDate => TaskField::EndDate,
            TaskField::EndDate => TaskField::Leader,
            TaskField::Leader => TaskField::Comments,
            TaskField::Comments => TaskField::Description,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            TaskField::Description => TaskField::Comments,
            TaskField::StartDate => TaskField::Description,
            TaskField::EndDate => TaskField::StartDate,
            TaskField::Leader => TaskField::EndDate,
            TaskField::Comments => TaskField::Leader,
        };
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        match self.current_field {
            TaskField::Description => edit_text(&mut self.task.description, key),
            TaskField::StartDate => edit_text(&mut self.task.start_date, key),
            TaskField::EndDate => edit_text(&mut self.task.end_date, key),
            TaskField::Leader => self.leader.handle_key(key),
            TaskField::Comments => edit_multiline(&mut self.task.comments, key),
        }
    }

    /// The draft to submit, or None while no task leader can be chosen
    pub fn draft(&self) -> Option<TaskDraft> {
        let leader = self.leader.selected_id()?;
        Some(TaskDraft {
            id: self.task.id,
            project_id: self.task.project_id,
            description: self.task.description.clone(),
            start_date: self.task.start_date.clone(),
            end_date: self.task.end_date.clone(),
            leader: EmployeeRef::Id(leader),
            comments: self.task.comments.clone(),
        })
    }
}

pub fn render_task_wizard<B: Backend>(f: &mut Frame<B>, state: &mut TaskWizardState) {
    let task = &state.task;
    let view = FormView {
        title: if task.id == 0 { "Add New Task" } else { "Edit Task" },
        form_title: "Task Details",
        fields: vec![
            ("Task Name", task.description.clone()),
            ("Start Date", task.start_date.clone()),
            ("End Date", task.end_date.clone()),
            ("Task Leader", state.leader.display()),
            ("Comments", task.comments.clone()),
        ],
        current: state.current_field as usize,
        editing: state.editing,
        help: match (state.editing, state.current_field) {
            (true, TaskField::Leader) => "Left/Right - Choose leader | Enter - Done",
            (true, TaskField::Comments) => "Enter - New line | Esc - Done",
            (true, _) => "Enter - Save field | Esc - Cancel editing",
            (false, _) => "Enter - Edit field | Up/Down - Navigate fields | S - Submit | Esc - Cancel",
        },
        error: state.error.as_deref(),
    };

    render_form_screen(f, &view);
}

pub fn handle_key(state: &mut TaskWizardState, key: KeyCode) -> Option<TaskWizardAction> {
    match key {
        KeyCode::Esc => {
            if state.editing {
                state.toggle_editing();
            } else {
                return Some(TaskWizardAction::Cancel);
            }
        }
        KeyCode::Enter if state.editing && state.current_field == TaskField::Comments => {
            state.edit_current_field(key)
        }
        KeyCode::Enter => state.toggle_editing(),
        KeyCode::Up if !state.editing => state.previous_field(),
        KeyCode::Down if !state.editing => state.next_field(),
        KeyCode::Char('s') if !state.editing => match state.draft() {
            Some(draft) => return Some(TaskWizardAction::Save(draft)),
            None => state.set_error("Add a person before creating a task"),
        },
        _ if state.editing => state.edit_current_field(key),
        _ => {}
    }

    None
}

pub fn handle_input(state: &mut TaskWizardState) -> Result<Option<TaskWizardAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, key.code));
    }
    Ok(None)
}
