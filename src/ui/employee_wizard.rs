use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{backend::Backend, Frame};

use crate::models::Employee;
use crate::ui::components::form::{render_form_screen, FormView};
use crate::ui::components::text_input::{edit_multiline, edit_text};

pub enum EmployeeWizardAction {
    Cancel,
    Save(Employee),
}

#[derive(Clone, PartialEq, Copy, Debug)]
pub enum EmployeeField {
    Forename,
    Surname,
    Age,
    Expertise,
    Comments,
}

pub struct EmployeeWizardState {
    pub employee: Employee,
    pub current_field: EmployeeField,
    pub editing: bool,
    pub error: Option<String>,
}

impl EmployeeWizardState {
    pub fn new() -> Self {
        Self::from_existing(Employee::default())
    }

    pub fn from_existing(employee: Employee) -> Self {
        Self {
            employee,
            current_field: EmployeeField::Forename,
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
            EmployeeField::Forename => EmployeeField::Surname,
            EmployeeField::Surname => EmployeeField::Age,
            EmployeeField::Age => EmployeeField::Expertise,
            EmployeeField::Expertise => EmployeeField::Comments,
            EmployeeField::Comments => EmployeeField::Forename,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            EmployeeField::Forename => EmployeeField::Comments,
            EmployeeField::Surname => EmployeeField::Forename,
            EmployeeField::Age => EmployeeField::Surname,
            EmployeeField::Expertise => EmployeeField::Age,
            EmployeeField::Comments => EmployeeField::Expertise,
        };
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        match self.current_field {
            EmployeeField::Forename => edit_text(&mut self.employee.forename, key),
            EmployeeField::Surname => edit_text(&mut self.employee.surname, key),
            EmployeeField::Age => edit_text(&mut self.employee.age, key),
            EmployeeField::Expertise => edit_text(&mut self.employee.expertise, key),
            EmployeeField::Comments => edit_multiline(&mut self.employee.comments, key),
        }
    }
}

impl Default for EmployeeWizardState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render_employee_wizard<B: Backend>(f: &mut Frame<B>, state: &mut EmployeeWizardState) {
    let employee = &state.employee;
    let view = FormView {
        title: if employee.id == 0 { "Add New Person" } else { "Edit Person" },
        form_title: "Person Details",
        fields: vec![
            ("Forename", employee.forename.clone()),
            ("Surname", employee.surname.clone()),
            ("Age", employee.age.clone()),
            ("Expertise", employee.expertise.clone()),
            ("Comments", employee.comments.clone()),
        ],
        current: state.current_field as usize,
        editing: state.editing,
        help: match (state.editing, state.current_field) {
            (true, EmployeeField::Comments) => "Enter - New line | Esc - Done",
            (true, _) => "Enter - Save field | Esc - Cancel editing",
            (false, _) => "Enter - Edit field | Up/Down - Navigate fields | S - Submit | Esc - Cancel",
        },
        error: state.error.as_deref(),
    };

    render_form_screen(f, &view);
}

pub fn handle_key(state: &mut EmployeeWizardState, key: KeyCode) -> Option<EmployeeWizardAction> {
    match key {
        KeyCode::Esc => {
            if state.editing {
                state.toggle_editing();
            } else {
                return Some(EmployeeWizardAction::Cancel);
            }
        }
        KeyCode::Enter if state.editing && state.current_field == EmployeeField::Comments => {
            state.edit_current_field(key)
        }
        KeyCode::Enter => state.toggle_editing(),
        KeyCode::Up if !state.editing => state.previous_field(),
        KeyCode::Down if !state.editing => state.next_field(),
        KeyCode::Char('s') if !state.editing => {
            return Some(EmployeeWizardAction::Save(state.employee.clone()));
        }
        _ if state.editing => state.edit_current_field(key),
        _ => {}
    }

    None
}

pub fn handle_input(state: &mut EmployeeWizardState) -> Result<Option<EmployeeWizardAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, key.code));
    }
    Ok(None)
}
