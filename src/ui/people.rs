use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::db::Database;
use crate::models::Employee;
use crate::session::Session;
use crate::ui::components::popup::render_delete_confirmation;

// Represents the state of the people screen
pub struct PeopleState {
    employees: Vec<Employee>,
    list_state: ListState,
    show_delete_confirmation: bool,
}

impl PeopleState {
    pub fn new(employees: Vec<Employee>) -> Self {
        let mut list_state = ListState::default();
        if !employees.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            employees,
            list_state,
            show_delete_confirmation: false,
        }
    }

    /// Move the cursor onto an employee, if it is still listed
    pub fn select_employee(&mut self, id: i64) {
        if let Some(i) = self.employees.iter().position(|e| e.id == id) {
            self.list_state.select(Some(i));
        }
    }

    pub fn next(&mut self) {
        if self.employees.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= self.employees.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.employees.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.employees.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn toggle_delete_confirmation(&mut self) {
        self.show_delete_confirmation = !self.show_delete_confirmation;
    }

    pub fn selected_employee(&self) -> Option<&Employee> {
        self.list_state.selected().and_then(|i| self.employees.get(i))
    }

    pub fn selected_employee_id(&self) -> Option<i64> {
        self.selected_employee().map(|e| e.id)
    }
}

pub enum PeopleAction {
    Back,
    NewPerson,
    EditPerson(i64),
    DeletePerson(i64),
}

pub async fn load_people(db: &Database) -> Result<PeopleState> {
    Ok(PeopleState::new(db.get_employees().await?))
}

pub fn render_people<B: Backend>(frame: &mut Frame<B>, state: &mut PeopleState, session: &Session) {
    let size = frame.size();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)].as_ref())
        .split(size);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)].as_ref())
        .split(rows[0]);

    let items: Vec<ListItem> = state
        .employees
        .iter()
        .map(|employee| ListItem::new(Spans::from(vec![Span::raw(&employee.forename)])))
        .collect();

    let people_list = List::new(items)
        .block(Block::default().title("People").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_stateful_widget(people_list, columns[0], &mut state.list_state);

    render_details(frame, state.selected_employee(), columns[1]);

    let buttons_text = match (session.is_admin(), state.selected_employee().is_some()) {
        (true, true) => "<N> Add New Person | <E> Edit Person | <D> Delete Person | <Esc> Back",
        (true, false) => "<N> Add New Person | <Esc> Back",
        (false, _) => "<Up/Down> Browse | <Esc> Back",
    };
    let buttons = Paragraph::new(buttons_text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(buttons, rows[1]);

    if state.show_delete_confirmation {
        render_delete_confirmation(
            frame,
            size,
            "person",
            "Projects and tasks they lead keep their reference.",
        );
    }
}

fn render_details<B: Backend>(frame: &mut Frame<B>, employee: Option<&Employee>, area: Rect) {
    let label = Style::default().fg(Color::Yellow);
    let lines = match employee {
        Some(employee) => {
            let mut lines = vec![
                Spans::from(Span::styled(
                    employee.full_name(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Spans::from(""),
                Spans::from(vec![Span::styled("Age: ", label), Span::raw(&employee.age)]),
                Spans::from(vec![Span::styled("Expertise: ", label), Span::raw(&employee.expertise)]),
                Spans::from(""),
                Spans::from(Span::styled("Comments:", label)),
            ];
            lines.extend(employee.comments.lines().map(Spans::from));
            lines
        }
        None => vec![Spans::from("No people yet")],
    };

    let details = Paragraph::new(lines)
        .block(Block::default().title("Details").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(details, area);
}

/// Map a key to an action. Mutations only exist for admin sessions.
pub fn handle_key(state: &mut PeopleState, session: &Session, key: KeyCode) -> Option<PeopleAction> {
    if state.show_delete_confirmation {
        match key {
            KeyCode::Char('y') => {
                state.toggle_delete_confirmation();
                return state.selected_employee_id().map(PeopleAction::DeletePerson);
            }
            KeyCode::Char('n') | KeyCode::Char('q') | KeyCode::Esc => {
                state.toggle_delete_confirmation();
            }
            _ => {}
        }
        return None;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(PeopleAction::Back),
        KeyCode::Down => {
            state.next();
            None
        }
        KeyCode::Up => {
            state.previous();
            None
        }
        KeyCode::Char('n') if session.is_admin() => Some(PeopleAction::NewPerson),
        KeyCode::Char('e') if session.is_admin() => {
            state.selected_employee_id().map(PeopleAction::EditPerson)
        }
        KeyCode::Char('d') if session.is_admin() => {
            if state.selected_employee().is_some() {
                state.toggle_delete_confirmation();
            }
            None
        }
        _ => None,
    }
}

pub fn handle_input(state: &mut PeopleState, session: &Session) -> Result<Option<PeopleAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, session, key.code));
    }
    Ok(None)
}
