use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::config::Config;
use crate::db::Database;
use crate::models::{Project, Task};
use crate::session::Session;
use crate::ui::components::popup::render_delete_confirmation;

/// A project together with everything its detail pane shows
pub struct ProjectEntry {
    pub project: Project,
    pub owner_name: Option<String>,
    pub budget: String,
    pub tasks: Vec<Task>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Focus {
    Projects,
    Tasks,
}

// Represents the state of the project screen
pub struct ProjectsState {
    entries: Vec<ProjectEntry>,
    list_state: ListState,
    task_state: ListState,
    focus: Focus,
    show_delete_confirmation: bool,
}

impl ProjectsState {
    pub fn new(entries: Vec<ProjectEntry>) -> Self {
        let mut list_state = ListState::default();
        if !entries.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            entries,
            list_state,
            task_state: ListState::default(),
            focus: Focus::Projects,
            show_delete_confirmation: false,
        }
    }

    /// Move the cursor onto a project, if it is still listed
    pub fn select_project(&mut self, id: i64) {
        if let Some(i) = self.entries.iter().position(|e| e.project.id == id) {
            self.list_state.select(Some(i));
            self.task_state.select(None);
            self.focus = Focus::Projects;
        }
    }

    fn move_project(&mut self, forward: bool) {
        if self.entries.is_empty() {
            return;
        }

        let len = self.entries.len();
        let i = match self.list_state.selected() {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        self.list_state.select(Some(i));
        self.task_state.select(None);
    }

    fn move_task(&mut self, forward: bool) {
        let len = self.selected_entry().map_or(0, |e| e.tasks.len());
        if len == 0 {
            return;
        }

        let i = match self.task_state.selected() {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        self.task_state.select(Some(i));
    }

    fn focus_tasks(&mut self) {
        let has_tasks = self.selected_entry().is_some_and(|e| !e.tasks.is_empty());
        if has_tasks {
            self.focus = Focus::Tasks;
            if self.task_state.selected().is_none() {
                self.task_state.select(Some(0));
            }
        }
    }

    fn focus_projects(&mut self) {
        self.focus = Focus::Projects;
    }

    pub fn toggle_delete_confirmation(&mut self) {
        self.show_delete_confirmation = !self.show_delete_confirmation;
    }

    pub fn selected_entry(&self) -> Option<&ProjectEntry> {
        self.list_state.selected().and_then(|i| self.entries.get(i))
    }

    pub fn selected_project_id(&self) -> Option<i64> {
        self.selected_entry().map(|e| e.project.id)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let entry = self.selected_entry()?;
        self.task_state.selected().and_then(|i| entry.tasks.get(i))
    }
}

pub enum ProjectAction {
    Back,
    NewProject,
    EditProject(i64),   // Contains project_id
    DeleteProject(i64), // Contains project_id
    NewTask(i64),       // Contains project_id
    ViewTask(i64),      // Contains task_id
}

// DB operations for projects
pub async fn load_projects(db: &Database, config: &Config) -> Result<ProjectsState> {
    let projects = db.get_projects().await?;
    let employees = db.get_employees().await?;

    let mut entries = Vec::with_capacity(projects.len());
    for project in projects {
        let owner_name = employees
            .iter()
            .find(|e| e.id == project.owner)
            .map(|e| e.full_name());
        let tasks = db.get_tasks_for_project(project.id).await?;
        let budget = config.format_budget(&project.budget);

        entries.push(ProjectEntry {
            project,
            owner_name,
            budget,
            tasks,
        });
    }

    Ok(ProjectsState::new(entries))
}

pub fn render_projects<B: Backend>(frame: &mut Frame<B>, state: &mut ProjectsState, session: &Session) {
    let size = frame.size();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)].as_ref())
        .split(size);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(25),
                Constraint::Percentage(30),
                Constraint::Percentage(45),
            ]
            .as_ref(),
        )
        .split(rows[0]);

    let highlight = Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let focused_border = |focused: bool| {
        if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    };

    let items: Vec<ListItem> = state
        .entries
        .iter()
        .map(|entry| ListItem::new(Spans::from(vec![Span::raw(&entry.project.name)])))
        .collect();

    let projects_list = List::new(items)
        .block(
            Block::default()
                .title("Projects")
                .borders(Borders::ALL)
                .border_style(focused_border(state.focus == Focus::Projects)),
        )
        .highlight_style(highlight);
    frame.render_stateful_widget(projects_list, columns[0], &mut state.list_state);

    render_details(frame, state.selected_entry(), columns[1]);

    // Field access keeps the borrow off `task_state`
    let task_items: Vec<ListItem> = state
        .list_state
        .selected()
        .and_then(|i| state.entries.get(i))
        .map(|entry| {
            entry
                .tasks
                .iter()
                .map(|task| ListItem::new(Spans::from(vec![Span::raw(task.description.trim())])))
                .collect()
        })
        .unwrap_or_default();

    let tasks_list = List::new(task_items)
        .block(
            Block::default()
                .title("Tasks")
                .borders(Borders::ALL)
                .border_style(focused_border(state.focus == Focus::Tasks)),
        )
        .highlight_style(highlight);
    frame.render_stateful_widget(tasks_list, columns[2], &mut state.task_state);

    let has_project = state.selected_entry().is_some();
    let buttons_text = match (session.is_admin(), has_project) {
        (true, true) if state.focus == Focus::Tasks => {
            "<E> Edit Project | <T> Add New Task | <Enter> View Task | <Tab> Projects | <Esc> Projects"
        }
        (true, true) => {
            "<N> New Project | <E> Edit Project | <D> Delete Project | <T> Add New Task | <Tab> Tasks | <Enter> View Task | <Esc> Back"
        }
        (true, false) => "<N> New Project | <Esc> Back",
        (false, true) => "<Tab> Tasks | <Enter> View Task | <Esc> Back",
        (false, false) => "<Esc> Back",
    };
    let buttons = Paragraph::new(buttons_text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(buttons, rows[1]);

    if state.show_delete_confirmation {
        let what = state
            .selected_entry()
            .map(|entry| format!("project \"{}\"", entry.project.name.trim()))
            .unwrap_or_else(|| "project".to_string());
        render_delete_confirmation(frame, size, &what, "Its tasks are not deleted.");
    }
}

fn render_details<B: Backend>(frame: &mut Frame<B>, entry: Option<&ProjectEntry>, area: Rect) {
    let label = Style::default().fg(Color::Yellow);
    let lines = match entry {
        Some(entry) => {
            let project = &entry.project;
            let lead = entry
                .owner_name
                .clone()
                .unwrap_or_else(|| format!("Unknown (ID {})", project.owner));
            vec![
                Spans::from(vec![Span::styled("Project id: ", label), Span::raw(project.id.to_string())]),
                Spans::from(""),
                Spans::from(Span::styled("Project Title: ", label)),
                Spans::from(Span::styled(
                    project.name.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Spans::from(""),
                Spans::from(vec![Span::styled("Start Date: ", label), Span::raw(&project.start_date)]),
                Spans::from(vec![Span::styled("End Date: ", label), Span::raw(&project.end_date)]),
                Spans::from(vec![Span::styled("Budget: ", label), Span::raw(&entry.budget)]),
                Spans::from(vec![Span::styled("Project Lead: ", label), Span::raw(lead)]),
            ]
        }
        None => vec![Spans::from("No projects yet")],
    };

    let details = Paragraph::new(lines).block(Block::default().title("Details").borders(Borders::ALL));
    frame.render_widget(details, area);
}

/// Map a key to an action. Mutations only exist for admin sessions.
pub fn handle_key(state: &mut ProjectsState, session: &Session, key: KeyCode) -> Option<ProjectAction> {
    if state.show_delete_confirmation {
        match key {
            KeyCode::Char('y') => {
                state.toggle_delete_confirmation();
                return state.selected_project_id().map(ProjectAction::DeleteProject);
            }
            KeyCode::Char('n') | KeyCode::Char('q') | KeyCode::Esc => {
                state.toggle_delete_confirmation();
            }
            _ => {}
        }
        return None;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => {
            if state.focus == Focus::Tasks {
                state.focus_projects();
                None
            } else {
                Some(ProjectAction::Back)
            }
        }
        KeyCode::Tab => {
            match state.focus {
                Focus::Projects => state.focus_tasks(),
                Focus::Tasks => state.focus_projects(),
            }
            None
        }
        KeyCode::Down | KeyCode::Up => {
            let forward = key == KeyCode::Down;
            match state.focus {
                Focus::Projects => state.move_project(forward),
                Focus::Tasks => state.move_task(forward),
            }
            None
        }
        KeyCode::Enter => match state.focus {
            Focus::Projects => {
                state.focus_tasks();
                None
            }
            Focus::Tasks => state.selected_task().map(|task| ProjectAction::ViewTask(task.id)),
        },
        KeyCode::Char('n') if session.is_admin() => Some(ProjectAction::NewProject),
        KeyCode::Char('e') if session.is_admin() => {
            state.selected_project_id().map(ProjectAction::EditProject)
        }
        KeyCode::Char('t') if session.is_admin() => {
            state.selected_project_id().map(ProjectAction::NewTask)
        }
        KeyCode::Char('d') if session.is_admin() && state.focus == Focus::Projects => {
            if state.selected_entry().is_some() {
                state.toggle_delete_confirmation();
            }
            None
        }
        _ => None,
    }
}

pub fn handle_input(state: &mut ProjectsState, session: &Session) -> Result<Option<ProjectAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, session, key.code));
    }
    Ok(None)
}
