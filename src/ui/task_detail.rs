use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::db::Database;
use crate::models::Task;
use crate::session::Session;
use crate::ui::components::popup::render_delete_confirmation;

pub struct TaskDetailState {
    task: Task,
    leader_name: Option<String>,
    show_delete_confirmation: bool,
}

impl TaskDetailState {
    pub fn new(task: Task, leader_name: Option<String>) -> Self {
        Self {
            task,
            leader_name,
            show_delete_confirmation: false,
        }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn project_id(&self) -> i64 {
        self.task.project_id
    }

    pub fn toggle_delete_confirmation(&mut self) {
        self.show_delete_confirmation = !self.show_delete_confirmation;
    }
}

pub enum TaskDetailAction {
    Back,
    EditTask(i64),
    DeleteTask(i64),
}

pub async fn load_task_detail(db: &Database, task_id: i64) -> Result<TaskDetailState> {
    let task = db.get_task(task_id).await?;
    let leader_name = db.employee_name(task.leader_id).await?;
    Ok(TaskDetailState::new(task, leader_name))
}

pub fn render_task_detail<B: Backend>(f: &mut Frame<B>, state: &mut TaskDetailState, session: &Session) {
    let size = f.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(size);

    let title = Paragraph::new(state.task.description.trim().to_string())
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let label = Style::default().fg(Color::Yellow);
    let leader = state
        .leader_name
        .clone()
        .unwrap_or_else(|| format!("Unknown (ID {})", state.task.leader_id));
    let mut lines = vec![
        Spans::from(vec![Span::styled("Start Date: ", label), Span::raw(&state.task.start_date)]),
        Spans::from(vec![Span::styled("End Date: ", label), Span::raw(&state.task.end_date)]),
        Spans::from(vec![Span::styled("Task Leader: ", label), Span::raw(leader)]),
        Spans::from(""),
        Spans::from(Span::styled("Comments:", label)),
    ];
    lines.extend(state.task.comments.lines().map(Spans::from));
    let details = Paragraph::new(lines)
        .block(Block::default().title("Details").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(details, chunks[1]);

    let help_text = if session.is_admin() {
        "<E> Edit Record | <D> Delete Record | <Esc> Back"
    } else {
        "<Esc> Back"
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);

    if state.show_delete_confirmation {
        render_delete_confirmation(f, size, "task", "This cannot be undone.");
    }
}

/// Map a key to an action. Mutations only exist for admin sessions.
pub fn handle_key(state: &mut TaskDetailState, session: &Session, key: KeyCode) -> Option<TaskDetailAction> {
    if state.show_delete_confirmation {
        match key {
            KeyCode::Char('y') => {
                state.toggle_delete_confirmation();
                return Some(TaskDetailAction::DeleteTask(state.task.id));
            }
            KeyCode::Char('n') | KeyCode::Char('q') | KeyCode::Esc => {
                state.toggle_delete_confirmation();
            }
            _ => {}
        }
        return None;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(TaskDetailAction::Back),
        KeyCode::Char('e') if session.is_admin() => Some(TaskDetailAction::EditTask(state.task.id)),
        KeyCode::Char('d') if session.is_admin() => {
            state.toggle_delete_confirmation();
            None
        }
        _ => None,
    }
}

pub fn handle_input(state: &mut TaskDetailState, session: &Session) -> Result<Option<TaskDetailAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, session, key.code));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> TaskDetailState {
        TaskDetailState::new(
            Task {
                id: 7,
                project_id: 3,
                description: "Write report".to_string(),
                ..Task::default()
            },
            Some("Ada Lovelace".to_string()),
        )
    }

    #[test]
    fn browse_session_cannot_edit_or_delete() {
        let session = Session::browse_only();
        let mut state = state();
        assert!(handle_key(&mut state, &session, KeyCode::Char('e')).is_none());
        assert!(handle_key(&mut state, &session, KeyCode::Char('d')).is_none());
        assert!(handle_key(&mut state, &session, KeyCode::Char('y')).is_none());
        assert!(matches!(handle_key(&mut state, &session, KeyCode::Esc), Some(TaskDetailAction::Back)));
    }

    #[test]
    fn admin_can_edit_and_delete() {
        let session = Session::admin();
        let mut state = state();
        assert!(matches!(
            handle_key(&mut state, &session, KeyCode::Char('e')),
            Some(TaskDetailAction::EditTask(7))
        ));
        handle_key(&mut state, &session, KeyCode::Char('d'));
        assert!(matches!(
            handle_key(&mut state, &session, KeyCode::Char('y')),
            Some(TaskDetailAction::DeleteTask(7))
        ));
        assert_eq!(state.project_id(), 3);
    }
}
