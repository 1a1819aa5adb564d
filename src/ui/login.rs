use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::components::text_input::edit_text;

pub enum LoginAction {
    Exit,
    Submit(String),
}

#[derive(Default)]
pub struct LoginState {
    password: String,
}

impl LoginState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn masked(&self) -> String {
        "*".repeat(self.password.chars().count())
    }
}

pub fn render_login<B: Backend>(f: &mut Frame<B>, state: &mut LoginState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    let title = Paragraph::new("Login Page")
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let password = Paragraph::new(Spans::from(vec![
        Span::styled("Admin Password: ", Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("{}|", state.masked()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL).title("(Optional)"));
    f.render_widget(password, chunks[1]);

    let help = Paragraph::new("Enter - Log in | Esc - Quit")
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);
}

pub fn handle_key(state: &mut LoginState, key: KeyCode) -> Option<LoginAction> {
    match key {
        KeyCode::Esc => Some(LoginAction::Exit),
        KeyCode::Enter => Some(LoginAction::Submit(std::mem::take(&mut state.password))),
        other => {
            edit_text(&mut state.password, other);
            None
        }
    }
}

pub fn handle_input(state: &mut LoginState) -> Result<Option<LoginAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, key.code));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(state: &mut LoginState, text: &str) {
        for c in text.chars() {
            assert!(handle_key(state, KeyCode::Char(c)).is_none());
        }
    }

    #[test]
    fn enter_submits_typed_password() {
        let mut state = LoginState::new();
        type_text(&mut state, "adminx");
        handle_key(&mut state, KeyCode::Backspace);
        assert_eq!(state.masked(), "*****");
        match handle_key(&mut state, KeyCode::Enter) {
            Some(LoginAction::Submit(password)) => assert_eq!(password, "admin"),
            _ => panic!("expected submit"),
        }
    }

    #[test]
    fn empty_password_still_submits() {
        let mut state = LoginState::new();
        assert!(matches!(
            handle_key(&mut state, KeyCode::Enter),
            Some(LoginAction::Submit(password)) if password.is_empty()
        ));
    }

    #[test]
    fn escape_exits() {
        let mut state = LoginState::new();
        assert!(matches!(handle_key(&mut state, KeyCode::Esc), Some(LoginAction::Exit)));
    }
}
