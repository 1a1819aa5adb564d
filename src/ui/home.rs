use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Spans,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::session::Session;

const MENU: [&str; 2] = ["Projects", "People"];

pub enum HomeAction {
    Exit,
    OpenProjects,
    OpenPeople,
}

pub struct HomeState {
    list_state: ListState,
}

impl HomeState {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { list_state }
    }

    pub fn next(&mut self) {
        let i = self.list_state.selected().map_or(0, |i| (i + 1) % MENU.len());
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let i = self
            .list_state
            .selected()
            .map_or(0, |i| (i + MENU.len() - 1) % MENU.len());
        self.list_state.select(Some(i));
    }
}

impl Default for HomeState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render_home<B: Backend>(f: &mut Frame<B>, state: &mut HomeState, session: &Session) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(4),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    let mode = if session.is_admin() { "Admin" } else { "Browsing" };
    let title = Paragraph::new(Spans::from(format!("Project Management Software ({})", mode)))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = MENU.iter().map(|entry| ListItem::new(*entry)).collect();
    let menu = List::new(items)
        .block(Block::default().title("Home").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    f.render_stateful_widget(menu, chunks[1], &mut state.list_state);

    let help = Paragraph::new("<Enter> Open | <P> Projects | <O> People | <Q> Quit")
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    f.render_widget(help, chunks[2]);
}

pub fn handle_key(state: &mut HomeState, key: KeyCode) -> Option<HomeAction> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(HomeAction::Exit),
        KeyCode::Char('p') => Some(HomeAction::OpenProjects),
        KeyCode::Char('o') => Some(HomeAction::OpenPeople),
        KeyCode::Down => {
            state.next();
            None
        }
        KeyCode::Up => {
            state.previous();
            None
        }
        KeyCode::Enter => match state.list_state.selected() {
            Some(0) => Some(HomeAction::OpenProjects),
            Some(1) => Some(HomeAction::OpenPeople),
            _ => None,
        },
        _ => None,
    }
}

pub fn handle_input(state: &mut HomeState) -> Result<Option<HomeAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, key.code));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_follows_menu_selection() {
        let mut state = HomeState::new();
        assert!(matches!(handle_key(&mut state, KeyCode::Enter), Some(HomeAction::OpenProjects)));
        handle_key(&mut state, KeyCode::Down);
        assert!(matches!(handle_key(&mut state, KeyCode::Enter), Some(HomeAction::OpenPeople)));
        handle_key(&mut state, KeyCode::Down);
        assert!(matches!(handle_key(&mut state, KeyCode::Enter), Some(HomeAction::OpenProjects)));
    }

    #[test]
    fn up_wraps_to_last_entry() {
        let mut state = HomeState::new();
        handle_key(&mut state, KeyCode::Up);
        assert!(matches!(handle_key(&mut state, KeyCode::Enter), Some(HomeAction::OpenPeople)));
    }
}
