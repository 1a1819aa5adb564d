use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// What a wizard screen needs drawn: title, labelled fields, help and error lines
pub struct FormView<'a> {
    pub title: &'a str,
    pub form_title: &'a str,
    pub fields: Vec<(&'a str, String)>,
    pub current: usize,
    pub editing: bool,
    pub help: &'a str,
    pub error: Option<&'a str>,
}

pub fn render_form_screen<B: Backend>(f: &mut Frame<B>, view: &FormView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    let title = Paragraph::new(view.title)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    render_fields(f, view, chunks[1]);

    let help = match view.error {
        Some(error) => Paragraph::new(Spans::from(vec![
            Span::styled(error, Style::default().fg(Color::Red)),
            Span::raw(" | "),
            Span::raw(view.help),
        ])),
        None => Paragraph::new(view.help).style(Style::default().fg(Color::Gray)),
    }
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

fn render_fields<B: Backend>(f: &mut Frame<B>, view: &FormView, area: Rect) {
    let items: Vec<ListItem> = view
        .fields
        .iter()
        .enumerate()
        .map(|(i, (name, value))| {
            let editing = i == view.current && view.editing;
            let (label_style, value_style) = if editing {
                (Style::default().fg(Color::Yellow), Style::default().add_modifier(Modifier::BOLD))
            } else if i == view.current {
                (Style::default().fg(Color::Yellow), Style::default())
            } else {
                (Style::default(), Style::default())
            };

            let label = format!("{}: ", name);
            let indent = " ".repeat(label.len());
            let text = if editing { format!("{}|", value) } else { value.clone() };

            // Multi-line values continue under the first line
            let lines: Vec<Spans> = text
                .split('\n')
                .enumerate()
                .map(|(n, line)| {
                    let lead = if n == 0 {
                        Span::styled(label.clone(), label_style)
                    } else {
                        Span::raw(indent.clone())
                    };
                    Spans::from(vec![lead, Span::styled(line.to_string(), value_style)])
                })
                .collect();

            ListItem::new(lines)
        })
        .collect();

    let form_list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(view.form_title))
        .highlight_style(Style::default().fg(Color::Yellow));

    f.render_widget(form_list, area);
}
