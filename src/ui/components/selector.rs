use crossterm::event::KeyCode;

use crate::models::Employee;

/// Picks an employee by ID for an owner or leader field.
///
/// Cycles with Left/Right so names never have to be typed or parsed.
#[derive(Debug, Clone)]
pub struct EmployeeSelector {
    options: Vec<(i64, String)>,
    index: Option<usize>,
}

impl EmployeeSelector {
    /// A `current` ID with no matching employee stays selected as
    /// `Unknown (ID n)` until another employee is picked.
    pub fn new(employees: &[Employee], current: Option<i64>) -> Self {
        let mut options: Vec<(i64, String)> = employees
            .iter()
            .map(|employee| (employee.id, employee.full_name()))
            .collect();

        let index = match current {
            Some(id) => match options.iter().position(|(option_id, _)| *option_id == id) {
                Some(i) => Some(i),
                None => {
                    options.insert(0, (id, format!("Unknown (ID {})", id)));
                    Some(0)
                }
            },
            None if options.is_empty() => None,
            None => Some(0),
        };

        Self { options, index }
    }

    pub fn next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.index = Some(match self.index {
            Some(i) if i + 1 < self.options.len() => i + 1,
            _ => 0,
        });
    }

    pub fn previous(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.index = Some(match self.index {
            Some(0) | None => self.options.len() - 1,
            Some(i) => i - 1,
        });
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Right | KeyCode::Char(' ') => self.next(),
            KeyCode::Left => self.previous(),
            _ => {}
        }
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.index.and_then(|i| self.options.get(i)).map(|(id, _)| *id)
    }

    pub fn display(&self) -> String {
        self.index
            .and_then(|i| self.options.get(i))
            .map(|(_, name)| name.clone())
            .unwrap_or_else(|| "No employees".to_string())
    }
}
