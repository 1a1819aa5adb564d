use crossterm::event::KeyCode;

/// Apply one key press to a free-text field.
pub fn edit_text(value: &mut String, key: KeyCode) {
    match key {
        KeyCode::Char(c) => value.push(c),
        KeyCode::Backspace => {
            value.pop();
        }
        _ => {}
    }
}

/// Like `edit_text`, but Enter starts a new line.
pub fn edit_multiline(value: &mut String, key: KeyCode) {
    match key {
        KeyCode::Enter => value.push('\n'),
        _ => edit_text(value, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_backspace() {
        let mut value = String::from("Ad");
        edit_text(&mut value, KeyCode::Char('a'));
        assert_eq!(value, "Ada");
        edit_text(&mut value, KeyCode::Backspace);
        edit_text(&mut value, KeyCode::Left);
        assert_eq!(value, "Ad");
    }

    #[test]
    fn multiline_enter_adds_newline() {
        let mut value = String::from("one");
        edit_multiline(&mut value, KeyCode::Enter);
        edit_multiline(&mut value, KeyCode::Char('2'));
        assert_eq!(value, "one\n2");
        edit_multiline(&mut value, KeyCode::Backspace);
        edit_multiline(&mut value, KeyCode::Backspace);
        assert_eq!(value, "one");
    }

    #[test]
    fn backspace_on_empty_is_noop() {
        let mut value = String::new();
        edit_text(&mut value, KeyCode::Backspace);
        assert!(value.is_empty());
    }
}
