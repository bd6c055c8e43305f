//! Single-line text input

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ui::Theme;
use crate::utils::truncate_middle;

/// Which characters an input accepts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFilter {
    /// Any printable character
    Any,
    /// Digits, plus ',' and '_' as group separators
    Amount,
}

impl InputFilter {
    fn accepts(self, c: char) -> bool {
        match self {
            InputFilter::Any => !c.is_control(),
            InputFilter::Amount => c.is_ascii_digit() || c == ',' || c == '_',
        }
    }
}

/// Editable one-line buffer
#[derive(Clone, Debug)]
pub struct TextInput {
    value: String,
    filter: InputFilter,
    max_len: usize,
}

impl TextInput {
    pub fn new(filter: InputFilter, max_len: usize) -> Self {
        Self {
            value: String::new(),
            filter,
            max_len,
        }
    }

    /// Input pre-filled with `value`, kept verbatim
    ///
    /// The cap grows to fit the value so a long pre-fill is never cut short.
    /// The filter and cap still apply to later typing.
    pub fn with_value(filter: InputFilter, max_len: usize, value: &str) -> Self {
        Self {
            value: value.to_string(),
            filter,
            max_len: max_len.max(value.chars().count()),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Append one character; returns false if it was rejected
    pub fn push(&mut self, c: char) -> bool {
        if !self.filter.accepts(c) || self.value.chars().count() >= self.max_len {
            return false;
        }
        self.value.push(c);
        true
    }

    /// Append pasted text, dropping rejected characters and line breaks
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars() {
            self.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn set(&mut self, value: &str) {
        self.clear();
        self.insert_str(value);
    }

    /// Render as a bordered field with label and placeholder
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        placeholder: &str,
        focused: bool,
        theme: &Theme,
    ) {
        let block = Block::default()
            .title(format!(" {} ", label))
            .title_style(theme.label())
            .borders(Borders::ALL)
            .border_style(if focused {
                theme.border_focused()
            } else {
                theme.border()
            });

        let width = block.inner(area).width.saturating_sub(1) as usize;
        let line = if self.value.is_empty() {
            Line::from(Span::styled(placeholder, theme.placeholder()))
        } else {
            let shown = truncate_middle(&self.value, width.max(5));
            let mut spans = vec![Span::styled(shown, theme.input(focused))];
            if focused {
                spans.push(Span::styled("▏", theme.input(true)));
            }
            Line::from(spans)
        };

        frame.render_widget(
            Paragraph::new(line).style(theme.input(focused)).block(block),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_filter_rejects_letters() {
        let mut input = TextInput::new(InputFilter::Amount, 16);
        assert!(input.push('5'));
        assert!(!input.push('c'));
        input.insert_str("0_0x");
        assert_eq!(input.value(), "50_0");
    }

    #[test]
    fn test_max_len_and_control_chars() {
        let mut input = TextInput::new(InputFilter::Any, 3);
        input.insert_str("ab\ncd");
        assert_eq!(input.value(), "abc");
        input.backspace();
        assert_eq!(input.value(), "ab");
    }

    #[test]
    fn test_with_value_keeps_long_prefill() {
        let host = format!("{}.onion:9735", "a".repeat(300));
        let mut input = TextInput::with_value(InputFilter::Any, 8, &host);
        assert_eq!(input.value(), host);

        assert!(!input.push('x'));
        input.backspace();
        assert!(input.push('5'));
        assert!(!input.push('\t'));
    }
}
