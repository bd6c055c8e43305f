//! Blocking alert dialog

use std::collections::VecDeque;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::ui::{layout::centered_rect, Theme};

/// A button shown under the alert message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertAction {
    pub text: String,
}

impl AlertAction {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The usual single acknowledgement button
    pub fn ok() -> Self {
        Self::new("OK")
    }
}

/// Modal alert
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    /// Dialog title
    pub title: String,
    /// Message body
    pub message: String,
    /// Buttons, left to right
    pub actions: Vec<AlertAction>,
    /// Whether Esc may dismiss it
    pub cancelable: bool,
}

impl Alert {
    /// Error alert with a single OK button that must be acknowledged
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
            actions: vec![AlertAction::ok()],
            cancelable: false,
        }
    }
}

/// Anything that can put an alert in front of the user
pub trait Alerts {
    fn alert(&mut self, alert: Alert);
}

/// Pending alerts, shown one at a time in arrival order
#[derive(Debug, Default)]
pub struct AlertQueue {
    pending: VecDeque<Alert>,
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alert currently on screen
    pub fn current(&self) -> Option<&Alert> {
        self.pending.front()
    }

    /// Whether an alert is capturing input
    pub fn is_active(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Acknowledge the current alert through one of its actions
    pub fn acknowledge(&mut self) -> Option<Alert> {
        self.pending.pop_front()
    }

    /// Dismiss via Esc; refused for non-cancelable alerts
    pub fn cancel(&mut self) -> bool {
        match self.pending.front() {
            Some(alert) if alert.cancelable => {
                self.pending.pop_front();
                true
            }
            _ => false,
        }
    }
}

impl Alerts for AlertQueue {
    fn alert(&mut self, alert: Alert) {
        tracing::debug!(title = %alert.title, "alert");
        self.pending.push_back(alert);
    }
}

/// Render an alert over whatever is on screen
pub fn render(frame: &mut Frame, area: Rect, alert: &Alert, theme: &Theme) {
    let dialog_area = centered_rect(60, 40, area);

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(format!(" {} ", alert.title))
        .title_style(theme.danger())
        .borders(Borders::ALL)
        .border_style(theme.danger())
        .style(theme.base());

    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(2),    // Message
            Constraint::Length(1), // Actions
            Constraint::Length(1), // Help text
        ])
        .split(inner);

    let message = Paragraph::new(alert.message.as_str())
        .style(theme.text())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(message, chunks[0]);

    let mut spans = Vec::new();
    for action in &alert.actions {
        spans.push(Span::styled(
            format!(" {} ", action.text),
            theme.toggle_button(),
        ));
        spans.push(Span::raw("  "));
    }
    spans.pop();
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        chunks[1],
    );

    let help = if alert.cancelable {
        "[Enter] OK    [Esc] Cancel"
    } else {
        "[Enter] OK"
    };
    frame.render_widget(
        Paragraph::new(help)
            .style(theme.text_muted())
            .alignment(Alignment::Center),
        chunks[2],
    );
}
