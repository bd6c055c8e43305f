//! QR scanner input
//!
//! Terminals have no camera; handheld scanners in keyboard mode type the
//! decoded payload followed by Enter, and pasted text arrives in one piece.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::ui::{layout::centered_rect, Theme};
use crate::utils::truncate_middle;

/// Upper bound on a scanned payload
const MAX_SCAN_LEN: usize = 4096;

/// Static text shown by a scanner screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScannerConfig {
    pub title: &'static str,
    pub text: &'static str,
}

/// What a key press meant to the scanner
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanEvent {
    /// Nothing to act on yet
    None,
    /// A complete payload was read
    Scanned(String),
    /// The user wants to leave
    Back,
}

/// Accumulates scanner keystrokes
#[derive(Clone, Debug, Default)]
pub struct QrScanner {
    buffer: String,
}

impl QrScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Characters read so far
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Feed one key press
    pub fn handle_key(&mut self, key: KeyEvent) -> ScanEvent {
        match key.code {
            KeyCode::Esc => ScanEvent::Back,
            KeyCode::Enter => ScanEvent::Scanned(std::mem::take(&mut self.buffer)),
            KeyCode::Backspace => {
                self.buffer.pop();
                ScanEvent::None
            }
            // Chords are shortcuts, not scanned text
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.buffer.len() < MAX_SCAN_LEN {
                    self.buffer.push(c);
                }
                ScanEvent::None
            }
            _ => ScanEvent::None,
        }
    }

    /// Pasted text is a complete scan
    pub fn handle_paste(&mut self, text: &str) -> ScanEvent {
        self.buffer.clear();
        let payload = text.trim_end_matches(['\r', '\n']).to_string();
        ScanEvent::Scanned(payload)
    }

    /// Render the viewfinder with the configured text
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        config: &ScannerConfig,
        tick: u64,
        theme: &Theme,
    ) {
        let finder = centered_rect(70, 70, area);

        let corner_style = if tick % 10 < 5 {
            theme.border_focused()
        } else {
            theme.border()
        };
        let block = Block::default()
            .title(format!(" {} ", config.title))
            .title_style(theme.label())
            .borders(Borders::ALL)
            .border_style(corner_style);
        let inner = block.inner(finder);
        frame.render_widget(block, finder);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(2), // Prompt
                Constraint::Length(2), // Buffer
                Constraint::Min(1),
            ])
            .split(inner);

        frame.render_widget(
            Paragraph::new(config.text)
                .style(theme.text())
                .alignment(Alignment::Center),
            chunks[1],
        );

        let buffer_text = if self.buffer.is_empty() {
            Span::styled("waiting for scanner or paste…", theme.text_muted())
        } else {
            Span::styled(
                truncate_middle(&self.buffer, chunks[2].width.max(5) as usize),
                theme.value(),
            )
        };
        frame.render_widget(
            Paragraph::new(Line::from(buffer_text))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            chunks[2],
        );
    }
}
