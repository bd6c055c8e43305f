//! Header component

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ui::Theme;
use crate::utils::display_width;

/// Render the header bar with an optional back hint
pub fn render(frame: &mut Frame, area: Rect, title: &str, back: bool, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.border())
        .style(theme.header());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let time_str = chrono::Local::now().format("%H:%M:%S").to_string();
    let back_hint = if back { " ← Esc " } else { "" };

    let used = display_width(back_hint) + display_width(title) + display_width(&time_str) + 3;
    let padding = inner.width.saturating_sub(used) as usize;

    let line = Line::from(vec![
        Span::styled(back_hint, theme.header().add_modifier(Modifier::DIM)),
        Span::raw(" "),
        Span::styled(title, theme.title()),
        Span::raw(" ".repeat(padding)),
        Span::styled(format!("{} ", time_str), theme.header()),
    ]);

    frame.render_widget(Paragraph::new(line).style(theme.header()), inner);
}
