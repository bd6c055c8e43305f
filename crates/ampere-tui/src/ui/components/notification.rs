//! Toast notification component

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ui::Theme;
use crate::utils::display_width;

/// Notification severity level
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Toast notification
#[derive(Clone, Debug)]
pub struct Notification {
    /// Message to display
    pub message: String,
    /// Severity level
    pub level: NotificationLevel,
    /// Remaining ticks until dismissal
    pub ttl: u64,
}

impl Notification {
    /// Create a new notification
    pub fn new(message: impl Into<String>, level: NotificationLevel, ttl: u64) -> Self {
        Self {
            message: message.into(),
            level,
            ttl,
        }
    }

    /// Create an info notification
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Info, 30) // ~3 seconds at 100ms ticks
    }

    /// Create a success notification
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Success, 30)
    }

    /// Create a warning notification
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Warning, 50)
    }

    /// Create an error notification
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Error, 60)
    }

    /// Check if notification should be dismissed
    pub fn is_expired(&self) -> bool {
        self.ttl == 0
    }

    /// Decrement TTL
    pub fn tick(&mut self) {
        self.ttl = self.ttl.saturating_sub(1);
    }

    /// Get icon for level
    pub fn icon(&self) -> &'static str {
        match self.level {
            NotificationLevel::Info => "ℹ",
            NotificationLevel::Success => "✓",
            NotificationLevel::Warning => "⚠",
            NotificationLevel::Error => "✗",
        }
    }

    /// Render the notification
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let style = match self.level {
            NotificationLevel::Info => theme.text_secondary(),
            NotificationLevel::Success => theme.success(),
            NotificationLevel::Warning => theme.warning(),
            NotificationLevel::Error => theme.danger(),
        };

        let text = format!("{} {}", self.icon(), self.message);

        // Top-right corner
        let width = (display_width(&text) + 4).min(area.width.saturating_sub(2)).min(70);
        let height = 3u16.min(area.height.saturating_sub(1));
        let x = area.x + area.width.saturating_sub(width + 2);
        let y = area.y + 1u16.min(area.height);
        let toast_area = Rect::new(x, y, width, height);

        frame.render_widget(Clear, toast_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .style(theme.base());
        let content = Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center)
            .block(block);

        frame.render_widget(content, toast_area);
    }
}

/// Notification manager for multiple toasts
#[derive(Debug)]
pub struct NotificationManager {
    /// Active notifications
    notifications: Vec<Notification>,
    /// Maximum notifications to show
    max_visible: usize,
}

impl NotificationManager {
    /// Create a new manager
    pub fn new() -> Self {
        Self {
            notifications: Vec::new(),
            max_visible: 3,
        }
    }

    /// Add a notification
    pub fn push(&mut self, notification: Notification) {
        self.notifications.push(notification);
        while self.notifications.len() > self.max_visible {
            self.notifications.remove(0);
        }
    }

    /// Tick all notifications and remove expired
    pub fn tick(&mut self) {
        for n in &mut self.notifications {
            n.tick();
        }
        self.notifications.retain(|n| !n.is_expired());
    }

    /// Active notifications, oldest first
    pub fn active(&self) -> &[Notification] {
        &self.notifications
    }

    /// Render all active notifications
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        for (i, notification) in self.notifications.iter().enumerate() {
            let offset_y = (i * 3) as u16;
            if offset_y >= area.height {
                break;
            }
            let adjusted_area = Rect::new(
                area.x,
                area.y + offset_y,
                area.width,
                area.height - offset_y,
            );
            notification.render(frame, adjusted_area, theme);
        }
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifications_expire() {
        let mut manager = NotificationManager::new();
        manager.push(Notification::new("short", NotificationLevel::Info, 1));
        manager.push(Notification::error("long"));

        manager.tick();
        assert_eq!(manager.active().len(), 1);
        assert_eq!(manager.active()[0].message, "long");
    }

    #[test]
    fn test_only_recent_notifications_kept() {
        let mut manager = NotificationManager::new();
        for i in 0..5 {
            manager.push(Notification::info(format!("n{}", i)));
        }
        let messages: Vec<_> = manager.active().iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["n2", "n3", "n4"]);
    }
}
