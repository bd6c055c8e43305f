//! UI rendering

pub mod components;
pub mod layout;
pub mod screens;
pub mod theme;

pub use theme::Theme;

use ratatui::prelude::*;
use ratatui::widgets::Block;

use crate::app::{AppState, Screen};

/// Main render function - delegates to the current screen, then overlays
pub fn render(frame: &mut Frame, state: &AppState, tick: u64) {
    let theme = state.theme();
    frame.render_widget(Block::default().style(theme.base()), frame.area());

    match state.current_screen() {
        Screen::Send => screens::send::render(frame, state, tick),
        Screen::PaymentRequest => screens::payment_request::render(frame, state, tick),
        Screen::SendingLightning => screens::sending::render(frame, state, tick),
        Screen::OpenChannel => screens::open_channel::render(frame, state, tick),
        Screen::NodeQrScanner => screens::node_qr_scanner::render(frame, state, tick),
    }

    state
        .notifications
        .render(frame, frame.area(), &theme);

    if let Some(alert) = state.alerts.current() {
        components::alert::render(frame, frame.area(), alert, &theme);
    }
}
