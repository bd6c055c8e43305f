//! Send screen: enter or paste a payment request

use ampere_core::InvoicesStore;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{AppState, Navigator, Route};
use crate::ui::components::header;
use crate::ui::components::text_input::TextInput;
use crate::ui::layout::{render_footer, ScreenLayout};

/// Start decoding `input` and show the invoice screen
///
/// Returns false and stays put when the input is blank.
pub fn submit<I, N>(input: &TextInput, invoices: &mut I, navigator: &mut N) -> bool
where
    I: InvoicesStore + ?Sized,
    N: Navigator + ?Sized,
{
    let payment_request = input.value().trim();
    if payment_request.is_empty() {
        return false;
    }

    invoices.get_pay_req(payment_request);
    navigator.navigate(Route::PaymentRequest);
    true
}

/// Render the send screen
pub fn render(frame: &mut Frame, state: &AppState, _tick: u64) {
    let layout = ScreenLayout::new(frame.area());
    let theme = &state.theme();

    header::render(frame, layout.header, "Send", false, theme);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Instructions
            Constraint::Length(3), // Input
            Constraint::Length(1), // Backend
            Constraint::Min(0),
        ])
        .split(layout.content);

    frame.render_widget(
        Paragraph::new("Paste or type a Lightning payment request")
            .style(theme.text_secondary())
            .alignment(Alignment::Center),
        chunks[0],
    );

    state.send_input.render(
        frame,
        chunks[1],
        "Payment Request",
        "lnbc...",
        true,
        theme,
    );

    frame.render_widget(
        Paragraph::new(format!("Paying through {}", state.transactions.backend_name()))
            .style(theme.text_muted())
            .alignment(Alignment::Center),
        chunks[2],
    );

    render_footer(
        frame,
        layout.footer,
        &[("Enter", "Decode"), ("o", "Open channel"), ("Esc", "Quit")],
        theme,
    );
}
