//! Payment progress screen

use ampere_core::{PaymentStatus, TransactionsStore};
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use crate::app::{AppState, Navigator, Route};
use crate::ui::components::header;
use crate::ui::layout::{render_footer, section_block, ScreenLayout};
use crate::ui::Theme;
use crate::utils::{spinner_frame, truncate_middle};

/// Return to the send screen
pub fn go_back<N: Navigator + ?Sized>(navigator: &mut N) {
    navigator.navigate(Route::Send);
}

/// Lines describing a payment status
pub fn status_lines(status: &PaymentStatus, tick: u64, theme: &Theme) -> Vec<Line<'static>> {
    match status {
        PaymentStatus::Idle => vec![Line::styled("No payment in progress", theme.text_muted())],
        PaymentStatus::InFlight { payment_request } => vec![
            Line::styled(
                format!("{} Sending payment…", spinner_frame(tick)),
                theme.spinner(),
            ),
            Line::default(),
            Line::styled(truncate_middle(payment_request, 48), theme.text_muted()),
        ],
        PaymentStatus::Succeeded { receipt } => {
            let mut lines = vec![Line::styled("✓ Payment sent", theme.success()), Line::default()];
            if let Some(hash) = &receipt.payment_hash {
                lines.push(Line::from(vec![
                    Span::styled("Payment Hash: ", theme.label()),
                    Span::styled(hash.clone(), theme.value()),
                ]));
            }
            if let Some(preimage) = &receipt.preimage {
                lines.push(Line::from(vec![
                    Span::styled("Preimage: ", theme.label()),
                    Span::styled(preimage.clone(), theme.value()),
                ]));
            }
            lines
        }
        PaymentStatus::Failed { reason } => vec![
            Line::styled("✗ Payment failed", theme.danger()),
            Line::default(),
            Line::styled(reason.clone(), theme.text()),
        ],
    }
}

/// Render the sending screen
pub fn render(frame: &mut Frame, state: &AppState, tick: u64) {
    let layout = ScreenLayout::new(frame.area());
    let theme = &state.theme();
    let status = state.transactions.payment_status();

    header::render(frame, layout.header, "Sending", true, theme);

    let block = section_block("Payment", theme);
    frame.render_widget(
        Paragraph::new(status_lines(status, tick, theme))
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        layout.content,
    );

    let hints: &[(&str, &str)] = if status.is_in_flight() {
        &[("Esc", "Back to send")]
    } else {
        &[("Enter", "Done"), ("Esc", "Back to send")]
    };
    render_footer(frame, layout.footer, hints, theme);
}
