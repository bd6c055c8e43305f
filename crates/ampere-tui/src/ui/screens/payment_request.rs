//! Lightning invoice screen
//!
//! Shows the decoded payment request held by the invoices store and lets the
//! user pay it, either for the encoded amount or for a custom one.

use ampere_core::{InvoicesStore, SettingsStore, TransactionsStore, UnitsStore};
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use crate::app::{AppState, Navigator, Route};
use crate::ui::components::header;
use crate::ui::components::text_input::{InputFilter, TextInput};
use crate::ui::layout::{render_button, render_footer, section_block, ScreenLayout};
use crate::ui::Theme;
use crate::utils::{now_unix, spinner_frame};

/// Header title
pub const TITLE: &str = "Lightning Invoice";

/// Shown instead of details when decoding failed
pub const ERROR_TEXT: &str = "Error loading invoice";

/// Label of the custom amount input
pub const CUSTOM_AMOUNT_LABEL: &str = "Custom Amount (in satoshis)";

/// Shown under the amount once the request is past its expiry
pub const EXPIRED_TEXT: &str = "⚠ Invoice expired";

/// Placeholder of the custom amount input
pub const CUSTOM_AMOUNT_PLACEHOLDER: &str = "100";

/// Longest custom amount accepted, separators included
const MAX_AMOUNT_LEN: usize = 24;

/// Whether the invoice amount or a user amount is paid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AmountMode {
    #[default]
    Default,
    Custom,
}

/// Per-visit state of the invoice screen
#[derive(Clone, Debug)]
pub struct PaymentRequestScreen {
    mode: AmountMode,
    custom_amount: TextInput,
}

impl Default for PaymentRequestScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentRequestScreen {
    pub fn new() -> Self {
        Self {
            mode: AmountMode::Default,
            custom_amount: TextInput::new(InputFilter::Amount, MAX_AMOUNT_LEN),
        }
    }

    /// Back to default mode with an empty amount
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn mode(&self) -> AmountMode {
        self.mode
    }

    pub fn custom_amount(&self) -> &str {
        self.custom_amount.value()
    }

    /// Flip between default and custom amount
    pub fn toggle_amount_mode(&mut self) {
        self.mode = match self.mode {
            AmountMode::Default => AmountMode::Custom,
            AmountMode::Custom => AmountMode::Default,
        };
    }

    /// Label of the toggle button for the current mode
    pub fn toggle_label(&self) -> &'static str {
        match self.mode {
            AmountMode::Default => "Pay custom amount",
            AmountMode::Custom => "Pay default amount",
        }
    }

    /// Type into the custom amount; ignored in default mode
    pub fn push_amount_char(&mut self, c: char) -> bool {
        self.mode == AmountMode::Custom && self.custom_amount.push(c)
    }

    pub fn paste_amount(&mut self, text: &str) {
        if self.mode == AmountMode::Custom {
            self.custom_amount.insert_str(text.trim());
        }
    }

    pub fn backspace_amount(&mut self) {
        if self.mode == AmountMode::Custom {
            self.custom_amount.backspace();
        }
    }

    /// Amount to send with the payment, if a custom one applies
    pub fn amount_override(&self) -> Option<&str> {
        match self.mode {
            AmountMode::Custom if !self.custom_amount.is_empty() => {
                Some(self.custom_amount.value())
            }
            _ => None,
        }
    }

    /// Fire the payment and move to the sending screen
    ///
    /// Navigation does not wait for or depend on the payment outcome.
    pub fn confirm<T, N>(&self, payment_request: &str, transactions: &mut T, navigator: &mut N)
    where
        T: TransactionsStore + ?Sized,
        N: Navigator + ?Sized,
    {
        transactions.send_payment(payment_request, self.amount_override());
        navigator.navigate(Route::SendingLightning);
    }
}

/// Leave the invoice screen
pub fn go_back<N: Navigator + ?Sized>(navigator: &mut N) {
    navigator.navigate(Route::Send);
}

/// What the content area shows
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvoiceView {
    Loading,
    Error,
    Details {
        amount: String,
        fields: Vec<(&'static str, String)>,
        expired: bool,
    },
    Empty,
}

impl InvoiceView {
    /// Build the view from the stores, `now` in unix seconds
    pub fn from_stores<I, U>(invoices: &I, units: &U, now: u64) -> Self
    where
        I: InvoicesStore + ?Sized,
        U: UnitsStore + ?Sized,
    {
        if invoices.loading() {
            return InvoiceView::Loading;
        }
        if invoices.pay_req_error().is_some() {
            return InvoiceView::Error;
        }
        match invoices.pay_req() {
            Some(pay_req) => InvoiceView::Details {
                amount: units.get_amount(pay_req.num_satoshis.unwrap_or(0)),
                fields: pay_req.present_fields(),
                expired: pay_req.is_expired_at(now),
            },
            None => InvoiceView::Empty,
        }
    }

    /// Whether amount and pay controls are available
    pub fn has_controls(&self) -> bool {
        matches!(self, InvoiceView::Details { .. })
    }
}

/// Render the invoice screen
pub fn render(frame: &mut Frame, state: &AppState, tick: u64) {
    render_with(
        frame,
        &state.payment_request,
        &state.invoices,
        &state.units,
        &state.config,
        tick,
    );
}

/// Render against any store implementations
pub fn render_with<I, U, S>(
    frame: &mut Frame,
    screen: &PaymentRequestScreen,
    invoices: &I,
    units: &U,
    settings: &S,
    tick: u64,
) where
    I: InvoicesStore + ?Sized,
    U: UnitsStore + ?Sized,
    S: SettingsStore + ?Sized,
{
    let theme = &Theme::from_settings(settings);
    let layout = ScreenLayout::new(frame.area());
    header::render(frame, layout.header, TITLE, true, theme);

    let view = InvoiceView::from_stores(invoices, units, now_unix());
    match &view {
        InvoiceView::Loading => {
            let text = format!("{} Loading invoice", spinner_frame(tick));
            frame.render_widget(
                Paragraph::new(text)
                    .style(theme.spinner())
                    .alignment(Alignment::Center),
                vertical_center(layout.content, 1),
            );
        }
        InvoiceView::Error => {
            frame.render_widget(
                Paragraph::new(ERROR_TEXT)
                    .style(theme.danger())
                    .alignment(Alignment::Center),
                vertical_center(layout.content, 1),
            );
        }
        InvoiceView::Details {
            amount,
            fields,
            expired,
        } => {
            let summary = AmountSummary {
                amount,
                expired: *expired,
            };
            render_details(frame, layout.content, screen, &summary, fields, units, theme);
        }
        InvoiceView::Empty => {
            frame.render_widget(
                Paragraph::new("No invoice loaded")
                    .style(theme.text_muted())
                    .alignment(Alignment::Center),
                vertical_center(layout.content, 1),
            );
        }
    }

    let hints: &[(&str, &str)] = if view.has_controls() {
        &[
            ("Enter", "Pay"),
            ("c", "Toggle amount"),
            ("u", "Units"),
            ("Esc", "Back"),
        ]
    } else {
        &[("Esc", "Back")]
    };
    render_footer(frame, layout.footer, hints, theme);
}

struct AmountSummary<'a> {
    amount: &'a str,
    expired: bool,
}

fn render_details<U: UnitsStore + ?Sized>(
    frame: &mut Frame,
    area: Rect,
    screen: &PaymentRequestScreen,
    summary: &AmountSummary,
    fields: &[(&'static str, String)],
    units: &U,
    theme: &Theme,
) {
    let custom = screen.mode() == AmountMode::Custom;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                            // Amount
            Constraint::Min(3),                               // Fields
            Constraint::Length(1),                            // Toggle
            Constraint::Length(if custom { 3 } else { 0 }),   // Custom amount
            Constraint::Length(1),                            // Spacer
            Constraint::Length(1),                            // Pay
        ])
        .split(area);

    let mut amount_lines = vec![Line::from(vec![
        Span::styled(summary.amount.to_string(), theme.amount()),
        Span::styled(format!("  ({})", units.units().label()), theme.text_muted()),
    ])];
    if summary.expired {
        amount_lines.push(Line::styled(EXPIRED_TEXT, theme.warning()));
    }
    frame.render_widget(
        Paragraph::new(amount_lines).alignment(Alignment::Center),
        chunks[0],
    );

    let block = section_block("Details", theme);
    let lines: Vec<Line> = fields
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{}: ", label), theme.label()),
                Span::styled(value.clone(), theme.value()),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        chunks[1],
    );

    render_button(frame, chunks[2], screen.toggle_label(), "c", theme.toggle_button());

    if custom {
        let input_area = Rect {
            x: chunks[3].x + chunks[3].width / 4,
            width: chunks[3].width / 2,
            ..chunks[3]
        };
        screen.custom_amount.render(
            frame,
            input_area,
            CUSTOM_AMOUNT_LABEL,
            CUSTOM_AMOUNT_PLACEHOLDER,
            true,
            theme,
        );
    }

    render_button(frame, chunks[5], "Pay", "Enter", theme.pay_button());
}

/// A `height`-row strip in the middle of `area`
fn vertical_center(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect {
        y: area.y + (area.height - height) / 2,
        height,
        ..area
    }
}
