//! Open channel form

use ampere_core::NodeAddress;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{AppState, Navigator, Route};
use crate::ui::components::header;
use crate::ui::components::text_input::{InputFilter, TextInput};
use crate::ui::layout::{render_footer, ScreenLayout};

const MAX_FIELD_LEN: usize = 256;

/// Which field receives typing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Field {
    #[default]
    Pubkey,
    Host,
}

/// Peer form, optionally pre-filled from a scanned address
#[derive(Clone, Debug)]
pub struct OpenChannelForm {
    pub pubkey: TextInput,
    pub host: TextInput,
    pub focus: Field,
}

impl Default for OpenChannelForm {
    fn default() -> Self {
        Self::from_params(None)
    }
}

impl OpenChannelForm {
    /// Form for the navigation params
    pub fn from_params(address: Option<&NodeAddress>) -> Self {
        let (pubkey, host) = address
            .map(|a| (a.pubkey.as_str(), a.host.as_str()))
            .unwrap_or(("", ""));

        Self {
            pubkey: TextInput::with_value(InputFilter::Any, MAX_FIELD_LEN, pubkey),
            host: TextInput::with_value(InputFilter::Any, MAX_FIELD_LEN, host),
            focus: Field::Pubkey,
        }
    }

    /// Move focus to the other field
    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Field::Pubkey => Field::Host,
            Field::Host => Field::Pubkey,
        };
    }

    /// The focused input
    pub fn focused_mut(&mut self) -> &mut TextInput {
        match self.focus {
            Field::Pubkey => &mut self.pubkey,
            Field::Host => &mut self.host,
        }
    }

    /// Both fields filled in, as an address
    pub fn address(&self) -> Option<NodeAddress> {
        let pubkey = self.pubkey.value().trim();
        let host = self.host.value().trim();
        if pubkey.is_empty() || host.is_empty() {
            return None;
        }
        Some(NodeAddress::new(pubkey, host))
    }
}

/// Open the node scanner
pub fn scan<N: Navigator + ?Sized>(navigator: &mut N) {
    navigator.navigate(Route::NodeQrScanner);
}

/// Render the open channel form
pub fn render(frame: &mut Frame, state: &AppState, _tick: u64) {
    let layout = ScreenLayout::new(frame.area());
    let theme = &state.theme();
    let form = &state.open_channel;

    header::render(frame, layout.header, "Open Channel", true, theme);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Pubkey
            Constraint::Length(3), // Host
            Constraint::Length(2), // Address preview
            Constraint::Min(0),
        ])
        .split(layout.content);

    form.pubkey.render(
        frame,
        chunks[0],
        "Node public key",
        "03abc...",
        form.focus == Field::Pubkey,
        theme,
    );
    form.host.render(
        frame,
        chunks[1],
        "Host",
        "127.0.0.1:9735",
        form.focus == Field::Host,
        theme,
    );

    let preview = match form.address() {
        Some(address) => Span::styled(address.to_string(), theme.value()),
        None => Span::styled("Enter a public key and host", theme.text_muted()),
    };
    frame.render_widget(
        Paragraph::new(Line::from(preview)).alignment(Alignment::Center),
        chunks[2],
    );

    render_footer(
        frame,
        layout.footer,
        &[
            ("Tab", "Next field"),
            ("Ctrl+S", "Scan node"),
            ("Enter", "Open"),
            ("Esc", "Back"),
        ],
        theme,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_prefilled_from_params() {
        let address = NodeAddress::new("03abc", "10.0.0.5:9735");
        let form = OpenChannelForm::from_params(Some(&address));
        assert_eq!(form.pubkey.value(), "03abc");
        assert_eq!(form.host.value(), "10.0.0.5:9735");
        assert_eq!(form.address(), Some(address));
    }

    #[test]
    fn test_empty_form_has_no_address() {
        let mut form = OpenChannelForm::default();
        assert_eq!(form.address(), None);

        form.focused_mut().insert_str("03abc");
        assert_eq!(form.address(), None);

        form.switch_focus();
        form.focused_mut().insert_str("host:1");
        assert_eq!(form.address(), Some(NodeAddress::new("03abc", "host:1")));
    }
}
