//! Lightning node QR intake screen

use ampere_core::node_address::parse_scanned;
use ratatui::prelude::*;

use crate::app::{AppState, Navigator, Route};
use crate::ui::components::alert::{Alert, Alerts};
use crate::ui::components::header;
use crate::ui::components::qr_scanner::ScannerConfig;
use crate::ui::layout::{render_footer, ScreenLayout};

/// Scanner text for this screen
pub const SCANNER: ScannerConfig = ScannerConfig {
    title: "Lightning Node QR Scanner",
    text: "Scan a valid Lightning Node",
};

/// Alert message for a scan that is not `pubkey@host:port`
pub const INVALID_NODE_MESSAGE: &str = "Scanned QR code was not a valid Lightning Node";

/// Route a scanned payload to the open channel form
///
/// Text with both an `@` and a `:` is split at the first `@`; anything else
/// raises an error alert. Either way exactly one navigation happens.
pub fn handle_node_scanned<N, A>(data: &str, navigator: &mut N, alerts: &mut A)
where
    N: Navigator + ?Sized,
    A: Alerts + ?Sized,
{
    match parse_scanned(data) {
        Some(address) => {
            tracing::info!(pubkey = %address.pubkey, host = %address.host, "scanned node address");
            navigator.navigate(Route::OpenChannel(Some(address)));
        }
        None => {
            tracing::warn!("scanned text is not a node address");
            alerts.alert(Alert::error(INVALID_NODE_MESSAGE));
            navigator.navigate(Route::OpenChannel(None));
        }
    }
}

/// Leave the scanner without a result
pub fn go_back<N: Navigator + ?Sized>(navigator: &mut N) {
    navigator.navigate(Route::OpenChannel(None));
}

/// Render the scanner screen
pub fn render(frame: &mut Frame, state: &AppState, tick: u64) {
    let layout = ScreenLayout::new(frame.area());
    let theme = &state.theme();

    header::render(frame, layout.header, SCANNER.title, true, theme);
    state
        .scanner
        .render(frame, layout.content, &SCANNER, tick, theme);
    render_footer(
        frame,
        layout.footer,
        &[("Enter", "Submit scan"), ("Paste", "Scan"), ("Esc", "Back")],
        theme,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ampere_core::NodeAddress;

    #[derive(Default)]
    struct RecordingNavigator {
        routes: Vec<Route>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&mut self, route: Route) {
            self.routes.push(route);
        }
    }

    #[derive(Default)]
    struct RecordingAlerts {
        alerts: Vec<Alert>,
    }

    impl Alerts for RecordingAlerts {
        fn alert(&mut self, alert: Alert) {
            self.alerts.push(alert);
        }
    }

    fn scan(data: &str) -> (RecordingNavigator, RecordingAlerts) {
        let mut navigator = RecordingNavigator::default();
        let mut alerts = RecordingAlerts::default();
        handle_node_scanned(data, &mut navigator, &mut alerts);
        (navigator, alerts)
    }

    #[test]
    fn test_valid_node_uri_prefills_open_channel() {
        let (navigator, alerts) = scan("03abc...@10.0.0.5:9735");

        assert!(alerts.alerts.is_empty());
        assert_eq!(
            navigator.routes,
            vec![Route::OpenChannel(Some(NodeAddress::new(
                "03abc...",
                "10.0.0.5:9735"
            )))]
        );
    }

    #[test]
    fn test_invalid_scan_alerts_once_then_navigates_without_params() {
        let (navigator, alerts) = scan("not-a-valid-code");

        assert_eq!(alerts.alerts.len(), 1);
        let alert = &alerts.alerts[0];
        assert_eq!(alert.title, "Error");
        assert_eq!(alert.message, INVALID_NODE_MESSAGE);
        assert_eq!(alert.actions.len(), 1);
        assert_eq!(alert.actions[0].text, "OK");
        assert!(!alert.cancelable);

        assert_eq!(navigator.routes, vec![Route::OpenChannel(None)]);
    }

    #[test]
    fn test_host_keeps_everything_after_first_at() {
        let (navigator, _) = scan("a@b@c:1");
        assert_eq!(
            navigator.routes,
            vec![Route::OpenChannel(Some(NodeAddress::new("a", "b@c:1")))]
        );
    }

    #[test]
    fn test_separator_order_does_not_matter() {
        let (navigator, alerts) = scan("host:9735@pubkey");
        assert!(alerts.alerts.is_empty());
        assert_eq!(
            navigator.routes,
            vec![Route::OpenChannel(Some(NodeAddress::new("host:9735", "pubkey")))]
        );
    }

    #[test]
    fn test_missing_separator_or_empty_input_alerts() {
        for data in ["", "@", ":", "pubkey@host", "host:9735"] {
            let (navigator, alerts) = scan(data);
            assert_eq!(alerts.alerts.len(), 1, "input {:?}", data);
            assert_eq!(navigator.routes, vec![Route::OpenChannel(None)]);
        }
    }

    #[test]
    fn test_go_back_navigates_without_params() {
        let mut navigator = RecordingNavigator::default();
        go_back(&mut navigator);
        assert_eq!(navigator.routes, vec![Route::OpenChannel(None)]);
    }
}
