//! Navigation router for screen transitions

use ampere_core::NodeAddress;

use super::state::Screen;

/// A navigation target with its parameters
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// Enter or paste a payment request
    Send,
    /// Decoded invoice details
    PaymentRequest,
    /// Payment progress
    SendingLightning,
    /// Open channel form, optionally pre-filled from a scan
    OpenChannel(Option<NodeAddress>),
    /// Node address scanner
    NodeQrScanner,
}

impl Route {
    /// Screen this route displays
    pub fn screen(&self) -> Screen {
        match self {
            Route::Send => Screen::Send,
            Route::PaymentRequest => Screen::PaymentRequest,
            Route::SendingLightning => Screen::SendingLightning,
            Route::OpenChannel(_) => Screen::OpenChannel,
            Route::NodeQrScanner => Screen::NodeQrScanner,
        }
    }
}

/// Anything screens can ask to navigate
pub trait Navigator {
    fn navigate(&mut self, route: Route);
}

/// Router manages navigation history
pub struct Router {
    /// Navigation history stack
    history: Vec<Route>,
    /// Maximum history depth
    max_depth: usize,
    /// Route entered since the last `take_entered`
    entered: Option<Route>,
}

impl Router {
    /// Create a router starting at `initial`
    pub fn new(initial: Route) -> Self {
        let mut router = Self {
            history: Vec::new(),
            max_depth: 20,
            entered: None,
        };
        router.push(initial);
        router
    }

    /// Push a new route onto the history
    pub fn push(&mut self, route: Route) {
        // Limit history depth
        if self.history.len() >= self.max_depth {
            self.history.remove(0);
        }

        self.entered = Some(route.clone());
        self.history.push(route);
    }

    /// Get the current route
    pub fn current(&self) -> Option<&Route> {
        self.history.last()
    }

    /// Screen currently shown
    pub fn current_screen(&self) -> Screen {
        self.current().map(Route::screen).unwrap_or_default()
    }

    /// Take the route entered since the last call, if any
    pub fn take_entered(&mut self) -> Option<Route> {
        self.entered.take()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Send)
    }
}

impl Navigator for Router {
    fn navigate(&mut self, route: Route) {
        tracing::debug!(?route, "navigate");
        self.push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_updates_current_screen() {
        let mut router = Router::default();
        assert_eq!(router.current_screen(), Screen::Send);
        assert_eq!(router.take_entered(), Some(Route::Send));
        assert_eq!(router.take_entered(), None);

        router.navigate(Route::PaymentRequest);
        assert_eq!(router.current_screen(), Screen::PaymentRequest);
        assert_eq!(router.take_entered(), Some(Route::PaymentRequest));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut router = Router::default();
        for _ in 0..50 {
            router.navigate(Route::SendingLightning);
        }
        assert_eq!(router.history.len(), 20);
        assert_eq!(router.current_screen(), Screen::SendingLightning);
    }}
