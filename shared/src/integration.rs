//! Connect/disconnect state shared by every third-party account integration.
//!
//! Calendar, Gmail and Outlook all follow one contract: a status query that
//! reports whether the account is linked, and an OAuth start that hands the
//! browser over to the provider. [`IntegrationPanel`] holds the client side of
//! that contract and decides what the widget shows; [`refresh`] and
//! [`connect`] drive it against any [`IntegrationCapability`].

use std::cell::RefCell;

use crate::error::ClientError;
use crate::fetch::FetchState;
use crate::models::{IntegrationStatus, Provider};

/// Capability descriptor for one provider.
#[allow(async_fn_in_trait)]
pub trait IntegrationCapability {
    fn provider(&self) -> Provider;

    async fn status(&self) -> Result<IntegrationStatus, ClientError>;

    /// Start the OAuth flow. Returns once the redirect has been issued;
    /// completion is only observable through a later [`status`](Self::status).
    async fn begin_oauth(&self) -> Result<(), ClientError>;
}

/// What the integration widget shows, in precedence order.
#[derive(Debug, PartialEq)]
pub enum IntegrationView<'a> {
    Loading,
    Error(&'a ClientError),
    Connected { email: Option<&'a str> },
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntegrationPanel {
    status: FetchState<IntegrationStatus>,
    connecting: bool,
}

impl IntegrationPanel {
    pub fn view(&self) -> IntegrationView<'_> {
        match &self.status {
            FetchState::Loading => IntegrationView::Loading,
            FetchState::Failed(err) => IntegrationView::Error(err),
            FetchState::Loaded(status) if status.connected => IntegrationView::Connected {
                email: status.email.as_deref(),
            },
            FetchState::Loaded(_) => IntegrationView::Disconnected,
        }
    }

    pub fn is_connecting(&self) -> bool {
        self.connecting
    }

    /// Label of the connect control for the current state.
    pub fn connect_label(&self, provider: Provider) -> String {
        if self.connecting {
            return "Redirecting…".to_string();
        }
        match self.view() {
            IntegrationView::Connected { .. } => "Reconnect".to_string(),
            _ => format!("Connect {}", provider.display_name()),
        }
    }

    /// Show the spinner again for a manual retry. A refresh in the
    /// background keeps the last known status on screen instead.
    pub fn retry(&mut self) {
        self.status = FetchState::Loading;
    }

    pub fn apply_status(&mut self, result: Result<IntegrationStatus, ClientError>) {
        self.status = FetchState::from_result(result);
    }

    /// Mark a connect as pending. Returns `false` when one already is, in
    /// which case the caller must not start another redirect.
    pub fn begin_connect(&mut self) -> bool {
        if self.connecting {
            return false;
        }
        self.connecting = true;
        true
    }

    pub fn finish_connect(&mut self) {
        self.connecting = false;
    }
}

/// Informative line shown next to the badge.
pub fn status_text(provider: Provider, view: &IntegrationView<'_>) -> String {
    match view {
        IntegrationView::Loading => format!("Checking {} connection…", provider.display_name()),
        IntegrationView::Error(err) => format!(
            "Could not load {} status: {}",
            provider.display_name(),
            err
        ),
        IntegrationView::Connected { email: Some(email) } => format!(
            "Connected as {}. The assistant can use your {} account.",
            email,
            provider.display_name()
        ),
        IntegrationView::Connected { email: None } => format!(
            "Your {} account is connected and available to the assistant.",
            provider.display_name()
        ),
        IntegrationView::Disconnected => format!(
            "Connect your {} account so the assistant can work with it.",
            provider.display_name()
        ),
    }
}

/// Re-query the provider status and store the outcome.
pub async fn refresh<C: IntegrationCapability>(capability: &C, panel: &RefCell<IntegrationPanel>) {
    let result = capability.status().await;
    panel.borrow_mut().apply_status(result);
}

#[derive(Debug, PartialEq)]
pub enum ConnectOutcome {
    /// Another connect was still pending; nothing was sent.
    Suppressed,
    Redirected,
    Failed(ClientError),
}

/// Start the OAuth flow unless one is already pending for this panel.
///
/// `on_change` runs each time the pending flag flips so the caller can
/// re-render the (disabled) control.
pub async fn connect<C, F>(
    capability: &C,
    panel: &RefCell<IntegrationPanel>,
    on_change: F,
) -> ConnectOutcome
where
    C: IntegrationCapability,
    F: Fn(),
{
    if !panel.borrow_mut().begin_connect() {
        return ConnectOutcome::Suppressed;
    }
    on_change();
    let result = capability.begin_oauth().await;
    panel.borrow_mut().finish_connect();
    on_change();
    match result {
        Ok(()) => ConnectOutcome::Redirected,
        Err(err) => ConnectOutcome::Failed(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeCapability {
        provider: Provider,
        status: Result<IntegrationStatus, ClientError>,
        redirects: Cell<u32>,
        fail_oauth: bool,
    }

    impl FakeCapability {
        fn new(provider: Provider, connected: bool) -> Self {
            Self {
                provider,
                status: Ok(IntegrationStatus {
                    connected,
                    email: None,
                }),
                redirects: Cell::new(0),
                fail_oauth: false,
            }
        }
    }

    impl IntegrationCapability for FakeCapability {
        fn provider(&self) -> Provider {
            self.provider
        }

        async fn status(&self) -> Result<IntegrationStatus, ClientError> {
            self.status.clone()
        }

        async fn begin_oauth(&self) -> Result<(), ClientError> {
            tokio::task::yield_now().await;
            if self.fail_oauth {
                return Err(ClientError::Network("offline".into()));
            }
            self.redirects.set(self.redirects.get() + 1);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_connect_labels_per_provider() {
        for provider in Provider::ALL {
            let disconnected = FakeCapability::new(provider, false);
            let panel = RefCell::new(IntegrationPanel::default());
            refresh(&disconnected, &panel).await;
            assert_eq!(
                panel.borrow().connect_label(disconnected.provider()),
                format!("Connect {}", provider.display_name())
            );

            let connected = FakeCapability::new(provider, true);
            refresh(&connected, &panel).await;
            assert_eq!(panel.borrow().connect_label(provider), "Reconnect");
        }
    }

    #[tokio::test]
    async fn test_pending_connect_suppresses_second_redirect() {
        let capability = FakeCapability::new(Provider::Gmail, false);
        let panel = RefCell::new(IntegrationPanel::default());

        let changes = Cell::new(0);
        let on_change = || changes.set(changes.get() + 1);
        let (first, second) = tokio::join!(
            connect(&capability, &panel, on_change),
            connect(&capability, &panel, on_change)
        );

        assert_eq!(first, ConnectOutcome::Redirected);
        assert_eq!(second, ConnectOutcome::Suppressed);
        assert_eq!(capability.redirects.get(), 1);
        assert_eq!(changes.get(), 2);
        assert!(!panel.borrow().is_connecting());
    }

    #[tokio::test]
    async fn test_failed_connect_releases_control() {
        let mut capability = FakeCapability::new(Provider::Outlook, false);
        capability.fail_oauth = true;
        let panel = RefCell::new(IntegrationPanel::default());

        let outcome = connect(&capability, &panel, || ()).await;
        assert_eq!(
            outcome,
            ConnectOutcome::Failed(ClientError::Network("offline".into()))
        );
        assert!(!panel.borrow().is_connecting());
        assert!(panel.borrow_mut().begin_connect());
    }

    #[tokio::test]
    async fn test_status_error_then_retry() {
        let mut capability = FakeCapability::new(Provider::Calendar, false);
        capability.status = Err(ClientError::Http {
            status: 500,
            message: "down".into(),
        });
        let panel = RefCell::new(IntegrationPanel::default());

        assert_eq!(panel.borrow().view(), IntegrationView::Loading);
        refresh(&capability, &panel).await;
        assert!(matches!(panel.borrow().view(), IntegrationView::Error(_)));

        panel.borrow_mut().retry();
        assert_eq!(panel.borrow().view(), IntegrationView::Loading);

        capability.status = Ok(IntegrationStatus {
            connected: true,
            email: Some("me@example.com".into()),
        });
        refresh(&capability, &panel).await;
        assert_eq!(
            panel.borrow().view(),
            IntegrationView::Connected {
                email: Some("me@example.com")
            }
        );
    }

    #[test]
    fn test_begin_connect_is_exclusive() {
        let mut panel = IntegrationPanel::default();
        assert!(panel.begin_connect());
        assert!(!panel.begin_connect());
        assert_eq!(panel.connect_label(Provider::Gmail), "Redirecting…");
        panel.finish_connect();
        assert!(panel.begin_connect());
    }

    #[test]
    fn test_status_text() {
        let text = status_text(Provider::Outlook, &IntegrationView::Disconnected);
        assert_eq!(
            text,
            "Connect your Outlook account so the assistant can work with it."
        );
    }
}
