//! Asynchronous form submission with toast feedback.
//!
//! The workflow is written against small traits so it runs the same way over
//! `gloo-net` and the DOM in the browser and over in-memory doubles in tests.

use std::future::Future;

use url::Url;

use crate::config::SiteConfig;
use crate::error::InteractionError;
use crate::logging::{log_event, LogLevel};
use crate::notify::{Notifier, Severity, Toast};

pub const BUSY_LABEL: &str = "Sending...";
pub const SUCCESS_MESSAGE: &str = "Thanks! Your message has been sent.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMethod {
    Get,
    Post,
}

impl FormMethod {
    /// Follows the HTML rule: anything other than `post` submits as GET.
    pub fn from_attribute(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("post") {
            Self::Post
        } else {
            Self::Get
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormSubmission {
    pub method: FormMethod,
    pub action: Url,
}

impl FormSubmission {
    pub fn new(method: &str, action: &str, page_url: &str) -> Result<Self, InteractionError> {
        Ok(Self {
            method: FormMethod::from_attribute(method),
            action: resolve_action(page_url, action)?,
        })
    }
}

/// Resolves a form `action` against the page URL. An empty action posts back
/// to the page itself. Only http(s) targets are accepted.
pub fn resolve_action(page_url: &str, action: &str) -> Result<Url, InteractionError> {
    let invalid = || InteractionError::InvalidAction(action.to_string());
    let base = Url::parse(page_url).map_err(|_| invalid())?;
    let action = action.trim();

    let resolved = if action.is_empty() {
        base
    } else {
        base.join(action).map_err(|_| invalid())?
    };

    if resolved.scheme() == "http" || resolved.scheme() == "https" {
        Ok(resolved)
    } else {
        Err(invalid())
    }
}

pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

pub trait FormTransport {
    fn send(
        &self,
        submission: &FormSubmission,
    ) -> impl Future<Output = Result<u16, InteractionError>>;
}

pub trait SubmitControl {
    fn label(&self) -> String;
    fn set_label(&self, label: &str);
    fn set_disabled(&self, disabled: bool);
}

pub trait FormFields {
    fn reset(&self);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Failed(InteractionError),
}

pub async fn submit_form<T, C, F, N>(
    config: &SiteConfig,
    transport: &T,
    control: &C,
    fields: &F,
    notifier: &N,
    submission: &FormSubmission,
) -> SubmitOutcome
where
    T: FormTransport,
    C: SubmitControl,
    F: FormFields,
    N: Notifier,
{
    let original_label = control.label();
    control.set_disabled(true);
    control.set_label(BUSY_LABEL);

    log_event(
        config,
        LogLevel::Debug,
        "form_submit_started",
        serde_json::json!({
            "method": submission.method.as_str(),
            "host": submission.action.host_str().unwrap_or("unknown"),
        }),
    );

    let result = match transport.send(submission).await {
        Ok(status) if is_success_status(status) => Ok(status),
        Ok(status) => Err(InteractionError::Status(status)),
        Err(error) => Err(error),
    };

    let outcome = match result {
        Ok(status) => {
            log_event(
                config,
                LogLevel::Info,
                "form_submit_succeeded",
                serde_json::json!({ "status": status }),
            );
            fields.reset();
            notifier.notify(Toast::new(SUCCESS_MESSAGE, Severity::Success));
            SubmitOutcome::Sent
        }
        Err(error) => {
            log_event(
                config,
                LogLevel::Warn,
                "form_submit_failed",
                serde_json::json!({ "error": error.to_string() }),
            );
            notifier.notify(Toast::new(error.user_message(), Severity::Error));
            SubmitOutcome::Failed(error)
        }
    };

    control.set_label(&original_label);
    control.set_disabled(false);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeButton {
        label: RefCell<String>,
        disabled: Cell<bool>,
    }

    impl SubmitControl for FakeButton {
        fn label(&self) -> String {
            self.label.borrow().clone()
        }

        fn set_label(&self, label: &str) {
            *self.label.borrow_mut() = label.to_string();
        }

        fn set_disabled(&self, disabled: bool) {
            self.disabled.set(disabled);
        }
    }

    #[derive(Default)]
    struct FakeForm {
        message: RefCell<String>,
    }

    impl FormFields for FakeForm {
        fn reset(&self) {
            self.message.borrow_mut().clear();
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        toasts: RefCell<Vec<Toast>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, toast: Toast) {
            self.toasts.borrow_mut().push(toast);
        }
    }

    /// Responds with a fixed result and records what the button looked like
    /// while the request was in flight.
    struct MockEndpoint {
        response: Result<u16, InteractionError>,
        button: Rc<FakeButton>,
        seen_disabled: Cell<Option<bool>>,
        seen_label: RefCell<Option<String>>,
    }

    impl MockEndpoint {
        fn new(response: Result<u16, InteractionError>, button: Rc<FakeButton>) -> Self {
            Self {
                response,
                button,
                seen_disabled: Cell::new(None),
                seen_label: RefCell::new(None),
            }
        }
    }

    impl FormTransport for MockEndpoint {
        async fn send(&self, _submission: &FormSubmission) -> Result<u16, InteractionError> {
            self.seen_disabled.set(Some(self.button.disabled.get()));
            *self.seen_label.borrow_mut() = Some(self.button.label());
            tokio::task::yield_now().await;
            self.response.clone()
        }
    }

    struct Harness {
        button: Rc<FakeButton>,
        form: FakeForm,
        notifier: RecordingNotifier,
        submission: FormSubmission,
        config: SiteConfig,
    }

    fn harness() -> Harness {
        let button = Rc::new(FakeButton::default());
        button.set_label("Send message");
        let form = FakeForm::default();
        *form.message.borrow_mut() = "Hello there".to_string();

        Harness {
            button,
            form,
            notifier: RecordingNotifier::default(),
            submission: FormSubmission::new("post", "/contact", "https://example.com/")
                .expect("valid submission"),
            config: SiteConfig {
                log_level: LogLevel::Warn,
                ..SiteConfig::default()
            },
        }
    }

    #[tokio::test]
    async fn successful_submission_disables_button_then_restores_it() {
        let h = harness();
        let endpoint = MockEndpoint::new(Ok(200), h.button.clone());

        let outcome = submit_form(
            &h.config,
            &endpoint,
            h.button.as_ref(),
            &h.form,
            &h.notifier,
            &h.submission,
        )
        .await;

        assert_eq!(outcome, SubmitOutcome::Sent);
        assert_eq!(endpoint.seen_disabled.get(), Some(true));
        assert_eq!(endpoint.seen_label.borrow().as_deref(), Some(BUSY_LABEL));
        assert!(!h.button.disabled.get());
        assert_eq!(h.button.label(), "Send message");

        let toasts = h.notifier.toasts.borrow();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].severity, Severity::Success);
        assert!(h.form.message.borrow().is_empty());
    }

    #[tokio::test]
    async fn server_error_shows_error_toast_and_keeps_values() {
        let h = harness();
        let endpoint = MockEndpoint::new(Ok(500), h.button.clone());

        let outcome = submit_form(
            &h.config,
            &endpoint,
            h.button.as_ref(),
            &h.form,
            &h.notifier,
            &h.submission,
        )
        .await;

        assert_eq!(outcome, SubmitOutcome::Failed(InteractionError::Status(500)));
        assert_eq!(h.notifier.toasts.borrow()[0].severity, Severity::Error);
        assert_eq!(h.form.message.borrow().as_str(), "Hello there");
        assert!(!h.button.disabled.get());
        assert_eq!(h.button.label(), "Send message");
    }

    #[tokio::test]
    async fn network_failure_is_reported_like_a_bad_status() {
        let h = harness();
        let endpoint = MockEndpoint::new(
            Err(InteractionError::Network("offline".to_string())),
            h.button.clone(),
        );

        let outcome = submit_form(
            &h.config,
            &endpoint,
            h.button.as_ref(),
            &h.form,
            &h.notifier,
            &h.submission,
        )
        .await;

        assert!(matches!(outcome, SubmitOutcome::Failed(InteractionError::Network(_))));
        assert_eq!(h.notifier.toasts.borrow().len(), 1);
        assert!(!h.button.disabled.get());
    }

    #[test]
    fn action_resolves_against_page_url() {
        let url = resolve_action("https://example.com/about/", "../contact").expect("resolves");
        assert_eq!(url.as_str(), "https://example.com/contact");

        let same_page = resolve_action("https://example.com/", "  ").expect("resolves");
        assert_eq!(same_page.as_str(), "https://example.com/");
    }

    #[test]
    fn non_http_actions_are_rejected() {
        assert!(matches!(
            resolve_action("https://example.com/", "javascript:alert(1)"),
            Err(InteractionError::InvalidAction(_))
        ));
        assert!(matches!(
            resolve_action("https://example.com/", "mailto:me@example.com"),
            Err(InteractionError::InvalidAction(_))
        ));
    }

    #[test]
    fn method_defaults_to_get() {
        assert_eq!(FormMethod::from_attribute("POST"), FormMethod::Post);
        assert_eq!(FormMethod::from_attribute(""), FormMethod::Get);
        assert_eq!(FormMethod::from_attribute("dialog"), FormMethod::Get);
    }
}
