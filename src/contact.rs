//! Contact form model and submission to the external contact backend.

use std::time::Duration;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// How long the success or error banner stays up.
pub const STATUS_DISPLAY_DURATION: Duration = Duration::from_secs(5);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("no contact backend configured")]
    NotConfigured,
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("backend answered {status}")]
    Rejected { status: u16 },
    #[error("backend did not confirm the message")]
    NotAcknowledged,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// All four fields are required; whitespace alone does not count.
    pub fn validate(&self) -> Result<(), ContactError> {
        let fields = [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(ContactError::MissingField(*name)),
            None => Ok(()),
        }
    }

    pub fn value(&self, field: &str) -> &str {
        match field {
            "name" => &self.name,
            "email" => &self.email,
            "subject" => &self.subject,
            "message" => &self.message,
            _ => "",
        }
    }
}

#[derive(Deserialize, Debug)]
struct BackendReply {
    #[serde(default)]
    success: bool,
}

/// Where contact messages go.
pub trait ContactBackend: Send + Sync {
    fn submit<'a>(&'a self, form: &'a ContactForm) -> BoxFuture<'a, Result<(), ContactError>>;
}

/// Posts the form as JSON to `{base}/api/contact`.
pub struct HttpContactBackend {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl HttpContactBackend {
    pub fn new(base_url: Option<&str>) -> Result<Self, ContactError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: base_url.map(|base| format!("{}/api/contact", base.trim_end_matches('/'))),
        })
    }

    async fn post(&self, form: &ContactForm) -> Result<(), ContactError> {
        let endpoint = self.endpoint.as_deref().ok_or(ContactError::NotConfigured)?;
        debug!(%endpoint, "Submitting contact form");

        let response = self
            .client
            .post(endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContactError::Rejected {
                status: status.as_u16(),
            });
        }
        let reply: BackendReply = response.json().await?;
        if reply.success {
            Ok(())
        } else {
            Err(ContactError::NotAcknowledged)
        }
    }
}

impl ContactBackend for HttpContactBackend {
    fn submit<'a>(&'a self, form: &'a ContactForm) -> BoxFuture<'a, Result<(), ContactError>> {
        Box::pin(self.post(form))
    }
}

/// Banner state rendered with the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Success,
    Error,
}

/// Result of one submission: the status plus the values to render back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub status: FormStatus,
    pub form: ContactForm,
}

/// Validates and submits once. Success clears the form; any failure keeps
/// what the visitor typed.
pub async fn submit_contact(backend: &dyn ContactBackend, form: ContactForm) -> Submission {
    let outcome = match form.validate() {
        Ok(()) => backend.submit(&form).await,
        Err(e) => Err(e),
    };
    match outcome {
        Ok(()) => {
            info!(subject = %form.subject, "Contact form submitted");
            Submission {
                status: FormStatus::Success,
                form: ContactForm::default(),
            }
        }
        Err(e) => {
            warn!("Contact form submission failed: {}", e);
            Submission {
                status: FormStatus::Error,
                form,
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Backend double answering with a fixed outcome.
    pub(crate) struct FakeBackend {
        pub(crate) accept: bool,
        pub(crate) calls: AtomicUsize,
    }

    impl FakeBackend {
        pub(crate) fn accepting() -> Self {
            Self { accept: true, calls: AtomicUsize::new(0) }
        }

        pub(crate) fn failing() -> Self {
            Self { accept: false, calls: AtomicUsize::new(0) }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ContactBackend for FakeBackend {
        fn submit<'a>(&'a self, _form: &'a ContactForm) -> BoxFuture<'a, Result<(), ContactError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let accept = self.accept;
            Box::pin(async move {
                if accept {
                    Ok(())
                } else {
                    Err(ContactError::Rejected { status: 500 })
                }
            })
        }
    }

    pub(crate) fn filled_form() -> ContactForm {
        ContactForm {
            name: "Test User".into(),
            email: "test@example.com".into(),
            subject: "Hello".into(),
            message: "Just saying hi".into(),
        }
    }

    #[test]
    fn validation_names_first_missing_field() {
        let mut form = filled_form();
        assert!(form.validate().is_ok());
        form.subject = "   ".into();
        assert!(matches!(form.validate(), Err(ContactError::MissingField("subject"))));
    }

    #[tokio::test]
    async fn success_clears_the_form() {
        let backend = FakeBackend::accepting();
        let result = submit_contact(&backend, filled_form()).await;
        assert_eq!(result.status, FormStatus::Success);
        assert_eq!(result.form, ContactForm::default());
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn failure_keeps_the_values() {
        let backend = FakeBackend::failing();
        let result = submit_contact(&backend, filled_form()).await;
        assert_eq!(result.status, FormStatus::Error);
        assert_eq!(result.form, filled_form());
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_backend() {
        let backend = FakeBackend::accepting();
        let mut form = filled_form();
        form.email.clear();
        let result = submit_contact(&backend, form.clone()).await;
        assert_eq!(result.status, FormStatus::Error);
        assert_eq!(result.form, form);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn unconfigured_backend_fails() {
        let backend = HttpContactBackend::new(None).unwrap();
        let err = backend.submit(&filled_form()).await.unwrap_err();
        assert!(matches!(err, ContactError::NotConfigured));
    }

    #[test]
    fn endpoint_joins_base_url() {
        let backend = HttpContactBackend::new(Some("https://api.example.com/")).unwrap();
        assert_eq!(backend.endpoint.as_deref(), Some("https://api.example.com/api/contact"));
    }

    #[test]
    fn payload_has_the_four_fields() {
        let value = serde_json::to_value(filled_form()).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 4);
        for key in ["name", "email", "subject", "message"] {
            assert!(keys.contains(&key.to_string()));
        }
    }
}
