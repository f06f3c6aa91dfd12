//! Analytics bridge.
//!
//! Views and handlers only see the [`Analytics`] capability. Which sink sits
//! behind it is decided once at start from the GA settings: nothing
//! configured means every event is dropped silently.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use crate::config::AnalyticsSettings;

const MEASUREMENT_PROTOCOL_URL: &str = "https://www.google-analytics.com/mp/collect";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Blog,
    Photography,
}

impl ContentKind {
    fn as_str(self) -> &'static str {
        match self {
            ContentKind::Blog => "blog",
            ContentKind::Photography => "photography",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    BlogImpression { post_id: String, title: String },
    BlogClick { post_id: String, title: String, outbound: bool },
    PhotoView { photo_id: String, title: String, tags: Vec<String> },
    LightboxInteraction { action: &'static str, photo_id: String },
    ContactSubmit { has_subject: bool },
    Search { query: String, result_count: usize, kind: ContentKind },
    TagFilter { tag: String, result_count: usize, kind: ContentKind },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::BlogImpression { .. } => "blog_impression",
            Event::BlogClick { .. } => "blog_click",
            Event::PhotoView { .. } => "photo_view",
            Event::LightboxInteraction { .. } => "lightbox_interaction",
            Event::ContactSubmit { .. } => "contact_submit",
            Event::Search { .. } => "search",
            Event::TagFilter { .. } => "tag_filter",
        }
    }

    pub fn params(&self) -> Map<String, Value> {
        let value = match self {
            Event::BlogImpression { post_id, title } => json!({
                "event_category": "Content Engagement",
                "event_label": title,
                "blog_id": post_id,
                "engagement_type": "impression",
            }),
            Event::BlogClick { post_id, title, outbound } => json!({
                "event_category": "Content Engagement",
                "event_label": title,
                "blog_id": post_id,
                "outbound_link": outbound,
                "engagement_type": "click",
            }),
            Event::PhotoView { photo_id, title, tags } => json!({
                "event_category": "Gallery Interaction",
                "event_label": title,
                "photo_id": photo_id,
                "tag_count": tags.len(),
                "first_tag": tags.first().map(String::as_str).unwrap_or("untagged"),
            }),
            Event::LightboxInteraction { action, photo_id } => json!({
                "event_category": "Gallery Interaction",
                "event_label": action,
                "photo_id": photo_id,
                "interaction_type": action,
            }),
            Event::ContactSubmit { has_subject } => json!({
                "event_category": "Lead Generation",
                "event_label": "Contact Form",
                "form_type": "contact",
                "has_subject": has_subject,
            }),
            Event::Search { query, result_count, kind } => json!({
                "event_category": "Content Discovery",
                "event_label": query,
                "search_term": query,
                "search_type": kind.as_str(),
                "result_count": result_count,
            }),
            Event::TagFilter { tag, result_count, kind } => json!({
                "event_category": "Content Discovery",
                "event_label": tag,
                "tag_name": tag,
                "content_type": kind.as_str(),
                "result_count": result_count,
            }),
        };
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

/// Fire-and-forget event emission.
pub trait Analytics: Send + Sync {
    fn emit(&self, event: Event);
}

pub struct NoopAnalytics;

impl Analytics for NoopAnalytics {
    fn emit(&self, _event: Event) {}
}

#[derive(Serialize)]
struct MeasurementPayload<'a> {
    client_id: &'a str,
    events: [MeasurementEvent<'a>; 1],
}

#[derive(Serialize)]
struct MeasurementEvent<'a> {
    name: &'a str,
    params: Map<String, Value>,
}

/// Server-side sink posting to the GA4 Measurement Protocol.
pub struct MeasurementProtocol {
    client: reqwest::Client,
    measurement_id: String,
    api_secret: String,
    client_id: String,
}

impl MeasurementProtocol {
    pub fn new(measurement_id: String, api_secret: String) -> Self {
        let started = chrono::Utc::now().timestamp();
        Self {
            client: reqwest::Client::new(),
            measurement_id,
            api_secret,
            client_id: format!("{}.{}", std::process::id(), started),
        }
    }

    fn payload(&self, event: &Event) -> Value {
        let payload = MeasurementPayload {
            client_id: &self.client_id,
            events: [MeasurementEvent {
                name: event.name(),
                params: event.params(),
            }],
        };
        serde_json::to_value(payload).unwrap_or(Value::Null)
    }
}

impl Analytics for MeasurementProtocol {
    fn emit(&self, event: Event) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!(event = event.name(), "No runtime available, dropping analytics event");
            return;
        };
        let request = self
            .client
            .post(MEASUREMENT_PROTOCOL_URL)
            .query(&[
                ("measurement_id", self.measurement_id.as_str()),
                ("api_secret", self.api_secret.as_str()),
            ])
            .json(&self.payload(&event));
        let name = event.name();
        runtime.spawn(async move {
            match request.send().await {
                Ok(response) => debug!(event = name, status = %response.status(), "Analytics event sent"),
                Err(e) => debug!(event = name, "Analytics event failed: {}", e),
            }
        });
    }
}

/// Picks the server-side sink for the configured settings.
pub fn from_settings(settings: &AnalyticsSettings) -> Arc<dyn Analytics> {
    match (&settings.measurement_id, &settings.api_secret) {
        (Some(id), Some(secret)) => {
            info!(measurement_id = %id, "Server-side analytics enabled");
            Arc::new(MeasurementProtocol::new(id.clone(), secret.clone()))
        }
        (Some(id), None) => {
            info!(measurement_id = %id, "GA_API_SECRET not set, analytics is browser-only");
            Arc::new(NoopAnalytics)
        }
        _ => Arc::new(NoopAnalytics),
    }
}

/// gtag.js loader for the page head, configured with the current path.
pub fn gtag_snippet(measurement_id: &str, page_path: &str) -> String {
    let id = htmlescape::encode_minimal(measurement_id);
    let config = json!({ "page_path": page_path })
        .to_string()
        .replace("</", "<\\/");
    let id_js = Value::String(measurement_id.to_string()).to_string();
    format!(
        r#"<script async src="https://www.googletagmanager.com/gtag/js?id={id}"></script>
<script>
    window.dataLayer = window.dataLayer || [];
    function gtag(){{dataLayer.push(arguments);}}
    gtag('js', new Date());
    gtag('config', {id_js}, {config});
</script>"#
    )
}
