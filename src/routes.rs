use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, get_service},
    Form, Router,
};
use serde::Deserialize;
use tower_http::services::{ServeDir, ServeFile};
use tracing::debug;

use crate::analytics::{ContentKind, Event};
use crate::blog;
use crate::contact::{submit_contact, ContactForm, FormStatus};
use crate::content_loader::Content;
use crate::gallery::{self, Lightbox, TagFilter};
use crate::hot_reload::ws_handler;
use crate::state::{AppState, RouterState};
use crate::views::{self, shell::Shell, Page};

fn render_page(state: &AppState, content: &Content, page: &Page) -> Html<String> {
    let shell = Shell {
        layout: &content.layout_html,
        site: &content.site,
        is_development: state.is_development(),
        measurement_id: state.settings.analytics.measurement_id.as_deref(),
    };
    Html(shell.render(page))
}

async fn homepage(State(state): State<Arc<AppState>>) -> Html<String> {
    let content = state.content.read().await;
    let posts = blog::sorted_by_date(&content.posts);
    let photos = gallery::filter_photos(&content.photos, &TagFilter::All);
    let page = views::home::render_home(&content.site, &posts, &photos, state.analytics.as_ref());
    render_page(&state, &content, &page)
}

#[derive(Deserialize, Debug, Default)]
struct BlogParams {
    q: Option<String>,
    tag: Option<String>,
}

async fn blog_index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BlogParams>,
) -> Html<String> {
    let content = state.content.read().await;
    let search = params.q.as_deref().unwrap_or("").trim();
    let tag = params.tag.as_deref().map(str::trim).filter(|t| !t.is_empty());

    let posts = match tag {
        Some(tag) => blog::posts_by_tag(&content.posts, tag)
            .into_iter()
            .filter(|post| blog::matches_query(post, search))
            .collect(),
        None => blog::search_posts(&content.posts, search),
    };
    debug!(search, ?tag, results = posts.len(), "Blog listing");

    if !search.is_empty() {
        state.analytics.emit(Event::Search {
            query: search.to_string(),
            result_count: posts.len(),
            kind: ContentKind::Blog,
        });
    }
    if let Some(tag) = tag {
        state.analytics.emit(Event::TagFilter {
            tag: tag.to_string(),
            result_count: posts.len(),
            kind: ContentKind::Blog,
        });
    }

    let tags = blog::all_tags(&content.posts);
    let query = views::blog::ListingQuery { search, tag };
    let page = views::blog::render_blog_list(
        &content.site,
        &posts,
        &tags,
        &query,
        state.analytics.as_ref(),
    );
    render_page(&state, &content, &page)
}

async fn blog_post(Path(slug): Path<String>, State(state): State<Arc<AppState>>) -> Response {
    let content = state.content.read().await;
    let Some(post) = blog::find_post(&content.posts, &slug) else {
        debug!(%slug, "Unknown post, redirecting to listing");
        return Redirect::to("/blog").into_response();
    };

    if let Some(link) = &post.external_link {
        state.analytics.emit(Event::BlogClick {
            post_id: post.id.clone(),
            title: post.title.clone(),
            outbound: true,
        });
        return Redirect::temporary(link).into_response();
    }

    state.analytics.emit(Event::BlogClick {
        post_id: post.id.clone(),
        title: post.title.clone(),
        outbound: false,
    });
    let meta = blog::generate_post_meta(post, &content.site.name);
    let related = blog::related_posts(&content.posts, post);
    let page = views::blog::render_post(post, &meta, &related);
    render_page(&state, &content, &page).into_response()
}

#[derive(Deserialize, Debug, Default)]
struct GalleryParams {
    tag: Option<String>,
    q: Option<String>,
    photo: Option<String>,
}

async fn photography(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GalleryParams>,
) -> Html<String> {
    let content = state.content.read().await;
    let filter = TagFilter::from_param(params.tag.as_deref());
    let search = params.q.as_deref().unwrap_or("");

    let mut filtered = gallery::filter_photos(&content.photos, &filter);
    filtered.retain(|photo| gallery::matches_query(photo, search));

    if !search.trim().is_empty() {
        state.analytics.emit(Event::Search {
            query: search.trim().to_string(),
            result_count: filtered.len(),
            kind: ContentKind::Photography,
        });
    }
    if filter != TagFilter::All {
        state.analytics.emit(Event::TagFilter {
            tag: filter.label().to_string(),
            result_count: filtered.len(),
            kind: ContentKind::Photography,
        });
    }

    let lightbox = params
        .photo
        .as_deref()
        .and_then(|id| Lightbox::open_on(&filtered, id));
    if let Some(lightbox) = lightbox {
        let photo = filtered[lightbox.index()];
        state.analytics.emit(Event::PhotoView {
            photo_id: photo.id.clone(),
            title: photo.title.clone(),
            tags: photo.tags.clone(),
        });
        state.analytics.emit(Event::LightboxInteraction {
            action: "open",
            photo_id: photo.id.clone(),
        });
    }

    let labels = gallery::filter_labels(&content.photos);
    let page = views::photography::render_gallery(
        &content.site,
        &filtered,
        &labels,
        &filter,
        search,
        lightbox,
    );
    render_page(&state, &content, &page)
}

async fn contact_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let content = state.content.read().await;
    let page = views::contact::render_contact(&content.site, &ContactForm::default(), FormStatus::Idle);
    render_page(&state, &content, &page)
}

async fn contact_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ContactForm>,
) -> Html<String> {
    let has_subject = !form.subject.trim().is_empty();
    // Submit before taking the content lock so a slow backend never holds it.
    let submission = submit_contact(state.contact.as_ref(), form).await;
    if submission.status == FormStatus::Success {
        state.analytics.emit(Event::ContactSubmit { has_subject });
    }

    let content = state.content.read().await;
    let page = views::contact::render_contact(&content.site, &submission.form, submission.status);
    render_page(&state, &content, &page)
}

async fn not_found(State(state): State<Arc<AppState>>, uri: Uri) -> (StatusCode, Html<String>) {
    let content = state.content.read().await;
    let page = views::shell::render_not_found(&content.not_found_html, uri.path(), &content.site);
    (StatusCode::NOT_FOUND, render_page(&state, &content, &page))
}

pub fn router(router_state: RouterState) -> Router {
    let settings = &router_state.app_state.settings;
    let static_root = settings.content_dir.join("static");
    let static_dir = get_service(ServeDir::new(&static_root));
    let favicon = get_service(ServeFile::new(static_root.join("favicon.svg")));

    let mut app = Router::new()
        .route("/", get(homepage))
        .route("/blog", get(blog_index))
        .route("/blog/{slug}", get(blog_post))
        .route("/photography", get(photography))
        .route("/contact", get(contact_page).post(contact_submit))
        .nest_service("/static", static_dir)
        .route_service("/favicon.ico", favicon);

    if settings.is_development {
        app = app.route("/ws", get(ws_handler));
    }

    app.fallback(not_found).with_state(router_state)
}
