use std::collections::HashSet;
use std::path::{Path, PathBuf};

use axum::http::HeaderValue;
use gray_matter::{engine::YAML, Matter};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, error, info};

use crate::markdown::{estimate_read_time, render_markdown_to_html};
use crate::models::{BlogPost, FrontMatter, Photo, PhotoFile};
use crate::site::SiteConfig;
use crate::state::AppState;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid front matter in {path}: {message}")]
    FrontMatter { path: PathBuf, message: String },
    #[error("duplicate {kind} id {id:?}")]
    DuplicateId { kind: &'static str, id: String },
    #[error("{kind} {id:?} has no tags")]
    EmptyTags { kind: &'static str, id: String },
}

/// Everything the pages render from. Read-only once loaded.
#[derive(Debug, Clone)]
pub struct Content {
    pub site: SiteConfig,
    pub posts: Vec<BlogPost>,
    pub photos: Vec<Photo>,
    pub layout_html: String,
    /// Supports a `{{path}}` placeholder.
    pub not_found_html: String,
}

async fn read(path: PathBuf) -> Result<String, ContentError> {
    fs::read_to_string(&path)
        .await
        .map_err(|source| ContentError::Io { path, source })
}

fn parse_toml<T: serde::de::DeserializeOwned>(path: &Path, raw: &str) -> Result<T, ContentError> {
    toml::from_str(raw).map_err(|source| ContentError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

pub async fn load_content(dir: &Path) -> Result<Content, ContentError> {
    let layout_html = read(dir.join("layout.html")).await?;
    let not_found_html = read(dir.join("not_found.html")).await?;

    let site_path = dir.join("site.toml");
    let site: SiteConfig = parse_toml(&site_path, &read(site_path.clone()).await?)?;

    let photos_path = dir.join("photos.toml");
    let photos = parse_toml::<PhotoFile>(&photos_path, &read(photos_path.clone()).await?)?.photos;
    check_photos(&photos)?;

    let posts = load_posts(&dir.join("posts"), &site.name).await?;
    check_posts(&posts)?;

    debug!(posts = posts.len(), photos = photos.len(), "Content loaded");
    Ok(Content {
        site,
        posts,
        photos,
        layout_html,
        not_found_html,
    })
}

async fn load_posts(dir: &Path, default_author: &str) -> Result<Vec<BlogPost>, ContentError> {
    let io_err = |source: std::io::Error| ContentError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    let mut entries = fs::read_dir(dir).await.map_err(io_err)?;
    while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "md") {
            paths.push(path);
        }
    }
    // Directory order is platform dependent.
    paths.sort();

    let mut posts = Vec::with_capacity(paths.len());
    for path in paths {
        let raw = read(path.clone()).await?;
        posts.push(parse_post(&path, &raw, default_author)?);
    }
    Ok(posts)
}

pub fn parse_post(path: &Path, raw: &str, default_author: &str) -> Result<BlogPost, ContentError> {
    let front_matter_err = |message: String| ContentError::FrontMatter {
        path: path.to_path_buf(),
        message,
    };
    let matter = Matter::<YAML>::new();
    let parsed = matter
        .parse::<FrontMatter>(raw)
        .map_err(|e| front_matter_err(e.to_string()))?;
    let fm = parsed
        .data
        .ok_or_else(|| front_matter_err("missing front matter".to_string()))?;

    // The link becomes a Location header, so it has to be a valid header value.
    if let Some(link) = &fm.external_link {
        if HeaderValue::from_str(link).is_err() {
            return Err(front_matter_err(format!("invalid external_link {link:?}")));
        }
    }

    let body = parsed.content.trim();
    let content_html = (!body.is_empty()).then(|| render_markdown_to_html(body));
    let read_time = fm.read_time.unwrap_or_else(|| estimate_read_time(body));

    Ok(BlogPost {
        id: fm.id,
        title: fm.title,
        excerpt: fm.excerpt,
        content_html,
        external_link: fm.external_link,
        date: fm.date,
        tags: fm.tags,
        author: fm.author.unwrap_or_else(|| default_author.to_string()),
        read_time,
        featured_image: fm.featured_image,
        preview_image: fm.preview_image,
    })
}

fn check_unique<'a>(kind: &'static str, ids: impl Iterator<Item = &'a str>) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ContentError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn check_posts(posts: &[BlogPost]) -> Result<(), ContentError> {
    check_unique("post", posts.iter().map(|p| p.id.as_str()))?;
    match posts.iter().find(|p| p.tags.is_empty()) {
        Some(p) => Err(ContentError::EmptyTags { kind: "post", id: p.id.clone() }),
        None => Ok(()),
    }
}

fn check_photos(photos: &[Photo]) -> Result<(), ContentError> {
    check_unique("photo", photos.iter().map(|p| p.id.as_str()))?;
    match photos.iter().find(|p| p.tags.is_empty()) {
        Some(p) => Err(ContentError::EmptyTags { kind: "photo", id: p.id.clone() }),
        None => Ok(()),
    }
}

/// Swaps in freshly loaded content; keeps the old content when loading fails.
pub async fn reload_content(app_state: &AppState) {
    info!("Reloading application content...");
    match load_content(&app_state.settings.content_dir).await {
        Ok(content) => {
            *app_state.content.write().await = content;
            info!("Content successfully reloaded.");
        }
        Err(e) => {
            error!("Failed to reload content: {}", e);
        }
    }
}
