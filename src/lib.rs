//! Personal portfolio site: blog, photography gallery and contact form,
//! rendered on the server from a directory of content files.

pub mod analytics;
pub mod blog;
pub mod config;
pub mod contact;
pub mod content_loader;
pub mod gallery;
pub mod hot_reload;
pub mod markdown;
pub mod models;
pub mod routes;
pub mod site;
pub mod state;
pub mod views;
