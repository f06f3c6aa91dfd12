//! Queries over the blog post collection.
//!
//! Everything here works on a slice already held in memory; nothing
//! allocates beyond the returned references.

use std::collections::BTreeSet;

use crate::models::{display_date, BlogPost};

const RELATED_POST_LIMIT: usize = 3;

/// All posts, newest first.
pub fn sorted_by_date(posts: &[BlogPost]) -> Vec<&BlogPost> {
    let mut sorted: Vec<&BlogPost> = posts.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Case-insensitive substring match against title, excerpt and tags.
/// A blank query matches everything.
pub fn search_posts<'a>(posts: &'a [BlogPost], query: &str) -> Vec<&'a BlogPost> {
    sorted_by_date(posts)
        .into_iter()
        .filter(|post| matches_query(post, query))
        .collect()
}

pub fn matches_query(post: &BlogPost, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty()
        || post.title.to_lowercase().contains(&needle)
        || post.excerpt.to_lowercase().contains(&needle)
        || post.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
}

pub fn posts_by_tag<'a>(posts: &'a [BlogPost], tag: &str) -> Vec<&'a BlogPost> {
    sorted_by_date(posts)
        .into_iter()
        .filter(|post| post.tags.iter().any(|t| t == tag))
        .collect()
}

pub fn find_post<'a>(posts: &'a [BlogPost], id: &str) -> Option<&'a BlogPost> {
    posts.iter().find(|post| post.id == id)
}

/// Other posts sharing at least one tag with `current`, newest first.
pub fn related_posts<'a>(posts: &'a [BlogPost], current: &BlogPost) -> Vec<&'a BlogPost> {
    sorted_by_date(posts)
        .into_iter()
        .filter(|post| post.id != current.id)
        .filter(|post| post.tags.iter().any(|tag| current.tags.contains(tag)))
        .take(RELATED_POST_LIMIT)
        .collect()
}

/// Distinct tags across all posts, sorted.
pub fn all_tags(posts: &[BlogPost]) -> Vec<String> {
    posts
        .iter()
        .flat_map(|post| post.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Head metadata for a post detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct PostMeta {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub og_title: String,
    pub og_type: &'static str,
    pub author: String,
    pub published: String,
    pub tags: Vec<String>,
}

pub fn generate_post_meta(post: &BlogPost, site_name: &str) -> PostMeta {
    PostMeta {
        title: format!("{} - {}", post.title, site_name),
        description: post.excerpt.clone(),
        keywords: post.tags.join(", "),
        og_title: post.title.clone(),
        og_type: "article",
        author: post.author.clone(),
        published: display_date(post.date),
        tags: post.tags.clone(),
    }
}
