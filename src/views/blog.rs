use super::{esc, framed_image, tag_list, Page};
use crate::analytics::{Analytics, Event};
use crate::blog::PostMeta;
use crate::models::{display_date, BlogPost};
use crate::site::SiteConfig;

const LISTING_DESCRIPTION: &str =
    "Read about development, photography, and digital storytelling adventures.";

/// One listing card. Rendering it counts as an impression.
pub fn post_card(post: &BlogPost, analytics: &dyn Analytics) -> String {
    analytics.emit(Event::BlogImpression {
        post_id: post.id.clone(),
        title: post.title.clone(),
    });

    let link_attrs = if post.is_external() {
        " target=\"_blank\" rel=\"noopener noreferrer\" data-outbound=\"true\""
    } else {
        ""
    };
    let image = post
        .preview_image
        .as_deref()
        .or(post.featured_image.as_deref())
        .map(|src| framed_image(src, &post.title, "card-image"))
        .unwrap_or_default();

    format!(
        r#"<article class="post-card" data-post-id="{id}">
    {image}
    <p class="post-meta"><time>{date}</time> · <span>{read_time}</span></p>
    <h3><a href="{href}"{link_attrs}>{title}</a></h3>
    <p class="excerpt">{excerpt}</p>
    {tags}
</article>"#,
        id = esc(&post.id),
        date = display_date(post.date),
        read_time = esc(&post.read_time),
        href = esc(&post.href()),
        title = esc(&post.title),
        excerpt = esc(&post.excerpt),
        tags = tag_list(&post.tags),
    )
}

/// Listing state: what the visitor searched for or filtered on.
#[derive(Debug, Clone, Default)]
pub struct ListingQuery<'a> {
    pub search: &'a str,
    pub tag: Option<&'a str>,
}

/// Listing link for `tag`, keeping the current search.
fn listing_url(search: &str, tag: Option<&str>) -> String {
    let mut params = Vec::new();
    if let Some(tag) = tag {
        params.push(format!("tag={}", urlencoding::encode(tag)));
    }
    let search = search.trim();
    if !search.is_empty() {
        params.push(format!("q={}", urlencoding::encode(search)));
    }
    if params.is_empty() {
        "/blog".to_string()
    } else {
        format!("/blog?{}", params.join("&"))
    }
}

pub fn render_blog_list(
    site: &SiteConfig,
    posts: &[&BlogPost],
    tags: &[String],
    query: &ListingQuery<'_>,
    analytics: &dyn Analytics,
) -> Page {
    let chips: String = tags
        .iter()
        .map(|tag| {
            let active = if query.tag == Some(tag.as_str()) {
                " class=\"active\""
            } else {
                ""
            };
            format!(
                "<a href=\"{}\"{active}>{}</a>",
                esc(&listing_url(query.search, Some(tag.as_str()))),
                esc(tag)
            )
        })
        .collect();

    let results = if posts.is_empty() {
        let what = query.tag.unwrap_or(query.search);
        format!(
            "<p class=\"empty\">No posts found matching \"{}\".</p>",
            esc(what)
        )
    } else {
        let cards: String = posts.iter().map(|post| post_card(post, analytics)).collect();
        format!("<div class=\"post-grid\">{cards}</div>")
    };

    let body = format!(
        r#"<section class="page blog">
    <header class="page-header">
        <h1>Stories &amp; Thoughts</h1>
        <p>Adventures in code, creativity, and everything that sparks my curiosity</p>
    </header>
    <form class="search" method="get" action="/blog" role="search">
        <input type="search" name="q" value="{search}" placeholder="Search posts..." aria-label="Search posts">
        {tag_input}
    </form>
    <nav class="tag-filter"><a href="{all_href}"{all_active}>All</a>{chips}</nav>
    {results}
</section>"#,
        search = esc(query.search),
        tag_input = query
            .tag
            .map(|tag| format!("<input type=\"hidden\" name=\"tag\" value=\"{}\">", esc(tag)))
            .unwrap_or_default(),
        all_href = esc(&listing_url(query.search, None)),
        all_active = if query.tag.is_none() { " class=\"active\"" } else { "" },
    );

    Page {
        title: site.page_title("Blog"),
        description: LISTING_DESCRIPTION.to_string(),
        path: "/blog".to_string(),
        head: String::new(),
        body,
    }
}

fn meta_head(meta: &PostMeta) -> String {
    let mut head = format!(
        "<meta name=\"keywords\" content=\"{}\">\
         <meta property=\"og:title\" content=\"{}\">\
         <meta property=\"og:description\" content=\"{}\">\
         <meta property=\"og:type\" content=\"{}\">\
         <meta property=\"article:author\" content=\"{}\">\
         <meta property=\"article:published_time\" content=\"{}\">",
        esc(&meta.keywords),
        esc(&meta.og_title),
        esc(&meta.description),
        meta.og_type,
        esc(&meta.author),
        esc(&meta.published),
    );
    for tag in &meta.tags {
        head.push_str(&format!("<meta property=\"article:tag\" content=\"{}\">", esc(tag)));
    }
    head
}

/// Detail view for a post hosted on this site. Posts with an external link
/// are redirected before they get here.
pub fn render_post(post: &BlogPost, meta: &PostMeta, related: &[&BlogPost]) -> Page {
    let image = post
        .featured_image
        .as_deref()
        .map(|src| framed_image(src, &post.title, "featured"))
        .unwrap_or_default();

    let related_html = if related.is_empty() {
        String::new()
    } else {
        let items: String = related
            .iter()
            .map(|p| format!("<li><a href=\"{}\">{}</a></li>", esc(&p.href()), esc(&p.title)))
            .collect();
        format!("<aside class=\"related\"><h2>Related Posts</h2><ul>{items}</ul></aside>")
    };

    let body = format!(
        r#"<article class="page post" data-post-id="{id}">
    <a href="/blog" class="back">&larr; Back to Blog</a>
    <p class="post-meta"><time>{date}</time> · <span>{read_time}</span> · <span>{author}</span></p>
    <h1>{title}</h1>
    <p class="excerpt">{excerpt}</p>
    {tags}
    {image}
    <div class="post-content">{content}</div>
    {related_html}
</article>"#,
        id = esc(&post.id),
        date = display_date(post.date),
        read_time = esc(&post.read_time),
        author = esc(&post.author),
        title = esc(&post.title),
        excerpt = esc(&post.excerpt),
        tags = tag_list(&post.tags),
        content = post.content_html.as_deref().unwrap_or_default(),
    );

    Page {
        title: meta.title.clone(),
        description: meta.description.clone(),
        path: format!("/blog/{}", post.id),
        head: meta_head(meta),
        body,
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::*;
    use crate::analytics::tests::RecordingAnalytics;
    use crate::blog::generate_post_meta;
    use crate::blog::tests::{corpus, post};
    use crate::views::shell::tests::site;

    #[test]
    fn every_card_is_an_impression() {
        let posts = corpus();
        let refs: Vec<&BlogPost> = posts.iter().collect();
        let analytics = RecordingAnalytics::default();
        render_blog_list(&site(), &refs, &[], &ListingQuery::default(), &analytics);
        assert_eq!(analytics.named("blog_impression").len(), 3);
    }

    #[test]
    fn external_cards_open_in_a_new_tab() {
        let mut p = post("ext", "Elsewhere", (2025, 1, 1), &["AI"]);
        p.external_link = Some("https://medium.com/@someone/elsewhere".into());
        let html = post_card(&p, &RecordingAnalytics::default());
        let doc = Html::parse_fragment(&html);
        let link = doc.select(&Selector::parse("h3 a").unwrap()).next().unwrap();
        assert_eq!(link.value().attr("href"), Some("https://medium.com/@someone/elsewhere"));
        assert_eq!(link.value().attr("target"), Some("_blank"));
    }

    #[test]
    fn empty_results_mention_the_query() {
        let query = ListingQuery { search: "kubernetes", tag: None };
        let page = render_blog_list(&site(), &[], &[], &query, &RecordingAnalytics::default());
        assert!(page.body.contains("No posts found matching \"kubernetes\""));
    }

    #[test]
    fn search_box_keeps_the_query_escaped() {
        let query = ListingQuery { search: "\"><script>", tag: None };
        let page = render_blog_list(&site(), &[], &[], &query, &RecordingAnalytics::default());
        assert!(!page.body.contains("<script>"));
    }

    #[test]
    fn active_tag_chip_is_marked() {
        let tags = vec!["Blog Posts".to_string(), "Travel".to_string()];
        let query = ListingQuery { search: "", tag: Some("Blog Posts") };
        let page = render_blog_list(&site(), &[], &tags, &query, &RecordingAnalytics::default());
        assert!(page.body.contains("<a href=\"/blog?tag=Blog%20Posts\" class=\"active\">Blog Posts</a>"));
    }

    #[test]
    fn search_and_tag_travel_together() {
        let tags = vec!["Travel".to_string(), "Rust".to_string()];
        let query = ListingQuery { search: "road trip", tag: Some("Travel") };
        let page = render_blog_list(&site(), &[], &tags, &query, &RecordingAnalytics::default());
        let doc = Html::parse_fragment(&page.body);

        let hidden = Selector::parse("form.search input[name=tag]").unwrap();
        let tag_value = doc.select(&hidden).next().and_then(|el| el.value().attr("value"));
        assert_eq!(tag_value, Some("Travel"));

        let chips = Selector::parse(".tag-filter a").unwrap();
        let hrefs: Vec<_> = doc.select(&chips).filter_map(|el| el.value().attr("href")).collect();
        assert_eq!(
            hrefs,
            ["/blog?q=road%20trip", "/blog?tag=Travel&q=road%20trip", "/blog?tag=Rust&q=road%20trip"]
        );
    }

    #[test]
    fn untagged_search_form_has_no_hidden_tag() {
        let query = ListingQuery { search: "rust", tag: None };
        let page = render_blog_list(&site(), &[], &[], &query, &RecordingAnalytics::default());
        assert!(!page.body.contains("name=\"tag\""));
    }

    #[test]
    fn post_page_renders_content_and_meta() {
        let posts = corpus();
        let current = &posts[0];
        let meta = generate_post_meta(current, "Site");
        let related = vec![&posts[1]];
        let page = render_post(current, &meta, &related);
        assert!(page.body.contains("<p>Body of hacks</p>"));
        assert!(page.body.contains("Related Posts"));
        assert!(page.head.contains("article:tag\" content=\"Photography\""));
        assert_eq!(page.title, "Five Hacks - Site");
    }
}
