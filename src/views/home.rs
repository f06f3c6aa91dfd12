use super::blog::post_card;
use super::photography::gallery_url;
use super::{esc, framed_image, Page};
use crate::analytics::Analytics;
use crate::gallery::TagFilter;
use crate::models::{BlogPost, Photo};
use crate::site::SiteConfig;

pub const LATEST_POST_COUNT: usize = 3;
pub const LATEST_PHOTO_COUNT: usize = 6;

fn render_about(site: &SiteConfig) -> String {
    let about = &site.about;
    let paragraphs: String = about
        .description
        .iter()
        .map(|p| format!("<p>{}</p>", esc(p)))
        .collect();
    let skills: String = about
        .skills
        .iter()
        .map(|s| format!("<li>{}</li>", esc(s)))
        .collect();
    let experience: String = about
        .experience
        .iter()
        .map(|e| {
            format!(
                "<li><h4>{} · {}</h4><p class=\"duration\">{}</p><p>{}</p></li>",
                esc(&e.role),
                esc(&e.company),
                esc(&e.duration),
                esc(&e.description)
            )
        })
        .collect();
    format!(
        r#"<section id="about" class="about">
    <h2>About Me</h2>
    <h3>{headline}</h3>
    {paragraphs}
    <ul class="skills">{skills}</ul>
    <ul class="experience">{experience}</ul>
</section>"#,
        headline = esc(&about.headline),
    )
}

fn render_services(site: &SiteConfig) -> String {
    let cards: String = site
        .services
        .iter()
        .map(|s| {
            let skills: String = s.skills.iter().map(|k| format!("<li>{}</li>", esc(k))).collect();
            format!(
                "<article class=\"service\"><span class=\"icon\">{}</span><h3>{}</h3><p>{}</p><ul>{skills}</ul></article>",
                esc(&s.icon),
                esc(&s.title),
                esc(&s.description)
            )
        })
        .collect();
    format!("<section class=\"services\"><h2>What I Do</h2><div class=\"service-grid\">{cards}</div></section>")
}

/// `posts` and `photos` are expected newest first; only the head of each is shown.
pub fn render_home(
    site: &SiteConfig,
    posts: &[&BlogPost],
    photos: &[&Photo],
    analytics: &dyn Analytics,
) -> Page {
    let hero = &site.hero;
    let background = hero
        .background_image
        .as_deref()
        .map(|src| format!(" style=\"background-image: url('{}')\"", esc(src)))
        .unwrap_or_default();

    let latest_posts: String = posts
        .iter()
        .take(LATEST_POST_COUNT)
        .map(|post| post_card(post, analytics))
        .collect();
    let latest_photos: String = photos
        .iter()
        .take(LATEST_PHOTO_COUNT)
        .map(|photo| {
            format!(
                "<a href=\"{}\">{}</a>",
                esc(&gallery_url(&TagFilter::All, "", Some(photo.id.as_str()))),
                framed_image(&photo.thumbnail_url, &photo.title, "thumb")
            )
        })
        .collect();

    let body = format!(
        r#"<section class="hero"{background}>
    <h1>{headline}</h1>
    <p>{subheadline}</p>
    <div class="cta">
        <a href="/blog" class="primary">{primary}</a>
        <a href="/photography" class="secondary">{secondary}</a>
    </div>
</section>
{about}
{services}
<section class="latest-posts">
    <h2>Latest Stories</h2>
    <div class="post-grid">{latest_posts}</div>
    <a href="/blog">View All Posts</a>
</section>
<section class="latest-photos">
    <h2>Through My Lens</h2>
    <div class="photo-strip">{latest_photos}</div>
    <a href="/photography">View Gallery</a>
</section>
<section class="contact-cta">
    <h2>Let's Build Something Together</h2>
    <a href="/contact">Get In Touch</a>
</section>"#,
        headline = esc(&hero.headline),
        subheadline = esc(&hero.subheadline),
        primary = esc(&hero.primary_cta),
        secondary = esc(&hero.secondary_cta),
        about = render_about(site),
        services = render_services(site),
    );

    Page {
        title: site.seo.title.clone(),
        description: site.seo.description.clone(),
        path: "/".to_string(),
        head: String::new(),
        body,
    }
}
