use super::{esc, framed_image, tag_list, Page};
use crate::gallery::{format_exif, KeyAction, Lightbox, TagFilter};
use crate::models::Photo;
use crate::site::SiteConfig;

const GALLERY_DESCRIPTION: &str = "Moments captured through my lens: landscapes, travel, and street photography.";

/// Link back to the gallery with the current tag and search kept, optionally
/// with the lightbox open on `photo`.
pub fn gallery_url(filter: &TagFilter, search: &str, photo: Option<&str>) -> String {
    let mut params = Vec::new();
    if let TagFilter::Tag(tag) = filter {
        params.push(format!("tag={}", urlencoding::encode(tag)));
    }
    let search = search.trim();
    if !search.is_empty() {
        params.push(format!("q={}", urlencoding::encode(search)));
    }
    if let Some(id) = photo {
        params.push(format!("photo={}", urlencoding::encode(id)));
    }
    if params.is_empty() {
        "/photography".to_string()
    } else {
        format!("/photography?{}", params.join("&"))
    }
}

/// Dispatches the lightbox key bindings to the rendered links.
fn keyboard_script() -> String {
    let bindings: Vec<String> = KeyAction::BINDINGS
        .iter()
        .map(|(key, action)| format!("\"{key}\":\"{}\"", action.as_str()))
        .collect();
    format!(
        r#"<script>
    (() => {{
        const bindings = {{{}}};
        document.addEventListener("keydown", (event) => {{
            const action = bindings[event.key];
            const link = action && document.querySelector('[data-key-action="' + action + '"]');
            if (link) {{
                event.preventDefault();
                window.location.href = link.href;
            }}
        }});
    }})();
</script>"#,
        bindings.join(",")
    )
}

fn render_lightbox(
    filtered: &[&Photo],
    filter: &TagFilter,
    search: &str,
    lightbox: Lightbox,
) -> String {
    let photo = filtered[lightbox.index()];
    let prev = filtered[lightbox.previous().index()];
    let next = filtered[lightbox.next().index()];
    let exif = format_exif(photo);

    format!(
        r#"<div class="lightbox" role="dialog" aria-modal="true" aria-label="{title}">
    <a class="lightbox-close" href="{close}" data-key-action="{close_action}" aria-label="Close">&times;</a>
    <a class="lightbox-prev" href="{prev}" data-key-action="{prev_action}" aria-label="Previous photo">&lsaquo;</a>
    <figure>
        {image}
        <figcaption>
            <h3>{title}</h3>
            <p>{caption}</p>
            <p class="photo-details"><span>{location}</span> · <span>{camera}</span></p>
            <p class="exif">{exif}</p>
            {tags}
        </figcaption>
    </figure>
    <a class="lightbox-next" href="{next}" data-key-action="{next_action}" aria-label="Next photo">&rsaquo;</a>
    <p class="lightbox-position">{position} / {total}</p>
</div>
{script}"#,
        title = esc(&photo.title),
        close = esc(&gallery_url(filter, search, None)),
        close_action = KeyAction::Close.as_str(),
        prev = esc(&gallery_url(filter, search, Some(prev.id.as_str()))),
        prev_action = KeyAction::Previous.as_str(),
        next = esc(&gallery_url(filter, search, Some(next.id.as_str()))),
        next_action = KeyAction::Next.as_str(),
        image = framed_image(&photo.image_url, &photo.title, "lightbox-image"),
        caption = esc(&photo.caption),
        location = esc(&photo.location),
        camera = esc(&photo.camera),
        exif = esc(&exif),
        tags = tag_list(&photo.tags),
        position = lightbox.index() + 1,
        total = filtered.len(),
        script = keyboard_script(),
    )
}

pub fn render_gallery(
    site: &SiteConfig,
    filtered: &[&Photo],
    labels: &[String],
    filter: &TagFilter,
    search: &str,
    lightbox: Option<Lightbox>,
) -> Page {
    let chips: String = labels
        .iter()
        .map(|label| {
            let chip_filter = TagFilter::from_param(Some(label.as_str()));
            let active = if &chip_filter == filter {
                " class=\"active\""
            } else {
                ""
            };
            format!(
                "<a href=\"{}\"{active}>{}</a>",
                esc(&gallery_url(&chip_filter, search, None)),
                esc(label)
            )
        })
        .collect();

    let tag_input = match filter {
        TagFilter::Tag(tag) => format!("<input type=\"hidden\" name=\"tag\" value=\"{}\">", esc(tag)),
        TagFilter::All => String::new(),
    };

    let grid = if filtered.is_empty() {
        "<p class=\"empty\">No photos found in this category.</p>".to_string()
    } else {
        let items: String = filtered
            .iter()
            .map(|photo| {
                format!(
                    r#"<a class="masonry-item" href="{href}" data-photo-id="{id}">
    {image}
    <span class="overlay"><strong>{title}</strong><span>{location}</span></span>
</a>"#,
                    href = esc(&gallery_url(filter, search, Some(photo.id.as_str()))),
                    id = esc(&photo.id),
                    image = framed_image(&photo.thumbnail_url, &photo.title, "thumb"),
                    title = esc(&photo.title),
                    location = esc(&photo.location),
                )
            })
            .collect();
        format!("<div class=\"masonry\">{items}</div>")
    };

    let lightbox_html = lightbox
        .map(|lb| render_lightbox(filtered, filter, search, lb))
        .unwrap_or_default();

    let body = format!(
        r#"<section class="page photography">
    <header class="page-header">
        <h1>Through My Lens</h1>
        <p>{description}</p>
    </header>
    <form class="search" method="get" action="/photography" role="search">
        <input type="search" name="q" value="{search}" placeholder="Search photos..." aria-label="Search photos">
        {tag_input}
    </form>
    <nav class="tag-filter">{chips}</nav>
    {grid}
    <aside class="cta">
        <h3>Like what you see?</h3>
        <p>Available for portraits, events, and commercial shoots.</p>
        <a href="/contact">Get in touch</a>
    </aside>
    {lightbox_html}
</section>"#,
        description = esc(GALLERY_DESCRIPTION),
        search = esc(search.trim()),
    );

    Page {
        title: site.page_title("Photography"),
        description: GALLERY_DESCRIPTION.to_string(),
        path: "/photography".to_string(),
        head: String::new(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::*;
    use crate::gallery::tests::photos;
    use crate::gallery::{filter_labels, filter_photos};
    use crate::views::shell::tests::site;

    fn href(html: &str, selector: &str) -> String {
        let doc = Html::parse_fragment(html);
        let sel = Selector::parse(selector).unwrap();
        doc.select(&sel)
            .next()
            .and_then(|el| el.value().attr("href"))
            .unwrap()
            .to_string()
    }

    #[test]
    fn gallery_urls() {
        assert_eq!(gallery_url(&TagFilter::All, "", None), "/photography");
        assert_eq!(gallery_url(&TagFilter::All, "  ", None), "/photography");
        let night = TagFilter::Tag("Night Sky".into());
        assert_eq!(gallery_url(&night, "", Some("a")), "/photography?tag=Night%20Sky&photo=a");
        assert_eq!(
            gallery_url(&night, "old town", Some("a")),
            "/photography?tag=Night%20Sky&q=old%20town&photo=a"
        );
    }

    #[test]
    fn renders_masonry_items_for_filter() {
        let photos = photos();
        let filter = TagFilter::Tag("Landscape".into());
        let filtered = filter_photos(&photos, &filter);
        let page = render_gallery(&site(), &filtered, &filter_labels(&photos), &filter, "", None);
        let doc = Html::parse_fragment(&page.body);
        let items = Selector::parse(".masonry .masonry-item").unwrap();
        assert_eq!(doc.select(&items).count(), 2);
        assert!(!page.body.contains("class=\"lightbox\""));
        assert_eq!(href(&page.body, ".tag-filter a.active"), "/photography?tag=Landscape");
    }

    #[test]
    fn lightbox_links_wrap_around() {
        let photos = photos();
        let filtered = filter_photos(&photos, &TagFilter::All);
        // newest first: diner, cliff, lake
        let last = Lightbox::open_on(&filtered, "lake").unwrap();
        let page = render_gallery(&site(), &filtered, &[], &TagFilter::All, "", Some(last));
        assert_eq!(href(&page.body, "[data-key-action=next]"), "/photography?photo=diner");
        assert_eq!(href(&page.body, "[data-key-action=prev]"), "/photography?photo=cliff");
        assert_eq!(href(&page.body, "[data-key-action=close]"), "/photography");
        assert!(page.body.contains("f/8 • 1/125s • ISO 200 • 24mm"));
        assert!(page.body.contains("3 / 3"));
    }

    #[test]
    fn searched_view_keeps_query_in_every_link() {
        let photos = photos();
        let filtered = filter_photos(&photos, &TagFilter::All);
        let open = Lightbox::open_on(&filtered, "cliff").unwrap();
        let labels = filter_labels(&photos);
        let page = render_gallery(&site(), &filtered, &labels, &TagFilter::All, "coast", Some(open));
        assert_eq!(href(&page.body, "[data-key-action=next]"), "/photography?q=coast&photo=lake");
        assert_eq!(href(&page.body, "[data-key-action=close]"), "/photography?q=coast");
        assert_eq!(href(&page.body, ".masonry-item"), "/photography?q=coast&photo=diner");
        assert_eq!(href(&page.body, ".tag-filter a.active"), "/photography?q=coast");
    }

    #[test]
    fn search_form_keeps_the_active_tag() {
        let filter = TagFilter::Tag("Night".into());
        let page = render_gallery(&site(), &[], &[], &filter, "diner", None);
        let doc = Html::parse_fragment(&page.body);
        let tag = Selector::parse("form.search input[name=tag]").unwrap();
        let q = Selector::parse("form.search input[name=q]").unwrap();
        assert_eq!(doc.select(&tag).next().and_then(|el| el.value().attr("value")), Some("Night"));
        assert_eq!(doc.select(&q).next().and_then(|el| el.value().attr("value")), Some("diner"));
    }

    #[test]
    fn keyboard_script_lists_bindings() {
        let script = keyboard_script();
        assert!(script.contains("\"Escape\":\"close\""));
        assert!(script.contains("\"ArrowLeft\":\"prev\""));
        assert!(script.contains("\"ArrowRight\":\"next\""));
    }

    #[test]
    fn empty_category_message() {
        let page = render_gallery(&site(), &[], &[], &TagFilter::Tag("Macro".into()), "", None);
        assert!(page.body.contains("No photos found in this category."));
    }
}
