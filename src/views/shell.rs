use chrono::Datelike;

use super::{esc, Page};
use crate::analytics::gtag_snippet;
use crate::site::{NavLink, SiteConfig};

const HOT_RELOAD_SCRIPT: &str = r#"
<script>
    const socket = new WebSocket("ws://" + window.location.host + "/ws");
    socket.onmessage = (event) => {
        if (event.data === "reload") {
            window.location.reload();
        }
    };
</script>
"#;

/// Everything around the page body that does not change per request.
pub struct Shell<'a> {
    pub layout: &'a str,
    pub site: &'a SiteConfig,
    pub is_development: bool,
    pub measurement_id: Option<&'a str>,
}

impl Shell<'_> {
    pub fn render(&self, page: &Page) -> String {
        let mut head = page.head.clone();
        head.push_str(&self.seo_head());
        if let Some(id) = self.measurement_id {
            head.push_str(&gtag_snippet(id, &page.path));
        }

        let mut out = self
            .layout
            .replace("{{ title }}", &esc(&page.title))
            .replace("{{ description }}", &esc(&page.description))
            .replace("{{ head }}", &head)
            .replace("{{ header }}", &render_header(self.site, &page.path))
            .replace("{{ footer }}", &render_footer(self.site, chrono::Local::now().year()))
            .replace("{{ content }}", &page.body);

        if self.is_development {
            out = out.replace("</body>", &format!("{}</body>", HOT_RELOAD_SCRIPT));
        }
        out
    }

    fn seo_head(&self) -> String {
        let seo = &self.site.seo;
        let mut head = format!(
            "<meta name=\"keywords\" content=\"{}\"><meta name=\"twitter:card\" content=\"{}\">",
            esc(&seo.keywords.join(", ")),
            esc(&seo.twitter_card),
        );
        if let Some(image) = &seo.og_image {
            head.push_str(&format!("<meta property=\"og:image\" content=\"{}\">", esc(image)));
        }
        if let Some(color) = &seo.theme_color {
            head.push_str(&format!("<meta name=\"theme-color\" content=\"{}\">", esc(color)));
        }
        head
    }
}

/// Active when the path matches exactly; fragment links never are.
fn is_active(link: &NavLink, path: &str) -> bool {
    link.url == path
}

fn nav_links(links: &[NavLink], path: &str) -> String {
    links
        .iter()
        .map(|link| {
            let current = if is_active(link, path) {
                " aria-current=\"page\""
            } else {
                ""
            };
            format!(
                "<li><a href=\"{}\"{current}>{}</a></li>",
                esc(&link.url),
                esc(&link.text)
            )
        })
        .collect()
}

pub fn render_logo(site: &SiteConfig) -> String {
    let letters: String = site
        .initials()
        .chars()
        .map(|c| format!("<span class=\"logo-letter\">{}</span>", esc(&c.to_string())))
        .collect();
    format!(
        "<a href=\"/\" class=\"logo\" aria-label=\"{}\">{letters}</a>",
        esc(&site.name)
    )
}

pub fn render_header(site: &SiteConfig, path: &str) -> String {
    format!(
        r#"<header class="site-header">
    <nav class="container">
        {logo}
        <ul class="nav-main">{main}</ul>
        <details class="nav-mobile">
            <summary aria-label="Toggle menu">&#9776;</summary>
            <ul>{mobile}</ul>
        </details>
    </nav>
</header>"#,
        logo = render_logo(site),
        main = nav_links(&site.navigation.main, path),
        mobile = nav_links(&site.navigation.mobile, path),
    )
}

pub fn render_footer(site: &SiteConfig, year: i32) -> String {
    let links = nav_links(&site.footer.links, "");
    let social: String = site
        .social
        .iter()
        .map(|s| {
            format!(
                "<li><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" data-social=\"{}\">{}</a></li>",
                esc(&s.url),
                esc(&s.platform),
                esc(&s.platform)
            )
        })
        .collect();
    let newsletter = &site.footer.newsletter;
    format!(
        r#"<footer class="site-footer">
    <div class="container">
        <section class="newsletter">
            <h3>{nl_title}</h3>
            <p>{nl_desc}</p>
            <a href="/contact">Get in touch</a>
        </section>
        <ul class="footer-links">{links}</ul>
        <ul class="social">{social}</ul>
        <p class="copyright">&copy; {year} {copyright}</p>
    </div>
</footer>"#,
        nl_title = esc(&newsletter.title),
        nl_desc = esc(&newsletter.description),
        copyright = esc(&site.footer.copyright),
    )
}

/// Body for unknown routes.
pub fn render_not_found(template: &str, path: &str, site: &SiteConfig) -> Page {
    Page {
        title: site.page_title("Not Found"),
        description: site.seo.description.clone(),
        path: path.to_string(),
        head: String::new(),
        body: template.replace("{{path}}", &esc(path)),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use scraper::{Html, Selector};

    use super::*;

    pub(crate) fn site() -> SiteConfig {
        toml::from_str(include_str!("../../content/site.toml")).unwrap()
    }

    const LAYOUT: &str = "<html><head><title>{{ title }}</title>{{ head }}</head><body>{{ header }}{{ content }}{{ footer }}</body></html>";

    fn page(path: &str) -> Page {
        Page {
            title: "Blog - Test".into(),
            description: "desc".into(),
            path: path.into(),
            head: String::new(),
            body: "<p id=\"body\">hi</p>".into(),
        }
    }

    #[test]
    fn marks_the_current_route() {
        let html = render_header(&site(), "/blog");
        let doc = Html::parse_fragment(&html);
        let current = Selector::parse(".nav-main a[aria-current=page]").unwrap();
        let links: Vec<_> = doc.select(&current).collect();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].value().attr("href"), Some("/blog"));
    }

    #[test]
    fn mobile_menu_is_a_toggle() {
        let html = render_header(&site(), "/");
        let doc = Html::parse_fragment(&html);
        let items = Selector::parse("details.nav-mobile li").unwrap();
        assert_eq!(doc.select(&items).count(), site().navigation.mobile.len());
    }

    #[test]
    fn logo_uses_initials() {
        assert!(render_logo(&site()).contains(">S</span><span class=\"logo-letter\">D<"));
    }

    #[test]
    fn footer_has_year_and_social() {
        let html = render_footer(&site(), 2031);
        assert!(html.contains("&copy; 2031"));
        assert!(html.contains("data-social=\"GitHub\""));
    }

    #[test]
    fn hot_reload_only_in_development() {
        let site = site();
        let mut shell = Shell {
            layout: LAYOUT,
            site: &site,
            is_development: false,
            measurement_id: None,
        };
        assert!(!shell.render(&page("/")).contains("WebSocket"));
        shell.is_development = true;
        assert!(shell.render(&page("/")).contains("WebSocket"));
    }

    #[test]
    fn gtag_only_with_measurement_id() {
        let site = site();
        let mut shell = Shell {
            layout: LAYOUT,
            site: &site,
            is_development: false,
            measurement_id: None,
        };
        assert!(!shell.render(&page("/blog")).contains("googletagmanager"));
        shell.measurement_id = Some("G-TEST");
        let html = shell.render(&page("/blog"));
        assert!(html.contains("googletagmanager"));
        assert!(html.contains("\"page_path\":\"/blog\""));
    }

    #[test]
    fn not_found_escapes_path() {
        let page = render_not_found("<p>{{path}}</p>", "/<script>", &site());
        assert_eq!(page.body, "<p>/&lt;script&gt;</p>");
    }
}
