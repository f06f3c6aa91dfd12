//! Server-rendered pages. Every function here is pure string building over
//! data already loaded; handlers decide what data to pass.

pub mod blog;
pub mod contact;
pub mod home;
pub mod photography;
pub mod shell;

/// A rendered page body plus what the shell needs to wrap it.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub title: String,
    pub description: String,
    /// Request path, used for the active nav link and the page view.
    pub path: String,
    /// Extra tags for `<head>`.
    pub head: String,
    pub body: String,
}

/// Escapes text for element content and double-quoted attribute values.
pub(crate) fn esc(text: &str) -> String {
    htmlescape::encode_minimal(text)
}

/// `<img>` inside a frame that swaps to a placeholder glyph if loading fails.
pub(crate) fn framed_image(src: &str, alt: &str, class: &str) -> String {
    format!(
        "<div class=\"frame {class}\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\" \
         onerror=\"this.parentNode.classList.add('broken');this.remove();\"></div>",
        esc(src),
        esc(alt),
    )
}

pub(crate) fn tag_list(tags: &[String]) -> String {
    let items: String = tags
        .iter()
        .map(|tag| format!("<li class=\"tag\">{}</li>", esc(tag)))
        .collect();
    format!("<ul class=\"tags\">{items}</ul>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(esc("<b>&"), "&lt;b&gt;&amp;");
        assert!(!esc("\" onload=\"x").contains('"'));
    }

    #[test]
    fn framed_image_has_fallback() {
        let html = framed_image("/a.jpg", "A", "thumb");
        assert!(html.contains("onerror="));
        assert!(html.contains("class=\"frame thumb\""));
    }
}
