use pulldown_cmark::{html, Event, Options, Parser};

const WORDS_PER_MINUTE: usize = 200;

fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    options
}

/// Renders a post body. Raw HTML blocks pass through untouched, so older
/// posts written as HTML fragments render as-is.
pub fn render_markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, markdown_options());
    let mut html_out = String::new();
    html::push_html(&mut html_out, parser);
    html_out
}

/// Counts words in the readable text of a body, ignoring markup.
pub fn word_count(markdown: &str) -> usize {
    Parser::new_ext(markdown, markdown_options())
        .map(|event| match event {
            Event::Text(text) | Event::Code(text) => text.split_whitespace().count(),
            _ => 0,
        })
        .sum()
}

/// "N min read", never less than one minute.
pub fn estimate_read_time(markdown: &str) -> String {
    let minutes = word_count(markdown).div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{minutes} min read")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_tables_and_strikethrough() {
        let output = render_markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~old~~");
        assert!(output.contains("<table>"));
        assert!(output.contains("<del>old</del>"));
    }

    #[test]
    fn passes_inline_html_through() {
        let output = render_markdown_to_html("<blockquote>\nquoted\n</blockquote>\n");
        assert!(output.contains("<blockquote>"));
    }

    #[test]
    fn word_count_ignores_markup() {
        assert_eq!(word_count("## Two words\n\n**three more words**"), 5);
    }

    #[test]
    fn read_time_rounds_up_and_has_a_floor() {
        assert_eq!(estimate_read_time(""), "1 min read");
        let body = "word ".repeat(201);
        assert_eq!(estimate_read_time(&body), "2 min read");
    }

    #[test]
    fn renders_shipped_post() {
        let post = include_str!("../content/posts/photography-hacks.md");
        let output = render_markdown_to_html(post);
        assert!(output.contains("<h3>Hack #5: The Power of Negative Space</h3>"));
    }
}
