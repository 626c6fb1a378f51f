//! HTML output: render the collection into a standalone news page.
//!
//! Titles, links, dates, and summaries are escaped on insertion. The
//! `content` field is inserted as-is: it already passed the sanitizer and
//! re-escaping it would double-encode entities.

use crate::feed::NormalizedEntry;
use crate::output::OutputError;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::path::{Path, PathBuf};

const PAGE_TITLE: &str = "Latest News";

/// Render the collection and write it to `<out_dir>/index.html`.
pub fn write_index_html(
    entries: &[NormalizedEntry],
    out_dir: &Path,
) -> Result<PathBuf, OutputError> {
    let path = out_dir.join("index.html");
    std::fs::write(&path, render_page(entries))?;
    Ok(path)
}

/// Build the full page markup.
pub fn render_page(entries: &[NormalizedEntry]) -> String {
    let mut page = String::with_capacity(1024 + entries.len() * 1024);

    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    page.push_str("<meta charset=\"utf-8\">\n");
    page.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    page.push_str(&format!("<title>{}</title>\n", encode_text(PAGE_TITLE)));
    page.push_str("<link rel=\"stylesheet\" href=\"assets/css/style.css\">\n");
    page.push_str("</head>\n<body>\n");
    page.push_str(&format!("<header><h1>{}</h1></header>\n", encode_text(PAGE_TITLE)));
    page.push_str("<main class=\"news-grid\">\n");

    if entries.is_empty() {
        page.push_str("<p class=\"empty\">No news available right now.</p>\n");
    }
    for entry in entries {
        render_card(entry, &mut page);
    }

    page.push_str("</main>\n");
    page.push_str("<script src=\"assets/js/main.js\"></script>\n");
    page.push_str("</body>\n</html>\n");
    page
}

fn render_card(entry: &NormalizedEntry, page: &mut String) {
    page.push_str(&format!(
        "<article class=\"news-card\" data-id=\"{}\">\n",
        encode_double_quoted_attribute(&entry.id)
    ));
    page.push_str(&format!(
        "  <img class=\"news-image\" src=\"{}\" alt=\"\">\n",
        encode_double_quoted_attribute(&entry.image)
    ));
    page.push_str(&format!(
        "  <h2><a href=\"{}\">{}</a></h2>\n",
        encode_double_quoted_attribute(&entry.link),
        encode_text(&entry.title)
    ));
    if let Some(published) = entry.published.as_deref() {
        page.push_str(&format!(
            "  <time datetime=\"{}\">{}</time>\n",
            encode_double_quoted_attribute(published),
            encode_text(published)
        ));
    }
    page.push_str(&format!(
        "  <p class=\"summary\">{}</p>\n",
        encode_text(&entry.summary)
    ));
    // Sanitized upstream; raw insertion is intentional.
    page.push_str(&format!(
        "  <div class=\"content\"{}>{}</div>\n",
        if entry.has_full_content {
            " data-full-content=\"true\""
        } else {
            ""
        },
        entry.content
    ));
    page.push_str("</article>\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, published: Option<&str>) -> NormalizedEntry {
        NormalizedEntry {
            id: "abc".to_string(),
            title: title.to_string(),
            link: "https://example.com/story".to_string(),
            image: "assets/img/fallback.jpg".to_string(),
            summary: "A summary".to_string(),
            content: "<p>Body</p>".to_string(),
            published: published.map(String::from),
            has_full_content: true,
        }
    }

    #[test]
    fn page_contains_card_fields() {
        let page = render_page(&[entry("Hello", Some("2024-01-01T00:00:00"))]);
        assert!(page.contains(r#"data-id="abc""#));
        assert!(page.contains(r#"src="assets/img/fallback.jpg""#));
        assert!(page.contains(r#"<a href="https://example.com/story">Hello</a>"#));
        assert!(page.contains(r#"<time datetime="2024-01-01T00:00:00">"#));
        assert!(page.contains("<p>Body</p>"));
    }

    #[test]
    fn title_markup_is_escaped() {
        let page = render_page(&[entry("<script>alert(1)</script>", None)]);
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn undated_entry_has_no_time_element() {
        let page = render_page(&[entry("Hello", None)]);
        assert!(!page.contains("<time"));
    }

    #[test]
    fn empty_collection_renders_placeholder() {
        let page = render_page(&[]);
        assert!(page.contains("No news available"));
    }
}
