// src/extract/html.rs
// =============================================================================
// Pulls link targets and resource URLs out of HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (built on html5ever)
// - Supports CSS selectors for finding elements
//
// Values are returned exactly as written in the markup. No resolution or
// filtering of hyperlinks happens here: the scheduler resolves them when
// they are dequeued, and the link rewriter needs the original text.
// =============================================================================

use scraper::{Html, Selector};

// Everything the crawler needs from one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    /// `href` of every <a> element, in document order
    pub hyperlinks: Vec<String>,
    /// `src` of every embedded element (img, script, ...) except iframes
    pub resources: Vec<String>,
}

// Parses the markup once and collects both lists
pub fn extract(markup: &str) -> Extracted {
    let document = Html::parse_document(markup);

    let hyperlinks = document
        .select(&selector("a[href]"))
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect::<Vec<_>>();

    let resources = document
        .select(&selector("[src]"))
        .filter(|element| element.value().name() != "iframe")
        .filter_map(|element| element.value().attr("src"))
        .filter(|src| is_downloadable_src(src))
        .map(str::to_string)
        .collect::<Vec<_>>();

    ::log::debug!(
        "Markup has {} hyperlink(s) and {} resource(s)",
        hyperlinks.len(),
        resources.len()
    );

    Extracted {
        hyperlinks,
        resources,
    }
}

// Empty and protocol-relative (//cdn...) sources are never downloaded
fn is_downloadable_src(src: &str) -> bool {
    !src.is_empty() && !src.starts_with("//")
}

// Our selectors are string constants, so a parse failure is a programmer
// error rather than something a page can trigger
fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("hard-coded CSS selector must parse")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hyperlinks_are_kept_verbatim() {
        let html = r#"
            <a href="/about">About</a>
            <a href="https://other.test/x">Other</a>
            <a href="mailto:me@site.test">Mail</a>
            <a>No target</a>
        "#;
        let extracted = extract(html);
        assert_eq!(
            extracted.hyperlinks,
            vec!["/about", "https://other.test/x", "mailto:me@site.test"]
        );
    }

    #[test]
    fn test_resources_skip_iframes_empty_and_protocol_relative() {
        let html = r#"
            <img src="img.png">
            <script src="/js/app.js"></script>
            <iframe src="embed.html"></iframe>
            <img src="">
            <img src="//cdn.test/lib.js">
            <img src="https://cdn.test/photo.jpg?size=2">
        "#;
        let extracted = extract(html);
        assert_eq!(
            extracted.resources,
            vec!["img.png", "/js/app.js", "https://cdn.test/photo.jpg?size=2"]
        );
    }

    #[test]
    fn test_empty_markup() {
        assert_eq!(extract(""), Extracted::default());
    }
}
