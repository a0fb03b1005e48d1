//! Extract portal structure from raw HTML.
//!
//! All the navigation logic works on markup strings with the `scraper`
//! crate for CSS selector-based parsing. Per-element mismatches (an
//! anchor without a course-code span, a form without the expected input)
//! are handled by skipping the element, never by raising.

use regex::Regex;
use scraper::{Html, Selector};

/// A course anchor found on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseLink {
    /// Course code, e.g. `SOEN-363`.
    pub code: String,
    /// The anchor's href, as found in the document.
    pub href: String,
}

/// Pull the `SAMLResponse` assertion out of an auto-submit login form.
///
/// Returns `None` when the input is absent or empty — the caller treats
/// that as a failed handshake, not as data to forward.
pub fn saml_response(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let sel = Selector::parse(r#"input[name="SAMLResponse"]"#).unwrap();
    document
        .select(&sel)
        .find_map(|input| input.value().attr("value"))
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

/// Extract course links from dashboard markup.
///
/// An anchor qualifies when its href has the course view shape
/// (`view.php?id=<number>`) and some descendant `span` contains a course
/// code (four word characters, a hyphen, three digits). The first
/// matching span wins; anchors without one are non-course dashboard links
/// and are dropped. Document order, duplicates preserved.
pub fn course_links(html: &str) -> Vec<CourseLink> {
    let view_re = Regex::new(r"view\.php\?id=\d+").expect("course view regex is valid");
    let code_re = Regex::new(r"\w{4}-\d{3}").expect("course code regex is valid");

    let document = Html::parse_document(html);
    let anchor_sel = Selector::parse("a[href]").unwrap();
    let span_sel = Selector::parse("span").unwrap();

    let mut links = Vec::new();
    for anchor in document.select(&anchor_sel) {
        let href = anchor.value().attr("href").unwrap_or("");
        if !view_re.is_match(href) {
            continue;
        }
        let code = anchor.select(&span_sel).find_map(|span| {
            let text = span.text().collect::<String>();
            code_re.find(&text).map(|m| m.as_str().to_string())
        });
        if let Some(code) = code {
            links.push(CourseLink {
                code,
                href: href.to_string(),
            });
        }
    }
    links
}

/// Extract resource hrefs from course page markup.
///
/// Every anchor whose href has the module resource shape
/// (`mod/resource/view.php?id=<number>`) is returned, in document order,
/// without deduplication.
pub fn resource_links(html: &str) -> Vec<String> {
    let resource_re =
        Regex::new(r"mod/resource/view\.php\?id=\d+").expect("resource view regex is valid");

    let document = Html::parse_document(html);
    let anchor_sel = Selector::parse("a[href]").unwrap();

    document
        .select(&anchor_sel)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| resource_re.is_match(href))
        .map(|href| href.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saml_response_extracted() {
        let html = r#"
        <html><body onload="document.forms[0].submit()">
        <form method="POST" action="https://portal/acs">
            <input type="hidden" name="SAMLResponse" value="PHNhbWxwOlJlc3BvbnNlPg==" />
            <input type="hidden" name="RelayState" value="https://portal/" />
        </form>
        </body></html>
        "#;

        assert_eq!(
            saml_response(html).as_deref(),
            Some("PHNhbWxwOlJlc3BvbnNlPg==")
        );
    }

    #[test]
    fn test_saml_response_missing_input() {
        let html = r#"
        <html><body>
        <form><input type="hidden" name="RelayState" value="x" /></form>
        </body></html>
        "#;

        assert_eq!(saml_response(html), None);
    }

    #[test]
    fn test_saml_response_empty_value_rejected() {
        let html = r#"<input name="SAMLResponse" value="" />"#;
        assert_eq!(saml_response(html), None);
    }

    #[test]
    fn test_course_links_basic_scenario() {
        // One qualifying anchor, one without a course code.
        let html = r#"
        <html><body>
        <a href="http://x/view.php?id=5">My course <span>SOEN-363</span> (Fall)</a>
        <a href="http://x/view.php?id=6">no course code</a>
        </body></html>
        "#;

        let links = course_links(html);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].code, "SOEN-363");
        assert_eq!(links[0].href, "http://x/view.php?id=5");
    }

    #[test]
    fn test_course_links_first_span_wins() {
        let html = r#"
        <a href="http://x/course/view.php?id=9">
            <span>COMP-248</span>
            <span>SOEN-363</span>
        </a>
        "#;

        let links = course_links(html);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].code, "COMP-248");
    }

    #[test]
    fn test_course_links_code_inside_nested_span() {
        let html = r#"
        <a href="http://x/course/view.php?id=12">
            <span class="title"><span>ENGR-201</span> Professional Practice</span>
        </a>
        "#;

        let links = course_links(html);
        assert_eq!(links[0].code, "ENGR-201");
    }

    #[test]
    fn test_course_links_ignores_non_view_anchors() {
        let html = r#"
        <a href="http://x/calendar.php?id=1"><span>SOEN-363</span></a>
        <a href="http://x/grade/report.php"><span>COMP-248</span></a>
        "#;

        assert!(course_links(html).is_empty());
    }

    #[test]
    fn test_course_links_keep_document_order_and_duplicates() {
        let html = r#"
        <a href="http://x/course/view.php?id=1"><span>AAAA-111</span></a>
        <a href="http://x/course/view.php?id=2"><span>BBBB-222</span></a>
        <a href="http://x/course/view.php?id=1"><span>AAAA-111</span></a>
        "#;

        let links = course_links(html);
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].code, "AAAA-111");
        assert_eq!(links[1].code, "BBBB-222");
        assert_eq!(links[2].href, "http://x/course/view.php?id=1");
    }

    #[test]
    fn test_course_code_embedded_in_longer_text() {
        let html = r#"
        <a href="http://x/course/view.php?id=3">
            <span>Winter 2024 SOEN-363 Data Systems</span>
        </a>
        "#;

        let links = course_links(html);
        assert_eq!(links[0].code, "SOEN-363");
    }

    #[test]
    fn test_resource_links_shape_and_order() {
        let html = r#"
        <html><body>
        <a href="http://x/mod/resource/view.php?id=101">Slides week 1</a>
        <a href="http://x/mod/forum/view.php?id=55">Forum</a>
        <a href="http://x/mod/resource/view.php?id=102">Slides week 2</a>
        <a href="http://x/mod/resource/view.php?id=101">Slides week 1 again</a>
        </body></html>
        "#;

        let links = resource_links(html);
        assert_eq!(
            links,
            vec![
                "http://x/mod/resource/view.php?id=101",
                "http://x/mod/resource/view.php?id=102",
                "http://x/mod/resource/view.php?id=101",
            ]
        );
    }

    #[test]
    fn test_resource_links_empty_page() {
        assert!(resource_links("<html><body>nothing here</body></html>").is_empty());
    }
}
