use crate::dom::LinkList;
use scraper::{ElementRef, Html};

/// Collect the `href` of every `<a>` whose target contains `scheme`.
///
/// Order follows the document; duplicates pass through unchanged.
pub fn extract_links(html: &str, scheme: &str) -> LinkList {
    let document = Html::parse_document(html);

    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "a")
        .filter_map(|el| el.value().attr("href"))
        .filter(|href| href.contains(scheme))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEME: &str = "acestream://";

    #[test]
    fn keeps_only_stream_anchors_in_order() {
        let html = r#"
        <html><body>
            <a href="acestream://AAA">One</a>
            <a href="http://example.com">Elsewhere</a>
            <a href="acestream://BBB">Two</a>
        </body></html>
        "#;

        assert_eq!(
            extract_links(html, SCHEME),
            vec!["acestream://AAA", "acestream://BBB"]
        );
    }

    #[test]
    fn duplicates_pass_through() {
        let html = r#"<a href="acestream://X">a</a><p><a href="acestream://X">b</a></p>"#;
        assert_eq!(extract_links(html, SCHEME), vec!["acestream://X", "acestream://X"]);
    }

    #[test]
    fn nested_anchors_follow_document_order() {
        let html = r#"
        <table>
            <tr><td><a href="acestream://1">1</a></td></tr>
            <tr><td><div><a href="acestream://2">2</a></div></td></tr>
        </table>
        <a href="acestream://3">3</a>
        "#;
        assert_eq!(
            extract_links(html, SCHEME),
            vec!["acestream://1", "acestream://2", "acestream://3"]
        );
    }

    #[test]
    fn substring_match_not_prefix() {
        let html = r#"<a href="https://proxy.example/?u=acestream://C">wrapped</a>"#;
        assert_eq!(
            extract_links(html, SCHEME),
            vec!["https://proxy.example/?u=acestream://C"]
        );
    }

    #[test]
    fn ignores_anchors_without_href_and_other_tags() {
        let html = r#"
            <a name="top">anchor</a>
            <link href="acestream://not-an-anchor">
            <img src="acestream://nope">
        "#;
        assert!(extract_links(html, SCHEME).is_empty());
    }

    #[test]
    fn page_without_matches_is_empty() {
        assert!(extract_links("<html><body><p>Nothing here</p></body></html>", SCHEME).is_empty());
    }
}
