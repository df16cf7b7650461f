//! Page reference rewriting.
//!
//! After finalization renamed the stylesheet asset, the entry document
//! still links the old name. One exact-string substitution swaps it for
//! the hashed one.

/// Swap the stylesheet `<link>` reference for the renamed asset. The tag
/// is matched byte-for-byte as the host emits it, and only its first
/// occurrence is substituted; an HTML document without the expected tag
/// comes back unchanged.
pub fn rewrite_stylesheet_link(html: &str, base: &str, old_name: &str, new_name: &str) -> String {
    let old_tag = stylesheet_link_tag(base, old_name);
    let new_tag = stylesheet_link_tag(base, new_name);
    html.replacen(&old_tag, &new_tag, 1)
}

fn stylesheet_link_tag(base: &str, name: &str) -> String {
    format!(r#"<link rel="stylesheet" crossorigin href="{base}{name}">"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrites_link_href() {
        let html = r#"<head><link rel="stylesheet" crossorigin href="/assets/index-OLD.css"></head>"#;
        let rewritten = rewrite_stylesheet_link(
            html,
            "/",
            "assets/index-OLD.css",
            "assets/index-b94d27b9.css",
        );
        assert_eq!(
            rewritten,
            r#"<head><link rel="stylesheet" crossorigin href="/assets/index-b94d27b9.css"></head>"#
        );
    }

    #[test]
    fn test_only_first_occurrence_is_substituted() {
        let html = concat!(
            r#"<link rel="stylesheet" crossorigin href="/assets/index-OLD.css">"#,
            r#"<link rel="stylesheet" crossorigin href="/assets/index-OLD.css">"#,
        );
        let rewritten = rewrite_stylesheet_link(
            html,
            "/",
            "assets/index-OLD.css",
            "assets/index-b94d27b9.css",
        );
        assert_eq!(rewritten.matches("index-b94d27b9.css").count(), 1);
        assert_eq!(rewritten.matches("index-OLD.css").count(), 1);
    }

    #[test]
    fn test_unmatched_document_is_unchanged() {
        let html = "<head></head>";
        assert_eq!(
            rewrite_stylesheet_link(html, "/", "assets/index-OLD.css", "assets/index-NEW.css"),
            html
        );
    }
}
