// Utility functions

/// Resolves a possibly-relative href against the site base URL.
pub fn resolve_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if href.starts_with('/') {
        format!("{}{}", base_url.trim_end_matches('/'), href)
    } else {
        format!("{}/{}", base_url.trim_end_matches('/'), href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_href_is_resolved_against_base() {
        assert_eq!(
            resolve_url("https://www.investing.com", "/news/some-article"),
            "https://www.investing.com/news/some-article"
        );
        assert_eq!(
            resolve_url("https://www.investing.com/", "/news/x"),
            "https://www.investing.com/news/x"
        );
    }

    #[test]
    fn absolute_href_is_untouched() {
        assert_eq!(
            resolve_url("https://www.investing.com", "https://elsewhere.com/a"),
            "https://elsewhere.com/a"
        );
    }
}
