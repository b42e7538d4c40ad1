use std::sync::LazyLock;

use scraper::{Html, Selector};

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector"));

/// Extract every anchor target from a listing page, resolved against `base`
///
/// Absolute `http(s)` targets are kept as they are; anything else is appended
/// to `base`, so `/resource/blob/1.xml` becomes `{base}/resource/blob/1.xml`.
pub fn extract_links(html: &str, base: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .map(|href| resolve(href.trim(), base))
        .collect()
}

fn resolve(href: &str, base: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    format!("{}{}", base.trim_end_matches('/'), ensure_leading_slash(href))
}

fn ensure_leading_slash(href: &str) -> String {
    if href.starts_with('/') {
        href.to_string()
    } else {
        format!("/{href}")
    }
}
