use regex::{Regex, RegexBuilder};
use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

/// An anchor whose text matched the source pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: Url,
    pub text: String,
}

/// Case-insensitive matcher for link text. Patterns that are not valid
/// regular expressions are matched literally.
fn text_matcher(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .unwrap_or_else(|e| {
            warn!("Invalid link pattern {:?}, matching literally: {}", pattern, e);
            RegexBuilder::new(&regex::escape(pattern))
                .case_insensitive(true)
                .build()
                .expect("escaped pattern is a valid regex")
        })
}

/// Resolve an href against the page URL, keeping only fetchable http(s)
/// resources
fn resolve(base: &Url, href: &str) -> Option<Url> {
    let mut url = base.join(href).ok()?;
    match url.scheme() {
        "http" | "https" => {
            url.set_fragment(None);
            Some(url)
        }
        _ => None,
    }
}

/// Anchors in `html` whose visible text matches `pattern`, with absolute
/// URLs. The page is parsed eagerly; the returned iterator is consumed once.
pub fn extract_links(html: &str, base_url: &str, pattern: &str) -> impl Iterator<Item = Link> {
    let mut links = Vec::new();

    let base = match Url::parse(base_url) {
        Ok(url) => url,
        Err(e) => {
            warn!("Invalid base URL {}: {}", base_url, e);
            return links.into_iter();
        }
    };

    let matcher = text_matcher(pattern);
    let anchors = Selector::parse("a[href]").expect("valid anchor selector");
    let document = Html::parse_document(html);

    for element in document.select(&anchors) {
        let href = element.value().attr("href").unwrap_or("").trim();
        if href.is_empty() {
            continue;
        }

        let text = element.text().collect::<String>();
        let text = text.trim();
        if text.is_empty() || !matcher.is_match(text) {
            continue;
        }

        match resolve(&base, href) {
            Some(url) => links.push(Link {
                url,
                text: text.to_string(),
            }),
            None => debug!("Skipping unresolvable link {:?} on {}", href, base_url),
        }
    }

    links.into_iter()
}
