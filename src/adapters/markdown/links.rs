//! Link and image URL resolution.
//!
//! The store rejects relative URLs, so every link in an issue body is
//! either made absolute against the repository's web URL or dropped.

/// What a relative reference points at inside the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    /// A file view (`/blob/HEAD/...`), used for links.
    Page,
    /// The raw file (`/raw/HEAD/...`), used for images.
    Raw,
}

/// Turns hrefs from an issue body into absolute URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkResolver {
    /// Browsable repository URL, e.g. `https://github.com/org/repo`.
    base: Option<String>,
}

impl LinkResolver {
    /// Build a resolver from the repository clone URL, if one is known.
    pub fn new(source_url: Option<&str>) -> Self {
        Self {
            base: source_url.and_then(repository_web_url),
        }
    }

    /// Resolve `href` to an absolute URL, or `None` when it cannot be linked.
    pub fn resolve(&self, href: &str, target: LinkTarget) -> Option<String> {
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') {
            return None;
        }
        if is_http(href) || href.starts_with("mailto:") {
            return Some(href.to_string());
        }
        // Any other scheme (javascript:, ftp:, data:) is not linkable.
        if let Some(colon) = href.find(':') {
            if !href[..colon].contains('/') {
                return None;
            }
        }

        if let Some(rest) = href.strip_prefix("//") {
            return Some(format!("https://{rest}"));
        }

        let base = self.base.as_deref()?;
        if href.starts_with('/') {
            return Some(format!("{}{href}", origin(base)));
        }

        let path = href.trim_start_matches("./");
        let segment = match target {
            LinkTarget::Page => "blob",
            LinkTarget::Raw => "raw",
        };
        Some(format!("{base}/{segment}/HEAD/{path}"))
    }
}

fn is_http(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

/// `https://host/a/b` → `https://host`.
fn origin(url: &str) -> &str {
    let Some(scheme_end) = url.find("://").map(|i| i + 3) else {
        return url;
    };
    let end = url[scheme_end..]
        .find('/')
        .map_or(url.len(), |i| scheme_end + i);
    &url[..end]
}

/// Derive the browsable repository URL from a clone URL.
///
/// Handles HTTPS, `git://` and scp-style SSH (`git@host:org/repo.git`)
/// forms. Returns `None` when no HTTP(S) URL can be derived.
pub fn repository_web_url(clone_url: &str) -> Option<String> {
    let trimmed = clone_url.trim().trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);

    let web = if let Some(rest) = trimmed.strip_prefix("git@") {
        let (host, path) = rest.split_once(':')?;
        format!("https://{host}/{path}")
    } else if let Some(rest) = trimmed.strip_prefix("git://") {
        format!("https://{rest}")
    } else if let Some(rest) = trimmed.strip_prefix("ssh://git@") {
        format!("https://{rest}")
    } else {
        trimmed.to_string()
    };

    is_http(&web).then_some(web)
}
