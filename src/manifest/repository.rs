//! Repository field normalization.
//!
//! Hosted shorthands are expanded to the `git+https://<host>/<path>.git` form
//! so that the report shows a usable URL regardless of how the package author
//! wrote it.

use serde_json::Value;

/// Known shorthand prefixes and the hosts they expand to.
const HOSTS: &[(&str, &str)] = &[
    ("github", "github.com"),
    ("gitlab", "gitlab.com"),
    ("bitbucket", "bitbucket.org"),
    ("gist", "gist.github.com"),
];

/// Normalize a `repository` manifest value (string or `{ type, url }` object).
pub(crate) fn from_value(value: &Value) -> Option<String> {
    let url = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("url").and_then(Value::as_str)?,
        _ => return None,
    };
    normalize_url(url)
}

/// Expand shorthands and canonicalize hosted HTTPS URLs.
///
/// ```rust
/// use oss_notice::manifest::repository::normalize_url;
///
/// assert_eq!(normalize_url("npm/cli").as_deref(), Some("git+https://github.com/npm/cli.git"));
/// assert_eq!(normalize_url("gitlab:group/proj").as_deref(), Some("git+https://gitlab.com/group/proj.git"));
/// assert_eq!(
///     normalize_url("https://github.com/npm/cli").as_deref(),
///     Some("git+https://github.com/npm/cli.git")
/// );
/// assert_eq!(
///     normalize_url("https://git.example.com/x.git").as_deref(),
///     Some("https://git.example.com/x.git")
/// );
/// ```
#[must_use]
pub fn normalize_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    // `github:user/repo`, `gitlab:group/proj`, ...
    if let Some((prefix, path)) = url.split_once(':')
        && let Some((_, host)) = HOSTS.iter().find(|(name, _)| *name == prefix)
    {
        return Some(hosted(host, path));
    }

    // Bare `user/repo` means GitHub.
    if is_bare_shorthand(url) {
        return Some(hosted("github.com", url));
    }

    // `https://github.com/user/repo` and friends.
    for (_, host) in HOSTS {
        for scheme in ["https://", "git://", "git+https://"] {
            if let Some(path) = url.strip_prefix(&format!("{scheme}{host}/")) {
                return Some(hosted(host, path));
            }
        }
    }

    Some(url.to_string())
}

fn hosted(host: &str, path: &str) -> String {
    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    format!("git+https://{host}/{path}.git")
}

fn is_bare_shorthand(url: &str) -> bool {
    let mut parts = url.split('/');
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(user), Some(repo), None)
            if !user.is_empty()
                && !repo.is_empty()
                && !url.contains(':')
                && !url.contains(char::is_whitespace)
                && !user.starts_with('.')
    )
}
