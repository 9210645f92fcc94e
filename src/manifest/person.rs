//! Package author ("person") parsing.

use serde::Serialize;
use serde_json::Value;

/// A person field from a manifest (`author`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Person {
    /// Display name
    pub name: String,
    /// Contact email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Homepage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Person {
    /// Parse the `"Name <email> (url)"` shorthand.
    ///
    /// Email and url are optional and may appear in either order. Returns
    /// `None` when nothing usable is left.
    ///
    /// ```rust
    /// use oss_notice::manifest::Person;
    ///
    /// let p = Person::parse("Barney Rubble <b@rubble.com> (http://barnyrubble.tumblr.com/)").unwrap();
    /// assert_eq!(p.name, "Barney Rubble");
    /// assert_eq!(p.email.as_deref(), Some("b@rubble.com"));
    /// assert_eq!(p.url.as_deref(), Some("http://barnyrubble.tumblr.com/"));
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let name_end = text.find(['<', '(']).unwrap_or(text.len());
        let name = text[..name_end].trim().to_string();
        let email = delimited(text, '<', '>');
        let url = delimited(text, '(', ')');

        Self::non_empty(name, email, url)
    }

    /// Build a person from a manifest value (string shorthand or object).
    pub(crate) fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Object(map) => {
                let field = |key: &str| {
                    map.get(key)
                        .and_then(Value::as_str)
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                };
                Self::non_empty(
                    field("name").unwrap_or_default(),
                    field("email").or_else(|| field("mail")),
                    field("url").or_else(|| field("web")),
                )
            }
            _ => None,
        }
    }

    /// `name <email> (url)`, omitting the parts that are absent.
    #[must_use]
    pub fn description(&self) -> String {
        let mut description = self.name.clone();
        if let Some(email) = &self.email {
            description.push_str(&format!(" <{email}>"));
        }
        if let Some(url) = &self.url {
            description.push_str(&format!(" ({url})"));
        }
        description.trim_start().to_string()
    }

    fn non_empty(name: String, email: Option<String>, url: Option<String>) -> Option<Self> {
        if name.is_empty() && email.is_none() && url.is_none() {
            return None;
        }
        Some(Self {
            name,
            email,
            url,
        })
    }
}

/// Text between the first `open` and the following `close`, trimmed.
fn delimited(text: &str, open: char, close: char) -> Option<String> {
    let start = text.find(open)? + open.len_utf8();
    let len = text[start..].find(close)?;
    let inner = text[start..start + len].trim();
    if inner.is_empty() { None } else { Some(inner.to_string()) }
}
