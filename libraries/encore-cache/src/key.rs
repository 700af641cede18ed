//! Composite cache keys
//!
//! Format: `{category}:{id}` or `{category}:{id}:{fingerprint}` when query
//! parameters are present. The fingerprint is canonical JSON (object keys
//! sorted at every level), so parameter order never produces distinct keys.
//!
//! `%` and `:` inside the category and id are percent-escaped (`%25`, `%3A`),
//! so the first two separators always delimit those segments. An id containing
//! `:` can't collide with a fingerprinted key, and category `feed:archive` is
//! not inside the `feed` prefix.

use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// Separator between key segments
const SEPARATOR: char = ':';

/// `{category, id, params fingerprint}` key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    category: String,
    id: String,
    fingerprint: Option<String>,
}

impl CacheKey {
    /// Build a key. `null` and empty-object params are the same as no params.
    pub fn new(category: &str, id: &str, params: Option<&Value>) -> Self {
        Self {
            category: category.to_string(),
            id: id.to_string(),
            fingerprint: params.and_then(fingerprint),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    /// Prefix shared by every key of `category`
    ///
    /// Includes the separator so `feed` does not match `feedback:*`.
    pub fn category_prefix(category: &str) -> String {
        format!("{}{}", escape(category), SEPARATOR)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            escape(&self.category),
            SEPARATOR,
            escape(&self.id)
        )?;
        if let Some(fingerprint) = &self.fingerprint {
            write!(f, "{}{}", SEPARATOR, fingerprint)?;
        }
        Ok(())
    }
}

fn escape(segment: &str) -> Cow<'_, str> {
    if segment.contains(['%', SEPARATOR]) {
        Cow::Owned(segment.replace('%', "%25").replace(SEPARATOR, "%3A"))
    } else {
        Cow::Borrowed(segment)
    }
}

fn fingerprint(params: &Value) -> Option<String> {
    match params {
        Value::Null => None,
        Value::Object(map) if map.is_empty() => None,
        other => {
            let mut out = String::new();
            write_canonical(other, &mut out);
            Some(out)
        }
    }
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (k, v)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(k.clone()).to_string());
                out.push(':');
                write_canonical(v, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
