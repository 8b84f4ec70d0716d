//! Submission body decoding.
//!
//! Forms post either `application/x-www-form-urlencoded` or JSON. Both are
//! decoded into the same ordered field list.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::SubmitError;

/// Decoded form fields in the order the client sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    fields: Vec<(String, String)>,
    /// Field name to its position in `fields`
    index: HashMap<String, usize>,
}

impl Submission {
    /// Decode a request body according to its content type.
    pub fn parse(content_type: Option<&str>, body: &[u8]) -> Result<Self, SubmitError> {
        if is_json(content_type) {
            Self::from_json(body)
        } else {
            Ok(Self::from_urlencoded(body))
        }
    }

    /// Decode URL-encoded form data. This never fails; malformed escapes are
    /// decoded lossily.
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let mut submission = Submission::default();
        for (name, value) in url::form_urlencoded::parse(body) {
            submission.insert(name.into_owned(), value.into_owned());
        }
        submission
    }

    /// Decode a flat JSON object.
    ///
    /// Numbers and booleans are kept as their text form and `null` becomes an
    /// empty value. Nested values are rejected.
    pub fn from_json(body: &[u8]) -> Result<Self, SubmitError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| SubmitError::Parse(format!("invalid JSON body: {e}")))?;

        let Value::Object(map) = value else {
            return Err(SubmitError::Parse("JSON body must be an object".to_string()));
        };

        let mut submission = Submission::default();
        for (name, value) in map {
            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => String::new(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(SubmitError::Parse(format!("field `{name}` is not a scalar")));
                }
            };
            submission.insert(name, text);
        }
        Ok(submission)
    }

    /// Set a field. A repeated name keeps its first position and takes the
    /// latest value.
    pub fn insert(&mut self, name: String, value: String) {
        match self.index.get(&name) {
            Some(&pos) => self.fields[pos].1 = value,
            None => {
                self.index.insert(name.clone(), self.fields.len());
                self.fields.push((name, value));
            }
        }
    }

    /// Raw value of a field, empty or not.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.index.get(name).map(|&pos| self.fields[pos].1.as_str())
    }

    /// Value of a field if present and not blank.
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.trim().is_empty())
    }

    /// First non-empty value among several alternative field names.
    pub fn first_non_empty(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|name| self.non_empty(name))
    }

    /// All fields in submission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Submission {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut submission = Submission::default();
        for (name, value) in iter {
            submission.insert(name.into(), value.into());
        }
        submission
    }
}

/// Whether a content type names JSON (`application/json`, `*/*+json`).
fn is_json(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return false;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || mime.ends_with("+json")
}
