use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// A submitted field value. Form transport sends one value per checked box under the
/// same name, so a field may carry several values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Scalar(String),
    List(Vec<String>),
}

impl FormValue {
    /// Membership test that works for both shapes.
    pub fn contains(&self, option: &str) -> bool {
        match self {
            FormValue::Scalar(s) => s == option,
            FormValue::List(values) => values.iter().any(|v| v == option),
        }
    }

    /// The value as a single string: the scalar itself, or the first list entry.
    pub fn first(&self) -> Option<&str> {
        match self {
            FormValue::Scalar(s) => Some(s),
            FormValue::List(values) => values.first().map(String::as_str),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            FormValue::Scalar(existing) => {
                let existing = std::mem::take(existing);
                *self = FormValue::List(vec![existing, value]);
            }
            FormValue::List(values) => values.push(value),
        }
    }
}

impl From<&str> for FormValue {
    fn from(s: &str) -> Self {
        FormValue::Scalar(s.to_string())
    }
}

impl From<String> for FormValue {
    fn from(s: String) -> Self {
        FormValue::Scalar(s)
    }
}

impl From<Vec<String>> for FormValue {
    fn from(values: Vec<String>) -> Self {
        FormValue::List(values)
    }
}

/// The parameter bag of one HTTP submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionRequest {
    fields: HashMap<String, FormValue>,
}

impl SubmissionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value. A repeated name turns the field into a list.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        match self.fields.entry(name.into()) {
            Entry::Occupied(mut entry) => entry.get_mut().push(value),
            Entry::Vacant(entry) => {
                entry.insert(FormValue::Scalar(value));
            }
        }
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FormValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.fields.get(name)
    }

    /// Scalar view of a field, `""` when absent.
    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(FormValue::first).unwrap_or("")
    }

    /// Scalar view of a field when it is present and non-empty.
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        Some(self.text(name)).filter(|s| !s.is_empty())
    }

    pub fn is(&self, name: &str, expected: &str) -> bool {
        self.get(name).and_then(FormValue::first) == Some(expected)
    }

    pub fn contains(&self, name: &str, option: &str) -> bool {
        self.get(name).is_some_and(|v| v.contains(option))
    }

    /// Copy fields from `other` that this request does not already have.
    pub fn merge_missing(&mut self, other: SubmissionRequest) {
        for (name, value) in other.fields {
            self.fields.entry(name).or_insert(value);
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for SubmissionRequest
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut request = SubmissionRequest::new();
        for (name, value) in iter {
            request.append(name, value);
        }
        request
    }
}
