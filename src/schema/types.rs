//! Schema type definitions
//!
//! A `Schema` is pure configuration. It is never mutated by validation; the
//! column-indexed view a run needs lives in `ResolvedSchema`.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A single field value. `None` is nil.
pub type Value = Option<String>;

/// An ordered sequence of field values, one per column.
pub type Row = Vec<Value>;

/// Returns true for nil and empty-string values.
pub fn is_blank(value: &Value) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

/// Function applied to header cells before any header check runs.
#[derive(Clone, Deserialize)]
#[serde(try_from = "String")]
pub enum HeaderTransform {
    /// `Name` -> `name`
    Lowercase,
    /// `name` -> `NAME`
    Uppercase,
    /// Strip surrounding whitespace
    Trim,
    /// `First Name` -> `first_name`
    SnakeCase,
    /// Caller-supplied function
    Custom(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl HeaderTransform {
    /// Wraps a closure as a header transform
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        HeaderTransform::Custom(Arc::new(f))
    }

    /// Applies the transform to one header cell
    pub fn apply(&self, header: &str) -> String {
        match self {
            HeaderTransform::Lowercase => header.to_lowercase(),
            HeaderTransform::Uppercase => header.to_uppercase(),
            HeaderTransform::Trim => header.trim().to_string(),
            HeaderTransform::SnakeCase => snake_case(header),
            HeaderTransform::Custom(f) => f(header),
        }
    }

    /// Returns the configuration name for this transform
    pub fn name(&self) -> &'static str {
        match self {
            HeaderTransform::Lowercase => "lowercase",
            HeaderTransform::Uppercase => "uppercase",
            HeaderTransform::Trim => "trim",
            HeaderTransform::SnakeCase => "snake_case",
            HeaderTransform::Custom(_) => "custom",
        }
    }
}

impl TryFrom<String> for HeaderTransform {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        match name.as_str() {
            "lowercase" => Ok(HeaderTransform::Lowercase),
            "uppercase" => Ok(HeaderTransform::Uppercase),
            "trim" => Ok(HeaderTransform::Trim),
            "snake_case" => Ok(HeaderTransform::SnakeCase),
            other => Err(format!("unknown headers_transform '{}'", other)),
        }
    }
}

impl fmt::Debug for HeaderTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HeaderTransform({})", self.name())
    }
}

fn snake_case(header: &str) -> String {
    let mut out = String::with_capacity(header.len());
    let mut pending_sep = false;
    for c in header.trim().chars() {
        if c.is_whitespace() || c == '-' || c == '_' {
            pending_sep = true;
            continue;
        }
        if pending_sep && !out.is_empty() {
            out.push('_');
        }
        pending_sep = false;
        out.extend(c.to_lowercase());
    }
    out
}

/// Rules attached to one named field
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldRequirement {
    /// No two data rows may share a value in this column
    pub unique: bool,
    /// Blank values are rejected
    pub cant_be_nil: bool,
    /// Allowed values. Blank is always allowed in addition to these.
    pub restrict_values: Option<Vec<String>>,
}

impl FieldRequirement {
    /// Marks the field unique
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Marks the field as not nil
    pub fn cant_be_nil(mut self) -> Self {
        self.cant_be_nil = true;
        self
    }

    /// Restricts the field to the given values
    pub fn restrict_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.restrict_values = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// Complete validator configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Schema {
    /// Dataset name used in messages; defaults to the source name
    pub name: Option<String>,
    pub allow_duplicate_headers: bool,
    pub allow_blank_headers: bool,
    pub allow_blank_rows: bool,
    pub allow_different_field_counts: bool,
    /// Headers that must appear after transformation
    pub required_headers: Option<Vec<String>>,
    pub headers_transform: Option<HeaderTransform>,
    /// Requirements keyed by header name
    pub field_requirements: BTreeMap<String, FieldRequirement>,
}

impl Schema {
    /// Create a schema with every option at its default
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn allow_duplicate_headers(mut self, allow: bool) -> Self {
        self.allow_duplicate_headers = allow;
        self
    }

    pub fn allow_blank_headers(mut self, allow: bool) -> Self {
        self.allow_blank_headers = allow;
        self
    }

    pub fn allow_blank_rows(mut self, allow: bool) -> Self {
        self.allow_blank_rows = allow;
        self
    }

    pub fn allow_different_field_counts(mut self, allow: bool) -> Self {
        self.allow_different_field_counts = allow;
        self
    }

    pub fn with_required_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_headers_transform(mut self, transform: HeaderTransform) -> Self {
        self.headers_transform = Some(transform);
        self
    }

    /// Attach a requirement to a field, replacing any earlier one
    pub fn with_field(mut self, field: impl Into<String>, requirement: FieldRequirement) -> Self {
        self.field_requirements.insert(field.into(), requirement);
        self
    }

    /// Applies the configured transform to a header row
    pub fn transform_headers(&self, header_row: &[Value]) -> Row {
        match &self.headers_transform {
            Some(transform) => header_row
                .iter()
                .map(|cell| cell.as_deref().map(|h| transform.apply(h)))
                .collect(),
            None => header_row.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_strict() {
        let schema = Schema::new();
        assert!(!schema.allow_duplicate_headers);
        assert!(!schema.allow_blank_headers);
        assert!(!schema.allow_blank_rows);
        assert!(!schema.allow_different_field_counts);
        assert!(schema.required_headers.is_none());
        assert!(schema.field_requirements.is_empty());
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(&None));
        assert!(is_blank(&Some(String::new())));
        assert!(!is_blank(&Some(" ".into())));
        assert!(!is_blank(&Some("x".into())));
    }

    #[test]
    fn test_builtin_transforms() {
        assert_eq!(HeaderTransform::Lowercase.apply("Name"), "name");
        assert_eq!(HeaderTransform::Uppercase.apply("name"), "NAME");
        assert_eq!(HeaderTransform::Trim.apply("  id "), "id");
        assert_eq!(HeaderTransform::SnakeCase.apply(" First  Name "), "first_name");
        assert_eq!(HeaderTransform::SnakeCase.apply("zip-code"), "zip_code");
    }

    #[test]
    fn test_transform_skips_nil_cells() {
        let schema = Schema::new().with_headers_transform(HeaderTransform::Lowercase);
        let headers = schema.transform_headers(&[Some("ID".into()), None]);
        assert_eq!(headers, vec![Some("id".to_string()), None]);
    }

    #[test]
    fn test_custom_transform() {
        let schema = Schema::new()
            .with_headers_transform(HeaderTransform::custom(|h| format!("x_{}", h)));
        let headers = schema.transform_headers(&[Some("a".into())]);
        assert_eq!(headers, vec![Some("x_a".to_string())]);
    }

    #[test]
    fn test_unknown_transform_name() {
        let result = HeaderTransform::try_from("reverse".to_string());
        assert!(result.unwrap_err().contains("reverse"));
    }

    #[test]
    fn test_field_requirement_builder() {
        let req = FieldRequirement::default()
            .unique()
            .cant_be_nil()
            .restrict_values(["A", "B"]);
        assert!(req.unique);
        assert!(req.cant_be_nil);
        assert_eq!(req.restrict_values, Some(vec!["A".to_string(), "B".to_string()]));
    }
}
