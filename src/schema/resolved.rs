//! Column-indexed view of a schema
//!
//! Built once per run from the transformed header row. Per-row checks only
//! ever see column positions.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::errors::{SchemaError, SchemaResult};
use super::types::{is_blank, Row, Schema, Value};

/// Header name <-> column position lookup
#[derive(Debug, Clone)]
pub struct HeaderIndex {
    headers: Row,
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    /// Indexes a transformed header row. On repeated names the last
    /// position wins.
    pub fn new(headers: Row) -> Self {
        let mut positions = HashMap::with_capacity(headers.len());
        for (column, header) in headers.iter().enumerate() {
            if let Some(name) = header {
                positions.insert(name.clone(), column);
            }
        }
        Self { headers, positions }
    }

    /// Looks up the column position for a header name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if no header has that name.
    pub fn position(&self, name: &str) -> SchemaResult<usize> {
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| SchemaError::unknown_column(name))
    }

    /// Returns the header name at a column position
    pub fn name(&self, column: usize) -> &str {
        self.headers
            .get(column)
            .and_then(|h| h.as_deref())
            .unwrap_or("")
    }

    pub fn headers(&self) -> &[Value] {
        &self.headers
    }

    /// Number of header columns
    pub fn width(&self) -> usize {
        self.headers.len()
    }
}

/// Allowed values for one restricted column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedValues {
    values: Vec<Value>,
}

impl AllowedValues {
    /// Builds the allowed list, appending the blank sentinel (`None`).
    ///
    /// Blank values therefore never fail a restrict-values check; pair the
    /// rule with `cant_be_nil` to forbid them.
    pub fn with_sentinel(values: &[String]) -> Self {
        let mut values: Vec<Value> = values.iter().cloned().map(Some).collect();
        values.push(None);
        Self { values }
    }

    pub fn permits(&self, value: &Value) -> bool {
        if is_blank(value) {
            return self.values.contains(&None);
        }
        self.values.contains(value)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// Field requirements keyed by column position
#[derive(Debug, Clone)]
pub struct ResolvedSchema {
    index: HeaderIndex,
    restrict: BTreeMap<usize, AllowedValues>,
    cant_be_nil: BTreeSet<usize>,
    unique: BTreeSet<usize>,
}

impl ResolvedSchema {
    /// Resolves every field requirement against the header index.
    ///
    /// Field names are resolved in name order; the first unknown name
    /// aborts resolution.
    pub fn resolve(schema: &Schema, index: HeaderIndex) -> SchemaResult<Self> {
        let mut restrict = BTreeMap::new();
        let mut cant_be_nil = BTreeSet::new();
        let mut unique = BTreeSet::new();

        for (field, requirement) in &schema.field_requirements {
            let column = index.position(field)?;
            if requirement.cant_be_nil {
                cant_be_nil.insert(column);
            }
            if let Some(values) = &requirement.restrict_values {
                restrict.insert(column, AllowedValues::with_sentinel(values));
            }
            if requirement.unique {
                unique.insert(column);
            }
        }

        Ok(Self {
            index,
            restrict,
            cant_be_nil,
            unique,
        })
    }

    pub fn index(&self) -> &HeaderIndex {
        &self.index
    }

    /// Header name for a column, for error messages
    pub fn header_name(&self, column: usize) -> &str {
        self.index.name(column)
    }

    pub fn restricted_columns(&self) -> impl Iterator<Item = (usize, &AllowedValues)> {
        self.restrict.iter().map(|(c, v)| (*c, v))
    }

    pub fn cant_be_nil_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.cant_be_nil.iter().copied()
    }

    pub fn unique_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.unique.iter().copied()
    }
}
