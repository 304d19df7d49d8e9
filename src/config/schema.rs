use serde::de::DeserializeOwned;
use toml::{Table, Value};

use super::error::SchemaError;
use super::types::Extra;

/// Builds a config record from a parsed TOML table.
///
/// Missing optional fields take their defaults, unknown keys land in the
/// record's `extra` bag. `at` is the dotted path of the table itself and is
/// only used to name fields in errors.
pub trait FromTable: Sized {
    fn from_table_at(table: Table, at: &str) -> Result<Self, SchemaError>;

    fn from_table(table: Table) -> Result<Self, SchemaError> {
        Self::from_table_at(table, "")
    }
}

/// Drains known keys out of a table, leaving the overflow behind.
pub(super) struct Fields {
    table: Table,
    prefix: String,
}

impl Fields {
    pub(super) fn new(table: Table, at: &str) -> Self {
        Self {
            table,
            prefix: at.to_string(),
        }
    }

    pub(super) fn path(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.prefix)
        }
    }

    pub(super) fn optional<T: DeserializeOwned>(
        &mut self,
        key: &str,
    ) -> Result<Option<T>, SchemaError> {
        let Some(value) = self.table.remove(key) else {
            return Ok(None);
        };
        value
            .try_into()
            .map(Some)
            .map_err(|err: toml::de::Error| SchemaError::InvalidField {
                field: self.path(key),
                reason: err.message().to_string(),
            })
    }

    pub(super) fn or<T: DeserializeOwned>(
        &mut self,
        key: &str,
        default: T,
    ) -> Result<T, SchemaError> {
        Ok(self.optional(key)?.unwrap_or(default))
    }

    pub(super) fn or_default<T: DeserializeOwned + Default>(
        &mut self,
        key: &str,
    ) -> Result<T, SchemaError> {
        Ok(self.optional(key)?.unwrap_or_default())
    }

    pub(super) fn required<T: DeserializeOwned>(&mut self, key: &str) -> Result<T, SchemaError> {
        self.optional(key)?
            .ok_or_else(|| SchemaError::MissingField {
                field: self.path(key),
            })
    }

    /// Nested record stored as a sub-table.
    pub(super) fn section<T: FromTable + Default>(&mut self, key: &str) -> Result<T, SchemaError> {
        match self.table.remove(key) {
            None => Ok(T::default()),
            Some(Value::Table(table)) => T::from_table_at(table, &self.path(key)),
            Some(_) => Err(SchemaError::NotATable {
                field: self.path(key),
            }),
        }
    }

    /// Ordered list of records stored as an array of tables.
    pub(super) fn records<T: FromTable>(&mut self, key: &str) -> Result<Vec<T>, SchemaError> {
        let items = match self.table.remove(key) {
            None => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(SchemaError::InvalidField {
                    field: self.path(key),
                    reason: format!("expected an array of tables, found {}", other.type_str()),
                })
            }
        };
        let base = self.path(key);
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let at = format!("{base}[{index}]");
                match item {
                    Value::Table(table) => T::from_table_at(table, &at),
                    _ => Err(SchemaError::NotATable { field: at }),
                }
            })
            .collect()
    }

    pub(super) fn into_extra(self) -> Extra {
        self.table.into_iter().collect()
    }
}
