//! Entity and table models shared by every renderer

use serde_json::Value;

use super::value::{DisplayValue, FieldSpec};
use crate::error::RenderError;

/// One API object's attributes, in caller-chosen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entity {
    fields: Vec<(String, DisplayValue)>,
}

impl Entity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Entity::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<DisplayValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a field, replacing an existing one of the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<DisplayValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&DisplayValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    #[cfg(test)]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DisplayValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build an entity by extracting `fields` from a decoded object.
    ///
    /// Optional fields the source lacks are left out entirely.
    pub fn from_object(source: &Value, fields: &[FieldSpec]) -> Self {
        let mut entity = Entity::new();
        for field in fields {
            if let Some(value) = field.extract(source) {
                entity.insert(field.label.clone(), value);
            }
        }
        entity
    }
}

/// One list entry, positionally aligned to a [`Table`]'s headers.
pub type Row = Vec<DisplayValue>;

/// Header list plus rows of matching arity.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Result<Self, RenderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if headers.is_empty() {
            return Err(RenderError::EmptyHeaders);
        }
        Ok(Self {
            headers,
            rows: Vec::new(),
        })
    }

    /// Append a row. Rows whose length differs from the header count are rejected.
    pub fn push_row(&mut self, row: Row) -> Result<(), RenderError> {
        if row.len() != self.headers.len() {
            return Err(RenderError::RowArity {
                row: self.rows.len(),
                expected: self.headers.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Build one row per object. Absent values become `Null` cells so every
    /// row keeps full arity.
    pub fn from_objects(items: &[Value], fields: &[FieldSpec]) -> Result<Self, RenderError> {
        let mut table = Table::new(fields.iter().map(|f| f.label.clone()))?;
        for item in items {
            let row = fields
                .iter()
                .map(|field| field.extract(item).unwrap_or(DisplayValue::Null))
                .collect();
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_preserves_insertion_order() {
        let entity = Entity::new()
            .with("Name", "prod")
            .with("ID", "ws-1")
            .with("Locked", false);

        let keys: Vec<&str> = entity.keys().collect();
        assert_eq!(keys, vec!["Name", "ID", "Locked"]);
        assert_eq!(entity.len(), 3);
    }

    #[test]
    fn test_entity_insert_replaces_in_place() {
        let mut entity = Entity::new().with("A", 1u64).with("B", 2u64);
        entity.insert("A", 3u64);

        let keys: Vec<&str> = entity.keys().collect();
        assert_eq!(keys, vec!["A", "B"]);
        assert_eq!(entity.get("A"), Some(&DisplayValue::from(3u64)));
    }

    #[test]
    fn test_entity_from_object() {
        let source = json!({
            "id": "ws-1",
            "attributes": { "name": "prod", "token": "secret" }
        });
        let fields = vec![
            FieldSpec::new("ID", "id"),
            FieldSpec::new("Name", "attributes.name"),
            FieldSpec::new("Token", "attributes.token").sensitive(),
            FieldSpec::new("Description", "attributes.description").optional(),
        ];

        let entity = Entity::from_object(&source, &fields);

        let keys: Vec<&str> = entity.keys().collect();
        assert_eq!(keys, vec!["ID", "Name", "Token"]);
        assert_eq!(entity.get("Token"), Some(&DisplayValue::Redacted));
    }

    #[test]
    fn test_table_rejects_wrong_arity() {
        let mut table = Table::new(["ID", "NAME"]).unwrap();
        table
            .push_row(vec![DisplayValue::from("1"), DisplayValue::from("a")])
            .unwrap();

        let err = table.push_row(vec![DisplayValue::from("2")]).unwrap_err();
        assert_eq!(
            err,
            RenderError::RowArity {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(table.rows().len(), 1);
    }

    #[test]
    fn test_table_requires_headers() {
        let headers: Vec<String> = vec![];
        assert_eq!(Table::new(headers).unwrap_err(), RenderError::EmptyHeaders);
    }

    #[test]
    fn test_table_from_objects_fills_missing_with_null() {
        let items = vec![
            json!({"id": "ws-1", "name": "prod"}),
            json!({"id": "ws-2"}),
        ];
        let fields = vec![
            FieldSpec::new("ID", "id"),
            FieldSpec::new("NAME", "name").optional(),
        ];

        let table = Table::from_objects(&items, &fields).unwrap();

        assert_eq!(table.headers(), &["ID".to_string(), "NAME".to_string()]);
        assert_eq!(table.rows()[1], vec![DisplayValue::from("ws-2"), DisplayValue::Null]);
    }
}
