use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::store::backend::{Comparison, Direction, Query, RecordBackend, StoreError};

/// The five logical tables, with the parent each child table cascades from
const TABLES: [&str; 5] = [
    "daily_logs",
    "research_projects",
    "research_logs",
    "ideas",
    "idea_updates",
];

/// (child table, foreign-key column, parent table). Used both for the
/// parent-title embed and to mirror the storage schema's ON DELETE CASCADE.
const RELATIONS: [(&str, &str, &str); 2] = [
    ("research_logs", "project_id", "research_projects"),
    ("idea_updates", "idea_id", "ideas"),
];

/// In-memory record backend with the same observable semantics as the
/// remote store: assigned string ids, created_at stamping, pass-through
/// filters, and relation cascade on delete. Single-threaded by design,
/// matching the session model.
pub struct MemoryBackend {
    tables: RefCell<BTreeMap<String, Vec<Value>>>,
    next_id: Cell<u64>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        let mut tables = BTreeMap::new();
        for table in TABLES {
            tables.insert(table.to_string(), Vec::new());
        }
        Self {
            tables: RefCell::new(tables),
            next_id: Cell::new(1),
        }
    }

    fn assign_id(&self) -> String {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        format!("rec-{}", id)
    }
}

fn unknown_table(table: &str) -> StoreError {
    StoreError::UnknownTable(table.to_string())
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a JSON value the way it appears in a filter string
fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn column_text(row: &Value, column: &str) -> String {
    row.get(column).map(text).unwrap_or_default()
}

fn matches(row: &Value, query: &Query) -> bool {
    query.filters.iter().all(|f| {
        let actual = column_text(row, &f.column);
        match f.cmp {
            Comparison::Eq => actual == f.value,
            Comparison::Neq => actual != f.value,
            // Lexicographic compare; correct for the ISO date and
            // timestamp columns Gte is used on
            Comparison::Gte => actual.as_str() >= f.value.as_str(),
        }
    })
}

impl RecordBackend for MemoryBackend {
    fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, StoreError> {
        let tables = self.tables.borrow();
        let rows = tables.get(table).ok_or_else(|| unknown_table(table))?;

        let mut selected: Vec<(usize, Value)> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| matches(row, query))
            .map(|(i, row)| (i, row.clone()))
            .collect();

        if let Some((column, direction)) = &query.order {
            // Ties break on insertion position in the same direction, so
            // "latest" lookups on equal timestamps return the newest row
            selected.sort_by(|(ia, a), (ib, b)| {
                let ord = column_text(a, column)
                    .cmp(&column_text(b, column))
                    .then(ia.cmp(ib));
                match direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                }
            });
        }

        if let Some(limit) = query.limit {
            selected.truncate(limit);
        }

        let mut out: Vec<Value> = selected.into_iter().map(|(_, row)| row).collect();

        if let Some(parent_table) = &query.embed {
            let fk_column = RELATIONS
                .iter()
                .find(|(child, _, parent)| *child == table && *parent == parent_table.as_str())
                .map(|(_, fk, _)| *fk)
                .ok_or_else(|| unknown_table(parent_table))?;
            let parents = tables
                .get(parent_table.as_str())
                .ok_or_else(|| unknown_table(parent_table))?;
            for row in &mut out {
                let fk = column_text(row, fk_column);
                let embedded = parents
                    .iter()
                    .find(|p| column_text(p, "id") == fk)
                    .map(|p| serde_json::json!({ "title": p.get("title").cloned().unwrap_or(Value::Null) }))
                    .unwrap_or(Value::Null);
                if let Value::Object(obj) = row {
                    obj.insert(parent_table.clone(), embedded);
                }
            }
        }

        Ok(out)
    }

    fn insert(&self, table: &str, row: &Value) -> Result<Value, StoreError> {
        let mut stored = match row {
            Value::Object(obj) => obj.clone(),
            _ => Map::new(),
        };
        if !stored.contains_key("id") {
            stored.insert("id".to_string(), Value::String(self.assign_id()));
        }
        if !stored.contains_key("created_at") {
            stored.insert(
                "created_at".to_string(),
                Value::String(crate::utils::utc_timestamp()),
            );
        }
        let stored = Value::Object(stored);
        self.tables
            .borrow_mut()
            .get_mut(table)
            .ok_or_else(|| unknown_table(table))?
            .push(stored.clone());
        Ok(stored)
    }

    fn update(&self, table: &str, id: &str, patch: &Value) -> Result<(), StoreError> {
        let mut tables = self.tables.borrow_mut();
        let rows = tables.get_mut(table).ok_or_else(|| unknown_table(table))?;
        let row = rows
            .iter_mut()
            .find(|row| column_text(row, "id") == id)
            .ok_or_else(|| StoreError::not_found(table, id))?;
        if let (Value::Object(target), Value::Object(fields)) = (row, patch) {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
        }
        Ok(())
    }

    fn upsert(&self, table: &str, key_column: &str, row: &Value) -> Result<(), StoreError> {
        let key = column_text(row, key_column);
        let mut tables = self.tables.borrow_mut();
        let rows = tables.get_mut(table).ok_or_else(|| unknown_table(table))?;
        if let Some(existing) = rows
            .iter_mut()
            .find(|r| column_text(r, key_column) == key)
        {
            if let (Value::Object(target), Value::Object(fields)) = (existing, row) {
                for (k, v) in fields {
                    target.insert(k.clone(), v.clone());
                }
            }
            return Ok(());
        }
        drop(tables);
        self.insert(table, row).map(|_| ())
    }

    fn delete(&self, table: &str, id: &str) -> Result<(), StoreError> {
        let mut tables = self.tables.borrow_mut();
        let rows = tables.get_mut(table).ok_or_else(|| unknown_table(table))?;
        rows.retain(|row| column_text(row, "id") != id);
        // Mirror the schema's ON DELETE CASCADE for child log tables
        for (child, fk_column, parent) in RELATIONS {
            if parent == table {
                if let Some(rows) = tables.get_mut(child) {
                    rows.retain(|row| column_text(row, fk_column) != id);
                }
            }
        }
        Ok(())
    }
}
