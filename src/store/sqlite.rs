//! SQLite-backed record store.
//!
//! Tables and columns come from the catalog in [`migrate`]; the adapter
//! itself only shuffles wire rows in and out of prepared statements.

use super::migrate::{self, ColKind, TableSpec};
use super::{Filter, FilterOp, Identity, RecordStore, Row};
use crate::errors::{AppError, AppResult};
use rusqlite::types::ToSqlOutput;
use rusqlite::{Connection, ToSql};
use serde_json::Value;
use std::path::Path;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        migrate::run(&conn)?;
        Ok(Self { conn })
    }

    /// Private in-memory database, used by unit tests.
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        migrate::run(&conn)?;
        Ok(Self { conn })
    }
}

/// JSON value → SQL parameter. Arrays and objects travel as JSON text.
struct Param<'a>(&'a Value);

impl ToSql for Param<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let out = match self.0 {
            Value::Null => ToSqlOutput::Owned(rusqlite::types::Value::Null),
            Value::Bool(b) => ToSqlOutput::Owned(rusqlite::types::Value::Integer(*b as i64)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ToSqlOutput::Owned(rusqlite::types::Value::Integer(i))
                } else {
                    ToSqlOutput::Owned(rusqlite::types::Value::Real(n.as_f64().unwrap_or(0.0)))
                }
            }
            Value::String(s) => ToSqlOutput::Owned(rusqlite::types::Value::Text(s.clone())),
            nested => ToSqlOutput::Owned(rusqlite::types::Value::Text(nested.to_string())),
        };
        Ok(out)
    }
}

fn where_clause(filters: &[Filter]) -> String {
    if filters.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = filters
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let op = match f.op {
                FilterOp::Eq => "=",
                FilterOp::Neq => "!=",
                FilterOp::Lt => "<",
                FilterOp::Gte => ">=",
            };
            format!("{} {} ?{}", f.column, op, i + 1)
        })
        .collect();
    format!(" WHERE {}", parts.join(" AND "))
}

fn filter_params(filters: &[Filter]) -> Vec<Param<'_>> {
    filters.iter().map(|f| Param(&f.value)).collect()
}

fn read_cell(row: &rusqlite::Row<'_>, idx: usize, kind: ColKind) -> AppResult<Value> {
    let value = match kind {
        ColKind::Id => Value::String(row.get::<_, i64>(idx)?.to_string()),
        ColKind::Text => match row.get::<_, Option<String>>(idx)? {
            Some(s) => Value::String(s),
            None => Value::Null,
        },
        ColKind::Bool => Value::Bool(row.get::<_, i64>(idx)? != 0),
        ColKind::Json => {
            let raw: String = row.get(idx)?;
            serde_json::from_str(&raw)?
        }
    };
    Ok(value)
}

fn read_row(spec: &TableSpec, row: &rusqlite::Row<'_>) -> AppResult<Row> {
    let mut out = Row::new();
    for (idx, col) in spec.cols.iter().enumerate() {
        out.insert(col.name.to_string(), read_cell(row, idx, col.kind)?);
    }
    Ok(out)
}

impl SqliteStore {
    fn select_one(&mut self, table: &str, id: i64) -> AppResult<Row> {
        let mut rows = self.select(table, &[Filter::eq("id", id.to_string())])?;
        rows.pop()
            .ok_or_else(|| AppError::Store(format!("inserted row {id} not found in {table}")))
    }
}

impl RecordStore for SqliteStore {
    fn select(&mut self, table: &str, filters: &[Filter]) -> AppResult<Vec<Row>> {
        let spec = migrate::table_spec(table)?;
        let cols: Vec<&str> = spec.cols.iter().map(|c| c.name).collect();
        let sql = format!(
            "SELECT {} FROM {}{} ORDER BY id ASC",
            cols.join(", "),
            spec.name,
            where_clause(filters)
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let params = filter_params(filters);
        let mapped = stmt.query_and_then(
            rusqlite::params_from_iter(params.iter()),
            |row| read_row(spec, row),
        )?;

        let mut out = Vec::new();
        for r in mapped {
            out.push(r?);
        }
        Ok(out)
    }

    fn insert(&mut self, table: &str, rows: Vec<Row>) -> AppResult<Vec<Row>> {
        let spec = migrate::table_spec(table)?;
        let mut stored = Vec::with_capacity(rows.len());

        for row in rows {
            // Id is server-assigned; any client-supplied id is ignored.
            let cols: Vec<&str> = spec
                .cols
                .iter()
                .filter(|c| c.kind != ColKind::Id && row.contains_key(c.name))
                .map(|c| c.name)
                .collect();
            let placeholders: Vec<String> =
                (1..=cols.len()).map(|i| format!("?{i}")).collect();
            let sql = format!(
                "INSERT INTO {} ({}) VALUES ({})",
                spec.name,
                cols.join(", "),
                placeholders.join(", ")
            );

            let params: Vec<Param<'_>> = cols.iter().map(|c| Param(&row[*c])).collect();
            self.conn
                .execute(&sql, rusqlite::params_from_iter(params.iter()))?;

            let id = self.conn.last_insert_rowid();
            stored.push(self.select_one(table, id)?);
        }

        Ok(stored)
    }

    fn update(&mut self, table: &str, patch: Row, filters: &[Filter]) -> AppResult<()> {
        let spec = migrate::table_spec(table)?;
        let cols: Vec<&str> = spec
            .cols
            .iter()
            .filter(|c| c.kind != ColKind::Id && patch.contains_key(c.name))
            .map(|c| c.name)
            .collect();
        if cols.is_empty() {
            return Ok(());
        }

        let sets: Vec<String> = cols
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{} = ?{}", c, i + 1))
            .collect();
        let conds: Vec<String> = filters
            .iter()
            .enumerate()
            .map(|(i, f)| {
                let op = match f.op {
                    FilterOp::Eq => "=",
                    FilterOp::Neq => "!=",
                    FilterOp::Lt => "<",
                    FilterOp::Gte => ">=",
                };
                format!("{} {} ?{}", f.column, op, cols.len() + i + 1)
            })
            .collect();

        let mut sql = format!("UPDATE {} SET {}", spec.name, sets.join(", "));
        if !conds.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conds.join(" AND "));
        }

        let mut params: Vec<Param<'_>> = cols.iter().map(|c| Param(&patch[*c])).collect();
        params.extend(filters.iter().map(|f| Param(&f.value)));
        self.conn
            .execute(&sql, rusqlite::params_from_iter(params.iter()))?;
        Ok(())
    }

    fn delete(&mut self, table: &str, filters: &[Filter]) -> AppResult<()> {
        let spec = migrate::table_spec(table)?;
        let sql = format!("DELETE FROM {}{}", spec.name, where_clause(filters));
        let params = filter_params(filters);
        self.conn
            .execute(&sql, rusqlite::params_from_iter(params.iter()))?;
        Ok(())
    }

    fn verify_credentials(&mut self, email: &str, password: &str) -> AppResult<Identity> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, email FROM admins WHERE email = ?1 AND password = ?2")?;
        let found = stmt
            .query_row([email, password], |row| {
                Ok(Identity {
                    id: row.get::<_, i64>(0)?.to_string(),
                    email: row.get(1)?,
                })
            })
            .map_err(|_| AppError::BadCredentials)?;
        Ok(found)
    }

    fn create_identity(&mut self, email: &str, password: &str) -> AppResult<Identity> {
        self.conn.execute(
            "INSERT INTO admins (email, password) VALUES (?1, ?2)",
            [email, password],
        )?;
        Ok(Identity {
            id: self.conn.last_insert_rowid().to_string(),
            email: email.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(v: Value) -> Row {
        v.as_object().unwrap().clone()
    }

    #[test]
    fn insert_assigns_id_and_returns_stored_row() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let inserted = store
            .insert(
                "employees",
                vec![row(json!({ "name": "Sarah", "role": "Manager", "is_active": true }))],
            )
            .unwrap();

        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0]["id"], json!("1"));
        assert_eq!(inserted[0]["is_active"], json!(true));
    }

    #[test]
    fn edits_round_trip_through_json_column() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let edits = json!([{ "reason": "typo", "admin_name": "Admin" }]);
        store
            .insert(
                "time_logs",
                vec![row(json!({
                    "employee_id": "1",
                    "date": "2024-01-01",
                    "clock_in": "2024-01-01T09:00:00Z",
                    "clock_out": null,
                    "status": "active",
                    "edits": edits
                }))],
            )
            .unwrap();

        let rows = store.select("time_logs", &[]).unwrap();
        assert_eq!(rows[0]["edits"], edits);
        assert_eq!(rows[0]["clock_out"], json!(null));
    }

    #[test]
    fn delete_with_lt_filter_is_strictly_older() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        for date in ["2024-01-01", "2024-02-01", "2024-03-01"] {
            store
                .insert(
                    "time_logs",
                    vec![row(json!({
                        "employee_id": "1",
                        "date": date,
                        "clock_in": "2024-01-01T09:00:00Z",
                        "clock_out": null,
                        "status": "active",
                        "edits": []
                    }))],
                )
                .unwrap();
        }

        store
            .delete("time_logs", &[Filter::lt("date", "2024-02-01")])
            .unwrap();

        let dates: Vec<Value> = store
            .select("time_logs", &[])
            .unwrap()
            .into_iter()
            .map(|mut r| r.remove("date").unwrap())
            .collect();
        assert_eq!(dates, vec![json!("2024-02-01"), json!("2024-03-01")]);
    }

    #[test]
    fn credentials_are_exact_match() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.create_identity("admin@example.com", "hunter2").unwrap();

        assert!(store.verify_credentials("admin@example.com", "hunter2").is_ok());
        assert!(matches!(
            store.verify_credentials("admin@example.com", "wrong"),
            Err(AppError::BadCredentials)
        ));
    }
}
