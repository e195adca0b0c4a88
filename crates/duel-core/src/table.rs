//! Editable connections table
//!
//! A display copy of the registry. Edits change the copy only; the view is
//! rebuilt from the registry whenever the registry version moves.

use crate::cell::Version;
use crate::error::TableEditError;
use crate::registry::BackendRegistry;
use duel_model::{BackendConfig, Secret};
use serde::Serialize;

/// Column names in display order
pub const CONNECTION_COLUMNS: [&str; 7] = [
    "name", "db_type", "host", "port", "username", "password", "database",
];

/// Identity column, never editable
pub const IDENTITY_COLUMN: &str = "name";

/// One backend as displayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionRow {
    /// Identity column
    pub name: String,
    /// Backend kind display name
    pub db_type: String,
    /// Host, if set
    pub host: Option<String>,
    /// Port, if set
    pub port: Option<u16>,
    /// User, if set
    pub username: Option<String>,
    /// Masked; never the real secret
    pub password: Option<String>,
    /// Database name, if set
    pub database: Option<String>,
}

impl From<&BackendConfig> for ConnectionRow {
    fn from(config: &BackendConfig) -> Self {
        Self {
            name: config.name.clone(),
            db_type: config.kind.to_string(),
            host: config.host.clone(),
            port: config.port,
            username: config.username.clone(),
            password: config.password.as_ref().map(|_| Secret::MASK.to_string()),
            database: config.database.clone(),
        }
    }
}

impl ConnectionRow {
    /// Cell text for a column, empty when unset
    #[must_use]
    pub fn cell(&self, column: &str) -> Option<String> {
        let text = match column {
            "name" => self.name.clone(),
            "db_type" => self.db_type.clone(),
            "host" => self.host.clone().unwrap_or_default(),
            "port" => self.port.map(|p| p.to_string()).unwrap_or_default(),
            "username" => self.username.clone().unwrap_or_default(),
            "password" => self.password.clone().unwrap_or_default(),
            "database" => self.database.clone().unwrap_or_default(),
            _ => return None,
        };
        Some(text)
    }
}

/// Connections table view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionsTable {
    rows: Vec<ConnectionRow>,
    #[serde(skip)]
    registry_version: Version,
}

impl ConnectionsTable {
    /// Build view from the live registry
    #[must_use]
    pub fn from_registry(registry: &BackendRegistry) -> Self {
        Self {
            rows: registry.iter().map(ConnectionRow::from).collect(),
            registry_version: registry.version(),
        }
    }

    /// Rows in registration order
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[ConnectionRow] {
        &self.rows
    }

    /// Registry version this view was built from
    #[inline]
    #[must_use]
    pub fn registry_version(&self) -> Version {
        self.registry_version
    }

    /// Edit one cell of the view
    ///
    /// Empty text clears optional cells.
    ///
    /// # Errors
    /// - [`TableEditError::IdentityColumn`] for `name`
    /// - [`TableEditError::UnknownColumn`] for anything not in [`CONNECTION_COLUMNS`]
    /// - [`TableEditError::RowOutOfRange`] for a bad row index
    /// - [`TableEditError::InvalidPort`] if a `port` edit is not a `u16`
    pub fn edit(&mut self, row: usize, column: &str, value: &str) -> Result<(), TableEditError> {
        if column == IDENTITY_COLUMN {
            return Err(TableEditError::IdentityColumn(column.to_string()));
        }
        if !CONNECTION_COLUMNS.contains(&column) {
            return Err(TableEditError::UnknownColumn(column.to_string()));
        }
        let len = self.rows.len();
        let target = self
            .rows
            .get_mut(row)
            .ok_or(TableEditError::RowOutOfRange { row, len })?;

        let value = value.trim();
        let optional = (!value.is_empty()).then(|| value.to_string());
        match column {
            "db_type" => target.db_type = value.to_string(),
            "host" => target.host = optional,
            "port" => {
                target.port = if value.is_empty() {
                    None
                } else {
                    Some(
                        value
                            .parse::<u16>()
                            .map_err(|_| TableEditError::InvalidPort(value.to_string()))?,
                    )
                };
            }
            "username" => target.username = optional,
            "password" => target.password = optional.map(|_| Secret::MASK.to_string()),
            "database" => target.database = optional,
            _ => return Err(TableEditError::UnknownColumn(column.to_string())),
        }

        tracing::debug!(row, column, "connections table edited");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::default_seed;
    use duel_model::BackendKind;

    fn table() -> ConnectionsTable {
        ConnectionsTable::from_registry(&BackendRegistry::seeded(default_seed()))
    }

    #[test]
    fn rows_mirror_registry() {
        let t = table();
        assert_eq!(t.rows().len(), 2);
        assert_eq!(t.rows()[0].name, "DuckDB");
        assert_eq!(t.rows()[0].db_type, "DuckDB");
        assert_eq!(t.rows()[1].port, Some(5432));
        assert_eq!(t.rows()[1].cell("host").as_deref(), Some("localhost"));
        assert_eq!(t.rows()[0].cell("port").as_deref(), Some(""));
        assert!(t.rows()[0].cell("nope").is_none());
    }

    #[test]
    fn password_is_masked() {
        let mut registry = BackendRegistry::new();
        registry
            .insert(
                BackendConfig::new("Secure", BackendKind::Postgres)
                    .with_credentials("admin", Secret::new("hunter2")),
            )
            .unwrap();
        let t = ConnectionsTable::from_registry(&registry);
        assert_eq!(t.rows()[0].password.as_deref(), Some("**********"));
        assert!(!serde_json::to_string(&t).unwrap().contains("hunter2"));
    }

    #[test]
    fn identity_column_rejected() {
        let mut t = table();
        assert_eq!(
            t.edit(0, "name", "Renamed"),
            Err(TableEditError::IdentityColumn("name".into()))
        );
        assert_eq!(t.rows()[0].name, "DuckDB");
    }

    #[test]
    fn edits_apply_to_view() {
        let mut t = table();
        t.edit(1, "host", "db.internal").unwrap();
        t.edit(1, "port", "6543").unwrap();
        t.edit(1, "database", "").unwrap();

        assert_eq!(t.rows()[1].host.as_deref(), Some("db.internal"));
        assert_eq!(t.rows()[1].port, Some(6543));
        assert!(t.rows()[1].database.is_none());
    }

    #[test]
    fn bad_edits_rejected() {
        let mut t = table();
        assert_eq!(t.edit(0, "port", "http"), Err(TableEditError::InvalidPort("http".into())));
        assert_eq!(t.edit(0, "port", "70000"), Err(TableEditError::InvalidPort("70000".into())));
        assert_eq!(t.edit(9, "host", "x"), Err(TableEditError::RowOutOfRange { row: 9, len: 2 }));
        assert_eq!(t.edit(0, "colour", "x"), Err(TableEditError::UnknownColumn("colour".into())));
    }
}
