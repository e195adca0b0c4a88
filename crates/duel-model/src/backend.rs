//! Backend configurations
//!
//! A backend is a named target system the dashboard pretends to query.
//! Its [`BackendKind`] selects the simulated latency profile.

use crate::error::ModelError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Closed set of supported backend categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum BackendKind {
    /// In-process analytical engine (the fast kind)
    #[default]
    #[serde(rename = "DuckDB")]
    DuckDb,
    /// PostgreSQL server
    #[serde(rename = "Postgres")]
    Postgres,
    /// MySQL server
    #[serde(rename = "MySQL")]
    MySql,
    /// Embedded SQLite file
    #[serde(rename = "SQLite")]
    Sqlite,
    /// MongoDB document store
    #[serde(rename = "MongoDB")]
    MongoDb,
}

impl BackendKind {
    /// All kinds in declaration order
    pub const ALL: [BackendKind; 5] = [
        BackendKind::DuckDb,
        BackendKind::Postgres,
        BackendKind::MySql,
        BackendKind::Sqlite,
        BackendKind::MongoDb,
    ];

    /// Display name
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            BackendKind::DuckDb => "DuckDB",
            BackendKind::Postgres => "Postgres",
            BackendKind::MySql => "MySQL",
            BackendKind::Sqlite => "SQLite",
            BackendKind::MongoDb => "MongoDB",
        }
    }
}

impl Display for BackendKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        BackendKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ModelError::UnknownKind(s.to_string()))
    }
}

/// Connection password that never renders in clear text
///
/// `Debug`, `Display` and `Serialize` all produce the mask.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Rendered form of any secret
    pub const MASK: &'static str = "**********";

    /// Wrap a clear-text value
    #[inline]
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the clear-text value
    #[inline]
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({})", Self::MASK)
    }
}

impl Display for Secret {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(Self::MASK)
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(Self::MASK)
    }
}

impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Secret)
    }
}

/// Named backend configuration
///
/// # Invariants
/// - `name` is the identity; it is never changed once registered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Friendly, unique name
    pub name: String,
    /// Backend category
    #[serde(alias = "db_type")]
    pub kind: BackendKind,
    /// Hostname or IP address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Port number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Username
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Password
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "secret")]
    pub password: Option<Secret>,
    /// Database name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

impl BackendConfig {
    /// Create config with no connection attributes
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, kind: BackendKind) -> Self {
        Self {
            name: name.into(),
            kind,
            host: None,
            port: None,
            username: None,
            password: None,
            database: None,
        }
    }

    /// With host and port
    #[inline]
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = Some(host.into());
        self.port = Some(port);
        self
    }

    /// With credentials
    #[inline]
    #[must_use]
    pub fn with_credentials(mut self, username: impl Into<String>, password: Secret) -> Self {
        self.username = Some(username.into());
        self.password = Some(password);
        self
    }

    /// With database name
    #[inline]
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }
}
