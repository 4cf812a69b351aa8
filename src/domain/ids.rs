//! Typed row identifiers for projects, categories, and templates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an invalid identifier.
#[derive(Debug, Clone)]
pub struct ParseIdError(String);

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseIdError {}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database row id.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw database row id.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw: i64 = s.trim().parse().map_err(|_| {
                    ParseIdError(format!("invalid {} id '{}': expected an integer", $label, s))
                })?;
                if raw <= 0 {
                    return Err(ParseIdError(format!(
                        "invalid {} id '{}': ids are positive",
                        $label, s
                    )));
                }
                Ok(Self(raw))
            }
        }

        impl rusqlite::ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
                Ok(self.0.into())
            }
        }

        impl rusqlite::types::FromSql for $name {
            fn column_result(
                value: rusqlite::types::ValueRef<'_>,
            ) -> rusqlite::types::FromSqlResult<Self> {
                i64::column_result(value).map(Self)
            }
        }
    };
}

entity_id!(
    /// Identifier of a row in the `project` table.
    ProjectId,
    "project"
);

entity_id!(
    /// Identifier of a row in the `category` table.
    CategoryId,
    "category"
);

entity_id!(
    /// Identifier of a row in the `table_template` table.
    TemplateId,
    "template"
);
