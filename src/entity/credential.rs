//! Credential entry entity model for Sea-ORM database interaction.
//!
//! This module defines the database schema representation for the console's
//! key/value credential storage. It maps to the "credential_entry" table.

use sea_orm::entity::prelude::*;

/// Sea-ORM entity model representing one stored key/value pair.
///
/// The console persists exactly two entries per store, the bearer token and
/// the JSON-encoded user, but the table itself is a generic key/value map.
///
/// # Database Schema
///
/// | Column     | Type               | Description                        |
/// |------------|--------------------|------------------------------------|
/// | key        | TEXT (Primary Key) | Storage key                        |
/// | value      | TEXT               | Stored value                       |
/// | updated_at | TIMESTAMPTZ        | Time of the last write to this key |
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "credential_entry")]
pub struct Model {
    /// The storage key, e.g. `squarefeet_auth_token`.
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub key: String,

    /// The stored value. Opaque to the storage layer.
    #[sea_orm(column_type = "Text")]
    pub value: String,

    /// When the entry was last written.
    pub updated_at: DateTimeWithTimeZone,
}

/// This entity doesn't have any relations to other entities.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
