//! Diesel row models for user persistence.

use super::schema::users;
use diesel::prelude::*;

/// Query result and insert row for user records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Internal user identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Unique normalized email address.
    pub email: String,
}
