//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::schools;

/// Database row for a school (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = schools)]
pub struct NewSchoolRow {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub image: Option<String>,
    pub email_id: String,
    pub created_at: String,
}

/// Database row for a school (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = schools)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SchoolRow {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub image: Option<String>,
    pub email_id: String,
    pub created_at: String,
}
