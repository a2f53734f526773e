//! SQLite school store implementation.
//!
//! Diesel calls are synchronous, so each operation runs on the blocking
//! thread pool with its own pooled connection.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;
use diesel::sql_types::BigInt;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{NewSchoolRow, SchoolRow};
use crate::adapter::outbound::sqlite::database::schema::schools;
use crate::domain::{NewSchool, School, SchoolId};
use crate::error::{Error, Result};
use crate::port::outbound::store::SchoolStore;

#[derive(QueryableByName)]
struct LastInsertId {
    #[diesel(sql_type = BigInt)]
    id: i64,
}

/// SQLite-backed school store.
#[derive(Clone)]
pub struct SqliteSchoolStore {
    pool: DbPool,
}

impl SqliteSchoolStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(school: &NewSchool, created_at: DateTime<Utc>) -> NewSchoolRow {
        NewSchoolRow {
            name: school.name.clone(),
            address: school.address.clone(),
            city: school.city.clone(),
            state: school.state.clone(),
            contact: school.contact.clone(),
            image: school.image.clone(),
            email_id: school.email_id.clone(),
            created_at: created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }

    fn from_row(row: SchoolRow) -> Result<School> {
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|e| Error::Parse(e.to_string()))?
            .with_timezone(&Utc);

        Ok(School {
            id: SchoolId::new(row.id),
            name: row.name,
            address: row.address,
            city: row.city,
            state: row.state,
            contact: row.contact,
            image: row.image,
            email_id: row.email_id,
            created_at,
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
            f(&mut conn)
        })
        .await
        .map_err(|e| Error::Database(e.to_string()))?
    }
}

#[async_trait]
impl SchoolStore for SqliteSchoolStore {
    async fn insert(&self, school: &NewSchool) -> Result<SchoolId> {
        let row = Self::to_row(school, Utc::now());

        let id = self
            .with_conn(move |conn| {
                conn.transaction::<i64, diesel::result::Error, _>(|conn| {
                    diesel::insert_into(schools::table)
                        .values(&row)
                        .execute(conn)?;
                    let last = diesel::sql_query("SELECT last_insert_rowid() AS id")
                        .get_result::<LastInsertId>(conn)?;
                    Ok(last.id)
                })
                .map_err(|e| Error::Database(e.to_string()))
            })
            .await?;

        Ok(SchoolId::new(id))
    }

    async fn list(&self) -> Result<Vec<School>> {
        let rows = self
            .with_conn(|conn| {
                schools::table
                    .select(SchoolRow::as_select())
                    .order((schools::created_at.desc(), schools::id.desc()))
                    .load::<SchoolRow>(conn)
                    .map_err(|e| Error::Database(e.to_string()))
            })
            .await?;

        rows.into_iter().map(Self::from_row).collect()
    }
}
