//! # Database Infrastructure
//!
//! Connects to [SurrealDB](https://surrealdb.com) through the `any` engine
//! (`mem://`, `ws://`, `http://`), applies slice migrations and exposes:
//!
//! - [`Store`], the read-only interface the reporting engine is written against;
//! - [`Database::insert`] and [`Database::merge`], the write helpers used by the slices.
//!
//! ```rust
//! use campus_database::{Database, DatabaseError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), DatabaseError> {
//!     let db = Database::builder().url("mem://").session("campus", "core").init().await?;
//!     db.health().await?;
//!     Ok(())
//! }
//! ```

mod error;
mod migrations;
mod store;

pub use error::{DatabaseError, DatabaseErrorExt};
pub use migrations::{Migration, MigrationRecord, MigrationReport};
pub use store::{Condition, Filter, Store};

use migrations::MigrationRunner;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Write;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;
use surrealdb::engine::any::{Any, connect};
use surrealdb::opt::auth::Root;
use surrealdb::{Response, Surreal};
use tracing::{info, instrument, warn};

const HEALTH_ATTEMPTS: u32 = 3;

#[derive(Debug)]
pub struct DatabaseInner {
    instance: Surreal<Any>,
    ns: String,
    db: String,
    report: MigrationReport,
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        info!(ns = %self.ns, db = %self.db, "SurrealDB session handle dropped");
    }
}

/// Shared `SurrealDB` session. Clones share one connection.
#[derive(Debug, Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

impl Database {
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::default()
    }

    /// Migrations applied and skipped while this handle was initialized.
    #[must_use]
    pub fn migration_report(&self) -> &MigrationReport {
        &self.inner.report
    }

    /// Applies `migrations` that are not yet recorded on this database.
    ///
    /// # Errors
    /// [`DatabaseError::Migration`] when a script fails or an applied one was edited.
    pub async fn migrate(
        &self,
        migrations: &[Migration],
    ) -> Result<MigrationReport, DatabaseError> {
        MigrationRunner::new(&self.inner.instance).run(migrations).await
    }

    /// Creates `table:id` from `record`; any `id` field inside the record is dropped.
    ///
    /// # Errors
    /// [`DatabaseError::Conflict`] when the id or a unique index is already taken.
    #[instrument(skip(self, record))]
    pub async fn insert<T>(
        &self,
        table: &'static str,
        id: &str,
        record: &T,
    ) -> Result<(), DatabaseError>
    where
        T: Serialize + Sync,
    {
        let content = content_without_id(record)?;

        self.query("CREATE type::thing($tb, $id) CONTENT $content RETURN NONE")
            .bind(("tb", table))
            .bind(("id", id.to_owned()))
            .bind(("content", content))
            .await
            .and_then(Response::check)
            .map_err(|e| {
                DatabaseError::from_statement(e, format!("Creating {table}:{id}").into())
            })?;

        Ok(())
    }

    /// Merges `patch` into an existing `table:id` and returns the updated record,
    /// or `None` when the record does not exist.
    ///
    /// # Errors
    /// [`DatabaseError::Conflict`] when the patch collides with a unique index.
    #[instrument(skip(self, patch))]
    pub async fn merge<P, T>(
        &self,
        table: &'static str,
        id: &str,
        patch: &P,
    ) -> Result<Option<T>, DatabaseError>
    where
        P: Serialize + Sync,
        T: DeserializeOwned,
    {
        let patch = content_without_id(patch)?;

        let mut rows = self
            .query(
                "UPDATE type::thing($tb, $id) MERGE $patch RETURN NONE;
                 SELECT *, record::id(id) AS id FROM type::thing($tb, $id);",
            )
            .bind(("tb", table))
            .bind(("id", id.to_owned()))
            .bind(("patch", patch))
            .await
            .and_then(Response::check)
            .map_err(|e| DatabaseError::from_statement(e, format!("Updating {table}:{id}").into()))?
            .take::<Vec<T>>(1)
            .context(table)?;

        Ok(if rows.is_empty() { None } else { Some(rows.swap_remove(0)) })
    }

    /// Deletes `table:id` together with every record of a dependent table whose
    /// foreign-key field equals `id`, in one transaction.
    ///
    /// Returns `false` when `table:id` does not exist; nothing is deleted then.
    ///
    /// # Errors
    /// [`DatabaseError::Surreal`] when the transaction fails.
    #[instrument(skip(self, dependents), fields(dependents = dependents.len()))]
    pub async fn delete_cascade(
        &self,
        table: &'static str,
        id: &str,
        dependents: &[(&'static str, &'static str)],
    ) -> Result<bool, DatabaseError> {
        let found = self
            .query("SELECT VALUE record::id(id) FROM type::thing($tb, $id)")
            .bind(("tb", table))
            .bind(("id", id.to_owned()))
            .await
            .context("Checking record before delete")?
            .take::<Vec<String>>(0)
            .context(table)?;
        if found.is_empty() {
            return Ok(false);
        }

        let mut sql = String::from("BEGIN TRANSACTION;\n");
        for (i, (_, field)) in dependents.iter().enumerate() {
            let _ = writeln!(sql, "DELETE type::table($d{i}) WHERE `{field}` = $id;");
        }
        sql.push_str("DELETE type::thing($tb, $id);\nCOMMIT TRANSACTION;");

        let mut query = self.query(sql).bind(("tb", table)).bind(("id", id.to_owned()));
        for (i, (dependent, _)) in dependents.iter().enumerate() {
            query = query.bind((format!("d{i}"), *dependent));
        }

        query
            .await
            .and_then(Response::check)
            .map_err(|e| {
                DatabaseError::from_statement(e, format!("Deleting {table}:{id}").into())
            })?;

        info!(%table, %id, "Record deleted with dependents");
        Ok(true)
    }
}

fn content_without_id<T: Serialize>(record: &T) -> Result<serde_json::Value, DatabaseError> {
    let mut content = serde_json::to_value(record).context("Serializing record")?;
    if let Some(object) = content.as_object_mut() {
        object.remove("id");
    }
    Ok(content)
}

impl Deref for Database {
    type Target = Surreal<Any>;

    fn deref(&self) -> &Self::Target {
        &self.inner.instance
    }
}

#[must_use = "builders do nothing unless you call .init()"]
#[derive(Debug, Default)]
pub struct DatabaseBuilder {
    url: Option<String>,
    ns: Option<String>,
    db: Option<String>,
    auth: Option<(String, String)>,
    migrations: Vec<Migration>,
}

impl DatabaseBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn session(mut self, namespace: impl Into<String>, database: impl Into<String>) -> Self {
        self.ns = Some(namespace.into());
        self.db = Some(database.into());
        self
    }

    /// Root credentials. Leave unset for engines without authentication such as `mem://`.
    pub fn auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some((username.into(), password.into()));
        self
    }

    /// Migrations to apply, in order, after the session is opened.
    pub fn migrations(mut self, migrations: impl IntoIterator<Item = Migration>) -> Self {
        self.migrations.extend(migrations);
        self
    }

    /// Connects, waits for the engine to become healthy, signs in, opens the session
    /// and applies pending migrations.
    ///
    /// # Errors
    /// * [`DatabaseError::Validation`] when url, namespace or database is missing.
    /// * [`DatabaseError::Connection`] when the engine cannot start or stays unhealthy.
    /// * [`DatabaseError::Auth`] when the credentials are rejected.
    /// * [`DatabaseError::Migration`] when a migration fails or was edited after being applied.
    #[instrument(skip(self), fields(url = self.url, ns = self.ns, db = self.db))]
    pub async fn init(self) -> Result<Database, DatabaseError> {
        let url = self.url.ok_or(DatabaseError::Validation {
            message: "URL is required".into(),
            context: None,
        })?;
        let (ns, db) = self.ns.zip(self.db).ok_or(DatabaseError::Validation {
            message: "Namespace and database are required".into(),
            context: None,
        })?;

        let instance = connect(&url).await.map_err(|e| DatabaseError::Connection {
            message: e.to_string().into(),
            context: Some("Initializing engine".into()),
        })?;

        let mut delay = Duration::from_millis(500);
        for attempt in 1..=HEALTH_ATTEMPTS {
            if instance.health().await.is_ok() {
                break;
            }
            if attempt == HEALTH_ATTEMPTS {
                return Err(DatabaseError::Connection {
                    message: "Unhealthy after retries".into(),
                    context: Some(url.into()),
                });
            }
            warn!(attempt, ?delay, "Database not ready, retrying");
            tokio::time::sleep(delay).await;
            delay *= 2;
        }

        if let Some((username, password)) = &self.auth {
            instance.signin(Root { username, password }).await.map_err(|e| DatabaseError::Auth {
                message: e.to_string().into(),
                context: Some(url.clone().into()),
            })?;
        }

        instance.use_ns(&ns).use_db(&db).await.context("Activating session")?;

        let version =
            instance.version().await.map_or_else(|_| "unknown".to_owned(), |v| v.to_string());
        info!(namespace = %ns, database = %db, %version, "SurrealDB connection established");

        let report = MigrationRunner::new(&instance).run(&self.migrations).await?;
        info!(
            applied = report.applied.len(),
            skipped = report.skipped.len(),
            "Database migrations done"
        );


        Ok(Database { inner: Arc::new(DatabaseInner { instance, ns, db, report }) })
    }
}
