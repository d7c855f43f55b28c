use crate::error::{DatabaseError, DatabaseErrorExt};
use fxhash::FxHashMap;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use tracing::{debug, info};

const BOOTSTRAP: &str = include_str!("../migrations/0000-bootstrap.surql");

/// One versioned schema script owned by a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    pub slice: &'static str,
    pub version: &'static str,
    pub script: &'static str,
}

impl Migration {
    #[must_use]
    pub const fn new(slice: &'static str, version: &'static str, script: &'static str) -> Self {
        Self { slice, version, script }
    }

    /// Hex-encoded SHA-256 of the script.
    #[must_use]
    pub fn checksum(&self) -> String {
        hex::encode(Sha256::digest(self.script.as_bytes()))
    }

    fn key(&self) -> String {
        format!("{}:{}", self.slice, self.version)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRecord {
    pub slice: &'static str,
    pub version: &'static str,
}

impl From<&Migration> for MigrationRecord {
    fn from(migration: &Migration) -> Self {
        Self { slice: migration.slice, version: migration.version }
    }
}

/// Outcome of one migration pass.
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub applied: Vec<MigrationRecord>,
    pub skipped: Vec<MigrationRecord>,
}

#[derive(Debug, Deserialize)]
struct AppliedRow {
    slice: String,
    version: String,
    checksum: String,
}

#[derive(Debug)]
pub(crate) struct MigrationRunner<'a> {
    db: &'a Surreal<Any>,
}

impl<'a> MigrationRunner<'a> {
    pub(crate) const fn new(db: &'a Surreal<Any>) -> Self {
        Self { db }
    }

    /// Applies pending migrations in the given order, each one inside its own transaction.
    pub(crate) async fn run(
        &self,
        migrations: &[Migration],
    ) -> Result<MigrationReport, DatabaseError> {
        self.db
            .query(BOOTSTRAP)
            .await
            .and_then(surrealdb::Response::check)
            .context("Bootstrapping migration table")?;

        let applied = self.applied().await?;
        let mut report = MigrationReport::default();

        for migration in migrations {
            let checksum = migration.checksum();

            if let Some(existing) = applied.get(&migration.key()) {
                ensure_checksum_match(migration, existing, &checksum)?;
                debug!(
                    slice = migration.slice,
                    version = migration.version,
                    "Migration already applied"
                );
                report.skipped.push(migration.into());
                continue;
            }

            self.apply(migration, checksum).await?;
            info!(slice = migration.slice, version = migration.version, "Applied migration");
            report.applied.push(migration.into());
        }

        Ok(report)
    }

    async fn apply(&self, migration: &Migration, checksum: String) -> Result<(), DatabaseError> {
        let query = format!(
            "BEGIN TRANSACTION;
            {}
            CREATE type::thing('migration', [$slice, $version]) CONTENT {{
                slice: $slice, version: $version, checksum: $checksum, appliedAt: time::now()
            }} RETURN NONE;
            COMMIT TRANSACTION;",
            migration.script,
        );

        self.db
            .query(query)
            .bind(("slice", migration.slice))
            .bind(("version", migration.version))
            .bind(("checksum", checksum))
            .await
            .and_then(surrealdb::Response::check)
            .map_err(|source| DatabaseError::Migration {
                message: source.to_string().into(),
                context: Some(format!("Applying {}", migration.key()).into()),
            })?;

        Ok(())
    }

    async fn applied(&self) -> Result<FxHashMap<String, String>, DatabaseError> {
        let rows = self
            .db
            .query("SELECT slice, version, checksum FROM migration")
            .await
            .context("Loading applied migrations")?
            .take::<Vec<AppliedRow>>(0)
            .context("Parsing applied migrations")?;

        Ok(rows
            .into_iter()
            .map(|row| (format!("{}:{}", row.slice, row.version), row.checksum))
            .collect())
    }
}

fn ensure_checksum_match(
    migration: &Migration,
    existing: &str,
    current: &str,
) -> Result<(), DatabaseError> {

    if existing != current {
        return Err(DatabaseError::Migration {
            message: format!(
                "Checksum mismatch for {} (applied {existing}, found {current})",
                migration.key()
            )
            .into(),
            context: Some("Applied migrations must not be edited".into()),
        });
    }
    Ok(())
}
