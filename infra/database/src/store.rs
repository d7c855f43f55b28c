//! Read-only access used by the reporting engine, plus the filter model it shares with
//! the write helpers on [`Database`].

use crate::error::{DatabaseError, DatabaseErrorExt};
use crate::Database;
use fxhash::FxHashMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fmt::Write;
use std::future::Future;
use tracing::instrument;

/// A `field = value` test. Field names are compile-time constants, values are bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    field: &'static str,
    value: String,
}

impl Condition {
    pub fn eq(field: &'static str, value: impl Into<String>) -> Self {
        Self { field, value: value.into() }
    }

    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Conjunction of [`Condition`]s. An empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn eq(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.conditions.push(Condition::eq(field, value));
        self
    }

    /// Adds the condition only when `value` is present.
    #[must_use]
    pub fn eq_opt(self, field: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.eq(field, value),
            None => self,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Renders ``WHERE `a` = $p0 AND `b` = $p1`` (or nothing) and the matching bindings.
    pub(crate) fn render(&self, extra: Option<&Condition>) -> (String, Vec<(String, String)>) {
        let all: Vec<&Condition> = self.conditions.iter().chain(extra).collect();
        if all.is_empty() {
            return (String::new(), Vec::new());
        }

        let mut clause = String::from("WHERE ");
        let mut binds = Vec::with_capacity(all.len());
        for (i, condition) in all.into_iter().enumerate() {
            if i > 0 {
                clause.push_str(" AND ");
            }
            let _ = write!(clause, "`{}` = $p{i}", condition.field);
            binds.push((format!("p{i}"), condition.value.clone()));
        }
        (clause, binds)
    }
}

/// Read interface over persisted records. Implementations never mutate.
pub trait Store: Send + Sync {
    fn find<T>(
        &self,
        table: &'static str,
        filter: &Filter,
    ) -> impl Future<Output = Result<Vec<T>, DatabaseError>> + Send
    where
        T: DeserializeOwned + Send;

    fn find_by_id<T>(
        &self,
        table: &'static str,
        id: &str,
    ) -> impl Future<Output = Result<Option<T>, DatabaseError>> + Send
    where
        T: DeserializeOwned + Send;

    fn find_by_ids<T>(
        &self,
        table: &'static str,
        ids: &[String],
    ) -> impl Future<Output = Result<Vec<T>, DatabaseError>> + Send
    where
        T: DeserializeOwned + Send;

    /// Counts records per distinct `key`, restricted to `filter` and, when given, `matching`.
    fn group_count(
        &self,
        table: &'static str,
        key: &'static str,
        filter: &Filter,
        matching: Option<&Condition>,
    ) -> impl Future<Output = Result<FxHashMap<String, u64>, DatabaseError>> + Send;

    /// Sums the integer `field` per distinct `key`.
    fn group_sum(
        &self,
        table: &'static str,
        key: &'static str,
        field: &'static str,
        filter: &Filter,
    ) -> impl Future<Output = Result<FxHashMap<String, i64>, DatabaseError>> + Send;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountRow {
    group_key: String,
    total: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SumRow {
    group_key: String,
    total: i64,
}

impl Store for Database {
    #[instrument(skip(self, filter), fields(conditions = filter.conditions().len()))]
    async fn find<T>(&self, table: &'static str, filter: &Filter) -> Result<Vec<T>, DatabaseError>
    where
        T: DeserializeOwned + Send,
    {
        let (clause, binds) = filter.render(None);
        let sql = format!("SELECT *, record::id(id) AS id FROM type::table($tb) {clause}");

        let mut query = self.query(sql).bind(("tb", table));
        for bind in binds {
            query = query.bind(bind);
        }

        query.await.context("Running find")?.take::<Vec<T>>(0).context(table)
    }

    #[instrument(skip(self))]
    async fn find_by_id<T>(&self, table: &'static str, id: &str) -> Result<Option<T>, DatabaseError>
    where
        T: DeserializeOwned + Send,
    {
        let mut rows = self
            .query("SELECT *, record::id(id) AS id FROM type::thing($tb, $id)")
            .bind(("tb", table))
            .bind(("id", id.to_owned()))
            .await
            .context("Running find_by_id")?
            .take::<Vec<T>>(0)
            .context(table)?;

        Ok(if rows.is_empty() { None } else { Some(rows.swap_remove(0)) })
    }

    #[instrument(skip(self, ids), fields(ids = ids.len()))]
    async fn find_by_ids<T>(
        &self,
        table: &'static str,
        ids: &[String],
    ) -> Result<Vec<T>, DatabaseError>
    where
        T: DeserializeOwned + Send,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.query(
            "SELECT *, record::id(id) AS id FROM type::table($tb) WHERE record::id(id) IN $ids",
        )
        .bind(("tb", table))
        .bind(("ids", ids.to_vec()))
        .await
        .context("Running find_by_ids")?
        .take::<Vec<T>>(0)
        .context(table)
    }

    #[instrument(skip(self, filter, matching))]
    async fn group_count(
        &self,
        table: &'static str,
        key: &'static str,
        filter: &Filter,
        matching: Option<&Condition>,
    ) -> Result<FxHashMap<String, u64>, DatabaseError> {
        let (clause, binds) = filter.render(matching);
        let sql = format!(
            "SELECT groupKey, count() AS total FROM \
             (SELECT `{key}` AS groupKey FROM type::table($tb) {clause}) GROUP BY groupKey"
        );

        let mut query = self.query(sql).bind(("tb", table));
        for bind in binds {
            query = query.bind(bind);
        }

        let rows = query
            .await
            .context("Running group_count")?
            .take::<Vec<CountRow>>(0)
            .context(table)?;
        Ok(rows.into_iter().map(|row| (row.group_key, row.total)).collect())
    }

    #[instrument(skip(self, filter))]
    async fn group_sum(
        &self,
        table: &'static str,
        key: &'static str,
        field: &'static str,
        filter: &Filter,
    ) -> Result<FxHashMap<String, i64>, DatabaseError> {
        let (clause, binds) = filter.render(None);
        let sql = format!(
            "SELECT groupKey, math::sum(amount) AS total FROM \
             (SELECT `{key}` AS groupKey, `{field}` AS amount FROM type::table($tb) {clause}) \
             GROUP BY groupKey"
        );

        let mut query = self.query(sql).bind(("tb", table));
        for bind in binds {
            query = query.bind(bind);
        }

        let rows = query
            .await
            .context("Running group_sum")?
            .take::<Vec<SumRow>>(0)
            .context(table)?;
        Ok(rows.into_iter().map(|row| (row.group_key, row.total)).collect())
    }
}
