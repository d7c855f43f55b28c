//! The five reports. Each one runs one or two grouped counts over the store and one
//! batched lookup for titles or student details; nothing is written.

use crate::error::{ReportError, ReportErrorExt};
use crate::model::{
    AttendanceRow, EventPopularityRow, FeedbackRow, ParticipationRow, ReportKind, ReportParams,
    ReportRows, TopStudentRow,
};
use crate::rounding::{mean, percent};
use campus_database::{Condition, Filter, Store};
use campus_kernel::domain::constants::{EVENT, FEEDBACK, REGISTRATION, STUDENT, fields};
use campus_kernel::domain::models::AttendanceStatus;
use fxhash::FxHashMap;
use serde::Deserialize;
use tracing::{debug, instrument};

/// Rows kept by `top-active-students`.
pub const TOP_STUDENTS: usize = 3;

#[derive(Debug, Deserialize)]
struct EventTitle {
    id: String,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScopedEvent {
    title: Option<String>,
    college_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StudentRef {
    id: String,
    student_roll: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReportEngine<S> {
    store: S,
}

impl<S: Store> ReportEngine<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Runs `kind` within `params`.
    ///
    /// # Errors
    /// Store failures only; an empty scope yields empty rows.
    #[instrument(skip(self), fields(report = %kind))]
    pub async fn report(
        &self,
        kind: ReportKind,
        params: &ReportParams,
    ) -> Result<ReportRows, ReportError> {
        let college = params.college_id.as_deref();
        let rows = match kind {
            ReportKind::EventPopularity => {
                ReportRows::EventPopularity(self.event_popularity(college).await?)
            }
            ReportKind::AttendancePercent => {
                let event = params.event_id.as_deref();
                ReportRows::AttendancePercent(self.attendance_percent(college, event).await?)
            }
            ReportKind::AvgFeedback => ReportRows::AvgFeedback(self.avg_feedback(college).await?),
            ReportKind::StudentParticipation => {
                ReportRows::StudentParticipation(self.student_participation(college).await?)
            }
            ReportKind::TopActiveStudents => {
                ReportRows::TopActiveStudents(self.top_active_students(college).await?)
            }
        };

        debug!(rows = rows.len(), "Report computed");
        Ok(rows)
    }

    /// Registrations per event, most popular first.
    ///
    /// # Errors
    /// Store failures only.
    pub async fn event_popularity(
        &self,
        college_id: Option<&str>,
    ) -> Result<Vec<EventPopularityRow>, ReportError> {
        let counts = self
            .store
            .group_count(REGISTRATION, fields::EVENT_ID, &scope(college_id), None)
            .await
            .context("Counting registrations per event")?;
        let titles = self.event_titles(counts.keys()).await?;

        let mut rows: Vec<EventPopularityRow> = counts
            .into_iter()
            .map(|(event_id, registrations)| EventPopularityRow {
                title: titles.get(&event_id).cloned().flatten(),
                event_id,
                registrations,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.registrations.cmp(&a.registrations).then_with(|| a.event_id.cmp(&b.event_id))
        });
        Ok(rows)
    }

    /// Share of registrations marked present, per event in id order.
    ///
    /// When `event_id` names an existing event in scope that nobody registered for,
    /// a single zero row is returned instead of nothing.
    ///
    /// # Errors
    /// Store failures only.
    pub async fn attendance_percent(
        &self,
        college_id: Option<&str>,
        event_id: Option<&str>,
    ) -> Result<Vec<AttendanceRow>, ReportError> {
        let filter = scope(college_id).eq_opt(fields::EVENT_ID, event_id);
        let totals = self
            .store
            .group_count(REGISTRATION, fields::EVENT_ID, &filter, None)
            .await
            .context("Counting registrations per event")?;

        if totals.is_empty() {
            return self.empty_attendance(college_id, event_id).await;
        }

        let present = self
            .store
            .group_count(REGISTRATION, fields::EVENT_ID, &filter, Some(&present()))
            .await
            .context("Counting attendance per event")?;
        let titles = self.event_titles(totals.keys()).await?;

        let mut rows: Vec<AttendanceRow> = totals
            .into_iter()
            .map(|(event_id, total_registered)| {
                let present_count = present.get(&event_id).copied().unwrap_or(0);
                AttendanceRow {
                    title: titles.get(&event_id).cloned().flatten(),
                    event_id,
                    total_registered,
                    present_count,
                    attendance_percent: percent(present_count, total_registered),
                }
            })
            .collect();
        rows.sort_by(|a, b| a.event_id.cmp(&b.event_id));
        Ok(rows)
    }

    async fn empty_attendance(
        &self,
        college_id: Option<&str>,
        event_id: Option<&str>,
    ) -> Result<Vec<AttendanceRow>, ReportError> {
        let Some(event_id) = event_id else {
            return Ok(Vec::new());
        };

        let event: Option<ScopedEvent> =
            self.store.find_by_id(EVENT, event_id).await.context("Looking up event")?;
        Ok(event
            .filter(|event| {
                college_id.is_none_or(|college| event.college_id.as_deref() == Some(college))
            })
            .map(|event| AttendanceRow {
                event_id: event_id.to_owned(),
                title: event.title,
                total_registered: 0,
                present_count: 0,
                attendance_percent: 0.0,
            })
            .into_iter()
            .collect())
    }

    /// Mean rating per event with at least one feedback, in id order.
    ///
    /// # Errors
    /// Store failures only.
    pub async fn avg_feedback(
        &self,
        college_id: Option<&str>,
    ) -> Result<Vec<FeedbackRow>, ReportError> {
        let filter = scope(college_id);
        let counts = self
            .store
            .group_count(FEEDBACK, fields::EVENT_ID, &filter, None)
            .await
            .context("Counting feedback per event")?;
        if counts.is_empty() {
            return Ok(Vec::new());
        }

        let sums = self
            .store
            .group_sum(FEEDBACK, fields::EVENT_ID, fields::RATING, &filter)
            .await
            .context("Summing ratings per event")?;
        let titles = self.event_titles(counts.keys()).await?;

        let mut rows: Vec<FeedbackRow> = counts
            .into_iter()
            .map(|(event_id, feedback_count)| {
                let sum =
                    sums.get(&event_id).copied().map_or(0, |sum| u64::try_from(sum).unwrap_or(0));
                FeedbackRow {
                    title: titles.get(&event_id).cloned().flatten(),
                    event_id,
                    avg_rating: mean(sum, feedback_count),
                    feedback_count,
                }
            })
            .collect();
        rows.sort_by(|a, b| a.event_id.cmp(&b.event_id));
        Ok(rows)
    }

    /// Registered and attended counts per student, most attended first.
    ///
    /// # Errors
    /// Store failures only.
    pub async fn student_participation(
        &self,
        college_id: Option<&str>,
    ) -> Result<Vec<ParticipationRow>, ReportError> {
        let filter = scope(college_id);
        let registered = self
            .store
            .group_count(REGISTRATION, fields::STUDENT_ID, &filter, None)
            .await
            .context("Counting registrations per student")?;
        if registered.is_empty() {
            return Ok(Vec::new());
        }

        let attended = self
            .store
            .group_count(REGISTRATION, fields::STUDENT_ID, &filter, Some(&present()))
            .await
            .context("Counting attendance per student")?;
        let mut students = self.students(registered.keys()).await?;

        let mut rows: Vec<ParticipationRow> = registered
            .into_iter()
            .map(|(student_id, events_registered)| {
                let (student_roll, name) = students.remove(&student_id).unwrap_or_default();
                ParticipationRow {
                    events_attended: attended.get(&student_id).copied().unwrap_or(0),
                    student_id,
                    student_roll,
                    name,
                    events_registered,
                }
            })
            .collect();
        rows.sort_by(|a, b| {
            b.events_attended.cmp(&a.events_attended).then_with(|| a.student_id.cmp(&b.student_id))
        });
        Ok(rows)
    }

    /// The [`TOP_STUDENTS`] students with the most attended events.
    ///
    /// Same order as [`Self::student_participation`], so the result is its prefix.
    ///
    /// # Errors
    /// Store failures only.
    pub async fn top_active_students(
        &self,
        college_id: Option<&str>,
    ) -> Result<Vec<TopStudentRow>, ReportError> {
        let rows = self.student_participation(college_id).await?;

        Ok(rows
            .into_iter()
            .take(TOP_STUDENTS)
            .map(|row| TopStudentRow {
                student_id: row.student_id,
                student_roll: row.student_roll,
                name: row.name,
                attended: row.events_attended,
            })
            .collect())
    }

    /// Titles by event id; absent events are simply missing from the map.
    async fn event_titles<'a>(
        &self,
        ids: impl Iterator<Item = &'a String>,
    ) -> Result<FxHashMap<String, Option<String>>, ReportError> {
        let ids: Vec<String> = ids.cloned().collect();
        let events: Vec<EventTitle> =
            self.store.find_by_ids(EVENT, &ids).await.context("Loading event titles")?;
        Ok(events.into_iter().map(|event| (event.id, event.title)).collect())
    }

    /// Roll number and name by student id.
    async fn students<'a>(
        &self,
        ids: impl Iterator<Item = &'a String>,
    ) -> Result<FxHashMap<String, (Option<String>, Option<String>)>, ReportError> {
        let ids: Vec<String> = ids.cloned().collect();
        let students: Vec<StudentRef> =
            self.store.find_by_ids(STUDENT, &ids).await.context("Loading students")?;

        Ok(students.into_iter().map(|s| (s.id, (s.student_roll, s.name))).collect())
    }
}

fn scope(college_id: Option<&str>) -> Filter {
    Filter::new().eq_opt(fields::COLLEGE_ID, college_id)
}

fn present() -> Condition {
    Condition::eq(fields::ATTENDANCE_STATUS, AttendanceStatus::Present.as_ref())
}
