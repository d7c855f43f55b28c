use crate::error::CollegeError;
use crate::model::{NewCollege, NewStudent};
use campus_database::{Database, Filter, Store};
use campus_kernel::domain::constants::{COLLEGE, EVENT, FEEDBACK, REGISTRATION, STUDENT, fields};
use campus_kernel::domain::models::{College, Student};
use campus_kernel::safe_nanoid;
use chrono::Utc;
use tracing::{debug, info, instrument};

/// Tables whose records belong to a college through `collegeId`.
const COLLEGE_DEPENDENTS: &[(&str, &str)] = &[
    (FEEDBACK, fields::COLLEGE_ID),
    (REGISTRATION, fields::COLLEGE_ID),
    (EVENT, fields::COLLEGE_ID),
    (STUDENT, fields::COLLEGE_ID),
];

#[derive(Debug, Clone)]
pub struct CollegeService {
    db: Database,
}

impl CollegeService {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// # Errors
    /// [`CollegeError::Conflict`] when the supplied id is taken.
    #[instrument(skip(self, new), fields(name = %new.name))]
    pub async fn create(&self, new: NewCollege) -> Result<College, CollegeError> {
        let now = Utc::now();
        let college = College {
            id: new.id.unwrap_or_else(|| safe_nanoid!()),
            name: new.name,
            domain: new.domain,
            created_at: now,
            updated_at: now,
        };

        self.db.insert(COLLEGE, &college.id, &college).await.map_err(|err| {
            if err.is_conflict() {
                CollegeError::Conflict {
                    message: format!("College {} already exists", college.id).into(),
                    context: None,
                }
            } else {
                err.into()
            }
        })?;

        info!(college = %college.id, "College created");
        Ok(college)
    }

    /// All colleges by name.
    ///
    /// # Errors
    /// Store failures only.
    pub async fn list(&self) -> Result<Vec<College>, CollegeError> {
        let mut colleges: Vec<College> = self.db.find(COLLEGE, &Filter::new()).await?;
        colleges.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(colleges)
    }

    /// # Errors
    /// Store failures only.
    pub async fn get(&self, id: &str) -> Result<Option<College>, CollegeError> {
        Ok(self.db.find_by_id(COLLEGE, id).await?)
    }

    /// Like [`Self::get`], but a missing college is an error.
    ///
    /// # Errors
    /// [`CollegeError::NotFound`] when no college has this id.
    pub async fn require(&self, id: &str) -> Result<College, CollegeError> {
        self.get(id).await?.ok_or_else(|| CollegeError::college_not_found(id))
    }

    /// Deletes the college with its students, events, registrations and feedback.
    ///
    /// # Errors
    /// [`CollegeError::NotFound`] when no college has this id.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), CollegeError> {
        if self.db.delete_cascade(COLLEGE, id, COLLEGE_DEPENDENTS).await? {
            info!(college = %id, "College deleted");
            Ok(())
        } else {
            Err(CollegeError::college_not_found(id))
        }
    }

    /// Students of an existing college, by roll number.
    ///
    /// # Errors
    /// [`CollegeError::NotFound`] when the college is absent.
    pub async fn students(&self, college_id: &str) -> Result<Vec<Student>, CollegeError> {
        self.require(college_id).await?;

        let mut students: Vec<Student> =
            self.db.find(STUDENT, &Filter::new().eq(fields::COLLEGE_ID, college_id)).await?;
        students.sort_by(|a, b| a.student_roll.cmp(&b.student_roll));
        Ok(students)
    }

    /// # Errors
    /// Store failures only.
    pub async fn find_student(
        &self,
        college_id: &str,
        student_roll: &str,
    ) -> Result<Option<Student>, CollegeError> {
        let filter =
            Filter::new().eq(fields::COLLEGE_ID, college_id).eq(fields::STUDENT_ROLL, student_roll);
        let students: Vec<Student> = self.db.find(STUDENT, &filter).await?;
        Ok(students.into_iter().next())
    }

    /// Returns the student with this roll in the college, creating it first when absent.
    ///
    /// Name and e-mail are only used on creation. When a concurrent request creates the
    /// same student first, the unique index rejects this insert and the winner is returned.
    ///
    /// # Errors
    /// Store failures, or a conflict that cannot be resolved by re-reading.
    #[instrument(skip(self, new), fields(college = %new.college_id, roll = %new.student_roll))]
    pub async fn find_or_create_student(&self, new: NewStudent) -> Result<Student, CollegeError> {
        if let Some(student) = self.find_student(&new.college_id, &new.student_roll).await? {
            return Ok(student);
        }

        let now = Utc::now();
        let student = Student {
            id: safe_nanoid!(),
            student_roll: new.student_roll,
            name: new.name,
            email: new.email,
            college_id: new.college_id,
            created_at: now,
            updated_at: now,
        };

        match self.db.insert(STUDENT, &student.id, &student).await {
            Ok(()) => {
                info!(student = %student.id, "Student created");
                Ok(student)
            }
            Err(err) if err.is_conflict() => {
                debug!("Student created concurrently, re-reading");
                self.find_student(&student.college_id, &student.student_roll).await?.ok_or_else(|| {
                    CollegeError::Store {
                        source: err,
                        context: Some("Re-reading student after conflict".into()),
                    }

                })
            }
            Err(err) => Err(err.into()),
        }
    }
}
