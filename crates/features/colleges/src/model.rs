use campus_derive::api_model;
use campus_kernel::domain::constants::COLLEGE;
use campus_kernel::validation::{ValidationErrors, optional};

/// Body of `POST /colleges`. The id is generated unless supplied.
#[api_model]
pub struct CreateCollegeRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub domain: Option<String>,
}

/// A checked [`CreateCollegeRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCollege {
    pub id: Option<String>,
    pub name: String,
    pub domain: Option<String>,
}

impl CreateCollegeRequest {
    /// # Errors
    /// Every missing or malformed field, in declaration order.
    pub fn validate(self) -> Result<NewCollege, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let id = errors.optional_id("id", COLLEGE, self.id);
        let name = errors.required("name", self.name);
        errors.finish()?;

        Ok(NewCollege { id, name, domain: optional(self.domain) })
    }
}

/// Student data carried by a registration; looked up by roll within the college.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub college_id: String,
    pub student_roll: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_required() {
        let req = CreateCollegeRequest { id: None, name: Some("  ".to_owned()), domain: None };
        assert_eq!(req.validate().unwrap_err().to_string(), "name is required");
    }

    #[test]
    fn supplied_ids_are_guarded() {
        let req = CreateCollegeRequest {
            id: Some("college:C001".to_owned()),
            name: Some("Reva University".to_owned()),
            domain: Some(" reva.edu ".to_owned()),
        };
        let college = req.validate().unwrap();
        assert_eq!(college.id.as_deref(), Some("C001"));
        assert_eq!(college.domain.as_deref(), Some("reva.edu"));

        let req = CreateCollegeRequest {
            id: Some("event:E001".to_owned()),
            name: Some("X".to_owned()),
            domain: None,
        };
        assert_eq!(req.validate().unwrap_err().errors()[0].field, "id");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let raw = serde_json::json!({ "name": "X", "city": "Y" });
        let parsed = serde_json::from_value::<CreateCollegeRequest>(raw);

        assert!(parsed.is_err());
    }
}
