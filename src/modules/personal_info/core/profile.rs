// The employee's personal information profile.
//
// Purpose
// - One profile per session, edited as a whole form. `PersonalInfo` is both the form state
//   and the wire shape of `/api/personal-info`.
//
// Responsibilities
// - Validate the form: identity, contact and placement fields plus the joining date are
//   required, and the email must look like an email address.

use crate::shared::core::calendar_date::optional_wire_date;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub job_title: String,
    #[serde(with = "optional_wire_date")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(with = "optional_wire_date")]
    pub date_of_joining: Option<NaiveDate>,
    pub manager: String,
    pub employee_type: String,
    pub address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProfileFieldError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Email must be a valid email address")]
    InvalidEmail,
}

impl PersonalInfo {
    pub fn validate(&self) -> Result<(), Vec<ProfileFieldError>> {
        let required = [
            ("Employee ID", self.employee_id.as_str()),
            ("Full name", self.full_name.as_str()),
            ("Email", self.email.as_str()),
            ("Phone", self.phone.as_str()),
            ("Department", self.department.as_str()),
            ("Job title", self.job_title.as_str()),
        ];
        let mut errors: Vec<ProfileFieldError> = required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(label, _)| ProfileFieldError::Required(label))
            .collect();

        let email = self.email.trim();
        if !email.is_empty() && !EMAIL_RE.is_match(email) {
            errors.push(ProfileFieldError::InvalidEmail);
        }
        if self.date_of_joining.is_none() {
            errors.push(ProfileFieldError::Required("Date of joining"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
mod personal_info_profile_tests {
    use super::*;
    use crate::tests::fixtures::date;
    use rstest::{fixture, rstest};

    #[fixture]
    fn profile() -> PersonalInfo {
        PersonalInfo {
            employee_id: "EMP001".to_string(),
            full_name: "Jordan Reyes".to_string(),
            email: "jordan.reyes@company.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            department: "IT".to_string(),
            job_title: "Software Developer".to_string(),
            date_of_birth: Some(date("1990-05-15")),
            date_of_joining: Some(date("2022-01-15")),
            manager: String::new(),
            employee_type: "Full-time".to_string(),
            address: String::new(),
        }
    }

    #[rstest]
    fn it_should_accept_a_complete_profile(profile: PersonalInfo) {
        assert_eq!(profile.validate(), Ok(()));
    }

    #[rstest]
    fn it_should_list_every_missing_required_field() {
        let errors = PersonalInfo::default().validate().unwrap_err();
        assert_eq!(errors.len(), 7);
        assert_eq!(errors[0].to_string(), "Employee ID is required");
        assert_eq!(errors[6], ProfileFieldError::Required("Date of joining"));
    }

    #[rstest]
    #[case("jordan")]
    #[case("jordan@company")]
    #[case("jordan reyes@company.com")]
    fn it_should_reject_a_malformed_email(mut profile: PersonalInfo, #[case] email: &str) {
        profile.email = email.to_string();
        assert_eq!(profile.validate(), Err(vec![ProfileFieldError::InvalidEmail]));
    }

    #[rstest]
    fn it_should_use_camel_case_and_plain_dates_on_the_wire(profile: PersonalInfo) {
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["employeeId"], "EMP001");
        assert_eq!(json["dateOfJoining"], "2022-01-15");
        assert_eq!(json["manager"], "");

        let back: PersonalInfo = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }

    #[rstest]
    fn it_should_tolerate_missing_optional_fields() {
        let json = r#"{"employeeId":"EMP002","fullName":"Sam Lee","dateOfBirth":null}"#;
        let profile: PersonalInfo = serde_json::from_str(json).unwrap();
        assert_eq!(profile.employee_id, "EMP002");
        assert_eq!(profile.date_of_birth, None);
        assert_eq!(profile.address, "");
    }
}
