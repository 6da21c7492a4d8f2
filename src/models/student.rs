// src/models/student.rs

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::utils::{numeric::lenient_id, text::lenient_string};

/// Cohort ("turma") as upstream stores it: the form sends free text, older
/// records carry a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cohort {
    Number(i64),
    Text(String),
}

impl Default for Cohort {
    fn default() -> Self {
        Cohort::Text(String::new())
    }
}

impl Cohort {
    /// Reads whatever upstream stored; never rejects the record.
    fn lenient<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Number(n)) => match n.as_i64() {
                Some(n) => Cohort::Number(n),
                None => Cohort::Text(n.to_string()),
            },
            Some(Value::String(s)) => Cohort::Text(s),
            Some(Value::Bool(b)) => Cohort::Text(b.to_string()),
            Some(Value::Null) | Some(Value::Array(_)) | Some(Value::Object(_)) | None => {
                Cohort::default()
            }
        })
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cohort::Number(n) => write!(f, "{}", n),
            Cohort::Text(s) => f.write_str(s),
        }
    }
}

/// A learner from the upstream `alunos` resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: i64,

    #[serde(rename = "nome", default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,

    /// Stored in clear by upstream; echoed back on update.
    #[serde(rename = "senha", default, deserialize_with = "lenient_string")]
    pub password: String,

    #[serde(rename = "turma", default, deserialize_with = "Cohort::lenient")]
    pub cohort: Cohort,
}

/// Body sent to upstream on create and update, and the editable form state
/// of the students screen.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct StudentForm {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters."))]
    pub name: String,

    #[validate(email(message = "Email is not valid."))]
    pub email: String,

    #[serde(rename = "senha")]
    #[validate(length(max = 128))]
    pub password: String,

    #[serde(rename = "turma")]
    pub cohort: Cohort,
}

impl From<&Student> for StudentForm {
    fn from(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            email: student.email.clone(),
            password: student.password.clone(),
            cohort: student.cohort.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cohort_accepts_text_or_number() {
        let s: Student = serde_json::from_value(json!({
            "id": 1, "nome": "Ana", "email": "ana@x.io", "senha": "x", "turma": 302
        }))
        .unwrap();
        assert_eq!(s.cohort, Cohort::Number(302));
        assert_eq!(s.cohort.to_string(), "302");

        let s: Student = serde_json::from_value(json!({
            "id": 2, "nome": "Bia", "email": "bia@x.io", "senha": "y", "turma": "3B"
        }))
        .unwrap();
        assert_eq!(s.cohort, Cohort::Text("3B".into()));
    }

    #[test]
    fn nulls_and_odd_types_do_not_reject_the_record() {
        let s: Student = serde_json::from_value(json!({
            "id": "9", "nome": null, "email": "c@x.io", "turma": 3.5
        }))
        .unwrap();
        assert_eq!(s.id, 9);
        assert_eq!(s.name, "");
        assert_eq!(s.password, "");
        assert_eq!(s.cohort, Cohort::Text("3.5".into()));
    }
}
