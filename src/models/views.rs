// src/models/views.rs

//! Derived records built fresh on every reload. Never sent upstream.

use serde::Serialize;

use super::{
    answer::{Answer, Outcome},
    question::Question,
    student::{Cohort, Student},
};

/// A question with the result the reconciler paired it with, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    #[serde(flatten)]
    pub question: Question,

    /// Numeric result of the paired answer. `None` means "no result yet".
    pub score: Option<f64>,

    pub outcome: Option<Outcome>,

    /// Id of the paired answer record.
    pub answer_id: Option<i64>,
}

impl QuestionView {
    pub fn unanswered(question: Question) -> Self {
        Self {
            question,
            score: None,
            outcome: None,
            answer_id: None,
        }
    }

    pub fn answered(question: Question, answer: &Answer) -> Self {
        Self {
            question,
            score: Some(answer.points()),
            outcome: Some(answer.outcome()),
            answer_id: Some(answer.id),
        }
    }

    pub fn has_result(&self) -> bool {
        self.answer_id.is_some()
    }
}

/// One row of the student roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub cohort: Cohort,
    pub total_score: f64,
}

impl RosterEntry {
    pub fn new(student: &Student, total_score: f64) -> Self {
        Self {
            id: student.id,
            name: student.name.clone(),
            email: student.email.clone(),
            cohort: student.cohort.clone(),
            total_score,
        }
    }
}
