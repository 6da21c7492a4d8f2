// src/models/answer.rs

use serde::{Deserialize, Serialize};

use crate::utils::numeric::{lenient_f64, lenient_i64, lenient_id};

/// A recorded response event from the upstream `resposta` resource.
///
/// Different screens of the game write either `answer` (0 = errou,
/// 1 = acertou) or `score`; both are kept as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: i64,

    /// Student this answer belongs to. Not checked against the roster;
    /// `None` when upstream sent no readable id.
    #[serde(rename = "alunoId", default, deserialize_with = "lenient_i64")]
    pub student_id: Option<i64>,

    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub answer: Option<f64>,

    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Answer {
    /// Numeric result of this answer: `answer` when present, otherwise
    /// `score`. A record carrying neither yields NaN, which then poisons
    /// any sum it takes part in.
    pub fn points(&self) -> f64 {
        self.answer.or(self.score).unwrap_or(f64::NAN)
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::from_points(self.points())
    }
}

/// Correctness of a single answer as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// value == 1
    Correct,
    /// value == 0
    Wrong,
    /// Anything else; rendered without a verdict.
    Unrecognized,
}

impl Outcome {
    pub fn from_points(points: f64) -> Self {
        if points == 1.0 {
            Outcome::Correct
        } else if points == 0.0 {
            Outcome::Wrong
        } else {
            Outcome::Unrecognized
        }
    }
}
