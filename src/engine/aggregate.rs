// src/engine/aggregate.rs

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Answer, Outcome, RosterEntry, Student};

/// Whole-set figures shown under the questions list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Sum of every answer's points; NaN if any record lacks a number.
    pub points: f64,
    pub correct: usize,
    pub wrong: usize,
}

pub fn whole_set(answers: &[Answer]) -> Totals {
    answers.iter().fold(Totals::default(), |mut totals, answer| {
        totals.points += answer.points();
        match answer.outcome() {
            Outcome::Correct => totals.correct += 1,
            Outcome::Wrong => totals.wrong += 1,
            Outcome::Unrecognized => {}
        }
        totals
    })
}

/// Sum of points per `studentId`. Ids with no matching student are kept:
/// dangling answers still count. Answers without a readable id share the
/// `None` bucket.
pub fn per_student(answers: &[Answer]) -> BTreeMap<Option<i64>, f64> {
    let mut totals = BTreeMap::new();
    for answer in answers {
        *totals.entry(answer.student_id).or_insert(0.0) += answer.points();
    }
    totals
}

/// Builds the roster in student order, with 0 for students that have no answers.
pub fn roster(students: &[Student], answers: &[Answer]) -> Vec<RosterEntry> {
    let totals = per_student(answers);
    students
        .iter()
        .map(|student| {
            let total = totals.get(&Some(student.id)).copied().unwrap_or(0.0);
            RosterEntry::new(student, total)
        })
        .collect()
}
