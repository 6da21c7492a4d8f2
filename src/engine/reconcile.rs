// src/engine/reconcile.rs

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::models::{Answer, Question, QuestionView};

/// How questions and answers fetched independently are paired up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PairingStrategy {
    /// `answers[i]` goes with `questions[i]`. Relies on upstream returning both
    /// collections in correlated order; no key is compared.
    #[default]
    Positional,
    /// Each question takes the next unused answer of one student, in the
    /// order upstream returned them.
    ByStudentId { student_id: i64 },
}

impl PairingStrategy {
    pub fn for_filter(student_id: Option<i64>) -> Self {
        match student_id {
            Some(student_id) => PairingStrategy::ByStudentId { student_id },
            None => PairingStrategy::Positional,
        }
    }
}

/// Merges the two collections into one view per question, preserving
/// question order. Every answer is attached to at most one question.
pub fn reconcile(
    questions: Vec<Question>,
    answers: &[Answer],
    strategy: PairingStrategy,
) -> Vec<QuestionView> {
    match strategy {
        PairingStrategy::Positional => pair_by_position(questions, answers),
        PairingStrategy::ByStudentId { student_id } => {
            pair_by_student(questions, answers, student_id)
        }
    }
}

fn pair_by_position(questions: Vec<Question>, answers: &[Answer]) -> Vec<QuestionView> {
    questions
        .into_iter()
        .enumerate()
        .map(|(i, question)| match answers.get(i) {
            Some(answer) => QuestionView::answered(question, answer),
            None => QuestionView::unanswered(question),
        })
        .collect()
}

fn pair_by_student(
    questions: Vec<Question>,
    answers: &[Answer],
    student_id: i64,
) -> Vec<QuestionView> {
    // Answers of other students stay in their own queues and are never popped.
    let mut queues = group_by_student(answers);
    let queue = queues.get_mut(&Some(student_id));

    match queue {
        Some(queue) => questions
            .into_iter()
            .map(|question| match queue.pop_front() {
                Some(answer) => QuestionView::answered(question, answer),
                None => QuestionView::unanswered(question),
            })
            .collect(),
        None => questions.into_iter().map(QuestionView::unanswered).collect(),
    }
}

/// Groups answers into one FIFO queue per student, keeping upstream order
/// inside each queue. Answers with no readable student id land under `None`.
pub fn group_by_student(answers: &[Answer]) -> HashMap<Option<i64>, VecDeque<&Answer>> {
    let mut queues: HashMap<Option<i64>, VecDeque<&Answer>> = HashMap::new();
    for answer in answers {
        queues.entry(answer.student_id).or_default().push_back(answer);
    }
    queues
}
