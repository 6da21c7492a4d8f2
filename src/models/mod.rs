// src/models/mod.rs

pub mod answer;
pub mod question;
pub mod student;
pub mod views;

pub use answer::{Answer, Outcome};
pub use question::{ChemicalElement, Question, QuestionDraft, QuestionForm};
pub use student::{Cohort, Student, StudentForm};
pub use views::{QuestionView, RosterEntry};
