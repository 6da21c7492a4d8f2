// src/screens/mod.rs

//! Per-screen state records and the operations that drive them.
//!
//! Each screen owns its state behind a lock that is only held while reading
//! or writing it, never across an upstream call. Overlapping reloads are not
//! coordinated: whichever response resolves last overwrites the state.

pub mod lifecycle;
pub mod questions;
pub mod students;

use std::fmt;

use crate::client::FetchError;

pub use questions::{QuestionScreen, QuestionsController, QuestionsSnapshot};
pub use students::{StudentScreen, StudentsController, StudentsSnapshot};

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenError {
    Fetch(FetchError),
    /// Update/delete requested with no record selected.
    NothingSelected,
    /// The id is not in the currently loaded list.
    NotLoaded(i64),
    /// Delete-all where at least one of the two deletes failed. Local state
    /// was cleared anyway.
    PartialDelete {
        questions: Option<FetchError>,
        answers: Option<FetchError>,
    },
}

impl fmt::Display for ScreenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenError::Fetch(e) => write!(f, "{}", e),
            ScreenError::NothingSelected => f.write_str("no record is selected"),
            ScreenError::NotLoaded(id) => write!(f, "record {} is not loaded", id),
            ScreenError::PartialDelete { questions, answers } => {
                f.write_str("delete-all did not complete")?;
                if let Some(e) = questions {
                    write!(f, "; questions: {}", e)?;
                }
                if let Some(e) = answers {
                    write!(f, "; answers: {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ScreenError {}

impl From<FetchError> for ScreenError {
    fn from(err: FetchError) -> Self {
        ScreenError::Fetch(err)
    }
}
