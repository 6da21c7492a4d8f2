use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    client::Fetcher,
    screens::{QuestionsController, StudentsController},
};

/// One controller per screen, all sharing a single upstream client.
#[derive(Clone)]
pub struct AppState {
    pub questions: Arc<QuestionsController>,
    pub students: Arc<StudentsController>,
}

impl AppState {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            questions: Arc::new(QuestionsController::new(fetcher.clone())),
            students: Arc::new(StudentsController::new(fetcher)),
        }
    }
}

impl FromRef<AppState> for Arc<QuestionsController> {
    fn from_ref(state: &AppState) -> Self {
        state.questions.clone()
    }
}

impl FromRef<AppState> for Arc<StudentsController> {
    fn from_ref(state: &AppState) -> Self {
        state.students.clone()
    }
}
