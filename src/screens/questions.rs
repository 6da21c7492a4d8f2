// src/screens/questions.rs

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use super::{
    ScreenError,
    lifecycle::{self, Selection},
};
use crate::{
    client::Fetcher,
    engine::{PairingStrategy, Paginator, Totals, aggregate, reconcile},
    models::{Answer, QuestionDraft, QuestionForm, QuestionView},
};

/// State of the questions & answers screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionScreen {
    pub questions: Vec<QuestionView>,
    pub answers: Vec<Answer>,
    pub totals: Totals,
    pub draft: QuestionDraft,
    pub selected_id: Option<i64>,
    pub paginator: Paginator,
    /// When set, answers are paired per student instead of by position.
    pub student_filter: Option<i64>,
    pub loading: bool,
}

impl Default for QuestionScreen {
    fn default() -> Self {
        Self {
            questions: Vec::new(),
            answers: Vec::new(),
            totals: Totals::default(),
            draft: QuestionDraft::default(),
            selected_id: None,
            paginator: Paginator::default(),
            student_filter: None,
            // The screen loads on open.
            loading: true,
        }
    }
}

impl Selection for QuestionScreen {
    fn clear_selection(&mut self) {
        self.selected_id = None;
        self.draft = QuestionDraft::default();
    }
}

/// Rendered view of [`QuestionScreen`]: only the current page of questions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionsSnapshot {
    pub items: Vec<QuestionView>,
    pub totals: Totals,
    pub draft: QuestionDraft,
    pub selected_id: Option<i64>,
    pub page: usize,
    pub page_count: usize,
    pub total_items: usize,
    pub strategy: PairingStrategy,
    pub loading: bool,
}

impl From<&QuestionScreen> for QuestionsSnapshot {
    fn from(screen: &QuestionScreen) -> Self {
        Self {
            items: screen.paginator.window(&screen.questions).to_vec(),
            totals: screen.totals,
            draft: screen.draft.clone(),
            selected_id: screen.selected_id,
            page: screen.paginator.page,
            page_count: screen.paginator.page_count(screen.questions.len()),
            total_items: screen.questions.len(),
            strategy: PairingStrategy::for_filter(screen.student_filter),
            loading: screen.loading,
        }
    }
}

pub struct QuestionsController {
    state: Mutex<QuestionScreen>,
    fetcher: Arc<dyn Fetcher>,
}

impl QuestionsController {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            state: Mutex::new(QuestionScreen::default()),
            fetcher,
        }
    }

    pub async fn snapshot(&self) -> QuestionsSnapshot {
        QuestionsSnapshot::from(&*self.state.lock().await)
    }

    /// Copy of the full state record.
    pub async fn state(&self) -> QuestionScreen {
        self.state.lock().await.clone()
    }

    /// Fetches questions and answers together and rebuilds the views.
    ///
    /// Both fetches must succeed; on any failure the previous views stay
    /// as they were and the error is returned.
    pub async fn reload(&self) -> Result<(), ScreenError> {
        let strategy = {
            let mut state = self.state.lock().await;
            state.loading = true;
            PairingStrategy::for_filter(state.student_filter)
        };

        let joined = tokio::try_join!(self.fetcher.list_questions(), self.fetcher.list_answers());

        let mut state = self.state.lock().await;
        state.loading = false;
        match joined {
            Ok((questions, answers)) => {
                tracing::info!(
                    "Reloaded {} questions and {} answers ({:?})",
                    questions.len(),
                    answers.len(),
                    strategy
                );
                state.questions = reconcile(questions, &answers, strategy);
                state.totals = aggregate::whole_set(&answers);
                state.answers = answers;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to reload questions and answers: {}", e);
                Err(e.into())
            }
        }
    }

    /// Switches pairing to a single student's answers (or back to positional)
    /// and reloads.
    pub async fn set_student_filter(&self, student_id: Option<i64>) -> Result<(), ScreenError> {
        self.state.lock().await.student_filter = student_id;
        self.reload().await
    }

    /// Populates the form from a question in the loaded list.
    pub async fn select(&self, id: i64) -> Result<QuestionDraft, ScreenError> {
        let mut state = self.state.lock().await;
        let draft = state
            .questions
            .iter()
            .find(|view| view.question.id == id)
            .map(|view| QuestionDraft::from(&view.question))
            .ok_or(ScreenError::NotLoaded(id))?;
        state.selected_id = Some(id);
        state.draft = draft.clone();
        Ok(draft)
    }

    pub async fn add(&self, form: &QuestionForm) -> Result<(), ScreenError> {
        lifecycle::commit(
            &self.state,
            "Create question",
            self.fetcher.create_question(form),
            self.reload(),
        )
        .await
    }

    pub async fn update(&self, form: &QuestionForm) -> Result<(), ScreenError> {
        let id = self.selected_id().await?;
        lifecycle::commit(
            &self.state,
            "Update question",
            self.fetcher.update_question(id, form),
            self.reload(),
        )
        .await
    }

    pub async fn delete(&self) -> Result<(), ScreenError> {
        let id = self.selected_id().await?;
        lifecycle::commit(
            &self.state,
            "Delete question",
            self.fetcher.delete_question(id),
            self.reload(),
        )
        .await
    }

    /// Deletes every question, then every answer, as two independent calls.
    ///
    /// Local lists are cleared whatever the outcome. A failure of either call
    /// is reported but not compensated: if questions went away and answers did
    /// not, upstream stays that way.
    pub async fn delete_all(&self) -> Result<(), ScreenError> {
        let questions = self.fetcher.delete_all_questions().await;
        let answers = self.fetcher.delete_all_answers().await;

        {
            let mut state = self.state.lock().await;
            state.questions.clear();
            state.answers.clear();
            state.totals = Totals::default();
        }

        match (questions, answers) {
            (Ok(()), Ok(())) => {
                tracing::info!("Deleted all questions and answers");
                Ok(())
            }
            (questions, answers) => {
                let err = ScreenError::PartialDelete {
                    questions: questions.err(),
                    answers: answers.err(),
                };
                tracing::warn!("{}", err);
                Err(err)
            }
        }
    }

    pub async fn next_page(&self) -> usize {
        let mut state = self.state.lock().await;
        let total = state.questions.len();
        state.paginator.next(total);
        state.paginator.page
    }

    pub async fn previous_page(&self) -> usize {
        let mut state = self.state.lock().await;
        state.paginator.previous();
        state.paginator.page
    }

    async fn selected_id(&self) -> Result<i64, ScreenError> {
        self.state
            .lock()
            .await
            .selected_id
            .ok_or(ScreenError::NothingSelected)
    }
}
