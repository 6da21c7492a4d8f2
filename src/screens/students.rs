// src/screens/students.rs

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use super::{
    ScreenError,
    lifecycle::{self, Selection},
};
use crate::{
    client::Fetcher,
    engine::{Paginator, SortColumn, SortKey, Sorter, aggregate},
    models::{RosterEntry, StudentForm},
};

/// State of the students screen: the roster with derived totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentScreen {
    /// Rows in display order (sorted if a sort column is active).
    pub roster: Vec<RosterEntry>,
    pub sorter: Sorter,
    pub paginator: Paginator,
    pub draft: StudentForm,
    pub selected_id: Option<i64>,
    pub loading: bool,
}

impl Default for StudentScreen {
    fn default() -> Self {
        Self {
            roster: Vec::new(),
            sorter: Sorter::default(),
            paginator: Paginator::default(),
            draft: StudentForm::default(),
            selected_id: None,
            loading: true,
        }
    }
}

impl Selection for StudentScreen {
    fn clear_selection(&mut self) {
        self.selected_id = None;
        self.draft = StudentForm::default();
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentsSnapshot {
    pub items: Vec<RosterEntry>,
    pub sort: Option<SortKey>,
    pub draft: StudentForm,
    pub selected_id: Option<i64>,
    pub page: usize,
    pub page_count: usize,
    pub total_items: usize,
    pub loading: bool,
}

impl From<&StudentScreen> for StudentsSnapshot {
    fn from(screen: &StudentScreen) -> Self {
        Self {
            items: screen.paginator.window(&screen.roster).to_vec(),
            sort: screen.sorter.active,
            draft: screen.draft.clone(),
            selected_id: screen.selected_id,
            page: screen.paginator.page,
            page_count: screen.paginator.page_count(screen.roster.len()),
            total_items: screen.roster.len(),
            loading: screen.loading,
        }
    }
}

pub struct StudentsController {
    state: Mutex<StudentScreen>,
    fetcher: Arc<dyn Fetcher>,
}

impl StudentsController {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            state: Mutex::new(StudentScreen::default()),
            fetcher,
        }
    }

    pub async fn snapshot(&self) -> StudentsSnapshot {
        StudentsSnapshot::from(&*self.state.lock().await)
    }

    pub async fn state(&self) -> StudentScreen {
        self.state.lock().await.clone()
    }

    /// Fetches students and answers together, recomputes every total from
    /// scratch and re-applies the active sort.
    pub async fn reload(&self) -> Result<(), ScreenError> {
        self.state.lock().await.loading = true;

        let joined = tokio::try_join!(self.fetcher.list_students(), self.fetcher.list_answers());

        let mut state = self.state.lock().await;
        state.loading = false;
        match joined {
            Ok((students, answers)) => {
                tracing::info!(
                    "Reloaded {} students against {} answers",
                    students.len(),
                    answers.len()
                );
                let mut roster = aggregate::roster(&students, &answers);
                state.sorter.apply(&mut roster);
                state.roster = roster;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to reload students: {}", e);
                Err(e.into())
            }
        }
    }

    /// Loads one student from upstream into the form.
    pub async fn select(&self, id: i64) -> Result<StudentForm, ScreenError> {
        let student = self.fetcher.get_student(id).await.inspect_err(|e| {
            tracing::warn!("Failed to load student {}: {}", id, e);
        })?;
        let draft = StudentForm::from(&student);

        let mut state = self.state.lock().await;
        state.selected_id = Some(id);
        state.draft = draft.clone();
        Ok(draft)
    }

    pub async fn add(&self, form: &StudentForm) -> Result<(), ScreenError> {
        lifecycle::commit(
            &self.state,
            "Create student",
            self.fetcher.create_student(form),
            self.reload(),
        )
        .await
    }

    pub async fn update(&self, form: &StudentForm) -> Result<(), ScreenError> {
        let id = self.selected_id().await?;
        lifecycle::commit(
            &self.state,
            "Update student",
            self.fetcher.update_student(id, form),
            self.reload(),
        )
        .await
    }

    pub async fn delete(&self) -> Result<(), ScreenError> {
        let id = self.selected_id().await?;
        lifecycle::commit(
            &self.state,
            "Delete student",
            self.fetcher.delete_student(id),
            self.reload(),
        )
        .await
    }

    /// Toggle-sorts the roster by `column`. Totals and ids are untouched;
    /// the current page is kept.
    pub async fn sort_by(&self, column: SortColumn) -> SortKey {
        let mut state = self.state.lock().await;
        let key = state.sorter.select(column);
        let sorter = state.sorter;
        sorter.apply(&mut state.roster);
        key
    }

    pub async fn next_page(&self) -> usize {
        let mut state = self.state.lock().await;
        let total = state.roster.len();
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
