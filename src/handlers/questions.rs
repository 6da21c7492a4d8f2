// src/handlers/questions.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::{error::AppError, models::QuestionForm, screens::QuestionsController};

/// Current page of the questions screen plus totals, form and selection.
pub async fn get_screen(
    State(screen): State<Arc<QuestionsController>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(screen.snapshot().await))
}

/// Re-fetches questions and answers ("Gerar Perguntas/Respostas").
pub async fn reload(
    State(screen): State<Arc<QuestionsController>>,
) -> Result<impl IntoResponse, AppError> {
    screen.reload().await?;
    Ok(Json(screen.snapshot().await))
}

/// Body for switching the pairing strategy.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    /// `null` goes back to positional pairing.
    pub student_id: Option<i64>,
}

pub async fn set_filter(
    State(screen): State<Arc<QuestionsController>>,
    Json(req): Json<FilterRequest>,
) -> Result<impl IntoResponse, AppError> {
    screen.set_student_filter(req.student_id).await?;
    Ok(Json(screen.snapshot().await))
}

/// Selects a loaded question and returns the populated form.
pub async fn select(
    State(screen): State<Arc<QuestionsController>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let draft = screen.select(id).await?;
    Ok(Json(draft))
}

pub async fn create(
    State(screen): State<Arc<QuestionsController>>,
    Json(payload): Json<QuestionForm>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    screen.add(&payload).await?;
    Ok((StatusCode::CREATED, Json(screen.snapshot().await)))
}

/// Updates the selected question.
pub async fn update_selected(
    State(screen): State<Arc<QuestionsController>>,
    Json(payload): Json<QuestionForm>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    screen.update(&payload).await?;
    Ok(Json(screen.snapshot().await))
}

/// Deletes the selected question.
pub async fn delete_selected(
    State(screen): State<Arc<QuestionsController>>,
) -> Result<impl IntoResponse, AppError> {
    screen.delete().await?;
    Ok(Json(screen.snapshot().await))
}

/// Deletes every question and every answer upstream.
pub async fn delete_all(
    State(screen): State<Arc<QuestionsController>>,
) -> Result<impl IntoResponse, AppError> {
    screen.delete_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn next_page(
    State(screen): State<Arc<QuestionsController>>,
) -> Result<impl IntoResponse, AppError> {
    screen.next_page().await;
    Ok(Json(screen.snapshot().await))
}

pub async fn previous_page(
    State(screen): State<Arc<QuestionsController>>,
) -> Result<impl IntoResponse, AppError> {
    screen.previous_page().await;
    Ok(Json(screen.snapshot().await))
}
