// src/handlers/students.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    engine::SortColumn, error::AppError, models::StudentForm, screens::StudentsController,
};

/// Current roster page with sort state, form and selection.
pub async fn get_screen(
    State(screen): State<Arc<StudentsController>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(screen.snapshot().await))
}

pub async fn reload(
    State(screen): State<Arc<StudentsController>>,
) -> Result<impl IntoResponse, AppError> {
    screen.reload().await?;
    Ok(Json(screen.snapshot().await))
}

/// Loads a student from upstream into the form.
pub async fn select(
    State(screen): State<Arc<StudentsController>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let draft = screen.select(id).await?;
    Ok(Json(draft))
}

pub async fn create(
    State(screen): State<Arc<StudentsController>>,
    Json(payload): Json<StudentForm>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    screen.add(&payload).await?;
    Ok((StatusCode::CREATED, Json(screen.snapshot().await)))
}

pub async fn update_selected(
    State(screen): State<Arc<StudentsController>>,
    Json(payload): Json<StudentForm>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    screen.update(&payload).await?;
    Ok(Json(screen.snapshot().await))
}

pub async fn delete_selected(
    State(screen): State<Arc<StudentsController>>,
) -> Result<impl IntoResponse, AppError> {
    screen.delete().await?;
    Ok(Json(screen.snapshot().await))
}

/// Toggle-sorts the roster by the named column.
pub async fn sort(
    State(screen): State<Arc<StudentsController>>,
    Path(column): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let column: SortColumn = column.parse().map_err(AppError::BadRequest)?;
    screen.sort_by(column).await;
    Ok(Json(screen.snapshot().await))
}

pub async fn next_page(
    State(screen): State<Arc<StudentsController>>,
) -> Result<impl IntoResponse, AppError> {
    screen.next_page().await;
    Ok(Json(screen.snapshot().await))
}

pub async fn previous_page(
    State(screen): State<Arc<StudentsController>>,
) -> Result<impl IntoResponse, AppError> {
    screen.previous_page().await;
    Ok(Json(screen.snapshot().await))
}
