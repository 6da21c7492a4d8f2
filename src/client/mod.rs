// src/client/mod.rs

//! Access to the upstream REST services.

pub mod http;

use std::fmt;

use async_trait::async_trait;

use crate::models::{Answer, Question, QuestionForm, Student, StudentForm};

pub use http::HttpFetcher;

/// Upstream collections, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Questions,
    Answers,
    Students,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resource::Questions => "questions",
            Resource::Answers => "answers",
            Resource::Students => "students",
        })
    }
}

/// Any failed upstream call. Callers do not retry or distinguish 4xx from 5xx.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Connection, timeout or other transport-level failure.
    Transport { resource: Resource, message: String },
    /// Upstream answered with a non-success status.
    Status { resource: Resource, status: u16 },
    /// Success status but a body that is not the expected JSON.
    Decode { resource: Resource, message: String },
}

impl FetchError {
    pub fn resource(&self) -> Resource {
        match self {
            FetchError::Transport { resource, .. }
            | FetchError::Status { resource, .. }
            | FetchError::Decode { resource, .. } => *resource,
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport { resource, message } => {
                write!(f, "request for {} failed: {}", resource, message)
            }
            FetchError::Status { resource, status } => {
                write!(f, "{} service answered with status {}", resource, status)
            }
            FetchError::Decode { resource, message } => {
                write!(f, "unreadable {} payload: {}", resource, message)
            }
        }
    }
}

impl std::error::Error for FetchError {}

pub type FetchResult<T> = Result<T, FetchError>;

/// Request/response primitives against the three upstream collections.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn list_questions(&self) -> FetchResult<Vec<Question>>;
    async fn get_question(&self, id: i64) -> FetchResult<Question>;
    async fn create_question(&self, form: &QuestionForm) -> FetchResult<()>;
    async fn update_question(&self, id: i64, form: &QuestionForm) -> FetchResult<()>;
    async fn delete_question(&self, id: i64) -> FetchResult<()>;
    async fn delete_all_questions(&self) -> FetchResult<()>;

    async fn list_answers(&self) -> FetchResult<Vec<Answer>>;
    async fn delete_all_answers(&self) -> FetchResult<()>;

    async fn list_students(&self) -> FetchResult<Vec<Student>>;
    async fn get_student(&self, id: i64) -> FetchResult<Student>;
    async fn create_student(&self, form: &StudentForm) -> FetchResult<()>;
    async fn update_student(&self, id: i64, form: &StudentForm) -> FetchResult<()>;
    async fn delete_student(&self, id: i64) -> FetchResult<()>;
}
