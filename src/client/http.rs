// src/client/http.rs

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use super::{FetchError, FetchResult, Fetcher, Resource};
use crate::{
    config::Config,
    models::{Answer, Question, QuestionForm, Student, StudentForm},
};

/// [`Fetcher`] backed by `reqwest`, talking JSON to the upstream services.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    questions_api: Url,
    students_api: Url,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.upstream_timeout).build()?;
        Ok(Self {
            client,
            questions_api: config.questions_api.clone(),
            students_api: config.students_api.clone(),
        })
    }

    fn collection_url(&self, resource: Resource) -> String {
        let (base, path) = match resource {
            Resource::Questions => (&self.questions_api, "pergunta"),
            Resource::Answers => (&self.questions_api, "resposta"),
            Resource::Students => (&self.students_api, "alunos"),
        };
        format!("{}/{}", base.as_str().trim_end_matches('/'), path)
    }

    fn item_url(&self, resource: Resource, id: i64) -> String {
        format!("{}/{}", self.collection_url(resource), id)
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
    }

    async fn send(&self, resource: Resource, request: RequestBuilder) -> FetchResult<Response> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!("Upstream {} request failed: {}", resource, e);
            FetchError::Transport {
                resource,
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Upstream {} answered {}", resource, status);
            return Err(FetchError::Status {
                resource,
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, resource: Resource, url: String) -> FetchResult<T> {
        let response = self.send(resource, self.request(Method::GET, url)).await?;
        response.json::<T>().await.map_err(|e| FetchError::Decode {
            resource,
            message: e.to_string(),
        })
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        resource: Resource,
        method: Method,
        url: String,
        body: &B,
    ) -> FetchResult<()> {
        self.send(resource, self.request(method, url).json(body)).await?;
        Ok(())
    }

    async fn delete(&self, resource: Resource, url: String) -> FetchResult<()> {
        self.send(resource, self.request(Method::DELETE, url)).await?;
        Ok(())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn list_questions(&self) -> FetchResult<Vec<Question>> {
        self.get_json(Resource::Questions, self.collection_url(Resource::Questions))
            .await
    }

    async fn get_question(&self, id: i64) -> FetchResult<Question> {
        self.get_json(Resource::Questions, self.item_url(Resource::Questions, id))
            .await
    }

    async fn create_question(&self, form: &QuestionForm) -> FetchResult<()> {
        let url = self.collection_url(Resource::Questions);
        self.send_json(Resource::Questions, Method::POST, url, form).await
    }

    async fn update_question(&self, id: i64, form: &QuestionForm) -> FetchResult<()> {
        let url = self.item_url(Resource::Questions, id);
        self.send_json(Resource::Questions, Method::PUT, url, form).await
    }

    async fn delete_question(&self, id: i64) -> FetchResult<()> {
        self.delete(Resource::Questions, self.item_url(Resource::Questions, id))
            .await
    }

    async fn delete_all_questions(&self) -> FetchResult<()> {
        self.delete(Resource::Questions, self.collection_url(Resource::Questions))
            .await
    }

    async fn list_answers(&self) -> FetchResult<Vec<Answer>> {
        self.get_json(Resource::Answers, self.collection_url(Resource::Answers))
            .await
    }

    async fn delete_all_answers(&self) -> FetchResult<()> {
        self.delete(Resource::Answers, self.collection_url(Resource::Answers))
            .await
    }

    async fn list_students(&self) -> FetchResult<Vec<Student>> {
        self.get_json(Resource::Students, self.collection_url(Resource::Students))
            .await
    }

    async fn get_student(&self, id: i64) -> FetchResult<Student> {
        self.get_json(Resource::Students, self.item_url(Resource::Students, id))
            .await
    }

    async fn create_student(&self, form: &StudentForm) -> FetchResult<()> {
        let url = self.collection_url(Resource::Students);
        self.send_json(Resource::Students, Method::POST, url, form).await
    }

    async fn update_student(&self, id: i64, form: &StudentForm) -> FetchResult<()> {
        let url = self.item_url(Resource::Students, id);
        self.send_json(Resource::Students, Method::PUT, url, form).await
    }

    async fn delete_student(&self, id: i64) -> FetchResult<()> {
        self.delete(Resource::Students, self.item_url(Resource::Students, id))
            .await
    }
}
