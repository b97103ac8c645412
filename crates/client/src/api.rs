//! HTTP client for the registrar API.
//!
//! Wraps the `/api` surface with [`reqwest`]: login, entity CRUD, the
//! scoped program lookup, and the photo endpoints. Error bodies are
//! `{message, code}`; the message is what the UI shows, and duplicate-key
//! rejections are recognized by their message so they surface as the same
//! field error the local guard produces.

use async_trait::async_trait;
use regis_core::dedup::is_duplicate_message;
use regis_core::listing::PageMeta;
use regis_core::types::DbId;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cascade::ProgramSource;
use crate::fetcher::{ListPage, ListSource};
use crate::models::{College, Program, Student, StudentPayload, UserProfile};
use crate::photo::{AssetStore, StagedFile, StudentWriter, UploadedPhoto};
use crate::query::Descriptor;
use crate::session::Session;

/// Errors from the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (refused, DNS, timeout).
    #[error("connection failed: {0}")]
    Connection(String),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// No session is attached and the endpoint requires one.
    #[error("not signed in")]
    Unauthenticated,
}

impl ApiError {
    /// Message suitable for direct display.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Connection(_) => {
                "Unable to reach the server. Check your connection and try again.".to_string()
            }
            ApiError::Api { message, .. } => message.clone(),
            ApiError::Decode(_) => "The server returned an unexpected response.".to_string(),
            ApiError::Unauthenticated => "Your session has expired. Please log in again.".to_string(),
        }
    }

    /// Whether this is a server-confirmed uniqueness violation.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, ApiError::Api { message, .. } if is_duplicate_message(message))
    }

    /// Whether the session should be dropped and login shown.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Api { status: 401, .. } | ApiError::Unauthenticated)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Connection(err.to_string())
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct LoginResponse {
    token: String,
    user: UserProfile,
}

/// Client for one API origin. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    /// * `base_url` - origin without the `/api` prefix, e.g.
    ///   `http://localhost:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Attach a session; subsequent requests carry its bearer token.
    pub fn set_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    /// Drop the session (logout or 401).
    pub fn clear_session(&mut self) {
        self.session = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, ApiError> {
        let session = self.session.as_ref().ok_or(ApiError::Unauthenticated)?;
        Ok(request.header(reqwest::header::AUTHORIZATION, session.bearer()))
    }

    /// Authenticate and return the session. The caller decides whether to
    /// attach it via [`set_session`](Self::set_session).
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        let body: LoginResponse = parse_json(response).await?;
        Ok(Session::new(body.token, body.user))
    }

    // ---- listing ----

    /// Fetch one page of an entity listing. The envelope is keyed by the
    /// plural entity name; a legacy bare-array body is tolerated by
    /// synthesizing single-page metadata client-side.
    async fn fetch_list<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
        descriptor: &Descriptor,
    ) -> Result<ListPage<T>, ApiError> {
        let request = self
            .authorized(self.client.get(self.url(path)))?
            .query(&descriptor.to_query());
        let body: serde_json::Value = parse_json(request.send().await?).await?;

        if let Some(rows) = body.as_array() {
            // Legacy unpaginated shape.
            let rows: Vec<T> = serde_json::from_value(serde_json::Value::Array(rows.clone()))
                .map_err(|e| ApiError::Decode(e.to_string()))?;
            let total = rows.len() as i64;
            let per_page = total.max(1);
            return Ok(ListPage {
                rows,
                pagination: PageMeta::compute(1, per_page, total),
            });
        }

        let rows = body
            .get(key)
            .cloned()
            .ok_or_else(|| ApiError::Decode(format!("missing '{key}' in listing body")))?;
        let rows: Vec<T> =
            serde_json::from_value(rows).map_err(|e| ApiError::Decode(e.to_string()))?;
        let pagination = body
            .get("pagination")
            .cloned()
            .ok_or_else(|| ApiError::Decode("missing 'pagination' in listing body".to_string()))?;
        let pagination: PageMeta =
            serde_json::from_value(pagination).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(ListPage { rows, pagination })
    }

    pub async fn colleges(&self, descriptor: &Descriptor) -> Result<ListPage<College>, ApiError> {
        self.fetch_list("/colleges", "colleges", descriptor).await
    }

    pub async fn programs(&self, descriptor: &Descriptor) -> Result<ListPage<Program>, ApiError> {
        self.fetch_list("/programs", "programs", descriptor).await
    }

    pub async fn students(&self, descriptor: &Descriptor) -> Result<ListPage<Student>, ApiError> {
        self.fetch_list("/students", "students", descriptor).await
    }

    // ---- writes ----

    async fn post_entity<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.authorized(self.client.post(self.url(path)))?.json(body);
        parse_json(request.send().await?).await
    }

    async fn put_entity<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.authorized(self.client.put(self.url(path)))?.json(body);
        parse_json(request.send().await?).await
    }

    async fn delete_entity(&self, path: &str) -> Result<(), ApiError> {
        let request = self.authorized(self.client.delete(self.url(path)))?;
        check_status(request.send().await?).await
    }

    pub async fn create_college(&self, body: &serde_json::Value) -> Result<College, ApiError> {
        self.post_entity("/colleges", body).await
    }

    pub async fn update_college(
        &self,
        id: DbId,
        body: &serde_json::Value,
    ) -> Result<College, ApiError> {
        self.put_entity(&format!("/colleges/{id}"), body).await
    }

    pub async fn delete_college(&self, id: DbId) -> Result<(), ApiError> {
        self.delete_entity(&format!("/colleges/{id}")).await
    }

    pub async fn create_program(&self, body: &serde_json::Value) -> Result<Program, ApiError> {
        self.post_entity("/programs", body).await
    }

    pub async fn update_program(
        &self,
        id: DbId,
        body: &serde_json::Value,
    ) -> Result<Program, ApiError> {
        self.put_entity(&format!("/programs/{id}"), body).await
    }

    pub async fn delete_program(&self, id: DbId) -> Result<(), ApiError> {
        self.delete_entity(&format!("/programs/{id}")).await
    }

    pub async fn create_student(&self, payload: &StudentPayload) -> Result<Student, ApiError> {
        self.post_entity("/students", payload).await
    }

    pub async fn update_student(
        &self,
        id: &str,
        payload: &StudentPayload,
    ) -> Result<Student, ApiError> {
        self.put_entity(&format!("/students/{id}"), payload).await
    }

    pub async fn delete_student(&self, id: &str) -> Result<(), ApiError> {
        self.delete_entity(&format!("/students/{id}")).await
    }

    // ---- photo ----

    pub async fn upload_photo(&self, file: &StagedFile) -> Result<UploadedPhoto, ApiError> {
        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let request = self
            .authorized(self.client.post(self.url("/students/upload-photo")))?
            .multipart(form);
        parse_json(request.send().await?).await
    }

    pub async fn delete_photo(&self, path: &str) -> Result<(), ApiError> {
        let request = self
            .authorized(self.client.delete(self.url("/students/photo")))?
            .json(&serde_json::json!({ "path": path }));
        check_status(request.send().await?).await
    }
}

// ---- trait plumbing ----

#[async_trait]
impl ListSource<College> for ApiClient {
    async fn fetch(&self, descriptor: &Descriptor) -> Result<ListPage<College>, ApiError> {
        self.colleges(descriptor).await
    }
}

#[async_trait]
impl ListSource<Program> for ApiClient {
    async fn fetch(&self, descriptor: &Descriptor) -> Result<ListPage<Program>, ApiError> {
        self.programs(descriptor).await
    }
}

#[async_trait]
impl ListSource<Student> for ApiClient {
    async fn fetch(&self, descriptor: &Descriptor) -> Result<ListPage<Student>, ApiError> {
        self.students(descriptor).await
    }
}

#[async_trait]
impl ProgramSource for ApiClient {
    async fn programs_for_college(&self, college_id: DbId) -> Result<Vec<Program>, ApiError> {
        let request = self.authorized(
            self.client
                .get(self.url(&format!("/students/programs/{college_id}"))),
        )?;
        parse_json(request.send().await?).await
    }
}

#[async_trait]
impl StudentWriter for ApiClient {
    async fn create(&self, payload: &StudentPayload) -> Result<Student, ApiError> {
        self.create_student(payload).await
    }

    async fn update(&self, id: &str, payload: &StudentPayload) -> Result<Student, ApiError> {
        self.update_student(id, payload).await
    }
}

#[async_trait]
impl AssetStore for ApiClient {
    async fn upload(&self, file: &StagedFile) -> Result<UploadedPhoto, ApiError> {
        self.upload_photo(file).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.delete_photo(path).await
    }
}

// ---- response plumbing ----

/// Turn a non-2xx response into [`ApiError::Api`], extracting the
/// `{message}` body when present.
async fn error_from(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let message = match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {status}")),
        Err(_) => format!("Request failed with status {status}"),
    };
    ApiError::Api { status, message }
}

async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    if !response.status().is_success() {
        return Err(error_from(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
    if !response.status().is_success() {
        return Err(error_from(response).await);
    }
    Ok(())
}
