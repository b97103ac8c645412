//! Two-phase photo attachment workflow.
//!
//! The entity write and the binary write are decoupled: the student record
//! is written first, then the staged file is uploaded, then a second update
//! attaches the storage path. A failed attach triggers a compensating
//! delete of the just-uploaded object so no orphan accumulates in storage;
//! the entity write itself is never rolled back.

use async_trait::async_trait;
use regis_core::photo::{public_url, validate_photo_file};

use crate::api::ApiError;
use crate::models::{Student, StudentPayload};

/// A file the user picked but that has not been uploaded yet.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Result of a successful upload, decoded from the upload endpoint's body.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct UploadedPhoto {
    pub path: String,
    pub public_url: String,
}

/// Entity write operations the workflow sequences.
#[async_trait]
pub trait StudentWriter {
    async fn create(&self, payload: &StudentPayload) -> Result<Student, ApiError>;
    async fn update(&self, id: &str, payload: &StudentPayload) -> Result<Student, ApiError>;
}

/// Binary asset operations the workflow sequences.
#[async_trait]
pub trait AssetStore {
    async fn upload(&self, file: &StagedFile) -> Result<UploadedPhoto, ApiError>;
    /// Idempotent; used both for compensation and for replaced-photo
    /// cleanup.
    async fn delete(&self, path: &str) -> Result<(), ApiError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// File failed validation; nothing was written.
    #[error("{0}")]
    Validation(String),

    /// The entity write itself failed; nothing was written.
    #[error(transparent)]
    Entity(ApiError),

    /// The entity was written but the photo step failed. The uploaded
    /// object (if any) has been deleted; the caller keeps the form open so
    /// the user can retry the photo.
    #[error("photo attachment failed: {error}")]
    Attach { entity: Student, error: ApiError },
}

/// What the UI must do when the user asks to remove the photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalAction {
    /// Only a staged (never-uploaded) file exists; just drop it.
    DiscardStaged,
    /// A persisted photo would be deleted; confirm with the user first.
    NeedsConfirmation,
}

/// Photo state carried by the student form between open and submit.
#[derive(Debug, Clone, Default)]
pub struct PhotoDraft {
    pub staged: Option<StagedFile>,
    pub removal_requested: bool,
    /// Storage path currently persisted on the student, if any.
    pub current: Option<String>,
}

impl PhotoDraft {
    pub fn for_student(student: &Student) -> Self {
        Self {
            current: student.photo.clone(),
            ..Self::default()
        }
    }

    /// Validate and stage a picked file. Staging cancels any pending
    /// removal request.
    pub fn stage(&mut self, file: StagedFile) -> Result<(), SubmitError> {
        validate_photo_file(&file.mime, file.bytes.len()).map_err(SubmitError::Validation)?;
        self.staged = Some(file);
        self.removal_requested = false;
        Ok(())
    }

    /// Handle a removal request. A staged-only file is dropped immediately;
    /// removing a persisted photo needs confirmation before
    /// [`confirm_removal`](Self::confirm_removal) marks it.
    pub fn request_removal(&mut self) -> RemovalAction {
        if self.staged.is_some() {
            self.staged = None;
            if self.current.is_none() {
                return RemovalAction::DiscardStaged;
            }
        }
        RemovalAction::NeedsConfirmation
    }

    pub fn confirm_removal(&mut self) {
        self.staged = None;
        self.removal_requested = true;
    }

    /// URL to render right now: staged files are previewed by the embedder,
    /// otherwise the persisted photo or the default avatar.
    pub fn display_url(&self, url_prefix: &str) -> String {
        let path = if self.removal_requested {
            None
        } else {
            self.current.as_deref()
        };
        public_url(url_prefix, path)
    }
}

/// Create a student, then upload/attach the staged photo if one exists.
pub async fn submit_create<W, A>(
    writer: &W,
    assets: &A,
    payload: StudentPayload,
    draft: &PhotoDraft,
) -> Result<Student, SubmitError>
where
    W: StudentWriter,
    A: AssetStore,
{
    if let Some(file) = &draft.staged {
        validate_photo_file(&file.mime, file.bytes.len()).map_err(SubmitError::Validation)?;
    }

    let entity = writer.create(&payload).await.map_err(SubmitError::Entity)?;

    match &draft.staged {
        Some(file) => attach(writer, assets, entity, file, None).await,
        None => Ok(entity),
    }
}

/// Update a student, then run the photo step: attach a staged file
/// (deleting the replaced photo last), or clear the reference when removal
/// was confirmed.
pub async fn submit_update<W, A>(
    writer: &W,
    assets: &A,
    id: &str,
    mut payload: StudentPayload,
    draft: &PhotoDraft,
) -> Result<Student, SubmitError>
where
    W: StudentWriter,
    A: AssetStore,
{
    if let Some(file) = &draft.staged {
        validate_photo_file(&file.mime, file.bytes.len()).map_err(SubmitError::Validation)?;
    }

    if draft.removal_requested && draft.staged.is_none() {
        // The empty string is the clear-reference sentinel; the server
        // best-effort deletes the stored object.
        payload.photo = Some(String::new());
    }

    let entity = writer
        .update(id, &payload)
        .await
        .map_err(SubmitError::Entity)?;

    match &draft.staged {
        Some(file) => attach(writer, assets, entity, file, draft.current.as_deref()).await,
        None => Ok(entity),
    }
}

/// Upload and attach, compensating on attach failure. When `replacing` is
/// set, the old object is deleted only after the entity points at the new
/// one, so the entity never references a deleted object.
async fn attach<W, A>(
    writer: &W,
    assets: &A,
    entity: Student,
    file: &StagedFile,
    replacing: Option<&str>,
) -> Result<Student, SubmitError>
where
    W: StudentWriter,
    A: AssetStore,
{
    let uploaded = match assets.upload(file).await {
        Ok(uploaded) => uploaded,
        Err(error) => return Err(SubmitError::Attach { entity, error }),
    };

    let attach_payload = StudentPayload {
        photo: Some(uploaded.path.clone()),
        ..StudentPayload::default()
    };
    match writer.update(&entity.id, &attach_payload).await {
        Ok(updated) => {
            if let Some(old) = replacing {
                if old != uploaded.path {
                    if let Err(error) = assets.delete(old).await {
                        tracing::warn!(path = old, %error, "Failed to delete replaced photo");
                    }
                }
            }
            Ok(updated)
        }
        Err(error) => {
            if let Err(cleanup) = assets.delete(&uploaded.path).await {
                tracing::warn!(
                    path = %uploaded.path,
                    %cleanup,
                    "Compensating photo delete failed"
                );
            }
            Err(SubmitError::Attach { entity, error })
        }
    }
}
