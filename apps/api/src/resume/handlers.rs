use axum::{
    extract::{Multipart, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::activity::NewResume;
use crate::models::UserIdQuery;
use crate::resume::parser::{extract_pdf_text, structure_resume};
use crate::resume::pdf::render_resume_pdf;
use crate::resume::schema::StructuredResume;
use crate::state::AppState;

const PDF_CONTENT_TYPE: &str = "application/pdf";
const UPLOAD_FIELD: &str = "file";

struct Upload {
    file_name: String,
    bytes: Vec<u8>,
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        if field.content_type() != Some(PDF_CONTENT_TYPE) {
            return Err(AppError::Validation("Only PDF files are supported".to_string()));
        }
        let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
        return Ok(Upload {
            file_name,
            bytes: bytes.to_vec(),
        });
    }
    Err(AppError::Validation("A PDF must be uploaded in the 'file' field".to_string()))
}

/// POST /resume/parse
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    multipart: Multipart,
) -> Result<Json<StructuredResume>, AppError> {
    let upload = read_upload(multipart).await?;
    info!("Parsing resume {} ({} bytes)", upload.file_name, upload.bytes.len());

    let text = extract_pdf_text(upload.bytes).await;
    if text.is_empty() {
        return Err(AppError::Validation("Could not extract text from PDF".to_string()));
    }

    let structured = match structure_resume(state.llm.as_ref(), &text).await {
        Ok(resume) => resume,
        Err(e) => {
            warn!("Resume structuring failed: {e}");
            StructuredResume::failed(e.to_string())
        }
    };

    if let (Some(store), Some(user_id)) = (state.store.as_ref(), params.user_uuid()) {
        let parsed_content = serde_json::to_value(&structured).map_err(anyhow::Error::from)?;
        let resume = NewResume {
            user_id,
            file_name: upload.file_name,
            parsed_content,
            score: 0,
        };
        match store.insert_resume(resume).await {
            Ok(()) => info!("Saved resume for user {user_id}"),
            Err(e) => warn!("Error saving resume: {e}"),
        }
    }

    Ok(Json(structured))
}

/// POST /resume/generate
pub async fn handle_generate_pdf(
    Json(resume): Json<StructuredResume>,
) -> Result<impl IntoResponse, AppError> {
    let bytes = tokio::task::spawn_blocking(move || render_resume_pdf(&resume))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF render: {e}")))?
        .map_err(anyhow::Error::from)?;

    Ok((
        [
            (header::CONTENT_TYPE, PDF_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, "attachment; filename=resume.pdf"),
        ],
        bytes,
    ))
}
