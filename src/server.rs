// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

//! HTTP surface over the analysis pipeline.

use std::net::SocketAddr;

use axum::{
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, FromRequest, Multipart, Query, Request, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::domain::{AnalysisReport, Answer, Clause, RiskFinding};
use crate::error::{Error, Result};
use crate::services::analysis::Analyzer;
use crate::services::clauses::extract_clauses;
use crate::services::document::parse_document;
use crate::services::risks::detect_risks;

/// Upload size cap for `/parse-document`.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

// ─── Request / response types ───

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default)]
    pub contract_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct RiskRequest {
    pub text: String,
    #[serde(default)]
    pub clauses: Vec<Clause>,
}

#[derive(Debug, Deserialize)]
pub struct QaRequest {
    pub text: String,
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct ParseQuery {
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub text: String,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct ClauseListResponse {
    pub clauses: Vec<Clause>,
}

#[derive(Debug, Serialize)]
pub struct RiskListResponse {
    pub risks: Vec<RiskFinding>,
    pub risk_score: u32,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

/// Client-facing error wrapper.
pub struct ApiError(Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            Error::UnsupportedDocument { .. } | Error::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!(status = status.as_u16(), error = %self.0, "request failed");
        (
            status,
            Json(ErrorBody {
                detail: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

// ─── Handlers ───

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn analyze(
    State(analyzer): State<Analyzer>,
    Json(req): Json<AnalyzeRequest>,
) -> Json<AnalysisReport> {
    if let Some(ref id) = req.contract_id {
        info!(contract_id = %id, "analyzing contract");
    }
    Json(analyzer.analyze(&req.text).await)
}

/// Accepts a multipart form with a `file` field, or a raw body with `?filename=`.
pub async fn parse(request: Request) -> std::result::Result<Json<ParseResponse>, ApiError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    let (filename, content) = if is_multipart {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| Error::InvalidUpload(e.body_text()))?;
        read_upload(multipart).await?
    } else {
        let Query(query) = Query::<ParseQuery>::try_from_uri(request.uri())
            .map_err(|e| Error::InvalidUpload(e.body_text()))?;
        let body = Bytes::from_request(request, &())
            .await
            .map_err(|e| Error::InvalidUpload(e.body_text()))?;
        (query.filename, body)
    };

    let text = parse_document(&filename, &content)?;
    Ok(Json(ParseResponse { text, filename }))
}

async fn read_upload(mut multipart: Multipart) -> Result<(String, Bytes)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidUpload(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content = field
            .bytes()
            .await
            .map_err(|e| Error::InvalidUpload(e.body_text()))?;
        return Ok((filename, content));
    }
    Err(Error::InvalidUpload("missing 'file' field".into()))
}

pub async fn summarize(
    State(analyzer): State<Analyzer>,
    Json(req): Json<TextRequest>,
) -> Json<SummaryResponse> {
    Json(SummaryResponse {
        summary: analyzer.gateway().summarize_text(&req.text).await,
    })
}

pub async fn clauses(Json(req): Json<TextRequest>) -> Json<ClauseListResponse> {
    Json(ClauseListResponse {
        clauses: extract_clauses(&req.text),
    })
}

pub async fn risks(Json(req): Json<RiskRequest>) -> Json<RiskListResponse> {
    let (risks, risk_score) = detect_risks(&req.text, &req.clauses);
    Json(RiskListResponse { risks, risk_score })
}

pub async fn ask(State(analyzer): State<Analyzer>, Json(req): Json<QaRequest>) -> Json<Answer> {
    Json(analyzer.ask(&req.text, &req.question).await)
}

pub fn router(analyzer: Analyzer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .route(
            "/parse-document",
            post(parse).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/summarize", post(summarize))
        .route("/extract-clauses", post(clauses))
        .route("/detect-risks", post(risks))
        .route("/ask", post(ask))
        .layer(CorsLayer::permissive())
        .with_state(analyzer)
}

/// Bind and serve until Ctrl+C.
pub async fn serve(analyzer: Analyzer, host: &str, port: u16) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| Error::Server(format!("invalid bind address {host}:{port}: {e}")))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Server(format!("cannot bind {addr}: {e}")))?;

    info!(address = %addr, "starting HTTP server");

    axum::serve(listener, router(analyzer))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("shutdown signal received");
        })
        .await
        .map_err(|e| Error::Server(e.to_string()))
}
