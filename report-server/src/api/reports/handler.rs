//! Report API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::report::{
    Actor, ListReportsQuery, ReportDraft, ReportView, SubmitReportRequest, SubmitReportResponse,
    UpdateReportRequest, ViewerRole,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::reports::{ReportFilter, projection};
use crate::utils::validation::{
    MAX_ATTACHMENT_REF_LEN, MAX_ATTACHMENTS, MAX_DEPARTMENT_LEN, MAX_DESCRIPTION_LEN,
    MAX_LOCATION_LEN, MAX_TITLE_LEN, validate_required_text, validate_text_len,
};
use crate::utils::{AppError, AppResult};

/// POST /api/reports - 匿名提交报告
///
/// Returns only the tracking handle. Geocoding runs with a bounded
/// timeout and degrades silently; the submission never waits on it
/// failing loudly.
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<SubmitReportRequest>,
) -> AppResult<(StatusCode, Json<SubmitReportResponse>)> {
    validate_required_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validate_required_text(&payload.description, "description", MAX_DESCRIPTION_LEN)?;
    validate_text_len(&payload.location, "location", MAX_LOCATION_LEN)?;
    if payload.attachments.len() > MAX_ATTACHMENTS {
        return Err(AppError::validation(format!(
            "too many attachments ({}, max {MAX_ATTACHMENTS})",
            payload.attachments.len()
        )));
    }
    for reference in &payload.attachments {
        validate_required_text(reference, "attachment reference", MAX_ATTACHMENT_REF_LEN)?;
    }

    // Client-supplied coordinates win; otherwise try to resolve the free
    // text. Either way the submission proceeds without them.
    let coordinates = match payload.coordinates {
        Some(coordinates) => Some(coordinates),
        None => state.geocoding.resolve(&payload.location).await,
    };

    let report = state.store.create(ReportDraft {
        title: payload.title,
        description: payload.description,
        report_type: payload.report_type,
        location: payload.location,
        coordinates,
        attachments: payload.attachments,
    })?;

    tracing::info!(report_type = %report.report_type, "report submitted");

    Ok((
        StatusCode::CREATED,
        Json(SubmitReportResponse {
            public_id: report.public_id,
        }),
    ))
}

/// GET /api/reports/:public_id/details - 匿名追踪
///
/// Exact-match lookup only. Unknown and malformed handles produce the
/// same 404 body.
pub async fn track(
    State(state): State<ServerState>,
    Path(public_id): Path<String>,
) -> AppResult<Json<ReportView>> {
    let report = state
        .store
        .get_by_public_id(&public_id)?
        .ok_or_else(|| AppError::not_found("Report not found"))?;
    let timeline = state.store.timeline(&report.internal_id)?;

    Ok(Json(projection::project(
        &report,
        &timeline,
        ViewerRole::Anonymous,
    )))
}

/// GET /api/reports?status=&type= - 调查员列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListReportsQuery>,
) -> AppResult<Json<Vec<ReportView>>> {
    let filter = ReportFilter {
        status: query.status,
        report_type: query.report_type,
    };

    let reports = state.query.list(&filter)?;
    let mut views = Vec::with_capacity(reports.len());
    for report in reports {
        let timeline = state.store.timeline(&report.internal_id)?;
        views.push(projection::project(
            &report,
            &timeline,
            ViewerRole::Investigator,
        ));
    }

    Ok(Json(views))
}

/// GET /api/reports/id/:internal_id - 调查员单条查询
pub async fn get_by_internal_id(
    State(state): State<ServerState>,
    Path(internal_id): Path<String>,
) -> AppResult<Json<ReportView>> {
    let report = state
        .store
        .get_by_internal_id(&internal_id)?
        .ok_or_else(|| AppError::not_found("Report not found"))?;
    let timeline = state.store.timeline(&report.internal_id)?;

    Ok(Json(projection::project(
        &report,
        &timeline,
        ViewerRole::Investigator,
    )))
}

/// PATCH /api/reports/:internal_id - 调查员更新状态/分析
///
/// Status and analysis changes are each applied as their own versioned
/// mutation (status first); the response carries the final state and
/// version so the client never diverges.
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(internal_id): Path<String>,
    Json(payload): Json<UpdateReportRequest>,
) -> AppResult<Json<ReportView>> {
    if let Some(analysis) = &payload.analysis {
        validate_required_text(&analysis.department, "department", MAX_DEPARTMENT_LEN)?;
    }

    let actor = Actor::Investigator(user.name.clone());

    let mut report = match payload.status {
        Some(target) => Some(state.lifecycle.transition(
            &internal_id,
            payload.expected_version,
            target,
            actor.clone(),
        )?),
        None => None,
    };

    if let Some(analysis) = payload.analysis {
        let expected_version = report
            .as_ref()
            .map_or(payload.expected_version, |r| r.version);
        report = Some(state.lifecycle.set_analysis(
            &internal_id,
            expected_version,
            analysis,
            actor,
        )?);
    }

    let Some(report) = report else {
        return Err(AppError::validation(
            "nothing to update: provide status and/or analysis",
        ));
    };

    let timeline = state.store.timeline(&report.internal_id)?;
    Ok(Json(projection::project(
        &report,
        &timeline,
        ViewerRole::Investigator,
    )))
}
