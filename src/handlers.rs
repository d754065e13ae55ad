use crate::aggregate::aggregate;
use crate::dates;
use crate::errors::AppError;
use crate::models::{DayQuery, DayResponse, DaySnapshot, DeviceSummary, EditRequest};
use crate::reconcile::{apply_persisted, plan_persist, EditFields};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use chrono::Local;
use tracing::info;

pub async fn index() -> Html<String> {
    let today = dates::to_picker_date(Local::now().date_naive());
    Html(render_index(&today))
}

/// Load one day: fetch, aggregate, replace the snapshot whole. The fetch
/// runs outside the snapshot lock; a slower earlier load that resolves
/// after a newer one simply overwrites it, which matches how the page is
/// used (one operator, one date at a time).
pub async fn get_day(
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> Result<Json<DayResponse>, AppError> {
    let date = dates::parse_picker_date(&query.date)
        .ok_or_else(|| AppError::bad_request("date must be YYYY-MM-DD"))?;

    let records = state.upstream.fetch_day(date).await?;
    let devices = aggregate(&records, date);
    info!(
        "loaded {}: {} records, {} devices",
        query.date,
        records.len(),
        devices.len()
    );

    let mut snapshot = state.snapshot.lock().await;
    *snapshot = Some(DaySnapshot {
        date,
        devices: devices.clone(),
    });

    Ok(Json(DayResponse {
        date: dates::to_picker_date(date),
        devices,
    }))
}

/// Save edited fields for one device. The in-memory summary changes only
/// after the upstream acknowledged the write; on failure the snapshot is
/// untouched and the operator can retry.
pub async fn save_edit(
    State(state): State<AppState>,
    Json(request): Json<EditRequest>,
) -> Result<Json<DeviceSummary>, AppError> {
    let edits = EditFields {
        responsible_person: request.responsible_person,
        reg_oznaka: request.reg_oznaka,
        napomena: request.napomena,
    };

    let mut snapshot = state.snapshot.lock().await;
    let snapshot = snapshot
        .as_mut()
        .ok_or_else(|| AppError::conflict("no day loaded yet"))?;
    let date = snapshot.date;
    let summary = snapshot
        .devices
        .iter_mut()
        .find(|device| device.device_id == request.device_id)
        .ok_or_else(|| AppError::not_found("unknown device"))?;

    let persist = plan_persist(summary, &edits, date);
    let outcome = state.upstream.persist(&persist).await?;
    apply_persisted(summary, &persist, &outcome);
    info!(
        "saved {:?} for device {}",
        persist.method, request.device_id
    );

    Ok(Json(summary.clone()))
}
