use crate::dates::to_api_date;
use crate::models::{DeviceSummary, PersistPayload};
use chrono::NaiveDate;

/// Fields the operator can change for a device/day.
#[derive(Debug, Clone, Default)]
pub struct EditFields {
    pub responsible_person: Option<String>,
    pub reg_oznaka: Option<String>,
    pub napomena: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistMethod {
    Create,
    Update,
}

#[derive(Debug, Clone)]
pub struct PersistRequest {
    pub method: PersistMethod,
    pub payload: PersistPayload,
}

/// What the upstream acknowledged; a create may hand back the identifier it
/// assigned so the next save becomes an update.
#[derive(Debug, Clone, Default)]
pub struct PersistOutcome {
    pub new_id: Option<String>,
}

/// Decide create-vs-update and build the payload for one save action.
///
/// A summary that already carries a configuration record id gets an update
/// referencing that id and the record's own original date. The original
/// date is kept on purpose: the surfaced record may stem from a different
/// day than the pickups shown, and rewriting it to the selected date would
/// misattribute the edit historically. Without an id this is a create dated
/// to the selected day.
pub fn plan_persist(
    summary: &DeviceSummary,
    edits: &EditFields,
    selected: NaiveDate,
) -> PersistRequest {
    let (method, id, date) = match &summary.config_record_id {
        Some(id) => (
            PersistMethod::Update,
            Some(id.clone()),
            summary
                .config_date
                .clone()
                .unwrap_or_else(|| to_api_date(selected)),
        ),
        None => (PersistMethod::Create, None, to_api_date(selected)),
    };

    let payload = PersistPayload {
        id,
        device_name: summary.device_name.clone(),
        zaduzio: merged(&edits.responsible_person, &summary.responsible_person),
        reg_oznaka: merged(&edits.reg_oznaka, &summary.reg_oznaka),
        napomena: edits
            .napomena
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .or(summary.napomena.as_deref())
            .unwrap_or("-")
            .to_string(),
        date,
    };

    PersistRequest { method, payload }
}

/// Fold an acknowledged save back into the in-memory summary. Called only
/// after a 2xx from the upstream; a failed save must leave the snapshot
/// exactly as it was.
pub fn apply_persisted(
    summary: &mut DeviceSummary,
    request: &PersistRequest,
    outcome: &PersistOutcome,
) {
    summary.responsible_person = optional(&request.payload.zaduzio);
    summary.reg_oznaka = optional(&request.payload.reg_oznaka);
    summary.napomena = optional(&request.payload.napomena);
    summary.has_config_for_selected_date = true;

    if summary.config_date.is_none() {
        summary.config_date = Some(request.payload.date.clone());
    }
    if summary.config_record_id.is_none() {
        summary.config_record_id = outcome.new_id.clone();
    }
}

fn merged(edit: &Option<String>, current: &Option<String>) -> String {
    edit.as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or(current.as_deref())
        .unwrap_or_default()
        .to_string()
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value == "-" {
        None
    } else {
        Some(value.to_string())
    }
}
