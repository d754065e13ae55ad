use crate::dates::{config_date_matches, pickup_local_day};
use crate::models::{DeviceSummary, PickupView, RawRecord, RecordKind};
use chrono::NaiveDate;
use std::collections::HashMap;

const UNKNOWN_DEVICE_ID: &str = "unknown";
const UNKNOWN_DEVICE_NAME: &str = "Unknown Device";

/// Sentinel the upstream uses for "no value" in free-text fields.
const EMPTY_SENTINEL: &str = "-";

/// Build one summary per device from a day's worth of raw records.
///
/// Records split into configuration rows (have `date`) and pickup rows
/// (have `dateTime`). Configuration fields are merged first-wins, and only
/// from rows whose date names the selected day. Pickups count only when
/// their timestamp lands on the selected local day; the API routinely
/// returns a wider window than asked for, so nothing but the timestamp is
/// trusted. Devices with no pickups and no matching configuration are
/// dropped. Output order is first appearance in the input.
pub fn aggregate(records: &[RawRecord], selected: NaiveDate) -> Vec<DeviceSummary> {
    let mut devices: Vec<DeviceSummary> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let device_id = record
            .device_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(UNKNOWN_DEVICE_ID)
            .to_string();

        let slot = *index.entry(device_id.clone()).or_insert_with(|| {
            devices.push(DeviceSummary::new(device_id));
            devices.len() - 1
        });
        let summary = &mut devices[slot];

        if summary.device_name.is_empty() {
            if let Some(name) = meaningful(record.device_name.as_deref()) {
                summary.device_name = name.to_string();
            }
        }

        match record.kind() {
            RecordKind::Configuration => apply_configuration(summary, record, selected),
            RecordKind::Pickup => apply_pickup(summary, record, selected),
            RecordKind::Other => {}
        }
    }

    devices.retain(|summary| summary.total_pickups > 0 || summary.has_config_for_selected_date);

    for summary in &mut devices {
        if summary.device_name.is_empty() {
            summary.device_name = UNKNOWN_DEVICE_NAME.to_string();
        }
        summary.rfid_percentage = percentage(summary.with_rfid, summary.total_pickups);
        summary.is_handheld_reader = is_handheld_reader(&summary.device_name);
    }

    devices
}

fn apply_configuration(summary: &mut DeviceSummary, record: &RawRecord, selected: NaiveDate) {
    let Some(date) = record.date.as_deref() else {
        return;
    };
    if !config_date_matches(date, selected) {
        return;
    }

    summary.has_config_for_selected_date = true;
    set_if_unset(&mut summary.responsible_person, record.zaduzio.as_deref());
    set_if_unset(&mut summary.reg_oznaka, record.reg_oznaka.as_deref());
    set_if_unset(&mut summary.napomena, record.napomena.as_deref());
    set_if_unset(&mut summary.config_record_id, record.record_id.as_deref());
    if summary.config_date.is_none() {
        summary.config_date = Some(date.trim().to_string());
    }
}

fn apply_pickup(summary: &mut DeviceSummary, record: &RawRecord, selected: NaiveDate) {
    let Some(date_time) = record.date_time.as_deref() else {
        return;
    };
    // Unreadable timestamps drop the record from this day, silently.
    if pickup_local_day(date_time) != Some(selected) {
        return;
    }

    summary.total_pickups += 1;
    if meaningful(record.rfid_value.as_deref()).is_some() {
        summary.with_rfid += 1;
    } else {
        summary.without_rfid += 1;
    }
    summary.pickups.push(PickupView::from_record(record));
}

/// First-wins merge: a later record never overwrites a field an earlier
/// matching record already filled.
fn set_if_unset(slot: &mut Option<String>, value: Option<&str>) {
    if slot.is_none() {
        if let Some(value) = meaningful(value) {
            *slot = Some(value.to_string());
        }
    }
}

/// Trimmed, non-empty, and not the `-` sentinel.
fn meaningful(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != EMPTY_SENTINEL)
}

fn percentage(part: u32, total: u32) -> u32 {
    if total == 0 {
        0
    } else {
        (f64::from(part) / f64::from(total) * 100.0).round() as u32
    }
}

fn is_handheld_reader(device_name: &str) -> bool {
    let name = device_name.to_lowercase();
    name.contains("ručni čitač") || name.contains("rucni citac")
}
