use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One record as returned by the remote collection API. The upstream mixes
/// two kinds of record in the same `root` array: configuration rows carry a
/// `date`, pickup rows carry a `dateTime`. Everything is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "deviceId")]
    pub device_id: Option<String>,
    #[serde(rename = "deviceName")]
    pub device_name: Option<String>,
    pub date: Option<String>,
    #[serde(rename = "dateTime")]
    pub date_time: Option<String>,
    #[serde(rename = "_id")]
    pub record_id: Option<String>,
    #[serde(alias = "zadužio")]
    pub zaduzio: Option<String>,
    pub reg_oznaka: Option<String>,
    pub napomena: Option<String>,
    pub rfid_value: Option<String>,
    pub rfid_type: Option<String>,
    #[serde(rename = "collectionId")]
    pub collection_id: Option<Value>,
    #[serde(rename = "NazivObjekta")]
    pub naziv_objekta: Option<String>,
    pub real_estate_name: Option<String>,
    #[serde(rename = "SifraObjekta")]
    pub sifra_objekta: Option<Value>,
    #[serde(rename = "foreignId")]
    pub foreign_id: Option<Value>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Configuration,
    Pickup,
    Other,
}

impl RawRecord {
    pub fn kind(&self) -> RecordKind {
        if self.date.is_some() {
            RecordKind::Configuration
        } else if self.date_time.is_some() {
            RecordKind::Pickup
        } else {
            RecordKind::Other
        }
    }
}

/// A pickup as shown to the page, with the upstream's alternate field
/// spellings already resolved (`NazivObjekta`/`real_estate_name`,
/// `SifraObjekta`/`foreignId`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupView {
    pub date_time: String,
    pub rfid_value: Option<String>,
    pub rfid_type: Option<String>,
    pub collection_id: Option<String>,
    pub facility_name: Option<String>,
    pub facility_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PickupView {
    pub fn from_record(record: &RawRecord) -> Self {
        Self {
            date_time: record.date_time.clone().unwrap_or_default(),
            rfid_value: record.rfid_value.clone(),
            rfid_type: record.rfid_type.clone(),
            collection_id: display_value(record.collection_id.as_ref()),
            facility_name: record
                .naziv_objekta
                .clone()
                .or_else(|| record.real_estate_name.clone()),
            facility_code: display_value(record.sifra_objekta.as_ref())
                .or_else(|| display_value(record.foreign_id.as_ref())),
            latitude: number_value(record.latitude.as_ref()),
            longitude: number_value(record.longitude.as_ref()),
        }
    }
}

/// Per-device aggregate for one selected day, the primary output of the
/// classification pipeline and the unit the edit flow operates on.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSummary {
    pub device_id: String,
    pub device_name: String,
    pub pickups: Vec<PickupView>,
    pub total_pickups: u32,
    pub with_rfid: u32,
    pub without_rfid: u32,
    pub rfid_percentage: u32,
    pub responsible_person: Option<String>,
    pub reg_oznaka: Option<String>,
    pub napomena: Option<String>,
    pub config_record_id: Option<String>,
    /// Raw `date` string of the configuration record backing this summary.
    /// Updates must reference this original date, never the selected one.
    pub config_date: Option<String>,
    pub has_config_for_selected_date: bool,
    pub is_handheld_reader: bool,
}

impl DeviceSummary {
    pub fn new(device_id: String) -> Self {
        Self {
            device_id,
            device_name: String::new(),
            pickups: Vec::new(),
            total_pickups: 0,
            with_rfid: 0,
            without_rfid: 0,
            rfid_percentage: 0,
            responsible_person: None,
            reg_oznaka: None,
            napomena: None,
            config_record_id: None,
            config_date: None,
            has_config_for_selected_date: false,
            is_handheld_reader: false,
        }
    }
}

/// The one piece of state the app keeps between requests. Rebuilt whole on
/// every load, mutated in place only after a successful persist.
#[derive(Debug, Clone)]
pub struct DaySnapshot {
    pub date: NaiveDate,
    pub devices: Vec<DeviceSummary>,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub date: String,
    pub devices: Vec<DeviceSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    pub device_id: String,
    pub responsible_person: Option<String>,
    pub reg_oznaka: Option<String>,
    pub napomena: Option<String>,
}

/// Body sent to the upstream update endpoint. Field names match the wire
/// exactly, including the accented `zadužio` the write side expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersistPayload {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "deviceName")]
    pub device_name: String,
    pub napomena: String,
    pub reg_oznaka: String,
    #[serde(rename = "zadužio")]
    pub zaduzio: String,
    pub date: String,
}

fn display_value(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn number_value(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}
