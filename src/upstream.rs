use crate::auth::TokenProvider;
use crate::dates::to_picker_date;
use crate::errors::AppError;
use crate::models::RawRecord;
use crate::reconcile::{PersistMethod, PersistOutcome, PersistRequest};
use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// Client for the remote collection API: one read endpoint returning a
/// `{ "root": [...] }` envelope, one write endpoint taking POST for create
/// and PUT for update. Every request carries the collaborator's bearer
/// token.
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    update_url: String,
    auth: Arc<dyn TokenProvider>,
}

impl UpstreamClient {
    pub fn new(base_url: String, update_url: String, auth: Arc<dyn TokenProvider>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            update_url,
            auth,
        }
    }

    /// Fetch the raw records for one calendar day. An absent or malformed
    /// `root` is an empty day, not an error; individual rows that fail to
    /// deserialize are skipped with a warning.
    pub async fn fetch_day(&self, date: NaiveDate) -> Result<Vec<RawRecord>, AppError> {
        let day = to_picker_date(date);
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("dateFrom", day.as_str()), ("dateTo", day.as_str())])
            .bearer_auth(self.auth.bearer_token())
            .send()
            .await
            .map_err(|err| AppError::bad_gateway(format!("collection API unreachable: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::bad_gateway(format!(
                "collection API returned {status}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| AppError::bad_gateway(format!("collection API sent junk: {err}")))?;

        let Some(Value::Array(items)) = body.get("root") else {
            warn!("response for {day} has no root array, treating as empty");
            return Ok(Vec::new());
        };

        let mut records = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::from_value::<RawRecord>(item.clone()) {
                Ok(record) => records.push(record),
                Err(err) => warn!("skipping malformed record for {day}: {err}"),
            }
        }
        Ok(records)
    }

    /// Send one create or update. Returns the identifier the upstream
    /// assigned, when it echoes one back.
    pub async fn persist(&self, request: &PersistRequest) -> Result<PersistOutcome, AppError> {
        let builder = match request.method {
            PersistMethod::Create => self.http.post(&self.update_url),
            PersistMethod::Update => self.http.put(&self.update_url),
        };

        let response = builder
            .bearer_auth(self.auth.bearer_token())
            .json(&request.payload)
            .send()
            .await
            .map_err(|err| AppError::bad_gateway(format!("update API unreachable: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::bad_gateway(format!(
                "update API returned {status}"
            )));
        }

        // The response body shape is not guaranteed; probe for an id and
        // otherwise take the 2xx at face value.
        let body = response.json::<Value>().await.ok();
        Ok(PersistOutcome {
            new_id: body.as_ref().and_then(extract_id),
        })
    }
}

fn extract_id(body: &Value) -> Option<String> {
    body.get("_id")
        .or_else(|| body.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_probe_reads_both_spellings() {
        assert_eq!(
            extract_id(&json!({"_id": "abc"})).as_deref(),
            Some("abc")
        );
        assert_eq!(extract_id(&json!({"id": "def"})).as_deref(), Some("def"));
        assert_eq!(extract_id(&json!({"ok": true})), None);
        assert_eq!(extract_id(&json!({"_id": 7})), None);
    }
}
