//! Record store backed by a hosted JSON-over-HTTP service.
//!
//! Every response is wrapped in an envelope of the form
//! `{"success": bool, "message": string?, "data": ...}`. Batch mutations
//! return per-record outcomes in `data` (or `results`).

use std::time::Duration;

use async_trait::async_trait;
use fintrack_shared::config::StoreConfig;
use fintrack_shared::types::RecordId;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument};

use crate::entity::{EntityType, FieldSpec};
use crate::error::{StoreError, StoreResult};
use crate::filter::Filter;
use crate::outcome::{BatchOutcome, RecordOutcome};
use crate::record::Record;
use crate::store::RecordStore;

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct Envelope<T> {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default, alias = "results")]
    data: Option<T>,
}

fn decode_envelope<T: DeserializeOwned>(body: &str) -> StoreResult<Option<T>> {
    let envelope: Envelope<T> = serde_json::from_str(body)?;
    if !envelope.success {
        return Err(StoreError::Rejected(
            envelope
                .message
                .unwrap_or_else(|| "request was not successful".to_string()),
        ));
    }
    Ok(envelope.data)
}

/// Record store client for the hosted service.
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpRecordStore {
    /// Builds a client from store configuration.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Configuration` if no base URL is configured and
    /// `StoreError::Transport` if the HTTP client cannot be built.
    pub fn from_config(config: &StoreConfig) -> StoreResult<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| StoreError::Configuration("store.base_url is not set".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn collection_url(&self, entity: EntityType) -> String {
        format!("{}/records/{}", self.base_url, entity)
    }

    fn query_url(&self, entity: EntityType) -> String {
        format!("{}/query", self.collection_url(entity))
    }

    fn record_url(&self, entity: EntityType, id: RecordId, fields: FieldSpec) -> String {
        let url = format!("{}/{}", self.collection_url(entity), id);
        if fields.fields().is_empty() {
            url
        } else {
            format!("{url}?fields={}", fields.fields().join(","))
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> StoreResult<Response> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .ok()
            .filter(|body| !body.is_empty())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
        Err(StoreError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn mutate(&self, request: RequestBuilder) -> StoreResult<BatchOutcome> {
        let body = self.send(request).await?.text().await?;
        let results: Option<Vec<RecordOutcome>> = decode_envelope(&body)?;
        Ok(BatchOutcome::new(results.unwrap_or_default()))
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    #[instrument(skip(self, fields, filter))]
    async fn fetch_all(
        &self,
        entity: EntityType,
        fields: FieldSpec,
        filter: &Filter,
    ) -> StoreResult<Vec<Record>> {
        let request = self.client.post(self.query_url(entity)).json(&json!({
            "fields": fields.fields(),
            "where": filter,
        }));
        let body = self.send(request).await?.text().await?;
        let records: Option<Vec<Record>> = decode_envelope(&body)?;
        let records = records.unwrap_or_default();
        debug!(count = records.len(), "fetched records");
        Ok(records)
    }

    #[instrument(skip(self, fields))]
    async fn fetch_by_id(
        &self,
        entity: EntityType,
        id: RecordId,
        fields: FieldSpec,
    ) -> StoreResult<Option<Record>> {
        let request = self.client.get(self.record_url(entity, id, fields));
        let body = match self.send(request).await {
            Ok(response) => response.text().await?,
            Err(StoreError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
        decode_envelope(&body)
    }

    #[instrument(skip(self, records), fields(count = records.len()))]
    async fn create(&self, entity: EntityType, records: Vec<Record>) -> StoreResult<BatchOutcome> {
        let request = self
            .client
            .post(self.collection_url(entity))
            .json(&json!({ "records": records }));
        self.mutate(request).await
    }

    #[instrument(skip(self, records), fields(count = records.len()))]
    async fn update(&self, entity: EntityType, records: Vec<Record>) -> StoreResult<BatchOutcome> {
        let request = self
            .client
            .put(self.collection_url(entity))
            .json(&json!({ "records": records }));
        self.mutate(request).await
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn delete(&self, entity: EntityType, ids: Vec<RecordId>) -> StoreResult<BatchOutcome> {
        let ids: Vec<i64> = ids.into_iter().map(RecordId::get).collect();
        let request = self
            .client
            .delete(self.collection_url(entity))
            .json(&json!({ "recordIds": ids }));
        self.mutate(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fintrack_shared::config::StoreKind;

    fn store() -> HttpRecordStore {
        HttpRecordStore::from_config(&StoreConfig {
            kind: StoreKind::Http,
            base_url: Some("https://records.example.test/api/".into()),
            api_key: Some("secret".into()),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_requires_base_url() {
        let err = HttpRecordStore::from_config(&StoreConfig {
            kind: StoreKind::Http,
            base_url: None,
            api_key: None,
            timeout_secs: 5,
        })
        .unwrap_err();
        assert!(matches!(err, StoreError::Configuration(_)));
    }

    #[test]
    fn test_urls() {
        let store = store();
        assert_eq!(
            store.query_url(EntityType::Budget),
            "https://records.example.test/api/records/budget/query"
        );
        assert_eq!(
            store.record_url(EntityType::Goal, RecordId(7), FieldSpec::all()),
            "https://records.example.test/api/records/goal/7"
        );
        assert_eq!(
            store.record_url(EntityType::Goal, RecordId(7), FieldSpec::new(&["name", "deadline"])),
            "https://records.example.test/api/records/goal/7?fields=name,deadline"
        );
    }

    #[test]
    fn test_decode_envelope_success() {
        let records: Option<Vec<Record>> =
            decode_envelope(r#"{"success": true, "data": [{"id": 1, "name": "Rent"}]}"#).unwrap();
        assert_eq!(records.unwrap().len(), 1);

        let outcomes: Option<Vec<RecordOutcome>> =
            decode_envelope(r#"{"success": true, "results": [{"success": false, "message": "dup"}]}"#)
                .unwrap();
        assert_eq!(outcomes.unwrap()[0].describe(), ["dup"]);
    }

    #[test]
    fn test_decode_envelope_rejection() {
        let err = decode_envelope::<Vec<Record>>(r#"{"success": false, "message": "bad token"}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "Store rejected the request: bad token");

        let err = decode_envelope::<Vec<Record>>("not json").unwrap_err();
        assert!(matches!(err, StoreError::Payload(_)));
    }
}
