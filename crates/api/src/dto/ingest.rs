use serde::Deserialize;
use tollgate_domain::IngestEvent;

/// Body of `POST /ingest`. Every field is optional at this layer so that a
/// missing one becomes a rejection rather than a decode error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngestRequest {
    #[serde(rename = "customerID")]
    pub customer_id: Option<i64>,
    #[serde(rename = "tagID")]
    pub tag_id: Option<i64>,
    #[serde(rename = "userID")]
    pub user_id: Option<String>,
    #[serde(rename = "remoteIP")]
    pub remote_ip: Option<String>,
    pub timestamp: Option<i64>,
}

impl IngestRequest {
    pub fn into_event(self, user_agent: Option<String>) -> IngestEvent {
        IngestEvent {
            customer_id: self.customer_id,
            tag_id: self.tag_id,
            user_id: self.user_id,
            remote_ip: self.remote_ip,
            timestamp: self.timestamp,
            user_agent,
        }
    }
}
