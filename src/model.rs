use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One waitlist signup as stored in the backend table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Entry {
    pub email: String,
    pub name: String,
    pub phone: String,
    /// `Male`, `Female` or `Other`; the backend owns the constraint.
    pub gender: String,
    pub age: i32,
    pub instagram: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<i32>,
}

impl Entry {
    /// Row object for the insert request. Absent optional fields are left
    /// out rather than sent as null.
    pub fn to_payload(&self) -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert("email".into(), Value::from(self.email.as_str()));
        payload.insert("name".into(), Value::from(self.name.as_str()));
        payload.insert("phone".into(), Value::from(self.phone.as_str()));
        payload.insert("gender".into(), Value::from(self.gender.as_str()));
        payload.insert("age".into(), Value::from(self.age));
        payload.insert("instagram".into(), Value::from(self.instagram.as_str()));
        if let Some(linkedin) = &self.linkedin {
            payload.insert("linkedin".into(), Value::from(linkedin.as_str()));
        }
        if let Some(twitter) = &self.twitter {
            payload.insert("twitter".into(), Value::from(twitter.as_str()));
        }
        if let Some(batch_number) = self.batch_number {
            payload.insert("batch_number".into(), Value::from(batch_number));
        }
        payload
    }
}

/// Outcome of a single insert attempt.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InsertResult {
    pub success: bool,
    pub data: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InsertResult {
    pub fn inserted(data: Map<String, Value>, status_code: u16) -> Self {
        Self {
            success: true,
            data,
            status_code: Some(status_code),
            error: None,
        }
    }

    pub fn failed(data: Map<String, Value>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            data,
            status_code: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub successful: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[InsertResult]) -> Self {
        let successful = results.iter().filter(|r| r.success).count();
        Self {
            successful,
            failed: results.len() - successful,
        }
    }

    pub fn total(&self) -> usize {
        self.successful + self.failed
    }
}
