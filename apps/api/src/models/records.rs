use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// The logical collections held by the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Resumes,
    UploadedResumes,
    ParsedResumes,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Resumes => "resumes",
            Collection::UploadedResumes => "uploaded_resumes",
            Collection::ParsedResumes => "parsed_resumes",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resume submitted as JSON. Fields are stored verbatim; missing ones become null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub name: Option<Value>,
    pub job_description: Option<Value>,
    pub resume_text: Option<Value>,
}

impl ResumeRecord {
    /// Picks the three known fields out of an arbitrary JSON object.
    /// Anything else in the payload is dropped.
    pub fn from_payload(payload: &Value) -> Self {
        let field = |key: &str| payload.get(key).filter(|v| !v.is_null()).cloned();
        Self {
            name: field("name"),
            job_description: field("job_description"),
            resume_text: field("resume_text"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFileMetadata {
    pub file_name: String,
    pub file_path: String,
    pub file_size: u64,
    pub upload_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResumeRecord {
    pub file_name: String,
    pub resume_text: String,
}

/// Identifier assigned by the backend on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertedId {
    pub id: Uuid,
}

/// A stored record as returned by a listing: its fields plus the assigned `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl StoredDocument {
    /// Builds a listing entry from the raw stored JSON. Non-object payloads are
    /// kept under a `value` key so nothing is silently lost.
    pub fn new(id: Uuid, data: Value) -> Self {
        let mut fields = match data {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        // The assigned id always wins over a stored field of the same name.
        fields.remove("id");
        Self { id, fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resume_record_missing_fields_serialize_as_null() {
        let record = ResumeRecord::from_payload(&json!({ "name": "A", "extra": 1 }));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({ "name": "A", "job_description": null, "resume_text": null })
        );
    }

    #[test]
    fn test_resume_record_keeps_non_string_values_verbatim() {
        let record = ResumeRecord::from_payload(&json!({ "name": 42, "resume_text": ["a"] }));
        assert_eq!(record.name, Some(json!(42)));
        assert_eq!(record.resume_text, Some(json!(["a"])));
    }

    #[test]
    fn test_stored_document_flattens_with_id() {
        let id = Uuid::new_v4();
        let doc = StoredDocument::new(id, json!({ "name": "A", "id": "spoofed" }));
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["id"], json!(id.to_string()));
        assert_eq!(value["name"], json!("A"));
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::Resumes.as_str(), "resumes");
        assert_eq!(Collection::UploadedResumes.to_string(), "uploaded_resumes");
        assert_eq!(Collection::ParsedResumes.as_str(), "parsed_resumes");
    }
}
