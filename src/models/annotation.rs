use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// A single annotation linking a piece of content to a concept
///
/// Equality is structural over all fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// URI identifying the relationship (e.g. `http://www.ft.com/ontology/annotation/about`)
    pub predicate: String,
    /// URI identifying the annotated concept
    #[serde(rename = "id")]
    pub concept_id: String,
    #[serde(rename = "prefLabel", default, skip_serializing_if = "Option::is_none")]
    pub pref_label: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub concept_type: Option<String>,
    #[serde(rename = "apiUrl", default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(rename = "isFTAuthor", default, skip_serializing_if = "Option::is_none")]
    pub is_author: Option<bool>,
}

impl Annotation {
    pub fn new(predicate: impl Into<String>, concept_id: impl Into<String>) -> Self {
        Self {
            predicate: predicate.into(),
            concept_id: concept_id.into(),
            pref_label: None,
            concept_type: None,
            api_url: None,
            is_author: None,
        }
    }
}

/// The annotation document for one piece of content
///
/// Fields other than `uuid` and `annotations` (for example a `publication`
/// scope list) are kept in `envelope` and written back verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnotationSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(flatten)]
    pub envelope: Map<String, JsonValue>,
}

impl AnnotationSet {
    pub fn new(annotations: Vec<Annotation>) -> Self {
        Self {
            uuid: None,
            annotations,
            envelope: Map::new(),
        }
    }

    /// Stamp the document with the content identifier, replacing any existing value.
    pub fn set_uuid(&mut self, uuid: impl Into<String>) {
        self.uuid = Some(uuid.into());
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}
