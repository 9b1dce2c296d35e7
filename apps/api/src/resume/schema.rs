//! The structured résumé exchanged with the frontend and stored in
//! `resumes.parsed_content`.
//!
//! Model output is loosely typed: years arrive as numbers, `techStack` as a
//! list, sections as `null`. Deserialization accepts all of these and
//! normalises them to strings and lists.

use serde::{Deserialize, Serialize};

use crate::llm_client::lenient::{lenient_string, lenient_struct, lenient_vec, string_list};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredResume {
    /// Set when structuring failed and the rest is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(deserialize_with = "lenient_struct")]
    pub personal: PersonalInfo,
    #[serde(deserialize_with = "lenient_vec")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "lenient_vec")]
    pub experience: Vec<Experience>,
    #[serde(deserialize_with = "lenient_vec")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "string_list")]
    pub skills: Vec<String>,
}

impl StructuredResume {
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(deserialize_with = "lenient_string")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub summary: String,
}

impl PersonalInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    #[serde(deserialize_with = "lenient_string")]
    pub school: String,
    #[serde(deserialize_with = "lenient_string")]
    pub degree: String,
    #[serde(deserialize_with = "lenient_string")]
    pub field: String,
    #[serde(deserialize_with = "lenient_string")]
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    #[serde(deserialize_with = "lenient_string")]
    pub company: String,
    #[serde(deserialize_with = "lenient_string")]
    pub role: String,
    #[serde(deserialize_with = "lenient_string")]
    pub start: String,
    #[serde(deserialize_with = "lenient_string")]
    pub end: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub tech_stack: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
}
