//! The profile record every section command projects from.
//!
//! The record arrives once per session from a profile source and is never
//! mutated afterwards. Field names follow the JSON document served by the
//! profile backend.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Complete profile document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub personal: PersonalInfo,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub activities: Vec<String>,
}

impl ProfileRecord {
    /// Parse a profile from its JSON representation.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Two-letter initials shown in the photo placeholder.
    ///
    /// Takes the first letter of the first two words of the name; a
    /// single-word name yields one letter.
    pub fn initials(&self) -> String {
        self.personal
            .name
            .split_whitespace()
            .take(2)
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Name and contact fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub portfolio: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub duration: String,
}

/// Skills grouped into the three fixed categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default)]
    pub technical: Vec<String>,
    #[serde(default)]
    pub databases: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    pub duration: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    #[serde(rename = "isLive", default)]
    pub is_live: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "personal": { "name": "Ada Lovelace" },
        "projects": [
            { "name": "Engine", "description": "Analytical", "isLive": true,
              "demo": "https://example.com/engine" },
            { "name": "Notes", "description": "Translations" }
        ]
    }"#;

    #[test]
    fn parses_minimal_document_with_defaults() {
        let p = ProfileRecord::from_json(MINIMAL).unwrap();
        assert_eq!(p.personal.name, "Ada Lovelace");
        assert!(p.personal.email.is_empty());
        assert!(p.education.is_empty());
        assert!(p.skills.technical.is_empty());
        assert!(p.activities.is_empty());
        assert_eq!(p.projects.len(), 2);
    }

    #[test]
    fn project_live_flag_uses_camel_case_and_defaults_false() {
        let p = ProfileRecord::from_json(MINIMAL).unwrap();
        assert!(p.projects[0].is_live);
        assert_eq!(p.projects[0].demo.as_deref(), Some("https://example.com/engine"));
        assert!(!p.projects[1].is_live);
        assert!(p.projects[1].github.is_none());
    }

    #[test]
    fn missing_personal_is_an_error() {
        assert!(ProfileRecord::from_json(r#"{ "objective": "x" }"#).is_err());
    }

    #[test]
    fn initials_from_first_two_words() {
        let mut p = ProfileRecord::from_json(MINIMAL).unwrap();
        assert_eq!(p.initials(), "AL");
        p.personal.name = "grace brewster hopper".into();
        assert_eq!(p.initials(), "GB");
        p.personal.name = "Cher".into();
        assert_eq!(p.initials(), "C");
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;
        use proptest::prelude::prop;

        proptest! {
            #[test]
            fn initials_are_at_most_two_uppercase_letters(
                words in prop::collection::vec("[a-zA-Z]{1,10}", 0..5),
                sep in "[ \t]{1,3}",
            ) {
                let mut p = ProfileRecord::from_json(MINIMAL).unwrap();
                p.personal.name = words.join(&sep);
                let initials = p.initials();
                prop_assert_eq!(initials.chars().count(), words.len().min(2));
                prop_assert!(initials.chars().all(|c| c.is_ascii_uppercase()));
            }
        }
    }
}
