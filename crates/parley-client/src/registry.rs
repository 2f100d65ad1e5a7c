//! Installed-model set as reported by the server's tag listing.

use serde::Deserialize;

/// Response from Ollama tags API (list models).
#[derive(Debug, Deserialize)]
pub(crate) struct TagsResponse {
    #[serde(default)]
    pub(crate) models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TagEntry {
    pub(crate) name: String,
}

/// Strip the `:<tag>` suffix from a model identifier.
pub fn base_name(name: &str) -> &str {
    name.split(':').next().unwrap_or(name)
}

/// Base names of the models present on the server, in server order.
///
/// An empty set means "unknown or none installed"; a failed listing is not
/// distinguishable from an empty server here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledModels {
    names: Vec<String>,
}

impl InstalledModels {
    /// Build a set from full identifiers; tags are stripped.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|name| base_name(name.as_ref()).to_string())
                .collect(),
        }
    }

    /// Check whether `name`, exactly as given, is one of the installed base
    /// names. A tagged identifier such as `llama2:13b` never matches.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|installed| installed == name)
    }

    /// Installed base names in server order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<TagsResponse> for InstalledModels {
    fn from(tags: TagsResponse) -> Self {
        Self::from_names(tags.models.into_iter().map(|m| m.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("llama3:8b"), "llama3");
        assert_eq!(base_name("mistral"), "mistral");
        assert_eq!(base_name("library/qwen2:7b:extra"), "library/qwen2");
    }

    #[test]
    fn test_tags_response_preserves_order() {
        let tags: TagsResponse = serde_json::from_str(
            r#"{"models":[{"name":"llama3:8b","size":1},{"name":"mistral:latest"}]}"#,
        )
        .unwrap();
        let installed = InstalledModels::from(tags);
        assert_eq!(installed.names(), ["llama3", "mistral"]);
    }

    #[test]
    fn test_missing_models_field() {
        let tags: TagsResponse = serde_json::from_str("{}").unwrap();
        assert!(InstalledModels::from(tags).is_empty());
    }

    #[test]
    fn test_contains_compares_identifier_as_given() {
        let installed = InstalledModels::from_names(["phi3:mini"]);
        assert!(installed.contains("phi3"));
        assert!(!installed.contains("phi3:mini"));
        assert!(!installed.contains("phi3:medium"));
        assert!(!installed.contains("phi"));
        assert_eq!(installed.len(), 1);
    }
}
