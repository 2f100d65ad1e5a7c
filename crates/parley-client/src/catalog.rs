//! Static model catalog and heuristic model metadata.
//!
//! The catalog is a snapshot of popular models in the Ollama library, not a
//! live query. Size and description are best-effort guesses derived from
//! substring matches on the identifier.

use crate::registry::InstalledModels;

/// Popular models available in the Ollama library.
const KNOWN_MODELS: &[&str] = &[
    "llama3.2", "llama3.1", "llama3", "llama2", "llama2:13b", "llama2:70b",
    "codellama", "codellama:13b", "codellama:34b",
    "mistral", "mistral:7b", "mixtral", "mixtral:8x7b",
    "phi3", "phi3:medium", "phi3:mini",
    "gemma", "gemma:2b", "gemma:7b",
    "qwen2", "qwen2:7b", "qwen2:72b",
    "llava", "llava:13b", "llava:34b",
    "vicuna", "vicuna:13b", "vicuna:33b",
    "orca-mini", "orca-mini:13b",
    "wizard-coder", "wizard-math",
    "dolphin-mistral", "dolphin-llama3",
    "openchat", "starling-lm",
    "neural-chat", "solar",
    "tinyllama", "medllama2",
    "yarn-mistral", "deepseek-coder",
];

/// Size used when no tag in [`SIZE_TAGS`] matches.
pub const DEFAULT_SIZE: &str = "~4GB";

/// Description used when no family in [`FAMILY_DESCRIPTIONS`] matches.
pub const DEFAULT_DESCRIPTION: &str = "General purpose language model";

/// Parameter-count tag to estimated download size. Scanned in order, first
/// match wins; a tag comes before any tag it contains (`13b` before `3b`).
const SIZE_TAGS: &[(&str, &str)] = &[
    ("8x7b", "26GB"),
    ("13b", "7.3GB"),
    ("34b", "20GB"),
    ("70b", "40GB"),
    ("72b", "41GB"),
    ("2b", "1.4GB"),
    ("3b", "2.0GB"),
    ("7b", "4.0GB"),
    ("8b", "4.7GB"),
];

/// Model family to description. Scanned in catalog order, first match wins,
/// so `dolphin-mistral` resolves to the `mistral` entry.
const FAMILY_DESCRIPTIONS: &[(&str, &str)] = &[
    ("llama3.2", "Latest Llama model with improved performance"),
    ("llama3.1", "Advanced Llama 3.1 with enhanced capabilities"),
    ("llama3", "Meta's Llama 3 model, excellent general performance"),
    ("llama2", "Meta's Llama 2 model, reliable and well-tested"),
    ("codellama", "Specialized for code generation and programming"),
    ("mistral", "Efficient model from Mistral AI"),
    ("mixtral", "Mixture of Experts model, very powerful"),
    ("phi3", "Microsoft's efficient small language model"),
    ("gemma", "Google's open source model"),
    ("qwen2", "Alibaba's multilingual model"),
    ("llava", "Large Language and Vision Assistant"),
    ("vicuna", "Open-source chatbot trained by fine-tuning LLaMA"),
    ("orca-mini", "Compact model with strong reasoning"),
    ("wizard-coder", "Specialized for code generation"),
    ("wizard-math", "Specialized for mathematical reasoning"),
    ("dolphin-mistral", "Uncensored Mistral model"),
    ("dolphin-llama3", "Uncensored Llama3 model"),
    ("openchat", "Open-source conversational AI"),
    ("starling-lm", "Reinforcement Learning trained model"),
    ("neural-chat", "Intel's neural chat model"),
    ("solar", "Upstage's solar model"),
    ("tinyllama", "Very small but capable model"),
    ("medllama2", "Medical domain specialized model"),
    ("yarn-mistral", "Extended context Mistral model"),
    ("deepseek-coder", "DeepSeek's coding specialized model"),
];

/// Everything shown about a model before it is selected or pulled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    /// Model identifier, e.g. `llama2:13b`.
    pub name: String,
    /// Estimated download size.
    pub size: &'static str,
    /// Short description of the model family.
    pub description: &'static str,
    /// Whether the server already has the model.
    pub installed: bool,
}

/// All catalog identifiers, sorted ascending.
pub fn list_available_models() -> Vec<&'static str> {
    let mut models = KNOWN_MODELS.to_vec();
    models.sort_unstable();
    models.dedup();
    models
}

/// Check if a model identifier is part of the catalog.
pub fn is_known_model(name: &str) -> bool {
    KNOWN_MODELS.contains(&name)
}

/// Derive the descriptor for `name` against the given installed set.
pub fn describe_model(name: &str, installed: &InstalledModels) -> ModelDescriptor {
    let lowered = name.to_lowercase();

    ModelDescriptor {
        name: name.to_string(),
        size: first_match(SIZE_TAGS, &lowered).unwrap_or(DEFAULT_SIZE),
        description: first_match(FAMILY_DESCRIPTIONS, &lowered).unwrap_or(DEFAULT_DESCRIPTION),
        installed: installed.contains(name),
    }
}

fn first_match(table: &[(&str, &'static str)], name: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| name.contains(key))
        .map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sorted_and_unique() {
        let models = list_available_models();
        assert_eq!(models.len(), KNOWN_MODELS.len());
        assert!(models.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(models.first(), Some(&"codellama"));
    }

    #[test]
    fn test_describe_tagged_model() {
        let info = describe_model("llama2:13b", &InstalledModels::default());
        assert_eq!(info.size, "7.3GB");
        assert_eq!(info.description, "Meta's Llama 2 model, reliable and well-tested");
        assert!(!info.installed);
    }

    #[test]
    fn test_describe_unknown_model() {
        let info = describe_model("unknown-model-xyz", &InstalledModels::default());
        assert_eq!(info.size, DEFAULT_SIZE);
        assert_eq!(info.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_longer_tags_win() {
        let none = InstalledModels::default();
        assert_eq!(describe_model("mixtral:8x7b", &none).size, "26GB");
        assert_eq!(describe_model("qwen2:72b", &none).size, "41GB");
        assert_eq!(describe_model("gemma:2b", &none).size, "1.4GB");
        assert_eq!(describe_model("vicuna:33b", &none).size, "2.0GB");
    }

    #[test]
    fn test_family_table_order_breaks_ties() {
        let none = InstalledModels::default();
        assert_eq!(
            describe_model("dolphin-mistral", &none).description,
            "Efficient model from Mistral AI"
        );
        assert_eq!(
            describe_model("yarn-mistral", &none).description,
            "Efficient model from Mistral AI"
        );
        assert_eq!(
            describe_model("dolphin-llama3", &none).description,
            "Meta's Llama 3 model, excellent general performance"
        );
        assert_eq!(
            describe_model("medllama2", &none).description,
            "Meta's Llama 2 model, reliable and well-tested"
        );
        assert_eq!(
            describe_model("llama3.2", &none).description,
            "Latest Llama model with improved performance"
        );
        assert_eq!(
            describe_model("tinyllama", &none).description,
            "Very small but capable model"
        );
    }

    #[test]
    fn test_case_insensitive_match() {
        let info = describe_model("Mistral:7B", &InstalledModels::default());
        assert_eq!(info.size, "4.0GB");
        assert_eq!(info.description, "Efficient model from Mistral AI");
    }

    #[test]
    fn test_installed_flag() {
        let installed = InstalledModels::from_names(["llama2:latest"]);
        assert!(describe_model("llama2", &installed).installed);
        assert!(!describe_model("llama2:13b", &installed).installed);
        assert!(!describe_model("llama3", &installed).installed);
    }

    #[test]
    fn test_catalog_membership() {
        assert!(is_known_model("phi3:mini"));
        assert!(!is_known_model("phi3:large"));
    }
}
