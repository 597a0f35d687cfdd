//! Static model catalog.
//!
//! Pure configuration data: no network call, never fails. Unknown or
//! missing model ids resolve to the catalog default.

/// Metadata for one supported model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelDescriptor {
    /// Provider model identifier.
    pub id: &'static str,
    /// Maximum output tokens per generation.
    pub max_tokens: u32,
    /// Context window size in tokens.
    pub context_window: u32,
    /// Price per million input tokens, USD.
    pub input_price: f64,
    /// Price per million output tokens, USD.
    pub output_price: f64,
}

/// Model used when the requested id is absent from the catalog.
pub const DEFAULT_MODEL_ID: &str = "codestral-latest";

/// Supported model catalog. The default model is the first entry.
pub const MODELS: &[ModelDescriptor] = &[
    ModelDescriptor {
        id: "codestral-latest",
        max_tokens: 32_768,
        context_window: 256_000,
        input_price: 0.3,
        output_price: 0.9,
    },
    ModelDescriptor {
        id: "mistral-large-latest",
        max_tokens: 131_072,
        context_window: 131_072,
        input_price: 2.0,
        output_price: 6.0,
    },
    ModelDescriptor {
        id: "mistral-small-latest",
        max_tokens: 32_768,
        context_window: 32_768,
        input_price: 0.1,
        output_price: 0.3,
    },
    ModelDescriptor {
        id: "ministral-8b-latest",
        max_tokens: 131_072,
        context_window: 131_072,
        input_price: 0.1,
        output_price: 0.1,
    },
    ModelDescriptor {
        id: "open-mistral-nemo",
        max_tokens: 131_072,
        context_window: 131_072,
        input_price: 0.15,
        output_price: 0.15,
    },
];

/// Resolve a requested model id against the catalog.
///
/// Total function: an unknown or absent id falls back to the default
/// descriptor, so the caller always gets a valid model.
pub fn resolve_model(requested: Option<&str>) -> &'static ModelDescriptor {
    requested
        .and_then(|id| MODELS.iter().find(|m| m.id == id))
        .unwrap_or(&MODELS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_id_resolves_to_itself() {
        let model = resolve_model(Some("mistral-large-latest"));
        assert_eq!(model.id, "mistral-large-latest");
    }

    #[test]
    fn unknown_id_falls_back_to_default() {
        let model = resolve_model(Some("gpt-42"));
        assert_eq!(model.id, DEFAULT_MODEL_ID);
    }

    #[test]
    fn missing_id_falls_back_to_default() {
        let model = resolve_model(None);
        assert_eq!(model.id, DEFAULT_MODEL_ID);
    }

    #[test]
    fn default_is_the_first_catalog_entry() {
        assert_eq!(MODELS[0].id, DEFAULT_MODEL_ID);
    }

    #[test]
    fn catalog_ids_are_unique() {
        let mut ids: Vec<_> = MODELS.iter().map(|m| m.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), MODELS.len());
    }
}
