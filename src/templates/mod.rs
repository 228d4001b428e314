//! Screener template catalog module.
//!
//! A template is a named, reusable set of screening criteria the user can
//! search and instantiate into a new saved screener. The catalog is retrieved
//! read-only at view load; this module filters it and builds creation drafts,
//! but never mutates it.

pub mod catalog;
pub mod instantiate;

pub use catalog::{category_color, category_icon, search, CategoryStyle};
pub use instantiate::{instantiate, Instantiator};

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Template
// ============================================================================

/// A predefined screening template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Template identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Short description of what the screen selects for
    pub description: String,
    /// Display category key; unknown keys render with the default style
    pub category: String,
    /// Screening criteria, passed through unmodified
    pub criteria: Value,
    /// Whether the template itself is publicly visible
    #[serde(default)]
    pub is_public: bool,
}

// ============================================================================
// Screener Draft
// ============================================================================

/// Payload for creating a screener from a template.
///
/// `is_public` is always `false`: a screener instantiated from a template
/// starts private regardless of the template's own visibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenerDraft {
    /// Screener name, taken from the template
    pub name: String,
    /// Screener description, taken from the template
    pub description: String,
    /// Criteria copied through unmodified
    pub criteria: Value,
    /// Always `false` at creation
    pub is_public: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_wire_names() {
        let raw = json!({
            "id": "tpl_1",
            "name": "Momentum Leaders",
            "description": "High relative strength",
            "category": "momentum",
            "criteria": {"rsi": {"min": 60}},
            "isPublic": true
        });
        let template: Template = serde_json::from_value(raw).unwrap();
        assert!(template.is_public);
        assert_eq!(template.criteria["rsi"]["min"], json!(60));
    }

    #[test]
    fn test_template_visibility_defaults_private() {
        let raw = json!({
            "id": "tpl_2",
            "name": "Deep Value",
            "description": "Low P/B",
            "category": "value",
            "criteria": {}
        });
        let template: Template = serde_json::from_value(raw).unwrap();
        assert!(!template.is_public);
    }

    #[test]
    fn test_draft_serializes_camel_case() {
        let draft = ScreenerDraft {
            name: "x".into(),
            description: "y".into(),
            criteria: json!({}),
            is_public: false,
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["isPublic"], json!(false));
    }
}
