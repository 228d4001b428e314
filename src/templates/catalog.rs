//! Template catalog search and category styling.

use serde::Serialize;

use super::Template;

/// Filter templates by a free-text search term.
///
/// Case-insensitive substring match with OR semantics over `name`,
/// `description` and `category`; an empty term retains everything. Stable:
/// the result preserves the catalog's relative order, never re-sorts.
pub fn search<'a>(templates: &'a [Template], term: &str) -> Vec<&'a Template> {
    let needle = term.to_lowercase();
    templates
        .iter()
        .filter(|t| {
            needle.is_empty()
                || t.name.to_lowercase().contains(&needle)
                || t.description.to_lowercase().contains(&needle)
                || t.category.to_lowercase().contains(&needle)
        })
        .collect()
}

// ============================================================================
// Category Styling
// ============================================================================

/// Icon and color pair for a template category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryStyle {
    /// Icon name the frontend maps to a glyph
    pub icon: &'static str,
    /// Hex color for the category badge
    pub color: &'static str,
}

/// Fixed category table; anything not listed renders with `DEFAULT_STYLE`.
const CATEGORY_STYLES: &[(&str, CategoryStyle)] = &[
    ("momentum", CategoryStyle { icon: "zap", color: "#f59e0b" }),
    ("value", CategoryStyle { icon: "gem", color: "#3b82f6" }),
    ("growth", CategoryStyle { icon: "sprout", color: "#22c55e" }),
    ("dividend", CategoryStyle { icon: "coins", color: "#8b5cf6" }),
    ("volatility", CategoryStyle { icon: "activity", color: "#ef4444" }),
];

/// Fallback style for unknown categories.
const DEFAULT_STYLE: CategoryStyle = CategoryStyle {
    icon: "trending-up",
    color: "#64748b",
};

fn category_style(category: &str) -> CategoryStyle {
    CATEGORY_STYLES
        .iter()
        .find(|(key, _)| *key == category)
        .map(|(_, style)| *style)
        .unwrap_or(DEFAULT_STYLE)
}

/// Icon for a category; unknown categories get the generic trending icon.
pub fn category_icon(category: &str) -> &'static str {
    category_style(category).icon
}

/// Badge color for a category; unknown categories get the neutral color.
pub fn category_color(category: &str) -> &'static str {
    category_style(category).color
}
