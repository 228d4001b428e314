//! Template instantiation.
//!
//! Builds a screener creation draft from a chosen template and hands it to
//! the creation collaborator. The unknown-id lookup is the only failure the
//! transformation core raises.

use std::sync::Arc;
use tracing::{debug, info};

use crate::data::MarketDataProvider;
use crate::error::{Error, Result};

use super::{ScreenerDraft, Template};

/// Build a creation draft from the template with the given id.
///
/// Fails with `NotFound` when the id is absent from the catalog. On success
/// the draft copies name, description and criteria, and forces `is_public`
/// to `false` regardless of the template's own visibility.
pub fn instantiate(templates: &[Template], template_id: &str) -> Result<ScreenerDraft> {
    let template = templates
        .iter()
        .find(|t| t.id == template_id)
        .ok_or_else(|| Error::NotFound(format!("template {}", template_id)))?;

    Ok(ScreenerDraft {
        name: template.name.clone(),
        description: template.description.clone(),
        criteria: template.criteria.clone(),
        is_public: false,
    })
}

// ============================================================================
// Instantiator
// ============================================================================

/// Orchestrates draft construction and submission to the creation backend.
pub struct Instantiator<P: MarketDataProvider + ?Sized> {
    provider: Arc<P>,
}

impl<P: MarketDataProvider + ?Sized> Instantiator<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Instantiate a template and submit the draft.
    ///
    /// Only the collaborator's success/failure is observed; its response
    /// body is never interpreted here.
    pub async fn create_from_template(
        &self,
        templates: &[Template],
        template_id: &str,
    ) -> Result<ScreenerDraft> {
        let draft = instantiate(templates, template_id)?;
        debug!(template_id, name = %draft.name, "Submitting screener draft");

        self.provider.create_screener(&draft).await?;

        info!(template_id, name = %draft.name, "Screener created from template");
        Ok(draft)
    }
}
