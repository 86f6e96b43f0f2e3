//! Read-only set of card templates the factory draws from.

use crate::domain::cards::{CardTemplate, EffectType, TargetRule};
use crate::errors::domain::{DomainError, ValidationKind};

pub const PLACEHOLDER_CARD_NAME: &str = "Placeholder Card";

/// Non-empty list of templates, fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardCatalog {
    templates: Vec<CardTemplate>,
}

impl CardCatalog {
    pub fn new(templates: Vec<CardTemplate>) -> Result<Self, DomainError> {
        if templates.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::EmptyCatalog,
                "card catalog must contain at least one template",
            ));
        }
        Ok(Self { templates })
    }

    /// The built-in fallback used when the template source is unusable.
    pub fn placeholder() -> Self {
        Self {
            templates: vec![CardTemplate {
                name: PLACEHOLDER_CARD_NAME.to_string(),
                effect: EffectType::Add,
                target: TargetRule::Actor,
                base_range: (0, 0),
            }],
        }
    }

    pub fn templates(&self) -> &[CardTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
