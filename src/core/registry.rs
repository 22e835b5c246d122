//! # Renderer Registry
//!
//! Explicit ScreenId → renderer table, filled once at startup. Navigation
//! looks renderers up here instead of deriving handler names from strings,
//! and [`RendererRegistry::ensure_complete`] catches a forgotten screen
//! before the console ever draws.

use std::collections::HashMap;
use std::fmt;

use crate::client::ActionResponse;
use crate::core::content::Content;
use crate::core::screen::ScreenId;

/// Turns a controller reply into screen content.
pub trait ScreenRenderer: Send + Sync {
    fn render(&self, screen: ScreenId, data: &ActionResponse) -> Content;
}

impl<F> ScreenRenderer for F
where
    F: Fn(ScreenId, &ActionResponse) -> Content + Send + Sync,
{
    fn render(&self, screen: ScreenId, data: &ActionResponse) -> Content {
        self(screen, data)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    Missing(Vec<ScreenId>),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Missing(screens) => {
                let names: Vec<_> = screens.iter().map(|s| s.name()).collect();
                write!(f, "no renderer registered for: {}", names.join(", "))
            }
        }
    }
}

impl std::error::Error for RegistryError {}

#[derive(Default)]
pub struct RendererRegistry {
    renderers: HashMap<ScreenId, Box<dyn ScreenRenderer>>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `renderer` for `screen`, replacing any earlier one.
    pub fn register(&mut self, screen: ScreenId, renderer: impl ScreenRenderer + 'static) -> &mut Self {
        self.renderers.insert(screen, Box::new(renderer));
        self
    }

    pub fn contains(&self, screen: ScreenId) -> bool {
        self.renderers.contains_key(&screen)
    }

    /// Composition-time check that every screen can be rendered.
    pub fn ensure_complete(&self) -> Result<(), RegistryError> {
        let missing: Vec<_> = ScreenId::ALL
            .into_iter()
            .filter(|screen| !self.contains(*screen))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(RegistryError::Missing(missing))
        }
    }

    /// # Panics
    /// If `screen` has no renderer. That is a build defect, not a runtime
    /// condition; `ensure_complete` rules it out at startup.
    pub fn render(&self, screen: ScreenId, data: &ActionResponse) -> Content {
        match self.renderers.get(&screen) {
            Some(renderer) => renderer.render(screen, data),
            None => panic!("no renderer registered for screen '{screen}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title_only(screen: ScreenId, _data: &ActionResponse) -> Content {
        let mut content = Content::new(screen);
        content.heading(screen.title());
        content
    }

    #[test]
    fn test_closure_renderers_register() {
        let mut registry = RendererRegistry::new();
        registry.register(ScreenId::Statistics, title_only);
        let content = registry.render(ScreenId::Statistics, &ActionResponse::default());
        assert_eq!(content.screen, ScreenId::Statistics);
    }

    #[test]
    fn test_ensure_complete_lists_missing() {
        let mut registry = RendererRegistry::new();
        for screen in ScreenId::ALL {
            if screen != ScreenId::AdminClean {
                registry.register(screen, title_only);
            }
        }
        assert_eq!(
            registry.ensure_complete(),
            Err(RegistryError::Missing(vec![ScreenId::AdminClean]))
        );
        registry.register(ScreenId::AdminClean, title_only);
        assert!(registry.ensure_complete().is_ok());
    }

    #[test]
    #[should_panic(expected = "no renderer registered for screen 'edit'")]
    fn test_render_unregistered_panics() {
        let registry = RendererRegistry::new();
        registry.render(ScreenId::Edit, &ActionResponse::default());
    }
}
