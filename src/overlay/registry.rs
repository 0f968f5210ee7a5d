//! Strategy registry for discovering and selecting overlay strategies.

use crate::overlay::error::OverlayError;
use crate::overlay::strategies::{GroupTypeStrategy, ParentLineageStrategy, PatternLineageStrategy};
use crate::overlay::traits::OverlayStrategy;

/// Registry of available overlay strategies.
///
/// This provides a central location to discover and select strategy
/// implementations. All built-in strategies are registered automatically
/// on creation. Strategies are selectable by semantic id or by their
/// option number, so callers presenting a bare "1 | 2 | 3" choice work
/// unchanged.
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn OverlayStrategy>>,
}

impl StrategyRegistry {
    /// Create a new registry with all built-in strategies registered.
    pub fn new() -> Self {
        let mut registry = Self {
            strategies: Vec::new(),
        };

        registry.register(Box::new(ParentLineageStrategy));
        registry.register(Box::new(GroupTypeStrategy));
        registry.register(Box::new(PatternLineageStrategy));

        registry
    }

    /// Register a strategy, keeping the list ordered by option number.
    pub fn register(&mut self, strategy: Box<dyn OverlayStrategy>) {
        self.strategies.push(strategy);
        self.strategies.sort_by_key(|s| s.option_number());
    }

    /// Look up a strategy by id or option number.
    pub fn get(&self, selector: &str) -> Option<&dyn OverlayStrategy> {
        self.strategies
            .iter()
            .find(|s| s.id() == selector || s.option_number().to_string() == selector)
            .map(|s| s.as_ref())
    }

    /// Like [`StrategyRegistry::get`], with a typed error for unknown
    /// selectors.
    pub fn select(&self, selector: &str) -> Result<&dyn OverlayStrategy, OverlayError> {
        self.get(selector)
            .ok_or_else(|| OverlayError::unknown_strategy(selector))
    }

    /// Get all registered strategies, ordered by option number.
    pub fn all(&self) -> Vec<&dyn OverlayStrategy> {
        self.strategies.iter().map(|s| s.as_ref()).collect()
    }

    /// Get all strategy ids.
    pub fn ids(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.id()).collect()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
