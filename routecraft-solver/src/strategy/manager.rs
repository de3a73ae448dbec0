//! Weighted collection of search strategies.

use std::fmt;

use rand::RngCore;
use rand::distributions::{Distribution, WeightedIndex};

use super::SearchStrategy;
use crate::StrategyError;

/// Owns the registered strategies and their selection probabilities.
///
/// Each probability must lie in `(0, 1]`. Whether they sum to one is checked
/// by the search loop when it starts, not on registration.
#[derive(Default)]
pub struct SearchStrategyManager {
    strategies: Vec<Box<dyn SearchStrategy>>,
    probabilities: Vec<f64>,
}

impl SearchStrategyManager {
    /// An empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `strategy`, drawn with `probability`.
    ///
    /// # Errors
    /// Returns [`StrategyError::InvalidProbability`] when `probability` is not
    /// in `(0, 1]`.
    pub fn add_strategy(
        &mut self,
        strategy: Box<dyn SearchStrategy>,
        probability: f64,
    ) -> Result<(), StrategyError> {
        if probability.is_nan() || probability <= 0.0 || probability > 1.0 {
            return Err(StrategyError::InvalidProbability {
                name: strategy.name().to_owned(),
                probability,
            });
        }
        log::debug!(
            "registered strategy {} with probability {probability}",
            strategy.name()
        );
        self.strategies.push(strategy);
        self.probabilities.push(probability);
        Ok(())
    }

    /// Chain-builder form of [`Self::add_strategy`].
    ///
    /// # Errors
    /// See [`Self::add_strategy`].
    pub fn with_strategy<S>(mut self, strategy: S, probability: f64) -> Result<Self, StrategyError>
    where
        S: SearchStrategy + 'static,
    {
        self.add_strategy(Box::new(strategy), probability)?;
        Ok(self)
    }

    /// Selection probabilities in registration order.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Sum of every registered probability.
    pub fn probability_sum(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Names of the registered strategies in registration order.
    pub fn strategy_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.strategies.iter().map(|strategy| strategy.name())
    }

    /// Number of registered strategies.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Whether no strategy is registered.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Draw a strategy with a single uniform sample against the cumulative
    /// weights.
    ///
    /// Returns `None` when no strategy is registered.
    pub fn random_strategy(&mut self, rng: &mut dyn RngCore) -> Option<&mut dyn SearchStrategy> {
        let index = WeightedIndex::new(&self.probabilities).ok()?.sample(rng);
        self.strategies
            .get_mut(index)
            .map(|strategy| -> &mut dyn SearchStrategy { strategy.as_mut() })
    }
}

impl fmt::Debug for SearchStrategyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.strategy_names().zip(&self.probabilities))
            .finish()
    }
}
