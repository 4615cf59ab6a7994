use crate::{
    error::GenerateError,
    mission::MissionSymbol,
    rule::{RuleSpec, RuleTemplate},
};

use fnv::FnvHashMap;
use rand::Rng;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Rule templates available for each terminal mission symbol.
#[derive(Clone, Debug)]
pub struct RuleCatalog<S> {
    rules: FnvHashMap<S, Vec<RuleTemplate>>,
}

impl<S: MissionSymbol> Default for RuleCatalog<S> {
    fn default() -> Self {
        RuleCatalog {
            rules: FnvHashMap::default(),
        }
    }
}

impl<S: MissionSymbol> RuleCatalog<S> {
    pub fn new() -> Self {
        RuleCatalog::default()
    }

    /// Adds a template after checking its layout.
    pub fn insert(&mut self, symbol: S, rule: RuleTemplate) -> Result<(), GenerateError> {
        rule.validate()
            .map_err(|source| GenerateError::InvalidRule {
                symbol: format!("{:?}", symbol),
                source,
            })?;
        self.rules.entry(symbol).or_insert_with(Vec::new).push(rule);

        Ok(())
    }

    pub fn rules_for(&self, symbol: S) -> &[RuleTemplate] {
        self.rules.get(&symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Draws one template for `symbol`, uniformly.
    pub fn select(&self, symbol: S, rng: &mut impl Rng) -> Result<&RuleTemplate, GenerateError> {
        if !symbol.is_terminal() {
            return Err(GenerateError::NonTerminal {
                symbol: format!("{:?}", symbol),
            });
        }

        crate::sampling::choose(self.rules_for(symbol), rng).ok_or_else(|| {
            GenerateError::NoRules {
                symbol: format!("{:?}", symbol),
            }
        })
    }

    pub fn from_spec(spec: &RuleCatalogSpec<S>) -> Result<Self, GenerateError> {
        let mut catalog = RuleCatalog::new();
        for set in spec.rules.iter() {
            for template in set.templates.iter() {
                let rule = template
                    .make()
                    .map_err(|source| GenerateError::InvalidRule {
                        symbol: format!("{:?}", set.symbol),
                        source,
                    })?;
                catalog.insert(set.symbol, rule)?;
            }
        }

        Ok(catalog)
    }
}

impl<S: MissionSymbol + DeserializeOwned> RuleCatalog<S> {
    pub fn from_ron(text: &str) -> Result<Self, GenerateError> {
        let spec: RuleCatalogSpec<S> =
            ron::de::from_str(text).map_err(|e| GenerateError::Config(e.to_string()))?;

        RuleCatalog::from_spec(&spec)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RuleSetSpec<S> {
    pub symbol: S,
    pub templates: Vec<RuleSpec>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RuleCatalogSpec<S> {
    pub rules: Vec<RuleSetSpec<S>>,
}
