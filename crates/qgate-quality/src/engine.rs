//! # Quality Rule Engine
//!
//! Maps each [`SchemaKind`] to its [`QualityRule`] and runs the generic
//! empty-field check after it. The type-specific warnings always come first.
//!
//! A schema name outside the known kinds has no type-specific rule; it still
//! gets the generic check.

use std::collections::HashMap;

use qgate_core::{DocumentView, QualityPolicy, SchemaKind};

use crate::rules::{
    AgentCommunicationRule, GenericRule, ImageAnalysisRule, QualityFinding, QualityRule,
    ResearchAnalysisRule, StreamingDataRule,
};

/// Kind-indexed rule set.
pub struct QualityRuleEngine {
    rules: HashMap<SchemaKind, Box<dyn QualityRule>>,
    generic: GenericRule,
}

impl std::fmt::Debug for QualityRuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<&str> = self.rules.keys().map(SchemaKind::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("QualityRuleEngine")
            .field("kinds", &kinds)
            .field("generic", &self.generic)
            .finish()
    }
}

impl Default for QualityRuleEngine {
    fn default() -> Self {
        Self::new(&QualityPolicy::default())
    }
}

impl QualityRuleEngine {
    /// The stock rule for every known kind, weighted by `policy`.
    pub fn new(policy: &QualityPolicy) -> Self {
        let mut engine = Self {
            rules: HashMap::new(),
            generic: GenericRule::new(policy.generic.clone()),
        };
        engine.register(Box::new(ImageAnalysisRule::new(
            policy.image_analysis.clone(),
        )));
        engine.register(Box::new(StreamingDataRule::new(
            policy.streaming_data.clone(),
        )));
        engine.register(Box::new(AgentCommunicationRule::new(
            policy.agent_communication.clone(),
        )));
        engine.register(Box::new(ResearchAnalysisRule::new(
            policy.research_analysis.clone(),
        )));
        engine
    }

    /// Install `rule` for its kind, returning the rule it replaces.
    ///
    /// A rule for [`SchemaKind::Unknown`] is accepted but never consulted.
    pub fn register(&mut self, rule: Box<dyn QualityRule>) -> Option<Box<dyn QualityRule>> {
        self.rules.insert(rule.kind(), rule)
    }

    /// The rule registered for `kind`, if any.
    pub fn rule_for(&self, kind: SchemaKind) -> Option<&dyn QualityRule> {
        self.rules.get(&kind).map(Box::as_ref)
    }

    /// Penalty and warnings for `document` under `schema_name`.
    pub fn evaluate(&self, document: &dyn DocumentView, schema_name: &str) -> QualityFinding {
        let mut finding = match SchemaKind::from_name(schema_name) {
            SchemaKind::Unknown => QualityFinding::new(),
            kind => self
                .rule_for(kind)
                .map(|rule| rule.evaluate(document))
                .unwrap_or_default(),
        };
        finding.merge(self.generic.evaluate(document));
        finding
    }
}
