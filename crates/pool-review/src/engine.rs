//! Review pipeline
//!
//! [`ReviewEngine`] runs classifier, closures, resolver and validator over
//! one immutable store. The relation graph is built on first use and shared
//! by every later run.

use crate::changeset::ChangesetSource;
use crate::classifier::ChangeClassifier;
use crate::config::ReviewConfig;
use crate::error::ReviewError;
use crate::report::{ReportBuilder, ReportInput, ReviewReport};
use crate::resolver::AttributeResolver;
use crate::validator::RuleRegistry;
use once_cell::sync::OnceCell;
use pool_graph::{unassociated, ClosureEngine, RelationGraph};
use pool_item::{ChangedFile, IntegrityWarning, ItemId, ItemKind};
use pool_store::ItemStore;
use std::collections::HashSet;

/// Reviews changesets against one store
pub struct ReviewEngine<S: ItemStore> {
    store: S,
    config: ReviewConfig,
    rules: RuleRegistry,
    graph: OnceCell<RelationGraph>,
}

impl<S: ItemStore> std::fmt::Debug for ReviewEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewEngine")
            .field("config", &self.config)
            .field("rules", &self.rules)
            .field("graph_built", &self.graph.get().is_some())
            .finish_non_exhaustive()
    }
}

impl<S: ItemStore> ReviewEngine<S> {
    /// Create engine with the built-in rules
    #[must_use]
    pub fn new(store: S, config: ReviewConfig) -> Self {
        let rules = RuleRegistry::with_defaults(config.forbidden_datasheet_domains.iter().cloned());
        Self {
            store,
            config,
            rules,
            graph: OnceCell::new(),
        }
    }

    /// With a custom rule registry
    #[inline]
    #[must_use]
    pub fn with_rules(mut self, rules: RuleRegistry) -> Self {
        self.rules = rules;
        self
    }

    /// Rule registry, e.g. to register more rules
    #[inline]
    pub fn rules_mut(&mut self) -> &mut RuleRegistry {
        &mut self.rules
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    /// Underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Relation graph, built on first call
    pub fn graph(&self) -> &RelationGraph {
        self.graph.get_or_init(|| RelationGraph::build(&self.store))
    }

    /// Fetch a changeset and review it
    ///
    /// # Errors
    /// Returns error if the changeset source fails; no report is built
    pub fn review(&self, source: &dyn ChangesetSource) -> Result<ReviewReport, ReviewError> {
        let changes = source.changed_files()?;
        Ok(self.run(&changes))
    }

    /// Review a changeset
    #[must_use]
    pub fn run(&self, changes: &[ChangedFile]) -> ReviewReport {
        tracing::info!("Reviewing {} changed files", changes.len());

        let classification = ChangeClassifier::new(&self.store).classify(changes);
        let graph = self.graph();
        let closures = ClosureEngine::new(graph);
        let in_changeset = |id: ItemId| classification.contains(id);

        let where_used = closures.where_used(&classification.top_parts, in_changeset);
        let derived = closures.derived(&classification.top_parts, in_changeset);
        let unassociated = unassociated(classification.changed_ids(), &where_used, &derived);
        tracing::debug!(
            "Closures: {} where-used rows, {} derived parts, {} unassociated items",
            where_used.len(),
            derived.len(),
            unassociated.len()
        );

        let reviewed: Vec<ItemId> = classification
            .changed_ids()
            .chain(derived.iter().map(|e| e.id))
            .collect();
        let integrity = self.integrity_warnings(graph, &classification.warnings, reviewed);

        let report = ReportBuilder::new(&self.store, &self.rules).build(ReportInput {
            classification: &classification,
            where_used: &where_used,
            derived: &derived,
            unassociated: &unassociated,
            integrity: &integrity,
        });

        tracing::info!(
            "Review complete: {} changed items, {} integrity warnings",
            report.changed.len(),
            report.integrity.len()
        );
        report
    }

    /// Store, graph and classifier warnings plus derivation cycles among
    /// the reviewed parts, de-duplicated in first-seen order
    fn integrity_warnings(
        &self,
        graph: &RelationGraph,
        classifier: &[IntegrityWarning],
        reviewed: Vec<ItemId>,
    ) -> Vec<IntegrityWarning> {
        let resolver = AttributeResolver::new(&self.store);
        let cycles = reviewed
            .into_iter()
            .filter(|id| id.kind == ItemKind::Part)
            .filter_map(|id| resolver.derivation_cycle(id));

        let mut seen = HashSet::new();
        self.store
            .load_warnings()
            .into_iter()
            .chain(graph.warnings().iter().cloned())
            .chain(classifier.iter().cloned())
            .chain(cycles)
            .filter(|w| seen.insert(w.clone()))
            .collect()
    }
}
