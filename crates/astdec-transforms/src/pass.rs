//! Compilation pass driver.
//!
//! Walks one compilation unit pre-order and hands every decorator occurrence
//! to the dispatcher. For each class, its own decorators go first, then the
//! decorators of each member in source order. Decorator lists are snapshotted
//! before dispatching, so nodes generated by a transformer are not visited as
//! new work; a decorator whose member was replaced in the meantime is skipped.

use crate::context::TransformContext;
use crate::dispatch::{Dispatch, process_class_decorator, process_class_member_decorator};
use crate::error::{ConfigurationError, Result, TransformError};
use crate::options::PluginOptions;
use crate::registry::TransformerMap;
use astdec_ast::{NodeArena, NodeIndex, NodeKind};
use astdec_common::Diagnostic;
use tracing::{debug, debug_span};

/// Counters for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    pub classes: usize,
    pub applied: usize,
    pub inert: usize,
}

/// Error of a run, with the decorator it was raised for.
struct Failure {
    error: TransformError,
    at: NodeIndex,
}

pub struct CompilationPass {
    transformers: TransformerMap,
}

impl CompilationPass {
    pub const fn new(transformers: TransformerMap) -> Self {
        Self { transformers }
    }

    /// Pass with every built-in transformer registered under its default name.
    pub fn from_options(options: &PluginOptions) -> Result<Self, ConfigurationError> {
        Ok(Self::new(TransformerMap::from_options(options)?))
    }

    pub const fn transformers(&self) -> &TransformerMap {
        &self.transformers
    }

    /// Transform the tree under `root` in place.
    pub fn run(&self, arena: &mut NodeArena, root: NodeIndex) -> Result<PassStats> {
        self.run_inner(arena, root).map_err(|failure| failure.error)
    }

    /// Like [`run`](Self::run), reporting a failure as a diagnostic positioned
    /// on the offending decorator.
    pub fn run_with_diagnostics(
        &self,
        file: &str,
        arena: &mut NodeArena,
        root: NodeIndex,
    ) -> std::result::Result<PassStats, Diagnostic> {
        self.run_inner(arena, root)
            .map_err(|failure| failure.error.to_diagnostic(file, arena, failure.at))
    }

    fn run_inner(
        &self,
        arena: &mut NodeArena,
        root: NodeIndex,
    ) -> std::result::Result<PassStats, Failure> {
        let _span = debug_span!("decorator_pass", root = root.0).entered();
        let mut ctx = TransformContext::new(arena, root);
        let mut stats = PassStats::default();
        self.visit(&mut ctx, root, &mut stats)?;
        debug!(
            classes = stats.classes,
            applied = stats.applied,
            inert = stats.inert,
            "decorator pass finished"
        );
        Ok(stats)
    }

    fn visit(
        &self,
        ctx: &mut TransformContext<'_>,
        idx: NodeIndex,
        stats: &mut PassStats,
    ) -> std::result::Result<(), Failure> {
        if matches!(
            ctx.arena.kind(idx),
            Some(NodeKind::ClassDeclaration | NodeKind::ClassExpression)
        ) {
            self.visit_class(ctx, idx, stats)?;
        }
        // Re-read the children after every visit: hoisting inserts siblings
        // that may carry bodies moved out of the class.
        let mut visited = Vec::new();
        while let Some(child) = ctx
            .arena
            .children(idx)
            .into_iter()
            .find(|child| !visited.contains(child))
        {
            visited.push(child);
            self.visit(ctx, child, stats)?;
        }
        Ok(())
    }

    fn visit_class(
        &self,
        ctx: &mut TransformContext<'_>,
        klass: NodeIndex,
        stats: &mut PassStats,
    ) -> std::result::Result<(), Failure> {
        stats.classes += 1;

        let class_decorators = snapshot(ctx.arena, klass);
        for decorator in class_decorators {
            if ctx.arena.parent(decorator) != klass {
                continue;
            }
            let outcome = process_class_decorator(ctx, &self.transformers, decorator)
                .map_err(|error| Failure { error, at: decorator })?;
            record(stats, outcome);
        }

        let members = ctx
            .arena
            .get_class(klass)
            .map(|class| class.members.nodes.clone())
            .unwrap_or_default();
        for member in members {
            for decorator in snapshot(ctx.arena, member) {
                let owner = ctx.arena.parent(decorator);
                if owner.is_none() || ctx.arena.parent(owner) != klass {
                    continue;
                }
                let outcome = process_class_member_decorator(ctx, &self.transformers, decorator)
                    .map_err(|error| Failure { error, at: decorator })?;
                record(stats, outcome);
            }
        }
        Ok(())
    }
}

fn snapshot(arena: &NodeArena, owner: NodeIndex) -> Vec<NodeIndex> {
    arena
        .decorators_of(owner)
        .map(|list| list.nodes.clone())
        .unwrap_or_default()
}

fn record(stats: &mut PassStats, outcome: Dispatch) {
    match outcome {
        Dispatch::Applied(_) => stats.applied += 1,
        Dispatch::Inert => stats.inert += 1,
    }
}
