//! Multi-target generation.
//!
//! Every requested target is emitted independently against the same shared
//! [`Program`]. A failing target never affects the others, and parallel and
//! sequential runs produce identical results.

use crate::ir::Program;
use crate::registry::emitter_for;
use crate::target::Target;
use crate::traits::{EmitError, EmitOptions};
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, debug_span, warn};

/// Per-target results of a generation run.
pub type Generated = BTreeMap<Target, Result<String, EmitError>>;

/// Options for [`generate_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Emit targets on the rayon thread pool.
    pub parallel: bool,
    pub emit: EmitOptions,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            emit: EmitOptions::default(),
        }
    }
}

/// Emit `program` for each target with default options.
pub fn generate(program: &Program, targets: impl IntoIterator<Item = Target>) -> Generated {
    generate_with(program, targets, &GenerateOptions::default())
}

/// Emit `program` for each target. Duplicate targets are emitted once.
pub fn generate_with(
    program: &Program,
    targets: impl IntoIterator<Item = Target>,
    options: &GenerateOptions,
) -> Generated {
    let mut targets: Vec<Target> = targets.into_iter().collect();
    targets.sort();
    targets.dedup();

    if options.parallel && targets.len() > 1 {
        targets
            .par_iter()
            .map(|&target| (target, emit_one(program, target, &options.emit)))
            .collect()
    } else {
        targets
            .iter()
            .map(|&target| (target, emit_one(program, target, &options.emit)))
            .collect()
    }
}

fn emit_one(program: &Program, target: Target, options: &EmitOptions) -> Result<String, EmitError> {
    let _span = debug_span!("emit", %target).entered();
    let emitter = emitter_for(target).ok_or(EmitError::TargetUnavailable(target))?;
    match emitter.emit(program, options) {
        Ok(source) => {
            debug!(bytes = source.len(), lines = source.lines().count(), "emitted");
            Ok(source)
        }
        Err(err) => {
            warn!(%err, "emission failed");
            Err(err)
        }
    }
}
