//! Registry of compiled-in emitters.
//!
//! The target set is closed: each [`Target`] maps to at most one static
//! emitter, chosen by cargo feature at build time.

use crate::target::Target;
use crate::traits::Emitter;

/// Get the emitter for a target, if it was compiled in.
pub fn emitter_for(target: Target) -> Option<&'static dyn Emitter> {
    match target {
        #[cfg(feature = "csharp")]
        Target::CSharp => Some(&crate::output::csharp::CSHARP_EMITTER),
        #[cfg(feature = "go")]
        Target::Go => Some(&crate::output::go::GO_EMITTER),
        #[cfg(feature = "python")]
        Target::Python => Some(&crate::output::python::PYTHON_EMITTER),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

/// Get all compiled-in emitters, in target order.
pub fn emitters() -> Vec<&'static dyn Emitter> {
    Target::ALL.iter().filter_map(|t| emitter_for(*t)).collect()
}
