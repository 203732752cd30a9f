//! Target emitters - render IR as source code.

#[cfg(feature = "csharp")]
pub mod csharp;

#[cfg(feature = "csharp")]
pub use csharp::{CSHARP_EMITTER, CSharpEmitter, CSharpWriter};

#[cfg(feature = "go")]
pub mod go;

#[cfg(feature = "go")]
pub use go::{GO_EMITTER, GoEmitter, GoWriter};

#[cfg(feature = "python")]
pub mod python;

#[cfg(feature = "python")]
pub use python::{PYTHON_EMITTER, PythonEmitter, PythonWriter};
