//! Comment-preserving program generation.
//!
//! `polygen-emit` turns a typed infrastructure program into equivalent source
//! code in several target languages. Comments attached to IR nodes come out in
//! the same order, with the same text, in every target.
//!
//! # Architecture
//!
//! ```text
//! Input              IR                    Output Emitters
//! ─────────      ──────────────────      ─────────────────
//!                                      ┌─> C#     (output/csharp.rs)
//! JSON      ───> Program + CommentMap ─┼─> Go     (output/go.rs)
//! Builder        (ir/, comments.rs)    └─> Python (output/python.rs)
//! ```
//!
//! Emitters share the per-run [`format::EmissionContext`], which owns the
//! output buffer, indentation, binding table and comment placement. Each
//! emitter decides its own syntax; where a comment lands relative to the line
//! it documents is the same everywhere.
//!
//! # Example
//!
//! ```
//! use polygen_emit::{Builder, Target, generate};
//!
//! let b = Builder::new();
//! let program = b.program(vec![
//!     b.resource("bucket", "aws:s3/bucket:Bucket", vec![b.prop("acl", b.string("private"))]),
//!     b.output("bucketName", b.reference("bucket", &["id"])),
//! ]);
//!
//! let results = generate(&program, Target::ALL);
//! let python = results[&Target::Python].as_ref().unwrap();
//! assert!(python.contains("aws.s3.Bucket("));
//! ```
//!
//! # Feature Flags
//!
//! - `csharp` - C# emitter
//! - `go` - Go emitter
//! - `python` - Python emitter
//!
//! All are on by default. Requesting a target whose emitter is compiled out
//! yields [`EmitError::TargetUnavailable`].

pub mod comments;
pub mod dispatch;
pub mod format;
pub mod input;
pub mod ir;
pub mod output;
pub mod registry;
pub mod target;
pub mod traits;

pub use comments::{CommentBlock, CommentMap, CommentPosition};
pub use dispatch::{GenerateOptions, Generated, generate, generate_with};
pub use input::{read_json, read_json_file};
pub use ir::{Builder, NodeId, Program};
pub use registry::{emitter_for, emitters};
pub use target::Target;
pub use traits::{EmitError, EmitOptions, Emitter, GoOptions, ReadError};

#[cfg(feature = "csharp")]
pub use output::{CSHARP_EMITTER, CSharpEmitter};
#[cfg(feature = "go")]
pub use output::{GO_EMITTER, GoEmitter};
#[cfg(feature = "python")]
pub use output::{PYTHON_EMITTER, PythonEmitter};
