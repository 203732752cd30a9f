//! Input readers - load IR produced by a front end.

pub mod json;

pub use json::{read_json, read_json_file};
