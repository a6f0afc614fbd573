//! Rewrite module - Guarded literal substitutions over plan files
//!
//! Provides:
//! - plan: substitution tables and their JSON form
//! - engine: the guarded read/replace/write-if-changed operation
//! - builtin: the storefront and admin migrations shipped with the tool
//! - api: command entry points
//! - error: per-file and plan errors

pub mod api;
pub mod builtin;
pub mod engine;
pub mod error;
pub mod plan;
