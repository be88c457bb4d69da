//! Integration tests for Book parsing, resolution and compilation

mod cache_invalidation;
mod config_layering;
mod diagnostics;
mod fold_determinism;
mod imports;
mod inheritance;
mod support;
mod team_resolution;
