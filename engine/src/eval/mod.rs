//! Demand-driven graph evaluation.
//!
//! The executor resolves a node to a runtime value by recursive descent:
//! scope short-circuit first, then argument resolution, then per-variant
//! execute logic. Pure function applications are memoized per call-site
//! node; block nodes become invocable closures instead of being evaluated.

pub mod executor;
pub mod memo;
pub mod preview;
