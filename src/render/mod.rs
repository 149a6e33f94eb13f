//! Debug renderers for the score tree.
//!
//! Both renderers consume only the read-only traversal surface
//! ([`NodeView`](crate::NodeView)), so they can draw any tree the facade
//! exposes through [`ScoreBoard::with_view`](crate::ScoreBoard::with_view)
//! without touching tree internals. They are inspection tools, not part of
//! the stable query contract.

pub mod ascii;
pub mod dot;
