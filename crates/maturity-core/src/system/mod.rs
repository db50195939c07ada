//! # System Module
//!
//! Maturity stage ordering and stage status.
//!
//! Stages are data, not strings: the enumeration carries its own index and
//! every gating decision downstream compares indices.

mod stage;

pub use stage::*;
