//! Built-in lint rules, grouped by target framework.

pub mod react;
