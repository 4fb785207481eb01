//! Petalstack: a client-side todo state engine with filtering, derived
//! stats, a bounded undo/redo history, JSON snapshot interchange, and
//! best-effort per-record persistence.

pub mod engine;
pub mod io;
pub mod model;
pub mod ops;

pub use engine::{Changes, ImportResult, TodoEngine};
pub use io::Store;
