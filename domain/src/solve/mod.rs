//! Solve records and response parsing
//!
//! The types here are immutable value objects handed between the three
//! phases and the loop controller. The only accumulation is the append-only
//! audit list of [`CheckRecord`]s carried in [`SolveMetadata`].
//!
//! [`CheckRecord`]: value_objects::CheckRecord
//! [`SolveMetadata`]: value_objects::SolveMetadata

pub mod parsing;
pub mod value_objects;
