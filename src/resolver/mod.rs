//! # Identifier resolution.
//!
//! String listener/subscriber references are turned into values by a
//! [`Resolver`] injected into the dispatcher. [`Container`] is a small
//! id-keyed implementation with singleton and factory bindings.

mod container;
mod resolver;

pub use container::Container;
pub use resolver::{Binding, Resolver, ResolverRef};
