//! Edgeplane Core
//!
//! Resource mapping primitives: attribute sets and schemas, composite
//! identifiers, set reconciliation, the CRUD handler traits and the
//! managed object lifecycle.

pub mod config;
pub mod context;
pub mod id;
pub mod lifecycle;
pub mod output;
pub mod payload;
pub mod provider;
pub mod reconcile;
pub mod registry;
pub mod resource;
pub mod schema;
