//! Catalog model for the medcalc formula engine.
//!
//! A catalog is a declarative description of every calculation the engine
//! can serve: categories, calculation descriptors, parameter schemas and
//! result units. It carries no executable logic; implementations live in
//! `medcalc-formula` and are matched to descriptors by name.

pub mod content_hash;
pub mod parser;
pub mod search;
pub mod types;

pub use parser::{builtin_catalog, load_catalog};
pub use types::{Calculation, Catalog, CatalogError, Category, ParamType, Parameter};
