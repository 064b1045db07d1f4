//! Formula registry and invocation engine.
//!
//! A [`Registry`] maps calculation names to implementations. The [`Engine`]
//! pairs it with a [`medcalc_core::Catalog`] and turns a request of
//! `(category slug, calculation name, raw string inputs)` into either a
//! [`Computation`] or a structured [`InvocationError`].

pub mod coerce;
pub mod engine;
pub mod formulas;
pub mod integrity;
pub mod math;
pub mod registry;
pub mod value;

pub use coerce::{ValidationError, validate};
pub use engine::{Computation, Engine, ErrorReport, InvocationError};
pub use formulas::builtin_registry;
pub use integrity::IntegrityReport;
pub use registry::{Collision, Formula, FormulaFn, Registry, RegistryBuilder};
pub use value::{Args, DomainError, Outcome, Value};
