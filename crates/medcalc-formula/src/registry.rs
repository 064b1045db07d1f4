//! Name-keyed registry of formula implementations.
//!
//! Registration happens on a [`RegistryBuilder`]; [`RegistryBuilder::build`]
//! consumes it and returns an immutable [`Registry`], so nothing can be
//! registered once invocations are being served.
//!
//! Registering a name twice replaces the earlier implementation (last
//! registration wins). Every such replacement is recorded as a
//! [`Collision`] so catalog authors can spot unintended overwrites.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::value::{Args, DomainError, Outcome};

/// Signature every formula implementation has.
pub type FormulaFn = fn(&Args) -> Result<Outcome, DomainError>;

/// A registered implementation plus the parameter names it reads.
#[derive(Debug, Clone, Copy)]
pub struct Formula {
    /// Keys the implementation expects in its [`Args`].
    pub params: &'static [&'static str],
    eval: FormulaFn,
}

impl Formula {
    pub fn new(params: &'static [&'static str], eval: FormulaFn) -> Self {
        Self { params, eval }
    }

    pub fn evaluate(&self, args: &Args) -> Result<Outcome, DomainError> {
        (self.eval)(args)
    }
}

/// A name that was registered more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub name: String,
    /// Total number of registrations; the last one is the live entry.
    pub registrations: usize,
}

/// Mutable registration phase.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: HashMap<String, Formula>,
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `name` with an implementation. A later call with the same
    /// name silently replaces this one.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        params: &'static [&'static str],
        eval: FormulaFn,
    ) -> &mut Self {
        let name = name.into();
        let count = self.counts.entry(name.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            self.order.push(name.clone());
        } else {
            debug!(%name, registrations = *count, "formula re-registered, replacing earlier entry");
        }
        self.entries.insert(name, Formula::new(params, eval));
        self
    }

    /// Freeze the registry.
    pub fn build(self) -> Registry {
        let collisions = self
            .order
            .iter()
            .filter_map(|name| {
                let registrations = self.counts.get(name).copied().unwrap_or(0);
                (registrations > 1).then(|| Collision {
                    name: name.clone(),
                    registrations,
                })
            })
            .collect();

        Registry {
            entries: self.entries,
            order: self.order,
            collisions,
        }
    }
}

/// Immutable name → implementation mapping.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: HashMap<String, Formula>,
    order: Vec<String>,
    collisions: Vec<Collision>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Look up the live implementation for `name`.
    pub fn resolve(&self, name: &str) -> Option<&Formula> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in first-registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Names registered more than once, in first-registration order.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
