//! Abstract Syntax Tree for Quark specifications
//!
//! A [`Spec`] is only ever built once every part of the source has parsed,
//! so all of its fields are mandatory.

mod event;

pub use event::{Arg, Event, EventKind};

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Who is involved in the specification, and its name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    /// Specification name
    pub name: SmolStr,
    /// The party that owes
    pub debtor: SmolStr,
    /// The party that is owed
    pub creditor: SmolStr,
}

impl Constraint {
    /// Create a new constraint
    #[must_use]
    pub fn new(
        name: impl Into<SmolStr>,
        debtor: impl Into<SmolStr>,
        creditor: impl Into<SmolStr>,
    ) -> Self {
        Self {
            name: name.into(),
            debtor: debtor.into(),
            creditor: creditor.into(),
        }
    }
}

/// A complete Quark specification of a contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spec {
    /// Name and parties
    pub constraint: Constraint,
    /// The `create` event
    pub create: Event,
    /// The `detach` event
    pub detach: Event,
    /// The `discharge` event
    pub discharge: Event,
}

impl Spec {
    /// Get the event for a lifecycle phase
    #[must_use]
    pub const fn event(&self, kind: EventKind) -> &Event {
        match kind {
            EventKind::Create => &self.create,
            EventKind::Detach => &self.detach,
            EventKind::Discharge => &self.discharge,
        }
    }

    /// Iterate over the events in lifecycle order
    pub fn events(&self) -> impl Iterator<Item = (EventKind, &Event)> {
        EventKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.event(kind)))
    }
}

/// Renders the specification back to canonical single-line source
impl std::fmt::Display for Spec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Constraint {
            name,
            debtor,
            creditor,
        } = &self.constraint;
        write!(f, "spec {name} {debtor} to {creditor}")?;
        for (kind, event) in self.events() {
            write!(f, " {kind} {event}")?;
        }
        Ok(())
    }
}
