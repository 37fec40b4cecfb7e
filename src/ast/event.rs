//! Lifecycle event AST nodes

use crate::lexer::Token;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// The three lifecycle phases of a commitment, in source order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// `create`: the commitment comes into being
    Create,
    /// `detach`: the antecedent holds and the debtor becomes bound
    Detach,
    /// `discharge`: the consequent holds and the commitment is satisfied
    Discharge,
}

impl EventKind {
    /// All phases in the order they must appear
    pub const ALL: [EventKind; 3] = [EventKind::Create, EventKind::Detach, EventKind::Discharge];

    /// The keyword token that introduces this event
    #[must_use]
    pub const fn keyword(self) -> Token {
        match self {
            EventKind::Create => Token::Create,
            EventKind::Detach => Token::Detach,
            EventKind::Discharge => Token::Discharge,
        }
    }

    /// The keyword as written in source
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EventKind::Create => "create",
            EventKind::Detach => "detach",
            EventKind::Discharge => "discharge",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event such as `create Offer [amount=10, item]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event name (the identifier after the keyword)
    pub name: SmolStr,
    /// Arguments in source order
    pub args: Vec<Arg>,
}

impl Event {
    /// Create an event with no arguments yet
    #[must_use]
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument, keeping any earlier argument with the same name
    pub fn add_arg(&mut self, arg: Arg) -> &[Arg] {
        self.args.push(arg);
        &self.args
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, "]")
    }
}

/// A data field inside an event's argument list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arg {
    /// Field name
    pub name: SmolStr,
    /// Value after `=`, if one was given
    pub value: Option<SmolStr>,
}

impl Arg {
    /// A bare field: `reason`
    #[must_use]
    pub fn named(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// A field with a value: `amount=100`
    #[must_use]
    pub fn with_value(name: impl Into<SmolStr>, value: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// The value as a string slice
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl std::fmt::Display for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={value}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}
