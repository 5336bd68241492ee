//! Line predicates: single token matchers, AND-groups and OR-sets of groups.
//!
//! A [`FilterSet`] is a predicate in disjunctive normal form over a single
//! line. Evaluation is pure and short-circuits.

use serde::{Deserialize, Serialize};

/// Where in the line a token has to occur.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPosition {
    Start,
    End,
    #[default]
    Anywhere,
}

/// A single "line contains/starts with/ends with token" check.
///
/// With `negate` set the matcher passes only when the positional check fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matcher {
    pub pattern: String,
    #[serde(default)]
    pub position: TokenPosition,
    #[serde(default)]
    pub negate: bool,
}

impl Matcher {
    pub fn new(pattern: impl Into<String>, position: TokenPosition) -> Self {
        Self {
            pattern: pattern.into(),
            position,
            negate: false,
        }
    }

    pub fn starts_with(pattern: impl Into<String>) -> Self {
        Self::new(pattern, TokenPosition::Start)
    }

    pub fn ends_with(pattern: impl Into<String>) -> Self {
        Self::new(pattern, TokenPosition::End)
    }

    pub fn contains(pattern: impl Into<String>) -> Self {
        Self::new(pattern, TokenPosition::Anywhere)
    }

    /// Flip the matcher into "must NOT match".
    pub fn negated(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    fn raw_check(&self, line: &str) -> bool {
        match self.position {
            TokenPosition::Start => line.starts_with(self.pattern.as_str()),
            TokenPosition::End => line.ends_with(self.pattern.as_str()),
            TokenPosition::Anywhere => line.contains(self.pattern.as_str()),
        }
    }

    pub fn evaluate(&self, line: &str) -> bool {
        self.raw_check(line) != self.negate
    }
}

/// Conjunction of matchers. An empty group passes vacuously.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Group {
    pub matchers: Vec<Matcher>,
}

impl Group {
    pub fn new(matchers: Vec<Matcher>) -> Self {
        Self { matchers }
    }

    pub fn passes(&self, line: &str) -> bool {
        self.matchers.iter().all(|m| m.evaluate(line))
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl From<Matcher> for Group {
    fn from(matcher: Matcher) -> Self {
        Self::new(vec![matcher])
    }
}

/// Disjunction of groups. An empty set never passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    pub groups: Vec<Group>,
}

impl FilterSet {
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    pub fn passes(&self, line: &str) -> bool {
        self.groups.iter().any(|g| g.passes(line))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
