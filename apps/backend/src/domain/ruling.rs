//! Randomized judge/jury decisions behind an injectable policy.
//!
//! Production uses an unweighted coin flip; tests substitute a
//! deterministic scripted policy.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Judge's ruling on an objection.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ruling {
    Sustained,
    Overruled,
}

impl Ruling {
    pub fn as_str(self) -> &'static str {
        match self {
            Ruling::Sustained => "sustained",
            Ruling::Overruled => "overruled",
        }
    }
}

/// Jury's verdict at the end of closing arguments.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictOutcome {
    InFavorOfPlaintiff,
    InFavorOfDefendant,
}

impl VerdictOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            VerdictOutcome::InFavorOfPlaintiff => "in_favor_of_plaintiff",
            VerdictOutcome::InFavorOfDefendant => "in_favor_of_defendant",
        }
    }
}

/// Capability for resolving judge/jury decisions.
///
/// `choose(n)` returns an index in `0..n`. The typed helpers keep the
/// choice sets in one place.
pub trait DecisionPolicy: Send + Sync {
    fn choose(&self, options: usize) -> usize;

    fn ruling(&self) -> Ruling {
        match self.choose(2) {
            0 => Ruling::Sustained,
            _ => Ruling::Overruled,
        }
    }

    fn verdict(&self) -> VerdictOutcome {
        match self.choose(2) {
            0 => VerdictOutcome::InFavorOfPlaintiff,
            _ => VerdictOutcome::InFavorOfDefendant,
        }
    }
}

/// Unweighted random choice, the production policy.
#[derive(Debug, Default)]
pub struct CoinFlip;

impl DecisionPolicy for CoinFlip {
    fn choose(&self, options: usize) -> usize {
        rand::rng().random_range(0..options)
    }
}

/// Deterministic policy for tests: yields the scripted indices in
/// order, then repeats the last one.
#[cfg(test)]
pub struct Scripted {
    choices: std::sync::Mutex<std::collections::VecDeque<usize>>,
    last: usize,
}

#[cfg(test)]
impl Scripted {
    pub fn new(choices: &[usize]) -> Self {
        Self {
            choices: std::sync::Mutex::new(choices.iter().copied().collect()),
            last: choices.last().copied().unwrap_or(0),
        }
    }
}

#[cfg(test)]
impl DecisionPolicy for Scripted {
    fn choose(&self, options: usize) -> usize {
        let mut queue = self.choices.lock().expect("scripted policy lock");
        queue.pop_front().unwrap_or(self.last).min(options - 1)
    }
}
