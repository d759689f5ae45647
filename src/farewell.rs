//! Messages shown when the user backs out of a picker.
use rand::seq::IndexedRandom;

const MESSAGES: &[&str] = &[
    "Nothing picked, nothing changed.",
    "Maybe next time.",
    "Left everything as it was.",
    "No selection, no harm done.",
    "Cancelled. Your sessions are safe.",
];

pub trait Farewell {
    fn message(&mut self) -> &'static str;
}

/// Picks uniformly from a fixed list.
#[derive(Debug, Default)]
pub struct RandomFarewell;

impl Farewell for RandomFarewell {
    fn message(&mut self) -> &'static str {
        MESSAGES.choose(&mut rand::rng()).copied().unwrap_or(MESSAGES[0])
    }
}

/// Always says the same thing.
#[derive(Debug, Clone, Copy)]
pub struct FixedFarewell(pub &'static str);

impl Farewell for FixedFarewell {
    fn message(&mut self) -> &'static str {
        self.0
    }
}
