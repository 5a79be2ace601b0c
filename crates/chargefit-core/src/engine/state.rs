use crate::core::models::assignment::Assignment;
use crate::core::scoring::{Score, ScoredAssignment};

/// A strict improvement of the best-ever score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Improvement {
    pub step: u64, // Candidate index or generation number
    pub score: Score,
}

/// Best-ever assignment of a search and the history of how it got there.
#[derive(Debug, Clone, Default)]
pub struct BestTracker {
    best: Option<ScoredAssignment>,
    history: Vec<Improvement>,
}

impl BestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `score` if it beats the best so far. The assignment is only built on success.
    pub fn offer<F>(&mut self, step: u64, score: Score, assignment: F) -> bool
    where
        F: FnOnce() -> Assignment,
    {
        if self.best.as_ref().is_some_and(|b| score >= b.score) {
            return false;
        }
        self.best = Some(ScoredAssignment {
            score,
            assignment: assignment(),
        });
        self.history.push(Improvement { step, score });
        true
    }

    pub fn best(&self) -> Option<&ScoredAssignment> {
        self.best.as_ref()
    }

    pub fn best_score(&self) -> Option<Score> {
        self.best.as_ref().map(|b| b.score)
    }

    pub fn history(&self) -> &[Improvement] {
        &self.history
    }

    pub fn into_parts(self) -> (Option<ScoredAssignment>, Vec<Improvement>) {
        (self.best, self.history)
    }
}
