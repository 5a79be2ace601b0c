use super::SearchContext;
use crate::core::domain::range::{ChargeDomain, DomainKind};
use crate::core::models::assignment::Assignment;
use crate::core::scoring::{Score, ScoredAssignment, Scorer, ScoringError};
use crate::engine::config::{ConfigError, ExhaustiveParams};
use crate::engine::error::EngineError;
use crate::engine::progress::Progress;
use crate::engine::state::{BestTracker, Improvement};
use std::io::Write;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Candidates scanned by one worker before its results are handed back for merging.
const CHUNK_SIZE: u64 = 1 << 14;

/// The Cartesian product of one admissible range per vocabulary position.
///
/// Candidates are numbered in mixed radix with the last position varying fastest, so every
/// index in `0..len()` names exactly one assignment and an enumeration can resume at any
/// index.
#[derive(Debug, Clone)]
pub struct ProductSpace {
    values: Vec<Vec<i32>>,
    len: u64,
}

impl ProductSpace {
    pub fn new(domain: &ChargeDomain, kind: DomainKind) -> Result<Self, EngineError> {
        let len = domain
            .product_size(kind)
            .ok_or(EngineError::SearchSpaceTooLarge { kind })?;
        let values = domain
            .ranges(kind)
            .iter()
            .map(|r| r.values().to_vec())
            .collect();
        Ok(Self { values, len })
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn width(&self) -> usize {
        self.values.len()
    }

    fn digits_at(&self, index: u64) -> Option<Vec<usize>> {
        if index >= self.len {
            return None;
        }
        let mut rest = index;
        let mut digits = vec![0; self.values.len()];
        for (digit, values) in digits.iter_mut().zip(&self.values).rev() {
            let radix = values.len() as u64;
            *digit = (rest % radix) as usize;
            rest /= radix;
        }
        Some(digits)
    }

    pub fn assignment_at(&self, index: u64) -> Option<Assignment> {
        self.cursor_at(index)
            .map(|cursor| Assignment::new(cursor.current().to_vec()))
    }

    pub fn cursor_at(&self, index: u64) -> Option<ProductCursor<'_>> {
        let digits = self.digits_at(index)?;
        let current = digits
            .iter()
            .zip(&self.values)
            .map(|(&d, values)| values[d])
            .collect();
        Some(ProductCursor {
            space: self,
            digits,
            current,
            index,
        })
    }

    /// Owned assignments from `start` to the end of the product.
    pub fn iter_from(&self, start: u64) -> ProductIter<'_> {
        ProductIter {
            cursor: self.cursor_at(start),
        }
    }
}

/// A position in a [`ProductSpace`] that steps forward without allocating.
#[derive(Debug, Clone)]
pub struct ProductCursor<'a> {
    space: &'a ProductSpace,
    digits: Vec<usize>,
    current: Vec<i32>,
    index: u64,
}

impl ProductCursor<'_> {
    pub fn current(&self) -> &[i32] {
        &self.current
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    /// Moves to the next candidate. Returns `false`, leaving the cursor in place, at the end.
    pub fn advance(&mut self) -> bool {
        if self.index + 1 >= self.space.len {
            return false;
        }
        for pos in (0..self.digits.len()).rev() {
            let values = &self.space.values[pos];
            self.digits[pos] += 1;
            if self.digits[pos] < values.len() {
                self.current[pos] = values[self.digits[pos]];
                break;
            }
            self.digits[pos] = 0;
            self.current[pos] = values[0];
        }
        self.index += 1;
        true
    }
}

pub struct ProductIter<'a> {
    cursor: Option<ProductCursor<'a>>,
}

impl Iterator for ProductIter<'_> {
    type Item = Assignment;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.as_mut()?;
        let item = Assignment::new(cursor.current().to_vec());
        if !cursor.advance() {
            self.cursor = None;
        }
        Some(item)
    }
}

#[derive(Debug, Clone)]
pub struct ExhaustiveOutcome {
    pub best: Option<ScoredAssignment>,
    pub visited: u64,
    pub hits: u64,
    pub start_index: u64,
    /// Index to resume from; equal to the product size once the enumeration finished.
    pub next_index: u64,
    pub completed: bool,
    pub history: Vec<Improvement>,
}

#[derive(Default)]
struct ChunkResult {
    improvements: Vec<(u64, Score, Vec<i32>)>, // Prefix minima of the chunk
    hits: Vec<(u64, Score, Vec<i32>)>,
}

fn scan_chunk(
    space: &ProductSpace,
    scorer: &Scorer,
    start: u64,
    end: u64,
    threshold: Score,
) -> ChunkResult {
    let mut result = ChunkResult::default();
    let Some(mut cursor) = space.cursor_at(start) else {
        return result;
    };
    let mut local_best: Option<Score> = None;
    loop {
        let values = cursor.current();
        let score = scorer.score(values);
        if local_best.is_none_or(|best| score < best) {
            local_best = Some(score);
            result
                .improvements
                .push((cursor.index(), score, values.to_vec()));
        }
        if score < threshold {
            result.hits.push((cursor.index(), score, values.to_vec()));
        }
        if cursor.index() + 1 >= end || !cursor.advance() {
            break;
        }
    }
    result
}

fn chunk_bounds(start: u64, end: u64) -> Vec<(u64, u64)> {
    let mut bounds = Vec::new();
    let mut lo = start;
    while lo < end {
        let hi = lo.saturating_add(CHUNK_SIZE).min(end);
        bounds.push((lo, hi));
        lo = hi;
    }
    bounds
}

fn write_hit(sink: &mut dyn Write, score: Score, values: Vec<i32>) -> Result<(), EngineError> {
    write!(sink, "{}\n{}\n", score, Assignment::new(values))
        .map_err(|source| EngineError::Output { source })
}

/// Enumerates the tight domain from `params.start_index`, block by block.
///
/// Every candidate scoring below `params.threshold` is appended to `sink` as a score line
/// followed by the vector. Within a block, chunks are scored independently and merged in
/// index order, so improvements and hits do not depend on how the work was split.
#[instrument(skip_all, name = "exhaustive_search")]
pub fn run(
    context: &SearchContext,
    params: &ExhaustiveParams,
    sink: &mut dyn Write,
) -> Result<ExhaustiveOutcome, EngineError> {
    if params.block_size == 0 {
        return Err(ConfigError::InvalidParameter {
            name: "block_size",
            reason: "must be greater than zero".to_string(),
        }
        .into());
    }
    let space = ProductSpace::new(context.domain, DomainKind::Tight)?;
    if space.width() != context.scorer.width() {
        return Err(ScoringError::DimensionMismatch {
            expected: context.scorer.width(),
            found: space.width(),
        }
        .into());
    }
    if params.start_index > space.len() {
        return Err(EngineError::StartOutOfRange {
            start: params.start_index,
            len: space.len(),
        });
    }

    info!(
        candidates = space.len(),
        start = params.start_index,
        threshold = params.threshold,
        "Starting exhaustive enumeration."
    );
    context.reporter.report(Progress::PhaseStart {
        name: "Exhaustive search",
    });
    context.reporter.report(Progress::TaskStart {
        total_steps: space.len() - params.start_index,
    });

    let mut tracker = BestTracker::new();
    let mut hits = 0u64;
    let mut index = params.start_index;

    while index < space.len() {
        if context.cancel.is_cancelled() {
            info!(next_index = index, "Exhaustive search cancelled.");
            break;
        }
        let end = index.saturating_add(params.block_size).min(space.len());
        let bounds = chunk_bounds(index, end);

        #[cfg(not(feature = "parallel"))]
        let iterator = bounds.iter();

        #[cfg(feature = "parallel")]
        let iterator = bounds.par_iter();

        let results: Vec<ChunkResult> = iterator
            .map(|&(lo, hi)| scan_chunk(&space, context.scorer, lo, hi, params.threshold))
            .collect();

        let mut zero_at = None;
        'merge: for chunk in &results {
            for (at, score, values) in &chunk.improvements {
                if tracker.offer(*at, *score, || Assignment::new(values.clone())) {
                    debug!(index = at, score, "New best assignment.");
                    context.reporter.report(Progress::Improvement {
                        step: *at,
                        score: *score,
                    });
                    if *score == 0 && params.stop_at_zero {
                        zero_at = Some(*at);
                        break 'merge;
                    }
                }
            }
        }

        let last = zero_at.unwrap_or(end - 1);
        for chunk in results {
            for (_, score, values) in chunk.hits.into_iter().filter(|(at, _, _)| *at <= last) {
                write_hit(sink, score, values)?;
                hits += 1;
            }
        }

        context.reporter.report(Progress::TaskAdvance {
            steps: last + 1 - index,
        });
        index = last + 1;
        if zero_at.is_some() {
            info!(index = last, "Found an exact assignment; stopping early.");
            break;
        }
    }
    sink.flush().map_err(|source| EngineError::Output { source })?;

    context.reporter.report(Progress::TaskFinish);
    context.reporter.report(Progress::PhaseFinish);

    let (best, history) = tracker.into_parts();
    let outcome = ExhaustiveOutcome {
        best,
        visited: index - params.start_index,
        hits,
        start_index: params.start_index,
        next_index: index,
        completed: index == space.len(),
        history,
    };
    info!(
        visited = outcome.visited,
        hits = outcome.hits,
        best = ?outcome.best.as_ref().map(|b| b.score),
        "Exhaustive search finished."
    );
    Ok(outcome)
}
