use super::SearchContext;
use crate::core::domain::range::{ChargeDomain, DomainKind};
use crate::core::models::assignment::Assignment;
use crate::core::scoring::{ScoredAssignment, Scorer, ScoringError};
use crate::engine::config::{ConfigError, EvolutionParams};
use crate::engine::error::EngineError;
use crate::engine::progress::Progress;
use crate::engine::state::{BestTracker, Improvement};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Solved,
    BudgetExhausted,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct EvolutionOutcome {
    /// The last population, ranked by ascending score.
    pub population: Vec<ScoredAssignment>,
    pub best: ScoredAssignment,
    pub generations: u64,
    pub termination: Termination,
    pub history: Vec<Improvement>,
}

/// Takes each position from `a` or `b` with equal probability.
pub fn crossover(a: &Assignment, b: &Assignment, rng: &mut impl Rng) -> Assignment {
    a.as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(&x, &y)| if rng.gen_bool(0.5) { x } else { y })
        .collect::<Vec<_>>()
        .into()
}

/// Redraws `rate` random positions from the wide domain.
///
/// A position may be drawn more than once, and a redraw may land on the old value, so at
/// most `rate` positions change.
pub fn mutate(
    assignment: &Assignment,
    rate: usize,
    domain: &ChargeDomain,
    rng: &mut impl Rng,
) -> Assignment {
    let mut values = assignment.as_slice().to_vec();
    if values.is_empty() {
        return values.into();
    }
    for _ in 0..rate {
        let index = rng.gen_range(0..values.len());
        values[index] = domain.range(DomainKind::Wide, index).sample(rng);
    }
    values.into()
}

/// `count` mutated crossovers of `a` and `b`.
pub fn breed(
    a: &Assignment,
    b: &Assignment,
    count: usize,
    rate: usize,
    domain: &ChargeDomain,
    rng: &mut impl Rng,
) -> Vec<Assignment> {
    (0..count)
        .map(|_| mutate(&crossover(a, b, rng), rate, domain, rng))
        .collect()
}

/// Offspring of every unordered elite pair, self-pairs first, followed by the elites.
pub fn next_generation(
    elites: &[ScoredAssignment],
    params: &EvolutionParams,
    domain: &ChargeDomain,
    rng: &mut impl Rng,
) -> Vec<Assignment> {
    let k = elites.len();
    let mut next = Vec::with_capacity(k * (k + 1) / 2 * params.offspring_per_pair + k);
    for elite in elites {
        let a = &elite.assignment;
        next.extend(breed(
            a,
            a,
            params.offspring_per_pair,
            params.self_mutation_rate,
            domain,
            rng,
        ));
    }
    for i in 0..k {
        for j in i + 1..k {
            next.extend(breed(
                &elites[i].assignment,
                &elites[j].assignment,
                params.offspring_per_pair,
                params.cross_mutation_rate,
                domain,
                rng,
            ));
        }
    }
    next.extend(elites.iter().map(|e| e.assignment.clone()));
    next
}

/// Scores every candidate and sorts by ascending score. Ties keep their input order.
fn rank(scorer: &Scorer, candidates: Vec<Assignment>) -> Vec<ScoredAssignment> {
    #[cfg(not(feature = "parallel"))]
    let iterator = candidates.into_iter();

    #[cfg(feature = "parallel")]
    let iterator = candidates.into_par_iter();

    let mut scored: Vec<ScoredAssignment> = iterator
        .map(|assignment| ScoredAssignment {
            score: scorer.score(assignment.as_slice()),
            assignment,
        })
        .collect();
    scored.sort_by_key(|s| s.score);
    scored
}

fn initial_population(
    params: &EvolutionParams,
    domain: &ChargeDomain,
    rng: &mut impl Rng,
) -> Vec<Assignment> {
    match &params.seeds {
        Some(seeds) => seeds.clone(),
        None => {
            let base: Assignment = (0..domain.vocabulary().len())
                .map(|i| domain.range(DomainKind::Wide, i).sample(rng))
                .collect::<Vec<_>>()
                .into();
            breed(&base, &base, params.population_size, 1, domain, rng)
        }
    }
}

/// Elitist evolutionary search over the wide domain.
///
/// Runs until a generation reaches score zero, the generation budget is spent, or the
/// cancellation token is set. Every outcome, cancelled ones included, carries the best
/// assignment seen.
#[instrument(skip_all, name = "evolutionary_search")]
pub fn run(
    context: &SearchContext,
    params: &EvolutionParams,
) -> Result<EvolutionOutcome, EngineError> {
    let scorer = context.scorer;
    let domain = context.domain;
    if domain.vocabulary().len() != scorer.width() {
        return Err(ScoringError::DimensionMismatch {
            expected: scorer.width(),
            found: domain.vocabulary().len(),
        }
        .into());
    }

    let mut rng = match params.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let initial = initial_population(params, domain, &mut rng);
    for seed in &initial {
        scorer.check(seed)?;
    }
    let mut population = rank(scorer, initial);
    let Some(first) = population.first() else {
        return Err(ConfigError::InvalidParameter {
            name: "seeds",
            reason: "the initial population is empty".to_string(),
        }
        .into());
    };

    info!(
        population = population.len(),
        elites = params.elite_count,
        budget = params.generation_budget,
        initial_best = first.score,
        "Starting evolutionary search."
    );
    context.reporter.report(Progress::PhaseStart {
        name: "Evolutionary search",
    });
    context.reporter.report(Progress::TaskStart {
        total_steps: params.generation_budget,
    });

    let mut tracker = BestTracker::new();
    tracker.offer(0, first.score, || first.assignment.clone());
    context.reporter.report(Progress::Improvement {
        step: 0,
        score: first.score,
    });

    let mut generation = 0u64;
    let termination = loop {
        if tracker.best_score() == Some(0) {
            break Termination::Solved;
        }
        if generation >= params.generation_budget {
            break Termination::BudgetExhausted;
        }
        if context.cancel.is_cancelled() {
            break Termination::Cancelled;
        }

        let elites = &population[..params.elite_count.clamp(1, population.len())];
        let next = next_generation(elites, params, domain, &mut rng);
        population = rank(scorer, next);
        generation += 1;

        let leader = &population[0];
        if tracker.offer(generation, leader.score, || leader.assignment.clone()) {
            debug!(generation, score = leader.score, "New best assignment.");
            context.reporter.report(Progress::Improvement {
                step: generation,
                score: leader.score,
            });
        }
        context.reporter.report(Progress::TaskAdvance { steps: 1 });
    };

    context.reporter.report(Progress::TaskFinish);
    context.reporter.report(Progress::PhaseFinish);

    let best = population[0].clone();
    let (_, history) = tracker.into_parts();
    info!(
        generations = generation,
        best = best.score,
        termination = ?termination,
        "Evolutionary search finished."
    );
    Ok(EvolutionOutcome {
        population,
        best,
        generations: generation,
        termination,
        history,
    })
}
