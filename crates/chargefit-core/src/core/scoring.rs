use crate::core::models::assignment::Assignment;
use crate::core::models::residue::ResidueCatalog;
use thiserror::Error;

/// Total absolute charge error of an assignment. Zero means every residue matches.
pub type Score = u64;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("Assignment has {found} positions but the vocabulary has {expected}")]
    DimensionMismatch { expected: usize, found: usize },
}

/// An assignment together with its score.
///
/// Ordered by score alone, lowest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredAssignment {
    pub score: Score,
    pub assignment: Assignment,
}

impl PartialOrd for ScoredAssignment {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredAssignment {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.score.cmp(&other.score)
    }
}

/// Per-residue outcome of an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidueError<'a> {
    pub name: &'a str,
    pub declared: i64,
    pub implied: i64,
}

impl ResidueError<'_> {
    pub fn error(&self) -> u64 {
        (self.implied - self.declared).unsigned_abs()
    }
}

/// Scores assignments against a fixed catalog.
///
/// The catalog is flattened once into a row-major residue × vocabulary count matrix, so
/// scoring never touches the catalog or allocates.
#[derive(Debug, Clone)]
pub struct Scorer {
    names: Vec<String>,
    width: usize,
    counts: Vec<i64>,
    charges: Vec<i64>,
}

impl Scorer {
    pub fn new(catalog: &ResidueCatalog) -> Self {
        let width = catalog.vocabulary().len();
        let mut names = Vec::with_capacity(catalog.len());
        let mut counts = Vec::with_capacity(catalog.len() * width);
        let mut charges = Vec::with_capacity(catalog.len());
        for residue in catalog.iter() {
            names.push(residue.name.clone());
            counts.extend(residue.counts().iter().map(|&n| n as i64));
            charges.push(residue.charge as i64);
        }
        Self {
            names,
            width,
            counts,
            charges,
        }
    }

    /// Number of assignment positions this scorer expects.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn residue_count(&self) -> usize {
        self.charges.len()
    }

    fn row(&self, residue_index: usize) -> &[i64] {
        &self.counts[residue_index * self.width..(residue_index + 1) * self.width]
    }

    /// Net charge residue `residue_index` carries under `assignment`.
    #[inline]
    pub fn implied_charge(&self, residue_index: usize, assignment: &[i32]) -> i64 {
        self.row(residue_index)
            .iter()
            .zip(assignment)
            .map(|(&n, &v)| n * v as i64)
            .sum()
    }

    /// Sum over residues of `|implied - declared|`.
    ///
    /// `assignment` must have [`Scorer::width`] positions; use [`Scorer::try_score`] when
    /// that is not already guaranteed.
    #[inline]
    pub fn score(&self, assignment: &[i32]) -> Score {
        debug_assert_eq!(assignment.len(), self.width);
        (0..self.charges.len())
            .map(|r| (self.implied_charge(r, assignment) - self.charges[r]).unsigned_abs())
            .sum()
    }

    pub fn try_score(&self, assignment: &Assignment) -> Result<Score, ScoringError> {
        self.check(assignment)?;
        Ok(self.score(assignment.as_slice()))
    }

    pub fn check(&self, assignment: &Assignment) -> Result<(), ScoringError> {
        if assignment.len() != self.width {
            return Err(ScoringError::DimensionMismatch {
                expected: self.width,
                found: assignment.len(),
            });
        }
        Ok(())
    }

    /// Declared and implied charge of every residue, in row order.
    pub fn residue_errors(
        &self,
        assignment: &Assignment,
    ) -> Result<Vec<ResidueError<'_>>, ScoringError> {
        self.check(assignment)?;
        Ok(self
            .names
            .iter()
            .enumerate()
            .map(|(r, name)| ResidueError {
                name,
                declared: self.charges[r],
                implied: self.implied_charge(r, assignment.as_slice()),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::range::reference_assignment;
    use crate::core::io::fixtures;
    use crate::core::models::atom_type::AtomTypeVocabulary;
    use crate::core::models::residue::Residue;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn two_residue_catalog() -> ResidueCatalog {
        let vocab = AtomTypeVocabulary::new(["A", "B"]);
        ResidueCatalog::from_residues(
            vocab.clone(),
            [
                Residue::from_atom_types("X", 1, &vocab, &["A", "A", "B"]).unwrap(),
                Residue::from_atom_types("Y", 0, &vocab, &["A", "B"]).unwrap(),
            ],
        )
    }

    #[test]
    fn two_residue_scores() {
        let scorer = Scorer::new(&two_residue_catalog());
        assert_eq!(scorer.score(&[1, -1]), 0);
        assert_eq!(scorer.score(&[1, 1]), 4);
        assert_eq!(scorer.implied_charge(0, &[1, 1]), 3);
        assert_eq!(scorer.implied_charge(1, &[1, 1]), 2);
    }

    #[test]
    fn score_is_zero_exactly_when_every_residue_matches() {
        let catalog = two_residue_catalog();
        let scorer = Scorer::new(&catalog);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let a = Assignment::new(vec![rng.gen_range(-3..=3), rng.gen_range(-3..=3)]);
            let errors = scorer.residue_errors(&a).unwrap();
            let all_match = errors.iter().all(|e| e.implied == e.declared);
            let score = scorer.try_score(&a).unwrap();
            assert_eq!(score == 0, all_match, "assignment {}", a);
            assert_eq!(score, errors.iter().map(ResidueError::error).sum::<u64>());
        }
    }

    #[test]
    fn reference_reproduces_consistent_templates() {
        let catalog = fixtures::catalog(fixtures::REFERENCE_CONSISTENT);
        let scorer = Scorer::new(&catalog);
        let reference = reference_assignment(catalog.vocabulary()).unwrap();
        assert_eq!(scorer.try_score(&reference).unwrap(), 0);
    }

    #[test]
    fn reference_misses_hip_by_one() {
        let names: Vec<&str> = fixtures::TEMPLATES.iter().map(|(n, _, _)| *n).collect();
        let catalog = fixtures::catalog(&names);
        let scorer = Scorer::new(&catalog);
        let reference = reference_assignment(catalog.vocabulary()).unwrap();
        assert_eq!(scorer.try_score(&reference).unwrap(), 1);

        let errors = scorer.residue_errors(&reference).unwrap();
        let wrong: Vec<_> = errors.iter().filter(|e| e.error() > 0).collect();
        assert_eq!(wrong.len(), 1);
        assert_eq!(wrong[0].name, "HIP");
        assert_eq!((wrong[0].declared, wrong[0].implied), (1, 0));
    }

    #[test]
    fn wrong_length_is_rejected() {
        let scorer = Scorer::new(&two_residue_catalog());
        assert_eq!(
            scorer.try_score(&Assignment::zeros(3)),
            Err(ScoringError::DimensionMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn empty_vocabulary_scores_declared_charges() {
        let vocab = AtomTypeVocabulary::new(Vec::<String>::new());
        let catalog = ResidueCatalog::from_residues(
            vocab.clone(),
            [
                Residue::from_atom_types("P", 2, &vocab, &[]).unwrap(),
                Residue::from_atom_types("Q", -1, &vocab, &[]).unwrap(),
            ],
        );
        assert_eq!(Scorer::new(&catalog).score(&[]), 3);
    }
}
