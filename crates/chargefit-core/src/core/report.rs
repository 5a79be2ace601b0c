use crate::core::models::assignment::Assignment;
use crate::core::models::atom_type::AtomTypeVocabulary;
use crate::core::models::residue::ResidueCatalog;
use crate::core::scoring::{Score, ScoredAssignment, ScoringError};
use std::fmt;

/// An assignment rendered as one `code increment` line per vocabulary position.
pub struct AssignmentTable<'a> {
    vocabulary: &'a AtomTypeVocabulary,
    assignment: &'a Assignment,
}

impl<'a> AssignmentTable<'a> {
    pub fn new(vocabulary: &'a AtomTypeVocabulary, assignment: &'a Assignment) -> Self {
        Self {
            vocabulary,
            assignment,
        }
    }

    /// `(code, increment)` pairs in vocabulary order.
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, i32)> + '_ {
        self.vocabulary
            .iter()
            .zip(self.assignment.as_slice())
            .map(|((_, code), &value)| (code, value))
    }
}

impl fmt::Display for AssignmentTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (code, value) in self.entries() {
            writeln!(f, "{:<3} {:>3}", code, value)?;
        }
        Ok(())
    }
}

/// One atom type's share of a residue's implied charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeContribution {
    pub code: String,
    pub count: u32,
    pub increment: i32,
}

impl TypeContribution {
    pub fn contribution(&self) -> i64 {
        self.count as i64 * self.increment as i64
    }
}

/// A residue whose implied charge differs from its declared charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discrepancy {
    pub name: String,
    pub declared: i64,
    pub implied: i64,
    pub breakdown: Vec<TypeContribution>,
}

impl Discrepancy {
    pub fn error(&self) -> u64 {
        (self.implied - self.declared).unsigned_abs()
    }
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:5} {:2} {:2} {{", self.name, self.declared, self.implied)?;
        for (i, part) in self.breakdown.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(
                f,
                "{}: {}x{}={}",
                part.code,
                part.count,
                part.increment,
                part.contribution()
            )?;
        }
        write!(f, "}}")
    }
}

/// Every disagreeing residue of a catalog under one assignment, plus the total error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscrepancyReport {
    pub discrepancies: Vec<Discrepancy>,
    pub total_error: Score,
}

impl DiscrepancyReport {
    pub fn new(catalog: &ResidueCatalog, assignment: &Assignment) -> Result<Self, ScoringError> {
        let vocabulary = catalog.vocabulary();
        if assignment.len() != vocabulary.len() {
            return Err(ScoringError::DimensionMismatch {
                expected: vocabulary.len(),
                found: assignment.len(),
            });
        }

        let mut discrepancies = Vec::new();
        for residue in catalog.iter() {
            let breakdown: Vec<TypeContribution> = residue
                .present_types()
                .map(|i| TypeContribution {
                    code: vocabulary.codes()[i].clone(),
                    count: residue.counts()[i],
                    increment: assignment[i],
                })
                .collect();
            let implied: i64 = breakdown.iter().map(TypeContribution::contribution).sum();
            let declared = residue.charge as i64;
            if implied != declared {
                discrepancies.push(Discrepancy {
                    name: residue.name.clone(),
                    declared,
                    implied,
                    breakdown,
                });
            }
        }

        let total_error = discrepancies.iter().map(Discrepancy::error).sum();
        Ok(Self {
            discrepancies,
            total_error,
        })
    }

    pub fn is_consistent(&self) -> bool {
        self.discrepancies.is_empty()
    }
}

impl fmt::Display for DiscrepancyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.discrepancies {
            writeln!(f, "{}", d)?;
        }
        writeln!(f, "{}", self.total_error)
    }
}

/// A ranked population: the score of every member, then the top members in full.
pub struct PopulationDump<'a> {
    population: &'a [ScoredAssignment],
    top: usize,
}

impl<'a> PopulationDump<'a> {
    /// `population` is expected sorted by ascending score.
    pub fn new(population: &'a [ScoredAssignment], top: usize) -> Self {
        Self { population, top }
    }
}

impl fmt::Display for PopulationDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, member) in self.population.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", member.score)?;
        }
        writeln!(f, "]")?;
        for member in self.population.iter().take(self.top) {
            writeln!(f, "{:3} {}", member.score, member.assignment)?;
        }
        Ok(())
    }
}
