use super::tables::{REFERENCE_INCREMENTS, TIGHT_INCREMENTS, WIDE_INCREMENTS};
use crate::core::models::assignment::Assignment;
use crate::core::models::atom_type::AtomTypeVocabulary;
use rand::Rng;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainKind {
    Tight,
    Wide,
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainKind::Tight => write!(f, "tight"),
            DomainKind::Wide => write!(f, "wide"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DomainConfigError {
    #[error("Atom type '{code}' has no entry in the {kind} domain")]
    MissingCode { kind: DomainKind, code: String },
    #[error("The {kind} domain lists '{code}', which is not in the vocabulary")]
    UnknownCode { kind: DomainKind, code: String },
    #[error("Atom type '{code}' has an empty range in the {kind} domain")]
    EmptyRange { kind: DomainKind, code: String },
    #[error("Atom type '{code}' has no reference increment")]
    MissingReference { code: String },
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// A non-empty, ascending set of admissible increments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissibleRange {
    values: Vec<i32>,
}

impl AdmissibleRange {
    /// Sorts and de-duplicates `values`. Returns `None` when nothing is left.
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = i32>,
    {
        let mut values: Vec<i32> = values.into_iter().collect();
        values.sort_unstable();
        values.dedup();
        (!values.is_empty()).then_some(Self { values })
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, value: i32) -> bool {
        self.values.binary_search(&value).is_ok()
    }

    /// Draws one admissible value uniformly.
    pub fn sample(&self, rng: &mut impl Rng) -> i32 {
        self.values[rng.gen_range(0..self.values.len())]
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DomainFile {
    tight: BTreeMap<String, Vec<i32>>,
    wide: BTreeMap<String, Vec<i32>>,
}

/// Tight and wide admissible ranges for every code of a vocabulary.
///
/// Construction fails unless both kinds cover the whole vocabulary, so lookups by
/// vocabulary index never miss.
#[derive(Debug, Clone)]
pub struct ChargeDomain {
    vocabulary: AtomTypeVocabulary,
    tight: Vec<AdmissibleRange>,
    wide: Vec<AdmissibleRange>,
}

impl ChargeDomain {
    pub fn from_tables<T, W, S>(
        vocabulary: &AtomTypeVocabulary,
        tight: T,
        wide: W,
    ) -> Result<Self, DomainConfigError>
    where
        T: IntoIterator<Item = (S, Vec<i32>)>,
        W: IntoIterator<Item = (S, Vec<i32>)>,
        S: AsRef<str>,
    {
        Ok(Self {
            vocabulary: vocabulary.clone(),
            tight: resolve_ranges(vocabulary, DomainKind::Tight, tight)?,
            wide: resolve_ranges(vocabulary, DomainKind::Wide, wide)?,
        })
    }

    /// The compiled-in AMBER protein domains.
    pub fn amber(vocabulary: &AtomTypeVocabulary) -> Result<Self, DomainConfigError> {
        Self::from_tables(
            vocabulary,
            TIGHT_INCREMENTS.entries().map(|(k, v)| (*k, v.to_vec())),
            WIDE_INCREMENTS.entries().map(|(k, v)| (*k, v.to_vec())),
        )
    }

    /// Loads a domain from a TOML file with `[tight]` and `[wide]` tables.
    pub fn load(path: &Path, vocabulary: &AtomTypeVocabulary) -> Result<Self, DomainConfigError> {
        debug!("Loading charge domain from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| DomainConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let file: DomainFile = toml::from_str(&content).map_err(|e| DomainConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_tables(vocabulary, file.tight, file.wide)
    }

    pub fn vocabulary(&self) -> &AtomTypeVocabulary {
        &self.vocabulary
    }

    pub fn ranges(&self, kind: DomainKind) -> &[AdmissibleRange] {
        match kind {
            DomainKind::Tight => &self.tight,
            DomainKind::Wide => &self.wide,
        }
    }

    pub fn range(&self, kind: DomainKind, index: usize) -> &AdmissibleRange {
        &self.ranges(kind)[index]
    }

    pub fn admissible_values(&self, kind: DomainKind, code: &str) -> Option<&[i32]> {
        self.vocabulary
            .index_of(code)
            .map(|i| self.range(kind, i).values())
    }

    /// Cardinality of the Cartesian product of all ranges, or `None` on `u64` overflow.
    pub fn product_size(&self, kind: DomainKind) -> Option<u64> {
        self.ranges(kind)
            .iter()
            .try_fold(1u64, |acc, r| acc.checked_mul(r.len() as u64))
    }

    /// Whether every position of `assignment` is admissible under `kind`.
    pub fn admits(&self, kind: DomainKind, assignment: &Assignment) -> bool {
        assignment.len() == self.vocabulary.len()
            && self
                .ranges(kind)
                .iter()
                .zip(assignment.as_slice())
                .all(|(r, &v)| r.contains(v))
    }
}

fn resolve_ranges<I, S>(
    vocabulary: &AtomTypeVocabulary,
    kind: DomainKind,
    entries: I,
) -> Result<Vec<AdmissibleRange>, DomainConfigError>
where
    I: IntoIterator<Item = (S, Vec<i32>)>,
    S: AsRef<str>,
{
    let mut slots: Vec<Option<AdmissibleRange>> = vec![None; vocabulary.len()];
    for (code, values) in entries {
        let code = code.as_ref();
        let index = vocabulary
            .index_of(code)
            .ok_or_else(|| DomainConfigError::UnknownCode {
                kind,
                code: code.to_string(),
            })?;
        let range = AdmissibleRange::new(values).ok_or_else(|| DomainConfigError::EmptyRange {
            kind,
            code: code.to_string(),
        })?;
        slots[index] = Some(range);
    }
    slots
        .into_iter()
        .zip(vocabulary.codes())
        .map(|(slot, code)| {
            slot.ok_or_else(|| DomainConfigError::MissingCode {
                kind,
                code: code.clone(),
            })
        })
        .collect()
}

/// The fixed reference increments laid out for `vocabulary`.
pub fn reference_assignment(
    vocabulary: &AtomTypeVocabulary,
) -> Result<Assignment, DomainConfigError> {
    Assignment::from_lookup(vocabulary, |code| REFERENCE_INCREMENTS.get(code).copied())
        .map_err(|e| DomainConfigError::MissingReference { code: e.code })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::fs;

    fn small_vocab() -> AtomTypeVocabulary {
        AtomTypeVocabulary::new(["C", "N", "O"])
    }

    #[test]
    fn admissible_range_sorts_and_dedups() {
        let r = AdmissibleRange::new([1, -1, 0, 1]).unwrap();
        assert_eq!(r.values(), &[-1, 0, 1]);
        assert!(r.contains(0));
        assert!(!r.contains(2));
        assert!(AdmissibleRange::new(Vec::new()).is_none());
    }

    #[test]
    fn sample_stays_inside_range() {
        let r = AdmissibleRange::new([-3, 2, 7]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert!(r.contains(r.sample(&mut rng)));
        }
    }

    #[test]
    fn amber_domain_covers_amber_vocabulary() {
        let vocab = AtomTypeVocabulary::amber();
        let domain = ChargeDomain::amber(&vocab).unwrap();
        assert_eq!(domain.product_size(DomainKind::Tight), Some(20_155_392));
        assert_eq!(domain.admissible_values(DomainKind::Tight, "C"), Some(&[1][..]));
        assert_eq!(
            domain.admissible_values(DomainKind::Wide, "N2"),
            Some(&[-3, -2, -1, 0, 1, 2, 3, 4, 5][..])
        );
        assert_eq!(domain.admissible_values(DomainKind::Wide, "HO"), Some(&[1][..]));
        assert!(domain.admissible_values(DomainKind::Wide, "N*").is_none());
    }

    #[test]
    fn missing_code_is_a_configuration_error() {
        let result = ChargeDomain::from_tables(
            &small_vocab(),
            vec![("C", vec![1]), ("N", vec![-1]), ("O", vec![-1])],
            vec![("C", vec![1]), ("N", vec![-1])],
        );
        match result {
            Err(DomainConfigError::MissingCode { kind, code }) => {
                assert_eq!(kind, DomainKind::Wide);
                assert_eq!(code, "O");
            }
            other => panic!("expected MissingCode, got {:?}", other),
        }
    }

    #[test]
    fn unknown_and_empty_entries_are_rejected() {
        let unknown = ChargeDomain::from_tables(
            &small_vocab(),
            vec![("C", vec![1]), ("N", vec![0]), ("O", vec![0]), ("S", vec![0])],
            vec![("C", vec![1]), ("N", vec![0]), ("O", vec![0])],
        );
        assert!(matches!(unknown, Err(DomainConfigError::UnknownCode { .. })));

        let empty = ChargeDomain::from_tables(
            &small_vocab(),
            vec![("C", vec![]), ("N", vec![0]), ("O", vec![0])],
            vec![("C", vec![1]), ("N", vec![0]), ("O", vec![0])],
        );
        assert!(matches!(
            empty,
            Err(DomainConfigError::EmptyRange { kind: DomainKind::Tight, .. })
        ));
    }

    #[test]
    fn product_size_reports_overflow() {
        let codes: Vec<String> = (0..40).map(|i| format!("X{:02}", i)).collect();
        let vocab = AtomTypeVocabulary::new(codes.clone());
        let wide: Vec<(String, Vec<i32>)> =
            codes.iter().map(|c| (c.clone(), (0..9).collect())).collect();
        let domain = ChargeDomain::from_tables(&vocab, wide.clone(), wide).unwrap();
        assert_eq!(domain.product_size(DomainKind::Wide), None);
    }

    #[test]
    fn load_reads_toml_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("domain.toml");
        fs::write(
            &path,
            r#"
            [tight]
            C = [1]
            N = [-1, 0]
            O = [-1]

            [wide]
            C = [2, -2, 0]
            N = [-3, 3]
            O = [-2, 0]
            "#,
        )
        .unwrap();
        let domain = ChargeDomain::load(&path, &small_vocab()).unwrap();
        assert_eq!(domain.range(DomainKind::Wide, 0).values(), &[-2, 0, 2]);
        assert_eq!(domain.product_size(DomainKind::Tight), Some(2));
    }

    #[test]
    fn load_reports_toml_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("domain.toml");
        fs::write(&path, "[tight]\nC = [1]\n").unwrap();
        let result = ChargeDomain::load(&path, &small_vocab());
        assert!(matches!(result, Err(DomainConfigError::Toml { .. })));

        let missing = ChargeDomain::load(&dir.path().join("nope.toml"), &small_vocab());
        assert!(matches!(missing, Err(DomainConfigError::Io { .. })));
    }

    #[test]
    fn admits_checks_every_position() {
        let vocab = AtomTypeVocabulary::amber();
        let domain = ChargeDomain::amber(&vocab).unwrap();
        let reference = reference_assignment(&vocab).unwrap();
        assert!(domain.admits(DomainKind::Wide, &reference));
        let out_of_range = reference.with_value(0, 9);
        assert!(!domain.admits(DomainKind::Wide, &out_of_range));
        assert!(!domain.admits(DomainKind::Wide, &Assignment::zeros(3)));
    }
}
