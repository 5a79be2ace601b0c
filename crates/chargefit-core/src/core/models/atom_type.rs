use crate::core::domain::tables::{REFERENCE_INCREMENTS, WIDE_INCREMENTS};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Atom type '{code}' is not part of the vocabulary")]
pub struct UnknownAtomType {
    pub code: String,
}

/// The fixed, lexicographically sorted set of AMBER atom-type codes.
///
/// The position of a code in this vocabulary is the index used by every count vector and
/// every [`Assignment`](super::assignment::Assignment). Codes are sorted by byte value, so
/// `"C*"` sits between `"C"` and `"CA"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomTypeVocabulary {
    codes: Vec<String>,
    index: HashMap<String, usize>,
}

impl AtomTypeVocabulary {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut codes: Vec<String> = codes.into_iter().map(Into::into).collect();
        codes.sort();
        codes.dedup();
        let index = codes
            .iter()
            .enumerate()
            .map(|(i, code)| (code.clone(), i))
            .collect();
        Self { codes, index }
    }

    /// The 33 protein atom types covered by the compiled-in charge domains.
    pub fn amber() -> Self {
        Self::new(WIDE_INCREMENTS.keys().copied())
    }

    /// Every code with a reference increment, including water, ions and `N*`.
    pub fn reference() -> Self {
        Self::new(REFERENCE_INCREMENTS.keys().copied())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.index.get(code).copied()
    }

    pub fn require(&self, code: &str) -> Result<usize, UnknownAtomType> {
        self.index_of(code).ok_or_else(|| UnknownAtomType {
            code: code.to_string(),
        })
    }

    pub fn code(&self, index: usize) -> Option<&str> {
        self.codes.get(index).map(String::as_str)
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.codes.iter().map(String::as_str).enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_sorted_and_deduplicated() {
        let vocab = AtomTypeVocabulary::new(["CT", "C", "HO", "C*", "CA", "CT"]);
        assert_eq!(vocab.codes(), &["C", "C*", "CA", "CT", "HO"]);
        assert_eq!(vocab.len(), 5);
    }

    #[test]
    fn index_follows_sorted_position() {
        let vocab = AtomTypeVocabulary::new(["N2", "CT", "HO"]);
        assert_eq!(vocab.index_of("CT"), Some(0));
        assert_eq!(vocab.index_of("HO"), Some(1));
        assert_eq!(vocab.index_of("N2"), Some(2));
        assert_eq!(vocab.code(2), Some("N2"));
        assert_eq!(vocab.code(3), None);
    }

    #[test]
    fn require_reports_unknown_code() {
        let vocab = AtomTypeVocabulary::new(["CT"]);
        let err = vocab.require("N*").unwrap_err();
        assert_eq!(err.code, "N*");
    }

    #[test]
    fn amber_vocabulary_has_expected_layout() {
        let vocab = AtomTypeVocabulary::amber();
        assert_eq!(vocab.len(), 33);
        assert_eq!(vocab.code(0), Some("C"));
        assert_eq!(vocab.code(1), Some("C*"));
        assert_eq!(vocab.code(2), Some("CA"));
        assert_eq!(vocab.index_of("SH"), Some(32));
        assert!(vocab.index_of("N*").is_none());
    }

    #[test]
    fn reference_vocabulary_extends_amber() {
        let amber = AtomTypeVocabulary::amber();
        let reference = AtomTypeVocabulary::reference();
        assert_eq!(reference.len(), 46);
        assert!(amber.codes().iter().all(|c| reference.index_of(c).is_some()));
        for code in ["N*", "HW", "OW", "CL", "QK"] {
            assert!(reference.index_of(code).is_some(), "{} missing", code);
        }
    }
}
