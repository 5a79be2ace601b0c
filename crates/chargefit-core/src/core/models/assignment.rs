use super::atom_type::{AtomTypeVocabulary, UnknownAtomType};
use std::fmt;
use std::ops::Index;

/// One integer charge increment per vocabulary position.
///
/// Assignments are plain values. The search operators in the engine build new assignments
/// rather than editing existing ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assignment {
    values: Vec<i32>,
}

impl Assignment {
    pub fn new(values: Vec<i32>) -> Self {
        Self { values }
    }

    pub fn zeros(len: usize) -> Self {
        Self {
            values: vec![0; len],
        }
    }

    /// Builds an assignment by looking up every vocabulary code in turn.
    ///
    /// Fails on the first code the lookup has no value for.
    pub fn from_lookup<F>(vocabulary: &AtomTypeVocabulary, lookup: F) -> Result<Self, UnknownAtomType>
    where
        F: Fn(&str) -> Option<i32>,
    {
        let values = vocabulary
            .iter()
            .map(|(_, code)| {
                lookup(code).ok_or_else(|| UnknownAtomType {
                    code: code.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<i32> {
        self.values.get(index).copied()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.values
    }

    /// Returns a copy with position `index` set to `value`.
    pub fn with_value(&self, index: usize, value: i32) -> Self {
        let mut values = self.values.clone();
        values[index] = value;
        Self { values }
    }

    /// Number of positions at which `self` and `other` differ.
    pub fn hamming_distance(&self, other: &Assignment) -> usize {
        self.values
            .iter()
            .zip(&other.values)
            .filter(|(a, b)| a != b)
            .count()
    }
}

impl Index<usize> for Assignment {
    type Output = i32;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl From<Vec<i32>> for Assignment {
    fn from(values: Vec<i32>) -> Self {
        Self::new(values)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}
