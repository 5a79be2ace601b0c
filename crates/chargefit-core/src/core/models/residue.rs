use super::atom_type::{AtomTypeVocabulary, UnknownAtomType};
use std::collections::BTreeMap;

/// Residue templates of the original amino-acid set.
///
/// The tyrosine variants and neutral lysine (LYN) are not part of the default set.
pub const DEFAULT_RESIDUE_NAMES: &[&str] = &[
    "ALA", "ALA_C", "ALA_N", "ARG", "ARG_C", "ARG_N", "ASH", "ASN", "ASN_C", "ASN_N", "ASP",
    "ASP_C", "ASP_N", "CYM", "CYS", "CYS_C", "CYS_N", "CYX", "CYX_C", "CYX_N", "GLH", "GLN",
    "GLN_C", "GLN_N", "GLU", "GLU_C", "GLU_N", "GLY", "GLY_C", "GLY_N", "HID", "HID_C", "HID_N",
    "HIE", "HIE_C", "HIE_N", "HIP", "HIP_C", "HIP_N", "HIS", "HIS_C", "HIS_N", "ILE", "ILE_C",
    "ILE_N", "LEU", "LEU_C", "LEU_N", "LYS", "LYS_C", "LYS_N", "MET", "MET_C", "MET_N", "PHE",
    "PHE_C", "PHE_N", "PRO", "PRO_C", "PRO_N", "SER", "SER_C", "SER_N", "THR", "THR_C", "THR_N",
    "TRP", "TRP_C", "TRP_N", "VAL", "VAL_C", "VAL_N",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub name: String,         // Template name, e.g. "HIP_N"
    pub charge: i32,          // Declared net charge
    counts: Vec<u32>,         // Number of atoms per vocabulary index
}

impl Residue {
    pub(crate) fn new(name: &str, charge: i32, vocabulary_len: usize) -> Self {
        Self {
            name: name.to_string(),
            charge,
            counts: vec![0; vocabulary_len],
        }
    }

    pub(crate) fn push_atom(&mut self, type_index: usize) {
        self.counts[type_index] += 1;
    }

    /// Builds a residue directly from its atom-type codes.
    pub fn from_atom_types(
        name: &str,
        charge: i32,
        vocabulary: &AtomTypeVocabulary,
        codes: &[&str],
    ) -> Result<Self, UnknownAtomType> {
        let mut residue = Self::new(name, charge, vocabulary.len());
        for code in codes {
            residue.push_atom(vocabulary.require(code)?);
        }
        Ok(residue)
    }

    /// Dense atom-type counts, indexed like the vocabulary.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn atom_count(&self) -> usize {
        self.counts.iter().map(|&n| n as usize).sum()
    }

    /// Indices of the atom types present in this residue, ascending.
    pub fn present_types(&self) -> impl Iterator<Item = usize> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &n)| n > 0)
            .map(|(i, _)| i)
    }
}

/// Immutable, name-ordered collection of residues sharing one vocabulary.
#[derive(Debug, Clone)]
pub struct ResidueCatalog {
    vocabulary: AtomTypeVocabulary,
    residues: BTreeMap<String, Residue>,
}

impl ResidueCatalog {
    pub fn new(vocabulary: AtomTypeVocabulary) -> Self {
        Self {
            vocabulary,
            residues: BTreeMap::new(),
        }
    }

    /// Adds a residue, returning any residue previously stored under the same name.
    pub(crate) fn insert(&mut self, residue: Residue) -> Option<Residue> {
        debug_assert_eq!(residue.counts.len(), self.vocabulary.len());
        self.residues.insert(residue.name.clone(), residue)
    }

    /// Builds a catalog from residues made elsewhere, e.g. with [`Residue::from_atom_types`].
    ///
    /// Later residues replace earlier ones of the same name.
    pub fn from_residues<I>(vocabulary: AtomTypeVocabulary, residues: I) -> Self
    where
        I: IntoIterator<Item = Residue>,
    {
        let mut catalog = Self::new(vocabulary);
        for residue in residues {
            catalog.insert(residue);
        }
        catalog
    }

    pub fn vocabulary(&self) -> &AtomTypeVocabulary {
        &self.vocabulary
    }

    pub fn get(&self, name: &str) -> Option<&Residue> {
        self.residues.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Residue> {
        self.residues.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.residues.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}
