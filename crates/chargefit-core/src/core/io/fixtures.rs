//! Residue templates with real AMBER typings, shared by the test suites.
//!
//! The first eight residues are reproduced exactly by the reference increments. HIP is
//! declared `+1` but sums to `0` under the reference, leaving a single unit of error.

use crate::core::models::atom_type::AtomTypeVocabulary;
use crate::core::models::residue::{Residue, ResidueCatalog};
use std::fs;
use std::path::Path;

pub(crate) const REFERENCE_CONSISTENT: &[&str] =
    &["ALA", "ALA_C", "ALA_N", "ASP", "CYS", "GLY", "LYS", "SER"];

#[rustfmt::skip]
pub(crate) const TEMPLATES: &[(&str, i32, &[(&str, &str)])] = &[
    ("ALA", 0, &[
        ("N", "N"), ("H", "H"), ("CA", "CT"), ("HA", "H1"), ("CB", "CT"),
        ("HB1", "HC"), ("HB2", "HC"), ("HB3", "HC"), ("C", "C"), ("O", "O"),
    ]),
    ("ALA_C", -1, &[
        ("N", "N"), ("H", "H"), ("CA", "CT"), ("HA", "H1"), ("CB", "CT"),
        ("HB1", "HC"), ("HB2", "HC"), ("HB3", "HC"), ("C", "C"), ("O", "O2"), ("OXT", "O2"),
    ]),
    ("ALA_N", 1, &[
        ("N", "N3"), ("H1", "H"), ("H2", "H"), ("H3", "H"), ("CA", "CT"), ("HA", "HP"),
        ("CB", "CT"), ("HB1", "HC"), ("HB2", "HC"), ("HB3", "HC"), ("C", "C"), ("O", "O"),
    ]),
    ("ASP", -1, &[
        ("N", "N"), ("H", "H"), ("CA", "CT"), ("HA", "H1"), ("CB", "CT"), ("HB2", "HC"),
        ("HB3", "HC"), ("CG", "C"), ("OD1", "O2"), ("OD2", "O2"), ("C", "C"), ("O", "O"),
    ]),
    ("CYS", 0, &[
        ("N", "N"), ("H", "H"), ("CA", "CT"), ("HA", "H1"), ("CB", "CT"), ("HB2", "H1"),
        ("HB3", "H1"), ("SG", "SH"), ("HG", "HS"), ("C", "C"), ("O", "O"),
    ]),
    ("GLY", 0, &[
        ("N", "N"), ("H", "H"), ("CA", "CT"), ("HA2", "H1"), ("HA3", "H1"), ("C", "C"), ("O", "O"),
    ]),
    ("LYS", 1, &[
        ("N", "N"), ("H", "H"), ("CA", "CT"), ("HA", "H1"), ("CB", "CT"), ("HB2", "HC"),
        ("HB3", "HC"), ("CG", "CT"), ("HG2", "HC"), ("HG3", "HC"), ("CD", "CT"), ("HD2", "HC"),
        ("HD3", "HC"), ("CE", "CT"), ("HE2", "HP"), ("HE3", "HP"), ("NZ", "N3"), ("HZ1", "H"),
        ("HZ2", "H"), ("HZ3", "H"), ("C", "C"), ("O", "O"),
    ]),
    ("SER", 0, &[
        ("N", "N"), ("H", "H"), ("CA", "CT"), ("HA", "H1"), ("CB", "CT"), ("HB2", "H1"),
        ("HB3", "H1"), ("OG", "OH"), ("HG", "HO"), ("C", "C"), ("O", "O"),
    ]),
    ("HIP", 1, &[
        ("N", "N"), ("H", "H"), ("CA", "CT"), ("HA", "H1"), ("CB", "CT"), ("HB2", "HC"),
        ("HB3", "HC"), ("CG", "CC"), ("ND1", "NA"), ("HD1", "H"), ("CE1", "CR"), ("HE1", "H5"),
        ("NE2", "NA"), ("HE2", "H"), ("CD2", "CW"), ("HD2", "H4"), ("C", "C"), ("O", "O"),
    ]),
];

/// Renders a template in the tag/attribute layout of the residue library.
pub(crate) fn template_text(name: &str) -> String {
    let (_, charge, atoms) = TEMPLATES
        .iter()
        .find(|(n, _, _)| *n == name)
        .unwrap_or_else(|| panic!("no fixture template named {}", name));
    let mut text = String::from("<atoms>\n");
    text.push_str(&format!(
        "  <residue ID=\"1\" name=\"{}\" charge=\"{:.1}\">\n",
        name, *charge as f64
    ));
    for (atom_name, amber) in atoms.iter() {
        text.push_str(&format!(
            "    <atom ID=\"{}\" amber=\"{}\" charge=\"0.0000\">\n      <position>0.0 0.0 0.0</position>\n    </atom>\n",
            atom_name, amber
        ));
    }
    text.push_str("  </residue>\n</atoms>\n");
    text
}

/// Writes the named templates as `<NAME>.xat.txt` files into `dir`.
pub(crate) fn write_templates(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(format!("{}.xat.txt", name)), template_text(name)).unwrap();
    }
}

/// Writes every fixture template into `dir`.
pub(crate) fn write_all_templates(dir: &Path) {
    let names: Vec<&str> = TEMPLATES.iter().map(|(n, _, _)| *n).collect();
    write_templates(dir, &names);
}

/// Builds a catalog of the named fixtures over the AMBER vocabulary, bypassing file I/O.
pub(crate) fn catalog(names: &[&str]) -> ResidueCatalog {
    let vocab = AtomTypeVocabulary::amber();
    let residues = names.iter().map(|name| {
        let (_, charge, atoms) = TEMPLATES
            .iter()
            .find(|(n, _, _)| n == name)
            .unwrap_or_else(|| panic!("no fixture template named {}", name));
        let codes: Vec<&str> = atoms.iter().map(|(_, amber)| *amber).collect();
        Residue::from_atom_types(name, *charge, &vocab, &codes).unwrap()
    });
    ResidueCatalog::from_residues(vocab.clone(), residues.collect::<Vec<_>>())
}
