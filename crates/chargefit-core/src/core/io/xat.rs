use crate::core::io::traits::TemplateFile;
use crate::core::models::atom_type::AtomTypeVocabulary;
use crate::core::models::residue::Residue;
use std::io::{self, BufRead};
use thiserror::Error;

const RESIDUE_TAG: &str = "<residue ";
const CHARGE_ATTR: &str = "charge";
const AMBER_ATTR: &str = "amber";
const INTEGRAL_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Error)]
pub enum XatError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XatParseErrorKind },
    #[error("No residue element declares a net charge")]
    MissingCharge,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum XatParseErrorKind {
    #[error("Atom type '{0}' is not part of the vocabulary")]
    UnknownAtomType(String),
    #[error("Residue charge '{0}' is not an integer")]
    InvalidCharge(String),
    #[error("Attribute '{0}' has no closing quote")]
    UnterminatedAttribute(&'static str),
}

/// Finds the quoted value of `name="..."` on a line.
///
/// The attribute name must start the line or follow whitespace, so `charge` never matches
/// inside a longer name such as `partialcharge`.
fn attribute<'a>(line: &'a str, name: &'static str) -> Result<Option<&'a str>, XatParseErrorKind> {
    let needle = format!("{}=\"", name);
    for (pos, _) in line.match_indices(&needle) {
        let boundary = line[..pos]
            .chars()
            .next_back()
            .is_none_or(|c| c.is_whitespace());
        if !boundary {
            continue;
        }
        let start = pos + needle.len();
        return match line[start..].find('"') {
            Some(len) => Ok(Some(&line[start..start + len])),
            None => Err(XatParseErrorKind::UnterminatedAttribute(name)),
        };
    }
    Ok(None)
}

fn parse_charge(value: &str) -> Result<i32, XatParseErrorKind> {
    let invalid = || XatParseErrorKind::InvalidCharge(value.to_string());
    let parsed: f64 = value.trim().parse().map_err(|_| invalid())?;
    let rounded = parsed.round();
    if !parsed.is_finite()
        || (parsed - rounded).abs() > INTEGRAL_TOLERANCE
        || rounded.abs() > i32::MAX as f64
    {
        return Err(invalid());
    }
    Ok(rounded as i32)
}

pub struct XatFile;

impl TemplateFile for XatFile {
    const SUFFIX: &'static str = ".xat.txt";

    type Error = XatError;

    /// Reads the declared charge and the atom types of one template.
    ///
    /// The declared charge is the `charge` attribute of the first residue element that has
    /// one. Residue elements without it are skipped. Every `amber` attribute counts as one
    /// atom, and its value must belong to `vocabulary`.
    fn read_from(
        name: &str,
        reader: &mut impl BufRead,
        vocabulary: &AtomTypeVocabulary,
    ) -> Result<Residue, Self::Error> {
        let mut charge: Option<i32> = None;
        let mut atom_types: Vec<usize> = Vec::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let parse_err = |kind| XatError::Parse {
                line: line_num,
                kind,
            };

            if charge.is_none() && line.contains(RESIDUE_TAG) {
                if let Some(value) = attribute(&line, CHARGE_ATTR).map_err(parse_err)? {
                    charge = Some(parse_charge(value).map_err(parse_err)?);
                }
            }

            if let Some(code) = attribute(&line, AMBER_ATTR).map_err(parse_err)? {
                let index = vocabulary
                    .index_of(code)
                    .ok_or_else(|| parse_err(XatParseErrorKind::UnknownAtomType(code.to_string())))?;
                atom_types.push(index);
            }
        }

        let charge = charge.ok_or(XatError::MissingCharge)?;
        let mut residue = Residue::new(name, charge, vocabulary.len());
        for index in atom_types {
            residue.push_atom(index);
        }
        Ok(residue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::fixtures;
    use std::io::Cursor;
    use std::path::Path;

    fn read(content: &str) -> Result<Residue, XatError> {
        let vocab = AtomTypeVocabulary::amber();
        XatFile::read_from("TEST", &mut Cursor::new(content), &vocab)
    }

    #[test]
    fn reads_charge_and_atom_counts() {
        let vocab = AtomTypeVocabulary::amber();
        let residue = read(&fixtures::template_text("LYS")).unwrap();
        assert_eq!(residue.name, "TEST");
        assert_eq!(residue.charge, 1);
        assert_eq!(residue.atom_count(), 22);
        assert_eq!(residue.counts()[vocab.index_of("HC").unwrap()], 6);
        assert_eq!(residue.counts()[vocab.index_of("N3").unwrap()], 1);
        assert_eq!(residue.counts()[vocab.index_of("HP").unwrap()], 2);
    }

    #[test]
    fn atom_level_charges_are_not_residue_charges() {
        let content = r#"<atoms>
<atom ID="N" amber="N" charge="-0.4157"/>
<residue ID="1" name="GLY" charge="-1.0">
<atom ID="H" amber="H" charge="0.2719"/>
</residue>
</atoms>"#;
        let residue = read(content).unwrap();
        assert_eq!(residue.charge, -1);
        assert_eq!(residue.atom_count(), 2);
    }

    #[test]
    fn first_declared_charge_wins() {
        let content = "<residue name=\"A\">\n<residue charge=\"1\">\n<residue charge=\"2\">\n";
        assert_eq!(read(content).unwrap().charge, 1);
    }

    #[test]
    fn missing_charge_is_rejected() {
        let content = "<residue name=\"A\">\n<atom amber=\"CT\"/>\n";
        assert!(matches!(read(content), Err(XatError::MissingCharge)));
    }

    #[test]
    fn unknown_atom_type_is_rejected_with_line() {
        let content = "<residue charge=\"0\">\n<atom amber=\"CT\"/>\n<atom amber=\"N*\"/>\n";
        match read(content) {
            Err(XatError::Parse { line, kind }) => {
                assert_eq!(line, 3);
                assert_eq!(kind, XatParseErrorKind::UnknownAtomType("N*".into()));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn non_integral_charge_is_rejected() {
        let content = "<residue charge=\"0.5\">\n";
        assert!(matches!(
            read(content),
            Err(XatError::Parse {
                line: 1,
                kind: XatParseErrorKind::InvalidCharge(_)
            })
        ));
        assert!(matches!(
            read("<residue charge=\"abc\">\n"),
            Err(XatError::Parse { .. })
        ));
    }

    #[test]
    fn unterminated_attribute_is_rejected() {
        let content = "<residue charge=\"0\">\n<atom amber=\"CT/>\n";
        assert!(matches!(
            read(content),
            Err(XatError::Parse {
                line: 2,
                kind: XatParseErrorKind::UnterminatedAttribute("amber")
            })
        ));
    }

    #[test]
    fn attribute_requires_word_boundary() {
        let line = r#"<atom partialcharge="0.3" charge="1"/>"#;
        assert_eq!(attribute(line, "charge"), Ok(Some("1")));
        assert_eq!(attribute(r#"<atom xamber="CT"/>"#, "amber"), Ok(None));
    }

    #[test]
    fn residue_name_strips_suffix() {
        assert_eq!(
            XatFile::residue_name(Path::new("/data/HIP_N.xat.txt")),
            Some("HIP_N".to_string())
        );
        assert_eq!(XatFile::residue_name(Path::new("/data/HIP_N.pdb")), None);
        assert_eq!(XatFile::residue_name(Path::new(".xat.txt")), None);
    }
}
