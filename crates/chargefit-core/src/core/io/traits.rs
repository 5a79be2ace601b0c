use crate::core::models::atom_type::AtomTypeVocabulary;
use crate::core::models::residue::Residue;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading residue template formats.
///
/// Implementors parse one template into a [`Residue`] whose atom-type counts are laid out
/// according to the supplied vocabulary.
pub trait TemplateFile {
    /// File name suffix identifying templates of this format, e.g. `".xat.txt"`.
    const SUFFIX: &'static str;

    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads a template from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `name` - The residue name to assign.
    /// * `reader` - The buffered reader to read from.
    /// * `vocabulary` - The atom-type vocabulary every atom must belong to.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is malformed or an I/O operation fails.
    fn read_from(
        name: &str,
        reader: &mut impl BufRead,
        vocabulary: &AtomTypeVocabulary,
    ) -> Result<Residue, Self::Error>;

    /// Derives the residue name from a template path by stripping [`Self::SUFFIX`].
    ///
    /// Returns `None` for paths that do not name a template of this format.
    fn residue_name(path: &Path) -> Option<String> {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_suffix(Self::SUFFIX))
            .filter(|n| !n.is_empty())
            .map(str::to_string)
    }

    /// Reads a template from a file path, naming the residue after the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails. A path that
    /// [`Self::residue_name`] rejects yields an `InvalidInput` I/O error.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
        vocabulary: &AtomTypeVocabulary,
    ) -> Result<Residue, Self::Error> {
        let path = path.as_ref();
        let name = Self::residue_name(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{}' is not a {} template", path.display(), Self::SUFFIX),
            )
        })?;
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&name, &mut reader, vocabulary)
    }
}
