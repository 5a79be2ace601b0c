use super::traits::TemplateFile;
use super::xat::{XatError, XatFile};
use crate::core::models::atom_type::AtomTypeVocabulary;
use crate::core::models::residue::ResidueCatalog;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Malformed template '{residue}': {source}")]
    MalformedTemplate {
        residue: String,
        #[source]
        source: XatError,
    },
    #[error("No template for residue '{name}' in '{dir}'")]
    MissingTemplate { name: String, dir: String },
    #[error("No residue templates selected from '{dir}'")]
    EmptyCatalog { dir: String },
}

/// Which templates of a directory make up the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TemplateSelection {
    /// Every template in the directory.
    #[default]
    All,
    /// The `include` names (every template when empty), minus the `exclude` names.
    ///
    /// Each included name must have a template.
    List {
        include: Vec<String>,
        exclude: Vec<String>,
    },
}

impl TemplateSelection {
    fn resolve(
        &self,
        available: &BTreeMap<String, PathBuf>,
        dir: &Path,
    ) -> Result<Vec<(String, PathBuf)>, CatalogError> {
        match self {
            TemplateSelection::All => Ok(available
                .iter()
                .map(|(n, p)| (n.clone(), p.clone()))
                .collect()),
            TemplateSelection::List { include, exclude } => {
                let mut chosen = if include.is_empty() {
                    available.clone()
                } else {
                    include
                        .iter()
                        .map(|name| {
                            available
                                .get(name)
                                .map(|path| (name.clone(), path.clone()))
                                .ok_or_else(|| CatalogError::MissingTemplate {
                                    name: name.clone(),
                                    dir: dir.to_string_lossy().to_string(),
                                })
                        })
                        .collect::<Result<BTreeMap<_, _>, _>>()?
                };
                for name in exclude {
                    chosen.remove(name);
                }
                Ok(chosen.into_iter().collect())
            }
        }
    }
}

impl ResidueCatalog {
    /// Loads the selected `.xat.txt` templates of `dir`.
    ///
    /// The whole load fails on the first malformed template; no partial catalog is returned.
    #[instrument(level = "debug", skip_all, fields(dir = %dir.display()))]
    pub fn load(
        dir: &Path,
        selection: &TemplateSelection,
        vocabulary: &AtomTypeVocabulary,
    ) -> Result<Self, CatalogError> {
        let io_err = |path: &Path, source| CatalogError::Io {
            path: path.to_string_lossy().to_string(),
            source,
        };

        let mut available = BTreeMap::new();
        for entry in std::fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
            let path = entry.map_err(|e| io_err(dir, e))?.path();
            if let Some(name) = XatFile::residue_name(&path) {
                available.insert(name, path);
            }
        }
        debug!("Found {} template files.", available.len());

        let selected = selection.resolve(&available, dir)?;
        if selected.is_empty() {
            return Err(CatalogError::EmptyCatalog {
                dir: dir.to_string_lossy().to_string(),
            });
        }

        let mut catalog = ResidueCatalog::new(vocabulary.clone());
        for (name, path) in selected {
            let residue = XatFile::read_from_path(&path, vocabulary).map_err(|e| match e {
                XatError::Io(source) => io_err(&path, source),
                other => CatalogError::MalformedTemplate {
                    residue: name.clone(),
                    source: other,
                },
            })?;
            catalog.insert(residue);
        }

        info!(
            residues = catalog.len(),
            "Loaded residue catalog from {}",
            dir.display()
        );
        Ok(catalog)
    }
}
