//! # chargefit Core Library
//!
//! Search and validation of per-atom-type integer charge increments for the AMBER
//! amino-acid residue templates.
//!
//! Every residue template lists its atoms by AMBER atom type and declares an integer net
//! charge. The library looks for a single integer increment per atom type such that, summed
//! over each residue's atoms, the increments reproduce the declared charge of as many
//! residues as possible.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (the atom-type vocabulary, residues,
//!   assignments), template I/O, the admissible charge domains, the scorer and the report
//!   formatting.
//!
//! - **[`engine`]: The Logic Core.** Search configuration, progress reporting, cooperative
//!   cancellation and the two search algorithms: exhaustive enumeration of the tight domain
//!   and elitist evolutionary search over the wide domain.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that load the catalog and domain
//!   from the paths in a config, run a search and hand back a result ready for rendering.

pub mod core;
pub mod engine;
pub mod workflows;
