//! # Core Module
//!
//! The fundamental data structures and pure computations of chargefit.
//!
//! ## Architecture
//!
//! - **Models** ([`models`]) - The atom-type vocabulary, residues and charge assignments.
//! - **Template I/O** ([`io`]) - Reading `.xat.txt` residue templates into a [`models::residue::ResidueCatalog`].
//! - **Charge Domains** ([`domain`]) - Admissible increments per atom type, tight and wide.
//! - **Scoring** ([`scoring`]) - Total absolute charge error of an assignment over a catalog.
//! - **Reporting** ([`report`]) - Presentation of assignments, populations and discrepancies.
//!
//! Nothing in this module holds global state. The vocabulary, domain, catalog and scorer
//! are built once and passed by reference to the search engine.

pub mod domain;
pub mod io;
pub mod models;
pub mod report;
pub mod scoring;
