//! Data models shared by every layer.
//!
//! - [`atom_type`] - The sorted, immutable AMBER atom-type vocabulary.
//! - [`residue`] - Residue templates reduced to dense atom-type counts, and the catalog holding them.
//! - [`assignment`] - Integer charge increments, one per vocabulary position.

pub mod assignment;
pub mod atom_type;
pub mod residue;
