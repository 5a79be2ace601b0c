//! Reading residue templates into a catalog.
//!
//! Templates are the `.xat.txt` files of the residue library: tag/attribute text with one
//! residue element carrying the declared net charge and one atom element per atom carrying
//! its AMBER type. Only those two attributes are read; everything else in the file is
//! ignored.

pub mod catalog;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod traits;
pub mod xat;
