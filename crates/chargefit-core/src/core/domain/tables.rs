use phf::{Map, phf_map};

const M4_P4: &[i32] = &[-4, -3, -2, -1, 0, 1, 2, 3, 4];
const M3_P5: &[i32] = &[-3, -2, -1, 0, 1, 2, 3, 4, 5];
const M2_M1: &[i32] = &[-2, -1];
const M2_Z: &[i32] = &[-2, -1, 0];
const M1: &[i32] = &[-1];
const M1_Z: &[i32] = &[-1, 0];
const M1_P1: &[i32] = &[-1, 0, 1];
const Z: &[i32] = &[0];
const Z_P1: &[i32] = &[0, 1];
const P1: &[i32] = &[1];

/// Increments enumerated by the exhaustive search.
///
/// The cardinality product is 20 155 392.
#[rustfmt::skip]
pub static TIGHT_INCREMENTS: Map<&'static str, &'static [i32]> = phf_map! {
    // --- Carbons ---
    "C"  => P1,    "C*" => Z,     "CA" => Z,     "CB" => Z,
    "CC" => Z,     "CD" => M1_P1, "CK" => M1_P1, "CN" => Z,
    "CR" => M1_P1, "CT" => Z,     "CV" => M1_P1, "CW" => M1_P1,

    // --- Hydrogens ---
    "H"  => P1,    "H1" => Z,     "H2" => Z_P1,  "H3" => Z_P1,
    "H4" => Z_P1,  "H5" => Z_P1,  "HA" => Z,     "HC" => Z,
    "HO" => Z_P1,  "HP" => Z_P1,  "HS" => Z_P1,

    // --- Nitrogens ---
    "N"  => M2_Z,  "N2" => M2_Z,  "N3" => M2_Z,  "NA" => M1_Z,  "NB" => M1_Z,

    // --- Oxygens and sulfurs ---
    "O"  => M2_Z,  "O2" => M1,    "OH" => M2_M1,
    "S"  => Z,     "SH" => M1,
};

/// Increments available to mutation in the evolutionary search.
#[rustfmt::skip]
pub static WIDE_INCREMENTS: Map<&'static str, &'static [i32]> = phf_map! {
    // --- Carbons ---
    "C"  => M4_P4, "C*" => M4_P4, "CA" => M4_P4, "CB" => M4_P4,
    "CC" => M4_P4, "CD" => M4_P4, "CK" => M4_P4, "CN" => M4_P4,
    "CR" => M4_P4, "CT" => M4_P4, "CV" => M4_P4, "CW" => M4_P4,

    // --- Hydrogens ---
    "H"  => P1,    "H1" => M1_P1, "H2" => M1_P1, "H3" => M1_P1,
    "H4" => M1_P1, "H5" => M1_P1, "HA" => M1_P1, "HC" => M1_P1,
    "HO" => P1,    "HP" => M1_P1, "HS" => M1_P1,

    // --- Nitrogens ---
    "N"  => M3_P5, "N2" => M3_P5, "N3" => M3_P5, "NA" => M3_P5, "NB" => M3_P5,

    // --- Oxygens and sulfurs ---
    "O"  => M2_Z,  "O2" => M2_Z,  "OH" => M2_Z,
    "S"  => M2_Z,  "SH" => M2_Z,
};

/// Fixed per-type increments used to validate templates without searching.
///
/// Also covers water, ions and the N* type, which the search vocabulary leaves out.
#[rustfmt::skip]
pub static REFERENCE_INCREMENTS: Map<&'static str, i32> = phf_map! {
    // --- Carbons ---
    "C"  => 1, "C*" => 0, "CA" => 0, "CB" => 0, "CC" => 0, "CD" => 0,
    "CK" => 0, "CN" => 0, "CR" => -1, "CT" => 0, "CV" => 0, "CW" => 0,

    // --- Hydrogens ---
    "H"  => 1, "H1" => 0, "H2" => 0, "H3" => 0, "H4" => 0, "H5" => 1,
    "HA" => 0, "HC" => 0, "HO" => 1, "HP" => 0, "HS" => 1,

    // --- Nitrogens ---
    "N"  => -1, "N2" => -1, "N3" => -2, "NA" => -1, "NB" => 0, "N*" => 0,

    // --- Oxygens and sulfurs ---
    "O"  => -1, "O2" => -1, "OH" => -1, "S" => 0, "SH" => -1,

    // --- Water ---
    "HW" => 1, "OW" => -2,

    // --- Ions and dummy types ---
    "IM" => 2, "CL" => -1, "CU" => 2, "FE" => 2, "MG" => 2,
    "QC" => 1, "QK" => 1, "QL" => 1, "QN" => 1, "QR" => 1,
};
