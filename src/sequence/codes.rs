//! Residue-name to one-letter translation.
//!
//! The table is fixed and lossy: modified residues collapse onto their
//! parent letter and anything unlisted becomes [`UNKNOWN_RESIDUE`].

/// Letter used for residue names the table does not know.
pub const UNKNOWN_RESIDUE: char = 'X';

/// One-letter code for a residue or nucleotide name.
pub fn one_letter_code(name: &str) -> char {
    match name {
        "ALA" => 'A', "CYS" => 'C', "ASP" => 'D', "GLU" => 'E',
        "PHE" => 'F', "GLY" => 'G', "HIS" => 'H', "ILE" => 'I',
        "LYS" => 'K', "LEU" => 'L', "MET" => 'M', "ASN" => 'N',
        "PRO" => 'P', "GLN" => 'Q', "ARG" => 'R', "SER" => 'S',
        "THR" => 'T', "VAL" => 'V', "TRP" => 'W', "TYR" => 'Y',
        "SEC" => 'U', "PYL" => 'O',
        "MSE" => 'M',
        // DNA
        "DA" => 'A', "DC" => 'C', "DG" => 'G', "DT" => 'T', "DU" => 'U', "DI" => 'I',
        // RNA
        "A" => 'A', "C" => 'C', "G" => 'G', "U" => 'U', "I" => 'I',
        "N" | "DN" => 'N',
        _ => UNKNOWN_RESIDUE,
    }
}

/// Translate a run of residue names into one character per name.
pub fn translate<'a, I>(names: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().map(one_letter_code).collect()
}
