//! Entities as declared by `_entity` and `_entity_poly`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Polymer,
    NonPolymer,
    Branched,
    Water,
    Unknown,
}

impl EntityType {
    /// Parse an `_entity.type` value.
    pub fn from_cif(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "polymer" => EntityType::Polymer,
            "non-polymer" => EntityType::NonPolymer,
            "branched" => EntityType::Branched,
            "water" => EntityType::Water,
            _ => EntityType::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EntityType::Polymer => "Polymer",
            EntityType::NonPolymer => "NonPolymer",
            EntityType::Branched => "Branched",
            EntityType::Water => "Water",
            EntityType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolymerType {
    PeptideL,
    PeptideD,
    Dna,
    Rna,
    DnaRnaHybrid,
    SaccharideD,
    SaccharideL,
    Pna,
    CyclicPseudoPeptide,
    Other,
    Unknown,
}

impl PolymerType {
    /// Parse an `_entity_poly.type` value.
    pub fn from_cif(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "polypeptide(l)" => PolymerType::PeptideL,
            "polypeptide(d)" => PolymerType::PeptideD,
            "polydeoxyribonucleotide" => PolymerType::Dna,
            "polyribonucleotide" => PolymerType::Rna,
            "polydeoxyribonucleotide/polyribonucleotide hybrid" => PolymerType::DnaRnaHybrid,
            "polysaccharide(d)" => PolymerType::SaccharideD,
            "polysaccharide(l)" => PolymerType::SaccharideL,
            "peptide nucleic acid" => PolymerType::Pna,
            "cyclic-pseudo-peptide" => PolymerType::CyclicPseudoPeptide,
            "other" => PolymerType::Other,
            _ => PolymerType::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PolymerType::PeptideL => "PeptideL",
            PolymerType::PeptideD => "PeptideD",
            PolymerType::Dna => "Dna",
            PolymerType::Rna => "Rna",
            PolymerType::DnaRnaHybrid => "DnaRnaHybrid",
            PolymerType::SaccharideD => "SaccharideD",
            PolymerType::SaccharideL => "SaccharideL",
            PolymerType::Pna => "Pna",
            PolymerType::CyclicPseudoPeptide => "CyclicPseudoPeptide",
            PolymerType::Other => "Other",
            PolymerType::Unknown => "Unknown",
        }
    }

    pub fn is_peptide(&self) -> bool {
        matches!(self, PolymerType::PeptideL | PolymerType::PeptideD)
    }
}

impl fmt::Display for PolymerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub id: String,
    /// `_entity.pdbx_description`, empty when not given.
    pub description: String,
    pub entity_type: EntityType,
    /// [`PolymerType::Unknown`] for entities without an `_entity_poly` row.
    pub polymer_type: PolymerType,
    /// `label_asym_id`s of this entity.
    pub subchains: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_entity_types() {
        assert_eq!(EntityType::from_cif("polymer"), EntityType::Polymer);
        assert_eq!(EntityType::from_cif("non-polymer"), EntityType::NonPolymer);
        assert_eq!(EntityType::from_cif("WATER"), EntityType::Water);
        assert_eq!(EntityType::from_cif("macrolide"), EntityType::Unknown);
    }

    #[test]
    fn parse_polymer_types() {
        assert_eq!(PolymerType::from_cif("polypeptide(L)"), PolymerType::PeptideL);
        assert_eq!(PolymerType::from_cif("polydeoxyribonucleotide"), PolymerType::Dna);
        assert_eq!(
            PolymerType::from_cif("polydeoxyribonucleotide/polyribonucleotide hybrid"),
            PolymerType::DnaRnaHybrid
        );
        assert_eq!(PolymerType::from_cif("something new"), PolymerType::Unknown);
        assert!(PolymerType::PeptideD.is_peptide());
        assert!(!PolymerType::Rna.is_peptide());
    }

    #[test]
    fn display_names() {
        assert_eq!(EntityType::NonPolymer.to_string(), "NonPolymer");
        assert_eq!(PolymerType::PeptideL.to_string(), "PeptideL");
    }
}
