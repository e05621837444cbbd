//! Models, chains, and residues read from `_atom_site`.

use std::fmt;

use crate::sequence::{locate_clamped, locate_range, one_letter_code};

/// Placeholder written between modeled residues whose sequential ids jump.
pub const GAP: char = '-';

/// Author residue number plus optional insertion code, e.g. `52A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeqId {
    pub num: i32,
    pub icode: Option<char>,
}

impl SeqId {
    pub fn new(num: i32, icode: Option<char>) -> Self {
        Self { num, icode }
    }
}

impl fmt::Display for SeqId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.icode {
            Some(icode) => write!(f, "{}{}", self.num, icode),
            None => write!(f, "{}", self.num),
        }
    }
}

/// Author-side address of a residue, as written by `_struct_conf` and
/// `_struct_sheet_range`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomAddress {
    pub chain: String,
    pub seq_id: SeqId,
    pub residue_name: String,
}

impl fmt::Display for AtomAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} {}", self.chain, self.residue_name, self.seq_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub name: String,
    /// `label_asym_id`.
    pub subchain: String,
    pub entity_id: Option<String>,
    /// `label_seq_id`; absent for non-polymer residues.
    pub label_seq: Option<i32>,
    pub seq_id: SeqId,
    /// Belongs to a polymer entity.
    pub polymer: bool,
}

/// A chain named by its author chain id, holding every subchain that
/// shares that name (polymer, ligands, waters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub name: String,
    pub residues: Vec<Residue>,
}

impl Chain {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            residues: Vec::new(),
        }
    }

    /// Modeled polymer residues of the chain, first conformer only.
    pub fn polymer(&self) -> ResidueSpan<'_> {
        ResidueSpan::from_residues(self.residues.iter().filter(|r| r.polymer))
    }

    /// Subchain ids in order of first appearance.
    pub fn subchains(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for residue in &self.residues {
            if !names.contains(&residue.subchain.as_str()) {
                names.push(&residue.subchain);
            }
        }
        names
    }

    /// First residue carrying the author number `seq_id`.
    pub fn find(&self, seq_id: SeqId) -> Option<&Residue> {
        self.residues.iter().find(|r| r.seq_id == seq_id)
    }
}

/// A resolved author address.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedResidue<'a> {
    pub chain: &'a Chain,
    pub residue: &'a Residue,
    /// The address itself is not modeled.
    pub clamped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Model {
    pub number: i32,
    pub chains: Vec<Chain>,
}

impl Model {
    pub fn chain(&self, name: &str) -> Option<&Chain> {
        self.chains.iter().find(|c| c.name == name)
    }

    /// Modeled polymer residues of one subchain, first conformer only.
    pub fn subchain(&self, subchain: &str) -> ResidueSpan<'_> {
        ResidueSpan::from_residues(
            self.chains
                .iter()
                .flat_map(|c| &c.residues)
                .filter(|r| r.polymer && r.subchain == subchain),
        )
    }

    /// Chain holding the given subchain.
    pub fn parent_of(&self, subchain: &str) -> Option<&Chain> {
        self.chains
            .iter()
            .find(|c| c.residues.iter().any(|r| r.subchain == subchain))
    }

    /// Look up the polymer residue an author address points at.
    ///
    /// An address the chain does not model, or one naming a non-polymer
    /// residue, clamps to the nearest modeled polymer residue of that chain.
    /// `None` when the chain is unknown or models no polymer residue.
    pub fn resolve(&self, address: &AtomAddress) -> Option<ResolvedResidue<'_>> {
        let chain = self.chain(&address.chain)?;
        if let Some(residue) = chain
            .find(address.seq_id)
            .filter(|r| r.polymer && r.label_seq.is_some())
        {
            return Some(ResolvedResidue {
                chain,
                residue,
                clamped: false,
            });
        }
        let polymer = chain.polymer();
        let residue = polymer.residues()[polymer.locate(address.seq_id.num)?];
        log::debug!("{address} is not modeled, clamped to {}", residue.seq_id);
        Some(ResolvedResidue {
            chain,
            residue,
            clamped: true,
        })
    }
}

// ---------------------------------------------------------------------------
// Residue spans
// ---------------------------------------------------------------------------

/// Ordered modeled residues with strictly increasing sequential ids.
///
/// Residues competing for one sequential id (microheterogeneity) are
/// collapsed to the first, so [`len`](Self::len) counts positions, not
/// alternatives.
#[derive(Debug, Clone, Default)]
pub struct ResidueSpan<'a> {
    residues: Vec<&'a Residue>,
    labels: Vec<i32>,
}

impl<'a> ResidueSpan<'a> {
    fn from_residues<I>(residues: I) -> Self
    where
        I: IntoIterator<Item = &'a Residue>,
    {
        let mut span = Self::default();
        for residue in residues {
            let Some(label) = residue.label_seq else {
                continue;
            };
            if span.labels.last().is_some_and(|&last| label <= last) {
                continue;
            }
            span.residues.push(residue);
            span.labels.push(label);
        }
        span
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn residues(&self) -> &[&'a Residue] {
        &self.residues
    }

    /// Sequential ids of the span, ascending.
    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    pub fn first_label_seq(&self) -> Option<i32> {
        self.labels.first().copied()
    }

    pub fn last_label_seq(&self) -> Option<i32> {
        self.labels.last().copied()
    }

    /// One letter per residue, with [`GAP`] wherever the sequential id
    /// skips ahead by more than one.
    pub fn one_letter_sequence(&self) -> String {
        let mut out = String::with_capacity(self.len());
        for (i, residue) in self.residues.iter().enumerate() {
            if i > 0 && self.labels[i] - self.labels[i - 1] > 1 {
                out.push(GAP);
            }
            out.push(one_letter_code(&residue.name));
        }
        out
    }

    /// Position of the residue with author number `num`, clamped to the
    /// first or last residue when it lies outside the span. A number the
    /// span skips resolves to the next residue.
    pub fn locate(&self, num: i32) -> Option<usize> {
        locate_clamped(self.len(), num, |i| self.residues[i].seq_id.num)
    }

    /// Annotated subsequence between two sequential ids.
    ///
    /// Covers the modeled residues whose ids fall between the endpoints,
    /// including the gap markers between them, and reads backwards when
    /// `end_id` precedes `start_id`. Empty when no modeled residue falls in
    /// the range.
    pub fn annotated_subsequence(&self, start_id: i32, end_id: i32) -> String {
        let reverse = end_id < start_id;
        let (low, high) = if reverse { (end_id, start_id) } else { (start_id, end_id) };
        let Some((first, last)) = locate_range(self.len(), low, high, |i| self.labels[i]) else {
            return String::new();
        };
        let annotated: Vec<char> = self.one_letter_sequence().chars().collect();
        let offsets: Vec<usize> = annotated
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c != GAP)
            .map(|(i, _)| i)
            .collect();
        let (Some(&from), Some(&to)) = (offsets.get(first), offsets.get(last)) else {
            return String::new();
        };
        let text = &annotated[from..=to];
        if reverse {
            text.iter().rev().collect()
        } else {
            text.iter().collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residue(name: &str, subchain: &str, label_seq: Option<i32>, num: i32, polymer: bool) -> Residue {
        Residue {
            name: name.into(),
            subchain: subchain.into(),
            entity_id: Some("1".into()),
            label_seq,
            seq_id: SeqId::new(num, None),
            polymer,
        }
    }

    fn gapped_chain() -> Chain {
        let mut chain = Chain::new("B");
        chain.residues = vec![
            residue("GLY", "B", Some(1), 101, true),
            residue("HIS", "B", Some(2), 102, true),
            residue("LEU", "B", Some(4), 104, true),
            residue("LYS", "B", Some(5), 105, true),
            residue("HOH", "C", None, 201, false),
        ];
        chain
    }

    #[test]
    fn seq_id_display() {
        assert_eq!(SeqId::new(52, Some('A')).to_string(), "52A");
        assert_eq!(SeqId::new(-3, None).to_string(), "-3");
    }

    #[test]
    fn polymer_skips_non_polymer() {
        let chain = gapped_chain();
        let span = chain.polymer();
        assert_eq!(span.len(), 4);
        assert_eq!(span.labels(), &[1, 2, 4, 5]);
        assert_eq!(span.first_label_seq(), Some(1));
        assert_eq!(span.last_label_seq(), Some(5));
    }

    #[test]
    fn polymer_collapses_alternatives() {
        let mut chain = Chain::new("A");
        chain.residues = vec![
            residue("ALA", "A", Some(2), 12, true),
            residue("ASN", "A", Some(3), 13, true),
            residue("ASP", "A", Some(3), 13, true),
            residue("CYS", "A", Some(4), 14, true),
        ];
        let span = chain.polymer();
        assert_eq!(span.len(), 3);
        assert_eq!(span.one_letter_sequence(), "ANC");
    }

    #[test]
    fn annotated_sequence_marks_gaps() {
        let chain = gapped_chain();
        assert_eq!(chain.polymer().one_letter_sequence(), "GH-LK");
        assert_eq!(Chain::new("Z").polymer().one_letter_sequence(), "");
    }

    #[test]
    fn annotated_subsequence_keeps_inner_gaps() {
        let chain = gapped_chain();
        let span = chain.polymer();
        assert_eq!(span.annotated_subsequence(1, 5), "GH-LK");
        assert_eq!(span.annotated_subsequence(2, 4), "H-L");
        assert_eq!(span.annotated_subsequence(4, 2), "L-H");
        assert_eq!(span.annotated_subsequence(1, 3), "GH");
    }

    #[test]
    fn annotated_subsequence_clamps_overhang() {
        let chain = gapped_chain();
        let span = chain.polymer();
        assert_eq!(span.annotated_subsequence(-5, 2), "GH");
        assert_eq!(span.annotated_subsequence(4, 90), "LK");
        assert_eq!(span.annotated_subsequence(3, 3), "");
        assert_eq!(span.annotated_subsequence(6, 9), "");
    }

    #[test]
    fn span_locate_clamps() {
        let chain = gapped_chain();
        let span = chain.polymer();
        assert_eq!(span.locate(0), Some(0));
        assert_eq!(span.locate(104), Some(2));
        assert_eq!(span.locate(103), Some(2));
        assert_eq!(span.locate(300), Some(3));
        assert_eq!(Chain::new("Z").polymer().locate(1), None);
    }

    #[test]
    fn subchains_in_order() {
        let chain = gapped_chain();
        assert_eq!(chain.subchains(), vec!["B", "C"]);
    }

    #[test]
    fn model_lookups() {
        let model = Model {
            number: 1,
            chains: vec![gapped_chain()],
        };
        assert_eq!(model.subchain("B").len(), 4);
        assert!(model.subchain("C").is_empty());
        assert_eq!(model.parent_of("C").map(|c| c.name.as_str()), Some("B"));
        assert!(model.parent_of("Q").is_none());

        let address = AtomAddress {
            chain: "B".into(),
            seq_id: SeqId::new(104, None),
            residue_name: "LEU".into(),
        };
        let resolved = model.resolve(&address).unwrap();
        assert_eq!(resolved.chain.name, "B");
        assert_eq!(resolved.residue.label_seq, Some(4));
        assert!(!resolved.clamped);

        let unknown_chain = AtomAddress {
            chain: "Q".into(),
            ..address.clone()
        };
        assert!(model.resolve(&unknown_chain).is_none());
    }

    #[test]
    fn resolve_clamps_unmodeled_addresses() {
        let model = Model {
            number: 1,
            chains: vec![gapped_chain(), Chain::new("Z")],
        };
        let label = |chain: &str, num: i32, icode: Option<char>| {
            let address = AtomAddress {
                chain: chain.into(),
                seq_id: SeqId::new(num, icode),
                residue_name: "ALA".into(),
            };
            model.resolve(&address).map(|r| (r.residue.label_seq, r.clamped))
        };
        // insertion code the chain does not carry
        assert_eq!(label("B", 104, Some('A')), Some((Some(4), true)));
        // before, inside a gap, and after the modeled residues
        assert_eq!(label("B", 90, None), Some((Some(1), true)));
        assert_eq!(label("B", 103, None), Some((Some(4), true)));
        assert_eq!(label("B", 150, None), Some((Some(5), true)));
        // the water is not a polymer residue
        assert_eq!(label("B", 201, None), Some((Some(5), true)));
        assert_eq!(label("Z", 1, None), None);
    }
}
