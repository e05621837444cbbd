//! Canonical per-chain sequence built from `_pdbx_poly_seq_scheme` records.

use std::collections::HashMap;

use super::codes::translate;
use super::locate::{locate_by, search_by, LocateError};

/// One position of a polymer chain's canonical sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monomer {
    /// Author chain name.
    pub chain: String,
    pub entity_id: i32,
    /// Sequential id; strictly increasing within a chain, not always contiguous.
    pub seq_id: i32,
    /// Canonical residue name.
    pub name: String,
    /// Residue name as modeled, `None` when the position has no density.
    pub observed: Option<String>,
    /// Set when several residues compete for this position.
    pub hetero: bool,
}

/// First and last record index of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainBounds {
    pub start: usize,
    pub end: usize,
}

impl ChainBounds {
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }
}

/// Reading direction of a subsequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// End at or after start.
    Forward,
    /// End before start; text is read backwards.
    Reverse,
}

/// Slice of a chain's one-letter sequence between two sequential ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subsequence {
    pub text: String,
    /// Residue count, negated for [`Orientation::Reverse`].
    pub length: i32,
    pub orientation: Orientation,
}

impl Subsequence {
    fn empty() -> Self {
        Self {
            text: String::new(),
            length: 0,
            orientation: Orientation::Forward,
        }
    }
}

/// Deduplicated canonical sequence of every polymer chain in an entry.
///
/// Built once per file and never mutated. The one-letter string is aligned
/// with [`monomers`](Self::monomers) index for index.
#[derive(Debug, Clone, Default)]
pub struct SequenceIndex {
    monomers: Vec<Monomer>,
    one_letter_code: String,
    chains: HashMap<String, ChainBounds>,
    chain_order: Vec<String>,
    unconfirmed: Vec<usize>,
}

impl SequenceIndex {
    /// Build the index from records in file order.
    ///
    /// A record repeating the previous record's sequential id within the same
    /// chain is an alternative residue at that position and is dropped. A
    /// chain that shows up again after another chain keeps its first block of
    /// records as its bounds.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Monomer>,
    {
        let mut monomers: Vec<Monomer> = Vec::new();
        let mut chains = HashMap::new();
        let mut chain_order: Vec<String> = Vec::new();
        let mut unconfirmed = Vec::new();
        let mut open: Option<(String, usize)> = None;

        for record in records {
            if let Some(prev) = monomers.last() {
                if prev.chain == record.chain && prev.seq_id == record.seq_id {
                    continue;
                }
            }
            let index = monomers.len();
            let chain_changed = open.as_ref().map_or(true, |(name, _)| *name != record.chain);
            if chain_changed {
                if let Some((name, start)) = open.take() {
                    close_chain(&mut chains, name, start, index - 1);
                }
                if chains.contains_key(&record.chain) {
                    log::warn!(
                        "chain {} reappears at record {index}; keeping its first block",
                        record.chain
                    );
                } else {
                    chain_order.push(record.chain.clone());
                }
                open = Some((record.chain.clone(), index));
            }
            if record.observed.is_none() {
                unconfirmed.push(index);
            }
            monomers.push(record);
        }
        if let Some((name, start)) = open {
            close_chain(&mut chains, name, start, monomers.len() - 1);
        }

        let one_letter_code = translate(monomers.iter().map(|m| m.name.as_str()));
        Self {
            monomers,
            one_letter_code,
            chains,
            chain_order,
            unconfirmed,
        }
    }

    pub fn len(&self) -> usize {
        self.monomers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monomers.is_empty()
    }

    pub fn monomers(&self) -> &[Monomer] {
        &self.monomers
    }

    /// One letter per retained record.
    pub fn one_letter_code(&self) -> &str {
        &self.one_letter_code
    }

    /// Indices of retained records without experimental density, ascending.
    pub fn unconfirmed(&self) -> &[usize] {
        &self.unconfirmed
    }

    /// Chain names in the order they first appear.
    pub fn chain_names(&self) -> impl Iterator<Item = &str> {
        self.chain_order.iter().map(String::as_str)
    }

    pub fn chain_bounds(&self, chain: &str) -> Option<ChainBounds> {
        self.chains.get(chain).copied()
    }

    pub fn contains_chain(&self, chain: &str) -> bool {
        self.chains.contains_key(chain)
    }

    /// First and last sequential id of a chain.
    pub fn chain_extent(&self, chain: &str) -> Option<(i32, i32)> {
        let bounds = self.chain_bounds(chain)?;
        Some((self.monomers[bounds.start].seq_id, self.monomers[bounds.end].seq_id))
    }

    /// Whole one-letter sequence of a chain, empty for an unknown chain.
    pub fn chain_sequence(&self, chain: &str) -> &str {
        self.chain_bounds(chain)
            .map_or("", |b| &self.one_letter_code[b.start..=b.end])
    }

    /// Record index of `seq_id` inside `chain`.
    pub fn locate(&self, chain: &str, seq_id: i32) -> Result<usize, LocateError> {
        let bounds = self
            .chain_bounds(chain)
            .ok_or_else(|| LocateError::UnknownChain(chain.to_string()))?;
        self.locate_within(bounds.start, bounds.end, seq_id)
    }

    /// Record index of `seq_id` inside the record range `low..=high`.
    pub fn locate_within(&self, low: usize, high: usize, seq_id: i32) -> Result<usize, LocateError> {
        locate_by(self.monomers.len(), low, high, seq_id, |i| self.monomers[i].seq_id)
    }

    /// Record index range of `chain` covering sequential ids
    /// `[low_id, high_id]`, narrowed to ids that actually exist.
    pub fn index_range(&self, chain: &str, low_id: i32, high_id: i32) -> Option<(usize, usize)> {
        let bounds = self.chain_bounds(chain)?;
        let key = |i: usize| self.monomers[i].seq_id;
        let start = match search_by(bounds.start, bounds.end, low_id, key) {
            Ok(i) | Err(i) => i,
        };
        let end = match search_by(bounds.start, bounds.end, high_id, key) {
            Ok(i) => i,
            Err(i) => i.checked_sub(1)?,
        };
        (start <= end && bounds.contains(start) && bounds.contains(end)).then_some((start, end))
    }

    /// Whether any record in `start..=end` lacks experimental density.
    pub fn has_unconfirmed(&self, start: usize, end: usize) -> bool {
        let first = self.unconfirmed.partition_point(|&i| i < start);
        self.unconfirmed.get(first).is_some_and(|&i| i <= end)
    }

    /// One-letter subsequence of `chain` from `start_id` to `end_id`.
    ///
    /// Reads backwards with a negated length when `end_id` precedes
    /// `start_id`. An unknown chain gives an empty subsequence; an id missing
    /// from a known chain is an error.
    pub fn subsequence(&self, chain: &str, start_id: i32, end_id: i32) -> Result<Subsequence, LocateError> {
        let Some(bounds) = self.chain_bounds(chain) else {
            return Ok(Subsequence::empty());
        };
        let start = self.locate_within(bounds.start, bounds.end, start_id)?;
        let end = self.locate_within(bounds.start, bounds.end, end_id)?;
        Ok(self.slice(start, end))
    }

    /// Subsequence between two record indices, oriented by their order.
    pub fn slice(&self, start: usize, end: usize) -> Subsequence {
        if end >= start {
            Subsequence {
                text: self.one_letter_code[start..=end].to_string(),
                length: (end - start + 1) as i32,
                orientation: Orientation::Forward,
            }
        } else {
            Subsequence {
                text: self.one_letter_code[end..=start].chars().rev().collect(),
                length: -((start - end + 1) as i32),
                orientation: Orientation::Reverse,
            }
        }
    }
}

fn close_chain(chains: &mut HashMap<String, ChainBounds>, name: String, start: usize, end: usize) {
    chains.entry(name).or_insert(ChainBounds { start, end });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monomer(chain: &str, seq_id: i32, name: &str, observed: Option<&str>, hetero: bool) -> Monomer {
        Monomer {
            chain: chain.into(),
            entity_id: 1,
            seq_id,
            name: name.into(),
            observed: observed.map(Into::into),
            hetero,
        }
    }

    fn simple_chain(chain: &str, names: &[&str]) -> Vec<Monomer> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| monomer(chain, i as i32 + 1, n, Some(n), false))
            .collect()
    }

    fn alphabet_index() -> SequenceIndex {
        let names = [
            "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE", "UNK",
        ];
        SequenceIndex::build(simple_chain("A", &names))
    }

    #[test]
    fn build_collapses_microheterogeneity() {
        let index = SequenceIndex::build(vec![
            monomer("A", 1, "ALA", Some("ALA"), false),
            monomer("A", 2, "ARG", None, false),
            monomer("A", 3, "ASN", Some("ASN"), true),
            monomer("A", 3, "ASN", Some("ASN"), true),
        ]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.one_letter_code(), "ARN");
        assert_eq!(index.unconfirmed(), &[1]);
        assert_eq!(index.chain_bounds("A"), Some(ChainBounds { start: 0, end: 2 }));
    }

    #[test]
    fn build_keeps_first_alternative() {
        let index = SequenceIndex::build(vec![
            monomer("A", 1, "GLY", Some("GLY"), false),
            monomer("A", 2, "SER", Some("SER"), true),
            monomer("A", 2, "THR", Some("THR"), true),
            monomer("A", 2, "VAL", Some("VAL"), true),
            monomer("A", 3, "GLY", Some("GLY"), false),
        ]);
        assert_eq!(index.one_letter_code(), "GSG");
        assert_eq!(index.monomers()[1].name, "SER");
    }

    #[test]
    fn build_ignores_density_of_dropped_duplicates() {
        let index = SequenceIndex::build(vec![
            monomer("A", 1, "SER", Some("SER"), true),
            monomer("A", 1, "THR", None, true),
        ]);
        assert!(index.unconfirmed().is_empty());
    }

    #[test]
    fn build_multiple_chains() {
        let mut records = simple_chain("A", &["ALA", "GLY"]);
        records.extend(simple_chain("B", &["LYS", "LEU", "MET"]));
        let index = SequenceIndex::build(records);
        assert_eq!(index.chain_bounds("A"), Some(ChainBounds { start: 0, end: 1 }));
        assert_eq!(index.chain_bounds("B"), Some(ChainBounds { start: 2, end: 4 }));
        assert_eq!(index.chain_sequence("B"), "KLM");
        assert_eq!(index.chain_extent("B"), Some((1, 3)));
        assert_eq!(index.chain_names().collect::<Vec<_>>(), vec!["A", "B"]);
        // same id in a new chain is not a duplicate
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn build_non_contiguous_chain_keeps_first_block() {
        let mut records = simple_chain("A", &["ALA", "GLY"]);
        records.extend(simple_chain("B", &["LYS"]));
        records.push(monomer("A", 9, "TRP", Some("TRP"), false));
        let index = SequenceIndex::build(records);
        assert_eq!(index.chain_bounds("A"), Some(ChainBounds { start: 0, end: 1 }));
        assert_eq!(index.chain_names().count(), 2);
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn build_empty() {
        let index = SequenceIndex::build(Vec::new());
        assert!(index.is_empty());
        assert_eq!(index.one_letter_code(), "");
        assert!(index.chain_bounds("A").is_none());
        assert_eq!(index.chain_sequence("A"), "");
    }

    #[test]
    fn locate_present_and_absent() {
        let index = SequenceIndex::build(vec![
            monomer("A", 1, "ALA", Some("ALA"), false),
            monomer("A", 2, "ALA", Some("ALA"), false),
            monomer("A", 5, "ALA", Some("ALA"), false),
            monomer("B", 1, "ALA", Some("ALA"), false),
        ]);
        assert_eq!(index.locate("A", 5), Ok(2));
        assert_eq!(index.locate("B", 1), Ok(3));
        assert!(matches!(index.locate("A", 3), Err(LocateError::NotFound { .. })));
        assert_eq!(index.locate("C", 1), Err(LocateError::UnknownChain("C".into())));
    }

    #[test]
    fn subsequence_forward() {
        let index = alphabet_index();
        let sub = index.subsequence("A", 1, 11).unwrap();
        assert_eq!(sub.text, "ARNDCQEGHIX");
        assert_eq!(sub.length, 11);
        assert_eq!(sub.orientation, Orientation::Forward);
        let sub = index.subsequence("A", 4, 6).unwrap();
        assert_eq!((sub.text.as_str(), sub.length), ("DCQ", 3));
    }

    #[test]
    fn subsequence_reverse_to_chain_start() {
        let index = alphabet_index();
        let sub = index.subsequence("A", 4, 1).unwrap();
        assert_eq!(sub.text, "DNRA");
        assert_eq!(sub.length, -4);
        assert_eq!(sub.orientation, Orientation::Reverse);
    }

    #[test]
    fn subsequence_reverse_inside_chain() {
        let index = alphabet_index();
        let sub = index.subsequence("A", 4, 2).unwrap();
        assert_eq!((sub.text.as_str(), sub.length), ("DNR", -3));
    }

    #[test]
    fn subsequence_directions_mirror() {
        let index = alphabet_index();
        for (a, b) in [(1, 11), (2, 9), (5, 6), (3, 10)] {
            let forward = index.subsequence("A", a, b).unwrap();
            let backward = index.subsequence("A", b, a).unwrap();
            assert_eq!(forward.text.chars().rev().collect::<String>(), backward.text);
            assert_eq!(forward.length, -backward.length);
        }
    }

    #[test]
    fn subsequence_single_residue() {
        let index = alphabet_index();
        let sub = index.subsequence("A", 7, 7).unwrap();
        assert_eq!((sub.text.as_str(), sub.length), ("E", 1));
        assert_eq!(sub.orientation, Orientation::Forward);
    }

    #[test]
    fn subsequence_unknown_chain_is_empty() {
        let index = alphabet_index();
        let sub = index.subsequence("Z", 1, 3).unwrap();
        assert_eq!((sub.text.as_str(), sub.length), ("", 0));
    }

    #[test]
    fn subsequence_missing_id_fails() {
        let index = alphabet_index();
        assert!(index.subsequence("A", 1, 40).is_err());
    }

    #[test]
    fn index_range_snaps_to_existing_ids() {
        let index = SequenceIndex::build(vec![
            monomer("A", 1, "ALA", Some("ALA"), false),
            monomer("A", 2, "ALA", Some("ALA"), false),
            monomer("A", 5, "ALA", Some("ALA"), false),
            monomer("A", 6, "ALA", Some("ALA"), false),
            monomer("B", 1, "ALA", Some("ALA"), false),
        ]);
        assert_eq!(index.index_range("A", 1, 6), Some((0, 3)));
        assert_eq!(index.index_range("A", 2, 4), Some((1, 1)));
        assert_eq!(index.index_range("A", 3, 4), None);
        assert_eq!(index.index_range("A", 7, 9), None);
        assert_eq!(index.index_range("B", 1, 1), Some((4, 4)));
        assert_eq!(index.index_range("C", 1, 1), None);
    }

    #[test]
    fn unconfirmed_ranges() {
        let index = SequenceIndex::build(vec![
            monomer("A", 1, "ALA", Some("ALA"), false),
            monomer("A", 2, "ALA", None, false),
            monomer("A", 3, "ALA", Some("ALA"), false),
            monomer("A", 4, "ALA", Some("ALA"), false),
        ]);
        assert!(index.has_unconfirmed(0, 3));
        assert!(index.has_unconfirmed(1, 1));
        assert!(!index.has_unconfirmed(2, 3));
        assert!(!index.has_unconfirmed(0, 0));
    }
}
