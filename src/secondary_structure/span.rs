//! Resolution of author-addressed helix and strand endpoints.

use std::fmt;

use crate::structure::{AtomAddress, Model};

/// Where an interval came from, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanSource {
    /// Position of the helix in `_struct_conf` order, and its id.
    Helix { index: usize, id: String },
    Strand { sheet: String, strand: String },
}

impl fmt::Display for SpanSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanSource::Helix { index, id } => write!(f, "helix {index} ({id})"),
            SpanSource::Strand { sheet, strand } => write!(f, "sheet {sheet} strand {strand}"),
        }
    }
}

/// Both endpoints of a helix or strand in sequential-id space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpan {
    pub start_chain: String,
    pub start: i32,
    pub end_chain: String,
    pub end: i32,
}

impl ResolvedSpan {
    /// Resolve both endpoints through the model's author numbering.
    ///
    /// An endpoint past the modeled extent of its chain clamps to the
    /// chain's first or last modeled polymer residue. `None` only when an
    /// endpoint names a chain the model does not have, or one without
    /// modeled polymer residues.
    pub fn resolve(model: &Model, start: &AtomAddress, end: &AtomAddress) -> Option<Self> {
        let first = model.resolve(start)?;
        let last = model.resolve(end)?;
        Some(Self {
            start_chain: first.chain.name.clone(),
            start: first.residue.label_seq?,
            end_chain: last.chain.name.clone(),
            end: last.residue.label_seq?,
        })
    }

    pub fn is_cross_chain(&self) -> bool {
        self.start_chain != self.end_chain
    }

    /// `"A"`, or `"A B"` for a span whose endpoints sit in two chains.
    pub fn chain_label(&self) -> String {
        if self.is_cross_chain() {
            format!("{} {}", self.start_chain, self.end_chain)
        } else {
            self.start_chain.clone()
        }
    }

    /// Lower and higher sequential id.
    pub fn bounds(&self) -> (i32, i32) {
        (self.start.min(self.end), self.start.max(self.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{Chain, Residue, SeqId};

    fn model() -> Model {
        let residue = |chain: &str, label: Option<i32>, num: i32| Residue {
            name: "ALA".into(),
            subchain: chain.into(),
            entity_id: Some("1".into()),
            label_seq: label,
            seq_id: SeqId::new(num, None),
            polymer: label.is_some(),
        };
        let mut a = Chain::new("A");
        a.residues = vec![residue("A", Some(1), 11), residue("A", Some(2), 12), residue("A", None, 300)];
        let mut b = Chain::new("B");
        b.residues = vec![residue("B", Some(1), 1)];
        Model {
            number: 1,
            chains: vec![a, b],
        }
    }

    fn address(chain: &str, num: i32) -> AtomAddress {
        AtomAddress {
            chain: chain.into(),
            seq_id: SeqId::new(num, None),
            residue_name: "ALA".into(),
        }
    }

    #[test]
    fn resolve_same_chain() {
        let span = ResolvedSpan::resolve(&model(), &address("A", 12), &address("A", 11)).unwrap();
        assert_eq!((span.start, span.end), (2, 1));
        assert_eq!(span.bounds(), (1, 2));
        assert!(!span.is_cross_chain());
        assert_eq!(span.chain_label(), "A");
    }

    #[test]
    fn resolve_cross_chain() {
        let span = ResolvedSpan::resolve(&model(), &address("A", 11), &address("B", 1)).unwrap();
        assert!(span.is_cross_chain());
        assert_eq!(span.chain_label(), "A B");
    }

    #[test]
    fn endpoints_clamp_to_modeled_residues() {
        let model = model();
        let span = ResolvedSpan::resolve(&model, &address("A", 11), &address("A", 99)).unwrap();
        assert_eq!((span.start, span.end), (1, 2));
        let span = ResolvedSpan::resolve(&model, &address("A", 5), &address("A", 12)).unwrap();
        assert_eq!((span.start, span.end), (1, 2));
        // non-polymer residue has no sequential id
        let span = ResolvedSpan::resolve(&model, &address("A", 11), &address("A", 300)).unwrap();
        assert_eq!(span.bounds(), (1, 2));
    }

    #[test]
    fn unknown_chain_does_not_resolve() {
        let model = model();
        assert!(ResolvedSpan::resolve(&model, &address("Q", 1), &address("A", 11)).is_none());
        assert!(ResolvedSpan::resolve(&model, &address("A", 11), &address("Q", 1)).is_none());
    }

    #[test]
    fn source_display() {
        let helix = SpanSource::Helix { index: 3, id: "HELX_P4".into() };
        assert_eq!(helix.to_string(), "helix 3 (HELX_P4)");
        let strand = SpanSource::Strand { sheet: "AA".into(), strand: "2".into() };
        assert_eq!(strand.to_string(), "sheet AA strand 2");
    }
}
