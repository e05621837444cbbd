//! Coil derivation: the parts of each chain no helix or strand covers.

use std::cmp::Ordering;

use super::span::{ResolvedSpan, SpanSource};
use crate::sequence::SequenceIndex;
use crate::structure::{AtomAddress, Chain, Helix, Model, ResidueSpan, Sheet};

/// One maximal uncovered stretch of a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coil {
    /// 1-based, numbered across the whole entry in scan order.
    pub id: u32,
    pub chain: String,
    /// Some residue in the stretch has no experimental density.
    pub unconfirmed: bool,
    pub sequence: String,
    /// Modeled residues only, with gap markers.
    pub annotated_sequence: String,
    pub start: i32,
    pub end: i32,
    pub length: i32,
}

/// A helix or strand whose endpoints lie in two different chains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IllDefinedSpan {
    pub source: SpanSource,
    pub start_chain: String,
    pub end_chain: String,
}

/// Result of [`derive_coils`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoilScan {
    pub coils: Vec<Coil>,
    /// Set when the scan stopped at an ill-defined span; `coils` then only
    /// holds the chains sorted before it.
    pub rejected: Option<IllDefinedSpan>,
}

/// A covered interval in sequential-id space.
#[derive(Debug, Clone)]
struct Interval {
    chain: String,
    low: i32,
    high: i32,
    source: SpanSource,
    /// Chain of the far endpoint when it differs from `chain`.
    crosses_to: Option<String>,
}

/// Chains order by name length first, so `B` precedes `AA`.
fn chain_order(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn interval_order(a: &Interval, b: &Interval) -> Ordering {
    chain_order(&a.chain, &b.chain)
        .then(a.low.cmp(&b.low))
        .then(a.high.cmp(&b.high))
}

/// Compute the coils of every chain in `index`.
///
/// Helix and strand endpoints are resolved through `model`, clamping to the
/// modeled extent of their chain; an endpoint in an unknown chain is logged
/// and its interval ignored. Chains are
/// scanned in (name length, name) order and each chain's intervals in
/// ascending order. A rolling cursor starts at the chain's first sequential
/// id and only moves forward, so overlapping and nested intervals are
/// handled. A chain without intervals yields one coil over its whole extent.
pub fn derive_coils(
    entry_id: &str,
    helices: &[Helix],
    sheets: &[Sheet],
    model: &Model,
    index: &SequenceIndex,
) -> CoilScan {
    let mut intervals = Vec::new();
    let mut add = |source: SpanSource, start: &AtomAddress, end: &AtomAddress| {
        let Some(span) = ResolvedSpan::resolve(model, start, end) else {
            log::warn!("{entry_id}: cannot resolve {source} ({start} to {end}), skipping it");
            return;
        };
        let (low, high) = span.bounds();
        let crosses_to = span.is_cross_chain().then(|| span.end_chain.clone());
        intervals.push(Interval {
            chain: span.start_chain,
            low,
            high,
            source,
            crosses_to,
        });
    };
    for (i, helix) in helices.iter().enumerate() {
        let source = SpanSource::Helix {
            index: i,
            id: helix.id.clone(),
        };
        add(source, &helix.start, &helix.end);
    }
    for sheet in sheets {
        for strand in &sheet.strands {
            let source = SpanSource::Strand {
                sheet: sheet.id.clone(),
                strand: strand.id.clone(),
            };
            add(source, &strand.start, &strand.end);
        }
    }
    intervals.sort_by(interval_order);

    let mut chains: Vec<&str> = index.chain_names().collect();
    for interval in &intervals {
        if !chains.contains(&interval.chain.as_str()) {
            chains.push(&interval.chain);
        }
    }
    chains.sort_by(|a, b| chain_order(a, b));

    let mut scan = CoilScan::default();
    let mut next_id = 1;
    for chain in chains {
        let covered: Vec<&Interval> = intervals.iter().filter(|iv| iv.chain == chain).collect();
        if let Some(bad) = covered.iter().find(|iv| iv.crosses_to.is_some()) {
            let rejected = IllDefinedSpan {
                source: bad.source.clone(),
                start_chain: bad.chain.clone(),
                end_chain: bad.crosses_to.clone().unwrap_or_default(),
            };
            log::warn!(
                "{entry_id}: {} runs from chain {} into chain {}; coils stop before chain {}",
                rejected.source,
                rejected.start_chain,
                rejected.end_chain,
                chain
            );
            scan.rejected = Some(rejected);
            return scan;
        }
        let Some((first_id, last_id)) = index.chain_extent(chain) else {
            log::warn!("{entry_id}: chain {chain} has secondary structure but no sequence records");
            continue;
        };
        let modeled = model.chain(chain).map(Chain::polymer).unwrap_or_default();
        let mut emit = |start: i32, end: i32| {
            if let Some(coil) = make_coil(next_id, chain, start, end, index, &modeled) {
                next_id += 1;
                scan.coils.push(coil);
            }
        };

        let mut cursor = first_id;
        for interval in covered {
            emit(cursor, interval.low.saturating_sub(1));
            cursor = cursor.max(interval.high.saturating_add(1));
        }
        emit(cursor, last_id);
    }
    scan
}

/// Build the coil for `[start, end]`, snapped to sequential ids present in
/// the chain. `None` when the range holds no record.
fn make_coil(
    id: u32,
    chain: &str,
    start: i32,
    end: i32,
    index: &SequenceIndex,
    modeled: &ResidueSpan<'_>,
) -> Option<Coil> {
    if start > end {
        return None;
    }
    let (first, last) = index.index_range(chain, start, end)?;
    let monomers = index.monomers();
    let (start, end) = (monomers[first].seq_id, monomers[last].seq_id);
    let sub = index.slice(first, last);
    Some(Coil {
        id,
        chain: chain.to_string(),
        unconfirmed: index.has_unconfirmed(first, last),
        sequence: sub.text,
        annotated_sequence: modeled.annotated_subsequence(start, end),
        start,
        end,
        length: sub.length,
    })
}
