//! Position lookup over strictly increasing sequential ids.
//!
//! Plain bisection, except that every step also probes the index reached by
//! jumping from the midpoint by the id difference. Sequential ids are usually
//! contiguous, so that probe tends to land on the target after one step; when
//! it misses, bisection still halves the range, which bounds the loop by the
//! range length.
//!
//! Two flavours sit on top of [`search_by`]:
//! - [`locate_by`]: exact lookup inside a chain's record range, failing with
//!   [`LocateError::NotFound`] on a miss.
//! - [`locate_clamped`] / [`locate_range`]: lookups over modeled residues,
//!   where a target before the first or after the last residue clamps to
//!   that boundary.

/// Errors from exact position lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocateError {
    #[error("sequential id {target} not found in records {low}..={high}")]
    NotFound { target: i32, low: usize, high: usize },
    #[error("record range {low}..={high} lies outside {len} records")]
    OutOfBounds { low: usize, high: usize, len: usize },
    #[error("chain {0} has no sequence records")]
    UnknownChain(String),
}

/// Search `low..=high` for the position whose key equals `target`.
///
/// Keys must be strictly increasing over the range. Mirrors
/// [`slice::binary_search`]: `Ok(i)` on an exact hit, `Err(i)` with the
/// insertion point otherwise.
pub fn search_by<F>(low: usize, high: usize, target: i32, key: F) -> Result<usize, usize>
where
    F: Fn(usize) -> i32,
{
    let mut left = low as i64;
    let mut right = high as i64;
    while left <= right {
        let centre = (left + right) / 2;
        let centre_key = key(centre as usize);
        if centre_key == target {
            return Ok(centre as usize);
        }
        let jump = (centre + i64::from(target) - i64::from(centre_key)).clamp(left, right);
        if key(jump as usize) == target {
            return Ok(jump as usize);
        }
        if target < centre_key {
            right = centre - 1;
        } else {
            left = centre + 1;
        }
    }
    Err(left as usize)
}

/// Exact index of `target` within `low..=high` of a sequence of `len` keys.
pub fn locate_by<F>(len: usize, low: usize, high: usize, target: i32, key: F) -> Result<usize, LocateError>
where
    F: Fn(usize) -> i32,
{
    if low > high || high >= len {
        return Err(LocateError::OutOfBounds { low, high, len });
    }
    search_by(low, high, target, key).map_err(|_| LocateError::NotFound { target, low, high })
}

/// Index of `target` among `len` keys, clamped to the first or last index
/// when the target lies outside the keys. An in-range target that falls
/// between two keys resolves to the later one. `None` only when `len == 0`.
pub fn locate_clamped<F>(len: usize, target: i32, key: F) -> Option<usize>
where
    F: Fn(usize) -> i32,
{
    let last = len.checked_sub(1)?;
    if target <= key(0) {
        return Some(0);
    }
    if target >= key(last) {
        return Some(last);
    }
    match search_by(0, last, target, key) {
        Ok(i) | Err(i) => Some(i),
    }
}

/// Inclusive index range of the keys that fall inside `[low_id, high_id]`.
///
/// Ids outside the keys clamp to the boundary, so a range that overhangs
/// either end still yields the keys it covers. `None` when no key falls in
/// the range.
pub fn locate_range<F>(len: usize, low_id: i32, high_id: i32, key: F) -> Option<(usize, usize)>
where
    F: Fn(usize) -> i32,
{
    let last = len.checked_sub(1)?;
    if low_id > high_id || high_id < key(0) || low_id > key(last) {
        return None;
    }
    let start = locate_clamped(len, low_id, &key)?;
    let end = match search_by(0, last, high_id, &key) {
        Ok(i) => i,
        // high_id >= key(0), so the insertion point is at least 1
        Err(i) => i - 1,
    };
    (start <= end).then_some((start, end))
}
