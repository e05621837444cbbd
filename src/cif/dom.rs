//! STAR/CIF Document Object Model.
//!
//! Provides an untyped representation of a CIF/STAR file, with a query API
//! for extracting data by tag name. mmCIF writes a category with a single row
//! as plain key-value pairs and a category with several rows as a `loop_`;
//! [`Block::columns`] and [`Block::column`] hide that difference so callers
//! see rows either way.

/// A parsed CIF/STAR document containing one or more data blocks.
#[derive(Debug, Clone)]
pub struct Document {
    pub blocks: Vec<Block>,
}

/// A data block (`data_NAME`) containing key-value pairs, loops, and save frames.
#[derive(Debug, Clone)]
pub struct Block {
    pub name: String,
    pub pairs: Vec<(String, Value)>,
    pub loops: Vec<Loop>,
    pub frames: Vec<Block>, // save frames (rare, only in dictionaries)
}

/// A looped data table: named columns with row-major values.
#[derive(Debug, Clone)]
pub struct Loop {
    /// Column names (tags).
    pub tags: Vec<String>,
    /// Row-major flat array of values. Length = `tags.len() * nrows()`.
    pub values: Vec<Value>,
}

/// A CIF data value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A string value (unquoted, single-quoted, double-quoted, or semicolon text).
    Str(String),
    /// The inapplicable marker `.`.
    Inapplicable,
    /// The unknown marker `?`.
    Unknown,
}

impl Value {
    /// Returns the string content, or `None` for `.` / `?`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Tries to parse the value as `i32`.
    pub fn as_i32(&self) -> Option<i32> {
        self.as_str()?.parse().ok()
    }

    /// Returns `true` if this is a `Str` value (not `.` or `?`).
    pub fn is_present(&self) -> bool {
        matches!(self, Value::Str(_))
    }
}

impl Document {
    /// The only data block of the document.
    ///
    /// Returns `None` for an empty document and for one with several blocks;
    /// an entry file carries exactly one.
    pub fn sole_block(&self) -> Option<&Block> {
        match self.blocks.as_slice() {
            [block] => Some(block),
            _ => None,
        }
    }
}

impl Loop {
    /// Number of rows in this loop.
    pub fn nrows(&self) -> usize {
        if self.tags.is_empty() {
            0
        } else {
            self.values.len() / self.tags.len()
        }
    }

    /// Find the column index for a tag (case-insensitive).
    pub fn column_index(&self, tag: &str) -> Option<usize> {
        self.tags
            .iter()
            .position(|t| t.eq_ignore_ascii_case(tag))
    }
}

impl Block {
    /// Get a single key-value pair by tag name (case-insensitive).
    pub fn get(&self, tag: &str) -> Option<&Value> {
        self.pairs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(tag))
            .map(|(_, v)| v)
    }

    /// Find the loop containing a given tag (case-insensitive).
    pub fn find_loop(&self, tag: &str) -> Option<&Loop> {
        self.loops
            .iter()
            .find(|lp| lp.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
    }

    /// Whether any tag of the category (e.g. `_struct_conf`) is present,
    /// either as a pair or as a loop column.
    pub fn has_category(&self, category: &str) -> bool {
        let belongs = |tag: &str| {
            tag.as_bytes().get(category.len()) == Some(&b'.')
                && tag
                    .get(..category.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(category))
        };
        self.pairs.iter().any(|(k, _)| belongs(k))
            || self
                .loops
                .iter()
                .any(|lp| lp.tags.iter().any(|t| belongs(t)))
    }

    /// First value of a tag: the pair value, or row 0 of its loop.
    pub fn first(&self, tag: &str) -> Option<&Value> {
        self.column(tag)?.next()
    }

    /// Last value of a tag: the pair value, or the final row of its loop.
    pub fn last(&self, tag: &str) -> Option<&Value> {
        self.column(tag)?.last()
    }

    /// Get a single column, from a loop or from a key-value pair.
    pub fn column(&self, tag: &str) -> Option<ColumnIter<'_>> {
        Some(ColumnIter {
            cols: self.columns(&[tag])?,
            row: 0,
        })
    }

    /// Get multiple columns of the same category, for row-wise iteration.
    ///
    /// Looks for a loop containing the first tag; when no loop has it, falls
    /// back to key-value pairs and yields them as a single row. Returns `None`
    /// if any tag is missing or if the tags span different loops.
    pub fn columns(&self, tags: &[&str]) -> Option<Columns<'_>> {
        let first = tags.first()?;
        if let Some(lp) = self.find_loop(first) {
            let mut col_indices = Vec::with_capacity(tags.len());
            for tag in tags {
                col_indices.push(lp.column_index(tag)?);
            }
            return Some(Columns {
                source: Source::Looped { lp, col_indices },
            });
        }
        let mut values = Vec::with_capacity(tags.len());
        for tag in tags {
            values.push(self.get(tag)?);
        }
        Some(Columns {
            source: Source::Pairs(values),
        })
    }
}

// ---------------------------------------------------------------------------
// Row access
// ---------------------------------------------------------------------------

#[derive(Clone)]
enum Source<'a> {
    Looped { lp: &'a Loop, col_indices: Vec<usize> },
    Pairs(Vec<&'a Value>),
}

/// Multi-column accessor for row-wise iteration over one category.
#[derive(Clone)]
pub struct Columns<'a> {
    source: Source<'a>,
}

impl<'a> Columns<'a> {
    /// Number of rows. Pair-form categories have exactly one.
    pub fn nrows(&self) -> usize {
        match &self.source {
            Source::Looped { lp, .. } => lp.nrows(),
            Source::Pairs(_) => 1,
        }
    }

    /// Number of selected columns.
    pub fn ncols(&self) -> usize {
        match &self.source {
            Source::Looped { col_indices, .. } => col_indices.len(),
            Source::Pairs(values) => values.len(),
        }
    }

    /// Get the value at `(row, col)` where `col` indexes into the requested tags.
    pub fn get(&self, row: usize, col: usize) -> &'a Value {
        match &self.source {
            Source::Looped { lp, col_indices } => {
                &lp.values[row * lp.tags.len() + col_indices[col]]
            }
            Source::Pairs(values) => values[col],
        }
    }

    /// Iterate over rows, yielding a `Vec<&Value>` per row.
    pub fn iter(&self) -> RowIter<'a> {
        RowIter {
            cols: self.clone(),
            row: 0,
        }
    }
}

/// Iterator over a single column's values.
pub struct ColumnIter<'a> {
    cols: Columns<'a>,
    row: usize,
}

impl<'a> Iterator for ColumnIter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        if self.row >= self.cols.nrows() {
            return None;
        }
        let value = self.cols.get(self.row, 0);
        self.row += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cols.nrows() - self.row;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ColumnIter<'_> {}

/// Row-wise iterator over selected columns of a category.
pub struct RowIter<'a> {
    cols: Columns<'a>,
    row: usize,
}

impl<'a> Iterator for RowIter<'a> {
    type Item = Vec<&'a Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.row >= self.cols.nrows() {
            return None;
        }
        let row = (0..self.cols.ncols())
            .map(|col| self.cols.get(self.row, col))
            .collect();
        self.row += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cols.nrows() - self.row;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RowIter<'_> {}
