//! Dotted path access into nested JSON values
//!
//! A [`Path`] is parsed once from a dotted string such as `address.lines.0`;
//! numeric segments index into arrays and act as plain keys on objects.
//! [`get`] reports a miss as `None`. [`set`] is a pure, non-destructive write:
//! it returns a new tree and never replaces a value that is already present.
//!
//! Copyright (c) 2025 Hookup Team
//! Licensed under the Apache-2.0 license

use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Largest number of `null` slots a write may add to pad an array
pub const MAX_ARRAY_PADDING: usize = 10_000;

/// One step of a [`Path`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object property
    Key(String),
    /// Array position (also matches the equivalent string key on objects)
    Index(usize),
}

impl PathSegment {
    /// Parse a single segment, coercing all-digit text to an index
    pub fn parse(segment: &str) -> Self {
        let numeric = !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit());
        match numeric.then(|| segment.parse::<usize>().ok()).flatten() {
            Some(index) => PathSegment::Index(index),
            None => PathSegment::Key(segment.to_string()),
        }
    }

    fn as_key(&self) -> String {
        match self {
            PathSegment::Key(key) => key.clone(),
            PathSegment::Index(index) => index.to_string(),
        }
    }

    fn empty_container(&self) -> Value {
        match self {
            PathSegment::Key(_) => Value::Object(Map::new()),
            PathSegment::Index(_) => Value::Array(Vec::new()),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(segment: &str) -> Self {
        PathSegment::parse(segment)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// A parsed dotted path. The empty path addresses the root value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// Parse a dotted path. An empty string is the root path.
    pub fn parse(path: &str) -> Self {
        if path.is_empty() {
            return Self::root();
        }
        Self {
            segments: path.split('.').map(PathSegment::parse).collect(),
        }
    }

    pub fn root() -> Self {
        Self { segments: Vec::new() }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when `self` addresses a strict ancestor of `other`
    pub fn is_strict_prefix_of(&self, other: &Path) -> bool {
        self.segments.len() < other.segments.len()
            && other.segments.iter().zip(&self.segments).all(|(a, b)| a == b)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::parse(s))
    }
}

impl From<&str> for Path {
    fn from(path: &str) -> Self {
        Path::parse(path)
    }
}

impl From<String> for Path {
    fn from(path: String) -> Self {
        Path::parse(&path)
    }
}

impl From<&String> for Path {
    fn from(path: &String) -> Self {
        Path::parse(path)
    }
}

impl From<usize> for Path {
    fn from(index: usize) -> Self {
        Self {
            segments: vec![PathSegment::Index(index)],
        }
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

/// Read the value at `path`, or `None` if any segment is missing.
pub fn get<'v>(target: &'v Value, path: &Path) -> Option<&'v Value> {
    path.segments.iter().try_fold(target, step)
}

fn step<'v>(current: &'v Value, segment: &PathSegment) -> Option<&'v Value> {
    match (current, segment) {
        (Value::Object(map), segment) => map.get(&segment.as_key()),
        (Value::Array(items), PathSegment::Index(index)) => items.get(*index),
        _ => None,
    }
}

/// Parse `path` and read the value there
pub fn lookup<'v>(target: &'v Value, path: &str) -> Option<&'v Value> {
    get(target, &Path::parse(path))
}

/// Return a copy of `target` with `value` written at `path`.
///
/// Missing intermediates are created as arrays when the next segment is an
/// index and as objects otherwise. A non-null value already at `path` is kept,
/// and a write that would have to replace a scalar or mismatched container on
/// the way down leaves the tree unchanged. A write that would pad an array with
/// more than [`MAX_ARRAY_PADDING`] nulls is skipped.
pub fn set(target: &Value, path: &Path, value: Value) -> Value {
    set_owned(target.clone(), path, value)
}

/// Rewrite `path` so each index segment that lands on an object in `source`
/// becomes the equivalent key, letting a later [`set`] rebuild objects where
/// the source has objects.
pub fn keyed_like(source: &Value, path: &Path) -> Path {
    let mut node = Some(source);
    path.segments
        .iter()
        .map(|segment| {
            let shaped = match (node, segment) {
                (Some(Value::Object(_)), PathSegment::Index(_)) => {
                    PathSegment::Key(segment.as_key())
                }
                _ => segment.clone(),
            };
            node = node.and_then(|current| step(current, segment));
            shaped
        })
        .collect()
}

/// [`set`] for an owned tree, avoiding the copy
pub fn set_owned(target: Value, path: &Path, value: Value) -> Value {
    insert_at(target, &path.segments, value)
}

fn insert_at(node: Value, segments: &[PathSegment], value: Value) -> Value {
    let Some((head, rest)) = segments.split_first() else {
        return if node.is_null() { value } else { node };
    };

    match node {
        Value::Null => insert_at(head.empty_container(), segments, value),
        Value::Object(mut map) => {
            let slot = map.entry(head.as_key()).or_insert(Value::Null);
            let child = std::mem::take(slot);
            *slot = insert_at(child, rest, value);
            Value::Object(map)
        }
        Value::Array(mut items) => {
            let PathSegment::Index(index) = *head else {
                return Value::Array(items);
            };
            if items.len() <= index {
                match index.checked_add(1) {
                    Some(len) if index - items.len() <= MAX_ARRAY_PADDING => {
                        items.resize(len, Value::Null)
                    }
                    _ => return Value::Array(items),
                }
            }
            let child = std::mem::take(&mut items[index]);
            items[index] = insert_at(child, rest, value);
            Value::Array(items)
        }
        scalar => scalar,
    }
}
