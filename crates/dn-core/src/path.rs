//! Segment-addressed resolution and replacement over `serde_json::Value`.
//!
//! An [`Address`] is an ordered list of segments: object keys, or numeral
//! strings indexing arrays. The empty address is the document root.

use std::fmt;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::value::kind_of;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    segments: Vec<String>,
}

impl Address {
    pub fn root() -> Self {
        Self::default()
    }

    /// Split `a/b/0` style text into segments; empty segments are dropped,
    /// so `""`, `"/"` and `"a//b"` all behave as expected.
    pub fn parse(text: &str) -> Self {
        Self {
            segments: text
                .split(['/', '\\'])
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// Ascend one level. Returns false when already at root.
    pub fn pop(&mut self) -> bool {
        self.segments.pop().is_some()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for seg in &self.segments {
            write!(f, "/{seg}")?;
        }
        Ok(())
    }
}

fn index_for(segment: &str, len: usize) -> Result<usize> {
    let idx: usize = segment
        .parse()
        .map_err(|_| Error::nav(segment, "array indices must be integers"))?;
    if idx >= len {
        return Err(Error::nav(
            segment,
            format!("index out of bounds (len {len})"),
        ));
    }
    Ok(idx)
}

/// Walk `addr` from `doc`; the first segment that does not resolve is named
/// in the error.
pub fn resolve<'a>(doc: &'a Value, addr: &Address) -> Result<&'a Value> {
    let mut cur = doc;
    for seg in addr.segments() {
        cur = match cur {
            Value::Object(map) => map
                .get(seg)
                .ok_or_else(|| Error::nav(seg.as_str(), "no such key"))?,
            Value::Array(items) => {
                let idx = index_for(seg, items.len())?;
                &items[idx]
            }
            other => {
                return Err(Error::nav(
                    seg.as_str(),
                    format!("cannot descend into {}", kind_of(other)),
                ));
            }
        };
    }
    Ok(cur)
}

fn resolve_mut<'a>(doc: &'a mut Value, addr: &Address) -> Result<&'a mut Value> {
    let mut cur = doc;
    for seg in addr.segments() {
        cur = match cur {
            Value::Object(map) => map
                .get_mut(seg)
                .ok_or_else(|| Error::nav(seg.as_str(), "no such key"))?,
            Value::Array(items) => {
                let idx = index_for(seg, items.len())?;
                &mut items[idx]
            }
            other => {
                return Err(Error::nav(
                    seg.as_str(),
                    format!("cannot descend into {}", kind_of(other)),
                ));
            }
        };
    }
    Ok(cur)
}

/// Return a new document with the subtree at `addr` swapped for `new_value`.
/// Siblings are carried over untouched; on error the input is unaffected, so
/// the caller can swap the result in atomically. The empty address replaces
/// the whole document.
pub fn replace(doc: &Value, addr: &Address, new_value: Value) -> Result<Value> {
    let mut next = doc.clone();
    *resolve_mut(&mut next, addr)? = new_value;
    Ok(next)
}
