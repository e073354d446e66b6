//! Field paths used in validation and decode diagnostics.
use std::fmt::{self, Write};

///
/// PathSegment
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PathSegment {
    Field(&'static str),
    Index(usize),
}

impl From<&'static str> for PathSegment {
    fn from(s: &'static str) -> Self {
        Self::Field(s)
    }
}

impl From<usize> for PathSegment {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

///
/// FieldPath
///
/// Stack of segments rendered as `Parent.Child[2].Leaf`.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, seg: impl Into<PathSegment>) {
        self.0.push(seg.into());
    }

    pub fn pop(&mut self) {
        self.0.pop();
    }

    #[must_use]
    pub const fn depth(&self) -> usize {
        self.0.len()
    }

    /// Render the path with one extra trailing segment.
    #[must_use]
    pub fn render_with(&self, extra: impl Into<PathSegment>) -> String {
        render(self.0.iter().copied().chain(Some(extra.into())))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self.0.iter().copied()))
    }
}

fn render(segments: impl Iterator<Item = PathSegment>) -> String {
    let mut out = String::new();
    let mut first = true;

    for seg in segments {
        match seg {
            PathSegment::Field(s) => {
                if !first {
                    out.push('.');
                }
                out.push_str(s);
            }
            PathSegment::Index(i) => {
                let _ = write!(out, "[{i}]");
            }
        }
        first = false;
    }

    out
}
