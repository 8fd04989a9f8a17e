use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutImage {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl LayoutImage {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Outcome of comparing a captured reference image with a fresh one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutDiff {
    pub name: String,
    pub reference_size: usize,
    pub actual_size: usize,
    /// Byte ranges that differ. When the sizes differ, the tail past the
    /// shorter image is the last range.
    pub ranges: Vec<Range<usize>>,
}

impl LayoutDiff {
    pub fn is_match(&self) -> bool {
        self.reference_size == self.actual_size && self.ranges.is_empty()
    }
}

pub fn compare(reference: &LayoutImage, actual: &LayoutImage) -> LayoutDiff {
    let mut ranges: Vec<Range<usize>> = vec![];

    reference
        .bytes
        .iter()
        .zip(actual.bytes.iter())
        .enumerate()
        .filter(|(_, (a, b))| a != b)
        .for_each(|(index, _)| match ranges.last_mut() {
            Some(last) if last.end == index => last.end += 1,
            _ => ranges.push(index..index + 1),
        });

    let shorter = reference.size().min(actual.size());
    let longer = reference.size().max(actual.size());

    if shorter != longer {
        ranges.push(shorter..longer);
    }

    LayoutDiff {
        name: actual.name.clone(),
        reference_size: reference.size(),
        actual_size: actual.size(),
        ranges,
    }
}
