//! Offset resolution.
//!
//! Everything here is a pure function of `(blob, offset)`: nothing is cached,
//! nothing is written, and resolving the same offset twice gives equal values.
use nom::{multi::count, Parser};

use crate::{
    error::PackError, parser::Record, Animation, AnimationHeader, Component, Offset, Picture,
    Poly, Polygon, Quad,
};

/// Header of tail-array records: the element count.
pub const TAIL_COUNT_SIZE: usize = 4;

/// Bytes `[start, start + size)` of the blob.
pub fn region(blob: &[u8], start: usize, size: usize) -> Result<&[u8], PackError> {
    let out_of_bounds = || PackError::OutOfBounds {
        offset: start,
        size,
        len: blob.len(),
    };

    let end = start.checked_add(size).ok_or_else(out_of_bounds)?;

    blob.get(start..end).ok_or_else(out_of_bounds)
}

/// Offset zero is the blob header, never a record.
pub fn present(offset: Offset, kind: &'static str) -> Result<Offset, PackError> {
    if offset == 0 {
        return Err(PackError::AbsentRecord { kind });
    }

    Ok(offset)
}

/// Reads the record `R` at `offset`.
pub fn resolve<R: Record>(blob: &[u8], offset: Offset) -> Result<R, PackError> {
    let offset = offset as usize;
    let bytes = region(blob, offset, R::SIZE)?;

    R::parse(bytes)
        .map(|(_, record)| record)
        .map_err(|_| PackError::Parse { offset })
}

/// Reads `n` consecutive `R` starting at `offset`.
///
/// `kind` names the array in the error when `n` is negative.
pub fn resolve_array<R: Record>(
    blob: &[u8],
    offset: Offset,
    n: i32,
    kind: &'static str,
) -> Result<Vec<R>, PackError> {
    let n = usize::try_from(n).map_err(|_| PackError::InvalidArity {
        kind,
        count: n as i64,
    })?;

    if n > 0 {
        present(offset, kind)?;
    }

    let offset = offset as usize;

    let size = n.checked_mul(R::SIZE).ok_or(PackError::OutOfBounds {
        offset,
        size: usize::MAX,
        len: blob.len(),
    })?;
    let bytes = region(blob, offset, size)?;

    count(R::parse, n)
        .parse(bytes)
        .map(|(_, records)| records)
        .map_err(|_| PackError::Parse { offset })
}

/// Reads the null-terminated string at `offset`.
pub fn resolve_string(blob: &[u8], offset: Offset) -> Result<&str, PackError> {
    let start = offset as usize;

    let tail = blob.get(start..).ok_or(PackError::OutOfBounds {
        offset: start,
        size: 1,
        len: blob.len(),
    })?;

    let end = tail
        .iter()
        .position(|&byte| byte == 0)
        .ok_or(PackError::MalformedString { offset: start })?;

    std::str::from_utf8(&tail[..end]).map_err(|_| PackError::MalformedString { offset: start })
}

/// Reads a tail-array count and checks it against the kind's minimum.
fn resolve_tail_count(
    blob: &[u8],
    offset: Offset,
    minimum: i32,
    kind: &'static str,
) -> Result<i32, PackError> {
    let n: i32 = resolve(blob, offset)?;

    if n < minimum {
        return Err(PackError::InvalidArity {
            kind,
            count: n as i64,
        });
    }

    Ok(n)
}

fn tail_start(offset: Offset, header_size: usize) -> Offset {
    offset.saturating_add(header_size as Offset)
}

pub fn resolve_picture(blob: &[u8], offset: Offset) -> Result<Picture, PackError> {
    present(offset, "picture")?;

    let n = resolve_tail_count(blob, offset, 1, "picture quad")?;
    let quads = resolve_array::<Quad>(blob, tail_start(offset, TAIL_COUNT_SIZE), n, "picture quad")?;

    Ok(Picture { quads })
}

pub fn resolve_polygon(blob: &[u8], offset: Offset) -> Result<Polygon, PackError> {
    present(offset, "polygon")?;

    let n = resolve_tail_count(blob, offset, 1, "polygon poly")?;
    let polys = resolve_array::<Poly>(blob, tail_start(offset, TAIL_COUNT_SIZE), n, "polygon poly")?;

    Ok(Polygon { polys })
}

pub fn resolve_animation(blob: &[u8], offset: Offset) -> Result<Animation, PackError> {
    let header: AnimationHeader = resolve(blob, present(offset, "animation")?)?;
    let components = resolve_array::<Component>(
        blob,
        tail_start(offset, AnimationHeader::SIZE),
        header.component_number,
        "animation component",
    )?;

    Ok(Animation { header, components })
}
