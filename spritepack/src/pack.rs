use std::{ffi::OsStr, path::Path};

use crate::{
    error::PackError,
    parser::Record,
    resolve::{
        present, resolve, resolve_animation, resolve_array, resolve_picture, resolve_polygon,
        resolve_string,
    },
    Action, Animation, BlobHeader, Element, Frame, Matrix, Offset, ParticleConfig, Part, Poly,
    PolyVertex, SpritePack, TypeTag, Uv, EMITTER_MODE_GRAVITY, EMITTER_MODE_RADIUS, MAGIC,
    VERSION,
};

/// Read-only view over a loaded blob.
///
/// Holds nothing but the borrowed bytes and the two fixed records at the top,
/// so it can be shared across threads freely.
#[derive(Debug, Clone, Copy)]
pub struct Pack<'a> {
    blob: &'a [u8],
    header: BlobHeader,
    sprite_pack: SpritePack,
}

impl<'a> Pack<'a> {
    pub fn open(blob: &'a [u8]) -> Result<Self, PackError> {
        let header: BlobHeader = resolve(blob, 0)?;

        if &header.magic != MAGIC {
            return Err(PackError::BadMagic {
                magic: header.magic,
            });
        }

        if header.version != VERSION {
            return Err(PackError::UnsupportedVersion {
                version: header.version,
            });
        }

        let sprite_pack: SpritePack = resolve(blob, present(header.root, "sprite pack")?)?;

        if sprite_pack.n < 0 {
            return Err(PackError::InvalidArity {
                kind: "sprite pack element",
                count: sprite_pack.n as i64,
            });
        }

        log::trace!(
            "opened pack of {} bytes with {} elements",
            blob.len(),
            sprite_pack.n
        );

        Ok(Self {
            blob,
            header,
            sprite_pack,
        })
    }

    pub fn blob(&self) -> &'a [u8] {
        self.blob
    }

    pub fn header(&self) -> &BlobHeader {
        &self.header
    }

    pub fn sprite_pack(&self) -> &SpritePack {
        &self.sprite_pack
    }

    /// Number of elements. `open` guarantees it is not negative.
    pub fn len(&self) -> usize {
        self.sprite_pack.n as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn textures(&self) -> [i32; 2] {
        self.sprite_pack.tex
    }

    fn check_index(&self, index: usize) -> Result<(), PackError> {
        if index >= self.len() {
            return Err(PackError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }

        Ok(())
    }

    /// Offset of `[T; ..]` element `index` in an array starting at `base`.
    fn element_offset<T: Record>(base: Offset, index: usize) -> Offset {
        let offset = (base as usize).saturating_add(index.saturating_mul(T::SIZE));

        // past the end of any blob, resolution reports it as out of bounds
        Offset::try_from(offset).unwrap_or(Offset::MAX)
    }

    pub fn type_tag(&self, index: usize) -> Result<TypeTag, PackError> {
        self.check_index(index)?;

        let tag: u8 = resolve(
            self.blob,
            Self::element_offset::<u8>(self.sprite_pack.type_, index),
        )?;

        TypeTag::try_from(tag)
    }

    pub fn data_offset(&self, index: usize) -> Result<Offset, PackError> {
        self.check_index(index)?;

        resolve(
            self.blob,
            Self::element_offset::<Offset>(self.sprite_pack.data, index),
        )
    }

    /// Resolves element `index` with the record kind its type tag names.
    pub fn lookup(&self, index: usize) -> Result<(TypeTag, Element), PackError> {
        let tag = self.type_tag(index)?;
        let offset = present(self.data_offset(index)?, "sprite pack element")?;

        let element = match tag {
            TypeTag::Picture => Element::Picture(resolve_picture(self.blob, offset)?),
            TypeTag::Animation => Element::Animation(resolve_animation(self.blob, offset)?),
            TypeTag::Polygon => Element::Polygon(resolve_polygon(self.blob, offset)?),
            TypeTag::Label => Element::Label(resolve(self.blob, offset)?),
            TypeTag::Panel => Element::Panel(resolve(self.blob, offset)?),
            TypeTag::Matrix => Element::Matrix(resolve(self.blob, offset)?),
        };

        Ok((tag, element))
    }

    pub fn elements(&self) -> impl Iterator<Item = Result<(TypeTag, Element), PackError>> + '_ {
        (0..self.len()).map(|index| self.lookup(index))
    }

    /// `None` for the zero offset.
    pub fn string(&self, offset: Offset) -> Result<Option<&'a str>, PackError> {
        if offset == 0 {
            return Ok(None);
        }

        resolve_string(self.blob, offset).map(Some)
    }

    /// `None` for the zero offset.
    pub fn matrix(&self, offset: Offset) -> Result<Option<Matrix>, PackError> {
        if offset == 0 {
            return Ok(None);
        }

        resolve(self.blob, offset).map(Some)
    }

    pub fn frames(&self, animation: &Animation) -> Result<Vec<Frame>, PackError> {
        resolve_array(
            self.blob,
            animation.header.frame,
            animation.header.frame_number,
            "animation frame",
        )
    }

    pub fn actions(&self, animation: &Animation) -> Result<Vec<Action>, PackError> {
        resolve_array(
            self.blob,
            animation.header.action,
            animation.header.action_number,
            "animation action",
        )
    }

    pub fn parts(&self, frame: &Frame) -> Result<Vec<Part>, PackError> {
        resolve_array(self.blob, frame.part, frame.n, "frame part")
    }

    pub fn poly_vertices(&self, poly: &Poly) -> Result<Vec<PolyVertex>, PackError> {
        let coord_count = poly.n.checked_mul(2).ok_or(PackError::InvalidArity {
            kind: "poly vertex",
            count: poly.n as i64,
        })?;

        let uvs: Vec<Uv> = resolve_array(self.blob, poly.texture_coord, coord_count, "poly vertex")?;
        let screen: Vec<i32> =
            resolve_array(self.blob, poly.screen_coord, coord_count, "poly vertex")?;

        Ok(uvs
            .chunks_exact(2)
            .zip(screen.chunks_exact(2))
            .map(|(uv, screen)| PolyVertex {
                uv: [uv[0], uv[1]],
                screen: [screen[0], screen[1]],
            })
            .collect())
    }

    pub fn particle_config(&self, offset: Offset) -> Result<ParticleConfig, PackError> {
        let offset = present(offset, "particle config")?;

        // checked up front so an unknown mode is not reported as a parse failure
        let mode: i32 = resolve(self.blob, offset)?;

        if mode != EMITTER_MODE_GRAVITY && mode != EMITTER_MODE_RADIUS {
            return Err(PackError::UnknownEmitterMode { mode });
        }

        resolve(self.blob, offset)
    }
}

/// Owned blob bytes, for callers that load from disk.
pub struct PackFile {
    pub bytes: Vec<u8>,
}

impl PackFile {
    pub fn open_from_file(path: impl AsRef<OsStr> + AsRef<Path>) -> Result<PackFile, PackError> {
        let bytes = std::fs::read(path)?;

        // fail early on anything that is not a pack
        Pack::open(&bytes)?;

        Ok(PackFile { bytes })
    }

    pub fn pack(&self) -> Result<Pack<'_>, PackError> {
        Pack::open(&self.bytes)
    }
}
