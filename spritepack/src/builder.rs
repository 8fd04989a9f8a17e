//! Asset builder side of the format.
//!
//! Records are appended as they are added, so element data comes first and
//! the sprite pack record with its two parallel arrays is written last by
//! [`PackBuilder::finish`]. The root offset in the header is patched then.
use byte_writer::ByteWriter;

use crate::{
    error::PackError,
    validate::{check_component_ids, check_component_ref, check_start_frames},
    writer::WriteToWriter,
    Action, AnimationHeader, BlobHeader, Component, Frame, Label, Matrix, Offset, Panel,
    ParticleConfig, Part, Poly, PolyVertex, Quad, SpritePack, Trans, TypeTag, MAGIC,
    RECORD_ALIGNMENT, VERSION,
};

#[derive(Debug, Clone, Default)]
pub struct ComponentDesc {
    pub name: Option<String>,
    pub id: i32,
}

#[derive(Debug, Clone)]
pub struct PartDesc {
    /// Written once per part, `None` leaves the offset at zero.
    pub matrix: Option<Matrix>,
    pub color: u32,
    pub additive: u32,
    pub component_id: i16,
    pub touchable: bool,
}

impl PartDesc {
    pub fn new(component_id: i16) -> Self {
        Self {
            matrix: None,
            color: 0xffffffff,
            additive: 0,
            component_id,
            touchable: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActionDesc {
    pub name: Option<String>,
    pub number: i16,
    pub start_frame: i16,
}

#[derive(Debug, Clone, Default)]
pub struct AnimationDesc {
    pub components: Vec<ComponentDesc>,
    /// Each frame is a list of parts.
    pub frames: Vec<Vec<PartDesc>>,
    pub actions: Vec<ActionDesc>,
}

#[derive(Debug, Clone)]
pub struct PolyDesc {
    pub texid: i32,
    pub vertices: Vec<PolyVertex>,
}

pub struct PackBuilder {
    writer: ByteWriter,
    root_slot: usize,
    elements: Vec<(TypeTag, Offset)>,
    textures: [i32; 2],
}

impl Default for PackBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PackBuilder {
    pub fn new() -> Self {
        let mut writer = ByteWriter::new();

        let header = BlobHeader {
            magic: *MAGIC,
            version: VERSION,
            root: 0,
        };
        header.write_to_writer(&mut writer);

        // root is the last field of the header
        let root_slot = writer.get_offset() - 4;

        Self {
            writer,
            root_slot,
            elements: vec![],
            textures: [0; 2],
        }
    }

    fn offset(&self) -> Offset {
        self.writer.get_offset() as Offset
    }

    fn write<T: WriteToWriter + ?Sized>(&mut self, record: &T) -> Offset {
        let offset = record.write_to_writer(&mut self.writer) as Offset;
        self.writer.align(RECORD_ALIGNMENT);
        offset
    }

    pub fn textures(&mut self, textures: [i32; 2]) -> &mut Self {
        self.textures = textures;
        self
    }

    pub fn add_string(&mut self, s: &str) -> Offset {
        let offset = self.offset();

        self.writer.append_cstring(s);
        self.writer.align(RECORD_ALIGNMENT);

        offset
    }

    fn add_optional_string(&mut self, s: Option<&str>) -> Offset {
        s.map(|s| self.add_string(s)).unwrap_or(0)
    }

    pub fn add_matrix(&mut self, matrix: &Matrix) -> Offset {
        self.write(matrix)
    }

    pub fn add_label(&mut self, label: &Label) -> Offset {
        self.write(label)
    }

    pub fn add_panel(&mut self, panel: &Panel) -> Offset {
        self.write(panel)
    }

    pub fn add_particle_config(&mut self, config: &ParticleConfig) -> Offset {
        self.write(config)
    }

    /// Count then the quads inline. Needs at least one quad.
    pub fn add_picture(&mut self, quads: &[Quad]) -> Result<Offset, PackError> {
        if quads.is_empty() {
            return Err(PackError::InvalidArity {
                kind: "picture quad",
                count: 0,
            });
        }

        let offset = self.offset();

        self.writer.append_i32(quads.len() as i32);
        self.write(quads);

        log::debug!("picture with {} quads at {offset:#x}", quads.len());

        Ok(offset)
    }

    /// Vertex arrays first, then the count and the poly entries inline.
    pub fn add_polygon(&mut self, polys: &[PolyDesc]) -> Result<Offset, PackError> {
        if polys.is_empty() {
            return Err(PackError::InvalidArity {
                kind: "polygon poly",
                count: 0,
            });
        }

        let entries: Vec<Poly> = polys
            .iter()
            .map(|poly| {
                let texture_coord = self.offset();
                poly.vertices
                    .iter()
                    .for_each(|vertex| self.writer.append_u16_slice(&vertex.uv));
                self.writer.align(RECORD_ALIGNMENT);

                let screen_coord = self.offset();
                poly.vertices
                    .iter()
                    .for_each(|vertex| self.writer.append_i32_slice(&vertex.screen));

                Poly {
                    texture_coord,
                    screen_coord,
                    texid: poly.texid,
                    n: poly.vertices.len() as i32,
                }
            })
            .collect();

        let offset = self.offset();

        self.writer.append_i32(entries.len() as i32);
        self.write(entries.as_slice());

        log::debug!("polygon with {} polys at {offset:#x}", entries.len());

        Ok(offset)
    }

    /// Writes names, matrices, parts, frames and actions, then the animation
    /// header with its components inline.
    ///
    /// Refuses descriptions that would fail validation on load.
    pub fn add_animation(&mut self, desc: &AnimationDesc) -> Result<Offset, PackError> {
        let components: Vec<Component> = desc
            .components
            .iter()
            .map(|component| Component {
                name: self.add_optional_string(component.name.as_deref()),
                id: component.id,
            })
            .collect();

        let actions: Vec<Action> = desc
            .actions
            .iter()
            .map(|action| Action {
                name: self.add_optional_string(action.name.as_deref()),
                number: action.number,
                start_frame: action.start_frame,
            })
            .collect();

        check_component_ids(&components)?;
        check_start_frames(&actions, desc.frames.len() as i32)?;

        let mut frames = Vec::with_capacity(desc.frames.len());

        for frame in &desc.frames {
            let mut parts = Vec::with_capacity(frame.len());

            for part in frame {
                let mat = match &part.matrix {
                    Some(matrix) => self.add_matrix(matrix),
                    None => 0,
                };

                let part = Part {
                    t: Trans {
                        mat,
                        color: part.color,
                        additive: part.additive,
                    },
                    component_id: part.component_id,
                    touchable: part.touchable as i16,
                };

                check_component_ref(&part, &components)?;
                parts.push(part);
            }

            let part = if parts.is_empty() {
                0
            } else {
                self.write(parts.as_slice())
            };

            frames.push(Frame {
                part,
                n: parts.len() as i32,
            });
        }

        let frame = if frames.is_empty() {
            0
        } else {
            self.write(frames.as_slice())
        };

        let action = if actions.is_empty() {
            0
        } else {
            self.write(actions.as_slice())
        };

        let header = AnimationHeader {
            frame,
            action,
            frame_number: frames.len() as i32,
            action_number: actions.len() as i32,
            component_number: components.len() as i32,
        };

        let offset = self.write(&header);
        self.write(components.as_slice());

        log::debug!(
            "animation with {} frames, {} actions, {} components at {offset:#x}",
            header.frame_number,
            header.action_number,
            header.component_number
        );

        Ok(offset)
    }

    /// Appends an element to the sprite pack and returns its index.
    pub fn push(&mut self, tag: TypeTag, offset: Offset) -> usize {
        self.elements.push((tag, offset));
        self.elements.len() - 1
    }

    /// Writes the type array, the data array and the sprite pack record.
    pub fn finish(mut self) -> Vec<u8> {
        let type_ = self.offset();
        self.elements
            .iter()
            .for_each(|(tag, _)| self.writer.append_u8(*tag as u8));
        self.writer.align(RECORD_ALIGNMENT);

        let data = self.offset();
        self.elements
            .iter()
            .for_each(|(_, offset)| self.writer.append_u32(*offset));

        let sprite_pack = SpritePack {
            type_,
            data,
            n: self.elements.len() as i32,
            tex: self.textures,
        };
        let root = self.write(&sprite_pack);

        self.writer.replace_with_u32(self.root_slot, root);

        log::debug!(
            "finished pack with {} elements, {} bytes",
            sprite_pack.n,
            self.writer.get_offset()
        );

        self.writer.data
    }
}
