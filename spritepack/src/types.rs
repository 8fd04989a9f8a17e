use glam::{Vec2, Vec4};

use crate::error::PackError;

/// Byte distance from the start of the blob. Zero means absent.
pub type Offset = u32;

/// Texture coordinate, stored as opaque fixed-point bits.
pub type Uv = u16;

pub const MAGIC: &[u8; 4] = b"SPAK";
pub const VERSION: u32 = 1;

/// Every record starts on this boundary.
pub const RECORD_ALIGNMENT: usize = 4;

/// Fixed prefix at offset 0 of every blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobHeader {
    pub magic: [u8; 4],
    pub version: u32,
    /// Where the [`SpritePack`] record is.
    pub root: Offset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Matrix {
    pub m: [i32; 6],
}

impl Matrix {
    /// Fixed-point identity, 1.0 is 1024 for the scale terms.
    pub const IDENTITY: Matrix = Matrix {
        m: [1024, 0, 0, 1024, 0, 0],
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    pub width: i32,
    pub height: i32,
    pub scissor: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub color: u32,
    pub width: i32,
    pub height: i32,
    pub align: i32,
    pub size: i32,
    pub edge: i32,
    pub space_h: i32,
    pub space_w: i32,
    pub auto_scale: i32,
}

/// `texture_coord[i]` and `screen_coord[i]` describe the same corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quad {
    pub texid: i32,
    pub texture_coord: [Uv; 8],
    pub screen_coord: [i32; 8],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    pub quads: Vec<Quad>,
}

/// Polygon entry. The vertex arrays live elsewhere in the blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Poly {
    /// `[Uv; 2 * n]`
    pub texture_coord: Offset,
    /// `[i32; 2 * n]`
    pub screen_coord: Offset,
    pub texid: i32,
    pub n: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolyVertex {
    pub uv: [Uv; 2],
    pub screen: [i32; 2],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    pub polys: Vec<Poly>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trans {
    pub mat: Offset,
    pub color: u32,
    pub additive: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Part {
    pub t: Trans,
    pub component_id: i16,
    pub touchable: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// `[Part; n]`
    pub part: Offset,
    pub n: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub name: Offset,
    pub number: i16,
    pub start_frame: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component {
    pub name: Offset,
    pub id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationHeader {
    /// `[Frame; frame_number]`
    pub frame: Offset,
    /// `[Action; action_number]`
    pub action: Offset,
    pub frame_number: i32,
    pub action_number: i32,
    pub component_number: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    pub header: AnimationHeader,
    pub components: Vec<Component>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpritePack {
    /// `[u8; n]`, one [`TypeTag`] per element
    pub type_: Offset,
    /// `[Offset; n]`
    pub data: Offset,
    pub n: i32,
    pub tex: [i32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeTag {
    Picture = 1,
    Animation = 2,
    Polygon = 3,
    Label = 4,
    Panel = 5,
    Matrix = 7,
}

impl TryFrom<u8> for TypeTag {
    type Error = PackError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::Picture,
            2 => Self::Animation,
            3 => Self::Polygon,
            4 => Self::Label,
            5 => Self::Panel,
            7 => Self::Matrix,
            tag => return Err(PackError::UnknownTypeTag { tag }),
        })
    }
}

/// A sprite pack element, interpreted through its [`TypeTag`].
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Picture(Picture),
    Animation(Animation),
    Polygon(Polygon),
    Label(Label),
    Panel(Panel),
    Matrix(Matrix),
}

impl Element {
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Element::Picture(_) => TypeTag::Picture,
            Element::Animation(_) => TypeTag::Animation,
            Element::Polygon(_) => TypeTag::Polygon,
            Element::Label(_) => TypeTag::Label,
            Element::Panel(_) => TypeTag::Panel,
            Element::Matrix(_) => TypeTag::Matrix,
        }
    }
}

pub const EMITTER_MODE_GRAVITY: i32 = 0;
pub const EMITTER_MODE_RADIUS: i32 = 1;

/// Size of the area shared by both emitter modes.
pub const EMITTER_MODE_AREA_SIZE: usize = 36;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityMode {
    pub gravity: Vec2,
    pub speed: f32,
    pub speed_var: f32,
    pub tangential_accel: f32,
    pub tangential_accel_var: f32,
    pub radial_accel: f32,
    pub radial_accel_var: f32,
    /// Rotate each particle to face its direction.
    pub rotation_is_dir: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusMode {
    pub start_radius: f32,
    pub start_radius_var: f32,
    pub end_radius: f32,
    pub end_radius_var: f32,
    /// Degrees around the source position per second.
    pub rotate_per_second: f32,
    pub rotate_per_second_var: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EmitterMode {
    Gravity(GravityMode),
    Radius(RadiusMode),
}

impl EmitterMode {
    pub fn tag(&self) -> i32 {
        match self {
            EmitterMode::Gravity(_) => EMITTER_MODE_GRAVITY,
            EmitterMode::Radius(_) => EMITTER_MODE_RADIUS,
        }
    }
}

/// Immutable emitter description consumed by the particle simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleConfig {
    pub mode: EmitterMode,
    pub src_blend: i32,
    pub dst_blend: i32,
    /// Seconds the emitter runs, -1 is forever.
    pub duration: f32,
    pub emitter_matrix: Offset,
    pub source_position: Vec2,
    pub pos_var: Vec2,
    pub life: f32,
    pub life_var: f32,
    pub angle: f32,
    pub angle_var: f32,
    pub start_size: f32,
    pub start_size_var: f32,
    pub end_size: f32,
    pub end_size_var: f32,
    pub start_color: Vec4,
    pub start_color_var: Vec4,
    pub end_color: Vec4,
    pub end_color_var: Vec4,
    pub start_spin: f32,
    pub start_spin_var: f32,
    pub end_spin: f32,
    pub end_spin_var: f32,
    pub emission_rate: f32,
    pub total_particles: i32,
    pub position_type: i32,
}
