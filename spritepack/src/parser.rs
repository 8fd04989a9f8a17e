use std::array::from_fn;

use nom::{
    bytes::complete::take,
    combinator::map,
    error::{Error, ErrorKind},
    multi::count,
    number::complete::{le_f32, le_i16, le_i32, le_u16, le_u32, le_u8},
    Parser,
};

use crate::{
    nom_helpers::{color4f, point, IResult},
    Action, AnimationHeader, BlobHeader, Component, EmitterMode, Frame, GravityMode, Label, Matrix,
    Panel, ParticleConfig, Part, Poly, Quad, RadiusMode, SpritePack, Trans,
    EMITTER_MODE_AREA_SIZE, EMITTER_MODE_GRAVITY, EMITTER_MODE_RADIUS,
};

/// A fixed-size record that can be read from anywhere in a blob.
///
/// `SIZE` is the exact number of bytes `parse` consumes. Builder and loader
/// both go through it so the two never disagree.
pub trait Record: Sized {
    const SIZE: usize;

    fn parse(i: &[u8]) -> IResult<'_, Self>;
}

macro_rules! scalar_record {
    ($($ty:ty => $parser:ident),* $(,)?) => {
        $(
            impl Record for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                fn parse(i: &[u8]) -> IResult<'_, Self> {
                    $parser(i)
                }
            }
        )*
    };
}

scalar_record! {
    u8 => le_u8,
    u16 => le_u16,
    i32 => le_i32,
    u32 => le_u32,
}

impl Record for BlobHeader {
    const SIZE: usize = 12;

    fn parse(i: &[u8]) -> IResult<'_, Self> {
        map(
            (take(4usize), le_u32, le_u32),
            |(magic, version, root): (&[u8], u32, u32)| {
                BlobHeader {
                    magic: from_fn(|k| magic[k]),
                    version,
                    root,
                }
            },
        )
        .parse(i)
    }
}

impl Record for Matrix {
    const SIZE: usize = 24;

    fn parse(i: &[u8]) -> IResult<'_, Self> {
        map(count(le_i32, 6), |m| Matrix {
            m: from_fn(|k| m[k]),
        })
        .parse(i)
    }
}

impl Record for Panel {
    const SIZE: usize = 12;

    fn parse(i: &[u8]) -> IResult<'_, Self> {
        map((le_i32, le_i32, le_i32), |(width, height, scissor)| Panel {
            width,
            height,
            scissor,
        })
        .parse(i)
    }
}

impl Record for Label {
    const SIZE: usize = 36;

    fn parse(i: &[u8]) -> IResult<'_, Self> {
        map(
            (
                le_u32, le_i32, le_i32, le_i32, le_i32, le_i32, le_i32, le_i32, le_i32,
            ),
            |(color, width, height, align, size, edge, space_h, space_w, auto_scale)| Label {
                color,
                width,
                height,
                align,
                size,
                edge,
                space_h,
                space_w,
                auto_scale,
            },
        )
        .parse(i)
    }
}

impl Record for Quad {
    const SIZE: usize = 52;

    fn parse(i: &[u8]) -> IResult<'_, Self> {
        map(
            (le_i32, count(le_u16, 8), count(le_i32, 8)),
            |(texid, texture_coord, screen_coord)| Quad {
                texid,
                texture_coord: from_fn(|k| texture_coord[k]),
                screen_coord: from_fn(|k| screen_coord[k]),
            },
        )
        .parse(i)
    }
}

impl Record for Poly {
    const SIZE: usize = 16;

    fn parse(i: &[u8]) -> IResult<'_, Self> {
        map(
            (le_u32, le_u32, le_i32, le_i32),
            |(texture_coord, screen_coord, texid, n)| Poly {
                texture_coord,
                screen_coord,
                texid,
                n,
            },
        )
        .parse(i)
    }
}

impl Record for Trans {
    const SIZE: usize = 12;

    fn parse(i: &[u8]) -> IResult<'_, Self> {
        map((le_u32, le_u32, le_u32), |(mat, color, additive)| Trans {
            mat,
            color,
            additive,
        })
        .parse(i)
    }
}

impl Record for Part {
    const SIZE: usize = 16;

    fn parse(i: &[u8]) -> IResult<'_, Self> {
        map(
            (Trans::parse, le_i16, le_i16),
            |(t, component_id, touchable)| Part {
                t,
                component_id,
                touchable,
            },
        )
        .parse(i)
    }
}

impl Record for Frame {
    const SIZE: usize = 8;

    fn parse(i: &[u8]) -> IResult<'_, Self> {
        map((le_u32, le_i32), |(part, n)| Frame { part, n }).parse(i)
    }
}

impl Record for Action {
    const SIZE: usize = 8;

    fn parse(i: &[u8]) -> IResult<'_, Self> {
        map((le_u32, le_i16, le_i16), |(name, number, start_frame)| {
            Action {
                name,
                number,
                start_frame,
            }
        })
        .parse(i)
    }
}

impl Record for Component {
    const SIZE: usize = 8;

    fn parse(i: &[u8]) -> IResult<'_, Self> {
        map((le_u32, le_i32), |(name, id)| Component { name, id }).parse(i)
    }
}

impl Record for AnimationHeader {
    const SIZE: usize = 20;

    fn parse(i: &[u8]) -> IResult<'_, Self> {
        map(
            (le_u32, le_u32, le_i32, le_i32, le_i32),
            |(frame, action, frame_number, action_number, component_number)| AnimationHeader {
                frame,
                action,
                frame_number,
                action_number,
                component_number,
            },
        )
        .parse(i)
    }
}

impl Record for SpritePack {
    const SIZE: usize = 20;

    fn parse(i: &[u8]) -> IResult<'_, Self> {
        map(
            (le_u32, le_u32, le_i32, le_i32, le_i32),
            |(type_, data, n, tex0, tex1)| SpritePack {
                type_,
                data,
                n,
                tex: [tex0, tex1],
            },
        )
        .parse(i)
    }
}

fn parse_gravity_mode(i: &[u8]) -> IResult<'_, GravityMode> {
    map(
        (
            point,
            le_f32,
            le_f32,
            le_f32,
            le_f32,
            le_f32,
            le_f32,
            le_u8,
        ),
        |(
            gravity,
            speed,
            speed_var,
            tangential_accel,
            tangential_accel_var,
            radial_accel,
            radial_accel_var,
            rotation_is_dir,
        )| GravityMode {
            gravity,
            speed,
            speed_var,
            tangential_accel,
            tangential_accel_var,
            radial_accel,
            radial_accel_var,
            rotation_is_dir: rotation_is_dir != 0,
        },
    )
    .parse(i)
}

fn parse_radius_mode(i: &[u8]) -> IResult<'_, RadiusMode> {
    map(
        (le_f32, le_f32, le_f32, le_f32, le_f32, le_f32),
        |(
            start_radius,
            start_radius_var,
            end_radius,
            end_radius_var,
            rotate_per_second,
            rotate_per_second_var,
        )| RadiusMode {
            start_radius,
            start_radius_var,
            end_radius,
            end_radius_var,
            rotate_per_second,
            rotate_per_second_var,
        },
    )
    .parse(i)
}

/// The tag picks which layout the shared area is read with.
fn parse_emitter_mode(i: &[u8]) -> IResult<'_, EmitterMode> {
    let (i, tag) = le_i32(i)?;
    let (i, area) = take(EMITTER_MODE_AREA_SIZE).parse(i)?;

    let mode = match tag {
        EMITTER_MODE_GRAVITY => EmitterMode::Gravity(parse_gravity_mode(area)?.1),
        EMITTER_MODE_RADIUS => EmitterMode::Radius(parse_radius_mode(area)?.1),
        _ => return Err(nom::Err::Error(Error::new(i, ErrorKind::Switch))),
    };

    Ok((i, mode))
}

impl Record for ParticleConfig {
    const SIZE: usize = 196;

    fn parse(i: &[u8]) -> IResult<'_, Self> {
        let (i, mode) = parse_emitter_mode(i)?;
        let (i, (src_blend, dst_blend, duration, emitter_matrix, source_position, pos_var)) =
            (le_i32, le_i32, le_f32, le_u32, point, point).parse(i)?;
        let (
            i,
            (life, life_var, angle, angle_var, start_size, start_size_var, end_size, end_size_var),
        ) = (
            le_f32, le_f32, le_f32, le_f32, le_f32, le_f32, le_f32, le_f32,
        )
            .parse(i)?;
        let (i, (start_color, start_color_var, end_color, end_color_var)) =
            (color4f, color4f, color4f, color4f).parse(i)?;
        let (
            i,
            (
                start_spin,
                start_spin_var,
                end_spin,
                end_spin_var,
                emission_rate,
                total_particles,
                position_type,
            ),
        ) = (le_f32, le_f32, le_f32, le_f32, le_f32, le_i32, le_i32).parse(i)?;

        Ok((
            i,
            ParticleConfig {
                mode,
                src_blend,
                dst_blend,
                duration,
                emitter_matrix,
                source_position,
                pos_var,
                life,
                life_var,
                angle,
                angle_var,
                start_size,
                start_size_var,
                end_size,
                end_size_var,
                start_color,
                start_color_var,
                end_color,
                end_color_var,
                start_spin,
                start_spin_var,
                end_spin,
                end_spin_var,
                emission_rate,
                total_particles,
                position_type,
            },
        ))
    }
}
