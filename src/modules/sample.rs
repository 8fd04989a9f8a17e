use std::path::Path;

use glam::{Vec2, Vec4};
use spritepack::{
    ActionDesc, AnimationDesc, ComponentDesc, EmitterMode, GravityMode, Label, Matrix, Offset,
    PackBuilder, Panel, ParticleConfig, PartDesc, PolyDesc, PolyVertex, Quad, TypeTag,
};

fn quad(texid: i32, x: i32, y: i32, size: i32) -> Quad {
    Quad {
        texid,
        texture_coord: [0, 0, 0, 64, 64, 64, 64, 0],
        // screen coordinates are in 1/16 pixel
        screen_coord: [
            x * 16,
            y * 16,
            x * 16,
            (y + size) * 16,
            (x + size) * 16,
            (y + size) * 16,
            (x + size) * 16,
            y * 16,
        ],
    }
}

fn sparks() -> ParticleConfig {
    ParticleConfig {
        mode: EmitterMode::Gravity(GravityMode {
            gravity: Vec2::new(0., -90.),
            speed: 60.,
            speed_var: 10.,
            tangential_accel: 0.,
            tangential_accel_var: 0.,
            radial_accel: 0.,
            radial_accel_var: 0.,
            rotation_is_dir: false,
        }),
        src_blend: 1,
        dst_blend: 0x303,
        duration: -1.,
        emitter_matrix: 0,
        source_position: Vec2::ZERO,
        pos_var: Vec2::new(4., 4.),
        life: 1.5,
        life_var: 0.25,
        angle: 90.,
        angle_var: 20.,
        start_size: 8.,
        start_size_var: 2.,
        end_size: 2.,
        end_size_var: 0.,
        start_color: Vec4::new(1., 0.8, 0.2, 1.),
        start_color_var: Vec4::ZERO,
        end_color: Vec4::new(1., 0.2, 0., 0.),
        end_color_var: Vec4::ZERO,
        start_spin: 0.,
        start_spin_var: 0.,
        end_spin: 0.,
        end_spin_var: 0.,
        emission_rate: 40.,
        total_particles: 60,
        position_type: 0,
    }
}

/// Builds a pack with one element of every kind plus a particle config.
///
/// Returns the blob and the particle config offset.
pub fn sample_pack() -> eyre::Result<(Vec<u8>, Offset)> {
    let mut builder = PackBuilder::new();
    builder.textures([1, 0]);

    let picture = builder.add_picture(&[quad(0, 0, 0, 32), quad(0, 32, 0, 32)])?;
    builder.push(TypeTag::Picture, picture);

    let label = builder.add_label(&Label {
        color: 0xffffffff,
        width: 200,
        height: 24,
        align: 0,
        size: 16,
        edge: 0,
        space_h: 0,
        space_w: 0,
        auto_scale: 0,
    });
    builder.push(TypeTag::Label, label);

    let animation = builder.add_animation(&AnimationDesc {
        components: vec![
            ComponentDesc {
                name: Some("body".to_string()),
                id: 0,
            },
            ComponentDesc { name: None, id: 1 },
        ],
        frames: vec![
            vec![PartDesc::new(0)],
            vec![
                PartDesc::new(0),
                PartDesc {
                    matrix: Some(Matrix {
                        m: [1024, 0, 0, 1024, 160, 0],
                    }),
                    touchable: true,
                    ..PartDesc::new(1)
                },
            ],
        ],
        actions: vec![
            ActionDesc {
                name: Some("idle".to_string()),
                number: 1,
                start_frame: 0,
            },
            ActionDesc {
                name: Some("wave".to_string()),
                number: 1,
                start_frame: 1,
            },
        ],
    })?;
    builder.push(TypeTag::Animation, animation);

    let polygon = builder.add_polygon(&[PolyDesc {
        texid: 0,
        vertices: vec![
            PolyVertex {
                uv: [0, 0],
                screen: [0, 0],
            },
            PolyVertex {
                uv: [64, 0],
                screen: [512, 0],
            },
            PolyVertex {
                uv: [32, 64],
                screen: [256, 512],
            },
        ],
    }])?;
    builder.push(TypeTag::Polygon, polygon);

    let panel = builder.add_panel(&Panel {
        width: 320,
        height: 240,
        scissor: 1,
    });
    builder.push(TypeTag::Panel, panel);

    let matrix = builder.add_matrix(&Matrix::IDENTITY);
    builder.push(TypeTag::Matrix, matrix);

    let particle_config = builder.add_particle_config(&sparks());

    Ok((builder.finish(), particle_config))
}

pub fn write_sample(out: &Path) -> eyre::Result<()> {
    let (blob, particle_config) = sample_pack()?;

    std::fs::write(out, &blob)?;

    log::info!(
        "wrote {} bytes to `{}`, particle config at {particle_config:#x}",
        blob.len(),
        out.display()
    );

    Ok(())
}
