//! Relocation-free sprite pack format.
//!
//! A blob is one contiguous buffer. Records refer to each other with `u32`
//! byte offsets from the start of the blob, never with pointers, so a blob
//! can be copied or mapped anywhere and read concurrently without patching.
//!
//! Layout policy, shared by [`PackBuilder`] and [`Pack`]: little-endian,
//! every record 4-byte aligned, every field naturally aligned, no implicit
//! padding inside records. Record sizes are [`Record::SIZE`].
mod builder;
pub mod error;
mod nom_helpers;
mod pack;
mod parser;
pub mod resolve;
mod types;
mod validate;
mod writer;

pub use builder::{ActionDesc, AnimationDesc, ComponentDesc, PackBuilder, PartDesc, PolyDesc};
pub use pack::{Pack, PackFile};
pub use parser::Record;
pub use types::*;

#[cfg(test)]
mod test {
    use byte_writer::ByteWriter;
    use glam::{Vec2, Vec4};

    use crate::{
        error::PackError,
        resolve::{resolve, resolve_picture, resolve_string},
        validate::check_component_ref,
        writer::WriteToWriter,
        *,
    };

    fn quad(k: i32) -> Quad {
        Quad {
            texid: k,
            texture_coord: std::array::from_fn(|i| (k as u16) * 100 + i as u16),
            screen_coord: std::array::from_fn(|i| -(k * 1000) - i as i32),
        }
    }

    fn label() -> Label {
        Label {
            color: 0xff00ff00,
            width: 100,
            height: 50,
            align: 0,
            size: 16,
            edge: 1,
            space_h: 2,
            space_w: 3,
            auto_scale: 0,
        }
    }

    fn walk_animation() -> AnimationDesc {
        AnimationDesc {
            components: vec![
                ComponentDesc {
                    name: Some("body".to_string()),
                    id: 0,
                },
                ComponentDesc { name: None, id: 7 },
            ],
            frames: vec![
                vec![PartDesc::new(0), PartDesc::new(7)],
                vec![PartDesc {
                    matrix: Some(Matrix::IDENTITY),
                    touchable: true,
                    ..PartDesc::new(7)
                }],
                vec![],
            ],
            actions: vec![
                ActionDesc {
                    name: Some("walk".to_string()),
                    number: 2,
                    start_frame: 0,
                },
                ActionDesc {
                    name: Some("idle".to_string()),
                    number: 1,
                    start_frame: 2,
                },
            ],
        }
    }

    fn gravity_config() -> ParticleConfig {
        ParticleConfig {
            mode: EmitterMode::Gravity(GravityMode {
                gravity: Vec2::new(1., 2.),
                speed: 3.,
                speed_var: 4.,
                tangential_accel: 5.,
                tangential_accel_var: 6.,
                radial_accel: 7.,
                radial_accel_var: 8.,
                rotation_is_dir: true,
            }),
            src_blend: 1,
            dst_blend: 0x301,
            duration: 9.,
            emitter_matrix: 0,
            source_position: Vec2::new(10., 11.),
            pos_var: Vec2::new(12., 13.),
            life: 14.,
            life_var: 15.,
            angle: 16.,
            angle_var: 17.,
            start_size: 18.,
            start_size_var: 19.,
            end_size: 20.,
            end_size_var: 21.,
            start_color: Vec4::ONE,
            start_color_var: Vec4::ZERO,
            end_color: Vec4::new(1., 0., 0., 0.),
            end_color_var: Vec4::ZERO,
            start_spin: 0.,
            start_spin_var: 0.,
            end_spin: 234.,
            end_spin_var: 0.,
            emission_rate: 30.,
            total_particles: 123,
            position_type: 1,
        }
    }

    /// Picture with 3 quads then a label.
    fn picture_label_pack() -> Vec<u8> {
        let mut builder = PackBuilder::new();

        let picture = builder.add_picture(&[quad(1), quad(2), quad(3)]).unwrap();
        let label = builder.add_label(&label());

        builder.push(TypeTag::Picture, picture);
        builder.push(TypeTag::Label, label);
        builder.textures([3, 4]);

        builder.finish()
    }

    fn written_size<T: WriteToWriter>(record: &T) -> usize {
        let mut writer = ByteWriter::new();
        record.write_to_writer(&mut writer);
        writer.get_offset()
    }

    #[test]
    fn assert_record_size() {
        assert_eq!(BlobHeader::SIZE, 12);
        assert_eq!(Matrix::SIZE, 24);
        assert_eq!(Panel::SIZE, 12);
        assert_eq!(Label::SIZE, 36);
        assert_eq!(Quad::SIZE, 52);
        assert_eq!(Poly::SIZE, 16);
        assert_eq!(Trans::SIZE, 12);
        assert_eq!(Part::SIZE, 16);
        assert_eq!(Frame::SIZE, 8);
        assert_eq!(Action::SIZE, 8);
        assert_eq!(Component::SIZE, 8);
        assert_eq!(AnimationHeader::SIZE, 20);
        assert_eq!(SpritePack::SIZE, 20);
        assert_eq!(ParticleConfig::SIZE, 196);
    }

    #[test]
    fn writer_matches_record_size() {
        assert_eq!(written_size(&Matrix::IDENTITY), Matrix::SIZE);
        assert_eq!(written_size(&label()), Label::SIZE);
        assert_eq!(written_size(&quad(1)), Quad::SIZE);
        assert_eq!(written_size(&gravity_config()), ParticleConfig::SIZE);

        let part = Part {
            t: Trans {
                mat: 0,
                color: 0,
                additive: 0,
            },
            component_id: 0,
            touchable: 0,
        };
        assert_eq!(written_size(&part), Part::SIZE);
    }

    #[test]
    fn picture_and_label_lookup() {
        let blob = picture_label_pack();
        let pack = Pack::open(&blob).unwrap();

        assert_eq!(pack.len(), 2);
        assert_eq!(pack.textures(), [3, 4]);

        let (tag, element) = pack.lookup(0).unwrap();
        assert_eq!(tag, TypeTag::Picture);
        let Element::Picture(picture) = element else {
            panic!("expected picture, got {element:?}");
        };
        assert_eq!(picture.quads.len(), 3);

        let (tag, element) = pack.lookup(1).unwrap();
        assert_eq!(tag, TypeTag::Label);
        assert_eq!(element, Element::Label(label()));
        assert_eq!(element.type_tag(), tag);

        assert!(matches!(
            pack.lookup(2),
            Err(PackError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn picture_quads_keep_corner_order() {
        let quads: Vec<Quad> = (1..=4).map(quad).collect();

        let mut builder = PackBuilder::new();
        let offset = builder.add_picture(&quads).unwrap();
        builder.push(TypeTag::Picture, offset);
        let blob = builder.finish();

        let picture = resolve_picture(&blob, offset).unwrap();

        assert_eq!(picture.quads, quads);
        assert_eq!(picture.quads[2].texture_coord[5], 305);
        assert_eq!(picture.quads[2].screen_coord[5], -3005);
    }

    #[test]
    fn resolution_is_repeatable() {
        let blob = picture_label_pack();
        let pack = Pack::open(&blob).unwrap();

        assert_eq!(pack.lookup(0).unwrap(), pack.lookup(0).unwrap());

        let offset = pack.data_offset(1).unwrap();
        let first: Label = resolve(&blob, offset).unwrap();
        let second: Label = resolve(&blob, offset).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn relocated_copy_reads_the_same() {
        let blob = picture_label_pack();

        // a copy at another address, behind unrelated bytes
        let mut shifted = vec![0xaa; 3];
        shifted.extend_from_slice(&blob);
        let copy = &shifted[3..];

        let pack = Pack::open(&blob).unwrap();
        let moved = Pack::open(copy).unwrap();

        assert_eq!(
            pack.elements().collect::<Result<Vec<_>, _>>().unwrap(),
            moved.elements().collect::<Result<Vec<_>, _>>().unwrap()
        );
    }

    #[test]
    fn single_quad_picture_is_minimum() {
        let mut builder = PackBuilder::new();

        assert!(builder.add_picture(&[quad(1)]).is_ok());
        assert!(matches!(
            builder.add_picture(&[]),
            Err(PackError::InvalidArity { count: 0, .. })
        ));
        assert!(matches!(
            builder.add_polygon(&[]),
            Err(PackError::InvalidArity { count: 0, .. })
        ));
    }

    #[test]
    fn empty_picture_rejected_on_read() {
        let mut builder = PackBuilder::new();
        let offset = builder.add_picture(&[quad(1)]).unwrap();
        builder.push(TypeTag::Picture, offset);
        let mut blob = builder.finish();

        // count of the tail array
        blob[offset as usize..offset as usize + 4].copy_from_slice(&0i32.to_le_bytes());

        let pack = Pack::open(&blob).unwrap();
        assert!(matches!(
            pack.lookup(0),
            Err(PackError::InvalidArity {
                kind: "picture quad",
                count: 0
            })
        ));
    }

    #[test]
    fn empty_polygon_rejected_on_read() {
        let mut builder = PackBuilder::new();
        let offset = builder
            .add_polygon(&[PolyDesc {
                texid: 0,
                vertices: vec![],
            }])
            .unwrap();
        builder.push(TypeTag::Polygon, offset);
        let mut blob = builder.finish();

        blob[offset as usize..offset as usize + 4].copy_from_slice(&0i32.to_le_bytes());

        let pack = Pack::open(&blob).unwrap();
        assert!(matches!(
            pack.lookup(0),
            Err(PackError::InvalidArity {
                kind: "polygon poly",
                count: 0
            })
        ));
    }

    #[test]
    fn negative_counts_rejected() {
        let mut builder = PackBuilder::new();
        let picture = builder.add_picture(&[quad(1)]).unwrap();
        let animation = builder.add_animation(&walk_animation()).unwrap();
        builder.push(TypeTag::Picture, picture);
        builder.push(TypeTag::Animation, animation);
        let blob = builder.finish();

        let set_i32 = |at: usize, value: i32| {
            let mut blob = blob.clone();
            blob[at..at + 4].copy_from_slice(&value.to_le_bytes());
            blob
        };

        let corrupted = set_i32(picture as usize, -1);
        let pack = Pack::open(&corrupted).unwrap();
        assert!(matches!(
            pack.lookup(0),
            Err(PackError::InvalidArity {
                kind: "picture quad",
                count: -1
            })
        ));

        // component_number
        let corrupted = set_i32(animation as usize + 16, -1);
        let pack = Pack::open(&corrupted).unwrap();
        assert!(matches!(
            pack.lookup(1),
            Err(PackError::InvalidArity {
                kind: "animation component",
                count: -1
            })
        ));

        // frame_number
        let corrupted = set_i32(animation as usize + 8, -1);
        let pack = Pack::open(&corrupted).unwrap();
        let (_, Element::Animation(walk)) = pack.lookup(1).unwrap() else {
            panic!("expected animation");
        };
        assert!(matches!(
            pack.frames(&walk),
            Err(PackError::InvalidArity { count: -1, .. })
        ));
        assert!(pack.validate().is_err());
    }

    #[test]
    fn zero_offset_element_is_absent() {
        let mut builder = PackBuilder::new();
        builder.push(TypeTag::Label, 0);
        builder.push(TypeTag::Matrix, 0);
        builder.push(TypeTag::Picture, 0);
        builder.push(TypeTag::Animation, 0);
        let blob = builder.finish();

        let pack = Pack::open(&blob).unwrap();

        (0..pack.len()).for_each(|index| {
            assert!(matches!(
                pack.lookup(index),
                Err(PackError::AbsentRecord { .. })
            ));
        });
        assert!(matches!(
            pack.validate(),
            Err(PackError::AbsentRecord { .. })
        ));
        assert!(matches!(
            pack.particle_config(0),
            Err(PackError::AbsentRecord {
                kind: "particle config"
            })
        ));

        let mut blob = blob;
        blob[8..12].copy_from_slice(&0u32.to_le_bytes());
        assert!(matches!(
            Pack::open(&blob),
            Err(PackError::AbsentRecord { kind: "sprite pack" })
        ));
    }

    #[test]
    fn zero_offset_array_is_absent() {
        let mut builder = PackBuilder::new();
        let offset = builder.add_animation(&walk_animation()).unwrap();
        builder.push(TypeTag::Animation, offset);
        let polygon = builder
            .add_polygon(&[PolyDesc {
                texid: 0,
                vertices: vec![PolyVertex {
                    uv: [1, 2],
                    screen: [3, 4],
                }],
            }])
            .unwrap();
        builder.push(TypeTag::Polygon, polygon);
        let blob = builder.finish();

        let pack = Pack::open(&blob).unwrap();
        pack.validate().unwrap();

        let (_, Element::Animation(animation)) = pack.lookup(0).unwrap() else {
            panic!("expected animation");
        };

        // part array of the first frame, which has two parts
        let mut corrupted = blob.clone();
        let at = animation.header.frame as usize;
        corrupted[at..at + 4].copy_from_slice(&0u32.to_le_bytes());

        let pack = Pack::open(&corrupted).unwrap();
        let frames = pack.frames(&animation).unwrap();
        assert!(matches!(
            pack.parts(&frames[0]),
            Err(PackError::AbsentRecord { kind: "frame part" })
        ));
        assert!(pack.validate().is_err());

        // frame array itself
        let mut corrupted = blob.clone();
        let at = offset as usize;
        corrupted[at..at + 4].copy_from_slice(&0u32.to_le_bytes());

        let pack = Pack::open(&corrupted).unwrap();
        let (_, Element::Animation(animation)) = pack.lookup(0).unwrap() else {
            panic!("expected animation");
        };
        assert!(matches!(
            pack.frames(&animation),
            Err(PackError::AbsentRecord {
                kind: "animation frame"
            })
        ));

        // uv array of the only poly
        let mut corrupted = blob.clone();
        let at = polygon as usize + 4;
        corrupted[at..at + 4].copy_from_slice(&0u32.to_le_bytes());

        let pack = Pack::open(&corrupted).unwrap();
        let (_, Element::Polygon(set)) = pack.lookup(1).unwrap() else {
            panic!("expected polygon");
        };
        assert!(matches!(
            pack.poly_vertices(&set.polys[0]),
            Err(PackError::AbsentRecord { kind: "poly vertex" })
        ));
        assert!(pack.validate().is_err());
    }

    #[test]
    fn polygon_vertices() {
        let vertices: Vec<PolyVertex> = (0..5)
            .map(|i| PolyVertex {
                uv: [i, i + 10],
                screen: [i as i32 * -4, i as i32 * 4],
            })
            .collect();

        let mut builder = PackBuilder::new();
        let offset = builder
            .add_polygon(&[
                PolyDesc {
                    texid: 0,
                    vertices: vertices.clone(),
                },
                PolyDesc {
                    texid: 1,
                    vertices: vertices[..3].to_vec(),
                },
            ])
            .unwrap();
        builder.push(TypeTag::Polygon, offset);
        let blob = builder.finish();

        let pack = Pack::open(&blob).unwrap();
        pack.validate().unwrap();

        let (_, Element::Polygon(polygon)) = pack.lookup(0).unwrap() else {
            panic!("expected polygon");
        };

        assert_eq!(polygon.polys.len(), 2);
        assert_eq!(polygon.polys[0].n, 5);
        assert_eq!(polygon.polys[1].texid, 1);
        assert_eq!(pack.poly_vertices(&polygon.polys[0]).unwrap(), vertices);
        assert_eq!(pack.poly_vertices(&polygon.polys[1]).unwrap(), vertices[..3]);
    }

    #[test]
    fn animation_round_trip() {
        let mut builder = PackBuilder::new();
        let offset = builder.add_animation(&walk_animation()).unwrap();
        builder.push(TypeTag::Animation, offset);
        let blob = builder.finish();

        let pack = Pack::open(&blob).unwrap();
        pack.validate().unwrap();

        let (_, Element::Animation(animation)) = pack.lookup(0).unwrap() else {
            panic!("expected animation");
        };

        assert_eq!(animation.header.frame_number, 3);
        assert_eq!(animation.components.len(), 2);
        assert_eq!(pack.string(animation.components[0].name).unwrap(), Some("body"));
        assert_eq!(pack.string(animation.components[1].name).unwrap(), None);

        let actions = pack.actions(&animation).unwrap();
        assert_eq!(pack.string(actions[1].name).unwrap(), Some("idle"));
        assert_eq!(actions[1].start_frame, 2);

        let frames = pack.frames(&animation).unwrap();
        assert_eq!(frames.iter().map(|f| f.n).collect::<Vec<_>>(), [2, 1, 0]);

        let parts = pack.parts(&frames[1]).unwrap();
        assert_eq!(parts[0].component_id, 7);
        assert_eq!(parts[0].touchable, 1);
        assert_eq!(pack.matrix(parts[0].t.mat).unwrap(), Some(Matrix::IDENTITY));
        assert!(pack.parts(&frames[2]).unwrap().is_empty());
    }

    #[test]
    fn start_frame_outside_animation() {
        let mut desc = walk_animation();
        desc.actions[1].start_frame = 3;

        let mut builder = PackBuilder::new();
        assert!(matches!(
            builder.add_animation(&desc),
            Err(PackError::StartFrameOutOfRange {
                action: 1,
                start_frame: 3,
                frame_number: 3
            })
        ));

        // same thing, but corrupted after writing
        let mut builder = PackBuilder::new();
        let offset = builder.add_animation(&walk_animation()).unwrap();
        builder.push(TypeTag::Animation, offset);
        let mut blob = builder.finish();

        let pack = Pack::open(&blob).unwrap();
        let (_, Element::Animation(animation)) = pack.lookup(0).unwrap() else {
            panic!("expected animation");
        };
        // start_frame of the second action
        let at = animation.header.action as usize + Action::SIZE + 6;
        blob[at..at + 2].copy_from_slice(&(-1i16).to_le_bytes());

        let pack = Pack::open(&blob).unwrap();
        assert!(matches!(
            pack.validate(),
            Err(PackError::StartFrameOutOfRange { start_frame: -1, .. })
        ));
    }

    #[test]
    fn part_must_name_one_component() {
        let mut desc = walk_animation();
        desc.frames[0].push(PartDesc::new(3));

        let mut builder = PackBuilder::new();
        assert!(matches!(
            builder.add_animation(&desc),
            Err(PackError::UnknownComponent {
                component_id: 3,
                matches: 0
            })
        ));

        let part = Part {
            t: Trans {
                mat: 0,
                color: 0,
                additive: 0,
            },
            component_id: 7,
            touchable: 0,
        };
        let twice = [Component { name: 0, id: 7 }, Component { name: 0, id: 7 }];
        assert!(matches!(
            check_component_ref(&part, &twice),
            Err(PackError::UnknownComponent {
                component_id: 7,
                matches: 2
            })
        ));
    }

    #[test]
    fn duplicate_component_ids() {
        let desc = AnimationDesc {
            components: vec![
                ComponentDesc { name: None, id: 5 },
                ComponentDesc { name: None, id: 5 },
            ],
            ..Default::default()
        };

        let mut builder = PackBuilder::new();
        assert!(matches!(
            builder.add_animation(&desc),
            Err(PackError::DuplicateComponent { id: 5 })
        ));

        // unreferenced ids are checked on load too
        let desc = AnimationDesc {
            components: vec![
                ComponentDesc { name: None, id: 5 },
                ComponentDesc { name: None, id: 6 },
            ],
            frames: vec![vec![]],
            ..Default::default()
        };

        let mut builder = PackBuilder::new();
        let offset = builder.add_animation(&desc).unwrap();
        builder.push(TypeTag::Animation, offset);
        let mut blob = builder.finish();

        Pack::open(&blob).unwrap().validate().unwrap();

        // id of the second component
        let at = offset as usize + AnimationHeader::SIZE + Component::SIZE + 4;
        blob[at..at + 4].copy_from_slice(&5i32.to_le_bytes());

        let pack = Pack::open(&blob).unwrap();
        assert!(matches!(
            pack.validate(),
            Err(PackError::DuplicateComponent { id: 5 })
        ));
    }

    #[test]
    fn unknown_type_tag() {
        let mut blob = picture_label_pack();
        let type_ = Pack::open(&blob).unwrap().sprite_pack().type_ as usize;

        // anchor sprites have no record
        blob[type_ + 1] = 6;

        let pack = Pack::open(&blob).unwrap();
        assert!(pack.lookup(0).is_ok());
        assert!(matches!(
            pack.lookup(1),
            Err(PackError::UnknownTypeTag { tag: 6 })
        ));
        assert!(pack.validate().is_err());
    }

    #[test]
    fn truncated_blob_is_out_of_bounds() {
        let blob = picture_label_pack();
        let pack = Pack::open(&blob).unwrap();
        let label_offset = pack.data_offset(1).unwrap();

        let truncated = &blob[..label_offset as usize + Label::SIZE - 1];
        assert!(matches!(
            resolve::<Label>(truncated, label_offset),
            Err(PackError::OutOfBounds { size: 36, .. })
        ));

        assert!(matches!(
            resolve::<Matrix>(&blob, u32::MAX),
            Err(PackError::OutOfBounds { .. })
        ));

        assert!(matches!(
            Pack::open(&blob[..8]),
            Err(PackError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn unterminated_string() {
        let mut builder = PackBuilder::new();
        let offset = builder.add_string("run");
        let blob = builder.finish();

        assert_eq!(resolve_string(&blob, offset).unwrap(), "run");

        let cut = &blob[..offset as usize + 3];
        assert!(matches!(
            resolve_string(cut, offset),
            Err(PackError::MalformedString { .. })
        ));
        assert!(matches!(
            resolve_string(cut, offset + 100),
            Err(PackError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn header_is_checked() {
        let mut blob = picture_label_pack();
        blob[0] = b'X';
        assert!(matches!(
            Pack::open(&blob),
            Err(PackError::BadMagic { .. })
        ));

        let mut blob = picture_label_pack();
        blob[4..8].copy_from_slice(&2u32.to_le_bytes());
        assert!(matches!(
            Pack::open(&blob),
            Err(PackError::UnsupportedVersion { version: 2 })
        ));
    }

    #[test]
    fn particle_config_round_trip() {
        let radius = ParticleConfig {
            mode: EmitterMode::Radius(RadiusMode {
                start_radius: 1.,
                start_radius_var: 2.,
                end_radius: 3.,
                end_radius_var: 4.,
                rotate_per_second: 90.,
                rotate_per_second_var: 5.,
            }),
            ..gravity_config()
        };

        let mut builder = PackBuilder::new();
        let gravity_offset = builder.add_particle_config(&gravity_config());
        let radius_offset = builder.add_particle_config(&radius);
        let mut blob = builder.finish();

        let pack = Pack::open(&blob).unwrap();
        assert_eq!(pack.particle_config(gravity_offset).unwrap(), gravity_config());
        assert_eq!(pack.particle_config(radius_offset).unwrap(), radius);

        let at = radius_offset as usize;
        blob[at..at + 4].copy_from_slice(&5i32.to_le_bytes());

        let pack = Pack::open(&blob).unwrap();
        assert!(matches!(
            pack.particle_config(radius_offset),
            Err(PackError::UnknownEmitterMode { mode: 5 })
        ));
    }

    #[test]
    fn shared_between_threads() {
        let blob = picture_label_pack();
        let pack = Pack::open(&blob).unwrap();
        let expected = pack.lookup(0).unwrap();

        std::thread::scope(|scope| {
            let readers: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| pack.lookup(0).unwrap()))
                .collect();

            readers
                .into_iter()
                .for_each(|reader| assert_eq!(reader.join().unwrap(), expected));
        });
    }
}
