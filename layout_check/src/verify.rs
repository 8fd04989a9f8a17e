use std::{
    ffi::{c_char, c_int, c_long, c_short, c_void},
    mem::{offset_of, size_of},
};

use crate::{
    aggregates::{
        GravityArea, NativeParticleConfig, Point, PtrCharPair, PtrThenChar, ShortCharPair,
        StructAlign, UnionAlign,
    },
    stamp::Stamper,
    LayoutImage,
};

type Ptr = *const c_void;

/// Image of [`UnionAlign`], every leaf of every union branch stamped in
/// declaration order.
///
/// Union members all start at the union's own offset, so a branch member's
/// offset is the union's offset plus its offset inside the branch.
pub fn verify_layout() -> LayoutImage {
    let mut stamper = Stamper::zeroed(size_of::<UnionAlign>());

    let c = offset_of!(UnionAlign, c);
    let g = offset_of!(UnionAlign, g);
    let k = offset_of!(UnionAlign, k);
    let l = offset_of!(UnionAlign, l);
    let m = offset_of!(UnionAlign, m);
    let n = offset_of!(UnionAlign, n);

    stamper
        .leaf_of::<c_char>(offset_of!(UnionAlign, head))
        // c: { void *a; char b; }
        .leaf_of::<Ptr>(c)
        .leaf_of::<c_char>(c)
        .leaf_of::<*const c_char>(offset_of!(UnionAlign, d))
        // g: { char e; int f[13]; }
        .leaf_of::<c_char>(g)
        .array_of::<c_int>(g, 13)
        .leaf_of::<c_short>(offset_of!(UnionAlign, h))
        // k: { int i[3]; long j; }
        .array_of::<c_int>(k, 3)
        .leaf_of::<c_long>(k)
        // l.c: { int a; char b; }
        .leaf_of::<c_int>(l)
        .leaf_of::<c_char>(l)
        // l.f: struct { void *d; char e; }
        .leaf_of::<Ptr>(l + offset_of!(PtrThenChar, d))
        .leaf_of::<c_char>(l + offset_of!(PtrThenChar, e))
        // m.e: { char a; { void *b; char c; } d; }
        .leaf_of::<c_char>(m)
        .leaf_of::<Ptr>(m)
        .leaf_of::<c_char>(m)
        .leaf_of::<c_int>(m)
        // n: { char a; char b[2]; }
        .leaf_of::<c_char>(n)
        .array_of::<c_char>(n, 2)
        .leaf_of::<Ptr>(offset_of!(UnionAlign, o));

    LayoutImage::new("union_align", stamper.finish())
}

/// Image of [`StructAlign`]. No unions, so only structure padding shows.
pub fn verify_struct_layout() -> LayoutImage {
    let mut stamper = Stamper::zeroed(size_of::<StructAlign>());

    let pair = |stamper: &mut Stamper, at: usize| {
        stamper
            .leaf_of::<Ptr>(at + offset_of!(PtrCharPair, a))
            .leaf_of::<c_char>(at + offset_of!(PtrCharPair, b));
    };

    pair(&mut stamper, offset_of!(StructAlign, c));
    stamper.leaf_of::<c_long>(offset_of!(StructAlign, d));
    pair(&mut stamper, offset_of!(StructAlign, e));

    let g = offset_of!(StructAlign, g);
    stamper
        .leaf_of::<c_char>(offset_of!(StructAlign, f))
        .leaf_of::<c_short>(g + offset_of!(ShortCharPair, a))
        .leaf_of::<c_char>(g + offset_of!(ShortCharPair, b))
        .leaf_of::<c_char>(offset_of!(StructAlign, h));

    pair(&mut stamper, offset_of!(StructAlign, i));

    LayoutImage::new("struct_align", stamper.finish())
}

/// Image of [`NativeParticleConfig`] in gravity mode, stamped with real
/// values instead of ordinals. Fields not listed stay zero, including the
/// emitter matrix pointer.
pub fn verify_particle_config_layout() -> LayoutImage {
    let mut stamper = Stamper::zeroed(size_of::<NativeParticleConfig>());

    let f32_at = |stamper: &mut Stamper, at: usize, value: f32| {
        stamper.value(at, &value.to_ne_bytes());
    };

    let mode = offset_of!(NativeParticleConfig, mode);
    let gravity = mode + offset_of!(GravityArea, gravity);

    stamper.value(
        offset_of!(NativeParticleConfig, emitter_mode),
        &(0 as c_int).to_ne_bytes(),
    );

    f32_at(&mut stamper, gravity + offset_of!(Point, x), 1.);
    f32_at(&mut stamper, gravity + offset_of!(Point, y), 2.);
    [
        (offset_of!(GravityArea, speed), 3.),
        (offset_of!(GravityArea, speed_var), 4.),
        (offset_of!(GravityArea, tangential_accel), 5.),
        (offset_of!(GravityArea, tangential_accel_var), 6.),
        (offset_of!(GravityArea, radial_accel), 7.),
        (offset_of!(GravityArea, radial_accel_var), 8.),
    ]
    .into_iter()
    .for_each(|(at, value)| f32_at(&mut stamper, mode + at, value));
    stamper.value(mode + offset_of!(GravityArea, rotation_is_dir), &[1]);

    stamper
        .value(
            offset_of!(NativeParticleConfig, src_blend),
            &(1 as c_int).to_ne_bytes(),
        )
        .value(
            offset_of!(NativeParticleConfig, dst_blend),
            &(0x301 as c_int).to_ne_bytes(),
        );

    let source_position = offset_of!(NativeParticleConfig, source_position);
    let pos_var = offset_of!(NativeParticleConfig, pos_var);

    [
        (offset_of!(NativeParticleConfig, duration), 9.),
        (source_position + offset_of!(Point, x), 10.),
        (source_position + offset_of!(Point, y), 11.),
        (pos_var + offset_of!(Point, x), 12.),
        (pos_var + offset_of!(Point, y), 13.),
        (offset_of!(NativeParticleConfig, life), 14.),
        (offset_of!(NativeParticleConfig, life_var), 15.),
        (offset_of!(NativeParticleConfig, angle), 16.),
        (offset_of!(NativeParticleConfig, angle_var), 17.),
        (offset_of!(NativeParticleConfig, start_size), 18.),
        (offset_of!(NativeParticleConfig, start_size_var), 19.),
        (offset_of!(NativeParticleConfig, end_size), 20.),
        (offset_of!(NativeParticleConfig, end_size_var), 21.),
        (offset_of!(NativeParticleConfig, end_spin), 234.),
    ]
    .into_iter()
    .for_each(|(at, value)| f32_at(&mut stamper, at, value));

    stamper
        .value(
            offset_of!(NativeParticleConfig, total_particles),
            &(123 as c_int).to_ne_bytes(),
        )
        .value(
            offset_of!(NativeParticleConfig, position_type),
            &(1 as c_int).to_ne_bytes(),
        );

    LayoutImage::new("particle_config", stamper.finish())
}

/// Every image, in a fixed order.
pub fn all_images() -> Vec<LayoutImage> {
    vec![
        verify_layout(),
        verify_struct_layout(),
        verify_particle_config_layout(),
    ]
}
