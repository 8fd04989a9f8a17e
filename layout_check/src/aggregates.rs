//! `#[repr(C)]` aggregates whose padding and union overlay depend on the
//! toolchain. They are only ever measured with `size_of`/`offset_of!`, never
//! built, so their fields are not read.
#![allow(dead_code)]

use std::ffi::{c_char, c_int, c_long, c_short, c_void};

#[derive(Clone, Copy)]
#[repr(C)]
pub union PtrOrChar {
    pub a: *const c_void,
    pub b: c_char,
}

#[derive(Clone, Copy)]
#[repr(C)]
pub union CharOrInts {
    pub e: c_char,
    pub f: [c_int; 13],
}

#[derive(Clone, Copy)]
#[repr(C)]
pub union IntsOrLong {
    pub i: [c_int; 3],
    pub j: c_long,
}

#[derive(Clone, Copy)]
#[repr(C)]
pub union IntOrChar {
    pub a: c_int,
    pub b: c_char,
}

#[derive(Clone, Copy)]
#[repr(C)]
pub struct PtrThenChar {
    pub d: *const c_void,
    pub e: c_char,
}

/// Union whose branches are a union and a struct of different sizes.
#[derive(Clone, Copy)]
#[repr(C)]
pub union UnionOrStruct {
    pub c: IntOrChar,
    pub f: PtrThenChar,
}

#[derive(Clone, Copy)]
#[repr(C)]
pub union InnerPtrOrChar {
    pub b: *const c_void,
    pub c: c_char,
}

#[derive(Clone, Copy)]
#[repr(C)]
pub union CharOrInnerUnion {
    pub a: c_char,
    pub d: InnerPtrOrChar,
}

/// Three levels of union nesting.
#[derive(Clone, Copy)]
#[repr(C)]
pub union NestedUnion {
    pub e: CharOrInnerUnion,
    pub f: c_int,
}

#[derive(Clone, Copy)]
#[repr(C)]
pub union CharOrPair {
    pub a: c_char,
    pub b: [c_char; 2],
}

#[repr(C)]
pub struct UnionAlign {
    pub head: c_char,
    pub c: PtrOrChar,
    pub d: *const c_char,
    pub g: CharOrInts,
    pub h: c_short,
    pub k: IntsOrLong,
    pub l: UnionOrStruct,
    pub m: NestedUnion,
    pub n: CharOrPair,
    pub o: *const c_void,
}

#[repr(C)]
pub struct PtrCharPair {
    pub a: *const c_void,
    pub b: c_char,
}

#[repr(C)]
pub struct ShortCharPair {
    pub a: c_short,
    pub b: c_char,
}

/// Nested structures only, no unions.
#[repr(C)]
pub struct StructAlign {
    pub c: PtrCharPair,
    pub d: c_long,
    pub e: PtrCharPair,
    pub f: c_char,
    pub g: ShortCharPair,
    pub h: c_char,
    pub i: PtrCharPair,
}

#[derive(Clone, Copy)]
#[repr(C)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy)]
#[repr(C)]
pub struct Color4f {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

#[repr(C)]
pub struct Matrix {
    pub m: [c_int; 6],
}

#[derive(Clone, Copy)]
#[repr(C)]
pub struct GravityArea {
    pub gravity: Point,
    pub speed: f32,
    pub speed_var: f32,
    pub tangential_accel: f32,
    pub tangential_accel_var: f32,
    pub radial_accel: f32,
    pub radial_accel_var: f32,
    pub rotation_is_dir: bool,
}

#[derive(Clone, Copy)]
#[repr(C)]
pub struct RadiusArea {
    pub start_radius: f32,
    pub start_radius_var: f32,
    pub end_radius: f32,
    pub end_radius_var: f32,
    pub rotate_per_second: f32,
    pub rotate_per_second_var: f32,
}

#[derive(Clone, Copy)]
#[repr(C)]
pub union ModeArea {
    pub a: GravityArea,
    pub b: RadiusArea,
}

/// In-memory emitter configuration as the particle runtime holds it, with a
/// native pointer where the pack format stores an offset.
#[repr(C)]
pub struct NativeParticleConfig {
    pub emitter_mode: c_int,
    pub mode: ModeArea,
    pub src_blend: c_int,
    pub dst_blend: c_int,
    pub duration: f32,
    pub emitter_matrix: *const Matrix,
    pub source_position: Point,
    pub pos_var: Point,
    pub life: f32,
    pub life_var: f32,
    pub angle: f32,
    pub angle_var: f32,
    pub start_size: f32,
    pub start_size_var: f32,
    pub end_size: f32,
    pub end_size_var: f32,
    pub start_color: Color4f,
    pub start_color_var: Color4f,
    pub end_color: Color4f,
    pub end_color_var: Color4f,
    pub start_spin: f32,
    pub start_spin_var: f32,
    pub end_spin: f32,
    pub end_spin_var: f32,
    pub emission_rate: f32,
    pub total_particles: c_int,
    pub position_type: c_int,
}
