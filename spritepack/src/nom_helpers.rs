use glam::{Vec2, Vec4};
use nom::{combinator::map, number::complete::le_f32, IResult as _IResult, Parser};

pub type IResult<'a, T> = _IResult<&'a [u8], T>;

pub fn point(i: &[u8]) -> IResult<'_, Vec2> {
    map((le_f32, le_f32), |(x, y)| Vec2::new(x, y)).parse(i)
}

pub fn color4f(i: &[u8]) -> IResult<'_, Vec4> {
    map((le_f32, le_f32, le_f32, le_f32), |(r, g, b, a)| {
        Vec4::new(r, g, b, a)
    })
    .parse(i)
}
