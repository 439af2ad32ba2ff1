/// An RGBA color with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0., 0., 0., 0.);
    pub const BLACK: Color = Color::new(0., 0., 0., 1.);
    pub const WHITE: Color = Color::new(1., 1., 1., 1.);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Color {
        Color { r, g, b, a }
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Color {
        Color::new(r, g, b, a)
    }
}

impl From<(f32, f32, f32)> for Color {
    fn from((r, g, b): (f32, f32, f32)) -> Color {
        Color::new(r, g, b, 1.)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_tuple_is_opaque() {
        let c = Color::from((0.5, 0.25, 0.));
        assert_eq!(c, Color::new(0.5, 0.25, 0., 1.));
    }
}
