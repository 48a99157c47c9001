//! Display list produced once per frame
//!
//! Commands are painted in order. Coordinates are CSS pixels. Arcs run
//! clockwise from `start` to `end` (radians, canvas convention).

use glam::Vec2;

use super::palette::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    /// Round caps and joins
    pub round: bool,
}

impl Stroke {
    pub const fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            round: false,
        }
    }

    pub const fn round(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            round: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    /// Rounded display face for titles
    Display,
    /// Body face for menus and labels
    Body,
    Sans,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub family: FontFamily,
    pub size: f32,
    pub weight: u16,
    pub italic: bool,
}

impl Font {
    pub const fn new(family: FontFamily, size: f32) -> Self {
        Self {
            family,
            size,
            weight: 400,
            italic: false,
        }
    }

    pub const fn weight(self, weight: u16) -> Self {
        Self { weight, ..self }
    }

    pub const fn italic(self) -> Self {
        Self {
            italic: true,
            ..self
        }
    }

    /// CSS font shorthand
    pub fn css(&self) -> String {
        let family = match self.family {
            FontFamily::Display => "'Modak', cursive",
            FontFamily::Body => "'Poppins', sans-serif",
            FontFamily::Sans => "sans-serif",
        };
        let style = if self.italic { "italic " } else { "" };
        format!("{}{} {}px {}", style, self.weight, self.size, family)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Cached noise layer at the origin
    Noise,
    /// Cached stain layer at the origin
    Stains,
    Circle {
        center: Vec2,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Arc {
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        stroke: Stroke,
    },
    Path {
        points: Vec<Vec2>,
        closed: bool,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Rect {
        min: Vec2,
        size: Vec2,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    /// Centered text, vertically middle-aligned
    Text {
        text: String,
        pos: Vec2,
        font: Font,
        fill: Color,
        outline: Option<Stroke>,
        alpha: f32,
    },
    /// Rotating conic-gradient ring. Falls back to a flat stroke.
    GuideRing {
        center: Vec2,
        radius: f32,
        rotation: f32,
        width: f32,
    },
    /// Sponge cursor, textured when the image is ready
    Sponge {
        center: Vec2,
        radius: f32,
        textured: bool,
    },
}

/// One frame's display list
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCmd>,
}

impl Frame {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(DrawCmd::Circle {
            center,
            radius,
            fill: Some(color),
            stroke: None,
        });
    }

    pub fn polyline(&mut self, points: Vec<Vec2>, stroke: Stroke) {
        self.push(DrawCmd::Path {
            points,
            closed: false,
            fill: None,
            stroke: Some(stroke),
        });
    }

    pub fn text(&mut self, text: impl Into<String>, pos: Vec2, font: Font, fill: Color) {
        self.push(DrawCmd::Text {
            text: text.into(),
            pos,
            font,
            fill,
            outline: None,
            alpha: 1.0,
        });
    }

    /// All text strings in paint order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn count(&self, pred: impl Fn(&DrawCmd) -> bool) -> usize {
        self.commands.iter().filter(|cmd| pred(cmd)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::palette;

    #[test]
    fn test_font_css() {
        let font = Font::new(FontFamily::Body, 52.0).weight(600);
        assert_eq!(font.css(), "600 52px 'Poppins', sans-serif");
        let tip = Font::new(FontFamily::Sans, 18.0).italic();
        assert_eq!(tip.css(), "italic 400 18px sans-serif");
    }

    #[test]
    fn test_texts_in_paint_order() {
        let mut frame = Frame::new(100.0, 100.0);
        let font = Font::new(FontFamily::Sans, 24.0);
        frame.text("a", Vec2::ZERO, font, palette::TEXT);
        frame.fill_circle(Vec2::ZERO, 1.0, palette::LINE);
        frame.text("b", Vec2::ZERO, font, palette::TEXT);
        assert_eq!(frame.texts().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(frame.count(|c| matches!(c, DrawCmd::Circle { .. })), 1);
    }
}
