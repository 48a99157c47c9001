//! Procedural background layers
//!
//! Both layers are static per viewport size: the host generates them once and
//! again on every resize, never per frame. They carry no gameplay state.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

/// Paper background color
pub const PAPER_RGB: [u8; 3] = [0xF7, 0xF4, 0xEA];
/// Fraction of the pixel area that receives a noise dot
pub const NOISE_DENSITY: f32 = 0.05;
/// Opacity of a single black noise dot
pub const NOISE_ALPHA: f32 = 0.035;
/// Noise dots are square, this many pixels wide
pub const NOISE_DOT_SIZE: u32 = 2;

/// Stains only live in this outer fraction of each axis
pub const STAIN_MARGIN: f32 = 0.15;
pub const STAIN_MIN_COUNT: usize = 10;
pub const STAIN_MAX_COUNT: usize = 14;
pub const STAIN_MIN_RADIUS: f32 = 40.0;
pub const STAIN_MAX_RADIUS: f32 = 100.0;
pub const STAIN_MIN_LINE_WIDTH: f32 = 3.0;
pub const STAIN_MAX_LINE_WIDTH: f32 = 8.0;
/// Angular step between ring vertices
pub const STAIN_RING_STEP: f32 = 0.3;
/// Per-vertex radial jitter (each way)
pub const STAIN_JITTER: f32 = 6.0;

/// Stippled paper texture as a row-major RGBA buffer
#[derive(Debug, Clone)]
pub struct NoiseLayer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl NoiseLayer {
    pub fn generate<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..width as usize * height as usize {
            pixels.extend_from_slice(&[PAPER_RGB[0], PAPER_RGB[1], PAPER_RGB[2], 255]);
        }
        let mut layer = Self {
            width,
            height,
            pixels,
        };

        if width == 0 || height == 0 {
            return layer;
        }
        let dots = (width as f32 * height as f32 * NOISE_DENSITY) as usize;
        for _ in 0..dots {
            let x = rng.random_range(0..width);
            let y = rng.random_range(0..height);
            layer.darken_dot(x, y);
        }
        layer
    }

    /// Blend one black dot with its top-left corner at (x, y), clipped
    fn darken_dot(&mut self, x: u32, y: u32) {
        for py in y..(y + NOISE_DOT_SIZE).min(self.height) {
            for px in x..(x + NOISE_DOT_SIZE).min(self.width) {
                let i = (py as usize * self.width as usize + px as usize) * 4;
                for channel in &mut self.pixels[i..i + 3] {
                    *channel = (*channel as f32 * (1.0 - NOISE_ALPHA)).round() as u8;
                }
            }
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels.get(i..i + 4).and_then(|p| p.try_into().ok())
    }
}

/// One irregular closed stain ring
#[derive(Debug, Clone)]
pub struct Blotch {
    pub center: Vec2,
    pub line_width: f32,
    /// Closed polygon, first vertex at angle zero
    pub points: Vec<Vec2>,
}

impl Blotch {
    fn random<R: Rng + ?Sized>(center: Vec2, rng: &mut R) -> Self {
        let radius = rng.random_range(STAIN_MIN_RADIUS..STAIN_MAX_RADIUS);
        let line_width = rng.random_range(STAIN_MIN_LINE_WIDTH..STAIN_MAX_LINE_WIDTH);
        let mut points = Vec::new();
        let mut i = 0;
        loop {
            let t = i as f32 * STAIN_RING_STEP;
            if t > TAU {
                break;
            }
            let r = radius + rng.random_range(-STAIN_JITTER..STAIN_JITTER);
            points.push(center + Vec2::new(t.cos(), t.sin()) * r);
            i += 1;
        }
        Self {
            center,
            line_width,
            points,
        }
    }
}

/// Tea stains scattered along the viewport border
#[derive(Debug, Clone, Default)]
pub struct StainLayer {
    pub blotches: Vec<Blotch>,
}

/// Whether `p` lies strictly inside the central area stains must avoid
pub fn in_stain_free_zone(p: Vec2, width: f32, height: f32) -> bool {
    let bx = width * STAIN_MARGIN;
    let by = height * STAIN_MARGIN;
    p.x > bx && p.x < width - bx && p.y > by && p.y < height - by
}

impl StainLayer {
    pub fn generate<R: Rng + ?Sized>(width: f32, height: f32, rng: &mut R) -> Self {
        let count = rng.random_range(STAIN_MIN_COUNT..=STAIN_MAX_COUNT);
        let mut blotches = Vec::with_capacity(count);
        while blotches.len() < count {
            let center = Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height);
            // Rejected candidates do not count
            if in_stain_free_zone(center, width, height) {
                continue;
            }
            blotches.push(Blotch::random(center, rng));
        }
        Self { blotches }
    }
}

/// Both background layers for one viewport size
#[derive(Debug, Clone)]
pub struct Backdrop {
    pub noise: NoiseLayer,
    pub stains: StainLayer,
}

impl Backdrop {
    pub fn generate<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Self {
        log::debug!("Generating backdrop {}x{}", width, height);
        Self {
            noise: NoiseLayer::generate(width, height, rng),
            stains: StainLayer::generate(width as f32, height as f32, rng),
        }
    }
}
