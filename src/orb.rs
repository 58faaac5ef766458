//! ASCII sphere lit by a light source circling it.
//!
//! Frames are generated once up front; the animation only cycles an index.

use std::f64::consts::TAU;

pub const ORB_WIDTH: usize = 44;
pub const ORB_HEIGHT: usize = 22;
pub const ORB_FRAMES: usize = 36;

/// Darkest to brightest. Index 0 is reserved for cells outside the sphere.
const SHADES: &[u8] = b" .,-~:;=!*#$@";
const LIGHT_ELEVATION: f64 = -0.45;

pub struct OrbAnimation {
    frames: Vec<Vec<String>>,
    current: usize,
}

impl Default for OrbAnimation {
    fn default() -> Self {
        Self::new(ORB_FRAMES, ORB_WIDTH, ORB_HEIGHT)
    }
}

impl OrbAnimation {
    pub fn new(frame_count: usize, width: usize, height: usize) -> Self {
        let frame_count = frame_count.max(1);
        let frames = (0..frame_count)
            .map(|index| render_frame(index as f64 / frame_count as f64 * TAU, width, height))
            .collect();
        Self { frames, current: 0 }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn current(&self) -> &[String] {
        &self.frames[self.current]
    }

    pub fn advance(&mut self) {
        self.current = (self.current + 1) % self.frames.len();
    }
}

/// One frame with the light at `angle` radians around the vertical axis.
pub fn render_frame(angle: f64, width: usize, height: usize) -> Vec<String> {
    let (lx, ly, lz) = normalize(angle.sin(), LIGHT_ELEVATION, angle.cos());
    let brightest = (SHADES.len() - 2) as f64;

    (0..height)
        .map(|row| {
            let y = (row as f64 + 0.5) / height as f64 * 2.0 - 1.0;
            (0..width)
                .map(|col| {
                    let x = (col as f64 + 0.5) / width as f64 * 2.0 - 1.0;
                    let r2 = x * x + y * y;
                    if r2 > 1.0 {
                        return ' ';
                    }
                    let z = (1.0 - r2).sqrt();
                    let lambert = (x * lx + y * ly + z * lz).max(0.0);
                    SHADES[1 + (lambert * brightest).round() as usize] as char
                })
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

fn normalize(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let len = (x * x + y * y + z * z).sqrt();
    (x / len, y / len, z / len)
}
