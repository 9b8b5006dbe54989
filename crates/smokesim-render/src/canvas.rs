//! Rendering-adapter contract and its two software backends

use image::{GrayImage, RgbaImage};
use smokesim_core::Color;

/// The boundary interface the simulation core draws through: build a
/// paintable sprite from color + opacity mask, composite it scaled and
/// faded at a position, and report target dimensions for bounds culling.
pub trait Canvas {
    type Sprite;

    /// Build a paintable sprite: solid color, per-pixel alpha from the mask.
    fn make_sprite(&self, color: Color, mask: &GrayImage) -> Self::Sprite;

    /// Composite `sprite` with its top-left corner at `(x, y)`, scaled to
    /// `width x height`, with every mask alpha multiplied by `alpha` in
    /// [0, 1]. Pixels falling outside the target are skipped.
    fn blit(&mut self, sprite: &Self::Sprite, x: i32, y: i32, width: u32, height: u32, alpha: f32);

    fn dimensions(&self) -> (u32, u32);
}

fn sprite_from_mask(color: Color, mask: &GrayImage) -> RgbaImage {
    let (w, h) = mask.dimensions();
    let mut sprite = RgbaImage::new(w, h);
    for (x, y, pixel) in sprite.enumerate_pixels_mut() {
        let a = mask.get_pixel(x, y).0[0];
        *pixel = image::Rgba([color.r, color.g, color.b, a]);
    }
    sprite
}

/// Bilinear sample of an RGBA sprite at normalized UV in [0, 1].
fn sample_bilinear(sprite: &RgbaImage, u: f32, v: f32) -> [f32; 4] {
    let (w, h) = sprite.dimensions();
    let fx = u.clamp(0.0, 1.0) * (w - 1) as f32;
    let fy = v.clamp(0.0, 1.0) * (h - 1) as f32;
    let x0 = (fx as u32).min(w.saturating_sub(2));
    let y0 = (fy as u32).min(h.saturating_sub(2));
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);
    let tx = fx - x0 as f32;
    let ty = fy - y0 as f32;

    let p00 = sprite.get_pixel(x0, y0).0;
    let p10 = sprite.get_pixel(x1, y0).0;
    let p01 = sprite.get_pixel(x0, y1).0;
    let p11 = sprite.get_pixel(x1, y1).0;

    let mut out = [0.0; 4];
    for c in 0..4 {
        let top = p00[c] as f32 * (1.0 - tx) + p10[c] as f32 * tx;
        let bottom = p01[c] as f32 * (1.0 - tx) + p11[c] as f32 * tx;
        out[c] = top * (1.0 - ty) + bottom * ty;
    }
    out
}

/// Alpha-over blend of one source sample onto a destination pixel.
fn blend(dst: [u8; 4], src: [f32; 4], a: f32) -> [u8; 4] {
    let mut out = dst;
    for c in 0..3 {
        out[c] = (src[c] * a + dst[c] as f32 * (1.0 - a)).round() as u8;
    }
    out[3] = dst[3].max((a * 255.0).round() as u8);
    out
}

/// Canvas backed by an `image::RgbaImage`
pub struct ImageCanvas {
    image: RgbaImage,
}

impl ImageCanvas {
    /// Blank opaque black target
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, image::Rgba([0, 0, 0, 255])),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

impl Canvas for ImageCanvas {
    type Sprite = RgbaImage;

    fn make_sprite(&self, color: Color, mask: &GrayImage) -> RgbaImage {
        sprite_from_mask(color, mask)
    }

    fn blit(&mut self, sprite: &RgbaImage, x: i32, y: i32, width: u32, height: u32, alpha: f32) {
        let (cw, ch) = self.dimensions();
        let alpha = alpha.clamp(0.0, 1.0);
        for py in 0..height {
            let ty = y + py as i32;
            if ty < 0 || ty >= ch as i32 {
                continue;
            }
            for px in 0..width {
                let tx = x + px as i32;
                if tx < 0 || tx >= cw as i32 {
                    continue;
                }
                let u = (px as f32 + 0.5) / width as f32;
                let v = (py as f32 + 0.5) / height as f32;
                let src = sample_bilinear(sprite, u, v);
                let a = src[3] / 255.0 * alpha;
                if a <= 0.0 {
                    continue;
                }
                let dst = self.image.get_pixel_mut(tx as u32, ty as u32);
                dst.0 = blend(dst.0, src, a);
            }
        }
    }

    fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Canvas backed by a raw `0xAARRGGBB` pixel buffer, suitable for pushing
/// straight to a framebuffer window.
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0xFF00_0000; (width * height) as usize],
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    fn unpack(p: u32) -> [u8; 4] {
        [
            ((p >> 16) & 0xFF) as u8,
            ((p >> 8) & 0xFF) as u8,
            (p & 0xFF) as u8,
            ((p >> 24) & 0xFF) as u8,
        ]
    }

    fn pack(c: [u8; 4]) -> u32 {
        ((c[3] as u32) << 24) | ((c[0] as u32) << 16) | ((c[1] as u32) << 8) | c[2] as u32
    }
}

impl Canvas for PixelCanvas {
    type Sprite = RgbaImage;

    fn make_sprite(&self, color: Color, mask: &GrayImage) -> RgbaImage {
        sprite_from_mask(color, mask)
    }

    fn blit(&mut self, sprite: &RgbaImage, x: i32, y: i32, width: u32, height: u32, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        for py in 0..height {
            let ty = y + py as i32;
            if ty < 0 || ty >= self.height as i32 {
                continue;
            }
            for px in 0..width {
                let tx = x + px as i32;
                if tx < 0 || tx >= self.width as i32 {
                    continue;
                }
                let u = (px as f32 + 0.5) / width as f32;
                let v = (py as f32 + 0.5) / height as f32;
                let src = sample_bilinear(sprite, u, v);
                let a = src[3] / 255.0 * alpha;
                if a <= 0.0 {
                    continue;
                }
                let idx = (ty as u32 * self.width + tx as u32) as usize;
                self.pixels[idx] = Self::pack(blend(Self::unpack(self.pixels[idx]), src, a));
            }
        }
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
