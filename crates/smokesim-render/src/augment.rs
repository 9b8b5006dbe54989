//! Overlaying simulated smoke onto a background image

use std::path::Path;

use image::{imageops, RgbaImage};
use smokesim_core::{Result, SmokeError};
use smokesim_sim::{MachineConfig, SmokeMachine, SmokeProperty};

use crate::canvas::ImageCanvas;
use crate::renderer::SmokeRenderer;

/// Drives a `SmokeMachine` against a fixed background, producing a
/// composited frame plus a smoke-only mask frame per step. The caller
/// controls the wall-clock-to-simulation mapping entirely through the
/// `time_step` it passes.
pub struct Augmentation {
    pub machine: SmokeMachine,
    renderer: SmokeRenderer<ImageCanvas>,
    background: RgbaImage,
    screen_dim: (u32, u32),
    last_frame: Option<(RgbaImage, RgbaImage)>,
}

impl Augmentation {
    /// `image_path = None` starts from a black background.
    pub fn new(image_path: Option<&Path>, screen_dim: (u32, u32), random_seed: u64) -> Result<Self> {
        let (width, height) = screen_dim;
        if width == 0 || height == 0 {
            return Err(SmokeError::InvalidConfig(format!(
                "screen dimensions must be positive, got {width}x{height}"
            )));
        }
        let background = match image_path {
            Some(path) => read_image(path, screen_dim)?,
            None => RgbaImage::from_pixel(width, height, image::Rgba([0, 0, 0, 255])),
        };
        Ok(Self {
            machine: SmokeMachine::new(MachineConfig {
                random_seed,
                ..Default::default()
            }),
            renderer: SmokeRenderer::new(),
            background,
            screen_dim,
            last_frame: None,
        })
    }

    /// Swap the background, rescaling to the screen dimensions.
    pub fn set_background(&mut self, image: &RgbaImage) {
        self.background = resize_to(image, self.screen_dim);
    }

    pub fn add_smoke(&mut self, property: SmokeProperty) -> Result<u32> {
        self.machine.add_smoke(property)
    }

    /// Advance one tick and render. Returns (composited frame, smoke-only
    /// mask frame); both are also kept as `last_frame` for saving.
    pub fn step(&mut self, time_step: f32) -> Result<(RgbaImage, RgbaImage)> {
        self.machine.update(time_step)?;

        let mut canvas = ImageCanvas::from_image(self.background.clone());
        self.renderer.draw(&mut self.machine, &mut canvas);
        let composite = canvas.into_image();

        // Same state drawn over black gives the standalone smoke mask
        let mut canvas = ImageCanvas::new(self.screen_dim.0, self.screen_dim.1);
        self.renderer.draw(&mut self.machine, &mut canvas);
        let mask = canvas.into_image();

        self.last_frame = Some((composite.clone(), mask.clone()));
        Ok((composite, mask))
    }

    /// Run `steps` ticks of `time_step` each; returns the final frame pair.
    pub fn augment(&mut self, steps: u32, time_step: f32) -> Result<(RgbaImage, RgbaImage)> {
        let mut frame = None;
        for _ in 0..steps {
            frame = Some(self.step(time_step)?);
        }
        frame.ok_or_else(|| SmokeError::InvalidConfig("augment needs at least one step".into()))
    }

    /// Write the last composited frame to `path` and the mask frame next to
    /// it with a `_mask` suffix.
    pub fn save_as(&self, path: &Path) -> Result<()> {
        let (composite, mask) = self
            .last_frame
            .as_ref()
            .ok_or_else(|| SmokeError::InvalidConfig("no frame rendered yet".into()))?;
        composite
            .save(path)
            .map_err(|e| SmokeError::Image(e.to_string()))?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        let mask_path = path.with_file_name(format!("{stem}_mask.png"));
        mask.save(&mask_path)
            .map_err(|e| SmokeError::Image(e.to_string()))?;
        println!("[augment] saved {} and {}", path.display(), mask_path.display());
        Ok(())
    }
}

fn read_image(path: &Path, screen_dim: (u32, u32)) -> Result<RgbaImage> {
    let image = image::open(path)
        .map_err(|e| SmokeError::Image(format!("failed to load '{}': {e}", path.display())))?
        .to_rgba8();
    Ok(resize_to(&image, screen_dim))
}

fn resize_to(image: &RgbaImage, (width, height): (u32, u32)) -> RgbaImage {
    if image.dimensions() == (width, height) {
        image.clone()
    } else {
        imageops::resize(image, width, height, imageops::FilterType::Triangle)
    }
}
