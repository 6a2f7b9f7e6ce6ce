//! Bounded downsizing of a single image file.

use crate::error::ProcessingError;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::path::{Path, PathBuf};

/// Dimensions an image must be scaled to so neither side exceeds `max`.
///
/// Returns `None` when both sides already fit. Otherwise the larger side becomes
/// exactly `max` and the other side scales proportionally, truncated toward zero
/// and never below one pixel. A square image resolves through the height branch,
/// which yields `max` on both sides.
pub fn target_dimensions(width: u32, height: u32, max: u32) -> Option<(u32, u32)> {
    if width <= max && height <= max {
        return None;
    }

    let scale = |side: u32, larger: u32| -> u32 {
        let scaled = u64::from(side) * u64::from(max) / u64::from(larger);
        scaled.max(1) as u32
    };

    if width > height {
        Some((max, scale(height, width)))
    } else {
        Some((scale(width, height), max))
    }
}

/// What [`ImageResizer::resize_file`] did with an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// Already within bounds; nothing was written.
    Skipped { width: u32, height: u32 },
    /// A downsized copy was written to the target path.
    Resized {
        original: (u32, u32),
        resized: (u32, u32),
    },
}

impl ResizeOutcome {
    pub fn is_resized(&self) -> bool {
        matches!(self, ResizeOutcome::Resized { .. })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ImageResizer {
    max_dimension: u32,
}

impl ImageResizer {
    pub fn new(max_dimension: u32) -> Self {
        Self { max_dimension }
    }

    pub fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    /// Decode `source` (format sniffed from its contents) and, if it is larger than
    /// the bound, write a downsized copy to `target`.
    ///
    /// The output format follows `target`'s extension. JPEG output drops the alpha
    /// channel. `target` is left untouched when the image is skipped.
    pub fn resize_file(&self, source: &Path, target: &Path) -> Result<ResizeOutcome, ProcessingError> {
        let img = ImageReader::open(source)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| ProcessingError::Decode(e.to_string()))?;

        let (width, height) = img.dimensions();
        tracing::info!(width, height, "Original image size");

        let Some((new_width, new_height)) = target_dimensions(width, height, self.max_dimension)
        else {
            tracing::info!(
                max_dimension = self.max_dimension,
                "Image within size limits, no resize needed"
            );
            return Ok(ResizeOutcome::Skipped { width, height });
        };

        let format = ImageFormat::from_path(target)
            .map_err(|e| ProcessingError::UnsupportedFormat(format!("{}: {}", target.display(), e)))?;

        let resized = img.resize_exact(new_width, new_height, FilterType::CatmullRom);
        let resized = match format {
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(resized.to_rgb8()),
            _ => resized,
        };

        resized
            .save_with_format(target, format)
            .map_err(|e| ProcessingError::Encode(e.to_string()))?;

        tracing::info!(
            width = new_width,
            height = new_height,
            path = %target.display(),
            "Resized image saved"
        );

        Ok(ResizeOutcome::Resized {
            original: (width, height),
            resized: (new_width, new_height),
        })
    }

    /// [`resize_file`](Self::resize_file) on the blocking thread pool.
    pub async fn resize_file_blocking(
        &self,
        source: PathBuf,
        target: PathBuf,
    ) -> Result<ResizeOutcome, ProcessingError> {
        let resizer = *self;
        tokio::task::spawn_blocking(move || resizer.resize_file(&source, &target))
            .await
            .map_err(|e| ProcessingError::Task(e.to_string()))?
    }
}
