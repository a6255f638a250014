use crate::error::{SpriteError, SpriteResult};
use image::imageops::{self, FilterType};
use image::RgbaImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Cell layout of a spritesheet. Each cell is the frame plus one border
/// on its trailing edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGrid {
    pub frame_width: u32,
    pub frame_height: u32,
    pub border: u32,
    pub sheet_width: u32,
    pub sheet_height: u32,
}

impl FrameGrid {
    pub fn new(
        frame_width: u32,
        frame_height: u32,
        border: u32,
        sheet_width: u32,
        sheet_height: u32,
    ) -> Self {
        Self {
            frame_width,
            frame_height,
            border,
            sheet_width,
            sheet_height,
        }
    }

    /// Fails when the pitch or the frame size does not fit in a `u32`.
    pub fn check_geometry(&self) -> SpriteResult<()> {
        let fits = |size: u32| {
            size.checked_add(self.border)
                .and_then(|pitch| pitch.checked_add(self.border))
                .is_some()
        };

        if fits(self.frame_width) && fits(self.frame_height) {
            Ok(())
        } else {
            Err(SpriteError::InvalidManifest(format!(
                "frame {}x{} with border {} is too large",
                self.frame_width, self.frame_height, self.border
            )))
        }
    }

    pub fn pitch(&self) -> (u32, u32) {
        (
            self.frame_width + self.border,
            self.frame_height + self.border,
        )
    }

    pub fn columns(&self) -> u32 {
        self.sheet_width / self.pitch().0
    }

    pub fn rows(&self) -> u32 {
        self.sheet_height / self.pitch().1
    }

    pub fn capacity(&self) -> u32 {
        self.columns().saturating_mul(self.rows())
    }

    /// Unscaled size of every extracted frame.
    pub fn frame_size(&self) -> (u32, u32) {
        let (pw, ph) = self.pitch();
        (pw + self.border, ph + self.border)
    }

    pub fn frame_rect(&self, index: u32) -> SpriteResult<FrameRect> {
        let columns = self.columns();
        let rows = self.rows();

        if columns == 0 || index / columns >= rows {
            return Err(SpriteError::FrameOutOfBounds {
                index,
                columns,
                rows,
            });
        }

        let (pw, ph) = self.pitch();
        let x = (index % columns) * pw;
        let y = (index / columns) * ph;
        let (fw, fh) = self.frame_size();

        Ok(FrameRect {
            x,
            y,
            width: fw.min(self.sheet_width - x),
            height: fh.min(self.sheet_height - y),
        })
    }
}

/// Crops one frame and scales it by an integer factor with nearest filtering.
/// A rect clipped by the sheet edge is padded back to the full frame size.
pub fn extract_frame(
    sheet: &RgbaImage,
    grid: &FrameGrid,
    index: u32,
    scale: u32,
) -> SpriteResult<RgbaImage> {
    let rect = grid.frame_rect(index)?;
    let cropped = imageops::crop_imm(sheet, rect.x, rect.y, rect.width, rect.height).to_image();

    let (fw, fh) = grid.frame_size();
    let frame = if (rect.width, rect.height) == (fw, fh) {
        cropped
    } else {
        let mut padded = RgbaImage::new(fw, fh);
        imageops::replace(&mut padded, &cropped, 0, 0);
        padded
    };

    if scale <= 1 {
        return Ok(frame);
    }

    Ok(imageops::resize(
        &frame,
        fw * scale,
        fh * scale,
        FilterType::Nearest,
    ))
}
