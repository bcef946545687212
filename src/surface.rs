// src/surface.rs
//! The 2D drawing contract the engine renders through.

use crate::error::SurfaceError;

/// A 2D drawing context: rectangle clearing, image blitting and an affine
/// transform stack.
pub trait Surface {
    /// Drawable image handle. Cloned freely, so it should be cheap.
    type Image: Clone + 'static;

    /// Width and height of the drawable area.
    fn size(&self) -> (f64, f64);

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Draws `image` with its top-left corner at `(x, y)`.
    fn draw_image(&mut self, image: &Self::Image, x: f64, y: f64) -> Result<(), SurfaceError>;

    /// Width and height of `image`.
    fn image_size(&self, image: &Self::Image) -> (f64, f64);

    fn save(&mut self);

    fn restore(&mut self);

    fn translate(&mut self, x: f64, y: f64) -> Result<(), SurfaceError>;

    /// Rotates by `angle` radians.
    fn rotate(&mut self, angle: f64) -> Result<(), SurfaceError>;

    /// Clears the whole surface.
    fn clear(&mut self) {
        let (width, height) = self.size();
        self.clear_rect(0.0, 0.0, width, height);
    }
}
