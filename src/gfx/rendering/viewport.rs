//! Viewport size and pixel-ratio bookkeeping shared by the camera and the
//! render surface.

use winit::dpi::PhysicalSize;

/// Default upper bound on the pixel ratio used for the render surface
pub const DEFAULT_MAX_PIXEL_RATIO: f64 = 2.0;

/// Logical viewport size plus the pixel ratio the surface renders at.
///
/// The device may report any scale factor; the surface renders at
/// `min(device_ratio, max_pixel_ratio)` so fill-rate stays bounded on
/// high-density displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical width
    pub width: f64,
    /// Logical height
    pub height: f64,
    device_pixel_ratio: f64,
    max_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64, max_pixel_ratio: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            device_pixel_ratio: if device_pixel_ratio > 0.0 {
                device_pixel_ratio
            } else {
                1.0
            },
            max_pixel_ratio: max_pixel_ratio.max(f64::MIN_POSITIVE),
        }
    }

    /// Builds a viewport from a window's physical size and scale factor.
    pub fn from_physical(size: PhysicalSize<u32>, scale_factor: f64, max_pixel_ratio: f64) -> Self {
        let logical = size.to_logical::<f64>(scale_factor);
        Self::new(logical.width, logical.height, scale_factor, max_pixel_ratio)
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Ratio the surface actually renders at.
    pub fn pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio.min(self.max_pixel_ratio)
    }

    /// Height in the physical pixels winit reports cursor positions in.
    pub fn pointer_height(&self) -> f32 {
        (self.height * self.device_pixel_ratio) as f32
    }

    /// Width over height; 1 for an empty viewport.
    pub fn aspect(&self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            (self.width / self.height) as f32
        } else {
            1.0
        }
    }

    /// Surface size in pixels, never zero.
    pub fn surface_size(&self) -> (u32, u32) {
        let ratio = self.pixel_ratio();
        let px = |v: f64| ((v * ratio).round() as u32).max(1);
        (px(self.width), px(self.height))
    }

    /// Minimised windows report a zero size; nothing should be drawn then.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0, 1.0, DEFAULT_MAX_PIXEL_RATIO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_high_density_display_is_clamped() {
        let viewport = Viewport::new(800.0, 600.0, 3.0, DEFAULT_MAX_PIXEL_RATIO);
        assert_eq!(viewport.pixel_ratio(), 2.0);
        assert_eq!(viewport.device_pixel_ratio(), 3.0);
        assert_eq!(viewport.surface_size(), (1600, 1200));
    }

    #[test]
    fn test_pointer_height_ignores_surface_clamp() {
        let viewport = Viewport::new(800.0, 600.0, 3.0, DEFAULT_MAX_PIXEL_RATIO);
        assert_eq!(viewport.pointer_height(), 1800.0);
    }

    #[test]
    fn test_pixel_ratio_never_exceeds_max() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let ratio: f64 = rng.random_range(0.5..6.0);
            let width: f64 = rng.random_range(1.0..4000.0);
            let height: f64 = rng.random_range(1.0..4000.0);
            let viewport = Viewport::new(width, height, ratio, DEFAULT_MAX_PIXEL_RATIO);
            assert!(viewport.pixel_ratio() <= 2.0);
            assert!(viewport.pixel_ratio() <= ratio);
            assert!((viewport.aspect() - (width / height) as f32).abs() < 1e-4);
        }
    }

    #[test]
    fn test_from_physical_uses_logical_size() {
        let viewport = Viewport::from_physical(PhysicalSize::new(3000, 1500), 3.0, 2.0);
        assert_eq!(viewport.width, 1000.0);
        assert_eq!(viewport.height, 500.0);
        assert_eq!(viewport.surface_size(), (2000, 1000));
        assert_eq!(viewport.aspect(), 2.0);
    }

    #[test]
    fn test_empty_viewport() {
        let viewport = Viewport::new(0.0, 0.0, 1.0, 2.0);
        assert!(viewport.is_empty());
        assert_eq!(viewport.aspect(), 1.0);
        assert_eq!(viewport.surface_size(), (1, 1));
    }
}
