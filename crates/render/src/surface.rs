use crate::camera::PerspectiveCamera;
use crate::renderer::RenderError;
use serde::{Deserialize, Serialize};

/// Size in layout units, before the device pixel ratio is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogicalSize {
    pub width: f64,
    pub height: f64,
}

impl LogicalSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Backing-buffer size for the given pixel density, rounded down.
    pub fn to_physical(self, scale_factor: f64) -> PhysicalSize {
        PhysicalSize {
            width: (self.width * scale_factor).floor().max(0.0) as u32,
            height: (self.height * scale_factor).floor().max(0.0) as u32,
        }
    }

    /// `width / height`, or `None` for a degenerate size.
    pub fn aspect(self) -> Option<f32> {
        let aspect = self.width / self.height;
        (aspect.is_finite() && aspect > 0.0).then_some(aspect as f32)
    }
}

/// Size of the backing buffer in device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

impl PhysicalSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A drawable output target supplied by the host.
pub trait Surface {
    /// Current layout size as reported by the host.
    fn logical_size(&self) -> LogicalSize;

    /// Device pixels per logical unit.
    fn scale_factor(&self) -> f64;

    /// Size of the backing buffer as last set.
    fn backing_size(&self) -> PhysicalSize;

    /// Reallocate the backing buffer.
    fn resize_backing(&mut self, size: PhysicalSize);
}

/// Reject a surface that cannot be drawn to.
pub(crate) fn validate<S: Surface + ?Sized>(surface: &S) -> Result<(), RenderError> {
    let logical = surface.logical_size();
    let scale = surface.scale_factor();
    if !(scale.is_finite() && scale > 0.0) {
        return Err(RenderError::SurfaceUnavailable(format!(
            "invalid scale factor {scale}"
        )));
    }
    if logical.aspect().is_none() || logical.width <= 0.0 {
        return Err(RenderError::SurfaceUnavailable(format!(
            "invalid logical size {}x{}",
            logical.width, logical.height
        )));
    }
    Ok(())
}

/// Bring the backing buffer and camera in line with the surface's logical
/// size. Returns the new backing size when a resize happened.
///
/// The aspect comes from the logical size, so it is independent of the
/// pixel ratio. A zero-height surface still resizes but keeps the previous
/// aspect.
pub(crate) fn reconcile<S: Surface + ?Sized>(
    surface: &mut S,
    camera: &mut PerspectiveCamera,
) -> Option<PhysicalSize> {
    let logical = surface.logical_size();
    let wanted = logical.to_physical(surface.scale_factor());
    if surface.backing_size() == wanted {
        return None;
    }

    surface.resize_backing(wanted);
    match logical.aspect() {
        Some(aspect) => {
            camera.set_aspect(aspect);
            camera.update_projection();
        }
        None => tracing::warn!(
            width = logical.width,
            height = logical.height,
            "degenerate surface size, keeping previous aspect"
        ),
    }
    Some(wanted)
}

/// Initial size of a headless surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: f64,
    pub height: f64,
    pub scale_factor: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            scale_factor: 1.0,
        }
    }
}

/// In-memory surface for tests and offscreen runs.
///
/// The backing buffer starts at 0×0, so the first frame always reconciles.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    logical: LogicalSize,
    scale_factor: f64,
    backing: PhysicalSize,
    resizes: u32,
}

impl HeadlessSurface {
    pub fn new(config: &SurfaceConfig) -> Self {
        Self {
            logical: LogicalSize::new(config.width, config.height),
            scale_factor: config.scale_factor,
            backing: PhysicalSize::default(),
            resizes: 0,
        }
    }

    /// Simulate the host layout changing.
    pub fn set_logical_size(&mut self, width: f64, height: f64) {
        self.logical = LogicalSize::new(width, height);
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    /// How many times the backing buffer was reallocated.
    pub fn resize_count(&self) -> u32 {
        self.resizes
    }
}

impl Surface for HeadlessSurface {
    fn logical_size(&self) -> LogicalSize {
        self.logical
    }

    fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    fn backing_size(&self) -> PhysicalSize {
        self.backing
    }

    fn resize_backing(&mut self, size: PhysicalSize) {
        self.backing = size;
        self.resizes += 1;
    }
}
