//! Cross-line surface accumulation.
//!
//! A surface's properties arrive over several consecutive lines after its
//! `SURF` boundary. The accumulator holds the in-progress surface as an
//! explicit state and flushes a completed record at the next boundary or
//! at end of input.

use optiray_system::{Extent, Material, Surface};

/// An in-progress surface: boundary seen, properties still arriving.
///
/// Every property is an `Option` so "not yet set" stays distinguishable
/// from a legitimate zero.
#[derive(Debug, Clone, PartialEq)]
struct PendingSurface {
    index: u32,
    radius: Option<Extent>,
    thickness: Option<Extent>,
    glass_index: Option<f64>,
    glass_abbe: Option<f64>,
}

impl PendingSurface {
    fn new(index: u32) -> Self {
        Self {
            index,
            radius: None,
            thickness: None,
            glass_index: None,
            glass_abbe: None,
        }
    }

    /// Build the final record, or `None` when radius and thickness were
    /// never both set. A material attaches only when both glass values
    /// are present and non-zero.
    fn complete(self) -> Option<Surface> {
        let (radius, thickness) = match (self.radius, self.thickness) {
            (Some(r), Some(t)) => (r, t),
            _ => return None,
        };

        let material = match (self.glass_index, self.glass_abbe) {
            (Some(n), Some(v)) if n != 0.0 && v != 0.0 => Some(Material {
                refractive_index: n,
                abbe: v,
            }),
            _ => None,
        };

        Some(Surface {
            index: self.index,
            radius: Some(radius),
            thickness: Some(thickness),
            material,
            is_stop: self.index == 1,
        })
    }
}

/// Collects the properties of one surface across consecutive lines.
///
/// Property calls before the first boundary are dropped, and a boundary
/// that arrives before the prior surface has both radius and thickness
/// discards that surface silently. Both are deliberate leniencies of the
/// ZMX import, not errors.
#[derive(Debug, Default)]
pub struct SurfaceAccumulator {
    pending: Option<PendingSurface>,
}

impl SurfaceAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new surface, flushing the previous one if it is complete.
    pub fn begin(&mut self, index: u32) -> Option<Surface> {
        let flushed = self.pending.take().and_then(PendingSurface::complete);
        self.pending = Some(PendingSurface::new(index));
        flushed
    }

    /// Set the radius from a curvature value; zero means flat.
    pub fn set_curvature(&mut self, curvature: f64) {
        if let Some(pending) = &mut self.pending {
            pending.radius = Some(Extent::from_curvature(curvature));
        }
    }

    /// Set the thickness to the next surface.
    pub fn set_thickness(&mut self, thickness: Extent) {
        if let Some(pending) = &mut self.pending {
            pending.thickness = Some(thickness);
        }
    }

    /// Set both material values.
    pub fn set_glass(&mut self, refractive_index: f64, abbe: f64) {
        if let Some(pending) = &mut self.pending {
            pending.glass_index = Some(refractive_index);
            pending.glass_abbe = Some(abbe);
        }
    }

    /// Flush the final pending surface at end of input.
    pub fn finish(&mut self) -> Option<Surface> {
        self.pending.take().and_then(PendingSurface::complete)
    }
}
