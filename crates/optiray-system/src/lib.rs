//! Optical-system description shared across the optiray ecosystem.
//!
//! This crate defines the surface-by-surface model of a sequential optical
//! system: surfaces with radius, thickness, and material, plus the
//! system-level aperture, field, and wavelength settings. It is the exchange
//! type between prescription importers and the ray-tracing/analysis engine.
//!
//! The model is purely declarative — no ray data, just the prescription.
//! Tracing and analysis are handled separately by the engine.

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};

mod builder;

pub use builder::SystemBuilder;

/// Aperture value used when a prescription does not specify one.
pub const DEFAULT_PUPIL_DIAMETER: f64 = 5.0;

/// A finite length or the infinite sentinel.
///
/// Flat surfaces have infinite radius of curvature; object and image space
/// have infinite thickness. JSON cannot carry IEEE infinities, so the
/// sentinel is an explicit variant rather than `f64::INFINITY`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Extent {
    /// A finite value (conventionally millimeters).
    Finite(f64),
    /// The infinite sentinel.
    Infinite,
}

impl Extent {
    /// Convert a curvature to a radius: zero curvature means a flat
    /// surface (infinite radius), otherwise `radius = 1 / curvature`.
    pub fn from_curvature(curvature: f64) -> Self {
        if curvature == 0.0 {
            Extent::Infinite
        } else {
            Extent::Finite(1.0 / curvature)
        }
    }

    /// Check if this is the infinite sentinel.
    pub fn is_infinite(&self) -> bool {
        matches!(self, Extent::Infinite)
    }

    /// Get the finite value, or `None` for the infinite sentinel.
    pub fn as_finite(&self) -> Option<f64> {
        match self {
            Extent::Finite(v) => Some(*v),
            Extent::Infinite => None,
        }
    }
}

/// Simplified dispersive material model: refractive index plus Abbe number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Refractive index at the primary wavelength.
    pub refractive_index: f64,
    /// Abbe number characterizing chromatic dispersion.
    pub abbe: f64,
}

/// One optical surface in a sequential system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// 1-based position in the system; contiguous and strictly increasing.
    pub index: u32,
    /// Radius of curvature; `None` only on the synthetic image surface.
    pub radius: Option<Extent>,
    /// Thickness to the next surface; `None` only on the synthetic image
    /// surface.
    pub thickness: Option<Extent>,
    /// Material following the surface, if any.
    pub material: Option<Material>,
    /// Whether this surface is the aperture stop.
    pub is_stop: bool,
}

impl Surface {
    /// Create the synthetic image surface appended after the last
    /// prescribed surface. It carries no radius, thickness, or material.
    pub fn image(index: u32) -> Self {
        Self {
            index,
            radius: None,
            thickness: None,
            material: None,
            is_stop: false,
        }
    }
}

/// Aperture specification for the system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Aperture {
    /// Entrance pupil diameter.
    EntrancePupilDiameter {
        /// Diameter value.
        value: f64,
    },
}

impl Default for Aperture {
    fn default() -> Self {
        Aperture::EntrancePupilDiameter {
            value: DEFAULT_PUPIL_DIAMETER,
        }
    }
}

/// How field points are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Angular field values.
    Angle,
}

/// One wavelength at which the system is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wavelength {
    /// Wavelength value, in micrometers by convention.
    pub value: f64,
    /// Whether this is the reference wavelength for paraxial calculations.
    pub is_primary: bool,
}

/// A complete optical-system description — the result of a prescription
/// import.
///
/// Invariants after a successful import: `surfaces` is non-empty, indices
/// are contiguous starting at 1, and the last surface is the synthetic
/// image surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpticalSystem {
    /// Aperture specification.
    pub aperture: Aperture,
    /// How `fields` values are interpreted.
    pub field_type: FieldType,
    /// Field heights, in input order.
    pub fields: Vec<f64>,
    /// Wavelengths, in input order.
    pub wavelengths: Vec<Wavelength>,
    /// Surfaces in index order, ending with the image surface.
    pub surfaces: Vec<Surface>,
}

impl OpticalSystem {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The aperture stop surface, if present.
    pub fn stop_surface(&self) -> Option<&Surface> {
        self.surfaces.iter().find(|s| s.is_stop)
    }

    /// The primary wavelength, if one is marked.
    pub fn primary_wavelength(&self) -> Option<&Wavelength> {
        self.wavelengths.iter().find(|w| w.is_primary)
    }
}
