//! Replay of a system description into a downstream engine.
//!
//! The engine consumes a prescription through a fixed call sequence:
//! surfaces in index order, then aperture, field type, field points, and
//! wavelengths. [`SystemBuilder`] captures that contract as a trait so the
//! engine binding stays decoupled from the model.

use crate::{Aperture, FieldType, OpticalSystem, Surface};

/// Sink for an optical-system description.
///
/// Implemented by ray-tracing/analysis engine bindings. Calls arrive in
/// the order produced by [`OpticalSystem::feed`].
pub trait SystemBuilder {
    /// Add one surface. Surfaces arrive in index order, the synthetic
    /// image surface last.
    fn add_surface(&mut self, surface: &Surface);

    /// Set the aperture specification.
    fn set_aperture(&mut self, aperture: &Aperture);

    /// Set how field points are interpreted.
    fn set_field_type(&mut self, field_type: FieldType);

    /// Add one field point.
    fn add_field(&mut self, height: f64);

    /// Add one wavelength.
    fn add_wavelength(&mut self, value: f64, is_primary: bool);
}

impl OpticalSystem {
    /// Replay this description into a builder: surfaces in index order,
    /// then aperture, field type, fields, and wavelengths.
    pub fn feed<B: SystemBuilder>(&self, builder: &mut B) {
        for surface in &self.surfaces {
            builder.add_surface(surface);
        }
        builder.set_aperture(&self.aperture);
        builder.set_field_type(self.field_type);
        for &height in &self.fields {
            builder.add_field(height);
        }
        for wavelength in &self.wavelengths {
            builder.add_wavelength(wavelength.value, wavelength.is_primary);
        }
    }
}
