//! ZMX writer: emits prescription text from an [`OpticalSystem`].

use std::path::Path;

use optiray_system::{Aperture, Extent, OpticalSystem};

use crate::error::ZmxError;

/// Write a system description to a ZMX file at the given path.
pub fn write_zmx(system: &OpticalSystem, path: impl AsRef<Path>) -> Result<(), ZmxError> {
    std::fs::write(path, write_zmx_to_string(system))?;
    Ok(())
}

/// Render a system description as ZMX text.
///
/// Emits the system settings followed by one block per prescribed
/// surface. The synthetic image surface carries no geometry and is not
/// written; the reader regenerates it.
pub fn write_zmx_to_string(system: &OpticalSystem) -> String {
    let mut out = String::new();

    let Aperture::EntrancePupilDiameter { value } = system.aperture;
    out.push_str(&format!("ENPD {value}\n"));

    if !system.wavelengths.is_empty() {
        out.push_str("WAVL");
        for wavelength in &system.wavelengths {
            out.push_str(&format!(" {}", wavelength.value));
        }
        out.push('\n');
    }

    if !system.fields.is_empty() {
        out.push_str("YFLN");
        for height in &system.fields {
            out.push_str(&format!(" {height}"));
        }
        out.push('\n');
    }

    for surface in &system.surfaces {
        let (Some(radius), Some(thickness)) = (surface.radius, surface.thickness) else {
            continue;
        };

        out.push_str(&format!("SURF {}\n", surface.index));

        let curvature = match radius {
            Extent::Infinite => 0.0,
            Extent::Finite(r) => 1.0 / r,
        };
        out.push_str(&format!("CURV {curvature}\n"));

        match thickness {
            Extent::Infinite => out.push_str("DISZ INFINITY\n"),
            Extent::Finite(t) => out.push_str(&format!("DISZ {t}\n")),
        }

        if let Some(material) = &surface.material {
            // The glass name is not part of the model; a placeholder
            // keeps the six-token GLAS line shape.
            out.push_str(&format!(
                "GLAS UNNAMED 0 0 {} {}\n",
                material.refractive_index, material.abbe
            ));
        }
    }

    out
}
