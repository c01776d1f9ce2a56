//! ZMX reader: converts prescription text to an [`OpticalSystem`].

use std::path::Path;

use optiray_system::{
    Aperture, FieldType, OpticalSystem, Surface, Wavelength, DEFAULT_PUPIL_DIAMETER,
};

use crate::error::ZmxError;
use crate::line::{classify, Directive};
use crate::surface::SurfaceAccumulator;

/// Read a ZMX prescription from a path.
///
/// # Errors
///
/// I/O failures surface as [`ZmxError::Io`], distinct from malformed
/// content, so callers can tell "file unavailable" from "file malformed".
pub fn read_zmx(path: impl AsRef<Path>) -> Result<OpticalSystem, ZmxError> {
    let text = std::fs::read_to_string(path)?;
    read_zmx_from_str(&text)
}

/// Read a ZMX prescription from already-loaded text.
///
/// One linear pass over the lines; parsing is all-or-nothing. A malformed
/// numeric token anywhere rejects the whole prescription, and input with
/// no usable surfaces fails with [`ZmxError::NoSurfaces`].
pub fn read_zmx_from_str(text: &str) -> Result<OpticalSystem, ZmxError> {
    let mut assembler = Assembler::new();
    for (i, line) in text.lines().enumerate() {
        assembler.push_line(line, i + 1)?;
    }
    assembler.finish()
}

/// Accumulates system-level settings and flushed surfaces during the pass.
struct Assembler {
    aperture: Option<f64>,
    fields: Vec<f64>,
    wavelengths: Vec<f64>,
    surfaces: Vec<Surface>,
    accumulator: SurfaceAccumulator,
}

impl Assembler {
    fn new() -> Self {
        Self {
            aperture: None,
            fields: Vec::new(),
            wavelengths: Vec::new(),
            surfaces: Vec::new(),
            accumulator: SurfaceAccumulator::new(),
        }
    }

    /// Classify one line and route it to the system-level settings or the
    /// surface accumulator. Settings lines take effect wherever they
    /// appear; a repeated setting overwrites the earlier one.
    fn push_line(&mut self, line: &str, line_no: usize) -> Result<(), ZmxError> {
        match classify(line, line_no)? {
            Directive::Aperture(value) => self.aperture = Some(value),
            Directive::Wavelengths(values) => self.wavelengths = values,
            Directive::FieldHeights(values) => self.fields = values,
            Directive::SurfaceBoundary(index) => {
                if let Some(surface) = self.accumulator.begin(index) {
                    self.surfaces.push(surface);
                }
            }
            Directive::Curvature(value) => self.accumulator.set_curvature(value),
            Directive::Thickness(value) => self.accumulator.set_thickness(value),
            Directive::Glass {
                refractive_index,
                abbe,
            } => self.accumulator.set_glass(refractive_index, abbe),
            Directive::Unrecognized => {}
        }
        Ok(())
    }

    /// Flush the last pending surface, apply defaults, and append the
    /// synthetic image surface.
    fn finish(mut self) -> Result<OpticalSystem, ZmxError> {
        if let Some(surface) = self.accumulator.finish() {
            self.surfaces.push(surface);
        }

        let last_index = match self.surfaces.last() {
            Some(surface) => surface.index,
            None => return Err(ZmxError::NoSurfaces),
        };
        self.surfaces.push(Surface::image(last_index + 1));

        let aperture = Aperture::EntrancePupilDiameter {
            value: self.aperture.unwrap_or(DEFAULT_PUPIL_DIAMETER),
        };

        let fields = if self.fields.is_empty() {
            vec![0.0]
        } else {
            self.fields
        };

        // The second wavelength in input order is the primary, per the
        // ZMX convention this importer inherits.
        let wavelengths = self
            .wavelengths
            .iter()
            .enumerate()
            .map(|(i, &value)| Wavelength {
                value,
                is_primary: i == 1,
            })
            .collect();

        Ok(OpticalSystem {
            aperture,
            field_type: FieldType::Angle,
            fields,
            wavelengths,
            surfaces: self.surfaces,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use optiray_system::{Extent, Material};

    const SINGLET: &str = "\
ENPD 4.0
WAVL 0.4861 0.5876 0.6563
YFLN 0 10 14
SURF 1
CURV 0
DISZ INFINITY
SURF 2
CURV 0.01
DISZ 5.0
GLAS N-BK7 0 0 1.5168 64.17
SURF 3
CURV 0
DISZ 20.0
";

    #[test]
    fn test_read_singlet() {
        let system = read_zmx_from_str(SINGLET).unwrap();

        assert_eq!(
            system.aperture,
            Aperture::EntrancePupilDiameter { value: 4.0 }
        );
        assert_eq!(system.field_type, FieldType::Angle);
        assert_eq!(system.fields, vec![0.0, 10.0, 14.0]);

        assert_eq!(system.wavelengths.len(), 3);
        assert_eq!(system.wavelengths[0].value, 0.4861);
        assert!(!system.wavelengths[0].is_primary);
        assert!(system.wavelengths[1].is_primary);
        assert!(!system.wavelengths[2].is_primary);

        assert_eq!(system.surfaces.len(), 4);

        let s1 = &system.surfaces[0];
        assert_eq!(s1.index, 1);
        assert_eq!(s1.radius, Some(Extent::Infinite));
        assert_eq!(s1.thickness, Some(Extent::Infinite));
        assert!(s1.is_stop);

        let s2 = &system.surfaces[1];
        assert_eq!(s2.index, 2);
        assert_relative_eq!(s2.radius.unwrap().as_finite().unwrap(), 100.0);
        assert_eq!(s2.thickness, Some(Extent::Finite(5.0)));
        assert_eq!(
            s2.material,
            Some(Material {
                refractive_index: 1.5168,
                abbe: 64.17,
            })
        );
        assert!(!s2.is_stop);

        let s3 = &system.surfaces[2];
        assert_eq!(s3.index, 3);
        assert_eq!(s3.radius, Some(Extent::Infinite));
        assert_eq!(s3.thickness, Some(Extent::Finite(20.0)));
        assert_eq!(s3.material, None);

        let image = &system.surfaces[3];
        assert_eq!(image.index, 4);
        assert!(image.radius.is_none());
        assert!(image.thickness.is_none());
        assert!(!image.is_stop);
    }

    #[test]
    fn test_surface_count_tracks_boundaries() {
        let system = read_zmx_from_str(SINGLET).unwrap();
        let boundary_count = SINGLET
            .lines()
            .filter(|l| l.starts_with("SURF"))
            .count();
        assert_eq!(system.surfaces.len(), boundary_count + 1);
    }

    #[test]
    fn test_defaults() {
        let input = "SURF 1\nCURV 0\nDISZ INFINITY\n";
        let system = read_zmx_from_str(input).unwrap();

        assert_eq!(
            system.aperture,
            Aperture::EntrancePupilDiameter { value: 5.0 }
        );
        assert_eq!(system.fields, vec![0.0]);
        assert!(system.wavelengths.is_empty());
        assert_eq!(system.surfaces.len(), 2);
        assert_eq!(system.surfaces[1].index, 2);
    }

    #[test]
    fn test_single_wavelength_has_no_primary() {
        // Inherited convention: the primary is the second entry, so a
        // one-entry list ends up with none marked.
        let input = "WAVL 0.5876\nSURF 1\nCURV 0\nDISZ INFINITY\n";
        let system = read_zmx_from_str(input).unwrap();
        assert_eq!(system.wavelengths.len(), 1);
        assert!(system.primary_wavelength().is_none());
    }

    #[test]
    fn test_unrecognized_lines_ignored() {
        let input = "\
VERS 140124 258 25600
MODE SEQ
NAME test lens
SURF 1
TYPE STANDARD
CURV 0
DISZ INFINITY
";
        let system = read_zmx_from_str(input).unwrap();
        assert_eq!(system.surfaces.len(), 2);
    }

    #[test]
    fn test_orphan_properties_before_first_boundary() {
        let input = "CURV 0.5\nDISZ 3.0\nSURF 1\nCURV 0\nDISZ INFINITY\n";
        let system = read_zmx_from_str(input).unwrap();

        // The orphan lines are dropped, not applied to surface 1
        assert_eq!(system.surfaces.len(), 2);
        assert_eq!(system.surfaces[0].radius, Some(Extent::Infinite));
        assert_eq!(system.surfaces[0].thickness, Some(Extent::Infinite));
    }

    #[test]
    fn test_incomplete_surface_discarded() {
        let input = "\
SURF 1
CURV 0
SURF 2
CURV 0
DISZ 10.0
";
        let system = read_zmx_from_str(input).unwrap();

        // Surface 1 never got a thickness, so only surface 2 survives
        assert_eq!(system.surfaces.len(), 2);
        assert_eq!(system.surfaces[0].index, 2);
        assert_eq!(system.surfaces[1].index, 3);
    }

    #[test]
    fn test_malformed_token_rejects_whole_file() {
        let input = "SURF 1\nCURV abc\nDISZ INFINITY\n";
        let err = read_zmx_from_str(input).unwrap_err();
        match err {
            ZmxError::Line { line, .. } => assert_eq!(line, 2),
            other => panic!("expected Line error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            read_zmx_from_str("").unwrap_err(),
            ZmxError::NoSurfaces
        ));
    }

    #[test]
    fn test_no_boundaries() {
        let input = "ENPD 4.0\nWAVL 0.55\nYFLN 0\n";
        assert!(matches!(
            read_zmx_from_str(input).unwrap_err(),
            ZmxError::NoSurfaces
        ));
    }

    #[test]
    fn test_all_boundaries_incomplete() {
        let input = "SURF 1\nCURV 0\nSURF 2\nDISZ 1.0\n";
        assert!(matches!(
            read_zmx_from_str(input).unwrap_err(),
            ZmxError::NoSurfaces
        ));
    }

    #[test]
    fn test_negative_curvature() {
        let input = "SURF 1\nCURV -0.02\nDISZ 3.0\n";
        let system = read_zmx_from_str(input).unwrap();
        assert_relative_eq!(
            system.surfaces[0].radius.unwrap().as_finite().unwrap(),
            -50.0
        );
    }

    #[test]
    fn test_repeated_setting_overwrites() {
        let input = "ENPD 4.0\nENPD 8.0\nSURF 1\nCURV 0\nDISZ INFINITY\n";
        let system = read_zmx_from_str(input).unwrap();
        assert_eq!(
            system.aperture,
            Aperture::EntrancePupilDiameter { value: 8.0 }
        );
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let err = read_zmx("/nonexistent/lens.zmx").unwrap_err();
        assert!(matches!(err, ZmxError::Io(_)));
    }
}
