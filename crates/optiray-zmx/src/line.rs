//! ZMX line classifier.
//!
//! Each line of a ZMX prescription is one directive: a keyword followed by
//! whitespace-separated arguments. The importer recognizes a small
//! vocabulary; everything else is ignored. Handles:
//! - System settings (`ENPD`, `WAVL`, `YFLN`)
//! - Surface boundaries (`SURF`)
//! - Surface properties (`CURV`, `DISZ`, `GLAS`)
//! - The literal `INFINITY` thickness token

use optiray_system::Extent;

use crate::error::ZmxError;

/// A classified ZMX directive.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// `ENPD` — entrance pupil diameter.
    Aperture(f64),
    /// `WAVL` — wavelength values, in micrometers by convention.
    Wavelengths(Vec<f64>),
    /// `YFLN` — field heights.
    FieldHeights(Vec<f64>),
    /// `SURF` — begin a new surface at this 1-based index.
    SurfaceBoundary(u32),
    /// `CURV` — surface curvature (inverse of radius).
    Curvature(f64),
    /// `DISZ` — thickness to the next surface.
    Thickness(Extent),
    /// `GLAS` — material refractive index and Abbe number.
    Glass {
        /// Refractive index (token 5 of the line).
        refractive_index: f64,
        /// Abbe number (token 6 of the line).
        abbe: f64,
    },
    /// Any directive outside the vocabulary, including blank lines.
    Unrecognized,
}

/// Classify one line of ZMX text.
///
/// Surrounding whitespace is stripped and the line split on whitespace
/// into a keyword and arguments. Malformed numeric tokens and missing
/// arguments fail with [`ZmxError::Line`]; unrecognized keywords do not.
pub fn classify(line: &str, line_no: usize) -> Result<Directive, ZmxError> {
    let mut tokens = line.split_whitespace();
    let keyword = match tokens.next() {
        Some(k) => k,
        None => return Ok(Directive::Unrecognized),
    };
    let args: Vec<&str> = tokens.collect();

    match keyword {
        "ENPD" => {
            let value = parse_real(arg(&args, 0, "ENPD", line_no)?, line_no)?;
            Ok(Directive::Aperture(value))
        }
        "WAVL" => Ok(Directive::Wavelengths(parse_reals(&args, line_no)?)),
        "YFLN" => Ok(Directive::FieldHeights(parse_reals(&args, line_no)?)),
        "SURF" => {
            let index = parse_index(arg(&args, 0, "SURF", line_no)?, line_no)?;
            Ok(Directive::SurfaceBoundary(index))
        }
        "CURV" => {
            let value = parse_real(arg(&args, 0, "CURV", line_no)?, line_no)?;
            Ok(Directive::Curvature(value))
        }
        "DISZ" => {
            let token = arg(&args, 0, "DISZ", line_no)?;
            let thickness = if token == "INFINITY" {
                Extent::Infinite
            } else {
                Extent::Finite(parse_real(token, line_no)?)
            };
            Ok(Directive::Thickness(thickness))
        }
        "GLAS" => {
            // Line shape: GLAS <name> <flags...> with the refractive index
            // and Abbe number at tokens 5 and 6 (1-based, keyword included).
            let refractive_index = parse_real(arg(&args, 3, "GLAS", line_no)?, line_no)?;
            let abbe = parse_real(arg(&args, 4, "GLAS", line_no)?, line_no)?;
            Ok(Directive::Glass {
                refractive_index,
                abbe,
            })
        }
        _ => Ok(Directive::Unrecognized),
    }
}

fn arg<'a>(
    args: &[&'a str],
    idx: usize,
    keyword: &str,
    line_no: usize,
) -> Result<&'a str, ZmxError> {
    args.get(idx).copied().ok_or_else(|| {
        ZmxError::line(
            line_no,
            format!("{keyword} requires at least {} argument(s)", idx + 1),
        )
    })
}

fn parse_real(token: &str, line_no: usize) -> Result<f64, ZmxError> {
    token
        .parse()
        .map_err(|_| ZmxError::line(line_no, format!("invalid real number: {token}")))
}

fn parse_index(token: &str, line_no: usize) -> Result<u32, ZmxError> {
    token
        .parse()
        .map_err(|_| ZmxError::line(line_no, format!("invalid surface index: {token}")))
}

fn parse_reals(args: &[&str], line_no: usize) -> Result<Vec<f64>, ZmxError> {
    args.iter().map(|t| parse_real(t, line_no)).collect()
}
