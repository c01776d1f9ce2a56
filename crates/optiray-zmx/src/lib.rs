#![warn(missing_docs)]

//! ZMX lens-prescription import/export for the optiray system model.
//!
//! Reads Zemax-style ZMX prescription text into an
//! [`optiray_system::OpticalSystem`] and writes descriptions back out.
//! The import is a single linear pass: each line is classified as a
//! directive, surface properties are accumulated between `SURF`
//! boundaries, and the assembled system gets its defaults and the
//! synthetic trailing image surface.
//!
//! # Example
//!
//! ```no_run
//! use optiray_zmx::{read_zmx, write_zmx};
//!
//! // Read a ZMX prescription
//! let system = read_zmx("lens.zmx").unwrap();
//!
//! // Write it back out
//! write_zmx(&system, "copy.zmx").unwrap();
//! ```

mod error;
mod line;
mod reader;
mod surface;
mod writer;

pub use error::ZmxError;
pub use reader::{read_zmx, read_zmx_from_str};
pub use writer::{write_zmx, write_zmx_to_string};
