//! optiray CLI - lens-prescription tooling
//!
//! Imports ZMX prescriptions into system-description JSON, exports them
//! back to ZMX, and prints human-readable summaries.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use optiray_system::{Aperture, Extent, OpticalSystem};

#[derive(Parser)]
#[command(name = "optiray")]
#[command(about = "Lens-prescription import and inspection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a ZMX prescription to system-description JSON
    Import {
        /// Input ZMX file
        input: PathBuf,
        /// Output .json file (stdout when omitted)
        output: Option<PathBuf>,
    },
    /// Export a system-description JSON file back to ZMX
    Export {
        /// Input .json file
        input: PathBuf,
        /// Output file (format determined by extension: .zmx)
        output: PathBuf,
    },
    /// Display information about a ZMX prescription
    Info {
        /// Path to the ZMX file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Import { input, output } => {
            import_zmx(&input, output.as_deref())?;
        }
        Commands::Export { input, output } => {
            export_system(&input, &output)?;
        }
        Commands::Info { file } => {
            show_info(&file)?;
        }
    }

    Ok(())
}

fn import_zmx(input: &Path, output: Option<&Path>) -> Result<()> {
    let system = optiray_zmx::read_zmx(input)?;
    let json = system.to_json()?;

    match output {
        Some(path) => {
            fs::write(path, json)?;
            println!(
                "Imported {} surfaces to {}",
                system.surfaces.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn export_system(input: &Path, output: &Path) -> Result<()> {
    let json = fs::read_to_string(input)?;
    let system = OpticalSystem::from_json(&json)?;

    let ext = output.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext.to_lowercase().as_str() {
        "zmx" => {
            optiray_zmx::write_zmx(&system, output)?;
            println!("Exported ZMX to {}", output.display());
        }
        _ => {
            anyhow::bail!("Unknown output format: {}", ext);
        }
    }

    Ok(())
}

fn show_info(file: &Path) -> Result<()> {
    let system = optiray_zmx::read_zmx(file)?;

    let Aperture::EntrancePupilDiameter { value } = system.aperture;
    println!("Aperture: entrance pupil diameter {value}");

    print!("Fields (angle):");
    for height in &system.fields {
        print!(" {height}");
    }
    println!();

    print!("Wavelengths (um):");
    for wavelength in &system.wavelengths {
        if wavelength.is_primary {
            print!(" {}*", wavelength.value);
        } else {
            print!(" {}", wavelength.value);
        }
    }
    println!();

    println!("Surfaces: {} (including image)", system.surfaces.len());
    println!("  {:>5}  {:>12}  {:>12}  {:>18}  stop", "index", "radius", "thickness", "material");
    for surface in &system.surfaces {
        let material = match &surface.material {
            Some(m) => format!("n={} v={}", m.refractive_index, m.abbe),
            None => "-".to_string(),
        };
        println!(
            "  {:>5}  {:>12}  {:>12}  {:>18}  {}",
            surface.index,
            fmt_extent(surface.radius),
            fmt_extent(surface.thickness),
            material,
            if surface.is_stop { "*" } else { "" }
        );
    }

    Ok(())
}

fn fmt_extent(extent: Option<Extent>) -> String {
    match extent {
        None => "-".to_string(),
        Some(Extent::Infinite) => "inf".to_string(),
        Some(Extent::Finite(v)) => format!("{v}"),
    }
}
