//! Command-line front-end: generate atom and bond meshes as JSON, list
//! option presets and dump the options schema.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glam::Vec3;
use molscope::geometry::{generate_cylinder, generate_sphere, Mesh};
use molscope::options::Options;

#[derive(Parser)]
#[command(name = "molscope", about = "Molecule viewer geometry tools")]
struct Cli {
    /// TOML options preset; defaults apply when omitted.
    #[arg(long, global = true)]
    options: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a geodesic sphere mesh.
    Sphere {
        /// Sphere center as `x,y,z`.
        #[arg(long, value_parser = parse_vec3, default_value = "0,0,0")]
        center: Vec3,
        /// Sphere radius.
        #[arg(long, default_value_t = 1.0)]
        radius: f32,
        /// RGB color as `r,g,b` in 0..=1.
        #[arg(long, value_parser = parse_vec3, default_value = "1,1,1")]
        color: Vec3,
        /// Subdivision depth; the options preset decides when omitted.
        #[arg(long)]
        depth: Option<u32>,
        /// Output file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate a bond cylinder mesh between two points.
    Cylinder {
        /// First endpoint as `x,y,z`.
        #[arg(long, value_parser = parse_vec3)]
        from: Vec3,
        /// Second endpoint as `x,y,z`.
        #[arg(long, value_parser = parse_vec3)]
        to: Vec3,
        /// Tube radius; the options preset decides when omitted.
        #[arg(long)]
        radius: Option<f32>,
        /// Segments around the circumference; the options preset decides
        /// when omitted.
        #[arg(long)]
        smoothness: Option<u32>,
        /// Output file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List the option presets in a directory.
    Presets {
        /// Directory holding `*.toml` presets.
        dir: PathBuf,
    },
    /// Write the JSON schema of the UI-exposed options.
    Schema {
        /// Output file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f32>().map_err(|e| format!("{p:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        &[x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => Err(format!("expected three comma-separated numbers, got {s:?}")),
    }
}

fn open_output(out: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match out {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    })
}

fn write_mesh(mesh: &Mesh, out: Option<&Path>) -> Result<()> {
    log::info!(
        "{} triangles, {} vertices",
        mesh.triangle_count(),
        mesh.vertices().len()
    );
    let mut writer = open_output(out)?;
    serde_json::to_writer_pretty(&mut writer, mesh)
        .context("serializing mesh")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let options = match &cli.options {
        Some(path) => Options::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Options::default(),
    };

    match cli.command {
        Command::Sphere {
            center,
            radius,
            color,
            depth,
            out,
        } => {
            let depth =
                depth.unwrap_or(options.geometry.sphere_subdivision_depth);
            let mesh = generate_sphere(center, radius, color, depth)?;
            write_mesh(&mesh, out.as_deref())
        }
        Command::Cylinder {
            from,
            to,
            radius,
            smoothness,
            out,
        } => {
            let geometry = &options.geometry;
            let mesh = generate_cylinder(
                from,
                to,
                Vec3::from(options.colors.bond),
                radius.unwrap_or(geometry.bond_radius),
                smoothness.unwrap_or(geometry.cylinder_smoothness),
            )?;
            write_mesh(&mesh, out.as_deref())
        }
        Command::Presets { dir } => {
            let names = Options::list_presets(&dir)
                .with_context(|| format!("listing {}", dir.display()))?;
            let mut writer = open_output(None)?;
            for name in names {
                writeln!(writer, "{name}")?;
            }
            writer.flush()?;
            Ok(())
        }
        Command::Schema { out } => {
            let mut writer = open_output(out.as_deref())?;
            serde_json::to_writer_pretty(&mut writer, &Options::json_schema())
                .context("serializing schema")?;
            writeln!(writer)?;
            writer.flush()?;
            Ok(())
        }
    }
}
