//! scene-marshal - scene-graph marshalling tool
//!
//! Moves 3D scenes between their dynamic-value form (shaped arrays and
//! struct arrays, as JSON) and scene files (.json scene graphs, .obj
//! meshes), with optional postprocess steps applied on the way through.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use scene_marshal::{codec, constants, convert, formats, manifest, postprocess, value};
use scene_marshal::value::Value;

#[derive(Parser)]
#[command(name = "scene-marshal")]
#[command(about = "Scene-graph marshalling tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a scene file and emit its dynamic-value form as JSON
    Import {
        /// Input scene file (.json or .obj)
        input: PathBuf,

        /// Output value file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Postprocess steps to apply (e.g. triangulate genNormals)
        #[arg(short, long, num_args = 0..)]
        steps: Vec<String>,

        /// Postprocess steps as a flags-struct value file
        /// (see the postprocessStep constant)
        #[arg(long)]
        steps_file: Option<PathBuf>,
    },

    /// Export a dynamic-value scene to a scene file, printing a status code
    Export {
        /// Input value file (JSON)
        scene: PathBuf,

        /// Export format id (see the exportFormat constant)
        format: String,

        /// Output scene file
        output: PathBuf,

        /// Postprocess steps to apply before writing
        #[arg(short, long, num_args = 0..)]
        steps: Vec<String>,

        /// Postprocess steps as a flags-struct value file
        /// (see the postprocessStep constant)
        #[arg(long)]
        steps_file: Option<PathBuf>,
    },

    /// Print a named schema or vocabulary constant as JSON
    Constant {
        /// Constant name (e.g. scene, camera, lightType, postprocessStep)
        name: String,
    },

    /// Pass a value through one decode+encode cycle of a named codec
    Roundtrip {
        /// Codec name: xyz, rgb, rgba, 4x4, string, texel, or scene
        codec: String,

        /// Input value file (JSON)
        input: PathBuf,

        /// Output value file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build every conversion job in a manifest file
    Build {
        /// Path to the jobs.toml manifest
        #[arg(default_value = "jobs.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate a manifest without building
    Check {
        /// Path to the jobs.toml manifest
        #[arg(default_value = "jobs.toml")]
        manifest: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    // Logs go to stderr; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import {
            input,
            output,
            steps,
            steps_file,
        } => {
            let step_bits = resolve_steps(&steps, steps_file.as_deref())?;
            let value = match formats::import_scene(&input) {
                Ok(mut scene) => {
                    postprocess::apply(&mut scene, step_bits);
                    for issue in scene.validate() {
                        tracing::warn!("{}", issue);
                    }
                    convert::scene_to_value(&scene)
                }
                Err(err) => {
                    tracing::error!("{}", err);
                    Value::empty()
                }
            };
            emit_value(&value, output.as_deref())?;
        }

        Commands::Export {
            scene,
            format,
            output,
            steps,
            steps_file,
        } => {
            let step_bits = resolve_steps(&steps, steps_file.as_deref())?;
            let status = run_export(&scene, &format, &output, step_bits);
            println!("{status}");
        }

        Commands::Constant { name } => {
            let value = match constants::lookup(&name) {
                Some(value) => value,
                None => {
                    tracing::warn!("unknown constant {:?}", name);
                    Value::empty()
                }
            };
            emit_value(&value, None)?;
        }

        Commands::Roundtrip {
            codec,
            input,
            output,
        } => {
            let value = value::read_value_file(&input)?;
            let result = run_roundtrip(&codec, &value);
            emit_value(&result, output.as_deref())?;
        }

        Commands::Build {
            manifest,
            output,
            verbose,
        } => {
            if verbose {
                tracing::info!("Building scenes from {:?}", manifest);
            }
            let config = manifest::load_manifest(&manifest)?;
            manifest::build_all(&config, output.as_deref())?;
            tracing::info!("Build complete!");
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config)?;
            tracing::info!("Manifest is valid!");
        }
    }

    Ok(())
}

/// Combine named steps with an optional flags-struct value file.
fn resolve_steps(names: &[String], steps_file: Option<&std::path::Path>) -> Result<u32> {
    let mut bits = postprocess::step_bits_from_names(names);
    if let Some(path) = steps_file {
        bits |= postprocess::steps_from_value(&value::read_value_file(path)?);
    }
    Ok(bits)
}

/// Export never fails the process; it reports the library-style status
/// code (0 success, -1 failure) and logs the reason.
fn run_export(
    scene_path: &std::path::Path,
    format: &str,
    output: &std::path::Path,
    step_bits: u32,
) -> i32 {
    let value = match value::read_value_file(scene_path) {
        Ok(value) => value,
        Err(err) => {
            tracing::error!("{:#}", err);
            return -1;
        }
    };
    let mut scene = convert::scene_from_value(&value);
    postprocess::apply(&mut scene, step_bits);
    for issue in scene.validate() {
        tracing::warn!("{}", issue);
    }
    match formats::export_scene(&scene, format, output) {
        Ok(()) => 0,
        Err(err) => {
            tracing::error!("{}", err);
            -1
        }
    }
}

/// One decode+encode cycle of the named codec, for round-trip checks.
/// Unknown codec names yield the empty value.
fn run_roundtrip(codec_name: &str, value: &Value) -> Value {
    match codec_name {
        "xyz" => codec::encode_xyz(&codec::decode_xyz(value)),
        "rgb" => codec::encode_rgb(&codec::decode_rgb(value)),
        "rgba" => codec::encode_rgba(&codec::decode_rgba(value)),
        "4x4" => codec::encode_mat4(&codec::decode_mat4(value)),
        "string" => codec::encode_text(&codec::decode_text(value).unwrap_or_default()),
        "texel" => {
            let texels = codec::decode_texels(value);
            let width = texels.len() as u32;
            codec::encode_texels(&texels, width, 1)
        }
        "scene" => convert::scene_to_value(&convert::scene_from_value(value)),
        _ => {
            tracing::warn!("unknown codec {:?}", codec_name);
            Value::empty()
        }
    }
}

fn emit_value(value: &Value, output: Option<&std::path::Path>) -> Result<()> {
    match output {
        Some(path) => value::write_value_file(path, value)?,
        None => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}
