//! Batch conversion manifests
//!
//! A TOML file listing conversion jobs, so a set of scenes can be rebuilt
//! in one command:
//!
//! ```toml
//! output_dir = "build"
//!
//! [[jobs]]
//! input = "assets/room.obj"
//! output = "room.json"
//! steps = ["triangulate", "genNormals"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;

use crate::formats::{self, find_format, EXPORT_FORMATS};
use crate::postprocess;
use scene_common::flags::step_bit;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Directory all job outputs land in, unless overridden on the
    /// command line.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub jobs: Vec<Job>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Export format id; inferred from the output extension when omitted.
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub steps: Vec<String>,
}

pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read manifest: {path:?}"))?;
    let manifest =
        toml::from_str(&text).with_context(|| format!("Failed to parse manifest: {path:?}"))?;
    Ok(manifest)
}

/// Check a manifest without running it: every job must have a resolvable
/// format and declared step names.
pub fn validate(manifest: &Manifest) -> Result<()> {
    if manifest.jobs.is_empty() {
        bail!("Manifest has no jobs");
    }
    for (i, job) in manifest.jobs.iter().enumerate() {
        job_format(job).with_context(|| format!("Job {i} ({:?})", job.input))?;
        for step in &job.steps {
            if step_bit(step).is_none() {
                bail!("Job {i} ({:?}) names unknown step {:?}", job.input, step);
            }
        }
    }
    Ok(())
}

/// Run every job in the manifest.
pub fn build_all(manifest: &Manifest, output_override: Option<&Path>) -> Result<()> {
    for job in &manifest.jobs {
        let format = job_format(job)?;
        let mut scene = formats::import_scene(&job.input)
            .with_context(|| format!("Failed to import {:?}", job.input))?;
        postprocess::apply(&mut scene, postprocess::step_bits_from_names(&job.steps));

        let output_dir = output_override.or(manifest.output_dir.as_deref());
        let output = match output_dir {
            Some(dir) => dir.join(&job.output),
            None => job.output.clone(),
        };
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create output dir: {parent:?}"))?;
            }
        }
        formats::export_scene(&scene, format, &output)
            .with_context(|| format!("Failed to export {output:?}"))?;
        tracing::info!("Built {:?} -> {:?}", job.input, output);
    }
    Ok(())
}

fn job_format(job: &Job) -> Result<&'static str> {
    if let Some(id) = &job.format {
        return find_format(id)
            .map(|format| format.id)
            .ok_or_else(|| anyhow!("unknown format {id:?}"));
    }
    let ext = job
        .output
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();
    EXPORT_FORMATS
        .iter()
        .find(|format| format.extension == ext)
        .map(|format| format.id)
        .ok_or_else(|| anyhow!("cannot infer format from output {:?}", job.output))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest() {
        let manifest: Manifest = toml::from_str(
            r#"
            output_dir = "build"

            [[jobs]]
            input = "room.obj"
            output = "room.json"
            steps = ["triangulate"]

            [[jobs]]
            input = "room.json"
            output = "room.obj"
            format = "obj"
            "#,
        )
        .expect("Failed to parse manifest");

        assert_eq!(manifest.output_dir.as_deref(), Some(Path::new("build")));
        assert_eq!(manifest.jobs.len(), 2);
        assert_eq!(manifest.jobs[0].steps, vec!["triangulate"]);
        assert!(validate(&manifest).is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_step() {
        let manifest: Manifest = toml::from_str(
            r#"
            [[jobs]]
            input = "room.obj"
            output = "room.json"
            steps = ["warp"]
            "#,
        )
        .unwrap();
        assert!(validate(&manifest).is_err());
    }

    #[test]
    fn test_validate_rejects_unresolvable_format() {
        let manifest: Manifest = toml::from_str(
            r#"
            [[jobs]]
            input = "room.obj"
            output = "room.glb"
            "#,
        )
        .unwrap();
        assert!(validate(&manifest).is_err());
    }

    #[test]
    fn test_empty_manifest_is_invalid() {
        let manifest: Manifest = toml::from_str("").unwrap();
        assert!(validate(&manifest).is_err());
    }
}
