//! Thin CLI over the validation-and-compilation pipeline.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;

use bankc::compile::{self, CompileOptions};
use bankc::parse;
use bankc::validate;

#[derive(Parser)]
#[command(name = "bankc", version, about = "Audio project data compiler")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a project document and write the binary engine artifact.
    Build {
        /// Path to the authored project document.
        project: PathBuf,
        /// Directory the artifact is written to.
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
        /// Omit entity names from the artifact.
        #[arg(long)]
        strip_names: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Build {
            project,
            out_dir,
            strip_names,
        } => build(&project, &out_dir, strip_names),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn build(project_path: &Path, out_dir: &Path, strip_names: bool) -> anyhow::Result<ExitCode> {
    let text = fs::read_to_string(project_path)
        .with_context(|| format!("failed to read {}", project_path.display()))?;
    let project = parse::parse(&text)?;

    let validated = match validate::validate(&project) {
        Ok(validated) => validated,
        Err(violations) => {
            eprintln!(
                "{}: {} validation violation(s):",
                project_path.display(),
                violations.len()
            );
            for violation in &violations {
                eprintln!("  {}", violation);
            }
            return Ok(ExitCode::FAILURE);
        }
    };

    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let stem = project_path
        .file_stem()
        .context("project path has no file name")?;

    let options = CompileOptions { strip_names };
    let written = compile::write_artifact(&validated, &out_dir.join(stem), &options)?;
    info!("wrote engine artifact to {}", written.display());
    println!("{}", written.display());
    Ok(ExitCode::SUCCESS)
}
