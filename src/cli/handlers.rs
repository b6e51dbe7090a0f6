//! Subcommand handlers
//!
//! Each handler runs one command to completion and returns the process exit
//! code: 0 on success, 1 on any failure.

use super::commands::{AnalyzeArgs, GenerateArgs, SourceArgs};
use super::output::{format_written, OutputFormatter};
use crate::config::DevbundleConfig;
use crate::packaging::{write_archive, write_directory, ARCHIVE_EXTENSION};
use crate::repository::RepositoryHandle;
use crate::service::{AnalysisService, ServiceError};
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

pub async fn handle_analyze(args: &AnalyzeArgs, quiet: bool) -> i32 {
    exit_code(run_analyze(args, quiet).await)
}

pub async fn handle_generate(args: &GenerateArgs, quiet: bool) -> i32 {
    exit_code(run_generate(args, quiet).await)
}

fn exit_code(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            match e.downcast_ref::<ServiceError>() {
                Some(service_error) => eprintln!("{}", service_error.help_message()),
                None => eprintln!("Error: {:#}", e),
            }
            1
        }
    }
}

/// Builds the service and repository handle for either a GitHub reference or
/// a local checkout
///
/// With `--path`, a reference that parses as `owner/name` is kept for display;
/// anything else becomes `local/<directory name>`.
fn resolve_source(source: &SourceArgs) -> Result<(AnalysisService, RepositoryHandle)> {
    let config = DevbundleConfig::default();
    debug!("{}", config);

    match &source.path {
        Some(path) => {
            let service = AnalysisService::local(path, &config)?;
            let handle = RepositoryHandle::parse(&source.reference)
                .unwrap_or_else(|_| RepositoryHandle::local(directory_name(path, &source.reference)));
            Ok((service, handle))
        }
        None => {
            let handle = RepositoryHandle::parse(&source.reference).map_err(ServiceError::from)?;
            let service = AnalysisService::github(&config)?;
            Ok((service, handle))
        }
    }
}

fn directory_name(path: &Path, fallback: &str) -> String {
    fs::canonicalize(path)
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

async fn run_analyze(args: &AnalyzeArgs, quiet: bool) -> Result<()> {
    let (service, handle) = resolve_source(&args.source)?;
    let profile = service.analyze(&handle).await?;

    let output = OutputFormatter::new(args.format.into()).format(&profile)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &output)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                eprintln!("\u{2713} Profile written to {}", path.display());
            }
        }
        None => println!("{}", output),
    }
    Ok(())
}

async fn run_generate(args: &GenerateArgs, quiet: bool) -> Result<()> {
    let (service, handle) = resolve_source(&args.source)?;
    let bundle = service.generate(&handle).await?;
    let prefix = format!("{}-devbundle", handle.name);

    let destination = match &args.out_dir {
        Some(dir) => {
            write_directory(&bundle.artifacts, dir).map_err(ServiceError::from)?;
            dir.clone()
        }
        None => {
            let path = args
                .archive
                .clone()
                .unwrap_or_else(|| PathBuf::from(format!("{}.{}", prefix, ARCHIVE_EXTENSION)));
            let file = File::create(&path)
                .with_context(|| format!("Failed to create archive {}", path.display()))?;
            let mut writer = write_archive(&bundle.artifacts, &prefix, BufWriter::new(file))
                .map_err(ServiceError::from)?;
            writer
                .flush()
                .with_context(|| format!("Failed to write archive {}", path.display()))?;
            path
        }
    };

    if !quiet {
        println!("{}", format_written(&destination, &bundle.artifacts));
    }
    Ok(())
}
