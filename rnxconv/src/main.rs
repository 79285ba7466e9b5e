//! Command line tool to convert RINEX observations
//! between revision 2 and revision 3.
mod cli;

use cli::{Cli, Job};

use env_logger::{Builder, Target};
use rinex_lnav::prelude::{ConversionReport, ObservationFile, RinexConverter};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;

#[macro_use]
extern crate log;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error")]
    StdioError(#[from] std::io::Error),
    #[error("json document error")]
    JsonError(#[from] serde_json::Error),
    #[error("conversion error")]
    ConversionError(#[from] rinex_lnav::prelude::Error),
}

const LICENSE: &str = "rnxconv is part of the rinex-lnav project.
It is distributed under the terms of the Mozilla Public License 2.0 (MPL-2.0).
See https://mozilla.org/MPL/2.0/.";

/// Every JSON document of this directory
fn directory_jobs(dir: &Path) -> Vec<Job> {
    let walkdir = WalkDir::new(dir).max_depth(1).sort_by_file_name();
    walkdir
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| !entry.path().is_dir())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("json"))
                .unwrap_or(false)
        })
        .map(|entry| Job {
            input: entry.path().to_path_buf(),
            output: None,
        })
        .collect()
}

// deduce output path, from input path and converted revision
fn output_path(job: &Job, outpath: Option<&Path>, converted: &ObservationFile) -> PathBuf {
    if let Some(output) = &job.output {
        return match outpath {
            Some(dir) if output.is_relative() => dir.join(output),
            _ => output.clone(),
        };
    }
    let stem = job
        .input
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| String::from("output"));
    let suffix = match converted {
        ObservationFile::V2(_) => "rnx2",
        ObservationFile::V3(_) => "rnx3",
    };
    let filename = format!("{}.{}.json", stem, suffix);
    match outpath {
        Some(dir) => dir.join(filename),
        None => job
            .input
            .parent()
            .map(|parent| parent.join(&filename))
            .unwrap_or_else(|| PathBuf::from(&filename)),
    }
}

fn convert(
    converter: &RinexConverter,
    job: &Job,
    outpath: Option<&Path>,
) -> Result<(PathBuf, ConversionReport), Error> {
    let reader = BufReader::new(File::open(&job.input)?);
    let document: ObservationFile = serde_json::from_reader(reader)?;
    let (converted, report) = document.convert(converter)?;

    let path = output_path(job, outpath, &converted);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(writer, &converted)?;
    Ok((path, report))
}

pub fn main() {
    let cli = Cli::new();

    let mut builder = Builder::new();
    builder
        .target(Target::Stdout)
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    if cli.license() {
        println!("{}", LICENSE);
        return;
    }

    let mut jobs = cli.jobs();
    if jobs.is_empty() {
        jobs = directory_jobs(cli.inpath());
    }
    if jobs.is_empty() {
        error!("no input files");
        std::process::exit(1);
    }

    let converter = RinexConverter::new(cli.converter_opts());
    let outpath = cli.outpath();

    let (mut converted, mut failed) = (0, 0);
    for job in jobs.iter() {
        info!("converting \"{}\"", job.input.display());
        match convert(&converter, job, outpath) {
            Ok((path, report)) => {
                println!("\"{}\" generated: {}", path.display(), report);
                converted += 1;
            },
            Err(e) => {
                error!("\"{}\": {} ({:?})", job.input.display(), e, e);
                failed += 1;
            },
        }
    }

    println!("{} file(s) converted, {} failure(s)", converted, failed);
    if converted == 0 {
        std::process::exit(1);
    }
}
