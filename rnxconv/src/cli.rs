use clap::{value_parser, Arg, ArgAction, ArgMatches, ColorChoice, Command};
use log::LevelFilter;
use rinex_lnav::prelude::{ConverterOpts, MarkerType};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub struct Cli {
    /// arguments passed by user
    pub matches: ArgMatches,
}

/// One file to convert
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub input: PathBuf,
    /// Output path, when user specified one
    pub output: Option<PathBuf>,
}

impl FromStr for Job {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((input, output)) if !output.is_empty() => Ok(Self {
                input: PathBuf::from(input),
                output: Some(PathBuf::from(output)),
            }),
            Some((input, _)) => Ok(Self {
                input: PathBuf::from(input),
                output: None,
            }),
            None => Ok(Self {
                input: PathBuf::from(s),
                output: None,
            }),
        }
    }
}

impl Cli {
    pub fn new() -> Self {
        Self {
            matches: Self::command().get_matches(),
        }
    }
    fn command() -> Command {
        Command::new("rnxconv")
            .author("rinex-lnav developers")
            .version(env!("CARGO_PKG_VERSION"))
            .about("RINEX-2 / RINEX-3 observation conversion tool.
Input and output are JSON observation documents, the conversion direction
is deduced from the document revision.")
            .color(ColorChoice::Always)
            .next_help_heading("Input/Output")
            .arg(
                Arg::new("files")
                    .short('f')
                    .long("files")
                    .value_name("INPUT[:OUTPUT]")
                    .action(ArgAction::Append)
                    .value_parser(value_parser!(Job))
                    .help("File to convert, with optional output path. Can be repeated."),
            )
            .arg(
                Arg::new("inpath")
                    .short('i')
                    .long("inpath")
                    .value_name("DIR")
                    .default_value(".")
                    .help("Convert every JSON document of this directory, when no file was specified."),
            )
            .arg(
                Arg::new("outpath")
                    .short('o')
                    .long("outpath")
                    .value_name("DIR")
                    .help("Output directory. Defaults to the input file directory."),
            )
            .next_help_heading("Conversion")
            .arg(
                Arg::new("marker-type")
                    .long("marker-type")
                    .value_name("TYPE")
                    .value_parser(MarkerType::from_str)
                    .help("RINEX-3 marker type (GEODETIC, NON_GEODETIC..). Defaults to NON_GEODETIC."),
            )
            .arg(
                Arg::new("no-comments")
                    .long("no-comments")
                    .action(ArgAction::SetTrue)
                    .help("Drop header comments."),
            )
            .arg(
                Arg::new("required-only")
                    .long("required-only")
                    .action(ArgAction::SetTrue)
                    .help("Only convert required header fields."),
            )
            .arg(
                Arg::new("strict")
                    .long("strict")
                    .action(ArgAction::SetTrue)
                    .help("Unknown observation codes are fatal, instead of being dropped."),
            )
            .next_help_heading("Misc")
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .value_name("LEVEL")
                    .default_value("1")
                    .value_parser(value_parser!(u8).range(0..=4))
                    .help("0: errors, 1: warnings, 2: info, 3: debug, 4: trace. RUST_LOG overrides."),
            )
            .arg(
                Arg::new("license")
                    .short('l')
                    .long("license")
                    .action(ArgAction::SetTrue)
                    .help("Prints license information and exits."),
            )
    }
    pub fn jobs(&self) -> Vec<Job> {
        self.matches
            .get_many::<Job>("files")
            .map(|jobs| jobs.cloned().collect())
            .unwrap_or_default()
    }
    pub fn inpath(&self) -> &Path {
        self.matches
            .get_one::<String>("inpath")
            .map(Path::new)
            .unwrap_or_else(|| Path::new("."))
    }
    pub fn outpath(&self) -> Option<&Path> {
        self.matches.get_one::<String>("outpath").map(Path::new)
    }
    pub fn license(&self) -> bool {
        self.matches.get_flag("license")
    }
    pub fn log_level(&self) -> LevelFilter {
        match self.matches.get_one::<u8>("verbose") {
            Some(0) => LevelFilter::Error,
            Some(1) | None => LevelFilter::Warn,
            Some(2) => LevelFilter::Info,
            Some(3) => LevelFilter::Debug,
            Some(_) => LevelFilter::Trace,
        }
    }
    pub fn converter_opts(&self) -> ConverterOpts {
        let mut opts = ConverterOpts::default()
            .with_comments(!self.matches.get_flag("no-comments"))
            .with_optional_fields(!self.matches.get_flag("required-only"))
            .with_strict_codes(self.matches.get_flag("strict"));
        if let Some(marker) = self.matches.get_one::<MarkerType>("marker-type") {
            opts = opts.with_marker_type(*marker);
        }
        opts
    }
}
