use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing::trace;
use tracing_subscriber::{filter, prelude::*};
use transducers::{pipeline, prelude::*};

fn cli() -> clap::Command {
    Command::new("tmin")
        .about("Minimizes Mealy and Moore machines given as semicolon-separated tables")
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
        )
        .arg(
            Arg::new("show")
                .long("show")
                .action(ArgAction::SetTrue)
                .help("print the minimized machine as a table to stderr"),
        )
        .arg(
            Arg::new("flavor")
                .required(true)
                .value_parser(["mealy", "moore"])
                .help("whether the input is a Mealy or a Moore machine"),
        )
        .arg(
            Arg::new("input")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("the file from which the machine is read"),
        )
        .arg(
            Arg::new("output")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("the file to which the minimized machine is written"),
        )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::INFO,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn run(matches: &ArgMatches) -> transducers::Result<()> {
    let flavor: Flavor = matches
        .get_one::<String>("flavor")
        .map(String::as_str)
        .unwrap_or_default()
        .parse()?;
    let (Some(input), Some(output)) = (
        matches.get_one::<PathBuf>("input"),
        matches.get_one::<PathBuf>("output"),
    ) else {
        unreachable!("clap enforces both paths")
    };

    let outcome = pipeline::minimize_file(flavor, input, output)?;
    if matches.get_flag("show") {
        eprintln!("{}", outcome.pretty);
    }
    Ok(())
}

pub fn main() {
    let matches = cli().get_matches();

    setup_logging(&matches);

    if let Err(err) = run(&matches) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
