use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use densemat::Matrix;
use densemat_cli::eval::{run_request, write_result, Evaluated};
use densemat_cli::input::{load_request, EvalConfig};

fn output_args() -> [Arg; 5] {
    [
        Arg::new("format")
            .short('f')
            .long("format")
            .help("Output format. Overrides the output specified in the configuration file.")
            .value_parser(["text", "json"])
            .value_hint(ValueHint::Other),
        Arg::new("precision")
            .short('p')
            .long("precision")
            .help("Print every value with this many decimals.")
            .value_parser(clap::value_parser!(usize)),
        Arg::new("round")
            .short('r')
            .long("round")
            .help("Round results to this many decimal places (negative rounds to tens, hundreds, ...).")
            .value_parser(clap::value_parser!(i32))
            .allow_negative_numbers(true),
        Arg::new("rounding")
            .long("rounding")
            .help("Tie-breaking rule used by --round.")
            .value_parser(["half_even", "half_away_from_zero"]),
        Arg::new("output_file")
            .short('o')
            .long("output")
            .help("Path to write the result to. Defaults to stdout.")
            .value_parser(clap::value_parser!(PathBuf))
            .value_hint(ValueHint::FilePath),
    ]
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("DENSEMAT_LOG", "error,densemat=info"))
        .init();

    let matches = Command::new("densemat")
        .version(clap::crate_version!())
        .author("Justin Sing <justincsing@gmail.com>")
        .about("Evaluate small dense matrix operations")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("eval")
                .about("Evaluate one operation described in a JSON input file")
                .arg(
                    Arg::new("input")
                        .help("Path to the JSON input: {\"op\": ..., \"lhs\": ..., \"rhs\": ...}")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("Path to a JSON configuration file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .args(output_args()),
        )
        .subcommand(
            Command::new("identity")
                .about("Print the k x k identity matrix")
                .arg(
                    Arg::new("size")
                        .help("Number of rows and columns")
                        .required(true)
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("Path to a JSON configuration file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .args(output_args()),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Written by {author-with-newline}Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    let outcome = match matches.subcommand() {
        Some(("eval", sub_m)) => handle_eval(sub_m),
        Some(("identity", sub_m)) => handle_identity(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    };

    match outcome {
        Ok(()) => Ok(()),
        Err(e) => {
            log::error!("{:#}", e);
            std::process::exit(1)
        }
    }
}

fn open_sink(matches: &ArgMatches) -> Result<Box<dyn Write>> {
    match matches.get_one::<PathBuf>("output_file") {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn handle_eval(matches: &ArgMatches) -> Result<()> {
    let input_path: &PathBuf = matches
        .get_one("input")
        .context("Missing required input path")?;
    let config = EvalConfig::from_arguments(matches.get_one::<PathBuf>("config"), matches)?;
    log::info!("[densemat::eval] Evaluating {:?}", input_path);

    let request = load_request(input_path)?;
    let result = run_request(&request, &config)?;

    let mut sink = open_sink(matches)?;
    write_result(&mut sink, &result, &config)?;
    sink.flush()?;
    Ok(())
}

fn handle_identity(matches: &ArgMatches) -> Result<()> {
    let size: usize = *matches
        .get_one("size")
        .context("Missing required size")?;
    let config = EvalConfig::from_arguments(matches.get_one::<PathBuf>("config"), matches)?;

    let identity = Matrix::<f64>::identity(size).context("Failed to build identity matrix")?;
    let mut sink = open_sink(matches)?;
    write_result(&mut sink, &Evaluated::Matrix(identity), &config)?;
    sink.flush()?;
    Ok(())
}
