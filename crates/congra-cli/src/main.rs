mod args;
mod preview;
mod report;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::Context;
use congra_engine::logging::{init_logging, LoggingConfig};
use congra_engine::paint::ConicGradient;
use congra_parser::{parse_conic_gradient_with, ParseOptions};

use args::{Args, Command};
use report::Report;

fn main() -> ExitCode {
    let args = match args::parse(std::env::args().skip(1)) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            print!("{}", args::USAGE);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("congra: {:#}\n\n{}", e, args::USAGE);
            return ExitCode::from(2);
        }
    };

    init_logging(LoggingConfig::from_verbosity(args.verbose, args.quiet));

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Decodes every input and writes its report. Returns whether all inputs
/// decoded.
fn run(args: &Args) -> anyhow::Result<bool> {
    let inputs = if args.inputs.is_empty() {
        read_stdin_lines()?
    } else {
        args.inputs.clone()
    };
    let options = ParseOptions { max_stops: args.max_stops };
    log::info!("decoding {} input(s), max {} stops", inputs.len(), options.max_stops);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut all_ok = true;

    for input in &inputs {
        match parse_conic_gradient_with(input, &options) {
            Ok(descriptor) => {
                let gradient = ConicGradient::from(&descriptor);
                let samples = report::samples(&gradient, args.samples);
                Report::decoded(input, &descriptor, samples).write(&mut out, args.pretty)?;
                if let Some((w, h)) = args.preview {
                    out.write_all(preview::render(&gradient, w, h).as_bytes())
                        .context("failed to write preview")?;
                }
            }
            Err(e) => {
                log::warn!("rejected {:?}: {}", input, e);
                all_ok = false;
                Report::rejected(input, &e).write(&mut out, args.pretty)?;
            }
        }
    }

    out.flush().context("failed to flush stdout")?;
    Ok(all_ok)
}

fn read_stdin_lines() -> anyhow::Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }
    Ok(lines)
}
