use anyhow::{bail, Context};
use congra_parser::DEFAULT_MAX_STOPS;

pub const USAGE: &str = "\
usage: congra [options] [GRADIENT ...]

Decodes each GRADIENT (or each non-empty stdin line when none are given)
and prints one JSON document per input.

options:
  -m, --max-stops N    reject gradients with more than N color stops (default 16)
  -s, --samples N      add N evenly spaced sampled colors to each report
  -p, --preview WxH    print a 24-bit color terminal preview
      --pretty         pretty-print JSON
  -v, --verbose        more logging (repeatable)
  -q, --quiet          errors only
  -h, --help           show this help
";

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub inputs: Vec<String>,
    pub max_stops: usize,
    pub samples: usize,
    pub preview: Option<(u32, u32)>,
    pub pretty: bool,
    pub verbose: u8,
    pub quiet: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            max_stops: DEFAULT_MAX_STOPS,
            samples: 0,
            preview: None,
            pretty: false,
            verbose: 0,
            quiet: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Args),
    Help,
}

/// Parses arguments without the program name.
pub fn parse(argv: impl IntoIterator<Item = String>) -> anyhow::Result<Command> {
    let mut args = Args::default();
    let mut argv = argv.into_iter();

    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "-m" | "--max-stops" => {
                let v = value(&mut argv, &arg)?;
                args.max_stops = v.parse().with_context(|| format!("invalid stop count {:?}", v))?;
            }
            "-s" | "--samples" => {
                let v = value(&mut argv, &arg)?;
                args.samples = v.parse().with_context(|| format!("invalid sample count {:?}", v))?;
            }
            "-p" | "--preview" => args.preview = Some(parse_size(&value(&mut argv, &arg)?)?),
            "--pretty" => args.pretty = true,
            "-v" | "--verbose" => args.verbose = args.verbose.saturating_add(1),
            "-q" | "--quiet" => args.quiet = true,
            "-h" | "--help" => return Ok(Command::Help),
            "--" => {
                args.inputs.extend(argv);
                break;
            }
            flag if flag.starts_with('-') && flag.len() > 1 => bail!("unknown option {}", flag),
            _ => args.inputs.push(arg),
        }
    }
    Ok(Command::Run(args))
}

fn value(argv: &mut impl Iterator<Item = String>, flag: &str) -> anyhow::Result<String> {
    argv.next().with_context(|| format!("{} needs a value", flag))
}

/// `WxH`, both sides non-zero.
pub fn parse_size(s: &str) -> anyhow::Result<(u32, u32)> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .with_context(|| format!("size {:?} is not WIDTHxHEIGHT", s))?;
    let w: u32 = w.trim().parse().with_context(|| format!("invalid width in {:?}", s))?;
    let h: u32 = h.trim().parse().with_context(|| format!("invalid height in {:?}", s))?;
    if w == 0 || h == 0 {
        bail!("size {:?} has a zero side", s);
    }
    Ok((w, h))
}
