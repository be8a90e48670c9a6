//! JSON reports, one per input.

use std::io::Write;

use anyhow::Context;
use congra_engine::paint::ConicGradient;
use congra_engine::render::sample;
use congra_parser::{GradientDescriptor, ParseError};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Sample {
    pub turn: f32,
    pub rgba: [u8; 4],
}

#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub kind: &'static str,
    pub message: String,
    pub offset: usize,
}

impl From<&ParseError> for ErrorReport {
    fn from(e: &ParseError) -> Self {
        Self { kind: e.kind.name(), message: e.message.clone(), offset: e.offset }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report<'a> {
    Decoded {
        input: &'a str,
        gradient: &'a GradientDescriptor,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        samples: Vec<Sample>,
    },
    Rejected {
        input: &'a str,
        error: ErrorReport,
    },
}

impl<'a> Report<'a> {
    pub fn decoded(input: &'a str, gradient: &'a GradientDescriptor, samples: Vec<Sample>) -> Self {
        Report::Decoded { input, gradient, samples }
    }

    pub fn rejected(input: &'a str, error: &ParseError) -> Self {
        Report::Rejected { input, error: error.into() }
    }

    pub fn write(&self, out: &mut impl Write, pretty: bool) -> anyhow::Result<()> {
        let written = if pretty {
            serde_json::to_writer_pretty(&mut *out, self)
        } else {
            serde_json::to_writer(&mut *out, self)
        };
        written.context("failed to serialize report")?;
        writeln!(out).context("failed to write report")?;
        Ok(())
    }
}

/// `count` colors at evenly spaced turns `0, 1/count, ...`.
pub fn samples(gradient: &ConicGradient, count: usize) -> Vec<Sample> {
    (0..count)
        .map(|k| {
            let turn = k as f32 / count as f32;
            Sample { turn, rgba: sample(gradient, turn).to_rgba8() }
        })
        .collect()
}
