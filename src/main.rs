mod cli;

use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;

use bridgesupport::{Document, ParseError};
use cli::{Cli, Reader};

#[derive(Debug, Error)]
enum CliError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("could not fetch {url}: {source}")]
    Fetch {
        url: String,
        source: reqwest::Error,
    },
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

fn load(input: &str) -> Result<String, CliError> {
    if input.starts_with("http://") || input.starts_with("https://") {
        let fetch = |source| CliError::Fetch {
            url: input.to_string(),
            source,
        };
        reqwest::blocking::get(input)
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(fetch)
    } else {
        std::fs::read_to_string(input).map_err(|source| CliError::Read {
            path: input.to_string(),
            source,
        })
    }
}

fn run(cli: &Cli) -> Result<Document, CliError> {
    let text = load(&cli.input)?;
    let document = match cli.reader {
        Reader::Streaming => bridgesupport::parse_str(&text)?,
        Reader::Tree => {
            let options = roxmltree::ParsingOptions {
                allow_dtd: cli.allow_dtd,
                ..Default::default()
            };
            let xml = roxmltree::Document::parse_with_options(&text, options)?;
            bridgesupport::read_bridgesupport(&xml)?
        }
    };
    Ok(document)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(document) => {
            println!("{document:#?}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{}: {error}", cli.input);
            ExitCode::FAILURE
        }
    }
}
