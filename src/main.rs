use std::process::ExitCode;

use anyhow::Context;
use citelist::aggregate::AggregatorConfig;
use citelist::render::RenderConfig;
use citelist::sink::FileSink;
use citelist::source::JsonDirSource;
use citelist::{Aggregator, CitationError, Pipeline, RecordSource, Renderer};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, InputFormat};

mod cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            match error.downcast_ref::<CitationError>() {
                Some(CitationError::NoPublications) => {
                    let target = cli
                        .output
                        .as_ref()
                        .map_or_else(|| "output".to_string(), |p| p.display().to_string());
                    eprintln!("No publications survived filtering; {target} was not written.");
                }
                _ => eprintln!("error: {error:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; `RUST_LOG` applies unless `-v`/`-q` is given.
fn init_logging(cli: &Cli) {
    let filter = if cli.verbosity.is_present() {
        EnvFilter::default().add_directive(cli.verbosity.tracing_level_filter().into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::default().add_directive(cli.verbosity.tracing_level_filter().into())
        })
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match cli.format {
        InputFormat::Json => publish(cli, JsonDirSource::new(&cli.input)),
        #[cfg(feature = "csv")]
        InputFormat::Csv => publish(cli, citelist::source::CsvDirSource::new(&cli.input)),
    }
}

fn publish<S: RecordSource>(cli: &Cli, source: S) -> anyhow::Result<()> {
    let mut render_config = RenderConfig::new();
    if let Some(title) = &cli.title {
        render_config.set_title(title);
    }
    if let Some(note) = &cli.note {
        render_config.set_note(note);
    }

    let pipeline = Pipeline::new(source)
        .with_aggregator(Aggregator::new().with_config(AggregatorConfig {
            min_year: cli.min_year,
        }))
        .with_renderer(Renderer::new().with_config(render_config));

    if cli.stdout {
        let report = pipeline.build(&cli.ids)?;
        print!("{}", report.document);
        return Ok(());
    }

    let path = cli
        .output
        .as_ref()
        .context("--output is required unless --stdout is given")?;
    let mut sink = FileSink::new(path);
    let report = pipeline
        .publish(&cli.ids, &mut sink)
        .map_err(|e| match e {
            CitationError::NoPublications => anyhow::Error::new(e),
            e => anyhow::Error::new(e).context(format!("failed to publish {}", path.display())),
        })?;
    tracing::info!(
        publications = report.publications.len(),
        path = %path.display(),
        "citation page generated"
    );
    Ok(())
}
