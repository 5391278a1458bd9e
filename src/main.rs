use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use imagefilter::{
    config::ProcessConfig,
    error::Result,
    filter::Filter,
    run,
    utils::image::{decode_image, write_image},
};

#[derive(Parser)]
#[command(name = "imagefilter")]
#[command(about = "Apply tone, convolution and colour reduction filters to an image", long_about = None)]
struct Cli {
    /// Image to read, any format supported by the `image` crate
    input: PathBuf,

    /// Where to write the result, always encoded as PNG
    output: PathBuf,

    /// JSON file listing the filters to apply
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Filter to apply with default parameters, repeatable. Runs after the config filters
    #[arg(short, long = "filter", value_name = "NAME")]
    filters: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match process(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "processing failed");
            ExitCode::FAILURE
        }
    }
}

fn process(cli: Cli) -> Result {
    let mut config = match &cli.config {
        Some(path) => ProcessConfig::read_config(path)?,
        None => ProcessConfig::default(),
    };
    for name in &cli.filters {
        config.filters.push(Filter::parse_name(name)?);
    }

    let image = decode_image(&cli.input)?;
    tracing::info!(
        path = %cli.input.display(),
        width = image.width(),
        height = image.height(),
        filters = config.filters.len(),
        "Loaded image"
    );

    let processed_image = run(&config, &image)?;

    write_image(&processed_image, &cli.output, image::ImageFormat::Png)?;
    tracing::info!(path = %cli.output.display(), "Saved image");
    Ok(())
}
