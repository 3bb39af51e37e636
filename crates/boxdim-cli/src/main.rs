use std::{error::Error, fs, path::Path};

use boxdim_pipeline::{
    reconstruct_with_config, ReconstructionConfig, ReconstructionReport, ReconstructionRequest,
};
use clap::Parser;
use log::LevelFilter;

/// Estimate box dimensions from a cropped edge mask.
#[derive(Debug, Parser)]
#[command(author, version, about = "Single-image box dimension estimation")]
struct Args {
    /// Edge-mask image of the detector crop; any non-zero pixel is an edge.
    #[arg(long)]
    mask: String,

    /// Path to JSON file containing a ReconstructionRequest.
    #[arg(long)]
    request: String,

    /// Optional path to JSON ReconstructionConfig. Defaults are used if omitted.
    #[arg(long)]
    config: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let data = fs::read_to_string(path)?;
    let value = serde_json::from_str(&data)?;
    Ok(value)
}

fn write_report_json(report: &ReconstructionReport) -> Result<String, Box<dyn Error>> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn run_from_files(
    mask_path: &str,
    request_path: &str,
    config_path: Option<&str>,
) -> Result<String, Box<dyn Error>> {
    let mask = image::open(mask_path)?.to_luma8();
    log::info!("loaded {mask_path} ({}x{})", mask.width(), mask.height());

    let request: ReconstructionRequest = load_json_file(Path::new(request_path))?;
    let config = if let Some(cfg_path) = config_path {
        load_json_file::<ReconstructionConfig>(Path::new(cfg_path))?
    } else {
        ReconstructionConfig::default()
    };

    let report = reconstruct_with_config(&mask, &request, &config)?;
    write_report_json(&report)
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let _ = env_logger::Builder::new()
        .filter_level(level_for(args.verbose))
        .parse_default_env()
        .try_init();

    let json = run_from_files(&args.mask, &args.request, args.config.as_deref())?;
    println!("{}", json);
    Ok(())
}
