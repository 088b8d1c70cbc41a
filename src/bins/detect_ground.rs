use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use dotenv::dotenv;
use groundline::report::{to_json, ErrorReport, GroundReport};
use groundline::utils::load_image;
use groundline::{DetectError, GroundDetection, HorizonDetector, DEBUG_IMAGE_PATH};
use log::{error, info, warn};

#[derive(Parser, Debug)]
#[command(version, about = "Estimate the horizon of a photo and the ground rectangle below it")]
struct Args {
    /// Image to analyse
    #[arg(allow_hyphen_values = true)]
    image: Option<PathBuf>,

    /// Anything after the image path is ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    rest: Vec<OsString>,
}

fn run(args: &Args) -> Result<GroundDetection, DetectError> {
    let path = args.image.as_deref().ok_or(DetectError::MissingArgument)?;
    if !args.rest.is_empty() {
        warn!("Ignoring {} extra arguments", args.rest.len());
    }
    let mut image = load_image(path)?;
    HorizonDetector::default().detect_ground(&mut image, Path::new(DEBUG_IMAGE_PATH))
}

fn emit(outcome: Result<GroundDetection, DetectError>) -> ExitCode {
    let (json, code) = match outcome {
        Ok(detection) => {
            let origin = if detection.source.is_fallback() {
                "fallback"
            } else {
                "detected lines"
            };
            info!("Ground rect {:?} from {}", detection.ground_rect, origin);
            (to_json(&GroundReport::from(&detection)), ExitCode::SUCCESS)
        }
        Err(err) => {
            match &err {
                DetectError::DecodeFailure { path } => error!("Could not decode {}", path),
                other => error!("{:?}", other),
            }
            (to_json(&ErrorReport::new(err.to_string())), ExitCode::FAILURE)
        }
    };

    match json {
        Ok(json) => {
            println!("{}", json);
            code
        }
        Err(err) => {
            error!("Could not encode output: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    // Initialize the logger
    dotenv().ok();
    env_logger::init();

    match Args::try_parse() {
        Ok(args) => emit(run(&args)),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            error!("{}", err);
            emit(Err(DetectError::InvalidArguments))
        }
    }
}
