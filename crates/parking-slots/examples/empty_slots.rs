use std::{env, path::PathBuf};

use parking_slots::io::{write_coordinates_json, EmptySlotConfig, EmptySlotReport};

#[cfg(not(feature = "tracing"))]
use log::{info, warn};

#[cfg(feature = "tracing")]
use tracing::{info, warn};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(not(feature = "tracing"))]
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("PARKING_SLOTS_LOG", "info"))
        .init();

    #[cfg(feature = "tracing")]
    parking_slots::init_tracing_with_log(env::var_os("PARKING_SLOTS_JSON").is_some())?;

    run()
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info"))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = parse_config_path();
    let cfg = EmptySlotConfig::load_json(&config_path)?;

    let detections = cfg.load_detections()?;
    info!(
        "loaded {} detections from {}",
        detections.0.len(),
        cfg.detections_path
    );

    let detector = cfg.build_detector()?;
    let mut report = EmptySlotReport::new(&cfg, &config_path, detections.0.len());

    match detector.detect(&detections.0) {
        Ok(res) => {
            let coords = res.coordinates();
            info!("found {} empty parking spaces", coords.len());
            write_coordinates_json(&coords, cfg.coordinates_path())?;
            println!(
                "wrote coordinates JSON to {}",
                cfg.coordinates_path().display()
            );
            report.set_result(res);
        }
        Err(err) => {
            warn!("empty slot detection failed: {err}");
            report.set_error(&err);
        }
    }

    let out_path = cfg.output_path();
    report.write_json(&out_path)?;
    println!("wrote report JSON to {}", out_path.display());
    Ok(())
}

fn parse_config_path() -> PathBuf {
    env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("testdata/lot_config.json"))
}
