use hvsim::{bench_leapfrog, Scenario, ScenarioConfig, SnapshotWriter};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file inside the `scenarios` directory
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Run the serial vs parallel step benchmark instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let cfg = ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {:?}", config_path))?;
    cfg.validate()?;
    Ok(cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    if args.bench {
        bench_leapfrog();
        return Ok(());
    }

    let cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::load(&cfg).context("failed to set up scenario")?;

    let output = cfg.output_path();
    let mut writer = SnapshotWriter::create(&output)
        .with_context(|| format!("cannot write {:?}", output))?;

    scenario.run(&mut writer)?;

    let rows = writer.rows();
    writer.finish()?;
    info!("Wrote {} rows to {:?}", rows, output);

    Ok(())
}
