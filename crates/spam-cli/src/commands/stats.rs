use crate::cli::StatsArgs;
use crate::config::StatsFileConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use spampp::{
    core::io::{
        WriteOptions,
        report::{ReportFormat, StatsReport},
    },
    workflows::{self, progress::ProgressReporter, stats::SpamStatsConfig},
};
use tracing::{debug, info};

pub fn run(args: StatsArgs) -> Result<()> {
    let file_config = StatsFileConfig::load(args.config.as_deref())?;
    let params = file_config.to_params(args.sample_size, args.subsamples);
    debug!(?params, "resolved estimator parameters");

    let config = SpamStatsConfig::new(&args.info, &args.energy_prefix).with_params(params);

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting free-energy statistics pass...");
    info!("Invoking the core statistics workflow...");
    let rows = workflows::stats::run(&config, &reporter)?;

    let format = if args.csv {
        ReportFormat::Csv
    } else {
        ReportFormat::Text
    };
    let options = WriteOptions {
        overwrite: args.overwrite,
    };
    StatsReport::write_to_path(&rows, &args.output, format, options)
        .map_err(workflows::WorkflowError::from)?;

    println!(
        "✓ Statistics for {} site(s) written to: {}",
        rows.len(),
        args.output.display()
    );
    Ok(())
}
