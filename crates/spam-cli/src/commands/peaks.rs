use crate::cli::PeaksArgs;
use crate::error::{CliError, Result};
use spampp::{core::io::WriteOptions, workflows};
use tracing::info;

pub fn run(args: PeaksArgs) -> Result<()> {
    let summary = workflows::peaks::summarize(&args.input)?;
    println!(
        "Peak file {} holds {} density peak(s).",
        args.input.display(),
        summary.n_peaks
    );
    if let Some(strongest) = &summary.strongest {
        let pos = strongest.position();
        println!(
            "Strongest peak: density {:.6} at ({:.3}, {:.3}, {:.3})",
            strongest.density(),
            pos.x,
            pos.y,
            pos.z
        );
    }

    if args.remove.is_empty() {
        return Ok(());
    }

    let Some(output) = &args.output else {
        return Err(CliError::Argument(
            "an --output path is required when removing peaks".to_string(),
        ));
    };

    info!(indices = ?args.remove, "removing peaks");
    let options = WriteOptions {
        overwrite: args.overwrite,
    };
    let remaining = workflows::peaks::remove_peaks(&args.input, &args.remove, output, options)?;

    println!(
        "✓ Removed {} peak(s); {} remain in: {}",
        summary.n_peaks - remaining,
        remaining,
        output.display()
    );
    Ok(())
}
