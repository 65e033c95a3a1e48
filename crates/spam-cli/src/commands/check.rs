use crate::cli::CheckArgs;
use crate::error::{CliError, Result};
use crate::utils::which::which;
use tracing::info;

pub fn run(args: CheckArgs) -> Result<()> {
    let check_traj = !args.energy_only;
    let check_energy = !args.traj_only;

    if check_traj {
        let path = which(&args.cpptraj)
            .ok_or_else(|| CliError::MissingProgram(args.cpptraj.clone()))?;
        info!(program = %args.cpptraj, path = %path.display(), "found trajectory processor");
        println!("✓ Trajectory processor: {}", path.display());
    }

    if check_energy {
        let path =
            which(&args.namd).ok_or_else(|| CliError::MissingProgram(args.namd.clone()))?;
        info!(program = %args.namd, path = %path.display(), "found energy engine");
        println!("✓ Energy engine: {}", path.display());
    }

    Ok(())
}
