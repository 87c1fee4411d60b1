use crate::angles::Phase;
use crate::cli::{AnglesArgs, GlobalArgs};

pub fn execute(args: AnglesArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let config = global.load_config()?;

    let phases: Vec<Phase> = match args.phase {
        Some(phase) => vec![phase],
        None => Phase::all().to_vec(),
    };

    for phase in phases {
        println!(
            "{} (concurrency {})",
            phase,
            config.concurrency.for_phase(phase)
        );
        for angle in phase.angles() {
            println!("  {:<14}{}", angle.key, angle.description);
        }
        println!();
    }
    Ok(())
}
