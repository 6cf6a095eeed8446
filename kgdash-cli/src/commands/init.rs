use crate::config;
use crate::error::CliResult;

pub fn run() -> CliResult<()> {
    let dir = config::init_kgdash_dir()?;
    println!("Initialized kgdash in {}", dir.display());
    Ok(())
}
