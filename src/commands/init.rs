use std::path::Path;

use crate::config;
use crate::io;

/// Write a starter `.riskmap.toml` into the current directory.
pub fn init_config(force: bool) -> anyhow::Result<()> {
    init_config_in(Path::new("."), force)
}

pub fn init_config_in(dir: &Path, force: bool) -> anyhow::Result<()> {
    let path = dir.join(config::CONFIG_FILE_NAME);
    if io::file_exists(&path) && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }
    io::write_file(&path, &config::config_template())?;
    println!("Created {}", path.display());
    Ok(())
}
