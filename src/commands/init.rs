// ABOUTME: Init command implementation.
// ABOUTME: Writes a starter stackshift.yml into the working directory.

use stackshift::config;
use stackshift::error::Result;
use std::env;

pub fn init(bucket: Option<&str>, stack: Option<&str>, force: bool) -> Result<()> {
    let cwd = env::current_dir()?;
    config::init_config(&cwd, bucket, stack, force)?;
    println!("Created {}", cwd.join(config::CONFIG_FILENAME).display());
    Ok(())
}
