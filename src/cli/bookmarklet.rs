//! Bookmarklet command implementation

use anyhow::{Context, Result};
use std::path::Path;

use bridgiron::bookmarklet;
use bridgiron::config::AppPaths;

/// Print the bookmarklet built from the pattern files
pub fn bookmarklet_command(paths: &AppPaths, template: Option<&Path>) -> Result<()> {
    let code = bookmarklet::generate_for(paths, template)
        .context("Failed to generate bookmarklet")?;
    println!("{}", code);
    Ok(())
}
