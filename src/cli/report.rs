//! Report command implementation

use anyhow::{Result, bail};
use std::path::Path;

use bridgiron::config::Settings;
use bridgiron::report;

/// Print the latest report, prefixed unless `no_prefix`
pub fn report_command(settings: &Settings, project: Option<String>, no_prefix: bool) -> Result<()> {
    let project_path = project.unwrap_or_else(|| settings.project_path.clone());
    if project_path.trim().is_empty() || !Path::new(&project_path).exists() {
        bail!("Project path not found: {}", project_path);
    }

    match report::get_report(&project_path) {
        Ok(text) => {
            if no_prefix {
                println!("{}", text);
            } else {
                println!("{}{}", settings.cc_prefix, text);
            }
            Ok(())
        }
        Err(e) => bail!("{} ({}): {}", e.code(), project_path, e),
    }
}
