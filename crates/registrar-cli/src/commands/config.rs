//! Config command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use super::common::Target;
use crate::config::Config;

/// Print the effective configuration and where it was read from.
pub fn execute(target: &Target, path: Option<&Path>) -> Result<()> {
    let source = match path.map(Path::to_path_buf).or_else(Config::default_path) {
        Some(path) if path.is_file() => path.display().to_string(),
        Some(path) => format!("{} (not found, using defaults)", path.display()),
        None => "defaults".to_string(),
    };

    let yaml = serde_yaml_ng::to_string(&target.config).context("Failed to render configuration")?;

    println!("{} Configuration\n", style("→").cyan().bold());
    println!("  {:<10} {}", style("Source").bold(), source);
    let transport = if target.sim {
        "in-process simulator".to_string()
    } else {
        target.config.api.base_url.clone()
    };
    println!("  {:<10} {}\n", style("Transport").bold(), transport);
    for line in yaml.lines() {
        println!("  {line}");
    }
    Ok(())
}
