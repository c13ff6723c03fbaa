use std::path::Path;

use loadplan_core::PlannerConfig;
use loadplan_core::config::DEFAULT_CONFIG_FILE;

pub fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    let output = path.join(DEFAULT_CONFIG_FILE);
    if output.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", output.display());
    }

    let config = PlannerConfig::default().to_toml_string()?;
    std::fs::write(&output, config)?;
    println!("✓ Generated {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_parseable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        init(dir.path(), false).unwrap();

        let config = PlannerConfig::from_file(&dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "# mine\n").unwrap();

        assert!(init(dir.path(), false).is_err());
        init(dir.path(), true).unwrap();
        let content = std::fs::read_to_string(dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert!(content.contains("[arms]"));
    }
}
