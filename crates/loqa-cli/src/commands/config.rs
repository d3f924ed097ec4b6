use anyhow::Context;
use loqa_config::LoqaConfig;

/// Print the merged configuration as TOML.
pub fn handle(config: &LoqaConfig) -> anyhow::Result<()> {
    let rendered = toml::to_string_pretty(config).context("failed to render configuration")?;
    print!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use loqa_config::LoqaConfig;

    #[test]
    fn default_configuration_round_trips_through_toml() {
        let config = LoqaConfig::default();
        let rendered = toml::to_string_pretty(&config).expect("render");
        let parsed: LoqaConfig = toml::from_str(&rendered).expect("parse");
        assert_eq!(parsed, config);
    }
}
