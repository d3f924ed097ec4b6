use anyhow::Context;
use loqa_config::LoqaConfig;
use loqa_core::ColumnSpec;
use loqa_engine::{Engine, EngineOptions};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TargetArgs;

pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<LoqaConfig> {
    LoqaConfig::load_with_dotenv(flags.config.as_deref()).context("failed to load configuration")
}

/// Column names for a run: CLI overrides over configured defaults.
#[must_use]
pub fn column_spec(config: &LoqaConfig, target: &TargetArgs) -> ColumnSpec {
    ColumnSpec {
        target: target.lang.clone(),
        source: target
            .source
            .clone()
            .unwrap_or_else(|| config.columns.source.clone()),
        context_key: Some(
            target
                .lang_key
                .clone()
                .unwrap_or_else(|| config.columns.context_key.clone()),
        ),
        row_id: config.columns.row_id.clone(),
    }
}

/// Resolve and load the terminology for the target column, then assemble
/// the engine. A missing document leaves terminology checks inert.
#[must_use]
pub fn build_engine(config: &LoqaConfig, target: &TargetArgs) -> Engine {
    let document = config
        .terminology
        .resolve(&target.lang, target.terms.as_deref());
    let terminology = loqa_terms::load_or_empty(document.as_deref());

    Engine::new(terminology)
        .with_catalog(config.tables.clone())
        .with_options(EngineOptions {
            max_source_chars: config.terminology.max_source_chars,
        })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn target(source: Option<&str>) -> TargetArgs {
        TargetArgs {
            lang: "越语".into(),
            source: source.map(ToString::to_string),
            lang_key: None,
            terms: None,
            files: vec![PathBuf::from("app.csv")],
        }
    }

    #[test]
    fn columns_fall_back_to_configuration() {
        let config = LoqaConfig::default();
        let spec = column_spec(&config, &target(None));
        assert_eq!(spec.target, "越语");
        assert_eq!(spec.source, "简体中文");
        assert_eq!(spec.context_key.as_deref(), Some("语言标识"));
        assert_eq!(spec.row_id, "编号ID");
    }

    #[test]
    fn cli_columns_override_configuration() {
        let spec = column_spec(&LoqaConfig::default(), &target(Some("中文")));
        assert_eq!(spec.source, "中文");
    }

    #[test]
    fn engine_without_terminology_is_usable() {
        let engine = build_engine(&LoqaConfig::default(), &target(None));
        assert!(engine.terminology().is_empty());
        assert_eq!(engine.catalog(), &LoqaConfig::default().tables);
    }
}
