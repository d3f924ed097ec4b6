use anyhow::Context;
use loqa_config::LoqaConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RestoreArgs;
use crate::commands::tables::display;
use crate::output::output;

#[derive(Debug, Serialize)]
struct Restored {
    table: String,
    backup: String,
}

pub fn handle(args: &RestoreArgs, config: &LoqaConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut restored = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let backup = loqa_store::restore_backup(path, &config.fix.backup_suffix)
            .with_context(|| format!("failed to restore {}", path.display()))?;
        restored.push(Restored {
            table: display(path),
            backup: display(&backup),
        });
    }
    output(&restored, flags.format)
}
