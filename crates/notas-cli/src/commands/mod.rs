//! CLI commands.

pub mod batch;
pub mod config;
pub mod process;
pub mod sources;

use std::path::Path;

use notas_core::{IcmsPolicy, KindSelection, NotasConfig, OutputMode};

/// Load the configuration given with `--config`, else the user's config
/// file when it exists, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<NotasConfig> {
    if let Some(path) = config_path {
        return Ok(NotasConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        Ok(NotasConfig::from_file(&default_path)?)
    } else {
        Ok(NotasConfig::default())
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ModeArg {
    /// One row per line item
    Item,
    /// One row per CFOP of each document
    Group,
}

impl From<ModeArg> for OutputMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Item => OutputMode::Item,
            ModeArg::Group => OutputMode::Group,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum KindArg {
    /// Detect NFe or CTe per document
    Auto,
    Nfe,
    Cte,
}

impl From<KindArg> for KindSelection {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Auto => KindSelection::Auto,
            KindArg::Nfe => KindSelection::Nfe,
            KindArg::Cte => KindSelection::Cte,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum PolicyArg {
    /// Later non-zero ICMS figures replace earlier ones
    Overwrite,
    /// ICMS figures of every sub-structure are added
    Sum,
}

impl From<PolicyArg> for IcmsPolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::Overwrite => IcmsPolicy::OverwriteIfNonzero,
            PolicyArg::Sum => IcmsPolicy::Sum,
        }
    }
}
