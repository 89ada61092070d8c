// Path: crates/agora-node/src/config.rs
//! Node-level configuration: a thin TOML wrapper around [`ConsensusParams`]
//! plus the on-disk store path. Networking, RPC, and peer discovery are out
//! of scope for this binary; it exists to give the engine a real storage
//! backend to run against.

use agora_types::ConsensusParams;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level node configuration, loaded from the file named by `--config`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Where the `redb` validator-set database lives on disk.
    pub data_dir: PathBuf,
    /// Chain-wide enrollment parameters.
    pub consensus: ConsensusParams,
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            data_dir: PathBuf::from("./agora-data"),
            consensus: ConsensusParams::default(),
        }
    }
}

impl NodeConfig {
    /// Loads configuration from `path`, falling back to [`NodeConfig::default`]
    /// when `path` is `None`.
    pub fn load(path: Option<&std::path::Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .map_err(|e| anyhow::anyhow!("reading config file {path:?}: {e}"))?;
                let config: NodeConfig = toml::from_str(&raw)
                    .map_err(|e| anyhow::anyhow!("parsing config file {path:?}: {e}"))?;
                Ok(config)
            }
            None => Ok(NodeConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_a_production_like_cycle() {
        let config = NodeConfig::default();
        assert_eq!(config.consensus.validator_cycle, 1008);
    }

    #[test]
    fn partial_toml_overrides_only_the_named_fields() {
        let config: NodeConfig = toml::from_str(
            "data_dir = \"/tmp/agora\"\n[consensus]\nvalidator_cycle = 20\n",
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/agora"));
        assert_eq!(config.consensus.validator_cycle, 20);
    }
}
