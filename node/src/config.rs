use std::path::Path;

use eyre::{Result, WrapErr};
use serde::Deserialize;
use withdrawer_payload_builder::PayloadBuilderConfig;
use withdrawer_prover::ProverConfig;

/// Contents of the `--config` file. Every section is optional.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub payload_builder: PayloadBuilderConfig,
    pub prover: ProverConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .wrap_err_with(|| format!("Failed to parse config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_sections() {
        let cfg: Config = serde_json::from_str(
            r#"{
                "payload_builder": {"l1_standard_bridge": "0x0000000000000000000000000000000000000001"},
                "prover": {"rpc_timeout": 5}
            }"#,
        )
        .unwrap();
        assert_eq!(
            cfg.payload_builder.l1_standard_bridge.to_string(),
            "0x0000000000000000000000000000000000000001"
        );
        assert_eq!(cfg.prover.rpc_timeout, Duration::from_secs(5));
        assert_eq!(
            cfg.prover,
            ProverConfig {
                rpc_timeout: Duration::from_secs(5),
                ..Default::default()
            }
        );

        assert_eq!(serde_json::from_str::<Config>("{}").unwrap(), Config::default());
        assert!(serde_json::from_str::<Config>(r#"{"engine": {}}"#).is_err());
    }
}
