use std::path::Path;

use crate::errors::VulnpulseError;

use super::types::VulnpulseConfig;

pub async fn parse_config(path: &Path) -> Result<VulnpulseConfig, VulnpulseError> {
    if !path.exists() {
        return Err(VulnpulseError::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(VulnpulseError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config: VulnpulseConfig = serde_yaml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

/// Semantic checks the type system can't express.
fn validate(config: &VulnpulseConfig) -> Result<(), VulnpulseError> {
    if let Some(scope) = config.scope {
        if scope == 0 {
            return Err(VulnpulseError::Config(
                "scope must be at least 1 week".into(),
            ));
        }
    }

    if let Some(cost) = &config.cost {
        let constants = [
            ("hourly_cost", cost.hourly_cost),
            ("discovery_hours", cost.discovery_hours),
            ("manual_fix_hours", cost.manual_fix_hours),
            ("manual_waive_hours", cost.manual_waive_hours),
            ("automated_fix_hours", cost.automated_fix_hours),
            ("automated_waive_hours", cost.automated_waive_hours),
        ];
        for (name, value) in constants {
            if !value.is_finite() || value < 0.0 {
                return Err(VulnpulseError::Config(format!(
                    "cost constant {} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CostConfig;

    #[test]
    fn test_validate_rejects_zero_scope() {
        let config = VulnpulseConfig {
            scope: Some(0),
            ..Default::default()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_negative_constant() {
        let config = VulnpulseConfig {
            cost: Some(CostConfig {
                manual_fix_hours: -1.0,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        let config = VulnpulseConfig {
            scope: Some(6),
            cost: Some(CostConfig::default()),
        };
        assert!(validate(&config).is_ok());
    }

    #[tokio::test]
    async fn test_parse_config_missing_file() {
        let err = parse_config(Path::new("/nonexistent/vulnpulse.yml"))
            .await
            .unwrap_err();
        assert!(matches!(err, VulnpulseError::Config(_)));
    }

    #[tokio::test]
    async fn test_parse_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        tokio::fs::write(&path, "scope: 12\ncost:\n  hourly_cost: 80\n")
            .await
            .unwrap();
        let config = parse_config(&path).await.unwrap();
        assert_eq!(config.scope, Some(12));
        assert_eq!(config.cost.unwrap().hourly_cost, 80.0);
    }
}
