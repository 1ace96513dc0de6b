//! Registry configuration, read from the process environment.

use core::str::FromStr;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use superstore_core::UserId;

pub const ENV_SUPER_USER_ID: &str = "SUPERSTORE_SUPER_USER_ID";
pub const ENV_SUPER_USERNAME: &str = "SUPERSTORE_SUPER_USERNAME";
pub const ENV_INVENTORY_FLOOR: &str = "SUPERSTORE_INVENTORY_FLOOR";

/// What a recorded inventory-out does when it would drive stock below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InventoryFloor {
    /// Stop at zero.
    #[default]
    Clamp,
    /// Keep the negative level.
    AllowNegative,
}

impl FromStr for InventoryFloor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clamp" => Ok(Self::Clamp),
            "allow-negative" => Ok(Self::AllowNegative),
            other => bail!("unknown inventory floor policy '{other}' (expected 'clamp' or 'allow-negative')"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Id of the built-in super user registered at startup.
    pub super_user_id: UserId,
    pub super_username: String,
    pub inventory_floor: InventoryFloor,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            super_user_id: UserId::new("SU001"),
            super_username: "superadmin".to_string(),
            inventory_floor: InventoryFloor::default(),
        }
    }
}

impl RegistryConfig {
    /// Load from `SUPERSTORE_*` environment variables, falling back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (environment, test fixtures).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let super_user_id = match lookup(ENV_SUPER_USER_ID) {
            Some(raw) => raw
                .parse::<UserId>()
                .with_context(|| format!("invalid {ENV_SUPER_USER_ID}"))?,
            None => defaults.super_user_id,
        };

        let super_username = match lookup(ENV_SUPER_USERNAME) {
            Some(raw) if !raw.trim().is_empty() => raw.trim().to_string(),
            Some(_) => bail!("{ENV_SUPER_USERNAME} cannot be blank"),
            None => {
                tracing::warn!("{ENV_SUPER_USERNAME} not set; using default super user name");
                defaults.super_username
            }
        };

        let inventory_floor = match lookup(ENV_INVENTORY_FLOOR) {
            Some(raw) => raw
                .parse::<InventoryFloor>()
                .with_context(|| format!("invalid {ENV_INVENTORY_FLOOR}"))?,
            None => defaults.inventory_floor,
        };

        Ok(Self {
            super_user_id,
            super_username,
            inventory_floor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = RegistryConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, RegistryConfig::default());
        assert_eq!(config.inventory_floor, InventoryFloor::Clamp);
    }

    #[test]
    fn reads_all_variables() {
        let config = RegistryConfig::from_lookup(lookup_from(&[
            (ENV_SUPER_USER_ID, "ROOT"),
            (ENV_SUPER_USERNAME, " owner "),
            (ENV_INVENTORY_FLOOR, "Allow-Negative"),
        ]))
        .unwrap();

        assert_eq!(config.super_user_id.as_str(), "ROOT");
        assert_eq!(config.super_username, "owner");
        assert_eq!(config.inventory_floor, InventoryFloor::AllowNegative);
    }

    #[test]
    fn rejects_unknown_floor_policy() {
        let err = RegistryConfig::from_lookup(lookup_from(&[(ENV_INVENTORY_FLOOR, "sometimes")]))
            .unwrap_err();
        let rendered = format!("{err:#}");
        assert!(rendered.contains(ENV_INVENTORY_FLOOR));
        assert!(rendered.contains("sometimes"));
    }

    #[test]
    fn rejects_blank_identity_values() {
        assert!(RegistryConfig::from_lookup(lookup_from(&[(ENV_SUPER_USER_ID, "  ")])).is_err());
        assert!(RegistryConfig::from_lookup(lookup_from(&[(ENV_SUPER_USERNAME, "")])).is_err());
    }
}
