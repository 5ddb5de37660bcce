use std::collections::HashMap;
use std::sync::LazyLock;

use cql_error::{Result, internal};
use serde::{Deserialize, Serialize};

/// Configuration for statement analysis.
///
/// Supplied to each session context at construction, there's no process-wide
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Perform permission checks during analysis. Implies role management.
    pub use_authentication: bool,
    /// Allow role management statements without permission checks.
    pub enable_role_management: bool,
}

impl AnalyzerConfig {
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| internal!("Failed to parse analyzer config: {e}"))
    }

    pub fn authorization_enabled(&self) -> bool {
        self.use_authentication
    }

    pub fn role_management_enabled(&self) -> bool {
        self.use_authentication || self.enable_role_management
    }

    pub fn set_by_name(&mut self, name: &str, value: &str) -> Result<()> {
        let func = SETTINGS
            .get(name)
            .ok_or_else(|| internal!("Missing setting for '{name}'"))?;

        (func.set)(value, self)
    }

    pub fn get_by_name(&self, name: &str) -> Result<String> {
        let func = SETTINGS
            .get(name)
            .ok_or_else(|| internal!("Missing setting for '{name}'"))?;

        Ok((func.get)(self))
    }

    pub fn reset(&mut self, name: &str) -> Result<()> {
        let def_conf = Self::default();
        let func = SETTINGS
            .get(name)
            .ok_or_else(|| internal!("Missing setting for '{name}'"))?;

        let value = (func.get)(&def_conf);
        (func.set)(&value, self)
    }

    /// Names and descriptions of all settings, sorted by name.
    pub fn settings() -> Vec<(&'static str, &'static str)> {
        let mut settings: Vec<_> = SETTINGS
            .iter()
            .map(|(name, func)| (*name, func.description))
            .collect();
        settings.sort_unstable();
        settings
    }
}

struct SettingFunctions {
    description: &'static str,
    set: fn(value: &str, conf: &mut AnalyzerConfig) -> Result<()>,
    get: fn(conf: &AnalyzerConfig) -> String,
}

impl SettingFunctions {
    const fn new<S: ConfigSetting>() -> Self {
        SettingFunctions {
            description: S::DESCRIPTION,
            set: S::set_from_str as _,
            get: S::get_as_string as _,
        }
    }
}

fn insert_setting<S: ConfigSetting>(map: &mut HashMap<&'static str, SettingFunctions>) {
    if map.insert(S::NAME, SettingFunctions::new::<S>()).is_some() {
        panic!("Duplicate settings names: {}", S::NAME);
    }
}

static SETTINGS: LazyLock<HashMap<&'static str, SettingFunctions>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    insert_setting::<UseAuthentication>(&mut map);
    insert_setting::<EnableRoleManagement>(&mut map);

    map
});

pub trait ConfigSetting: Sync + Send + 'static {
    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    fn set_from_str(value: &str, conf: &mut AnalyzerConfig) -> Result<()>;
    fn get_as_string(conf: &AnalyzerConfig) -> String;
}

pub struct UseAuthentication;

impl ConfigSetting for UseAuthentication {
    const NAME: &'static str = "use_authentication";
    const DESCRIPTION: &'static str = "Check permissions before executing statements";

    fn set_from_str(value: &str, conf: &mut AnalyzerConfig) -> Result<()> {
        conf.use_authentication = parse_bool(Self::NAME, value)?;
        Ok(())
    }

    fn get_as_string(conf: &AnalyzerConfig) -> String {
        conf.use_authentication.to_string()
    }
}

pub struct EnableRoleManagement;

impl ConfigSetting for EnableRoleManagement {
    const NAME: &'static str = "enable_role_management";
    const DESCRIPTION: &'static str = "Allow CREATE/ALTER/DROP ROLE statements";

    fn set_from_str(value: &str, conf: &mut AnalyzerConfig) -> Result<()> {
        conf.enable_role_management = parse_bool(Self::NAME, value)?;
        Ok(())
    }

    fn get_as_string(conf: &AnalyzerConfig) -> String {
        conf.enable_role_management.to_string()
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "1" => Ok(true),
        "false" | "off" | "0" => Ok(false),
        _ => Err(internal!("Invalid value for '{name}': '{value}'")),
    }
}
