// FILE: src/cli/config.rs

use crate::context::{Capabilities, ParseContext};
use crate::error::{Result, TileError};
use crate::presentation::TileDefaults;
use crate::types::{NotificationType, TileSize};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub notification_type: Option<String>,
    pub default_size: Option<String>,
    pub deny_warnings: Option<bool>,
    pub display_name: Option<String>,
    pub show_name_on_medium: Option<bool>,
    pub show_name_on_wide: Option<bool>,
    pub show_name_on_large: Option<bool>,
    /// element tag -> enum key -> accepted values
    pub capabilities: Option<HashMap<String, HashMap<String, Vec<String>>>>,
    #[serde(skip)]
    pub source: String,
}

impl ConfigFile {
    /// Context for parsing, with `notification_type` overriding the file's choice.
    pub fn parse_context(&self, notification_type: Option<NotificationType>) -> Result<ParseContext> {
        let notification_type = match notification_type {
            Some(kind) => kind,
            None => match &self.notification_type {
                Some(name) => name
                    .parse()
                    .map_err(|e: TileError| TileError::config(&self.source, e.to_string()))?,
                None => NotificationType::default(),
            },
        };

        let capabilities = match &self.capabilities {
            Some(table) => Capabilities::from_table(table, &self.source)?,
            None => Capabilities::new(),
        };

        Ok(ParseContext {
            notification_type,
            capabilities,
        })
    }

    pub fn default_size(&self) -> Result<TileSize> {
        match &self.default_size {
            Some(name) => name
                .parse()
                .map_err(|e: TileError| TileError::config(&self.source, e.to_string())),
            None => Ok(TileSize::default()),
        }
    }

    pub fn tile_defaults(&self) -> TileDefaults {
        let base = TileDefaults::default();
        TileDefaults {
            display_name: self.display_name.clone().unwrap_or_default(),
            show_name_on_medium: self.show_name_on_medium.unwrap_or(base.show_name_on_medium),
            show_name_on_wide: self.show_name_on_wide.unwrap_or(base.show_name_on_wide),
            show_name_on_large: self.show_name_on_large.unwrap_or(base.show_name_on_large),
        }
    }
}

pub fn load(config_path: &str) -> Result<ConfigFile> {
    let config_content = fs::read_to_string(config_path).map_err(|e| TileError::FileNotFound {
        path: format!("Config file {}: {}", config_path, e),
    })?;

    let mut config: ConfigFile = if config_path.ends_with(".json") {
        serde_json::from_str(&config_content)
            .map_err(|e| TileError::config(config_path, format!("Invalid JSON config: {}", e)))?
    } else if config_path.ends_with(".toml") {
        toml::from_str(&config_content)
            .map_err(|e| TileError::config(config_path, format!("Invalid TOML config: {}", e)))?
    } else {
        return Err(TileError::config(
            config_path,
            "Config file must be .json or .toml format",
        ));
    };

    config.source = config_path.to_string();
    log::info!("Loaded configuration from {}", config_path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ElementKind, EnumKind};
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_load_toml() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "tilec.toml",
            r#"
notification_type = "tile"
default_size = "wide"
deny_warnings = true
display_name = "Mail"

[capabilities.text]
text-placement = ["Inline", "attribution"]
"#,
        );

        let config = load(&path).unwrap();
        assert_eq!(config.deny_warnings, Some(true));
        assert_eq!(config.default_size().unwrap(), TileSize::Wide);
        assert_eq!(config.tile_defaults().display_name, "Mail");

        let context = config.parse_context(None).unwrap();
        assert_eq!(context.notification_type, NotificationType::Tile);
        let names = context
            .capabilities
            .supported_names(ElementKind::Text, EnumKind::TextPlacement)
            .unwrap();
        assert_eq!(names, ["inline".to_string(), "attribution".to_string()]);
    }

    #[test]
    fn test_load_json_and_override_type() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "tilec.json", r#"{ "notification_type": "tile" }"#);

        let config = load(&path).unwrap();
        let context = config.parse_context(Some(NotificationType::Toast)).unwrap();
        assert_eq!(context.notification_type, NotificationType::Toast);
    }

    #[test]
    fn test_bad_values_are_config_errors() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "bad.toml",
            r#"
default_size = "huge"

[capabilities.text]
text-placement = ["sideways"]
"#,
        );

        let config = load(&path).unwrap();
        assert!(matches!(config.default_size(), Err(TileError::Config { .. })));
        assert!(matches!(config.parse_context(None), Err(TileError::Config { .. })));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "tilec.yaml", "deny_warnings: true");
        assert!(load(&path).is_err());
    }
}
