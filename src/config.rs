use crate::error::{CropYieldError, Result};
use crate::logic::InputField;
use crate::models::{Crop, Month};
use dialoguer::{Input, Select};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub prediction: PredictionConfig,
    #[serde(default)]
    pub form: FormConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PredictionConfig {
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000/predict".into(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FormConfig {
    #[serde(default = "default_crop")]
    pub default_crop: String,
    /// Falls back to the current month when unset.
    #[serde(default)]
    pub default_month: Option<String>,
    /// Values to pre-fill, keyed by field name (e.g. `nitrogen: 70`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub prefill: BTreeMap<String, f64>,
}

fn default_crop() -> String {
    "cassava".into()
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_crop: default_crop(),
            default_month: None,
            prefill: BTreeMap::new(),
        }
    }
}

impl FormConfig {
    pub fn initial_crop(&self) -> Crop {
        Crop::from_str(&self.default_crop).unwrap_or_else(|| {
            tracing::warn!(
                "Unknown default crop '{}' in config, using {}",
                self.default_crop,
                Crop::default()
            );
            Crop::default()
        })
    }

    pub fn initial_month(&self) -> Month {
        match self.default_month.as_deref() {
            Some(m) => Month::from_str(m).unwrap_or_else(|| {
                tracing::warn!("Unknown default month '{}' in config, using current month", m);
                Month::current()
            }),
            None => Month::current(),
        }
    }

    /// Pre-fill values for known fields. Unknown names are skipped.
    pub fn prefill_values(&self) -> Vec<(InputField, String)> {
        self.prefill
            .iter()
            .filter_map(|(name, value)| match InputField::from_name(name) {
                Some(field) => Some((field, value.to_string())),
                None => {
                    tracing::warn!("Ignoring prefill for unknown field '{}'", name);
                    None
                }
            })
            .collect()
    }
}

impl Config {
    /// Load from `config_override`, or from the first config file found in
    /// the standard locations. Defaults are used when no file exists.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(CropYieldError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p
            }
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            tracing::warn!(
                "No config file at {:?}; using defaults. Run `cropyield init` to create one.",
                config_path
            );
            return Ok(Self::default());
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| CropYieldError::Config(format!("Failed to read config: {}", e)))?;

        Self::parse(&config_str)
    }

    /// Parse YAML content after substituting `${VAR}` placeholders.
    pub fn parse(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| CropYieldError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        reqwest::Url::parse(&self.prediction.endpoint).map_err(|e| {
            CropYieldError::Config(format!(
                "invalid prediction endpoint '{}': {}",
                self.prediction.endpoint, e
            ))
        })?;

        if self.prediction.timeout_secs == 0 {
            return Err(CropYieldError::Config(
                "prediction.timeout_secs must be greater than zero".into(),
            ));
        }

        Ok(())
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        Self::default_config_path()
    }

    /// Default path for writing new config files (~/.config/cropyield/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CropYieldError::Config("Cannot determine config directory".into()))?
            .join("cropyield");
        Ok(config_dir.join("config.yaml"))
    }

    /// Log file used while the TUI owns the terminal.
    pub fn log_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| CropYieldError::Config("Cannot determine data directory".into()))?
            .join("cropyield");
        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir.join("cropyield.log"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the new Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up cropyield!");
        println!();

        println!("Prediction Service");
        let endpoint: String = Input::new()
            .with_prompt("  Endpoint URL")
            .default(PredictionConfig::default().endpoint)
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                reqwest::Url::parse(input)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .interact_text()
            .map_err(|e| CropYieldError::Config(format!("Input error: {}", e)))?;

        let timeout_secs: u64 = Input::new()
            .with_prompt("  Request timeout (seconds)")
            .default(default_timeout_secs())
            .interact_text()
            .map_err(|e| CropYieldError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Form Defaults");
        let crop_names: Vec<&str> = Crop::all().iter().map(|c| c.as_str()).collect();
        let crop_index = Select::new()
            .with_prompt("  Default crop")
            .items(&crop_names)
            .default(0)
            .interact()
            .map_err(|e| CropYieldError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            prediction: PredictionConfig {
                endpoint,
                timeout_secs: timeout_secs.max(1),
            },
            form: FormConfig {
                default_crop: Crop::all()[crop_index].id().to_string(),
                default_month: None,
                prefill: BTreeMap::new(),
            },
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| CropYieldError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# cropyield Configuration\n# Generated by `cropyield init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = match regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
            Ok(re) => re,
            Err(_) => return result,
        };

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClimateField, SoilField};

    #[test]
    fn parse_full_config() {
        let config = Config::parse(
            "prediction:\n  endpoint: http://models.local:9000/predict\n  timeout_secs: 5\nform:\n  default_crop: cocoa\n  default_month: Jun\n",
        )
        .unwrap();
        assert_eq!(config.prediction.endpoint, "http://models.local:9000/predict");
        assert_eq!(config.prediction.timeout_secs, 5);
        assert_eq!(config.form.initial_crop(), Crop::Cocoa);
        assert_eq!(config.form.initial_month(), Month::Jun);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = Config::parse("prediction:\n  endpoint: http://localhost:8000/predict\n")
            .unwrap();
        assert_eq!(config.prediction.timeout_secs, 30);
        assert_eq!(config.form.initial_crop(), Crop::Cassava);
        assert!(config.form.default_month.is_none());
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let err = Config::parse("prediction:\n  endpoint: not a url\n").unwrap_err();
        assert!(matches!(err, CropYieldError::Config(_)));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Config::parse(
            "prediction:\n  endpoint: http://localhost:8000/predict\n  timeout_secs: 0\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn env_vars_are_substituted() {
        std::env::set_var("CROPYIELD_TEST_HOST", "predictor.internal");
        let config = Config::parse(
            "prediction:\n  endpoint: http://${CROPYIELD_TEST_HOST}:8000/predict\n",
        )
        .unwrap();
        assert_eq!(
            config.prediction.endpoint,
            "http://predictor.internal:8000/predict"
        );
    }

    #[test]
    fn prefill_maps_names_to_fields() {
        let config = Config::parse(
            "prediction:\n  endpoint: http://localhost:8000/predict\nform:\n  prefill:\n    nitrogen: 70\n    rainfall: 120.5\n    calcium: 3\n",
        )
        .unwrap();
        let values = config.form.prefill_values();
        assert_eq!(values.len(), 2);
        assert!(values.contains(&(InputField::Soil(SoilField::Nitrogen), "70".to_string())));
        assert!(values.contains(&(
            InputField::Climate(ClimateField::Rainfall),
            "120.5".to_string()
        )));
    }

    #[test]
    fn unknown_defaults_fall_back() {
        let form = FormConfig {
            default_crop: "maize".into(),
            default_month: Some("Smarch".into()),
            prefill: BTreeMap::new(),
        };
        assert_eq!(form.initial_crop(), Crop::Cassava);
        assert_eq!(form.initial_month(), Month::current());
    }
}
