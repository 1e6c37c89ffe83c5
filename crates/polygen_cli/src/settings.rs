use std::path::Path;

use eyre::{Context, Result};
use polygen::PolygenConfig;

const DEFAULT_CONFIG_STR: &str = include_str!("../resources/default.yaml");
const CONFIG_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const ENV_PREFIX: &str = "POLYGEN";

/// Values given on the command line, which take precedence over every other
/// source.
#[derive(Debug, Default, Copy, Clone)]
pub(crate) struct ConfigOverrides {
    pub max_iterations: Option<usize>,
    pub allow_fractional: bool,
}

/// Loads configuration from the built-in defaults, then `path` (if any), then
/// `POLYGEN_*` environment variables, then `overrides`.
pub(crate) fn load(path: Option<&Path>, overrides: ConfigOverrides) -> Result<PolygenConfig> {
    let mut builder = config::Config::builder()
        .add_source(config::File::from_str(DEFAULT_CONFIG_STR, CONFIG_FILE_FORMAT));

    if let Some(path) = path {
        log::debug!("loading configuration from {}", path.display());
        builder = builder.add_source(config::File::from(path).format(CONFIG_FILE_FORMAT));
    }

    builder = builder
        .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .set_override_option(
            "max_iterations",
            overrides.max_iterations.map(|n| n as u64),
        )?;
    if overrides.allow_fractional {
        builder = builder.set_override("allow_fractional", true)?;
    }

    builder
        .build()
        .and_then(|c| c.try_deserialize::<PolygenConfig>())
        .wrap_err("error loading configuration")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config_matches_library() {
        let config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG_STR, CONFIG_FILE_FORMAT))
            .build()
            .unwrap()
            .try_deserialize::<PolygenConfig>()
            .unwrap();
        assert_eq!(config, PolygenConfig::default());
    }

    #[test]
    fn test_config_overrides() {
        let overrides = ConfigOverrides {
            max_iterations: Some(500),
            allow_fractional: true,
        };
        let config = load(None, overrides).unwrap();
        assert_eq!(config.max_iterations, 500);
        assert!(config.allow_fractional);
        assert_eq!(config.max_ndim, PolygenConfig::DEFAULT.max_ndim);
    }

    #[test]
    fn test_missing_config_file() {
        let path = Path::new("this/file/does/not/exist.yaml");
        assert!(load(Some(path), ConfigOverrides::default()).is_err());
    }
}
