use crate::errors::DashboardError;
use crate::runtime::FileSystem;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub document_path: Option<PathBuf>,
    pub width: Option<u16>,
    pub height: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub document: DocumentConfig,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub path: PathBuf,
    pub max_payload_bytes: usize,
    pub budget_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            document: DocumentConfig { path: None },
            render: RenderConfig {
                width: 120,
                height: 48,
            },
            logging: LoggingConfig {
                enabled: true,
                path: PathBuf::from(".cache/fraud-dashboard/session.jsonl"),
                max_payload_bytes: 4096,
                budget_bytes: 5 * 1024 * 1024,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct PartialAppConfig {
    document: Option<PartialDocumentConfig>,
    render: Option<PartialRenderConfig>,
    logging: Option<PartialLoggingConfig>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct PartialDocumentConfig {
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct PartialRenderConfig {
    width: Option<u16>,
    height: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct PartialLoggingConfig {
    enabled: Option<bool>,
    path: Option<PathBuf>,
    max_payload_bytes: Option<usize>,
    budget_bytes: Option<u64>,
}

pub fn load_config(
    overrides: &CliOverrides,
    process_cwd: &Path,
    fs: &dyn FileSystem,
) -> Result<AppConfig, DashboardError> {
    let mut cfg = AppConfig::default();

    if let Some(path) = &overrides.config_path {
        let file_contents = fs.read_to_string(&absolutize_path(process_cwd, path))?;
        let partial: PartialAppConfig = toml::from_str(&file_contents)
            .map_err(|e| DashboardError::ConfigParse(e.to_string()))?;
        merge_partial_config(&mut cfg, partial);
    }

    apply_cli_overrides(&mut cfg, overrides);

    cfg.document.path = cfg
        .document
        .path
        .as_deref()
        .map(|path| absolutize_path(process_cwd, path));
    cfg.logging.path = absolutize_path(process_cwd, &cfg.logging.path);

    validate_config(&cfg)?;
    Ok(cfg)
}

fn merge_partial_config(cfg: &mut AppConfig, partial: PartialAppConfig) {
    if let Some(document) = partial.document {
        if let Some(path) = document.path {
            cfg.document.path = Some(path);
        }
    }

    if let Some(render) = partial.render {
        if let Some(width) = render.width {
            cfg.render.width = width;
        }
        if let Some(height) = render.height {
            cfg.render.height = height;
        }
    }

    if let Some(logging) = partial.logging {
        if let Some(value) = logging.enabled {
            cfg.logging.enabled = value;
        }
        if let Some(value) = logging.path {
            cfg.logging.path = value;
        }
        if let Some(value) = logging.max_payload_bytes {
            cfg.logging.max_payload_bytes = value;
        }
        if let Some(value) = logging.budget_bytes {
            cfg.logging.budget_bytes = value;
        }
    }
}

fn apply_cli_overrides(cfg: &mut AppConfig, overrides: &CliOverrides) {
    if let Some(path) = &overrides.document_path {
        cfg.document.path = Some(path.clone());
    }
    if let Some(width) = overrides.width {
        cfg.render.width = width;
    }
    if let Some(height) = overrides.height {
        cfg.render.height = height;
    }
}

fn absolutize_path(base: &Path, value: &Path) -> PathBuf {
    if value.is_absolute() {
        value.to_path_buf()
    } else {
        base.join(value)
    }
}

fn validate_config(cfg: &AppConfig) -> Result<(), DashboardError> {
    if cfg.render.width == 0 || cfg.render.height == 0 {
        return Err(DashboardError::InvalidConfig(
            "render.width and render.height must be greater than zero".to_string(),
        ));
    }

    if cfg.logging.enabled {
        if cfg.logging.max_payload_bytes < 16 {
            return Err(DashboardError::InvalidConfig(
                "logging.max_payload_bytes must be at least 16".to_string(),
            ));
        }
        if cfg.logging.budget_bytes == 0 {
            return Err(DashboardError::InvalidConfig(
                "logging.budget_bytes must be greater than zero".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load_config, AppConfig, CliOverrides};
    use crate::errors::DashboardError;
    use crate::runtime::FakeFileSystem;
    use std::path::{Path, PathBuf};

    #[test]
    fn defaults_apply_without_a_config_file() {
        let fs = FakeFileSystem::default();
        let cfg = load_config(&CliOverrides::default(), Path::new("/work"), &fs).expect("config");
        assert_eq!(cfg.render, AppConfig::default().render);
        assert_eq!(cfg.document.path, None);
        assert_eq!(
            cfg.logging.path,
            PathBuf::from("/work/.cache/fraud-dashboard/session.jsonl")
        );
    }

    #[test]
    fn file_values_merge_and_cli_wins() {
        let fs = FakeFileSystem::with_file(
            "/work/dash.toml",
            "[document]\npath = \"results.json\"\n\n[render]\nwidth = 100\nheight = 40\n",
        );
        let overrides = CliOverrides {
            config_path: Some(PathBuf::from("dash.toml")),
            height: Some(60),
            ..CliOverrides::default()
        };
        let cfg = load_config(&overrides, Path::new("/work"), &fs).expect("config");
        assert_eq!(cfg.document.path, Some(PathBuf::from("/work/results.json")));
        assert_eq!(cfg.render.width, 100);
        assert_eq!(cfg.render.height, 60);
        assert!(cfg.logging.enabled);
    }

    #[test]
    fn zero_width_is_rejected() {
        let fs = FakeFileSystem::with_file("/work/dash.toml", "[render]\nwidth = 0\n");
        let overrides = CliOverrides {
            config_path: Some(PathBuf::from("/work/dash.toml")),
            ..CliOverrides::default()
        };
        assert!(matches!(
            load_config(&overrides, Path::new("/work"), &fs),
            Err(DashboardError::InvalidConfig(_))
        ));
    }

    #[test]
    fn unknown_keys_are_a_parse_error() {
        let fs = FakeFileSystem::with_file("/work/dash.toml", "[render]\ncolour = \"blue\"\n");
        let overrides = CliOverrides {
            config_path: Some(PathBuf::from("/work/dash.toml")),
            ..CliOverrides::default()
        };
        assert!(matches!(
            load_config(&overrides, Path::new("/work"), &fs),
            Err(DashboardError::ConfigParse(_))
        ));
    }
}
