use crate::domain::GeoLocation;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SHEETS_URL: &str = "https://sheets.googleapis.com";
pub const DEFAULT_SCOPES: [&str; 2] = ["https://spreadsheets.google.com/feeds", "https://www.googleapis.com/auth/drive"];
pub const DEFAULT_EXPORT_FILE_NAME: &str = "distances.csv";

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    server: Server,
    google: Google,
    reference: Reference,
    export: Export,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(
            Config::builder()
                .add_source(config::File::with_name("config").required(true))
                .add_source(config::File::with_name("config_local").required(false))
                .add_source(config::Environment::with_prefix("SHEET_DISTANCE").separator("__")),
        )
    }

    fn load_from(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder
            .set_default("google.sheets_url", DEFAULT_SHEETS_URL)?
            .set_default("google.scopes", DEFAULT_SCOPES.to_vec())?
            .set_default("export.file_name", DEFAULT_EXPORT_FILE_NAME)?
            .build()?
            .try_deserialize()
    }

    pub fn server(&self) -> &Server {
        &self.server
    }

    pub fn google(&self) -> &Google {
        &self.google
    }

    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    pub fn export(&self) -> &Export {
        &self.export
    }
}

#[derive(Debug, Deserialize)]
pub struct Server {
    address: SocketAddr,
}

impl Server {
    pub fn address(&self) -> SocketAddr {
        self.address
    }
}

#[derive(Debug, Deserialize)]
pub struct Google {
    credentials_file: PathBuf,
    sheets_url: String,
    scopes: Vec<String>,
    #[serde(default, with = "humantime_serde")]
    request_timeout: Option<Duration>,
}

impl Google {
    pub fn credentials_file(&self) -> &Path {
        &self.credentials_file
    }

    pub fn sheets_url(&self) -> &str {
        self.sheets_url.trim_end_matches('/')
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}

/// The reference point the page form starts out with.
#[derive(Debug, Deserialize)]
pub struct Reference {
    city: String,
    location: GeoLocation,
}

impl Reference {
    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn location(&self) -> &GeoLocation {
        &self.location
    }
}

#[derive(Debug, Deserialize)]
pub struct Export {
    file_name: String,
}

impl Export {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                server: Server {
                    address: SocketAddr::from(([127, 0, 0, 1], 8080)),
                },
                google: Google {
                    credentials_file: PathBuf::from("credentials.json"),
                    sheets_url: "https://sheets.url".to_string(),
                    scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
                    request_timeout: None,
                },
                reference: Reference {
                    city: "Atlanta".to_string(),
                    location: GeoLocation::new(33.7490, -84.3880),
                },
                export: Export {
                    file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
                },
            },
        }
    }

    pub fn sheets_url(mut self, url: String) -> Self {
        self.config.google.sheets_url = url;
        self
    }

    pub fn credentials_file(mut self, path: PathBuf) -> Self {
        self.config.google.credentials_file = path;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};
    use pretty_assertions::assert_eq;

    const MINIMAL: &str = r#"
        [server]
        address = "0.0.0.0:3000"

        [google]
        credentials_file = "secrets/service_account.json"

        [reference]
        city = "Atlanta"
        location = { latitude = 33.7490, longitude = -84.3880 }
    "#;

    fn load(toml: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::load_from(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn load_applies_defaults() -> Result<(), ConfigError> {
        let config = load(MINIMAL)?;

        assert_eq!(config.server().address(), SocketAddr::from(([0, 0, 0, 0], 3000)));
        assert_eq!(config.google().credentials_file(), Path::new("secrets/service_account.json"));
        assert_eq!(config.google().sheets_url(), DEFAULT_SHEETS_URL);
        assert_eq!(config.google().scopes(), DEFAULT_SCOPES);
        assert_eq!(config.google().request_timeout(), None);
        assert_eq!(config.export().file_name(), "distances.csv");
        assert_eq!(config.reference().city(), "Atlanta");
        assert_eq!(config.reference().location(), &GeoLocation::new(33.7490, -84.3880));

        Ok(())
    }

    #[test]
    fn load_reads_optional_settings() -> Result<(), ConfigError> {
        let toml = format!(
            "{}\n{}",
            MINIMAL.replace("[google]", "[google]\nrequest_timeout = \"15s\"\nsheets_url = \"http://localhost:9000/\""),
            "[export]\nfile_name = \"report.csv\""
        );
        let config = load(&toml)?;

        assert_eq!(config.google().request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.google().sheets_url(), "http://localhost:9000");
        assert_eq!(config.export().file_name(), "report.csv");

        Ok(())
    }

    #[test]
    fn load_rejects_an_out_of_range_reference_location() {
        let toml = MINIMAL.replace("latitude = 33.7490", "latitude = 133.7490");

        let error = load(&toml).unwrap_err();

        assert!(error.to_string().contains("invalid location latitude"), "unexpected error: {}", error);
    }

    #[test]
    fn load_requires_the_credentials_file() {
        let toml = MINIMAL.replace("credentials_file = \"secrets/service_account.json\"", "");

        assert!(load(&toml).is_err());
    }
}
