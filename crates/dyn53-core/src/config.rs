//! Configuration for dyn53
//!
//! Configuration comes from a Java-style properties file (`dyn53.props` by
//! default). Three keys are required:
//!
//! ```text
//! hostname=home.example.com
//! aws.access.key=AKIA...
//! aws.access.secret=...
//! ```
//!
//! Optional keys: `aws.region`, `ip.service.url`, `ip.service.format`.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Default properties file name, relative to the working directory
pub const DEFAULT_PROPERTIES_FILE: &str = "dyn53.props";

/// Default external address service
pub const DEFAULT_IP_SERVICE_URL: &str = "https://api.ipify.org";

/// Route 53 is a global service; the SDK still wants a region for signing
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

pub const KEY_HOSTNAME: &str = "hostname";
pub const KEY_ACCESS_KEY: &str = "aws.access.key";
pub const KEY_ACCESS_SECRET: &str = "aws.access.secret";
pub const KEY_REGION: &str = "aws.region";
pub const KEY_IP_SERVICE_URL: &str = "ip.service.url";
pub const KEY_IP_SERVICE_FORMAT: &str = "ip.service.format";

/// Main dyn53 configuration
///
/// The `Debug` implementation never prints the access secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Dyn53Config {
    /// Fully-qualified name whose A record is kept up to date
    pub hostname: String,

    /// AWS credentials for an identity allowed to use Route 53
    pub aws: AwsCredentialsConfig,

    /// AWS region used for request signing
    pub region: String,

    /// Where the externally visible address is fetched from
    pub ip_service: IpServiceConfig,
}

/// AWS access key pair
#[derive(Clone, PartialEq, Eq)]
pub struct AwsCredentialsConfig {
    pub access_key: String,
    /// ⚠️ NEVER log this value
    pub access_secret: String,
}

/// External address service settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpServiceConfig {
    /// URL to fetch the address from
    pub url: String,
    /// Shape of the response body
    pub format: IpServiceFormat,
}

impl Default for IpServiceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_IP_SERVICE_URL.to_string(),
            format: IpServiceFormat::Text,
        }
    }
}

/// Response body format of the external address service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IpServiceFormat {
    /// The body is the bare address (`203.0.113.7`)
    #[default]
    Text,
    /// The body is `{"ip":"203.0.113.7"}`
    Json,
}

impl std::str::FromStr for IpServiceFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(Error::config(format!(
                "Unsupported {KEY_IP_SERVICE_FORMAT} '{other}'. Supported formats: text, json"
            ))),
        }
    }
}

impl fmt::Debug for AwsCredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentialsConfig")
            .field("access_key", &self.access_key)
            .field("access_secret", &"<REDACTED>")
            .finish()
    }
}

impl fmt::Debug for Dyn53Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dyn53Config")
            .field("hostname", &self.hostname)
            .field("aws", &self.aws)
            .field("region", &self.region)
            .field("ip_service", &self.ip_service)
            .finish()
    }
}

impl Dyn53Config {
    /// Load and validate configuration from a properties file
    ///
    /// # Errors
    ///
    /// - the file does not exist
    /// - the file cannot be parsed as a properties file
    /// - a required property is missing or blank
    /// - an optional property has an unusable value
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = path.display().to_string();

        if !path.is_file() {
            return Err(Error::config(format!(
                "Property file {source} is required and was not found."
            )));
        }

        let file = File::open(path)
            .map_err(|e| Error::config(format!("Unable to read property file {source}: {e}")))?;
        let props = java_properties::read(BufReader::new(file))
            .map_err(|e| Error::config(format!("Unable to parse property file {source}: {e}")))?;

        tracing::debug!("Loaded {} properties from {}", props.len(), source);
        Self::from_properties(&props, &source)
    }

    /// Build configuration from already-parsed properties
    ///
    /// `source` names where the properties came from and is used in error messages.
    pub fn from_properties(props: &HashMap<String, String>, source: &str) -> Result<Self> {
        let hostname = required(props, KEY_HOSTNAME, source)?;
        let access_key = required(props, KEY_ACCESS_KEY, source)?;
        let access_secret = required(props, KEY_ACCESS_SECRET, source)?;

        let region =
            optional(props, KEY_REGION).unwrap_or_else(|| DEFAULT_AWS_REGION.to_string());

        let mut ip_service = IpServiceConfig::default();
        if let Some(url) = optional(props, KEY_IP_SERVICE_URL) {
            ip_service.url = url;
        }
        if let Some(format) = optional(props, KEY_IP_SERVICE_FORMAT) {
            ip_service.format = format.parse()?;
        }

        let config = Self {
            hostname,
            aws: AwsCredentialsConfig {
                access_key,
                access_secret,
            },
            region,
            ip_service,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.hostname.trim().is_empty() {
            return Err(Error::config("Hostname cannot be empty"));
        }

        if self.hostname.contains(char::is_whitespace) {
            return Err(Error::config(format!(
                "Hostname '{}' cannot contain whitespace",
                self.hostname
            )));
        }

        let url = &self.ip_service.url;
        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(Error::config(format!(
                "{KEY_IP_SERVICE_URL} must use HTTP or HTTPS scheme. Got: {url}"
            )));
        }

        Ok(())
    }
}

/// Get a required property, trimmed. Missing or blank values are errors.
fn required(props: &HashMap<String, String>, key: &str, source: &str) -> Result<String> {
    match props.get(key) {
        None => Err(Error::config(format!(
            "Required property {key} not found in {source}"
        ))),
        Some(value) if value.trim().is_empty() => Err(Error::config(format!(
            "Required property {key} is blank in {source}"
        ))),
        Some(value) => Ok(value.trim().to_string()),
    }
}

/// Get an optional property, trimmed. Blank counts as absent.
fn optional(props: &HashMap<String, String>, key: &str) -> Option<String> {
    props
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
