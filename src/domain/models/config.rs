use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A credential. Debug output never shows the value.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Secret(String);

impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        string_like(deserializer).map(Self)
    }
}

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    fn masked(&self) -> Self {
        if self.is_empty() {
            Self::default()
        } else {
            Self("********".to_string())
        }
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("Secret(<empty>)")
        } else {
            f.write_str("Secret(********)")
        }
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Main configuration structure for the BDI agent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Control loop timing
    #[serde(default)]
    pub agent: AgentConfig,

    /// GitHub repository and workflow dispatch settings
    #[serde(default)]
    pub github: GithubConfig,

    /// Vercel project and deployment settings
    #[serde(default)]
    pub vercel: VercelConfig,

    /// Supabase metrics store settings
    #[serde(default)]
    pub supabase: SupabaseConfig,

    /// HuggingFace endpoint settings
    #[serde(default)]
    pub huggingface: HuggingfaceConfig,

    /// Service probe settings
    #[serde(default)]
    pub probes: ProbeConfig,

    /// Desire rule toggles
    #[serde(default)]
    pub desires: DesireRulesConfig,

    /// Local maintenance settings
    #[serde(default)]
    pub maintenance: MaintenanceConfig,

    /// Dashboard HTTP server settings
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Copy of this configuration with every credential masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.github.token = self.github.token.masked();
        copy.vercel.token = self.vercel.token.masked();
        copy.supabase.key = self.supabase.key.masked();
        copy
    }
}

/// Control loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AgentConfig {
    /// Display name of this agent instance
    #[serde(default = "default_agent_name", deserialize_with = "string_like")]
    pub name: String,

    /// Delay between successful cycles, in seconds
    #[serde(default = "default_cycle_interval_secs")]
    pub cycle_interval_secs: u64,

    /// Delay before retrying after a failed cycle, in seconds
    #[serde(default = "default_error_backoff_secs")]
    pub error_backoff_secs: u64,
}

fn default_agent_name() -> String {
    "FMAA-BDI-Master".to_string()
}

const fn default_cycle_interval_secs() -> u64 {
    30
}

const fn default_error_backoff_secs() -> u64 {
    10
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            cycle_interval_secs: default_cycle_interval_secs(),
            error_backoff_secs: default_error_backoff_secs(),
        }
    }
}

/// GitHub configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GithubConfig {
    /// REST API base URL
    #[serde(default = "default_github_api_base", deserialize_with = "string_like")]
    pub api_base: String,

    /// Repository owner
    #[serde(default, deserialize_with = "string_like")]
    pub owner: String,

    /// Repository name
    #[serde(default, deserialize_with = "string_like")]
    pub repo: String,

    /// Workflow file dispatched for revenue optimization
    #[serde(default = "default_workflow", deserialize_with = "string_like")]
    pub workflow: String,

    /// Git ref workflows and deployments run against
    #[serde(default = "default_git_ref", deserialize_with = "string_like")]
    pub git_ref: String,

    /// Token with `actions:write` scope
    #[serde(default)]
    pub token: Secret,
}

fn default_github_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_workflow() -> String {
    "revenue-optimization.yml".to_string()
}

fn default_git_ref() -> String {
    "main".to_string()
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: default_github_api_base(),
            owner: String::new(),
            repo: String::new(),
            workflow: default_workflow(),
            git_ref: default_git_ref(),
            token: Secret::default(),
        }
    }
}

/// Vercel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VercelConfig {
    /// REST API base URL
    #[serde(default = "default_vercel_api_base", deserialize_with = "string_like")]
    pub api_base: String,

    /// Project name
    #[serde(default = "default_vercel_project", deserialize_with = "string_like")]
    pub project: String,

    /// Project identifier deployments are created under
    #[serde(default, deserialize_with = "string_like")]
    pub project_id: String,

    /// Name given to created deployments
    #[serde(default = "default_deployment_name", deserialize_with = "string_like")]
    pub deployment_name: String,

    /// API token
    #[serde(default)]
    pub token: Secret,
}

fn default_vercel_api_base() -> String {
    "https://api.vercel.com".to_string()
}

fn default_vercel_project() -> String {
    "fmaa-api".to_string()
}

fn default_deployment_name() -> String {
    "fmaa-bdi-agent-v1".to_string()
}

impl Default for VercelConfig {
    fn default() -> Self {
        Self {
            api_base: default_vercel_api_base(),
            project: default_vercel_project(),
            project_id: String::new(),
            deployment_name: default_deployment_name(),
            token: Secret::default(),
        }
    }
}

/// Supabase configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    #[serde(default, deserialize_with = "string_like")]
    pub url: String,

    /// Service or anon key
    #[serde(default)]
    pub key: Secret,

    /// Table holding revenue metrics rows
    #[serde(default = "default_metrics_table", deserialize_with = "string_like")]
    pub metrics_table: String,
}

fn default_metrics_table() -> String {
    "revenue_metrics".to_string()
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            key: Secret::default(),
            metrics_table: default_metrics_table(),
        }
    }
}

/// HuggingFace configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HuggingfaceConfig {
    /// Hub base URL
    #[serde(default = "default_huggingface_api_base", deserialize_with = "string_like")]
    pub api_base: String,
}

fn default_huggingface_api_base() -> String {
    "https://huggingface.co".to_string()
}

impl Default for HuggingfaceConfig {
    fn default() -> Self {
        Self {
            api_base: default_huggingface_api_base(),
        }
    }
}

/// Service probe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProbeConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_probe_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_probe_timeout_secs() -> u64 {
    5
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_probe_timeout_secs(),
        }
    }
}

/// Which desire rules are evaluated each cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DesireRulesConfig {
    #[serde(default = "default_true")]
    pub revenue_optimization: bool,

    #[serde(default = "default_true")]
    pub system_optimization: bool,

    #[serde(default = "default_true")]
    pub agent_scaling: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for DesireRulesConfig {
    fn default() -> Self {
        Self {
            revenue_optimization: true,
            system_optimization: true,
            agent_scaling: true,
        }
    }
}

/// Local maintenance configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MaintenanceConfig {
    /// Directory scanned for rotated log files
    #[serde(default = "default_maintenance_log_dir", deserialize_with = "string_like")]
    pub log_dir: String,

    /// Log files modified more recently than this are left alone, in seconds
    #[serde(default = "default_min_log_age_secs")]
    pub min_log_age_secs: u64,
}

fn default_maintenance_log_dir() -> String {
    ".bdi/logs".to_string()
}

const fn default_min_log_age_secs() -> u64 {
    3600
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            log_dir: default_maintenance_log_dir(),
            min_log_age_secs: default_min_log_age_secs(),
        }
    }
}

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DashboardConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_dashboard_host", deserialize_with = "string_like")]
    pub host: String,

    #[serde(default = "default_dashboard_port")]
    pub port: u16,
}

fn default_dashboard_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_dashboard_port() -> u16 {
    8080
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: default_dashboard_host(),
            port: default_dashboard_port(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level", deserialize_with = "string_like")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format", deserialize_with = "string_like")]
    pub format: String,

    /// Directory for rolling log files; console only when unset
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "optional_string_like")]
    pub log_dir: Option<String>,

    /// Rotation policy: daily, hourly, never
    #[serde(default = "default_rotation", deserialize_with = "string_like")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

/// Scalar accepted where a string is expected.
///
/// Environment providers type values that look like numbers or booleans, so a
/// repository named `2048` arrives as an integer.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringLike {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl From<StringLike> for String {
    fn from(value: StringLike) -> Self {
        match value {
            StringLike::Str(s) => s,
            StringLike::Int(n) => n.to_string(),
            StringLike::UInt(n) => n.to_string(),
            StringLike::Float(n) => n.to_string(),
            StringLike::Bool(b) => b.to_string(),
        }
    }
}

fn string_like<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringLike::deserialize(deserializer).map(String::from)
}

fn optional_string_like<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<StringLike> = Option::deserialize(deserializer)?;
    Ok(value.map(String::from))
}
