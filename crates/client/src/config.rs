//! Client configuration read from the process environment.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// How the simulation result is printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Full `SimulationOutput` as pretty JSON.
    #[default]
    Json,
    /// Hull attributes by name, one per line.
    Summary,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "summary" => Ok(Self::Summary),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Configuration for one client invocation.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub data_dir: PathBuf,
    pub loadout: Option<String>,
    pub output: OutputFormat,
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            loadout: None,
            output: OutputFormat::default(),
            log_dir: None,
        }
    }
}

impl ClientConfig {
    /// Loadout used when neither the command line nor the environment names one.
    pub const DEFAULT_LOADOUT: &'static str = "rifter";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DOGMA_DATA_DIR` - Reference data directory (default: platform data
    ///   dir when it exists, else `./data`)
    /// - `DOGMA_LOADOUT` - Loadout name under `loadouts/`, or a path to a RON file
    /// - `DOGMA_OUTPUT` - `json` or `summary` (default: json)
    /// - `DOGMA_LOG_DIR` - Also write daily log files here (default: stderr only)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("DOGMA_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        config.loadout = env::var("DOGMA_LOADOUT").ok();

        if let Some(output) = read_env::<OutputFormat>("DOGMA_OUTPUT") {
            config.output = output;
        }

        config.log_dir = env::var("DOGMA_LOG_DIR").ok().map(PathBuf::from);

        config
    }

    /// Command-line argument wins over `DOGMA_LOADOUT`.
    pub fn with_loadout_arg(mut self, arg: Option<String>) -> Self {
        if arg.is_some() {
            self.loadout = arg;
        }
        self
    }

    pub fn loadout_or_default(&self) -> &str {
        self.loadout.as_deref().unwrap_or(Self::DEFAULT_LOADOUT)
    }
}

/// Platform data directory (`~/.local/share/dogma` on Linux) when present,
/// otherwise `./data`.
fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "dogma")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from("./data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    env::var(key).ok()?.parse().ok()
}
