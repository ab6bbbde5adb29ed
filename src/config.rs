//! Runtime configuration.
//!
//! Everything has a default, so a config file is optional. When present it
//! is a JSON object with any subset of the sections below:
//! ```json
//! {
//!   "http": { "timeout_secs": 60, "user_agent": "pubstats/0.1" },
//!   "covid": { "max_pages": 5, "completeness_filter": "all-cumulative" },
//!   "text": { "top_n": 20 }
//! }
//! ```

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::covid::types::CumulativeField;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub endpoints: Endpoints,
    pub covid: CovidConfig,
    pub text: TextConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: concat!("pubstats/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub statistics_url: String,
    pub sparql_url: String,
    pub wikidata_api_url: String,
    pub wikipedia_api_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            statistics_url: "https://api.coronavirus.data.gov.uk/v1/data".to_string(),
            sparql_url: "https://query.wikidata.org/sparql".to_string(),
            wikidata_api_url: "https://www.wikidata.org/w/api.php".to_string(),
            wikipedia_api_url: "https://en.wikipedia.org/w/api.php".to_string(),
        }
    }
}

/// Which cumulative fields must be present for a row to survive gap-filling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CompletenessFilter {
    /// Cases and vaccinations only. Deaths are never published by the
    /// source, so requiring them would drop every row.
    #[default]
    Observed,
    /// Every cumulative field, deaths included.
    AllCumulative,
    /// Keep all rows.
    None,
}

impl CompletenessFilter {
    pub fn required_fields(self) -> &'static [CumulativeField] {
        match self {
            CompletenessFilter::Observed => &[CumulativeField::Cases, CumulativeField::Vaccinated],
            CompletenessFilter::AllCumulative => &CumulativeField::ALL,
            CompletenessFilter::None => &[],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CovidConfig {
    pub excluded_area: String,
    pub rolling_window: usize,
    pub max_pages: u32,
    pub completeness_filter: CompletenessFilter,
    /// Renames applied to age-band keys in the wide vaccination table.
    pub band_column_renames: BTreeMap<String, String>,
}

impl Default for CovidConfig {
    fn default() -> Self {
        Self {
            excluded_area: "England".to_string(),
            rolling_window: 7,
            max_pages: 1,
            completeness_filter: CompletenessFilter::default(),
            band_column_renames: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Newline-separated stopword list; the bundled English list when unset.
    pub stopwords_path: Option<PathBuf>,
    pub top_n: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            stopwords_path: None,
            top_n: 10,
        }
    }
}

impl AppConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads from `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.http.timeout_secs == 0 {
            bail!("http.timeout_secs must be at least 1");
        }
        if self.http.connect_timeout_secs == 0 {
            bail!("http.connect_timeout_secs must be at least 1");
        }
        if self.covid.rolling_window == 0 {
            bail!("covid.rolling_window must be at least 1");
        }
        if self.covid.max_pages == 0 {
            bail!("covid.max_pages must be at least 1");
        }
        if self.text.top_n == 0 {
            bail!("text.top_n must be at least 1");
        }
        Ok(())
    }
}
