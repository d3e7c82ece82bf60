//! Layered configuration for the `recommend` and `serve` subcommands.
//!
//! Values come from CLI flags, `MEALCAST_*` environment variables, and
//! configuration files, merged by `ortho_config`. The raw argument structs
//! are then resolved into validated settings.

use std::net::SocketAddr;

use camino::{Utf8Path, Utf8PathBuf};
use chrono_tz::Tz;
use clap::Parser;
use geo::Coord;
use mealcast_core::{
    CandidateFilter, DEFAULT_TIMEZONE, MealClock, RecommendPolicy, RecommenderConfig,
};
use mealcast_data::DEFAULT_WEATHER_BASE_URL;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::CliError;

pub(crate) const CMD_RECOMMEND: &str = "recommend";
pub(crate) const CMD_SERVE: &str = "serve";

pub(crate) const ARG_CAMPUS_LAT: &str = "campus-lat";
pub(crate) const ARG_CAMPUS_LON: &str = "campus-lon";
pub(crate) const ARG_TIMEZONE: &str = "timezone";
pub(crate) const ARG_WEATHER_BASE_URL: &str = "weather-base-url";
pub(crate) const ARG_MENU_BASE_URL: &str = "menu-base-url";
pub(crate) const ARG_VENUES_PATH: &str = "venues-path";
pub(crate) const ARG_RECOMMENDATION_DIR: &str = "recommendation-dir";
pub(crate) const ARG_TOP_N: &str = "top-n";
pub(crate) const ARG_OPEN_ONLY: &str = "open-only";
pub(crate) const ARG_NO_FALLBACK: &str = "no-fallback";
pub(crate) const ARG_API_SECRET: &str = "api-secret";
pub(crate) const ARG_BIND: &str = "bind";

const ENV_PREFIX: &str = "MEALCAST";
const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_RECOMMENDATION_SUBDIR: &str = "recommendations";

/// Environment variable that sets `field` for `command`.
pub(crate) fn env_var(command: &str, field: &str) -> String {
    format!("{ENV_PREFIX}_CMDS_{command}_{field}")
        .replace('-', "_")
        .to_uppercase()
}

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Run one recommendation pass: read the weather at the campus, \
                 load venues and their menus, print the ranked picks as JSON, \
                 and store the top pick.",
    about = "Recommend dining venues for the current weather and meal"
)]
#[ortho_config(prefix = "MEALCAST")]
pub(crate) struct RecommendArgs {
    /// Campus latitude in degrees.
    #[arg(long = ARG_CAMPUS_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) campus_lat: Option<f64>,
    /// Campus longitude in degrees.
    #[arg(long = ARG_CAMPUS_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) campus_lon: Option<f64>,
    /// IANA time zone for meal periods (default `America/New_York`).
    #[arg(long = ARG_TIMEZONE, value_name = "name")]
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    /// Base URL of the Open-Meteo compatible weather service.
    #[arg(long = ARG_WEATHER_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) weather_base_url: Option<String>,
    /// Base URL of the menu service used by external-menu venues.
    #[arg(long = ARG_MENU_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) menu_base_url: Option<String>,
    /// JSON file holding the venue collection.
    #[arg(long = ARG_VENUES_PATH, value_name = "path")]
    #[serde(default)]
    pub(crate) venues_path: Option<Utf8PathBuf>,
    /// Directory the top pick is written to.
    #[arg(long = ARG_RECOMMENDATION_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) recommendation_dir: Option<Utf8PathBuf>,
    /// Number of picks to return.
    #[arg(long = ARG_TOP_N, value_name = "count")]
    #[serde(default)]
    pub(crate) top_n: Option<usize>,
    /// Only consider venues that are open.
    #[arg(long = ARG_OPEN_ONLY, value_name = "bool")]
    #[serde(default)]
    pub(crate) open_only: Option<bool>,
    /// Return nothing rather than falling back to every venue.
    #[arg(long = ARG_NO_FALLBACK, value_name = "bool")]
    #[serde(default)]
    pub(crate) no_fallback: Option<bool>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<PassConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PassConfig::resolve(merged, CMD_RECOMMEND)
    }
}

/// CLI arguments for the `serve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Serve GET and POST /api/recommend. Requests must carry the \
                 shared secret in the x-api-key header. GET /health reports \
                 liveness.",
    about = "Serve recommendations over HTTP"
)]
#[ortho_config(prefix = "MEALCAST")]
pub(crate) struct ServeArgs {
    /// Campus latitude in degrees.
    #[arg(long = ARG_CAMPUS_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) campus_lat: Option<f64>,
    /// Campus longitude in degrees.
    #[arg(long = ARG_CAMPUS_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) campus_lon: Option<f64>,
    /// IANA time zone for meal periods.
    #[arg(long = ARG_TIMEZONE, value_name = "name")]
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    /// Base URL of the weather service.
    #[arg(long = ARG_WEATHER_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) weather_base_url: Option<String>,
    /// Base URL of the menu service.
    #[arg(long = ARG_MENU_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) menu_base_url: Option<String>,
    /// JSON file holding the venue collection.
    #[arg(long = ARG_VENUES_PATH, value_name = "path")]
    #[serde(default)]
    pub(crate) venues_path: Option<Utf8PathBuf>,
    /// Directory the top pick is written to.
    #[arg(long = ARG_RECOMMENDATION_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) recommendation_dir: Option<Utf8PathBuf>,
    /// Number of picks to return.
    #[arg(long = ARG_TOP_N, value_name = "count")]
    #[serde(default)]
    pub(crate) top_n: Option<usize>,
    /// Only consider venues that are open.
    #[arg(long = ARG_OPEN_ONLY, value_name = "bool")]
    #[serde(default)]
    pub(crate) open_only: Option<bool>,
    /// Return nothing rather than falling back to every venue.
    #[arg(long = ARG_NO_FALLBACK, value_name = "bool")]
    #[serde(default)]
    pub(crate) no_fallback: Option<bool>,
    /// Shared secret expected in the `x-api-key` header.
    #[arg(long = ARG_API_SECRET, value_name = "secret")]
    #[serde(default)]
    pub(crate) api_secret: Option<String>,
    /// Socket address to listen on (default `127.0.0.1:8080`).
    #[arg(long = ARG_BIND, value_name = "addr")]
    #[serde(default)]
    pub(crate) bind: Option<String>,
}

impl ServeArgs {
    pub(crate) fn into_config(self) -> Result<ServeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ServeConfig::try_from(merged)
    }

    /// Split off the settings shared with `recommend`.
    fn into_parts(self) -> (RecommendArgs, Option<String>, Option<String>) {
        let pass = RecommendArgs {
            campus_lat: self.campus_lat,
            campus_lon: self.campus_lon,
            timezone: self.timezone,
            weather_base_url: self.weather_base_url,
            menu_base_url: self.menu_base_url,
            venues_path: self.venues_path,
            recommendation_dir: self.recommendation_dir,
            top_n: self.top_n,
            open_only: self.open_only,
            no_fallback: self.no_fallback,
        };
        (pass, self.api_secret, self.bind)
    }
}

/// Resolved settings for one recommendation pass.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PassConfig {
    pub(crate) campus: Coord<f64>,
    pub(crate) timezone: Tz,
    pub(crate) weather_base_url: String,
    pub(crate) menu_base_url: Option<String>,
    pub(crate) venues_path: Utf8PathBuf,
    pub(crate) recommendation_dir: Utf8PathBuf,
    pub(crate) policy: RecommendPolicy,
}

impl PassConfig {
    /// Resolve merged arguments for `command`.
    pub(crate) fn resolve(args: RecommendArgs, command: &'static str) -> Result<Self, CliError> {
        let missing = |field: &'static str| CliError::MissingArgument {
            field,
            env: env_var(command, field),
        };
        let lat = args.campus_lat.ok_or_else(|| missing(ARG_CAMPUS_LAT))?;
        let lon = args.campus_lon.ok_or_else(|| missing(ARG_CAMPUS_LON))?;
        let venues_path = args.venues_path.ok_or_else(|| missing(ARG_VENUES_PATH))?;
        check_range(ARG_CAMPUS_LAT, lat, 90.0)?;
        check_range(ARG_CAMPUS_LON, lon, 180.0)?;

        let timezone = match args.timezone {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|_| CliError::InvalidTimezone { name })?,
            None => DEFAULT_TIMEZONE,
        };
        let recommendation_dir = args.recommendation_dir.unwrap_or_else(|| {
            venues_path
                .parent()
                .unwrap_or_else(|| Utf8Path::new("."))
                .join(DEFAULT_RECOMMENDATION_SUBDIR)
        });

        let defaults = RecommendPolicy::default();
        let policy = RecommendPolicy {
            top_n: args.top_n.unwrap_or(defaults.top_n),
            filter: if args.open_only.unwrap_or(false) {
                CandidateFilter::OpenVenues
            } else {
                defaults.filter
            },
            fallback_to_all: !args.no_fallback.unwrap_or(false),
        };

        Ok(Self {
            campus: Coord { x: lon, y: lat },
            timezone,
            weather_base_url: args
                .weather_base_url
                .unwrap_or_else(|| DEFAULT_WEATHER_BASE_URL.to_owned()),
            menu_base_url: args.menu_base_url.filter(|url| !url.trim().is_empty()),
            venues_path,
            recommendation_dir,
            policy,
        })
    }

    pub(crate) fn recommender_config(&self) -> RecommenderConfig {
        RecommenderConfig {
            campus: self.campus,
            clock: MealClock::new(self.timezone),
            policy: self.policy,
        }
    }

    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.venues_path, ARG_VENUES_PATH)
    }
}

fn check_range(field: &'static str, value: f64, limit: f64) -> Result<(), CliError> {
    if (-limit..=limit).contains(&value) {
        Ok(())
    } else {
        Err(CliError::InvalidCoordinate {
            field,
            value,
            min: -limit,
            max: limit,
        })
    }
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match mealcast_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Resolved `serve` settings.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ServeConfig {
    pub(crate) pass: PassConfig,
    pub(crate) api_secret: String,
    pub(crate) bind: SocketAddr,
}

impl TryFrom<ServeArgs> for ServeConfig {
    type Error = CliError;

    fn try_from(args: ServeArgs) -> Result<Self, Self::Error> {
        let (pass_args, api_secret, bind) = args.into_parts();
        let pass = PassConfig::resolve(pass_args, CMD_SERVE)?;
        let api_secret = api_secret
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| CliError::MissingArgument {
                field: ARG_API_SECRET,
                env: env_var(CMD_SERVE, ARG_API_SECRET),
            })?;
        let bind_text = bind.unwrap_or_else(|| DEFAULT_BIND.to_owned());
        let bind = bind_text
            .parse()
            .map_err(|source| CliError::InvalidBind {
                value: bind_text.clone(),
                source,
            })?;
        Ok(Self {
            pass,
            api_secret,
            bind,
        })
    }
}

#[cfg(test)]
pub(crate) fn recommend_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PassConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PassConfig::resolve(merged, CMD_RECOMMEND)
}
