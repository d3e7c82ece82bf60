//! Recommend command implementation and adapter wiring.

use std::io::Write;

use chrono::{DateTime, Utc};
use log::info;
use mealcast_core::{
    MenuFetchError, MenuRequest, MenuSource, RecommendError, RecommendResponse, Recommender,
    Scorer, VenueStore, WeatherSource,
};
use mealcast_data::{
    HttpMenuSource, HttpMenuSourceConfig, JsonFileStore, OpenMeteoSource, OpenMeteoSourceConfig,
};
use serde_json::Value;

use crate::CliError;
use crate::config::{ARG_MENU_BASE_URL, PassConfig, RecommendArgs};

/// One recommendation pass, independent of how it is wired.
pub(crate) trait RecommendPass: Send + Sync {
    fn recommend(&self, now: DateTime<Utc>) -> Result<RecommendResponse, RecommendError>;
}

impl<W, M, S, C> RecommendPass for Recommender<W, M, S, C>
where
    W: WeatherSource,
    M: MenuSource,
    S: VenueStore,
    C: Scorer,
{
    fn recommend(&self, now: DateTime<Utc>) -> Result<RecommendResponse, RecommendError> {
        Self::recommend(self, now)
    }
}

/// Menu source used when no menu service is configured.
#[derive(Debug)]
enum MenuBackend {
    Http(HttpMenuSource),
    Unconfigured,
}

impl MenuSource for MenuBackend {
    fn fetch_menu(&self, request: &MenuRequest) -> Result<Value, MenuFetchError> {
        match self {
            Self::Http(source) => source.fetch_menu(request),
            Self::Unconfigured => Err(MenuFetchError::Network {
                url: format!("<unset>/{}", request.slug),
                message: format!("no menu service configured (set --{ARG_MENU_BASE_URL})"),
            }),
        }
    }
}

/// Builds the recommendation pass for a resolved configuration.
pub(crate) trait PassBuilder {
    fn build(&self, config: &PassConfig) -> Result<Box<dyn RecommendPass>, CliError>;
}

/// Wires the HTTP weather and menu clients to the JSON file store.
pub(crate) struct HttpPassBuilder;

impl PassBuilder for HttpPassBuilder {
    fn build(&self, config: &PassConfig) -> Result<Box<dyn RecommendPass>, CliError> {
        let weather =
            OpenMeteoSource::with_config(OpenMeteoSourceConfig::new(&config.weather_base_url))
                .map_err(|source| CliError::BuildClient {
                    service: "weather",
                    base_url: config.weather_base_url.clone(),
                    source,
                })?;
        let menus = match &config.menu_base_url {
            Some(base_url) => MenuBackend::Http(
                HttpMenuSource::with_config(HttpMenuSourceConfig::new(base_url)).map_err(
                    |source| CliError::BuildClient {
                        service: "menu",
                        base_url: base_url.clone(),
                        source,
                    },
                )?,
            ),
            None => MenuBackend::Unconfigured,
        };
        let store = JsonFileStore::new(
            config.venues_path.clone(),
            config.recommendation_dir.clone(),
        );
        Ok(Box::new(Recommender::new(
            weather,
            menus,
            store,
            config.recommender_config(),
        )))
    }
}

pub(super) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_recommend_with(args, &HttpPassBuilder, &mut stdout, Utc::now())
}

pub(super) fn run_recommend_with(
    args: RecommendArgs,
    builder: &dyn PassBuilder,
    writer: &mut dyn Write,
    now: DateTime<Utc>,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let pass = builder.build(&config)?;
    let response = pass.recommend(now)?;
    info!(
        "recommended {} venues; top pick {}",
        response.picks.len(),
        response
            .top_pick()
            .map_or("none", |pick| pick.venue_id.as_str())
    );
    write_response(writer, &response)
}

fn write_response(writer: &mut dyn Write, response: &RecommendResponse) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(response).map_err(CliError::SerializeResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
