//! Dashboard state: the displayed search result, recent searches and theme.
//!
//! Every search is tagged with a [`SearchId`]. Responses are applied only if
//! their search is still the latest one, so a slow response for a superseded
//! search never overwrites what a newer search displayed.

use anyhow::Result;

use crate::{
    error::WeatherError,
    forecast,
    history::RecentSearches,
    model::{CityQuery, CurrentConditions, DailyForecast, ForecastSample},
    provider::WeatherProvider,
    storage::LocalStore,
    theme::{Palette, ThemePreference},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchId(u64);

/// A started search whose responses have not been applied yet.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    id: SearchId,
    city: CityQuery,
    record: bool,
}

impl SearchTicket {
    pub fn id(&self) -> SearchId {
        self.id
    }

    pub fn city(&self) -> &CityQuery {
        &self.city
    }
}

/// Both provider responses for one search.
#[derive(Debug)]
pub struct SearchResponses {
    pub current: Result<CurrentConditions, WeatherError>,
    pub forecast: Result<Vec<ForecastSample>, WeatherError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// Responses were applied to the display state.
    Applied,
    /// A newer search started in the meantime; responses were dropped.
    Stale,
    /// Refresh requested with nothing on display.
    Idle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ForecastView {
    #[default]
    Empty,
    Ready(Vec<DailyForecast>),
    /// The forecast request failed; current conditions may still be shown.
    Unavailable,
}

impl ForecastView {
    pub fn days(&self) -> &[DailyForecast] {
        match self {
            Self::Ready(days) => days,
            Self::Empty | Self::Unavailable => &[],
        }
    }
}

#[derive(Debug)]
pub struct Dashboard {
    provider: Box<dyn WeatherProvider>,
    store: LocalStore,
    recent: RecentSearches,
    theme: ThemePreference,
    current: Option<CurrentConditions>,
    displayed_query: Option<CityQuery>,
    forecast: ForecastView,
    error: Option<String>,
    next_id: u64,
    in_flight: Option<SearchId>,
}

impl Dashboard {
    /// Build a dashboard, loading recent searches and theme from `store`.
    pub fn new(provider: Box<dyn WeatherProvider>, store: LocalStore) -> Self {
        let recent = RecentSearches::load(&store);
        let theme = ThemePreference::load(&store);

        Self {
            provider,
            store,
            recent,
            theme,
            current: None,
            displayed_query: None,
            forecast: ForecastView::Empty,
            error: None,
            next_id: 0,
            in_flight: None,
        }
    }

    /// Search for a city typed by the user (or picked from recent searches).
    ///
    /// On success the city moves to the front of the recent searches.
    pub async fn search(&mut self, raw_city: &str) -> Result<SearchStatus, WeatherError> {
        let ticket = self.begin_search(raw_city)?;
        let responses = self.fetch(&ticket).await;
        self.complete_search(ticket, responses)
    }

    /// Re-run the search for the city currently on display, without touching
    /// the recent searches.
    pub async fn refresh(&mut self) -> Result<SearchStatus, WeatherError> {
        let Some(ticket) = self.begin_refresh() else {
            return Ok(SearchStatus::Idle);
        };
        let responses = self.fetch(&ticket).await;
        self.complete_search(ticket, responses)
    }

    /// Start a search: validate input and mark it as the latest one.
    ///
    /// Invalid input is kept as the displayed error.
    pub fn begin_search(&mut self, raw_city: &str) -> Result<SearchTicket, WeatherError> {
        match CityQuery::new(raw_city) {
            Ok(city) => Ok(self.issue_ticket(city, true)),
            Err(err) => {
                let err = WeatherError::from(err);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Start a refresh of the displayed city; `None` when nothing is shown.
    ///
    /// Uses the provider-reported name, or the query that produced the
    /// display when the provider reported a blank name.
    pub fn begin_refresh(&mut self) -> Option<SearchTicket> {
        let reported = self.current.as_ref().and_then(|c| CityQuery::new(&c.city_name).ok());
        let city = reported.or_else(|| self.displayed_query.clone())?;
        Some(self.issue_ticket(city, false))
    }

    fn issue_ticket(&mut self, city: CityQuery, record: bool) -> SearchTicket {
        self.next_id += 1;
        let id = SearchId(self.next_id);
        self.in_flight = Some(id);
        self.error = None;

        tracing::debug!(search = id.0, city = %city, "Search started");
        SearchTicket { id, city, record }
    }

    /// Issue both provider requests for `ticket` concurrently.
    pub async fn fetch(&self, ticket: &SearchTicket) -> SearchResponses {
        let (current, forecast) = tokio::join!(
            self.provider.fetch_current(&ticket.city),
            self.provider.fetch_forecast(&ticket.city),
        );
        SearchResponses { current, forecast }
    }

    /// Apply the responses of `ticket`, unless a newer search has started.
    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        responses: SearchResponses,
    ) -> Result<SearchStatus, WeatherError> {
        if self.in_flight != Some(ticket.id) {
            tracing::debug!(search = ticket.id.0, city = %ticket.city, "Dropping stale responses");
            return Ok(SearchStatus::Stale);
        }
        self.in_flight = None;

        let current = match responses.current {
            Ok(current) => current,
            Err(err) => {
                tracing::info!(city = %ticket.city, error = %err, "Search failed");
                self.current = None;
                self.displayed_query = None;
                self.forecast = ForecastView::Empty;
                self.error = Some(err.to_string());
                return Err(err);
            }
        };

        self.forecast = match responses.forecast {
            Ok(samples) => ForecastView::Ready(forecast::aggregate(&samples)),
            Err(err) => {
                tracing::warn!(city = %ticket.city, error = %err, "Forecast unavailable");
                ForecastView::Unavailable
            }
        };

        tracing::info!(city = %ticket.city, resolved = %current.city_name, "Search succeeded");
        self.current = Some(current);
        self.displayed_query = Some(ticket.city.clone());

        if ticket.record {
            self.recent = self.recent.record_search(&ticket.city);
            if let Err(err) = self.recent.persist(&mut self.store) {
                tracing::warn!(error = %err, "Failed to persist recent searches");
            }
        }

        Ok(SearchStatus::Applied)
    }

    /// Flip the theme and persist it. The in-memory theme changes even if
    /// persisting fails.
    pub fn toggle_theme(&mut self) -> Result<ThemePreference> {
        self.set_theme(self.theme.toggle())
    }

    pub fn set_theme(&mut self, theme: ThemePreference) -> Result<ThemePreference> {
        self.theme = theme;
        self.theme.persist(&mut self.store)?;
        Ok(self.theme)
    }

    pub fn current(&self) -> Option<&CurrentConditions> {
        self.current.as_ref()
    }

    pub fn forecast(&self) -> &ForecastView {
        &self.forecast
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn recent(&self) -> &RecentSearches {
        &self.recent
    }

    pub fn theme(&self) -> ThemePreference {
        self.theme
    }

    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }
}
