//! Conversation state machine
//!
//! Drives the two-slot form (cities, then days) and, once both slots are
//! filled, produces one report per city in the order given. The first
//! failing city aborts the remaining ones with a single error notice.

use tracing::{debug, error, info, instrument};

use super::command::Command;
use super::messages;
use super::reply::{Reply, ReplyKeyboard, ReplySink};
use super::store::{Session, SessionStore, Stage};
use super::{ConversationId, ConversationState};
use crate::Result;
use crate::models::{ForecastDays, ForecastSeries};
use crate::report::format_city_report;
use crate::weather::WeatherGateway;

/// Split a city list on commas, trimming names and dropping empty ones
#[must_use]
pub fn parse_cities(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|city| !city.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct ConversationEngine<G, S> {
    gateway: G,
    sessions: S,
}

impl<G: WeatherGateway, S: SessionStore> ConversationEngine<G, S> {
    pub fn new(gateway: G, sessions: S) -> Self {
        Self { gateway, sessions }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn sessions(&self) -> &S {
        &self.sessions
    }

    /// Current state of a conversation
    pub async fn state(&self, conversation: ConversationId) -> Result<ConversationState> {
        let session = self.sessions.load(conversation).await?;
        Ok(ConversationState::from(session.as_ref()))
    }

    /// Handle one inbound message; `text` is `None` for non-text messages.
    #[instrument(skip_all, fields(conversation = %conversation))]
    pub async fn handle_message(
        &self,
        conversation: ConversationId,
        text: Option<&str>,
        sink: &dyn ReplySink,
    ) -> Result<()> {
        if let Some(command) = text.and_then(Command::parse) {
            return self.handle_command(conversation, command, sink).await;
        }

        let Some(session) = self.sessions.load(conversation).await? else {
            debug!("Ignoring message outside of a forecast request");
            return Ok(());
        };

        let text = text.unwrap_or_default();
        match session.stage {
            Stage::AwaitingCities => self.collect_cities(conversation, session, text, sink).await,
            Stage::AwaitingDays => self.collect_days(conversation, session, text, sink).await,
        }
    }

    async fn handle_command(
        &self,
        conversation: ConversationId,
        command: Command,
        sink: &dyn ReplySink,
    ) -> Result<()> {
        debug!("Command /{}", command.name());
        match command {
            Command::Start => {
                sink.send(conversation, Reply::removing_keyboard(messages::START))
                    .await
            }
            Command::Help => {
                sink.send(conversation, Reply::removing_keyboard(messages::HELP))
                    .await
            }
            Command::Weather => {
                self.sessions.save(conversation, Session::new()).await?;
                sink.send(conversation, Reply::removing_keyboard(messages::CITIES_PROMPT))
                    .await
            }
        }
    }

    async fn collect_cities(
        &self,
        conversation: ConversationId,
        mut session: Session,
        text: &str,
        sink: &dyn ReplySink,
    ) -> Result<()> {
        let cities = parse_cities(text);
        if cities.is_empty() {
            debug!("Empty city list, asking again");
            return sink.send(conversation, Reply::text(messages::CITIES_EMPTY)).await;
        }

        debug!("Collected {} cities", cities.len());
        session.cities = cities;
        session.stage = Stage::AwaitingDays;
        self.sessions.save(conversation, session).await?;

        sink.send(
            conversation,
            Reply::new(messages::DAYS_PROMPT, ReplyKeyboard::DayChoice),
        )
        .await
    }

    async fn collect_days(
        &self,
        conversation: ConversationId,
        mut session: Session,
        text: &str,
        sink: &dyn ReplySink,
    ) -> Result<()> {
        let days = match text.parse::<ForecastDays>() {
            Ok(days) => days,
            Err(e) => {
                debug!("Rejected day count: {}", e);
                return sink.send(conversation, Reply::text(messages::DAYS_INVALID)).await;
            }
        };

        session.days = Some(days);
        // The form is complete: whatever happens next, the conversation ends.
        self.sessions.clear(conversation).await?;

        self.send_reports(conversation, &session.cities, days, sink)
            .await
    }

    async fn send_reports(
        &self,
        conversation: ConversationId,
        cities: &[String],
        days: ForecastDays,
        sink: &dyn ReplySink,
    ) -> Result<()> {
        info!("Forecasting {} days for {} cities", days.get(), cities.len());

        for city in cities {
            match self.forecast_city(city, days).await {
                Ok(series) => {
                    let report = format_city_report(city, &series);
                    sink.send(conversation, Reply::removing_keyboard(report))
                        .await?;
                }
                Err(e) => {
                    error!(city = %city, "Failed to get weather forecast: {}", e);
                    return sink
                        .send(conversation, Reply::removing_keyboard(messages::FORECAST_FAILED))
                        .await;
                }
            }
        }

        Ok(())
    }

    async fn forecast_city(&self, city: &str, days: ForecastDays) -> Result<ForecastSeries> {
        let location = self.gateway.resolve_location(city).await?;
        self.gateway
            .fetch_forecast_series(&location.key, days)
            .await
    }
}
