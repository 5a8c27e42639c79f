use inquire::{InquireError, Select, Text};
use std::fmt;
use weatherdash_core::{Dashboard, dashboard::SearchTicket};

use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    Recent,
    Refresh,
    ToggleTheme,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Search => "Search for a city",
            Action::Recent => "Pick a recent search",
            Action::Refresh => "Refresh",
            Action::ToggleTheme => "Toggle light/dark theme",
            Action::Quit => "Quit",
        })
    }
}

fn available_actions(dash: &Dashboard) -> Vec<Action> {
    let mut actions = vec![Action::Search];
    if !dash.recent().is_empty() {
        actions.push(Action::Recent);
    }
    if dash.current().is_some() {
        actions.push(Action::Refresh);
    }
    actions.push(Action::ToggleTheme);
    actions.push(Action::Quit);
    actions
}

/// `None` when the user backed out of the prompt.
fn prompt<T>(result: Result<T, InquireError>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

pub async fn run(mut dash: Dashboard) -> anyhow::Result<()> {
    loop {
        render::print_dashboard(&dash);
        println!();

        let Some(action) = prompt(Select::new("What next?", available_actions(&dash)).prompt())?
        else {
            return Ok(());
        };

        match action {
            Action::Search => {
                if let Some(city) = prompt(Text::new("City:").prompt())? {
                    search(&mut dash, &city).await;
                }
            }
            Action::Recent => {
                let cities: Vec<String> = dash.recent().iter().map(str::to_string).collect();
                if let Some(city) = prompt(Select::new("Recent searches:", cities).prompt())? {
                    search(&mut dash, &city).await;
                }
            }
            Action::Refresh => {
                if let Some(ticket) = dash.begin_refresh() {
                    run_ticket(&mut dash, ticket).await;
                }
            }
            Action::ToggleTheme => {
                if let Err(err) = dash.toggle_theme() {
                    tracing::warn!(error = %err, "Failed to save theme preference");
                }
            }
            Action::Quit => return Ok(()),
        }
    }
}

async fn search(dash: &mut Dashboard, city: &str) {
    match dash.begin_search(city) {
        Ok(ticket) => run_ticket(dash, ticket).await,
        // Kept in the dashboard state and shown on the next render.
        Err(err) => tracing::debug!(error = %err, "Search rejected"),
    }
}

async fn run_ticket(dash: &mut Dashboard, ticket: SearchTicket) {
    render::print_loading(dash, ticket.city().as_str());

    let id = ticket.id();
    let responses = dash.fetch(&ticket).await;
    match dash.complete_search(ticket, responses) {
        Ok(status) => tracing::debug!(search = ?id, ?status, "Search finished"),
        Err(err) => tracing::debug!(search = ?id, error = %err, "Search failed"),
    }
}
