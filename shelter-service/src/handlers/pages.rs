//! HTML pages: landing page, route documentation, and the animals table.

use crate::config::SiblingPorts;
use crate::models::Animal;
use crate::startup::AppState;
use askama::Template;
use axum::{
    extract::{Host, State},
    response::{IntoResponse, Response},
};

/// Links to the operational UIs running next to this service.
pub struct SiblingLinks {
    pub prometheus: String,
    pub alertmanager: String,
    pub grafana: String,
    pub load_tester: String,
}

impl SiblingLinks {
    /// Point each link at the requesting host with the sibling's own port.
    pub fn for_host(authority: &str, ports: &SiblingPorts) -> Self {
        let host = hostname(authority);
        let link = |port: u16| format!("http://{}:{}", host, port);

        Self {
            prometheus: link(ports.prometheus),
            alertmanager: link(ports.alertmanager),
            grafana: link(ports.grafana),
            load_tester: link(ports.load_tester),
        }
    }
}

/// Strip the port from a `Host` value, keeping IPv6 brackets.
fn hostname(authority: &str) -> &str {
    if authority.starts_with('[') {
        return match authority.find(']') {
            Some(end) => &authority[..=end],
            None => authority,
        };
    }

    match authority.rsplit_once(':') {
        Some((host, port)) if port.bytes().all(|b| b.is_ascii_digit()) => host,
        _ => authority,
    }
}

fn request_authority(host: Option<Host>, state: &AppState) -> String {
    host.map(|Host(h)| h)
        .unwrap_or_else(|| format!("localhost:{}", state.port))
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub base_url: String,
    pub links: SiblingLinks,
}

#[derive(Template)]
#[template(path = "docs.html")]
pub struct DocsTemplate {
    pub base_url: String,
    pub links: SiblingLinks,
}

/// One table row, with absent values rendered as empty cells.
pub struct AnimalRow {
    pub id: i32,
    pub name: String,
    pub species: String,
    pub age: String,
    pub arrival_date: String,
    pub health: String,
}

impl From<Animal> for AnimalRow {
    fn from(a: Animal) -> Self {
        Self {
            id: a.id,
            name: a.name.unwrap_or_default(),
            species: a.species.unwrap_or_default(),
            age: a.age.map(|age| age.to_string()).unwrap_or_default(),
            arrival_date: a.arrival_date.map(|d| d.to_string()).unwrap_or_default(),
            health: a.health.unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "animals.html")]
pub struct AnimalsTemplate {
    pub animals: Vec<AnimalRow>,
}

#[derive(Template)]
#[template(path = "store_error.html")]
pub struct StoreErrorTemplate {
    pub message: String,
}

pub async fn index(State(state): State<AppState>, host: Option<Host>) -> impl IntoResponse {
    let authority = request_authority(host, &state);

    IndexTemplate {
        base_url: format!("http://{}", authority),
        links: SiblingLinks::for_host(&authority, &state.siblings),
    }
}

pub async fn docs(State(state): State<AppState>, host: Option<Host>) -> impl IntoResponse {
    let authority = request_authority(host, &state);

    DocsTemplate {
        base_url: format!("http://{}", authority),
        links: SiblingLinks::for_host(&authority, &state.siblings),
    }
}

/// Store failures are shown inline and still answer 200.
pub async fn animals_table(State(state): State<AppState>) -> Response {
    match state.repository.list_all().await {
        Ok(animals) => AnimalsTemplate {
            animals: animals.into_iter().map(AnimalRow::from).collect(),
        }
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load animals for the table view");
            StoreErrorTemplate {
                message: e.to_string(),
            }
            .into_response()
        }
    }
}
