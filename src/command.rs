// Command mapping: every command turns into exactly one `PixelaRequest`.
// Building the request is pure (no I/O) so that the method, URL and body
// can be checked before anything leaves the machine.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::pixel::{GraphColor, GraphType, PixelDate, Quantity};
use reqwest::{Method, Url};
use serde::Serialize;

/// A validated command, ready to be mapped onto the API.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateUser,
    CreateGraph {
        graph: Option<String>,
        name: String,
        unit: String,
        kind: GraphType,
        color: GraphColor,
    },
    AddPixel {
        graph: Option<String>,
        date: Option<PixelDate>,
        quantity: Quantity,
    },
    UpdatePixel {
        graph: Option<String>,
        date: PixelDate,
        quantity: Quantity,
    },
    DeletePixel {
        graph: Option<String>,
        date: PixelDate,
    },
}

/// Body of `POST /v1/users`. Creating a user means agreeing to the terms
/// of service and confirming the user is not a minor.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub token: String,
    pub username: String,
    pub agree_terms_of_service: &'static str,
    pub not_minor: &'static str,
}

/// Body of `POST /v1/users/<username>/graphs`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CreateGraphRequest {
    pub id: String,
    pub name: String,
    pub unit: String,
    #[serde(rename = "type")]
    pub kind: GraphType,
    pub color: GraphColor,
}

/// Body of `POST /v1/users/<username>/graphs/<graph>`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PostPixelRequest {
    pub date: String,
    pub quantity: String,
}

/// Body of `PUT /v1/users/<username>/graphs/<graph>/<date>`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UpdatePixelRequest {
    pub quantity: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Payload {
    CreateUser(CreateUserRequest),
    CreateGraph(CreateGraphRequest),
    PostPixel(PostPixelRequest),
    UpdatePixel(UpdatePixelRequest),
}

/// The one HTTP call a command performs.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelaRequest {
    pub method: Method,
    pub url: Url,
    pub body: Option<Payload>,
    /// Whether the `X-USER-TOKEN` header is attached.
    pub authenticated: bool,
    /// Graph the request targets, if any.
    pub graph: Option<String>,
}

impl Command {
    /// Short name used in log lines and messages.
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateUser => "create-user",
            Command::CreateGraph { .. } => "create-graph",
            Command::AddPixel { .. } => "add",
            Command::UpdatePixel { .. } => "update",
            Command::DeletePixel { .. } => "delete",
        }
    }

    /// Map this command onto its Pixela request. `today` fills in a missing
    /// date for `add`.
    pub fn to_request(&self, cfg: &Config, today: PixelDate) -> Result<PixelaRequest> {
        let graphs = [cfg.username.as_str(), "graphs"];

        let req = match self {
            Command::CreateUser => PixelaRequest {
                method: Method::POST,
                url: endpoint_url(cfg, &[])?,
                body: Some(Payload::CreateUser(CreateUserRequest {
                    token: cfg.token.clone(),
                    username: cfg.username.clone(),
                    agree_terms_of_service: "yes",
                    not_minor: "yes",
                })),
                authenticated: false,
                graph: None,
            },
            Command::CreateGraph { graph, name, unit, kind, color } => {
                let gid = cfg.resolve_graph(graph.as_deref())?;
                PixelaRequest {
                    method: Method::POST,
                    url: endpoint_url(cfg, &graphs)?,
                    body: Some(Payload::CreateGraph(CreateGraphRequest {
                        id: gid.clone(),
                        name: name.clone(),
                        unit: unit.clone(),
                        kind: *kind,
                        color: *color,
                    })),
                    authenticated: true,
                    graph: Some(gid),
                }
            }
            Command::AddPixel { graph, date, quantity } => {
                let gid = cfg.resolve_graph(graph.as_deref())?;
                let url = endpoint_url(cfg, &[graphs[0], graphs[1], gid.as_str()])?;
                PixelaRequest {
                    method: Method::POST,
                    url,
                    body: Some(Payload::PostPixel(PostPixelRequest {
                        date: date.unwrap_or(today).to_string(),
                        quantity: quantity.to_string(),
                    })),
                    authenticated: true,
                    graph: Some(gid),
                }
            }
            Command::UpdatePixel { graph, date, quantity } => {
                let gid = cfg.resolve_graph(graph.as_deref())?;
                let day = date.to_string();
                let url = endpoint_url(cfg, &[graphs[0], graphs[1], gid.as_str(), day.as_str()])?;
                PixelaRequest {
                    method: Method::PUT,
                    url,
                    body: Some(Payload::UpdatePixel(UpdatePixelRequest {
                        quantity: quantity.to_string(),
                    })),
                    authenticated: true,
                    graph: Some(gid),
                }
            }
            Command::DeletePixel { graph, date } => {
                let gid = cfg.resolve_graph(graph.as_deref())?;
                let day = date.to_string();
                let url = endpoint_url(cfg, &[graphs[0], graphs[1], gid.as_str(), day.as_str()])?;
                PixelaRequest {
                    method: Method::DELETE,
                    url,
                    body: None,
                    authenticated: true,
                    graph: Some(gid),
                }
            }
        };
        Ok(req)
    }
}

/// The configured endpoint with `segments` appended, each percent-encoded
/// as a single path segment.
pub fn endpoint_url(cfg: &Config, segments: &[&str]) -> Result<Url> {
    let invalid = |why: &str| Error::config(format!("invalid PIXELA_ENDPOINT '{}': {}", cfg.endpoint, why));
    let mut url = Url::parse(&cfg.endpoint).map_err(|e| invalid(&e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("not a base URL"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
