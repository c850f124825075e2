// UI layer: runs one command end to end. Builds the request, asks for
// confirmation where needed, shows a spinner while the call is in flight,
// and prints Pixela's answer.

use crate::api::{PixelaClient, PixelaResponse};
use crate::command::{endpoint_url, Command, Payload, PixelaRequest};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::pixel::PixelDate;
use console::Term;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Url;
use std::time::Duration;
use tracing::info;

/// Run a validated command against Pixela. `terms_accepted` skips the
/// create-user confirmation prompt, which is only shown on a terminal.
pub fn run(cmd: &Command, cfg: &Config, terms_accepted: bool) -> Result<()> {
    let req = cmd.to_request(cfg, PixelDate::today())?;

    if matches!(cmd, Command::CreateUser) && !terms_accepted && Term::stderr().is_term() {
        confirm_terms()?;
    }

    let api = PixelaClient::new(&cfg.token)?;
    let resp = with_spinner(&format!("{}...", progress_label(cmd)), || api.send(&req))?;
    info!(command = cmd.name(), "request succeeded");

    println!("{}", summary(cmd, &req, cfg, &resp));
    if let (Command::CreateGraph { .. }, Some(gid)) = (cmd, &req.graph) {
        println!("Graph URL: {}", graph_page_url(cfg, gid)?);
    }
    Ok(())
}

/// Ask the user to accept Pixela's terms of service and confirm they are not a minor.
fn confirm_terms() -> Result<()> {
    let accepted = Confirm::new()
        .with_prompt("Creating a Pixela user means agreeing to the terms of service (https://github.com/a-know/Pixela/wiki/Terms-of-Service) and confirming you are not a minor. Continue?")
        .default(false)
        .interact()
        .map_err(|e| Error::validation(format!("cannot prompt for confirmation ({}); pass --yes to accept", e)))?;
    if !accepted {
        return Err(Error::validation("terms of service not accepted; user not created"));
    }
    Ok(())
}

/// Run `f` while a spinner is drawn on stderr. indicatif hides the spinner
/// when stderr is not a terminal.
fn with_spinner<T>(msg: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let out = f();
    spinner.finish_and_clear();
    out
}

fn progress_label(cmd: &Command) -> &'static str {
    match cmd {
        Command::CreateUser => "Creating user",
        Command::CreateGraph { .. } => "Creating graph",
        Command::AddPixel { .. } => "Adding pixel",
        Command::UpdatePixel { .. } => "Updating pixel",
        Command::DeletePixel { .. } => "Deleting pixel",
    }
}

/// Public HTML page of a graph.
pub fn graph_page_url(cfg: &Config, graph: &str) -> Result<Url> {
    let page = format!("{}.html", graph);
    endpoint_url(cfg, &[cfg.username.as_str(), "graphs", page.as_str()])
}

/// One-line human-readable outcome of a successful call.
pub fn summary(cmd: &Command, req: &PixelaRequest, cfg: &Config, resp: &PixelaResponse) -> String {
    let graph = req.graph.as_deref().unwrap_or_default();
    let what = match (cmd, &req.body) {
        (Command::CreateUser, _) => format!("User '{}' created", cfg.username),
        (Command::CreateGraph { .. }, _) => format!("Graph '{}' created", graph),
        (Command::AddPixel { .. }, Some(Payload::PostPixel(p))) => {
            format!("Added {} to '{}' on {}", p.quantity, graph, p.date)
        }
        (Command::UpdatePixel { date, quantity, .. }, _) => {
            format!("Set '{}' on {} to {}", graph, date, quantity)
        }
        (Command::DeletePixel { date, .. }, _) => format!("Deleted pixel on {} from '{}'", date, graph),
        (Command::AddPixel { .. }, _) => format!("Added pixel to '{}'", graph),
    };
    if resp.message.is_empty() {
        what
    } else {
        format!("{}: {}", what, resp.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> Config {
        Config {
            username: "alice".into(),
            token: "secret123".into(),
            graph_id: "coding".into(),
            endpoint: "https://pixe.la/v1/users".into(),
        }
    }

    fn ok() -> PixelaResponse {
        PixelaResponse { message: "Success.".into(), is_success: true }
    }

    #[test]
    fn add_summary_names_graph_date_and_quantity() {
        let cmd = Command::AddPixel { graph: None, date: None, quantity: "2".parse().unwrap() };
        let req = cmd.to_request(&cfg(), "20250101".parse().unwrap()).unwrap();
        assert_eq!(summary(&cmd, &req, &cfg(), &ok()), "Added 2 to 'coding' on 20250101: Success.");
    }

    #[test]
    fn delete_summary() {
        let cmd = Command::DeletePixel { graph: Some("run".into()), date: "20250102".parse().unwrap() };
        let req = cmd.to_request(&cfg(), "20250101".parse().unwrap()).unwrap();
        assert_eq!(summary(&cmd, &req, &cfg(), &ok()), "Deleted pixel on 20250102 from 'run': Success.");
    }

    #[test]
    fn graph_page_url_uses_endpoint() {
        assert_eq!(
            graph_page_url(&cfg(), "coding").unwrap().as_str(),
            "https://pixe.la/v1/users/alice/graphs/coding.html"
        );
    }
}
