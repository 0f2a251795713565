use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

use locale_gateway::config::read_config;
use locale_gateway::http::{GatewayState, RequestContext};
use locale_gateway::language::{parse_accept_language, LanguageRedirect};
use locale_gateway::redirect::Flow;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Offline diagnostics for the locale gateway", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how an Accept-Language header is ranked
    ParseHeader {
        /// Raw header value, e.g. "de-CH,de;q=0.9"
        value: String,
    },
    /// Explain what the gateway would do for a URL
    Explain {
        #[arg(short, long, env = "GATEWAY_CONFIG")]
        config: PathBuf,

        /// Absolute request URL
        #[arg(short, long)]
        url: String,

        /// Accept-Language header to simulate
        #[arg(short, long)]
        accept_language: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::ParseHeader { value } => {
            let preferences = parse_accept_language(&value);
            println!("{}", serde_json::to_string_pretty(&preferences)?);
        }
        Commands::Explain {
            config,
            url,
            accept_language,
        } => {
            let (config, warnings) = read_config(&config)?;
            for warning in &warnings {
                eprintln!("warning: {}", warning);
            }
            let state = GatewayState::from_config(&config)?;
            let request =
                RequestContext::from_url(&url, accept_language, &state.admin_path_prefixes);

            let resolver =
                LanguageRedirect::new(state.registry.as_ref(), state.language_redirect_enabled);

            let report = match state.process(&request) {
                Ok(Flow::Continue) => json!({
                    "request": request,
                    "needs_redirect": resolver.needs_redirect(&request.absolute_url),
                    "outcome": "continue",
                }),
                Ok(Flow::Terminated(action)) => json!({
                    "request": request,
                    "needs_redirect": resolver.needs_redirect(&request.absolute_url),
                    "outcome": "redirect",
                    "status": action.status.as_u16(),
                    "location": action.location,
                    "decision": resolver.decide(&request).ok().flatten(),
                }),
                Err(e) => json!({
                    "request": request,
                    "outcome": "error",
                    "error": e.to_string(),
                }),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
