use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use catalog::Catalog;
use clap::{Args, Parser, Subcommand};
use registration::{
    RegistrationModal, RegistrationRelay, RelayConfig, SubmissionState, Web3FormsRelay,
};
use shared::{domain::EventStatus, protocol::AttendeeCount};
use site::{export_site, Site, SiteSettings};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    /// Event catalog in TOML; the built-in catalog is used when omitted.
    #[arg(long)]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List {
        #[arg(long)]
        status: Option<EventStatus>,
    },
    Show {
        event_id: String,
    },
    /// Render every page into a directory that can be served as plain files.
    Build {
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        assets: Option<PathBuf>,
        /// Origin of the server that accepts registration posts.
        #[arg(long, default_value = "")]
        registration_base: String,
    },
    Register(RegisterArgs),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    event_id: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long, default_value = "1")]
    attendees: AttendeeCount,
    #[arg(long, default_value = "")]
    requirements: String,
    #[arg(long, env = "WEB3FORMS_ACCESS_KEY", hide_env_values = true)]
    access_key: String,
    #[arg(long)]
    endpoint: Option<String>,
}

impl RegisterArgs {
    fn relay(&self) -> Web3FormsRelay {
        let mut config = RelayConfig::new(self.access_key.as_str());
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint.as_str());
        }
        Web3FormsRelay::new(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("failed to load catalog '{}'", path.display()))?,
        None => Catalog::builtin().context("built-in catalog is invalid")?,
    };

    match cli.command {
        Command::List { status } => {
            let events: Vec<_> = match status {
                Some(status) => catalog.list_by_status(status),
                None => catalog.list_all().iter().collect(),
            };
            for event in events {
                println!(
                    "{}\t{}\t{}\t{}",
                    event.id, event.status, event.date, event.title
                );
            }
        }
        Command::Show { event_id } => {
            let event = catalog
                .find_by_id(&event_id)
                .with_context(|| format!("no event with id '{event_id}'"))?;
            println!("{} ({})", event.title, event.status.label());
            println!("  {}", event.subtitle);
            println!("  date:   {}", event.date);
            println!("  time:   {}", event.time_range());
            println!("  venue:  {}", event.display_venue());
            if let Some(price) = &event.ticket_price {
                println!("  entry:  {price}");
            }
            let registration = match (&event.registration_link, event.offers_registration()) {
                (Some(link), true) => link.as_str(),
                (None, true) => "open",
                (_, false) => "closed",
            };
            println!("  registration: {registration}");
            if let Some(video) = &event.video_url {
                println!("  video:  {video}");
            }
        }
        Command::Build {
            out,
            assets,
            registration_base,
        } => {
            let settings = SiteSettings {
                registration_base,
                ..SiteSettings::default()
            };
            let site = Site::new(Arc::new(catalog), settings);
            let report = export_site(&site, &out, assets.as_deref())?;
            println!(
                "wrote {} pages and {} assets to {}",
                report.pages_written,
                report.assets_copied,
                out.display()
            );
        }
        Command::Register(args) => {
            let relay = args.relay();
            println!("{}", register(&catalog, args, &relay).await?);
        }
    }

    Ok(())
}

/// Runs one registration through the dialog state machine and returns the confirmation line.
async fn register(
    catalog: &Catalog,
    args: RegisterArgs,
    relay: &dyn RegistrationRelay,
) -> Result<String> {
    let event_id = args.event_id;
    let event = catalog
        .find_by_id(&event_id)
        .with_context(|| format!("no event with id '{event_id}'"))?;
    if !event.offers_registration() {
        bail!("registration is not open for '{event_id}'");
    }
    if let Some(link) = &event.registration_link {
        bail!("'{event_id}' takes registrations at {link}");
    }

    let mut modal = RegistrationModal::new(event.title.clone());
    modal.open();
    modal.edit_form(|form| {
        form.name = args.name;
        form.email = args.email;
        form.phone = args.phone;
        form.attendees = args.attendees;
        form.requirements = args.requirements;
    })?;

    let state = modal.submit(relay).await?.clone();
    match state {
        SubmissionState::Success => {
            info!(event = %event_id, "registration relayed");
            Ok(format!("Registered for {}.", event.title))
        }
        SubmissionState::Error { message } => bail!(message),
        other => bail!("registration ended in unexpected state {other:?}"),
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
