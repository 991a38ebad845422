use std::collections::BTreeSet;
use std::fmt::Write as _;

use chrono::{Local, NaiveDate, NaiveTime};
use clap::Subcommand;
use earthguard_core::{AppConfig, CategoryTag, PickupRequest, TIME_SLOTS};
use earthguard_pickups::{PickupClient, PickupRecord};

/// Sub-commands available under `pickups`.
#[derive(Debug, Subcommand)]
pub enum PickupCommands {
    /// List pickups recorded by the pickup API
    List,
    /// Schedule a new pickup
    Schedule {
        /// Pickup date (YYYY-MM-DD), after today
        #[arg(long)]
        date: NaiveDate,
        /// Hourly slot between 09:00 and 17:00
        #[arg(long, value_parser = parse_time_slot)]
        time: NaiveTime,
        /// Waste category; repeat for several
        #[arg(long = "category", required = true)]
        categories: Vec<CategoryTag>,
        /// Pickup address
        #[arg(long)]
        address: String,
        /// Notes for the collection crew
        #[arg(long)]
        instructions: Option<String>,
    },
    /// Cancel a pickup by id
    Cancel {
        /// Pickup id as shown by `pickups list`
        id: i64,
    },
}

fn parse_time_slot(raw: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").map_err(|_| {
        format!(
            "expected an HH:MM slot, one of: {}",
            TIME_SLOTS.join(", ")
        )
    })
}

/// Run a `pickups` sub-command against the configured pickup API.
///
/// # Errors
///
/// Returns an error if local validation fails, the client cannot be built,
/// or the API rejects the request.
pub(crate) async fn run_pickups(config: &AppConfig, command: PickupCommands) -> anyhow::Result<()> {
    let client = PickupClient::new(
        &config.pickup_api_base_url,
        config.pickup_api_timeout_secs,
        config.pickup_user_id,
    )?;

    match command {
        PickupCommands::List => {
            let pickups = client.list_pickups().await?;
            print!("{}", render_pickups(&pickups));
        }
        PickupCommands::Schedule {
            date,
            time,
            categories,
            address,
            instructions,
        } => {
            let request = PickupRequest {
                date,
                time_slot: time,
                categories: categories.into_iter().collect::<BTreeSet<_>>(),
                address,
                special_instructions: instructions,
            };
            request.validate(Local::now().date_naive())?;

            let record = client.schedule_pickup(&request).await?;
            println!(
                "scheduled pickup #{} on {} at {} ({})",
                record.id,
                record.date,
                record.time,
                record.types.join(", ")
            );
        }
        PickupCommands::Cancel { id } => {
            let ack = client.cancel_pickup(id).await?;
            println!("{}", ack.message);
        }
    }
    Ok(())
}

pub(crate) fn render_pickups(pickups: &[PickupRecord]) -> String {
    if pickups.is_empty() {
        return "no pickups scheduled; use `pickups schedule` to book one\n".to_string();
    }

    let mut out = format!(
        "{:<6}{:<12}{:<10}{:<11}{:<28}ADDRESS\n",
        "ID", "DATE", "TIME", "STATUS", "TYPES"
    );
    for pickup in pickups {
        let _ = writeln!(
            out,
            "{:<6}{:<12}{:<10}{:<11}{:<28}{}",
            pickup.id,
            pickup.date.to_string(),
            pickup.time,
            pickup.status.to_string(),
            pickup.types.join(", "),
            pickup.address
        );
    }
    out
}
