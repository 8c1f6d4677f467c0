use clap::{Parser, Subcommand};
use reqwest::{Client, Response, StatusCode, Url};
use serde_json::{Map, Value};

#[derive(Parser)]
#[command(name = "booking-cli")]
#[command(about = "Command-line client for the box booking service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service status
    Health,
    /// List bookings, optionally filtered
    List {
        #[arg(long)]
        box_id: Option<String>,
        /// Day prefix, e.g. 2024-01-01
        #[arg(long)]
        date: Option<String>,
    },
    /// Show one booking
    Get { id: String },
    /// Book a box
    Create {
        box_id: String,
        start: String,
        end: String,
    },
    /// Change some fields of a booking
    Update {
        id: String,
        #[arg(long)]
        box_id: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// Cancel a booking
    Delete { id: String },
    /// Show a box's bookings ordered by start
    Schedule { box_id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = Client::new();
    let base = Url::parse(&cli.url)?;

    let res = match cli.command {
        Commands::Health => client.get(endpoint(&base, &["health"])?).send().await?,
        Commands::List { box_id, date } => {
            let mut query = Vec::new();
            if let Some(box_id) = box_id {
                query.push(("boxId", box_id));
            }
            if let Some(date) = date {
                query.push(("date", date));
            }
            client
                .get(endpoint(&base, &["bookings"])?)
                .query(&query)
                .send()
                .await?
        }
        Commands::Get { id } => client.get(endpoint(&base, &["bookings", &id])?).send().await?,
        Commands::Create { box_id, start, end } => {
            client
                .post(endpoint(&base, &["bookings"])?)
                .json(&serde_json::json!({ "boxId": box_id, "start": start, "end": end }))
                .send()
                .await?
        }
        Commands::Update { id, box_id, start, end } => {
            let mut body = Map::new();
            for (key, value) in [("boxId", box_id), ("start", start), ("end", end)] {
                if let Some(value) = value {
                    body.insert(key.to_string(), Value::String(value));
                }
            }
            client
                .patch(endpoint(&base, &["bookings", &id])?)
                .json(&body)
                .send()
                .await?
        }
        Commands::Delete { id } => client.delete(endpoint(&base, &["bookings", &id])?).send().await?,
        Commands::Schedule { box_id } => {
            client
                .get(endpoint(&base, &["boxes", &box_id, "schedule"])?)
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    if status == StatusCode::NO_CONTENT {
        println!("{}", status);
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// Append path segments to the service url, percent-encoding each one.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| "service url cannot be a base")?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
