//! Person RPC client binary
//!
//! Run with: cargo run --bin person-client -- --help

use anyhow::Result;
use clap::{Parser, Subcommand};
use person_rpc::client::{ClientConfig, PersonClient};
use person_rpc::demo::run_demo;
use person_rpc::{Person, PersonFields, PersonId};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "person-client")]
#[command(about = "Person record gRPC client")]
struct Args {
    /// Server address (gRPC endpoint)
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    server_addr: String,

    /// Deadline for each request in seconds (0 = no deadline)
    #[arg(long, default_value = "15")]
    timeout_secs: u64,

    /// Print records as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Defaults to `demo`
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create, read, update and delete one record
    Demo,
    /// Create a record
    Create {
        name: String,
        email: String,
        phone_number: String,
    },
    /// Read a record by id
    Read { id: PersonId },
    /// Overwrite a record's fields
    Update {
        id: PersonId,
        name: String,
        email: String,
        phone_number: String,
    },
    /// Delete a record by id
    Delete { id: PersonId },
}

async fn connect(args: &Args) -> Result<PersonClient> {
    let config = ClientConfig {
        server_addr: args.server_addr.clone(),
        request_timeout: (args.timeout_secs > 0).then(|| Duration::from_secs(args.timeout_secs)),
        ..Default::default()
    };

    let client = PersonClient::new(config);
    client.connect().await?;
    Ok(client)
}

fn print_person(person: &Person, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(person)?);
    } else {
        println!(
            "id={} name={} email={} phone_number={}",
            person.id, person.name, person.email, person.phone_number
        );
    }
    Ok(())
}

async fn cmd_demo(client: &PersonClient, json: bool) -> Result<()> {
    let report = run_demo(client).await?;
    print_person(&report.created, json)?;
    print_person(&report.read_back, json)?;
    println!("{}", report.update_status);
    println!("{}", report.delete_status);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .init();

    let client = connect(&args).await?;

    // Any failure ends the run with a non-zero exit
    match &args.command {
        None | Some(Commands::Demo) => cmd_demo(&client, args.json).await?,
        Some(Commands::Create {
            name,
            email,
            phone_number,
        }) => {
            let person = client
                .create(PersonFields::new(name, email, phone_number))
                .await?;
            print_person(&person, args.json)?;
        }
        Some(Commands::Read { id }) => {
            let person = client.read(*id).await?;
            print_person(&person, args.json)?;
        }
        Some(Commands::Update {
            id,
            name,
            email,
            phone_number,
        }) => {
            let status = client
                .update(*id, PersonFields::new(name, email, phone_number))
                .await?;
            println!("{}", status);
        }
        Some(Commands::Delete { id }) => {
            let status = client.delete(*id).await?;
            println!("{}", status);
        }
    }

    Ok(())
}
