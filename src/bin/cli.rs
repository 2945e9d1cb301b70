//! Clinicbook CLI
//!
//! Command-line interface for clinic operators:
//! - Submit and review appointments
//! - Curate the gallery
//! - Log in and manage the admin password
//! - Seed the default gallery and generate a config file

use clap::{Parser, Subcommand};
use clinicbook::client::{ClientError, ClinicClient};
use clinicbook::config::{generate_default_config, Config};
use clinicbook::storage::{
    seed_gallery, Appointment, AppointmentStatus, ClinicStore, GalleryImage, ImageCategory,
    NewAppointment,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "clinicbook-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Operator tools for the Clinicbook dental clinic API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, env = "CLINICBOOK_API_URL", default_value = "http://localhost:8001", global = true)]
    pub api_url: String,

    /// Admin bearer token (from `login`)
    #[arg(long, env = "CLINICBOOK_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a booking request
    Book {
        /// Patient name
        #[arg(long)]
        name: String,
        /// Contact phone number
        #[arg(long)]
        phone: String,
        /// Requested date (e.g. 2024-06-01)
        #[arg(long)]
        date: String,
        /// Requested service
        #[arg(long)]
        service: String,
        #[arg(long)]
        email: Option<String>,
        /// Preferred time (e.g. "10:00 AM")
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        message: Option<String>,
    },

    /// List appointments (admin)
    Appointments,

    /// Change an appointment's status (admin)
    SetStatus {
        /// Appointment ID
        id: String,
        /// pending, confirmed or cancelled
        status: String,
    },

    /// Manage gallery images
    Gallery {
        #[command(subcommand)]
        action: GalleryCommand,
    },

    /// Log in and print a bearer token
    Login {
        #[arg(short, long, default_value = "admin")]
        username: String,
        #[arg(short, long, env = "CLINICBOOK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Change the admin password (admin)
    ChangePassword {
        #[arg(long)]
        old_password: String,
        #[arg(long)]
        new_password: String,
    },

    /// Show server status
    Status,

    /// Insert the default gallery into a local store if it is empty
    Seed {
        /// Data directory (default: from config)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum GalleryCommand {
    /// List gallery images
    List,
    /// Add an image by URL (admin)
    Add {
        url: String,
        title: String,
        /// clinic, equipment, team or patients
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete an image (admin)
    Delete { id: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut client = ClinicClient::new(&cli.api_url)?;
    if let Some(token) = &cli.token {
        client = client.with_token(token);
    }
    let json = cli.format == "json";

    match cli.command {
        Commands::Book {
            name,
            phone,
            date,
            service,
            email,
            time,
            message,
        } => {
            let input = NewAppointment {
                name,
                phone,
                email,
                date,
                time,
                service,
                message,
            };
            let appointment = client.create_appointment(input).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&appointment)?);
            } else {
                println!(
                    "Booked {} for {} on {} ({})",
                    appointment.service, appointment.name, appointment.date, appointment.id
                );
            }
        }

        Commands::Appointments => {
            let appointments = client.list_appointments().await.map_err(hint_login)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&appointments)?);
            } else {
                print_appointments(&appointments);
            }
        }

        Commands::SetStatus { id, status } => {
            let status: AppointmentStatus = status.parse()?;
            let appointment = client
                .update_appointment_status(&id, status)
                .await
                .map_err(hint_login)?;
            println!("Appointment {} is now {}", appointment.id, appointment.status);
        }

        Commands::Gallery { action } => match action {
            GalleryCommand::List => {
                let images = client.list_gallery_images().await?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&images)?);
                } else {
                    print_gallery(&images);
                }
            }
            GalleryCommand::Add {
                url,
                title,
                category,
            } => {
                let category = category
                    .as_deref()
                    .map(str::parse::<ImageCategory>)
                    .transpose()?;
                let image = client
                    .create_gallery_image(&url, &title, category)
                    .await
                    .map_err(hint_login)?;
                println!("Added '{}' [{}] ({})", image.title, image.category, image.id);
            }
            GalleryCommand::Delete { id } => {
                client.delete_gallery_image(&id).await.map_err(hint_login)?;
                println!("Deleted gallery image {}", id);
            }
        },

        Commands::Login { username, password } => {
            let login = client.login(&username, &password).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&login)?);
            } else {
                println!("Logged in as {} until {}", login.username, login.expires_at);
                println!();
                println!("export CLINICBOOK_TOKEN={}", login.token);
            }
        }

        Commands::ChangePassword {
            old_password,
            new_password,
        } => {
            let response = client
                .change_password(&old_password, &new_password)
                .await
                .map_err(hint_login)?;
            println!("{}", response.message);
        }

        Commands::Status => {
            let health = client.health().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&health)?);
            } else {
                println!("Clinicbook v{}", health.version);
                println!();
                println!("API Status: {}", health.status);
                println!("Storage: {}", health.storage);
                println!("  Appointments: {}", health.appointments);
                println!("  Gallery images: {}", health.gallery_images);
                println!();
                println!("Uptime: {}", format_duration(health.uptime_seconds));
            }
        }

        Commands::Seed { data_dir } => {
            let data_dir = data_dir
                .unwrap_or_else(|| PathBuf::from(Config::load_default().storage.data_dir));
            let store = ClinicStore::open(&data_dir)?;

            let inserted = seed_gallery(&store)?;
            if inserted > 0 {
                println!("Seeded {} gallery images into {:?}", inserted, data_dir);
            } else {
                println!("Gallery already has images. Skipping seed.");
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Wrote default config to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Point the operator at `login` when an admin call is rejected
fn hint_login(err: ClientError) -> anyhow::Error {
    match err {
        ClientError::Unauthorized(_) => {
            anyhow::Error::new(err).context("Run `clinicbook-cli login` and set CLINICBOOK_TOKEN")
        }
        other => other.into(),
    }
}

fn print_appointments(appointments: &[Appointment]) {
    if appointments.is_empty() {
        println!("No appointments");
        return;
    }

    println!(
        "{:<36}  {:<10}  {:<12}  {:<8}  {:<20}  {}",
        "ID", "STATUS", "DATE", "TIME", "NAME", "SERVICE"
    );
    for a in appointments {
        println!(
            "{:<36}  {:<10}  {:<12}  {:<8}  {:<20}  {}",
            a.id,
            a.status,
            a.date,
            a.time.as_deref().unwrap_or("-"),
            truncate(&a.name, 20),
            a.service
        );
    }
}

fn print_gallery(images: &[GalleryImage]) {
    if images.is_empty() {
        println!("Gallery is empty");
        return;
    }

    println!("{:<36}  {:<10}  {:<30}  {}", "ID", "CATEGORY", "TITLE", "URL");
    for image in images {
        println!(
            "{:<36}  {:<10}  {:<30}  {}",
            image.id,
            image.category,
            truncate(&image.title, 30),
            image.url
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

fn format_duration(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m {}s", minutes, seconds % 60)
    }
}
