use super::server;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::maps::{ImageAttributes, MapRequest, StaticMapBuilder};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Super Rentals",
    about = "Serve rental listings and static map images",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the map image descriptor for a set of coordinates
    Map(MapArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct MapArgs {
    /// Latitude of the map centre
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) lat: f64,
    /// Longitude of the map centre
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) lng: f64,
    /// Zoom level
    #[arg(long, default_value_t = 10)]
    pub(crate) zoom: u32,
    /// Image width in CSS pixels
    #[arg(long, default_value_t = 150)]
    pub(crate) width: u32,
    /// Image height in CSS pixels
    #[arg(long, default_value_t = 150)]
    pub(crate) height: u32,
    /// Alternative text (defaults to the coordinates)
    #[arg(long)]
    pub(crate) alt: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Map(args) => run_map(args),
    }
}

fn run_map(args: MapArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let builder = StaticMapBuilder::new(config.map.access_token);
    println!("{}", render_map(&builder, args)?);
    Ok(())
}

fn render_map(builder: &StaticMapBuilder, args: MapArgs) -> Result<String, AppError> {
    let mut attributes = ImageAttributes::new();
    if let Some(alt) = args.alt {
        attributes.insert("alt", alt);
    }
    let request = MapRequest::new(args.lat, args.lng, args.zoom, args.width, args.height);
    let image = builder.image(&request, &attributes);

    Ok(serde_json::to_string_pretty(&image)?)
}
