// Copyright (C) 2026 Brian Johnson
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use navilink::charset::resolve;
use navilink::device_config::{
    FieldSpec, AUTO_OFF, CURRENT_TIME_ZONE, DISTANCE_INTERVAL, HOME_TIME_ZONE, LANGUAGE, LIGHT_DURATION,
    SPEED_INTERVAL, TIME_INTERVAL, TURN_RADIUS, UNITS,
};
use navilink::{
    from_interchange, read_gpx, to_interchange, write_gpx, Error, Feature, GlyphMap, NaviDevice, Result, Settings,
    Strictness,
};

#[derive(Parser)]
#[command(name = "navilink")]
#[command(about = "Exchange tracks, routes and POIs with navi2move GPS receivers", long_about = None)]
#[command(disable_help_subcommand = true)]
struct Cli {
    /// Serial port to use (e.g., /dev/ttyUSB0 or COM1)
    #[arg(short, long)]
    port: Option<String>,

    /// Command baud rate
    #[arg(short, long)]
    baud: Option<u32>,

    /// Settings file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct OutputArgs {
    /// Output file name prefix
    #[arg(short, long, value_name = "PREFIX")]
    output_prefix: Option<String>,

    /// Do not prefix file names with the recording date
    #[arg(long)]
    no_date_prefix: bool,

    /// Write the downloaded records as hex lines to FILE
    #[arg(long, value_name = "FILE")]
    dump_raw: Option<PathBuf>,
}

impl OutputArgs {
    fn path(&self, default_prefix: &str, suffix: &str, date: Option<String>) -> PathBuf {
        let prefix = self.output_prefix.as_deref().unwrap_or(default_prefix);
        match date {
            Some(date) if !self.no_date_prefix => PathBuf::from(format!("{}_{}{}.gpx", date, prefix, suffix)),
            _ => PathBuf::from(format!("{}{}.gpx", prefix, suffix)),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Download all tracks, one GPX file per track
    GetTracks {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Download the route
    GetRoute {
        #[command(flatten)]
        output: OutputArgs,

        /// Save the route's custom glyphs to FILE
        #[arg(long, value_name = "FILE")]
        save_glyphs: Option<PathBuf>,
    },
    /// Replace the route with the first route of a GPX file
    SendRoute {
        /// GPX file to send
        file: PathBuf,

        /// Extra glyph file for characters missing from the built-in set
        #[arg(long, value_name = "FILE")]
        glyphs: Option<PathBuf>,
    },
    /// Download the points of interest
    GetPois {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Replace the points of interest with the waypoints of a GPX file
    SendPois {
        /// GPX file to send
        file: PathBuf,
    },
    /// Print the device settings
    PrintConfig,
    /// Change device settings
    SetConfig(SetConfigArgs),
    /// Print the bitmap used to draw a character
    ShowGlyph {
        character: char,

        /// Extra glyph file
        #[arg(long, value_name = "FILE")]
        glyphs: Option<PathBuf>,
    },
}

#[derive(Args)]
struct SetConfigArgs {
    /// en, fr, de, nl, it or es
    #[arg(long)]
    language: Option<String>,
    /// Seconds (10, 30, 60), on or off
    #[arg(long)]
    light_duration: Option<String>,
    /// Minutes (10, 30, 60) or off
    #[arg(long)]
    auto_off: Option<String>,
    /// Metres (5, 10, 20, 30, 50)
    #[arg(long)]
    turn_radius: Option<String>,
    /// km or mile
    #[arg(long)]
    units: Option<String>,
    /// Hours from UTC, -12 to 12
    #[arg(long, allow_hyphen_values = true)]
    home_timezone: Option<String>,
    /// Hours from UTC, -12 to 12
    #[arg(long, allow_hyphen_values = true)]
    current_timezone: Option<String>,
    /// Longest pause between track points in seconds, 0 disables
    #[arg(long)]
    time_interval: Option<String>,
    /// Longest distance between track points in metres, 0 disables
    #[arg(long)]
    distance_interval: Option<String>,
    /// Largest speed change between track points in m/s, 0 disables
    #[arg(long)]
    speed_interval: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Failed to load settings: {}", e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    if let Some(port) = &cli.port {
        settings.link.port = Some(port.clone());
    }
    if let Some(baud) = cli.baud {
        settings.link.baud_rate = baud;
    }

    init_logging(&settings.logging.level, cli.verbose);

    if let Err(e) = run(cli.command, settings) {
        report(&e);
        std::process::exit(1);
    }
}

fn init_logging(level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn report(error: &Error) {
    eprintln!("Error: {}", error);
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = std::error::Error::source(cause);
    }
}

fn run(command: Commands, settings: Settings) -> Result<()> {
    if let Commands::ShowGlyph { character, glyphs } = &command {
        return show_glyph(*character, glyphs.as_deref());
    }

    let mut device = NaviDevice::open(settings.link)?;
    let token = device.cancel_token();
    if let Err(e) = ctrlc::set_handler(move || {
        if let Err(e) = token.cancel() {
            eprintln!("{}", e);
        }
    }) {
        warn!("Ctrl-C handler not installed: {}", e);
    }

    match command {
        Commands::GetTracks { output } => get_tracks(&mut device, &output),
        Commands::GetRoute { output, save_glyphs } => get_route(&mut device, &output, save_glyphs.as_deref()),
        Commands::SendRoute { file, glyphs } => send_route(&mut device, &file, glyphs.as_deref()),
        Commands::GetPois { output } => get_pois(&mut device, &output),
        Commands::SendPois { file } => send_pois(&mut device, &file),
        Commands::PrintConfig => {
            println!("{}", device.read_config()?);
            Ok(())
        }
        Commands::SetConfig(args) => set_config(&mut device, &args),
        Commands::ShowGlyph { .. } => Ok(()),
    }
}

fn load_glyphs(extra: Option<&Path>) -> Result<GlyphMap> {
    let mut glyphs = GlyphMap::builtin();
    if let Some(path) = extra {
        glyphs.extend(GlyphMap::load(path)?);
    }
    Ok(glyphs)
}

fn get_tracks(device: &mut NaviDevice, output: &OutputArgs) -> Result<()> {
    device.set_raw_dump(output.dump_raw.clone());
    let download = device.download_tracks()?;
    if download.value.is_empty() {
        println!("No tracks stored.");
    }
    for (index, track) in download.value.into_iter().enumerate() {
        let path = output.path("track", &format!("{:03}", index), track.date_prefix());
        let points = track.points.len();
        write_gpx(&path, &to_interchange(&[Feature::Track(track)])?)?;
        println!("Wrote {} points to {}", points, path.display());
    }
    download.interruption.map_or(Ok(()), Err)
}

fn get_route(device: &mut NaviDevice, output: &OutputArgs, save_glyphs: Option<&Path>) -> Result<()> {
    device.set_raw_dump(output.dump_raw.clone());
    let downloaded = device.download_route(Strictness::Lenient)?;
    let path = output.path("route", "", None);
    let points = downloaded.route.points.len();
    write_gpx(&path, &to_interchange(&[Feature::Route(downloaded.route)])?)?;
    println!("Wrote {} route points to {}", points, path.display());

    if let Some(glyph_path) = save_glyphs {
        downloaded.glyphs.save(glyph_path)?;
        println!("Saved {} glyphs to {}", downloaded.glyphs.len(), glyph_path.display());
    }
    Ok(())
}

fn send_route(device: &mut NaviDevice, file: &Path, glyph_file: Option<&Path>) -> Result<()> {
    let glyphs = load_glyphs(glyph_file)?;
    let mut routes = from_interchange(&read_gpx(file)?)?
        .into_iter()
        .filter_map(|f| match f {
            Feature::Route(route) => Some(route),
            _ => None,
        });
    let route = routes.next().ok_or_else(|| Error::RecordMalformed {
        kind: "route",
        reason: format!("{} contains no route", file.display()),
    })?;
    if routes.next().is_some() {
        warn!("{} contains more than one route, sending the first", file.display());
    }

    device.upload_route(&route, &glyphs)?;
    println!("Sent {} route points.", route.points.len());
    Ok(())
}

fn get_pois(device: &mut NaviDevice, output: &OutputArgs) -> Result<()> {
    device.set_raw_dump(output.dump_raw.clone());
    let download = device.download_waypoints()?;
    let path = output.path("pois", "", navilink::waypoint::waypoints_date_prefix(&download.value));
    let count = download.value.len();
    let features: Vec<Feature> = download.value.into_iter().map(Feature::Waypoint).collect();
    write_gpx(&path, &to_interchange(&features)?)?;
    println!("Wrote {} POIs to {}", count, path.display());
    download.interruption.map_or(Ok(()), Err)
}

fn send_pois(device: &mut NaviDevice, file: &Path) -> Result<()> {
    let waypoints: Vec<_> = from_interchange(&read_gpx(file)?)?
        .into_iter()
        .filter_map(|f| match f {
            Feature::Waypoint(waypoint) => Some(waypoint),
            _ => None,
        })
        .collect();
    if waypoints.is_empty() {
        warn!("{} contains no waypoints, the device's POIs will be cleared", file.display());
    }
    device.upload_waypoints(&waypoints)?;
    println!("Sent {} POIs.", waypoints.len());
    Ok(())
}

fn apply(field: &FieldSpec, text: &Option<String>, target: &mut i32) -> Result<bool> {
    match text {
        Some(text) => {
            *target = field.parse(text)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

fn set_config(device: &mut NaviDevice, args: &SetConfigArgs) -> Result<()> {
    let mut config = device.read_config()?;

    let general = &mut config.general;
    let mut general_changed = false;
    general_changed |= apply(&LANGUAGE, &args.language, &mut general.language)?;
    general_changed |= apply(&LIGHT_DURATION, &args.light_duration, &mut general.light_duration)?;
    general_changed |= apply(&AUTO_OFF, &args.auto_off, &mut general.auto_off)?;
    general_changed |= apply(&TURN_RADIUS, &args.turn_radius, &mut general.turn_radius)?;
    general_changed |= apply(&UNITS, &args.units, &mut general.units)?;
    general_changed |= apply(&HOME_TIME_ZONE, &args.home_timezone, &mut general.home_time_zone)?;
    general_changed |= apply(&CURRENT_TIME_ZONE, &args.current_timezone, &mut general.current_time_zone)?;

    let recording = &mut config.recording;
    let mut recording_changed = false;
    recording_changed |= apply(&TIME_INTERVAL, &args.time_interval, &mut recording.time_interval)?;
    recording_changed |= apply(&DISTANCE_INTERVAL, &args.distance_interval, &mut recording.distance_interval)?;
    recording_changed |= apply(&SPEED_INTERVAL, &args.speed_interval, &mut recording.speed_interval)?;

    if general_changed {
        info!("writing device settings");
        device.write_general_config(&config.general)?;
    }
    if recording_changed {
        info!("writing recording settings");
        device.write_recording_config(&config.recording)?;
    }
    if !general_changed && !recording_changed {
        println!("Nothing to change.");
    }

    println!("{}", device.read_config()?);
    Ok(())
}

fn show_glyph(character: char, glyph_file: Option<&Path>) -> Result<()> {
    let glyphs = load_glyphs(glyph_file)?;
    let glyph = resolve(character, &glyphs).ok_or(Error::UnsupportedCharacter(character))?;
    print!("{}", glyph);
    Ok(())
}
