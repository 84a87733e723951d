use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use cli::compose::{compose, read_layout};
use cli::recent_store::RecentStore;
use cli::{ApiClient, CliError, now_ms};
use rooms::recent::RecentFloorMap;
use rooms::reference;
use rooms::room::{RoomFilter, StatusFilter};
use rooms::{RoomDraft, RoomStatus, Session};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "coreflow", about = "CoreFlow rooms and floor-plan CLI")]
struct Cli {
    /// API root; every endpoint path is joined onto it.
    #[arg(long, env = "COREFLOW_BASE_URL", default_value = "http://127.0.0.1:8080/api")]
    base_url: String,

    #[arg(long, env = "COREFLOW_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    #[arg(long, env = "COREFLOW_REFRESH_TOKEN", hide_env_values = true)]
    refresh_token: Option<String>,

    /// JSON file holding the recently used floor maps.
    #[arg(long, env = "COREFLOW_RECENT_FILE", default_value = ".coreflow-recent.json")]
    recent_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Room CRUD.
    Rooms(RoomsCommand),
    /// Stored floor-plan documents.
    Floormaps(FloorMapsCommand),
    /// Recently used floor maps.
    Recent(RecentCommand),
}

#[derive(Args, Debug)]
struct RoomsCommand {
    #[command(subcommand)]
    command: RoomsSubcommand,
}

#[derive(Subcommand, Debug)]
enum RoomsSubcommand {
    List {
        /// Case-insensitive match on name, building or room number.
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        status: Option<RoomStatus>,
    },
    Get {
        room_id: i64,
    },
    Create(RoomFields),
    Update {
        room_id: i64,
        #[command(flatten)]
        fields: RoomPatch,
    },
    Delete {
        room_id: i64,
    },
}

#[derive(Args, Debug)]
struct RoomFields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    building: String,
    #[arg(long, default_value_t = 1)]
    floor: i32,
    #[arg(long, default_value = "")]
    room_no: String,
    #[arg(long)]
    capacity: u32,
    #[arg(long, default_value = "ACTIVE")]
    status: RoomStatus,
    /// Free text or a floor-plan URL.
    #[arg(long)]
    location: Option<String>,
}

#[derive(Args, Debug)]
struct RoomPatch {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    building: Option<String>,
    #[arg(long)]
    floor: Option<i32>,
    #[arg(long)]
    room_no: Option<String>,
    #[arg(long)]
    capacity: Option<u32>,
    #[arg(long)]
    status: Option<RoomStatus>,
    /// New location; pass an empty string to clear it.
    #[arg(long)]
    location: Option<String>,
}

#[derive(Args, Debug)]
struct FloorMapsCommand {
    #[command(subcommand)]
    command: FloorMapsSubcommand,
}

#[derive(Subcommand, Debug)]
enum FloorMapsSubcommand {
    List {
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Print (or save) a document's markup given any reference form.
    Fetch {
        reference: String,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Upload an SVG file.
    Upload {
        file: PathBuf,
        /// Inserted as the document's `<title>`.
        #[arg(long)]
        title: Option<String>,
    },
    /// Show the filename and document path a reference resolves to.
    Resolve {
        reference: String,
    },
    /// Build a plan from a JSON layout; optionally upload it.
    Compose {
        layout: PathBuf,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        upload: bool,
    },
}

#[derive(Args, Debug)]
struct RecentCommand {
    #[command(subcommand)]
    command: RecentSubcommand,
}

#[derive(Subcommand, Debug)]
enum RecentSubcommand {
    List,
    Clear,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "command failed");
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let recent = RecentStore::new(cli.recent_file);
    let session = Session::new(cli.access_token, cli.refresh_token);
    let mut api = ApiClient::new(cli.base_url, session);

    match cli.command {
        Command::Rooms(rooms) => run_rooms(&mut api, rooms.command).await,
        Command::Floormaps(maps) => run_floor_maps(&mut api, &recent, maps.command).await,
        Command::Recent(command) => run_recent(&recent, command.command),
    }
}

async fn run_rooms(api: &mut ApiClient, command: RoomsSubcommand) -> Result<(), CliError> {
    match command {
        RoomsSubcommand::List { query, status } => {
            let rooms = api.list_rooms().await?;
            let filter = RoomFilter { query, status: status.map_or(StatusFilter::All, StatusFilter::Only) };
            print_json(&filter.apply(&rooms))
        }
        RoomsSubcommand::Get { room_id } => print_json(&api.get_room(room_id).await?),
        RoomsSubcommand::Create(fields) => {
            let draft = RoomDraft {
                room_name: fields.name,
                building_name: fields.building,
                floor: fields.floor,
                room_no: fields.room_no,
                capacity: fields.capacity,
                status: fields.status,
                detail_location: fields.location,
            };
            print_json(&api.create_room(&draft).await?)
        }
        RoomsSubcommand::Update { room_id, fields } => {
            let current = api.get_room(room_id).await?;
            let draft = apply_patch(RoomDraft::from(&current), fields)?;
            print_json(&api.update_room(room_id, &draft).await?)
        }
        RoomsSubcommand::Delete { room_id } => {
            api.delete_room(room_id).await?;
            println!("deleted room {room_id}");
            Ok(())
        }
    }
}

fn apply_patch(mut draft: RoomDraft, patch: RoomPatch) -> Result<RoomDraft, CliError> {
    let RoomPatch { name, building, floor, room_no, capacity, status, location } = patch;
    let touched = name.is_some()
        || building.is_some()
        || floor.is_some()
        || room_no.is_some()
        || capacity.is_some()
        || status.is_some()
        || location.is_some();
    if !touched {
        return Err(CliError::EmptyUpdate);
    }
    if let Some(name) = name {
        draft.room_name = name;
    }
    if let Some(building) = building {
        draft.building_name = building;
    }
    if let Some(floor) = floor {
        draft.floor = floor;
    }
    if let Some(room_no) = room_no {
        draft.room_no = room_no;
    }
    if let Some(capacity) = capacity {
        draft.capacity = capacity;
    }
    if let Some(status) = status {
        draft.status = status;
    }
    if let Some(location) = location {
        draft.detail_location = Some(location);
    }
    Ok(draft)
}

async fn run_floor_maps(api: &mut ApiClient, recent: &RecentStore, command: FloorMapsSubcommand) -> Result<(), CliError> {
    match command {
        FloorMapsSubcommand::List { query } => {
            let entries = api.list_floor_maps().await?;
            let matching: Vec<_> = entries.iter().filter(|e| e.matches_query(&query)).collect();
            print_json(&matching)
        }
        FloorMapsSubcommand::Fetch { reference, output } => {
            let (resolved, markup) = api.fetch_by_reference(&reference).await?;
            tracing::info!(filename = %resolved.filename, bytes = markup.len(), "floor map fetched");
            write_or_print(output, &markup)
        }
        FloorMapsSubcommand::Upload { file, title } => {
            let markup = fs::read_to_string(&file).map_err(CliError::io(&file))?;
            let markup = match title.as_deref() {
                Some(title) => designer::svg::inject_title(&markup, title),
                None => markup,
            };
            upload(api, recent, &markup, title).await
        }
        FloorMapsSubcommand::Resolve { reference } => {
            let resolved = reference::resolve(&reference).map_err(rooms::WorkflowError::from)?;
            print_json(&serde_json::json!({
                "normalized": reference::normalize(&reference),
                "filename": resolved.filename,
                "svg": resolved.is_svg(),
                "path": resolved.document_path(),
            }))
        }
        FloorMapsSubcommand::Compose { layout, title, output, upload: should_upload } => {
            let layout = read_layout(&layout)?;
            let markup = compose(&layout, title.as_deref());
            if should_upload {
                let title = title.or(layout.title);
                upload(api, recent, &markup, title).await?;
            }
            if output.is_some() || !should_upload {
                write_or_print(output, &markup)?;
            }
            Ok(())
        }
    }
}

async fn upload(api: &mut ApiClient, recent: &RecentStore, markup: &str, title: Option<String>) -> Result<(), CliError> {
    let used_at = now_ms();
    let uploaded = api.upload_floor_map(markup, used_at).await?;
    recent.record(RecentFloorMap::from_upload(&uploaded, api.absolute_url(&uploaded.url), title, used_at))?;
    print_json(&uploaded)
}

fn run_recent(recent: &RecentStore, command: RecentSubcommand) -> Result<(), CliError> {
    match command {
        RecentSubcommand::List => print_json(&recent.load()),
        RecentSubcommand::Clear => {
            recent.save(&rooms::recent::RecentFloorMaps::default())?;
            println!("cleared {}", recent.path().display());
            Ok(())
        }
    }
}

fn write_or_print(output: Option<PathBuf>, markup: &str) -> Result<(), CliError> {
    match output {
        Some(path) => {
            fs::write(&path, markup).map_err(CliError::io(&path))?;
            tracing::info!(path = %path.display(), "written");
            Ok(())
        }
        None => {
            println!("{markup}");
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
