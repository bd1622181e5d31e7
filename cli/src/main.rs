use std::sync::Arc;
use std::time::Duration;

use canvas::input::{Field, Handle, Point};
use canvas::rect::{Constraints, Rectangle};
use clap::{Args, Parser, Subcommand, ValueEnum};
use client::{CancellationToken, ClientError, HttpRectangleStore, RectangleStore, RectangleView, Session, SessionError, SyncConfig};
use serde_json::Value;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("health check failed: HTTP {0}")]
    Unhealthy(u16),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("update rejected: {0}")]
    Rejected(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "rect-cli", about = "Rectangle editor API CLI")]
struct Cli {
    #[arg(long, env = "RECT_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    /// Quiescence window before an interactive edit is sent.
    #[arg(long, env = "RECT_DEBOUNCE_MS", default_value_t = 500)]
    debounce_ms: u64,

    /// Minimum width/height enforced by the local clamp.
    #[arg(long, env = "MIN_SIZE", default_value_t = canvas::consts::MIN_SIZE)]
    min_size: i64,

    /// Keep the width at or below the height while editing.
    #[arg(long, env = "ENFORCE_WIDTH_LE_HEIGHT")]
    enforce_width_le_height: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Ping,
    /// Print the stored rectangle.
    Get,
    /// Send a rectangle as-is and print the server's canonical version.
    Put(PutArgs),
    /// Drag the body by an offset, as a pointer session would.
    Drag(DragArgs),
    /// Drag one resize handle by an offset.
    Resize(ResizeArgs),
    /// Type a value into one field.
    Set(SetArgs),
}

#[derive(Args, Debug)]
struct PutArgs {
    #[arg(long)]
    x: i64,
    #[arg(long)]
    y: i64,
    #[arg(long)]
    width: i64,
    #[arg(long)]
    height: i64,
}

#[derive(Args, Debug)]
struct DragArgs {
    #[arg(long, allow_hyphen_values = true)]
    dx: i64,
    #[arg(long, allow_hyphen_values = true)]
    dy: i64,
    /// Split the motion into this many pointer moves.
    #[arg(long, default_value_t = 1)]
    steps: u32,
}

#[derive(Args, Debug)]
struct ResizeArgs {
    /// One of: top, right, bottom, left, topLeft, topRight, bottomLeft, bottomRight.
    #[arg(long, value_parser = parse_handle)]
    handle: Handle,
    #[command(flatten)]
    motion: DragArgs,
}

#[derive(Args, Debug)]
struct SetArgs {
    #[arg(long, value_enum)]
    field: FieldArg,
    #[arg(long, allow_hyphen_values = true)]
    value: i64,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum FieldArg {
    X,
    Y,
    Width,
    Height,
}

impl From<FieldArg> for Field {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::X => Field::X,
            FieldArg::Y => Field::Y,
            FieldArg::Width => Field::Width,
            FieldArg::Height => Field::Height,
        }
    }
}

impl Cli {
    fn constraints(&self) -> Constraints {
        Constraints::new(self.min_size).with_width_not_exceeding_height(self.enforce_width_le_height)
    }
}

fn parse_handle(name: &str) -> Result<Handle, String> {
    Handle::from_name(name).ok_or_else(|| format!("unknown handle `{name}`"))
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    let store = Arc::new(HttpRectangleStore::new(&cli.base_url));
    let constraints = cli.constraints();
    let sync = SyncConfig::default().with_debounce(Duration::from_millis(cli.debounce_ms));

    match cli.command {
        Command::Ping => run_ping(&cli.base_url).await,
        Command::Get => {
            let rect = store.fetch().await?;
            print_record(&rect)
        }
        Command::Put(args) => {
            let current = store.fetch().await?;
            let candidate = Rectangle::new(args.x, args.y, args.width, args.height, current.bounds());
            let rect = store.update(&candidate, CancellationToken::never()).await?;
            print_record(&rect)
        }
        Command::Drag(args) => {
            let mut session = Session::load(store, constraints, sync).await?;
            let start = center(&session.view().rect);
            session.grab_body(start);
            run_motion(&mut session, start, &args);
            finish(session).await
        }
        Command::Resize(args) => {
            let mut session = Session::load(store, constraints, sync).await?;
            let start = args.handle.position(&session.view().rect);
            session.grab_handle(args.handle, start);
            run_motion(&mut session, start, &args.motion);
            finish(session).await
        }
        Command::Set(args) => {
            let mut session = Session::load(store, constraints, sync).await?;
            session.set_field(args.field.into(), args.value);
            finish(session).await
        }
    }
}

async fn run_ping(base_url: &str) -> Result<(), CliError> {
    let url = format!("{}/healthz", base_url.trim_end_matches('/'));
    let status = reqwest::get(url).await?.status();
    if !status.is_success() {
        return Err(CliError::Unhealthy(status.as_u16()));
    }
    println!("ok");
    Ok(())
}

fn center(rect: &Rectangle) -> Point {
    Point::new(rect.x + rect.width / 2, rect.y + rect.height / 2)
}

/// Feed evenly spaced pointer moves from `start` to `start + (dx, dy)`,
/// then release.
fn run_motion(session: &mut Session, start: Point, args: &DragArgs) {
    for point in motion_path(start, args.dx, args.dy, args.steps) {
        session.pointer_move(point);
    }
    session.pointer_up();
}

fn motion_path(start: Point, dx: i64, dy: i64, steps: u32) -> Vec<Point> {
    let steps = i64::from(steps.max(1));
    (1..=steps)
        .map(|i| Point::new(start.x + dx * i / steps, start.y + dy * i / steps))
        .collect()
}

async fn finish(mut session: Session) -> Result<(), CliError> {
    let view = session.settle().await;
    report(&view)
}

fn report(view: &RectangleView) -> Result<(), CliError> {
    if let Some(error) = &view.error {
        return Err(CliError::Rejected(error.clone()));
    }
    print_record(&view.rect)?;
    if let Some(line) = view.status_line() {
        eprintln!("{line}");
    }
    Ok(())
}

fn print_record(rect: &Rectangle) -> Result<(), CliError> {
    let mut value = serde_json::to_value(rect)?;
    if let Value::Object(map) = &mut value {
        map.insert("perimeter".to_owned(), Value::from(rect.perimeter()));
    }
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
