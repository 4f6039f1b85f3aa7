//! Radar Review CLI - evaluate, persist and export performance reviews

mod card;
mod font;
mod widgets;

use anyhow::{bail, Context};
use card::PngCardRenderer;
use clap::{Parser, Subcommand, ValueEnum};
use review_core::{
    ChartWidget, EvaluationSession, ImageExporter, InputEvent, JsonFileExporter, Outcome,
    SessionConfig,
};
use review_state::{builtin_roles, RoleConfig, BUILTIN_ROLES};
use review_store::{EvaluationStore, SledStore};
use review_view::Document;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use widgets::{ask_stdin, TextChart};

#[derive(Parser)]
#[command(name = "review")]
#[command(about = "Radar Review - configuration-driven performance evaluations")]
struct Cli {
    /// Settings file path
    #[arg(short, long, global = true, default_value = "review.toml")]
    config: PathBuf,

    /// Built-in role key or path to a role JSON file
    #[arg(short, long, global = true)]
    role: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in role configurations
    Roles,
    /// Show the current evaluation
    Show,
    /// Set the evaluated person's name
    Name {
        /// Name, stored verbatim
        name: String,
    },
    /// Select the evaluation level
    Level {
        /// Level key, e.g. junior
        level: String,
    },
    /// Rate one dimension
    Rate {
        /// Dimension key
        dimension: String,
        /// Rating from 1 to 5
        value: String,
        /// Submit the value as slider input instead of a label click
        #[arg(long)]
        slider: bool,
    },
    /// Reset all ratings and information
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Export the evaluation
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },
    /// Write the evaluation page as standalone HTML
    Render {
        /// Output file, stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// List roles that have stored evaluations
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Json,
    Image,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let settings = SessionConfig::from_toml_file(&cli.config)
        .with_context(|| format!("loading settings from {}", cli.config.display()))?;

    let Some(command) = cli.command else {
        println!("Radar Review v{} - Use --help for commands", env!("CARGO_PKG_VERSION"));
        return Ok(());
    };

    match command {
        Commands::Roles => list_roles(),
        Commands::Status => status(&settings),
        command => {
            let role = cli
                .role
                .unwrap_or_else(|| settings.session.default_role.clone());
            let config = load_role(&role)?;
            run_session(&settings, config, command)
        }
    }
}

fn load_role(role: &str) -> anyhow::Result<RoleConfig> {
    if BUILTIN_ROLES.contains(&role) {
        return Ok(RoleConfig::builtin(role)?);
    }
    RoleConfig::from_path(role).with_context(|| format!("loading role configuration {role}"))
}

fn list_roles() -> anyhow::Result<()> {
    for config in builtin_roles()? {
        println!(
            "{:<20} {:<18} {} dimensions, {} levels",
            config.key,
            config.role_name,
            config.dimensions.len(),
            config.levels.len()
        );
    }
    Ok(())
}

fn status(settings: &SessionConfig) -> anyhow::Result<()> {
    let store = EvaluationStore::new(open_store(settings)?);
    let roles = store.list_namespaces()?;
    if roles.is_empty() {
        println!("No stored evaluations in {}", settings.storage.db_path.display());
    }
    for role in roles {
        let info = store.load(&role).person_info.unwrap_or_default();
        let name = if info.name.is_empty() { "unnamed" } else { info.name.as_str() };
        println!("{role:<20} {name}");
    }
    Ok(())
}

fn open_store(settings: &SessionConfig) -> anyhow::Result<SledStore> {
    SledStore::open(&settings.storage.db_path)
        .with_context(|| format!("opening {}", settings.storage.db_path.display()))
}

fn run_session(settings: &SessionConfig, config: RoleConfig, command: Commands) -> anyhow::Result<()> {
    let confirm_reset = settings.session.confirm_reset;
    // The page goes to stdout, keep the chart out of it.
    let chart = TextChart::new(!matches!(command, Commands::Render { .. }));
    let mut session = EvaluationSession::open(config, open_store(settings)?, chart)
        .with_confirmation(move |prompt: &str| !confirm_reset || ask_stdin(prompt));

    let output_dir = settings.view.output_dir.clone();
    if let Commands::Export { format } = &command {
        session = match format {
            ExportFormat::Json => session.with_exporter(JsonFileExporter::new(output_dir)),
            ExportFormat::Image => {
                session.with_exporter(ImageExporter::new(output_dir, PngCardRenderer))
            }
        };
    }

    let mount_id = settings.view.mount_id.as_str();
    let mut doc = Document::with_mount_point(mount_id);
    session.mount(&mut doc, mount_id)?;

    let event = match command {
        Commands::Show => {
            show(&session);
            None
        }
        Commands::Render { out } => {
            let page = doc.to_page(&session.config().title);
            match out {
                Some(path) => {
                    std::fs::write(&path, page)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Wrote {}", path.display());
                }
                None => println!("{page}"),
            }
            None
        }
        Commands::Name { name } => Some(InputEvent::NameChanged(name)),
        Commands::Level { level } => Some(InputEvent::LevelSelected(level)),
        Commands::Rate {
            dimension,
            value,
            slider,
        } => Some(rate_event(dimension, value, slider)?),
        Commands::Reset { yes } => {
            if yes {
                session = session.with_confirmation(|_: &str| true);
            }
            Some(InputEvent::ResetRequested)
        }
        Commands::Export { .. } => Some(InputEvent::ExportRequested),
        Commands::Roles | Commands::Status => None,
    };

    if let Some(event) = event {
        debug!(?event, "dispatching");
        match session.handle(&mut doc, event)? {
            Outcome::Updated => show_summary(&session),
            Outcome::Rejected(reason) => bail!("rating rejected: {reason}"),
            Outcome::ResetCancelled => println!("Reset cancelled"),
            Outcome::Reset => println!("All ratings and information cleared"),
            Outcome::Exported(path) => println!("Exported {}", path.display()),
        }
    }

    session.into_store().flush()?;
    Ok(())
}

fn rate_event(dimension: String, value: String, slider: bool) -> anyhow::Result<InputEvent> {
    if slider {
        return Ok(InputEvent::SliderInput { dimension, raw: value });
    }
    let value: u8 = value
        .trim()
        .parse()
        .with_context(|| format!("\"{value}\" is not a rating, try --slider for raw input"))?;
    Ok(InputEvent::RatingLabelClicked { dimension, value })
}

fn show<C: ChartWidget>(session: &EvaluationSession<SledStore, C>) {
    let config = session.config();
    let state = session.state();
    let info = state.person_info();

    println!("{}", config.title);
    println!(
        "{}: {}",
        config.role_name,
        if info.name.is_empty() { "(unnamed)" } else { info.name.as_str() }
    );
    let level = config
        .level(&info.level)
        .map(|l| l.name.as_str())
        .unwrap_or(if info.level.is_empty() { "(none)" } else { info.level.as_str() });
    println!("Level: {level}");
    println!();

    for dimension in &config.dimensions {
        let rating = match state.set_rating_of(&dimension.key) {
            Some(v) => v.to_string(),
            None => "-".to_string(),
        };
        println!("{} {:<32} {rating}", dimension.emoji, dimension.name);
    }
    println!();
    show_summary(session);
}

fn show_summary<C: ChartWidget>(session: &EvaluationSession<SledStore, C>) {
    let summary = session.state().overall_summary();
    let band = summary.band.map(|b| b.to_string()).unwrap_or_else(|| "-".to_string());
    println!(
        "Average {}  Total {}  Band {band}",
        summary.average_text(),
        summary.sum_text()
    );
}
