/// Quran Reader - terminal Quran reader with verse-by-verse recitation
use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use quran_cli::{
    commands::{
        self, bookmarks, duas,
        page::PageTarget,
        play::PlayOptions,
        prayer::PrayerRequest,
        settings::SettingsAction,
    },
    AppState, CliConfig, CliError,
};
use quran_core::{
    CalculationMethod, Coordinates, JuristicSchool, PageNumber, PrayerLocation, Reciter,
    SurahNumber, SurahSort, Translation, VerseRef,
};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "quran")]
#[command(about = "Read and listen to the Quran, with prayer times and supplications", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./quran.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the surahs
    Surahs {
        /// Filter by name, meaning or number
        #[arg(short, long, default_value = "")]
        search: String,
        /// Order: number, alphabetical or revelation
        #[arg(long, default_value = "number", value_parser = parse_sort)]
        sort: SurahSort,
    },
    /// Read a surah with translation
    Read {
        #[arg(value_parser = parse_surah)]
        surah: SurahNumber,
        #[command(flatten)]
        range: RangeArgs,
        /// Translation edition for this run (e.g. en.sahih)
        #[arg(short, long)]
        translation: Option<String>,
    },
    /// Show a page of the mushaf
    Page {
        /// Page number (1-604)
        #[arg(value_parser = parse_page, required_unless_present = "surah")]
        number: Option<PageNumber>,
        /// Open the page a surah starts on
        #[arg(long, value_parser = parse_surah, conflicts_with = "number")]
        surah: Option<SurahNumber>,
    },
    /// Recite a surah verse by verse
    Play {
        #[arg(value_parser = parse_surah)]
        surah: SurahNumber,
        #[command(flatten)]
        range: RangeArgs,
        /// Plays of each verse (0 repeats until stopped)
        #[arg(long)]
        repeat: Option<u32>,
        /// Passes over the whole range
        #[arg(long)]
        passes: Option<u32>,
        /// Play a single verse
        #[arg(long, conflicts_with_all = ["from", "to"])]
        verse: Option<u16>,
        /// Reciter edition for this run (e.g. ar.husary)
        #[arg(short, long)]
        reciter: Option<Reciter>,
        /// Translation edition for this run
        #[arg(short, long)]
        translation: Option<String>,
    },
    /// Show today's prayer times
    Prayer {
        #[command(flatten)]
        location: LocationArgs,
        /// Calculation method id (see `quran settings methods`)
        #[arg(short, long)]
        method: Option<u8>,
        /// Asr school (0 = Shafi'i, 1 = Hanafi)
        #[arg(long)]
        school: Option<u8>,
        /// Date (YYYY-MM-DD), default today
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Remember the location, method and school
        #[arg(long)]
        save: bool,
    },
    /// Show the qibla direction
    Qibla {
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
    },
    /// Manage bookmarked verses
    Bookmarks {
        #[command(subcommand)]
        action: BookmarkAction,
    },
    /// Browse Hisnul Muslim supplications
    Duas {
        /// Filter categories by title or translation
        #[arg(short, long, default_value = "")]
        search: String,
        /// Show every supplication of a category
        #[arg(short, long)]
        category: Option<usize>,
        /// Collection file (default from configuration)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// View or change saved settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
}

#[derive(Subcommand)]
enum BookmarkAction {
    /// List bookmarks
    List,
    /// Bookmark a verse (surah:verse)
    Add { verse: VerseRef },
    /// Remove a bookmark (surah:verse)
    Remove { verse: VerseRef },
}

#[derive(Args)]
struct RangeArgs {
    /// First verse
    #[arg(long)]
    from: Option<u16>,
    /// Last verse
    #[arg(long)]
    to: Option<u16>,
}

#[derive(Args)]
struct LocationArgs {
    /// City or address
    #[arg(short, long, conflicts_with_all = ["lat", "lng"])]
    address: Option<String>,
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    lat: Option<f64>,
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lng: Option<f64>,
}

impl LocationArgs {
    fn location(&self) -> quran_cli::Result<Option<PrayerLocation>> {
        if let (Some(lat), Some(lng)) = (self.lat, self.lng) {
            return Ok(Some(PrayerLocation::Coordinates(Coordinates::new(lat, lng)?)));
        }
        Ok(self
            .address
            .as_ref()
            .filter(|a| !a.trim().is_empty())
            .map(|a| PrayerLocation::Address(a.trim().to_string())))
    }
}

fn parse_surah(s: &str) -> Result<SurahNumber, String> {
    let n: u16 = s.parse().map_err(|_| format!("not a surah number: {}", s))?;
    SurahNumber::new(n).map_err(|e| e.to_string())
}

fn parse_page(s: &str) -> Result<PageNumber, String> {
    let n: u16 = s.parse().map_err(|_| format!("not a page number: {}", s))?;
    PageNumber::new(n).map_err(|e| e.to_string())
}

fn parse_sort(s: &str) -> Result<SurahSort, String> {
    match s.to_ascii_lowercase().as_str() {
        "number" => Ok(SurahSort::Number),
        "alphabetical" | "name" => Ok(SurahSort::Alphabetical),
        "revelation" => Ok(SurahSort::Revelation),
        other => Err(format!("unknown sort order: {}", other)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quran=info,quran_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {:#}", err);
        if let Some(hint) = err.downcast_ref::<CliError>().and_then(CliError::hint) {
            eprintln!("{}", hint);
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Load configuration
    let config = CliConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let state = AppState::open(config)
        .await
        .context("failed to open reader state")?;
    tracing::debug!(quran_api = state.api.quran_base(), "Reader ready");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Surahs { search, sort } => {
            commands::surahs::run(&state, &search, sort, &mut out).await?;
        }
        Commands::Read {
            surah,
            range,
            translation,
        } => {
            let translation = translation.as_deref().map(Translation::from_code);
            commands::read::run(&state, surah, range.from, range.to, translation, &mut out)
                .await?;
        }
        Commands::Page { number, surah } => {
            let target = match (number, surah) {
                (Some(page), _) => PageTarget::Page(page),
                (None, Some(surah)) => PageTarget::SurahStart(surah),
                (None, None) => anyhow::bail!("give a page number or --surah"),
            };
            commands::page::run(&state, target, &mut out).await?;
        }
        Commands::Play {
            surah,
            range,
            repeat,
            passes,
            verse,
            reciter,
            translation,
        } => {
            let options = PlayOptions {
                surah,
                from: range.from,
                to: range.to,
                verse_repeat: repeat,
                passes,
                verse,
                reciter,
                translation: translation.as_deref().map(Translation::from_code),
            };
            commands::play::run(&state, options, &mut out).await?;
        }
        Commands::Prayer {
            location,
            method,
            school,
            date,
            save,
        } => {
            let request = PrayerRequest {
                location: location.location()?,
                method: method
                    .map(CalculationMethod::try_from)
                    .transpose()
                    .map_err(CliError::from)?,
                school: school
                    .map(JuristicSchool::try_from)
                    .transpose()
                    .map_err(CliError::from)?,
                date,
                save,
            };
            commands::prayer::run(&state, request, Local::now().naive_local(), &mut out).await?;
        }
        Commands::Qibla { lat, lng } => {
            let coords = match (lat, lng) {
                (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng).map_err(CliError::from)?),
                _ => None,
            };
            commands::qibla::run(&state, coords, &mut out).await?;
        }
        Commands::Bookmarks { action } => match action {
            BookmarkAction::List => bookmarks::list(&state, &mut out).await?,
            BookmarkAction::Add { verse } => bookmarks::add(&state, verse, &mut out).await?,
            BookmarkAction::Remove { verse } => {
                bookmarks::remove(&state, verse, &mut out).await?;
            }
        },
        Commands::Duas {
            search,
            category,
            file,
        } => {
            let path = file.unwrap_or_else(|| state.config.supplications.path.clone());
            let categories = duas::load_collection(&path)?;
            duas::run(&categories, &search, category, &mut out)?;
        }
        Commands::Settings { action } => {
            let action = action.unwrap_or(SettingsAction::Show);
            commands::settings::run(&state, action, &mut out).await?;
        }
    }

    out.flush()?;
    Ok(())
}
