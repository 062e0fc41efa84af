use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use countries_rs::favorites::Favorites;
use countries_rs::route::CountryRoute;
use countries_rs::storage::FileStorage;
use countries_rs::{Client, Settings, view};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "countries",
    version,
    about = "Look up a country on REST Countries and manage your favorites"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Base URL of the REST Countries API.
    #[arg(long, global = true, default_value = countries_rs::config::DEFAULT_API_BASE)]
    api_base: String,
    /// Storage file holding favorites (default: <data dir>/countries-rs/storage.json).
    #[arg(long, global = true)]
    storage: Option<PathBuf>,
    /// Total request timeout in seconds (default: none).
    #[arg(long, global = true)]
    timeout: Option<u64>,
    /// Locale for number formatting (en, de, fr, es, it, pt, nl).
    #[arg(long, global = true, default_value = "en")]
    locale: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a country by full name and print its details.
    Show(ShowArgs),
    /// Resolve an app path like /country/France and print the view.
    Open {
        /// Navigation path.
        path: String,
    },
    /// Manage the favorites list.
    #[command(subcommand)]
    Favorite(FavoriteCommand),
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Full country name (e.g., France, "United States").
    name: String,
    /// Print the raw record as JSON instead of the rendered view.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum FavoriteCommand {
    /// Add the name if missing, remove every copy of it otherwise.
    Toggle { name: String },
    /// Print favorites, one per line, in stored order.
    List,
    /// Exit 0 and print "yes" if the name is a favorite, "no" otherwise.
    Check { name: String },
}

impl GlobalArgs {
    fn settings(&self) -> Settings {
        let defaults = Settings::default();
        Settings {
            api_base: self.api_base.clone(),
            locale: self.locale.clone(),
            storage_path: self.storage.clone().unwrap_or(defaults.storage_path),
            timeout: self.timeout.map(Duration::from_secs),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let settings = cli.global.settings();
    log::debug!("settings: {settings:?}");
    match cli.cmd {
        Command::Show(args) => cmd_show(&settings, args),
        Command::Open { path } => cmd_open(&settings, &path),
        Command::Favorite(cmd) => cmd_favorite(&settings, cmd),
    }
}

fn favorites(settings: &Settings) -> Favorites<FileStorage> {
    Favorites::new(FileStorage::new(&settings.storage_path))
}

fn cmd_show(settings: &Settings, args: ShowArgs) -> Result<()> {
    if args.name.is_empty() {
        anyhow::bail!("country name must not be empty");
    }
    let client = Client::from_settings(settings);
    let result = client.fetch_country(&args.name);

    if args.json {
        let country = result.with_context(|| format!("GET {}", client.country_url(&args.name)))?;
        println!("{}", serde_json::to_string_pretty(&country)?);
        return Ok(());
    }

    if let Err(e) = &result {
        log::warn!("fetch {:?}: {e}", args.name);
    }
    let screen = view::render_result(result, &settings.locale);
    print!("{screen}");
    if let view::Screen::Detail(_) = screen {
        let fav = favorites(settings)
            .contains(&args.name)
            .context("read favorites")?;
        println!("{:<14} {}", "Favorite", if fav { "yes" } else { "no" });
    }
    Ok(())
}

fn cmd_open(settings: &Settings, path: &str) -> Result<()> {
    let route = CountryRoute::parse(path)
        .ok_or_else(|| anyhow::anyhow!("no view for path {path:?}, expected /country/<name>"))?;
    if route.query_key().is_empty() {
        // Fetching is disabled without a name.
        print!("{}", view::Screen::NotFound);
        return Ok(());
    }
    cmd_show(
        settings,
        ShowArgs {
            name: route.name().to_string(),
            json: false,
        },
    )
}

fn cmd_favorite(settings: &Settings, cmd: FavoriteCommand) -> Result<()> {
    let favs = favorites(settings);
    match cmd {
        FavoriteCommand::Toggle { name } => {
            if name.is_empty() {
                anyhow::bail!("country name must not be empty");
            }
            let toggle = favs
                .toggle(&name)
                .with_context(|| format!("toggle favorite {name:?}"))?;
            let n = toggle.notification(&name);
            println!("{}", n.title);
            println!("{}", n.description);
        }
        FavoriteCommand::List => {
            for name in favs.list().context("read favorites")? {
                println!("{name}");
            }
        }
        FavoriteCommand::Check { name } => {
            let yes = favs.contains(&name).context("read favorites")?;
            println!("{}", if yes { "yes" } else { "no" });
        }
    }
    Ok(())
}
