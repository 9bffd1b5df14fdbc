//! vdf-launch CLI
//!
//! Entry point for the `vdf-launch` command-line tool: bulk-edit the launch
//! options stored in a per-user `localconfig.vdf`.

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use vdf_cfg::export::export_document_to_json;
use vdf_cfg::library::{self, GameInfo, NameMapping};
use vdf_cfg::lists;
use vdf_cfg::utils::expand_home;
use vdf_cfg::{LocalConfig, VdfError, to_vdf_string};

#[derive(Parser)]
#[command(name = "vdf-launch")]
#[command(about = "Manage game launch options in localconfig.vdf", version)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConfigArg {
    /// Path to localconfig.vdf
    #[arg(long, short = 'c', env = "VDF_LAUNCH_CONFIG")]
    config: String,
}

#[derive(Args)]
struct LibraryArg {
    /// Library folder holding a steamapps/ directory, used for game names (repeatable)
    #[arg(long = "library", short = 'L')]
    libraries: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Set launch options for every app, or for those in an allow/deny list
    Update {
        #[command(flatten)]
        config: ConfigArg,

        #[command(flatten)]
        library: LibraryArg,

        /// Launch arguments to set
        #[arg(long, short = 'a', allow_hyphen_values = true)]
        args: String,

        /// Allow list file (one app id per line)
        #[arg(long, short = 'l', conflicts_with = "deny")]
        allow: Option<String>,

        /// Deny list file (one app id per line)
        #[arg(long, short = 'd')]
        deny: Option<String>,

        /// Show what would change without writing
        #[arg(long)]
        dry_run: bool,

        /// Continue when a list has non-numeric entries
        #[arg(long)]
        ignore_invalid: bool,
    },

    /// List apps with their names and launch options
    Apps {
        #[command(flatten)]
        config: ConfigArg,

        #[command(flatten)]
        library: LibraryArg,

        /// Only show apps whose name or id contains this text
        search: Option<String>,

        /// Include runtime tools (Proton, Steam Linux Runtime)
        #[arg(long)]
        include_tools: bool,

        /// Only show apps with a manifest in one of the libraries
        #[arg(long)]
        installed: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,

        /// Append the shown app ids to this list file
        #[arg(long)]
        save: Option<String>,
    },

    /// Show the entries of a list file
    List {
        /// List file to show
        #[arg(default_value = "selected-games.txt")]
        file: String,

        #[command(flatten)]
        config: ConfigArg,

        #[command(flatten)]
        library: LibraryArg,

        /// Include runtime tools (Proton, Steam Linux Runtime)
        #[arg(long)]
        include_tools: bool,
    },

    /// Print the value (or block) at a slash-separated path
    Get {
        #[command(flatten)]
        config: ConfigArg,

        /// Path such as UserLocalConfigStore/Software/Valve/Steam/apps/570
        path: String,
    },

    /// Set a value at a slash-separated path, creating missing blocks
    Set {
        #[command(flatten)]
        config: ConfigArg,

        path: String,

        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Print the result instead of writing the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Re-serialize the whole config to stdout
    Dump {
        #[command(flatten)]
        config: ConfigArg,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Update {
            config,
            library,
            args,
            allow,
            deny,
            dry_run,
            ignore_invalid,
        } => run_update(&config, &library, &args, allow, deny, dry_run, ignore_invalid),
        Commands::Apps {
            config,
            library,
            search,
            include_tools,
            installed,
            json,
            save,
        } => run_apps(&config, &library, search, include_tools, installed, json, save),
        Commands::List {
            file,
            config,
            library,
            include_tools,
        } => run_list(&file, &config, &library, include_tools),
        Commands::Get { config, path } => run_get(&config, &path),
        Commands::Set {
            config,
            path,
            value,
            dry_run,
        } => run_set(&config, &path, &value, dry_run),
        Commands::Dump { config, json } => run_dump(&config, json),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

fn config_path(arg: &ConfigArg) -> PathBuf {
    expand_home(&arg.config)
}

fn load_config(arg: &ConfigArg) -> Result<LocalConfig, VdfError> {
    LocalConfig::from_file(config_path(arg))
}

fn load_mapping(arg: &LibraryArg) -> NameMapping {
    if arg.libraries.is_empty() {
        return NameMapping::new();
    }
    let libraries: Vec<PathBuf> = arg.libraries.iter().map(|l| expand_home(l)).collect();
    library::scan_manifests(&libraries).into_iter().collect()
}

/// Load an allow/deny list and keep its numeric entries.
///
/// Non-numeric entries are reported and abort the run unless `ignore_invalid`.
fn load_filter_list(path: &str, list_type: &str, ignore_invalid: bool) -> Result<Vec<String>, VdfError> {
    println!("Loading {} list from: {}", list_type, path);
    let items = lists::load_list(expand_home(path))?;
    let classified = lists::classify_entries(&items);

    if !classified.invalid.is_empty() {
        println!(
            "\nInvalid entries in {} list ({} non-numeric):",
            list_type,
            classified.invalid.len()
        );
        for item in &classified.invalid {
            println!("  - {}", item);
        }

        if !ignore_invalid {
            return Err(VdfError::InvalidEntries {
                list: list_type.to_string(),
                entries: classified.invalid,
                hint: Some(
                    "Lists only accept numeric app ids; use `vdf-launch apps` to look them up, or pass --ignore-invalid"
                        .into(),
                ),
                code: Some(400),
            });
        }
        warn!(list = list_type, "continuing with invalid entries ignored");
    }

    Ok(classified.valid)
}

fn run_update(
    config_arg: &ConfigArg,
    library_arg: &LibraryArg,
    args: &str,
    allow: Option<String>,
    deny: Option<String>,
    dry_run: bool,
    ignore_invalid: bool,
) -> Result<(), VdfError> {
    let path = config_path(config_arg);
    println!("Local config: {}", path.display());
    let mut config = LocalConfig::from_file(&path)?;

    let mapping = load_mapping(library_arg);
    if !mapping.is_empty() {
        println!("Found {} installed games", mapping.len());
    }

    let all_ids = config.app_ids()?;
    let targets = match (allow, deny) {
        (Some(allow), _) => {
            let ids = load_filter_list(&allow, "allow", ignore_invalid)?;
            if ids.is_empty() {
                // An empty allow set would otherwise mean "no filter".
                println!("\nAllow list has no usable app ids; nothing to update.");
                return Ok(());
            }
            lists::filter_ids(&all_ids, Some(ids.as_slice()), None)
        }
        (None, Some(deny)) => {
            let ids = load_filter_list(&deny, "deny", ignore_invalid)?;
            lists::filter_ids(&all_ids, None, Some(ids.as_slice()))
        }
        (None, None) => all_ids,
    };

    println!("\nWill update launch options for {} games", targets.len());
    println!("Launch args: {}", args);

    // In-memory edit; dry runs stop before save.
    let updated = config.set_launch_options(&targets, args)?;

    if dry_run {
        println!("\n[DRY RUN] Would update the following app IDs:");
        for app_id in &targets {
            match mapping.display_name(app_id) {
                Some(name) => println!("  - {} ({})", app_id, name),
                None => println!("  - {}", app_id),
            }
        }
        return Ok(());
    }

    config.save(&path)?;
    println!("\nSuccessfully updated {} games!", updated);

    Ok(())
}

fn run_apps(
    config_arg: &ConfigArg,
    library_arg: &LibraryArg,
    search: Option<String>,
    include_tools: bool,
    installed: bool,
    json: bool,
    save: Option<String>,
) -> Result<(), VdfError> {
    let config = load_config(config_arg)?;
    let mapping = load_mapping(library_arg);
    let games = library::games(&config, &mapping)?;

    let matches: Vec<&GameInfo> = games
        .iter()
        .filter(|g| include_tools || !library::is_tool(&g.name))
        .filter(|g| !installed || g.installed)
        .filter(|g| search.as_deref().is_none_or(|q| library::matches_query(g, q)))
        .collect();
    debug!(total = games.len(), shown = matches.len(), "filtered apps");

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else if matches.is_empty() {
        println!("No apps found matching your query.");
    } else {
        for (i, game) in matches.iter().enumerate() {
            print_game(i + 1, game);
            println!();
        }
        println!("Total: {} app(s)", matches.len());
    }

    if let Some(file) = save {
        let ids: Vec<String> = matches.iter().map(|g| g.app_id.clone()).collect();
        let outcome = lists::append_to_list(expand_home(&file), &ids)?;

        if !outcome.skipped.is_empty() {
            println!("\nSkipped duplicates (already in file):");
            for id in &outcome.skipped {
                println!("  - {}", id);
            }
        }
        match (outcome.added.len(), outcome.created) {
            (0, _) => println!("\nNo new app ids to add to {}", file),
            (n, true) => println!("\nCreated file and saved {} app id(s) to: {}", n, file),
            (n, false) => println!("\nAppended {} app id(s) to: {}", n, file),
        }
        println!("\nTo update these apps, run:");
        println!("   vdf-launch update --args \"your launch options\" --allow {}", file);
    }

    Ok(())
}

fn print_game(index: usize, game: &GameInfo) {
    let status = if game.installed { "" } else { " [NOT INSTALLED]" };
    if game.name == game.app_id {
        println!("[{}] App ID: {}{}", index, game.app_id, status);
    } else {
        println!("[{}] {}", index, game.name);
        println!("    App ID: {}{}", game.app_id, status);
    }
    match &game.launch_options {
        Some(opts) if !opts.is_empty() => println!("    Launch Options: {}", opts),
        _ => println!("    Launch Options: (none)"),
    }
}

fn run_list(file: &str, config_arg: &ConfigArg, library_arg: &LibraryArg, include_tools: bool) -> Result<(), VdfError> {
    let entries = lists::load_list(expand_home(file))?;
    if entries.is_empty() {
        println!("File is empty: {}", file);
        return Ok(());
    }

    let config = load_config(config_arg)?;
    let mapping = load_mapping(library_arg);
    let games = library::games(&config, &mapping)?;
    let by_id: HashMap<&str, &GameInfo> = games
        .iter()
        .filter(|g| include_tools || !library::is_tool(&g.name))
        .map(|g| (g.app_id.as_str(), g))
        .collect();

    println!("Apps in {}:\n", file);
    for (i, entry) in entries.iter().enumerate() {
        let index = i + 1;
        if lists::is_app_id(entry) {
            match by_id.get(entry.as_str()) {
                Some(game) => print_game(index, game),
                None => println!("[{}] App ID: {} [NOT IN LIBRARY]", index, entry),
            }
        } else if let Some(app_id) = mapping.id_for_name(entry) {
            // Names are shown for reference only; update never accepts them.
            println!("[{}] {} [NAME, NOT AN APP ID]", index, entry);
            match by_id.get(app_id) {
                Some(game) => println!("    App ID: {}{}", app_id, launch_suffix(game)),
                None => println!("    App ID: {} [NOT IN LIBRARY]", app_id),
            }
        } else {
            println!("[{}] {} [NOT FOUND]", index, entry);
        }
        println!();
    }
    println!("Total: {} app(s)", entries.len());

    Ok(())
}

fn launch_suffix(game: &GameInfo) -> String {
    match &game.launch_options {
        Some(opts) if !opts.is_empty() => format!("\n    Launch Options: {}", opts),
        _ => String::new(),
    }
}

fn run_get(config_arg: &ConfigArg, path: &str) -> Result<(), VdfError> {
    let config = load_config(config_arg)?;
    let node = config.root().find(path).ok_or_else(|| VdfError::PathNotFound {
        path: path.to_string(),
        hint: Some("Paths are slash-separated keys from the top of the file".into()),
        code: Some(304),
    })?;

    match node.value() {
        Some(value) => println!("{}", value),
        None => print!("{}", to_vdf_string(node)),
    }
    Ok(())
}

fn run_set(config_arg: &ConfigArg, path: &str, value: &str, dry_run: bool) -> Result<(), VdfError> {
    let mut config = load_config(config_arg)?;
    config.set(path, value)?;

    if dry_run {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        config.write_to(&mut out)?;
        out.flush()?;
        return Ok(());
    }

    config.save_in_place()?;
    println!("Set {} = {}", path, value);
    Ok(())
}

fn run_dump(config_arg: &ConfigArg, json: bool) -> Result<(), VdfError> {
    let config = load_config(config_arg)?;

    if json {
        println!("{}", export_document_to_json(config.root())?);
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    config.write_to(&mut out)?;
    out.flush()?;
    Ok(())
}
