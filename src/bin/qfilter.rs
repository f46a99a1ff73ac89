//! Command-line interface for the quality filter
//! Compiles token selections into search regexes, strips them back out, and
//! steps tokens through their toggle cycle.
//!
//! Usage:
//!   qfilter compile `<keys>`... [--mode and|or] [--exclude `<key>`]...  - Compile a selection
//!   qfilter embed `<base>` `<keys>`... [--mode and|or] [--exclude `<key>`]... - Embed into a search string
//!   qfilter strip `<input>`                                   - Remove embedded fragments
//!   qfilter toggle `<key>` [--state `<json>`] [--text `<text>`]     - Advance a token's toggle state
//!   qfilter catalog [--format json|yaml|text]                 - List the token catalog
//!   qfilter merge `<values>`...                                 - Merge alternation lists
//!
//! Settings are read from the built-in defaults, then `./qfilter.toml` if it
//! exists, then `--config`. A `--mode` flag wins over all of them.

use clap::{Arg, ArgAction, ArgMatches, Command};
use quality_filter::filter::alternatives::merge_alternatives;
use quality_filter::filter::{Catalog, Engine, FilterSession, LogicMode, Selection, Settings};
use quality_filter_config::{Loader, LOCAL_CONFIG_FILE};
use serde::Serialize;
use std::error::Error;

fn main() {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cli() -> Command {
    let mode_arg = Arg::new("mode")
        .long("mode")
        .short('m')
        .help("How tokens combine: 'and' (lookaheads) or 'or' (alternation)")
        .value_parser(["and", "or"]);
    let exclude_arg = Arg::new("exclude")
        .long("exclude")
        .short('x')
        .help("Token that must be absent (AND mode only)")
        .action(ArgAction::Append);
    let keys_arg = Arg::new("keys")
        .help("Token keys in selection order")
        .num_args(0..);

    Command::new("qfilter")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build and clean quality filter regexes for release searches")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Settings file layered over the built-in defaults and ./qfilter.toml"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .help("Log every rewrite to stderr")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("compile")
                .about("Compile a selection into a regex fragment")
                .arg(keys_arg.clone().index(1))
                .arg(mode_arg.clone())
                .arg(exclude_arg.clone()),
        )
        .subcommand(
            Command::new("embed")
                .about("Embed a selection into a search string")
                .arg(
                    Arg::new("base")
                        .help("Current search string")
                        .required(true)
                        .index(1),
                )
                .arg(keys_arg.index(2))
                .arg(mode_arg)
                .arg(exclude_arg),
        )
        .subcommand(
            Command::new("strip")
                .about("Remove embedded quality fragments from a search string")
                .arg(
                    Arg::new("input")
                        .help("Search string to clean")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("toggle")
                .about("Advance a token through its toggle cycle")
                .arg(
                    Arg::new("key")
                        .help("Token key")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("state")
                        .long("state")
                        .short('s')
                        .help("Current selection as JSON"),
                )
                .arg(
                    Arg::new("text")
                        .long("text")
                        .short('t')
                        .help("Current search string"),
                ),
        )
        .subcommand(
            Command::new("catalog")
                .about("List the token catalog")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(["json", "yaml", "text"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            Command::new("merge")
                .about("Merge alternation lists into one deduplicated group")
                .arg(
                    Arg::new("values")
                        .help("Regex alternation lists")
                        .required(true)
                        .num_args(1..)
                        .index(1),
                ),
        )
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(mode) = pinned_mode(matches)? {
        loader = loader.with_logic_mode(mode.into())?;
    }
    let settings = Settings::load(loader)?;
    let engine = Engine::new(&settings.catalog);
    let default_mode = settings.default_logic_mode;

    match matches.subcommand() {
        Some(("compile", sub)) => {
            let selection = selection_from_args(sub, default_mode);
            let session = FilterSession::new(engine, selection);
            println!("{}", session.fragment());
        }
        Some(("embed", sub)) => {
            let selection = selection_from_args(sub, default_mode);
            let base = required(sub, "base")?;
            let session = FilterSession::new(engine, selection);
            println!("{}", session.refresh(base));
        }
        Some(("strip", sub)) => {
            let input = required(sub, "input")?;
            println!("{}", engine.strip(input));
        }
        Some(("toggle", sub)) => {
            let key = required(sub, "key")?;
            let text = sub.get_one::<String>("text").map_or("", String::as_str);
            let selection = match sub.get_one::<String>("state") {
                Some(json) => serde_json::from_str(json)?,
                None => Selection::new(default_mode),
            };
            let mut session = FilterSession::new(engine, selection);
            let text = session.toggle(key, text);
            let output = ToggleOutput {
                selection: session.selection(),
                text,
            };
            println!("{}", serde_json::to_string(&output)?);
        }
        Some(("catalog", sub)) => {
            let format = required(sub, "format")?;
            print!("{}", render_catalog(&settings.catalog, format)?);
        }
        Some(("merge", sub)) => {
            let values = sub
                .get_many::<String>("values")
                .into_iter()
                .flatten()
                .map(String::as_str);
            println!("{}", merge_alternatives(values));
        }
        _ => unreachable!(),
    }
    Ok(())
}

#[derive(Serialize)]
struct ToggleOutput<'a> {
    selection: &'a Selection,
    text: String,
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, Box<dyn Error>> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| format!("missing argument '{}'", name).into())
}

/// `--mode` of the subcommand, if it takes one and it was given.
fn pinned_mode(matches: &ArgMatches) -> Result<Option<LogicMode>, Box<dyn Error>> {
    let mode = matches
        .subcommand()
        .and_then(|(_, sub)| sub.try_get_one::<String>("mode").ok().flatten());
    Ok(mode.map(|mode| mode.parse::<LogicMode>()).transpose()?)
}

/// Build a selection from positional keys plus `--exclude` keys. Excluded
/// keys are selected too, with negative polarity.
fn selection_from_args(matches: &ArgMatches, logic_mode: LogicMode) -> Selection {
    let mut selection = Selection::new(logic_mode);
    for key in matches.get_many::<String>("keys").into_iter().flatten() {
        if !selection.is_selected(key) {
            selection.selected_keys.push(key.clone());
        }
    }
    for key in matches.get_many::<String>("exclude").into_iter().flatten() {
        if !selection.is_selected(key) {
            selection.selected_keys.push(key.clone());
        }
        selection.polarity.insert(key.clone(), false);
    }
    selection
}

fn render_catalog(catalog: &Catalog, format: &str) -> Result<String, Box<dyn Error>> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(catalog.tokens())? + "\n"),
        "yaml" => Ok(serde_yaml::to_string(catalog.tokens())?),
        _ => Ok(catalog
            .iter()
            .map(|token| {
                format!(
                    "{}\t{}\t{}\n",
                    token.key(),
                    token.display_name(),
                    token.patterns().join(" ")
                )
            })
            .collect()),
    }
}
