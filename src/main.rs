//! Command-line interface for the WordNet logic-relation library.
//!
//! Every command is answered by composing the four relation goals (`pos`,
//! `definition`, `lemmas`, `links`) and pulling their solution sequences;
//! there is no separate query backend.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{LevelFilter, debug, error, info};
use oewn_logic::{
    LinkType, LoadOptions, PartOfSpeech, SynsetId, SynsetRef, WordNet,
    error::Result,
    logic::{Var, eq},
    progress::{ProgressCallback, ProgressUpdate},
    relations::{Relations, Value},
};
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about = "WordNet logic-relation CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a custom dataset file (optional)
    #[arg(long, global = true)]
    data_path: Option<String>,

    /// Force a fresh dataset download, ignoring any cached copy
    #[arg(long, global = true, default_value_t = false)]
    force_download: bool,

    /// Set verbosity level (use -v, -vv, or -vvv for increasing verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Define a word, optionally filtering by part of speech
    Define {
        /// The word to define
        word: String,
        /// Optional part of speech filter (noun, verb, adjective, adj_sat)
        pos: Option<PartOfSpeech>,
    },
    /// List the typed links leaving a word's senses
    Links {
        /// A lemma, or a bare numeric synset id
        word: String,
        /// Optional link type filter (e.g. "hypernym", "verb group")
        #[arg(long)]
        link_type: Option<LinkType>,
    },
    /// Show a random word
    Random,
    /// Clear the cached dataset file
    ClearData,
}

/// Sets up logging based on verbosity level.
fn setup_logging(verbose: u8) {
    let log_level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter(None, log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

/// Creates a progress callback for displaying download and indexing progress.
fn create_progress_callback(
    multi_progress: MultiProgress,
    progress_bars: Arc<Mutex<HashMap<String, ProgressBar>>>,
) -> ProgressCallback {
    Box::new(move |update: ProgressUpdate| {
        let mut bars = progress_bars.lock().unwrap();

        if update.current_item == 0 && !bars.contains_key(&update.stage_description) {
            // Create new progress bar for this stage
            let pb = multi_progress.add(ProgressBar::new(update.total_items.unwrap_or(0)));
            let style_template = if update.total_items.is_some() {
                "{prefix:>12.cyan.bold} [{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} ({percent}%) {msg}"
            } else {
                "{prefix:>12.cyan.bold} [{elapsed_precise}] {spinner} {msg}"
            };

            pb.set_style(
                ProgressStyle::default_bar()
                    .template(style_template)
                    .unwrap()
                    .progress_chars("##-"),
            );
            pb.set_prefix(update.stage_description.clone());
            pb.set_message(update.message.unwrap_or_default());
            pb.enable_steady_tick(Duration::from_millis(100));
            bars.insert(update.stage_description.clone(), pb);
        } else if let Some(pb) = bars.get(&update.stage_description) {
            // Update existing progress bar
            pb.set_position(update.current_item);
            if let Some(msg) = update.message {
                pb.set_message(msg);
            }
            if let Some(total) = update.total_items {
                if update.current_item >= total {
                    pb.finish_and_clear();
                }
            }
        }
        true
    })
}

/// Loads the WordNet data with progress bars, exiting the process on failure.
async fn load_wordnet(data_path: Option<PathBuf>, force_download: bool) -> WordNet {
    info!("Loading WordNet data...");

    let multi_progress = MultiProgress::new();
    let progress_bars = Arc::new(Mutex::new(HashMap::<String, ProgressBar>::new()));

    let callback = create_progress_callback(multi_progress.clone(), progress_bars.clone());

    let load_options = LoadOptions {
        data_path,
        force_download,
    };

    let load_handle =
        tokio::spawn(async move { WordNet::load_with_options(load_options, Some(callback)).await });

    let wn_result = load_handle.await.unwrap_or_else(|e| {
        eprintln!("Error awaiting loading task: {}", e);
        std::process::exit(1);
    });

    // Clean up progress bars
    {
        let bars = progress_bars.lock().unwrap();
        for (_, pb) in bars.iter() {
            pb.finish_and_clear();
        }
    }
    drop(multi_progress); // Explicitly drop to ensure cleanup
    std::io::stdout().flush().ok();

    match wn_result {
        Ok(wn) => {
            info!("WordNet data loaded successfully.");
            wn
        }
        Err(e) => {
            error!("Failed to load WordNet data: {}", e);
            eprintln!("{}", format!("Error: {}", e).red());
            std::process::exit(1);
        }
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let data_path = cli.data_path.as_ref().map(PathBuf::from);

    match cli.command {
        Commands::Define { word, pos } => {
            let wn = load_wordnet(data_path, cli.force_download).await;
            if let Err(e) = handle_define(&wn, &word, pos).await {
                error!("Error during define command: {}", e);
                eprintln!("{}", format!("Error defining '{}': {}", word, e).red());
                std::process::exit(1);
            }
        }
        Commands::Links { word, link_type } => {
            let wn = load_wordnet(data_path, cli.force_download).await;
            if let Err(e) = handle_links(&wn, &word, link_type).await {
                error!("Error during links command: {}", e);
                eprintln!("{}", format!("Error listing links for '{}': {}", word, e).red());
                std::process::exit(1);
            }
        }
        Commands::Random => {
            let wn = load_wordnet(data_path, cli.force_download).await;
            if let Err(e) = handle_random(&wn).await {
                error!("Error during random command: {}", e);
                eprintln!("{}", format!("Error getting random word: {}", e).red());
                std::process::exit(1);
            }
        }
        Commands::ClearData => {
            // Clearing must not trigger a dataset download first.
            info!("Clearing cached dataset...");
            match WordNet::clear_data(data_path) {
                Ok(_) => println!("{}", "Dataset cleared successfully.".green()),
                Err(e) => {
                    error!("Failed to clear dataset: {}", e);
                    eprintln!("{}", format!("Error clearing dataset: {}", e).red());
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Handles the define command: one conjunctive query binds sense, tag, and
/// definition at once, with an optional part-of-speech constraint.
async fn handle_define(wn: &WordNet, word: &str, pos_filter: Option<PartOfSpeech>) -> Result<()> {
    info!("Defining word: '{}', PoS filter: {:?}", word, pos_filter);
    let rel = wn.relations();
    let start_lookup = Instant::now();

    let sense = Var::fresh();
    let pos = Var::fresh();
    let definition = Var::fresh();

    let mut goal = rel
        .lemmas(sense, word)
        .and(rel.pos(sense, pos))
        .and(rel.definition(sense, definition));
    if let Some(filter) = pos_filter {
        goal = goal.and(eq(pos, Value::Pos(filter)));
    }

    let mut senses_found = Vec::new();
    for solution in goal.run() {
        let id = solution
            .walk(&sense.into())
            .value()
            .and_then(Value::synset_id);
        let tag = solution.walk(&pos.into()).value().and_then(Value::as_pos);
        let text = solution
            .walk(&definition.into())
            .value()
            .and_then(|v| v.as_text().map(str::to_string));
        if let (Some(id), Some(tag), Some(text)) = (id, tag, text) {
            senses_found.push((id, tag, text));
        }
    }
    debug!("Lookup for '{}' took: {:?}", word, start_lookup.elapsed());

    if senses_found.is_empty() {
        println!("No definitions found for '{}'.", word.yellow());
        return Ok(());
    }

    for (counter, (id, tag, text)) in senses_found.iter().enumerate() {
        println!("\n{} ~ {}", word.bold().cyan(), tag.to_string().italic());
        println!("  {}: {}", (counter + 1).to_string().bold(), text.trim());

        let lemma = Var::fresh();
        let mut synonyms: Vec<String> = rel
            .lemmas(*id, lemma)
            .run()
            .filter_map(|s| {
                s.walk(&lemma.into())
                    .value()
                    .and_then(|v| v.as_text().map(str::to_string))
            })
            .filter(|synonym| synonym != word)
            .collect();
        synonyms.sort();
        if !synonyms.is_empty() {
            println!(
                "        {}: {}",
                "Synonyms".magenta(),
                synonyms.join(", ").green()
            );
        }

        print_linked_lemmas(&rel, *id, LinkType::Antonym, "Antonyms");
        print_linked_lemmas(&rel, *id, LinkType::Hypernym, "Hypernyms");
        print_linked_lemmas(&rel, *id, LinkType::Hyponym, "Hyponyms");
    }
    println!();

    Ok(())
}

/// Prints the lemmas reachable through one link type, if any. The link
/// goal's reference output feeds the lemmas goal directly.
fn print_linked_lemmas(rel: &Relations, id: SynsetId, link: LinkType, label: &str) {
    let start_relation = Instant::now();
    let edge = Var::fresh();
    let lemma = Var::fresh();
    let goal = rel
        .links(id, Var::fresh(), edge, Some(link))
        .and(rel.lemmas(edge, lemma));

    let mut related: Vec<String> = goal
        .run()
        .filter_map(|s| {
            s.walk(&lemma.into())
                .value()
                .and_then(|v| v.as_text().map(str::to_string))
        })
        .collect();
    related.sort();
    related.dedup();

    if !related.is_empty() {
        println!(
            "        {}: {}",
            label.magenta(),
            related.join(", ").green()
        );
    }
    debug!(
        "Relation lookup for '{}' on synset {} took: {:?}",
        label,
        id,
        start_relation.elapsed()
    );
}

/// Handles the links command: enumerates the outgoing typed edges of every
/// sense the given word denotes.
async fn handle_links(wn: &WordNet, word: &str, link_type: Option<LinkType>) -> Result<()> {
    info!("Listing links for: '{}', type filter: {:?}", word, link_type);
    let rel = wn.relations();

    // A bare number is treated as a synset id, anything else as a lemma.
    let sense_ids: Vec<SynsetId> = match word.parse::<SynsetId>() {
        Ok(id) => vec![id],
        Err(_) => {
            let sense = Var::fresh();
            rel.lemmas(sense, word)
                .run()
                .filter_map(|s| s.walk(&sense.into()).value().and_then(Value::synset_id))
                .collect()
        }
    };

    if sense_ids.is_empty() {
        println!("No senses found for '{}'.", word.yellow());
        return Ok(());
    }

    for id in sense_ids {
        let definition = Var::fresh();
        let summary = rel
            .definition(id, definition)
            .run()
            .next()
            .and_then(|s| {
                s.walk(&definition.into())
                    .value()
                    .and_then(|v| v.as_text().map(str::to_string))
            })
            .unwrap_or_default();
        println!(
            "\n{} {} {}",
            "Synset".bold(),
            id.to_string().cyan(),
            summary.dimmed()
        );

        let (edge, goal) = rel.outgoing(id, link_type);
        let references: Vec<SynsetRef> = goal
            .run()
            .filter_map(|s| s.walk(&edge.into()).value().and_then(Value::as_synset_ref))
            .collect();

        if references.is_empty() {
            println!("  (no outgoing links)");
            continue;
        }

        for reference in references {
            let lemma = Var::fresh();
            let targets: Vec<String> = rel
                .lemmas(reference, lemma)
                .run()
                .filter_map(|s| {
                    s.walk(&lemma.into())
                        .value()
                        .and_then(|v| v.as_text().map(str::to_string))
                })
                .collect();
            println!(
                "  {} {} {} [{}]",
                reference.link.to_string().magenta(),
                "->".dimmed(),
                reference.synset,
                targets.join(", ").green()
            );
        }
    }

    Ok(())
}

/// Handles the random command: a random synset described through the same
/// three relations the define command uses.
async fn handle_random(wn: &WordNet) -> Result<()> {
    info!("Getting random word...");
    let Some(id) = wn.random_synset_id() else {
        eprintln!("{}", "Could not retrieve a random word: the dataset is empty.".red());
        return Ok(());
    };

    let rel = wn.relations();
    let lemma = Var::fresh();
    let pos = Var::fresh();
    let definition = Var::fresh();
    let goal = rel
        .lemmas(id, lemma)
        .and(rel.pos(id, pos))
        .and(rel.definition(id, definition));

    if let Some(solution) = goal.run().next() {
        let word = solution
            .walk(&lemma.into())
            .value()
            .and_then(|v| v.as_text().map(str::to_string))
            .unwrap_or_default();
        let tag = solution
            .walk(&pos.into())
            .value()
            .and_then(Value::as_pos)
            .map(|p| p.to_string())
            .unwrap_or_default();
        let text = solution
            .walk(&definition.into())
            .value()
            .and_then(|v| v.as_text().map(str::to_string))
            .unwrap_or_default();
        println!("Random word: {} ({})", word.bold().cyan(), tag.italic());
        println!("  {}", text.trim());
    }

    Ok(())
}
