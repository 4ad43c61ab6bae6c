//! Range Lookup
//!
//! Command-line access to the range parser and the strategy book:
//! expand tokens, parse specs, resolve hands and print charts.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::{Path, PathBuf};

use preflop_ranges::range::{classify_token, parse_range_spec_uncached};
use preflop_ranges::{HandClass, Pattern, RangeCache, RangeChart, StrategyBook};

#[derive(Debug, Parser)]
#[command(name = "range_lookup")]
#[command(about = "Preflop range notation and strategy book lookups")]
struct Cli {
    /// Strategy book JSON file.
    #[arg(long, short, global = true, default_value = "configs/patterns.json")]
    book: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Expand a single range token into hand classes
    Expand {
        /// Token such as `66+`, `A5s-A2s` or `KJo`
        token: String,
    },
    /// Parse a full range spec and print the weight of each hand
    Parse {
        /// Spec such as `"66+, A5s-A2s, KJo:0.75"`
        spec: String,
    },
    /// Resolve hands at a pattern
    Resolve {
        /// Pattern id
        #[arg(long, short)]
        pattern: String,
        /// Hand codes such as `AKo`; all 169 hands when omitted
        hands: Vec<String>,
        /// Print quiz questions as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the 13x13 chart of a pattern
    Chart {
        /// Pattern id
        #[arg(long, short)]
        pattern: String,
        /// Also save the chart as JSON
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List the patterns in the book
    List {
        /// Case-insensitive search over pattern id and label
        #[arg(long, short, default_value = "")]
        query: String,
        /// Tags every listed pattern id must contain (e.g. `ante`)
        #[arg(long, short)]
        tag: Vec<String>,
    },
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Expand { token } => run_expand(&token),
        Commands::Parse { spec } => {
            run_parse(&spec);
            Ok(())
        }
        Commands::Resolve {
            pattern,
            hands,
            json,
        } => {
            let book = load_book(&cli.book)?;
            run_resolve(find_pattern(&book, &pattern)?, &hands, json)
        }
        Commands::Chart { pattern, output } => {
            let book = load_book(&cli.book)?;
            run_chart(find_pattern(&book, &pattern)?, output)
        }
        Commands::List { query, tag } => {
            let book = load_book(&cli.book)?;
            let tags: Vec<&str> = tag.iter().map(String::as_str).collect();
            for pattern in book.search(&query, &tags) {
                println!(
                    "{:<28} {:<40} {} option(s), {} band(s)",
                    pattern.id,
                    pattern.label,
                    pattern.options.len(),
                    pattern.bands.len()
                );
            }
            Ok(())
        }
    }
}

fn load_book(path: &Path) -> Result<StrategyBook> {
    let book = StrategyBook::from_json_file(path)
        .with_context(|| format!("loading {}", path.display()))?;
    info!("Loaded {:?} with {} pattern(s)", book.name, book.patterns.len());
    Ok(book)
}

fn find_pattern<'a>(book: &'a StrategyBook, id: &str) -> Result<&'a Pattern> {
    book.pattern(id)
        .ok_or_else(|| anyhow!("no pattern with id {:?}", id))
}

fn run_expand(token: &str) -> Result<()> {
    let parsed = classify_token(token).with_context(|| format!("token {:?}", token))?;
    let hands = parsed.expand();
    println!("{} -> {} hand(s)", parsed, hands.len());
    let codes: Vec<String> = hands.iter().map(HandClass::to_string).collect();
    println!("{}", codes.join(", "));
    Ok(())
}

fn run_parse(spec: &str) {
    let parsed = parse_range_spec_uncached(spec);
    let map = parsed.map();

    for (hand, weight) in map.iter() {
        println!("{:<4} {:.3}", hand, weight);
    }
    println!(
        "{} hand class(es), {:.1} weighted combo(s)",
        map.len(),
        map.weighted_combos()
    );
    for diagnostic in parsed.diagnostics() {
        warn!("{}", diagnostic);
    }
}

fn run_resolve(pattern: &Pattern, hands: &[String], json: bool) -> Result<()> {
    let hands: Vec<HandClass> = if hands.is_empty() {
        HandClass::all().collect()
    } else {
        hands
            .iter()
            .map(|h| h.parse::<HandClass>().with_context(|| format!("hand {:?}", h)))
            .collect::<Result<_>>()?
    };

    let cache = RangeCache::global();
    for (action, diagnostic) in pattern.diagnostics(cache) {
        warn!("band {:?}: {}", action, diagnostic);
    }

    if json {
        let questions: Vec<_> = hands.iter().map(|&h| pattern.question(cache, h)).collect();
        println!("{}", serde_json::to_string_pretty(&questions)?);
        return Ok(());
    }

    for hand in hands {
        let answer = pattern.answer(cache, hand);
        let dist = pattern.distribution(cache, hand);
        let mix: Vec<String> = dist
            .entries()
            .iter()
            .map(|e| format!("{} {:.1}%", e.option, e.probability * 100.0))
            .collect();
        println!(
            "{:<4} {:<12} [{}]",
            hand,
            pattern.options[answer],
            mix.join(", ")
        );
    }
    Ok(())
}

fn run_chart(pattern: &Pattern, output: Option<PathBuf>) -> Result<()> {
    let chart = RangeChart::build(pattern, RangeCache::global());
    print!("{}", chart.render_text());

    if let Some(path) = output {
        chart
            .save_json(&path)
            .with_context(|| format!("saving {}", path.display()))?;
        info!("Saved JSON: {}", path.display());
    }
    Ok(())
}
