use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use rcna::{load_articles, save_ranked, Config, KeywordStore, RankedBatch, Ranker, ScoredArticle};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "rank-articles")]
#[command(about = "Score cyber news articles by keyword relevance and risk, and rank them for the daily digest")]
struct Args {
    /// JSON file with the articles to rank (an array of article records)
    #[arg(short, long)]
    file: PathBuf,

    /// Where to write the ranked JSON (defaults to the local data directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory holding the keyword lists (overrides RCNA_KEYWORD_DIR)
    #[arg(short, long)]
    keywords: Option<PathBuf>,

    /// JSON category configuration (overrides RCNA_CATEGORIES)
    #[arg(short, long)]
    categories: Option<PathBuf>,

    /// Number of top articles to list after ranking
    #[arg(short, long, default_value = "10")]
    top: usize,

    /// Log keyword loading and scoring details
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install log subscriber")?;

    let mut config = Config::from_env()?;
    if let Some(dir) = args.keywords {
        config.keyword_dir = dir;
    }
    if let Some(path) = args.categories {
        config.categories_file = Some(path);
    }

    println!("🚀 Loading keyword lists from {}...", config.keyword_dir.display());
    let categories = config.category_config()?;
    let store = KeywordStore::load(&categories, &config.keyword_dir)
        .context("Category configuration is incomplete")?;
    println!(
        "✓ Loaded {} keywords across {} categories",
        store.keyword_count(),
        store.categories().len()
    );

    println!("\n📚 Reading articles from {}...", args.file.display());
    let articles = load_articles(&args.file)?;
    if articles.is_empty() {
        println!("No articles to rank.");
        return Ok(());
    }
    println!("✓ Found {} articles", articles.len());

    println!("\n📊 Scoring and ranking...");
    let ranker = Ranker::new(store);
    let ranked = ranker.rank(articles);

    let critical = ranked.iter().filter(|a| a.critical()).count();
    if critical > 0 {
        println!("⚠ {} critical article(s) from ransomware feeds", critical);
    }
    print_top(&ranked, args.top);

    let output = match args.output {
        Some(path) => path,
        None => {
            let timestamp = Local::now().format("%Y-%m-%d %H%M%S");
            let filename = format!("{} - ranked articles.json", timestamp);
            rcna::get_default_output_dir()?.join(filename)
        }
    };

    save_ranked(&RankedBatch::new(ranked), &output).context("Failed to save ranked articles")?;

    println!("\n✅ Ranked articles saved to: {}", output.display());

    Ok(())
}

fn print_top(ranked: &[ScoredArticle], top: usize) {
    if top == 0 {
        return;
    }

    println!("\nTop {} of {}:", top.min(ranked.len()), ranked.len());
    for (index, scored) in ranked.iter().take(top).enumerate() {
        println!(
            "  {:>2}. [{:>4}] {}",
            index + 1,
            scored.final_rank(),
            scored.article().title
        );
        println!(
            "      score {} | risk {} (impact {} × likelihood {}) | {}",
            scored.score(),
            scored.risk_score(),
            scored.impact(),
            scored.likelihood(),
            scored.article().source
        );
        for entry in scored.evidence().iter() {
            println!("      - {}: {}", entry.category, entry.evidence.describe());
        }
    }
}
