//! Crossword puzzle generator
//!
//! Prints puzzle records as JSON on stdout. Logs go to stderr.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use crossword_core::{Difficulty, Generator, GeneratorConfig, PuzzleRecord, WordList, WordSource};
use log::{info, warn};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

mod clue_service;

use clue_service::{ClueBackend, ClueManager, LocalDictionary, RemoteClueService, RemoteConfig};

#[derive(Parser, Debug)]
#[command(name = "crossword")]
#[command(about = "Generate crossword puzzles as JSON", long_about = None)]
#[command(version)]
struct Cli {
    /// Puzzle title
    #[arg(short, long, default_value = "Generated Puzzle")]
    theme: String,

    /// Comma-separated words to place instead of sampling a word list
    #[arg(short, long, value_delimiter = ',')]
    words: Vec<String>,

    /// Grid side to search first
    #[arg(short, long)]
    size: Option<usize>,

    #[arg(short, long, value_enum, default_value_t = DifficultyArg::Easy)]
    difficulty: DifficultyArg,

    /// Number of puzzles to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Word list, one word per line
    #[arg(long)]
    wordlist: Option<PathBuf>,

    /// Extra clues as JSON: {"word": {"en": "...", "zh": "..."}}
    #[arg(long)]
    clue_dictionary: Option<PathBuf>,

    /// Chat-completions base URL for clue writing (overrides CROSSWORD_CLUE_API_URL)
    #[arg(long)]
    clue_api: Option<String>,

    /// Model name sent to the clue API (overrides CROSSWORD_CLUE_MODEL)
    #[arg(long)]
    clue_model: Option<String>,

    #[arg(long, default_value_t = 30)]
    clue_timeout_secs: u64,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    min_words: Option<usize>,

    #[arg(long)]
    max_attempts: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log only warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DifficultyArg {
    Easy,
    Intermediate,
    Advanced,
}

impl From<DifficultyArg> for Difficulty {
    fn from(d: DifficultyArg) -> Self {
        match d {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Intermediate => Difficulty::Intermediate,
            DifficultyArg::Advanced => Difficulty::Advanced,
        }
    }
}

impl Cli {
    fn generator_config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::for_difficulty(self.difficulty.into());
        if let Some(min_words) = self.min_words {
            config.min_words = min_words;
        }
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts = max_attempts;
        }
        config.target_size = self.size;
        config
    }

    fn remote_config(&self) -> Option<RemoteConfig> {
        let mut config = match (&self.clue_api, RemoteConfig::from_env()) {
            (Some(url), Some(env)) => RemoteConfig {
                base_url: url.clone(),
                ..env
            },
            (Some(url), None) => RemoteConfig {
                base_url: url.clone(),
                api_key: std::env::var("CROSSWORD_CLUE_API_KEY").ok(),
                model: RemoteConfig::DEFAULT_MODEL.to_string(),
            },
            (None, env) => env?,
        };
        if let Some(model) = &self.clue_model {
            config.model = model.clone();
        }
        Some(config)
    }
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn default_wordlist_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("crossword")
        .join("wordlist.txt")
}

fn load_word_list(path: Option<&Path>) -> Result<WordList> {
    let path = path.map_or_else(default_wordlist_path, Path::to_path_buf);
    let list = WordList::load(&path)
        .with_context(|| format!("Failed to load word list {}", path.display()))?;
    if list.is_empty() {
        bail!("Word list {} has no usable words", path.display());
    }
    info!("Loaded {} words from {}", list.len(), path.display());
    Ok(list)
}

fn clue_manager(cli: &Cli) -> Result<ClueManager> {
    let mut local = LocalDictionary::builtin();
    if let Some(path) = &cli.clue_dictionary {
        local = local
            .with_file(path)
            .with_context(|| format!("Failed to load clue dictionary {}", path.display()))?;
    }
    info!("{} clues available locally", local.len());
    let local: Arc<dyn ClueBackend> = Arc::new(local);
    let timeout = Duration::from_secs(cli.clue_timeout_secs);

    let manager = match cli.remote_config() {
        Some(config) => {
            info!("Writing clues with {} via {}", config.model, config.base_url);
            let remote = RemoteClueService::new(config).context("Failed to build HTTP client")?;
            ClueManager::new(Arc::new(remote), timeout).with_fallback(local)
        }
        None => ClueManager::new(local, timeout),
    };
    Ok(manager)
}

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

async fn run(cli: &Cli) -> Result<Vec<PuzzleRecord>> {
    let config = cli.generator_config();
    let difficulty = config.difficulty;

    let word_list = if cli.words.is_empty() {
        Some(load_word_list(cli.wordlist.as_deref())?)
    } else {
        None
    };
    let source = match &word_list {
        Some(list) => WordSource::Sampled(list),
        None => WordSource::Fixed(cli.words.clone()),
    };

    let clues = clue_manager(cli)?;
    let mut generator = match cli.seed {
        Some(seed) => Generator::with_seed(config, seed),
        None => Generator::new(config),
    };

    let mut puzzles = Vec::with_capacity(cli.count);
    for n in 1..=cli.count {
        info!("Generating puzzle {}/{} ({})", n, cli.count, difficulty);
        let layout = match generator.layout(&source) {
            Ok(layout) => layout,
            Err(e) => {
                warn!("Puzzle {} failed: {}", n, e);
                continue;
            }
        };
        info!("Grid:\n{}", layout.grid);

        let found = clues.clues_for(&layout.words, difficulty).await;
        puzzles.push(generator.finish(&layout, &cli.theme, &found));
    }
    Ok(puzzles)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let puzzles = run(&cli).await?;
    if puzzles.is_empty() {
        bail!("Failed to generate any puzzles");
    }

    let json = if puzzles.len() == 1 {
        serde_json::to_string_pretty(&puzzles[0])
    } else {
        serde_json::to_string_pretty(&puzzles)
    }
    .context("Failed to serialize puzzles")?;
    print_stdout(&json)
}
