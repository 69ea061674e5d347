use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use mumalign_cli::config::{self, Config};
use mumalign_cli::{fasta, report};
use mumalign_core::*;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mumalign")]
#[command(about = "MumAlign - whole-genome alignment with maximal unique matches")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./mumalign.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Nucmer,
    Mummer,
}

#[derive(Subcommand)]
enum Commands {
    /// Find maximal unique matches between references and queries
    Mums {
        /// Reference FASTA/FASTQ file
        #[arg(short, long)]
        reference: PathBuf,

        /// Query FASTA/FASTQ file
        #[arg(short, long)]
        query: PathBuf,

        /// Minimum match length
        #[arg(short = 'k', long)]
        min_length: Option<usize>,

        /// Report all maximal matches, not only unique ones
        #[arg(long)]
        maxmatch: bool,

        /// Reduce each query's matches to their best increasing chain
        #[arg(long)]
        chain: bool,

        /// Sequence alphabet (dna, rna, protein)
        #[arg(long)]
        alphabet: Option<String>,
    },

    /// Align queries against references
    Align {
        /// Reference FASTA/FASTQ file
        #[arg(short, long)]
        reference: PathBuf,

        /// Query FASTA/FASTQ file
        #[arg(short, long)]
        query: PathBuf,

        /// Parameter preset (nucmer, mummer, sensitive)
        #[arg(short, long)]
        preset: Option<String>,

        /// Alignment mode
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Minimum match length
        #[arg(short = 'k', long)]
        min_length: Option<usize>,

        /// Report all maximal matches as seeds
        #[arg(long)]
        maxmatch: bool,

        /// Largest gap bridged between clusters
        #[arg(short, long)]
        break_length: Option<usize>,

        /// Minimum cluster score
        #[arg(long)]
        min_cluster: Option<usize>,

        /// Sequence alphabet (dna, rna, protein)
        #[arg(long)]
        alphabet: Option<String>,

        /// Also write the alignments as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of threads
        #[arg(short, long)]
        threads: Option<usize>,
    },

    /// Print or save the default configuration
    Config {
        /// Start from this preset instead of the defaults
        #[arg(short, long)]
        preset: Option<String>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Mums {
            reference,
            query,
            min_length,
            maxmatch,
            chain,
            alphabet,
        } => {
            let mut config = Config::load(config_path)?;
            if let Some(k) = min_length {
                config.seed.min_mum_length = k;
            }
            config.seed.maxmatch |= maxmatch;
            if let Some(alphabet) = alphabet {
                config.general.alphabet = alphabet;
            }
            cmd_mums(&config, &reference, &query, chain)
        }
        Commands::Align {
            reference,
            query,
            preset,
            mode,
            min_length,
            maxmatch,
            break_length,
            min_cluster,
            alphabet,
            output,
            threads,
        } => {
            let mut config = Config::load(config_path)?;
            if let Some(preset) = preset {
                config = config.with_preset(&preset)?;
            }
            if let Some(mode) = mode {
                config.align.mode = match mode {
                    ModeArg::Nucmer => "nucmer",
                    ModeArg::Mummer => "mummer",
                }
                .to_string();
            }
            if let Some(k) = min_length {
                config.seed.min_mum_length = k;
            }
            config.seed.maxmatch |= maxmatch;
            if let Some(b) = break_length {
                config.align.break_length = b;
            }
            if let Some(score) = min_cluster {
                config.cluster.minimum_score = score;
            }
            if let Some(alphabet) = alphabet {
                config.general.alphabet = alphabet;
            }
            if let Some(threads) = threads {
                config.general.threads = threads;
            }
            cmd_align(&config, &reference, &query, output.as_deref())
        }
        Commands::Config { preset, output } => cmd_config(config_path, preset, output),
    }
}

fn load_inputs(config: &Config, reference: &Path, query: &Path) -> Result<(Vec<Sequence>, Vec<Sequence>)> {
    let alphabet = config.alphabet()?;
    let references = fasta::read_sequences(reference, alphabet)?;
    let queries = fasta::read_sequences(query, alphabet)?;
    Ok((references, queries))
}

fn init_threads(threads: usize) -> Result<()> {
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the thread pool")?;
        log::debug!("Using {} threads", threads);
    }
    Ok(())
}

fn cmd_mums(config: &Config, reference: &Path, query: &Path, chain: bool) -> Result<()> {
    log::info!("Finding matches: {} vs {}", reference.display(), query.display());
    init_threads(config.general.threads)?;

    let params = config.to_align_params()?;
    let (references, queries) = load_inputs(config, reference, query)?;
    let index = SequenceIndex::build(&references)?;
    let seeder = MatchSeeder::new(params.seed)?
        .with_extractor(ChainExtractor::with_tie_break(params.tie_break));

    let per_query = if chain {
        seeder.align_with_chain(&index, &queries)?
    } else {
        queries
            .iter()
            .map(|q| seeder.find_seeds(&index, q))
            .collect::<SeedResult<Vec<_>>>()?
    };

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for (query, seeds) in queries.iter().zip(&per_query) {
        report::write_seeds(&mut out, &references, query, seeds)?;
    }
    out.flush()?;

    log::info!(
        "Reported {} matches for {} queries",
        per_query.iter().map(Vec::len).sum::<usize>(),
        queries.len()
    );
    Ok(())
}

fn cmd_align(config: &Config, reference: &Path, query: &Path, output: Option<&Path>) -> Result<()> {
    log::info!("Starting alignment: {} vs {}", reference.display(), query.display());
    init_threads(config.general.threads)?;

    let params = config.to_align_params()?;
    let preset = params.preset.clone();
    let mode = config::mode_name(params.mode);
    let assembler = AlignmentAssembler::new(params)?;
    log::info!("Using preset '{}' in {} mode", preset, mode);

    let (references, queries) = load_inputs(config, reference, query)?;
    let results = assembler.align(&references, &queries)?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    report::write_coords(&mut out, &results)?;
    out.flush()?;

    if let Some(path) = output {
        report::write_json(path, &preset, mode, &results)?;
        log::info!("Output: {}", path.display());
    }

    log::info!(
        "Alignment completed: {} segments",
        results.iter().map(|r| r.segments.len()).sum::<usize>()
    );
    Ok(())
}

fn cmd_config(config_path: Option<&Path>, preset: Option<String>, output: Option<PathBuf>) -> Result<()> {
    let mut config = match config_path {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    if let Some(preset) = preset {
        config = config.with_preset(&preset)?;
    }

    match output {
        Some(path) => {
            config.save_to_file(&path)?;
            log::info!("Wrote configuration to {}", path.display());
        }
        None => print!("{}", config.to_toml()?),
    }
    Ok(())
}
