//! CLI pour l'encodage MolFS

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

mod commands;
mod display;

use commands::{decode, encode, inspect, simulate};

#[derive(Parser)]
#[command(name = "molfs")]
#[command(about = "Encodage de fichiers en oligos ADN à géométrie fixe", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Niveau de verbosité
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode un fichier en conteneurs d'oligos
    Encode {
        /// Fichier d'entrée
        #[arg(short, long)]
        input: PathBuf,

        /// Répertoire de sortie
        #[arg(short, long)]
        output: PathBuf,

        /// Taille de bloc (octets)
        #[arg(short, long, default_value = "5120")]
        block_size: usize,

        /// Stratégie de distribution des blocs vers les pools
        #[arg(short, long, value_enum, default_value = "single")]
        strategy: Strategy,

        /// Nombre de pools disponibles (numérotés depuis 1)
        #[arg(short, long, default_value = "1")]
        pools: u32,

        /// Seed de synthèse des primers
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Format de conteneur
        #[arg(short, long, value_enum, default_value = "csv")]
        format: OligoFormat,
    },

    /// Décode des conteneurs d'oligos en fichier original
    Decode {
        /// Répertoire des conteneurs
        #[arg(short, long)]
        input: PathBuf,

        /// Fichier de sortie
        #[arg(short, long)]
        output: PathBuf,

        /// Manifeste (défaut: <input>/manifest.json)
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Passe des conteneurs dans un canal bruité et mesure la récupération
    Simulate {
        /// Répertoire des conteneurs
        #[arg(short, long)]
        input: PathBuf,

        /// Taux de substitution (0.0-1.0)
        #[arg(short, long, default_value = "0.01")]
        substitution_rate: f64,

        /// Taux d'insertion (0.0-1.0)
        #[arg(long, default_value = "0.005")]
        insertion_rate: f64,

        /// Taux de délétion (0.0-1.0)
        #[arg(long, default_value = "0.005")]
        deletion_rate: f64,

        /// Seed du canal
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Affiche le manifeste et l'état de chaque (pool, bloc)
    Inspect {
        /// Répertoire des conteneurs
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(clap::ValueEnum, Clone, Copy)]
pub enum Strategy {
    Single,
    RoundRobin,
    MirrorAll,
}

#[derive(clap::ValueEnum, Clone, Copy)]
pub enum OligoFormat {
    Csv,
    Fastq,
}

impl OligoFormat {
    /// Extension de fichier du format
    pub fn extension(self) -> &'static str {
        match self {
            OligoFormat::Csv => "csv",
            OligoFormat::Fastq => "fastq",
        }
    }
}

fn main() -> anyhow::Result<()> {
    molfs_core::logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            input,
            output,
            block_size,
            strategy,
            pools,
            seed,
            format,
        } => {
            encode::run(input, output, block_size, strategy, pools, seed, format)?;
        }
        Commands::Decode {
            input,
            output,
            manifest,
        } => {
            decode::run(input, output, manifest)?;
        }
        Commands::Simulate {
            input,
            substitution_rate,
            insertion_rate,
            deletion_rate,
            seed,
        } => {
            simulate::run(input, substitution_rate, insertion_rate, deletion_rate, seed)?;
        }
        Commands::Inspect { input } => {
            inspect::run(input)?;
        }
    }

    Ok(())
}

/// Crée une barre de progression
pub fn create_progress_bar(length: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(length);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );
    pb.set_message(msg.to_string());
    pb
}

/// Crée une barre de progression spinner
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb
}
