//! Gestion des erreurs pour les conteneurs d'oligos

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("Erreur IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erreur de sérialisation: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Enregistrement CSV invalide (ligne {line}): {reason}")]
    Csv { line: usize, reason: String },

    #[error("Enregistrement FASTQ invalide: {0}")]
    Fastq(String),

    #[error(transparent)]
    Core(#[from] molfs_core::MolfsError),
}

pub type Result<T> = std::result::Result<T, ContainerError>;
