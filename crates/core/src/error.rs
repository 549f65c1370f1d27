//! Types d'erreurs pour la bibliothèque MolFS

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MolfsError {
    #[error("Primers non enregistrés pour (pool {pool}, bloc {block})")]
    PrimerMissing { pool: u32, block: u32 },

    #[error("Paire de primers déjà liée à (pool {pool}, bloc {block})")]
    PrimerDuplicate { pool: u32, block: u32 },

    #[error("Oligo malformé: {0}")]
    MalformedOligo(String),

    #[error("CRC32 invalide: attendu {expected:#010x}, obtenu {actual:#010x}")]
    CrcMismatch { expected: u32, actual: u32 },

    #[error("Bloc manquant: {0}")]
    BlockMissing(u32),

    #[error("Base invalide: {0}")]
    InvalidBase(char),

    #[error("Adresse hors plage: {address} (max {max})")]
    AddressOutOfRange { address: u32, max: u32 },

    #[error("Erreur IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erreur de sérialisation: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Erreur d'encodage: {0}")]
    Encoding(String),

    #[error("Erreur de décodage: {0}")]
    Decoding(String),
}

pub type Result<T> = std::result::Result<T, MolfsError>;
