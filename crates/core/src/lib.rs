//! MolFS Core Library
//!
//! Bibliothèque principale pour l'encodage/décodage de fichiers en oligos ADN
//! à géométrie fixe, répartis en blocs identifiés par des paires de primers
//! PCR (pool, bloc).

pub mod codec;
pub mod error;
pub mod file;
pub mod logging;
pub mod primer;
pub mod sequence;

// Réexportations principales
pub use codec::{
    decode_block, decode_collection, encode_block, BlockMetadata, CollectionDecode,
    DecodeStats, DecodedBlock, EncodedBlock, MolfsCodec, Session, CORE_NT,
    DEFAULT_BLOCK_SIZE, PAYLOAD_BYTES, RECOMMENDED_PRIMER_NT,
};
pub use error::{MolfsError, Result};
pub use file::{
    encode_file, reassemble, split_blocks, DistributionStrategy, FileDecodeReport,
    MirrorAll, RoundRobin, SinglePool,
};
pub use primer::{PoolBlockId, PrimerPair, PrimerRegistry};
pub use sequence::Base;
