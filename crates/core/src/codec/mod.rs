//! Codec d'oligos: code de canal, trame, blocs

pub mod block;
pub mod channel;
pub mod oligo;

pub use block::{
    decode_block, decode_collection, encode_block, BlockMetadata, CollectionDecode,
    DecodeStats, DecodedBlock, EncodedBlock, DEFAULT_BLOCK_SIZE,
};
pub use channel::{decode_bases, encode_bits, ChannelEncoder, MAX_HOMOPOLYMER};
pub use oligo::{
    build_oligo, crc32, parse_oligo, OligoFields, ADDRESS_BITS, ADDRESS_SPACE, CORE_NT,
    PAYLOAD_BYTES, RECOMMENDED_PRIMER_NT,
};

use crate::error::{MolfsError, Result};
use crate::primer::PrimerRegistry;

/// Interface de codec vue par MolFS
///
/// Le (pool, bloc) courant appartient à la session de l'appelant, jamais au
/// codec: encode et decode sont des fonctions pures de (registre, entrées).
pub trait MolfsCodec {
    /// Fixe le (pool, bloc) courant de la session
    fn set_current(&mut self, pool: u32, block: u32);

    /// Encode un bloc d'octets vers des oligos pour le (pool, bloc) courant
    fn encode(&self, data: &[u8]) -> Result<Vec<String>>;

    /// Décode des oligos vers les octets du (pool, bloc) courant
    fn decode(&self, oligos: &[String]) -> Result<(Vec<u8>, DecodeStats)>;
}

/// Session de codec: registre emprunté + (pool, bloc) courant
pub struct Session<'a> {
    registry: &'a PrimerRegistry,
    current: Option<(u32, u32)>,
}

impl<'a> Session<'a> {
    /// Ouvre une session sur un registre
    pub fn new(registry: &'a PrimerRegistry) -> Self {
        Self {
            registry,
            current: None,
        }
    }

    fn current(&self) -> Result<(u32, u32)> {
        self.current.ok_or_else(|| {
            MolfsError::Encoding("aucun (pool, bloc) courant dans la session".to_string())
        })
    }
}

impl MolfsCodec for Session<'_> {
    fn set_current(&mut self, pool: u32, block: u32) {
        self.current = Some((pool, block));
    }

    fn encode(&self, data: &[u8]) -> Result<Vec<String>> {
        let (pool, block) = self.current()?;
        encode_block(self.registry, pool, block, data).map(|encoded| encoded.oligos)
    }

    fn decode(&self, oligos: &[String]) -> Result<(Vec<u8>, DecodeStats)> {
        let (pool, block) = self.current()?;
        decode_block(self.registry, pool, block, oligos, None)
    }
}
