//! Trame d'oligo à géométrie fixe
//!
//! Un oligo est la concaténation de cinq champs contigus:
//! primer avant ∥ adresse (19 nt) ∥ payload (96 nt) ∥ CRC32 (32 nt) ∥ primer
//! arrière. Les trois champs centraux sont codés par le code de canal, chacun
//! avec un historique vierge; le CRC32 (IEEE 802.3) est calculé sur les 12
//! octets bruts du chunk, avant codage.

use crate::codec::channel::{
    bits_to_bytes, bits_to_uint, bytes_to_bits, decode_bases, encode_bits, uint_to_bits,
    MAX_HOMOPOLYMER,
};
use crate::error::{MolfsError, Result};
use crate::sequence::max_homopolymer;

/// Largeur du champ adresse (bits et nucléotides)
pub const ADDRESS_BITS: usize = 19;

/// Taille d'un chunk de payload (octets)
pub const PAYLOAD_BYTES: usize = 12;

/// Largeur du champ payload (bits et nucléotides)
pub const PAYLOAD_BITS: usize = PAYLOAD_BYTES * 8;

/// Largeur du champ CRC32 (bits et nucléotides)
pub const CRC_BITS: usize = 32;

/// Longueur des trois champs codés d'un oligo (nucléotides)
pub const CORE_NT: usize = ADDRESS_BITS + PAYLOAD_BITS + CRC_BITS;

/// Longueur de primer recommandée (non imposée par le coeur)
pub const RECOMMENDED_PRIMER_NT: usize = 22;

/// Nombre d'adresses représentables (2^19)
pub const ADDRESS_SPACE: u32 = 1 << ADDRESS_BITS;

/// Champs extraits d'un oligo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OligoFields {
    /// Primer avant (tel que lu)
    pub forward: String,
    /// Primer arrière (tel que lu)
    pub reverse: String,
    /// Adresse du chunk dans son bloc
    pub address: u32,
    /// Les 12 octets bruts du chunk
    pub payload: [u8; PAYLOAD_BYTES],
    /// CRC32 décodé depuis l'oligo
    pub crc: u32,
}

impl OligoFields {
    /// Vérifie que le CRC décodé correspond au payload décodé
    pub fn crc_ok(&self) -> bool {
        self.check_crc().is_ok()
    }

    /// Variante qui détaille le désaccord (`CrcMismatch`)
    pub fn check_crc(&self) -> Result<()> {
        let expected = crc32(&self.payload);
        if expected == self.crc {
            Ok(())
        } else {
            Err(MolfsError::CrcMismatch {
                expected,
                actual: self.crc,
            })
        }
    }
}

/// CRC32 IEEE 802.3 (polynôme 0xEDB88320 réfléchi, init et xor final 0xFFFFFFFF)
pub fn crc32(payload: &[u8]) -> u32 {
    crc32fast::hash(payload)
}

/// Assemble un oligo complet depuis ses champs
///
/// Les primers sont fournis par l'appelant et ne sont pas contraints; les
/// champs codés sont garantis sans run de 4 bases identiques.
pub fn build_oligo(
    forward: &str,
    reverse: &str,
    address: u32,
    payload: &[u8; PAYLOAD_BYTES],
) -> Result<String> {
    if address >= ADDRESS_SPACE {
        return Err(MolfsError::AddressOutOfRange {
            address,
            max: ADDRESS_SPACE,
        });
    }

    let crc = crc32(payload);

    let address_dna = encode_bits(&uint_to_bits(address, ADDRESS_BITS));
    let payload_dna = encode_bits(&bytes_to_bits(payload));
    let crc_dna = encode_bits(&uint_to_bits(crc, CRC_BITS));

    // La règle à deux choix rend la contrainte toujours satisfiable
    debug_assert!(max_homopolymer(&address_dna) <= MAX_HOMOPOLYMER);
    debug_assert!(max_homopolymer(&payload_dna) <= MAX_HOMOPOLYMER);
    debug_assert!(max_homopolymer(&crc_dna) <= MAX_HOMOPOLYMER);

    let mut oligo =
        String::with_capacity(forward.len() + CORE_NT + reverse.len());
    oligo.push_str(forward);
    oligo.push_str(&address_dna);
    oligo.push_str(&payload_dna);
    oligo.push_str(&crc_dna);
    oligo.push_str(reverse);

    Ok(oligo)
}

/// Découpe un oligo aux offsets fixes et décode ses champs
///
/// Une longueur inattendue donne `MalformedOligo`; un caractère hors ACGT
/// dans un champ codé donne `InvalidBase` (distinct d'un échec CRC).
pub fn parse_oligo(s: &str, fwd_len: usize, rev_len: usize) -> Result<OligoFields> {
    if !s.is_ascii() {
        return Err(MolfsError::MalformedOligo(
            "caractères non ASCII".to_string(),
        ));
    }

    let expected = fwd_len + CORE_NT + rev_len;
    if s.len() != expected {
        return Err(MolfsError::MalformedOligo(format!(
            "longueur {} au lieu de {}",
            s.len(),
            expected
        )));
    }

    let address_start = fwd_len;
    let payload_start = address_start + ADDRESS_BITS;
    let crc_start = payload_start + PAYLOAD_BITS;
    let rev_start = crc_start + CRC_BITS;

    let address = bits_to_uint(&decode_bases(&s[address_start..payload_start])?);

    let payload_bits = decode_bases(&s[payload_start..crc_start])?;
    let payload: [u8; PAYLOAD_BYTES] = bits_to_bytes(&payload_bits)
        .try_into()
        .expect("96 bits donnent 12 octets");

    let crc = bits_to_uint(&decode_bases(&s[crc_start..rev_start])?);

    Ok(OligoFields {
        forward: s[..fwd_len].to_string(),
        reverse: s[rev_start..].to_string(),
        address,
        payload,
        crc,
    })
}
