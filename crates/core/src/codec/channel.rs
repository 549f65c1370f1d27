//! Code de canal bit ↔ base avec évitement d'homopolymères
//!
//! Chaque bit admet deux bases ({A, C} pour 0, {G, T} pour 1); l'encodeur
//! choisit dans la classe la base lexicographiquement plus petite, sauf si ce
//! choix prolongerait un run d'une même base à 4. Le décodeur n'a besoin
//! d'aucun historique: la classe de la base suffit.

use crate::error::Result;
use crate::sequence::Base;

/// Longueur maximale d'homopolymère autorisée dans les champs codés
pub const MAX_HOMOPOLYMER: usize = 3;

/// Encodeur de canal avec état (historique des bases émises)
#[derive(Debug, Clone, Default)]
pub struct ChannelEncoder {
    last: Option<Base>,
    run: usize,
}

impl ChannelEncoder {
    /// Crée un encodeur avec un historique vierge
    pub fn new() -> Self {
        Self { last: None, run: 0 }
    }

    /// Émet la base pour un bit, en respectant la règle d'évitement
    pub fn push_bit(&mut self, bit: bool) -> Base {
        let (first, second) = Base::class_pair(bit);

        let chosen = if self.last == Some(first) && self.run >= MAX_HOMOPOLYMER {
            second
        } else {
            first
        };

        if self.last == Some(chosen) {
            self.run += 1;
        } else {
            self.last = Some(chosen);
            self.run = 1;
        }

        chosen
    }

    /// Encode une suite de bits en chaîne ADN
    pub fn encode(&mut self, bits: &[bool]) -> String {
        bits.iter().map(|&b| self.push_bit(b).as_char()).collect()
    }
}

/// Encode des bits en ADN sans homopolymère, avec un historique vierge
pub fn encode_bits(bits: &[bool]) -> String {
    ChannelEncoder::new().encode(bits)
}

/// Décode une chaîne ADN en bits: A, C → 0; G, T → 1
///
/// Échoue sur tout caractère hors ACGT.
pub fn decode_bases(s: &str) -> Result<Vec<bool>> {
    s.chars()
        .map(|c| Base::from_char(c).map(Base::bit_class))
        .collect()
}

/// Convertit des octets en bits, octet par octet, MSB en premier
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1 == 1);
        }
    }
    bits
}

/// Convertit des bits (multiple de 8, MSB en premier) en octets
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    debug_assert_eq!(bits.len() % 8, 0);

    bits.chunks(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &b| (acc << 1) | u8::from(b)))
        .collect()
}

/// Convertit un entier non signé en bits de largeur fixe, MSB en premier
pub fn uint_to_bits(value: u32, width: usize) -> Vec<bool> {
    debug_assert!(width <= 32);

    (0..width)
        .rev()
        .map(|shift| (value >> shift) & 1 == 1)
        .collect()
}

/// Convertit des bits (MSB en premier) en entier non signé
pub fn bits_to_uint(bits: &[bool]) -> u32 {
    debug_assert!(bits.len() <= 32);

    bits.iter().fold(0u32, |acc, &b| (acc << 1) | u32::from(b))
}
