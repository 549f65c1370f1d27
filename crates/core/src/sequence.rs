//! Alphabet ADN et utilitaires de séquence

use crate::error::{MolfsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Base nucléotidique standard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Base {
    A, // Adénine
    C, // Cytosine
    G, // Guanine
    T, // Thymine
}

impl Base {
    /// Convertit un caractère en base
    pub fn from_char(c: char) -> Result<Self> {
        match c.to_ascii_uppercase() {
            'A' => Ok(Base::A),
            'C' => Ok(Base::C),
            'G' => Ok(Base::G),
            'T' => Ok(Base::T),
            _ => Err(MolfsError::InvalidBase(c)),
        }
    }

    /// Convertit une base en caractère
    pub fn as_char(self) -> char {
        match self {
            Base::A => 'A',
            Base::C => 'C',
            Base::G => 'G',
            Base::T => 'T',
        }
    }

    /// Classe de bit du code de canal: {A, C} → 0, {G, T} → 1
    pub fn bit_class(self) -> bool {
        matches!(self, Base::G | Base::T)
    }

    /// Les deux bases admissibles pour un bit, en ordre lexicographique
    pub fn class_pair(bit: bool) -> (Base, Base) {
        if bit {
            (Base::G, Base::T)
        } else {
            (Base::A, Base::C)
        }
    }

    /// Retourne true si c'est une base GC
    pub fn is_gc(self) -> bool {
        matches!(self, Base::G | Base::C)
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl TryFrom<char> for Base {
    type Error = MolfsError;

    fn try_from(c: char) -> Result<Self> {
        Base::from_char(c)
    }
}

/// Longueur du plus long homopolymère d'une chaîne ADN
pub fn max_homopolymer(s: &str) -> usize {
    let mut max_run = 0;
    let mut current_run = 0;
    let mut last: Option<char> = None;

    for c in s.chars() {
        if Some(c) == last {
            current_run += 1;
        } else {
            current_run = 1;
            last = Some(c);
        }
        max_run = max_run.max(current_run);
    }

    max_run
}

/// Vérifie qu'une chaîne ne contient que des bases ACGT
pub fn validate_acgt(s: &str) -> Result<()> {
    for c in s.chars() {
        Base::from_char(c)?;
    }
    Ok(())
}
