//! Conteneur FASTQ: enregistrements standard sur 4 lignes
//!
//! Seule la ligne de séquence est consommée; les scores de qualité sont
//! ignorés par le coeur (une future couche de consensus les exploitera).

use crate::error::{ContainerError, Result};
use bio::io::fastq;
use std::io::{Read, Write};

/// Lit les séquences d'un conteneur FASTQ
pub fn read_fastq<R: Read>(reader: R) -> Result<Vec<String>> {
    let reader = fastq::Reader::new(reader);
    let mut oligos = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| ContainerError::Fastq(e.to_string()))?;
        oligos.push(String::from_utf8_lossy(record.seq()).into_owned());
    }

    Ok(oligos)
}

/// Écrit des oligos en FASTQ avec une qualité de remplissage uniforme
pub fn write_fastq<W: Write>(writer: W, oligos: &[String]) -> Result<()> {
    let mut writer = fastq::Writer::new(writer);

    for (i, oligo) in oligos.iter().enumerate() {
        let quality = vec![b'I'; oligo.len()];
        writer
            .write(&format!("oligo_{}", i), None, oligo.as_bytes(), &quality)
            .map_err(|e| ContainerError::Fastq(e.to_string()))?;
    }

    Ok(())
}
