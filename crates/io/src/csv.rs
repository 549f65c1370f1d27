//! Conteneur CSV: un oligo par enregistrement
//!
//! Schéma minimal: une colonne unique portant la chaîne d'oligo. Des colonnes
//! annexes (pool, bloc, adresse) peuvent être écrites à titre indicatif; à la
//! lecture elles sont tolérées et ignorées.

use crate::error::{ContainerError, Result};
use std::io::{BufRead, Write};

/// Enregistrement CSV avec colonnes annexes facultatives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OligoRecord {
    pub oligo: String,
    pub pool: Option<u32>,
    pub block: Option<u32>,
    pub address: Option<u32>,
}

impl OligoRecord {
    /// Enregistrement réduit à la seule séquence
    pub fn bare(oligo: impl Into<String>) -> Self {
        Self {
            oligo: oligo.into(),
            pool: None,
            block: None,
            address: None,
        }
    }
}

/// Écrit le schéma minimal: en-tête `oligo` puis une séquence par ligne
pub fn write_csv<W: Write>(writer: &mut W, oligos: &[String]) -> Result<()> {
    writeln!(writer, "oligo")?;
    for oligo in oligos {
        writeln!(writer, "{}", oligo)?;
    }
    Ok(())
}

/// Écrit le schéma étendu avec colonnes annexes indicatives
pub fn write_records_csv<W: Write>(writer: &mut W, records: &[OligoRecord]) -> Result<()> {
    writeln!(writer, "oligo,pool,block,address")?;
    for record in records {
        writeln!(
            writer,
            "{},{},{},{}",
            record.oligo,
            record.pool.map_or(String::new(), |v| v.to_string()),
            record.block.map_or(String::new(), |v| v.to_string()),
            record.address.map_or(String::new(), |v| v.to_string()),
        )?;
    }
    Ok(())
}

/// Lit les séquences d'un conteneur CSV
///
/// La première colonne de chaque ligne est la séquence; les autres colonnes
/// sont ignorées. Une première ligne dont le premier champ n'est pas de l'ADN
/// est traitée comme en-tête. Les lignes vides sont ignorées.
pub fn read_csv<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut oligos = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let field = trimmed.split(',').next().unwrap_or("").trim();
        if field.is_empty() {
            return Err(ContainerError::Csv {
                line: number + 1,
                reason: "première colonne vide".to_string(),
            });
        }

        let looks_like_dna = field
            .chars()
            .all(|c| matches!(c.to_ascii_uppercase(), 'A' | 'C' | 'G' | 'T'));

        if !looks_like_dna {
            if oligos.is_empty() && number == 0 {
                continue; // en-tête
            }
            return Err(ContainerError::Csv {
                line: number + 1,
                reason: format!("séquence non ADN: {}", field),
            });
        }

        oligos.push(field.to_string());
    }

    Ok(oligos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    #[test]
    fn test_write_read_minimal_schema() {
        let oligos = vec!["ACGTACGT".to_string(), "TTGGCCAA".to_string()];

        let mut buffer = Vec::new();
        write_csv(&mut buffer, &oligos).unwrap();

        let parsed = read_csv(BufReader::new(buffer.as_slice())).unwrap();
        assert_eq!(parsed, oligos);
    }

    #[test]
    fn test_read_ignores_advisory_columns() {
        let input = "oligo,pool,block,address\nACGT,1,0,0\nTGCA,1,0,1\n";
        let parsed = read_csv(BufReader::new(input.as_bytes())).unwrap();

        assert_eq!(parsed, vec!["ACGT".to_string(), "TGCA".to_string()]);
    }

    #[test]
    fn test_read_without_header() {
        let input = "ACGT\nTGCA\n";
        let parsed = read_csv(BufReader::new(input.as_bytes())).unwrap();

        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_read_rejects_garbage_line() {
        let input = "ACGT\nnot-dna\n";
        assert!(read_csv(BufReader::new(input.as_bytes())).is_err());
    }

    #[test]
    fn test_records_roundtrip() {
        let records = vec![
            OligoRecord {
                oligo: "ACGT".to_string(),
                pool: Some(1),
                block: Some(0),
                address: Some(0),
            },
            OligoRecord::bare("TGCA"),
        ];

        let mut buffer = Vec::new();
        write_records_csv(&mut buffer, &records).unwrap();

        let parsed = read_csv(BufReader::new(buffer.as_slice())).unwrap();
        assert_eq!(parsed, vec!["ACGT".to_string(), "TGCA".to_string()]);
    }
}
