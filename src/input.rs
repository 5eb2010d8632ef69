//! Reading whitespace-separated values from files or readers.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use memmap2::Mmap;

use crate::error::{Error, Result};

/// Parse every whitespace-separated token of `text` as a `T`.
pub fn parse_values<T: FromStr>(text: &str) -> Result<Vec<T>> {
    text.split_whitespace()
        .enumerate()
        .map(|(index, token)| {
            token.parse().map_err(|_| Error::Parse {
                index,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Memory-map `path` and parse its contents.
pub fn read_values<T: FromStr, P: AsRef<Path>>(path: P) -> Result<Vec<T>> {
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(Vec::new());
    }
    // SAFETY: the map is read only and dropped before we return
    let mmap = unsafe { Mmap::map(&file)? };
    parse_values(&String::from_utf8_lossy(&mmap))
}

/// Read `reader` to the end and parse its contents.
pub fn read_values_from<T: FromStr, R: Read>(mut reader: R) -> Result<Vec<T>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_values(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_values() {
        let values: Vec<i64> = parse_values("5 3\n8\t-1  9 7\n").unwrap();
        assert_eq!(values, vec![5, 3, 8, -1, 9, 7]);
    }

    #[test]
    fn test_parse_empty() {
        let values: Vec<i64> = parse_values("  \n ").unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_parse_error_reports_token() {
        let err = parse_values::<i64>("1 2 three 4").unwrap_err();
        match err {
            Error::Parse { index, token } => {
                assert_eq!(index, 2);
                assert_eq!(token, "three");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_read_values_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "10 4 7").unwrap();
        writeln!(file, "4").unwrap();
        file.flush().unwrap();

        let values: Vec<u32> = read_values(file.path()).unwrap();
        assert_eq!(values, vec![10, 4, 7, 4]);
    }

    #[test]
    fn test_read_values_from_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let values: Vec<u32> = read_values(file.path()).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_values::<u32, _>("/definitely/not/here.txt");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_read_values_from_reader() {
        let values: Vec<i32> = read_values_from("3 2 1".as_bytes()).unwrap();
        assert_eq!(values, vec![3, 2, 1]);
    }
}
