use crate::lang::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// ## Source text by line number
///
/// Lines are kept as they appear in the file, minus the line terminator.
/// Line numbers are 1-based.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    lines: Vec<String>,
}

impl Listing {
    pub fn new(source: &str) -> Listing {
        Listing {
            lines: source
                .lines()
                .map(|l| l.trim_end_matches('\r').to_string())
                .collect(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Listing, Error> {
        let reader = BufReader::new(File::open(path)?);
        let mut lines = vec![];
        for line in reader.lines() {
            lines.push(line?.trim_end_matches('\r').to_string());
        }
        Ok(Listing { lines })
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, number: usize) -> Option<&str> {
        if number == 0 {
            return None;
        }
        self.lines.get(number - 1).map(|s| s.as_str())
    }

    /// `(line number, text)` pairs in order.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines.iter().enumerate().map(|(i, s)| (i + 1, s.as_str()))
    }
}
