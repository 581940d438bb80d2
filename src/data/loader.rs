// ============================================================
// Layer 4: Token-id Corpus Loader
// ============================================================
// Reads a parallel corpus stored as two line-aligned files of
// whitespace-separated token ids, e.g.
//
//   train.de.id            train.en.id
//   ─────────────          ───────────────
//   12 873 4 9             55 3 19 201 7
//   4 4102                 88 12 6 3
//   ...                    ...
//
// Line i of the source file is the translation of line i of
// the target file. Both files are read one line at a time in
// lock-step, so memory holds only the accepted pairs.
//
// Filtering (silent, not an error):
//   - source with <= 1 id or target with <= 3 ids  → skipped
//   - either side longer than MAX_WORDPIECE_LEN    → skipped
//
// Failures (the whole load aborts):
//   - a file cannot be opened or read   → DataError::Io
//   - a token is not a non-negative int → DataError::Parse
//   - a line is not valid UTF-8          → DataError::Encoding
//   - one file runs out while the other still has a non-blank
//     line                               → DataError::LineCountMismatch
//
// Trailing blank lines in the longer file are filtered like any
// other blank line.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (Reading a File)

use std::{
    fs::File,
    io::{BufRead, BufReader, ErrorKind},
    path::{Path, PathBuf},
};

use crate::domain::error::DataError;
use crate::domain::pair::{Rejection, SentencePair, TokenId};
use crate::domain::traits::PairSource;

/// Loads sentence pairs from two aligned `.id` files.
pub struct IdFileSource {
    source_path: PathBuf,
    target_path: PathBuf,
}

impl IdFileSource {
    pub fn new(source_path: impl Into<PathBuf>, target_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            target_path: target_path.into(),
        }
    }
}

impl PairSource for IdFileSource {
    fn load_pairs(&self) -> Result<Vec<SentencePair>, DataError> {
        let mut src = open(&self.source_path)?;
        let mut tgt = open(&self.target_path)?;

        let mut src_line = String::new();
        let mut tgt_line = String::new();
        let mut pairs    = Vec::new();
        let mut line_no  = 0usize;
        let mut too_short = 0usize;
        let mut too_long  = 0usize;

        loop {
            src_line.clear();
            tgt_line.clear();
            line_no += 1;

            let src_read = read_line(&mut src, &mut src_line, &self.source_path, line_no)?;
            let tgt_read = read_line(&mut tgt, &mut tgt_line, &self.target_path, line_no)?;

            // read_line returns 0 only at end-of-file
            let (shorter, rest) = match (src_read, tgt_read) {
                (0, 0) => break,
                (0, _) => (&self.source_path, &tgt_line),
                (_, 0) => (&self.target_path, &src_line),
                _ => {
                    let pair = SentencePair::new(
                        parse_ids(&src_line, &self.source_path, line_no)?,
                        parse_ids(&tgt_line, &self.target_path, line_no)?,
                    );

                    match pair.check() {
                        Ok(())                     => pairs.push(pair),
                        Err(Rejection::TooShort)   => too_short += 1,
                        Err(Rejection::TooLong)    => too_long  += 1,
                    }
                    continue;
                }
            };

            // Past the shorter file's end only blank lines are allowed
            if !rest.trim().is_empty() {
                return Err(DataError::LineCountMismatch {
                    shorter: shorter.clone(),
                    line:    line_no,
                });
            }
            too_short += 1;
        }

        tracing::debug!(
            "Read {} line pairs: {} skipped as too short, {} as too long",
            line_no - 1,
            too_short,
            too_long,
        );
        tracing::info!("{} pairs are converted in the data", pairs.len());

        Ok(pairs)
    }
}

fn read_line(
    reader:  &mut BufReader<File>,
    buf:     &mut String,
    path:    &Path,
    line_no: usize,
) -> Result<usize, DataError> {
    reader.read_line(buf).map_err(|e| match e.kind() {
        ErrorKind::InvalidData => DataError::Encoding { path: path.to_path_buf(), line: line_no },
        _                      => DataError::io(path, e),
    })
}

fn open(path: &Path) -> Result<BufReader<File>, DataError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| DataError::io(path, e))
}

/// Parse one line of whitespace-separated token ids.
/// A blank line parses to an empty sequence.
pub fn parse_ids(line: &str, path: &Path, line_no: usize) -> Result<Vec<TokenId>, DataError> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<TokenId>().map_err(|_| DataError::Parse {
                path:  path.to_path_buf(),
                line:  line_no,
                token: token.to_string(),
            })
        })
        .collect()
}
