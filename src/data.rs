use failure::{format_err, Error};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// One known plaintext/ciphertext pair, as big-endian 32-bit block halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair {
    pub plain_left: u32,
    pub plain_right: u32,
    pub cipher_left: u32,
    pub cipher_right: u32,
}

/// The pair corpus, loaded once and consumed read-only by the attack.
pub struct Data {
    pub pairs: Vec<Pair>,
}

impl Data {
    pub fn new(filename: &str) -> Result<Data, Error> {
        let file =
            File::open(filename).map_err(|e| format_err!("cannot open {}: {}", filename, e))?;
        Data::from_reader(BufReader::new(file))
    }

    fn from_reader(reader: impl BufRead) -> Result<Data, Error> {
        let mut pairs = Vec::new();
        let mut plain: Option<(u32, u32)> = None;

        for line in reader.lines() {
            let line = line?;
            match plain {
                // a record opens at the next recognized plaintext line;
                // everything else is ignored
                None => plain = field(&line, "Plaintext="),
                Some((plain_left, plain_right)) => {
                    if let Some((cipher_left, cipher_right)) = field(&line, "Ciphertext=") {
                        pairs.push(Pair {
                            plain_left,
                            plain_right,
                            cipher_left,
                            cipher_right,
                        });
                        plain = None;
                    }
                }
            }
        }

        if pairs.is_empty() {
            return Err(format_err!("no plaintext-ciphertext pairs recognized"));
        }
        debug!("parsed {} pairs", pairs.len());
        Ok(Data { pairs })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}

// Split the 16-digit hex field of a `<tag><hex>` line into two word halves.
// Spaces may follow the tag; extra hex digits beyond 16 are dropped; a short
// field disqualifies the line.
fn field(line: &str, tag: &str) -> Option<(u32, u32)> {
    if !line.starts_with(tag) {
        return None;
    }
    let rest = line[tag.len()..].trim_start_matches(' ');
    let hex: String = rest
        .chars()
        .take_while(|c| c.is_ascii_hexdigit())
        .take(16)
        .collect();
    if hex.len() < 16 {
        return None;
    }
    let left = u32::from_str_radix(&hex[..8], 16).ok()?;
    let right = u32::from_str_radix(&hex[8..], 16).ok()?;
    Some((left, right))
}
