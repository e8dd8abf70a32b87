// Chunk splitting and line-oriented field access
//
// An asset looks like:
//
//   %YAML 1.1
//   %TAG !u! tag:unity3d.com,2011:
//   --- !u!1 &1742881
//   GameObject:
//     m_Name: PlayButton
//   --- !u!114 &1742883
//   MonoBehaviour:
//     m_GameObject: {fileID: 1742881}
//
// Splitting on the delimiter leaves `1 &1742881\nGameObject:\n...` per record.

use super::records::ObjectIdentifier;
use regex::Regex;
use std::cell::OnceCell;
use std::sync::OnceLock;

/// Marker separating serialized objects within an asset
pub const CHUNK_DELIMITER: &str = "--- !u!";

/// Parsed `<classId> &<anchor>[ stripped]` header line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkHeader {
    pub class_id: Option<u32>,
    pub anchor: Option<ObjectIdentifier>,
    pub stripped: bool,
}

impl ChunkHeader {
    pub fn parse(line: &str) -> Self {
        static HEADER: OnceLock<Regex> = OnceLock::new();
        let re = HEADER.get_or_init(|| {
            Regex::new(r"^\s*(\d+)\s+&(-?\d+)(\s+stripped)?").expect("valid header pattern")
        });

        match re.captures(line) {
            Some(caps) => Self {
                class_id: caps.get(1).and_then(|m| m.as_str().parse().ok()),
                anchor: caps.get(2).map(|m| ObjectIdentifier::new(m.as_str())),
                stripped: caps.get(3).is_some(),
            },
            None => Self::default(),
        }
    }
}

/// A `key: value` line recovered by prefix matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineEntry<'a> {
    /// Column of the key (sequence dashes count as indentation)
    pub indent: usize,
    pub key: &'a str,
    /// Raw value text, trimmed; empty for block openers like `m_OnClick:`
    pub value: &'a str,
}

/// One object's serialized block within an asset
#[derive(Debug)]
pub struct SerializedRecord<'a> {
    /// Position of the record within its asset (0-based, header noise excluded)
    pub index: usize,
    pub header: ChunkHeader,
    text: &'a str,
    entries: OnceCell<Vec<LineEntry<'a>>>,
}

/// Split raw asset text into records; text before the first delimiter is discarded
pub fn split_records(contents: &str) -> Vec<SerializedRecord<'_>> {
    contents
        .split(CHUNK_DELIMITER)
        .skip(1)
        .enumerate()
        .map(|(index, text)| SerializedRecord::new(index, text))
        .collect()
}

impl<'a> SerializedRecord<'a> {
    pub fn new(index: usize, text: &'a str) -> Self {
        let header_line = text.lines().next().unwrap_or("");
        Self {
            index,
            header: ChunkHeader::parse(header_line),
            text,
            entries: OnceCell::new(),
        }
    }

    /// Chunk text without the header line
    pub fn body(&self) -> &'a str {
        match self.text.find('\n') {
            Some(pos) => &self.text[pos + 1..],
            None => "",
        }
    }

    pub fn contains(&self, marker: &str) -> bool {
        self.text.contains(marker)
    }

    /// Top-level type key of the record (`GameObject`, `MonoBehaviour`, ...)
    pub fn root_key(&self) -> Option<&'a str> {
        self.entries()
            .iter()
            .find(|e| e.indent == 0 && e.value.is_empty())
            .map(|e| e.key)
    }

    /// Line entries, derived on first use
    pub fn entries(&self) -> &[LineEntry<'a>] {
        self.entries.get_or_init(|| parse_entries(self.body()))
    }

    /// Value of the first line with `key`, quotes stripped
    pub fn first_value(&self, key: &str) -> Option<&'a str> {
        self.entries()
            .iter()
            .find(|e| e.key == key)
            .map(|e| unquote(e.value))
    }

    /// Values of every line with `key`, in source order, quotes stripped
    pub fn values<'s>(&'s self, key: &'s str) -> impl Iterator<Item = &'a str> + 's {
        self.entries()
            .iter()
            .filter(move |e| e.key == key)
            .map(|e| unquote(e.value))
    }

    /// Body prepared for structured decoding: header and document markers
    /// removed, only lines carrying a key kept
    pub fn structured_body(&self) -> String {
        self.body()
            .lines()
            .filter(|line| !line.trim_start().starts_with("---") && line.contains(':'))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn parse_entries(body: &str) -> Vec<LineEntry<'_>> {
    body.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<LineEntry<'_>> {
    let line = line.trim_end_matches('\r');
    let trimmed = line.trim_start();
    let mut indent = line.len() - trimmed.len();

    let mut rest = trimmed;
    while let Some(stripped) = rest.strip_prefix("- ") {
        indent += 2;
        rest = stripped.trim_start();
    }

    let (key, value) = rest.split_once(':')?;
    if key.is_empty() || key.contains(char::is_whitespace) || key.starts_with('{') {
        return None;
    }

    Some(LineEntry {
        indent,
        key,
        value: value.trim(),
    })
}

/// Strip one layer of matching single or double quotes
fn unquote(value: &str) -> &str {
    let value = value.trim();
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Pull the identifier out of a `{fileID: 123, guid: ..., type: 3}` reference
pub fn parse_file_id(value: &str) -> Option<&str> {
    let start = value.find("fileID:")? + "fileID:".len();
    let id = value[start..]
        .trim_start()
        .split(|c: char| c == ',' || c == '}' || c.is_whitespace())
        .next()?;
    (!id.is_empty()).then_some(id)
}
