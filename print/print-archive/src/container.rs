//! ZIP container reading.
//!
//! Sliced print jobs and 3MF projects are ZIP archives. Only three kinds of
//! entry matter for normalization:
//!
//! - vendor configuration under `Metadata/` (`.config`, `.json`, `.xml`) and
//!   anything under `Cura/`
//! - embedded G-code, reduced to the key/value pairs of its comment lines
//! - 3MF model parts (`.model`), kept as raw XML for the geometry fallback
//!
//! Everything else (thumbnails, relationships, content types) is skipped.

use std::collections::BTreeMap;
use std::io::{Cursor, Read};

use tracing::debug;
use zip::ZipArchive;

use crate::error::{ArchiveError, ArchiveResult};

/// Broad classification of an archive by file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// Project with slicer output (`*.gcode.3mf`).
    SlicedProject,
    /// Plain 3MF project that may only carry meshes (`*.3mf`).
    MeshOnly,
}

impl ArchiveKind {
    /// Classify a file name by its extension, case-insensitively.
    ///
    /// ```
    /// use print_archive::ArchiveKind;
    ///
    /// assert_eq!(ArchiveKind::from_file_name("benchy.gcode.3mf"), Some(ArchiveKind::SlicedProject));
    /// assert_eq!(ArchiveKind::from_file_name("Benchy.3MF"), Some(ArchiveKind::MeshOnly));
    /// assert_eq!(ArchiveKind::from_file_name("benchy.stl"), None);
    /// ```
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".gcode.3mf") {
            Some(Self::SlicedProject)
        } else if lower.ends_with(".3mf") {
            Some(Self::MeshOnly)
        } else {
            None
        }
    }
}

/// Key/value pairs from the comment lines of one G-code entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructionBlock {
    /// Entry path inside the archive.
    pub path: String,
    /// Lower-cased keys mapped to trimmed values. First occurrence wins.
    pub fields: BTreeMap<String, String>,
    /// `generated by ...` / `generated with ...` line, lower-cased.
    pub generator: Option<String>,
}

impl InstructionBlock {
    /// Extract comment fields from G-code (or INI-style config) text.
    ///
    /// Recognized comment shapes:
    /// - `; key = value`
    /// - `; key: value` and `;KEY:value`
    /// - `; key: value; other key: value` (several pairs on one line)
    ///
    /// Thumbnail blocks are skipped.
    ///
    /// ```
    /// use print_archive::InstructionBlock;
    ///
    /// let block = InstructionBlock::parse("plate_1.gcode", "; filament used [g] = 12.5\n;TIME:60\nG1 X0\n");
    /// assert_eq!(block.get("filament used [g]"), Some("12.5"));
    /// assert_eq!(block.get("time"), Some("60"));
    /// ```
    #[must_use]
    pub fn parse(path: impl Into<String>, text: &str) -> Self {
        let mut block = Self {
            path: path.into(),
            ..Self::default()
        };
        let mut in_thumbnail = false;

        for line in text.lines() {
            let line = line.trim();
            let Some(comment) = line.strip_prefix(';') else {
                continue;
            };
            let comment = comment.trim_start_matches(';').trim();
            let lower = comment.to_ascii_lowercase();

            if lower.contains("thumbnail") {
                if lower.contains("begin") || lower.contains("start") {
                    in_thumbnail = true;
                } else if lower.contains("end") {
                    in_thumbnail = false;
                }
                continue;
            }
            if in_thumbnail || comment.is_empty() {
                continue;
            }

            if block.generator.is_none()
                && (lower.starts_with("generated by") || lower.starts_with("generated with"))
            {
                block.generator = Some(lower);
                continue;
            }

            if let Some((key, value)) = comment.split_once('=') {
                block.insert(key, value);
            } else {
                for segment in comment.split(';') {
                    if let Some((key, value)) = segment.split_once(':') {
                        block.insert(key, value);
                    }
                }
            }
        }

        block
    }

    fn insert(&mut self, key: &str, value: &str) {
        let key = key.trim().to_ascii_lowercase();
        if key.is_empty() {
            return;
        }
        self.fields
            .entry(key)
            .or_insert_with(|| value.trim().to_string());
    }

    /// Value for a lower-case key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// First present key among `keys`, with its value.
    #[must_use]
    pub fn find<'a>(&'a self, keys: &[&'a str]) -> Option<(&'a str, &'a str)> {
        keys.iter()
            .find_map(|&key| self.get(key).map(|value| (key, value)))
    }

    /// Whether a field with this key exists.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Whether the generator line contains `needle` (lower-case).
    #[must_use]
    pub fn generated_by(&self, needle: &str) -> bool {
        self.generator
            .as_deref()
            .is_some_and(|generator| generator.contains(needle))
    }
}

/// The recognizable contents of an archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveEntries {
    /// Vendor configuration text by entry path.
    pub configs: BTreeMap<String, String>,
    /// Comment fields of each embedded G-code entry, in archive order.
    pub instructions: Vec<InstructionBlock>,
    /// Raw XML of each 3MF model part by entry path.
    pub models: BTreeMap<String, String>,
}

impl ArchiveEntries {
    /// Configuration text for an entry path, matched case-insensitively.
    #[must_use]
    pub fn config(&self, path: &str) -> Option<&str> {
        self.configs
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(path))
            .map(|(_, text)| text.as_str())
    }

    /// Whether any configuration entry lives under `prefix` (case-insensitive).
    #[must_use]
    pub fn has_config_under(&self, prefix: &str) -> bool {
        let prefix = prefix.to_ascii_lowercase();
        self.configs
            .keys()
            .any(|name| name.to_ascii_lowercase().starts_with(&prefix))
    }

    /// Whether nothing recognizable was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty() && self.instructions.is_empty() && self.models.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Config,
    Instructions,
    Model,
}

impl EntryKind {
    fn classify(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".gcode") {
            Some(Self::Instructions)
        } else if lower.ends_with(".model") {
            Some(Self::Model)
        } else if lower.starts_with("cura/")
            || (lower.starts_with("metadata/")
                && [".config", ".json", ".xml"]
                    .iter()
                    .any(|ext| lower.ends_with(ext)))
        {
            Some(Self::Config)
        } else {
            None
        }
    }
}

/// Read the recognizable entries of a ZIP container.
///
/// # Errors
///
/// - [`ArchiveError::Unreadable`] if the bytes are not a ZIP container.
/// - [`ArchiveError::EmptyOrCorrupt`] if an entry cannot be decompressed or
///   no recognizable entry exists.
pub fn read_entries(bytes: &[u8]) -> ArchiveResult<ArchiveEntries> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ArchiveError::unreadable(format!("invalid ZIP archive: {e}")))?;

    let mut entries = ArchiveEntries::default();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i).map_err(|e| {
            ArchiveError::empty_or_corrupt(format!("failed to read archive entry: {e}"))
        })?;
        if file.is_dir() {
            continue;
        }
        let name = file.name().to_string();
        let Some(kind) = EntryKind::classify(&name) else {
            continue;
        };

        let mut data = Vec::new();
        file.read_to_end(&mut data).map_err(|e| {
            ArchiveError::empty_or_corrupt(format!("failed to decompress {name}: {e}"))
        })?;
        let text = String::from_utf8_lossy(&data);

        match kind {
            EntryKind::Config => {
                entries.configs.insert(name, text.into_owned());
            }
            EntryKind::Instructions => {
                entries.instructions.push(InstructionBlock::parse(name, &text));
            }
            EntryKind::Model => {
                entries.models.insert(name, text.into_owned());
            }
        }
    }

    if entries.is_empty() {
        return Err(ArchiveError::empty_or_corrupt(
            "archive contains no slicer metadata, G-code or model",
        ));
    }

    debug!(
        configs = entries.configs.len(),
        instructions = entries.instructions.len(),
        models = entries.models.len(),
        "Read archive entries"
    );

    Ok(entries)
}
