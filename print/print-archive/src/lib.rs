//! Read sliced print archives into normalized plate summaries.
//!
//! Slicers export print jobs as ZIP containers (3MF projects, `.gcode.3mf`)
//! holding vendor-specific metadata. This crate detects the slicer, extracts
//! per-plate filament usage, print time and settings, and falls back to a
//! geometry estimate when an archive only holds meshes.
//!
//! # Supported Slicers
//!
//! | Slicer | Signature | Source of usage |
//! |--------|-----------|-----------------|
//! | Bambu Studio | `Metadata/slice_info.config` | plate metadata |
//! | OrcaSlicer | as Bambu, `Application` = `OrcaSlicer-*` | plate metadata |
//! | PrusaSlicer | `Metadata/Slic3r_PE.config`, `prusaslicer_config` | G-code footer |
//! | Cura | `Cura/` entries, `;FLAVOR:` + `Generated with Cura` | G-code header |
//! | Unknown | - | common G-code keys |
//!
//! # Example
//!
//! ```no_run
//! use print_archive::{parse_print_archive_with, ArchiveOptions, MachineRates};
//!
//! let bytes = std::fs::read("benchy.gcode.3mf").unwrap();
//! let options = ArchiveOptions::default().with_machine(MachineRates::new(0.12, 0.28));
//! let summary = parse_print_archive_with(&bytes, &options).unwrap();
//!
//! for filament in summary.filaments() {
//!     println!("{}: {:.1} g", filament.profile_name, filament.weight_g);
//! }
//! if summary.is_estimated() {
//!     println!("approximated from geometry");
//! }
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for summaries and options
//! - `tokio`: `read_print_archive` reads files with `tokio::fs`

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod container;
mod error;
pub mod fields;
mod model;
mod options;
mod summary;
pub mod vendor;

pub use container::{ArchiveEntries, ArchiveKind, InstructionBlock, read_entries};
pub use error::{ArchiveError, ArchiveResult, ParseError, ParseResult};
pub use model::{application_name, parse_model, read_meshes};
pub use options::{ArchiveOptions, CuraFilamentDefaults, MachineRates};
pub use summary::{
    PrintArchiveSummary, load_print_archive, load_print_archive_with, parse_print_archive,
    parse_print_archive_with,
};
#[cfg(feature = "tokio")]
pub use summary::{read_print_archive, read_print_archive_with};
pub use vendor::{detect_vendor, normalize, normalize_with};
