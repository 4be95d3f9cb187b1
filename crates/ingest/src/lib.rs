//! # blockdup Ingest
//!
//! Corpus enumeration and document reading, the I/O edge of the duplicate
//! detection pipeline.
//!
//! ## Responsibilities
//!
//! - **Enumerate** the documents of a corpus, either through `git ls-files`
//!   or a recursive directory walk that skips hidden directories.
//! - **Read** each document strictly: size limit, valid UTF-8 only, byte order
//!   mark removed.
//! - **Report** failures as typed [`IngestError`]s so the caller can skip a
//!   single unreadable document and keep going.
//!
//! Normalization of the text itself belongs to the `canonical` crate.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use ingest::{enumerate, read_document, CorpusConfig};
//!
//! let cfg = CorpusConfig::default();
//! for path in enumerate(Path::new("notes"), &cfg)? {
//!     match read_document(&path, &cfg) {
//!         Ok(text) => println!("{}: {} bytes", path.display(), text.len()),
//!         Err(err) => eprintln!("skipping {err}"),
//!     }
//! }
//! # Ok::<(), ingest::IngestError>(())
//! ```

pub mod config;
mod enumerate;
pub mod error;
mod read;

pub use crate::config::{CorpusConfig, CorpusSource, DEFAULT_MAX_FILE_BYTES};
pub use crate::enumerate::{enumerate, resolve_source};
pub use crate::error::IngestError;
pub use crate::read::read_document;
