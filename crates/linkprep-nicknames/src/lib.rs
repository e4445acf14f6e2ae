//! Nickname lookup construction.
//!
//! Turns the American English Nickname Collection (`NAME`, `ALIAS`, `CAP`
//! columns) into the two-column `raw_name,name_group` file read by the
//! `clean` command.

mod builder;
mod checks;
pub mod error;
mod hash;
mod source;
mod writer;

pub use builder::{LookupEntry, LookupOptions, LookupReport, LookupTable, build_lookup};
pub use error::{NicknameError, Result};
pub use hash::sha256_hex;
pub use source::{AliasRow, read_alias_rows};
pub use writer::{lookup_csv, write_lookup};
