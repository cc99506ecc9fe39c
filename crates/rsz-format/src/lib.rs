#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Binary plumbing for RSZ containers.
//!
//! - [`stream`]: seekable byte streams with a deferred UTF-16 string pool
//! - [`codec`]: fixed-layout record encoding
//! - [`header`] / [`records`]: the on-disk structs of every container kind
//! - [`extension`]: game and version dependent naming rules

pub mod codec;
mod error;
pub mod extension;
pub mod header;
pub mod records;
pub mod stream;

#[cfg(test)]
mod codec_tests;

pub use codec::{FixedLayout, Located};
pub use error::{FormatError, Result, count, offset};
pub use extension::{ContainerKind, Game, GameVersion};
pub use header::{Magic, PfbHeader, RszHeader, ScnHeader, UserHeader};
pub use stream::{ByteStream, Rebased, Stream, align_up};
