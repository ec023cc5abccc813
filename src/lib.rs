//! Tessella: a Reed-Solomon erasure-coding durability engine
//!
//! Content is split into `k` data shards plus `m` parity shards over
//! GF(2^8), such that any `k` of the `k + m` shards reconstruct the
//! original bytes. The crate provides:
//! - [`Codec`] — the raw block codec: systematic Vandermonde generator
//!   matrix, block encode, any-k-of-n reconstruction
//! - [`Encoder`] — wraps the codec and produces a [`ContentDescriptor`]
//!   (SHA-256 digests, sizes, shard layout) next to the shard bytes
//! - [`Decoder`] — verifies shards against a descriptor, reconstructs and
//!   runs the end-to-end digest gate
//!
//! Everything is deterministic, synchronous and CPU-bound: no I/O, no
//! retries, no placement policy. Distributing shards and persisting the
//! descriptor belong to the storage layer sitting on top.
//!
//! # Example
//! - encode some content with 4 data shards and 2 parity shards
//! ```
//! use tessella::{Decoder, Encoder};
//!
//! # fn main() -> Result<(), tessella::TessellaError> {
//! let content = b"a grey mist on the sea's face".to_vec();
//!
//! let encoder = Encoder::new(4, 2)?;
//! let (descriptor, shards) = encoder.encode(&content, None)?;
//! assert_eq!(shards.len(), 6);
//! # Ok(())
//! # }
//! ```
//! - lose any 2 shards, here a data shard and a parity shard
//! ```
//! # use tessella::{Decoder, Encoder};
//! #
//! # fn main() -> Result<(), tessella::TessellaError> {
//! # let content = b"a grey mist on the sea's face".to_vec();
//! #
//! # let encoder = Encoder::new(4, 2)?;
//! # let (descriptor, mut shards) = encoder.encode(&content, None)?;
//! #
//! shards.remove(4);
//! shards.remove(1);
//! # Ok(())
//! # }
//! ```
//! - and reconstruct the content from the 4 shards left
//! ```
//! # use tessella::{Decoder, Encoder};
//! #
//! # fn main() -> Result<(), tessella::TessellaError> {
//! # let content = b"a grey mist on the sea's face".to_vec();
//! #
//! # let encoder = Encoder::new(4, 2)?;
//! # let (descriptor, mut shards) = encoder.encode(&content, None)?;
//! #
//! # shards.remove(4);
//! # shards.remove(1);
//! #
//! let decoder = Decoder::new(4, 2)?;
//! assert_eq!(decoder.decode(&shards, &descriptor)?, content);
//! # Ok(())
//! # }
//! ```
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod fec;
pub mod field;
pub mod linalg;

pub use crate::decoder::Decoder;
pub use crate::encoder::{ContentDescriptor, Encoder, Shard, ShardMeta};
pub use crate::error::TessellaError;
pub use crate::fec::Codec;
