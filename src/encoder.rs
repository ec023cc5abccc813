//! turn raw content into a verifiable, storage-ready artifact
//!
//! The [`Encoder`] wraps the codec and produces two things: the shard
//! buffers themselves and a [`ContentDescriptor`] carrying everything the
//! retrieval side needs to verify them later (SHA-256 digests, sizes, shard
//! layout). The encoder performs no I/O: persisting the descriptor and
//! placing the shards is the storage layer's job.
use rs_merkle::algorithms::Sha256;
use rs_merkle::Hasher;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::TessellaError;
use crate::fec::Codec;

/// Metadata of a single shard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShardMeta {
    /// Position in the coding scheme: `0..k` for data, `k..k + m` for parity.
    pub index: u32,
    /// SHA-256 digest of the shard bytes.
    pub hash: [u8; 32],
    /// Size of the shard in bytes.
    pub size: u64,
    pub is_parity: bool,
}

/// The authoritative reference against which shards and reconstructed
/// content are verified.
///
/// Produced once per [`Encoder::encode`] call and immutable afterwards. The
/// serialized field names are part of the contract with the storage layer,
/// hence the `camelCase` renaming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDescriptor {
    pub content_id: String,
    pub original_size: u64,
    /// SHA-256 digest of the original content.
    pub original_hash: [u8; 32],
    pub data_shards: u32,
    pub parity_shards: u32,
    pub shard_size: u64,
    pub shards: Vec<ShardMeta>,
}

/// A shard ready to be handed to the storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shard {
    pub meta: ShardMeta,
    pub data: Vec<u8>,
}

/// Reed-Solomon content encoder for a fixed `(k, m)` configuration.
#[derive(Clone, Debug)]
pub struct Encoder {
    codec: Codec,
}

impl Encoder {
    /// # Errors
    /// [`TessellaError::InvalidConfiguration`] for an unusable `(k, m)`,
    /// see [`Codec::new`].
    pub fn new(data_shards: usize, parity_shards: usize) -> Result<Self, TessellaError> {
        Ok(Self {
            codec: Codec::new(data_shards, parity_shards)?,
        })
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    /// Encode `content` into a descriptor and `k + m` shards.
    ///
    /// When no `content_id` is supplied one is derived from the content
    /// digest, so encoding identical content twice yields byte-identical
    /// descriptors and shards.
    pub fn encode(
        &self,
        content: &[u8],
        content_id: Option<&str>,
    ) -> Result<(ContentDescriptor, Vec<Shard>), TessellaError> {
        let original_hash = Sha256::hash(content);
        let content_id = match content_id {
            Some(id) => id.to_string(),
            None => derive_content_id(&original_hash),
        };

        let buffers = self.codec.encode(content)?;
        let shard_size = self.codec.shard_size(content.len());

        let shards: Vec<Shard> = buffers
            .into_iter()
            .enumerate()
            .map(|(index, data)| Shard {
                meta: ShardMeta {
                    index: index as u32,
                    hash: Sha256::hash(&data),
                    size: data.len() as u64,
                    is_parity: index >= self.codec.data_shards(),
                },
                data,
            })
            .collect();

        let descriptor = ContentDescriptor {
            content_id: content_id.clone(),
            original_size: content.len() as u64,
            original_hash,
            data_shards: self.codec.data_shards() as u32,
            parity_shards: self.codec.parity_shards() as u32,
            shard_size: shard_size as u64,
            shards: shards.iter().map(|s| s.meta.clone()).collect(),
        };

        info!(
            content_id = %content_id,
            original_size = content.len(),
            shard_size,
            shards = shards.len(),
            "encoded content"
        );

        Ok((descriptor, shards))
    }

    /// The raw bytes of the single shard at `index`, derived by re-encoding.
    ///
    /// # Errors
    /// [`TessellaError::InvalidShardIndex`] when `index` is outside
    /// `0..k + m`.
    pub fn shard_data(&self, content: &[u8], index: u32) -> Result<Vec<u8>, TessellaError> {
        let mut buffers = self.codec.encode(content)?;
        if index as usize >= buffers.len() {
            return Err(TessellaError::InvalidShardIndex {
                index,
                total: self.codec.total_shards() as u32,
            });
        }
        Ok(buffers.swap_remove(index as usize))
    }

    /// All `k + m` raw shard buffers, without descriptor bookkeeping.
    pub fn all_shards(&self, content: &[u8]) -> Result<Vec<Vec<u8>>, TessellaError> {
        self.codec.encode(content)
    }
}

/// A deterministic content id: the first 16 bytes of the digest, hex-encoded.
fn derive_content_id(digest: &[u8; 32]) -> String {
    digest[..16]
        .iter()
        .map(|x| format!("{:02x}", x))
        .collect::<Vec<_>>()
        .join("")
}
