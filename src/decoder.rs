//! verify shards against a descriptor and reconstruct the original content
//!
//! The [`Decoder`] is the retrieval-side counterpart of the encoder. Every
//! supplied shard is checked against its descriptor digest *before* any
//! field arithmetic runs, and the reconstructed content has to pass the
//! end-to-end digest gate: a codec defect or a bit-flip that slipped past
//! the per-shard checks cannot go unnoticed.
use rs_merkle::algorithms::Sha256;
use rs_merkle::Hasher;
use tracing::{debug, info};

use crate::encoder::{ContentDescriptor, Shard};
use crate::error::TessellaError;
use crate::fec::Codec;

/// Reed-Solomon content decoder for a fixed `(k, m)` configuration.
#[derive(Clone, Debug)]
pub struct Decoder {
    codec: Codec,
}

impl Decoder {
    /// # Errors
    /// [`TessellaError::InvalidConfiguration`] for an unusable `(k, m)`,
    /// see [`Codec::new`].
    pub fn new(data_shards: usize, parity_shards: usize) -> Result<Self, TessellaError> {
        Ok(Self {
            codec: Codec::new(data_shards, parity_shards)?,
        })
    }

    /// Reconstruct the original content from any `k` verified shards.
    ///
    /// # Errors
    /// - [`TessellaError::InvalidConfiguration`] when the descriptor was
    ///   produced under a different `(k, m)`
    /// - [`TessellaError::InsufficientShards`] for fewer than `k` shards
    /// - [`TessellaError::InvalidShardIndex`] for a shard index the
    ///   descriptor does not know about
    /// - [`TessellaError::ShardIntegrity`] when a shard digest does not
    ///   match its descriptor entry
    /// - [`TessellaError::ContentIntegrity`] when the reconstructed bytes
    ///   fail the final digest gate
    pub fn decode(
        &self,
        shards: &[Shard],
        descriptor: &ContentDescriptor,
    ) -> Result<Vec<u8>, TessellaError> {
        if descriptor.data_shards as usize != self.codec.data_shards()
            || descriptor.parity_shards as usize != self.codec.parity_shards()
        {
            return Err(TessellaError::InvalidConfiguration(format!(
                "descriptor was encoded with ({} + {}) shards, decoder expects ({} + {})",
                descriptor.data_shards,
                descriptor.parity_shards,
                self.codec.data_shards(),
                self.codec.parity_shards(),
            )));
        }

        if shards.len() < descriptor.data_shards as usize {
            return Err(TessellaError::InsufficientShards {
                needed: descriptor.data_shards as usize,
                got: shards.len(),
            });
        }

        // integrity first: no arithmetic runs on corrupted or tampered bytes
        for shard in shards {
            let meta = descriptor
                .shards
                .iter()
                .find(|m| m.index == shard.meta.index)
                .ok_or(TessellaError::InvalidShardIndex {
                    index: shard.meta.index,
                    total: self.codec.total_shards() as u32,
                })?;
            if Sha256::hash(&shard.data) != meta.hash {
                return Err(TessellaError::ShardIntegrity {
                    index: shard.meta.index,
                });
            }
        }
        debug!(
            content_id = %descriptor.content_id,
            shards = shards.len(),
            "all supplied shards passed the digest check"
        );

        let pairs: Vec<(u32, Vec<u8>)> = shards
            .iter()
            .map(|s| (s.meta.index, s.data.clone()))
            .collect();
        let mut content = self.codec.decode(&pairs)?;
        content.truncate(descriptor.original_size as usize);

        if Sha256::hash(&content) != descriptor.original_hash {
            return Err(TessellaError::ContentIntegrity);
        }

        info!(
            content_id = %descriptor.content_id,
            original_size = descriptor.original_size,
            "reconstructed and verified content"
        );

        Ok(content)
    }

    /// Whether the distinct valid indices in `available` suffice to decode.
    pub fn can_reconstruct(&self, available: &[u32]) -> bool {
        let mut seen = vec![false; self.codec.total_shards()];
        for &index in available {
            if let Some(slot) = seen.get_mut(index as usize) {
                *slot = true;
            }
        }
        seen.iter().filter(|&&s| s).count() >= self.codec.data_shards()
    }

    /// How many more shards are needed on top of `available` to decode.
    pub fn shards_needed(&self, available: usize) -> u32 {
        self.codec.data_shards().saturating_sub(available) as u32
    }
}
