//! the Reed-Solomon codec at the heart of the durability engine
//!
//! A [`Codec`] is built once per `(k, m)` configuration. It carries the
//! systematic generator matrix: `k` identity rows on top, so the first `k`
//! output shards are the input split verbatim, followed by `m` Vandermonde
//! parity rows. Any `k` of the `k + m` shards suffice to reconstruct the
//! input, which is the MDS property of the Vandermonde construction.
//!
//! The codec is purely computational and stateless after construction: the
//! generator matrix is read-only, every call owns its buffers, and a single
//! codec may serve any number of threads concurrently.
use tracing::debug;

use crate::error::TessellaError;
use crate::field;
use crate::linalg::Matrix;

/// Shard indices must map to distinct nonzero field elements, which caps the
/// total shard count at the number of nonzero elements of GF(2^8).
pub const MAX_TOTAL_SHARDS: usize = 255;

/// A Reed-Solomon encoder/decoder for a fixed `(k, m)` configuration.
#[derive(Clone, Debug)]
pub struct Codec {
    data_shards: usize,
    parity_shards: usize,
    generator: Matrix,
}

impl Codec {
    /// Build the codec for `k` data shards and `m` parity shards.
    ///
    /// # Errors
    /// [`TessellaError::InvalidConfiguration`] when `k` is zero or
    /// `k + m` exceeds [`MAX_TOTAL_SHARDS`].
    pub fn new(data_shards: usize, parity_shards: usize) -> Result<Self, TessellaError> {
        if data_shards == 0 {
            return Err(TessellaError::InvalidConfiguration(
                "at least one data shard is required".to_string(),
            ));
        }
        if data_shards + parity_shards > MAX_TOTAL_SHARDS {
            return Err(TessellaError::InvalidConfiguration(format!(
                "{} + {} shards exceed the GF(2^8) limit of {}",
                data_shards, parity_shards, MAX_TOTAL_SHARDS
            )));
        }

        Ok(Self {
            data_shards,
            parity_shards,
            generator: generator_matrix(data_shards, parity_shards),
        })
    }

    pub fn data_shards(&self) -> usize {
        self.data_shards
    }

    pub fn parity_shards(&self) -> usize {
        self.parity_shards
    }

    pub fn total_shards(&self) -> usize {
        self.data_shards + self.parity_shards
    }

    /// The size of every shard produced for `len` bytes of input.
    pub fn shard_size(&self, len: usize) -> usize {
        len.div_ceil(self.data_shards)
    }

    /// Encode `data` into `k + m` equally-sized shards.
    ///
    /// The input is zero-padded to a multiple of `k` shards of
    /// `ceil(len / k)` bytes. The first `k` shards are the padded input
    /// split contiguously, the remaining `m` are parity: for parity row `i`
    /// and byte offset `b`,
    /// `parity[i][b] = sum_j generator[k + i][j] * data[j][b]` in the field.
    /// Byte offsets are fully independent of each other.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<Vec<u8>>, TessellaError> {
        let gf = field::tables();
        let shard_size = self.shard_size(data.len());

        let mut padded = data.to_vec();
        padded.resize(shard_size * self.data_shards, 0);

        let mut shards: Vec<Vec<u8>> = padded
            .chunks(shard_size.max(1))
            .map(<[u8]>::to_vec)
            .collect();
        shards.resize(self.data_shards, vec![]);

        for i in 0..self.parity_shards {
            let row = self.generator.row(self.data_shards + i);
            let mut parity = vec![0u8; shard_size];
            for (j, shard) in shards[..self.data_shards].iter().enumerate() {
                let coefficient = row[j];
                if coefficient == 0 {
                    continue;
                }
                for (b, &byte) in shard.iter().enumerate() {
                    parity[b] = gf.add(parity[b], gf.mul(coefficient, byte));
                }
            }
            shards.push(parity);
        }

        debug!(
            k = self.data_shards,
            m = self.parity_shards,
            original_size = data.len(),
            shard_size,
            "encoded data into shards"
        );

        Ok(shards)
    }

    /// Reconstruct the `k` data shards from any `k` of the `k + m` shards.
    ///
    /// `shards` holds `(index, bytes)` pairs in any order, with indices in
    /// `0..k + m`. The output is the concatenation of the `k` data shards,
    /// still zero-padded: the caller truncates to the original length.
    ///
    /// # Errors
    /// - [`TessellaError::InsufficientShards`] for fewer than `k` pairs
    /// - [`TessellaError::InvalidShardIndex`] for an out-of-range index
    /// - [`TessellaError::IncompatibleShards`] for inconsistent sizes
    /// - [`TessellaError::SingularMatrix`] when the selected rows are not
    ///   independent, e.g. because an index was supplied twice
    pub fn decode(&self, shards: &[(u32, Vec<u8>)]) -> Result<Vec<u8>, TessellaError> {
        if shards.len() < self.data_shards {
            return Err(TessellaError::InsufficientShards {
                needed: self.data_shards,
                got: shards.len(),
            });
        }

        let shard_size = shards[0].1.len();
        for &(index, ref data) in shards {
            if index as usize >= self.total_shards() {
                return Err(TessellaError::InvalidShardIndex {
                    index,
                    total: self.total_shards() as u32,
                });
            }
            if data.len() != shard_size {
                return Err(TessellaError::IncompatibleShards {
                    index,
                    left: shard_size,
                    right: data.len(),
                });
            }
        }

        debug!(
            k = self.data_shards,
            m = self.parity_shards,
            supplied = shards.len(),
            shard_size,
            "decoding data from shards"
        );

        // systematic fast path: with every data shard at hand the generator
        // rows are the identity and no inversion is needed
        let mut data_present = vec![None; self.data_shards];
        for &(index, ref data) in shards {
            if (index as usize) < self.data_shards {
                data_present[index as usize] = Some(data);
            }
        }
        if data_present.iter().all(Option::is_some) {
            let mut result = Vec::with_capacity(self.data_shards * shard_size);
            for shard in data_present.into_iter().flatten() {
                result.extend_from_slice(shard);
            }
            return Ok(result);
        }

        // any k of the supplied shards pin down the input: select their
        // generator rows, invert, and multiply back
        let used = &shards[..self.data_shards];
        let rows: Vec<usize> = used.iter().map(|&(index, _)| index as usize).collect();
        let inverse = self.generator.select_rows(&rows).invert()?;

        let gf = field::tables();
        let mut result = vec![0u8; self.data_shards * shard_size];
        for j in 0..self.data_shards {
            let reconstructed = &mut result[j * shard_size..(j + 1) * shard_size];
            for (i, &(_, ref shard)) in used.iter().enumerate() {
                let coefficient = inverse.get(j, i);
                if coefficient == 0 {
                    continue;
                }
                for (b, &byte) in shard.iter().enumerate() {
                    reconstructed[b] = gf.add(reconstructed[b], gf.mul(coefficient, byte));
                }
            }
        }

        Ok(result)
    }
}

/// The systematic generator matrix for `(k, m)`.
///
/// Rows `0..k` are the identity. Parity row `i` holds `(j + 1)^i` at column
/// `j`: powers of the distinct nonzero elements `1..=k`, i.e. a Vandermonde
/// construction, which keeps every `k x k` submatrix invertible.
fn generator_matrix(data_shards: usize, parity_shards: usize) -> Matrix {
    let gf = field::tables();
    let mut matrix = Matrix::zeroes(data_shards + parity_shards, data_shards);

    for j in 0..data_shards {
        matrix.set(j, j, 1);
    }
    for i in 0..parity_shards {
        for j in 0..data_shards {
            matrix.set(data_shards + i, j, gf.pow(j as u8 + 1, i));
        }
    }

    matrix
}
