use std::sync::atomic::{AtomicBool, Ordering};

use num_bigint::BigUint;
use sha2::{Digest, Sha256};

use super::{Block, CANCEL_CHECK_INTERVAL, MAX_NONCE, TARGET_BITS};
use crate::error::{LedgerError, Result};

/// Nonce search over one block's content.
///
/// The digest of a candidate is `SHA-256(data || prev_hash || TARGET_BITS || nonce)`
/// with both integers encoded as 8 big-endian bytes. A candidate wins when the
/// digest, read as a big-endian unsigned integer, is strictly below
/// `1 << (256 - TARGET_BITS)`.
pub struct ProofOfWork<'a> {
    block: &'a Block,
    target: BigUint,
    max_nonce: u64,
}

impl<'a> ProofOfWork<'a> {
    pub fn new(block: &'a Block) -> Self {
        let target = BigUint::from(1u8) << (256 - TARGET_BITS);
        Self {
            block,
            target,
            max_nonce: MAX_NONCE,
        }
    }

    /// Override the search ceiling (number of nonces tried before giving up).
    #[cfg(test)]
    fn with_max_nonce(mut self, max_nonce: u64) -> Self {
        self.max_nonce = max_nonce;
        self
    }

    /// Search nonces from 0 upwards and return the first winning `(nonce, hash)`.
    pub fn run(&self) -> Result<(u64, [u8; 32])> {
        self.search(None)
    }

    /// Same as [`run`](Self::run), but stops with `Cancelled` once `cancel` is set.
    pub fn run_until(&self, cancel: &AtomicBool) -> Result<(u64, [u8; 32])> {
        self.search(Some(cancel))
    }

    /// Re-derive the digest for the block's stored nonce and check it both
    /// matches the stored hash and meets the target.
    pub fn validate(&self) -> bool {
        let digest = self.digest(self.block.nonce);
        digest.as_slice() == self.block.hash.as_slice() && self.meets_target(&digest)
    }

    fn search(&self, cancel: Option<&AtomicBool>) -> Result<(u64, [u8; 32])> {
        let mut nonce = 0u64;
        while nonce < self.max_nonce {
            if let Some(flag) = cancel {
                if nonce % CANCEL_CHECK_INTERVAL == 0 && flag.load(Ordering::Relaxed) {
                    return Err(LedgerError::Cancelled { attempts: nonce });
                }
            }

            let digest = self.digest(nonce);
            if self.meets_target(&digest) {
                return Ok((nonce, digest));
            }
            nonce += 1;
        }

        Err(LedgerError::ExhaustedSearch { attempts: nonce })
    }

    fn meets_target(&self, digest: &[u8; 32]) -> bool {
        BigUint::from_bytes_be(digest) < self.target
    }

    fn digest(&self, nonce: u64) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(&self.block.data);
        hasher.update(&self.block.prev_hash);
        hasher.update(TARGET_BITS.to_be_bytes());
        hasher.update(nonce.to_be_bytes());
        hasher.finalize().into()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use num_bigint::BigUint;
    use sha2::{Digest, Sha256};

    use super::ProofOfWork;
    use crate::blockchain::{Block, TARGET_BITS};
    use crate::error::LedgerError;

    fn unmined(data: &[u8], prev_hash: &[u8]) -> Block {
        Block {
            hash: Vec::new(),
            data: data.to_vec(),
            prev_hash: prev_hash.to_vec(),
            nonce: 0,
        }
    }

    #[test]
    fn run_finds_hash_below_target() {
        let mut block = unmined(br#"{"from":"x","to":"y","amount":1}"#, b"prev");
        let (nonce, hash) = ProofOfWork::new(&block).run().unwrap();

        let mut hasher = Sha256::new();
        hasher.update(&block.data);
        hasher.update(&block.prev_hash);
        hasher.update(TARGET_BITS.to_be_bytes());
        hasher.update(nonce.to_be_bytes());
        let expected: [u8; 32] = hasher.finalize().into();
        assert_eq!(hash, expected);

        let target = BigUint::from(1u8) << (256 - TARGET_BITS);
        assert!(BigUint::from_bytes_be(&hash) < target);
        // 12 bits => first byte and the high nibble of the second are zero
        assert_eq!(hash[0], 0);
        assert_eq!(hash[1] & 0xf0, 0);

        block.nonce = nonce;
        block.hash = hash.to_vec();
        assert!(ProofOfWork::new(&block).validate());
    }

    #[test]
    fn run_returns_first_winning_nonce() {
        let block = unmined(b"payload", b"");
        let (nonce, _) = ProofOfWork::new(&block).run().unwrap();
        let pow = ProofOfWork::new(&block);
        for earlier in 0..nonce {
            assert!(!pow.meets_target(&pow.digest(earlier)));
        }
    }

    #[test]
    fn validate_rejects_tampered_nonce() {
        let mut block = unmined(b"payload", b"prev");
        let (nonce, hash) = ProofOfWork::new(&block).run().unwrap();
        block.nonce = nonce + 1;
        block.hash = hash.to_vec();
        assert!(!ProofOfWork::new(&block).validate());
    }

    #[test]
    fn validate_rejects_unmined_block() {
        let block = unmined(b"payload", b"prev");
        assert!(!ProofOfWork::new(&block).validate());
    }

    #[test]
    fn ceiling_reports_exhausted_search() {
        let block = unmined(b"payload", b"prev");
        let err = ProofOfWork::new(&block)
            .with_max_nonce(0)
            .run()
            .unwrap_err();
        assert!(matches!(err, LedgerError::ExhaustedSearch { attempts: 0 }));
    }

    #[test]
    fn raised_flag_cancels_search() {
        let block = unmined(b"payload", b"prev");
        let cancel = AtomicBool::new(true);
        let err = ProofOfWork::new(&block).run_until(&cancel).unwrap_err();
        assert!(matches!(err, LedgerError::Cancelled { attempts: 0 }));
    }

    #[test]
    fn lowered_flag_lets_search_finish() {
        let block = unmined(b"payload", b"prev");
        let cancel = AtomicBool::new(false);
        let pow = ProofOfWork::new(&block);
        assert_eq!(pow.run_until(&cancel).unwrap(), pow.run().unwrap());
    }
}
