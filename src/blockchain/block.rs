use std::sync::atomic::AtomicBool;

use super::{GENESIS_RECIPIENT, ProofOfWork, SYSTEM_ACCOUNT};
use crate::error::Result;
use crate::transaction::Transaction;

/// A mined block. Its content never changes once `create` returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub(crate) hash: Vec<u8>,
    pub(crate) data: Vec<u8>, // JSON-encoded transaction
    pub(crate) prev_hash: Vec<u8>,
    pub(crate) nonce: u64,
}

impl Block {
    /// Mine the genesis block: sentinel transaction, empty previous hash.
    pub fn genesis() -> Result<Self> {
        let tx = Transaction::new(SYSTEM_ACCOUNT, GENESIS_RECIPIENT, 0);
        Self::create(&tx, Vec::new())
    }

    /// Serialize `tx`, link it to `prev_hash` and run Proof-of-Work on it.
    pub fn create(tx: &Transaction, prev_hash: Vec<u8>) -> Result<Self> {
        let mut block = Self::unmined(tx, prev_hash)?;
        let (nonce, hash) = ProofOfWork::new(&block).run()?;
        block.seal(nonce, hash);
        Ok(block)
    }

    /// Cancelable variant of [`create`](Self::create).
    pub fn create_until(
        tx: &Transaction,
        prev_hash: Vec<u8>,
        cancel: &AtomicBool,
    ) -> Result<Self> {
        let mut block = Self::unmined(tx, prev_hash)?;
        let (nonce, hash) = ProofOfWork::new(&block).run_until(cancel)?;
        block.seal(nonce, hash);
        Ok(block)
    }

    fn unmined(tx: &Transaction, prev_hash: Vec<u8>) -> Result<Self> {
        Ok(Self {
            hash: Vec::new(),
            data: tx.to_bytes()?,
            prev_hash,
            nonce: 0,
        })
    }

    fn seal(&mut self, nonce: u64, hash: [u8; 32]) {
        self.nonce = nonce;
        self.hash = hash.to_vec();
    }

    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn prev_hash(&self) -> &[u8] {
        &self.prev_hash
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Decode the payload back into a transaction, if it still parses.
    pub fn transaction(&self) -> Option<Transaction> {
        Transaction::from_bytes(&self.data).ok()
    }
}
