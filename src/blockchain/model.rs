use std::sync::atomic::{AtomicBool, Ordering};

use super::{Block, ProofOfWork};
use crate::error::{LedgerError, Result};
use crate::transaction::Transaction;

/// Append-only in-memory blockchain secured by Proof-of-Work.
#[derive(Debug)]
pub struct Blockchain {
    chain: Vec<Block>,
}

impl Blockchain {
    /// Initialize a new blockchain holding only the mined genesis block.
    pub fn new() -> Result<Self> {
        Ok(Self {
            chain: vec![Block::genesis()?],
        })
    }

    /// Read-only view of every block, genesis first.
    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    /// Return the tip of the chain.
    pub fn last_block(&self) -> &Block {
        // `new` is the only constructor and always pushes genesis
        &self.chain[self.chain.len() - 1]
    }

    /// Mine a block for `tx` on top of the current tip and append it.
    /// The chain is left untouched if mining fails.
    pub fn add_block(&mut self, tx: &Transaction) -> Result<&Block> {
        let prev_hash = self.last_block().hash.clone();
        let block = Block::create(tx, prev_hash)?;
        Ok(self.push(block))
    }

    /// Cancelable variant of [`add_block`](Self::add_block). A flag raised
    /// after the search succeeded still discards the block.
    pub fn add_block_until(&mut self, tx: &Transaction, cancel: &AtomicBool) -> Result<&Block> {
        let prev_hash = self.last_block().hash.clone();
        let block = Block::create_until(tx, prev_hash, cancel)?;
        if cancel.load(Ordering::Relaxed) {
            return Err(LedgerError::Cancelled {
                attempts: block.nonce + 1,
            });
        }
        Ok(self.push(block))
    }

    fn push(&mut self, block: Block) -> &Block {
        self.chain.push(block);
        self.last_block()
    }

    /// Validate linkage and Proof-of-Work of every block after genesis.
    /// Genesis itself is only checked when it is mined.
    pub fn is_valid(&self) -> bool {
        self.chain.windows(2).all(|pair| {
            let (previous, current) = (&pair[0], &pair[1]);
            current.prev_hash == previous.hash && ProofOfWork::new(current).validate()
        })
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }
}
