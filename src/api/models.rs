use crate::blockchain::{Block, Blockchain};
use crate::transaction::Transaction;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Shared application state: the single chain instance behind one lock.
pub struct AppState {
    pub blockchain: Mutex<Blockchain>,
    pub mining_timeout: Duration,
}

impl AppState {
    pub fn new(blockchain: Blockchain, mining_timeout: Duration) -> Self {
        Self {
            blockchain: Mutex::new(blockchain),
            mining_timeout,
        }
    }

    /// Lock the chain. Appends are a single `Vec::push`, so a poisoned
    /// lock still guards a consistent chain. A mining job holds this lock
    /// for the whole search; call it from `web::block` in handlers.
    pub fn chain(&self) -> MutexGuard<'_, Blockchain> {
        self.blockchain
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct BlockResponse {
    pub hash: String,
    pub data: Option<Transaction>,
    pub prevhash: String,
    pub nonce: u64,
}

impl From<&Block> for BlockResponse {
    fn from(block: &Block) -> Self {
        Self {
            hash: hex::encode(block.hash()),
            data: block.transaction(),
            prevhash: hex::encode(block.prev_hash()),
            nonce: block.nonce(),
        }
    }
}

#[derive(Serialize)]
pub struct MineResponse {
    pub mined_index: usize,
    pub hash: String,
    pub nonce: u64,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}
