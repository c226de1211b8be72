pub mod block;
pub mod model;
pub mod proof;

pub use block::Block;
pub use model::Blockchain;
pub use proof::ProofOfWork;

/// Proof-of-Work difficulty: required leading zero bits of the block hash.
pub const TARGET_BITS: u64 = 12;

/// Upper bound on nonces tried by a single search before giving up.
pub const MAX_NONCE: u64 = 1 << 32;

/// How many nonces are tried between two polls of a cancellation flag.
pub const CANCEL_CHECK_INTERVAL: u64 = 1024;

/// Sender of the genesis transaction (and of the demo blocks).
pub const SYSTEM_ACCOUNT: &str = "Sistema";

/// Recipient of the genesis transaction.
pub const GENESIS_RECIPIENT: &str = "Gênesis";
