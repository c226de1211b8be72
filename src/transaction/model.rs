use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A transfer carried verbatim as the payload of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub from: String,
    pub to: String,
    pub amount: i64,
}

impl Transaction {
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: i64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }

    /// Encode as the JSON bytes stored in `Block::data`.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode a block payload back into a transaction.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Submission rules enforced before a transaction reaches the chain.
    pub fn validate(&self) -> std::result::Result<(), &'static str> {
        if self.from.trim().is_empty() {
            return Err("sender must not be empty");
        }
        if self.to.trim().is_empty() {
            return Err("recipient must not be empty");
        }
        if self.amount <= 0 {
            return Err("amount must be > 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Transaction;

    #[test]
    fn encodes_with_original_field_names() {
        let tx = Transaction::new("Sistema", "A", 50);
        let json = String::from_utf8(tx.to_bytes().unwrap()).unwrap();
        assert_eq!(json, r#"{"from":"Sistema","to":"A","amount":50}"#);
        assert_eq!(Transaction::from_bytes(json.as_bytes()).unwrap(), tx);
    }

    #[test]
    fn rejects_non_positive_amount() {
        assert!(Transaction::new("a", "b", 0).validate().is_err());
        assert!(Transaction::new("a", "b", -5).validate().is_err());
        assert!(Transaction::new("a", "b", 1).validate().is_ok());
    }

    #[test]
    fn rejects_blank_parties() {
        assert_eq!(
            Transaction::new("  ", "b", 1).validate(),
            Err("sender must not be empty")
        );
        assert_eq!(
            Transaction::new("a", "", 1).validate(),
            Err("recipient must not be empty")
        );
    }

    #[test]
    fn garbage_payload_fails_to_decode() {
        assert!(Transaction::from_bytes(b"not json").is_err());
    }
}
