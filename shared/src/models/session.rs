//! Session Model

use serde::{Deserialize, Serialize};

/// Bearer session, one per issued token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: u64,
    /// Unix millis
    pub expires: i64,
}

impl Session {
    /// A session is usable strictly before its expiry instant
    pub fn is_expired(&self, now_millis: i64) -> bool {
        now_millis >= self.expires
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_boundary() {
        let s = Session {
            token: "t".into(),
            user_id: 1,
            expires: 1_000,
        };
        assert!(!s.is_expired(999));
        assert!(s.is_expired(1_000));
        assert!(s.is_expired(1_001));
    }
}
