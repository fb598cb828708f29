//! Counter key layout shared by the intake fallback and the worker.
//!
//! The counter store applies its own prefix on top of these keys.

use kernel::id::{ContestantId, PollingId};

/// `polling:{id}:total`
pub fn polling_total_key(polling_id: &PollingId) -> String {
    format!("polling:{}:total", polling_id)
}

/// `polling:{id}:contestant:{cid}`
pub fn contestant_key(polling_id: &PollingId, contestant_id: &ContestantId) -> String {
    format!("polling:{}:contestant:{}", polling_id, contestant_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let polling_id = PollingId::from_string("01HP");
        let contestant_id = ContestantId::from_string("01HC");

        assert_eq!(polling_total_key(&polling_id), "polling:01HP:total");
        assert_eq!(
            contestant_key(&polling_id, &contestant_id),
            "polling:01HP:contestant:01HC"
        );
    }
}
