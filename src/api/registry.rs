use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;

use super::Action;

/// Action wrapping several actions in one round trip.
pub const BATCH_ACTION: Action = Action::GetMultipleHNAPs;

/// Row delimiter of table-encoded fields unless overridden in [`ROW_DELIMITERS`].
pub const DEFAULT_ROW_DELIMITER: &str = "|+|";

pub const COLUMN_DELIMITER: char = '^';

/// Response fields holding a table-encoded string.
pub const TABLE_KEYS: [&str; 3] = [
    "MotoConnDownstreamChannel",
    "MotoConnUpstreamChannel",
    "MotoStatusLogList",
];

lazy_static! {
    /// Actions the firmware only answers inside a `GetMultipleHNAPs` envelope.
    static ref MUST_BE_CALLED_FROM_MULTIPLE: HashSet<Action> = HashSet::from([
        Action::GetHomeAddress,
        Action::GetHomeConnection,
        Action::GetMotoLagStatus,
        Action::GetMotoStatusConnectionInfo,
        Action::GetMotoStatusDownstreamChannelInfo,
        Action::GetMotoStatusLog,
        Action::GetMotoStatusLogXXX,
        Action::GetMotoStatusSecAccount,
        Action::GetMotoStatusSecXXX,
        Action::GetMotoStatusSoftware,
        Action::GetMotoStatusStartupSequence,
        Action::GetMotoStatusUpstreamChannelInfo,
    ]);

    static ref ROW_DELIMITERS: HashMap<&'static str, &'static str> =
        HashMap::from([("MotoStatusLogList", "}-{")]);
}

pub fn must_be_batched(action: &Action) -> bool {
    MUST_BE_CALLED_FROM_MULTIPLE.contains(action)
}

/// Every action [`must_be_batched`] accepts.
pub fn batched_actions() -> impl Iterator<Item = &'static Action> {
    MUST_BE_CALLED_FROM_MULTIPLE.iter()
}

pub fn row_delimiter_for(key: &str) -> &'static str {
    ROW_DELIMITERS
        .get(key)
        .copied()
        .unwrap_or(DEFAULT_ROW_DELIMITER)
}

pub fn is_table_key(key: &str) -> bool {
    TABLE_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::{must_be_batched, row_delimiter_for, Action};

    #[test]
    fn status_getters_must_be_batched() {
        assert!(must_be_batched(&Action::GetHomeAddress));
        assert!(must_be_batched(&Action::GetMotoStatusSoftware));
        assert!(must_be_batched(&Action::GetMotoStatusUpstreamChannelInfo));
    }

    #[test]
    fn other_actions_are_called_directly() {
        assert!(!must_be_batched(&Action::Login));
        assert!(!must_be_batched(&Action::GetMultipleHNAPs));
        assert!(!must_be_batched(&Action::SetStatusLogSettings));
        assert!(!must_be_batched(&Action::GetMotoStatusXXX));
        assert!(!must_be_batched(&Action::Other("GetHomeAddres".to_string())));
    }

    #[test]
    fn log_list_uses_its_own_row_delimiter() {
        assert_eq!("}-{", row_delimiter_for("MotoStatusLogList"));
        assert_eq!("|+|", row_delimiter_for("MotoConnUpstreamChannel"));
        assert_eq!("|+|", row_delimiter_for("MotoConnDownstreamChannel"));
    }
}
