use serde_json::Value;

use super::registry::{is_table_key, row_delimiter_for, COLUMN_DELIMITER};

/// Splits a table string as displayed by the modem UI: rows on
/// `row_delimiter`, columns on `^`.
pub fn parse_table(table: &str, row_delimiter: &str) -> Vec<Vec<String>> {
    table
        .split(row_delimiter)
        .map(|row| row.split(COLUMN_DELIMITER).map(str::to_string).collect())
        .collect()
}

/// Replaces, at any depth, every table-encoded string field with an array
/// of rows.
pub fn decode_tables(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                let rows = match field {
                    Value::String(s) if is_table_key(key) => {
                        Some(parse_table(s, row_delimiter_for(key)))
                    }
                    _ => None,
                };

                match rows {
                    Some(rows) => *field = Value::from(rows),
                    None => decode_tables(field),
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(decode_tables),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{decode_tables, parse_table};

    #[test]
    fn parse_table_test() {
        let items = parse_table("A^B^C^D|+|1^2^3^4|+|5^6^7^8", "|+|");

        assert_eq!(3, items.len());
        assert_eq!(vec!["A", "B", "C", "D"], items[0]);
        assert_eq!("8", items[2][3]);
    }

    #[test]
    fn parse_table_different_delimiter_test() {
        let items = parse_table("A^B^C^D,1^2^3^4,5^6^7^8", ",");

        assert_eq!(3, items.len());
        assert_eq!("A", items[0][0]);
        assert_eq!("8", items[2][3]);
    }

    #[test]
    fn decode_tables_in_nested_response() {
        let mut res = json!({
            "GetMultipleHNAPsResponse": {
                "GetMotoStatusUpstreamChannelInfoResponse": {
                    "MotoConnUpstreamChannel":
                        "1^Locked^SC-QAM^1^5120^17.6^40.3^|+|1^Locked^SC-QAM^1^5120^17.6^40.3^",
                    "GetMotoStatusUpstreamChannelInfoResult": "OK"
                },
                "GetMotoStatusLogResponse": {
                    "MotoStatusLogList": "a^b}-{c^d",
                    "GetMotoStatusLogResult": "OK"
                },
                "GetMultipleHNAPsResult": "OK"
            }
        });

        decode_tables(&mut res);

        let inner = &res["GetMultipleHNAPsResponse"];
        assert_eq!(
            json!([
                ["1", "Locked", "SC-QAM", "1", "5120", "17.6", "40.3", ""],
                ["1", "Locked", "SC-QAM", "1", "5120", "17.6", "40.3", ""]
            ]),
            inner["GetMotoStatusUpstreamChannelInfoResponse"]["MotoConnUpstreamChannel"]
        );
        assert_eq!(
            json!([["a", "b"], ["c", "d"]]),
            inner["GetMotoStatusLogResponse"]["MotoStatusLogList"]
        );
        assert_eq!("OK", inner["GetMultipleHNAPsResult"]);
    }
}
