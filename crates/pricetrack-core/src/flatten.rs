//! Result Flattener: one flat record per run.

use chrono::{DateTime, SecondsFormat, Utc};
use pricetrack_extract::Site;
use pricetrack_store::FlatRecord;

use crate::record::UrlResult;

pub const TIMESTAMP_KEY: &str = "run_timestamp";

/// RFC 3339 UTC with microseconds, e.g. `2025-06-01T09:30:00.123456Z`.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Merge per-site results into `<site>_<index>_<field>` keys, after
/// `run_timestamp`.
pub fn flatten(sites: &[(Site, &[UrlResult])], timestamp: DateTime<Utc>) -> FlatRecord {
    let mut record = FlatRecord::new();
    record.insert(TIMESTAMP_KEY, format_timestamp(timestamp));

    for (site, results) in sites {
        for (idx, result) in results.iter().enumerate() {
            for (field, value) in result.fields(*site) {
                record.insert(format!("{}_{}_{}", site.name(), idx + 1, field), value);
            }
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pricetrack_extract::Extraction;
    use serde_json::Value;
    use std::path::PathBuf;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_timestamp_first_and_sortable() {
        let record = flatten(&[], ts());
        assert_eq!(record.keys().collect::<Vec<_>>(), vec![TIMESTAMP_KEY]);
        assert_eq!(
            record.get(TIMESTAMP_KEY),
            Some(&Value::String("2025-06-01T09:30:00.000000Z".into()))
        );
    }

    #[test]
    fn test_keys_are_namespaced_by_site_and_index() {
        let amazon = vec![
            UrlResult::ok(
                "https://a/1",
                PathBuf::from("outputs/amazon_1.html"),
                Extraction {
                    price: Some("$42.99".into()),
                    identifier: Some("SM-1".into()),
                },
            ),
            UrlResult::error("https://a/2", "boom"),
        ];
        let samsung = vec![UrlResult::partial(
            "https://s/1",
            PathBuf::from("outputs/samsung_1.html"),
            "no device_info",
        )];

        let record = flatten(
            &[(Site::Amazon, amazon.as_slice()), (Site::Samsung, samsung.as_slice())],
            ts(),
        );

        let keys: Vec<_> = record.keys().collect();
        assert_eq!(keys.len(), 1 + 5 * 3);
        assert_eq!(keys[1], "amazon_1_url");
        assert_eq!(keys[4], "amazon_1_model");
        assert_eq!(keys[10], "amazon_2_status");
        assert_eq!(keys[14], "samsung_1_sku");
        assert_eq!(record.get("amazon_1_price"), Some(&Value::String("$42.99".into())));
        assert_eq!(record.get("amazon_2_file"), Some(&Value::Null));
        assert_eq!(
            record.get("samsung_1_status"),
            Some(&Value::String("partial: no device_info".into()))
        );
    }
}
