//! Fixed-schema market record and the tab-separated row decoder.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Textual timestamp format used by the upstream `time` column.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Number of columns in the upstream schema.
const FIELD_COUNT: usize = 12;

/// One observation from the analytical table, ordered by `time` ascending
/// within a series. Immutable once decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    pub symbol: String,
    #[serde(with = "upstream_time")]
    pub time: NaiveDateTime,
    pub price: f32,
    pub vol: u32,
    pub open_interest: u32,
    pub diff_vol: i32,
    pub diff_oi: i32,
    pub bid_1: f32,
    pub bid_volumn_1: u32,
    pub ask_1: f32,
    pub ask_volumn_1: u32,
    pub datetime: u64,
}

/// Serialize `time` in the upstream textual format rather than ISO 8601,
/// matching what the polling clients already parse.
mod upstream_time {
    use super::TIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.format(TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Decode a `FORMAT TabSeparated` payload into records.
///
/// Rows with fewer than 12 fields are skipped silently. Rows whose
/// required fields (time, price, vol, open_interest) fail to parse are
/// skipped with a logged warning. The remaining fields parse best-effort
/// and default to zero. The result may be empty; the caller decides
/// whether that means "no data".
pub fn decode_tsv(payload: &str) -> Vec<MarketRecord> {
    let mut records = Vec::new();

    for line in payload.trim().lines() {
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < FIELD_COUNT {
            continue;
        }

        let time = match NaiveDateTime::parse_from_str(fields[1], TIME_FORMAT) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Failed to parse time {:?}: {}", fields[1], e);
                continue;
            }
        };

        let price = match fields[2].parse::<f32>() {
            Ok(p) => p,
            Err(e) => {
                log::warn!("Failed to parse price {:?}: {}", fields[2], e);
                continue;
            }
        };

        let vol = match fields[3].parse::<u32>() {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Failed to parse vol {:?}: {}", fields[3], e);
                continue;
            }
        };

        let open_interest = match fields[4].parse::<u32>() {
            Ok(oi) => oi,
            Err(e) => {
                log::warn!("Failed to parse open_interest {:?}: {}", fields[4], e);
                continue;
            }
        };

        records.push(MarketRecord {
            symbol: fields[0].to_string(),
            time,
            price,
            vol,
            open_interest,
            diff_vol: fields[5].parse().unwrap_or(0),
            diff_oi: fields[6].parse().unwrap_or(0),
            bid_1: fields[7].parse().unwrap_or(0.0),
            bid_volumn_1: fields[8].parse().unwrap_or(0),
            ask_1: fields[9].parse().unwrap_or(0.0),
            ask_volumn_1: fields[10].parse().unwrap_or(0),
            datetime: fields[11].parse().unwrap_or(0),
        });
    }

    records
}
