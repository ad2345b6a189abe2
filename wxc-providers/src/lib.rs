//! Provider record types and parsers.
//!
//! Each forecast source publishes its own Korean-keyed shape. The record
//! modules deserialize those shapes and normalize them into
//! [`entry::NormalizedEntry`] with units stripped and timestamps typed.
//!
//! ```
//! use wxc_providers::provider::{RawRecords, RecordKind};
//!
//! let body = r#"[{"날짜 시간": "20241210 0300", "기온": "5°C"}]"#;
//! let entries = RawRecords::from_json(RecordKind::KmaShortTerm, body).unwrap().parse();
//! assert_eq!(entries[0].temperature_celsius, Some(5.0));
//! assert_eq!(entries[0].timestamp.hour.as_deref(), Some("0300"));
//! ```
pub mod accu_weather;
pub mod daily_summary;
pub mod date_range;
pub mod deep_learning;
pub mod entry;
pub mod kma;
pub mod open_weather;
pub mod provider;
pub mod sky;
pub mod timestamp;
pub mod units;
