//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use std::collections::BTreeMap;

use serde_json::{
    Map,
    Value,
};

/// テスト用のレコードを作成する
///
/// # Arguments
/// * `entries` - キーと値のペア（例: `("storeName_en", "Shop")`）
pub(crate) fn record(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())).collect()
}

/// テスト用の JSON レコードを作成する
///
/// REST レスポンスと同じ形（`serde_json::Map`）のレコードを返す
pub(crate) fn json_record(entries: &[(&str, &str)]) -> Map<String, Value> {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_string(), Value::String((*value).to_string())))
        .collect()
}
