use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

/// `null` をその型の既定値として読み込む
///
/// `#[serde(default)]` はキーが無い場合しか扱わないため、
/// `"items": null` のようなレスポンスにはこちらを併用する。
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 要素ごとに読み込み、読めない要素はログに残して除外する
///
/// 元の配列が空でないのに1件も読めなかった場合はエラーとする。
pub fn decode_each<T: DeserializeOwned>(values: Vec<Value>) -> Result<Vec<T>, String> {
    let total = values.len();
    let mut decoded = Vec::with_capacity(total);
    let mut last_error = None;

    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<T>(value) {
            Ok(item) => decoded.push(item),
            Err(e) => {
                log::warn!("{}件目の要素を読み込めないため除外します: {e}", index + 1);
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if decoded.is_empty() => Err(format!("{total}件の要素をすべて読み込めませんでした: {e}")),
        _ => Ok(decoded),
    }
}
