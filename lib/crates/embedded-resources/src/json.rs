//! Typed JSON loading from a bundle.

use serde::de::DeserializeOwned;

use crate::bundle::ResourceBundle;
use crate::error::{ResourceError, Result};

/// Read `name` as UTF-8 text and deserialize it as JSON into `T`.
///
/// A leading UTF-8 byte order mark is skipped.
///
/// # Errors
///
/// - [`ResourceError::NotFound`] / [`ResourceError::Read`] if the resource cannot be read.
/// - [`ResourceError::Decode`] if the bytes are not UTF-8.
/// - [`ResourceError::Parse`] if the text is not JSON of shape `T`.
pub fn load_json<T, B>(bundle: &B, name: &str) -> Result<T>
where
    T: DeserializeOwned,
    B: ResourceBundle + ?Sized,
{
    let bytes = bundle.read(name)?;
    let text = String::from_utf8(bytes).map_err(|source| ResourceError::Decode {
        name: name.to_string(),
        source,
    })?;
    // A leading byte order mark is not part of the document.
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    serde_json::from_str(text).map_err(|source| ResourceError::Parse {
        name: name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde::Deserialize;

    use super::*;
    use crate::bundle::MemoryBundle;
    use crate::error::ErrorKind;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Demo {
        name: String,
        count: i32,
    }

    fn bundle() -> MemoryBundle {
        MemoryBundle::new()
            .with(
                "App.Assets.config.json",
                br#"{"name":"demo","count":3}"#.as_slice(),
            )
            .with("App.Assets.broken.json", b"{\"name\":".as_slice())
            .with("App.Assets.latin1.json", b"{\"name\":\"caf\xe9\"}".as_slice())
            .with("App.Assets.bom.json", b"\xef\xbb\xbf{\"a\":1}".as_slice())
    }

    #[test]
    fn test_load_json_into_struct() {
        let demo: Demo = load_json(&bundle(), "App.Assets.config.json").expect("load");
        assert_eq!(
            demo,
            Demo {
                name: "demo".to_string(),
                count: 3
            }
        );
    }

    #[test]
    fn test_load_json_into_untyped_map() {
        let map: HashMap<String, serde_json::Value> =
            load_json(&bundle(), "App.Assets.config.json").expect("load");
        assert_eq!(map["count"], 3);
    }

    #[test]
    fn test_load_json_truncated_is_parse_failure() {
        let err = load_json::<Demo, _>(&bundle(), "App.Assets.broken.json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseFailure);
    }

    #[test]
    fn test_load_json_shape_mismatch_is_parse_failure() {
        let err = load_json::<Vec<u8>, _>(&bundle(), "App.Assets.config.json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseFailure);
    }

    #[test]
    fn test_load_json_non_utf8_is_decode_failure() {
        let err = load_json::<Demo, _>(&bundle(), "App.Assets.latin1.json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeFailure);
    }

    #[test]
    fn test_load_json_missing_resource() {
        let err = load_json::<Demo, _>(&bundle(), "App.Assets.none.json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
    }

    #[test]
    fn test_load_json_skips_byte_order_mark() {
        let value: serde_json::Value =
            load_json(&bundle(), "App.Assets.bom.json").expect("BOM must be ignored");
        assert_eq!(value["a"], 1);
    }
}
