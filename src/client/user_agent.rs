//! Client identification headers.

use std::fmt::Debug;
use std::sync::OnceLock;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

/// `User-Agent` sent with every synthesized request.
pub const USER_AGENT: &str = concat!("MangoPay V2 RustBindings/", env!("CARGO_PKG_VERSION"));

pub(crate) const CLIENT_USER_AGENT_HEADER: &str = "x-mangopay-client-user-agent";
pub(crate) const RAW_USER_AGENT_HEADER: &str = "x-mangopay-client-raw-user-agent";
pub(crate) const USER_AGENT_ERROR_HEADER: &str = "x-mangopay-client-error";

/// Runtime description reported to MangoPay for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct ClientInfo {
    /// Version of this crate
    pub bindings_version: &'static str,
    /// Always `rust`
    pub lang: &'static str,
    /// `rustc --version` of the compiler that built this crate
    pub lang_version: String,
    /// `<arch>-<os>`
    pub platform: String,
    /// `uname -a` on Linux and macOS
    pub uname: Option<String>,
}

impl ClientInfo {
    /// The process-wide client description, computed once.
    pub fn current() -> &'static ClientInfo {
        static INFO: OnceLock<ClientInfo> = OnceLock::new();
        INFO.get_or_init(|| ClientInfo {
            bindings_version: env!("CARGO_PKG_VERSION"),
            lang: "rust",
            lang_version: env!("MANGOPAY_RUSTC_VERSION").to_string(),
            platform: format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS),
            uname: uname(),
        })
    }
}

fn uname() -> Option<String> {
    if !cfg!(any(target_os = "linux", target_os = "macos")) {
        return None;
    }
    match std::process::Command::new("uname").arg("-a").output() {
        Ok(out) if out.status.success() => {
            Some(String::from_utf8_lossy(&out.stdout).trim().to_string())
        }
        _ => Some("uname lookup failed".to_string()),
    }
}

/// Add the diagnostic header describing `info`.
///
/// Never fails: if `info` cannot be encoded as a JSON header value, its
/// `Debug` form is sent in the raw header together with the error text.
pub(crate) fn insert_client_headers<T>(headers: &mut HeaderMap, info: &T)
where
    T: Serialize + Debug,
{
    let encoded = serde_json::to_string(info)
        .map_err(|e| format!("{} (serde_json::Error)", e))
        .and_then(|json| {
            HeaderValue::from_str(&json).map_err(|e| format!("{} (InvalidHeaderValue)", e))
        });

    match encoded {
        Ok(value) => {
            headers.insert(HeaderName::from_static(CLIENT_USER_AGENT_HEADER), value);
        }
        Err(error) => {
            tracing::debug!(%error, "falling back to raw client user agent");
            let raw = header_safe(&format!("{:?}", info));
            headers.insert(
                HeaderName::from_static(RAW_USER_AGENT_HEADER),
                HeaderValue::from_str(&raw).unwrap_or_else(|_| HeaderValue::from_static("-")),
            );
            headers.insert(
                HeaderName::from_static(USER_AGENT_ERROR_HEADER),
                HeaderValue::from_str(&header_safe(&error))
                    .unwrap_or_else(|_| HeaderValue::from_static("-")),
            );
        }
    }
}

/// Replace anything a header value cannot carry.
fn header_safe(s: &str) -> String {
    s.chars()
        .map(|c| if c == ' ' || c.is_ascii_graphic() { c } else { '?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_user_agent_carries_version() {
        assert!(USER_AGENT.starts_with("MangoPay V2 RustBindings/"));
        assert!(USER_AGENT.ends_with(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_lang_version_is_compiler_version() {
        let info = ClientInfo::current();
        assert!(info.lang_version.starts_with("rustc "), "{}", info.lang_version);
        assert_ne!(info.lang_version, format!("rustc {}", env!("CARGO_PKG_RUST_VERSION")));
    }

    #[test]
    fn test_client_info_encodes_as_json_header() {
        let mut headers = HeaderMap::new();
        insert_client_headers(&mut headers, ClientInfo::current());

        let value = headers.get(CLIENT_USER_AGENT_HEADER).unwrap().to_str().unwrap();
        let json: serde_json::Value = serde_json::from_str(value).unwrap();
        assert_eq!(json["lang"], "rust");
        assert_eq!(json["bindings_version"], env!("CARGO_PKG_VERSION"));
        assert!(headers.get(RAW_USER_AGENT_HEADER).is_none());
    }

    #[test]
    fn test_unencodable_info_falls_back_to_raw_form() {
        // Non-string map keys cannot be encoded as JSON.
        let mut info = HashMap::new();
        info.insert((1, 2), "x");

        let mut headers = HeaderMap::new();
        insert_client_headers(&mut headers, &info);

        assert!(headers.get(CLIENT_USER_AGENT_HEADER).is_none());
        assert_eq!(headers.get(RAW_USER_AGENT_HEADER).unwrap(), "{(1, 2): \"x\"}");
        assert!(headers
            .get(USER_AGENT_ERROR_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("serde_json::Error"));
    }

    #[test]
    fn test_control_characters_fall_back() {
        let info = serde_json::json!({ "uname": "line\u{7f}break" });
        let mut headers = HeaderMap::new();
        insert_client_headers(&mut headers, &info);

        assert!(headers.get(CLIENT_USER_AGENT_HEADER).is_none());
        assert!(headers.get(RAW_USER_AGENT_HEADER).is_some());
    }
}
