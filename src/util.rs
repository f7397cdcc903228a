use base64::engine::general_purpose;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;

use crate::error::PolicyError;

pub type HmacSha1 = Hmac<Sha1>;
pub type HmacSha256 = Hmac<Sha256>;

pub fn base64_encode<T: AsRef<[u8]>>(data: T) -> String {
    general_purpose::STANDARD.encode(data)
}

pub fn base64_decode<T: AsRef<[u8]>>(data: T) -> Result<Vec<u8>, PolicyError> {
    Ok(general_purpose::STANDARD.decode(data)?)
}

pub fn hmac_sha1(key: &[u8], data: &[u8]) -> Result<Vec<u8>, PolicyError> {
    let mut hasher = HmacSha1::new_from_slice(key)?;
    hasher.update(data);
    Ok(hasher.finalize().into_bytes().to_vec())
}

pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, PolicyError> {
    let mut hasher = HmacSha256::new_from_slice(key)?;
    hasher.update(data);
    Ok(hasher.finalize().into_bytes().to_vec())
}

/// policy中expiration的格式，例如：2015-12-30T12:00:00.000Z
pub fn format_expiration(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// 按路径分段编码，保留`/`
pub fn key_urlencode<S: AsRef<str>>(key: S) -> String {
    key.as_ref()
        .split('/')
        .map(|x| urlencoding::encode(x))
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_hmac_sha1() {
        let digest = hmac_sha1(b"1234567890", b"hello").unwrap();
        assert_eq!(base64_encode(digest), "b84KVc+LroDiz0ebUANfdzSRxa0=");
    }

    #[test]
    fn test_base64() {
        let encoded = base64_encode("hello");
        assert_eq!(encoded, "aGVsbG8=");
        assert_eq!(base64_decode(encoded).unwrap(), b"hello");
        assert!(base64_decode("not base64!").is_err());
    }

    #[test]
    fn test_format_expiration() {
        let time = Utc.with_ymd_and_hms(2015, 12, 30, 12, 0, 0).unwrap();
        assert_eq!(format_expiration(&time), "2015-12-30T12:00:00.000Z");
    }

    #[test]
    fn test_key_urlencode() {
        assert_eq!(key_urlencode("u/my file.png"), "u/my%20file.png");
        assert_eq!(key_urlencode("图片/a.png"), "%E5%9B%BE%E7%89%87/a.png");
    }
}
