use chrono::{DateTime, Utc};

use crate::error::PolicyError;
use crate::s3::{S3Info, S3};
use crate::util;

pub const AWS4_HMAC_SHA256: &str = "AWS4-HMAC-SHA256";
const SERVICE: &str = "s3";

/// policy签名版本
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SignatureVersion {
    /// HMAC-SHA1，表单字段`signature`、`AWSAccessKeyId`
    #[default]
    V2,
    /// AWS4-HMAC-SHA256，表单字段`x-amz-*`
    V4 { region: String },
}

impl SignatureVersion {
    pub fn v4<S: Into<String>>(region: S) -> Self {
        SignatureVersion::V4 {
            region: region.into(),
        }
    }
}

pub trait AuthAPI {
    /// 需要在签名前写入policy条件(同时也是表单字段)的签名参数
    fn policy_fields(&self, signed_at: &DateTime<Utc>) -> Vec<(&'static str, String)>;

    /// 对base64后的policy签名
    fn sign_policy<S: AsRef<str>>(
        &self,
        policy: S,
        signed_at: &DateTime<Utc>,
    ) -> Result<String, PolicyError>;

    /// 签名后需要写入表单的字段
    fn signature_fields<S: AsRef<str>>(
        &self,
        policy: S,
        signed_at: &DateTime<Utc>,
    ) -> Result<Vec<(&'static str, String)>, PolicyError>;
}

impl AuthAPI for S3 {
    fn policy_fields(&self, signed_at: &DateTime<Utc>) -> Vec<(&'static str, String)> {
        match self.signature_version() {
            SignatureVersion::V2 => vec![],
            SignatureVersion::V4 { region } => vec![
                ("x-amz-algorithm", AWS4_HMAC_SHA256.to_string()),
                (
                    "x-amz-credential",
                    format!(
                        "{}/{}",
                        self.key_id(),
                        format_scope_string(signed_at, &region)
                    ),
                ),
                ("x-amz-date", signed_at.format("%Y%m%dT%H%M%SZ").to_string()),
            ],
        }
    }

    fn sign_policy<S: AsRef<str>>(
        &self,
        policy: S,
        signed_at: &DateTime<Utc>,
    ) -> Result<String, PolicyError> {
        let policy = policy.as_ref().as_bytes();
        match self.signature_version() {
            SignatureVersion::V2 => {
                let digest = util::hmac_sha1(self.key_secret().as_bytes(), policy)?;
                Ok(util::base64_encode(digest))
            }
            SignatureVersion::V4 { region } => {
                let signing_key = signing_key(signed_at, &self.key_secret(), &region)?;
                Ok(hex::encode(util::hmac_sha256(&signing_key, policy)?))
            }
        }
    }

    fn signature_fields<S: AsRef<str>>(
        &self,
        policy: S,
        signed_at: &DateTime<Utc>,
    ) -> Result<Vec<(&'static str, String)>, PolicyError> {
        let signature = self.sign_policy(policy, signed_at)?;
        Ok(match self.signature_version() {
            SignatureVersion::V2 => vec![("signature", signature), ("AWSAccessKeyId", self.key_id())],
            SignatureVersion::V4 { .. } => vec![("x-amz-signature", signature)],
        })
    }
}

pub fn format_scope_string(date: &DateTime<Utc>, region: &str) -> String {
    format!("{}/{}/{}/aws4_request", date.format("%Y%m%d"), region, SERVICE)
}

pub fn signing_key(
    date: &DateTime<Utc>,
    secret_key: &str,
    region: &str,
) -> Result<Vec<u8>, PolicyError> {
    let date_key = util::hmac_sha256(
        format!("AWS4{}", secret_key).as_bytes(),
        date.format("%Y%m%d").to_string().as_bytes(),
    )?;
    let region_key = util::hmac_sha256(&date_key, region.as_bytes())?;
    let service_key = util::hmac_sha256(&region_key, SERVICE.as_bytes())?;
    util::hmac_sha256(&service_key, b"aws4_request")
}
