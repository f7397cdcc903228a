use crate::auth::SignatureVersion;
use crate::error::PolicyError;

pub const DEFAULT_ENDPOINT: &str = "s3.amazonaws.com";

/// S3配置
#[derive(Debug, Clone)]
pub struct S3 {
    key_id: String,
    key_secret: String,
    endpoint: String,
    security_token: Option<String>,
    signature_version: SignatureVersion,
}

pub trait S3Info {
    fn endpoint(&self) -> String;
    fn key_id(&self) -> String;
    fn key_secret(&self) -> String;
    fn security_token(&self) -> Option<String>;
    fn signature_version(&self) -> SignatureVersion;
}

impl S3Info for S3 {
    fn endpoint(&self) -> String {
        self.endpoint.clone()
    }

    fn key_id(&self) -> String {
        self.key_id.clone()
    }

    fn key_secret(&self) -> String {
        self.key_secret.clone()
    }

    fn security_token(&self) -> Option<String> {
        self.security_token.clone()
    }

    fn signature_version(&self) -> SignatureVersion {
        self.signature_version.clone()
    }
}

impl S3 {
    pub fn new<K: Into<String>, S: Into<String>>(key_id: K, key_secret: S) -> Self {
        S3 {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            security_token: None,
            signature_version: SignatureVersion::default(),
        }
    }

    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// 临时凭证(STS)的token，会写入policy条件和表单
    pub fn with_security_token<S: Into<String>>(mut self, token: S) -> Self {
        self.security_token = Some(token.into());
        self
    }

    pub fn with_signature_version(mut self, version: SignatureVersion) -> Self {
        self.signature_version = version;
        self
    }

    /// 从环境变量(或`.env`)加载配置
    ///
    /// 必填：`S3_KEY_ID`、`S3_KEY_SECRET`；
    /// 可选：`S3_ENDPOINT`、`S3_SECURITY_TOKEN`、`S3_REGION`(设置后使用V4签名)
    pub fn from_env() -> Result<Self, PolicyError> {
        dotenvy::dotenv().ok();
        let key_id = dotenvy::var("S3_KEY_ID")?;
        let key_secret = dotenvy::var("S3_KEY_SECRET")?;
        let mut s3 = S3::new(key_id, key_secret);
        if let Ok(endpoint) = dotenvy::var("S3_ENDPOINT") {
            s3 = s3.with_endpoint(endpoint);
        }
        if let Ok(token) = dotenvy::var("S3_SECURITY_TOKEN") {
            s3 = s3.with_security_token(token);
        }
        if let Ok(region) = dotenvy::var("S3_REGION") {
            s3 = s3.with_signature_version(SignatureVersion::v4(region));
        }
        Ok(s3)
    }

    #[cfg(feature = "debug-print")]
    pub fn open_debug(&self) {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_line_number(true)
            .try_init()
            .ok();
    }
}
