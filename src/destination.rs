use cfg_if::cfg_if;
use chrono::{DateTime, Utc};
use serde_json::Value;
cfg_if! {
    if #[cfg(feature = "debug-print")] {
        use tracing::debug;
    }
}

use crate::auth::AuthAPI;
use crate::entity::{FormParams, StorageDestination};
use crate::error::PolicyError;
use crate::policy::PostPolicy;
use crate::request::{RequestType, Seconds};
use crate::s3::{S3Info, S3};

const KEY: &str = "key";
const CONTENT_TYPE: &str = "Content-Type";
const SECURITY_TOKEN: &str = "x-amz-security-token";

/// 由专用方法或签名写入的字段，不能再通过equality/starts_with设置
const RESERVED_FIELDS: [&str; 12] = [
    "bucket",
    "acl",
    "success_action_redirect",
    "success_action_status",
    SECURITY_TOKEN,
    "x-amz-algorithm",
    "x-amz-credential",
    "x-amz-date",
    "x-amz-signature",
    "policy",
    "signature",
    "AWSAccessKeyId",
];

fn is_reserved(field: &str) -> bool {
    RESERVED_FIELDS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(field))
}

/// 尚未签名
#[derive(Debug)]
pub struct Unsigned;

/// 已签名，bucket和过期时间都已确定
#[derive(Debug)]
pub struct Signed {
    bucket: String,
    expiration: DateTime<Utc>,
}

/// 上传目标构建器
/// # 使用例子
/// ```rust
/// use chrono::{Duration, Utc};
/// use s3_post_policy_rust_sdk::destination::StorageDestinationBuilder;
///
/// let destination = StorageDestinationBuilder::new()
///     .policy_builder(Utc::now() + Duration::hours(1))
///     .set_bucket("my-bucket")
///     .set_key_prefix("uploads/")//只允许上传到uploads目录
///     .set_acl("public-read")
///     .done("my_key_id", "my_key_secret")
///     .unwrap()
///     .set_key("uploads/avatar.png")
///     .build()
///     .unwrap();
/// assert_eq!(destination.url(), "my-bucket");
/// assert_eq!(destination.method().to_string(), "POST");
/// ```
#[derive(Debug)]
pub struct StorageDestinationBuilder<S = Unsigned> {
    params: FormParams,
    state: S,
}

impl Default for StorageDestinationBuilder<Unsigned> {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageDestinationBuilder<Unsigned> {
    pub fn new() -> Self {
        StorageDestinationBuilder {
            params: FormParams::new(),
            state: Unsigned,
        }
    }

    /// 开始构建policy，expiration同时作为上传目标的过期时间
    pub fn policy_builder(self, expiration: DateTime<Utc>) -> S3StoragePolicyBuilder<NoBucket> {
        S3StoragePolicyBuilder {
            destination: self,
            policy: PostPolicy::new(expiration),
            signed_at: None,
            rejected: None,
            bucket: NoBucket,
        }
    }

    /// 从现在起expire秒后过期
    pub fn policy_builder_expire_in(
        self,
        expire: Seconds,
    ) -> Result<S3StoragePolicyBuilder<NoBucket>, PolicyError> {
        let expiration = chrono::Duration::try_seconds(expire)
            .and_then(|expire| Utc::now().checked_add_signed(expire))
            .ok_or(PolicyError::InvalidExpiration(expire))?;
        Ok(self.policy_builder(expiration))
    }
}

impl<S> StorageDestinationBuilder<S> {
    /// 上传的文件名包含路径，例如：uploads/avatar.png
    pub fn set_key<K: AsRef<str>>(self, key: K) -> Self {
        self.set(KEY, key.as_ref())
    }

    pub fn set<K: AsRef<str>, V: Into<Value>>(mut self, name: K, value: V) -> Self {
        self.insert(name, value);
        self
    }

    fn insert<K: AsRef<str>, V: Into<Value>>(&mut self, name: K, value: V) {
        self.params.insert(name.as_ref().to_string(), value.into());
    }
}

impl StorageDestinationBuilder<Signed> {
    pub fn build(mut self) -> Result<StorageDestination, PolicyError> {
        if !self.params.contains_key(KEY) {
            return Err(PolicyError::MissingField(KEY));
        }
        self.params
            .entry(CONTENT_TYPE.to_string())
            .or_insert_with(|| Value::from(""));
        Ok(StorageDestination::new(
            self.state.bucket,
            RequestType::Post,
            self.state.expiration,
            self.params,
        ))
    }
}

/// 还没有设置bucket
#[derive(Debug)]
pub struct NoBucket;

/// 已设置bucket
#[derive(Debug)]
pub struct WithBucket(String);

/// Policy构建器
///
/// 条件写入policy，普通表单值同步写入上传目标的参数。
/// 只有设置了bucket之后才能调用[`done`](S3StoragePolicyBuilder::done)。
#[derive(Debug)]
pub struct S3StoragePolicyBuilder<B = NoBucket> {
    destination: StorageDestinationBuilder<Unsigned>,
    policy: PostPolicy,
    signed_at: Option<DateTime<Utc>>,
    rejected: Option<PolicyError>,
    bucket: B,
}

impl<B> S3StoragePolicyBuilder<B> {
    pub fn set_bucket<S: AsRef<str>>(mut self, bucket: S) -> S3StoragePolicyBuilder<WithBucket> {
        let bucket = bucket.as_ref();
        self.policy.equality("bucket", bucket);
        S3StoragePolicyBuilder {
            destination: self.destination,
            policy: self.policy,
            signed_at: self.signed_at,
            rejected: self.rejected,
            bucket: WithBucket(bucket.to_string()),
        }
    }

    /// 只允许上传到哪个目录上，key本身需要另外通过set_key设置
    pub fn set_key_prefix<S: AsRef<str>>(mut self, prefix: S) -> Self {
        self.policy.starts_with(KEY, prefix);
        self
    }

    pub fn set_acl<S: AsRef<str>>(self, acl: S) -> Self {
        self.equality_field("acl", acl.as_ref())
    }

    /// 只写入表单，不加policy条件
    pub fn set_content_type<S: AsRef<str>>(mut self, content_type: S) -> Self {
        self.destination.insert(CONTENT_TYPE, content_type.as_ref());
        self
    }

    /// 上传成功后跳转的地址
    pub fn set_redirect<S: AsRef<str>>(self, url: S) -> Self {
        self.equality_field("success_action_redirect", url.as_ref())
    }

    /// 上传成功后返回的状态码(200、201、204)
    pub fn set_success_action_status(self, status: u16) -> Self {
        self.equality_field("success_action_status", &status.to_string())
    }

    /// 允许上传的文件大小范围(字节)
    pub fn set_content_length_range(mut self, min: u64, max: u64) -> Self {
        self.policy.content_length_range(min, max);
        self
    }

    pub fn set_security_token<S: AsRef<str>>(self, token: S) -> Self {
        self.equality_field(SECURITY_TOKEN, token.as_ref())
    }

    /// 只加policy条件，不写入表单
    ///
    /// bucket、acl等由专用方法或签名写入的字段会被拒绝，错误在done时返回。
    pub fn equality<F: AsRef<str>, V: AsRef<str>>(mut self, field: F, value: V) -> Self {
        if self.accept(field.as_ref()) {
            self.policy.equality(field, value);
        }
        self
    }

    /// 只加policy条件，不写入表单
    ///
    /// key的前缀请使用set_key_prefix。
    pub fn starts_with<F: AsRef<str>, V: AsRef<str>>(mut self, field: F, value: V) -> Self {
        if !field.as_ref().eq_ignore_ascii_case(KEY) && self.accept(field.as_ref()) {
            self.policy.starts_with(field, value);
        } else if self.rejected.is_none() {
            self.rejected = Some(PolicyError::ReservedField(field.as_ref().to_string()));
        }
        self
    }

    /// V4签名使用的时间，不设置则为调用done时的当前时间
    pub fn signed_at(mut self, time: DateTime<Utc>) -> Self {
        self.signed_at = Some(time);
        self
    }

    fn accept(&mut self, field: &str) -> bool {
        if !is_reserved(field) {
            return true;
        }
        if self.rejected.is_none() {
            self.rejected = Some(PolicyError::ReservedField(field.to_string()));
        }
        false
    }

    fn equality_field(mut self, field: &str, value: &str) -> Self {
        self.policy.equality(field, value);
        self.destination.insert(field, value);
        self
    }
}

impl S3StoragePolicyBuilder<WithBucket> {
    /// 使用V2签名完成policy
    pub fn done<K: AsRef<str>, S: AsRef<str>>(
        self,
        access_key_id: K,
        secret_key: S,
    ) -> Result<StorageDestinationBuilder<Signed>, PolicyError> {
        self.done_with(&S3::new(access_key_id.as_ref(), secret_key.as_ref()))
    }

    /// 使用S3配置中的凭证和签名版本完成policy
    pub fn done_with(self, s3: &S3) -> Result<StorageDestinationBuilder<Signed>, PolicyError> {
        let S3StoragePolicyBuilder {
            mut destination,
            mut policy,
            signed_at,
            rejected,
            bucket: WithBucket(bucket),
        } = self;
        if let Some(err) = rejected {
            return Err(err);
        }
        let signed_at = signed_at.unwrap_or_else(Utc::now);

        if let Some(token) = s3.security_token() {
            policy.equality(SECURITY_TOKEN, &token);
            destination.insert(SECURITY_TOKEN, token);
        }
        for (field, value) in s3.policy_fields(&signed_at) {
            policy.equality(field, &value);
            destination.insert(field, value);
        }

        cfg_if! {
            if #[cfg(feature = "debug-print")] {
                debug!("s3 log: policy json: {}", policy.to_json()?);
            }
        }
        let encoded = policy.to_base64()?;
        let signature_fields = s3.signature_fields(&encoded, &signed_at)?;
        destination.insert("policy", encoded);
        for (field, value) in signature_fields {
            cfg_if! {
                if #[cfg(feature = "debug-print")] {
                    debug!("s3 log: {}: {}", field, value);
                }
            }
            destination.insert(field, value);
        }

        Ok(StorageDestinationBuilder {
            params: destination.params,
            state: Signed {
                bucket,
                expiration: *policy.expiration(),
            },
        })
    }
}
