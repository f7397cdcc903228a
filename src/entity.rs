use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::PolicyError;
use crate::request::RequestType;
use crate::util;

/// 表单参数
pub type FormParams = HashMap<String, Value>;

/// 浏览器直传的目标描述：表单提交地址(bucket)、方法、过期时间和全部表单字段
///
/// 只能通过[`StorageDestinationBuilder::build`](crate::destination::StorageDestinationBuilder::build)创建，创建后不可修改。
#[derive(Debug, Clone, Serialize)]
pub struct StorageDestination {
    url: String,
    method: RequestType,
    expiration: DateTime<Utc>,
    params: FormParams,
}

impl StorageDestination {
    pub(crate) fn new(
        url: String,
        method: RequestType,
        expiration: DateTime<Utc>,
        params: FormParams,
    ) -> Self {
        Self {
            url,
            method,
            expiration,
            params,
        }
    }

    /// bucket名称
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> RequestType {
        self.method
    }

    pub fn expiration(&self) -> &DateTime<Utc> {
        &self.expiration
    }

    pub fn params(&self) -> &FormParams {
        &self.params
    }

    pub fn param<S: AsRef<str>>(&self, name: S) -> Option<&Value> {
        self.params.get(name.as_ref())
    }

    /// 表单action地址，例如：https://my-bucket.s3.amazonaws.com
    pub fn host<S: AsRef<str>>(&self, endpoint: S) -> String {
        format!("https://{}.{}", self.url, endpoint.as_ref())
    }

    /// 上传成功后对象的访问地址
    pub fn object_url<S: AsRef<str>>(&self, endpoint: S) -> Option<String> {
        let key = self.param("key")?.as_str()?;
        Some(format!(
            "{}/{}",
            self.host(endpoint),
            util::key_urlencode(key.trim_start_matches('/'))
        ))
    }

    /// 解码`policy`字段
    pub fn policy_document(&self) -> Result<Value, PolicyError> {
        let policy = self
            .param("policy")
            .and_then(Value::as_str)
            .ok_or(PolicyError::MissingField("policy"))?;
        let json = util::base64_decode(policy)?;
        Ok(serde_json::from_slice(&json)?)
    }
}
