use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, SerializeTuple, Serializer};

use crate::error::PolicyError;
use crate::util;

/// policy中的一条条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyCondition {
    /// `{"field": "value"}`
    Equality { field: String, value: String },
    /// `["starts-with", "$field", "value"]`
    StartsWith { field: String, value: String },
    /// `["content-length-range", min, max]`
    ContentLengthRange { min: u64, max: u64 },
}

impl PolicyCondition {
    fn same_rule(&self, other: &PolicyCondition) -> bool {
        match (self, other) {
            (
                PolicyCondition::Equality { field: a, .. },
                PolicyCondition::Equality { field: b, .. },
            ) => a == b,
            (
                PolicyCondition::StartsWith { field: a, .. },
                PolicyCondition::StartsWith { field: b, .. },
            ) => a == b,
            (
                PolicyCondition::ContentLengthRange { .. },
                PolicyCondition::ContentLengthRange { .. },
            ) => true,
            _ => false,
        }
    }
}

impl Serialize for PolicyCondition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PolicyCondition::Equality { field, value } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(field, value)?;
                map.end()
            }
            PolicyCondition::StartsWith { field, value } => {
                let mut seq = serializer.serialize_tuple(3)?;
                seq.serialize_element("starts-with")?;
                seq.serialize_element(&format!("${}", field))?;
                seq.serialize_element(value)?;
                seq.end()
            }
            PolicyCondition::ContentLengthRange { min, max } => {
                let mut seq = serializer.serialize_tuple(3)?;
                seq.serialize_element("content-length-range")?;
                seq.serialize_element(min)?;
                seq.serialize_element(max)?;
                seq.end()
            }
        }
    }
}

/// POST policy文档：过期时间 + 有序的条件列表
///
/// 同一字段的同类条件只保留一条，后设置的原位覆盖之前的值，
/// 与表单参数"后写覆盖"的语义保持一致。
#[derive(Debug, Clone)]
pub struct PostPolicy {
    expiration: DateTime<Utc>,
    conditions: Vec<PolicyCondition>,
}

impl PostPolicy {
    pub fn new(expiration: DateTime<Utc>) -> Self {
        Self {
            expiration,
            conditions: Vec::new(),
        }
    }

    pub fn expiration(&self) -> &DateTime<Utc> {
        &self.expiration
    }

    pub fn conditions(&self) -> &[PolicyCondition] {
        &self.conditions
    }

    pub fn equality<F: AsRef<str>, V: AsRef<str>>(&mut self, field: F, value: V) -> &mut Self {
        self.push(PolicyCondition::Equality {
            field: field.as_ref().to_string(),
            value: value.as_ref().to_string(),
        })
    }

    pub fn starts_with<F: AsRef<str>, V: AsRef<str>>(&mut self, field: F, value: V) -> &mut Self {
        self.push(PolicyCondition::StartsWith {
            field: field.as_ref().to_string(),
            value: value.as_ref().to_string(),
        })
    }

    pub fn content_length_range(&mut self, min: u64, max: u64) -> &mut Self {
        self.push(PolicyCondition::ContentLengthRange { min, max })
    }

    fn push(&mut self, condition: PolicyCondition) -> &mut Self {
        match self.conditions.iter_mut().find(|c| c.same_rule(&condition)) {
            Some(existing) => *existing = condition,
            None => self.conditions.push(condition),
        }
        self
    }

    pub fn to_json(&self) -> Result<String, PolicyError> {
        Ok(serde_json::to_string(self)?)
    }

    /// 表单中`policy`字段的值
    pub fn to_base64(&self) -> Result<String, PolicyError> {
        Ok(util::base64_encode(self.to_json()?))
    }
}

impl Serialize for PostPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("expiration", &util::format_expiration(&self.expiration))?;
        map.serialize_entry("conditions", &self.conditions)?;
        map.end()
    }
}
