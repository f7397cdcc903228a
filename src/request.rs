use serde::Serialize;
use strum_macros::{Display, EnumString};

pub type Seconds = i64;

/// 浏览器直传只支持表单POST
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, Serialize)]
pub enum RequestType {
    #[strum(serialize = "POST")]
    #[serde(rename = "POST")]
    Post,
}
