//! # S3 浏览器直传 POST Policy SDK
//!
//! 生成S3表单直传所需的policy、签名和表单字段，文件由浏览器直接上传到存储，不经过应用服务器。
//!
//! # 功能列表：
//!
//! 1. 构建上传目标(V2签名)
//! ```rust
//! use chrono::{Duration, Utc};
//! use s3_post_policy_rust_sdk::destination::StorageDestinationBuilder;
//!
//! let destination = StorageDestinationBuilder::new()
//!     .policy_builder(Utc::now() + Duration::hours(1))//1个小时过期
//!     .set_bucket("my-bucket")
//!     .set_key_prefix("uploads/")//只允许上传到uploads目录
//!     .set_acl("public-read")
//!     .set_redirect("https://mydomain.com/uploaded")
//!     .done("my_key_id", "my_key_secret")
//!     .unwrap()
//!     .set_key("uploads/avatar.png")
//!     .build()
//!     .unwrap();
//! println!("action: {}", destination.host("s3.amazonaws.com"));
//! for (name, value) in destination.params() {
//!     println!("{}: {}", name, value);
//! }
//! //form-data的参数为key、acl、Content-Type、policy、signature、AWSAccessKeyId、file
//! ```
//! 2. V4签名(配置region)
//! ```rust
//! use chrono::{Duration, Utc};
//! use s3_post_policy_rust_sdk::auth::SignatureVersion;
//! use s3_post_policy_rust_sdk::destination::StorageDestinationBuilder;
//! use s3_post_policy_rust_sdk::s3::S3;
//!
//! let s3 = S3::new("my_key_id", "my_key_secret")
//!     .with_signature_version(SignatureVersion::v4("us-east-1"));
//! let destination = StorageDestinationBuilder::new()
//!     .policy_builder(Utc::now() + Duration::minutes(10))
//!     .set_bucket("my-bucket")
//!     .set_content_length_range(1, 10 * 1024 * 1024)//只允许10m以内
//!     .done_with(&s3)
//!     .unwrap()
//!     .set_key("uploads/report.pdf")
//!     .build()
//!     .unwrap();
//! assert!(destination.param("x-amz-signature").is_some());
//! ```
pub mod auth;
pub mod destination;
pub mod entity;
pub mod error;
pub mod policy;
pub mod request;
pub mod s3;
pub mod util;
