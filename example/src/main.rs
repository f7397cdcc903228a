use s3_post_policy_rust_sdk::destination::StorageDestinationBuilder;
use s3_post_policy_rust_sdk::s3::{S3Info, S3};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    //set log debug
    let s3 = S3::from_env()?;
    s3.open_debug();
    let destination = StorageDestinationBuilder::new()
        .policy_builder_expire_in(60 * 60)?
        .set_bucket(dotenvy::var("S3_BUCKET")?)
        .set_key_prefix("uploads/")
        .set_acl("public-read")
        .set_content_type("text/plain")
        .done_with(&s3)?
        .set_key("uploads/hello.txt")
        .build()?;
    println!("action: {}", destination.host(s3.endpoint()));
    println!("{}", serde_json::to_string_pretty(&destination)?);
    Ok(())
}
