use aws_config::Region;
use aws_sdk_s3::{
    config::Credentials,
    primitives::ByteStream,
    types::{BucketCannedAcl, ObjectCannedAcl},
    Client, Config,
};
use bytes::Bytes;
use chrono::Utc;
use rand::Rng;

use crate::{config::StorageConfig, error::AppResult};

/// Payment-proof blob store over S3/MinIO. Objects are addressed by a
/// generated key derived from the caller's filename hint.
#[derive(Clone)]
pub struct BlobStore {
    client: Client,
    config: StorageConfig,
}

impl BlobStore {
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let creds = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "minio",
        );

        let s3_config = Config::builder()
            .region(Region::new(config.region.clone()))
            .endpoint_url(&config.endpoint)
            .credentials_provider(creds)
            .force_path_style(true)
            .build();

        let client = Client::from_conf(s3_config);

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub async fn ensure_bucket(&self) -> AppResult<()> {
        let bucket = &self.config.proofs_bucket;
        let result = self.client.head_bucket().bucket(bucket).send().await;

        if result.is_err() {
            self.client
                .create_bucket()
                .bucket(bucket)
                .acl(BucketCannedAcl::PublicRead)
                .send()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create bucket: {}", e))?;
            tracing::info!("Created bucket: {}", bucket);
        }

        Ok(())
    }

    /// Stores the bytes under a fresh key and returns the object's URI.
    pub async fn store(
        &self,
        data: Bytes,
        name_hint: &str,
        content_type: &str,
    ) -> AppResult<String> {
        let key = generate_key(name_hint);

        self.client
            .put_object()
            .bucket(&self.config.proofs_bucket)
            .key(&key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to upload file: {}", e))?;

        Ok(self.file_url(&key))
    }

    pub fn file_url(&self, key: &str) -> String {
        let bucket = &self.config.proofs_bucket;
        match &self.config.public_url {
            Some(public_url) => format!("{}/{}/{}", public_url, bucket, key),
            None => format!("{}/{}/{}", self.config.endpoint, bucket, key),
        }
    }
}

fn generate_key(name_hint: &str) -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    let nonce: String = (0..6)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();

    let safe: String = name_hint
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!("{}_{}_{}", Utc::now().timestamp_millis(), nonce, safe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_sanitize_the_filename_hint() {
        let key = generate_key("../etc/pass wd?.png");
        let safe_part = key.splitn(3, '_').nth(2).unwrap();
        assert_eq!(safe_part, ".._etc_pass_wd_.png");
    }

    #[test]
    fn keys_are_unique_per_call() {
        let a = generate_key("proof.png");
        let b = generate_key("proof.png");
        assert_ne!(a, b);
    }
}
