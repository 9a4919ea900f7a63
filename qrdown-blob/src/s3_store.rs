use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::{primitives::ByteStream as AwsByteStream, Client};
use std::env;

use crate::store::{ObjectHead, PutResult};
use crate::{BlobError, BlobResult, BlobStore, PutObject, StoredObject};

/// Connection settings for an S3-compatible bucket
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible services (MinIO, RustFS, LocalStack)
    pub endpoint_url: Option<String>,
    /// Static credentials. When unset the default AWS provider chain is used.
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub force_path_style: bool,
    /// Overrides the `https://{bucket}.s3.{region}.amazonaws.com` URL base
    pub public_base_url: Option<String>,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            bucket: "milaganan-bucket".to_string(),
            region: "us-east-1".to_string(),
            endpoint_url: None,
            access_key_id: None,
            secret_access_key: None,
            force_path_style: false,
            public_base_url: None,
        }
    }
}

impl S3Config {
    pub fn new<B: Into<String>, R: Into<String>>(bucket: B, region: R) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            ..Self::default()
        }
    }

    /// Read settings from the environment.
    ///
    /// `AWS_BUCKET_NAME` and `AWS_REGION` fall back to the defaults; the rest
    /// are optional.
    pub fn from_env() -> Self {
        fn optional(key: &str) -> Option<String> {
            env::var(key).ok().filter(|v| !v.trim().is_empty())
        }

        let defaults = Self::default();
        Self {
            bucket: optional("AWS_BUCKET_NAME").unwrap_or(defaults.bucket),
            region: optional("AWS_REGION").unwrap_or(defaults.region),
            endpoint_url: optional("AWS_ENDPOINT_URL"),
            access_key_id: optional("AWS_ACCESS_KEY_ID"),
            secret_access_key: optional("AWS_SECRET_ACCESS_KEY"),
            force_path_style: optional("S3_FORCE_PATH_STYLE")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            public_base_url: optional("S3_PUBLIC_BASE_URL"),
        }
    }

    pub fn with_endpoint_url<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint_url = Some(endpoint.into());
        self
    }

    pub fn with_credentials<A: Into<String>, S: Into<String>>(mut self, access_key_id: A, secret_access_key: S) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    pub fn with_path_style(mut self) -> Self {
        self.force_path_style = true;
        self
    }

    pub fn with_public_base_url<S: Into<String>>(mut self, base: S) -> Self {
        self.public_base_url = Some(base.into());
        self
    }

    /// Base of every public object URL, without a trailing slash
    pub fn public_base(&self) -> String {
        match &self.public_base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}.s3.{}.amazonaws.com", self.bucket, self.region),
        }
    }
}

/// S3-compatible store implementation using the AWS SDK
#[derive(Clone)]
pub struct S3CompatibleStore {
    client: Client,
    config: S3Config,
}

impl S3CompatibleStore {
    /// Build the SDK client once; the store is then shared for the process lifetime
    pub async fn new(config: S3Config) -> Self {
        let client = Self::create_client(&config).await;
        Self { client, config }
    }

    pub async fn from_env() -> Self {
        Self::new(S3Config::from_env()).await
    }

    /// Wrap an already configured client
    pub fn from_client(client: Client, config: S3Config) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &S3Config {
        &self.config
    }

    async fn create_client(config: &S3Config) -> Client {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        if let (Some(access_key_id), Some(secret_access_key)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            let credentials = Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                "qrdown",
            );
            loader = loader.credentials_provider(credentials);
        }

        let aws_config = loader.load().await;

        Client::from_conf(
            aws_sdk_s3::config::Builder::from(&aws_config)
                .force_path_style(config.force_path_style)
                .build(),
        )
    }

    fn map_aws_error(err: impl std::error::Error + Send + Sync + 'static) -> BlobError {
        BlobError::backend(err)
    }
}

#[async_trait]
impl BlobStore for S3CompatibleStore {
    async fn put(&self, key: &str, object: PutObject) -> BlobResult<PutResult> {
        let size_bytes = object.size_bytes();

        let mut request = self
            .client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .body(AwsByteStream::from(object.body));

        if let Some(ct) = object.content_type {
            request = request.content_type(ct);
        }
        if let Some(disposition) = object.content_disposition {
            request = request.content_disposition(disposition);
        }
        if !object.metadata.is_empty() {
            request = request.set_metadata(Some(object.metadata));
        }

        let result = request.send().await.map_err(Self::map_aws_error)?;

        Ok(PutResult {
            etag: result.e_tag,
            size_bytes,
        })
    }

    async fn get(&self, key: &str) -> BlobResult<StoredObject> {
        let result = self
            .client
            .get_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                let missing = err
                    .as_service_error()
                    .map(|e| e.is_no_such_key())
                    .unwrap_or(false);
                if missing {
                    BlobError::not_found(key)
                } else {
                    Self::map_aws_error(err)
                }
            })?;

        let content_type = result.content_type;
        let content_disposition = result.content_disposition;
        let metadata = result.metadata.unwrap_or_default();
        let body = result.body.collect().await.map_err(Self::map_aws_error)?;

        Ok(StoredObject {
            body: body.into_bytes(),
            content_type,
            content_disposition,
            metadata,
        })
    }

    async fn head(&self, key: &str) -> BlobResult<ObjectHead> {
        let result = self
            .client
            .head_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                let missing = err
                    .as_service_error()
                    .map(|e| e.is_not_found())
                    .unwrap_or(false);
                if missing {
                    BlobError::not_found(key)
                } else {
                    Self::map_aws_error(err)
                }
            })?;

        Ok(ObjectHead {
            size_bytes: result.content_length.unwrap_or(0).max(0) as u64,
            content_type: result.content_type,
            etag: result.e_tag,
            last_modified: result.last_modified.map(|dt| dt.secs()),
            metadata: result.metadata.unwrap_or_default(),
        })
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.config.public_base(), key)
    }
}
