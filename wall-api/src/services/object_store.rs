//! GCS-style object storage: store bytes, get back a retrievable URL.

use chrono::Utc;
use uuid::Uuid;

pub struct ObjectStore {
    client: reqwest::Client,
    endpoint: String,
    bucket: String,
    token: Option<String>,
}

impl ObjectStore {
    pub fn new(endpoint: String, bucket: String, token: Option<String>) -> Self {
        ObjectStore {
            client: reqwest::Client::new(),
            endpoint,
            bucket,
            token,
        }
    }

    /// Uploads PNG bytes under a timestamped unique name and returns the
    /// public URL of the object.
    pub async fn upload_png(&self, bytes: &[u8]) -> Result<String, String> {
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let unique = Uuid::new_v4().simple().to_string();
        let name = format!("suggestions/canvas_{}_{}.png", timestamp, &unique[..8]);

        let upload_url = format!(
            "{}/upload/storage/v1/b/{}/o?uploadType=media&name={}",
            self.endpoint, self.bucket, name
        );

        let mut request = self
            .client
            .post(&upload_url)
            .header("Content-Type", "image/png")
            .body(bytes.to_vec());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        request
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;

        // Uniform bucket-level access: the bucket itself is public, no
        // per-object ACL call needed.
        Ok(format!(
            "https://storage.googleapis.com/{}/{}",
            self.bucket, name
        ))
    }
}
