//! Outbound collaborators: object storage for submitted images and the
//! template-message gateway. Both are optional and strictly best-effort;
//! the submission record is already durable before either runs, so their
//! failures are logged and swallowed.

pub mod messaging;
pub mod object_store;

use crate::config::AppConfig;

pub struct Notifier {
    store: Option<object_store::ObjectStore>,
    gateway: Option<messaging::MessageGateway>,
}

impl Notifier {
    pub fn from_config(config: &AppConfig) -> Self {
        let store = config.bucket_name.as_ref().map(|bucket| {
            object_store::ObjectStore::new(
                config.object_store_endpoint.clone(),
                bucket.clone(),
                config.object_store_token.clone(),
            )
        });

        let gateway = match (
            &config.gateway_url,
            &config.gateway_token,
            &config.gateway_sender,
            &config.gateway_recipient,
        ) {
            (Some(url), Some(token), Some(sender), Some(recipient)) => {
                Some(messaging::MessageGateway::new(
                    url.clone(),
                    token.clone(),
                    sender.clone(),
                    recipient.clone(),
                    config.gateway_template.clone(),
                ))
            }
            _ => None,
        };

        Notifier { store, gateway }
    }

    /// Stores the image and forwards its public URL through the gateway.
    /// Never fails the caller.
    pub async fn notify_image_submission(&self, submission_id: i32, image_bytes: &[u8]) {
        let Some(store) = &self.store else {
            return;
        };

        let url = match store.upload_png(image_bytes).await {
            Ok(url) => {
                info!("Stored submission {} image at {}", submission_id, url);
                url
            }
            Err(e) => {
                warn!("Image upload for submission {} failed: {}", submission_id, e);
                return;
            }
        };

        if let Some(gateway) = &self.gateway {
            if let Err(e) = gateway.send_image_template(&url).await {
                warn!(
                    "Gateway notification for submission {} failed: {}",
                    submission_id, e
                );
            }
        }
    }
}
