//! Outbound template-message delivery (WhatsApp-style gateway).

use serde_json::json;

pub struct MessageGateway {
    client: reqwest::Client,
    api_url: String,
    token: String,
    sender: String,
    recipient: String,
    template: String,
}

impl MessageGateway {
    pub fn new(
        api_url: String,
        token: String,
        sender: String,
        recipient: String,
        template: String,
    ) -> Self {
        MessageGateway {
            client: reqwest::Client::new(),
            api_url,
            token,
            sender,
            recipient,
            template,
        }
    }

    /// Sends the configured template with `image_url` as its header image.
    pub async fn send_image_template(&self, image_url: &str) -> Result<(), String> {
        let url = format!("{}/{}", self.api_url, self.sender);
        let payload = json!({
            "messaging_product": "whatsapp",
            "recipient_type": "individual",
            "to": self.recipient,
            "type": "template",
            "template": {
                "name": self.template,
                "language": { "code": "en" },
                "components": [{
                    "type": "header",
                    "parameters": [{
                        "type": "image",
                        "image": { "link": image_url },
                    }],
                }],
            },
        });

        self.client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}
