//! OAuth token introspection clients (Google, Facebook)
//!
//! Each client maps an opaque token to a verified (email, name, picture)
//! triple by asking the provider. Nothing here inspects token signatures
//! locally; the provider's verdict is authoritative.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::kernel::{BaseTokenVerifier, ProviderIdentity};

const GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";
const FACEBOOK_ME_URL: &str = "https://graph.facebook.com/me";

// =============================================================================
// Google
// =============================================================================

pub struct GoogleTokenVerifier {
    client: Client,
    client_id: String,
}

#[derive(Debug, Deserialize)]
struct GoogleTokenInfo {
    aud: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

impl GoogleTokenVerifier {
    pub fn new(client_id: String) -> Self {
        Self {
            client: Client::new(),
            client_id,
        }
    }
}

#[async_trait]
impl BaseTokenVerifier for GoogleTokenVerifier {
    async fn verify(&self, token: &str) -> Result<ProviderIdentity> {
        let response = self
            .client
            .get(GOOGLE_TOKENINFO_URL)
            .query(&[("id_token", token)])
            .send()
            .await
            .context("google tokeninfo request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!("google rejected token ({})", response.status()));
        }

        let info: GoogleTokenInfo = response
            .json()
            .await
            .context("google tokeninfo response did not parse")?;

        // Token must have been minted for our client id
        if info.aud != self.client_id {
            return Err(anyhow!("google token audience mismatch"));
        }

        let email = info
            .email
            .ok_or_else(|| anyhow!("google token has no email claim"))?;

        Ok(ProviderIdentity {
            email,
            name: info.name.unwrap_or_default(),
            picture: info.picture,
        })
    }
}

// =============================================================================
// Facebook
// =============================================================================

pub struct FacebookTokenVerifier {
    client: Client,
}

#[derive(Debug, Deserialize)]
struct FacebookProfile {
    name: String,
    email: Option<String>,
    picture: Option<FacebookPicture>,
}

#[derive(Debug, Deserialize)]
struct FacebookPicture {
    data: FacebookPictureData,
}

#[derive(Debug, Deserialize)]
struct FacebookPictureData {
    url: String,
}

impl FacebookTokenVerifier {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for FacebookTokenVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseTokenVerifier for FacebookTokenVerifier {
    async fn verify(&self, token: &str) -> Result<ProviderIdentity> {
        let response = self
            .client
            .get(FACEBOOK_ME_URL)
            .query(&[
                ("fields", "id,name,email,picture"),
                ("access_token", token),
            ])
            .send()
            .await
            .context("facebook graph request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!("facebook rejected token ({})", response.status()));
        }

        let profile: FacebookProfile = response
            .json()
            .await
            .context("facebook graph response did not parse")?;

        // Accounts without an email address cannot be matched to ours
        let email = profile
            .email
            .ok_or_else(|| anyhow!("facebook profile has no email"))?;

        Ok(ProviderIdentity {
            email,
            name: profile.name,
            picture: profile.picture.map(|p| p.data.url),
        })
    }
}
