//! SigV4-signed JSON requests for service calls made over the raw REST API.

use anyhow::{bail, Context, Result};
use aws_credential_types::Credentials;
use aws_sigv4::http_request::{
    sign, SignableBody, SignableRequest, SigningParams, SigningSettings,
};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use serde_json::Value;

/// POST a JSON body to `url`, signed for `service` in `region`, and parse
/// the JSON response. A non-2xx status is an error carrying the response
/// body.
pub(crate) async fn signed_post_json(
    http: &reqwest::Client,
    credentials: &Credentials,
    region: &str,
    service: &str,
    url: &str,
    body: &Value,
) -> Result<Value> {
    let payload = serde_json::to_vec(body).context("failed to encode request body")?;

    let identity: Identity = credentials.clone().into();
    let params: SigningParams = v4::SigningParams::builder()
        .identity(&identity)
        .region(region)
        .name(service)
        .time(std::time::SystemTime::now())
        .settings(SigningSettings::default())
        .build()
        .context("failed to build signing parameters")?
        .into();

    let headers = [("content-type", "application/json")];
    let signable = SignableRequest::new(
        "POST",
        url,
        headers.iter().copied(),
        SignableBody::Bytes(&payload),
    )
    .context("failed to build signable request")?;
    let (instructions, _signature) = sign(signable, &params)
        .context("failed to sign request")?
        .into_parts();

    let mut request = http::Request::builder()
        .method(http::Method::POST)
        .uri(url)
        .header("content-type", "application/json")
        .body(payload)
        .context("failed to build request")?;
    instructions.apply_to_request_http1x(&mut request);

    let request = reqwest::Request::try_from(request).context("failed to convert request")?;
    let response = http.execute(request).await.context("request failed")?;
    let status = response.status();
    let text = response.text().await.context("failed to read response body")?;
    if !status.is_success() {
        bail!("{} returned {}: {}", url, status, text);
    }
    serde_json::from_str(&text).with_context(|| format!("invalid JSON response from {}", url))
}
