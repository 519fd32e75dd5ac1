//! Gateway client: one method per API operation.

use cardgate_core::{dttm, Endpoint, Value};
use cardgate_crypto::{
    assemble, validate_response, verify_gateway_return, PrivateKey, PublicKey, SignedEnvelope,
    VerifiedResponse,
};

use url::Url;

use crate::config::ClientConfig;
use crate::error::GatewayError;
use crate::request::{OneclickInit, PaymentInit};
use crate::transport::{HttpMethod, HttpTransport, ReqwestTransport};

/// Parse an API base URL. The path gets a trailing slash so endpoint paths
/// resolve below it instead of replacing its last segment.
pub fn parse_base_url(raw: &str) -> Result<Url, GatewayError> {
    let mut url = Url::parse(raw)
        .map_err(|e| GatewayError::Configuration(format!("invalid base_url `{raw}`: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(GatewayError::Configuration(format!(
            "base_url must be an http(s) URL, got `{raw}`"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// URL of an endpoint below `base`.
pub fn endpoint_url(base: &Url, endpoint: Endpoint) -> Result<Url, GatewayError> {
    base.join(endpoint.path())
        .map_err(|e| GatewayError::InvalidRequest(format!("{endpoint}: {e}")))
}

/// URL of an endpoint with the signed request carried as path segments:
/// field values in order, then the signature, each URL-encoded.
pub fn signed_url(
    base: &Url,
    endpoint: Endpoint,
    envelope: &SignedEnvelope,
) -> Result<Url, GatewayError> {
    let segments: Vec<String> = envelope
        .path_segments()
        .iter()
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    base.join(&format!("{}/{}", endpoint.path(), segments.join("/")))
        .map_err(|e| GatewayError::InvalidRequest(format!("{endpoint}: {e}")))
}

/// Signs requests with the merchant key and verifies every answer with the
/// gateway key before returning it.
pub struct GatewayClient<T = ReqwestTransport> {
    merchant_id: String,
    base_url: Url,
    private_key: PrivateKey,
    gateway_key: PublicKey,
    transport: T,
    clock: fn() -> String,
}

impl GatewayClient<ReqwestTransport> {
    /// Build a client with keys and HTTP settings from `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, GatewayError> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config.http)?;
        Self::with_transport(
            config.gateway.merchant_id.clone(),
            &config.gateway.base_url,
            config.load_private_key()?,
            config.load_gateway_public_key()?,
            transport,
        )
    }
}

impl<T: HttpTransport> GatewayClient<T> {
    pub fn with_transport(
        merchant_id: impl Into<String>,
        base_url: &str,
        private_key: PrivateKey,
        gateway_key: PublicKey,
        transport: T,
    ) -> Result<Self, GatewayError> {
        Ok(Self {
            merchant_id: merchant_id.into(),
            base_url: parse_base_url(base_url)?,
            private_key,
            gateway_key,
            transport,
            clock: dttm,
        })
    }

    /// Replace the source of `dttm` stamps.
    pub fn with_clock(mut self, clock: fn() -> String) -> Self {
        self.clock = clock;
        self
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn sign(&self, pairs: Vec<(&'static str, Value)>) -> Result<SignedEnvelope, GatewayError> {
        Ok(assemble(&self.private_key, pairs)?)
    }

    /// `merchantId, payId, dttm` plus any trailing fields.
    fn pay_id_request(
        &self,
        pay_id: &str,
        extra: Vec<(&'static str, Value)>,
    ) -> Result<SignedEnvelope, GatewayError> {
        let mut pairs = vec![
            ("merchantId", Value::from(self.merchant_id.as_str())),
            ("payId", pay_id.into()),
            ("dttm", (self.clock)().into()),
        ];
        pairs.extend(extra);
        self.sign(pairs)
    }

    async fn call(
        &self,
        method: HttpMethod,
        endpoint: Endpoint,
        envelope: &SignedEnvelope,
    ) -> Result<VerifiedResponse, GatewayError> {
        let (url, body) = match method {
            HttpMethod::Get => (signed_url(&self.base_url, endpoint, envelope)?, None),
            HttpMethod::Post | HttpMethod::Put => {
                let body = serde_json::to_string(envelope)
                    .map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;
                (endpoint_url(&self.base_url, endpoint)?, Some(body))
            }
        };

        tracing::debug!(%method, %endpoint, "calling gateway");
        let response = self.transport.send(method, url.as_str(), body).await?;
        if !response.is_success() {
            tracing::warn!(%endpoint, status = response.status, "gateway returned error status");
            return Err(GatewayError::HttpStatus {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        let verified = validate_response(&response.body, &self.gateway_key)?;
        tracing::debug!(
            %endpoint,
            result_code = verified.result_code().map(|c| c.code()),
            "gateway response verified"
        );
        Ok(verified)
    }

    /// Connectivity and signature check.
    pub async fn echo(&self, method: HttpMethod) -> Result<VerifiedResponse, GatewayError> {
        let envelope = self.sign(vec![
            ("merchantId", self.merchant_id.as_str().into()),
            ("dttm", (self.clock)().into()),
        ])?;
        let method = match method {
            HttpMethod::Get => HttpMethod::Get,
            _ => HttpMethod::Post,
        };
        self.call(method, Endpoint::Echo, &envelope).await
    }

    /// Create a payment; the response carries the `payId`.
    pub async fn payment_init(&self, request: &PaymentInit) -> Result<VerifiedResponse, GatewayError> {
        let envelope = self.sign(request.to_pairs(&self.merchant_id, &(self.clock)())?)?;
        self.call(HttpMethod::Post, Endpoint::PaymentInit, &envelope).await
    }

    /// Where to send the customer to pay. Nothing is sent to the gateway.
    pub fn payment_process_url(&self, pay_id: &str) -> Result<String, GatewayError> {
        let envelope = self.pay_id_request(pay_id, Vec::new())?;
        Ok(signed_url(&self.base_url, Endpoint::PaymentProcess, &envelope)?.into())
    }

    pub async fn payment_status(&self, pay_id: &str) -> Result<VerifiedResponse, GatewayError> {
        let envelope = self.pay_id_request(pay_id, Vec::new())?;
        self.call(HttpMethod::Get, Endpoint::PaymentStatus, &envelope).await
    }

    pub async fn payment_reverse(&self, pay_id: &str) -> Result<VerifiedResponse, GatewayError> {
        let envelope = self.pay_id_request(pay_id, Vec::new())?;
        self.call(HttpMethod::Put, Endpoint::PaymentReverse, &envelope).await
    }

    /// Settle an authorized payment, optionally for less than was authorized.
    pub async fn payment_close(
        &self,
        pay_id: &str,
        total_amount: Option<i64>,
    ) -> Result<VerifiedResponse, GatewayError> {
        let envelope = self.pay_id_request(pay_id, vec![("totalAmount", total_amount.into())])?;
        self.call(HttpMethod::Put, Endpoint::PaymentClose, &envelope).await
    }

    /// Refund a settled payment, fully or by `amount`.
    pub async fn payment_refund(
        &self,
        pay_id: &str,
        amount: Option<i64>,
    ) -> Result<VerifiedResponse, GatewayError> {
        let envelope = self.pay_id_request(pay_id, vec![("amount", amount.into())])?;
        self.call(HttpMethod::Put, Endpoint::PaymentRefund, &envelope).await
    }

    /// Whether the gateway has stored cards for `customer_id`.
    pub async fn customer_info(&self, customer_id: &str) -> Result<VerifiedResponse, GatewayError> {
        let envelope = self.sign(vec![
            ("merchantId", self.merchant_id.as_str().into()),
            ("customerId", customer_id.into()),
            ("dttm", (self.clock)().into()),
        ])?;
        self.call(HttpMethod::Get, Endpoint::CustomerInfo, &envelope).await
    }

    pub async fn oneclick_init(&self, request: &OneclickInit) -> Result<VerifiedResponse, GatewayError> {
        let envelope = self.sign(request.to_pairs(&self.merchant_id, &(self.clock)()))?;
        self.call(HttpMethod::Post, Endpoint::OneclickInit, &envelope).await
    }

    pub async fn oneclick_process(&self, pay_id: &str) -> Result<VerifiedResponse, GatewayError> {
        let envelope = self.pay_id_request(pay_id, Vec::new())?;
        self.call(HttpMethod::Post, Endpoint::OneclickProcess, &envelope).await
    }

    /// Verify the fields the gateway passed back through the customer's
    /// browser on the return URL.
    pub fn gateway_return<I, K, V>(&self, data: I) -> Result<VerifiedResponse, GatewayError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Ok(verify_gateway_return(data, &self.gateway_key)?)
    }
}
