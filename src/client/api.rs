use crate::models::{accepted_mime, Contract, DocumentClass, Invoice, UploadAck, UploadFile};
use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use thiserror::Error;

/// 远程对账服务调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络/传输层失败 (连接不上、超时、响应体损坏)
    #[error("请求失败: {0}")]
    Transport(#[from] reqwest::Error),
    /// 服务端返回非成功状态, detail 为服务端给出的原因
    #[error("服务端错误 ({status}): {detail}")]
    Service { status: u16, detail: String },
}

/// 远程对账服务接口. 抽成 trait 以便测试时用内存实现替换
#[async_trait]
pub trait ReconcileApi: Send + Sync {
    /// GET /contracts
    async fn list_contracts(&self) -> Result<Vec<Contract>, ApiError>;

    /// GET /contracts/{id}/invoices
    async fn list_invoices(&self, contract_id: i64) -> Result<Vec<Invoice>, ApiError>;

    /// POST /upload/{contract|invoice}, multipart 字段 file
    async fn upload_document(
        &self,
        kind: DocumentClass,
        file: UploadFile,
    ) -> Result<UploadAck, ApiError>;
}

/// 基于 reqwest 的服务客户端
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

/// FastAPI 风格错误体: {"detail": "..."}
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// 非 2xx 响应转成 ApiError::Service, 优先取服务端 detail
    async fn service_error(resp: reqwest::Response) -> ApiError {
        let status = resp.status().as_u16();
        let text = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.detail)
            .unwrap_or_else(|| {
                if text.is_empty() {
                    "未知错误".to_string()
                } else {
                    text
                }
            });
        ApiError::Service { status, detail }
    }
}

#[async_trait]
impl ReconcileApi for ApiClient {
    async fn list_contracts(&self) -> Result<Vec<Contract>, ApiError> {
        let url = format!("{}/contracts", self.base_url);
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(Self::service_error(resp).await);
        }
        Ok(resp.json().await?)
    }

    async fn list_invoices(&self, contract_id: i64) -> Result<Vec<Invoice>, ApiError> {
        let url = format!("{}/contracts/{}/invoices", self.base_url, contract_id);
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(Self::service_error(resp).await);
        }
        Ok(resp.json().await?)
    }

    async fn upload_document(
        &self,
        kind: DocumentClass,
        file: UploadFile,
    ) -> Result<UploadAck, ApiError> {
        let url = format!("{}/upload/{}", self.base_url, kind.endpoint_segment());

        let mut part = multipart::Part::bytes(file.bytes).file_name(file.filename.clone());
        if let Some(mime) = accepted_mime(&file.filename) {
            part = part.mime_str(mime)?;
        }
        let form = multipart::Form::new().part("file", part);

        let resp = self.http.post(&url).multipart(form).send().await?;
        if !resp.status().is_success() {
            return Err(Self::service_error(resp).await);
        }
        Ok(resp.json().await?)
    }
}
