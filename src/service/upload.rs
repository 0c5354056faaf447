use crate::client::{ApiError, ReconcileApi};
use crate::models::{accepted_mime, DocumentClass, UploadFile, UploadOutcome};
use crate::service::ReconcileView;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

/// 上传协调器: 记录当前单据类型, 校验文件, 派发到对应接口,
/// 成功后触发合同列表刷新. 同一时刻最多一个上传在途.
pub struct UploadCoordinator {
    api: Arc<dyn ReconcileApi>,
    view: Arc<ReconcileView>,
    kind: RwLock<DocumentClass>,
    in_flight: AtomicBool,
}

impl UploadCoordinator {
    pub fn new(api: Arc<dyn ReconcileApi>, view: Arc<ReconcileView>) -> Self {
        Self {
            api,
            view,
            kind: RwLock::new(DocumentClass::Contract),
            in_flight: AtomicBool::new(false),
        }
    }

    /// 切换上传单据类型 (纯状态变更, 无副作用)
    pub async fn set_document_class(&self, kind: DocumentClass) {
        let mut current = self.kind.write().await;
        *current = kind;
    }

    pub async fn document_class(&self) -> DocumentClass {
        *self.kind.read().await
    }

    /// 是否有上传在途
    pub fn is_uploading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// 提交一次拖放/选择的文件.
    /// 空批次为空操作; 多文件整批拒绝; 类型不符拒绝;
    /// 在途期间的再次提交为空操作.
    pub async fn submit(&self, mut files: Vec<UploadFile>) -> UploadOutcome {
        if files.is_empty() {
            return UploadOutcome::NoFile;
        }
        if files.len() > 1 {
            info!("拒绝多文件提交, 共 {} 个", files.len());
            return UploadOutcome::Rejected {
                reason: "一次只能上传一个文件".to_string(),
            };
        }
        let file = files.remove(0);
        if accepted_mime(&file.filename).is_none() {
            return UploadOutcome::Rejected {
                reason: format!("不支持的文件类型: {} (仅限 PDF/PNG/JPEG)", file.filename),
            };
        }

        // 在途守卫: 抢不到就直接返回, 不排队
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return UploadOutcome::InFlight;
        }

        let kind = *self.kind.read().await;
        info!("开始上传{}: {}", kind.label(), file.filename);

        let outcome = match self.api.upload_document(kind, file).await {
            Ok(ack) => {
                let message = ack
                    .message
                    .unwrap_or_else(|| format!("{}上传成功", kind.label()));
                info!("{}, 刷新合同列表", message);
                self.view.reload().await;
                UploadOutcome::Completed { kind, message }
            }
            Err(ApiError::Service { status, detail }) => {
                warn!(status, "上传被服务端拒绝: {}", detail);
                UploadOutcome::Failed { reason: detail }
            }
            Err(err) => {
                error!("上传请求失败: {}", err);
                UploadOutcome::Failed {
                    reason: format!("上传失败: {}", err),
                }
            }
        };

        self.in_flight.store(false, Ordering::SeqCst);
        outcome
    }
}
