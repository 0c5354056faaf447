use crate::client::ReconcileApi;
use crate::models::{Contract, Invoice};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{OnceCell, RwLock};
use tracing::{info, warn};

/// 对账视图状态容器: 合同列表 + 发票明细缓存 + 展开状态.
///
/// 所有字段都只通过这里的方法变更, 便于无界面单元测试.
/// 一致性策略: 上传成功后整表重取合同列表 (refresh-on-mutation),
/// 不做增量修补; 已缓存的发票明细在会话内不自动失效.
pub struct ReconcileView {
    api: Arc<dyn ReconcileApi>,
    /// 合同列表, 整体原子替换 (读方拿到的要么全旧要么全新)
    contracts: RwLock<Arc<Vec<Contract>>>,
    /// 按合同ID懒加载的发票明细. OnceCell 保证并发 ensure_loaded
    /// 只发一次请求, 失败时保持未初始化以便下次重试
    detail_cache: DashMap<i64, Arc<OnceCell<Arc<Vec<Invoice>>>>>,
    /// 当前展开的合同 (最多一个)
    expanded: RwLock<Option<i64>>,
}

impl ReconcileView {
    pub fn new(api: Arc<dyn ReconcileApi>) -> Self {
        Self {
            api,
            contracts: RwLock::new(Arc::new(Vec::new())),
            detail_cache: DashMap::new(),
            expanded: RwLock::new(None),
        }
    }

    /// 当前合同列表快照
    pub async fn contracts(&self) -> Arc<Vec<Contract>> {
        self.contracts.read().await.clone()
    }

    /// 整表重取合同列表. 失败时保留旧数据 (宁可过期也不清空)
    pub async fn reload(&self) {
        match self.api.list_contracts().await {
            Ok(list) => {
                info!("合同列表已刷新, 共 {} 条", list.len());
                let mut roster = self.contracts.write().await;
                *roster = Arc::new(list);
            }
            Err(err) => {
                warn!("加载合同列表失败, 保留旧数据: {}", err);
            }
        }
    }

    /// 确保某合同的发票明细已加载. 命中缓存不发请求;
    /// 加载失败返回 None 且不缓存失败结果
    pub async fn ensure_loaded(&self, contract_id: i64) -> Option<Arc<Vec<Invoice>>> {
        let cell = {
            let entry = self
                .detail_cache
                .entry(contract_id)
                .or_insert_with(|| Arc::new(OnceCell::new()));
            entry.value().clone()
        };

        let loaded = cell
            .get_or_try_init(|| async {
                let invoices = self.api.list_invoices(contract_id).await?;
                info!("合同 {} 发票明细已加载, 共 {} 张", contract_id, invoices.len());
                Ok::<_, crate::client::ApiError>(Arc::new(invoices))
            })
            .await;

        match loaded {
            Ok(invoices) => Some(invoices.clone()),
            Err(err) => {
                warn!("加载合同 {} 发票明细失败: {}", contract_id, err);
                None
            }
        }
    }

    /// 只读缓存, 不触发加载 (渲染用)
    pub async fn invoices(&self, contract_id: i64) -> Option<Arc<Vec<Invoice>>> {
        self.detail_cache
            .get(&contract_id)
            .and_then(|cell| cell.get().cloned())
    }

    /// 展开/折叠一个合同行. 展开另一合同时直接切换, 无中间态;
    /// 首次展开触发明细加载
    pub async fn toggle(&self, contract_id: i64) {
        {
            let mut expanded = self.expanded.write().await;
            if *expanded == Some(contract_id) {
                *expanded = None;
                return;
            }
            *expanded = Some(contract_id);
        }
        self.ensure_loaded(contract_id).await;
    }

    /// 当前展开的合同ID
    pub async fn expanded(&self) -> Option<i64> {
        *self.expanded.read().await
    }
}
