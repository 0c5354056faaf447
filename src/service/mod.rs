pub mod upload;
pub mod view;

pub use upload::UploadCoordinator;
pub use view::ReconcileView;

/// 测试用内存版对账服务 (计数每类请求, 可注入失败)
#[cfg(test)]
pub(crate) mod testutil {
    use crate::client::{ApiError, ReconcileApi};
    use crate::models::{Contract, ContractStatus, DocumentClass, Invoice, UploadAck, UploadFile};
    use async_trait::async_trait;
    use bigdecimal::BigDecimal;
    use std::collections::HashMap;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::Semaphore;

    pub fn contract_row(
        id: i64,
        po_number: &str,
        total: &str,
        invoiced: &str,
        status: ContractStatus,
        invoice_count: i64,
    ) -> Contract {
        Contract {
            id,
            po_number: po_number.to_string(),
            order_date: "2024-01-15".to_string(),
            quantity: 100,
            total_amount: BigDecimal::from_str(total).unwrap(),
            invoiced_amount: BigDecimal::from_str(invoiced).unwrap(),
            invoiced_quantity: 50,
            status,
            invoice_count,
        }
    }

    pub fn invoice_row(id: i64, amount: &str) -> Invoice {
        Invoice {
            id,
            spec_model: format!("SKU-A{:03}", id),
            quantity: 50,
            amount: BigDecimal::from_str(amount).unwrap(),
            status: "verified".to_string(),
            created_at: chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
        }
    }

    #[derive(Default)]
    pub struct FakeApi {
        contracts: Mutex<Vec<Contract>>,
        invoices: Mutex<HashMap<i64, Vec<Invoice>>>,
        per_contract_fetches: Mutex<HashMap<i64, usize>>,
        pub contract_fetches: AtomicUsize,
        pub upload_calls: AtomicUsize,
        pub fail_contracts: AtomicBool,
        pub fail_invoices: AtomicBool,
        upload_error: Mutex<Option<String>>,
        upload_gate: Mutex<Option<Arc<Semaphore>>>,
    }

    impl FakeApi {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_contracts(&self, contracts: Vec<Contract>) {
            *self.contracts.lock().unwrap() = contracts;
        }

        pub fn set_invoices(&self, contract_id: i64, invoices: Vec<Invoice>) {
            self.invoices.lock().unwrap().insert(contract_id, invoices);
        }

        /// 某合同的明细请求次数
        pub fn invoice_fetches(&self, contract_id: i64) -> usize {
            *self
                .per_contract_fetches
                .lock()
                .unwrap()
                .get(&contract_id)
                .unwrap_or(&0)
        }

        pub fn set_upload_error(&self, detail: &str) {
            *self.upload_error.lock().unwrap() = Some(detail.to_string());
        }

        /// 让 upload_document 阻塞到拿到许可为止 (模拟在途请求)
        pub fn set_upload_gate(&self, gate: Arc<Semaphore>) {
            *self.upload_gate.lock().unwrap() = Some(gate);
        }
    }

    #[async_trait]
    impl ReconcileApi for FakeApi {
        async fn list_contracts(&self) -> Result<Vec<Contract>, ApiError> {
            self.contract_fetches.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if self.fail_contracts.load(Ordering::SeqCst) {
                return Err(ApiError::Service {
                    status: 500,
                    detail: "服务不可用".to_string(),
                });
            }
            Ok(self.contracts.lock().unwrap().clone())
        }

        async fn list_invoices(&self, contract_id: i64) -> Result<Vec<Invoice>, ApiError> {
            *self
                .per_contract_fetches
                .lock()
                .unwrap()
                .entry(contract_id)
                .or_insert(0) += 1;
            tokio::task::yield_now().await;
            if self.fail_invoices.load(Ordering::SeqCst) {
                return Err(ApiError::Service {
                    status: 500,
                    detail: "服务不可用".to_string(),
                });
            }
            Ok(self
                .invoices
                .lock()
                .unwrap()
                .get(&contract_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn upload_document(
            &self,
            kind: DocumentClass,
            _file: UploadFile,
        ) -> Result<UploadAck, ApiError> {
            self.upload_calls.fetch_add(1, Ordering::SeqCst);
            let gate = self.upload_gate.lock().unwrap().clone();
            if let Some(gate) = gate {
                gate.acquire().await.unwrap().forget();
            }
            if let Some(detail) = self.upload_error.lock().unwrap().clone() {
                return Err(ApiError::Service { status: 404, detail });
            }
            Ok(UploadAck {
                message: Some(format!("{}上传成功", kind.label())),
            })
        }
    }
}
