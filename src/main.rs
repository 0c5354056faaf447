use invoice_checker_rust::{
    view, ApiClient, AppConfig, DocumentClass, ReconcileApi, ReconcileView, UploadCoordinator,
    UploadFile, UploadOutcome,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

const USAGE: &str = "用法: invoice-checker-rust [list | show <合同ID> | upload <contract|invoice> <文件路径>]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env();
    info!("Starting invoice checker with config: {:?}", config);

    let api: Arc<dyn ReconcileApi> = Arc::new(ApiClient::new(&config.api.base_url));
    let view_state = Arc::new(ReconcileView::new(api.clone()));

    // 启动即加载合同列表
    view_state.reload().await;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("list") => {
            let contracts = view_state.contracts().await;
            println!("{}", view::render_roster(&contracts, None, None));
        }
        Some("show") => {
            let id: i64 = args.get(1).ok_or(USAGE)?.parse()?;
            view_state.toggle(id).await;
            let contracts = view_state.contracts().await;
            let detail = view_state.invoices(id).await;
            println!(
                "{}",
                view::render_roster(
                    &contracts,
                    view_state.expanded().await,
                    detail.as_deref().map(|invoices| invoices.as_slice()),
                )
            );
        }
        Some("upload") => {
            let kind = match args.get(1).map(String::as_str) {
                Some("contract") => DocumentClass::Contract,
                Some("invoice") => DocumentClass::Invoice,
                _ => return Err(USAGE.into()),
            };
            let path = args.get(2).ok_or(USAGE)?;
            let bytes = tokio::fs::read(path).await?;
            let filename = std::path::Path::new(path)
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or(path)
                .to_string();

            let coordinator = UploadCoordinator::new(api.clone(), view_state.clone());
            coordinator.set_document_class(kind).await;
            match coordinator.submit(vec![UploadFile::new(filename, bytes)]).await {
                UploadOutcome::Completed { message, .. } => {
                    println!("{}", message);
                    let contracts = view_state.contracts().await;
                    println!("{}", view::render_roster(&contracts, None, None));
                }
                UploadOutcome::Rejected { reason } | UploadOutcome::Failed { reason } => {
                    println!("上传失败: {}", reason);
                }
                UploadOutcome::InFlight => println!("已有上传进行中"),
                UploadOutcome::NoFile => println!("未选择文件"),
            }
        }
        Some(other) => {
            return Err(format!("未知命令: {}\n{}", other, USAGE).into());
        }
    }

    Ok(())
}
