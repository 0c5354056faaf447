pub mod client;
pub mod config;
pub mod models;
pub mod service;
pub mod view;

pub use client::{ApiClient, ApiError, ReconcileApi};
pub use config::AppConfig;
pub use models::{Contract, ContractStatus, DocumentClass, Invoice, UploadFile, UploadOutcome};
pub use service::{ReconcileView, UploadCoordinator};
