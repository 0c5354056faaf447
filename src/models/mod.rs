pub mod contract;
pub mod invoice;
pub mod upload;

pub use contract::{Contract, ContractStatus};
pub use invoice::Invoice;
pub use upload::{accepted_mime, DocumentClass, UploadAck, UploadFile, UploadOutcome};
