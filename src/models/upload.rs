use serde::{Deserialize, Serialize};

/// 上传单据类型, 决定提交到哪个服务端入口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentClass {
    Contract,
    Invoice,
}

impl DocumentClass {
    /// 上传接口路径段: /upload/{segment}
    pub fn endpoint_segment(&self) -> &'static str {
        match self {
            DocumentClass::Contract => "contract",
            DocumentClass::Invoice => "invoice",
        }
    }

    /// 用户可见名称
    pub fn label(&self) -> &'static str {
        match self {
            DocumentClass::Contract => "合同",
            DocumentClass::Invoice => "发票",
        }
    }
}

/// 待上传的单个文件 (文件名 + 内容)
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// 按扩展名判定可接受的媒体类型 (PDF / PNG / JPEG), 返回对应 MIME
pub fn accepted_mime(filename: &str) -> Option<&'static str> {
    let (_, ext) = filename.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "pdf" => Some("application/pdf"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        _ => None,
    }
}

/// 上传成功的服务端确认 (忽略 OCR 附带字段)
#[derive(Debug, Clone, Deserialize)]
pub struct UploadAck {
    #[serde(default)]
    pub message: Option<String>,
}

/// 一次 submit 调用的结果, 供界面提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// 上传成功, 已触发合同列表刷新
    Completed {
        kind: DocumentClass,
        message: String,
    },
    /// 输入校验不通过, 未发出请求
    Rejected { reason: String },
    /// 请求已发出但失败 (服务端 detail 或通用网络错误)
    Failed { reason: String },
    /// 已有上传进行中, 本次为空操作
    InFlight,
    /// 未选择文件, 空操作
    NoFile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_pdf_and_images_case_insensitive() {
        assert_eq!(accepted_mime("contract.pdf"), Some("application/pdf"));
        assert_eq!(accepted_mime("scan.PNG"), Some("image/png"));
        assert_eq!(accepted_mime("photo.jpg"), Some("image/jpeg"));
        assert_eq!(accepted_mime("photo.JPEG"), Some("image/jpeg"));
    }

    #[test]
    fn rejects_other_types() {
        assert_eq!(accepted_mime("notes.txt"), None);
        assert_eq!(accepted_mime("archive.tar.gz"), None);
        assert_eq!(accepted_mime("no_extension"), None);
    }

    #[test]
    fn endpoint_segments_match_service_paths() {
        assert_eq!(DocumentClass::Contract.endpoint_segment(), "contract");
        assert_eq!(DocumentClass::Invoice.endpoint_segment(), "invoice");
    }
}
