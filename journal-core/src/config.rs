use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Nội dung hiển thị khi không tải được chi tiết.
pub const DEFAULT_PLACEHOLDER: &str = r#"<p class="bubble-unavailable">Details unavailable</p>"#;

/// Mức tin cậy với HTML do endpoint chi tiết trả về.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContentTrust {
    /// Chèn nguyên văn, endpoint cùng ứng dụng sinh ra fragment.
    #[default]
    Trusted,
    /// Escape toàn bộ trước khi chèn.
    PlainText,
}

/// Cấu hình của loader, truyền vào tường minh lúc khởi tạo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoaderConfig {
    #[serde(default)]
    base_url: String,
    #[serde(default = "default_placeholder")]
    placeholder_html: String,
    #[serde(default)]
    trust: ContentTrust,
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

impl LoaderConfig {
    /// Kiểm tra và chuẩn hoá `base_url` (luôn kết thúc bằng `/`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(base_url.into())?;
        Ok(Self {
            base_url,
            placeholder_html: default_placeholder(),
            trust: ContentTrust::default(),
        })
    }

    pub fn with_placeholder(mut self, html: impl Into<String>) -> Self {
        self.placeholder_html = html.into();
        self
    }

    pub fn with_trust(mut self, trust: ContentTrust) -> Self {
        self.trust = trust;
        self
    }

    /// Chạy lại bước kiểm tra cho cấu hình đọc qua serde.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(self.base_url)?;
        Ok(Self { base_url, ..self })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn placeholder_html(&self) -> &str {
        &self.placeholder_html
    }

    pub fn trust(&self) -> ContentTrust {
        self.trust
    }
}

fn normalize_base_url(raw: String) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }
    if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ConfigError::InvalidBaseUrl(raw));
    }

    let mut base = trimmed.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Ok(base)
}
