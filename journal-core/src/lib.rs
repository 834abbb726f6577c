//! Logic lõi cho bubble chi tiết của timeline nhật ký.
//!
//! Crate này không phụ thuộc DOM: nội dung bubble được ghi qua trait
//! [`BubbleTarget`], dữ liệu tải qua [`DetailsFetcher`], còn widget timeline
//! chỉ nhìn thấy [`BubbleRenderer`].

mod bubble;
mod config;
mod event;
mod feed;
mod fetch;
mod urls;

pub use bubble::{
    escape_html, BubbleLoader, BubbleRenderer, BubbleTarget, DetailsFetcher, MemoryBubble,
};
pub use config::{ContentTrust, LoaderConfig, DEFAULT_PLACEHOLDER};
pub use event::{EventId, EventRef};
pub use feed::{FeedEvent, TimelineFeed, INDETERMINATE_TIME, YEAR_INFINITY, YEAR_ZERO};
pub use fetch::HttpFetcher;
pub use urls::{details_url, feed_url, LineType};

/// Lỗi cấu hình, phát hiện ngay lúc khởi động.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Thiếu base_url trong cấu hình")]
    MissingBaseUrl,
    #[error("base_url không hợp lệ: {0:?}")]
    InvalidBaseUrl(String),
    #[error("Loại timeline không hỗ trợ: {0}")]
    UnknownLineType(String),
}

/// Lỗi khi tải fragment HTML chi tiết.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Lỗi kết nối: {0}")]
    Transport(String),
    #[error("Máy chủ trả về mã trạng thái {0}")]
    Status(u16),
}

/// Lỗi khi điền nội dung bubble. Placeholder đã được ghi vào bubble trước khi
/// lỗi này được trả về.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BubbleError {
    #[error("Không tải được chi tiết từ {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
}

/// Lỗi khi đọc feed timeline.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Feed thiếu danh sách events")]
    MissingData,
    #[error("Không đọc được feed: {0}")]
    Parse(String),
}
