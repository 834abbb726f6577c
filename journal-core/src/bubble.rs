use std::cell::RefCell;
use std::future::Future;

use crate::{details_url, BubbleError, ContentTrust, EventRef, FetchError, LoaderConfig};

/// Nơi nhận nội dung bubble (phần tử DOM, bộ nhớ...).
pub trait BubbleTarget {
    /// Thay toàn bộ nội dung bên trong bằng `html`.
    fn replace_content(&self, html: &str);
}

/// Nguồn tải fragment HTML chi tiết.
pub trait DetailsFetcher {
    fn fetch_html(&self, url: &str) -> impl Future<Output = Result<String, FetchError>>;
}

/// Khả năng duy nhất widget timeline cần: điền nội dung cho một bubble.
pub trait BubbleRenderer {
    fn render_bubble<T: BubbleTarget>(
        &self,
        target: &T,
        event: &EventRef,
    ) -> impl Future<Output = Result<(), BubbleError>>;
}

/// Bubble trong bộ nhớ, dùng cho CLI và kiểm thử.
#[derive(Debug, Default)]
pub struct MemoryBubble {
    content: RefCell<String>,
}

impl MemoryBubble {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(html: impl Into<String>) -> Self {
        Self {
            content: RefCell::new(html.into()),
        }
    }

    pub fn content(&self) -> String {
        self.content.borrow().clone()
    }
}

impl BubbleTarget for MemoryBubble {
    fn replace_content(&self, html: &str) {
        *self.content.borrow_mut() = html.to_string();
    }
}

/// Loader tải chi tiết sự kiện rồi ghi vào bubble.
///
/// Không có trạng thái chia sẻ giữa các lần gọi: mỗi lần gọi chỉ ghi vào
/// đúng `target` được truyền vào, sau khi request của chính nó hoàn tất.
#[derive(Debug, Clone)]
pub struct BubbleLoader<F> {
    config: LoaderConfig,
    fetcher: F,
}

impl<F: DetailsFetcher> BubbleLoader<F> {
    pub fn new(config: LoaderConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn details_url(&self, event: &EventRef) -> String {
        details_url(&self.config, event)
    }

    /// Tải chi tiết của `event` và ghi vào `target`.
    ///
    /// Thất bại thì ghi placeholder, log cảnh báo và trả lỗi cho caller.
    pub async fn fill_bubble<T: BubbleTarget>(
        &self,
        target: &T,
        event: &EventRef,
    ) -> Result<(), BubbleError> {
        let url = self.details_url(event);
        log::debug!("Tải chi tiết bubble cho {event} từ {url}");

        match self.fetcher.fetch_html(&url).await {
            Ok(body) => {
                let html = match self.config.trust() {
                    ContentTrust::Trusted => body,
                    ContentTrust::PlainText => escape_html(&body),
                };
                target.replace_content(&html);
                Ok(())
            }
            Err(source) => {
                log::warn!("Không tải được chi tiết cho {event}: {source}");
                target.replace_content(self.config.placeholder_html());
                Err(BubbleError::Fetch { url, source })
            }
        }
    }
}

impl<F: DetailsFetcher> BubbleRenderer for BubbleLoader<F> {
    async fn render_bubble<T: BubbleTarget>(
        &self,
        target: &T,
        event: &EventRef,
    ) -> Result<(), BubbleError> {
        self.fill_bubble(target, event).await
    }
}

/// Escape các ký tự đặc biệt của HTML.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
