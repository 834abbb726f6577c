#![cfg(not(target_arch = "wasm32"))]

use journal_core::{
    BubbleLoader, DetailsFetcher, EventRef, FetchError, HttpFetcher, LoaderConfig, MemoryBubble,
    DEFAULT_PLACEHOLDER,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Máy chủ một lần: trả `response` cho kết nối đầu tiên và trả lại request nhận được.
async fn serve_once(response: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Không bind được cổng");
    let addr = listener.local_addr().expect("Không có địa chỉ");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("Không accept được");
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let read = socket.read(&mut buf).await.expect("Không đọc được request");
            if read == 0 {
                break;
            }
            request.extend_from_slice(&buf[..read]);
        }
        socket
            .write_all(response.as_bytes())
            .await
            .expect("Không ghi được response");
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&request).into_owned()
    });

    (format!("http://{addr}/"), handle)
}

#[tokio::test]
async fn fetches_html_fragment() {
    let (base, server) = serve_once(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 9\r\nConnection: close\r\n\r\n<p>hi</p>",
    )
    .await;

    let loader = BubbleLoader::new(
        LoaderConfig::new(base).expect("config hợp lệ"),
        HttpFetcher::new(),
    );
    let bubble = MemoryBubble::new();

    loader
        .fill_bubble(&bubble, &EventRef::new("Post", 42u64))
        .await
        .expect("tải thành công");

    assert_eq!(bubble.content(), "<p>hi</p>");

    let request = server.await.expect("server lỗi").to_lowercase();
    assert!(request.starts_with("get /details/post/42/ http/1.1"));
    assert!(request.contains("accept: text/html"));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let (base, server) = serve_once(
        "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
    )
    .await;

    let result = HttpFetcher::new()
        .fetch_html(&format!("{base}details/Post/404/"))
        .await;

    assert_eq!(result, Err(FetchError::Status(404)));
    server.await.expect("server lỗi");
}

#[tokio::test]
async fn unreachable_server_renders_placeholder() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Không bind được cổng");
    let addr = listener.local_addr().expect("Không có địa chỉ");
    drop(listener);

    let loader = BubbleLoader::new(
        LoaderConfig::new(format!("http://{addr}/")).expect("config hợp lệ"),
        HttpFetcher::new(),
    );
    let bubble = MemoryBubble::with_content("<p>old</p>");

    let result = loader
        .fill_bubble(&bubble, &EventRef::new("Post", 1u64))
        .await;

    assert!(matches!(
        result,
        Err(journal_core::BubbleError::Fetch {
            source: FetchError::Transport(_),
            ..
        })
    ));
    assert_eq!(bubble.content(), DEFAULT_PLACEHOLDER);
}
