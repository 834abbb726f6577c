//! Cầu nối WASM <-> widget timeline trong trình duyệt.
//!
//! Widget không bị vá prototype: trang nhận một `BubbleRenderer` qua
//! `buildTimeline(renderer)` và gọi `renderer.fillInfoBubble(element, event)`
//! khi cần nội dung bubble.

use std::cell::OnceCell;
use std::rc::Rc;

use journal_core::{
    details_url, feed_url, BubbleLoader, BubbleTarget, ConfigError, EventId, EventRef,
    HttpFetcher, LineType, LoaderConfig,
};
use js_sys::Promise;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::future_to_promise;
use web_sys::Element;

type PageLoader = BubbleLoader<HttpFetcher>;

thread_local! {
    static PAGE_LOADER: OnceCell<Rc<PageLoader>> = const { OnceCell::new() };
}

#[wasm_bindgen]
extern "C" {
    /// Sự kiện do widget timeline sở hữu; loader chỉ đọc class name và ID.
    pub type WidgetEvent;

    #[wasm_bindgen(method, js_name = getClassName)]
    fn get_class_name(this: &WidgetEvent) -> JsValue;

    #[wasm_bindgen(method, js_name = getID)]
    fn get_id(this: &WidgetEvent) -> JsValue;

    #[wasm_bindgen(catch, js_name = buildTimeline)]
    fn build_timeline(renderer: JsValue) -> Result<(), JsValue>;
}

/// Bubble là một phần tử DOM của widget.
struct ElementBubble(Element);

impl BubbleTarget for ElementBubble {
    fn replace_content(&self, html: &str) {
        self.0.set_inner_html(html);
    }
}

/// Renderer truyền cho widget timeline.
#[wasm_bindgen(js_name = BubbleRenderer)]
pub struct JsBubbleRenderer {
    loader: Rc<PageLoader>,
}

#[wasm_bindgen(js_class = BubbleRenderer)]
impl JsBubbleRenderer {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsBubbleRenderer, JsValue> {
        let config = read_config(config)?;
        Ok(Self {
            loader: Rc::new(BubbleLoader::new(config, HttpFetcher::new())),
        })
    }

    /// Điền nội dung bubble. Promise resolve khi đã chèn chi tiết, reject
    /// (sau khi đã chèn placeholder) khi tải thất bại.
    #[wasm_bindgen(js_name = fillInfoBubble)]
    pub fn fill_info_bubble(&self, element: Element, event: &WidgetEvent) -> Promise {
        let loader = Rc::clone(&self.loader);
        let event = event_ref(event);

        future_to_promise(async move {
            let bubble = ElementBubble(element);
            loader
                .fill_bubble(&bubble, &event)
                .await
                .map(|()| JsValue::UNDEFINED)
                .map_err(|err| JsValue::from_str(&err.to_string()))
        })
    }

    #[wasm_bindgen(js_name = detailsUrl)]
    pub fn details_url(&self, event: &WidgetEvent) -> String {
        self.loader.details_url(&event_ref(event))
    }
}

/// Khởi tạo khi document sẵn sàng: cài loader một lần rồi dựng timeline.
#[wasm_bindgen(js_name = startTimeline)]
pub fn start_timeline(config: JsValue) -> Result<(), JsValue> {
    init_runtime();
    let config = read_config(config)?;

    let mut installed_now = false;
    let loader = PAGE_LOADER.with(|cell| {
        Rc::clone(cell.get_or_init(|| {
            installed_now = true;
            Rc::new(BubbleLoader::new(config, HttpFetcher::new()))
        }))
    });
    if !installed_now {
        log::warn!("Bubble loader đã được cài, dùng lại cấu hình cũ");
    }

    log::info!("Dựng timeline với base_url {}", loader.config().base_url());
    build_timeline(JsBubbleRenderer { loader }.into())
}

#[wasm_bindgen(js_name = detailsUrl)]
pub fn details_url_for(base_url: &str, class_name: &str, id: JsValue) -> Result<String, JsValue> {
    let config = LoaderConfig::new(base_url).map_err(config_error)?;
    Ok(details_url(
        &config,
        &EventRef::new(class_name, event_id_from_js(&id)),
    ))
}

#[wasm_bindgen(js_name = feedUrl)]
pub fn feed_url_for(base_url: &str, line_type: &str) -> Result<String, JsValue> {
    let config = LoaderConfig::new(base_url).map_err(config_error)?;
    let line_type: LineType = line_type.parse().map_err(config_error)?;
    Ok(feed_url(&config, line_type))
}

/// Chuẩn hoá feed JSON trước khi đưa cho widget.
#[wasm_bindgen(js_name = normalizeFeed)]
pub fn normalize_feed(feed: JsValue) -> Result<JsValue, JsValue> {
    init_runtime();

    let feed_value = from_value::<serde_json::Value>(feed)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được feed: {err}")))?;

    let feed = journal_feed::parse_feed_value(&feed_value)
        .map_err(|err| JsValue::from_str(&format!("Feed error: {err}")))?;

    to_value(&feed).map_err(|err| JsValue::from_str(&format!("Không serialize feed: {err}")))
}

fn init_runtime() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static LOGGER: Once = Once::new();

        console_error_panic_hook::set_once();
        LOGGER.call_once(|| wasm_logger::init(wasm_logger::Config::new(log::Level::Info)));
    }
}

fn read_config(config: JsValue) -> Result<LoaderConfig, JsValue> {
    let config: LoaderConfig = from_value(config)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
    config.validated().map_err(config_error)
}

fn config_error(err: ConfigError) -> JsValue {
    JsValue::from_str(&format!("Config error: {err}"))
}

fn event_ref(event: &WidgetEvent) -> EventRef {
    EventRef::new(
        js_text(&event.get_class_name()),
        event_id_from_js(&event.get_id()),
    )
}

fn event_id_from_js(id: &JsValue) -> EventId {
    match id.as_f64() {
        Some(number) => EventId::Number(number),
        None => EventId::Text(js_text(id)),
    }
}

/// Chuỗi hoá như phép nối chuỗi của JS: `undefined`, `null` giữ nguyên tên.
fn js_text(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if value.is_undefined() {
        return "undefined".to_string();
    }
    if value.is_null() {
        return "null".to_string();
    }
    value.unchecked_ref::<js_sys::Object>().to_string().into()
}
