#![cfg(target_arch = "wasm32")]

use journal_wasm::{
    details_url_for, feed_url_for, normalize_feed, start_timeline, JsBubbleRenderer, WidgetEvent,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen(inline_js = r#"
export function install_timeline_stub() {
  globalThis.__journalRenderers = [];
  globalThis.buildTimeline = (renderer) => {
    globalThis.__journalRenderers.push(renderer);
  };
}

export function built_count() {
  return globalThis.__journalRenderers.length;
}

export function built_details_url(index, className, id) {
  const event = { getClassName: () => className, getID: () => id };
  return globalThis.__journalRenderers[index].detailsUrl(event);
}

export function make_event(className, id) {
  return { getClassName: () => className, getID: () => id };
}
"#)]
extern "C" {
    fn install_timeline_stub();
    fn built_count() -> u32;
    fn built_details_url(index: u32, class_name: &str, id: JsValue) -> String;
    fn make_event(class_name: JsValue, id: JsValue) -> WidgetEvent;
}

fn config(base_url: &str, placeholder: Option<&str>) -> JsValue {
    let config = js_sys::Object::new();
    js_sys::Reflect::set(&config, &"baseUrl".into(), &base_url.into()).expect("set được");
    if let Some(placeholder) = placeholder {
        js_sys::Reflect::set(&config, &"placeholderHtml".into(), &placeholder.into())
            .expect("set được");
    }
    config.into()
}

#[wasm_bindgen_test]
fn details_url_accepts_numeric_and_text_ids() {
    assert_eq!(
        details_url_for("https://x/", "Post", JsValue::from_f64(42.0)).expect("url hợp lệ"),
        "https://x/details/Post/42/"
    );
    assert_eq!(
        details_url_for("https://x/", "Post", JsValue::from_str("42")).expect("url hợp lệ"),
        "https://x/details/Post/42/"
    );
}

#[wasm_bindgen_test]
fn missing_id_is_concatenated_like_javascript() {
    assert_eq!(
        details_url_for("https://x/", "Post", JsValue::UNDEFINED).expect("url hợp lệ"),
        "https://x/details/Post/undefined/"
    );
    assert_eq!(
        details_url_for("https://x/", "Post", JsValue::NULL).expect("url hợp lệ"),
        "https://x/details/Post/null/"
    );
}

#[wasm_bindgen_test]
fn renderer_reads_class_name_and_id_from_widget_event() {
    let renderer = JsBubbleRenderer::new(config("/journal", None)).expect("config hợp lệ");

    let event = make_event("BikeRide".into(), JsValue::from_f64(17.0));
    assert_eq!(renderer.details_url(&event), "/journal/details/BikeRide/17/");

    let event = make_event(JsValue::UNDEFINED, "9".into());
    assert_eq!(renderer.details_url(&event), "/journal/details/undefined/9/");
}

#[wasm_bindgen_test]
fn blank_base_url_is_rejected() {
    assert!(details_url_for("", "Post", JsValue::from_f64(1.0)).is_err());
    assert!(feed_url_for("/", "work").is_err());
    assert_eq!(feed_url_for("/", "life").expect("url hợp lệ"), "/timeline_json/life/");
}

#[wasm_bindgen_test]
fn start_fails_fast_without_base_url() {
    let config = js_sys::Object::new();
    assert!(start_timeline(config.into()).is_err());
}

#[wasm_bindgen_test]
fn renderer_requires_valid_config() {
    assert!(JsBubbleRenderer::new(config("   ", None)).is_err());
}

// Duy nhất test này cài loader của trang: trạng thái đó sống suốt module wasm.
#[wasm_bindgen_test]
fn second_start_reuses_installed_loader() {
    install_timeline_stub();

    start_timeline(config("https://first/", None)).expect("khởi động lần đầu");
    start_timeline(config("https://second/", None)).expect("khởi động lần hai");

    assert_eq!(built_count(), 2);
    for index in 0..2 {
        assert_eq!(
            built_details_url(index, "Post", JsValue::from_f64(42.0)),
            "https://first/details/Post/42/"
        );
    }
}

#[wasm_bindgen_test]
async fn failed_fill_writes_placeholder_into_element() {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .expect("có document");
    let element = document.create_element("div").expect("tạo được div");
    element.set_inner_html("<p>loading</p>");

    // Cổng 9 (discard) không có dịch vụ nên request thất bại.
    let renderer = JsBubbleRenderer::new(config("http://127.0.0.1:9/", Some("<em>n/a</em>")))
        .expect("config hợp lệ");
    let event = make_event("Post".into(), JsValue::from_f64(1.0));

    let result = JsFuture::from(renderer.fill_info_bubble(element.clone(), &event)).await;

    assert!(result.is_err());
    assert_eq!(element.inner_html(), "<em>n/a</em>");
}

#[wasm_bindgen_test]
fn normalize_feed_bookends_open_periods() {
    let feed = js_sys::JSON::parse(
        r#"{"events": [{"id": 4, "durationEvent": true, "title": "Childhood", "classname": "Period"}]}"#,
    )
    .expect("json hợp lệ");

    let normalized = normalize_feed(feed).expect("feed hợp lệ");
    let normalized: serde_json::Value =
        serde_wasm_bindgen::from_value(normalized).expect("deserialize được");

    assert_eq!(normalized["events"][0]["id"], "4");
    assert_eq!(normalized["events"][0]["start"], "1900-01-01");
    assert_eq!(normalized["events"][0]["end"], "2100-01-01");
    assert_eq!(normalized["dateTimeFormat"], "iso8601");
}
