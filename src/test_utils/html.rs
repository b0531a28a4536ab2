use axum::{body::Body, response::Response};
use scraper::{ElementRef, Html, Selector};

pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    Html::parse_document(&body_text(response).await)
}

pub(crate) async fn parse_html_fragment(response: Response<Body>) -> Html {
    Html::parse_fragment(&body_text(response).await)
}

async fn body_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not get response body");

    String::from_utf8_lossy(&body).to_string()
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}

/// Select every element matching the CSS `selector`.
pub(crate) fn select_all<'a>(html: &'a Html, selector: &str) -> Vec<ElementRef<'a>> {
    let selector = Selector::parse(selector).expect("Invalid CSS selector");
    html.select(&selector).collect()
}

/// The text content of every `<option>` in the `<select>` with `select_id`.
pub(crate) fn option_labels(html: &Html, select_id: &str) -> Vec<String> {
    select_all(html, &format!("select#{select_id} option"))
        .into_iter()
        .map(|option| option.text().collect::<String>().trim().to_owned())
        .collect()
}

/// The `value` of every selected `<option>` in the `<select>` with `select_id`.
pub(crate) fn selected_values(html: &Html, select_id: &str) -> Vec<String> {
    select_all(html, &format!("select#{select_id} option[selected]"))
        .into_iter()
        .filter_map(|option| option.value().attr("value").map(str::to_owned))
        .collect()
}
