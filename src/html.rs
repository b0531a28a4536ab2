use std::sync::OnceLock;

use maud::{DOCTYPE, Markup, html};
use numfmt::{Formatter, Precision};

use crate::endpoints;

/// The charting library, pinned to the version the chart options target.
const ECHARTS_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";
const HTMX_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/htmx.org@2.0.8/dist/htmx.min.js";
const HTMX_RESPONSE_TARGETS_SCRIPT: &str =
    "https://cdn.jsdelivr.net/npm/htmx-ext-response-targets@2.0.4/dist/response-targets.min.js";

/// Page specific elements added to the end of the `<head>` element.
pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Ledger Insights" }
                link href=(format!("{}/dashboard.css", endpoints::STATIC)) rel="stylesheet";

                script src=(HTMX_SCRIPT) {}
                script src=(HTMX_RESPONSE_TARGETS_SCRIPT) {}

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptLink(path) => script src=(path) {}
                    }
                }
            }

            body hx-ext="response-targets"
            {
                (content)

                // Alerts from failed htmx requests are swapped in here
                div
                    id="alert-container"
                    class="alert-container"
                {}
            }
        }
    }
}

/// The script element for the charting library used by the dashboard.
pub fn echarts_script() -> HeadElement {
    HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned())
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class="error-page"
        {
            h1 class="error-code" { (header) }

            p class="error-description" { (description) }

            p class="error-fix" { (fix) }

            a
                href=(endpoints::ROOT)
                class="error-home-link"
            {
                "Back to the Dashboard"
            }
        }
    );

    base(title, &[], &content)
}

/// Format `number` as rand with two decimal places, e.g. "R1,234.50".
pub fn format_currency(number: f64) -> String {
    let cents = (number.abs() * 100.0).round() as u64;
    // Amounts that round to zero are shown without a sign.
    let sign = if number < 0.0 && cents > 0 { "-" } else { "" };
    let rand = get_thousands_separator_formatter().fmt_string(cents / 100);

    format!("{sign}R{rand}.{:02}", cents % 100)
}

/// Format `count` with thousands separators, e.g. "12,345".
pub fn format_count(count: usize) -> String {
    get_thousands_separator_formatter().fmt_string(count)
}

fn get_thousands_separator_formatter() -> &'static Formatter {
    static FORMATTER: OnceLock<Formatter> = OnceLock::new();

    FORMATTER.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .unwrap()
            .precision(Precision::Decimals(0))
    })
}

#[cfg(test)]
mod tests {
    use maud::html;
    use rstest::rstest;
    use scraper::Html;

    use crate::test_utils::{assert_valid_html, html::select_all};

    use super::{base, echarts_script, error_view, format_count, format_currency};

    #[rstest]
    #[case(0.0, "R0.00")]
    #[case(12.3, "R12.30")]
    #[case(100.0, "R100.00")]
    #[case(1234.5, "R1,234.50")]
    #[case(1_000_000.0, "R1,000,000.00")]
    #[case(0.005, "R0.01")]
    #[case(-45.1, "-R45.10")]
    #[case(-0.001, "R0.00")]
    #[case(-0.005, "-R0.01")]
    fn formats_currency(#[case] amount: f64, #[case] want: &str) {
        assert_eq!(format_currency(amount), want);
    }

    #[rstest]
    #[case(0, "0")]
    #[case(999, "999")]
    #[case(1000, "1,000")]
    #[case(1_234_567, "1,234,567")]
    fn formats_counts(#[case] count: usize, #[case] want: &str) {
        assert_eq!(format_count(count), want);
    }

    #[test]
    fn base_page_loads_scripts_and_has_alert_container() {
        let page = base("Test", &[echarts_script()], &html!(p { "content" }));

        let html = Html::parse_document(&page.into_string());

        assert_valid_html(&html);
        let scripts: Vec<_> = select_all(&html, "head script")
            .into_iter()
            .filter_map(|script| script.value().attr("src"))
            .collect();
        assert!(scripts.iter().any(|src| src.contains("htmx.org")));
        assert!(scripts.iter().any(|src| src.contains("response-targets")));
        assert!(scripts.iter().any(|src| src.contains("echarts")));
        assert_eq!(select_all(&html, "#alert-container").len(), 1);
    }

    #[test]
    fn error_view_links_back_to_dashboard() {
        let page = error_view("Not Found", "404", "Page not found", "Check the URL");

        let html = Html::parse_document(&page.into_string());

        assert_valid_html(&html);
        let links = select_all(&html, "a.error-home-link");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].value().attr("href"), Some("/"));
    }
}
