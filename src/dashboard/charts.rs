//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations of the filtered transactions:
//! - **Merchant Distribution**: pie chart of transaction counts per merchant
//! - **Amount Spent at Each Merchant**: one stacked bar segment per transaction
//! - **Transaction Trends Over Time**: monthly transaction counts
//! - **Transaction Amount Distribution**: histogram of transaction amounts
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with a container and inline initialization script. The script is
//! part of the same fragment so the charts redraw when htmx swaps it in.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus, Tooltip,
        Trigger,
    },
    series::{Line, Pie, bar},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    Error,
    dashboard::{
        aggregation::{
            Histogram, MerchantAmount, MerchantCount, MonthlyCount, stack_amounts_by_merchant,
        },
        model::DashboardModel,
    },
};

/// The axis label for amounts. Amounts are in South African rand.
const AMOUNT_AXIS_NAME: &str = "Amount (ZAR)";
const AMOUNT_LABEL_FORMAT: &str = "R {value}";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Creates the four dashboard charts for `model`.
///
/// # Errors
/// Returns [Error::ChartSerialization] if a chart's options cannot be
/// serialized to JSON.
pub(super) fn build_dashboard_charts(model: &DashboardModel) -> Result<[DashboardChart; 4], Error> {
    Ok([
        DashboardChart {
            id: "merchant-pie-chart",
            options: chart_options(&merchant_pie_chart(&model.merchant_distribution))?,
        },
        DashboardChart {
            id: "amount-bar-chart",
            options: chart_options(&amount_bar_chart(&model.amount_by_merchant))?,
        },
        DashboardChart {
            id: "transaction-line-chart",
            options: chart_options(&transaction_line_chart(&model.monthly_trend))?,
        },
        DashboardChart {
            id: "transaction-amount-histogram",
            options: chart_options(&amount_histogram_chart(&model.histogram))?,
        },
    ])
}

fn chart_options(chart: &Chart) -> Result<String, Error> {
    let json = serde_json::to_string(chart)
        .map_err(|error| Error::ChartSerialization(error.to_string()))?;

    // Merchant names end up inside a <script> element.
    Ok(json.replace("</", "<\\/"))
}

/// Renders the chart containers followed by the script that draws them.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="chart-grid"
        {
            @for chart in charts {
                div
                    id=(chart.id)
                    class="chart-panel"
                {}
            }
        }

        script { (charts_script(charts)) }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Each chart is initialised on its container and resized with the window.
fn charts_script(charts: &[DashboardChart]) -> PreEscaped<String> {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', () => chart.resize());
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    PreEscaped(script_content)
}

pub(super) fn merchant_pie_chart(distribution: &[MerchantCount]) -> Chart {
    let data: Vec<(f64, &str)> = distribution
        .iter()
        .map(|entry| (entry.count as f64, entry.merchant.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text("Merchant Distribution"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().top("bottom"))
        .series(
            Pie::new()
                .name("Transactions")
                .radius(vec!["35%", "65%"])
                .data(data),
        )
}

pub(super) fn amount_bar_chart(amounts: &[MerchantAmount]) -> Chart {
    let (merchants, series_data) = stack_amounts_by_merchant(amounts);

    let mut chart = Chart::new()
        .title(Title::new().text("Amount Spent at Each Merchant"))
        .tooltip(axis_tooltip())
        .grid(default_grid())
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name("Merchant")
                .data(merchants),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name(AMOUNT_AXIS_NAME)
                .axis_label(AxisLabel::new().formatter(AMOUNT_LABEL_FORMAT)),
        );

    for data in series_data {
        chart = chart.series(
            bar::Bar::new()
                .name("Transaction")
                .stack("Amount")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(data),
        );
    }

    chart
}

pub(super) fn transaction_line_chart(trend: &[MonthlyCount]) -> Chart {
    let labels: Vec<String> = trend.iter().map(|entry| entry.month.to_string()).collect();
    let counts: Vec<f64> = trend.iter().map(|entry| entry.count as f64).collect();

    // ECharts draws open circle markers for line charts by default.
    Chart::new()
        .title(Title::new().text("Transaction Trends Over Time"))
        .tooltip(axis_tooltip())
        .grid(default_grid())
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name("Date")
                .data(labels),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name("Transaction Count"),
        )
        .series(Line::new().name("Transactions").data(counts))
}

pub(super) fn amount_histogram_chart(histogram: &Histogram) -> Chart {
    let labels: Vec<String> = histogram
        .edges
        .windows(2)
        .map(|edges| format!("{:.2} - {:.2}", edges[0], edges[1]))
        .collect();
    let counts: Vec<f64> = histogram.counts.iter().map(|&count| count as f64).collect();

    Chart::new()
        .title(Title::new().text("Transaction Amount Distribution"))
        .tooltip(axis_tooltip())
        .grid(default_grid())
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name(AMOUNT_AXIS_NAME)
                .data(labels),
        )
        .y_axis(Axis::new().type_(AxisType::Value).name("Frequency"))
        .series(bar::Bar::new().name("Frequency").data(counts))
}

fn default_grid() -> Grid {
    Grid::new()
        .left("3%")
        .right("8%")
        .bottom("3%")
        .contain_label(true)
}

fn axis_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use crate::{
        dashboard::{aggregation::MerchantCount, model::on_selection_changed},
        filter::{Selection, Selector},
        test_utils::ledger::scenario_ledger,
    };

    use super::{
        DashboardChart, build_dashboard_charts, chart_options, charts_view, merchant_pie_chart,
    };

    fn parse(chart: &DashboardChart) -> Value {
        serde_json::from_str(&chart.options.replace("<\\/", "</")).unwrap()
    }

    #[test]
    fn builds_four_charts_with_distinct_ids() {
        let model = on_selection_changed(&scenario_ledger(), &Selection::all());

        let charts = build_dashboard_charts(&model).unwrap();

        let ids: Vec<_> = charts.iter().map(|chart| chart.id).collect();
        assert_eq!(
            ids,
            vec![
                "merchant-pie-chart",
                "amount-bar-chart",
                "transaction-line-chart",
                "transaction-amount-histogram"
            ]
        );
    }

    #[test]
    fn chart_options_are_json() {
        let model = on_selection_changed(&scenario_ledger(), &Selection::all());

        for chart in build_dashboard_charts(&model).unwrap() {
            let options = parse(&chart);
            assert!(options.is_object(), "{} options should be an object", chart.id);
        }
    }

    #[test]
    fn line_chart_shows_monthly_counts() {
        let selection = Selection {
            merchant: Selector::Only("M1".to_owned()),
            ..Selection::all()
        };
        let model = on_selection_changed(&scenario_ledger(), &selection);

        let charts = build_dashboard_charts(&model).unwrap();
        let line = &charts[2];

        assert!(line.options.contains("Transaction Trends Over Time"));
        assert!(line.options.contains("\"2023-01\""));
        assert!(line.options.contains("\"2023-02\""));
        assert_eq!(parse(line)["series"][0]["data"], serde_json::json!([1.0, 1.0]));
    }

    #[test]
    fn bar_chart_has_one_series_per_stack_level() {
        let model = on_selection_changed(&scenario_ledger(), &Selection::all());

        let charts = build_dashboard_charts(&model).unwrap();
        let bar = parse(&charts[1]);

        // M1 has two transactions, so its column is two segments high.
        assert_eq!(bar["series"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn empty_model_still_renders_charts() {
        let selection = Selection {
            customer_id: Selector::Only("nobody".to_owned()),
            ..Selection::all()
        };
        let model = on_selection_changed(&scenario_ledger(), &selection);

        let charts = build_dashboard_charts(&model).unwrap();

        assert_eq!(charts.len(), 4);
    }

    #[test]
    fn merchant_names_cannot_close_the_script_element() {
        let chart = merchant_pie_chart(&[MerchantCount {
            merchant: "</script><script>alert(1)</script>".to_owned(),
            count: 1,
        }]);

        let options = chart_options(&chart).unwrap();

        assert!(!options.contains("</script>"));
        let markup = charts_view(&[DashboardChart {
            id: "test-chart",
            options,
        }])
        .into_string();
        assert_eq!(markup.matches("</script>").count(), 1);
    }
}
