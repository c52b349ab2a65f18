use super::{hour_ticks, time_ticks, ScatterPlot};
use crate::model::CommitSummary;
use crate::page::CommitPage;
use crate::selection::{Rect, SelectionReport};
use crate::util::full_date;
use std::fmt::Write;

const STYLE: &str = "\
.dots circle { fill: steelblue; fill-opacity: 0.7; transition: fill-opacity 200ms; }
.dots circle:hover { fill-opacity: 1; }
.dots circle.selected { fill: #ff6b6b; }
.gridlines line { stroke: #ddd; stroke-opacity: 0.6; }
.axis line, .axis path { stroke: currentColor; }
.axis text { font: 10px sans-serif; fill: currentColor; }
.selection { fill: #777; fill-opacity: 0.15; stroke: #333; stroke-dasharray: 4 2; }
";

pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Standalone SVG document for the scatter plot. Selected marks carry the
/// `selected` class and each mark links to its commit with a hover title.
pub fn render_svg(
    plot: &ScatterPlot,
    commits: &[CommitSummary],
    report: Option<&SelectionReport>,
    rect: Option<&Rect>,
) -> String {
    let area = plot.area;
    let mut svg = String::new();

    // fmt::Write into a String cannot fail
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}" class="chart">"#,
        w = area.width,
        h = area.height
    );
    let _ = writeln!(svg, "<style>\n{STYLE}</style>");

    let y_ticks = hour_ticks(&plot.y, 12);
    let _ = writeln!(svg, r#"<g class="gridlines">"#);
    for tick in &y_ticks {
        let _ = writeln!(
            svg,
            r#"  <line x1="{:.2}" x2="{:.2}" y1="{y:.2}" y2="{y:.2}"/>"#,
            area.left(),
            area.right(),
            y = tick.position
        );
    }
    let _ = writeln!(svg, "</g>");

    let _ = writeln!(
        svg,
        r#"<g class="axis x-axis"><path d="M{:.2},{b:.2}H{:.2}"/>"#,
        area.left(),
        area.right(),
        b = area.bottom()
    );
    let x_count = ((area.usable_width() / 100.0).round() as usize).max(2);
    for tick in time_ticks(&plot.x, x_count) {
        let _ = writeln!(
            svg,
            r#"  <line x1="{x:.2}" x2="{x:.2}" y1="{b:.2}" y2="{:.2}"/><text x="{x:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
            area.bottom() + 6.0,
            area.bottom() + 18.0,
            escape(&tick.label),
            x = tick.position,
            b = area.bottom()
        );
    }
    let _ = writeln!(svg, "</g>");

    let _ = writeln!(
        svg,
        r#"<g class="axis y-axis"><path d="M{l:.2},{:.2}V{:.2}"/>"#,
        area.top(),
        area.bottom(),
        l = area.left()
    );
    for tick in &y_ticks {
        let _ = writeln!(
            svg,
            r#"  <line x1="{:.2}" x2="{l:.2}" y1="{y:.2}" y2="{y:.2}"/><text x="{:.2}" y="{y:.2}" dy="0.32em" text-anchor="end">{}</text>"#,
            area.left() - 6.0,
            area.left() - 9.0,
            tick.label,
            l = area.left(),
            y = tick.position
        );
    }
    let _ = writeln!(svg, "</g>");

    let _ = writeln!(svg, r#"<g class="dots">"#);
    for mark in plot.marks() {
        let Some(commit) = commits.get(mark.commit) else {
            continue;
        };
        let class = if report.map_or(false, |r| r.is_selected(mark.commit)) {
            r#" class="selected""#
        } else {
            ""
        };
        let _ = writeln!(
            svg,
            r#"  <a href="{url}"><circle cx="{:.2}" cy="{:.2}" r="{:.2}"{class} data-commit="{id}"><title>{id}&#10;{}&#10;{} lines by {}</title></circle></a>"#,
            mark.cx,
            mark.cy,
            mark.r,
            escape(&full_date(&commit.datetime)),
            commit.total_lines,
            escape(&commit.author),
            url = escape(&commit.url),
            id = escape(&commit.id),
        );
    }
    let _ = writeln!(svg, "</g>");

    if let Some(rect) = rect {
        let _ = writeln!(
            svg,
            r#"<rect class="selection" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/>"#,
            rect.x0,
            rect.y0,
            rect.x1 - rect.x0,
            rect.y1 - rect.y0
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// Full HTML report: dataset statistics, the chart, the selection count and
/// the per-type breakdown of the selection.
pub fn render_html_report(page: &CommitPage) -> String {
    let mut html = String::new();
    let _ = writeln!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>Meta: {}</title>\n<style>\n\
dl.stats {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(10em, 1fr)); }}\n\
dl.stats dt {{ grid-row: 1; font-size: 0.8em; text-transform: uppercase; color: #666; }}\n\
dl.stats dd {{ grid-row: 2; margin: 0; font-size: 1.6em; }}\n\
</style>\n</head>\n<body>",
        escape(page.source())
    );

    let _ = writeln!(html, "<h1>Meta</h1>\n<dl id=\"stats\" class=\"stats\">");
    for pair in page.stats().pairs() {
        let label = if pair.label == "Total LOC" {
            "Total <abbr title=\"Lines of code\">LOC</abbr>".to_string()
        } else {
            escape(&pair.label)
        };
        let _ = writeln!(html, "  <dt>{label}</dt><dd>{}</dd>", escape(&pair.value));
    }
    let _ = writeln!(html, "</dl>");

    let _ = writeln!(html, "<div id=\"chart\">");
    html.push_str(&render_svg(
        page.plot(),
        page.commits(),
        Some(page.report()),
        page.brush().rect().as_ref(),
    ));
    let _ = writeln!(html, "</div>");

    let report = page.report();
    let _ = writeln!(html, "<p id=\"selection-count\">{}</p>", escape(&report.label));
    let _ = writeln!(html, "<dl id=\"language-breakdown\" class=\"stats\">");
    for share in &report.types {
        let _ = writeln!(
            html,
            "  <dt>{}</dt><dd>{}</dd>",
            escape(&share.kind),
            escape(&share.display())
        );
    }
    if !report.selected.is_empty() {
        for pair in report.stats.pairs() {
            let _ = writeln!(
                html,
                "  <dt>{}</dt><dd>{}</dd>",
                escape(&pair.label),
                escape(&pair.value)
            );
        }
    }
    let _ = writeln!(html, "</dl>\n</body>\n</html>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commits::tests::record;
    use crate::dataset::Dataset;
    use crate::plot::{PlotArea, RadiusRange};

    fn page() -> CommitPage {
        let records = vec![
            record("a<1>", "x.js", 1, "js", 10, "2025-02-10T06:00:00Z"),
            record("b", "y.css", 1, "css", 30, "2025-02-12T18:00:00Z"),
        ];
        let dataset = Dataset::from_records("loc.csv".to_string(), records, "https://example.com/c/");
        CommitPage::new(dataset, PlotArea::new(800.0, 400.0), RadiusRange::default())
    }

    #[test]
    fn svg_has_one_circle_per_commit() {
        let page = page();
        let svg = render_svg(page.plot(), page.commits(), None, None);
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("a&lt;1&gt;"));
        assert!(svg.contains("href=\"https://example.com/c/b\""));
        assert!(svg.contains(">12:00<"));
        assert!(!svg.contains("class=\"selected\""));
        assert!(!svg.contains("class=\"selection\""));
    }

    #[test]
    fn selected_marks_are_flagged() {
        let mut page = page();
        page.select_rect(Some(Rect::from_array([0.0, 0.0, 800.0, 400.0])));
        let svg = render_svg(
            page.plot(),
            page.commits(),
            Some(page.report()),
            page.brush().rect().as_ref(),
        );
        assert_eq!(svg.matches("class=\"selected\"").count(), 2);
        assert!(svg.contains("class=\"selection\""));
    }

    #[test]
    fn empty_plot_still_has_axes() {
        let dataset = Dataset::from_records("empty".to_string(), Vec::new(), "");
        let page = CommitPage::new(dataset, PlotArea::new(800.0, 400.0), RadiusRange::default());
        let svg = render_svg(page.plot(), page.commits(), None, None);
        assert_eq!(svg.matches("<circle").count(), 0);
        assert!(svg.contains("y-axis"));
        let html = render_html_report(&page);
        assert!(html.contains("No commits selected"));
        assert!(html.contains("<dd>0</dd>"));
    }

    #[test]
    fn html_report_lists_stats_and_breakdown() {
        let mut page = page();
        page.select_rect(Some(Rect::from_array([0.0, 0.0, 800.0, 400.0])));
        let html = render_html_report(&page);
        assert!(html.contains("Total <abbr title=\"Lines of code\">LOC</abbr>"));
        assert!(html.contains("2 commits selected"));
        assert!(html.contains("<dt>css</dt><dd>1 lines (50%)</dd>"));
    }
}
