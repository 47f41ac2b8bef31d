//! Export of the dashboard as a static SVG or PNG image.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::aggregation::{CategoryTotal, DashboardView, IssueGroup, MonthTotal};
use crate::config::{DASHBOARD_TITLE, FOOTER_TEXT};

use super::format::{format_compact, format_number, truncate_label};
use super::layout::{layout_issue_tree, pie_slices, polar_point, slice_share, Area, Insets};


// Dark theme
const BG: &str = "#1E1E24";
const PANEL_BG: &str = "#2A2A32";
const TEXT: &str = "#F5F5F7";
const TEXT_SECONDARY: &str = "#B4B4BE";
const GRID: &str = "#44444E";
const ERROR: &str = "#EF553B";

/// Series colors, reused cyclically.
const PALETTE: [&str; 8] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
];

// Page geometry
const WIDTH: f64 = 1400.0;
const HEIGHT: f64 = 1040.0;
const MARGIN: f64 = 20.0;
const KPI_TOP: f64 = 80.0;
const KPI_HEIGHT: f64 = 90.0;
const CHART_TOP: f64 = 190.0;
const CHART_HEIGHT: f64 = 400.0;
const PANEL_TITLE_HEIGHT: f64 = 36.0;


/// Write the dashboard as SVG.
pub fn export_dashboard_svg(view: &DashboardView, output_path: &Path) -> Result<()> {
    let svg_content = generate_svg(view);

    std::fs::write(output_path, svg_content)
        .with_context(|| format!("Failed to write SVG to {}", output_path.display()))?;

    Ok(())
}


/// Write the dashboard as PNG by rasterising the SVG.
pub fn export_dashboard_png(view: &DashboardView, output_path: &Path) -> Result<()> {
    let svg_content = generate_svg(view);

    let mut options = resvg::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = resvg::usvg::Tree::from_str(&svg_content, &options)
        .context("Failed to parse SVG")?;

    let size = tree.size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width() as u32, size.height() as u32)
        .context("Failed to create pixmap")?;

    pixmap.fill(background_color(BG));

    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    pixmap
        .save_png(output_path)
        .with_context(|| format!("Failed to save PNG to {}", output_path.display()))?;

    Ok(())
}


/// Generate the SVG document for a view.
pub fn generate_svg(view: &DashboardView) -> String {
    let mut svg = vec![
        format!(
            r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">"#,
            w = WIDTH,
            h = HEIGHT
        ),
        "<style>".to_string(),
        format!("  .title {{ fill: {TEXT}; font: bold 26px sans-serif; }}"),
        format!("  .panel-title {{ fill: {TEXT}; font: bold 15px sans-serif; }}"),
        format!("  .label {{ fill: {TEXT_SECONDARY}; font: 12px sans-serif; }}"),
        format!("  .value {{ fill: {TEXT}; font: bold 30px sans-serif; }}"),
        format!("  .leaf {{ fill: {BG}; font: 11px sans-serif; }}"),
        format!("  .footer {{ fill: {TEXT_SECONDARY}; font: italic 13px sans-serif; }}"),
        "</style>".to_string(),
        format!(r#"<rect width="{WIDTH}" height="{HEIGHT}" fill="{BG}"/>"#),
        format!(
            r#"<text x="{}" y="48" class="title">{}</text>"#,
            MARGIN,
            escape_xml(DASHBOARD_TITLE)
        ),
    ];

    svg.extend(kpi_cards(view));

    let panel_width = (WIDTH - 3.0 * MARGIN) / 2.0;
    let left = MARGIN;
    let right = 2.0 * MARGIN + panel_width;
    let second_row = CHART_TOP + CHART_HEIGHT + MARGIN;

    let panels = [
        (Area::new(left, CHART_TOP, panel_width, CHART_HEIGHT), "Number of Complaints by Product"),
        (Area::new(right, CHART_TOP, panel_width, CHART_HEIGHT), "Number of Complaints Over Time (Month Year)"),
        (Area::new(left, second_row, panel_width, CHART_HEIGHT), "Number of Complaints by Submitted Via Channel"),
        (Area::new(right, second_row, panel_width, CHART_HEIGHT), "Number of Complaints by Issue and Sub-Issue"),
    ];
    for (area, title) in &panels {
        svg.push(panel(*area, title));
    }

    let plot = |area: &Area| {
        area.inset(Insets {
            top: PANEL_TITLE_HEIGHT,
            right: 16.0,
            bottom: 16.0,
            left: 16.0,
        })
    };

    svg.extend(product_bars(&view.charts.by_product, plot(&panels[0].0)));
    svg.extend(month_line(&view.charts.by_month, plot(&panels[1].0)));
    svg.extend(channel_pie(&view.charts.by_channel, plot(&panels[2].0)));
    svg.extend(issue_treemap(&view.charts.by_issue, plot(&panels[3].0)));

    svg.push(format!(
        r#"<text x="{}" y="{}" class="footer">{}</text>"#,
        MARGIN,
        HEIGHT - 14.0,
        escape_xml(FOOTER_TEXT)
    ));
    svg.push("</svg>".to_string());

    svg.join("\n")
}


/// Four metric cards plus the card naming the state selection.
fn kpi_cards(view: &DashboardView) -> Vec<String> {
    let kpis = &view.kpis;
    let timely = kpis.timely_percentage();

    let cards: [(&str, String, &str); 5] = [
        ("Total Complaints", format_number(kpis.total), TEXT),
        ("Closed Complaints", format_number(kpis.closed), TEXT),
        (
            "% Timely Responded Complaints",
            timely.as_ref().map(|p| format!("{p:.2}%")).unwrap_or_else(|_| "n/a".to_string()),
            if timely.is_ok() { TEXT } else { ERROR },
        ),
        ("In Progress Complaints", format_number(kpis.in_progress), TEXT),
        ("State Filter", view.selection.label().to_string(), PALETTE[0]),
    ];

    let card_width = (WIDTH - 6.0 * MARGIN) / 5.0;
    let mut parts = Vec::new();

    for (i, (title, value, color)) in cards.iter().enumerate() {
        let x = MARGIN + i as f64 * (card_width + MARGIN);
        parts.push(format!(
            r#"<rect x="{x}" y="{KPI_TOP}" width="{card_width}" height="{KPI_HEIGHT}" rx="8" fill="{PANEL_BG}"/>"#
        ));
        parts.push(format!(
            r#"<text x="{}" y="{}" class="label">{}</text>"#,
            x + 14.0,
            KPI_TOP + 24.0,
            escape_xml(title)
        ));
        parts.push(format!(
            r#"<text x="{}" y="{}" class="value" style="fill: {}">{}</text>"#,
            x + 14.0,
            KPI_TOP + 66.0,
            color,
            escape_xml(&truncate_label(value, 16))
        ));
    }

    if timely.is_err() {
        parts.push(format!(
            r#"<text x="{}" y="{}" class="label" style="fill: {ERROR}">no complaints in selection</text>"#,
            MARGIN + 2.0 * (card_width + MARGIN) + 14.0,
            KPI_TOP + KPI_HEIGHT - 6.0,
        ));
    }

    parts
}


fn panel(area: Area, title: &str) -> String {
    format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="8" fill="{PANEL_BG}"/><text x="{}" y="{}" class="panel-title">{}</text>"#,
        area.x,
        area.y,
        area.width,
        area.height,
        area.x + 16.0,
        area.y + 24.0,
        escape_xml(title)
    )
}


fn empty_message(area: Area, message: &str) -> Vec<String> {
    vec![format!(
        r#"<text x="{}" y="{}" class="label" text-anchor="middle">{}</text>"#,
        area.x + area.width / 2.0,
        area.y + area.height / 2.0,
        escape_xml(message)
    )]
}


/// Horizontal bar chart.
fn product_bars(totals: &[CategoryTotal], area: Area) -> Vec<String> {
    if totals.is_empty() {
        return empty_message(area, "No product data");
    }

    let label_width = 190.0;
    let value_width = 60.0;
    let max_count = totals.iter().map(|t| t.count).max().unwrap_or(0).max(1) as f64;
    let slot = area.height / totals.len() as f64;
    let bar_height = (slot * 0.7).min(26.0);
    let track = area.width - label_width - value_width;

    let mut parts = Vec::new();
    for (i, total) in totals.iter().enumerate() {
        let y = area.y + i as f64 * slot + (slot - bar_height) / 2.0;
        let length = (total.count as f64 / max_count * track).max(1.0);
        let text_y = y + bar_height / 2.0 + 4.0;

        parts.push(format!(
            r#"<text x="{}" y="{}" class="label" text-anchor="end">{}</text>"#,
            area.x + label_width - 8.0,
            text_y,
            escape_xml(&truncate_label(&total.label, 28))
        ));
        parts.push(format!(
            r#"<rect x="{}" y="{y}" width="{length}" height="{bar_height}" fill="{}"><title>{}: {}</title></rect>"#,
            area.x + label_width,
            PALETTE[0],
            escape_xml(&total.label),
            format_number(total.count)
        ));
        parts.push(format!(
            r#"<text x="{}" y="{}" class="label">{}</text>"#,
            area.x + label_width + length + 6.0,
            text_y,
            format_compact(total.count)
        ));
    }

    parts
}


/// Line chart with a marker on every month.
fn month_line(months: &[MonthTotal], area: Area) -> Vec<String> {
    if months.is_empty() {
        return empty_message(area, "No dated complaints");
    }

    let plot = area.inset(Insets {
        top: 8.0,
        right: 12.0,
        bottom: 28.0,
        left: 52.0,
    });
    let max_count = months.iter().map(|m| m.count).max().unwrap_or(0).max(1) as f64;
    let step = if months.len() > 1 {
        plot.width / (months.len() - 1) as f64
    } else {
        0.0
    };

    let point = |i: usize, count: u64| {
        let x = if months.len() > 1 { plot.x + i as f64 * step } else { plot.x + plot.width / 2.0 };
        let y = plot.y + plot.height - count as f64 / max_count * plot.height;
        (x, y)
    };

    let mut parts = Vec::new();

    // Horizontal grid with y labels
    for fraction in [0.0, 0.5, 1.0] {
        let y = plot.y + plot.height - fraction * plot.height;
        parts.push(format!(
            r#"<line x1="{}" y1="{y}" x2="{}" y2="{y}" stroke="{GRID}" stroke-width="1"/>"#,
            plot.x,
            plot.x + plot.width
        ));
        parts.push(format!(
            r#"<text x="{}" y="{}" class="label" text-anchor="end">{}</text>"#,
            plot.x - 8.0,
            y + 4.0,
            format_compact((fraction * max_count).round() as u64)
        ));
    }

    let polyline: Vec<String> = months
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let (x, y) = point(i, m.count);
            format!("{x:.1},{y:.1}")
        })
        .collect();
    parts.push(format!(
        r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
        polyline.join(" "),
        PALETTE[0]
    ));

    let label_every = (months.len() / 8).max(1);
    for (i, month) in months.iter().enumerate() {
        let (x, y) = point(i, month.count);
        parts.push(format!(
            r#"<circle cx="{x:.1}" cy="{y:.1}" r="4" fill="{}"><title>{}: {}</title></circle>"#,
            PALETTE[0],
            month.month.format("%b %Y"),
            format_number(month.count)
        ));

        if i % label_every == 0 || i == months.len() - 1 {
            parts.push(format!(
                r#"<text x="{x:.1}" y="{}" class="label" text-anchor="middle">{}</text>"#,
                plot.y + plot.height + 18.0,
                month.month.format("%b %Y")
            ));
        }
    }

    parts
}


/// Pie chart of channel shares with a legend.
fn channel_pie(totals: &[CategoryTotal], area: Area) -> Vec<String> {
    if totals.is_empty() {
        return empty_message(area, "No channel data");
    }

    let radius = (area.height / 2.0).min(area.width / 4.0) - 4.0;
    let cx = area.x + area.width / 4.0;
    let cy = area.y + area.height / 2.0;

    let counts: Vec<u64> = totals.iter().map(|t| t.count).collect();
    let slices = pie_slices(&counts);

    let mut parts = Vec::new();
    for (i, ((start, end), item)) in slices.iter().zip(totals).enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let tooltip = format!(
            "{}: {} ({:.1}%)",
            escape_xml(&item.label),
            format_number(item.count),
            slice_share(*start, *end)
        );

        if end - start >= std::f64::consts::TAU - 1e-9 {
            parts.push(format!(
                r#"<circle cx="{cx}" cy="{cy}" r="{radius}" fill="{color}"><title>{tooltip}</title></circle>"#
            ));
            continue;
        }
        if end <= start {
            continue;
        }

        let (x0, y0) = svg_polar(cx, cy, radius, *start);
        let (x1, y1) = svg_polar(cx, cy, radius, *end);
        let large_arc = if end - start > std::f64::consts::PI { 1 } else { 0 };
        parts.push(format!(
            r#"<path d="M {cx:.2} {cy:.2} L {x0:.2} {y0:.2} A {radius:.2} {radius:.2} 0 {large_arc} 1 {x1:.2} {y1:.2} Z" fill="{color}" stroke="{PANEL_BG}" stroke-width="1"><title>{tooltip}</title></path>"#
        ));
    }

    let legend_x = area.x + area.width / 2.0 + 20.0;
    for (i, (item, (start, end))) in totals.iter().zip(&slices).enumerate() {
        let y = area.y + 20.0 + i as f64 * 22.0;
        parts.push(format!(
            r#"<rect x="{legend_x}" y="{}" width="12" height="12" fill="{}"/>"#,
            y - 10.0,
            PALETTE[i % PALETTE.len()]
        ));
        parts.push(format!(
            r#"<text x="{}" y="{y}" class="label">{} ({:.1}%)</text>"#,
            legend_x + 20.0,
            escape_xml(&truncate_label(&item.label, 26)),
            slice_share(*start, *end)
        ));
    }

    parts
}


/// Two-level treemap: issue tiles containing sub-issue tiles.
fn issue_treemap(groups: &[IssueGroup], area: Area) -> Vec<String> {
    if groups.is_empty() {
        return empty_message(area, "No issue data");
    }

    let insets = Insets {
        top: 18.0,
        right: 2.0,
        bottom: 2.0,
        left: 2.0,
    };

    let mut parts = Vec::new();
    for tile in layout_issue_tree(groups, area, insets) {
        let group = &groups[tile.issue];
        let color = PALETTE[tile.issue % PALETTE.len()];
        let a = tile.area;

        parts.push(format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{GRID}" stroke="{PANEL_BG}" stroke-width="2"><title>{}: {}</title></rect>"#,
            a.x,
            a.y,
            a.width,
            a.height,
            escape_xml(&group.issue),
            format_number(group.total)
        ));
        if a.width > 30.0 && a.height > 16.0 {
            parts.push(format!(
                r#"<text x="{:.2}" y="{:.2}" class="label">{}</text>"#,
                a.x + 4.0,
                a.y + 13.0,
                escape_xml(&truncate_label(&group.issue, (a.width / 7.0) as usize))
            ));
        }

        for (child, sub) in tile.children.iter().zip(&group.sub_issues) {
            if child.size() <= 0.0 {
                continue;
            }
            parts.push(format!(
                r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{color}" stroke="{GRID}" stroke-width="1"><title>{} / {}: {}</title></rect>"#,
                child.x,
                child.y,
                child.width,
                child.height,
                escape_xml(&group.issue),
                escape_xml(&sub.label),
                format_number(sub.count)
            ));
            if child.width > 40.0 && child.height > 14.0 {
                parts.push(format!(
                    r#"<text x="{:.2}" y="{:.2}" class="leaf">{}</text>"#,
                    child.x + 4.0,
                    child.y + 12.0,
                    escape_xml(&truncate_label(&sub.label, (child.width / 6.5) as usize))
                ));
            }
        }
    }

    parts
}


/// Polar point in SVG coordinates, where y grows downward.
fn svg_polar(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    let (x, y) = polar_point(0.0, 0.0, radius, angle);
    (cx + x, cy - y)
}


/// Escape text for use inside SVG markup.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}


/// Opaque pixmap fill for a `#rrggbb` colour. Malformed channels read as 0.
fn background_color(hex: &str) -> tiny_skia::Color {
    let channel = |range: std::ops::Range<usize>| {
        hex.trim_start_matches('#')
            .get(range)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .unwrap_or(0)
    };
    tiny_skia::Color::from_rgba8(channel(0..2), channel(2..4), channel(4..6), 255)
}


/// Hand the exported file to the desktop's default viewer.
pub fn open_file(path: &Path) -> Result<()> {
    let (program, args): (&str, &[&str]) = if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(target_os = "windows") {
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    };

    debug!(program, path = %path.display(), "opening export");
    std::process::Command::new(program)
        .args(args)
        .arg(path)
        .spawn()
        .with_context(|| format!("Failed to open {} with {program}", path.display()))?;

    Ok(())
}
