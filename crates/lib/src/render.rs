//! Markup and text formatting for projections.
//!
//! Content is built by [`crate::project`]; this module only turns it into
//! HTML or terminal text.

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::project::{MapView, POPUP_WIDTH, Popup, Projection, TABLE_HEADERS, TableView};

pub const PAGE_TITLE: &str = "🥗 香港素食餐廳大全";
pub const MAP_HEADER: &str = "📍 香港素食地圖";

const POPUP_RULE: &str = "------------------------------";

const LEAFLET_CSS: &str = "https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css";
const LEAFLET_JS: &str = "https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js";
const AWESOME_MARKERS_CSS: &str = concat!(
    "https://cdnjs.cloudflare.com/ajax/libs/",
    "Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.css"
);
const AWESOME_MARKERS_JS: &str = concat!(
    "https://cdnjs.cloudflare.com/ajax/libs/",
    "Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.js"
);
const FONT_AWESOME_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css";
const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";

/// A static form that posts `name`, `email` and `message` to a third-party
/// relay. Nothing is processed locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub endpoint: String,
}

pub struct PageContext<'a> {
    pub projection: &'a Projection<'a>,
    pub contact: Option<&'a ContactForm>,
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn link(href: &str, label: &str) -> String {
    format!(
        "<a href=\"{}\" target=\"_blank\">{}</a>",
        escape_html(href),
        escape_html(label)
    )
}

pub fn popup_html(popup: &Popup<'_>) -> String {
    let mut html = format!("<strong>{}</strong><br/>\n", escape_html(&popup.header()));
    html.push_str(&format!("{POPUP_RULE}<br/>\n"));
    html.push_str(&format!("菜式: {}<br/>\n", escape_html(popup.cuisine)));
    html.push_str(&format!("素食種類: {}<br/>\n", escape_html(popup.veg_type)));
    html.push_str(&format!(
        "地址: {} {}<br/>\n",
        escape_html(popup.address),
        link(&popup.map_link, "(查看地圖)")
    ));
    if let Some(info_link) = popup.info_link {
        html.push_str(&format!(
            "Openrice連結: {}<br/>\n",
            link(info_link, "(查看Openrice)")
        ));
    }
    html.push_str(&format!(
        "電話: {}<br/>\n",
        escape_html(popup.phone.unwrap_or_default())
    ));
    if let Some(remarks) = popup.remarks {
        html.push_str(&format!(
            "<strong>備註: {}</strong><br/>\n",
            escape_html(remarks)
        ));
    }
    html
}

/// Plain-text table with `|`-separated columns padded to the widest cell.
/// Widths are terminal columns, so CJK text counts double.
pub fn table_text(table: &TableView<'_>) -> String {
    let rows: Vec<[&str; 7]> = table.rows.iter().map(|row| row.cells()).collect();
    let mut widths = TABLE_HEADERS.map(UnicodeWidthStr::width);
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.width());
        }
    }

    let mut text = String::new();
    for cells in std::iter::once(&TABLE_HEADERS).chain(&rows) {
        let line = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| pad(cell, width))
            .collect::<Vec<_>>()
            .join(" | ");
        text.push_str(line.trim_end());
        text.push('\n');
    }
    text
}

/// Pads `cell` with spaces up to `width` terminal columns.
pub fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.width());
    format!("{cell}{}", " ".repeat(fill))
}

pub fn table_html(table: &TableView<'_>) -> String {
    let mut html = String::from("<table class=\"restaurants\">\n<thead><tr>");
    for header in TABLE_HEADERS {
        html.push_str(&format!("<th>{header}</th>"));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row.cells() {
            html.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

#[derive(Serialize)]
struct ScriptMarker<'a> {
    lat: f64,
    lon: f64,
    title: &'a str,
    color: &'a str,
    icon: &'a str,
    prefix: &'a str,
    popup: String,
}

// JSON embedded in a <script> block must not close it early.
fn script_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn map_script(map: &MapView<'_>) -> serde_json::Result<String> {
    let markers: Vec<ScriptMarker> = map
        .markers
        .iter()
        .map(|marker| ScriptMarker {
            lat: marker.position.latitude,
            lon: marker.position.longitude,
            title: marker.title,
            color: marker.style.color,
            icon: marker.style.icon,
            prefix: marker.style.prefix,
            popup: popup_html(&marker.popup),
        })
        .collect();

    Ok(format!(
        r#"const map = L.map("map", {{ center: [{lat}, {lon}], zoom: {zoom} }});
L.control.scale().addTo(map);
L.tileLayer("{TILE_URL}", {{ attribution: "{TILE_ATTRIBUTION}" }}).addTo(map);
const markers = {markers};
for (const m of markers) {{
  const icon = L.AwesomeMarkers.icon({{ markerColor: m.color, icon: m.icon, prefix: m.prefix }});
  L.marker([m.lat, m.lon], {{ icon: icon, title: m.title }})
    .bindPopup(m.popup, {{ minWidth: {POPUP_WIDTH}, maxWidth: {POPUP_WIDTH} }})
    .addTo(map);
}}
"#,
        lat = map.center.latitude,
        lon = map.center.longitude,
        zoom = map.zoom,
        markers = script_json(&markers)?,
    ))
}

fn contact_form_html(form: &ContactForm) -> String {
    format!(
        r#"<section class="contact">
<h2>聯絡我們</h2>
<form action="{}" method="POST">
<input type="text" name="name" placeholder="名字" required>
<input type="email" name="email" placeholder="電郵" required>
<textarea name="message" placeholder="訊息"></textarea>
<button type="submit">傳送</button>
</form>
</section>
"#,
        escape_html(&form.endpoint)
    )
}

/// A self-contained page: result count, table, map and contact form. When
/// nothing matched, the warning replaces the table and the map.
pub fn page_html(ctx: &PageContext<'_>) -> serde_json::Result<String> {
    let summary = escape_html(&ctx.projection.summary());
    let mut body = format!("<h1>{PAGE_TITLE}</h1>\n");

    match ctx.projection {
        Projection::NoResults => {
            body.push_str(&format!("<p class=\"warning\">{summary}</p>\n"));
        }
        Projection::Results { table, map } => {
            body.push_str(&format!("<p>{summary}</p>\n"));
            body.push_str(&table_html(table));
            body.push_str(&format!("<h2>{MAP_HEADER}</h2>\n"));
            body.push_str("<div id=\"map\"></div>\n");
            body.push_str(&format!("<script>\n{}</script>\n", map_script(map)?));
        }
    }

    if let Some(form) = ctx.contact {
        body.push_str(&contact_form_html(form));
    }

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="zh-Hant">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{PAGE_TITLE}</title>
<link rel="stylesheet" href="{LEAFLET_CSS}">
<link rel="stylesheet" href="{FONT_AWESOME_CSS}">
<link rel="stylesheet" href="{AWESOME_MARKERS_CSS}">
<script src="{LEAFLET_JS}"></script>
<script src="{AWESOME_MARKERS_JS}"></script>
<style>
#map {{ width: 700px; max-width: 100%; height: 500px; }}
table.restaurants {{ border-collapse: collapse; width: 100%; }}
table.restaurants th, table.restaurants td {{ border: 1px solid #ccc; padding: 4px; }}
.warning {{ color: #a15c00; }}
</style>
</head>
<body>
{body}</body>
</html>
"#
    ))
}
