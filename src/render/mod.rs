pub mod html;

use crate::table::{Table, ESTIMATE_COLUMN};
use serde::Serialize;

pub use html::{output_path, write_html};

/// Six-stop sequential blue scale, light to dark.
pub const COLORSCALE: [(f64, &str); 6] = [
    (0.0, "#c6dbef"),
    (0.2, "#6baed6"),
    (0.4, "#4292c6"),
    (0.6, "#2171b5"),
    (0.8, "#0e5693"),
    (1.0, "#013e7c"),
];

pub const TITLE: &str = "Number of people (all ages) living with HIV<br>Estimates by country<br><br>\
[Source:<a href=\"http://apps.who.int/gho/data/node.main.620?lang=en\"> World Health Organization</a>]";

pub const COLORBAR_TITLE: &str = "Estimated no.<br>w/ HIV";

/// Figure handed to plotly.js: `data` + `layout`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub data: Vec<ChoroplethTrace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethTrace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Alpha-3 codes; unresolved rows serialise as `null` and stay unfilled.
    pub locations: Vec<Option<String>>,
    pub z: Vec<String>,
    pub text: Vec<String>,
    pub colorscale: Vec<(f64, String)>,
    pub autocolorscale: bool,
    pub reversescale: bool,
    pub marker: Marker,
    pub colorbar: ColorBar,
    /// Legend/hover name of the trace.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub line: MarkerLine,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerLine {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBar {
    pub autotick: bool,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    pub margin: Margin,
    pub geo: Geo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub b: u32,
    pub t: u32,
    pub pad: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geo {
    pub showframe: bool,
    pub showcoastlines: bool,
    pub projection: Projection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    #[serde(rename = "type")]
    pub kind: String,
}

/// One choropleth trace over the whole table plus the fixed layout.
/// Rows are passed through as they are; nothing is validated or dropped.
pub fn build_chart(table: &Table) -> ChartSpec {
    let trace = ChoroplethTrace {
        kind: "choropleth",
        locations: table.rows.iter().map(|r| r.code.clone()).collect(),
        z: table.rows.iter().map(|r| r.estimated_count.clone()).collect(),
        text: table.rows.iter().map(|r| r.country.clone()).collect(),
        colorscale: COLORSCALE
            .iter()
            .map(|&(stop, color)| (stop, color.to_string()))
            .collect(),
        autocolorscale: false,
        reversescale: false,
        marker: Marker {
            line: MarkerLine {
                color: "rgb(180,180,180)".into(),
                width: 0.5,
            },
        },
        colorbar: ColorBar {
            autotick: false,
            title: COLORBAR_TITLE.into(),
        },
        name: ESTIMATE_COLUMN.into(),
    };

    let layout = Layout {
        title: TITLE.into(),
        margin: Margin {
            l: 10,
            r: 10,
            b: 50,
            t: 150,
            pad: 4,
        },
        geo: Geo {
            showframe: false,
            showcoastlines: false,
            projection: Projection {
                kind: "Mercator".into(),
            },
        },
    };

    ChartSpec {
        data: vec![trace],
        layout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Row;
    use serde_json::{json, Value};

    fn sample() -> Table {
        let mut resolved = Row::new("France", "200000");
        resolved.code = Some("FRA".into());
        Table::new(vec![
            resolved,
            Row::new("Republic of Atlantis", ""),
            Row::new("Congo, Kinshasa", "1200000"),
        ])
    }

    #[test]
    fn one_trace_sized_to_the_table() {
        let table = sample();
        let chart = build_chart(&table);

        assert_eq!(chart.data.len(), 1);
        let trace = &chart.data[0];
        assert_eq!(trace.locations.len(), table.len());
        assert_eq!(trace.z.len(), table.len());
        assert_eq!(trace.text.len(), table.len());
        assert_eq!(trace.locations[1], None);
        assert_eq!(trace.text[2], "Congo, Kinshasa");
    }

    #[test]
    fn serialises_as_plotly_figure() -> anyhow::Result<()> {
        let value: Value = serde_json::to_value(build_chart(&sample()))?;

        let trace = &value["data"][0];
        assert_eq!(trace["type"], "choropleth");
        assert_eq!(trace["locations"], json!(["FRA", null, null]));
        assert_eq!(trace["z"], json!(["200000", "", "1200000"]));
        assert_eq!(trace["colorscale"][0], json!([0.0, "#c6dbef"]));
        assert_eq!(trace["colorscale"][5], json!([1.0, "#013e7c"]));
        assert_eq!(trace["reversescale"], false);
        assert_eq!(trace["colorbar"]["title"], COLORBAR_TITLE);

        let layout = &value["layout"];
        assert_eq!(layout["geo"]["projection"]["type"], "Mercator");
        assert_eq!(layout["geo"]["showcoastlines"], false);
        assert_eq!(layout["margin"]["t"], 150);
        assert!(layout["title"].as_str().unwrap_or_default().contains("World Health Organization"));
        Ok(())
    }
}
