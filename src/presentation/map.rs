use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fs::File;
use std::io::{BufWriter, Error, Write};
use std::path::{Path, PathBuf};

use crate::presentation::{ColorLegend, MapTable};

fn default_zoom() -> u8 {
    3
}

fn default_height() -> u32 {
    500
}

fn default_style() -> String {
    "open-street-map".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MapView {
    #[serde(default = "default_zoom")]
    #[schemars(title = "Zoom", range(min = 0, max = 20), default = "default_zoom")]
    pub zoom: u8,

    #[serde(default = "default_height")]
    #[schemars(title = "Height", description = "Map height in pixels", default = "default_height")]
    pub height: u32,

    #[serde(default = "default_style")]
    #[schemars(title = "Style", description = "Base map tile style", default = "default_style")]
    pub style: String,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            zoom: default_zoom(),
            height: default_height(),
            style: default_style(),
        }
    }
}

/// Consumer of the labeled map table.
pub trait MapSink {
    fn render(&mut self, table: &MapTable, legend: &ColorLegend) -> Result<(), Error>;
}

/// Plain-text table, one marker per line.
pub struct TextMapSink<W: Write> {
    out: W,
}

impl<W: Write> TextMapSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> MapSink for TextMapSink<W> {
    fn render(&mut self, table: &MapTable, legend: &ColorLegend) -> Result<(), Error> {
        writeln!(self.out, "{:>9} {:>10}  {:<14} {}", "lat", "long", "label", "color")?;
        for row in &table.rows {
            writeln!(
                self.out,
                "{:>9.4} {:>10.4}  {:<14} {}",
                row.lat, row.long, row.label, row.color
            )?;
        }
        let entries: Vec<String> = legend
            .entries()
            .map(|(label, color)| format!("{label}={color}"))
            .collect();
        writeln!(
            self.out,
            "legend: {} (other={})",
            entries.join(", "),
            legend.default_color
        )?;
        Ok(())
    }
}

/// Writes a GeoJSON `FeatureCollection` with one point per row.
pub struct GeoJsonMapSink {
    path: PathBuf,
    view: MapView,
}

impl GeoJsonMapSink {
    pub fn new<P: AsRef<Path>>(path: P, view: MapView) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            view,
        }
    }

    fn document(&self, table: &MapTable, legend: &ColorLegend) -> Value {
        let features: Vec<Value> = table
            .rows
            .iter()
            .map(|row| {
                let mut props = Map::new();
                props.insert("label".into(), Value::from(row.label.clone()));
                props.insert("color".into(), Value::from(row.color.clone()));
                for (name, value) in &row.features {
                    props.insert(name.clone(), Value::from(*value));
                }
                json!({
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [row.long, row.lat] },
                    "properties": props,
                })
            })
            .collect();

        json!({
            "type": "FeatureCollection",
            "properties": {
                "zoom": self.view.zoom,
                "height": self.view.height,
                "style": self.view.style,
                "legend": legend.colors,
                "default_color": legend.default_color,
            },
            "features": features,
        })
    }
}

impl MapSink for GeoJsonMapSink {
    fn render(&mut self, table: &MapTable, legend: &ColorLegend) -> Result<(), Error> {
        let mut w = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut w, &self.document(table, legend))?;
        writeln!(w)?;
        w.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::MapRow;
    use std::fs;
    use tempfile::NamedTempFile;

    fn table() -> MapTable {
        MapTable {
            rows: vec![MapRow {
                lat: 50.0,
                long: -124.0,
                label: "High".into(),
                color: "red".into(),
                features: vec![
                    ("temp".into(), 35.0),
                    ("humidity".into(), 10.0),
                    ("windspeed".into(), 40.0),
                ],
            }],
        }
    }

    #[test]
    fn text_sink_lists_rows_and_legend() {
        let mut sink = TextMapSink::new(Vec::new());
        sink.render(&table(), &ColorLegend::default()).unwrap();
        let got = String::from_utf8(sink.into_inner()).unwrap();
        let exp = concat!(
            "      lat       long  label          color\n",
            "  50.0000  -124.0000  High           red\n",
            "legend: High=red, Low=green (other=gray)\n",
        );
        assert_eq!(got, exp);
    }

    #[test]
    fn geojson_sink_writes_points_lon_lat() {
        let tf = NamedTempFile::new().unwrap();
        let mut sink = GeoJsonMapSink::new(tf.path(), MapView::default());
        sink.render(&table(), &ColorLegend::default()).unwrap();

        let got: Value = serde_json::from_str(&fs::read_to_string(tf.path()).unwrap()).unwrap();
        assert_eq!(got["type"], "FeatureCollection");
        assert_eq!(got["properties"]["zoom"], 3);
        assert_eq!(got["properties"]["style"], "open-street-map");
        assert_eq!(got["properties"]["legend"]["Low"], "green");

        let feature = &got["features"][0];
        assert_eq!(feature["geometry"]["coordinates"], json!([-124.0, 50.0]));
        assert_eq!(feature["properties"]["label"], "High");
        assert_eq!(feature["properties"]["color"], "red");
        assert_eq!(feature["properties"]["windspeed"], 40.0);
    }

    #[test]
    fn geojson_sink_handles_empty_table() {
        let tf = NamedTempFile::new().unwrap();
        let mut sink = GeoJsonMapSink::new(tf.path(), MapView::default());
        sink.render(&MapTable::default(), &ColorLegend::default()).unwrap();
        let got: Value = serde_json::from_str(&fs::read_to_string(tf.path()).unwrap()).unwrap();
        assert_eq!(got["features"], json!([]));
    }
}
