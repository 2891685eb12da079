//! Map overlay layers shipped as KMZ archives.
//!
//! A KMZ file is a zip archive holding one KML document. The first entry whose
//! name ends in `.kml` is converted to a GeoJSON `FeatureCollection`, and every
//! feature is tagged with a `layerName` property naming the layer it came from.

use std::io::{Cursor, Read};

use roxmltree::{Document, Node};
use serde_json::{Map, Value};

use super::error::{AtlasError, Result};

/// Where one overlay is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerSource {
    pub name: &'static str,
    pub path: &'static str,
}

/// Overlays loaded by the map view, in load order.
pub const KMZ_LAYERS: [LayerSource; 4] = [
    LayerSource { name: "Coast", path: "/Coast.kmz" },
    LayerSource { name: "Soils", path: "/Soils.kmz" },
    LayerSource { name: "Rivers", path: "/Rivers.kmz" },
    LayerSource { name: "Roads", path: "/Roads.kmz" },
];

/// One converted overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct MapLayer {
    pub name: String,
    /// GeoJSON `FeatureCollection`.
    pub data: Value,
}

impl MapLayer {
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.data["features"].as_array().map_or(0, Vec::len)
    }
}

/// Result of loading every overlay. Failures are collected, not fatal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerSet {
    pub layers: Vec<MapLayer>,
    pub errors: Vec<String>,
}

impl LayerSet {
    /// All failures joined with `"; "`, or `None` if every layer loaded.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        (!self.errors.is_empty()).then(|| self.errors.join("; "))
    }
}

/// Extracts the KML document from a KMZ archive.
///
/// Returns `Ok(None)` when the archive holds no `.kml` entry.
///
/// # Errors
///
/// [`AtlasError::Archive`] if the bytes are not a readable zip archive.
pub fn kml_from_kmz(bytes: &[u8]) -> Result<Option<String>> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| AtlasError::Archive(e.to_string()))?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| AtlasError::Archive(e.to_string()))?;
        if !entry.name().to_lowercase().ends_with(".kml") {
            continue;
        }
        let mut kml = String::new();
        entry
            .read_to_string(&mut kml)
            .map_err(|e| AtlasError::Archive(format!("{}: {e}", entry.name())))?;
        return Ok(Some(kml));
    }
    Ok(None)
}

/// Converts a KMZ archive into a tagged layer.
///
/// An archive without a KML document is skipped with a warning rather than
/// reported as an error.
///
/// # Errors
///
/// [`AtlasError::Archive`] or [`AtlasError::Kml`] if the archive or the
/// document inside it cannot be read.
pub fn layer_from_kmz(name: &str, bytes: &[u8]) -> Result<Option<MapLayer>> {
    let Some(kml) = kml_from_kmz(bytes)? else {
        tracing::warn!(layer = name, "no .kml file found in archive");
        return Ok(None);
    };
    let data = kml_to_geojson(&kml, name)?;
    Ok(Some(MapLayer {
        name: name.to_string(),
        data,
    }))
}

#[derive(Debug, Clone, PartialEq)]
struct Position {
    lon: f64,
    lat: f64,
    alt: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
enum Geometry {
    Point(Position),
    LineString(Vec<Position>),
    Polygon(Vec<Vec<Position>>),
    Collection(Vec<Geometry>),
}

/// Converts a KML document into a GeoJSON `FeatureCollection`.
///
/// Each `Placemark` becomes one feature. Its `name`, `description` and
/// extended data become properties, followed by `layerName`. Points, line
/// strings, polygons and multi-geometries are converted; a placemark with none
/// of these gets a `null` geometry.
///
/// # Errors
///
/// [`AtlasError::Kml`] if the document is not well-formed XML.
pub fn kml_to_geojson(kml: &str, layer_name: &str) -> Result<Value> {
    let document = Document::parse(kml).map_err(|e| AtlasError::Kml(e.to_string()))?;

    let features: Vec<Value> = document
        .descendants()
        .filter(|node| is_named(*node, "Placemark"))
        .map(|placemark| placemark_to_feature(placemark, layer_name))
        .collect();

    let mut root = Map::new();
    root.insert("type".to_string(), Value::String("FeatureCollection".to_string()));
    root.insert("features".to_string(), Value::Array(features));
    Ok(Value::Object(root))
}

fn placemark_to_feature(placemark: Node<'_, '_>, layer_name: &str) -> Value {
    let mut properties = Map::new();
    for key in ["name", "description"] {
        if let Some(text) = child(placemark, key).and_then(node_text) {
            properties.insert(key.to_string(), Value::String(text));
        }
    }
    if let Some(extended) = child(placemark, "ExtendedData") {
        for data in extended.descendants().filter(|n| is_named(*n, "Data") || is_named(*n, "SimpleData")) {
            let Some(key) = data.attribute("name") else {
                continue;
            };
            let value = if is_named(data, "Data") {
                child(data, "value").and_then(node_text)
            } else {
                node_text(data)
            };
            properties.insert(key.to_string(), value.map_or(Value::Null, Value::String));
        }
    }
    properties.insert("layerName".to_string(), Value::String(layer_name.to_string()));

    let mut feature = Map::new();
    feature.insert("type".to_string(), Value::String("Feature".to_string()));
    if let Some(id) = placemark.attribute("id") {
        feature.insert("id".to_string(), Value::String(id.to_string()));
    }
    feature.insert("properties".to_string(), Value::Object(properties));
    feature.insert(
        "geometry".to_string(),
        placemark
            .children()
            .find_map(parse_geometry)
            .map_or(Value::Null, |g| geometry_to_geojson_value(&g)),
    );
    Value::Object(feature)
}

fn parse_geometry(node: Node<'_, '_>) -> Option<Geometry> {
    if !node.is_element() {
        return None;
    }
    match node.tag_name().name() {
        "Point" => coordinates_of(node)?.into_iter().next().map(Geometry::Point),
        "LineString" => coordinates_of(node)
            .filter(|line| !line.is_empty())
            .map(Geometry::LineString),
        "Polygon" => {
            let outer = child(node, "outerBoundaryIs").and_then(ring_of)?;
            let mut rings = vec![outer];
            rings.extend(
                node.children()
                    .filter(|n| is_named(*n, "innerBoundaryIs"))
                    .filter_map(ring_of),
            );
            Some(Geometry::Polygon(rings))
        }
        "MultiGeometry" => {
            let parts: Vec<Geometry> = node.children().filter_map(parse_geometry).collect();
            (!parts.is_empty()).then_some(Geometry::Collection(parts))
        }
        _ => None,
    }
}

fn ring_of(boundary: Node<'_, '_>) -> Option<Vec<Position>> {
    child(boundary, "LinearRing")
        .and_then(coordinates_of)
        .filter(|ring| !ring.is_empty())
}

/// Parses the `coordinates` child: whitespace-separated `lon,lat[,alt]` tuples.
///
/// Tuples that do not hold two numbers are skipped.
fn coordinates_of(node: Node<'_, '_>) -> Option<Vec<Position>> {
    let text = child(node, "coordinates")?.text()?;
    Some(
        text.split_whitespace()
            .filter_map(|tuple| {
                let mut parts = tuple.split(',').map(|p| p.trim().parse::<f64>());
                let lon = parts.next()?.ok()?;
                let lat = parts.next()?.ok()?;
                let alt = parts.next().and_then(|p| p.ok());
                Some(Position { lon, lat, alt })
            })
            .collect(),
    )
}

fn geometry_to_geojson_value(geometry: &Geometry) -> Value {
    let mut obj = Map::new();
    match geometry {
        Geometry::Point(p) => {
            obj.insert("type".to_string(), Value::String("Point".to_string()));
            obj.insert("coordinates".to_string(), position_coords(p));
        }
        Geometry::LineString(line) => {
            obj.insert("type".to_string(), Value::String("LineString".to_string()));
            obj.insert("coordinates".to_string(), line_coords(line));
        }
        Geometry::Polygon(rings) => {
            obj.insert("type".to_string(), Value::String("Polygon".to_string()));
            obj.insert(
                "coordinates".to_string(),
                Value::Array(rings.iter().map(|ring| line_coords(ring)).collect()),
            );
        }
        Geometry::Collection(parts) => {
            obj.insert("type".to_string(), Value::String("GeometryCollection".to_string()));
            obj.insert(
                "geometries".to_string(),
                Value::Array(parts.iter().map(geometry_to_geojson_value).collect()),
            );
        }
    }
    Value::Object(obj)
}

fn line_coords(line: &[Position]) -> Value {
    Value::Array(line.iter().map(position_coords).collect())
}

fn position_coords(p: &Position) -> Value {
    let mut coords = vec![Value::from(p.lon), Value::from(p.lat)];
    if let Some(alt) = p.alt {
        coords.push(Value::from(alt));
    }
    Value::Array(coords)
}

fn is_named(node: Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is_named(*n, name))
}

fn node_text(node: Node<'_, '_>) -> Option<String> {
    let text: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;
    use zip::write::SimpleFileOptions;

    use super::*;

    const RIVER_KML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Folder>
      <Placemark id="layou">
        <name>Layou River</name>
        <description><![CDATA[Longest river on the island]]></description>
        <ExtendedData>
          <Data name="length_km"><value>20</value></Data>
        </ExtendedData>
        <LineString>
          <coordinates>
            -61.40,15.39,0 -61.35,15.41,12
          </coordinates>
        </LineString>
      </Placemark>
      <Placemark>
        <name>Roseau</name>
        <Point><coordinates>-61.387,15.301</coordinates></Point>
      </Placemark>
    </Folder>
  </Document>
</kml>"#;

    fn kmz(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn placemarks_become_tagged_features() {
        let geojson = kml_to_geojson(RIVER_KML, "Rivers").unwrap();
        assert_eq!(geojson["type"], "FeatureCollection");

        let river = &geojson["features"][0];
        assert_eq!(river["id"], "layou");
        assert_eq!(
            river["properties"],
            json!({
                "name": "Layou River",
                "description": "Longest river on the island",
                "length_km": "20",
                "layerName": "Rivers"
            })
        );
        assert_eq!(
            river["geometry"],
            json!({ "type": "LineString", "coordinates": [[-61.40, 15.39, 0.0], [-61.35, 15.41, 12.0]] })
        );

        let town = &geojson["features"][1];
        assert_eq!(town["geometry"], json!({ "type": "Point", "coordinates": [-61.387, 15.301] }));
        assert_eq!(town["properties"]["layerName"], "Rivers");
    }

    #[test]
    fn polygons_keep_holes_and_multigeometry_is_a_collection() {
        let kml = r#"<kml><Placemark>
            <MultiGeometry>
              <Polygon>
                <outerBoundaryIs><LinearRing><coordinates>0,0 4,0 4,4 0,0</coordinates></LinearRing></outerBoundaryIs>
                <innerBoundaryIs><LinearRing><coordinates>1,1 2,1 2,2 1,1</coordinates></LinearRing></innerBoundaryIs>
              </Polygon>
              <Point><coordinates>9,9</coordinates></Point>
            </MultiGeometry>
          </Placemark>
          <Placemark><name>unplaced</name></Placemark></kml>"#;

        let geojson = kml_to_geojson(kml, "Soils").unwrap();
        let geometry = &geojson["features"][0]["geometry"];
        assert_eq!(geometry["type"], "GeometryCollection");
        assert_eq!(geometry["geometries"][0]["type"], "Polygon");
        assert_eq!(geometry["geometries"][0]["coordinates"].as_array().unwrap().len(), 2);
        assert_eq!(geometry["geometries"][1]["coordinates"], json!([9.0, 9.0]));

        assert_eq!(geojson["features"][1]["geometry"], Value::Null);
    }

    #[test]
    fn first_kml_entry_is_used_regardless_of_case() {
        let bytes = kmz(&[("files/icon.png", "png"), ("doc.KML", RIVER_KML), ("other.kml", "<kml/>")]);
        let layer = layer_from_kmz("Rivers", &bytes).unwrap().unwrap();
        assert_eq!(layer.name, "Rivers");
        assert_eq!(layer.feature_count(), 2);
    }

    #[test]
    fn archive_without_kml_is_skipped() {
        let bytes = kmz(&[("readme.txt", "no map here")]);
        assert_eq!(kml_from_kmz(&bytes).unwrap(), None);
        assert_eq!(layer_from_kmz("Coast", &bytes).unwrap(), None);
    }

    #[test]
    fn unreadable_inputs_are_errors() {
        assert!(matches!(kml_from_kmz(b"not a zip"), Err(AtlasError::Archive(_))));

        let bytes = kmz(&[("doc.kml", "<kml><Placemark>")]);
        assert!(matches!(layer_from_kmz("Roads", &bytes), Err(AtlasError::Kml(_))));
    }

    #[test]
    fn errors_are_joined_in_order() {
        let set = LayerSet {
            layers: Vec::new(),
            errors: vec!["Failed to fetch Coast: Not Found".into(), "Soils: Invalid KML: x".into()],
        };
        assert_eq!(
            set.error_message().as_deref(),
            Some("Failed to fetch Coast: Not Found; Soils: Invalid KML: x")
        );
        assert_eq!(LayerSet::default().error_message(), None);
    }
}
