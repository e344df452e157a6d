// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::io;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::geojson::FeatureCollection;

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// Error conditions which may occur during [first_linestring].
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("malformed KML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document contains no LineString with coordinates.
    #[error("no LineString coordinates found in the KML document")]
    MissingLineString,

    /// A coordinate tuple could not be parsed as `lon,lat[,alt]`.
    #[error("malformed coordinate tuple: {0:?}")]
    BadCoordinate(String),
}

/// Writes a FeatureCollection as a KML 2.2 document: one Placemark per
/// feature, in order, named `Vehicle {vehicle_id}` (the id slot is left
/// empty when the route carries no vehicle reference). Coordinates are
/// rendered as space-separated `lon,lat,0` triples; text nodes are
/// XML-escaped by the writer.
pub fn write_kml<W: io::Write>(writer: W, collection: &FeatureCollection) -> io::Result<()> {
    let mut xml = quick_xml::Writer::new(writer);

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut kml = BytesStart::new("kml");
    kml.push_attribute(("xmlns", KML_NAMESPACE));
    xml.write_event(Event::Start(kml))?;
    xml.write_event(Event::Start(BytesStart::new("Document")))?;

    for feature in &collection.features {
        let vehicle_id = feature
            .properties
            .vehicle_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        let name = format!("Vehicle {}", vehicle_id);

        let mut coordinates = String::new();
        for [lon, lat] in &feature.geometry.coordinates {
            if !coordinates.is_empty() {
                coordinates.push(' ');
            }
            // Altitude is always 0, the navigation device ignores it
            coordinates.push_str(&format!("{},{},0", lon, lat));
        }

        xml.write_event(Event::Start(BytesStart::new("Placemark")))?;
        xml.write_event(Event::Start(BytesStart::new("name")))?;
        xml.write_event(Event::Text(BytesText::new(&name)))?;
        xml.write_event(Event::End(BytesEnd::new("name")))?;
        xml.write_event(Event::Start(BytesStart::new("LineString")))?;
        xml.write_event(Event::Start(BytesStart::new("coordinates")))?;
        xml.write_event(Event::Text(BytesText::new(&coordinates)))?;
        xml.write_event(Event::End(BytesEnd::new("coordinates")))?;
        xml.write_event(Event::End(BytesEnd::new("LineString")))?;
        xml.write_event(Event::End(BytesEnd::new("Placemark")))?;
    }

    xml.write_event(Event::End(BytesEnd::new("Document")))?;
    xml.write_event(Event::End(BytesEnd::new("kml")))?;
    Ok(())
}

/// Extracts the `(lon, lat)` pairs of the first LineString in a KML
/// document. Placemarks past the first LineString are deliberately
/// ignored: the navigation device consumes a single trajectory.
///
/// Fails with [ParseError::MissingLineString] when the document has no
/// LineString, or when its coordinates element holds no tuples.
pub fn first_linestring<R: io::BufRead>(reader: R) -> Result<Vec<(f64, f64)>, ParseError> {
    let mut xml = quick_xml::Reader::from_reader(reader);
    let mut buf = Vec::new();

    let mut linestring_depth = 0usize;
    let mut in_coordinates = false;
    let mut text = String::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref start) => match start.local_name().as_ref() {
                b"LineString" => linestring_depth += 1,
                b"coordinates" if linestring_depth > 0 => in_coordinates = true,
                _ => {}
            },

            Event::Text(ref t) if in_coordinates => {
                let unescaped = t.unescape().map_err(|e| ParseError::Xml(e.into()))?;
                text.push_str(&unescaped);
            }

            Event::End(ref end) => match end.local_name().as_ref() {
                // First LineString only
                b"coordinates" if in_coordinates => break,
                b"LineString" => linestring_depth = linestring_depth.saturating_sub(1),
                _ => {}
            },

            Event::Eof => break,

            _ => {}
        }
        buf.clear();
    }

    let mut points = Vec::new();
    for tuple in text.split_whitespace() {
        points.push(parse_tuple(tuple)?);
    }

    if points.is_empty() {
        return Err(ParseError::MissingLineString);
    }
    Ok(points)
}

/// Parses one `lon,lat[,alt]` tuple; the altitude is ignored.
fn parse_tuple(tuple: &str) -> Result<(f64, f64), ParseError> {
    let mut parts = tuple.split(',');
    let lon = parts.next().and_then(|v| v.parse().ok());
    let lat = parts.next().and_then(|v| v.parse().ok());
    match (lon, lat) {
        (Some(lon), Some(lat)) => Ok((lon, lat)),
        _ => Err(ParseError::BadCoordinate(tuple.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::super::geojson::geojson_from_routes;
    use super::*;
    use crate::ors::Route;
    use crate::polyline::encode_polyline;

    fn sample_collection() -> FeatureCollection {
        let route = Route {
            geometry: Some(encode_polyline([(48.85341, 2.34880), (48.85712, 2.35210)])),
            vehicle: Some(1),
            distance: Some(1500.0),
            duration: Some(320.0),
        };
        geojson_from_routes(&[route]).unwrap()
    }

    #[test]
    fn test_write_kml_structure() {
        let mut out = Vec::new();
        write_kml(&mut out, &sample_collection()).unwrap();
        let kml = String::from_utf8(out).unwrap();

        assert!(kml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(kml.contains("<kml xmlns=\"http://www.opengis.net/kml/2.2\">"));
        assert!(kml.contains("<name>Vehicle 1</name>"));
        assert!(kml.contains("<coordinates>2.3488,48.85341,0 2.3521,48.85712,0</coordinates>"));
    }

    #[test]
    fn test_missing_vehicle_id_leaves_name_slot_empty() {
        let route = Route {
            geometry: Some(encode_polyline([(48.0, 2.0), (48.1, 2.1)])),
            vehicle: None,
            distance: None,
            duration: None,
        };
        let mut out = Vec::new();
        write_kml(&mut out, &geojson_from_routes(&[route]).unwrap()).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("<name>Vehicle </name>"));
    }

    #[test]
    fn test_round_trip() {
        let mut out = Vec::new();
        write_kml(&mut out, &sample_collection()).unwrap();

        let points = first_linestring(out.as_slice()).unwrap();
        assert_eq!(points, vec![(2.3488, 48.85341), (2.3521, 48.85712)]);
    }

    #[test]
    fn test_only_first_linestring_is_read() {
        const KML: &[u8] = b"<?xml version=\"1.0\" encoding=\"utf-8\"?>\
            <kml xmlns=\"http://www.opengis.net/kml/2.2\"><Document>\
            <Placemark><name>Vehicle 1</name><LineString>\
            <coordinates>2.0,48.0,0 2.1,48.1,0</coordinates>\
            </LineString></Placemark>\
            <Placemark><name>Vehicle 2</name><LineString>\
            <coordinates>9.0,50.0,0 9.1,50.1,0</coordinates>\
            </LineString></Placemark>\
            </Document></kml>";

        let points = first_linestring(KML).unwrap();
        assert_eq!(points, vec![(2.0, 48.0), (2.1, 48.1)]);
    }

    #[test]
    fn test_namespaced_elements_are_found() {
        const KML: &[u8] = b"<k:kml xmlns:k=\"http://www.opengis.net/kml/2.2\"><k:Document>\
            <k:Placemark><k:LineString>\
            <k:coordinates>2.0,48.0 2.1,48.1</k:coordinates>\
            </k:LineString></k:Placemark></k:Document></k:kml>";

        let points = first_linestring(KML).unwrap();
        assert_eq!(points, vec![(2.0, 48.0), (2.1, 48.1)]);
    }

    #[test]
    fn test_no_linestring_is_an_error() {
        const KML: &[u8] =
            b"<kml xmlns=\"http://www.opengis.net/kml/2.2\"><Document></Document></kml>";
        assert!(matches!(
            first_linestring(KML),
            Err(ParseError::MissingLineString)
        ));
    }

    #[test]
    fn test_coordinates_outside_linestring_are_ignored() {
        const KML: &[u8] = b"<kml><Document><Placemark>\
            <Point><coordinates>1.0,2.0</coordinates></Point>\
            </Placemark></Document></kml>";
        assert!(matches!(
            first_linestring(KML),
            Err(ParseError::MissingLineString)
        ));
    }

    #[test]
    fn test_bad_tuple_is_an_error() {
        const KML: &[u8] = b"<kml><Document><Placemark><LineString>\
            <coordinates>2.0,48.0 oops</coordinates>\
            </LineString></Placemark></Document></kml>";
        assert!(matches!(
            first_linestring(KML),
            Err(ParseError::BadCoordinate(t)) if t == "oops"
        ));
    }
}
