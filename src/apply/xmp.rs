// Copyright 2025 Seth Pendergrass. See LICENSE.

//! Adapter inspecting XMP sidecar files.
//!
//! XMP serializes properties either as attributes of an `rdf:Description`
//! element or as child elements with text content; both forms are read here.

use std::{fs, path::Path};

use quick_xml::{
  Reader,
  events::{BytesStart, Event},
};

use super::ApplyOutcome;

/// Reports the camera model, capture timestamp and GPS state of an XMP
/// sidecar. Write-back is not implemented; applying always leaves the
/// sidecar untouched and returns `Inspected`.
pub struct XmpSidecarAdapter;

/// Properties of interest within an XMP packet.
#[derive(Debug, Default, PartialEq)]
pub struct XmpFields {
  pub model: Option<String>,
  pub date_time_original: Option<String>,
  pub gps_latitude: Option<String>,
  pub gps_longitude: Option<String>,
}

#[derive(Clone, Copy)]
enum FieldKey {
  Model,
  DateTimeOriginal,
  GpsLatitude,
  GpsLongitude,
}

impl XmpFields {
  /// Stores `value` under `key`, keeping the first occurrence.
  fn set(&mut self, key: FieldKey, value: String) {
    let slot = match key {
      FieldKey::Model => &mut self.model,
      FieldKey::DateTimeOriginal => &mut self.date_time_original,
      FieldKey::GpsLatitude => &mut self.gps_latitude,
      FieldKey::GpsLongitude => &mut self.gps_longitude,
    };

    if slot.is_none() {
      *slot = Some(value);
    }
  }
}

impl XmpSidecarAdapter {
  pub fn apply(
    &self,
    artifact: &Path,
    _track: &Path,
    _dry_run: bool,
  ) -> Result<ApplyOutcome, String> {
    let text = fs::read_to_string(artifact)
      .map_err(|e| format!("{}: Failed to read sidecar ({e}).", artifact.display()))?;

    let fields = extract_fields(&text);

    let show = |field: &Option<String>| field.as_deref().unwrap_or("-").to_string();
    log::info!(
      "{}: model {}, captured {}, GPS {} / {}",
      artifact.display(),
      show(&fields.model),
      show(&fields.date_time_original),
      show(&fields.gps_latitude),
      show(&fields.gps_longitude),
    );

    Ok(ApplyOutcome::Inspected)
  }
}

/// Maps a (possibly prefixed) XMP property name to a field of interest.
fn field_key(name: &[u8]) -> Option<FieldKey> {
  let name = String::from_utf8_lossy(name);
  let local = name.rsplit(':').next().unwrap_or(&name);

  match local {
    "Model" => Some(FieldKey::Model),
    "DateTimeOriginal" => Some(FieldKey::DateTimeOriginal),
    "GPSLatitude" => Some(FieldKey::GpsLatitude),
    "GPSLongitude" => Some(FieldKey::GpsLongitude),
    _ => None,
  }
}

/// Pulls the properties of interest out of an XMP packet.
fn extract_fields(xml: &str) -> XmpFields {
  let mut fields = XmpFields::default();
  let mut reader = Reader::from_reader(xml.as_bytes());
  reader.config_mut().trim_text(true);

  let mut buf = Vec::new();
  let mut current: Option<FieldKey> = None;

  loop {
    match reader.read_event_into(&mut buf) {
      Ok(Event::Start(ref e)) => {
        scan_attributes(e, &mut fields);
        current = field_key(e.name().as_ref());
      }
      Ok(Event::Empty(ref e)) => scan_attributes(e, &mut fields),
      Ok(Event::Text(ref e)) => {
        if let Some(key) = current {
          if let Ok(value) = e.unescape() {
            let value = value.trim();
            if !value.is_empty() {
              fields.set(key, value.to_string());
            }
          }
        }
      }
      Ok(Event::End(_)) => current = None,
      Ok(Event::Eof) => break,
      Err(_) => break,
      _ => {}
    }
    buf.clear();
  }

  fields
}

/// Collects properties serialized as attributes of `element`.
fn scan_attributes(element: &BytesStart, fields: &mut XmpFields) {
  for attr in element.attributes().flatten() {
    if let Some(key) = field_key(attr.key.as_ref()) {
      if let Ok(value) = attr.unescape_value() {
        fields.set(key, value.into_owned());
      }
    }
  }
}
