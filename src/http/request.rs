//! Request payload parsing.
//!
//! # Design Decisions
//! - An unparseable body is treated as an empty field set, never a failure
//! - `null` and a missing key both mean "not provided"
//! - A provided field of the wrong JSON type is a validation error
//! - Timestamps are parsed here so the store only sees typed values

use serde_json::{Map, Value};

use crate::booking::{BookingError, BookingFilter, BookingPatch, BookingResult, NewBooking, Timestamp};

/// Fields a client may send for a booking. Each one is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingPayload {
    pub box_id: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl BookingPayload {
    /// Parse a raw request body.
    pub fn from_body(body: &[u8]) -> BookingResult<Self> {
        let object = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(object)) => object,
            Ok(_) | Err(_) => {
                if !body.is_empty() {
                    tracing::debug!(len = body.len(), "Unparseable booking payload treated as empty");
                }
                return Ok(Self::default());
            }
        };

        Ok(Self {
            box_id: string_field(&object, "boxId")?,
            start: string_field(&object, "start")?,
            end: string_field(&object, "end")?,
        })
    }

    /// Build a create request. All three fields are required.
    pub fn into_new_booking(self) -> BookingResult<NewBooking> {
        let missing: Vec<&str> = [
            ("boxId", self.box_id.is_none()),
            ("start", self.start.is_none()),
            ("end", self.end.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        match (self.box_id, self.start, self.end) {
            (Some(box_id), Some(start), Some(end)) => {
                NewBooking::new(box_id, Timestamp::parse(&start)?, Timestamp::parse(&end)?)
            }
            _ => Err(BookingError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            ))),
        }
    }

    /// Build a partial update from whichever fields were provided.
    pub fn into_patch(self) -> BookingResult<BookingPatch> {
        Ok(BookingPatch {
            box_id: self.box_id,
            start: self.start.as_deref().map(Timestamp::parse).transpose()?,
            end: self.end.as_deref().map(Timestamp::parse).transpose()?,
        })
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> BookingResult<Option<String>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(BookingError::Validation(format!("{} must be a string", key))),
    }
}

/// Query parameters for `GET /bookings`.
///
/// Built from raw key/value pairs so no query string can be rejected: the
/// first occurrence of a key wins, an empty value means "no filter" and
/// unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub box_id: Option<String>,
    pub date: Option<String>,
}

impl ListQuery {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut box_id = None;
        let mut date = None;
        for (key, value) in pairs {
            let field = match key.as_str() {
                "boxId" => &mut box_id,
                "date" => &mut date,
                _ => continue,
            };
            field.get_or_insert(value);
        }

        Self {
            box_id: box_id.filter(|v: &String| !v.is_empty()),
            date: date.filter(|v: &String| !v.is_empty()),
        }
    }
}

impl From<ListQuery> for BookingFilter {
    fn from(query: ListQuery) -> Self {
        BookingFilter {
            box_id: query.box_id,
            date: query.date,
        }
    }
}
