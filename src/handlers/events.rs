use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Response;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use tracing::{info, warn};

use crate::models::{Event, EventDetails, EventMode, NewEvent};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::fields::parse_list_field;
use crate::utils::response::with_message;
use crate::views::EVENT_LISTING_VIEW;

/// Exposed on the listing response so consumers can tell when a cached
/// rendering of the list is stale.
const VIEW_VERSION_HEADER: &str = "x-view-version";

#[derive(Serialize)]
struct CreatedEvent {
    event: Event,
}

#[derive(Serialize)]
struct EventList {
    events: Vec<Event>,
}

pub async fn create_event(State(state): State<AppState>, multipart: Multipart) -> Response {
    match submit_event(&state, multipart).await {
        Ok(event) => {
            let version = state.views.invalidate(EVENT_LISTING_VIEW);
            info!(event_id = %event.id, listing_version = version, "event created");
            with_message(
                StatusCode::CREATED,
                "Event created successfully",
                CreatedEvent { event },
            )
        }
        Err(err) => err.into_error_response("Event Creation Failed"),
    }
}

pub async fn list_events(State(state): State<AppState>) -> Response {
    match state.store.list_all().await {
        Ok(events) => {
            let mut response = with_message(
                StatusCode::OK,
                "Events fetched successfully",
                EventList { events },
            );
            let version = state.views.version(EVENT_LISTING_VIEW);
            response.headers_mut().insert(
                VIEW_VERSION_HEADER,
                version.to_string().parse().unwrap(),
            );
            response
        }
        Err(err) => err.into_error_response("Event fetching failed"),
    }
}

async fn submit_event(state: &AppState, multipart: Multipart) -> Result<Event, AppError> {
    let (fields, image) = collect_multipart(multipart).await?;

    let (filename, bytes) = image.ok_or(AppError::MissingImage)?;

    let tags = parse_list_field(fields.tags.as_deref());
    let agenda = parse_list_field(fields.agenda.as_deref());
    let details = fields.parse()?;

    // The image goes out first; the record is never created before the
    // hosted URL is known.
    let image_url = state
        .uploader
        .upload_image(bytes, &filename, &state.config.media.folder)
        .await?;

    let draft = NewEvent {
        details,
        image: image_url.clone(),
        tags,
        agenda,
    };

    match state.store.create(draft).await {
        Ok(event) => Ok(event),
        Err(err) => {
            // Nothing deletes the upload; the URL is logged so the asset can
            // be reclaimed manually.
            warn!(image = %image_url, "database write failed after upload; hosted image is orphaned");
            Err(err)
        }
    }
}

/// Text fields collected from the multipart body. Field names are
/// allow-listed; anything else is rejected rather than passed through.
#[derive(Default)]
struct SubmittedFields {
    title: Option<String>,
    overview: Option<String>,
    description: Option<String>,
    venue: Option<String>,
    location: Option<String>,
    date: Option<String>,
    time: Option<String>,
    mode: Option<String>,
    audience: Option<String>,
    organizer: Option<String>,
    tags: Option<String>,
    agenda: Option<String>,
}

impl SubmittedFields {
    fn set(&mut self, name: &str, value: String) -> Result<(), AppError> {
        let slot = match name {
            "title" => &mut self.title,
            "overview" => &mut self.overview,
            "description" => &mut self.description,
            "venue" => &mut self.venue,
            "location" => &mut self.location,
            "date" => &mut self.date,
            "time" => &mut self.time,
            "mode" => &mut self.mode,
            "audience" => &mut self.audience,
            "organizer" => &mut self.organizer,
            "tags" => &mut self.tags,
            "agenda" => &mut self.agenda,
            other => {
                return Err(AppError::Validation(format!(
                    "unexpected form field: {}",
                    other
                )))
            }
        };
        *slot = Some(value);
        Ok(())
    }

    fn parse(self) -> Result<EventDetails, AppError> {
        let date_raw = self.date.ok_or_else(|| missing("date"))?;
        let date = NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d")
            .map_err(|_| AppError::Validation(format!("invalid date: {}", date_raw)))?;

        let time_raw = self.time.ok_or_else(|| missing("time"))?;
        let time = parse_time(&time_raw)
            .ok_or_else(|| AppError::Validation(format!("invalid time: {}", time_raw)))?;

        let mode = self
            .mode
            .ok_or_else(|| missing("mode"))?
            .parse::<EventMode>()
            .map_err(AppError::Validation)?;

        Ok(EventDetails {
            title: self.title.ok_or_else(|| missing("title"))?,
            overview: self.overview.ok_or_else(|| missing("overview"))?,
            description: self.description.ok_or_else(|| missing("description"))?,
            venue: self.venue.ok_or_else(|| missing("venue"))?,
            location: self.location.ok_or_else(|| missing("location"))?,
            date,
            time,
            mode,
            audience: self.audience.ok_or_else(|| missing("audience"))?,
            organizer: self.organizer.ok_or_else(|| missing("organizer"))?,
        })
    }
}

fn missing(field: &str) -> AppError {
    AppError::Validation(format!("missing required field: {}", field))
}

// HTML time inputs send HH:MM, but HH:MM:SS is accepted too.
fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

async fn collect_multipart(
    mut multipart: Multipart,
) -> Result<(SubmittedFields, Option<(String, Vec<u8>)>), AppError> {
    let mut fields = SubmittedFields::default();
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            return Err(AppError::Validation("form field without a name".to_string()));
        };

        if name == "image" {
            let filename = field.file_name().unwrap_or("upload").to_owned();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("unreadable image part: {}", e)))?;
            image = Some((filename, bytes.to_vec()));
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("unreadable field {}: {}", name, e)))?;
            fields.set(&name, value)?;
        }
    }

    Ok((fields, image))
}
