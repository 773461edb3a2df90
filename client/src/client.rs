// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

//! High-level operations against the reservation backend.

use std::sync::Arc;

use reqwest::Method;

use sala_core::{
    DeskStep, EntryDraft, FrontDeskLog, Reservation, ReservationDraft, ScheduleEntry, Space,
    Timetable,
};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::schema::{
    DeskStepDto, EntryDto, ListDto, NewDeskStepDto, NewEntryDto, NewReservationDto, ReservationDto,
    SpaceDto, fold_desk_log,
};
use crate::session::Session;

/// Client for spaces, schedule entries, reservations and front-desk records.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use sala_client::{ApiConfig, SpaceClient, StaticSession};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ApiConfig {
///     base_url: "https://reservas.campus.edu/api".to_string(),
///     ..Default::default()
/// };
/// let session = Arc::new(StaticSession::new("token"));
///
/// let client = SpaceClient::new(config, session)?;
/// let timetable = client.fetch_timetable(4).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SpaceClient {
    http: HttpClient,
}

impl SpaceClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn new(config: ApiConfig, session: Arc<dyn Session>) -> Result<Self, ApiError> {
        Ok(Self {
            http: HttpClient::new(config, session)?,
        })
    }

    /// Fetches one space.
    pub async fn get_space(&self, id: u64) -> Result<Space, ApiError> {
        let req = self.http.build_request(Method::GET, &format!("/espacios/{id}/"));
        let dto: SpaceDto = self.http.execute(req).await?.json().await?;
        Ok(dto.into_space())
    }

    /// Fetches a space's availability windows (`bloqueo=false`).
    pub async fn list_availability(&self, space: u64) -> Result<Vec<ScheduleEntry>, ApiError> {
        self.list_entries(space, false).await
    }

    /// Fetches a space's block and class entries (`bloqueo=true`).
    pub async fn list_blocks(&self, space: u64) -> Result<Vec<ScheduleEntry>, ApiError> {
        self.list_entries(space, true).await
    }

    async fn list_entries(&self, space: u64, bloqueo: bool) -> Result<Vec<ScheduleEntry>, ApiError> {
        let req = self
            .http
            .build_request(Method::GET, "/espacios-disponibilidad/")
            .query(&[("espacio", space.to_string()), ("bloqueo", bloqueo.to_string())]);
        let list: ListDto<EntryDto> = self.http.execute(req).await?.json().await?;
        list.into_vec().into_iter().map(EntryDto::into_entry).collect()
    }

    /// Fetches every reservation for a space.
    pub async fn list_reservations(&self, space: u64) -> Result<Vec<Reservation>, ApiError> {
        let req = self
            .http
            .build_request(Method::GET, "/reservas/")
            .query(&[("espacio", space)]);
        let list: ListDto<ReservationDto> = self.http.execute(req).await?.json().await?;
        list.into_vec()
            .into_iter()
            .map(ReservationDto::into_reservation)
            .collect()
    }

    /// Submits a new reservation. The created resource is returned as the
    /// backend stored it, approval state included.
    pub async fn create_reservation(
        &self,
        draft: &ReservationDraft,
    ) -> Result<Reservation, ApiError> {
        let req = self
            .http
            .build_request(Method::POST, "/reservas/")
            .json(&NewReservationDto::from_draft(draft));
        let dto: ReservationDto = self.http.execute(req).await?.json().await?;
        dto.into_reservation()
    }

    /// Creates a new availability window, block or class entry.
    pub async fn create_entry(&self, draft: &EntryDraft) -> Result<ScheduleEntry, ApiError> {
        let req = self
            .http
            .build_request(Method::POST, "/espacios-disponibilidad/")
            .json(&NewEntryDto::from_draft(draft));
        let dto: EntryDto = self.http.execute(req).await?.json().await?;
        dto.into_entry()
    }

    /// Removes a schedule entry.
    pub async fn delete_entry(&self, id: u64) -> Result<(), ApiError> {
        let req = self
            .http
            .build_request(Method::DELETE, &format!("/espacios-disponibilidad/{id}/"));
        self.http.execute(req).await?;
        Ok(())
    }

    /// Fetches the front-desk trail for one reservation.
    pub async fn desk_log(&self, reservation: u64) -> Result<FrontDeskLog, ApiError> {
        let req = self
            .http
            .build_request(Method::GET, "/registros/")
            .query(&[("reserva", reservation)]);
        let list: ListDto<DeskStepDto> = self.http.execute(req).await?.json().await?;
        fold_desk_log(reservation, &list.into_vec())
    }

    /// Registers a front-desk step (opening, attendance or closure).
    pub async fn register_step(
        &self,
        reservation: u64,
        step: DeskStep,
        actor: String,
        notes: Option<String>,
    ) -> Result<(), ApiError> {
        let req = self
            .http
            .build_request(Method::POST, "/registros/")
            .json(&NewDeskStepDto::new(reservation, step, actor, notes));
        self.http.execute(req).await?;
        Ok(())
    }

    /// Fetches everything the calendar needs for one space in three calls:
    /// the space, both entry lists, and its reservations.
    ///
    /// The calls run sequentially; a 401 on the first aborts the rest.
    pub async fn fetch_timetable(&self, space: u64) -> Result<Timetable, ApiError> {
        let space = self.get_space(space).await?;
        let mut entries = self.list_availability(space.id).await?;
        entries.extend(self.list_blocks(space.id).await?);
        let reservations = self.list_reservations(space.id).await?;
        Ok(Timetable {
            space,
            entries,
            reservations,
        })
    }
}
