// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

//! Wire representations of the backend resources.
//!
//! The backend speaks Spanish field names and carries two legacy encodings
//! this module resolves once, in both directions: the `"[CLASE] "` prefix on
//! an entry's notes marking a teaching occurrence, and the recurrence
//! metadata spread over `recurrente`/`semestre_*`/`ocurrencias`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use sala_core::schedule::normalize_time;
use sala_core::{
    DeskStep, EntryDraft, EntryKind, EntrySchedule, FrontDeskLog, Recurrence, RegisteredStep,
    Reservation, ReservationDraft, ReservationStatus, ScheduleEntry, Space, SpaceKind,
    weekday_from_index, weekday_index,
};

use crate::error::ApiError;

/// The notes prefix the legacy backend uses to mark class entries.
const CLASS_MARKER: &str = "[CLASE]";

const DATETIME_WIRE: &str = "%Y-%m-%dT%H:%M:%S";

/// List endpoints answer either a bare array or a paginated envelope,
/// depending on backend version.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListDto<T> {
    Plain(Vec<T>),
    Paged { results: Vec<T> },
}

impl<T> ListDto<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListDto::Plain(items) | ListDto::Paged { results: items } => items,
        }
    }
}

/// `GET /espacios/{id}/` body.
#[derive(Debug, Deserialize)]
pub struct SpaceDto {
    pub id: u64,
    pub codigo: String,
    pub nombre: String,
    pub tipo: String,
    pub capacidad: u32,
    #[serde(default)]
    pub piso: Option<String>,
    #[serde(default)]
    pub ubicacion: Option<String>,
    pub activo: bool,
    #[serde(default)]
    pub recursos: Option<Vec<String>>,
}

impl SpaceDto {
    pub fn into_space(self) -> Space {
        let kind = match self.tipo.as_str() {
            "salon" => SpaceKind::Room,
            "laboratorio" => SpaceKind::Lab,
            "auditorio" => SpaceKind::Hall,
            other => {
                tracing::warn!(space = self.id, tipo = other, "unknown space type");
                SpaceKind::default()
            }
        };
        Space {
            id: self.id,
            code: self.codigo,
            name: self.nombre,
            kind,
            capacity: self.capacidad,
            floor: self.piso,
            location: self.ubicacion,
            active: self.activo,
            resources: self.recursos.unwrap_or_default(),
        }
    }
}

/// `GET /espacios-disponibilidad/` item: an availability window when
/// `bloqueo` is false, a block or class when true.
#[derive(Debug, Deserialize)]
pub struct EntryDto {
    pub id: u64,
    pub espacio: u64,
    pub bloqueo: bool,
    #[serde(default)]
    pub dia_semana: Option<u8>,
    pub hora_inicio: String,
    pub hora_fin: String,
    #[serde(default)]
    pub fecha_inicio: Option<NaiveDate>,
    #[serde(default)]
    pub fecha_fin: Option<NaiveDate>,
    #[serde(default)]
    pub notas: Option<String>,
}

impl EntryDto {
    pub fn into_entry(self) -> Result<ScheduleEntry, ApiError> {
        let start = normalize_time(&self.hora_inicio)
            .ok_or_else(|| ApiError::Decode(format!("bad hora_inicio: {:?}", self.hora_inicio)))?;
        let end = normalize_time(&self.hora_fin)
            .ok_or_else(|| ApiError::Decode(format!("bad hora_fin: {:?}", self.hora_fin)))?;

        let schedule = match (self.dia_semana, self.fecha_inicio, self.fecha_fin) {
            (Some(index), _, _) => EntrySchedule::Weekly {
                weekday: weekday_from_index(index)
                    .ok_or_else(|| ApiError::Decode(format!("bad dia_semana: {index}")))?,
                start,
                end,
            },
            (None, Some(first), Some(last)) => EntrySchedule::OneOff {
                first,
                last,
                start,
                end,
            },
            (None, _, _) => {
                return Err(ApiError::Decode(format!(
                    "entry {} has neither dia_semana nor a date range",
                    self.id
                )));
            }
        };

        let (kind, notes) = if self.bloqueo {
            resolve_class_marker(self.notas)
        } else {
            (EntryKind::Availability, self.notas)
        };

        Ok(ScheduleEntry {
            id: self.id,
            space: self.espacio,
            kind,
            schedule,
            notes,
        })
    }
}

/// Splits the legacy class marker off an exclusion entry's notes.
fn resolve_class_marker(notas: Option<String>) -> (EntryKind, Option<String>) {
    match notas {
        Some(notas) if notas.starts_with(CLASS_MARKER) => {
            let rest = notas
                .strip_prefix(CLASS_MARKER)
                .unwrap_or_default()
                .trim_start();
            let notes = (!rest.is_empty()).then(|| rest.to_string());
            (EntryKind::Class, notes)
        }
        notas => (EntryKind::Block, notas),
    }
}

/// `POST /espacios-disponibilidad/` body.
#[derive(Debug, Serialize)]
pub struct NewEntryDto {
    pub espacio: u64,
    pub bloqueo: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dia_semana: Option<u8>,
    pub hora_inicio: String,
    pub hora_fin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_inicio: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_fin: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notas: Option<String>,
}

impl NewEntryDto {
    pub fn from_draft(draft: &EntryDraft) -> Self {
        let (start, end) = draft.schedule.times();
        let (dia_semana, fecha_inicio, fecha_fin) = match draft.schedule {
            EntrySchedule::Weekly { weekday, .. } => (Some(weekday_index(weekday)), None, None),
            EntrySchedule::OneOff { first, last, .. } => (None, Some(first), Some(last)),
        };

        // Class entries re-apply the marker the backend still expects.
        let notas = match (draft.kind, &draft.notes) {
            (EntryKind::Class, Some(notes)) => Some(format!("{CLASS_MARKER} {notes}")),
            (EntryKind::Class, None) => Some(CLASS_MARKER.to_string()),
            (_, notes) => notes.clone(),
        };

        Self {
            espacio: draft.space,
            bloqueo: draft.kind.is_exclusion(),
            dia_semana,
            hora_inicio: start.format("%H:%M:%S").to_string(),
            hora_fin: end.format("%H:%M:%S").to_string(),
            fecha_inicio,
            fecha_fin,
            notas,
        }
    }
}

/// `GET /reservas/` item.
#[derive(Debug, Deserialize)]
pub struct ReservationDto {
    pub id: u64,
    pub espacio: u64,
    pub solicitante: String,
    pub fecha_inicio: String,
    pub fecha_fin: String,
    pub estado: String,
    #[serde(default)]
    pub asistentes: Option<u32>,
    #[serde(default)]
    pub requiere_llave: bool,
    #[serde(default)]
    pub motivo: Option<String>,
    #[serde(default)]
    pub recurrente: bool,
    #[serde(default)]
    pub semestre_inicio: Option<NaiveDate>,
    #[serde(default)]
    pub semestre_fin: Option<NaiveDate>,
    #[serde(default)]
    pub ocurrencias: Option<u32>,
    /// Id of the series head this row was duplicated from, when the backend
    /// materialized the series server-side. Such rows must not be
    /// re-expanded on top of the head's own expansion.
    #[serde(default)]
    pub serie: Option<u64>,
}

impl ReservationDto {
    pub fn into_reservation(self) -> Result<Reservation, ApiError> {
        let start = parse_wire_datetime(&self.fecha_inicio)
            .ok_or_else(|| ApiError::Decode(format!("bad fecha_inicio: {:?}", self.fecha_inicio)))?;
        let end = parse_wire_datetime(&self.fecha_fin)
            .ok_or_else(|| ApiError::Decode(format!("bad fecha_fin: {:?}", self.fecha_fin)))?;

        let status = match self.estado.as_str() {
            "pendiente" => ReservationStatus::Pending,
            "aprobada" => ReservationStatus::Approved,
            "rechazada" => ReservationStatus::Rejected,
            other => {
                tracing::warn!(reservation = self.id, estado = other, "unknown status");
                ReservationStatus::default()
            }
        };

        let is_duplicate = self.serie.is_some_and(|head| head != self.id);
        let recurrence = match (self.recurrente && !is_duplicate, self.semestre_fin) {
            (true, Some(until)) => match self.ocurrencias {
                Some(count) => Recurrence::Weekly { until, count },
                None => {
                    let first = self.semestre_inicio.unwrap_or_else(|| start.date());
                    Recurrence::weekly_through(first, until)
                }
            },
            _ => Recurrence::None,
        };

        Ok(Reservation {
            id: self.id,
            space: self.espacio,
            requester: self.solicitante,
            start,
            end,
            status,
            attendees: self.asistentes.unwrap_or(1),
            needs_key: self.requiere_llave,
            purpose: self.motivo,
            recurrence,
        })
    }
}

/// `POST /reservas/` body.
#[derive(Debug, Serialize)]
pub struct NewReservationDto {
    pub espacio: u64,
    pub fecha_inicio: String,
    pub fecha_fin: String,
    pub asistentes: u32,
    pub requiere_llave: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivo: Option<String>,
    pub recurrente: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semestre_inicio: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semestre_fin: Option<NaiveDate>,
}

impl NewReservationDto {
    pub fn from_draft(draft: &ReservationDraft) -> Self {
        Self {
            espacio: draft.space,
            fecha_inicio: draft.start.format(DATETIME_WIRE).to_string(),
            fecha_fin: draft.end.format(DATETIME_WIRE).to_string(),
            asistentes: draft.attendees,
            requiere_llave: draft.needs_key,
            motivo: draft.purpose.clone(),
            recurrente: draft.recurrence.is_recurring(),
            semestre_inicio: draft.semester_start(),
            semestre_fin: draft.semester_end(),
        }
    }
}

/// `GET /registros/` item: one registered front-desk step.
#[derive(Debug, Deserialize)]
pub struct DeskStepDto {
    pub reserva: u64,
    pub paso: String,
    pub actor: String,
    pub fecha: String,
    #[serde(default)]
    pub notas: Option<String>,
}

impl DeskStepDto {
    fn step(&self) -> Result<(DeskStep, RegisteredStep), ApiError> {
        let step = match self.paso.as_str() {
            "apertura" => DeskStep::Opening,
            "asistencia" => DeskStep::Attendance,
            "cierre" => DeskStep::Closure,
            other => return Err(ApiError::Decode(format!("unknown desk step: {other:?}"))),
        };
        let at = parse_wire_datetime(&self.fecha)
            .ok_or_else(|| ApiError::Decode(format!("bad fecha: {:?}", self.fecha)))?;
        Ok((
            step,
            RegisteredStep {
                actor: self.actor.clone(),
                at,
                notes: self.notas.clone(),
            },
        ))
    }
}

/// Folds the step rows for one reservation into a [`FrontDeskLog`].
///
/// When the backend holds several rows for the same step, the latest wins.
pub fn fold_desk_log(reservation: u64, rows: &[DeskStepDto]) -> Result<FrontDeskLog, ApiError> {
    let mut log = FrontDeskLog {
        reservation,
        ..FrontDeskLog::default()
    };
    for row in rows.iter().filter(|r| r.reserva == reservation) {
        let (step, registered) = row.step()?;
        let slot = match step {
            DeskStep::Opening => &mut log.opening,
            DeskStep::Attendance => &mut log.attendance,
            DeskStep::Closure => &mut log.closure,
        };
        if slot.as_ref().is_none_or(|prev| prev.at <= registered.at) {
            *slot = Some(registered);
        }
    }
    Ok(log)
}

/// `POST /registros/` body.
#[derive(Debug, Serialize)]
pub struct NewDeskStepDto {
    pub reserva: u64,
    pub paso: &'static str,
    pub actor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notas: Option<String>,
}

impl NewDeskStepDto {
    pub fn new(reservation: u64, step: DeskStep, actor: String, notes: Option<String>) -> Self {
        let paso = match step {
            DeskStep::Opening => "apertura",
            DeskStep::Attendance => "asistencia",
            DeskStep::Closure => "cierre",
        };
        Self {
            reserva: reservation,
            paso,
            actor,
            notas: notes,
        }
    }
}

/// Parses the datetime shapes the backend emits, newest format first.
pub fn parse_wire_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(s, DATETIME_WIRE)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Weekday};

    #[test]
    fn class_marker_resolves_to_kind_and_back() {
        let (kind, notes) = resolve_class_marker(Some("[CLASE] Calculo I".to_string()));
        assert_eq!(kind, EntryKind::Class);
        assert_eq!(notes.as_deref(), Some("Calculo I"));

        let (kind, notes) = resolve_class_marker(Some("Mantenimiento".to_string()));
        assert_eq!(kind, EntryKind::Block);
        assert_eq!(notes.as_deref(), Some("Mantenimiento"));

        let (kind, notes) = resolve_class_marker(Some("[CLASE]".to_string()));
        assert_eq!(kind, EntryKind::Class);
        assert_eq!(notes, None);

        let draft = EntryDraft {
            space: 4,
            kind: EntryKind::Class,
            schedule: EntrySchedule::Weekly {
                weekday: Weekday::Wed,
                start: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                end: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            },
            notes: Some("Calculo I".to_string()),
        };
        let dto = NewEntryDto::from_draft(&draft);
        assert!(dto.bloqueo);
        assert_eq!(dto.dia_semana, Some(2));
        assert_eq!(dto.notas.as_deref(), Some("[CLASE] Calculo I"));
    }

    #[test]
    fn entry_without_weekday_needs_a_date_range() {
        let dto = EntryDto {
            id: 1,
            espacio: 4,
            bloqueo: true,
            dia_semana: None,
            hora_inicio: "08:00".to_string(),
            hora_fin: "18:00".to_string(),
            fecha_inicio: None,
            fecha_fin: None,
            notas: None,
        };
        assert!(matches!(dto.into_entry(), Err(ApiError::Decode(_))));
    }

    #[test]
    fn space_type_maps_with_fallback() {
        let dto = |tipo: &str| SpaceDto {
            id: 4,
            codigo: "B-204".to_string(),
            nombre: "Aula B-204".to_string(),
            tipo: tipo.to_string(),
            capacidad: 40,
            piso: None,
            ubicacion: None,
            activo: true,
            recursos: None,
        };
        assert_eq!(dto("laboratorio").into_space().kind, SpaceKind::Lab);
        assert_eq!(dto("auditorio").into_space().kind, SpaceKind::Hall);
        assert_eq!(dto("bodega").into_space().kind, SpaceKind::Room);
    }

    #[test]
    fn wire_datetimes_parse_in_all_three_shapes() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 8)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap();
        assert_eq!(parse_wire_datetime("2024-05-08T14:00:00"), Some(expected));
        assert_eq!(parse_wire_datetime("2024-05-08 14:00:00"), Some(expected));
        assert_eq!(
            parse_wire_datetime("2024-05-08T14:00:00-05:00"),
            Some(expected)
        );
        assert_eq!(parse_wire_datetime("mañana"), None);
    }

    fn reservation_dto() -> ReservationDto {
        ReservationDto {
            id: 9,
            espacio: 4,
            solicitante: "vsoto".to_string(),
            fecha_inicio: "2024-03-04T14:00:00".to_string(),
            fecha_fin: "2024-03-04T16:00:00".to_string(),
            estado: "aprobada".to_string(),
            asistentes: Some(20),
            requiere_llave: true,
            motivo: None,
            recurrente: true,
            semestre_inicio: NaiveDate::from_ymd_opt(2024, 3, 4),
            semestre_fin: NaiveDate::from_ymd_opt(2024, 6, 3),
            ocurrencias: None,
            serie: None,
        }
    }

    #[test]
    fn recurrence_count_is_computed_when_missing() {
        let reservation = reservation_dto().into_reservation().unwrap();
        assert_eq!(
            reservation.recurrence,
            Recurrence::Weekly {
                until: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
                count: 14,
            }
        );
        assert_eq!(reservation.status, ReservationStatus::Approved);
    }

    #[test]
    fn duplicate_series_rows_lose_their_recurrence() {
        let mut dto = reservation_dto();
        dto.id = 10;
        dto.serie = Some(9);
        let duplicate = dto.into_reservation().unwrap();
        assert_eq!(duplicate.recurrence, Recurrence::None);

        // The head row keeps it even when `serie` points at itself.
        let mut dto = reservation_dto();
        dto.serie = Some(9);
        assert!(dto.into_reservation().unwrap().recurrence.is_recurring());
    }

    #[test]
    fn desk_rows_fold_latest_step_wins() {
        let row = |paso: &str, fecha: &str| DeskStepDto {
            reserva: 9,
            paso: paso.to_string(),
            actor: "porteria".to_string(),
            fecha: fecha.to_string(),
            notas: None,
        };
        let rows = vec![
            row("apertura", "2024-05-08T13:55:00"),
            row("apertura", "2024-05-08T14:05:00"),
            row("asistencia", "2024-05-08T14:10:00"),
        ];

        let log = fold_desk_log(9, &rows).unwrap();
        assert!(log.is_open());
        assert_eq!(
            log.opening.unwrap().at,
            parse_wire_datetime("2024-05-08T14:05:00").unwrap()
        );
        assert!(log.attendance.is_some());
        assert!(log.closure.is_none());
    }

    #[test]
    fn list_bodies_unwrap_both_shapes() {
        let plain: ListDto<u32> = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(plain.into_vec(), vec![1, 2, 3]);

        let paged: ListDto<u32> =
            serde_json::from_str(r#"{"count": 3, "results": [1, 2, 3]}"#).unwrap();
        assert_eq!(paged.into_vec(), vec![1, 2, 3]);
    }
}
