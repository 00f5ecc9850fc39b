//! PostgreSQL-backed `ParticipantRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{ParticipantRepository, ParticipantRepositoryError};
use crate::domain::{
    NewParticipant, Participant, ParticipantCode, ParticipantId, SearchTerm, StampCount,
    validate_stamp_count,
};

use super::models::{NewParticipantRow, ParticipantRow};
use super::pool::{DbPool, PoolError};
use super::schema::estudiantes;

/// Diesel-backed implementation of the `ParticipantRepository` port.
#[derive(Clone)]
pub struct DieselParticipantRepository {
    pool: DbPool,
}

impl DieselParticipantRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ParticipantRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ParticipantRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: DieselError) -> ParticipantRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ParticipantRepositoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => {
            ParticipantRepositoryError::query("database query error")
        }
        _ => ParticipantRepositoryError::query("database error"),
    }
}

fn map_insert_error(error: DieselError, codigo: &ParticipantCode) -> ParticipantRepositoryError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ParticipantRepositoryError::duplicate_code(codigo.as_str())
        }
        other => map_diesel_error(other),
    }
}

fn row_to_participant(row: ParticipantRow) -> Result<Participant, ParticipantRepositoryError> {
    let sellos = validate_stamp_count(i64::from(row.sellos)).map_err(|_| {
        warn!(id = %row.id, sellos = row.sellos, "stored stamp count outside range");
        ParticipantRepositoryError::query("stored stamp count outside range")
    })?;
    Ok(Participant {
        id: ParticipantId::from_uuid(row.id),
        nombre: row.nombre,
        apellido: row.apellido,
        codigo: row.codigo,
        sellos,
        created_at: row.created_at,
    })
}

fn rows_to_participants(
    rows: Vec<ParticipantRow>,
) -> Result<Vec<Participant>, ParticipantRepositoryError> {
    rows.into_iter().map(row_to_participant).collect()
}

#[async_trait]
impl ParticipantRepository for DieselParticipantRepository {
    async fn search(
        &self,
        term: &SearchTerm,
        limit: usize,
    ) -> Result<Vec<Participant>, ParticipantRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = term.like_pattern();
        let rows: Vec<ParticipantRow> = estudiantes::table
            .filter(
                estudiantes::nombre
                    .ilike(pattern.as_str())
                    .or(estudiantes::apellido.ilike(pattern.as_str()))
                    .or(estudiantes::codigo.ilike(pattern.as_str())),
            )
            .order(estudiantes::apellido.asc())
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .select(ParticipantRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_participants(rows)
    }

    async fn find_by_id(
        &self,
        id: &ParticipantId,
    ) -> Result<Option<Participant>, ParticipantRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        estudiantes::table
            .find(*id.as_uuid())
            .select(ParticipantRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_participant)
            .transpose()
    }

    async fn find_by_code(
        &self,
        code: &ParticipantCode,
    ) -> Result<Option<Participant>, ParticipantRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        estudiantes::table
            .filter(estudiantes::codigo.eq(code.as_str()))
            .select(ParticipantRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_participant)
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<Participant>, ParticipantRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ParticipantRow> = estudiantes::table
            .order(estudiantes::apellido.asc())
            .select(ParticipantRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_participants(rows)
    }

    async fn insert(
        &self,
        participant: &NewParticipant,
    ) -> Result<Participant, ParticipantRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewParticipantRow {
            nombre: &participant.nombre,
            apellido: &participant.apellido,
            codigo: participant.codigo.as_str(),
            sellos: i16::from(StampCount::ZERO.get()),
        };
        let stored: ParticipantRow = diesel::insert_into(estudiantes::table)
            .values(&row)
            .returning(ParticipantRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, &participant.codigo))?;
        row_to_participant(stored)
    }

    async fn update_stamps(
        &self,
        id: &ParticipantId,
        sellos: StampCount,
    ) -> Result<Option<Participant>, ParticipantRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(estudiantes::table.find(*id.as_uuid()))
            .set(estudiantes::sellos.eq(i16::from(sellos.get())))
            .returning(ParticipantRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_participant)
            .transpose()
    }

    async fn delete(&self, id: &ParticipantId) -> Result<bool, ParticipantRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(estudiantes::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(sellos: i16) -> ParticipantRow {
        ParticipantRow {
            id: Uuid::new_v4(),
            nombre: "Ana".to_owned(),
            apellido: "Lopez".to_owned(),
            codigo: "A1".to_owned(),
            sellos,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn rows_convert_to_participants() {
        let source = row(4);
        let id = source.id;
        let participant = row_to_participant(source).expect("valid row");
        assert_eq!(*participant.id.as_uuid(), id);
        assert_eq!(participant.sellos.get(), 4);
    }

    #[rstest]
    #[case(-1)]
    #[case(8)]
    fn out_of_range_rows_are_query_errors(#[case] sellos: i16) {
        let err = row_to_participant(row(sellos)).expect_err("invalid row");
        assert!(matches!(err, ParticipantRepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_failures_are_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, ParticipantRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn missing_rows_map_to_query_errors() {
        let err = map_diesel_error(DieselError::NotFound);
        assert!(matches!(err, ParticipantRepositoryError::Query { .. }));
    }
}
