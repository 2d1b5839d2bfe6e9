//! Generador de números de caso
//!
//! Mantiene un contador por año en case_number_sequences. El incremento es
//! UN solo statement atómico (upsert con incremento): dos requests
//! concurrentes nunca observan el mismo valor pre-incremento, incluso al
//! crear el primer caso de un año nuevo.

use chrono::{DateTime, Datelike, Utc};
use sqlx::PgConnection;

use crate::utils::errors::AppError;

pub struct CaseNumberRepository;

impl CaseNumberRepository {
    /// Emite el siguiente número de caso para el año de `now`, dentro de la
    /// transacción de creación del caso. Si el statement falla no se emite
    /// número y la creación completa aborta.
    pub async fn next_case_number(
        conn: &mut PgConnection,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let year = (now.year() % 100) as i16;

        let (last_number,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO case_number_sequences (year, last_number)
            VALUES ($1, 1)
            ON CONFLICT (year)
            DO UPDATE SET last_number = case_number_sequences.last_number + 1
            RETURNING last_number
            "#,
        )
        .bind(year)
        .fetch_one(conn)
        .await?;

        Ok(Self::format_case_number(year, last_number))
    }

    /// Formato YY-NNNNN con la secuencia en 5 dígitos con ceros a la izquierda
    pub fn format_case_number(year: i16, number: i32) -> String {
        format!("{:02}-{:05}", year, number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formato_con_ceros() {
        assert_eq!(CaseNumberRepository::format_case_number(26, 1), "26-00001");
        assert_eq!(CaseNumberRepository::format_case_number(26, 42), "26-00042");
        assert_eq!(
            CaseNumberRepository::format_case_number(26, 99999),
            "26-99999"
        );
    }

    #[test]
    fn test_formato_anio_un_digito() {
        // Año 2107 -> "07"
        assert_eq!(CaseNumberRepository::format_case_number(7, 123), "07-00123");
    }

    #[test]
    fn test_secuencia_supera_cinco_digitos() {
        // Más de 99999 casos en un año: el número crece, no se trunca
        assert_eq!(
            CaseNumberRepository::format_case_number(26, 100001),
            "26-100001"
        );
    }
}
