use crate::{
    db::admin_repository::parse_timestamp,
    errors::ApiError,
    models::survey::{NewSurveyResponse, SupportExpectation, SurveyResponse},
};
use rusqlite::{params, Connection, Result as RusqliteResult};

const RESPONSE_COLUMNS: &str = "id, respondent_first_name, respondent_last_name, \
     respondent_email, respondent_phone, club_name, respondent_role, other_role, \
     has_label, wants_label_support, has_welcomed_disabled, handicap_types, \
     other_handicap_type, public_types, adaptation_story, support_expectations, \
     other_expectation, adapted_material, other_material, desired_access, \
     additional_comments, created_at";

pub struct ResponseRepository {
    conn: Connection,
}

impl ResponseRepository {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    fn map_row_to_response(row: &rusqlite::Row) -> RusqliteResult<SurveyResponse> {
        Ok(SurveyResponse {
            id: row.get(0)?,
            respondent_first_name: row.get(1)?,
            respondent_last_name: row.get(2)?,
            respondent_email: row.get(3)?,
            respondent_phone: row.get(4)?,
            club_name: row.get(5)?,
            respondent_role: row.get(6)?,
            other_role: row.get(7)?,
            has_label: row.get(8)?,
            wants_label_support: row.get(9)?,
            has_welcomed_disabled: row.get(10)?,
            handicap_types: decode_list(row.get(11)?),
            other_handicap_type: row.get(12)?,
            public_types: decode_list(row.get(13)?),
            adaptation_story: row.get(14)?,
            support_expectations: decode_expectations(row.get(15)?),
            other_expectation: row.get(16)?,
            adapted_material: decode_list(row.get(17)?),
            other_material: row.get(18)?,
            desired_access: decode_list(row.get(19)?),
            additional_comments: row.get(20)?,
            created_at: parse_timestamp(row.get(21)?),
        })
    }

    pub fn create_response(
        &self,
        payload: &NewSurveyResponse,
    ) -> Result<SurveyResponse, ApiError> {
        let handicap_types = encode_json(&payload.handicap_types)?;
        let public_types = encode_json(&payload.public_types)?;
        let support_expectations = encode_json(&payload.support_expectations)?;
        let adapted_material = encode_json(&payload.adapted_material)?;
        let desired_access = encode_json(&payload.desired_access)?;

        self.conn
            .execute(
                "INSERT INTO responses (
                     respondent_first_name, respondent_last_name, respondent_email,
                     respondent_phone, club_name, respondent_role, other_role,
                     has_label, wants_label_support, has_welcomed_disabled,
                     handicap_types, other_handicap_type, public_types,
                     adaptation_story, support_expectations, other_expectation,
                     adapted_material, other_material, desired_access,
                     additional_comments
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                           ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)",
                params![
                    payload.respondent_first_name,
                    payload.respondent_last_name,
                    payload.respondent_email,
                    payload.respondent_phone,
                    payload.club_name,
                    payload.respondent_role,
                    payload.other_role,
                    payload.has_label,
                    payload.wants_label_support,
                    payload.has_welcomed_disabled,
                    handicap_types,
                    payload.other_handicap_type,
                    public_types,
                    payload.adaptation_story,
                    support_expectations,
                    payload.other_expectation,
                    adapted_material,
                    payload.other_material,
                    desired_access,
                    payload.additional_comments,
                ],
            )
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        let id = self.conn.last_insert_rowid();
        self.find_response_by_id(id)?
            .ok_or_else(|| ApiError::DatabaseError("Created response row not found".to_string()))
    }

    fn find_response_by_id(&self, id: i64) -> Result<Option<SurveyResponse>, ApiError> {
        use rusqlite::OptionalExtension;
        self.conn
            .query_row(
                &format!("SELECT {} FROM responses WHERE id = ?1", RESPONSE_COLUMNS),
                params![id],
                Self::map_row_to_response,
            )
            .optional()
            .map_err(|e| ApiError::DatabaseError(e.to_string()))
    }

    /// All responses, newest first. Filtering happens client-side over the
    /// full result set; there is no pagination.
    pub fn list_responses(&self) -> Result<Vec<SurveyResponse>, ApiError> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM responses ORDER BY created_at DESC, id DESC",
                RESPONSE_COLUMNS
            ))
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::map_row_to_response)
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        rows.collect::<RusqliteResult<Vec<SurveyResponse>>>()
            .map_err(|e| ApiError::DatabaseError(e.to_string()))
    }
}

fn encode_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value)
        .map_err(|e| ApiError::InternalError(format!("JSON encoding error: {}", e)))
}

fn decode_list(value: Option<String>) -> Vec<String> {
    value
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

fn decode_expectations(value: Option<String>) -> Vec<SupportExpectation> {
    value
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::init_schema;

    fn repo() -> ResponseRepository {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        ResponseRepository::new(conn)
    }

    fn minimal_payload() -> NewSurveyResponse {
        serde_json::from_str(
            r#"{
                "respondentFirstName": "Sophie",
                "respondentLastName": "Lefebvre",
                "respondentEmail": "sophie@club.fr",
                "clubName": "Cercle de Limoges",
                "respondentRole": "Secrétaire",
                "hasLabel": "Non",
                "hasWelcomedDisabled": "Non"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn minimal_submission_stores_nulls_and_empty_lists() {
        let repo = repo();
        let created = repo.create_response(&minimal_payload()).unwrap();

        assert_eq!(created.respondent_first_name, "Sophie");
        assert_eq!(created.respondent_phone, None);
        assert_eq!(created.other_role, None);
        assert_eq!(created.adaptation_story, None);
        assert_eq!(created.additional_comments, None);
        assert!(created.handicap_types.is_empty());
        assert!(created.public_types.is_empty());
        assert!(created.support_expectations.is_empty());
        assert!(created.adapted_material.is_empty());
        assert!(created.desired_access.is_empty());
    }

    #[test]
    fn list_fields_round_trip_through_json_columns() {
        let repo = repo();
        let mut payload = minimal_payload();
        payload.handicap_types =
            vec!["Handicap moteur".to_string(), "Handicap visuel".to_string()];
        payload.support_expectations = vec![
            SupportExpectation {
                label: "Formation des encadrants".to_string(),
                priority: 1,
            },
            SupportExpectation {
                label: "Matériel adapté".to_string(),
                priority: 2,
            },
        ];

        let created = repo.create_response(&payload).unwrap();
        assert_eq!(created.handicap_types, payload.handicap_types);
        assert_eq!(created.support_expectations, payload.support_expectations);
    }

    #[test]
    fn listing_is_newest_first() {
        let repo = repo();
        let first = repo.create_response(&minimal_payload()).unwrap();
        let second = repo.create_response(&minimal_payload()).unwrap();

        let ids: Vec<i64> = repo
            .list_responses()
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }
}
