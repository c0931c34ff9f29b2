use crate::Db;
use ecm_core::{models::Settings, ports::SettingsRepository};

impl SettingsRepository for Db {
    async fn get_settings(&self) -> Result<Option<Settings>, Self::Error> {
        let settings = sqlx::query_scalar::<_, sqlx::types::Json<Settings>>(
            "select json(data) from settings where id = 0",
        )
        .fetch_optional(&self.reader)
        .await?;

        Ok(settings.map(|json| json.0))
    }

    async fn update_settings(&self, settings: Settings, as_of: Self::DateTime) -> Result<(), Self::Error> {
        sqlx::query(
            r#"
            insert into
                settings (id, as_of, data)
            values
                (0, $1, jsonb($2))
            on conflict (id) do update set
                as_of = excluded.as_of,
                data = excluded.data
            "#,
        )
        .bind(as_of)
        .bind(sqlx::types::Json(settings))
        .execute(&self.writer)
        .await?;

        Ok(())
    }
}
