use crate::{Db, types::ContractRow};
use ecm_core::{
    models::{ContractData, ContractRecord},
    ports::ContractRepository,
};

impl ContractRepository for Db {
    async fn list_contracts(&self) -> Result<Vec<ContractRecord<Self::ContractId>>, Self::Error> {
        let rows = sqlx::query_as::<_, ContractRow>(
            r#"
            select
                id,
                json(data) as data
            from
                contract
            order by
                created_at, rowid
            "#,
        )
        .fetch_all(&self.reader)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_contract(
        &self,
        contract_id: Self::ContractId,
    ) -> Result<Option<ContractRecord<Self::ContractId>>, Self::Error> {
        let row = sqlx::query_as::<_, ContractRow>(
            r#"
            select
                id,
                json(data) as data
            from
                contract
            where
                id = $1
            "#,
        )
        .bind(contract_id)
        .fetch_optional(&self.reader)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn create_contract(
        &self,
        contract_id: Self::ContractId,
        data: ContractData,
        as_of: Self::DateTime,
    ) -> Result<ContractRecord<Self::ContractId>, Self::Error> {
        sqlx::query(
            r#"
            insert into
                contract (id, created_at, updated_at, data)
            values
                ($1, $2, $2, jsonb($3))
            "#,
        )
        .bind(contract_id)
        .bind(as_of)
        .bind(sqlx::types::Json(&data))
        .execute(&self.writer)
        .await?;

        Ok(ContractRecord {
            id: contract_id,
            data,
        })
    }

    async fn update_contract(
        &self,
        contract_id: Self::ContractId,
        data: ContractData,
        as_of: Self::DateTime,
    ) -> Result<Option<ContractRecord<Self::ContractId>>, Self::Error> {
        let result = sqlx::query(
            r#"
            update
                contract
            set
                data = jsonb($2),
                updated_at = $3
            where
                id = $1
            "#,
        )
        .bind(contract_id)
        .bind(sqlx::types::Json(&data))
        .bind(as_of)
        .execute(&self.writer)
        .await?;

        Ok((result.rows_affected() > 0).then(|| ContractRecord {
            id: contract_id,
            data,
        }))
    }

    async fn delete_contract(&self, contract_id: Self::ContractId) -> Result<bool, Self::Error> {
        let result = sqlx::query("delete from contract where id = $1")
            .bind(contract_id)
            .execute(&self.writer)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
