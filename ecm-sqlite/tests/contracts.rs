mod common;

use common::{TestApp, contract};
use ecm_core::{
    models::ContractType,
    ports::{Application, ContractRepository},
};

#[tokio::test]
async fn contract_lifecycle() -> anyhow::Result<()> {
    let app = TestApp::open().await?;
    let db = app.database();

    assert!(db.list_contracts().await?.is_empty());

    let data = contract("Alpha");
    let id = app.generate_contract_id(&data);
    let created = db.create_contract(id, data.clone(), app.now()).await?;
    assert_eq!(created.id, id);
    assert_eq!(created.data, data);

    let fetched = db.get_contract(id).await?.expect("contract exists");
    assert_eq!(fetched, created);

    let mut changed = data.clone();
    changed.kind = ContractType::Retail;
    changed.category = "C&I".to_owned();
    changed.reference_date = Some(time::macros::date!(2025 - 06 - 30));
    let updated = db.update_contract(id, changed.clone(), app.now()).await?;
    assert_eq!(updated.map(|record| record.data), Some(changed.clone()));
    assert_eq!(db.get_contract(id).await?.map(|r| r.data), Some(changed));

    assert!(db.delete_contract(id).await?);
    assert!(!db.delete_contract(id).await?);
    assert!(db.get_contract(id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn missing_contracts() -> anyhow::Result<()> {
    let app = TestApp::open().await?;
    let db = app.database();

    let data = contract("Ghost");
    let id = app.generate_contract_id(&data);
    assert!(db.get_contract(id).await?.is_none());
    assert!(db.update_contract(id, data, app.now()).await?.is_none());
    assert!(db.list_contracts().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn contracts_list_in_creation_order() -> anyhow::Result<()> {
    let app = TestApp::open().await?;
    let db = app.database();

    let mut ids = Vec::new();
    for name in ["Charlie", "Alpha", "Bravo"] {
        let data = contract(name);
        let id = app.generate_contract_id(&data);
        db.create_contract(id, data, app.now()).await?;
        ids.push(id);
    }

    let listed: Vec<_> = db.list_contracts().await?.into_iter().map(|r| r.id).collect();
    assert_eq!(listed, ids);

    Ok(())
}

#[tokio::test]
async fn duplicate_ids_are_rejected() -> anyhow::Result<()> {
    let app = TestApp::open().await?;
    let db = app.database();

    let data = contract("Alpha");
    let id = app.generate_contract_id(&data);
    db.create_contract(id, data.clone(), app.now()).await?;
    assert!(db.create_contract(id, data, app.now()).await.is_err());

    Ok(())
}
