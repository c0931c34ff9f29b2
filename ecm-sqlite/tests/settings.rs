mod common;

use common::TestApp;
use ecm_core::{
    models::{Monthly, Settings, VolumeShapeKind},
    ports::{Application, SettingsRepository},
};

#[tokio::test]
async fn settings_roundtrip() -> anyhow::Result<()> {
    let app = TestApp::open().await?;
    let db = app.database();

    assert!(db.get_settings().await?.is_none());

    let settings = Settings::default();
    db.update_settings(settings.clone(), app.now()).await?;
    assert_eq!(db.get_settings().await?, Some(settings.clone()));

    let mut changed = settings;
    changed.states.push("WA".to_owned());
    changed
        .volume_shapes
        .insert(VolumeShapeKind::Custom, Monthly::splat(8.5));
    db.update_settings(changed.clone(), app.now()).await?;
    assert_eq!(db.get_settings().await?, Some(changed));

    Ok(())
}
