use valuecalc_core::{
    params::{MONTHLY_VISITORS, NUMBER_OF_CMS},
    session::{drivers_key, inputs_key, Session},
    store::{FileStore, KeyValueStore},
    DriverId, Horizon,
};

#[test]
fn saved_session_survives_reopening_from_disk() {
    let dir = tempfile::tempdir().unwrap();

    let mut session = Session::open(FileStore::open(dir.path()).unwrap(), "ecommerce").unwrap();
    session.set_param(MONTHLY_VISITORS, 250_000.0).unwrap();
    session.disable(DriverId::Risk);
    session.save().unwrap();
    let before = session.evaluate(0.8, Horizon::FiveYears).unwrap();
    drop(session);

    let reopened = Session::open(FileStore::open(dir.path()).unwrap(), "ecommerce").unwrap();
    assert_eq!(reopened.model().get(MONTHLY_VISITORS), Some(250_000.0));
    assert_eq!(reopened.drivers(), &[DriverId::Revenue, DriverId::Cx, DriverId::Efficiency]);

    let after = reopened.evaluate(0.8, Horizon::FiveYears).unwrap();
    assert_eq!(after.aggregate, before.aggregate);
}

#[test]
fn presets_persist_independently() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::open(FileStore::open(dir.path()).unwrap(), "marketing").unwrap();
    session.set_param(NUMBER_OF_CMS, 5.0).unwrap();
    session.save().unwrap();

    session.switch_preset("knowledge").unwrap();
    assert_eq!(session.model().get(NUMBER_OF_CMS), Some(4.0));
    session.save().unwrap();

    let keys = session.store().keys().unwrap();
    assert_eq!(
        keys,
        vec![
            drivers_key("knowledge"),
            drivers_key("marketing"),
            inputs_key("knowledge"),
            inputs_key("marketing"),
        ]
    );
}

#[test]
fn reset_removes_files_for_current_preset_only() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::open(FileStore::open(dir.path()).unwrap(), "marketing").unwrap();
    session.save().unwrap();
    session.switch_preset("platform").unwrap();
    session.save().unwrap();

    session.reset().unwrap();

    assert!(dir.path().join("inputs-marketing.json").exists());
    assert!(!dir.path().join("inputs-platform.json").exists());
    assert!(!dir.path().join("drivers-platform.json").exists());
}
